use crate::domain::{CountError, IntVec, Matrix, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Count non-negative integer solutions of `A x = b` by exhaustive search.
///
/// Each `x_j` ranges over `0..=min_i(b_i / A_ij)` taken over the positive entries of
/// column `j`. Exponential in the size of `b`; intended only for cross-validation.
pub fn debug_brute_force(matrix: &Matrix, b: &IntVec) -> Result<BigUint> {
    if b.dim() != matrix.num_rows() {
        return Err(CountError::InvalidInput(format!(
            "Target has {} entries but matrix has {} rows",
            b.dim(),
            matrix.num_rows()
        )));
    }
    if b.has_negative() {
        return Err(CountError::InvalidInput(format!("Negative entry in target {}", b)));
    }
    if let Some(j) = matrix.empty_column() {
        return Err(CountError::InvalidInput(format!("Matrix column {} is all zero", j)));
    }

    let bounds = IntVec::new(
        (0..matrix.num_cols())
            .map(|j| {
                (0..matrix.num_rows())
                    .filter(|&i| matrix.entry(i, j) > 0)
                    .map(|i| b.get(i) / matrix.entry(i, j))
                    .min()
                    .unwrap_or(0)
            })
            .collect(),
    );

    let mut count = BigUint::zero();
    let mut x = IntVec::zeros(matrix.num_cols());
    loop {
        if matrix.mul(&x) == *b {
            count += BigUint::one();
        }
        if !x.advance_le(&bounds) {
            break;
        }
    }
    Ok(count)
}
