// Meet-in-the-middle construction of the zero/one table
//
// The columns are split into two halves, each half's table of partial sums is built
// recursively, and the halves are combined by convolution:
//     result[r] = sum over r1 + r2 = r of T1[r1] * T2[r2]

use super::zero_one::{zero_one_counts, ZeroOneTable};
use crate::domain::{IntVec, Matrix};
use num_bigint::BigUint;
use num_traits::One;
use tracing::debug;

/// Build the same table as [`zero_one_counts`] by splitting the columns in half.
///
/// Halves with at most `leaf_columns` columns are enumerated directly.
pub fn divide_and_conquer_counts(matrix: &Matrix, leaf_columns: usize) -> ZeroOneTable {
    let columns: Vec<usize> = (0..matrix.num_cols()).collect();
    let table = half_counts(matrix, &columns, leaf_columns.max(1));

    debug!(
        columns = matrix.num_cols(),
        leaf_columns,
        entries = table.len(),
        "built zero/one table by divide and conquer"
    );

    table
}

fn half_counts(matrix: &Matrix, cols: &[usize], leaf_columns: usize) -> ZeroOneTable {
    match cols.len() {
        0 | 1 => {
            let mut table = ZeroOneTable::new();
            table.add(IntVec::zeros(matrix.num_rows()), BigUint::one());
            if let Some(&j) = cols.first() {
                table.add(matrix.column(j), BigUint::one());
            }
            table
        }
        n if n <= leaf_columns => zero_one_counts(&matrix.select_columns(cols)),
        n => {
            let (left, right) = cols.split_at(n / 2);
            let t1 = half_counts(matrix, left, leaf_columns);
            let t2 = half_counts(matrix, right, leaf_columns);
            convolve(&t1, &t2)
        }
    }
}

/// Combine the partial-sum tables of two disjoint column sets
///
/// Every sum stays within the matrix row totals, which `Matrix::new` keeps inside `i64`.
fn convolve(t1: &ZeroOneTable, t2: &ZeroOneTable) -> ZeroOneTable {
    let mut result = ZeroOneTable::new();
    for (r1, c1) in t1.iter() {
        for (r2, c2) in t2.iter() {
            result.add(r1.plus(r2), c1 * c2);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_direct_enumeration() {
        let a = Matrix::new(vec![
            vec![1, 1, 1, 0, 0, 0, 2],
            vec![0, 0, 1, 1, 1, 0, 1],
            vec![1, 0, 0, 0, 1, 3, 0],
        ])
        .unwrap();
        let direct = zero_one_counts(&a);
        for leaf in 0..=7 {
            assert_eq!(divide_and_conquer_counts(&a, leaf), direct, "leaf = {}", leaf);
        }
    }

    #[test]
    fn single_column_base_case() {
        let a = Matrix::new(vec![vec![4], vec![1]]).unwrap();
        let table = divide_and_conquer_counts(&a, 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&IntVec::new(vec![4, 1])), Some(&BigUint::one()));
        assert_eq!(table.get(&IntVec::zeros(2)), Some(&BigUint::one()));
    }

    #[test]
    fn repeated_columns_accumulate_counts() {
        let a = Matrix::new(vec![vec![1; 6]]).unwrap();
        let table = divide_and_conquer_counts(&a, 1);
        // C(6, 3)
        assert_eq!(table.get(&IntVec::new(vec![3])), Some(&BigUint::from(20u32)));
        assert_eq!(table.total(), BigUint::from(64u32));
    }

    #[test]
    fn convolution_multiplies_counts_of_disjoint_halves() {
        let mut left = ZeroOneTable::new();
        left.add(IntVec::new(vec![0, 0]), BigUint::one());
        left.add(IntVec::new(vec![1, 0]), BigUint::from(2u32));
        let mut right = ZeroOneTable::new();
        right.add(IntVec::new(vec![0, 0]), BigUint::one());
        right.add(IntVec::new(vec![1, 1]), BigUint::from(3u32));

        let table = convolve(&left, &right);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(&IntVec::new(vec![2, 1])), Some(&BigUint::from(6u32)));
        assert_eq!(table.total(), BigUint::from(12u32));
    }
}
