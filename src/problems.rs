// Concrete counting problems: a matrix plus the symmetries of its targets

use crate::domain::{CountError, CountingProblem, IntVec, Matrix, Normalizer, Result};
use std::sync::Arc;

/// Problem counting `rows x cols` non-negative integer tables with given margins.
///
/// Cell `(i, j)` is variable `i * cols + j`. The target is the row sums followed by
/// the column sums.
pub fn contingency_table(rows: usize, cols: usize) -> Result<CountingProblem> {
    if rows == 0 || cols == 0 {
        return Err(CountError::InvalidInput(format!(
            "Contingency table must have positive dimensions, got {}x{}",
            rows, cols
        )));
    }

    let n = rows * cols;
    let mut a = vec![vec![0i64; n]; rows + cols];
    for i in 0..rows {
        for j in 0..cols {
            a[i][i * cols + j] = 1;
            a[rows + j][i * cols + j] = 1;
        }
    }

    Ok(CountingProblem::new(Matrix::new(a)?)
        .with_name(format!("{}x{} contingency tables", rows, cols))
        .with_normalizer(Arc::new(MarginNormalizer { rows, cols })))
}

/// Normal form for contingency-table margins.
///
/// Permuting rows or columns of a table permutes its row or column sums, so each
/// block is sorted. Square tables may also be transposed, which swaps the blocks.
#[derive(Debug, Clone, Copy)]
pub struct MarginNormalizer {
    rows: usize,
    cols: usize,
}

impl MarginNormalizer {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl Normalizer for MarginNormalizer {
    fn normal_form(&self, b: &IntVec) -> IntVec {
        if b.dim() != self.rows + self.cols {
            return b.clone();
        }

        let (row_sums, col_sums) = b.as_slice().split_at(self.rows);
        let mut row_sums = row_sums.to_vec();
        let mut col_sums = col_sums.to_vec();
        row_sums.sort_unstable();
        col_sums.sort_unstable();

        if self.rows == self.cols && col_sums < row_sums {
            std::mem::swap(&mut row_sums, &mut col_sums);
        }

        row_sums.extend(col_sums);
        IntVec::new(row_sums)
    }
}
