use super::counting_service::{CountError, IdentityNormalizer, Normalizer, Result};
use super::value_objects::{CheckerBackend, IntVec, ZeroOneStrategy};
use num_bigint::BigUint;
use std::fmt;
use std::sync::Arc;

/// Non-negative integer matrix `A` (m rows, n columns)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: Vec<Vec<i64>>,
    num_cols: usize,
}

impl Matrix {
    /// Build a matrix from its rows, rejecting empty, ragged or negative input.
    ///
    /// Every row total must fit in an `i64`. Zero/one images `A z` never exceed the
    /// row totals, so no later table arithmetic can overflow.
    ///
    /// All-zero columns are accepted here; the counter and the brute-force solver
    /// reject them where they matter.
    pub fn new(rows: Vec<Vec<i64>>) -> Result<Self> {
        let num_cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || num_cols == 0 {
            return Err(CountError::InvalidInput(
                "Matrix must have at least one row and one column".to_string(),
            ));
        }

        let mut errors = Vec::new();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != num_cols {
                errors.push(format!(
                    "Row {} has {} entries but row 0 has {}",
                    i,
                    row.len(),
                    num_cols
                ));
            }
            if let Some(j) = row.iter().position(|&a| a < 0) {
                errors.push(format!("Negative matrix entry at ({}, {})", i, j));
            }
            if row.iter().try_fold(0i64, |acc, &a| acc.checked_add(a)).is_none() {
                errors.push(format!("Entries of row {} overflow a 64-bit total", i));
            }
        }

        if errors.is_empty() {
            Ok(Self { rows, num_cols })
        } else {
            Err(CountError::InvalidInput(errors.join("; ")))
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn entry(&self, i: usize, j: usize) -> i64 {
        self.rows[i][j]
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Column `j` as an m-vector
    pub fn column(&self, j: usize) -> IntVec {
        IntVec::new(self.rows.iter().map(|row| row[j]).collect())
    }

    /// `A x` for an n-vector `x`
    pub fn mul(&self, x: &IntVec) -> IntVec {
        debug_assert_eq!(x.dim(), self.num_cols);
        IntVec::new(
            self.rows
                .iter()
                .map(|row| {
                    row.iter()
                        .zip(x.as_slice())
                        .map(|(a, xi)| a * xi)
                        .sum()
                })
                .collect(),
        )
    }

    /// Sub-matrix keeping only the given columns, in the given order
    pub fn select_columns(&self, cols: &[usize]) -> Matrix {
        Matrix {
            rows: self
                .rows
                .iter()
                .map(|row| cols.iter().map(|&j| row[j]).collect())
                .collect(),
            num_cols: cols.len(),
        }
    }

    /// Index of the first all-zero column, if any
    pub fn empty_column(&self) -> Option<usize> {
        (0..self.num_cols).find(|&j| self.rows.iter().all(|row| row[j] == 0))
    }

    /// Per-row sum of all entries; an upper bound on every zero/one image `A z`
    pub fn row_totals(&self) -> IntVec {
        IntVec::new(self.rows.iter().map(|row| row.iter().sum()).collect())
    }
}

/// A matrix together with the symmetry-aware normal form of its targets
#[derive(Clone)]
pub struct CountingProblem {
    pub name: String,
    pub matrix: Matrix,
    pub normalizer: Arc<dyn Normalizer>,
}

impl CountingProblem {
    pub fn new(matrix: Matrix) -> Self {
        Self {
            name: String::new(),
            matrix,
            normalizer: Arc::new(IdentityNormalizer),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_normalizer(mut self, normalizer: Arc<dyn Normalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn normal_form(&self, b: &IntVec) -> IntVec {
        self.normalizer.normal_form(b)
    }
}

impl fmt::Debug for CountingProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingProblem")
            .field("name", &self.name)
            .field("matrix", &self.matrix)
            .finish_non_exhaustive()
    }
}

/// Configuration for building a counter
#[derive(Debug, Clone)]
pub struct CounterConfig {
    pub strategy: ZeroOneStrategy,
    pub checker: CheckerBackend,
    /// Column count at or below which divide-and-conquer enumerates directly
    pub leaf_columns: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            strategy: ZeroOneStrategy::DivideAndConquer,
            checker: CheckerBackend::Auto,
            leaf_columns: 4,
        }
    }
}

impl CounterConfig {
    pub fn with_strategy(mut self, strategy: ZeroOneStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_checker(mut self, checker: CheckerBackend) -> Self {
        self.checker = checker;
        self
    }

    pub fn with_leaf_columns(mut self, leaf_columns: usize) -> Self {
        self.leaf_columns = leaf_columns;
        self
    }
}

/// Statistics about one counting query
#[derive(Debug, Clone, Default)]
pub struct CountStatistics {
    /// Recursive evaluations that missed the cache
    pub evaluations: u64,
    pub cache_hits: u64,
    pub cache_entries: usize,
    pub solve_time_ms: f64,
}

/// Result of a counting query together with its statistics
#[derive(Debug, Clone)]
pub struct CountReport {
    pub count: BigUint,
    pub statistics: CountStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_and_negative_rows() {
        assert!(matches!(
            Matrix::new(vec![vec![1, 2], vec![1]]),
            Err(CountError::InvalidInput(_))
        ));
        assert!(matches!(
            Matrix::new(vec![vec![1, -2]]),
            Err(CountError::InvalidInput(_))
        ));
        assert!(matches!(Matrix::new(vec![]), Err(CountError::InvalidInput(_))));
    }

    #[test]
    fn rejects_row_total_beyond_i64() {
        assert!(matches!(
            Matrix::new(vec![vec![i64::MAX / 2 + 1; 2]]),
            Err(CountError::InvalidInput(_))
        ));
        assert!(matches!(
            Matrix::new(vec![vec![1, 1], vec![i64::MAX, 1]]),
            Err(CountError::InvalidInput(_))
        ));

        let widest = Matrix::new(vec![vec![i64::MAX / 2; 2]]).unwrap();
        assert_eq!(widest.row_totals(), IntVec::new(vec![i64::MAX - 1]));
    }

    #[test]
    fn multiplies_and_selects_columns() {
        let a = Matrix::new(vec![vec![1, 2, 0], vec![0, 1, 3]]).unwrap();
        assert_eq!(a.mul(&IntVec::new(vec![1, 1, 1])), IntVec::new(vec![3, 4]));
        assert_eq!(a.column(2), IntVec::new(vec![0, 3]));
        assert_eq!(a.row_totals(), IntVec::new(vec![3, 4]));

        let sub = a.select_columns(&[2, 0]);
        assert_eq!(sub.num_cols(), 2);
        assert_eq!(sub.rows(), &[vec![0, 1], vec![3, 0]]);
    }

    #[test]
    fn finds_empty_column() {
        let a = Matrix::new(vec![vec![1, 0, 2], vec![1, 0, 0]]).unwrap();
        assert_eq!(a.empty_column(), Some(1));
        let b = Matrix::new(vec![vec![1, 1]]).unwrap();
        assert_eq!(b.empty_column(), None);
    }
}
