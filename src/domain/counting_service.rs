// Domain service interfaces consumed by the counter
// The counter depends on these traits, never on a concrete LP solver or problem definition

use super::models::Matrix;
use super::value_objects::IntVec;

/// Error types for counter construction and queries
#[derive(Debug, thiserror::Error)]
pub enum CountError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Precondition violated: {0}")]
    PreconditionViolated(String),

    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Solver execution failed: {0}")]
    SolverFailed(String),
}

impl CountError {
    /// True for the errors that abort construction of a counter
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CountError::InvalidInput(_)
                | CountError::PreconditionViolated(_)
                | CountError::SolverNotAvailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CountError>;

/// Oracle deciding whether `x = 0` is the only non-negative solution of `A x = 0`
///
/// Implementations solve a linear program once, at construction. A flawed matrix
/// is reported as `PreconditionViolated`; a failure of the solver itself as
/// `SolverFailed`.
pub trait MatrixValidityChecker: Send + Sync {
    /// Check the matrix, returning `Ok(())` when the zero solution is unique
    fn check(&self, matrix: &Matrix) -> Result<()>;

    /// Get the name of the LP backend
    fn name(&self) -> &str;
}

/// Maps a target vector to a canonical representative with the same solution count
///
/// The memoization cache is keyed by the normal form, so two vectors may only share a
/// representative when their counts are provably equal. The counter does not verify this.
pub trait Normalizer: Send + Sync {
    fn normal_form(&self, b: &IntVec) -> IntVec;
}

impl<F> Normalizer for F
where
    F: Fn(&IntVec) -> IntVec + Send + Sync,
{
    fn normal_form(&self, b: &IntVec) -> IntVec {
        self(b)
    }
}

/// Normal form that keeps every vector as its own representative
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl Normalizer for IdentityNormalizer {
    fn normal_form(&self, b: &IntVec) -> IntVec {
        b.clone()
    }
}
