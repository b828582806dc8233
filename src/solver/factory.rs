use crate::domain::{
    counting_service::{CountError, MatrixValidityChecker, Result},
    value_objects::CheckerBackend,
};
use crate::solver::MicroLpChecker;
use std::sync::Arc;

/// Factory for creating validity checkers based on configuration
pub struct CheckerFactory;

impl CheckerFactory {
    /// Create a checker for a specific backend.
    ///
    /// Backends whose cargo feature is disabled yield `SolverNotAvailable`.
    pub fn create_from_backend(backend: CheckerBackend) -> Result<Arc<dyn MatrixValidityChecker>> {
        match backend {
            CheckerBackend::Auto | CheckerBackend::MicroLp => Ok(Self::default_checker()),
            CheckerBackend::CoinCbc => coin_cbc_checker(),
            CheckerBackend::Highs => highs_checker(),
        }
    }

    /// Get the default checker (microlp, always compiled in)
    pub fn default_checker() -> Arc<dyn MatrixValidityChecker> {
        Arc::new(MicroLpChecker::new())
    }

    /// Backends usable in this build
    pub fn available_backends() -> Vec<CheckerBackend> {
        [
            CheckerBackend::MicroLp,
            CheckerBackend::CoinCbc,
            CheckerBackend::Highs,
        ]
        .into_iter()
        .filter(|&backend| Self::create_from_backend(backend).is_ok())
        .collect()
    }
}

#[cfg(not(all(feature = "coin_cbc", feature = "highs")))]
fn not_compiled(backend: CheckerBackend, feature: &str) -> CountError {
    CountError::SolverNotAvailable(format!(
        "{} support is not compiled in (enable the `{}` feature)",
        backend, feature
    ))
}

#[cfg(feature = "coin_cbc")]
fn coin_cbc_checker() -> Result<Arc<dyn MatrixValidityChecker>> {
    Ok(Arc::new(crate::solver::CoinCbcChecker::new()))
}

#[cfg(not(feature = "coin_cbc"))]
fn coin_cbc_checker() -> Result<Arc<dyn MatrixValidityChecker>> {
    Err(not_compiled(CheckerBackend::CoinCbc, "coin_cbc"))
}

#[cfg(feature = "highs")]
fn highs_checker() -> Result<Arc<dyn MatrixValidityChecker>> {
    Ok(Arc::new(crate::solver::HighsChecker::new()))
}

#[cfg(not(feature = "highs"))]
fn highs_checker() -> Result<Arc<dyn MatrixValidityChecker>> {
    Err(not_compiled(CheckerBackend::Highs, "highs"))
}
