// Validity checker adapters: concrete implementations of MatrixValidityChecker

pub mod factory;
pub mod good_lp_checker;
#[cfg(feature = "highs")]
pub mod highs_checker;

pub use factory::CheckerFactory;
#[cfg(feature = "coin_cbc")]
pub use good_lp_checker::CoinCbcChecker;
pub use good_lp_checker::MicroLpChecker;
#[cfg(feature = "highs")]
pub use highs_checker::HighsChecker;

use crate::domain::{CountError, Result};

/// Entries of the LP solution treated as zero
const ZERO_TOLERANCE: f64 = 1.0e-6;

/// A non-zero optimum of the kernel program is a non-negative solution of A x = 0
fn kernel_solution_flaw(values: &[f64]) -> Result<()> {
    if values.iter().any(|v| v.abs() > ZERO_TOLERANCE) {
        Err(CountError::PreconditionViolated(format!(
            "strictly positive solution to A x = 0: {:?}",
            values
        )))
    } else {
        Ok(())
    }
}
