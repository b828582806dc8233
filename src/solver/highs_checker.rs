// HiGHS adapter for the matrix validity check
// Same kernel program as the good_lp adapters, expressed with a HiGHS RowProblem

use super::kernel_solution_flaw;
use crate::domain::{
    counting_service::{CountError, MatrixValidityChecker, Result},
    models::Matrix,
};
use highs::{HighsModelStatus, RowProblem, Sense};

#[derive(Debug, Clone, Copy, Default)]
pub struct HighsChecker;

impl HighsChecker {
    pub fn new() -> Self {
        Self
    }
}

impl MatrixValidityChecker for HighsChecker {
    fn check(&self, matrix: &Matrix) -> Result<()> {
        let mut pb = RowProblem::default();

        // minimise sum(-x_j) over the box 0 <= x_j <= 1
        let cols: Vec<_> = (0..matrix.num_cols())
            .map(|_| pb.add_column(-1.0, 0.0..=1.0))
            .collect();

        for row in matrix.rows() {
            let terms: Vec<_> = row
                .iter()
                .zip(&cols)
                .filter(|(coeff, _)| **coeff != 0)
                .map(|(&coeff, &col)| (col, coeff as f64))
                .collect();
            pb.add_row(0.0..=0.0, &terms);
        }

        let solved = pb.optimise(Sense::Minimise).solve();

        match solved.status() {
            HighsModelStatus::Optimal => {
                let values = solved.get_solution().columns().to_vec();
                kernel_solution_flaw(&values)
            }
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                Err(CountError::PreconditionViolated(
                    "A x = 0 admits unbounded non-negative solutions".to_string(),
                ))
            }
            status => Err(CountError::SolverFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
