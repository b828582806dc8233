// good_lp adapters for the matrix validity check
// Translates the kernel program over A into good_lp's model API

use super::kernel_solution_flaw;
use crate::domain::{
    counting_service::{CountError, MatrixValidityChecker, Result},
    models::Matrix,
};
use good_lp::{
    variable, variables, Expression, ResolutionError, Solution as GoodLpSolutionTrait, Solver,
    SolverModel, Variable as GoodLpVariable,
};

/// Solve: minimise sum(-x_j) subject to A x = 0 and 0 <= x_j <= 1.
///
/// The box keeps the program bounded, so the optimum is zero exactly when
/// x = 0 is the only non-negative solution of A x = 0.
fn kernel_solution<S>(matrix: &Matrix, solver: S) -> Result<Vec<f64>>
where
    S: Solver,
    S::Model: SolverModel<Error = ResolutionError>,
{
    let mut vars = variables!();
    let lp_variables: Vec<GoodLpVariable> = (0..matrix.num_cols())
        .map(|_| vars.add(variable().min(0.0).max(1.0)))
        .collect();

    let mut obj_expr: Expression = 0.into();
    for &var in &lp_variables {
        obj_expr += -1.0 * var;
    }

    let mut lp_model = vars.minimise(obj_expr).using(solver);

    // all-zero rows impose nothing
    for row in matrix.rows().iter().filter(|row| row.iter().any(|&a| a != 0)) {
        let mut lhs: Expression = 0.into();
        for (&coeff, &var) in row.iter().zip(&lp_variables) {
            if coeff != 0 {
                lhs += (coeff as f64) * var;
            }
        }
        lp_model = lp_model.with(lhs.eq(0.0));
    }

    match lp_model.solve() {
        Ok(sol) => Ok(lp_variables.iter().map(|&var| sol.value(var)).collect()),
        Err(ResolutionError::Unbounded) => Err(CountError::PreconditionViolated(
            "A x = 0 admits unbounded non-negative solutions".to_string(),
        )),
        Err(e) => Err(CountError::SolverFailed(format!("{:?}", e))),
    }
}

/// Validity checker backed by good_lp's pure-Rust microlp solver
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpChecker;

impl MicroLpChecker {
    pub fn new() -> Self {
        Self
    }
}

impl MatrixValidityChecker for MicroLpChecker {
    fn check(&self, matrix: &Matrix) -> Result<()> {
        let values = kernel_solution(matrix, good_lp::solvers::microlp::microlp)?;
        kernel_solution_flaw(&values)
    }

    fn name(&self) -> &str {
        "microlp"
    }
}

/// Validity checker backed by COIN-OR CBC through good_lp
#[cfg(feature = "coin_cbc")]
#[derive(Debug, Clone, Copy, Default)]
pub struct CoinCbcChecker;

#[cfg(feature = "coin_cbc")]
impl CoinCbcChecker {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "coin_cbc")]
impl MatrixValidityChecker for CoinCbcChecker {
    fn check(&self, matrix: &Matrix) -> Result<()> {
        let values = kernel_solution(matrix, good_lp::solvers::coin_cbc::coin_cbc)?;
        kernel_solution_flaw(&values)
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matrix_without_kernel() {
        let a = Matrix::new(vec![vec![1, 1, 0], vec![0, 2, 1]]).unwrap();
        assert!(MicroLpChecker::new().check(&a).is_ok());
    }

    #[test]
    fn rejects_matrix_with_free_column() {
        let a = Matrix::new(vec![vec![1, 0], vec![3, 0]]).unwrap();
        assert!(matches!(
            MicroLpChecker::new().check(&a),
            Err(CountError::PreconditionViolated(_))
        ));
    }
}
