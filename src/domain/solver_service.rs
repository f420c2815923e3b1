// Domain service interface for deciding satisfiability
// Every backend the registry hands out implements this contract

use super::models::{CnfFormula, Solution};

/// Error types for the solver service
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("Invalid formula: {0}")]
    InvalidFormula(String),

    #[error("Solver not available: {0}")]
    SolverNotAvailable(String),

    #[error("Unsupported by {solver}: {feature}")]
    Unsupported { solver: String, feature: String },

    #[error("Solver execution failed: {0}")]
    ExecutionFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;

/// Common capability of every SAT backend
///
/// Implementations are shared between threads through the registry, so a
/// solve call must not depend on state left behind by a previous call.
pub trait SatSolver: Send + Sync {
    /// Decide satisfiability of a formula
    fn solve(&self, formula: &CnfFormula) -> Result<Solution>;

    /// Decide satisfiability under additional unit assumptions
    fn solve_with_assumptions(
        &self,
        formula: &CnfFormula,
        assumptions: &[i32],
    ) -> Result<Solution> {
        if assumptions.is_empty() {
            return self.solve(formula);
        }
        Err(SolverError::Unsupported {
            solver: self.name().to_string(),
            feature: "assumptions".to_string(),
        })
    }

    /// Validate a formula without solving it
    fn validate(&self, formula: &CnfFormula) -> Result<()> {
        let errors = formula_errors(formula);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SolverError::InvalidFormula(errors.join("; ")))
        }
    }

    /// Get the name of this solver backend
    fn name(&self) -> &str;

    /// Check if this solver accepts assumption literals
    fn supports_assumptions(&self) -> bool {
        false
    }
}

/// Every structural problem found in a formula
pub fn formula_errors(formula: &CnfFormula) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, clause) in formula.clauses.iter().enumerate() {
        for &lit in clause {
            if lit == 0 {
                errors.push(format!("Clause {} contains the reserved literal 0", i));
            } else if lit.unsigned_abs() as usize > formula.num_variables {
                errors.push(format!(
                    "Clause {} references variable {} but formula declares {} variables",
                    i,
                    lit.unsigned_abs(),
                    formula.num_variables
                ));
            }
        }
    }

    errors
}

/// Reject zero assumptions; assumptions may introduce fresh variables
pub fn validate_assumptions(assumptions: &[i32]) -> Result<()> {
    if assumptions.contains(&0) {
        return Err(SolverError::InvalidFormula(
            "Assumptions must not contain the reserved literal 0".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rejecting;

    impl SatSolver for Rejecting {
        fn solve(&self, _formula: &CnfFormula) -> Result<Solution> {
            Ok(Solution::unsatisfiable())
        }

        fn name(&self) -> &str {
            "rejecting"
        }
    }

    #[test]
    fn validate_reports_zero_and_out_of_range_literals() {
        let formula = CnfFormula {
            name: String::new(),
            num_variables: 2,
            clauses: vec![vec![1, 0], vec![3]],
        };
        let errors = formula_errors(&formula);
        assert_eq!(errors.len(), 2);
        assert!(matches!(
            Rejecting.validate(&formula),
            Err(SolverError::InvalidFormula(_))
        ));
    }

    #[test]
    fn assumptions_are_unsupported_by_default() {
        let formula = CnfFormula::new().with_clause([1]);
        assert!(Rejecting.solve_with_assumptions(&formula, &[]).is_ok());
        assert!(matches!(
            Rejecting.solve_with_assumptions(&formula, &[-1]),
            Err(SolverError::Unsupported { .. })
        ));
    }

    #[test]
    fn zero_assumption_is_rejected() {
        assert!(validate_assumptions(&[1, -2]).is_ok());
        assert!(validate_assumptions(&[1, 0]).is_err());
    }
}
