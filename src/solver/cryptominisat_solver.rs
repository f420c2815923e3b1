// CryptoMiniSat Solver Adapter
// Implements the SatSolver interface on top of the in-process CryptoMiniSat bindings

use crate::domain::{
    models::{Assignment, BackendConfig, CnfFormula, Solution, SolverStatistics},
    solver_service::{validate_assumptions, Result, SatSolver, SolverError},
};
use cryptominisat::{Lbool, Lit, Solver};
use std::time::Instant;

pub struct CryptoMiniSatSolver {
    threads: u32,
}

impl CryptoMiniSatSolver {
    pub const NAME: &'static str = "CryptoMiniSat";

    pub fn new(config: &BackendConfig) -> Self {
        Self {
            threads: config.cryptominisat_threads.max(1),
        }
    }
}

impl Default for CryptoMiniSatSolver {
    fn default() -> Self {
        Self::new(&BackendConfig::default())
    }
}

fn to_lit(literal: i32) -> Result<Lit> {
    Lit::new(literal.unsigned_abs() - 1, literal < 0).ok_or_else(|| {
        SolverError::InvalidFormula(format!("literal {} is out of CryptoMiniSat range", literal))
    })
}

fn to_lits(literals: &[i32]) -> Result<Vec<Lit>> {
    literals.iter().map(|&lit| to_lit(lit)).collect()
}

impl SatSolver for CryptoMiniSatSolver {
    fn solve(&self, formula: &CnfFormula) -> Result<Solution> {
        self.solve_with_assumptions(formula, &[])
    }

    fn solve_with_assumptions(
        &self,
        formula: &CnfFormula,
        assumptions: &[i32],
    ) -> Result<Solution> {
        // Validate first
        self.validate(formula)?;
        validate_assumptions(assumptions)?;

        let start_time = Instant::now();

        // Sized by the literals actually present, not the declared count
        let num_vars = assumptions
            .iter()
            .map(|lit| lit.unsigned_abs() as usize)
            .fold(formula.max_variable_used(), usize::max);

        // Threads must be configured before any variable exists
        let mut solver = Solver::new();
        solver.set_num_threads(self.threads);
        for _ in 0..num_vars {
            solver.new_var();
        }

        for clause in &formula.clauses {
            solver.add_clause(&to_lits(clause)?);
        }

        let verdict = if assumptions.is_empty() {
            solver.solve()
        } else {
            solver.solve_with_assumptions(&to_lits(assumptions)?)
        };

        let mut statistics = SolverStatistics::for_formula(formula, Self::NAME);
        statistics.solve_time_ms = start_time.elapsed().as_secs_f64() * 1000.0;

        let solution = match verdict {
            Lbool::True => {
                let mut assignment = Assignment::new(num_vars);
                for (index, value) in solver.get_model().iter().enumerate().take(num_vars) {
                    match value {
                        Lbool::True => assignment.set(index + 1, true),
                        Lbool::False => assignment.set(index + 1, false),
                        Lbool::Undef => {}
                    }
                }
                let solution = Solution::satisfiable(assignment);
                if formula.name.is_empty() {
                    solution
                } else {
                    solution.with_message(format!(
                        "Satisfying assignment found for '{}'",
                        formula.name
                    ))
                }
            }
            Lbool::False => Solution::unsatisfiable(),
            Lbool::Undef => Solution::unknown("CryptoMiniSat stopped before reaching a verdict"),
        };

        Ok(solution.with_statistics(statistics))
    }

    fn name(&self) -> &str {
        Self::NAME
    }

    fn supports_assumptions(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SolveStatus;

    #[test]
    fn solves_small_formula() {
        let formula = CnfFormula::new()
            .with_clause([1, 2])
            .with_clause([-1])
            .with_clause([-2, 3]);
        let solution = CryptoMiniSatSolver::default().solve(&formula).unwrap();
        assert_eq!(solution.status, SolveStatus::Satisfiable);
        assert!(solution.assignment.unwrap().satisfies(&formula));
    }

    #[test]
    fn contradiction_is_unsatisfiable() {
        let formula = CnfFormula::new().with_clause([1]).with_clause([-1]);
        let solution = CryptoMiniSatSolver::default().solve(&formula).unwrap();
        assert!(solution.is_unsatisfiable());
    }

    #[test]
    fn declared_count_does_not_size_the_instance() {
        let formula = CnfFormula::new()
            .with_name("sparse")
            .with_clause([1, -2])
            .with_variables(u32::MAX as usize);
        let solution = CryptoMiniSatSolver::default().solve(&formula).unwrap();
        assert!(solution.is_satisfiable());
        assert_eq!(solution.message, "Satisfying assignment found for 'sparse'");
        assert_eq!(solution.statistics.num_variables, u32::MAX);
        assert!(solution.assignment.unwrap().satisfies(&formula));
    }

    #[test]
    fn assumptions_restrict_models() {
        let formula = CnfFormula::new().with_clause([1, 2]);
        let solver = CryptoMiniSatSolver::default();
        let solution = solver.solve_with_assumptions(&formula, &[-1]).unwrap();
        assert_eq!(solution.assignment.unwrap().value(2), Some(true));
        let solution = solver.solve_with_assumptions(&formula, &[-1, -2]).unwrap();
        assert!(solution.is_unsatisfiable());
    }
}
