// Glucose Solver Adapter
// Implements the SatSolver interface by running the `glucose` executable

use super::dimacs_solver::DimacsSolver;
use crate::domain::{
    models::{BackendConfig, CnfFormula, Solution},
    solver_service::{Result, SatSolver},
};

pub struct GlucoseSolver {
    engine: DimacsSolver,
}

impl GlucoseSolver {
    pub const NAME: &'static str = "Glucose";

    pub fn new(config: &BackendConfig) -> Self {
        let engine = DimacsSolver::new(Self::NAME, "glucose", ["-verb=0", "-model", "{input}"])
            .with_executable(config.glucose_path.clone())
            .with_verbose(config.verbose);
        Self { engine }
    }
}

impl Default for GlucoseSolver {
    fn default() -> Self {
        Self::new(&BackendConfig::default())
    }
}

impl SatSolver for GlucoseSolver {
    fn solve(&self, formula: &CnfFormula) -> Result<Solution> {
        self.validate(formula)?;
        self.engine.run(formula)
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
