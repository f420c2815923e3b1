// RSat Solver Adapter
// Implements the SatSolver interface by running the `rsat` executable

use super::dimacs_solver::DimacsSolver;
use crate::domain::{
    models::{BackendConfig, CnfFormula, Solution},
    solver_service::{Result, SatSolver},
};

pub struct RSatSolver {
    engine: DimacsSolver,
}

impl RSatSolver {
    pub const NAME: &'static str = "RSat";

    pub fn new(config: &BackendConfig) -> Self {
        // -s prints the model as v lines
        let engine = DimacsSolver::new(Self::NAME, "rsat", ["{input}", "-v", "-s"])
            .with_executable(config.rsat_path.clone())
            .with_verbose(config.verbose);
        Self { engine }
    }
}

impl Default for RSatSolver {
    fn default() -> Self {
        Self::new(&BackendConfig::default())
    }
}

impl SatSolver for RSatSolver {
    fn solve(&self, formula: &CnfFormula) -> Result<Solution> {
        self.validate(formula)?;
        self.engine.run(formula)
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
