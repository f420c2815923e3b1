// Solver adapters and the registry that exposes them

#[cfg(feature = "cryptominisat")]
pub mod cryptominisat_solver;
pub mod dimacs_solver;
pub mod glucose_solver;
pub mod registry;
pub mod rsat_solver;

#[cfg(feature = "cryptominisat")]
pub use cryptominisat_solver::CryptoMiniSatSolver;
pub use dimacs_solver::DimacsSolver;
pub use glucose_solver::GlucoseSolver;
pub use registry::{
    get, list_available, RegistryError, SolverHandle, SolverRegistry, SolverRegistryBuilder,
};
pub use rsat_solver::RSatSolver;
