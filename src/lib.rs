// Domain layer: formulas, results and the solver contract
pub mod domain;

// Solver adapters and the backend registry
pub mod solver;

// Application layer: gRPC service and protobuf mapping
pub mod application;

// Infrastructure layer: External concerns (gRPC server)
#[cfg(feature = "server")]
pub mod infrastructure;

// Re-export commonly used types
pub use domain::{
    parse_dimacs, render_dimacs, Assignment, BackendConfig, CnfFormula, DimacsError, SatSolver,
    SolveStatus, Solution, SolverBackend, SolverError, SolverStatistics,
};

pub use application::GrpcSatSolverService;

pub use solver::{
    get, list_available, DimacsSolver, GlucoseSolver, RSatSolver, RegistryError, SolverHandle,
    SolverRegistry, SolverRegistryBuilder,
};

#[cfg(feature = "cryptominisat")]
pub use solver::CryptoMiniSatSolver;

#[cfg(feature = "server")]
pub use infrastructure::{start_server, ServerConfig};
