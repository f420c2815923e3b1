// Domain module: formulas, results and the solver contract

pub mod dimacs;
pub mod models;
pub mod solver_service;
pub mod value_objects;

pub use dimacs::*;
pub use models::*;
pub use solver_service::*;
pub use value_objects::*;
