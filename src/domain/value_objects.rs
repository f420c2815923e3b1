// Domain value objects representing core business concepts

use std::fmt;
use std::str::FromStr;

/// Outcome of a satisfiability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A satisfying assignment exists
    Satisfiable,
    /// No assignment satisfies every clause
    Unsatisfiable,
    /// The engine gave up or was interrupted
    Unknown,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Satisfiable => write!(f, "SATISFIABLE"),
            SolveStatus::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            SolveStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Solver backends known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolverBackend {
    /// Glucose, driven through DIMACS files
    Glucose,
    /// RSat, driven through DIMACS files
    RSat,
    /// CryptoMiniSat, linked in-process
    CryptoMiniSat,
}

impl SolverBackend {
    /// Every backend, in order of preference for automatic selection
    pub const PREFERENCE: [SolverBackend; 3] = [
        SolverBackend::CryptoMiniSat,
        SolverBackend::Glucose,
        SolverBackend::RSat,
    ];

    /// Canonical registry name
    pub fn name(&self) -> &'static str {
        match self {
            SolverBackend::Glucose => "Glucose",
            SolverBackend::RSat => "RSat",
            SolverBackend::CryptoMiniSat => "CryptoMiniSat",
        }
    }
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PREFERENCE
            .into_iter()
            .find(|backend| backend.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown solver backend '{}'", s))
    }
}
