use super::value_objects::SolveStatus;
use std::path::PathBuf;

/// Boolean formula in conjunctive normal form
///
/// Literals follow the DIMACS convention: variable `v` (1-based) appears as
/// `v` or `-v`, and `0` is never a literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CnfFormula {
    pub name: String,
    pub num_variables: usize,
    pub clauses: Vec<Vec<i32>>,
}

impl CnfFormula {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Declare at least `num_variables` variables, even if unused by clauses
    pub fn with_variables(mut self, num_variables: usize) -> Self {
        self.num_variables = self.num_variables.max(num_variables);
        self
    }

    /// Append a clause, growing the variable count to cover its literals
    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = i32>) {
        let clause: Vec<i32> = literals.into_iter().collect();
        for &lit in &clause {
            self.num_variables = self.num_variables.max(lit.unsigned_abs() as usize);
        }
        self.clauses.push(clause);
    }

    pub fn with_clause(mut self, literals: impl IntoIterator<Item = i32>) -> Self {
        self.add_clause(literals);
        self
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Largest variable referenced by any clause, which may be below the declared count
    pub fn max_variable_used(&self) -> usize {
        self.clauses
            .iter()
            .flatten()
            .map(|lit| lit.unsigned_abs() as usize)
            .max()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Truth values for variables `1..=n`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    // index 0 is unused so that variable v lives at values[v]
    values: Vec<Option<bool>>,
}

impl Assignment {
    pub fn new(num_variables: usize) -> Self {
        Self {
            values: vec![None; num_variables + 1],
        }
    }

    /// Build from DIMACS literals; later literals override earlier ones
    pub fn from_literals(num_variables: usize, literals: &[i32]) -> Self {
        let mut assignment = Self::new(num_variables);
        for &lit in literals {
            if lit != 0 {
                assignment.set(lit.unsigned_abs() as usize, lit > 0);
            }
        }
        assignment
    }

    pub fn set(&mut self, variable: usize, value: bool) {
        if variable == 0 {
            return;
        }
        if variable >= self.values.len() {
            self.values.resize(variable + 1, None);
        }
        self.values[variable] = Some(value);
    }

    pub fn value(&self, variable: usize) -> Option<bool> {
        self.values.get(variable).copied().flatten()
    }

    /// Truth value of a DIMACS literal under this assignment
    pub fn literal_value(&self, literal: i32) -> Option<bool> {
        self.value(literal.unsigned_abs() as usize)
            .map(|v| if literal > 0 { v } else { !v })
    }

    /// Assigned variables as DIMACS literals, in variable order
    pub fn to_literals(&self) -> Vec<i32> {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(var, value)| value.map(|v| if v { var as i32 } else { -(var as i32) }))
            .collect()
    }

    /// True when every clause has at least one literal assigned true
    pub fn satisfies(&self, formula: &CnfFormula) -> bool {
        formula
            .clauses
            .iter()
            .all(|clause| clause.iter().any(|&lit| self.literal_value(lit) == Some(true)))
    }
}

/// Statistics about the solve process
#[derive(Debug, Clone, Default)]
pub struct SolverStatistics {
    pub solve_time_ms: f64,
    pub num_variables: u32,
    pub num_clauses: u32,
    pub solver_backend: String,
}

impl SolverStatistics {
    pub fn for_formula(formula: &CnfFormula, solver_backend: impl Into<String>) -> Self {
        Self {
            solve_time_ms: 0.0,
            num_variables: u32::try_from(formula.num_variables).unwrap_or(u32::MAX),
            num_clauses: u32::try_from(formula.num_clauses()).unwrap_or(u32::MAX),
            solver_backend: solver_backend.into(),
        }
    }
}

/// Result of a satisfiability check
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolveStatus,
    pub assignment: Option<Assignment>,
    pub message: String,
    pub statistics: SolverStatistics,
}

impl Solution {
    pub fn new(status: SolveStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            assignment: None,
            message: message.into(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn satisfiable(assignment: Assignment) -> Self {
        Self {
            status: SolveStatus::Satisfiable,
            assignment: Some(assignment),
            message: "Satisfying assignment found".to_string(),
            statistics: SolverStatistics::default(),
        }
    }

    pub fn unsatisfiable() -> Self {
        Self::new(
            SolveStatus::Unsatisfiable,
            "Formula is unsatisfiable: no assignment satisfies all clauses",
        )
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(SolveStatus::Unknown, message)
    }

    pub fn with_statistics(mut self, statistics: SolverStatistics) -> Self {
        self.statistics = statistics;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn is_satisfiable(&self) -> bool {
        self.status == SolveStatus::Satisfiable
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.status == SolveStatus::Unsatisfiable
    }
}

/// Environment variable overriding the Glucose executable
pub const GLUCOSE_PATH_ENV: &str = "LETSAT_GLUCOSE_PATH";
/// Environment variable overriding the RSat executable
pub const RSAT_PATH_ENV: &str = "LETSAT_RSAT_PATH";
/// Environment variable setting the CryptoMiniSat thread count
pub const CMS_THREADS_ENV: &str = "LETSAT_CMS_THREADS";

/// Configuration shared by the backends a registry constructs
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Glucose executable; searched on PATH when unset
    pub glucose_path: Option<PathBuf>,
    /// RSat executable; searched on PATH when unset
    pub rsat_path: Option<PathBuf>,
    /// Worker threads for CryptoMiniSat
    pub cryptominisat_threads: u32,
    /// Log engine output at debug level
    pub verbose: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            glucose_path: None,
            rsat_path: None,
            cryptominisat_threads: 1,
            verbose: false,
        }
    }
}

impl BackendConfig {
    /// Defaults overridden by `LETSAT_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(GLUCOSE_PATH_ENV).filter(|p| !p.is_empty()) {
            config.glucose_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(RSAT_PATH_ENV).filter(|p| !p.is_empty()) {
            config.rsat_path = Some(PathBuf::from(path));
        }
        if let Some(threads) = lookup(CMS_THREADS_ENV).and_then(|t| t.trim().parse::<u32>().ok()) {
            config.cryptominisat_threads = threads.max(1);
        }
        config
    }

    pub fn with_glucose_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.glucose_path = Some(path.into());
        self
    }

    pub fn with_rsat_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.rsat_path = Some(path.into());
        self
    }
}
