//! Registry of SAT backends
//!
//! The registry is assembled once through [`SolverRegistryBuilder`] and is
//! read-only afterwards. Backends whose optional dependency is missing are
//! recorded as unavailable instead of failing initialization.

use crate::domain::{
    models::{BackendConfig, CnfFormula, Solution},
    solver_service::{self, SatSolver, SolverError},
    value_objects::SolverBackend,
};
use crate::solver::{GlucoseSolver, RSatSolver};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// Errors raised while building or querying the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Expected when a feature or library is not installed; never surfaced past registration
    #[error("Optional dependency '{dependency}' missing for {backend}")]
    OptionalDependencyMissing { backend: String, dependency: String },

    /// Fatal: initialization cannot continue
    #[error("Mandatory dependency '{dependency}' missing for {backend}")]
    MandatoryDependencyMissing { backend: String, dependency: String },

    #[error("Solver not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

/// A registered backend, available or not
#[derive(Clone)]
pub struct SolverHandle {
    name: String,
    available: bool,
    solver: Option<Arc<dyn SatSolver>>,
    unavailable_reason: Option<String>,
}

impl SolverHandle {
    fn available(name: String, solver: Arc<dyn SatSolver>) -> Self {
        Self {
            name,
            available: true,
            solver: Some(solver),
            unavailable_reason: None,
        }
    }

    fn unavailable(name: String, reason: String) -> Self {
        Self {
            name,
            available: false,
            solver: None,
            unavailable_reason: Some(reason),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable_reason.as_deref()
    }

    pub fn solver(&self) -> Option<&Arc<dyn SatSolver>> {
        self.solver.as_ref()
    }

    fn require(&self) -> solver_service::Result<&Arc<dyn SatSolver>> {
        self.solver.as_ref().ok_or_else(|| {
            SolverError::SolverNotAvailable(format!(
                "{}: {}",
                self.name,
                self.unavailable_reason.as_deref().unwrap_or("not loaded")
            ))
        })
    }

    pub fn solve(&self, formula: &CnfFormula) -> solver_service::Result<Solution> {
        self.require()?.solve(formula)
    }

    pub fn solve_with_assumptions(
        &self,
        formula: &CnfFormula,
        assumptions: &[i32],
    ) -> solver_service::Result<Solution> {
        self.require()?.solve_with_assumptions(formula, assumptions)
    }

    pub fn validate(&self, formula: &CnfFormula) -> solver_service::Result<()> {
        self.require()?.validate(formula)
    }

    pub fn supports_assumptions(&self) -> bool {
        self.solver
            .as_ref()
            .map(|s| s.supports_assumptions())
            .unwrap_or(false)
    }
}

impl fmt::Debug for SolverHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolverHandle")
            .field("name", &self.name)
            .field("available", &self.available)
            .field("unavailable_reason", &self.unavailable_reason)
            .finish()
    }
}

/// Collects registrations before the registry is frozen
pub struct SolverRegistryBuilder {
    config: BackendConfig,
    entries: Vec<SolverHandle>,
}

impl SolverRegistryBuilder {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
        }
    }

    /// Bind `name` to the solver produced by `constructor`
    ///
    /// Surrounding whitespace is stripped from `name`, matching [`SolverRegistry::get`].
    /// Returns `Ok(false)` when the constructor reports a missing optional
    /// dependency; the name is then kept out of the available set. Any other
    /// constructor error is returned and should abort initialization.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F) -> Result<bool>
    where
        F: FnOnce(&BackendConfig) -> Result<Arc<dyn SatSolver>>,
    {
        let name = name.into().trim().to_string();
        let entry = match constructor(&self.config) {
            Ok(solver) => {
                info!(solver = %name, "registered SAT backend");
                SolverHandle::available(name, solver)
            }
            Err(err @ RegistryError::OptionalDependencyMissing { .. }) => {
                debug!(solver = %name, "skipping SAT backend: {}", err);
                SolverHandle::unavailable(name, err.to_string())
            }
            Err(err) => return Err(err),
        };

        let bound = entry.available;
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(&entry.name))
        {
            warn!(solver = %entry.name, "replacing previously registered SAT backend");
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
        Ok(bound)
    }

    /// Register Glucose and RSat as mandatory and CryptoMiniSat as optional
    pub fn register_defaults(&mut self) -> Result<&mut Self> {
        self.register(SolverBackend::Glucose.name(), load_glucose)?;
        self.register(SolverBackend::RSat.name(), load_rsat)?;
        self.register(SolverBackend::CryptoMiniSat.name(), load_cryptominisat)?;
        Ok(self)
    }

    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

/// Read-only mapping from backend name to solver
#[derive(Debug, Clone)]
pub struct SolverRegistry {
    entries: Vec<SolverHandle>,
}

static GLOBAL: OnceLock<Result<SolverRegistry>> = OnceLock::new();

impl SolverRegistry {
    pub fn builder(config: BackendConfig) -> SolverRegistryBuilder {
        SolverRegistryBuilder::new(config)
    }

    /// Registry holding every backend this build knows about
    pub fn with_defaults(config: BackendConfig) -> Result<Self> {
        let mut builder = Self::builder(config);
        builder.register_defaults()?;
        Ok(builder.build())
    }

    /// Process-wide registry, initialized from the environment on first use
    pub fn global() -> Result<&'static SolverRegistry> {
        GLOBAL
            .get_or_init(|| Self::with_defaults(BackendConfig::from_env()))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Names of every successfully bound backend
    pub fn list_available(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|e| e.available)
            .map(|e| e.name.clone())
            .collect()
    }

    /// Look up an available backend by name, ignoring ASCII case
    pub fn get(&self, name: &str) -> Result<&SolverHandle> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|e| e.available && e.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn get_backend(&self, backend: SolverBackend) -> Result<&SolverHandle> {
        self.get(backend.name())
    }

    /// Every attempted registration, including unavailable backends
    pub fn entries(&self) -> &[SolverHandle] {
        &self.entries
    }

    /// First available backend in preference order, then in registration order
    pub fn preferred(&self) -> Result<&SolverHandle> {
        SolverBackend::PREFERENCE
            .iter()
            .find_map(|backend| self.get_backend(*backend).ok())
            .or_else(|| self.entries.iter().find(|e| e.available))
            .ok_or_else(|| RegistryError::NotFound("no SAT backend is available".to_string()))
    }

    /// `get(name)`, or `preferred()` when `name` is blank
    pub fn resolve(&self, name: &str) -> Result<&SolverHandle> {
        if name.trim().is_empty() {
            self.preferred()
        } else {
            self.get(name)
        }
    }
}

/// Available backend names in the process-wide registry
pub fn list_available() -> Result<BTreeSet<String>> {
    Ok(SolverRegistry::global()?.list_available())
}

/// Look up a backend in the process-wide registry
pub fn get(name: &str) -> Result<SolverHandle> {
    SolverRegistry::global()?.get(name).cloned()
}

fn load_glucose(config: &BackendConfig) -> Result<Arc<dyn SatSolver>> {
    Ok(Arc::new(GlucoseSolver::new(config)))
}

fn load_rsat(config: &BackendConfig) -> Result<Arc<dyn SatSolver>> {
    Ok(Arc::new(RSatSolver::new(config)))
}

#[cfg(feature = "cryptominisat")]
fn load_cryptominisat(config: &BackendConfig) -> Result<Arc<dyn SatSolver>> {
    Ok(Arc::new(crate::solver::CryptoMiniSatSolver::new(config)))
}

#[cfg(not(feature = "cryptominisat"))]
fn load_cryptominisat(_config: &BackendConfig) -> Result<Arc<dyn SatSolver>> {
    Err(RegistryError::OptionalDependencyMissing {
        backend: SolverBackend::CryptoMiniSat.name().to_string(),
        dependency: "cryptominisat (enable the `cryptominisat` feature)".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SolveStatus;

    struct AlwaysSat;

    impl SatSolver for AlwaysSat {
        fn solve(&self, formula: &CnfFormula) -> solver_service::Result<Solution> {
            Ok(Solution::new(
                SolveStatus::Satisfiable,
                format!("{} clauses", formula.num_clauses()),
            ))
        }

        fn name(&self) -> &str {
            "AlwaysSat"
        }
    }

    fn always_sat(_config: &BackendConfig) -> Result<Arc<dyn SatSolver>> {
        Ok(Arc::new(AlwaysSat))
    }

    fn missing(_config: &BackendConfig) -> Result<Arc<dyn SatSolver>> {
        Err(RegistryError::OptionalDependencyMissing {
            backend: "Missing".to_string(),
            dependency: "libmissing".to_string(),
        })
    }

    #[test]
    fn optional_failure_is_swallowed() {
        let mut builder = SolverRegistry::builder(BackendConfig::default());
        assert_eq!(builder.register("AlwaysSat", always_sat), Ok(true));
        assert_eq!(builder.register("Missing", missing), Ok(false));
        let registry = builder.build();

        assert_eq!(
            registry.list_available().into_iter().collect::<Vec<_>>(),
            vec!["AlwaysSat".to_string()]
        );
        assert_eq!(registry.entries().len(), 2);
        assert!(!registry.entries()[1].is_available());
        assert!(registry.entries()[1]
            .unavailable_reason()
            .unwrap()
            .contains("libmissing"));
        assert_eq!(
            registry.get("Missing").unwrap_err(),
            RegistryError::NotFound("Missing".to_string())
        );
    }

    #[test]
    fn mandatory_failure_aborts() {
        let mut builder = SolverRegistry::builder(BackendConfig::default());
        let err = builder
            .register("Core", |_config: &BackendConfig| -> Result<Arc<dyn SatSolver>> {
                Err(RegistryError::MandatoryDependencyMissing {
                    backend: "Core".to_string(),
                    dependency: "libcore".to_string(),
                })
            })
            .unwrap_err();
        assert!(matches!(err, RegistryError::MandatoryDependencyMissing { .. }));
    }

    #[test]
    fn get_is_case_insensitive_and_solves() {
        let mut builder = SolverRegistry::builder(BackendConfig::default());
        builder.register("AlwaysSat", always_sat).unwrap();
        let registry = builder.build();

        let handle = registry.get("alwayssat").unwrap();
        assert_eq!(handle.name(), "AlwaysSat");
        let formula = CnfFormula::new().with_clause([1]);
        assert!(handle.solve(&formula).unwrap().is_satisfiable());
        assert!(!handle.supports_assumptions());
        assert_eq!(
            registry.get("Unknown").unwrap_err(),
            RegistryError::NotFound("Unknown".to_string())
        );
    }

    #[test]
    fn padded_names_are_normalized() {
        let mut builder = SolverRegistry::builder(BackendConfig::default());
        builder.register(" Padded ", always_sat).unwrap();
        builder.register("\tTabbed", always_sat).unwrap();
        let registry = builder.build();

        let available = registry.list_available();
        assert!(available.contains("Padded"));
        for name in &available {
            assert_eq!(registry.get(name).unwrap().name(), name);
        }
        assert!(registry.get(" padded ").is_ok());
    }

    #[test]
    fn re_registration_replaces_entry() {
        let mut builder = SolverRegistry::builder(BackendConfig::default());
        builder.register("Engine", always_sat).unwrap();
        builder.register("engine", missing).unwrap();
        let registry = builder.build();
        assert_eq!(registry.entries().len(), 1);
        assert!(registry.list_available().is_empty());
    }

    #[test]
    fn preferred_follows_preference_then_registration_order() {
        let mut builder = SolverRegistry::builder(BackendConfig::default());
        builder.register("Custom", always_sat).unwrap();
        builder.register("RSat", always_sat).unwrap();
        builder.register("Glucose", always_sat).unwrap();
        let registry = builder.build();
        assert_eq!(registry.preferred().unwrap().name(), "Glucose");
        assert_eq!(registry.resolve("  ").unwrap().name(), "Glucose");
        assert_eq!(registry.resolve("custom").unwrap().name(), "Custom");

        let empty = SolverRegistry::builder(BackendConfig::default()).build();
        assert!(matches!(empty.preferred(), Err(RegistryError::NotFound(_))));
    }

    #[test]
    fn defaults_register_dimacs_backends() {
        let registry = SolverRegistry::with_defaults(BackendConfig::default()).unwrap();
        let available = registry.list_available();
        assert!(available.contains("Glucose"));
        assert!(available.contains("RSat"));
        assert_eq!(registry.entries().len(), 3);
        assert_eq!(
            available.contains("CryptoMiniSat"),
            cfg!(feature = "cryptominisat")
        );
    }
}
