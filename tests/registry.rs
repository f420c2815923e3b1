use letsat::solver::registry::Result as RegistryResult;
use letsat::{
    BackendConfig, CnfFormula, RegistryError, SatSolver, Solution, SolveStatus, SolverBackend,
    SolverError, SolverRegistry,
};
use std::sync::Arc;
use std::thread;

struct Fixed(SolveStatus);

impl SatSolver for Fixed {
    fn solve(&self, _formula: &CnfFormula) -> Result<Solution, SolverError> {
        Ok(Solution::new(self.0, "fixed"))
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}

#[test]
fn default_registry_without_cryptominisat() {
    let registry = SolverRegistry::with_defaults(BackendConfig::default()).unwrap();
    let available = registry.list_available();

    assert!(available.contains("Glucose"));
    assert!(available.contains("RSat"));

    if !cfg!(feature = "cryptominisat") {
        assert!(!available.contains("CryptoMiniSat"));
        assert_eq!(
            registry.get("CryptoMiniSat").unwrap_err(),
            RegistryError::NotFound("CryptoMiniSat".to_string())
        );
        let entry = registry
            .entries()
            .iter()
            .find(|e| e.name() == "CryptoMiniSat")
            .unwrap();
        assert!(!entry.is_available());
        assert!(entry.unavailable_reason().is_some());
    }
}

#[test]
fn every_available_name_resolves_to_a_solver() {
    let registry = SolverRegistry::with_defaults(BackendConfig::default()).unwrap();
    for name in registry.list_available() {
        let handle = registry.get(&name).unwrap();
        assert!(handle.is_available());
        assert!(handle.solver().is_some());
    }
    for backend in SolverBackend::PREFERENCE {
        assert_eq!(
            registry.get_backend(backend).is_ok(),
            registry.list_available().contains(backend.name())
        );
    }
}

#[test]
fn list_available_is_idempotent() {
    let registry = SolverRegistry::with_defaults(BackendConfig::default()).unwrap();
    assert_eq!(registry.list_available(), registry.list_available());
}

#[test]
fn global_registry_is_shared() {
    let first = SolverRegistry::global().unwrap();
    let second = SolverRegistry::global().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(letsat::list_available().unwrap(), first.list_available());
    assert!(letsat::get("Glucose").is_ok());
    assert!(matches!(
        letsat::get("NoSuchSolver"),
        Err(RegistryError::NotFound(_))
    ));
}

#[test]
fn concurrent_readers_see_the_same_backends() {
    let mut builder = SolverRegistry::builder(BackendConfig::default());
    builder
        .register("Fixed", |_config: &BackendConfig| -> RegistryResult<Arc<dyn SatSolver>> {
            Ok(Arc::new(Fixed(SolveStatus::Unsatisfiable)))
        })
        .unwrap();
    let registry = Arc::new(builder.build());
    let formula = CnfFormula::new().with_clause([1]).with_clause([-1]);

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let formula = formula.clone();
            thread::spawn(move || {
                let handle = registry.get("Fixed").unwrap();
                handle.solve(&formula).unwrap().status
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap(), SolveStatus::Unsatisfiable);
    }
}
