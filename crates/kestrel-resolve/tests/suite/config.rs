use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kestrel_config::KestrelConfig;
use kestrel_resolve::{solver_from_config, ResolveConfig};
use kestrel_types::{MemoryTypeSolver, SymbolReference, TypeDecl, TypeSolver};

struct Counting {
    inner: MemoryTypeSolver,
    calls: AtomicUsize,
}

impl TypeSolver for Counting {
    fn try_to_solve_type(&self, name: &str) -> SymbolReference<Arc<TypeDecl>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.try_to_solve_type(name)
    }
}

fn counting() -> Arc<Counting> {
    Arc::new(Counting {
        inner: MemoryTypeSolver::with_minimal_jdk(),
        calls: AtomicUsize::new(0),
    })
}

#[test]
fn cache_setting_controls_memoization() {
    let provider = counting();
    let cached = solver_from_config(&ResolveConfig::default(), vec![provider.clone()]);
    assert!(cached.has_type("java.lang.String"));
    assert!(cached.has_type("java.lang.String"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    let config = KestrelConfig::load_from_str("[resolve]\ncache = false\n").unwrap();
    let provider = counting();
    let uncached = solver_from_config(&config.resolve, vec![provider.clone()]);
    assert!(uncached.has_type("java.lang.String"));
    assert!(uncached.has_type("java.lang.String"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn providers_are_consulted_in_order() {
    let project = Arc::new(MemoryTypeSolver::new().with(TypeDecl::interface("java.util.List")));
    let solver = solver_from_config(
        &ResolveConfig::default(),
        vec![project, Arc::new(MemoryTypeSolver::with_minimal_jdk())],
    );

    let list = solver.solve_type("java.util.List").unwrap();
    assert!(!list.is_generic());
    assert!(solver.has_type("java.util.ArrayList"));
}
