use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};

use kestrel_resolve::SynchronizedTypeSolver;
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

const NAMES: [&str; 3] = ["java.lang.String", "java.util.List", "java.util.HashMap"];
const THREADS: usize = 8;

#[test]
fn concurrent_lookups_agree_and_populate_the_cache_once() {
    let solver = SynchronizedTypeSolver::new(Counting {
        inner: MemoryTypeSolver::with_minimal_jdk(),
        calls: AtomicUsize::new(0),
    });
    let expected: Vec<_> = NAMES
        .iter()
        .map(|name| solver.inner().inner.try_to_solve_type(name))
        .collect();

    let results: Vec<Vec<SymbolReference<Arc<TypeDecl>>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    (0..50)
                        .flat_map(|_| NAMES.iter())
                        .map(|name| solver.try_to_solve_type(name))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for per_thread in &results {
        for (idx, result) in per_thread.iter().enumerate() {
            assert_eq!(result, &expected[idx % NAMES.len()]);
        }
    }

    assert_eq!(solver.cached_len(), NAMES.len());
    let calls = solver.inner().calls.load(Ordering::SeqCst);
    assert!(calls >= NAMES.len(), "provider called {calls} times");
    assert!(calls <= NAMES.len() * THREADS, "provider called {calls} times");
}

/// Builds a new declaration on every call, so separate lookups are told apart by identity.
struct Fresh {
    calls: AtomicUsize,
}

impl TypeSolver for Fresh {
    fn try_to_solve_type(&self, name: &str) -> SymbolReference<Arc<TypeDecl>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SymbolReference::Solved(Arc::new(TypeDecl::class(name)))
    }
}

#[test]
fn every_caller_sees_the_first_cached_declaration() {
    let solver = SynchronizedTypeSolver::new(Fresh {
        calls: AtomicUsize::new(0),
    });
    let start = Barrier::new(THREADS);
    let decls: Vec<Arc<TypeDecl>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    start.wait();
                    solver.solve_type("com.example.Raced").unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let calls = solver.inner().calls.load(Ordering::SeqCst);
    assert!((1..=THREADS).contains(&calls), "provider called {calls} times");
    assert_eq!(solver.cached_len(), 1);

    let cached = solver.solve_type("com.example.Raced").unwrap();
    assert_eq!(solver.inner().calls.load(Ordering::SeqCst), calls);
    for decl in &decls {
        assert!(Arc::ptr_eq(decl, &cached));
    }
}
