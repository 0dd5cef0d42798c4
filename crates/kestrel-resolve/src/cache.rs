use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use kestrel_types::{DeclKind, SymbolReference, TypeDecl, TypeSolver};

/// Memoizes a declaration provider for concurrent callers.
///
/// Lookups take the read lock only to probe the cache. On a miss the wrapped provider runs with
/// no lock held; its answer is then inserted under the write lock unless another thread got
/// there first, in which case the earlier answer is kept and returned. Providers are pure per
/// name, so the two answers are equal and the race is benign.
///
/// Only solved lookups are cached: a name that is missing now is asked again next time.
pub struct SynchronizedTypeSolver<S> {
    inner: S,
    cache: RwLock<HashMap<String, Arc<TypeDecl>>>,
}

impl<S: TypeSolver> SynchronizedTypeSolver<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.read().contains_key(name)
    }
}

impl<S: TypeSolver> TypeSolver for SynchronizedTypeSolver<S> {
    fn try_to_solve_type(&self, name: &str) -> SymbolReference<Arc<TypeDecl>> {
        if let Some(decl) = self.cache.read().get(name) {
            tracing::trace!(target: "kestrel.cache", name, "hit");
            return SymbolReference::Solved(Arc::clone(decl));
        }

        let SymbolReference::Solved(decl) = self.inner.try_to_solve_type(name) else {
            tracing::trace!(target: "kestrel.cache", name, "miss (unsolved, not cached)");
            return SymbolReference::Unsolved(DeclKind::Type);
        };

        let mut cache = self.cache.write();
        match cache.entry(name.to_string()) {
            Entry::Occupied(existing) => {
                tracing::debug!(target: "kestrel.cache", name, "lost insert race; keeping first value");
                SymbolReference::Solved(Arc::clone(existing.get()))
            }
            Entry::Vacant(slot) => {
                tracing::debug!(target: "kestrel.cache", name, "miss (cached)");
                slot.insert(Arc::clone(&decl));
                SymbolReference::Solved(decl)
            }
        }
    }
}
