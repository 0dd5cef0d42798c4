use std::sync::Arc;

use kestrel_config::ResolveConfig;
use kestrel_types::{DeclKind, SymbolReference, TypeDecl, TypeSolver};

use crate::SynchronizedTypeSolver;

/// Several declaration providers asked in order; the first solved answer wins.
#[derive(Default, Clone)]
pub struct CombinedTypeSolver {
    providers: Vec<Arc<dyn TypeSolver>>,
}

impl CombinedTypeSolver {
    pub fn new(providers: Vec<Arc<dyn TypeSolver>>) -> Self {
        Self { providers }
    }

    pub fn push(&mut self, provider: Arc<dyn TypeSolver>) {
        self.providers.push(provider);
    }

    #[must_use]
    pub fn with(mut self, provider: Arc<dyn TypeSolver>) -> Self {
        self.push(provider);
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl TypeSolver for CombinedTypeSolver {
    fn try_to_solve_type(&self, name: &str) -> SymbolReference<Arc<TypeDecl>> {
        self.providers
            .iter()
            .map(|provider| provider.try_to_solve_type(name))
            .find(SymbolReference::is_solved)
            .unwrap_or(SymbolReference::Unsolved(DeclKind::Type))
    }
}

/// The provider stack described by `config`: `providers` combined in order, behind the
/// resolution cache when `config.cache` is set.
pub fn solver_from_config(
    config: &ResolveConfig,
    providers: Vec<Arc<dyn TypeSolver>>,
) -> Arc<dyn TypeSolver> {
    tracing::debug!(
        target: "kestrel.resolve",
        providers = providers.len(),
        cache = config.cache,
        "assembling type solver"
    );
    let combined = CombinedTypeSolver::new(providers);
    if config.cache {
        Arc::new(SynchronizedTypeSolver::new(combined))
    } else {
        Arc::new(combined)
    }
}
