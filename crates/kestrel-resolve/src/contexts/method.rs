use std::sync::Arc;

use kestrel_types::{
    ConstructorDecl, DeclKind, MethodDecl, MethodLike, SymbolReference, Type, TypeSolver,
    ValueDecl,
};

use crate::context::delegate;
use crate::{Context, ContextKind, TypeResolution};

enum Callable {
    Method(Arc<MethodDecl>),
    Constructor(Arc<ConstructorDecl>),
}

/// The body of a method or constructor: its type parameters and parameters.
pub struct MethodContext<'a> {
    parent: &'a dyn Context,
    callable: Callable,
}

impl<'a> MethodContext<'a> {
    pub fn new(parent: &'a dyn Context, method: Arc<MethodDecl>) -> Self {
        Self {
            parent,
            callable: Callable::Method(method),
        }
    }

    pub fn for_constructor(parent: &'a dyn Context, constructor: Arc<ConstructorDecl>) -> Self {
        Self {
            parent,
            callable: Callable::Constructor(constructor),
        }
    }

    fn declaration(&self) -> &dyn MethodLike {
        match &self.callable {
            Callable::Method(method) => &**method,
            Callable::Constructor(constructor) => &**constructor,
        }
    }

    /// Calls from a static method's body cannot target instance methods.
    fn is_static(&self) -> bool {
        matches!(&self.callable, Callable::Method(method) if method.is_static())
    }
}

impl Context for MethodContext<'_> {
    fn kind(&self) -> ContextKind {
        ContextKind::Method
    }

    fn parent(&self) -> Option<&dyn Context> {
        Some(self.parent)
    }

    fn solve_type(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<TypeResolution> {
        if let Some(param) = self
            .declaration()
            .type_params()
            .iter()
            .find(|param| param.name() == name)
        {
            return SymbolReference::Solved(TypeResolution::TypeParameter(param.clone()));
        }
        delegate(self, "solve_type", name, DeclKind::Type, |parent| {
            parent.solve_type(name, solver)
        })
    }

    fn solve_symbol(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<Arc<ValueDecl>> {
        if let Some(param) = self
            .declaration()
            .params()
            .iter()
            .find(|param| param.name() == name)
        {
            return SymbolReference::Solved(Arc::clone(param));
        }
        delegate(self, "solve_symbol", name, DeclKind::Value, |parent| {
            parent.solve_symbol(name, solver)
        })
    }

    fn solve_method(
        &self,
        name: &str,
        args: &[Type],
        static_only: bool,
        solver: &dyn TypeSolver,
    ) -> SymbolReference<Arc<MethodDecl>> {
        let static_only = static_only || self.is_static();
        delegate(self, "solve_method", name, DeclKind::Method, |parent| {
            parent.solve_method(name, args, static_only, solver)
        })
    }
}
