use std::sync::Arc;

use kestrel_types::{
    all_ancestors, DeclKind, MethodDecl, MethodUsage, ReferenceType, SymbolReference, Type,
    TypeParamId, TypeSolver,
};

use crate::method_resolution::{resolve_method_usage_with_type_args, select_most_applicable};
use crate::{Context, ContextKind, ResolveError};

use super::visible_methods;

/// A method call on a receiver of known type (`list.get(0)` with `list: List<String>`).
///
/// Type parameters of the receiver's declaration and of its supertypes take the values the
/// receiver's type arguments give them, so `List.get` returns `String` here. Methods are
/// searched on the receiver only: a receiver without a matching method is `Unsolved`, the
/// enclosing scopes are not consulted.
///
/// Type arguments written at the call (`Collections.<String>emptyList()`) are given with
/// [`MethodCallContext::with_type_args`].
pub struct MethodCallContext<'a> {
    parent: &'a dyn Context,
    receiver: ReferenceType,
    type_args: Vec<Type>,
}

impl<'a> MethodCallContext<'a> {
    pub fn new(parent: &'a dyn Context, receiver: ReferenceType) -> Self {
        Self {
            parent,
            receiver,
            type_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type_args(mut self, type_args: Vec<Type>) -> Self {
        self.type_args = type_args;
        self
    }

    pub fn receiver(&self) -> &ReferenceType {
        &self.receiver
    }

    pub fn type_args(&self) -> &[Type] {
        &self.type_args
    }

    /// `receiver` viewed as the declaration owning `param`, if it is non-raw.
    fn instantiation_owning(&self, param: &TypeParamId, solver: &dyn TypeSolver) -> Option<ReferenceType> {
        if self.receiver.name().as_str() == param.owner() {
            return Some(self.receiver.clone());
        }
        all_ancestors(solver, &self.receiver)
            .into_iter()
            .find(|ancestor| ancestor.name().as_str() == param.owner())
    }
}

impl Context for MethodCallContext<'_> {
    fn kind(&self) -> ContextKind {
        ContextKind::MethodCall
    }

    fn parent(&self) -> Option<&dyn Context> {
        Some(self.parent)
    }

    fn type_param_value(&self, param: &TypeParamId, solver: &dyn TypeSolver) -> Option<Type> {
        let value = self
            .instantiation_owning(param, solver)
            .filter(|instantiation| !instantiation.is_raw())
            .and_then(|instantiation| {
                let decl = solver.solve_type(instantiation.name().as_str())?;
                let idx = decl.type_params.iter().position(|tp| tp.id() == param)?;
                instantiation.args().get(idx).cloned()
            });
        match value {
            Some(value) => Some(value),
            None => self.parent.type_param_value(param, solver),
        }
    }

    fn solve_method(
        &self,
        name: &str,
        args: &[Type],
        static_only: bool,
        solver: &dyn TypeSolver,
    ) -> SymbolReference<Arc<MethodDecl>> {
        let Some(decl) = solver.solve_type(self.receiver.name().as_str()) else {
            return SymbolReference::Unsolved(DeclKind::Method);
        };
        let candidates = visible_methods(solver, &decl, name, static_only);
        select_most_applicable(&candidates, args, solver).into()
    }

    fn solve_method_as_usage(
        &self,
        name: &str,
        args: &[Type],
        solver: &dyn TypeSolver,
    ) -> Result<Option<MethodUsage>, ResolveError> {
        let Some(method) = self.solve_method(name, args, false, solver).into_declaration() else {
            return Ok(None);
        };
        resolve_method_usage_with_type_args(self, &method, &self.type_args, args, solver).map(Some)
    }
}
