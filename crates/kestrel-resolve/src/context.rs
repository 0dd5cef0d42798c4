use std::fmt;
use std::sync::Arc;

use kestrel_types::{
    ConstructorDecl, DeclKind, MethodDecl, MethodUsage, SymbolReference, Type, TypeDecl,
    TypeParamDecl, TypeParamId, TypeSolver, ValueDecl,
};

use crate::method_resolution::resolve_method_usage;
use crate::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextKind {
    CompilationUnit,
    TypeBody,
    Method,
    Block,
    MethodCall,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ContextKind::CompilationUnit => "compilation unit",
            ContextKind::TypeBody => "type body",
            ContextKind::Method => "method",
            ContextKind::Block => "block",
            ContextKind::MethodCall => "method call",
        })
    }
}

/// What a type name resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeResolution {
    Declaration(Arc<TypeDecl>),
    TypeParameter(TypeParamDecl),
}

impl TypeResolution {
    /// The resolved name as a type: a raw reference or a type variable.
    pub fn as_type(&self) -> Type {
        match self {
            TypeResolution::Declaration(decl) => Type::named(decl.name.clone()),
            TypeResolution::TypeParameter(param) => param.as_type(),
        }
    }

    pub fn declaration(&self) -> Option<&Arc<TypeDecl>> {
        match self {
            TypeResolution::Declaration(decl) => Some(decl),
            TypeResolution::TypeParameter(_) => None,
        }
    }
}

/// One scope in the chain consulted during resolution.
///
/// Every query defaults to asking the parent, and a context without a parent answers
/// `Unsolved`. Implementations override only the queries for which they introduce names.
///
/// Contexts borrow their parent; a chain is built for one resolution request (or cached per
/// syntax node by the caller) and holds no mutable state.
pub trait Context: Send + Sync {
    fn kind(&self) -> ContextKind;

    fn parent(&self) -> Option<&dyn Context>;

    /// Resolve a simple or dotted type name visible in this scope.
    fn solve_type(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<TypeResolution> {
        delegate(self, "solve_type", name, DeclKind::Type, |parent| {
            parent.solve_type(name, solver)
        })
    }

    /// The concrete type a type parameter stands for at this point, if this scope knows it.
    ///
    /// Only scopes with a concrete instantiation in hand (a method call receiver) answer.
    fn type_param_value(&self, param: &TypeParamId, solver: &dyn TypeSolver) -> Option<Type> {
        self.parent()?.type_param_value(param, solver)
    }

    /// Resolve a field, parameter or local variable.
    fn solve_symbol(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<Arc<ValueDecl>> {
        delegate(self, "solve_symbol", name, DeclKind::Value, |parent| {
            parent.solve_symbol(name, solver)
        })
    }

    /// Pick the overload of `name` applicable to `args`.
    ///
    /// With `static_only` set, instance methods are not candidates (the call happens in a static
    /// context).
    fn solve_method(
        &self,
        name: &str,
        args: &[Type],
        static_only: bool,
        solver: &dyn TypeSolver,
    ) -> SymbolReference<Arc<MethodDecl>> {
        delegate(self, "solve_method", name, DeclKind::Method, |parent| {
            parent.solve_method(name, args, static_only, solver)
        })
    }

    /// Pick the constructor of the enclosing type applicable to `args`.
    ///
    /// Only type bodies have constructors; other contexts report misuse.
    fn solve_constructor(
        &self,
        args: &[Type],
        solver: &dyn TypeSolver,
    ) -> Result<SymbolReference<Arc<ConstructorDecl>>, ResolveError> {
        let _ = (args, solver);
        Err(ResolveError::UnsupportedContextOperation {
            operation: "solve_constructor",
            context: self.kind(),
        })
    }

    /// [`Context::solve_method`] followed by instantiation of the chosen method for `args`.
    ///
    /// `Ok(None)` when no method matches.
    fn solve_method_as_usage(
        &self,
        name: &str,
        args: &[Type],
        solver: &dyn TypeSolver,
    ) -> Result<Option<MethodUsage>, ResolveError> {
        let Some(method) = self.solve_method(name, args, false, solver).into_declaration() else {
            return Ok(None);
        };
        resolve_method_usage(self, &method, args, solver).map(Some)
    }
}

/// Forward a lookup to `ctx`'s parent, or report `Unsolved` at the root.
pub(crate) fn delegate<C, T>(
    ctx: &C,
    operation: &'static str,
    name: &str,
    kind: DeclKind,
    ask: impl FnOnce(&dyn Context) -> SymbolReference<T>,
) -> SymbolReference<T>
where
    C: Context + ?Sized,
{
    match ctx.parent() {
        Some(parent) => {
            tracing::trace!(
                target: "kestrel.resolve",
                operation,
                name,
                from = %ctx.kind(),
                to = %parent.kind(),
                "delegating to parent scope"
            );
            ask(parent)
        }
        None => SymbolReference::Unsolved(kind),
    }
}
