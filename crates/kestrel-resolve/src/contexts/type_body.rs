use std::sync::Arc;

use kestrel_types::{
    declaration_ancestors, ConstructorDecl, DeclKind, MethodDecl, SymbolReference, Type, TypeDecl,
    TypeParamId, TypeSolver, ValueDecl,
};

use crate::context::delegate;
use crate::method_resolution::select_most_applicable;
use crate::{Context, ContextKind, ResolveError, TypeResolution};

use super::{visible_field, visible_methods};

/// The body of a class, interface, enum or record declaration.
///
/// Introduces the type's own type parameters, its member types (declared or inherited), its
/// fields and methods (declared or inherited) and its constructors.
pub struct TypeBodyContext<'a> {
    parent: &'a dyn Context,
    decl: Arc<TypeDecl>,
}

impl<'a> TypeBodyContext<'a> {
    pub fn new(parent: &'a dyn Context, decl: Arc<TypeDecl>) -> Self {
        Self { parent, decl }
    }

    pub fn declaration(&self) -> &Arc<TypeDecl> {
        &self.decl
    }

    fn solve_member_type(&self, name: &str, solver: &dyn TypeSolver) -> Option<Arc<TypeDecl>> {
        if let Some(decl) = solver.solve_type(self.decl.name.join(name).as_str()) {
            return Some(decl);
        }
        declaration_ancestors(solver, &self.decl)
            .into_iter()
            .find_map(|ancestor| solver.solve_type(ancestor.name().join(name).as_str()))
    }
}

impl Context for TypeBodyContext<'_> {
    fn kind(&self) -> ContextKind {
        ContextKind::TypeBody
    }

    fn parent(&self) -> Option<&dyn Context> {
        Some(self.parent)
    }

    fn solve_type(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<TypeResolution> {
        if let Some(param) = self.decl.type_param(name) {
            return SymbolReference::Solved(TypeResolution::TypeParameter(param.clone()));
        }
        if self.decl.name.simple_name() == name {
            return SymbolReference::Solved(TypeResolution::Declaration(Arc::clone(&self.decl)));
        }

        let (first, rest) = match name.split_once('.') {
            Some((first, rest)) => (first, Some(rest)),
            None => (name, None),
        };
        if let Some(member) = self.solve_member_type(first, solver) {
            let found = match rest {
                None => Some(member),
                Some(rest) => solver.solve_type(member.name.join(rest).as_str()),
            };
            if let Some(decl) = found {
                return SymbolReference::Solved(TypeResolution::Declaration(decl));
            }
        }

        delegate(self, "solve_type", name, DeclKind::Type, |parent| {
            parent.solve_type(name, solver)
        })
    }

    /// Parameters of a supertype take the arguments this type passes to it
    /// (`class Names extends ArrayList<String>` binds `List.E` to `String`). The type's own
    /// parameters stay type variables.
    fn type_param_value(&self, param: &TypeParamId, solver: &dyn TypeSolver) -> Option<Type> {
        let value = declaration_ancestors(solver, &self.decl)
            .into_iter()
            .find(|ancestor| ancestor.name().as_str() == param.owner())
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

    fn solve_symbol(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<Arc<ValueDecl>> {
        if let Some(field) = visible_field(solver, &self.decl, name) {
            return SymbolReference::Solved(field);
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
        let candidates = visible_methods(solver, &self.decl, name, static_only);
        if let Some(method) = select_most_applicable(&candidates, args, solver) {
            return SymbolReference::Solved(method);
        }
        delegate(self, "solve_method", name, DeclKind::Method, |parent| {
            parent.solve_method(name, args, static_only, solver)
        })
    }

    /// A type without declared constructors has the implicit no-argument one.
    fn solve_constructor(
        &self,
        args: &[Type],
        solver: &dyn TypeSolver,
    ) -> Result<SymbolReference<Arc<ConstructorDecl>>, ResolveError> {
        if self.decl.constructors.is_empty() {
            let default = args
                .is_empty()
                .then(|| Arc::new(ConstructorDecl::new(self.decl.name.clone())));
            return Ok(default.into());
        }
        Ok(select_most_applicable(&self.decl.constructors, args, solver).into())
    }
}
