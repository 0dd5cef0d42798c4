//! One [`Context`](crate::Context) implementation per kind of scope.

mod block;
mod compilation_unit;
mod method;
mod method_call;
mod type_body;

use std::sync::Arc;

use kestrel_types::{
    declaration_ancestors, MethodDecl, MethodLike, Type, TypeDecl, TypeSolver, ValueDecl,
};

pub use block::BlockContext;
pub use compilation_unit::CompilationUnitContext;
pub use method::MethodContext;
pub use method_call::MethodCallContext;
pub use type_body::TypeBodyContext;

/// Declarations whose members are visible in `decl`: `decl` itself first, then its
/// supertypes breadth first.
fn member_sources(solver: &dyn TypeSolver, decl: &Arc<TypeDecl>) -> Vec<Arc<TypeDecl>> {
    let mut out = vec![Arc::clone(decl)];
    for ancestor in declaration_ancestors(solver, decl) {
        if let Some(ancestor_decl) = solver.solve_type(ancestor.name().as_str()) {
            out.push(ancestor_decl);
        }
    }
    out
}

/// Methods named `name` declared by `decl` or inherited by it, in lookup order.
///
/// An inherited method whose erased parameter list matches one already collected is overridden
/// and skipped.
pub(crate) fn visible_methods(
    solver: &dyn TypeSolver,
    decl: &Arc<TypeDecl>,
    name: &str,
    static_only: bool,
) -> Vec<Arc<MethodDecl>> {
    let mut out: Vec<Arc<MethodDecl>> = Vec::new();
    let mut signatures: Vec<Vec<Type>> = Vec::new();

    for source in member_sources(solver, decl) {
        for method in source.methods_named(name) {
            let erased: Vec<Type> = method.params().iter().map(|p| p.ty().erasure()).collect();
            if signatures.contains(&erased) {
                continue;
            }
            signatures.push(erased);
            if static_only && !method.is_static() {
                continue;
            }
            out.push(Arc::clone(method));
        }
    }
    out
}

/// The field named `name` declared by `decl` or the nearest supertype declaring one.
pub(crate) fn visible_field(
    solver: &dyn TypeSolver,
    decl: &Arc<TypeDecl>,
    name: &str,
) -> Option<Arc<ValueDecl>> {
    if let Some(field) = decl.field(name) {
        return Some(Arc::clone(field));
    }
    member_sources(solver, decl)
        .into_iter()
        .skip(1)
        .find_map(|source| source.field(name).cloned())
}
