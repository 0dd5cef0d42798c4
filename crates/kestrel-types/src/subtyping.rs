//! Supertype walking and assignability.
//!
//! These are best-effort helpers for resolution: declarations the provider does not know are
//! treated as compatible rather than reported, so a partially indexed classpath degrades into
//! more permissive overload selection instead of spurious misses.

use std::collections::{HashSet, VecDeque};

use crate::ty::{ReferenceType, OBJECT};
use crate::{PrimitiveType, Type, TypeDecl, TypeName, TypeParamDecl, TypeSolver, WildcardBound};

const ARRAY_SUPERTYPES: [&str; 3] = [OBJECT, "java.lang.Cloneable", "java.io.Serializable"];

/// Replace `params` by `args` positionally. Variables not in `params` are left alone.
pub fn substitute(ty: &Type, params: &[TypeParamDecl], args: &[Type]) -> Type {
    match ty {
        Type::TypeVariable(id) => params
            .iter()
            .position(|param| param.id() == id)
            .and_then(|idx| args.get(idx))
            .cloned()
            .unwrap_or_else(|| ty.clone()),
        _ => ty.map_children(|child| substitute(child, params, args)),
    }
}

/// The direct supertypes of `ty` with `ty`'s type arguments substituted in.
///
/// A raw `ty` yields raw supertypes. Classes without a declared superclass (other than
/// `java.lang.Object` itself) extend `java.lang.Object`. Unknown declarations have no supertypes.
pub fn direct_supertypes(solver: &dyn TypeSolver, ty: &ReferenceType) -> Vec<ReferenceType> {
    match solver.solve_type(ty.name().as_str()) {
        Some(decl) => supertypes_of(&decl, ty),
        None => Vec::new(),
    }
}

/// [`direct_supertypes`] of `ty`, taking `decl` as its declaration.
fn supertypes_of(decl: &TypeDecl, ty: &ReferenceType) -> Vec<ReferenceType> {
    let mut declared = decl.declared_supertypes();
    if declared.is_empty() && decl.name.as_str() != OBJECT {
        declared.push(Type::object());
    }

    let raw = ty.is_raw() && decl.is_generic();
    declared
        .iter()
        .filter_map(|super_ty| {
            let Type::Reference(super_ref) = super_ty else {
                return None;
            };
            if raw {
                return Some(super_ref.erasure());
            }
            match substitute(super_ty, &decl.type_params, ty.args()) {
                Type::Reference(reference) => Some(reference),
                _ => None,
            }
        })
        .collect()
}

/// Every proper supertype of `ty`, breadth first, each instantiation reported once.
pub fn all_ancestors(solver: &dyn TypeSolver, ty: &ReferenceType) -> Vec<ReferenceType> {
    walk_ancestors(solver, ty, direct_supertypes(solver, ty))
}

/// Every proper supertype of `decl` instantiated with its own type parameters.
///
/// The first step reads `decl` itself, so a declaration the provider does not know (a type
/// declared in source being resolved) still reaches its supertypes; from there on the walk goes
/// through `solver`.
pub fn declaration_ancestors(solver: &dyn TypeSolver, decl: &TypeDecl) -> Vec<ReferenceType> {
    let this = ReferenceType::generic_self(decl);
    let seeds = supertypes_of(decl, &this);
    walk_ancestors(solver, &this, seeds)
}

fn walk_ancestors(
    solver: &dyn TypeSolver,
    start: &ReferenceType,
    seeds: Vec<ReferenceType>,
) -> Vec<ReferenceType> {
    let mut out = Vec::new();
    let mut seen: HashSet<ReferenceType> = HashSet::new();
    let mut queue: VecDeque<ReferenceType> = VecDeque::new();
    seen.insert(start.clone());
    for seed in seeds {
        if seen.insert(seed.clone()) {
            out.push(seed.clone());
            queue.push_back(seed);
        }
    }

    while let Some(current) = queue.pop_front() {
        for super_ty in direct_supertypes(solver, &current) {
            if seen.insert(super_ty.clone()) {
                out.push(super_ty.clone());
                queue.push_back(super_ty);
            }
        }
    }
    out
}

/// Return `ty` viewed as `target` by walking the supertype graph and applying type argument
/// substitution along the way.
///
/// Example: `ArrayList<String>` instantiated as `java.util.List` returns `List<String>`.
/// Returns `None` when `target` is not a supertype of `ty` (as far as the provider knows).
pub fn instantiate_as_supertype(
    solver: &dyn TypeSolver,
    ty: &Type,
    target: &TypeName,
) -> Option<ReferenceType> {
    let start = match ty {
        Type::Reference(reference) => reference,
        Type::Array(_) => {
            return ARRAY_SUPERTYPES
                .contains(&target.as_str())
                .then(|| ReferenceType::named(target.clone()));
        }
        Type::Primitive(prim) => {
            let boxed = ReferenceType::named(prim.box_type_name());
            return instantiate_as_supertype(solver, &Type::Reference(boxed), target);
        }
        _ => return None,
    };

    if start.name() == target {
        return Some(start.clone());
    }
    all_ancestors(solver, start)
        .into_iter()
        .find(|ancestor| ancestor.name() == target)
}

pub fn is_subtype(solver: &dyn TypeSolver, sub: &Type, sup: &TypeName) -> bool {
    instantiate_as_supertype(solver, sub, sup).is_some()
}

/// Whether a value of type `source` may be passed where `target` is expected (method invocation
/// conversion: identity, widening, boxing/unboxing, reference widening).
pub fn is_assignable(solver: &dyn TypeSolver, target: &Type, source: &Type) -> bool {
    if target == source {
        return true;
    }

    match (target, source) {
        (Type::Void, _) | (_, Type::Void) => false,
        (Type::Primitive(_), Type::Null) => false,
        (_, Type::Null) => true,

        (Type::TypeVariable(_), _) => true,
        (Type::Primitive(_), Type::TypeVariable(_)) => false,
        (_, Type::TypeVariable(_)) => true,

        (Type::Primitive(to), Type::Primitive(from)) => from.widens_to(*to),
        (Type::Primitive(to), Type::Reference(from)) => {
            PrimitiveType::from_box_type_name(from.name().as_str())
                .is_some_and(|unboxed| unboxed.widens_to(*to))
        }
        (Type::Primitive(_), _) => false,
        (_, Type::Primitive(_)) => is_assignable(solver, target, &source.boxed()),

        (Type::Wildcard(bound), _) => wildcard_contains(solver, bound, source),
        (_, Type::Wildcard(WildcardBound::Extends(bound))) => {
            is_assignable(solver, target, bound)
        }
        (_, Type::Wildcard(_)) => is_object(target),

        (Type::Array(to), Type::Array(from)) => match (to.as_ref(), from.as_ref()) {
            (Type::Primitive(a), Type::Primitive(b)) => a == b,
            (Type::Primitive(_), _) | (_, Type::Primitive(_)) => false,
            (to, from) => is_assignable(solver, to, from),
        },
        (Type::Array(_), _) => false,
        (Type::Reference(to), Type::Array(_)) => ARRAY_SUPERTYPES.contains(&to.name().as_str()),

        (Type::Reference(to), Type::Reference(from)) => reference_assignable(solver, to, from),
        (Type::Null, _) => false,
    }
}

fn is_object(ty: &Type) -> bool {
    matches!(ty, Type::Reference(reference) if reference.name().as_str() == OBJECT)
}

fn reference_assignable(solver: &dyn TypeSolver, to: &ReferenceType, from: &ReferenceType) -> bool {
    if to.name().as_str() == OBJECT {
        return true;
    }

    let Some(view) = instantiate_as_supertype(solver, &Type::Reference(from.clone()), to.name())
    else {
        // Only a miss between two known declarations is a definite "no".
        return !solver.has_type(from.name().as_str()) || !solver.has_type(to.name().as_str());
    };

    if to.is_raw() || view.is_raw() {
        return true;
    }
    if to.args().len() != view.args().len() {
        return false;
    }
    to.args()
        .iter()
        .zip(view.args())
        .all(|(target_arg, source_arg)| type_arg_contains(solver, target_arg, source_arg))
}

/// Type-argument containment: invariant, except wildcards and unresolved type variables.
fn type_arg_contains(solver: &dyn TypeSolver, target: &Type, source: &Type) -> bool {
    match (target, source) {
        (Type::Wildcard(bound), _) => wildcard_contains(solver, bound, source),
        (Type::TypeVariable(_), _) | (_, Type::TypeVariable(_)) => true,
        _ => target == source,
    }
}

fn wildcard_contains(solver: &dyn TypeSolver, bound: &WildcardBound, source: &Type) -> bool {
    match (bound, source) {
        (WildcardBound::Unbounded, _) => true,
        (WildcardBound::Extends(upper), Type::Wildcard(WildcardBound::Extends(inner))) => {
            is_assignable(solver, upper, inner)
        }
        (WildcardBound::Super(lower), Type::Wildcard(WildcardBound::Super(inner))) => {
            is_assignable(solver, inner, lower)
        }
        (_, Type::Wildcard(_)) => false,
        (WildcardBound::Extends(upper), _) => is_assignable(solver, upper, source),
        (WildcardBound::Super(lower), _) => is_assignable(solver, source, lower),
    }
}
