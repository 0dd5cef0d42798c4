//! Type model for the kestrel resolver.
//!
//! This crate holds the values resolution works with: [`Type`]s and the declarations they refer
//! to, [`SymbolReference`] results, type-parameter bindings ([`TypeParametersMap`]), the
//! unification engine used to infer a generic call's type arguments ([`InferenceContext`]) and
//! instantiated methods ([`MethodUsage`]). Declarations come from a [`TypeSolver`].
//!
//! Scoping (which name means what at a given point in a compilation unit) lives in
//! `kestrel-resolve`.

mod decl;
mod error;
mod infer;
mod method_usage;
mod name;
mod solver;
mod subtyping;
mod symbol;
mod ty;
mod type_params;

pub use decl::{
    ConstructorDecl, MethodDecl, MethodLike, TypeDecl, TypeKind, TypeParamDecl, ValueDecl,
    ValueKind,
};
pub use error::{Result, TypeError};
pub use infer::InferenceContext;
pub use method_usage::MethodUsage;
pub use name::{TypeName, TypeParamId};
pub use solver::{MemoryTypeSolver, TypeSolver};
pub use subtyping::{
    all_ancestors, declaration_ancestors, direct_supertypes, instantiate_as_supertype,
    is_assignable, is_subtype, substitute,
};
pub use symbol::{DeclKind, HasDeclKind, SymbolReference};
pub use ty::{PrimitiveType, ReferenceType, SubstitutionMemo, Type, WildcardBound, OBJECT};
pub use type_params::{TypeParametersMap, TypeParametersMapBuilder};
