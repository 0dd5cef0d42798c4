//! Scope-aware symbol resolution on top of [`kestrel_types`].
//!
//! A resolution request walks a chain of [`Context`]s from the innermost scope outwards: a
//! [`BlockContext`] inside a [`MethodContext`] inside a [`TypeBodyContext`] under the
//! [`CompilationUnitContext`] root. Each scope answers the names it declares and hands every
//! other lookup to its parent. Method lookups end in overload selection and, through
//! [`Context::solve_method_as_usage`], in a [`MethodUsage`](kestrel_types::MethodUsage) whose
//! generic types are instantiated for the call.
//!
//! Declarations come from a [`TypeSolver`](kestrel_types::TypeSolver); [`solver_from_config`]
//! assembles the provider stack, optionally behind a [`SynchronizedTypeSolver`] cache.

pub mod ast;
mod cache;
mod context;
pub mod contexts;
mod error;
mod import_map;
mod method_resolution;
mod solvers;

pub use cache::SynchronizedTypeSolver;
pub use context::{Context, ContextKind, TypeResolution};
pub use contexts::{
    BlockContext, CompilationUnitContext, MethodCallContext, MethodContext, TypeBodyContext,
};
pub use error::ResolveError;
pub use import_map::{
    ImportMap, StaticSingleImport, StaticStarImport, TypeSingleImport, TypeStarImport,
};
pub use method_resolution::{
    is_applicable, is_arity_compatible, resolve_method_usage, resolve_method_usage_with_type_args,
    select_most_applicable,
};
pub use solvers::{solver_from_config, CombinedTypeSolver};

pub use kestrel_config::ResolveConfig;
