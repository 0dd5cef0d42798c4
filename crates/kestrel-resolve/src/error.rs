use kestrel_types::TypeError;

use crate::ContextKind;

/// Misuse of the resolver.
///
/// Failing to find a declaration is not an error; lookups report misses as
/// [`SymbolReference::Unsolved`](kestrel_types::SymbolReference::Unsolved).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("`{operation}` is not applicable to a {context} context")]
    UnsupportedContextOperation {
        operation: &'static str,
        context: ContextKind,
    },

    #[error(transparent)]
    Type(#[from] TypeError),
}
