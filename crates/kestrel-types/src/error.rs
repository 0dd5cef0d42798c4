use crate::TypeParamId;

pub type Result<T> = std::result::Result<T, TypeError>;

/// Misuse of the type model.
///
/// Resolution misses are not errors: they are reported as
/// [`SymbolReference::Unsolved`](crate::SymbolReference::Unsolved) values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("expected a {expected} type, found `{found}`")]
    TypeKindMismatch { expected: &'static str, found: String },

    #[error("`{found}` cannot be bound to type parameter `{param:?}`")]
    InvalidBinding { param: TypeParamId, found: String },

    #[error("`{type_name}` declares {expected} type parameter(s) but {found} type argument(s) were given")]
    ArityMismatch {
        type_name: String,
        expected: usize,
        found: usize,
    },

    #[error("`{method}` declares {expected} parameter(s) but {found} parameter type(s) were given")]
    ParamCountMismatch {
        method: String,
        expected: usize,
        found: usize,
    },

    #[error("parameter index {index} is out of range for {len} parameter(s)")]
    ParamIndexOutOfRange { index: usize, len: usize },
}
