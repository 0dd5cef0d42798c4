/// Which kind of declaration a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Type,
    Value,
    Method,
    Constructor,
}

/// Outcome of a resolution query.
///
/// A miss is an ordinary value, not an error: callers branch on it, fall back to another scope or
/// provider, or report it. There is no ambiguous state; overload resolution always commits to a
/// single candidate or returns `Unsolved`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum SymbolReference<D> {
    Solved(D),
    Unsolved(DeclKind),
}

impl<D> SymbolReference<D> {
    pub fn solved(decl: D) -> Self {
        SymbolReference::Solved(decl)
    }

    pub fn unsolved(kind: DeclKind) -> Self {
        SymbolReference::Unsolved(kind)
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SymbolReference::Solved(_))
    }

    pub fn declaration(&self) -> Option<&D> {
        match self {
            SymbolReference::Solved(decl) => Some(decl),
            SymbolReference::Unsolved(_) => None,
        }
    }

    pub fn into_declaration(self) -> Option<D> {
        match self {
            SymbolReference::Solved(decl) => Some(decl),
            SymbolReference::Unsolved(_) => None,
        }
    }

    pub fn map<E>(self, f: impl FnOnce(D) -> E) -> SymbolReference<E> {
        match self {
            SymbolReference::Solved(decl) => SymbolReference::Solved(f(decl)),
            SymbolReference::Unsolved(kind) => SymbolReference::Unsolved(kind),
        }
    }

    /// `self` if solved, otherwise the result of `fallback`.
    pub fn or_else(self, fallback: impl FnOnce() -> SymbolReference<D>) -> SymbolReference<D> {
        match self {
            SymbolReference::Solved(_) => self,
            SymbolReference::Unsolved(_) => fallback(),
        }
    }
}

impl<D> From<Option<D>> for SymbolReference<D>
where
    D: HasDeclKind,
{
    fn from(value: Option<D>) -> Self {
        match value {
            Some(decl) => SymbolReference::Solved(decl),
            None => SymbolReference::Unsolved(D::DECL_KIND),
        }
    }
}

/// Declarations that know which [`DeclKind`] they are.
pub trait HasDeclKind {
    const DECL_KIND: DeclKind;
}

impl HasDeclKind for std::sync::Arc<crate::TypeDecl> {
    const DECL_KIND: DeclKind = DeclKind::Type;
}

impl HasDeclKind for std::sync::Arc<crate::ValueDecl> {
    const DECL_KIND: DeclKind = DeclKind::Value;
}

impl HasDeclKind for std::sync::Arc<crate::MethodDecl> {
    const DECL_KIND: DeclKind = DeclKind::Method;
}

impl HasDeclKind for std::sync::Arc<crate::ConstructorDecl> {
    const DECL_KIND: DeclKind = DeclKind::Constructor;
}
