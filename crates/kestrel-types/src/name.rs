use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Dotted name of a type declaration (`java.util.List`, `com.example.Outer.Inner`).
///
/// Names are cheap to clone and shared freely between threads.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(Arc<str>);

impl TypeName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last dotted segment (`List` for `java.util.List`).
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Everything before the last dot, if any.
    pub fn qualifier(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(qualifier, _)| qualifier)
    }

    /// `self.member`, used for member types and package-relative lookups.
    pub fn join(&self, member: &str) -> TypeName {
        TypeName::new(format!("{}.{}", self.0, member))
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeName({})", self.0)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        TypeName::new(value)
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        TypeName(Arc::from(value))
    }
}

impl From<&TypeName> for TypeName {
    fn from(value: &TypeName) -> Self {
        value.clone()
    }
}

/// Identity of a declared type parameter.
///
/// The same parameter name is routinely declared at several scopes (`class Box<T>` and
/// `<T> T identity(T)`), so the identity pairs the parameter name with the declaring entity:
/// the type's qualified name for class-level parameters, or `Type#method` for method-level
/// parameters.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId {
    owner: Arc<str>,
    name: Arc<str>,
}

impl TypeParamId {
    pub fn new(owner: impl AsRef<str>, name: impl AsRef<str>) -> Self {
        Self {
            owner: Arc::from(owner.as_ref()),
            name: Arc::from(name.as_ref()),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the parameter is declared by a method (or constructor) rather than a type.
    pub fn is_method_level(&self) -> bool {
        self.owner.contains('#')
    }
}

impl fmt::Debug for TypeParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.owner)
    }
}

impl fmt::Display for TypeParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
