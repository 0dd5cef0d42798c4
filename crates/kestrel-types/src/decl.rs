//! Declaration model consumed by the resolver.
//!
//! Declarations are supplied by a [`TypeSolver`](crate::TypeSolver) (source index, class-file
//! reader, reflection, ...). They are plain immutable values shared behind `Arc`s; the resolver
//! never mutates them.

use std::fmt;
use std::sync::Arc;

use crate::{Type, TypeName, TypeParamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// A declared type parameter with its upper bounds (`T extends Number & Comparable<T>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeParamDecl {
    id: TypeParamId,
    bounds: Vec<Type>,
}

impl TypeParamDecl {
    pub fn new(id: TypeParamId) -> Self {
        Self {
            id,
            bounds: Vec::new(),
        }
    }

    pub fn with_bound(mut self, bound: Type) -> Self {
        self.bounds.push(bound);
        self
    }

    pub fn id(&self) -> &TypeParamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn bounds(&self) -> &[Type] {
        &self.bounds
    }

    /// The first declared bound, `java.lang.Object` when there is none.
    pub fn upper_bound(&self) -> Type {
        self.bounds.first().cloned().unwrap_or_else(Type::object)
    }

    pub fn as_type(&self) -> Type {
        Type::TypeVariable(self.id.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: TypeName,
    pub kind: TypeKind,
    pub type_params: Vec<TypeParamDecl>,
    /// `None` for `java.lang.Object` and for interfaces.
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
    pub fields: Vec<Arc<ValueDecl>>,
    pub methods: Vec<Arc<MethodDecl>>,
    pub constructors: Vec<Arc<ConstructorDecl>>,
}

impl TypeDecl {
    pub fn new(name: impl Into<TypeName>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            super_class: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn class(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: impl Into<TypeName>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn with_type_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let id = TypeParamId::new(self.name.as_str(), name);
            self.type_params.push(TypeParamDecl::new(id));
        }
        self
    }

    pub fn with_bounded_type_param(mut self, name: &str, bound: Type) -> Self {
        let id = TypeParamId::new(self.name.as_str(), name);
        self.type_params.push(TypeParamDecl::new(id).with_bound(bound));
        self
    }

    pub fn extends(mut self, super_class: Type) -> Self {
        self.super_class = Some(super_class);
        self
    }

    pub fn implements(mut self, interface: Type) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_field(mut self, field: ValueDecl) -> Self {
        self.fields.push(Arc::new(field));
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(Arc::new(method));
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructors.push(Arc::new(constructor));
        self
    }

    /// A type variable for this type's parameter `name`.
    ///
    /// The variable is built even when no such parameter is declared; it then simply never binds.
    pub fn type_var(&self, name: &str) -> Type {
        Type::type_var(self.name.as_str(), name)
    }

    pub fn type_param(&self, name: &str) -> Option<&TypeParamDecl> {
        self.type_params.iter().find(|tp| tp.name() == name)
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&Arc<ValueDecl>> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Arc<MethodDecl>> + 'a {
        self.methods.iter().filter(move |method| method.name() == name)
    }

    /// Direct supertypes as declared: superclass first, then interfaces in declaration order.
    ///
    /// Interfaces without superinterfaces report `java.lang.Object`.
    pub fn declared_supertypes(&self) -> Vec<Type> {
        let mut out = Vec::new();
        if let Some(super_class) = &self.super_class {
            out.push(super_class.clone());
        }
        out.extend(self.interfaces.iter().cloned());
        if out.is_empty() && self.is_interface() {
            out.push(Type::object());
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Field { is_static: bool },
    Parameter,
    Local,
}

/// A field, parameter or local variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDecl {
    name: Arc<str>,
    ty: Type,
    kind: ValueKind,
}

impl ValueDecl {
    pub fn field(name: &str, ty: Type) -> Self {
        Self::new(name, ty, ValueKind::Field { is_static: false })
    }

    pub fn static_field(name: &str, ty: Type) -> Self {
        Self::new(name, ty, ValueKind::Field { is_static: true })
    }

    pub fn parameter(name: &str, ty: Type) -> Self {
        Self::new(name, ty, ValueKind::Parameter)
    }

    pub fn local(name: &str, ty: Type) -> Self {
        Self::new(name, ty, ValueKind::Local)
    }

    fn new(name: &str, ty: Type, kind: ValueKind) -> Self {
        Self {
            name: Arc::from(name),
            ty,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_static(&self) -> bool {
        matches!(self.kind, ValueKind::Field { is_static: true })
    }
}

/// What methods and constructors have in common for applicability checks.
pub trait MethodLike {
    fn name(&self) -> &str;

    fn declaring_type(&self) -> &TypeName;

    fn type_params(&self) -> &[TypeParamDecl];

    fn params(&self) -> &[Arc<ValueDecl>];

    /// Whether the last parameter is variadic. Its declared type is then an array.
    fn is_varargs(&self) -> bool;

    fn param_count(&self) -> usize {
        self.params().len()
    }

    fn param_type(&self, index: usize) -> Option<&Type> {
        self.params().get(index).map(|param| param.ty())
    }

    /// `java.util.List.get(int)`; a variadic parameter prints as `T...`.
    fn qualified_signature(&self) -> String {
        let params = self.params();
        let mut out = format!("{}.{}(", self.declaring_type(), self.name());
        for (idx, param) in params.iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            match param.ty() {
                Type::Array(element) if self.is_varargs() && idx + 1 == params.len() => {
                    out.push_str(&format!("{element}..."));
                }
                ty => out.push_str(&ty.to_string()),
            }
        }
        out.push(')');
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    name: Arc<str>,
    declaring_type: TypeName,
    type_params: Vec<TypeParamDecl>,
    params: Vec<Arc<ValueDecl>>,
    return_type: Type,
    is_static: bool,
    is_varargs: bool,
}

impl MethodDecl {
    /// An instance method returning `void` with no parameters; extend it with the `with_*` builders.
    pub fn new(declaring_type: impl Into<TypeName>, name: &str) -> Self {
        Self {
            name: Arc::from(name),
            declaring_type: declaring_type.into(),
            type_params: Vec::new(),
            params: Vec::new(),
            return_type: Type::Void,
            is_static: false,
            is_varargs: false,
        }
    }

    /// The owner used for this method's type parameters (`java.util.Collections#emptyList`).
    pub fn type_param_owner(&self) -> String {
        format!("{}#{}", self.declaring_type, self.name)
    }

    pub fn with_type_param(self, name: &str) -> Self {
        let id = TypeParamId::new(self.type_param_owner(), name);
        self.push_type_param(TypeParamDecl::new(id))
    }

    pub fn with_bounded_type_param(self, name: &str, bound: Type) -> Self {
        let id = TypeParamId::new(self.type_param_owner(), name);
        self.push_type_param(TypeParamDecl::new(id).with_bound(bound))
    }

    fn push_type_param(mut self, param: TypeParamDecl) -> Self {
        self.type_params.push(param);
        self
    }

    /// A type variable for this method's type parameter `name`.
    pub fn type_var(&self, name: &str) -> Type {
        Type::type_var(self.type_param_owner(), name)
    }

    /// Append a fixed-arity parameter. The variadic parameter, if any, stays last.
    pub fn with_param(mut self, name: &str, ty: Type) -> Self {
        let param = Arc::new(ValueDecl::parameter(name, ty));
        if self.is_varargs {
            let at = self.params.len() - 1;
            self.params.insert(at, param);
        } else {
            self.params.push(param);
        }
        self
    }

    /// Append the trailing variadic parameter `component... name`, stored as `component[]`.
    ///
    /// A method has at most one variadic parameter; a second call replaces the first.
    pub fn with_variadic_param(mut self, name: &str, component: Type) -> Self {
        if self.is_varargs {
            self.params.pop();
        }
        self.params
            .push(Arc::new(ValueDecl::parameter(name, Type::array(component))));
        self.is_varargs = true;
        self
    }

    pub fn returns(mut self, return_type: Type) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

impl MethodLike for MethodDecl {
    fn name(&self) -> &str {
        &self.name
    }

    fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }

    fn type_params(&self) -> &[TypeParamDecl] {
        &self.type_params
    }

    fn params(&self) -> &[Arc<ValueDecl>] {
        &self.params
    }

    fn is_varargs(&self) -> bool {
        self.is_varargs
    }
}

impl fmt::Display for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_signature())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
    declaring_type: TypeName,
    type_params: Vec<TypeParamDecl>,
    params: Vec<Arc<ValueDecl>>,
    is_varargs: bool,
}

impl ConstructorDecl {
    pub fn new(declaring_type: impl Into<TypeName>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            type_params: Vec::new(),
            params: Vec::new(),
            is_varargs: false,
        }
    }

    pub fn with_param(mut self, name: &str, ty: Type) -> Self {
        let param = Arc::new(ValueDecl::parameter(name, ty));
        if self.is_varargs {
            let at = self.params.len() - 1;
            self.params.insert(at, param);
        } else {
            self.params.push(param);
        }
        self
    }

    pub fn with_variadic_param(mut self, name: &str, component: Type) -> Self {
        if self.is_varargs {
            self.params.pop();
        }
        self.params
            .push(Arc::new(ValueDecl::parameter(name, Type::array(component))));
        self.is_varargs = true;
        self
    }

    pub fn with_type_param(mut self, name: &str) -> Self {
        let id = TypeParamId::new(format!("{}#<init>", self.declaring_type), name);
        self.type_params.push(TypeParamDecl::new(id));
        self
    }
}

impl MethodLike for ConstructorDecl {
    fn name(&self) -> &str {
        self.declaring_type.simple_name()
    }

    fn declaring_type(&self) -> &TypeName {
        &self.declaring_type
    }

    fn type_params(&self) -> &[TypeParamDecl] {
        &self.type_params
    }

    fn params(&self) -> &[Arc<ValueDecl>] {
        &self.params
    }

    fn is_varargs(&self) -> bool {
        self.is_varargs
    }
}
