use std::collections::HashMap;
use std::fmt;

use crate::{TypeDecl, TypeError, TypeName, TypeParamDecl, TypeParamId};

pub const OBJECT: &str = "java.lang.Object";

/// Replacements already decided during one substitution session, keyed by parameter.
///
/// The memo is threaded through every recursive substitution call. Bound expansion
/// ([`Type::replace_with_bounds`]) stores an in-progress placeholder here before expanding a
/// parameter's bound, which is what terminates self-referential bounds such as
/// `T extends Comparable<T>`.
pub type SubstitutionMemo = HashMap<TypeParamId, Type>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Char,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|prim| prim.name() == name)
    }

    pub fn box_type_name(self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "java.lang.Boolean",
            PrimitiveType::Byte => "java.lang.Byte",
            PrimitiveType::Short => "java.lang.Short",
            PrimitiveType::Char => "java.lang.Character",
            PrimitiveType::Int => "java.lang.Integer",
            PrimitiveType::Long => "java.lang.Long",
            PrimitiveType::Float => "java.lang.Float",
            PrimitiveType::Double => "java.lang.Double",
        }
    }

    pub fn from_box_type_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|prim| prim.box_type_name() == name)
    }

    /// Identity or widening primitive conversion (JLS 5.1.2).
    pub fn widens_to(self, target: PrimitiveType) -> bool {
        use PrimitiveType::*;

        if self == target {
            return true;
        }
        match self {
            Byte => matches!(target, Short | Int | Long | Float | Double),
            Short | Char => matches!(target, Int | Long | Float | Double),
            Int => matches!(target, Long | Float | Double),
            Long => matches!(target, Float | Double),
            Float => matches!(target, Double),
            Double | Boolean => false,
        }
    }
}

/// A use of a class/interface declaration with its type arguments.
///
/// `args` is either empty (raw use, or a non-generic declaration) or exactly as long as the
/// declaration's type-parameter list. The checked constructor is [`ReferenceType::new`];
/// substitution preserves the length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceType {
    name: TypeName,
    args: Vec<Type>,
}

impl ReferenceType {
    pub fn new(decl: &TypeDecl, args: Vec<Type>) -> Result<Self, TypeError> {
        if !args.is_empty() && args.len() != decl.type_params.len() {
            return Err(TypeError::ArityMismatch {
                type_name: decl.name.to_string(),
                expected: decl.type_params.len(),
                found: args.len(),
            });
        }
        Ok(Self {
            name: decl.name.clone(),
            args,
        })
    }

    /// Raw use of `name` (no type arguments).
    pub fn named(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// `decl` instantiated with its own type parameters (`List<E>` inside `List`).
    pub fn generic_self(decl: &TypeDecl) -> Self {
        Self {
            name: decl.name.clone(),
            args: decl
                .type_params
                .iter()
                .map(|tp| Type::TypeVariable(tp.id().clone()))
                .collect(),
        }
    }

    pub(crate) fn from_parts(name: TypeName, args: Vec<Type>) -> Self {
        Self { name, args }
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn args(&self) -> &[Type] {
        &self.args
    }

    pub fn is_raw(&self) -> bool {
        self.args.is_empty()
    }

    pub fn erasure(&self) -> ReferenceType {
        ReferenceType::named(self.name.clone())
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(">")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<Type>),
    Super(Box<Type>),
}

impl WildcardBound {
    pub fn bound(&self) -> Option<&Type> {
        match self {
            WildcardBound::Unbounded => None,
            WildcardBound::Extends(ty) | WildcardBound::Super(ty) => Some(ty),
        }
    }

    pub fn is_extends(&self) -> bool {
        matches!(self, WildcardBound::Extends(_))
    }

    pub fn is_super(&self) -> bool {
        matches!(self, WildcardBound::Super(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Primitive(PrimitiveType),
    Reference(ReferenceType),
    Array(Box<Type>),
    TypeVariable(TypeParamId),
    Wildcard(WildcardBound),
    Null,
    Void,
}

impl Type {
    /// `decl<args...>`, checking the argument count against the declaration.
    pub fn reference(decl: &TypeDecl, args: Vec<Type>) -> Result<Type, TypeError> {
        ReferenceType::new(decl, args).map(Type::Reference)
    }

    /// Raw/non-generic use of a type by name.
    pub fn named(name: impl Into<TypeName>) -> Type {
        Type::Reference(ReferenceType::named(name))
    }

    pub fn object() -> Type {
        Type::named(OBJECT)
    }

    pub fn array(element: Type) -> Type {
        Type::Array(Box::new(element))
    }

    pub fn type_var(owner: impl AsRef<str>, name: impl AsRef<str>) -> Type {
        Type::TypeVariable(TypeParamId::new(owner, name))
    }

    pub fn extends(bound: Type) -> Type {
        Type::Wildcard(WildcardBound::Extends(Box::new(bound)))
    }

    pub fn super_of(bound: Type) -> Type {
        Type::Wildcard(WildcardBound::Super(Box::new(bound)))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Primitive(_) => "primitive",
            Type::Reference(_) => "reference",
            Type::Array(_) => "array",
            Type::TypeVariable(_) => "type variable",
            Type::Wildcard(_) => "wildcard",
            Type::Null => "null",
            Type::Void => "void",
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }

    pub fn is_reference_type(&self) -> bool {
        matches!(self, Type::Reference(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn is_type_variable(&self) -> bool {
        matches!(self, Type::TypeVariable(_))
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Type::Wildcard(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Type::Null)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn as_primitive(&self) -> Result<PrimitiveType, TypeError> {
        match self {
            Type::Primitive(prim) => Ok(*prim),
            other => Err(other.mismatch("primitive")),
        }
    }

    pub fn as_reference_type(&self) -> Result<&ReferenceType, TypeError> {
        match self {
            Type::Reference(reference) => Ok(reference),
            other => Err(other.mismatch("reference")),
        }
    }

    pub fn as_array_element(&self) -> Result<&Type, TypeError> {
        match self {
            Type::Array(element) => Ok(element),
            other => Err(other.mismatch("array")),
        }
    }

    pub fn as_type_variable(&self) -> Result<&TypeParamId, TypeError> {
        match self {
            Type::TypeVariable(id) => Ok(id),
            other => Err(other.mismatch("type variable")),
        }
    }

    pub fn as_wildcard(&self) -> Result<&WildcardBound, TypeError> {
        match self {
            Type::Wildcard(bound) => Ok(bound),
            other => Err(other.mismatch("wildcard")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> TypeError {
        TypeError::TypeKindMismatch {
            expected,
            found: self.to_string(),
        }
    }

    /// Rebuild `self` with `f` applied to every direct structural child: reference type
    /// arguments, the array element and the wildcard bound. Leaves are cloned.
    ///
    /// All substitution passes go through here so none of them can forget a compound variant.
    pub fn map_children(&self, mut f: impl FnMut(&Type) -> Type) -> Type {
        match self {
            Type::Reference(reference) => Type::Reference(ReferenceType::from_parts(
                reference.name.clone(),
                reference.args.iter().map(&mut f).collect(),
            )),
            Type::Array(element) => Type::Array(Box::new(f(element))),
            Type::Wildcard(WildcardBound::Extends(bound)) => {
                Type::Wildcard(WildcardBound::Extends(Box::new(f(bound))))
            }
            Type::Wildcard(WildcardBound::Super(bound)) => {
                Type::Wildcard(WildcardBound::Super(Box::new(f(bound))))
            }
            Type::Wildcard(WildcardBound::Unbounded)
            | Type::Primitive(_)
            | Type::TypeVariable(_)
            | Type::Null
            | Type::Void => self.clone(),
        }
    }

    /// Every type variable mentioned by `self`, in first-occurrence order.
    pub fn type_variables(&self) -> Vec<TypeParamId> {
        fn walk(ty: &Type, out: &mut Vec<TypeParamId>) {
            match ty {
                Type::TypeVariable(id) => {
                    if !out.contains(id) {
                        out.push(id.clone());
                    }
                }
                Type::Reference(reference) => {
                    for arg in &reference.args {
                        walk(arg, out);
                    }
                }
                Type::Array(element) => walk(element, out),
                Type::Wildcard(bound) => {
                    if let Some(bound) = bound.bound() {
                        walk(bound, out);
                    }
                }
                Type::Primitive(_) | Type::Null | Type::Void => {}
            }
        }

        let mut out = Vec::new();
        walk(self, &mut out);
        out
    }

    pub fn mentions(&self, param: &TypeParamId) -> bool {
        match self {
            Type::TypeVariable(id) => id == param,
            Type::Reference(reference) => reference.args.iter().any(|arg| arg.mentions(param)),
            Type::Array(element) => element.mentions(param),
            Type::Wildcard(bound) => bound.bound().is_some_and(|bound| bound.mentions(param)),
            Type::Primitive(_) | Type::Null | Type::Void => false,
        }
    }

    /// Replace every occurrence of `target` by `replacement`.
    ///
    /// The replacement itself is not rescanned, so `T -> List<T>` is a single step and a
    /// self-referential replacement cannot recurse. `memo` belongs to one substitution session:
    /// the first occurrence of `target` records its result there and later occurrences reuse the
    /// recorded value. `void` and primitive types cannot bind a type variable and are rejected
    /// with [`TypeError::InvalidBinding`].
    pub fn replace_type_variable(
        &self,
        target: &TypeParamId,
        replacement: &Type,
        memo: &mut SubstitutionMemo,
    ) -> Result<Type, TypeError> {
        check_binding(target, replacement)?;
        Ok(self.replace_in(target, replacement, memo))
    }

    fn replace_in(&self, target: &TypeParamId, replacement: &Type, memo: &mut SubstitutionMemo) -> Type {
        match self {
            Type::TypeVariable(id) if id == target => {
                if let Some(done) = memo.get(id) {
                    return done.clone();
                }
                memo.insert(id.clone(), replacement.clone());
                replacement.clone()
            }
            Type::TypeVariable(_) => self.clone(),
            _ => self.map_children(|child| child.replace_in(target, replacement, memo)),
        }
    }

    /// Replace the type variables declared by `params` with their upper bounds.
    ///
    /// Bounds may mention the parameter they bound (`T extends Comparable<T>`). Before a
    /// parameter's bound is expanded the memo holds the bound's erasure, so a recursive
    /// occurrence becomes the raw bound (`Comparable<Comparable>`) instead of looping.
    pub fn replace_with_bounds(&self, params: &[TypeParamDecl], memo: &mut SubstitutionMemo) -> Type {
        match self {
            Type::TypeVariable(id) => {
                if let Some(done) = memo.get(id) {
                    return done.clone();
                }
                let Some(decl) = params.iter().find(|param| param.id() == id) else {
                    return self.clone();
                };
                let bound = decl.upper_bound();
                memo.insert(id.clone(), bound.erasure());
                let expanded = bound.replace_with_bounds(params, memo);
                memo.insert(id.clone(), expanded.clone());
                expanded
            }
            _ => self.map_children(|child| child.replace_with_bounds(params, memo)),
        }
    }

    /// Type erasure: type arguments are dropped, type variables and wildcards become their
    /// bound's erasure (`java.lang.Object` when unknown).
    pub fn erasure(&self) -> Type {
        match self {
            Type::Reference(reference) => Type::Reference(reference.erasure()),
            Type::Array(element) => Type::array(element.erasure()),
            Type::TypeVariable(_) | Type::Wildcard(WildcardBound::Unbounded) => Type::object(),
            Type::Wildcard(WildcardBound::Extends(bound)) => bound.erasure(),
            Type::Wildcard(WildcardBound::Super(_)) => Type::object(),
            Type::Primitive(_) | Type::Null | Type::Void => self.clone(),
        }
    }

    /// The reference type a primitive boxes to; other types are returned unchanged.
    pub fn boxed(&self) -> Type {
        match self {
            Type::Primitive(prim) => Type::named(prim.box_type_name()),
            other => other.clone(),
        }
    }
}

pub(crate) fn check_binding(param: &TypeParamId, replacement: &Type) -> Result<(), TypeError> {
    match replacement {
        Type::Void | Type::Primitive(_) => Err(TypeError::InvalidBinding {
            param: param.clone(),
            found: replacement.to_string(),
        }),
        _ => Ok(()),
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Primitive(prim) => f.write_str(prim.name()),
            Type::Reference(reference) => write!(f, "{reference}"),
            Type::Array(element) => write!(f, "{element}[]"),
            Type::TypeVariable(id) => write!(f, "{id}"),
            Type::Wildcard(WildcardBound::Unbounded) => f.write_str("?"),
            Type::Wildcard(WildcardBound::Extends(bound)) => write!(f, "? extends {bound}"),
            Type::Wildcard(WildcardBound::Super(bound)) => write!(f, "? super {bound}"),
            Type::Null => f.write_str("null"),
            Type::Void => f.write_str("void"),
        }
    }
}
