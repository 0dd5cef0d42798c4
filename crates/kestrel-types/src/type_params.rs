use std::sync::Arc;

use indexmap::IndexMap;

use crate::ty::check_binding;
use crate::{Result, SubstitutionMemo, Type, TypeParamId};

/// Immutable bindings from type parameters to types.
///
/// Maps are shared by reference count; deriving a new map through [`TypeParametersMap::to_builder`]
/// copies the bindings, so a holder of `m` never observes bindings added to a map derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeParametersMap {
    bindings: Arc<IndexMap<TypeParamId, Type>>,
}

impl TypeParametersMap {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> TypeParametersMapBuilder {
        TypeParametersMapBuilder::default()
    }

    pub fn to_builder(&self) -> TypeParametersMapBuilder {
        TypeParametersMapBuilder {
            bindings: (*self.bindings).clone(),
        }
    }

    /// The type bound to `param`, or the unbound variable itself.
    pub fn get_value(&self, param: &TypeParamId) -> Type {
        self.bindings
            .get(param)
            .cloned()
            .unwrap_or_else(|| Type::TypeVariable(param.clone()))
    }

    pub fn get(&self, param: &TypeParamId) -> Option<&Type> {
        self.bindings.get(param)
    }

    pub fn contains(&self, param: &TypeParamId) -> bool {
        self.bindings.contains_key(param)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&TypeParamId, &Type)> {
        self.bindings.iter()
    }

    /// Apply every binding to `ty`, one after another in insertion order, sharing one memo.
    ///
    /// Bindings are applied once each: a replacement that mentions another bound parameter
    /// only has it replaced if that parameter's binding comes later.
    pub fn replace_all(&self, ty: &Type) -> Result<Type> {
        let mut memo = SubstitutionMemo::new();
        self.replace_all_with_memo(ty, &mut memo)
    }

    pub fn replace_all_with_memo(&self, ty: &Type, memo: &mut SubstitutionMemo) -> Result<Type> {
        let mut out = ty.clone();
        for (param, replacement) in self.bindings.iter() {
            if !out.mentions(param) {
                continue;
            }
            out = out.replace_type_variable(param, replacement, memo)?;
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeParametersMapBuilder {
    bindings: IndexMap<TypeParamId, Type>,
}

impl TypeParametersMapBuilder {
    /// Bind `param` to `ty`. Setting the same parameter twice keeps the last value (in the
    /// first value's position).
    ///
    /// `void` and primitive types cannot be bound; see [`crate::TypeError::InvalidBinding`].
    pub fn set_value(mut self, param: TypeParamId, ty: Type) -> Result<Self> {
        check_binding(&param, &ty)?;
        self.bindings.insert(param, ty);
        Ok(self)
    }

    pub fn build(self) -> TypeParametersMap {
        TypeParametersMap {
            bindings: Arc::new(self.bindings),
        }
    }
}
