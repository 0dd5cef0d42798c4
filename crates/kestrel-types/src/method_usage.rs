use std::fmt;
use std::sync::Arc;

use crate::{
    MethodDecl, MethodLike, Result, SubstitutionMemo, Type, TypeError, TypeName, TypeParamId,
    TypeParametersMap,
};

/// A method declaration with its parameter and return types instantiated for one call site.
///
/// Values are immutable; the `replace_*` operations consume `self` and hand back either a new
/// usage or, when the replacement equals the current value, `self` untouched (the parameter
/// list is not reallocated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodUsage {
    decl: Arc<MethodDecl>,
    params: Arc<[Type]>,
    return_type: Type,
    type_params: TypeParametersMap,
}

impl MethodUsage {
    /// The declaration with its declared (unsubstituted) types.
    pub fn new(decl: Arc<MethodDecl>) -> Self {
        let params: Arc<[Type]> = decl.params().iter().map(|p| p.ty().clone()).collect();
        let return_type = decl.return_type().clone();
        Self {
            decl,
            params,
            return_type,
            type_params: TypeParametersMap::empty(),
        }
    }

    pub fn from_parts(
        decl: Arc<MethodDecl>,
        params: Vec<Type>,
        return_type: Type,
        type_params: TypeParametersMap,
    ) -> Result<Self> {
        if params.len() != decl.param_count() {
            return Err(TypeError::ParamCountMismatch {
                method: decl.qualified_signature(),
                expected: decl.param_count(),
                found: params.len(),
            });
        }
        Ok(Self {
            decl,
            params: params.into(),
            return_type,
            type_params,
        })
    }

    pub fn declaration(&self) -> &Arc<MethodDecl> {
        &self.decl
    }

    pub fn name(&self) -> &str {
        self.decl.name()
    }

    pub fn declaring_type(&self) -> &TypeName {
        self.decl.declaring_type()
    }

    pub fn param_types(&self) -> &[Type] {
        &self.params
    }

    pub fn param_type(&self, index: usize) -> Option<&Type> {
        self.params.get(index)
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    pub fn type_parameters_map(&self) -> &TypeParametersMap {
        &self.type_params
    }

    pub fn qualified_signature(&self) -> String {
        self.decl.qualified_signature()
    }

    #[must_use = "replacement returns a new usage"]
    pub fn replace_param_type(self, index: usize, ty: Type) -> Result<Self> {
        let len = self.params.len();
        let Some(current) = self.params.get(index) else {
            return Err(TypeError::ParamIndexOutOfRange { index, len });
        };
        if *current == ty {
            return Ok(self);
        }

        let mut params = self.params.to_vec();
        params[index] = ty;
        Ok(Self {
            params: params.into(),
            ..self
        })
    }

    #[must_use = "replacement returns a new usage"]
    pub fn replace_return_type(self, ty: Type) -> Self {
        if self.return_type == ty {
            return self;
        }
        Self {
            return_type: ty,
            ..self
        }
    }

    /// Bind `param` to `ty` in every parameter type and the return type, and record the binding.
    pub fn replace_type_parameter(self, param: &TypeParamId, ty: Type) -> Result<Self> {
        let mut memo = SubstitutionMemo::new();
        let mut usage = self;
        for index in 0..usage.params.len() {
            let replaced = usage.params[index].replace_type_variable(param, &ty, &mut memo)?;
            usage = usage.replace_param_type(index, replaced)?;
        }
        let return_type = usage.return_type.replace_type_variable(param, &ty, &mut memo)?;
        usage = usage.replace_return_type(return_type);

        let type_params = usage
            .type_params
            .to_builder()
            .set_value(param.clone(), ty)?
            .build();
        Ok(Self {
            type_params,
            ..usage
        })
    }
}

impl fmt::Display for MethodUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.declaring_type(), self.name())?;
        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}
