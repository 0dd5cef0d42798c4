use indexmap::IndexMap;

use crate::subtyping::instantiate_as_supertype;
use crate::{
    Result, Type, TypeParamId, TypeParametersMap, TypeSolver, WildcardBound,
};

/// Unification workspace for one generic method call.
///
/// Each `(formal, actual)` pair is walked in lock-step as it is added; every type variable met on
/// the formal side is bound to the actual type at the same position. The first binding of a
/// parameter wins and later ones are ignored without a consistency check, so
/// `<T> void both(T a, T b)` called with `(String, Integer)` infers `T = String`.
///
/// Positions whose shapes do not line up (different declarations with no supertype relation,
/// raw uses, differing arity) produce no binding and no error.
pub struct InferenceContext<'a> {
    solver: &'a dyn TypeSolver,
    pairs: Vec<(Type, Type)>,
    bindings: IndexMap<TypeParamId, Type>,
}

impl<'a> InferenceContext<'a> {
    pub fn new(solver: &'a dyn TypeSolver) -> Self {
        Self {
            solver,
            pairs: Vec::new(),
            bindings: IndexMap::new(),
        }
    }

    pub fn add_pair(&mut self, formal: &Type, actual: &Type) {
        self.pairs.push((formal.clone(), actual.clone()));
        self.unify(formal, actual);
    }

    pub fn pairs(&self) -> &[(Type, Type)] {
        &self.pairs
    }

    pub fn binding(&self, param: &TypeParamId) -> Option<&Type> {
        self.bindings.get(param)
    }

    /// The bindings found so far, in the order they were first inferred.
    pub fn bindings(&self) -> Result<TypeParametersMap> {
        let mut builder = TypeParametersMap::builder();
        for (param, ty) in &self.bindings {
            builder = builder.set_value(param.clone(), ty.clone())?;
        }
        Ok(builder.build())
    }

    /// Apply the inferred bindings to `ty`.
    pub fn resolve(&self, ty: &Type) -> Result<Type> {
        self.bindings()?.replace_all(ty)
    }

    fn bind(&mut self, param: &TypeParamId, actual: &Type) {
        let actual = match actual {
            Type::Primitive(_) => actual.boxed(),
            Type::Void | Type::Null => return,
            Type::Wildcard(bound) => bound.bound().cloned().unwrap_or_else(Type::object),
            Type::TypeVariable(id) if id == param => return,
            _ => actual.clone(),
        };

        match self.bindings.get(param) {
            None => {
                self.bindings.insert(param.clone(), actual);
            }
            Some(existing) if *existing != actual => {
                tracing::trace!(
                    target: "kestrel.resolve",
                    param = ?param,
                    kept = %existing,
                    ignored = %actual,
                    "conflicting inference ignored"
                );
            }
            Some(_) => {}
        }
    }

    fn unify(&mut self, formal: &Type, actual: &Type) {
        if actual.is_null() {
            return;
        }

        match (formal, actual) {
            (Type::TypeVariable(param), _) => self.bind(param, actual),

            (Type::Reference(_), Type::Primitive(_)) => self.unify(formal, &actual.boxed()),
            (Type::Reference(formal_ref), Type::Reference(_) | Type::Array(_)) => {
                if formal_ref.is_raw() {
                    return;
                }
                let Some(view) = instantiate_as_supertype(self.solver, actual, formal_ref.name())
                else {
                    return;
                };
                if view.is_raw() || view.args().len() != formal_ref.args().len() {
                    return;
                }
                for (formal_arg, actual_arg) in formal_ref.args().iter().zip(view.args()) {
                    self.unify(formal_arg, actual_arg);
                }
            }

            (Type::Array(formal_elem), Type::Array(actual_elem)) => {
                self.unify(formal_elem, actual_elem);
            }

            (
                Type::Wildcard(WildcardBound::Extends(formal_bound)),
                Type::Wildcard(WildcardBound::Extends(actual_bound)),
            )
            | (
                Type::Wildcard(WildcardBound::Super(formal_bound)),
                Type::Wildcard(WildcardBound::Super(actual_bound)),
            ) => self.unify(formal_bound, actual_bound),
            (Type::Wildcard(WildcardBound::Extends(formal_bound) | WildcardBound::Super(formal_bound)), _)
                if !actual.is_wildcard() =>
            {
                self.unify(formal_bound, actual)
            }

            _ => {}
        }
    }
}
