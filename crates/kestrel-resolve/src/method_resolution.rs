//! Overload selection and instantiation of the selected method for a call site.

use std::sync::Arc;

use kestrel_types::{
    is_assignable, InferenceContext, MethodDecl, MethodLike, MethodUsage, Type, TypeParametersMap,
    TypeSolver,
};

use crate::{Context, ResolveError};

/// Instantiate `method` for a call with argument types `args`, made from `ctx`.
///
/// Type parameters of the enclosing type are taken from the context
/// ([`Context::type_param_value`]); the method's own type parameters are inferred from the
/// arguments. The trailing variadic parameter takes part in inference through the first
/// argument in the variadic position (or the array passed there directly).
pub fn resolve_method_usage<C>(
    ctx: &C,
    method: &Arc<MethodDecl>,
    args: &[Type],
    solver: &dyn TypeSolver,
) -> Result<MethodUsage, ResolveError>
where
    C: Context + ?Sized,
{
    resolve_method_usage_with_type_args(ctx, method, &[], args, solver)
}

/// [`resolve_method_usage`] for a call spelling out the method's type arguments
/// (`Collections.<String>emptyList()`).
///
/// `type_args` bind the method's type parameters positionally when there is one per parameter;
/// otherwise they are ignored and the parameters are inferred from `args`.
pub fn resolve_method_usage_with_type_args<C>(
    ctx: &C,
    method: &Arc<MethodDecl>,
    type_args: &[Type],
    args: &[Type],
    solver: &dyn TypeSolver,
) -> Result<MethodUsage, ResolveError>
where
    C: Context + ?Sized,
{
    let class_bindings = enclosing_type_bindings(ctx, method, solver)?;
    let params = method
        .params()
        .iter()
        .map(|param| class_bindings.replace_all(param.ty()))
        .collect::<Result<Vec<_>, _>>()?;
    let return_type = class_bindings.replace_all(method.return_type())?;
    let mut usage = MethodUsage::from_parts(Arc::clone(method), params, return_type, class_bindings)?;

    let method_params = method.type_params();
    let explicit = !type_args.is_empty() && type_args.len() == method_params.len();
    if explicit {
        for (param, ty) in method_params.iter().zip(type_args) {
            usage = usage.replace_type_parameter(param.id(), ty.clone())?;
        }
    } else {
        let inferred = infer_from_arguments(method, usage.param_types(), args, solver)?;
        for (param, ty) in inferred.iter() {
            if method_params.iter().any(|tp| tp.id() == param) {
                usage = usage.replace_type_parameter(param, ty.clone())?;
            }
        }
    }

    tracing::debug!(
        target: "kestrel.resolve",
        method = %method.qualified_signature(),
        return_type = %usage.return_type(),
        explicit,
        "instantiated method usage"
    );
    Ok(usage)
}

fn infer_from_arguments(
    method: &MethodDecl,
    params: &[Type],
    args: &[Type],
    solver: &dyn TypeSolver,
) -> Result<TypeParametersMap, ResolveError> {
    let mut inference = InferenceContext::new(solver);
    let fixed = if method.is_varargs() {
        params.len().saturating_sub(1)
    } else {
        params.len()
    };
    for (formal, actual) in params.iter().zip(args).take(fixed) {
        inference.add_pair(formal, actual);
    }
    if method.is_varargs() {
        if let (Some(formal), Some(first)) = (params.last(), args.get(fixed)) {
            let passes_array = args.len() == params.len() && first.is_array();
            let actual = if passes_array {
                first.clone()
            } else {
                Type::array(first.clone())
            };
            inference.add_pair(formal, &actual);
        }
    }
    Ok(inference.bindings()?)
}

fn enclosing_type_bindings<C>(
    ctx: &C,
    method: &MethodDecl,
    solver: &dyn TypeSolver,
) -> Result<TypeParametersMap, ResolveError>
where
    C: Context + ?Sized,
{
    let mut mentioned = Vec::new();
    for ty in method
        .params()
        .iter()
        .map(|param| param.ty())
        .chain(std::iter::once(method.return_type()))
    {
        for var in ty.type_variables() {
            if !var.is_method_level() && !mentioned.contains(&var) {
                mentioned.push(var);
            }
        }
    }

    let mut builder = TypeParametersMap::builder();
    for var in mentioned {
        if let Some(value) = ctx.type_param_value(&var, solver) {
            builder = builder.set_value(var, value)?;
        }
    }
    Ok(builder.build())
}

/// Whether `candidate` can take `arg_count` arguments, counting a variadic tail.
pub fn is_arity_compatible<M: MethodLike + ?Sized>(candidate: &M, arg_count: usize) -> bool {
    let count = candidate.param_count();
    count == arg_count || (candidate.is_varargs() && arg_count + 1 >= count)
}

/// Whether every argument converts to the corresponding parameter type.
pub fn is_applicable<M: MethodLike + ?Sized>(
    candidate: &M,
    args: &[Type],
    solver: &dyn TypeSolver,
) -> bool {
    if !is_arity_compatible(candidate, args.len()) {
        return false;
    }

    let params = candidate.params();
    let fixed = if candidate.is_varargs() {
        params.len() - 1
    } else {
        params.len()
    };
    let fixed_ok = params
        .iter()
        .zip(args)
        .take(fixed)
        .all(|(param, arg)| is_assignable(solver, param.ty(), arg));
    if !fixed_ok {
        return false;
    }
    if !candidate.is_varargs() {
        return true;
    }

    let Some(array) = params.last().map(|param| param.ty()) else {
        return true;
    };
    let rest = &args[fixed..];
    if let [single] = rest {
        if is_assignable(solver, array, single) {
            return true;
        }
    }
    let component = array.as_array_element().unwrap_or(array);
    rest.iter().all(|arg| is_assignable(solver, component, arg))
}

/// Choose the overload to call among `candidates` (in declaration order).
///
/// Candidates must be applicable to `args`. Fixed-arity candidates win over variadic ones; among
/// those a unique most specific candidate wins; remaining ties go to the first in declaration
/// order. `None` when nothing is applicable.
pub fn select_most_applicable<M: MethodLike>(
    candidates: &[Arc<M>],
    args: &[Type],
    solver: &dyn TypeSolver,
) -> Option<Arc<M>> {
    let applicable: Vec<Arc<M>> = candidates
        .iter()
        .filter(|candidate| is_applicable::<M>(candidate, args, solver))
        .cloned()
        .collect();

    let pool: Vec<Arc<M>> = if applicable.iter().any(|candidate| !candidate.is_varargs()) {
        applicable
            .into_iter()
            .filter(|candidate| !candidate.is_varargs())
            .collect()
    } else {
        applicable
    };

    match pool.len() {
        0 => None,
        1 => pool.into_iter().next(),
        len => {
            let most_specific: Vec<usize> = (0..len)
                .filter(|&i| {
                    (0..len).all(|j| i == j || is_more_specific::<M>(&pool[i], &pool[j], solver))
                })
                .collect();
            let chosen = match most_specific.as_slice() {
                [unique] => *unique,
                _ => 0,
            };

            tracing::debug!(
                target: "kestrel.resolve",
                candidates = len,
                chosen = %pool[chosen].qualified_signature(),
                unique = most_specific.len() == 1,
                "overload tie-break"
            );
            Some(Arc::clone(&pool[chosen]))
        }
    }
}

/// `a` is more specific than `b` when each of `a`'s parameter types converts to `b`'s.
fn is_more_specific<M: MethodLike>(a: &M, b: &M, solver: &dyn TypeSolver) -> bool {
    let shared = a.param_count().min(b.param_count());
    (0..shared).all(|idx| match (a.param_type(idx), b.param_type(idx)) {
        (Some(a_ty), Some(b_ty)) => is_assignable(solver, b_ty, a_ty),
        _ => true,
    })
}
