use kestrel_types::{
    instantiate_as_supertype, InferenceContext, MemoryTypeSolver, MethodLike, MethodUsage,
    PrimitiveType, Type, TypeName, TypeSolver,
};
use pretty_assertions::assert_eq;

fn list_of(solver: &MemoryTypeSolver, arg: Type) -> Type {
    let list = solver.solve_type("java.util.List").unwrap();
    Type::reference(&list, vec![arg]).unwrap()
}

#[test]
fn singleton_list_return_type_is_inferred_from_the_argument() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let collections = solver.solve_type("java.util.Collections").unwrap();
    let method = collections.methods_named("singletonList").next().unwrap().clone();

    let mut inference = InferenceContext::new(&solver);
    inference.add_pair(
        method.param_type(0).unwrap(),
        &Type::named("java.lang.String"),
    );
    let return_type = inference.resolve(method.return_type()).unwrap();
    let params = method
        .params()
        .iter()
        .map(|param| inference.resolve(param.ty()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let usage = MethodUsage::from_parts(
        method.clone(),
        params,
        return_type,
        inference.bindings().unwrap(),
    )
    .unwrap();

    assert_eq!(usage.return_type(), &list_of(&solver, Type::named("java.lang.String")));
    assert_eq!(usage.param_types(), &[Type::named("java.lang.String")]);
    assert_eq!(usage.type_parameters_map().len(), 1);
}

#[test]
fn primitive_argument_infers_its_box() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let arrays = solver.solve_type("java.util.Arrays").unwrap();
    let as_list = arrays.methods_named("asList").next().unwrap();

    // Arrays.asList(1, 2): the variadic component is unified against the first argument.
    let mut inference = InferenceContext::new(&solver);
    inference.add_pair(
        &Type::array(as_list.type_var("T")),
        &Type::array(Type::Primitive(PrimitiveType::Int)),
    );

    assert_eq!(
        inference.resolve(as_list.return_type()).unwrap(),
        list_of(&solver, Type::named("java.lang.Integer"))
    );
}

#[test]
fn map_entries_are_viewed_through_the_declared_interface() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let hash_map = solver.solve_type("java.util.HashMap").unwrap();
    let concrete = Type::reference(
        &hash_map,
        vec![Type::named("java.lang.String"), Type::named("java.lang.Integer")],
    )
    .unwrap();

    let view = instantiate_as_supertype(&solver, &concrete, &TypeName::new("java.util.Map")).unwrap();
    assert_eq!(
        view.args(),
        &[Type::named("java.lang.String"), Type::named("java.lang.Integer")]
    );
}
