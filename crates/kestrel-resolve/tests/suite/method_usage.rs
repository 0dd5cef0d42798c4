use std::sync::Arc;

use kestrel_resolve::ast::CompilationUnit;
use kestrel_resolve::{
    CompilationUnitContext, Context, MethodCallContext, MethodContext, TypeBodyContext,
};
use kestrel_types::{
    DeclKind, MemoryTypeSolver, MethodDecl, MethodLike, PrimitiveType, ReferenceType,
    SymbolReference, Type, TypeDecl, TypeSolver,
};
use pretty_assertions::assert_eq;

fn string() -> Type {
    Type::named("java.lang.String")
}

fn int() -> Type {
    Type::Primitive(PrimitiveType::Int)
}

fn list_of(solver: &dyn TypeSolver, arg: Type) -> Type {
    let list = solver.solve_type("java.util.List").unwrap();
    Type::reference(&list, vec![arg]).unwrap()
}

fn receiver(solver: &dyn TypeSolver, name: &str, args: Vec<Type>) -> ReferenceType {
    let decl = solver.solve_type(name).unwrap();
    ReferenceType::new(&decl, args).unwrap()
}

fn util() -> TypeDecl {
    let identity = MethodDecl::new("com.example.Util", "identity").with_type_param("T");
    let t = identity.type_var("T");
    let identity = identity
        .with_param("x", t.clone())
        .returns(t)
        .into_static();

    let pick = MethodDecl::new("com.example.Util", "pick").with_type_param("T");
    let t = pick.type_var("T");
    let pick = pick
        .with_param("a", t.clone())
        .with_param("b", t.clone())
        .returns(t)
        .into_static();

    TypeDecl::class("com.example.Util")
        .extends(Type::object())
        .with_method(identity)
        .with_method(pick)
        .with_method(MethodDecl::new("com.example.Util", "tick"))
        .with_method(MethodDecl::new("com.example.Util", "main").into_static())
}

#[test]
fn generic_identity_returns_the_argument_type() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let unit = Arc::new(CompilationUnit::new(Some("com.example")).with_type(util()));
    let root = CompilationUnitContext::new(Arc::clone(&unit));
    let class = TypeBodyContext::new(&root, Arc::clone(&unit.types[0]));

    let usage = class
        .solve_method_as_usage("identity", &[string()], &solver)
        .unwrap()
        .unwrap();

    assert_eq!(usage.return_type(), &string());
    assert_eq!(usage.param_types(), &[string()]);
    assert_eq!(usage.type_parameters_map().len(), 1);
}

#[test]
fn primitive_argument_instantiates_with_its_box() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let unit = Arc::new(CompilationUnit::new(Some("com.example")).with_type(util()));
    let root = CompilationUnitContext::new(Arc::clone(&unit));
    let class = TypeBodyContext::new(&root, Arc::clone(&unit.types[0]));

    let usage = class
        .solve_method_as_usage("identity", &[int()], &solver)
        .unwrap()
        .unwrap();
    assert_eq!(usage.return_type(), &Type::named("java.lang.Integer"));
}

#[test]
fn conflicting_inference_keeps_the_first_binding() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let unit = Arc::new(CompilationUnit::new(Some("com.example")).with_type(util()));
    let root = CompilationUnitContext::new(Arc::clone(&unit));
    let class = TypeBodyContext::new(&root, Arc::clone(&unit.types[0]));

    // `T` is seen as both String and Integer; the later occurrence is ignored, not merged.
    let usage = class
        .solve_method_as_usage(
            "pick",
            &[string(), Type::named("java.lang.Integer")],
            &solver,
        )
        .unwrap()
        .unwrap();
    assert_eq!(usage.return_type(), &string());
    assert_eq!(usage.param_types(), &[string(), string()]);
}

#[test]
fn receiver_type_arguments_instantiate_declared_members() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(None)));

    let list = MethodCallContext::new(&root, receiver(&solver, "java.util.List", vec![string()]));
    let get = list.solve_method_as_usage("get", &[int()], &solver).unwrap().unwrap();
    assert_eq!(get.return_type(), &string());
    assert_eq!(get.declaring_type().as_str(), "java.util.List");

    let map = MethodCallContext::new(
        &root,
        receiver(
            &solver,
            "java.util.Map",
            vec![string(), Type::named("java.lang.Integer")],
        ),
    );
    let put = map
        .solve_method_as_usage("put", &[string(), int()], &solver)
        .unwrap()
        .unwrap();
    assert_eq!(
        put.param_types(),
        &[string(), Type::named("java.lang.Integer")]
    );
    assert_eq!(put.return_type(), &Type::named("java.lang.Integer"));
}

#[test]
fn receiver_type_arguments_reach_inherited_members() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(None)));
    let array_list = MethodCallContext::new(
        &root,
        receiver(&solver, "java.util.ArrayList", vec![string()]),
    );

    let get = array_list
        .solve_method_as_usage("get", &[int()], &solver)
        .unwrap()
        .unwrap();
    assert_eq!(get.return_type(), &string());

    let size = array_list
        .solve_method_as_usage("size", &[], &solver)
        .unwrap()
        .unwrap();
    assert_eq!(size.declaring_type().as_str(), "java.util.Collection");
    assert_eq!(size.return_type(), &int());
}

#[test]
fn raw_receiver_leaves_type_variables_in_place() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(None)));
    let list_decl = solver.solve_type("java.util.List").unwrap();
    let raw = MethodCallContext::new(&root, receiver(&solver, "java.util.List", Vec::new()));

    let get = raw.solve_method_as_usage("get", &[int()], &solver).unwrap().unwrap();
    assert_eq!(get.return_type(), &list_decl.type_var("E"));
}

#[test]
fn receiver_without_the_method_is_unsolved() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(None)));
    let string_call = MethodCallContext::new(&root, receiver(&solver, "java.lang.String", vec![]));

    assert_eq!(
        string_call.solve_method("get", &[int()], false, &solver),
        SymbolReference::Unsolved(DeclKind::Method)
    );
    assert_eq!(
        string_call.solve_method_as_usage("get", &[int()], &solver),
        Ok(None)
    );
}

#[test]
fn overloads_prefer_the_most_specific_candidate() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(None)));
    let string_call = MethodCallContext::new(&root, receiver(&solver, "java.lang.String", vec![]));

    let by_int = string_call
        .solve_method("valueOf", &[int()], false, &solver)
        .into_declaration()
        .unwrap();
    assert_eq!(by_int.param_type(0), Some(&int()));

    let by_object = string_call
        .solve_method("valueOf", &[Type::named("java.util.List")], false, &solver)
        .into_declaration()
        .unwrap();
    assert_eq!(by_object.param_type(0), Some(&Type::object()));
}

#[test]
fn variadic_call_accepts_any_number_of_trailing_arguments() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(None)));
    let string_call = MethodCallContext::new(&root, receiver(&solver, "java.lang.String", vec![]));

    for args in [
        vec![string()],
        vec![string(), int()],
        vec![string(), int(), Type::Null, string()],
    ] {
        let usage = string_call
            .solve_method_as_usage("format", &args, &solver)
            .unwrap()
            .unwrap();
        assert_eq!(usage.return_type(), &string());
    }
}

#[test]
fn static_scope_cannot_call_instance_methods() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let unit = Arc::new(CompilationUnit::new(Some("com.example")).with_type(util()));
    let root = CompilationUnitContext::new(Arc::clone(&unit));
    let decl = Arc::clone(&unit.types[0]);
    let class = TypeBodyContext::new(&root, Arc::clone(&decl));

    let main = decl.methods_named("main").next().cloned().unwrap();
    let in_main = MethodContext::new(&class, main);
    assert!(!in_main.solve_method("tick", &[], false, &solver).is_solved());
    assert!(in_main.solve_method("identity", &[string()], false, &solver).is_solved());

    let tick = decl.methods_named("tick").next().cloned().unwrap();
    let in_tick = MethodContext::new(&class, tick);
    assert!(in_tick.solve_method("tick", &[], false, &solver).is_solved());
    // Inherited from java.lang.Object.
    assert!(in_tick.solve_method("hashCode", &[], false, &solver).is_solved());
}

#[test]
fn statically_imported_generic_methods_are_instantiated() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let unit = CompilationUnit::new(Some("com.example"))
        .with_import("static java.util.Collections.singletonList")
        .with_import("static java.util.Arrays.*");
    let root = CompilationUnitContext::new(Arc::new(unit));

    let singleton = root
        .solve_method_as_usage("singletonList", &[Type::named("java.lang.Integer")], &solver)
        .unwrap()
        .unwrap();
    assert_eq!(
        singleton.return_type(),
        &list_of(&solver, Type::named("java.lang.Integer"))
    );

    let as_list = root
        .solve_method_as_usage("asList", &[string(), string()], &solver)
        .unwrap()
        .unwrap();
    assert_eq!(as_list.return_type(), &list_of(&solver, string()));
    assert_eq!(as_list.declaration().qualified_signature(), "java.util.Arrays.asList(T...)");
}

fn names() -> TypeDecl {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    TypeDecl::class("com.example.Names")
        .extends(Type::Reference(receiver(&solver, "java.util.ArrayList", vec![string()])))
}

#[test]
fn source_types_inherit_members_through_the_provider() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let unit = Arc::new(CompilationUnit::new(Some("com.example")).with_type(names()));
    assert!(!solver.has_type("com.example.Names"));
    let root = CompilationUnitContext::new(Arc::clone(&unit));
    let class = TypeBodyContext::new(&root, Arc::clone(&unit.types[0]));

    let size = class
        .solve_method("size", &[], false, &solver)
        .into_declaration()
        .unwrap();
    assert_eq!(size.declaring_type().as_str(), "java.util.Collection");
    assert!(class.solve_method("hashCode", &[], false, &solver).is_solved());
    assert!(!class.solve_method("charAt", &[int()], false, &solver).is_solved());
}

#[test]
fn inherited_members_take_the_arguments_given_to_the_supertype() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let unit = Arc::new(CompilationUnit::new(Some("com.example")).with_type(names()));
    let root = CompilationUnitContext::new(Arc::clone(&unit));
    let class = TypeBodyContext::new(&root, Arc::clone(&unit.types[0]));

    let get = class
        .solve_method_as_usage("get", &[int()], &solver)
        .unwrap()
        .unwrap();
    assert_eq!(get.return_type(), &string());
    assert_eq!(get.declaring_type().as_str(), "java.util.List");
}

#[test]
fn explicit_type_arguments_bind_method_type_parameters() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(None)));
    let collections = receiver(&solver, "java.util.Collections", vec![]);

    let inferred = MethodCallContext::new(&root, collections.clone())
        .solve_method_as_usage("emptyList", &[], &solver)
        .unwrap()
        .unwrap();
    assert!(inferred.type_parameters_map().is_empty());
    assert_ne!(inferred.return_type(), &list_of(&solver, string()));

    let explicit = MethodCallContext::new(&root, collections)
        .with_type_args(vec![string()])
        .solve_method_as_usage("emptyList", &[], &solver)
        .unwrap()
        .unwrap();
    assert_eq!(explicit.return_type(), &list_of(&solver, string()));
    assert_eq!(explicit.type_parameters_map().len(), 1);
}

#[test]
fn explicit_type_arguments_of_the_wrong_count_fall_back_to_inference() {
    let solver = MemoryTypeSolver::with_minimal_jdk();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(None)));
    let call = MethodCallContext::new(&root, receiver(&solver, "java.util.Collections", vec![]))
        .with_type_args(vec![string(), string()]);

    let usage = call
        .solve_method_as_usage("singletonList", &[Type::named("java.lang.Integer")], &solver)
        .unwrap()
        .unwrap();
    assert_eq!(
        usage.return_type(),
        &list_of(&solver, Type::named("java.lang.Integer"))
    );
}
