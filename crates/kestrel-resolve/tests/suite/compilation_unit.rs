use std::sync::Arc;

use kestrel_resolve::ast::CompilationUnit;
use kestrel_resolve::{CompilationUnitContext, Context, ResolveConfig};
use kestrel_types::{MemoryTypeSolver, PrimitiveType, Type, TypeDecl, TypeSolver, ValueDecl};
use pretty_assertions::assert_eq;

fn solver() -> MemoryTypeSolver {
    MemoryTypeSolver::with_minimal_jdk()
        .with(TypeDecl::class("com.acme.List"))
        .with(TypeDecl::class("com.acme.Outer"))
        .with(TypeDecl::class("com.acme.Outer.Inner"))
        .with(
            TypeDecl::class("com.acme.Constants")
                .with_field(ValueDecl::static_field("LIMIT", Type::Primitive(PrimitiveType::Int)))
                .with_field(ValueDecl::field("instanceOnly", Type::Primitive(PrimitiveType::Int))),
        )
        .with(TypeDecl::class("com.example.Helper"))
}

fn resolved_name(ctx: &dyn Context, name: &str, solver: &dyn TypeSolver) -> Option<String> {
    ctx.solve_type(name, solver)
        .into_declaration()
        .map(|resolution| resolution.as_type().to_string())
}

#[test]
fn single_type_import_shadows_on_demand_import() {
    let solver = solver();
    let unit = CompilationUnit::new(Some("com.example"))
        .with_import("java.util.*")
        .with_import("com.acme.List");
    let root = CompilationUnitContext::new(Arc::new(unit));

    assert_eq!(resolved_name(&root, "List", &solver).as_deref(), Some("com.acme.List"));
    assert_eq!(
        resolved_name(&root, "ArrayList", &solver).as_deref(),
        Some("java.util.ArrayList")
    );
}

#[test]
fn declared_types_shadow_imports() {
    let solver = solver();
    let unit = CompilationUnit::new(Some("com.example"))
        .with_import("java.util.List")
        .with_type(TypeDecl::class("com.example.List"));
    let root = CompilationUnitContext::new(Arc::new(unit));

    assert_eq!(resolved_name(&root, "List", &solver).as_deref(), Some("com.example.List"));
}

#[test]
fn package_then_implicit_imports_then_qualified_names() {
    let solver = solver();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(Some("com.example"))));

    assert_eq!(
        resolved_name(&root, "Helper", &solver).as_deref(),
        Some("com.example.Helper")
    );
    assert_eq!(
        resolved_name(&root, "String", &solver).as_deref(),
        Some("java.lang.String")
    );
    assert_eq!(
        resolved_name(&root, "java.util.Map", &solver).as_deref(),
        Some("java.util.Map")
    );
    assert_eq!(resolved_name(&root, "Missing", &solver), None);
}

#[test]
fn default_package_sees_fully_qualified_names_only() {
    let solver = solver();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(None)));

    assert_eq!(resolved_name(&root, "Helper", &solver), None);
    assert_eq!(
        resolved_name(&root, "com.example.Helper", &solver).as_deref(),
        Some("com.example.Helper")
    );
}

#[test]
fn implicit_imports_follow_configuration() {
    let solver = solver();
    let unit = Arc::new(CompilationUnit::new(None));
    let config = ResolveConfig {
        implicit_imports: vec!["java.util".to_owned()],
        ..ResolveConfig::default()
    };
    let root = CompilationUnitContext::from_config(unit, &config);

    assert_eq!(resolved_name(&root, "String", &solver), None);
    assert_eq!(resolved_name(&root, "List", &solver).as_deref(), Some("java.util.List"));
}

#[test]
fn member_types_resolve_through_an_imported_outer_type() {
    let solver = solver();
    let unit = CompilationUnit::new(Some("com.example")).with_import("com.acme.Outer");
    let root = CompilationUnitContext::new(Arc::new(unit));

    assert_eq!(
        resolved_name(&root, "Outer.Inner", &solver).as_deref(),
        Some("com.acme.Outer.Inner")
    );
}

#[test]
fn static_imports_provide_fields() {
    let solver = solver();
    let unit = CompilationUnit::new(Some("com.example"))
        .with_import("static java.lang.Math.PI")
        .with_import("static com.acme.Constants.*");
    let root = CompilationUnitContext::new(Arc::new(unit));

    let pi = root.solve_symbol("PI", &solver).into_declaration().unwrap();
    assert_eq!(pi.ty(), &Type::Primitive(PrimitiveType::Double));
    assert!(root.solve_symbol("LIMIT", &solver).is_solved());
    assert!(!root.solve_symbol("instanceOnly", &solver).is_solved());
    assert_eq!(root.imports().static_single.len(), 1);
    assert_eq!(root.imports().static_star.len(), 1);
}

#[test]
fn qualified_field_names_resolve_through_their_type() {
    let solver = solver();
    let root = CompilationUnitContext::new(Arc::new(CompilationUnit::new(Some("com.example"))));

    let pi = root.solve_symbol("Math.PI", &solver).into_declaration().unwrap();
    assert_eq!(pi.name(), "PI");
    let order = root
        .solve_symbol("java.lang.String.CASE_INSENSITIVE_ORDER", &solver)
        .into_declaration()
        .unwrap();
    assert!(order.is_static());
    assert!(!root.solve_symbol("Math.E", &solver).is_solved());
}
