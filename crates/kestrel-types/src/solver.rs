use std::collections::HashMap;
use std::sync::Arc;

use crate::ty::ReferenceType;
use crate::{
    ConstructorDecl, DeclKind, MethodDecl, PrimitiveType, SymbolReference, Type, TypeDecl,
    TypeName, ValueDecl,
};

/// A declaration provider.
///
/// Implementations are called concurrently without external synchronization and must return
/// the same answer for the same name for as long as a resolution session lasts; the resolution
/// cache relies on this.
pub trait TypeSolver: Send + Sync {
    /// Look up a type by qualified name (`java.util.List`, `com.example.Outer.Inner`).
    fn try_to_solve_type(&self, name: &str) -> SymbolReference<Arc<TypeDecl>>;

    fn solve_type(&self, name: &str) -> Option<Arc<TypeDecl>> {
        self.try_to_solve_type(name).into_declaration()
    }

    fn has_type(&self, name: &str) -> bool {
        self.try_to_solve_type(name).is_solved()
    }
}

impl<T: TypeSolver + ?Sized> TypeSolver for Arc<T> {
    fn try_to_solve_type(&self, name: &str) -> SymbolReference<Arc<TypeDecl>> {
        (**self).try_to_solve_type(name)
    }
}

impl<T: TypeSolver + ?Sized> TypeSolver for Box<T> {
    fn try_to_solve_type(&self, name: &str) -> SymbolReference<Arc<TypeDecl>> {
        (**self).try_to_solve_type(name)
    }
}

/// A provider over declarations held in memory, keyed by qualified name.
#[derive(Debug, Default, Clone)]
pub struct MemoryTypeSolver {
    types: HashMap<TypeName, Arc<TypeDecl>>,
}

impl MemoryTypeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decl`, replacing any previous declaration with the same name.
    pub fn add(&mut self, decl: TypeDecl) -> Arc<TypeDecl> {
        let decl = Arc::new(decl);
        self.types.insert(decl.name.clone(), Arc::clone(&decl));
        decl
    }

    pub fn with(mut self, decl: TypeDecl) -> Self {
        self.add(decl);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// A small, well-known slice of the JDK: `java.lang.Object`, `String`, the boxed primitives,
    /// `Comparable`, `Iterable` and the core `java.util` collections.
    ///
    /// Only the members the resolver's tests exercise are declared.
    pub fn with_minimal_jdk() -> Self {
        let mut solver = Self::new();
        for decl in minimal_jdk() {
            solver.add(decl);
        }
        solver
    }
}

impl TypeSolver for MemoryTypeSolver {
    fn try_to_solve_type(&self, name: &str) -> SymbolReference<Arc<TypeDecl>> {
        match self.types.get(name) {
            Some(decl) => SymbolReference::Solved(Arc::clone(decl)),
            None => SymbolReference::Unsolved(DeclKind::Type),
        }
    }
}

fn generic(name: &str, args: Vec<Type>) -> Type {
    Type::Reference(ReferenceType::from_parts(TypeName::new(name), args))
}

fn prim(prim: PrimitiveType) -> Type {
    Type::Primitive(prim)
}

fn minimal_jdk() -> Vec<TypeDecl> {
    use PrimitiveType::*;

    let string = || Type::named("java.lang.String");
    let mut decls = Vec::new();

    decls.push(
        TypeDecl::class("java.lang.Object")
            .with_constructor(ConstructorDecl::new("java.lang.Object"))
            .with_method(MethodDecl::new("java.lang.Object", "toString").returns(string()))
            .with_method(
                MethodDecl::new("java.lang.Object", "equals")
                    .with_param("other", Type::object())
                    .returns(prim(Boolean)),
            )
            .with_method(MethodDecl::new("java.lang.Object", "hashCode").returns(prim(Int))),
    );

    decls.push(TypeDecl::interface("java.io.Serializable"));
    decls.push(TypeDecl::interface("java.lang.Cloneable"));

    let comparable = TypeDecl::interface("java.lang.Comparable").with_type_params(["T"]);
    let t = comparable.type_var("T");
    decls.push(comparable.with_method(
        MethodDecl::new("java.lang.Comparable", "compareTo")
            .with_param("other", t)
            .returns(prim(Int)),
    ));

    decls.push(
        TypeDecl::class("java.lang.String")
            .extends(Type::object())
            .implements(Type::named("java.io.Serializable"))
            .implements(generic("java.lang.Comparable", vec![string()]))
            .with_constructor(ConstructorDecl::new("java.lang.String"))
            .with_constructor(ConstructorDecl::new("java.lang.String").with_param("original", string()))
            .with_field(ValueDecl::static_field(
                "CASE_INSENSITIVE_ORDER",
                generic("java.util.Comparator", vec![string()]),
            ))
            .with_method(MethodDecl::new("java.lang.String", "length").returns(prim(Int)))
            .with_method(
                MethodDecl::new("java.lang.String", "charAt")
                    .with_param("index", prim(Int))
                    .returns(prim(Char)),
            )
            .with_method(
                MethodDecl::new("java.lang.String", "valueOf")
                    .with_param("obj", Type::object())
                    .returns(string())
                    .into_static(),
            )
            .with_method(
                MethodDecl::new("java.lang.String", "valueOf")
                    .with_param("i", prim(Int))
                    .returns(string())
                    .into_static(),
            )
            .with_method(
                MethodDecl::new("java.lang.String", "format")
                    .with_param("format", string())
                    .with_variadic_param("args", Type::object())
                    .returns(string())
                    .into_static(),
            ),
    );

    decls.push(
        TypeDecl::class("java.lang.Number")
            .extends(Type::object())
            .implements(Type::named("java.io.Serializable"))
            .with_method(MethodDecl::new("java.lang.Number", "intValue").returns(prim(Int))),
    );

    for primitive in PrimitiveType::ALL {
        let name = primitive.box_type_name();
        let super_class = match primitive {
            Boolean | Char => Type::object(),
            _ => Type::named("java.lang.Number"),
        };
        decls.push(
            TypeDecl::class(name)
                .extends(super_class)
                .implements(generic("java.lang.Comparable", vec![Type::named(name)]))
                .with_field(ValueDecl::static_field("TYPE", generic("java.lang.Class", vec![Type::named(name)])))
                .with_method(
                    MethodDecl::new(name, "valueOf")
                        .with_param("value", prim(primitive))
                        .returns(Type::named(name))
                        .into_static(),
                ),
        );
    }

    decls.push(
        TypeDecl::class("java.lang.Math")
            .extends(Type::object())
            .with_field(ValueDecl::static_field("PI", prim(Double)))
            .with_method(math_max(Int))
            .with_method(math_max(Long))
            .with_method(math_max(Double)),
    );

    let iterable = TypeDecl::interface("java.lang.Iterable").with_type_params(["T"]);
    decls.push(iterable);

    let collection = TypeDecl::interface("java.util.Collection").with_type_params(["E"]);
    let e = collection.type_var("E");
    decls.push(
        collection
            .implements(generic("java.lang.Iterable", vec![e.clone()]))
            .with_method(MethodDecl::new("java.util.Collection", "size").returns(prim(Int)))
            .with_method(MethodDecl::new("java.util.Collection", "isEmpty").returns(prim(Boolean)))
            .with_method(
                MethodDecl::new("java.util.Collection", "add")
                    .with_param("e", e.clone())
                    .returns(prim(Boolean)),
            )
            .with_method(
                MethodDecl::new("java.util.Collection", "addAll")
                    .with_param("c", generic("java.util.Collection", vec![Type::extends(e)]))
                    .returns(prim(Boolean)),
            ),
    );

    let list = TypeDecl::interface("java.util.List").with_type_params(["E"]);
    let e = list.type_var("E");
    decls.push(
        list.implements(generic("java.util.Collection", vec![e.clone()]))
            .with_method(
                MethodDecl::new("java.util.List", "get")
                    .with_param("index", prim(Int))
                    .returns(e.clone()),
            )
            .with_method(
                MethodDecl::new("java.util.List", "add")
                    .with_param("e", e.clone())
                    .returns(prim(Boolean)),
            )
            .with_method(
                MethodDecl::new("java.util.List", "add")
                    .with_param("index", prim(Int))
                    .with_param("element", e.clone()),
            )
            .with_method(
                MethodDecl::new("java.util.List", "set")
                    .with_param("index", prim(Int))
                    .with_param("element", e.clone())
                    .returns(e),
            ),
    );

    let array_list = TypeDecl::class("java.util.ArrayList").with_type_params(["E"]);
    let e = array_list.type_var("E");
    decls.push(
        array_list
            .extends(Type::object())
            .implements(generic("java.util.List", vec![e.clone()]))
            .implements(Type::named("java.lang.Cloneable"))
            .implements(Type::named("java.io.Serializable"))
            .with_constructor(ConstructorDecl::new("java.util.ArrayList"))
            .with_constructor(
                ConstructorDecl::new("java.util.ArrayList").with_param("initialCapacity", prim(Int)),
            )
            .with_constructor(ConstructorDecl::new("java.util.ArrayList").with_param(
                "c",
                generic("java.util.Collection", vec![Type::extends(e.clone())]),
            ))
            .with_method(
                MethodDecl::new("java.util.ArrayList", "trimToSize"),
            ),
    );

    let map = TypeDecl::interface("java.util.Map").with_type_params(["K", "V"]);
    let k = map.type_var("K");
    let v = map.type_var("V");
    decls.push(
        map.with_method(
            MethodDecl::new("java.util.Map", "get")
                .with_param("key", Type::object())
                .returns(v.clone()),
        )
        .with_method(
            MethodDecl::new("java.util.Map", "put")
                .with_param("key", k)
                .with_param("value", v.clone())
                .returns(v),
        ),
    );

    let hash_map = TypeDecl::class("java.util.HashMap").with_type_params(["K", "V"]);
    let (k, v) = (hash_map.type_var("K"), hash_map.type_var("V"));
    decls.push(
        hash_map
            .extends(Type::object())
            .implements(generic("java.util.Map", vec![k, v]))
            .with_constructor(ConstructorDecl::new("java.util.HashMap")),
    );

    let empty_list = MethodDecl::new("java.util.Collections", "emptyList").with_type_param("T");
    let t = empty_list.type_var("T");
    let empty_list = empty_list
        .returns(generic("java.util.List", vec![t]))
        .into_static();

    let singleton_list =
        MethodDecl::new("java.util.Collections", "singletonList").with_type_param("T");
    let t = singleton_list.type_var("T");
    let singleton_list = singleton_list
        .with_param("o", t.clone())
        .returns(generic("java.util.List", vec![t]))
        .into_static();

    let sort = MethodDecl::new("java.util.Collections", "sort");
    let t = sort.type_var("T");
    let sort = sort
        .with_bounded_type_param(
            "T",
            generic("java.lang.Comparable", vec![Type::super_of(t.clone())]),
        )
        .with_param("list", generic("java.util.List", vec![t]))
        .into_static();

    decls.push(
        TypeDecl::class("java.util.Collections")
            .extends(Type::object())
            .with_method(empty_list)
            .with_method(singleton_list)
            .with_method(sort),
    );

    let as_list = MethodDecl::new("java.util.Arrays", "asList").with_type_param("T");
    let t = as_list.type_var("T");
    let as_list = as_list
        .with_variadic_param("a", t.clone())
        .returns(generic("java.util.List", vec![t]))
        .into_static();
    decls.push(
        TypeDecl::class("java.util.Arrays")
            .extends(Type::object())
            .with_method(as_list),
    );

    decls
}

fn math_max(primitive: PrimitiveType) -> MethodDecl {
    MethodDecl::new("java.lang.Math", "max")
        .with_param("a", prim(primitive))
        .with_param("b", prim(primitive))
        .returns(prim(primitive))
        .into_static()
}
