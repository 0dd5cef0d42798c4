use std::sync::Arc;

use kestrel_config::ResolveConfig;
use kestrel_types::{DeclKind, MethodDecl, SymbolReference, Type, TypeDecl, TypeSolver, ValueDecl};

use crate::ast::CompilationUnit;
use crate::import_map::ImportMap;
use crate::method_resolution::select_most_applicable;
use crate::{Context, ContextKind, TypeResolution};

use super::visible_methods;

/// Root of every chain: a source file with its package and imports.
///
/// Type names are looked up in this order (JLS 6.4.1 shadowing):
/// 1) top-level types declared in the unit
/// 2) single-type imports
/// 3) on-demand imports
/// 4) the unit's own package
/// 5) implicitly imported packages (`java.lang`)
/// 6) the name taken as fully qualified
///
/// Dotted names (`Outer.Inner`) resolve their first segment this way and the rest as member types.
pub struct CompilationUnitContext {
    unit: Arc<CompilationUnit>,
    imports: ImportMap,
    implicit_imports: Vec<String>,
}

impl CompilationUnitContext {
    pub fn new(unit: Arc<CompilationUnit>) -> Self {
        let imports = ImportMap::from_imports(&unit.imports);
        Self {
            unit,
            imports,
            implicit_imports: vec!["java.lang".to_string()],
        }
    }

    /// Replace the implicitly imported packages (`["java.lang"]` by default).
    pub fn with_implicit_imports(mut self, packages: Vec<String>) -> Self {
        self.implicit_imports = packages;
        self
    }

    pub fn from_config(unit: Arc<CompilationUnit>, config: &ResolveConfig) -> Self {
        Self::new(unit).with_implicit_imports(config.implicit_imports.clone())
    }

    pub fn unit(&self) -> &Arc<CompilationUnit> {
        &self.unit
    }

    pub fn imports(&self) -> &ImportMap {
        &self.imports
    }

    fn solve_simple_type(&self, name: &str, solver: &dyn TypeSolver) -> Option<Arc<TypeDecl>> {
        if let Some(local) = self
            .unit
            .types
            .iter()
            .find(|decl| decl.name.simple_name() == name)
        {
            return Some(Arc::clone(local));
        }

        for import in &self.imports.type_single {
            if import.imported == name {
                if let Some(decl) = solver.solve_type(&import.path) {
                    return Some(decl);
                }
            }
        }

        for import in &self.imports.type_star {
            if let Some(decl) = solver.solve_type(&format!("{}.{name}", import.package)) {
                return Some(decl);
            }
        }

        if let Some(decl) = solver.solve_type(&self.unit.qualify(name)) {
            return Some(decl);
        }

        self.implicit_imports
            .iter()
            .find_map(|package| solver.solve_type(&format!("{package}.{name}")))
    }

    fn solve_dotted_type(&self, name: &str, solver: &dyn TypeSolver) -> Option<Arc<TypeDecl>> {
        let (first, rest) = name.split_once('.')?;
        let outer = self.solve_simple_type(first, solver)?;
        solver.solve_type(outer.name.join(rest).as_str())
    }

    /// Types named by static imports that may provide `member`, single imports first.
    fn static_import_owners(&self, member: &str, solver: &dyn TypeSolver) -> Vec<Arc<TypeDecl>> {
        let single = self
            .imports
            .static_single
            .iter()
            .filter(|import| import.member == member)
            .map(|import| import.ty.as_str());
        let star = self.imports.static_star.iter().map(|import| import.ty.as_str());

        let mut owners: Vec<Arc<TypeDecl>> = Vec::new();
        for ty in single.chain(star) {
            let Some(decl) = self.solve_import_owner(ty, solver) else {
                continue;
            };
            if !owners.iter().any(|known| known.name == decl.name) {
                owners.push(decl);
            }
        }
        owners
    }

    fn solve_import_owner(&self, ty: &str, solver: &dyn TypeSolver) -> Option<Arc<TypeDecl>> {
        solver
            .solve_type(ty)
            .or_else(|| self.solve_dotted_type(ty, solver))
    }
}

impl Context for CompilationUnitContext {
    fn kind(&self) -> ContextKind {
        ContextKind::CompilationUnit
    }

    fn parent(&self) -> Option<&dyn Context> {
        None
    }

    fn solve_type(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<TypeResolution> {
        let found = if name.contains('.') {
            self.solve_dotted_type(name, solver)
                .or_else(|| solver.solve_type(name))
        } else {
            self.solve_simple_type(name, solver)
        };

        match found {
            Some(decl) => SymbolReference::Solved(TypeResolution::Declaration(decl)),
            None => SymbolReference::Unsolved(DeclKind::Type),
        }
    }

    /// Static imports (single first, then on-demand), then `Type.field` qualified names.
    fn solve_symbol(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<Arc<ValueDecl>> {
        if let Some((qualifier, member)) = name.rsplit_once('.') {
            let field = self
                .solve_type(qualifier, solver)
                .into_declaration()
                .and_then(|resolution| resolution.declaration().cloned())
                .and_then(|decl| decl.field(member).cloned());
            return field.into();
        }

        self.static_import_owners(name, solver)
            .iter()
            .find_map(|owner| owner.field(name).filter(|field| field.is_static()).cloned())
            .into()
    }

    /// Methods brought in by static imports.
    fn solve_method(
        &self,
        name: &str,
        args: &[Type],
        _static_only: bool,
        solver: &dyn TypeSolver,
    ) -> SymbolReference<Arc<MethodDecl>> {
        let mut candidates = Vec::new();
        for owner in self.static_import_owners(name, solver) {
            candidates.extend(visible_methods(solver, &owner, name, true));
        }
        select_most_applicable(&candidates, args, solver).into()
    }
}
