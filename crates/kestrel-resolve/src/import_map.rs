use crate::ast::ImportDecl;

/// A compilation unit's imports, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportMap {
    pub type_single: Vec<TypeSingleImport>,
    pub type_star: Vec<TypeStarImport>,
    pub static_single: Vec<StaticSingleImport>,
    pub static_star: Vec<StaticStarImport>,
}

impl ImportMap {
    #[must_use]
    pub fn from_imports(imports: &[ImportDecl]) -> Self {
        let mut out = ImportMap::default();

        for import in imports {
            let path = import.path.trim();
            if path.is_empty() {
                continue;
            }

            match (import.is_static, import.is_asterisk) {
                (false, false) => {
                    let imported = path.rsplit('.').next().unwrap_or(path).to_string();
                    out.type_single.push(TypeSingleImport {
                        path: path.to_string(),
                        imported,
                    });
                }
                (false, true) => out.type_star.push(TypeStarImport {
                    package: path.to_string(),
                }),
                (true, false) => {
                    // `import static a.b.C;` names no member; ignore it like a parser would flag it.
                    let Some((ty, member)) = path.rsplit_once('.') else {
                        continue;
                    };
                    out.static_single.push(StaticSingleImport {
                        ty: ty.to_string(),
                        member: member.to_string(),
                    });
                }
                (true, true) => out.static_star.push(StaticStarImport {
                    ty: path.to_string(),
                }),
            }
        }

        out
    }

    pub fn is_empty(&self) -> bool {
        self.type_single.is_empty()
            && self.type_star.is_empty()
            && self.static_single.is_empty()
            && self.static_star.is_empty()
    }
}

/// `import java.util.List;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSingleImport {
    pub path: String,
    pub imported: String,
}

/// `import java.util.*;` (the package may also be a type, for its member types).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeStarImport {
    pub package: String,
}

/// `import static java.lang.Math.max;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSingleImport {
    pub ty: String,
    pub member: String,
}

/// `import static java.lang.Math.*;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticStarImport {
    pub ty: String,
}
