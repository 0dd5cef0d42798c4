//! The slice of a syntax tree the resolver reads.
//!
//! A parser (or any other front end) lowers its nodes into these structs; the resolver only needs
//! each scope's declarations in source order.

use std::sync::Arc;

use kestrel_types::{TypeDecl, ValueDecl};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Dotted path without the trailing `.*`.
    pub path: String,
    pub is_static: bool,
    pub is_asterisk: bool,
}

impl ImportDecl {
    /// Parse the text between `import` and `;` (`static java.util.Collections.*`).
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (is_static, rest) = match text.strip_prefix("static ") {
            Some(rest) => (true, rest.trim()),
            None => (false, text),
        };
        let (is_asterisk, path) = match rest.strip_suffix(".*") {
            Some(path) => (true, path),
            None => (false, rest),
        };
        Self {
            path: path.to_string(),
            is_static,
            is_asterisk,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    /// `None` for the default package.
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub types: Vec<Arc<TypeDecl>>,
}

impl CompilationUnit {
    pub fn new(package: Option<&str>) -> Self {
        Self {
            package: package.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_import(mut self, text: &str) -> Self {
        self.imports.push(ImportDecl::parse(text));
        self
    }

    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(Arc::new(decl));
        self
    }

    /// Qualified name a top-level type named `simple_name` gets in this unit.
    pub fn qualify(&self, simple_name: &str) -> String {
        match &self.package {
            Some(package) => format!("{package}.{simple_name}"),
            None => simple_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockItem {
    Local(Arc<ValueDecl>),
    LocalType(Arc<TypeDecl>),
    /// Any statement that declares nothing.
    Statement,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub items: Vec<BlockItem>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local(mut self, local: ValueDecl) -> Self {
        self.items.push(BlockItem::Local(Arc::new(local)));
        self
    }

    pub fn with_local_type(mut self, decl: TypeDecl) -> Self {
        self.items.push(BlockItem::LocalType(Arc::new(decl)));
        self
    }

    pub fn with_statement(mut self) -> Self {
        self.items.push(BlockItem::Statement);
        self
    }

    /// Items declared strictly before statement `index` (all items when `None`).
    pub fn items_before(&self, index: Option<usize>) -> &[BlockItem] {
        match index {
            Some(index) => &self.items[..index.min(self.items.len())],
            None => &self.items,
        }
    }
}
