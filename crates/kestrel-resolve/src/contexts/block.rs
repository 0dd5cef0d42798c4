use std::sync::Arc;

use kestrel_types::{DeclKind, SymbolReference, TypeSolver, ValueDecl};

use crate::ast::{Block, BlockItem};
use crate::context::delegate;
use crate::{Context, ContextKind, TypeResolution};

/// A statement block, optionally positioned at one of its statements.
///
/// When positioned, only declarations that precede the statement are visible.
pub struct BlockContext<'a> {
    parent: &'a dyn Context,
    block: &'a Block,
    position: Option<usize>,
}

impl<'a> BlockContext<'a> {
    /// The whole block: every local it declares is visible.
    pub fn new(parent: &'a dyn Context, block: &'a Block) -> Self {
        Self {
            parent,
            block,
            position: None,
        }
    }

    /// The block as seen from item `index`.
    pub fn at(parent: &'a dyn Context, block: &'a Block, index: usize) -> Self {
        Self {
            parent,
            block,
            position: Some(index),
        }
    }

    fn visible(&self) -> impl Iterator<Item = &BlockItem> {
        self.block.items_before(self.position).iter().rev()
    }
}

impl Context for BlockContext<'_> {
    fn kind(&self) -> ContextKind {
        ContextKind::Block
    }

    fn parent(&self) -> Option<&dyn Context> {
        Some(self.parent)
    }

    fn solve_type(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<TypeResolution> {
        let local_type = self.visible().find_map(|item| match item {
            BlockItem::LocalType(decl) if decl.name.simple_name() == name => Some(decl),
            _ => None,
        });
        if let Some(decl) = local_type {
            return SymbolReference::Solved(TypeResolution::Declaration(Arc::clone(decl)));
        }
        delegate(self, "solve_type", name, DeclKind::Type, |parent| {
            parent.solve_type(name, solver)
        })
    }

    fn solve_symbol(&self, name: &str, solver: &dyn TypeSolver) -> SymbolReference<Arc<ValueDecl>> {
        let local = self.visible().find_map(|item| match item {
            BlockItem::Local(local) if local.name() == name => Some(local),
            _ => None,
        });
        if let Some(local) = local {
            return SymbolReference::Solved(Arc::clone(local));
        }
        delegate(self, "solve_symbol", name, DeclKind::Value, |parent| {
            parent.solve_symbol(name, solver)
        })
    }
}
