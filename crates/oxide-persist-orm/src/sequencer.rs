//! Ordered INSERT sequencing.

use std::collections::VecDeque;

use oxide_persist_core::Insert;
use tracing::trace;

use crate::declaration::InsertDeclaration;

/// The INSERT templates of a declaration tree, one per distinct table, and
/// the template index of every step of a depth-first walk of the tree.
///
/// Two nodes name the same table when their table names are equal as
/// strings; the template is built at the node seen first.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedInsertStatements {
    statements: Vec<Insert>,
    indices: VecDeque<usize>,
}

impl OrderedInsertStatements {
    /// Linearizes `declaration`: referenced tables, then the table, then
    /// dependent tables, recursively.
    #[must_use]
    pub fn new(declaration: &InsertDeclaration) -> Self {
        let mut statements: Vec<Insert> = Vec::new();
        let mut indices = VecDeque::new();
        declaration.visit(&mut |node| {
            let name = node.table.to_string();
            let index = statements
                .iter()
                .position(|insert| insert.table.to_string() == name)
                .unwrap_or_else(|| {
                    statements.push(Insert::template(node.table.clone(), node.entries.clone()));
                    statements.len() - 1
                });
            trace!(table = %name, index, "Sequenced insert");
            indices.push_back(index);
        });
        Self {
            statements,
            indices,
        }
    }

    /// Returns the distinct INSERT templates, in first-seen order.
    #[must_use]
    pub fn statements(&self) -> &[Insert] {
        &self.statements
    }

    /// Returns the remaining template indices, in walk order.
    #[must_use]
    pub const fn indices(&self) -> &VecDeque<usize> {
        &self.indices
    }

    /// Takes the template index of the next walk step.
    pub fn next_index(&mut self) -> Option<usize> {
        self.indices.pop_front()
    }

    /// Returns the number of distinct templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns whether there is no template.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
