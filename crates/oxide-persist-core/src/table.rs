//! Dialect-independent logical table descriptions.

use std::collections::BTreeMap;

use crate::ast::{ColumnDeclaration, SemanticType, TableName};

/// One column of a table's primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColumn {
    /// Column type.
    pub ty: SemanticType,
    /// Column name.
    pub column: String,
    /// Position of the column in the table.
    pub position: usize,
}

/// A logical table: its name, primary key and foreign keys.
///
/// When no column is marked as primary key, every column is part of a
/// composite natural key, in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    name: TableName,
    primary_keys: Vec<KeyColumn>,
    foreign_keys: BTreeMap<String, Table>,
}

impl Table {
    /// Describes a table from its column declarations.
    #[must_use]
    pub fn new(name: TableName, columns: &[ColumnDeclaration]) -> Self {
        let explicit = columns.iter().any(|c| c.primary_key);
        let primary_keys = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !explicit || c.primary_key)
            .map(|(position, c)| KeyColumn {
                ty: c.ty,
                column: c.name.clone(),
                position,
            })
            .collect();
        Self {
            name,
            primary_keys,
            foreign_keys: BTreeMap::new(),
        }
    }

    /// Records that `column` references `table`.
    #[must_use]
    pub fn with_foreign_key(mut self, column: impl Into<String>, table: Self) -> Self {
        self.foreign_keys.insert(column.into(), table);
        self
    }

    /// Returns the table name.
    #[must_use]
    pub const fn name(&self) -> &TableName {
        &self.name
    }

    /// Returns the primary key columns, in position order.
    #[must_use]
    pub fn primary_keys(&self) -> &[KeyColumn] {
        &self.primary_keys
    }

    /// Returns the table referenced by a foreign key column.
    #[must_use]
    pub fn foreign_key(&self, column: &str) -> Option<&Self> {
        self.foreign_keys.get(column)
    }

    /// Returns every foreign key, ordered by column name.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.foreign_keys.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_primary_key() {
        let table = Table::new(
            TableName::new("users"),
            &[
                ColumnDeclaration::new("name", SemanticType::String64),
                ColumnDeclaration {
                    primary_key: true,
                    ..ColumnDeclaration::new("id", SemanticType::Int32)
                },
            ],
        );
        assert_eq!(
            table.primary_keys(),
            &[KeyColumn {
                ty: SemanticType::Int32,
                column: String::from("id"),
                position: 1,
            }]
        );
    }

    #[test]
    fn test_natural_key_uses_every_column() {
        let table = Table::new(
            TableName::new("tags"),
            &[
                ColumnDeclaration::new("label", SemanticType::String64),
                ColumnDeclaration::new("weight", SemanticType::Int16),
            ],
        );
        let names: Vec<_> = table.primary_keys().iter().map(|k| k.column.as_str()).collect();
        assert_eq!(names, vec!["label", "weight"]);
    }

    #[test]
    fn test_foreign_keys() {
        let users = Table::new(
            TableName::new("users"),
            &[ColumnDeclaration {
                primary_key: true,
                ..ColumnDeclaration::new("id", SemanticType::Int64)
            }],
        );
        let posts = Table::new(TableName::new("posts"), &[])
            .with_foreign_key("author", users.clone());
        assert_eq!(posts.foreign_key("author"), Some(&users));
        assert_eq!(posts.foreign_keys().count(), 1);
        assert!(posts.foreign_key("editor").is_none());
    }
}
