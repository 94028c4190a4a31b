//! PostgreSQL dialect.

use super::Dialect;
use crate::ast::{ColumnDeclaration, SemanticType};
use crate::error::{PersistError, Result};

/// PostgreSQL dialect.
///
/// Auto-incremented columns use the `SERIAL` family of types instead of a
/// modifier keyword. Identifiers are quoted only when they contain
/// uppercase letters, since PostgreSQL folds unquoted names to lowercase.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn type_keyword(&self, ty: SemanticType) -> Option<&'static str> {
        Some(match ty {
            SemanticType::Boolean => "BOOLEAN",
            SemanticType::Int8 | SemanticType::Int16 => "SMALLINT",
            SemanticType::Int32 => "INTEGER",
            SemanticType::Int64 => "BIGINT",
            SemanticType::BigInteger => "NUMERIC",
            SemanticType::Float32 => "REAL",
            SemanticType::Float64 => "DOUBLE PRECISION",
            SemanticType::Char => "CHAR(1)",
            SemanticType::String64 => "VARCHAR(64)",
            SemanticType::String128 => "VARCHAR(128)",
            SemanticType::String => "TEXT",
            SemanticType::Binary16 | SemanticType::Binary32 | SemanticType::Binary => "BYTEA",
        })
    }

    fn column_type(&self, column: &ColumnDeclaration) -> Result<&'static str> {
        if column.auto_increment {
            return match column.ty {
                SemanticType::Int8 | SemanticType::Int16 => Ok("SMALLSERIAL"),
                SemanticType::Int32 => Ok("SERIAL"),
                SemanticType::Int64 => Ok("BIGSERIAL"),
                other => Err(PersistError::Unsupported(format!(
                    "column '{}' of type {other} cannot auto-increment",
                    column.name
                ))),
            };
        }
        self.type_keyword(column.ty)
            .ok_or(PersistError::UnmappedType {
                dialect: self.name(),
                ty: column.ty,
            })
    }

    fn autoincrement_keyword(&self) -> Option<&'static str> {
        None
    }

    fn identifier_quote(&self) -> Option<char> {
        Some('"')
    }

    fn max_identifier_length(&self) -> usize {
        63
    }

    fn quote_identifier(&self, name: &str) -> String {
        if name.chars().any(|c| c.is_ascii_uppercase()) {
            format!("\"{name}\"")
        } else {
            String::from(name)
        }
    }
}
