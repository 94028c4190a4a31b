//! Generic SQL dialect.

use super::Dialect;
use crate::ast::SemanticType;

/// A generic SQL dialect using ANSI SQL type names and unquoted identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn type_keyword(&self, ty: SemanticType) -> Option<&'static str> {
        Some(match ty {
            SemanticType::Boolean => "BOOLEAN",
            SemanticType::Int8 => "TINYINT",
            SemanticType::Int16 => "SMALLINT",
            SemanticType::Int32 => "INT",
            SemanticType::Int64 => "BIGINT",
            SemanticType::BigInteger => "NUMERIC",
            SemanticType::Float32 => "REAL",
            SemanticType::Float64 => "DOUBLE PRECISION",
            SemanticType::Char => "CHAR(1)",
            SemanticType::String64 => "VARCHAR(64)",
            SemanticType::String128 => "VARCHAR(128)",
            SemanticType::String => "TEXT",
            SemanticType::Binary16 => "BINARY(16)",
            SemanticType::Binary32 => "BINARY(32)",
            SemanticType::Binary => "BLOB",
        })
    }
}
