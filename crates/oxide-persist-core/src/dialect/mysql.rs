//! MySQL dialect.

use super::Dialect;
use crate::ast::{BooleanBinaryOp, NumberBinaryOp, SemanticType};

/// MySQL dialect: backtick quoting, `AUTO_INCREMENT`, native XOR and DIV.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn type_keyword(&self, ty: SemanticType) -> Option<&'static str> {
        Some(match ty {
            SemanticType::Boolean => "TINYINT(1)",
            SemanticType::Int8 => "TINYINT",
            SemanticType::Int16 => "SMALLINT",
            SemanticType::Int32 => "INT",
            SemanticType::Int64 => "BIGINT",
            SemanticType::BigInteger => "DECIMAL(65, 0)",
            SemanticType::Float32 => "FLOAT",
            SemanticType::Float64 => "DOUBLE",
            SemanticType::Char => "CHAR(1)",
            SemanticType::String64 => "VARCHAR(64)",
            SemanticType::String128 => "VARCHAR(128)",
            SemanticType::String => "LONGTEXT",
            SemanticType::Binary16 => "BINARY(16)",
            SemanticType::Binary32 => "BINARY(32)",
            SemanticType::Binary => "LONGBLOB",
        })
    }

    fn autoincrement_keyword(&self) -> Option<&'static str> {
        Some("AUTO_INCREMENT")
    }

    fn identifier_quote(&self) -> Option<char> {
        Some('`')
    }

    fn max_identifier_length(&self) -> usize {
        64
    }

    fn boolean_operator(&self, op: BooleanBinaryOp) -> &'static str {
        op.as_str()
    }

    fn number_operator(&self, op: NumberBinaryOp) -> &'static str {
        op.as_str()
    }

    fn supports_index_if_not_exists(&self) -> bool {
        false
    }
}
