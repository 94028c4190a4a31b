//! H2 dialect.

use super::Dialect;
use crate::ast::SemanticType;

/// H2 dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct H2Dialect;

impl H2Dialect {
    /// Creates a new H2 dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for H2Dialect {
    fn name(&self) -> &'static str {
        "h2"
    }

    fn type_keyword(&self, ty: SemanticType) -> Option<&'static str> {
        Some(match ty {
            SemanticType::Boolean => "BOOLEAN",
            SemanticType::Int8 => "TINYINT",
            SemanticType::Int16 => "SMALLINT",
            SemanticType::Int32 => "INT",
            SemanticType::Int64 => "BIGINT",
            SemanticType::BigInteger => "DECIMAL",
            SemanticType::Float32 => "REAL",
            SemanticType::Float64 => "DOUBLE",
            SemanticType::Char => "CHAR(1)",
            SemanticType::String64 => "VARCHAR(64)",
            SemanticType::String128 => "VARCHAR(128)",
            SemanticType::String => "CLOB",
            SemanticType::Binary16 => "BINARY(16)",
            SemanticType::Binary32 => "BINARY(32)",
            SemanticType::Binary => "BLOB",
        })
    }

    fn autoincrement_keyword(&self) -> Option<&'static str> {
        Some("AUTO_INCREMENT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h2_dialect() {
        let dialect = H2Dialect::new();
        assert_eq!(dialect.name(), "h2");
        assert_eq!(dialect.type_keyword(SemanticType::String), Some("CLOB"));
        assert_eq!(dialect.autoincrement_keyword(), Some("AUTO_INCREMENT"));
    }
}
