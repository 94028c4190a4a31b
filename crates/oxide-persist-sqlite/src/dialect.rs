//! SQLite dialect implementations.

use oxide_persist_core::{Dialect, NumberVariadicOp, SemanticType};

fn affinity(ty: SemanticType) -> &'static str {
    match ty {
        SemanticType::Boolean
        | SemanticType::Int8
        | SemanticType::Int16
        | SemanticType::Int32
        | SemanticType::Int64 => "INTEGER",
        SemanticType::Float32 | SemanticType::Float64 => "REAL",
        SemanticType::BigInteger
        | SemanticType::Char
        | SemanticType::String64
        | SemanticType::String128
        | SemanticType::String => "TEXT",
        SemanticType::Binary16 | SemanticType::Binary32 | SemanticType::Binary => "BLOB",
    }
}

fn variadic_function(op: NumberVariadicOp) -> &'static str {
    match op {
        NumberVariadicOp::Greatest => "MAX",
        NumberVariadicOp::Coalesce => op.as_str(),
    }
}

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn type_keyword(&self, ty: SemanticType) -> Option<&'static str> {
        Some(affinity(ty))
    }

    fn identifier_quote(&self) -> Option<char> {
        Some('"')
    }

    fn variadic_function(&self, op: NumberVariadicOp) -> &'static str {
        variadic_function(op)
    }
}

/// Android SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct AndroidSqliteDialect;

impl AndroidSqliteDialect {
    /// Creates a new Android SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for AndroidSqliteDialect {
    fn name(&self) -> &'static str {
        "android-sqlite"
    }

    fn type_keyword(&self, ty: SemanticType) -> Option<&'static str> {
        match ty {
            SemanticType::BigInteger => None,
            other => Some(affinity(other)),
        }
    }

    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn identifier_quote(&self) -> Option<char> {
        Some('"')
    }

    fn variadic_function(&self, op: NumberVariadicOp) -> &'static str {
        variadic_function(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_persist_core::{
        BooleanExpr, ColumnDeclaration, NumberExpr, PersistError, Unit, compile,
    };

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert_eq!(dialect.identifier_quote(), Some('"'));
        assert_eq!(dialect.autoincrement_keyword(), Some("AUTOINCREMENT"));
        assert_eq!(dialect.boolean_literal(false), "FALSE");
    }

    #[test]
    fn test_sqlite_maps_every_type() {
        for ty in SemanticType::ALL {
            assert!(SqliteDialect::new().type_keyword(ty).is_some());
        }
        assert_eq!(
            SqliteDialect::new().type_keyword(SemanticType::BigInteger),
            Some("TEXT")
        );
    }

    #[test]
    fn test_greatest_renders_as_max() {
        let expr = NumberExpr::variadic(
            NumberVariadicOp::Greatest,
            vec![NumberExpr::column("a"), NumberExpr::literal(0)],
        );
        let (sql, _) = compile(&expr, &SqliteDialect::new(), &Unit::new()).unwrap();
        assert_eq!(sql, r#"MAX("a", 0)"#);
    }

    #[test]
    fn test_android_boolean_literals() {
        let expr = BooleanExpr::Literal(true).and(BooleanExpr::Literal(false));
        let (sql, params) = compile(&expr, &AndroidSqliteDialect::new(), &Unit::new()).unwrap();
        assert_eq!(sql, "1 AND 0");
        assert!(params.is_empty());
    }

    #[test]
    fn test_android_rejects_big_integer_columns() {
        let column = ColumnDeclaration::new("balance", SemanticType::BigInteger);
        let err = compile(&column, &AndroidSqliteDialect::new(), &Unit::new()).unwrap_err();
        assert!(matches!(
            err,
            PersistError::UnmappedType {
                dialect: "android-sqlite",
                ty: SemanticType::BigInteger
            }
        ));
    }
}
