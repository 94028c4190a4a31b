#![allow(dead_code)]

use oxide_persist_core::{
    ColumnDeclaration, Dialect, GenericDialect, SemanticType, SqlValue, Unit, Unparse, compile,
};

pub fn render(node: &dyn Unparse) -> String {
    render_with(node, &GenericDialect::new())
}

pub fn render_with(node: &dyn Unparse, dialect: &dyn Dialect) -> String {
    compile(node, dialect, &Unit::new())
        .unwrap_or_else(|e| panic!("Failed to compile for {}: {e}", dialect.name()))
        .0
}

pub fn compile_generic(node: &dyn Unparse) -> (String, Vec<SqlValue>) {
    compile(node, &GenericDialect::new(), &Unit::new())
        .unwrap_or_else(|e| panic!("Failed to compile: {e}"))
}

pub fn count_placeholders(sql: &str) -> usize {
    sql.matches('?').count()
}

/// Compiles `node` and checks that every `?` has exactly one bound value.
pub fn assert_balanced(node: &dyn Unparse) -> (String, Vec<SqlValue>) {
    let (sql, params) = compile_generic(node);
    assert_eq!(
        count_placeholders(&sql),
        params.len(),
        "placeholder/value mismatch in: {sql}"
    );
    (sql, params)
}

pub fn primary_key(name: &str, ty: SemanticType) -> ColumnDeclaration {
    ColumnDeclaration {
        primary_key: true,
        ..ColumnDeclaration::new(name, ty)
    }
}
