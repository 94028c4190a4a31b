//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. A [`Dialect`]
//! answers the questions the unparser asks while rendering: which keyword
//! spells a semantic type, how identifiers are quoted, how a boolean literal
//! or an operator is written. Dialects hold no state, so one instance can be
//! shared across threads.

mod generic;
mod h2;
mod mysql;
mod postgres;

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;

pub use generic::GenericDialect;
pub use h2::H2Dialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;

use crate::ast::{
    BooleanBinaryOp, ColumnDeclaration, NumberBinaryOp, NumberVariadicOp, SemanticType,
};
use crate::error::{PersistError, Result};
use crate::unparse::{Unit, Unparse};

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the SQL keyword for a semantic type, or `None` when the
    /// database has no equivalent.
    fn type_keyword(&self, ty: SemanticType) -> Option<&'static str>;

    /// Returns the SQL type rendered for a column declaration.
    fn column_type(&self, column: &ColumnDeclaration) -> Result<&'static str> {
        self.type_keyword(column.ty)
            .ok_or(PersistError::UnmappedType {
                dialect: self.name(),
                ty: column.ty,
            })
    }

    /// Returns the keyword marking an auto-incremented column, if the
    /// dialect spells it as a modifier.
    fn autoincrement_keyword(&self) -> Option<&'static str> {
        Some("AUTOINCREMENT")
    }

    /// Returns the primary key clause text.
    fn primary_key_keyword(&self) -> &'static str {
        "PRIMARY KEY"
    }

    /// Returns the literal text for a boolean.
    fn boolean_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    /// Returns the identifier quote character, if identifiers are quoted.
    fn identifier_quote(&self) -> Option<char> {
        None
    }

    /// Returns the maximum identifier length.
    fn max_identifier_length(&self) -> usize {
        128
    }

    /// Returns whether `name` may be used as a table or column name.
    fn is_valid_identifier(&self, name: &str) -> bool {
        name.len() <= self.max_identifier_length() && IDENTIFIER.is_match(name)
    }

    /// Quotes an identifier if necessary.
    fn quote_identifier(&self, name: &str) -> String {
        match self.identifier_quote() {
            Some(quote) => format!("{quote}{name}{quote}"),
            None => String::from(name),
        }
    }

    /// Returns the spelling of a binary boolean operator.
    fn boolean_operator(&self, op: BooleanBinaryOp) -> &'static str {
        match op {
            BooleanBinaryOp::Xor => "<>",
            other => other.as_str(),
        }
    }

    /// Returns the spelling of a binary arithmetic operator.
    fn number_operator(&self, op: NumberBinaryOp) -> &'static str {
        match op {
            NumberBinaryOp::IntegerDivide => "/",
            other => other.as_str(),
        }
    }

    /// Returns the function name of a variadic operator.
    fn variadic_function(&self, op: NumberVariadicOp) -> &'static str {
        op.as_str()
    }

    /// Returns whether CREATE INDEX accepts IF NOT EXISTS.
    fn supports_index_if_not_exists(&self) -> bool {
        true
    }

    /// Renders `node` into `out`.
    fn unparse(&self, node: &dyn Unparse, unit: &Unit, out: &mut String) -> Result<()>
    where
        Self: Sized,
    {
        node.unparse(self, unit, out)
    }
}

/// Writes an identifier, validated and quoted for `dialect`.
pub(crate) fn write_identifier(dialect: &dyn Dialect, name: &str, out: &mut String) -> Result<()> {
    if !dialect.is_valid_identifier(name) {
        return Err(PersistError::InvalidIdentifier {
            dialect: dialect.name(),
            name: String::from(name),
        });
    }
    out.push_str(&dialect.quote_identifier(name));
    Ok(())
}
