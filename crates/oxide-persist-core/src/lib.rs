//! # oxide-persist-core
//!
//! A SQL abstract syntax tree that renders itself for a target database and
//! reports the values it binds, in placeholder order.
//!
//! This crate provides:
//! - Typed expression and statement nodes (`CREATE TABLE`, `SELECT`,
//!   `INSERT`, `UPDATE`, `DELETE`, `CREATE INDEX`, `DROP TABLE`)
//! - A [`Dialect`] trait with generic, MySQL, PostgreSQL and H2 dialects
//! - The [`ValueCollector`] and [`SelectionResult`] interfaces a driver binds
//!   parameters and reads rows through
//!
//! ## Literals and parameters
//!
//! Literals render inline; parameters render `?` and are reported by
//! [`compile`] in the order their placeholders appear:
//!
//! ```rust
//! use oxide_persist_core::{GenericDialect, NumberExpr, SqlValue, Unit, compile};
//!
//! let literal = NumberExpr::column("age").eq(NumberExpr::literal(18));
//! let (sql, params) = compile(&literal, &GenericDialect::new(), &Unit::new()).unwrap();
//! assert_eq!(sql, "age = 18");
//! assert!(params.is_empty());
//!
//! let bound = NumberExpr::column("age").eq(NumberExpr::parameter(18));
//! let (sql, params) = compile(&bound, &GenericDialect::new(), &Unit::new()).unwrap();
//! assert_eq!(sql, "age = ?");
//! assert_eq!(params, vec![SqlValue::Int32(18)]);
//! ```
//!
//! ## Creating tables
//!
//! ```rust
//! use oxide_persist_core::{
//!     ColumnDeclaration, CreateTable, GenericDialect, SemanticType, TableName, Unit, compile,
//! };
//!
//! let create = CreateTable::new(
//!     TableName::new("Users"),
//!     vec![
//!         ColumnDeclaration {
//!             primary_key: true,
//!             ..ColumnDeclaration::new("id", SemanticType::Int32)
//!         },
//!         ColumnDeclaration::new("name", SemanticType::String64),
//!     ],
//! );
//! let (sql, _) = compile(&create, &GenericDialect::new(), &Unit::new()).unwrap();
//! assert_eq!(
//!     sql,
//!     "CREATE TABLE IF NOT EXISTS Users(id INT PRIMARY KEY, name VARCHAR(64))"
//! );
//! ```

pub mod ast;
pub mod collect;
pub mod dialect;
pub mod error;
pub mod table;
pub mod unparse;
pub mod value;

pub use ast::{
    Assignment, BooleanBinaryOp, BooleanExpr, BooleanUnaryOp, ColumnDeclaration, ColumnRef,
    ComparisonOp, CompoundOp, CreateIndex, CreateTable, Delete, DropTable, Expr, Insert,
    InsertSource, Join, JoinType, Number, NumberBinaryOp, NumberExpr, NumberUnaryOp,
    NumberVariadicOp, OrderBy, OrderDirection, Reference, ReferentialAction, Select, SelectItem,
    SemanticType, SimpleSelect, Statement, StringExpr, TableConstraint, TableName, Update,
};
pub use collect::{ParameterList, RowCursor, SelectionResult, ValueCollector};
pub use dialect::{Dialect, GenericDialect, H2Dialect, MySqlDialect, PostgresDialect};
pub use error::{PersistError, Result};
pub use table::{KeyColumn, Table};
pub use unparse::{Unit, Unparse, compile};
pub use value::{BigInteger, Blob, SqlValue, ToSqlValue};
