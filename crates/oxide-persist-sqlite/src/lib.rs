//! # oxide-persist-sqlite
//!
//! SQLite dialects for `oxide-persist-core`.
//!
//! # How SQLite differs from other dialects
//!
//! - **[Type affinity]**: SQLite stores any value in any column unless
//!   [`STRICT` tables] are used. Semantic types therefore map to the
//!   affinity names `INTEGER`, `REAL`, `TEXT` and `BLOB`. Arbitrary-precision
//!   integers are stored as `TEXT` so no digit is lost.
//! - **[AUTOINCREMENT]**: SQLite uses the `AUTOINCREMENT` keyword
//!   (not sequences or `SERIAL` like PostgreSQL).
//! - **Identifier quoting**: SQLite uses double quotes (`"`) as
//!   the standard quoting style. See [SQLite keywords].
//! - **No `GREATEST`**: the multi-argument scalar `MAX` is used instead.
//!
//! The Android dialect targets the SQLite bundled with older Android
//! releases: booleans are written as `1` and `0`, and arbitrary-precision
//! integers have no column type.
//!
//! [Type affinity]: https://www.sqlite.org/datatype3.html
//! [`STRICT` tables]: https://www.sqlite.org/stricttables.html
//! [AUTOINCREMENT]: https://www.sqlite.org/autoinc.html
//! [SQLite keywords]: https://www.sqlite.org/lang_keywords.html
//!
//! ## Example
//!
//! ```rust
//! use oxide_persist_core::{
//!     ColumnDeclaration, CreateTable, SemanticType, TableName, Unit, compile,
//! };
//! use oxide_persist_sqlite::SqliteDialect;
//!
//! let create = CreateTable::new(
//!     TableName::new("users"),
//!     vec![
//!         ColumnDeclaration {
//!             primary_key: true,
//!             auto_increment: true,
//!             ..ColumnDeclaration::new("id", SemanticType::Int64)
//!         },
//!         ColumnDeclaration::new("name", SemanticType::String64),
//!     ],
//! );
//! let (sql, _) = compile(&create, &SqliteDialect::new(), &Unit::new()).unwrap();
//! assert_eq!(
//!     sql,
//!     r#"CREATE TABLE IF NOT EXISTS "users"("id" INTEGER PRIMARY KEY AUTOINCREMENT, "name" TEXT)"#
//! );
//! ```

mod dialect;

pub use dialect::{AndroidSqliteDialect, SqliteDialect};
