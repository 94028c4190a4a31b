//! Mapper configuration.
//!
//! Nothing here is read from disk. [`DialectKind`] and [`MapperOptions`]
//! deserialize with `serde` so callers can embed them in their own
//! configuration.

use core::fmt;
use core::str::FromStr;

use oxide_persist_core::{
    Dialect, GenericDialect, H2Dialect, MySqlDialect, PostgresDialect, Unit,
};
use oxide_persist_sqlite::{AndroidSqliteDialect, SqliteDialect};
use serde::{Deserialize, Serialize};

use crate::error::OrmError;

/// A supported database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DialectKind {
    /// ANSI baseline.
    #[default]
    #[serde(rename = "generic")]
    Generic,
    /// MySQL.
    #[serde(rename = "mysql")]
    MySql,
    /// PostgreSQL.
    #[serde(rename = "postgresql")]
    PostgreSql,
    /// SQLite.
    #[serde(rename = "sqlite")]
    Sqlite,
    /// SQLite on Android.
    #[serde(rename = "android-sqlite")]
    AndroidSqlite,
    /// H2.
    #[serde(rename = "h2")]
    H2,
}

impl DialectKind {
    /// Every supported database.
    pub const ALL: [Self; 6] = [
        Self::Generic,
        Self::MySql,
        Self::PostgreSql,
        Self::Sqlite,
        Self::AndroidSqlite,
        Self::H2,
    ];

    /// Returns the configuration name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
            Self::Sqlite => "sqlite",
            Self::AndroidSqlite => "android-sqlite",
            Self::H2 => "h2",
        }
    }

    /// Creates the dialect.
    #[must_use]
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect::new()),
            Self::MySql => Box::new(MySqlDialect::new()),
            Self::PostgreSql => Box::new(PostgresDialect::new()),
            Self::Sqlite => Box::new(SqliteDialect::new()),
            Self::AndroidSqlite => Box::new(AndroidSqliteDialect::new()),
            Self::H2 => Box::new(H2Dialect::new()),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = OrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| OrmError::UnknownDialect(String::from(s)))
    }
}

/// Options of a [`Mapper`](crate::Mapper).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperOptions {
    /// Rendering context of every statement.
    pub unit: Unit,
    /// Prefix the columns of embedded fields with `<field>_`.
    pub prefix_embedded: bool,
}
