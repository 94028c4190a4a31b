//! SQL values and parameter handling.
//!
//! Values bound to prepared statements travel as [`SqlValue`]s. Each variant
//! corresponds to one [`SemanticType`](crate::SemanticType) family.

use core::fmt;
use core::ops::Deref;
use core::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PersistError, Result};

static BIG_INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(0|[1-9][0-9]*)$").expect("big integer pattern is valid")
});

/// An arbitrary-precision integer held in canonical decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInteger(String);

impl BigInteger {
    /// Returns the decimal digits, with a leading `-` when negative.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for BigInteger {
    type Err = PersistError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "-0" {
            return Ok(Self(String::from("0")));
        }
        if BIG_INTEGER.is_match(s) {
            Ok(Self(String::from(s)))
        } else {
            Err(PersistError::FailedToRestore(format!(
                "'{s}' is not a decimal integer"
            )))
        }
    }
}

impl From<i64> for BigInteger {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BigInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An owned binary value.
///
/// Kept distinct from `Vec<u8>` so that `Vec<T>` always denotes a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Blob(pub Vec<u8>);

impl Deref for Blob {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Blob {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// A SQL value that can be used as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 8-bit integer.
    Int8(i8),
    /// 16-bit integer.
    Int16(i16),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// Arbitrary-precision integer.
    BigInteger(BigInteger),
    /// Single precision float.
    Float32(f32),
    /// Double precision float.
    Float64(f64),
    /// Single character.
    Char(char),
    /// Text value.
    Text(String),
    /// Binary blob value.
    Blob(Blob),
}

impl SqlValue {
    /// Returns whether this is NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a short name of the variant, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::BigInteger(_) => "big integer",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Char(_) => "char",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    /// Returns the SQL representation for inline use (escaped).
    ///
    /// **Warning**: Prefer using parameterized queries instead.
    #[must_use]
    pub fn to_sql_inline(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Bool(b) => {
                if *b {
                    String::from("TRUE")
                } else {
                    String::from("FALSE")
                }
            }
            Self::Int8(n) => n.to_string(),
            Self::Int16(n) => n.to_string(),
            Self::Int32(n) => n.to_string(),
            Self::Int64(n) => n.to_string(),
            Self::BigInteger(n) => n.to_string(),
            Self::Float32(f) => f.to_string(),
            Self::Float64(f) => f.to_string(),
            Self::Char(c) => quote_text(&c.to_string()),
            Self::Text(s) => quote_text(s),
            Self::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{byte:02X}")).collect();
                format!("X'{hex}'")
            }
        }
    }
}

/// Quotes a string literal, doubling embedded single quotes.
pub(crate) fn quote_text(s: &str) -> String {
    let escaped = s.replace('\'', "''");
    format!("'{escaped}'")
}

/// Trait for types that can be converted to SQL values.
pub trait ToSqlValue {
    /// Converts the value to a `SqlValue`.
    fn to_sql_value(self) -> SqlValue;
}

impl ToSqlValue for SqlValue {
    fn to_sql_value(self) -> SqlValue {
        self
    }
}

macro_rules! impl_to_sql_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl ToSqlValue for $ty {
                fn to_sql_value(self) -> SqlValue {
                    SqlValue::$variant(self)
                }
            }
        )+
    };
}

impl_to_sql_value!(
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    BigInteger => BigInteger,
    f32 => Float32,
    f64 => Float64,
    char => Char,
    String => Text,
    Blob => Blob,
);

impl ToSqlValue for &str {
    fn to_sql_value(self) -> SqlValue {
        SqlValue::Text(String::from(self))
    }
}

impl<T: ToSqlValue> ToSqlValue for Option<T> {
    fn to_sql_value(self) -> SqlValue {
        match self {
            Some(v) => v.to_sql_value(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_value_inline_scalars() {
        assert_eq!(SqlValue::Null.to_sql_inline(), "NULL");
        assert_eq!(SqlValue::Bool(true).to_sql_inline(), "TRUE");
        assert_eq!(SqlValue::Int8(-8).to_sql_inline(), "-8");
        assert_eq!(SqlValue::Int64(42).to_sql_inline(), "42");
        assert_eq!(SqlValue::Char('x').to_sql_inline(), "'x'");
    }

    #[test]
    fn test_sql_value_inline_text_escaping() {
        assert_eq!(
            SqlValue::Text(String::from("O'Brien")).to_sql_inline(),
            "'O''Brien'"
        );
    }

    #[test]
    fn test_sql_value_inline_blob() {
        assert_eq!(
            SqlValue::Blob(Blob::from(vec![0x48, 0x45, 0x4C, 0x4C, 0x4F])).to_sql_inline(),
            "X'48454C4C4F'"
        );
    }

    #[test]
    fn test_big_integer_parsing() {
        let n: BigInteger = "-123456789012345678901234567890".parse().unwrap();
        assert_eq!(n.as_str(), "-123456789012345678901234567890");
        assert_eq!("-0".parse::<BigInteger>().unwrap().as_str(), "0");
        assert!("007".parse::<BigInteger>().is_err());
        assert!("1e10".parse::<BigInteger>().is_err());
        assert!("".parse::<BigInteger>().is_err());
    }

    #[test]
    fn test_to_sql_value_conversions() {
        assert_eq!(true.to_sql_value(), SqlValue::Bool(true));
        assert_eq!(42_i32.to_sql_value(), SqlValue::Int32(42));
        assert_eq!(2.5_f64.to_sql_value(), SqlValue::Float64(2.5));
        assert_eq!("hello".to_sql_value(), SqlValue::Text(String::from("hello")));
        assert_eq!(None::<i32>.to_sql_value(), SqlValue::Null);
        assert_eq!(Some(7_i16).to_sql_value(), SqlValue::Int16(7));
    }
}
