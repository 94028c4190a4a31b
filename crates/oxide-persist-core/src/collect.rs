//! Value collectors and selection results.
//!
//! A [`ValueCollector`] receives bound values in the order their `?`
//! placeholders appear in the rendered SQL. A [`SelectionResult`] is the
//! read side: a cursor whose typed getters consume columns left to right.
//!
//! [`ParameterList`] and [`RowCursor`] are in-memory implementations. Real
//! drivers implement the traits over their own statement and cursor types.

use tracing::trace;

use crate::ast::SemanticType;
use crate::error::{PersistError, Result};
use crate::value::{BigInteger, Blob, SqlValue};

/// Receives values for positional parameter binding.
pub trait ValueCollector {
    /// Binds a boolean.
    fn set_bool(&mut self, value: bool) -> Result<()>;
    /// Binds an 8-bit integer.
    fn set_i8(&mut self, value: i8) -> Result<()>;
    /// Binds a 16-bit integer.
    fn set_i16(&mut self, value: i16) -> Result<()>;
    /// Binds a 32-bit integer.
    fn set_i32(&mut self, value: i32) -> Result<()>;
    /// Binds a 64-bit integer.
    fn set_i64(&mut self, value: i64) -> Result<()>;
    /// Binds an arbitrary-precision integer.
    fn set_big_integer(&mut self, value: &BigInteger) -> Result<()>;
    /// Binds a single precision float.
    fn set_f32(&mut self, value: f32) -> Result<()>;
    /// Binds a double precision float.
    fn set_f64(&mut self, value: f64) -> Result<()>;
    /// Binds a character.
    fn set_char(&mut self, value: char) -> Result<()>;
    /// Binds a string of at most 64 characters.
    fn set_string64(&mut self, value: &str) -> Result<()>;
    /// Binds a string of at most 128 characters.
    fn set_string128(&mut self, value: &str) -> Result<()>;
    /// Binds an unbounded string.
    fn set_string(&mut self, value: &str) -> Result<()>;
    /// Binds a 16-byte binary value.
    fn set_binary16(&mut self, value: &[u8]) -> Result<()>;
    /// Binds a 32-byte binary value.
    fn set_binary32(&mut self, value: &[u8]) -> Result<()>;
    /// Binds an unbounded binary value.
    fn set_binary(&mut self, value: &[u8]) -> Result<()>;
    /// Binds NULL for a column of the given type.
    fn set_null(&mut self, ty: SemanticType) -> Result<()>;

    /// Binds `value` as `ty`, dispatching to the typed setter.
    ///
    /// The value is checked against the type first; a bounded string that is
    /// too long or a fixed binary of the wrong length is rejected.
    fn set_value(&mut self, ty: SemanticType, value: &SqlValue) -> Result<()> {
        ty.check_value(value)?;
        match (ty, value) {
            (_, SqlValue::Null) => self.set_null(ty),
            (_, SqlValue::Bool(b)) => self.set_bool(*b),
            (_, SqlValue::Int8(n)) => self.set_i8(*n),
            (_, SqlValue::Int16(n)) => self.set_i16(*n),
            (_, SqlValue::Int32(n)) => self.set_i32(*n),
            (_, SqlValue::Int64(n)) => self.set_i64(*n),
            (_, SqlValue::BigInteger(n)) => self.set_big_integer(n),
            (_, SqlValue::Float32(f)) => self.set_f32(*f),
            (_, SqlValue::Float64(f)) => self.set_f64(*f),
            (_, SqlValue::Char(c)) => self.set_char(*c),
            (SemanticType::String64, SqlValue::Text(s)) => self.set_string64(s),
            (SemanticType::String128, SqlValue::Text(s)) => self.set_string128(s),
            (_, SqlValue::Text(s)) => self.set_string(s),
            (SemanticType::Binary16, SqlValue::Blob(b)) => self.set_binary16(b),
            (SemanticType::Binary32, SqlValue::Blob(b)) => self.set_binary32(b),
            (_, SqlValue::Blob(b)) => self.set_binary(b),
        }
    }
}

/// A [`ValueCollector`] that records values in binding order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterList {
    values: Vec<SqlValue>,
}

impl ParameterList {
    /// Creates an empty parameter list.
    #[must_use]
    pub const fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Returns the recorded values.
    #[must_use]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Consumes the list, returning the recorded values.
    #[must_use]
    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }

    /// Returns the number of recorded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns whether no value was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn push(&mut self, value: SqlValue) -> Result<()> {
        trace!(position = self.values.len(), kind = value.kind(), "Binding parameter");
        self.values.push(value);
        Ok(())
    }
}

impl ValueCollector for ParameterList {
    fn set_bool(&mut self, value: bool) -> Result<()> {
        self.push(SqlValue::Bool(value))
    }

    fn set_i8(&mut self, value: i8) -> Result<()> {
        self.push(SqlValue::Int8(value))
    }

    fn set_i16(&mut self, value: i16) -> Result<()> {
        self.push(SqlValue::Int16(value))
    }

    fn set_i32(&mut self, value: i32) -> Result<()> {
        self.push(SqlValue::Int32(value))
    }

    fn set_i64(&mut self, value: i64) -> Result<()> {
        self.push(SqlValue::Int64(value))
    }

    fn set_big_integer(&mut self, value: &BigInteger) -> Result<()> {
        self.push(SqlValue::BigInteger(value.clone()))
    }

    fn set_f32(&mut self, value: f32) -> Result<()> {
        self.push(SqlValue::Float32(value))
    }

    fn set_f64(&mut self, value: f64) -> Result<()> {
        self.push(SqlValue::Float64(value))
    }

    fn set_char(&mut self, value: char) -> Result<()> {
        self.push(SqlValue::Char(value))
    }

    fn set_string64(&mut self, value: &str) -> Result<()> {
        SemanticType::String64.check_value(&SqlValue::Text(String::from(value)))?;
        self.push(SqlValue::Text(String::from(value)))
    }

    fn set_string128(&mut self, value: &str) -> Result<()> {
        SemanticType::String128.check_value(&SqlValue::Text(String::from(value)))?;
        self.push(SqlValue::Text(String::from(value)))
    }

    fn set_string(&mut self, value: &str) -> Result<()> {
        self.push(SqlValue::Text(String::from(value)))
    }

    fn set_binary16(&mut self, value: &[u8]) -> Result<()> {
        let value = SqlValue::Blob(Blob::from(value));
        SemanticType::Binary16.check_value(&value)?;
        self.push(value)
    }

    fn set_binary32(&mut self, value: &[u8]) -> Result<()> {
        let value = SqlValue::Blob(Blob::from(value));
        SemanticType::Binary32.check_value(&value)?;
        self.push(value)
    }

    fn set_binary(&mut self, value: &[u8]) -> Result<()> {
        self.push(SqlValue::Blob(Blob::from(value)))
    }

    fn set_null(&mut self, _ty: SemanticType) -> Result<()> {
        self.push(SqlValue::Null)
    }
}

/// A cursor over the rows of a query result.
///
/// Getters read the current row's columns left to right; each call consumes
/// one column. A getter reading NULL returns the type's zero value and makes
/// [`was_null`](Self::was_null) report `true`.
pub trait SelectionResult {
    /// Moves to the first row. Returns `false` when there are no rows.
    fn move_to_first_row(&mut self) -> Result<bool>;
    /// Moves to the next row. Returns `false` past the last row.
    fn move_to_next_row(&mut self) -> Result<bool>;
    /// Returns whether the last value read was NULL.
    fn was_null(&self) -> bool;

    /// Reads a boolean.
    fn get_bool(&mut self) -> Result<bool>;
    /// Reads an 8-bit integer.
    fn get_i8(&mut self) -> Result<i8>;
    /// Reads a 16-bit integer.
    fn get_i16(&mut self) -> Result<i16>;
    /// Reads a 32-bit integer.
    fn get_i32(&mut self) -> Result<i32>;
    /// Reads a 64-bit integer.
    fn get_i64(&mut self) -> Result<i64>;
    /// Reads an arbitrary-precision integer.
    fn get_big_integer(&mut self) -> Result<BigInteger>;
    /// Reads a single precision float.
    fn get_f32(&mut self) -> Result<f32>;
    /// Reads a double precision float.
    fn get_f64(&mut self) -> Result<f64>;
    /// Reads a character.
    fn get_char(&mut self) -> Result<char>;
    /// Reads a string.
    fn get_string(&mut self) -> Result<String>;
    /// Reads a binary value.
    fn get_binary(&mut self) -> Result<Vec<u8>>;

    /// Reads the next column as `ty`, returning `None` for NULL.
    fn get_value(&mut self, ty: SemanticType) -> Result<Option<SqlValue>> {
        let value = match ty {
            SemanticType::Boolean => SqlValue::Bool(self.get_bool()?),
            SemanticType::Int8 => SqlValue::Int8(self.get_i8()?),
            SemanticType::Int16 => SqlValue::Int16(self.get_i16()?),
            SemanticType::Int32 => SqlValue::Int32(self.get_i32()?),
            SemanticType::Int64 => SqlValue::Int64(self.get_i64()?),
            SemanticType::BigInteger => SqlValue::BigInteger(self.get_big_integer()?),
            SemanticType::Float32 => SqlValue::Float32(self.get_f32()?),
            SemanticType::Float64 => SqlValue::Float64(self.get_f64()?),
            SemanticType::Char => SqlValue::Char(self.get_char()?),
            SemanticType::String64 | SemanticType::String128 | SemanticType::String => {
                SqlValue::Text(self.get_string()?)
            }
            SemanticType::Binary16 | SemanticType::Binary32 | SemanticType::Binary => {
                SqlValue::Blob(Blob(self.get_binary()?))
            }
        };
        Ok(if self.was_null() { None } else { Some(value) })
    }
}

/// A [`SelectionResult`] over rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct RowCursor {
    rows: Vec<Vec<SqlValue>>,
    row: Option<usize>,
    column: usize,
    last_null: bool,
}

impl RowCursor {
    /// Creates a cursor positioned before the first row.
    #[must_use]
    pub const fn new(rows: Vec<Vec<SqlValue>>) -> Self {
        Self {
            rows,
            row: None,
            column: 0,
            last_null: false,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn next_cell(&mut self) -> Result<&SqlValue> {
        let row = self
            .row
            .and_then(|r| self.rows.get(r))
            .ok_or_else(|| PersistError::FailedToRestore(String::from("cursor is not on a row")))?;
        let cell = row.get(self.column).ok_or_else(|| {
            PersistError::FailedToRestore(format!(
                "column {} is past the end of a {}-column row",
                self.column + 1,
                row.len()
            ))
        })?;
        self.column += 1;
        self.last_null = cell.is_null();
        Ok(cell)
    }

    fn move_to(&mut self, row: usize) -> bool {
        self.row = Some(row);
        self.column = 0;
        self.last_null = false;
        row < self.rows.len()
    }
}

macro_rules! cursor_getter {
    ($name:ident, $ty:ty, $kind:literal, $zero:expr, $($pattern:pat => $value:expr),+) => {
        fn $name(&mut self) -> Result<$ty> {
            match self.next_cell()? {
                SqlValue::Null => Ok($zero),
                $($pattern => Ok($value),)+
                other => Err(PersistError::FailedToRestore(format!(
                    "expected {}, found {}",
                    $kind,
                    other.kind()
                ))),
            }
        }
    };
}

impl SelectionResult for RowCursor {
    fn move_to_first_row(&mut self) -> Result<bool> {
        Ok(self.move_to(0))
    }

    fn move_to_next_row(&mut self) -> Result<bool> {
        let next = self.row.map_or(0, |r| r + 1);
        Ok(self.move_to(next))
    }

    fn was_null(&self) -> bool {
        self.last_null
    }

    cursor_getter!(get_bool, bool, "bool", false, SqlValue::Bool(b) => *b);
    cursor_getter!(get_i8, i8, "int8", 0, SqlValue::Int8(n) => *n);
    cursor_getter!(get_i16, i16, "int16", 0, SqlValue::Int16(n) => *n);
    cursor_getter!(get_i32, i32, "int32", 0, SqlValue::Int32(n) => *n);
    cursor_getter!(get_i64, i64, "int64", 0, SqlValue::Int64(n) => *n);
    cursor_getter!(
        get_big_integer,
        BigInteger,
        "big integer",
        BigInteger::from(0),
        SqlValue::BigInteger(n) => n.clone(),
        SqlValue::Text(s) => s.parse()?
    );
    cursor_getter!(get_f32, f32, "float32", 0.0, SqlValue::Float32(f) => *f);
    cursor_getter!(get_f64, f64, "float64", 0.0, SqlValue::Float64(f) => *f);
    cursor_getter!(get_char, char, "char", '\0', SqlValue::Char(c) => *c);
    cursor_getter!(get_string, String, "text", String::new(), SqlValue::Text(s) => s.clone());
    cursor_getter!(get_binary, Vec<u8>, "blob", Vec::new(), SqlValue::Blob(b) => b.0.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_list_preserves_order() {
        let mut params = ParameterList::new();
        params.set_i32(1).unwrap();
        params.set_string64("Ada").unwrap();
        params.set_null(SemanticType::Int64).unwrap();
        assert_eq!(
            params.values(),
            &[
                SqlValue::Int32(1),
                SqlValue::Text(String::from("Ada")),
                SqlValue::Null
            ]
        );
    }

    #[test]
    fn test_set_value_dispatches_and_checks() {
        let mut params = ParameterList::new();
        params
            .set_value(SemanticType::String64, &SqlValue::Text(String::from("x")))
            .unwrap();
        params.set_value(SemanticType::Boolean, &SqlValue::Null).unwrap();
        assert_eq!(params.len(), 2);

        let err = params
            .set_value(SemanticType::Int32, &SqlValue::Text(String::from("x")))
            .unwrap_err();
        assert!(matches!(err, PersistError::ValueMismatch { .. }));

        let err = params
            .set_value(SemanticType::Binary16, &SqlValue::Blob(Blob::from(vec![0; 3])))
            .unwrap_err();
        assert!(matches!(err, PersistError::ValueOutOfBounds { len: 3, .. }));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_row_cursor_reads_positionally() {
        let mut cursor = RowCursor::new(vec![
            vec![SqlValue::Int32(1), SqlValue::Text(String::from("Ada"))],
            vec![SqlValue::Int32(2), SqlValue::Null],
        ]);
        assert!(cursor.move_to_first_row().unwrap());
        assert_eq!(cursor.get_i32().unwrap(), 1);
        assert_eq!(cursor.get_string().unwrap(), "Ada");
        assert!(!cursor.was_null());

        assert!(cursor.move_to_next_row().unwrap());
        assert_eq!(cursor.get_i32().unwrap(), 2);
        assert_eq!(cursor.get_value(SemanticType::String64).unwrap(), None);
        assert!(cursor.was_null());

        assert!(!cursor.move_to_next_row().unwrap());
    }

    #[test]
    fn test_row_cursor_type_mismatch_fails_to_restore() {
        let mut cursor = RowCursor::new(vec![vec![SqlValue::Int64(1)]]);
        cursor.move_to_first_row().unwrap();
        let err = cursor.get_i32().unwrap_err();
        assert!(matches!(err, PersistError::FailedToRestore(_)));
    }

    #[test]
    fn test_row_cursor_overrun() {
        let mut cursor = RowCursor::new(vec![vec![SqlValue::Bool(true)]]);
        assert!(cursor.get_bool().is_err());
        cursor.move_to_first_row().unwrap();
        assert!(cursor.get_bool().unwrap());
        assert!(cursor.get_bool().is_err());
    }

    #[test]
    fn test_empty_cursor() {
        let mut cursor = RowCursor::new(Vec::new());
        assert!(!cursor.move_to_first_row().unwrap());
    }
}
