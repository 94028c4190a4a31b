//! Runtime values of persistent objects.

use oxide_persist_core::SqlValue;

use crate::error::{OrmError, Result};

/// The runtime shape of a persistent value.
///
/// Records hold one value per descriptor field, in field order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An absent optional value.
    Null,
    /// A scalar column value.
    Scalar(SqlValue),
    /// A structured object.
    Record(Vec<Value>),
    /// A collection.
    List(Vec<Value>),
    /// The key of a referenced row that has not been loaded yet.
    Reference(SqlValue),
}

impl Value {
    /// Returns a short name of the variant, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "scalar",
            Self::Record(_) => "record",
            Self::List(_) => "list",
            Self::Reference(_) => "unresolved reference",
        }
    }

    /// Follows a path of field indices through nested records.
    ///
    /// Returns `None` when the path crosses a NULL record.
    #[must_use]
    pub fn at(&self, path: &[usize]) -> Option<&Self> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => match self {
                Self::Record(fields) => fields.get(*first)?.at(rest),
                _ => None,
            },
        }
    }

    /// Mutable variant of [`at`](Self::at).
    pub fn at_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => match self {
                Self::Record(fields) => fields.get_mut(*first)?.at_mut(rest),
                _ => None,
            },
        }
    }

    /// Unwraps a record of `len` fields.
    pub fn into_fields(self, type_name: &str, len: usize) -> Result<Vec<Self>> {
        match self {
            Self::Record(fields) if fields.len() == len => Ok(fields),
            Self::Record(_) => Err(OrmError::shape(type_name, "record of matching arity", "record")),
            other => Err(OrmError::shape(type_name, "record", other.kind())),
        }
    }
}

impl From<SqlValue> for Value {
    fn from(value: SqlValue) -> Self {
        if value.is_null() {
            Self::Null
        } else {
            Self::Scalar(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_navigation() {
        let value = Value::Record(vec![
            Value::Scalar(SqlValue::Int32(1)),
            Value::Record(vec![Value::Scalar(SqlValue::Text(String::from("Paris")))]),
            Value::Null,
        ]);
        assert_eq!(
            value.at(&[1, 0]),
            Some(&Value::Scalar(SqlValue::Text(String::from("Paris"))))
        );
        assert_eq!(value.at(&[2, 0]), None);
        assert_eq!(value.at(&[]), Some(&value));
    }

    #[test]
    fn test_replace_through_path() {
        let mut value = Value::Record(vec![Value::Reference(SqlValue::Int32(4))]);
        if let Some(slot) = value.at_mut(&[0]) {
            *slot = Value::Record(vec![Value::Scalar(SqlValue::Int32(4))]);
        }
        assert_eq!(value.at(&[0]).map(Value::kind), Some("record"));
    }

    #[test]
    fn test_into_fields_checks_arity() {
        let value = Value::Record(vec![Value::Null]);
        assert!(value.clone().into_fields("User", 1).is_ok());
        assert!(value.into_fields("User", 2).is_err());
        assert!(Value::Null.into_fields("User", 0).is_err());
    }

    #[test]
    fn test_null_sql_value_becomes_null() {
        assert_eq!(Value::from(SqlValue::Null), Value::Null);
        assert_eq!(
            Value::from(SqlValue::Bool(true)),
            Value::Scalar(SqlValue::Bool(true))
        );
    }
}
