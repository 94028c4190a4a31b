//! Semantic column types, column declarations and foreign key references.

use core::fmt;

use super::expression::{BooleanExpr, Expr};
use super::identifier::TableName;
use crate::error::{PersistError, Result};
use crate::table::Table;
use crate::value::SqlValue;

/// The fixed set of semantic types a column can carry.
///
/// Every dialect maps each of these to a SQL keyword; a missing mapping is a
/// configuration error reported when a statement is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticType {
    /// Boolean.
    Boolean,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Arbitrary-precision integer.
    BigInteger,
    /// Single precision float.
    Float32,
    /// Double precision float.
    Float64,
    /// A single character.
    Char,
    /// String of at most 64 characters.
    String64,
    /// String of at most 128 characters.
    String128,
    /// Unbounded string.
    String,
    /// Binary value of exactly 16 bytes.
    Binary16,
    /// Binary value of exactly 32 bytes.
    Binary32,
    /// Unbounded binary value.
    Binary,
}

impl SemanticType {
    /// Every semantic type, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Boolean,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::BigInteger,
        Self::Float32,
        Self::Float64,
        Self::Char,
        Self::String64,
        Self::String128,
        Self::String,
        Self::Binary16,
        Self::Binary32,
        Self::Binary,
    ];

    /// Returns whether values of this type are numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::BigInteger
                | Self::Float32
                | Self::Float64
        )
    }

    /// Returns whether values of this type are binary.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        matches!(self, Self::Binary16 | Self::Binary32 | Self::Binary)
    }

    /// Checks that `value` can be bound as this type.
    ///
    /// NULL is accepted for every type; bounded strings are checked by
    /// character count and fixed binaries by exact length.
    pub fn check_value(self, value: &SqlValue) -> Result<()> {
        let matches = match (self, value) {
            (_, SqlValue::Null)
            | (Self::Boolean, SqlValue::Bool(_))
            | (Self::Int8, SqlValue::Int8(_))
            | (Self::Int16, SqlValue::Int16(_))
            | (Self::Int32, SqlValue::Int32(_))
            | (Self::Int64, SqlValue::Int64(_))
            | (Self::BigInteger, SqlValue::BigInteger(_))
            | (Self::Float32, SqlValue::Float32(_))
            | (Self::Float64, SqlValue::Float64(_))
            | (Self::Char, SqlValue::Char(_))
            | (Self::String, SqlValue::Text(_))
            | (Self::Binary, SqlValue::Blob(_)) => true,
            (Self::String64 | Self::String128, SqlValue::Text(s)) => {
                let len = s.chars().count();
                let max = if self == Self::String64 { 64 } else { 128 };
                if len > max {
                    return Err(PersistError::ValueOutOfBounds { ty: self, len });
                }
                true
            }
            (Self::Binary16 | Self::Binary32, SqlValue::Blob(b)) => {
                let expected = if self == Self::Binary16 { 16 } else { 32 };
                if b.len() != expected {
                    return Err(PersistError::ValueOutOfBounds {
                        ty: self,
                        len: b.len(),
                    });
                }
                true
            }
            _ => false,
        };
        if matches {
            Ok(())
        } else {
            Err(PersistError::ValueMismatch {
                expected: self,
                actual: value.kind().to_string(),
            })
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferentialAction {
    /// Reject the change (the default).
    #[default]
    Restrict,
    /// Propagate the change.
    Cascade,
    /// Set the referencing columns to NULL.
    SetNull,
    /// Defer to the database.
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// A foreign key reference to columns of another table.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// The referenced table.
    pub table: TableName,
    /// The referenced columns, in order. Must not be empty.
    pub columns: Vec<String>,
    /// Action on delete. Rendered only when set; RESTRICT otherwise applies.
    pub on_delete: Option<ReferentialAction>,
    /// Action on update. Rendered only when set; RESTRICT otherwise applies.
    pub on_update: Option<ReferentialAction>,
}

impl Reference {
    /// Creates a reference without explicit referential actions.
    #[must_use]
    pub fn new(table: TableName, columns: Vec<String>) -> Self {
        Self {
            table,
            columns,
            on_delete: None,
            on_update: None,
        }
    }

    /// The effective delete action.
    #[must_use]
    pub fn delete_action(&self) -> ReferentialAction {
        self.on_delete.unwrap_or_default()
    }

    /// The effective update action.
    #[must_use]
    pub fn update_action(&self) -> ReferentialAction {
        self.on_update.unwrap_or_default()
    }
}

/// A column declaration for CREATE TABLE.
///
/// Modifiers always render in the order NOT NULL, PRIMARY KEY,
/// AUTOINCREMENT, UNIQUE, CHECK, DEFAULT, REFERENCES.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDeclaration {
    /// Column name.
    pub name: String,
    /// Semantic type.
    pub ty: SemanticType,
    /// Whether NOT NULL is rendered.
    pub not_null: bool,
    /// Whether this column is (part of) the primary key.
    pub primary_key: bool,
    /// Whether this column auto-increments.
    pub auto_increment: bool,
    /// Whether this column is UNIQUE.
    pub unique: bool,
    /// CHECK constraint.
    pub check: Option<BooleanExpr>,
    /// DEFAULT value.
    pub default: Option<Expr>,
    /// Foreign key reference.
    pub reference: Option<Reference>,
}

impl ColumnDeclaration {
    /// Creates a declaration with no modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            ty,
            not_null: false,
            primary_key: false,
            auto_increment: false,
            unique: false,
            check: None,
            default: None,
            reference: None,
        }
    }

    /// Returns a copy referencing the primary key of `target`.
    ///
    /// The target must have exactly one key column, of the same type as this
    /// declaration.
    pub fn referencing(self, target: &Table) -> Result<Self> {
        let keys = target.primary_keys();
        let [key] = keys else {
            return Err(PersistError::ReferenceColumnCount {
                table: target.name().to_string(),
                expected: keys.len(),
                actual: 1,
            });
        };
        if key.ty != self.ty {
            return Err(PersistError::ReferenceTypeMismatch {
                column: self.name,
                table: target.name().to_string(),
                target: key.column.clone(),
                expected: key.ty,
                actual: self.ty,
            });
        }
        let reference = Reference::new(target.name().clone(), vec![key.column.clone()]);
        Ok(Self {
            reference: Some(reference),
            ..self
        })
    }
}

/// A table-level constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraint {
    /// Composite primary key.
    PrimaryKey(Vec<String>),
    /// Composite unique constraint.
    Unique(Vec<String>),
    /// Composite foreign key.
    ForeignKey {
        /// Local columns.
        columns: Vec<String>,
        /// Referenced table and columns.
        reference: Reference,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use crate::value::Blob;

    #[test]
    fn test_referential_action_text() {
        assert_eq!(ReferentialAction::SetNull.as_sql(), "SET NULL");
        assert_eq!(ReferentialAction::NoAction.as_sql(), "NO ACTION");
        assert_eq!(ReferentialAction::default(), ReferentialAction::Restrict);
    }

    #[test]
    fn test_reference_defaults_to_restrict() {
        let reference = Reference::new(TableName::new("users"), vec![String::from("id")]);
        assert_eq!(reference.delete_action(), ReferentialAction::Restrict);
        assert_eq!(reference.update_action(), ReferentialAction::Restrict);
    }

    #[test]
    fn test_check_value_bounds() {
        let short = SqlValue::Text("a".repeat(64));
        let long = SqlValue::Text("a".repeat(65));
        assert!(SemanticType::String64.check_value(&short).is_ok());
        assert!(matches!(
            SemanticType::String64.check_value(&long),
            Err(PersistError::ValueOutOfBounds { len: 65, .. })
        ));
        assert!(SemanticType::String128.check_value(&long).is_ok());

        let sixteen = SqlValue::Blob(Blob::from(vec![0_u8; 16]));
        assert!(SemanticType::Binary16.check_value(&sixteen).is_ok());
        assert!(SemanticType::Binary32.check_value(&sixteen).is_err());
    }

    #[test]
    fn test_check_value_variant_mismatch() {
        let err = SemanticType::Int32.check_value(&SqlValue::Int64(1)).unwrap_err();
        assert!(matches!(
            err,
            PersistError::ValueMismatch {
                expected: SemanticType::Int32,
                ..
            }
        ));
        assert!(SemanticType::Int32.check_value(&SqlValue::Null).is_ok());
    }

    #[test]
    fn test_referencing_checks_type() {
        let users = Table::new(
            TableName::new("users"),
            &[ColumnDeclaration {
                primary_key: true,
                ..ColumnDeclaration::new("id", SemanticType::Int64)
            }],
        );

        let ok = ColumnDeclaration::new("owner", SemanticType::Int64)
            .referencing(&users)
            .unwrap();
        let reference = ok.reference.unwrap();
        assert_eq!(reference.table.name, "users");
        assert_eq!(reference.columns, vec!["id"]);

        let err = ColumnDeclaration::new("owner", SemanticType::Int32)
            .referencing(&users)
            .unwrap_err();
        assert!(matches!(err, PersistError::ReferenceTypeMismatch { .. }));
    }

    #[test]
    fn test_referencing_composite_key_fails() {
        let pairs = Table::new(
            TableName::new("pairs"),
            &[
                ColumnDeclaration::new("a", SemanticType::Int32),
                ColumnDeclaration::new("b", SemanticType::Int32),
            ],
        );
        let err = ColumnDeclaration::new("pair", SemanticType::Int32)
            .referencing(&pairs)
            .unwrap_err();
        assert!(matches!(
            err,
            PersistError::ReferenceColumnCount {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }
}
