//! Error types for statement compilation, value binding and recovery.

use thiserror::Error;

use crate::ast::SemanticType;

/// Errors raised while compiling statements or moving values through a
/// collector or cursor.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The active dialect has no keyword for a semantic type.
    #[error("dialect '{dialect}' has no SQL type for {ty:?}")]
    UnmappedType {
        /// Dialect name.
        dialect: &'static str,
        /// The type without a mapping.
        ty: SemanticType,
    },

    /// An identifier is not valid for the active dialect.
    #[error("invalid identifier '{name}' for dialect '{dialect}'")]
    InvalidIdentifier {
        /// Dialect name.
        dialect: &'static str,
        /// The rejected identifier.
        name: String,
    },

    /// A foreign key reference lists no target columns.
    #[error("reference to '{table}' names no columns")]
    EmptyReference {
        /// Referenced table.
        table: String,
    },

    /// Local and referenced column counts differ.
    #[error("reference to '{table}' expects {expected} column(s), got {actual}")]
    ReferenceColumnCount {
        /// Referenced table.
        table: String,
        /// Number of referenced columns.
        expected: usize,
        /// Number of local columns.
        actual: usize,
    },

    /// A foreign key column's type differs from the referenced column.
    #[error("column '{column}' is {actual:?} but references {table}.{target} of type {expected:?}")]
    ReferenceTypeMismatch {
        /// Local column.
        column: String,
        /// Referenced table.
        table: String,
        /// Referenced column.
        target: String,
        /// Type of the referenced column.
        expected: SemanticType,
        /// Type of the local column.
        actual: SemanticType,
    },

    /// A statement has no columns where at least one is required.
    #[error("{0} requires at least one column")]
    NoColumns(&'static str),

    /// An INSERT lists a different number of values than columns.
    #[error("INSERT into '{table}' lists {columns} column(s) but {values} value(s)")]
    ValueCount {
        /// Target table.
        table: String,
        /// Number of columns.
        columns: usize,
        /// Number of values.
        values: usize,
    },

    /// The requested encoding is not supported.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// A value does not fit its semantic type.
    #[error("value of length {len} exceeds {ty:?}")]
    ValueOutOfBounds {
        /// Target type.
        ty: SemanticType,
        /// Actual length in characters or bytes.
        len: usize,
    },

    /// A value's variant does not match the semantic type it is bound as.
    #[error("expected a {expected:?} value, got {actual}")]
    ValueMismatch {
        /// Declared type.
        expected: SemanticType,
        /// Description of the supplied value.
        actual: String,
    },

    /// A non-nullable column was read back as NULL.
    #[error("corrupt null value in column '{column}'")]
    CorruptNullValue {
        /// The column read as NULL.
        column: String,
    },

    /// Reading a value back from a cursor failed.
    #[error("failed to restore value: {0}")]
    FailedToRestore(String),

    /// Error raised by the driver behind a collector or cursor.
    #[error("driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PersistError {
    /// Wraps a driver error.
    pub fn driver(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Driver(err.into())
    }

    /// Returns whether this error reports a data-integrity problem rather than
    /// a connectivity or configuration problem.
    #[must_use]
    pub const fn is_corrupt_null(&self) -> bool {
        matches!(self, Self::CorruptNullValue { .. })
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, PersistError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_null_is_distinct_from_restore_failure() {
        let corrupt = PersistError::CorruptNullValue {
            column: String::from("age"),
        };
        let restore = PersistError::FailedToRestore(String::from("connection reset"));
        assert!(corrupt.is_corrupt_null());
        assert!(!restore.is_corrupt_null());
        assert_eq!(corrupt.to_string(), "corrupt null value in column 'age'");
    }

    #[test]
    fn test_driver_error_keeps_source() {
        let err = PersistError::driver("socket closed");
        assert_eq!(err.to_string(), "driver error: socket closed");
        assert!(std::error::Error::source(&err).is_some());
    }
}
