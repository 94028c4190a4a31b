//! Error types for the object mapper.

use oxide_persist_core::PersistError;
use thiserror::Error;

/// Errors raised while mapping objects to tables.
#[derive(Debug, Error)]
pub enum OrmError {
    /// Statement compilation, binding or driver error.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// A composite field carries neither `embed` nor `references`.
    #[error(
        "field '{field}' of '{type_name}' has a composite type; annotate it with `embed` or `references`"
    )]
    Conformity {
        /// Offending field.
        field: &'static str,
        /// Type declaring the field.
        type_name: &'static str,
    },

    /// A collection field holds collections.
    #[error("field '{field}' of '{type_name}' is a collection of collections")]
    NestedCollection {
        /// Offending field.
        field: &'static str,
        /// Type declaring the field.
        type_name: &'static str,
    },

    /// An optional embedded field has no column that is set whenever the
    /// object is present, so absence cannot be told from an all-null object.
    #[error(
        "optional embedded field '{field}' of '{type_name}' needs a non-nullable column"
    )]
    AmbiguousOptionalEmbed {
        /// Offending field.
        field: &'static str,
        /// Type declaring the field.
        type_name: &'static str,
    },

    /// A collection field is optional. Dependent rows cannot record absence.
    #[error("collection field '{field}' of '{type_name}' cannot be optional")]
    OptionalCollection {
        /// Offending field.
        field: &'static str,
        /// Type declaring the field.
        type_name: &'static str,
    },

    /// A type references itself, directly or through other types.
    #[error("type '{type_name}' references itself through field '{field}'")]
    CyclicReference {
        /// Offending field.
        field: &'static str,
        /// Type reached twice.
        type_name: &'static str,
    },

    /// A table whose key is needed has no columns to form one.
    #[error("table '{table}' has no primary key")]
    MissingPrimaryKey {
        /// Table name.
        table: String,
    },

    /// A runtime value does not have the shape its descriptor declares.
    #[error("expected {expected} for '{context}', got {actual}")]
    ValueShape {
        /// Type or field being converted.
        context: String,
        /// Expected shape.
        expected: &'static str,
        /// Actual shape.
        actual: &'static str,
    },

    /// A referenced row does not exist.
    #[error("no row in '{table}' matches the referenced key")]
    NotFound {
        /// Table searched.
        table: String,
    },

    /// A dialect name is not known.
    #[error("unknown dialect '{0}'")]
    UnknownDialect(String),
}

impl OrmError {
    pub(crate) fn shape(
        context: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::ValueShape {
            context: context.into(),
            expected,
            actual,
        }
    }
}

/// Result type alias for mapper operations.
pub type Result<T> = std::result::Result<T, OrmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conformity_names_both_annotations() {
        let err = OrmError::Conformity {
            field: "address",
            type_name: "User",
        };
        let message = err.to_string();
        assert!(message.contains("address"));
        assert!(message.contains("`embed`"));
        assert!(message.contains("`references`"));
    }

    #[test]
    fn test_persist_error_is_transparent() {
        let err = OrmError::from(PersistError::CorruptNullValue {
            column: String::from("age"),
        });
        assert_eq!(err.to_string(), "corrupt null value in column 'age'");
    }
}
