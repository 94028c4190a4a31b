//! Single-column converters.

use oxide_persist_core::{
    ColumnDeclaration, SelectionResult, SemanticType, SqlValue, ValueCollector,
};

use super::ValueConverter;
use crate::error::{OrmError, Result};
use crate::value::Value;

/// Stores a scalar in one column.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveConverter {
    declaration: ColumnDeclaration,
}

impl PrimitiveConverter {
    /// Creates a converter for the declared column.
    #[must_use]
    pub const fn new(declaration: ColumnDeclaration) -> Self {
        Self { declaration }
    }

    /// Returns the column declaration.
    #[must_use]
    pub const fn declaration(&self) -> &ColumnDeclaration {
        &self.declaration
    }

    fn bind(&self, value: &SqlValue, collector: &mut dyn ValueCollector) -> Result<()> {
        collector.set_value(self.declaration.ty, value)?;
        Ok(())
    }
}

impl ValueConverter for PrimitiveConverter {
    fn produce_types(&self, types: &mut Vec<SemanticType>) {
        types.push(self.declaration.ty);
    }

    fn put_column_names(&self, names: &mut Vec<String>) {
        names.push(self.declaration.name.clone());
    }

    fn put_column_declarations(&self, columns: &mut Vec<ColumnDeclaration>) {
        columns.push(self.declaration.clone());
    }

    fn collect_values(&self, value: &Value, collector: &mut dyn ValueCollector) -> Result<()> {
        match value {
            Value::Null => Ok(collector.set_null(self.declaration.ty)?),
            Value::Scalar(v) | Value::Reference(v) => self.bind(v, collector),
            other => Err(OrmError::shape(
                self.declaration.name.as_str(),
                "scalar",
                other.kind(),
            )),
        }
    }

    fn recover_nullable(&self, cursor: &mut dyn SelectionResult) -> Result<Option<Value>> {
        Ok(cursor.get_value(self.declaration.ty)?.map(Value::Scalar))
    }

    fn value_path(&self, column: usize) -> Option<Vec<usize>> {
        (column == 0).then(Vec::new)
    }

    fn column_count(&self) -> usize {
        1
    }

    fn label(&self) -> String {
        self.declaration.name.clone()
    }
}

/// Stores a referenced object as the foreign key of its row.
///
/// Collecting reads the key out of the referenced record. Recovery yields a
/// [`Value::Reference`] holding the key; the mapper replaces it with the
/// loaded record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceConverter {
    column: PrimitiveConverter,
    key_path: Vec<usize>,
}

impl ReferenceConverter {
    /// Creates a converter for a foreign key column whose value sits at
    /// `key_path` inside the referenced record.
    #[must_use]
    pub const fn new(declaration: ColumnDeclaration, key_path: Vec<usize>) -> Self {
        Self {
            column: PrimitiveConverter::new(declaration),
            key_path,
        }
    }
}

impl ValueConverter for ReferenceConverter {
    fn produce_types(&self, types: &mut Vec<SemanticType>) {
        self.column.produce_types(types);
    }

    fn put_column_names(&self, names: &mut Vec<String>) {
        self.column.put_column_names(names);
    }

    fn put_column_declarations(&self, columns: &mut Vec<ColumnDeclaration>) {
        self.column.put_column_declarations(columns);
    }

    fn collect_values(&self, value: &Value, collector: &mut dyn ValueCollector) -> Result<()> {
        match value {
            Value::Record(_) => {
                let key = value.at(&self.key_path).ok_or_else(|| {
                    OrmError::shape(self.label(), "referenced key", "missing field")
                })?;
                self.column.collect_values(key, collector)
            }
            other => self.column.collect_values(other, collector),
        }
    }

    fn recover_nullable(&self, cursor: &mut dyn SelectionResult) -> Result<Option<Value>> {
        Ok(self
            .column
            .recover_nullable(cursor)?
            .map(|value| match value {
                Value::Scalar(key) => Value::Reference(key),
                other => other,
            }))
    }

    fn value_path(&self, column: usize) -> Option<Vec<usize>> {
        (column == 0).then(|| self.key_path.clone())
    }

    fn column_count(&self) -> usize {
        1
    }

    fn label(&self) -> String {
        self.column.label()
    }
}
