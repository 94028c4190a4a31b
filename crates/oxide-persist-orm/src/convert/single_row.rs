//! Single-row converter.

use oxide_persist_core::{ColumnDeclaration, SelectionResult, SemanticType, ValueCollector};

use super::ValueConverter;
use crate::error::Result;
use crate::value::Value;

/// Recovers a value from the first row of a result.
///
/// Used when loading one referenced object by key: an empty result
/// recovers as `None`.
#[derive(Debug)]
pub struct SingleRowConverter<'a> {
    inner: &'a dyn ValueConverter,
}

impl<'a> SingleRowConverter<'a> {
    /// Wraps the converter of the row.
    #[must_use]
    pub const fn new(inner: &'a dyn ValueConverter) -> Self {
        Self { inner }
    }
}

impl ValueConverter for SingleRowConverter<'_> {
    fn produce_types(&self, types: &mut Vec<SemanticType>) {
        self.inner.produce_types(types);
    }

    fn put_column_names(&self, names: &mut Vec<String>) {
        self.inner.put_column_names(names);
    }

    fn put_column_declarations(&self, columns: &mut Vec<ColumnDeclaration>) {
        self.inner.put_column_declarations(columns);
    }

    fn collect_values(&self, value: &Value, collector: &mut dyn ValueCollector) -> Result<()> {
        self.inner.collect_values(value, collector)
    }

    fn recover_nullable(&self, cursor: &mut dyn SelectionResult) -> Result<Option<Value>> {
        if !cursor.move_to_first_row()? {
            return Ok(None);
        }
        self.inner.recover_nullable(cursor)
    }

    fn value_path(&self, column: usize) -> Option<Vec<usize>> {
        self.inner.value_path(column)
    }

    fn column_count(&self) -> usize {
        self.inner.column_count()
    }

    fn label(&self) -> String {
        self.inner.label()
    }
}
