//! Value converters.
//!
//! A converter owns the columns one value occupies in a row. The same
//! converter declares those columns, names them, binds a runtime value into
//! them and reads the value back, always walking its columns in the same
//! order. Recovery is positional: a cursor getter consumes one column, so a
//! converter that reads in a different order than it wrote silently shifts
//! every later field.

mod collection;
mod object;
mod primitive;
mod single_row;

use core::fmt;

use oxide_persist_core::{
    ColumnDeclaration, PersistError, SelectionResult, SemanticType, ValueCollector,
};

pub use collection::CollectionConverter;
pub use object::{ObjectConverter, ObjectField};
pub use primitive::{PrimitiveConverter, ReferenceConverter};
pub use single_row::SingleRowConverter;

use crate::error::Result;
use crate::value::Value;

/// Moves one value between its runtime shape and its columns.
pub trait ValueConverter: fmt::Debug + Send + Sync {
    /// Appends the semantic type of every column, in column order.
    fn produce_types(&self, types: &mut Vec<SemanticType>);

    /// Appends the name of every column, in column order.
    fn put_column_names(&self, names: &mut Vec<String>);

    /// Appends the declaration of every column, in column order.
    fn put_column_declarations(&self, columns: &mut Vec<ColumnDeclaration>);

    /// Binds `value` into `collector`, one call per column.
    fn collect_values(&self, value: &Value, collector: &mut dyn ValueCollector) -> Result<()>;

    /// Reads the value back from the current row, returning `None` when it
    /// was stored as NULL.
    fn recover_nullable(&self, cursor: &mut dyn SelectionResult) -> Result<Option<Value>>;

    /// Reads a value that must be present.
    fn recover(&self, cursor: &mut dyn SelectionResult) -> Result<Value> {
        self.recover_nullable(cursor)?.ok_or_else(|| {
            PersistError::CorruptNullValue {
                column: self.label(),
            }
            .into()
        })
    }

    /// Returns the field index path to the value stored in `column`,
    /// relative to the value this converter handles.
    fn value_path(&self, column: usize) -> Option<Vec<usize>>;

    /// Returns the number of columns.
    fn column_count(&self) -> usize {
        let mut types = Vec::new();
        self.produce_types(&mut types);
        types.len()
    }

    /// Names the value in error messages.
    fn label(&self) -> String;
}

/// Binds NULL into every column of `converter`.
pub(crate) fn collect_nulls(
    converter: &dyn ValueConverter,
    collector: &mut dyn ValueCollector,
) -> Result<()> {
    let mut types = Vec::new();
    converter.produce_types(&mut types);
    for ty in types {
        collector.set_null(ty)?;
    }
    Ok(())
}
