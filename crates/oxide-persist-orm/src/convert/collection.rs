//! Dependent-table row converter.

use oxide_persist_core::{
    ColumnDeclaration, SelectionResult, SemanticType, SqlValue, ValueCollector,
};

use super::{PrimitiveConverter, ValueConverter};
use crate::error::{OrmError, Result};
use crate::value::Value;

/// Converts one element row of a dependent table.
///
/// A row holds the parent's key columns, the `_<field>_index` column that
/// keeps element order, then the element's own columns. At runtime a row is
/// the record `[key.., index, element]`.
#[derive(Debug)]
pub struct CollectionConverter {
    table: String,
    keys: Vec<PrimitiveConverter>,
    index: PrimitiveConverter,
    element: Box<dyn ValueConverter>,
}

impl CollectionConverter {
    /// Creates a converter for rows of `table`.
    #[must_use]
    pub fn new(
        table: impl Into<String>,
        keys: Vec<PrimitiveConverter>,
        index: PrimitiveConverter,
        element: Box<dyn ValueConverter>,
    ) -> Self {
        Self {
            table: table.into(),
            keys,
            index,
            element,
        }
    }

    /// Returns the element converter.
    #[must_use]
    pub fn element(&self) -> &dyn ValueConverter {
        &*self.element
    }

    /// Builds the runtime row for the element at `index`.
    pub fn row(parent_key: &[SqlValue], index: usize, element: Value) -> Result<Value> {
        let index = i32::try_from(index)
            .map_err(|_| OrmError::shape("collection index", "32-bit index", "larger index"))?;
        let mut fields: Vec<Value> = parent_key.iter().cloned().map(Value::Scalar).collect();
        fields.push(Value::Scalar(SqlValue::Int32(index)));
        fields.push(element);
        Ok(Value::Record(fields))
    }

    /// Returns the element of a row built by [`row`](Self::row).
    #[must_use]
    pub fn element_of(row: &Value) -> Option<&Value> {
        match row {
            Value::Record(fields) => fields.last(),
            _ => None,
        }
    }

    /// Mutable variant of [`element_of`](Self::element_of).
    pub fn element_of_mut(row: &mut Value) -> Option<&mut Value> {
        match row {
            Value::Record(fields) => fields.last_mut(),
            _ => None,
        }
    }

    /// Orders recovered rows by their index column and returns the
    /// elements.
    pub fn into_elements(rows: Vec<Value>) -> Result<Vec<Value>> {
        let mut indexed = rows
            .into_iter()
            .map(|row| match row {
                Value::Record(mut fields) => {
                    let element = fields.pop();
                    match (fields.pop(), element) {
                        (Some(Value::Scalar(SqlValue::Int32(index))), Some(element)) => {
                            Ok((index, element))
                        }
                        _ => Err(OrmError::shape("collection row", "element index", "missing")),
                    }
                }
                other => Err(OrmError::shape("collection row", "record", other.kind())),
            })
            .collect::<Result<Vec<_>>>()?;
        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, element)| element).collect())
    }

    fn parts(&self) -> impl Iterator<Item = &dyn ValueConverter> {
        self.keys
            .iter()
            .map(|k| k as &dyn ValueConverter)
            .chain([&self.index as &dyn ValueConverter, &*self.element])
    }
}

impl ValueConverter for CollectionConverter {
    fn produce_types(&self, types: &mut Vec<SemanticType>) {
        for part in self.parts() {
            part.produce_types(types);
        }
    }

    fn put_column_names(&self, names: &mut Vec<String>) {
        for part in self.parts() {
            part.put_column_names(names);
        }
    }

    fn put_column_declarations(&self, columns: &mut Vec<ColumnDeclaration>) {
        for part in self.parts() {
            part.put_column_declarations(columns);
        }
    }

    fn collect_values(&self, value: &Value, collector: &mut dyn ValueCollector) -> Result<()> {
        match value {
            Value::Record(fields) if fields.len() == self.keys.len() + 2 => {
                for (part, field) in self.parts().zip(fields) {
                    part.collect_values(field, collector)?;
                }
                Ok(())
            }
            other => Err(OrmError::shape(self.table.as_str(), "element row", other.kind())),
        }
    }

    fn recover_nullable(&self, cursor: &mut dyn SelectionResult) -> Result<Option<Value>> {
        let mut fields = Vec::with_capacity(self.keys.len() + 2);
        for key in &self.keys {
            fields.push(key.recover(cursor)?);
        }
        fields.push(self.index.recover(cursor)?);
        fields.push(self.element.recover_nullable(cursor)?.unwrap_or(Value::Null));
        Ok(Some(Value::Record(fields)))
    }

    fn value_path(&self, column: usize) -> Option<Vec<usize>> {
        let keyed = self.keys.len() + 1;
        if column < keyed {
            return Some(vec![column]);
        }
        let mut path = vec![keyed];
        path.extend(self.element.value_path(column - keyed)?);
        Some(path)
    }

    fn label(&self) -> String {
        self.table.clone()
    }
}
