//! Structured object converter.

use oxide_persist_core::{
    ColumnDeclaration, PersistError, SelectionResult, SemanticType, ValueCollector,
};

use super::{ValueConverter, collect_nulls};
use crate::error::{OrmError, Result};
use crate::value::Value;

/// One field of an object, as seen by its converter.
#[derive(Debug)]
pub struct ObjectField {
    name: &'static str,
    nullable: bool,
    converter: Option<Box<dyn ValueConverter>>,
}

impl ObjectField {
    /// A field stored in columns of the object's row.
    #[must_use]
    pub fn stored(
        name: &'static str,
        nullable: bool,
        converter: impl ValueConverter + 'static,
    ) -> Self {
        Self {
            name,
            nullable,
            converter: Some(Box::new(converter)),
        }
    }

    /// A collection field stored in a dependent table.
    ///
    /// It occupies no column; recovery yields an empty list that the mapper
    /// fills from the dependent table.
    #[must_use]
    pub const fn dependent(name: &'static str) -> Self {
        Self {
            name,
            nullable: false,
            converter: None,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// Converts a record field by field.
///
/// Embedded objects nest another `ObjectConverter` whose columns are
/// flattened into the same row.
#[derive(Debug)]
pub struct ObjectConverter {
    type_name: &'static str,
    fields: Vec<ObjectField>,
    optional: bool,
}

impl ObjectConverter {
    /// Creates a converter over `fields`, in declaration order.
    #[must_use]
    pub const fn new(type_name: &'static str, fields: Vec<ObjectField>) -> Self {
        Self {
            type_name,
            fields,
            optional: false,
        }
    }

    /// Marks the object as optional: a row whose columns are all NULL
    /// recovers as an absent object.
    #[must_use]
    pub const fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Returns the fields.
    #[must_use]
    pub fn fields(&self) -> &[ObjectField] {
        &self.fields
    }

    fn stored(&self) -> impl Iterator<Item = &dyn ValueConverter> {
        self.fields.iter().filter_map(|f| f.converter.as_deref())
    }
}

impl ValueConverter for ObjectConverter {
    fn produce_types(&self, types: &mut Vec<SemanticType>) {
        for converter in self.stored() {
            converter.produce_types(types);
        }
    }

    fn put_column_names(&self, names: &mut Vec<String>) {
        for converter in self.stored() {
            converter.put_column_names(names);
        }
    }

    fn put_column_declarations(&self, columns: &mut Vec<ColumnDeclaration>) {
        for converter in self.stored() {
            converter.put_column_declarations(columns);
        }
    }

    fn collect_values(&self, value: &Value, collector: &mut dyn ValueCollector) -> Result<()> {
        let values = match value {
            Value::Null => return collect_nulls(self, collector),
            Value::Record(values) if values.len() == self.fields.len() => values,
            Value::Record(_) => {
                return Err(OrmError::shape(
                    self.type_name,
                    "record of matching arity",
                    "record",
                ));
            }
            other => return Err(OrmError::shape(self.type_name, "record", other.kind())),
        };
        for (field, value) in self.fields.iter().zip(values) {
            if let Some(converter) = &field.converter {
                converter.collect_values(value, collector)?;
            }
        }
        Ok(())
    }

    fn recover_nullable(&self, cursor: &mut dyn SelectionResult) -> Result<Option<Value>> {
        let mut values = Vec::with_capacity(self.fields.len());
        let mut present = false;
        let mut missing = None;
        for field in &self.fields {
            let Some(converter) = &field.converter else {
                values.push(Value::List(Vec::new()));
                continue;
            };
            match converter.recover_nullable(cursor)? {
                Some(value) => {
                    present = true;
                    values.push(value);
                }
                None => {
                    if !field.nullable && missing.is_none() {
                        missing = Some(converter.label());
                    }
                    values.push(Value::Null);
                }
            }
        }
        if self.optional && !present {
            return Ok(None);
        }
        match missing {
            Some(column) => Err(PersistError::CorruptNullValue { column }.into()),
            None => Ok(Some(Value::Record(values))),
        }
    }

    fn value_path(&self, column: usize) -> Option<Vec<usize>> {
        let mut offset = 0;
        for (index, field) in self.fields.iter().enumerate() {
            let Some(converter) = &field.converter else {
                continue;
            };
            let count = converter.column_count();
            if column < offset + count {
                let mut path = vec![index];
                path.extend(converter.value_path(column - offset)?);
                return Some(path);
            }
            offset += count;
        }
        None
    }

    fn label(&self) -> String {
        String::from(self.type_name)
    }
}
