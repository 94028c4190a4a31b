//! Object mapper.
//!
//! The mapper compiles statement sequences for persistent types and runs
//! them through an injected [`Driver`]. Multi-statement work runs inside one
//! transaction and is rolled back on the first error.

use std::{iter, ptr};

use oxide_persist_core::{
    Dialect, ParameterList, Select, SelectionResult, SqlValue, Unparse, compile,
};
use tracing::{debug, trace, warn};

use crate::config::{DialectKind, MapperOptions};
use crate::convert::{CollectionConverter, SingleRowConverter, ValueConverter};
use crate::declaration::{DeclarationCollector, MappingKind, TableMapping};
use crate::descriptor::Persistent;
use crate::error::{OrmError, Result};
use crate::plan::insert_steps;
use crate::sequencer::OrderedInsertStatements;
use crate::value::Value;

/// Executes rendered SQL against a database.
///
/// Parameters are positional: the n-th value binds the n-th `?`.
pub trait Driver {
    /// Starts a transaction.
    fn begin(&mut self) -> oxide_persist_core::Result<()>;

    /// Commits the current transaction.
    fn commit(&mut self) -> oxide_persist_core::Result<()>;

    /// Rolls back the current transaction.
    fn rollback(&mut self) -> oxide_persist_core::Result<()>;

    /// Executes a statement, returning the number of affected rows.
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> oxide_persist_core::Result<u64>;

    /// Runs a query, returning a cursor positioned before the first row.
    fn query(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> oxide_persist_core::Result<Box<dyn SelectionResult>>;
}

/// One row of an insert, with the lookup that skips it when its key is
/// already stored.
struct PlannedRow<'a> {
    sql: &'a str,
    params: Vec<SqlValue>,
    existing: Option<(String, Vec<SqlValue>)>,
}

/// Maps persistent types to tables of one database.
#[derive(Debug)]
pub struct Mapper<D: Driver> {
    driver: D,
    dialect: Box<dyn Dialect>,
    options: MapperOptions,
}

impl<D: Driver> Mapper<D> {
    /// Creates a mapper rendering SQL with `dialect`.
    #[must_use]
    pub fn new(driver: D, dialect: Box<dyn Dialect>, options: MapperOptions) -> Self {
        Self {
            driver,
            dialect,
            options,
        }
    }

    /// Creates a mapper for a configured database kind.
    #[must_use]
    pub fn from_kind(driver: D, kind: DialectKind, options: MapperOptions) -> Self {
        Self::new(driver, kind.dialect(), options)
    }

    /// Returns the driver.
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Returns the driver mutably.
    pub const fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consumes the mapper, returning the driver.
    #[must_use]
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Returns the dialect.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        &*self.dialect
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Collects the table mapping of `T`.
    pub fn mapping<T: Persistent>(&self) -> Result<TableMapping> {
        DeclarationCollector::new()
            .prefix_embedded(self.options.prefix_embedded)
            .collect(T::descriptor())
    }

    /// Renders a statement with this mapper's dialect and unit.
    pub fn compile(&self, node: &dyn Unparse) -> Result<(String, Vec<SqlValue>)> {
        Ok(compile(node, &*self.dialect, &self.options.unit)?)
    }

    /// Creates the tables of `T`: referenced tables, then the main table,
    /// then dependent tables.
    pub fn create_tables<T: Persistent>(&mut self) -> Result<()> {
        let mapping = self.mapping::<T>()?;
        let statements = mapping
            .column_declarations()
            .create_statements()
            .iter()
            .map(|statement| self.compile(statement).map(|(sql, _)| sql))
            .collect::<Result<Vec<_>>>()?;
        self.transaction(|driver| {
            for sql in &statements {
                debug!(sql = %sql, "Executing SQL");
                driver.execute(sql, &[])?;
            }
            Ok(())
        })
    }

    /// Inserts `object` with its referenced objects and collections.
    ///
    /// Referenced objects whose key is already stored are not inserted
    /// again; the stored row is kept as is.
    pub fn insert<T: Persistent>(&mut self, object: &T) -> Result<()> {
        let mapping = self.mapping::<T>()?;
        let mut ordered = OrderedInsertStatements::new(&mapping.insert_declaration());
        let templates = ordered
            .statements()
            .iter()
            .map(|statement| self.compile(statement).map(|(sql, _)| sql))
            .collect::<Result<Vec<_>>>()?;
        let steps = insert_steps(&mapping, object.to_value())?;

        let mut planned = Vec::new();
        for (index, step) in iter::from_fn(|| ordered.next_index()).zip(steps) {
            let Some(sql) = templates.get(index).map(String::as_str) else {
                continue;
            };
            let referenced =
                step.mapping.kind() == MappingKind::Object && !ptr::eq(step.mapping, &mapping);
            for row in &step.rows {
                let mut params = ParameterList::new();
                step.mapping.converter().collect_values(row, &mut params)?;
                let existing = if referenced {
                    let key = step.mapping.key_values(row)?;
                    Some(self.compile(&step.mapping.lookup(&key)?)?)
                } else {
                    None
                };
                planned.push(PlannedRow {
                    sql,
                    params: params.into_values(),
                    existing,
                });
            }
        }

        self.transaction(|driver| {
            for row in &planned {
                if let Some((lookup, key)) = &row.existing {
                    let mut cursor = driver.query(lookup, key)?;
                    if cursor.move_to_first_row()? {
                        trace!(sql = %lookup, "Referenced row already stored");
                        continue;
                    }
                }
                debug!(sql = %row.sql, params = row.params.len(), "Executing SQL");
                driver.execute(row.sql, &row.params)?;
            }
            Ok(())
        })
    }

    /// Loads every stored `T`, with its referenced objects and collections.
    pub fn select_all<T: Persistent>(&mut self) -> Result<Vec<T>> {
        let mapping = self.mapping::<T>()?;
        let select = Select::from(mapping.select_declaration().select());
        let mut rows = self.query_rows(&mapping, &select)?;
        for row in &mut rows {
            self.resolve(&mapping, row)?;
        }
        rows.into_iter().map(T::from_value).collect()
    }

    fn query_rows(&mut self, mapping: &TableMapping, select: &Select) -> Result<Vec<Value>> {
        let (sql, params) = self.compile(select)?;
        debug!(sql = %sql, params = params.len(), "Executing query");
        let mut cursor = self.driver.query(&sql, &params)?;
        let mut rows = Vec::new();
        let mut more = cursor.move_to_first_row()?;
        while more {
            rows.push(mapping.converter().recover(&mut *cursor)?);
            more = cursor.move_to_next_row()?;
        }
        Ok(rows)
    }

    /// Loads the referenced objects and collections of a recovered row.
    fn resolve(&mut self, mapping: &TableMapping, row: &mut Value) -> Result<()> {
        for link in mapping.referenced() {
            let Some(slot) = mapping
                .row_value_mut(row)
                .and_then(|value| value.at_mut(&link.path))
            else {
                continue;
            };
            if let Value::Reference(key) = slot {
                let key = key.clone();
                *slot = self.load_referenced(&link.mapping, key)?;
            }
        }

        for link in mapping.dependent() {
            if mapping
                .row_value(row)
                .and_then(|value| value.at(&link.path))
                .is_none()
            {
                continue;
            }
            let key = mapping.key_values(row)?;
            let select = link.mapping.lookup(&key)?;
            let mut children = self.query_rows(&link.mapping, &select)?;
            for child in &mut children {
                self.resolve(&link.mapping, child)?;
            }
            let elements = CollectionConverter::into_elements(children)?;
            if let Some(slot) = mapping
                .row_value_mut(row)
                .and_then(|value| value.at_mut(&link.path))
            {
                *slot = Value::List(elements);
            }
        }
        Ok(())
    }

    fn load_referenced(&mut self, mapping: &TableMapping, key: SqlValue) -> Result<Value> {
        let select = mapping.lookup(&[key])?;
        let (sql, params) = self.compile(&select)?;
        debug!(sql = %sql, "Loading referenced row");
        let mut cursor = self.driver.query(&sql, &params)?;
        let mut value = SingleRowConverter::new(mapping.converter())
            .recover_nullable(&mut *cursor)?
            .ok_or_else(|| OrmError::NotFound {
                table: mapping.table().name().to_string(),
            })?;
        self.resolve(mapping, &mut value)?;
        Ok(value)
    }

    fn transaction<R>(&mut self, work: impl FnOnce(&mut D) -> Result<R>) -> Result<R> {
        self.driver.begin()?;
        match work(&mut self.driver) {
            Ok(result) => {
                self.driver.commit()?;
                Ok(result)
            }
            Err(err) => {
                if let Err(rollback) = self.driver.rollback() {
                    warn!(error = %rollback, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}
