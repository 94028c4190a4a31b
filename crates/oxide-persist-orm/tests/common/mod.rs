#![allow(dead_code)]

use std::collections::BTreeMap;

use oxide_persist_core::{GenericDialect, PersistError, RowCursor, SelectionResult, SqlValue};
use oxide_persist_orm::{Driver, Mapper, MapperOptions, Persistent};

/// An in-memory table: column names and rows in column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

/// A driver interpreting the statements the generic dialect renders for
/// mapped types.
#[derive(Debug, Default)]
pub struct MemoryDriver {
    pub tables: BTreeMap<String, MemoryTable>,
    pub log: Vec<String>,
    pub bound: Vec<Vec<SqlValue>>,
    /// Statements containing this text fail.
    pub fail_on: Option<String>,
    snapshot: Option<BTreeMap<String, MemoryTable>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(text: &str) -> Self {
        Self {
            fail_on: Some(String::from(text)),
            ..Self::default()
        }
    }

    pub fn statements(&self, prefix: &str) -> Vec<&str> {
        self.log
            .iter()
            .filter(|sql| sql.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    pub fn rows(&self, table: &str) -> &[Vec<SqlValue>] {
        self.tables.get(table).map_or(&[], |t| t.rows.as_slice())
    }
}

fn between<'a>(sql: &'a str, start: &str, end: &str) -> Option<&'a str> {
    let from = sql.find(start)? + start.len();
    let to = sql[from..].find(end)? + from;
    Some(&sql[from..to])
}

fn unqualified(name: &str) -> &str {
    let name = name.trim();
    name.rsplit('.').next().unwrap_or(name)
}

fn split_list(list: &str) -> Vec<String> {
    list.split(", ").map(|item| unqualified(item).to_string()).collect()
}

/// Column names of a CREATE TABLE, table constraints skipped.
fn declared_columns(sql: &str) -> Option<Vec<String>> {
    let body = &sql[sql.find('(')? + 1..sql.rfind(')')?];
    let mut items = Vec::new();
    let mut depth = 0;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                items.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    items.push(&body[start..]);
    Some(
        items
            .into_iter()
            .map(str::trim)
            .filter(|item| {
                !["PRIMARY KEY", "UNIQUE", "FOREIGN KEY", "CHECK"]
                    .iter()
                    .any(|keyword| item.starts_with(keyword))
            })
            .filter_map(|item| item.split_whitespace().next().map(String::from))
            .collect(),
    )
}

fn unsupported(sql: &str) -> PersistError {
    PersistError::driver(format!("unsupported statement: {sql}"))
}

impl Driver for MemoryDriver {
    fn begin(&mut self) -> oxide_persist_core::Result<()> {
        self.log.push(String::from("BEGIN"));
        self.snapshot = Some(self.tables.clone());
        Ok(())
    }

    fn commit(&mut self) -> oxide_persist_core::Result<()> {
        self.log.push(String::from("COMMIT"));
        self.snapshot = None;
        Ok(())
    }

    fn rollback(&mut self) -> oxide_persist_core::Result<()> {
        self.log.push(String::from("ROLLBACK"));
        if let Some(tables) = self.snapshot.take() {
            self.tables = tables;
        }
        Ok(())
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> oxide_persist_core::Result<u64> {
        self.log.push(String::from(sql));
        self.bound.push(params.to_vec());
        if let Some(text) = &self.fail_on {
            if sql.contains(text.as_str()) {
                return Err(PersistError::driver(format!("rejected: {sql}")));
            }
        }

        if let Some(name) = between(sql, "CREATE TABLE IF NOT EXISTS ", "(") {
            let columns = declared_columns(sql).ok_or_else(|| unsupported(sql))?;
            self.tables.entry(String::from(name)).or_insert(MemoryTable {
                columns,
                rows: Vec::new(),
            });
            return Ok(0);
        }

        let name = between(sql, "INSERT INTO ", "(").ok_or_else(|| unsupported(sql))?;
        let columns = split_list(between(sql, "(", ")").ok_or_else(|| unsupported(sql))?);
        let placeholders = sql.matches('?').count();
        if placeholders != params.len() || placeholders != columns.len() {
            return Err(PersistError::driver(format!(
                "{placeholders} placeholders, {} values, {} columns",
                params.len(),
                columns.len()
            )));
        }
        let table = self.tables.get_mut(name).ok_or_else(|| unsupported(sql))?;
        if table.columns != columns {
            return Err(PersistError::driver(format!("column mismatch in {sql}")));
        }
        table.rows.push(params.to_vec());
        Ok(1)
    }

    fn query(
        &mut self,
        sql: &str,
        params: &[SqlValue],
    ) -> oxide_persist_core::Result<Box<dyn SelectionResult>> {
        self.log.push(String::from(sql));
        self.bound.push(params.to_vec());

        let selected =
            split_list(between(sql, "SELECT ", " FROM ").ok_or_else(|| unsupported(sql))?);
        let (_, rest) = sql.split_once(" FROM ").ok_or_else(|| unsupported(sql))?;
        let (name, rest) = rest.split_once(' ').unwrap_or((rest, ""));
        let (filter, order) = match rest.split_once("ORDER BY ") {
            Some((filter, order)) => (filter, Some(order)),
            None => (rest, None),
        };

        let table = self.tables.get(name).cloned().unwrap_or_default();
        let position = |column: &str| {
            table
                .columns
                .iter()
                .position(|c| c == column)
                .ok_or_else(|| PersistError::driver(format!("no column {column} in {name}")))
        };

        let mut conditions = Vec::new();
        if let Some(filter) = filter.trim().strip_prefix("WHERE ") {
            for (test, value) in filter.split(" AND ").zip(params) {
                let column = unqualified(test.trim_end_matches(" = ?"));
                conditions.push((position(column)?, value.clone()));
            }
        }
        let mut rows: Vec<Vec<SqlValue>> = table
            .rows
            .iter()
            .filter(|row| conditions.iter().all(|(i, value)| row.get(*i) == Some(value)))
            .cloned()
            .collect();
        if let Some(order) = order {
            let column = position(unqualified(order.trim_end_matches(" ASC")))?;
            rows.sort_by_key(|row| match row.get(column) {
                Some(SqlValue::Int32(n)) => *n,
                _ => 0,
            });
        }

        let indices = selected
            .iter()
            .map(|column| position(column))
            .collect::<oxide_persist_core::Result<Vec<_>>>()?;
        let projected = rows
            .into_iter()
            .map(|row| indices.iter().map(|i| row[*i].clone()).collect())
            .collect();
        Ok(Box::new(RowCursor::new(projected)))
    }
}

pub fn mapper() -> Mapper<MemoryDriver> {
    mapper_with(MemoryDriver::new(), MapperOptions::default())
}

pub fn mapper_with(driver: MemoryDriver, options: MapperOptions) -> Mapper<MemoryDriver> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    Mapper::new(driver, Box::new(GenericDialect::new()), options)
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(String::from(s))
}

#[derive(Debug, Clone, PartialEq, Persistent)]
#[persistent(table = "Users")]
pub struct User {
    #[persist(primary_key)]
    pub id: i32,
    #[persist(max_length = 64)]
    pub name: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Persistent)]
pub struct Address {
    #[persist(max_length = 128)]
    pub street: String,
    #[persist(max_length = 64)]
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Persistent)]
#[persistent(table = "Countries")]
pub struct Country {
    #[persist(primary_key, max_length = 64)]
    pub code: String,
    #[persist(max_length = 64)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Persistent)]
pub struct Line {
    #[persist(max_length = 64)]
    pub sku: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Persistent)]
#[persistent(table = "Customers")]
pub struct Customer {
    #[persist(primary_key)]
    pub id: i64,
    #[persist(embed)]
    pub address: Address,
    #[persist(references)]
    pub country: Country,
    #[persist(references)]
    pub shipping: Option<Country>,
    #[persist(max_length = 64)]
    pub tags: Vec<String>,
    pub lines: Vec<Line>,
}

pub fn france() -> Country {
    Country {
        code: String::from("FR"),
        name: String::from("France"),
    }
}

pub fn customer() -> Customer {
    Customer {
        id: 7,
        address: Address {
            street: String::from("1 rue de la Paix"),
            city: String::from("Paris"),
        },
        country: france(),
        shipping: Some(france()),
        tags: vec![String::from("vip"), String::from("early")],
        lines: vec![
            Line {
                sku: String::from("A-1"),
                quantity: 2,
            },
            Line {
                sku: String::from("B-2"),
                quantity: 1,
            },
        ],
    }
}
