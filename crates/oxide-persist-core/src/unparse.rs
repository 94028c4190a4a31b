//! Rendering AST nodes to SQL text.
//!
//! Every node implements [`Unparse`]: `unparse` appends the node's SQL to a
//! buffer, and `store_values` hands each bound parameter to a
//! [`ValueCollector`]. Both walk children in the same left-to-right order,
//! so the n-th value stored binds the n-th `?` in the text. Literals render
//! inline and store nothing.
//!
//! This is the only module that builds SQL strings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::{
    BooleanBinaryOp, BooleanExpr, ColumnDeclaration, ColumnRef, CreateIndex, CreateTable, Delete, DropTable, Expr,
    Insert, InsertSource, Join, JoinType, Number, NumberExpr, Reference, Select, SelectItem,
    SimpleSelect, Statement, StringExpr, TableConstraint, TableName, Update,
};
use crate::collect::{ParameterList, ValueCollector};
use crate::dialect::{Dialect, write_identifier};
use crate::error::{PersistError, Result};
use crate::value::{SqlValue, quote_text};

/// The rendering context: the schema unqualified tables belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Unit {
    /// Schema applied to unqualified table names.
    pub schema: Option<String>,
}

impl Unit {
    /// Creates a unit without a schema.
    #[must_use]
    pub const fn new() -> Self {
        Self { schema: None }
    }

    /// Creates a unit placing unqualified tables in `schema`.
    #[must_use]
    pub fn with_schema(schema: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
        }
    }
}

/// A node that renders to SQL and enumerates its bound values.
pub trait Unparse {
    /// Appends the SQL text of this node to `out`.
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()>;

    /// Passes every bound value of this node to `collector`, in text order.
    fn store_values(&self, _collector: &mut dyn ValueCollector) -> Result<()> {
        Ok(())
    }
}

/// Renders `node` and collects its parameters.
///
/// Returns the SQL text and the values for its `?` placeholders, in order.
pub fn compile(
    node: &dyn Unparse,
    dialect: &dyn Dialect,
    unit: &Unit,
) -> Result<(String, Vec<SqlValue>)> {
    let mut sql = String::new();
    node.unparse(dialect, unit, &mut sql)?;
    let mut params = ParameterList::new();
    node.store_values(&mut params)?;
    debug!(
        dialect = dialect.name(),
        sql = %sql,
        params = params.len(),
        "Compiled statement"
    );
    Ok((sql, params.into_values()))
}

fn write_list<T>(
    items: &[T],
    out: &mut String,
    mut write: impl FnMut(&T, &mut String) -> Result<()>,
) -> Result<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write(item, out)?;
    }
    Ok(())
}

fn write_identifiers(dialect: &dyn Dialect, names: &[String], out: &mut String) -> Result<()> {
    write_list(names, out, |name, out| write_identifier(dialect, name, out))
}

fn write_parenthesized(
    node: &dyn Unparse,
    dialect: &dyn Dialect,
    unit: &Unit,
    out: &mut String,
) -> Result<()> {
    out.push('(');
    node.unparse(dialect, unit, out)?;
    out.push(')');
    Ok(())
}

impl Unparse for TableName {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        if let Some(schema) = self.schema.as_ref().or(unit.schema.as_ref()) {
            write_identifier(dialect, schema, out)?;
            out.push('.');
        }
        write_identifier(dialect, &self.name, out)
    }
}

impl Unparse for ColumnRef {
    fn unparse(&self, dialect: &dyn Dialect, _unit: &Unit, out: &mut String) -> Result<()> {
        if let Some(table) = &self.table {
            write_identifier(dialect, table, out)?;
            out.push('.');
        }
        write_identifier(dialect, &self.name, out)
    }
}

impl Unparse for Expr {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        match self {
            Self::Boolean(e) => e.unparse(dialect, unit, out),
            Self::Number(e) => e.unparse(dialect, unit, out),
            Self::String(e) => e.unparse(dialect, unit, out),
        }
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        match self {
            Self::Boolean(e) => e.store_values(collector),
            Self::Number(e) => e.store_values(collector),
            Self::String(e) => e.store_values(collector),
        }
    }
}

impl Unparse for BooleanExpr {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        match self {
            Self::Literal(b) => out.push_str(dialect.boolean_literal(*b)),
            Self::Parameter(_) => out.push('?'),
            Self::Column(c) => c.unparse(dialect, unit, out)?,
            Self::Unary { op, operand } => {
                out.push_str(op.as_str());
                out.push(' ');
                write_parenthesized(&**operand, dialect, unit, out)?;
            }
            Self::Binary { op, left, right } => {
                write_boolean_operand(*op, left, dialect, unit, out)?;
                out.push(' ');
                out.push_str(dialect.boolean_operator(*op));
                out.push(' ');
                write_boolean_operand(*op, right, dialect, unit, out)?;
            }
            Self::Comparison { op, left, right } => {
                write_operand(left, dialect, unit, out)?;
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                write_operand(right, dialect, unit, out)?;
            }
            Self::InRange { expr, low, high } => {
                write_parenthesized(&**expr, dialect, unit, out)?;
                out.push_str(" BETWEEN ");
                low.unparse(dialect, unit, out)?;
                out.push_str(" AND ");
                high.unparse(dialect, unit, out)?;
            }
            Self::InSelection { expr, selection } => {
                write_parenthesized(&**expr, dialect, unit, out)?;
                out.push_str(" IN ");
                write_parenthesized(&**selection, dialect, unit, out)?;
            }
            Self::IsNull { expr, negated } => {
                write_parenthesized(&**expr, dialect, unit, out)?;
                out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
        }
        Ok(())
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        match self {
            Self::Literal(_) | Self::Column(_) => Ok(()),
            Self::Parameter(b) => collector.set_bool(*b),
            Self::Unary { operand, .. } => operand.store_values(collector),
            Self::Binary { left, right, .. } => {
                left.store_values(collector)?;
                right.store_values(collector)
            }
            Self::Comparison { left, right, .. } => {
                left.store_values(collector)?;
                right.store_values(collector)
            }
            Self::InRange { expr, low, high } => {
                expr.store_values(collector)?;
                low.store_values(collector)?;
                high.store_values(collector)
            }
            Self::InSelection { expr, selection } => {
                expr.store_values(collector)?;
                selection.store_values(collector)
            }
            Self::IsNull { expr, .. } => expr.store_values(collector),
        }
    }
}

fn write_boolean_operand(
    op: BooleanBinaryOp,
    expr: &BooleanExpr,
    dialect: &dyn Dialect,
    unit: &Unit,
    out: &mut String,
) -> Result<()> {
    // AND and OR bind looser than every predicate, the other operators do not.
    let wrap = match op {
        BooleanBinaryOp::And | BooleanBinaryOp::Or => matches!(expr, BooleanExpr::Binary { .. }),
        BooleanBinaryOp::Xor | BooleanBinaryOp::Equal | BooleanBinaryOp::Unequal => {
            !expr.is_atomic()
        }
    };
    if wrap {
        write_parenthesized(expr, dialect, unit, out)
    } else {
        expr.unparse(dialect, unit, out)
    }
}

fn write_operand(expr: &Expr, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
    if matches!(expr, Expr::Boolean(b) if !b.is_atomic()) {
        write_parenthesized(expr, dialect, unit, out)
    } else {
        expr.unparse(dialect, unit, out)
    }
}

impl BooleanExpr {
    const fn is_atomic(&self) -> bool {
        matches!(self, Self::Literal(_) | Self::Parameter(_) | Self::Column(_))
    }
}

fn write_number(number: &Number, out: &mut String) -> Result<()> {
    match number {
        Number::Int8(n) => out.push_str(&n.to_string()),
        Number::Int16(n) => out.push_str(&n.to_string()),
        Number::Int32(n) => out.push_str(&n.to_string()),
        Number::Int64(n) => out.push_str(&n.to_string()),
        Number::BigInteger(n) => out.push_str(n.as_str()),
        Number::Float32(f) => {
            check_finite(f.is_finite(), f)?;
            out.push_str(&f.to_string());
        }
        Number::Float64(f) => {
            check_finite(f.is_finite(), f)?;
            out.push_str(&f.to_string());
        }
    }
    Ok(())
}

/// SQL has no literal spelling for NaN or the infinities.
fn check_finite(is_finite: bool, f: &dyn std::fmt::Display) -> Result<()> {
    if is_finite {
        Ok(())
    } else {
        Err(PersistError::Unsupported(format!(
            "non-finite literal {f}, bind it as a parameter"
        )))
    }
}

fn store_number(number: &Number, collector: &mut dyn ValueCollector) -> Result<()> {
    match number {
        Number::Int8(n) => collector.set_i8(*n),
        Number::Int16(n) => collector.set_i16(*n),
        Number::Int32(n) => collector.set_i32(*n),
        Number::Int64(n) => collector.set_i64(*n),
        Number::BigInteger(n) => collector.set_big_integer(n),
        Number::Float32(f) => collector.set_f32(*f),
        Number::Float64(f) => collector.set_f64(*f),
    }
}

impl Unparse for NumberExpr {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        match self {
            Self::Literal(n) => write_number(n, out)?,
            Self::Parameter(_) => out.push('?'),
            Self::Column(c) => c.unparse(dialect, unit, out)?,
            Self::Unary { op, operand } => {
                out.push_str(op.as_str());
                write_parenthesized(&**operand, dialect, unit, out)?;
            }
            Self::Binary { op, left, right } => {
                write_number_operand(left, dialect, unit, out)?;
                out.push(' ');
                out.push_str(dialect.number_operator(*op));
                out.push(' ');
                write_number_operand(right, dialect, unit, out)?;
            }
            Self::Variadic { op, operands } => {
                out.push_str(dialect.variadic_function(*op));
                out.push('(');
                write_list(operands, out, |operand, out| {
                    operand.unparse(dialect, unit, out)
                })?;
                out.push(')');
            }
        }
        Ok(())
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        match self {
            Self::Literal(_) | Self::Column(_) => Ok(()),
            Self::Parameter(n) => store_number(n, collector),
            Self::Unary { operand, .. } => operand.store_values(collector),
            Self::Binary { left, right, .. } => {
                left.store_values(collector)?;
                right.store_values(collector)
            }
            Self::Variadic { operands, .. } => operands
                .iter()
                .try_for_each(|operand| operand.store_values(collector)),
        }
    }
}

fn write_number_operand(
    expr: &NumberExpr,
    dialect: &dyn Dialect,
    unit: &Unit,
    out: &mut String,
) -> Result<()> {
    if matches!(expr, NumberExpr::Binary { .. }) {
        write_parenthesized(expr, dialect, unit, out)
    } else {
        expr.unparse(dialect, unit, out)
    }
}

impl Unparse for StringExpr {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        match self {
            Self::Literal(s) => out.push_str(&quote_text(s)),
            Self::Parameter(_) => out.push('?'),
            Self::Column(c) => c.unparse(dialect, unit, out)?,
        }
        Ok(())
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        match self {
            Self::Parameter(s) => collector.set_string(s),
            Self::Literal(_) | Self::Column(_) => Ok(()),
        }
    }
}

fn write_reference(
    reference: &Reference,
    dialect: &dyn Dialect,
    unit: &Unit,
    out: &mut String,
) -> Result<()> {
    if reference.columns.is_empty() {
        return Err(PersistError::EmptyReference {
            table: reference.table.to_string(),
        });
    }
    out.push_str("REFERENCES ");
    reference.table.unparse(dialect, unit, out)?;
    out.push_str(" (");
    write_identifiers(dialect, &reference.columns, out)?;
    out.push(')');
    if let Some(action) = reference.on_delete {
        out.push_str(" ON DELETE ");
        out.push_str(action.as_sql());
    }
    if let Some(action) = reference.on_update {
        out.push_str(" ON UPDATE ");
        out.push_str(action.as_sql());
    }
    Ok(())
}

impl Unparse for ColumnDeclaration {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        write_identifier(dialect, &self.name, out)?;
        out.push(' ');
        out.push_str(dialect.column_type(self)?);
        if self.not_null {
            out.push_str(" NOT NULL");
        }
        if self.primary_key {
            out.push(' ');
            out.push_str(dialect.primary_key_keyword());
        }
        if self.auto_increment {
            if let Some(keyword) = dialect.autoincrement_keyword() {
                out.push(' ');
                out.push_str(keyword);
            }
        }
        if self.unique {
            out.push_str(" UNIQUE");
        }
        if let Some(check) = &self.check {
            out.push_str(" CHECK");
            write_parenthesized(check, dialect, unit, out)?;
        }
        if let Some(default) = &self.default {
            out.push_str(" DEFAULT");
            write_parenthesized(default, dialect, unit, out)?;
        }
        if let Some(reference) = &self.reference {
            if reference.columns.len() > 1 {
                return Err(PersistError::ReferenceColumnCount {
                    table: reference.table.to_string(),
                    expected: reference.columns.len(),
                    actual: 1,
                });
            }
            out.push(' ');
            write_reference(reference, dialect, unit, out)?;
        }
        Ok(())
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        if let Some(check) = &self.check {
            check.store_values(collector)?;
        }
        if let Some(default) = &self.default {
            default.store_values(collector)?;
        }
        Ok(())
    }
}

impl Unparse for TableConstraint {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        match self {
            Self::PrimaryKey(columns) => {
                out.push_str(dialect.primary_key_keyword());
                out.push('(');
                write_identifiers(dialect, columns, out)?;
                out.push(')');
            }
            Self::Unique(columns) => {
                out.push_str("UNIQUE(");
                write_identifiers(dialect, columns, out)?;
                out.push(')');
            }
            Self::ForeignKey { columns, reference } => {
                if !reference.columns.is_empty() && reference.columns.len() != columns.len() {
                    return Err(PersistError::ReferenceColumnCount {
                        table: reference.table.to_string(),
                        expected: reference.columns.len(),
                        actual: columns.len(),
                    });
                }
                out.push_str("FOREIGN KEY(");
                write_identifiers(dialect, columns, out)?;
                out.push_str(") ");
                write_reference(reference, dialect, unit, out)?;
            }
        }
        Ok(())
    }
}

impl Unparse for CreateTable {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        if self.columns.is_empty() {
            return Err(PersistError::NoColumns("CREATE TABLE"));
        }
        out.push_str("CREATE TABLE IF NOT EXISTS ");
        self.name.unparse(dialect, unit, out)?;
        out.push('(');
        write_list(&self.columns, out, |column, out| {
            column.unparse(dialect, unit, out)
        })?;
        for constraint in &self.constraints {
            out.push_str(", ");
            constraint.unparse(dialect, unit, out)?;
        }
        out.push(')');
        Ok(())
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        self.columns
            .iter()
            .try_for_each(|column| column.store_values(collector))
    }
}

impl Unparse for CreateIndex {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        if self.columns.is_empty() {
            return Err(PersistError::NoColumns("CREATE INDEX"));
        }
        out.push_str("CREATE ");
        if self.unique {
            out.push_str("UNIQUE ");
        }
        out.push_str("INDEX ");
        if dialect.supports_index_if_not_exists() {
            out.push_str("IF NOT EXISTS ");
        }
        write_identifier(dialect, &self.name, out)?;
        out.push_str(" ON ");
        self.table.unparse(dialect, unit, out)?;
        out.push('(');
        write_identifiers(dialect, &self.columns, out)?;
        out.push(')');
        Ok(())
    }
}

impl Unparse for DropTable {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        out.push_str("DROP TABLE IF EXISTS ");
        self.name.unparse(dialect, unit, out)
    }
}

impl Unparse for Insert {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        if self.columns.is_empty() {
            return Err(PersistError::NoColumns("INSERT"));
        }
        out.push_str("INSERT INTO ");
        self.table.unparse(dialect, unit, out)?;
        out.push('(');
        write_identifiers(dialect, &self.columns, out)?;
        out.push(')');
        match &self.source {
            InsertSource::Template => {
                out.push_str(" VALUES(");
                out.push_str(&vec!["?"; self.columns.len()].join(", "));
                out.push(')');
            }
            InsertSource::Values(values) => {
                if values.len() != self.columns.len() {
                    return Err(PersistError::ValueCount {
                        table: self.table.to_string(),
                        columns: self.columns.len(),
                        values: values.len(),
                    });
                }
                out.push_str(" VALUES(");
                write_list(values, out, |value, out| value.unparse(dialect, unit, out))?;
                out.push(')');
            }
            InsertSource::Select(select) => {
                out.push(' ');
                select.unparse(dialect, unit, out)?;
            }
        }
        Ok(())
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        match &self.source {
            InsertSource::Template => Ok(()),
            InsertSource::Values(values) => values
                .iter()
                .try_for_each(|value| value.store_values(collector)),
            InsertSource::Select(select) => select.store_values(collector),
        }
    }
}

impl Unparse for Update {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        if self.assignments.is_empty() {
            return Err(PersistError::NoColumns("UPDATE"));
        }
        out.push_str("UPDATE ");
        self.table.unparse(dialect, unit, out)?;
        out.push_str(" SET ");
        write_list(&self.assignments, out, |assignment, out| {
            write_identifier(dialect, &assignment.column, out)?;
            out.push_str(" = ");
            assignment.value.unparse(dialect, unit, out)
        })?;
        write_where(self.where_clause.as_ref(), dialect, unit, out)
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        for assignment in &self.assignments {
            assignment.value.store_values(collector)?;
        }
        store_where(self.where_clause.as_ref(), collector)
    }
}

impl Unparse for Delete {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        out.push_str("DELETE FROM ");
        self.table.unparse(dialect, unit, out)?;
        write_where(self.where_clause.as_ref(), dialect, unit, out)
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        store_where(self.where_clause.as_ref(), collector)
    }
}

fn write_where(
    condition: Option<&BooleanExpr>,
    dialect: &dyn Dialect,
    unit: &Unit,
    out: &mut String,
) -> Result<()> {
    if let Some(condition) = condition {
        out.push_str(" WHERE ");
        condition.unparse(dialect, unit, out)?;
    }
    Ok(())
}

fn store_where(condition: Option<&BooleanExpr>, collector: &mut dyn ValueCollector) -> Result<()> {
    condition.map_or(Ok(()), |c| c.store_values(collector))
}

impl Unparse for SelectItem {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        match self {
            Self::All => out.push('*'),
            Self::Column(c) => c.unparse(dialect, unit, out)?,
            Self::Expr { expr, alias } => {
                expr.unparse(dialect, unit, out)?;
                if let Some(alias) = alias {
                    out.push_str(" AS ");
                    write_identifier(dialect, alias, out)?;
                }
            }
        }
        Ok(())
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        match self {
            Self::Expr { expr, .. } => expr.store_values(collector),
            Self::All | Self::Column(_) => Ok(()),
        }
    }
}

impl Unparse for Join {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        out.push_str(self.join_type.as_str());
        out.push(' ');
        self.table.unparse(dialect, unit, out)?;
        if self.join_type != JoinType::Cross {
            if let Some(on) = &self.on {
                out.push_str(" ON ");
                on.unparse(dialect, unit, out)?;
            }
        }
        Ok(())
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        match (&self.on, self.join_type) {
            (Some(on), join_type) if join_type != JoinType::Cross => on.store_values(collector),
            _ => Ok(()),
        }
    }
}

impl Unparse for SimpleSelect {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        out.push_str("SELECT ");
        if self.distinct {
            out.push_str("DISTINCT ");
        }
        if self.columns.is_empty() {
            out.push('*');
        } else {
            write_list(&self.columns, out, |item, out| item.unparse(dialect, unit, out))?;
        }
        out.push_str(" FROM ");
        self.from.unparse(dialect, unit, out)?;
        for join in &self.joins {
            out.push(' ');
            join.unparse(dialect, unit, out)?;
        }
        write_where(self.where_clause.as_ref(), dialect, unit, out)?;
        if !self.group_by.is_empty() {
            out.push_str(" GROUP BY ");
            write_list(&self.group_by, out, |column, out| {
                column.unparse(dialect, unit, out)
            })?;
        }
        Ok(())
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        for item in &self.columns {
            item.store_values(collector)?;
        }
        for join in &self.joins {
            join.store_values(collector)?;
        }
        store_where(self.where_clause.as_ref(), collector)
    }
}

impl Unparse for Select {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        match self {
            Self::Simple(select) => select.unparse(dialect, unit, out),
            Self::Compound { op, left, right } => {
                left.unparse(dialect, unit, out)?;
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                right.unparse(dialect, unit, out)
            }
            Self::Ordered {
                select,
                order_by,
                limit,
            } => {
                select.unparse(dialect, unit, out)?;
                if !order_by.is_empty() {
                    out.push_str(" ORDER BY ");
                    write_list(order_by, out, |entry, out| {
                        entry.expr.unparse(dialect, unit, out)?;
                        out.push(' ');
                        out.push_str(entry.direction.as_str());
                        Ok(())
                    })?;
                }
                if let Some(limit) = limit {
                    out.push_str(" LIMIT ");
                    out.push_str(&limit.to_string());
                }
                Ok(())
            }
        }
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        match self {
            Self::Simple(select) => select.store_values(collector),
            Self::Compound { left, right, .. } => {
                left.store_values(collector)?;
                right.store_values(collector)
            }
            Self::Ordered {
                select, order_by, ..
            } => {
                select.store_values(collector)?;
                order_by
                    .iter()
                    .try_for_each(|entry| entry.expr.store_values(collector))
            }
        }
    }
}

impl Unparse for Statement {
    fn unparse(&self, dialect: &dyn Dialect, unit: &Unit, out: &mut String) -> Result<()> {
        match self {
            Self::Select(s) => s.unparse(dialect, unit, out),
            Self::Insert(s) => s.unparse(dialect, unit, out),
            Self::Update(s) => s.unparse(dialect, unit, out),
            Self::Delete(s) => s.unparse(dialect, unit, out),
            Self::CreateTable(s) => s.unparse(dialect, unit, out),
            Self::CreateIndex(s) => s.unparse(dialect, unit, out),
            Self::DropTable(s) => s.unparse(dialect, unit, out),
        }
    }

    fn store_values(&self, collector: &mut dyn ValueCollector) -> Result<()> {
        match self {
            Self::Select(s) => s.store_values(collector),
            Self::Insert(s) => s.store_values(collector),
            Self::Update(s) => s.store_values(collector),
            Self::Delete(s) => s.store_values(collector),
            Self::CreateTable(s) => s.store_values(collector),
            Self::CreateIndex(_) | Self::DropTable(_) => Ok(()),
        }
    }
}
