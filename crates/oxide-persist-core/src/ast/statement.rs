//! SQL statement AST types.

use super::expression::{BooleanExpr, Expr};
use super::identifier::{ColumnRef, TableName};
use super::types::{ColumnDeclaration, TableConstraint};

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The type of join.
    pub join_type: JoinType,
    /// The joined table.
    pub table: TableName,
    /// The join condition. Ignored for CROSS joins.
    pub on: Option<BooleanExpr>,
}

/// Compound select operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundOp {
    /// UNION.
    Union,
    /// INTERSECT.
    Intersect,
    /// EXCEPT.
    Except,
}

impl CompoundOp {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// An item in the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `*`
    All,
    /// A column of any type.
    Column(ColumnRef),
    /// A computed expression with an optional alias.
    Expr {
        /// The expression.
        expr: Expr,
        /// Column alias.
        alias: Option<String>,
    },
}

/// A single SELECT ... FROM ... block.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSelect {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The selected items. Empty renders `*`.
    pub columns: Vec<SelectItem>,
    /// The FROM table.
    pub from: TableName,
    /// JOIN clauses, in order.
    pub joins: Vec<Join>,
    /// The WHERE clause.
    pub where_clause: Option<BooleanExpr>,
    /// GROUP BY columns.
    pub group_by: Vec<ColumnRef>,
}

impl SimpleSelect {
    /// Creates a `SELECT * FROM table`.
    #[must_use]
    pub fn new(from: TableName) -> Self {
        Self {
            distinct: false,
            columns: Vec::new(),
            from,
            joins: Vec::new(),
            where_clause: None,
            group_by: Vec::new(),
        }
    }

    /// Selects the given columns.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnRef>) -> Self {
        self.columns.extend(columns.into_iter().map(SelectItem::Column));
        self
    }

    /// Sets the WHERE clause.
    #[must_use]
    pub fn where_clause(mut self, condition: BooleanExpr) -> Self {
        self.where_clause = Some(condition);
        self
    }

    /// Adds a join.
    #[must_use]
    pub fn join(mut self, join_type: JoinType, table: TableName, on: Option<BooleanExpr>) -> Self {
        self.joins.push(Join {
            join_type,
            table,
            on,
        });
        self
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Select {
    /// A single select block.
    Simple(SimpleSelect),
    /// Two selects combined with a set operator.
    Compound {
        /// The set operator.
        op: CompoundOp,
        /// Left select.
        left: Box<Select>,
        /// Right select.
        right: Box<Select>,
    },
    /// A select with ORDER BY and LIMIT applied.
    Ordered {
        /// The ordered select.
        select: Box<Select>,
        /// ORDER BY entries.
        order_by: Vec<OrderBy>,
        /// LIMIT.
        limit: Option<u64>,
    },
}

impl Select {
    /// Combines two selects.
    #[must_use]
    pub fn compound(self, op: CompoundOp, right: Self) -> Self {
        Self::Compound {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Orders this select.
    #[must_use]
    pub fn order_by(self, order_by: Vec<OrderBy>, limit: Option<u64>) -> Self {
        Self::Ordered {
            select: Box::new(self),
            order_by,
            limit,
        }
    }
}

impl From<SimpleSelect> for Select {
    fn from(select: SimpleSelect) -> Self {
        Self::Simple(select)
    }
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// One `?` per column, bound later row by row.
    Template,
    /// Explicit value expressions, one per column.
    Values(Vec<Expr>),
    /// INSERT ... SELECT.
    Select(Box<Select>),
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Target table.
    pub table: TableName,
    /// Column names. Must not be empty.
    pub columns: Vec<String>,
    /// Values to insert.
    pub source: InsertSource,
}

impl Insert {
    /// Creates an INSERT template with one placeholder per column.
    #[must_use]
    pub fn template(table: TableName, columns: Vec<String>) -> Self {
        Self {
            table,
            columns,
            source: InsertSource::Template,
        }
    }
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column name.
    pub column: String,
    /// Value expression.
    pub value: Expr,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Target table.
    pub table: TableName,
    /// SET assignments. Must not be empty.
    pub assignments: Vec<Assignment>,
    /// WHERE clause.
    pub where_clause: Option<BooleanExpr>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Target table.
    pub table: TableName,
    /// WHERE clause.
    pub where_clause: Option<BooleanExpr>,
}

/// A CREATE TABLE IF NOT EXISTS statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Table name.
    pub name: TableName,
    /// Column declarations, in order. Must not be empty.
    pub columns: Vec<ColumnDeclaration>,
    /// Table-level constraints, rendered after the columns.
    pub constraints: Vec<TableConstraint>,
}

impl CreateTable {
    /// Creates a table statement without table-level constraints.
    #[must_use]
    pub const fn new(name: TableName, columns: Vec<ColumnDeclaration>) -> Self {
        Self {
            name,
            columns,
            constraints: Vec::new(),
        }
    }
}

/// A CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndex {
    /// Index name.
    pub name: String,
    /// Indexed table.
    pub table: TableName,
    /// Indexed columns.
    pub columns: Vec<String>,
    /// Whether this is a UNIQUE index.
    pub unique: bool,
}

/// A DROP TABLE IF EXISTS statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTable {
    /// Table name.
    pub name: TableName,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(Select),
    /// INSERT statement.
    Insert(Insert),
    /// UPDATE statement.
    Update(Update),
    /// DELETE statement.
    Delete(Delete),
    /// CREATE TABLE statement.
    CreateTable(CreateTable),
    /// CREATE INDEX statement.
    CreateIndex(CreateIndex),
    /// DROP TABLE statement.
    DropTable(DropTable),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction() {
        assert_eq!(OrderDirection::Asc.as_str(), "ASC");
        assert_eq!(OrderDirection::Desc.as_str(), "DESC");
        assert_eq!(OrderDirection::default(), OrderDirection::Asc);
    }

    #[test]
    fn test_join_type() {
        assert_eq!(JoinType::Inner.as_str(), "INNER JOIN");
        assert_eq!(JoinType::Cross.as_str(), "CROSS JOIN");
    }

    #[test]
    fn test_simple_select_builder() {
        let select = SimpleSelect::new(TableName::new("users"))
            .columns([ColumnRef::new("id"), ColumnRef::new("name")]);
        assert_eq!(select.columns.len(), 2);
        assert!(select.where_clause.is_none());
    }
}
