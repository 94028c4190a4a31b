//! Abstract Syntax Tree (AST) types for SQL statements.

mod expression;
mod identifier;
mod operator;
mod statement;
mod types;

pub use expression::{BooleanExpr, Expr, Number, NumberExpr, StringExpr};
pub use identifier::{ColumnRef, TableName};
pub use operator::{
    BooleanBinaryOp, BooleanUnaryOp, ComparisonOp, NumberBinaryOp, NumberUnaryOp,
    NumberVariadicOp,
};
pub use statement::{
    Assignment, CompoundOp, CreateIndex, CreateTable, Delete, DropTable, Insert, InsertSource,
    Join, JoinType, OrderBy, OrderDirection, Select, SelectItem, SimpleSelect, Statement, Update,
};
pub use types::{
    ColumnDeclaration, Reference, ReferentialAction, SemanticType, TableConstraint,
};
