//! Expression AST types.
//!
//! Expressions are typed trees: a [`BooleanExpr`] yields a truth value, a
//! [`NumberExpr`] a number and a [`StringExpr`] a string. [`Expr`] wraps any
//! of them where a position accepts all three. Children are owned by value.
//!
//! Literals render inline and never reach the parameter list. Values that
//! must be bound go through the `Parameter` variants, which render `?`.

use super::identifier::ColumnRef;
use super::operator::{
    BooleanBinaryOp, BooleanUnaryOp, ComparisonOp, NumberBinaryOp, NumberUnaryOp,
    NumberVariadicOp,
};
use super::statement::Select;
use super::types::SemanticType;
use crate::error::{PersistError, Result};
use crate::value::{BigInteger, SqlValue};

/// A numeric value.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// 8-bit integer.
    Int8(i8),
    /// 16-bit integer.
    Int16(i16),
    /// 32-bit integer.
    Int32(i32),
    /// 64-bit integer.
    Int64(i64),
    /// Arbitrary-precision integer.
    BigInteger(BigInteger),
    /// Single precision float.
    Float32(f32),
    /// Double precision float.
    Float64(f64),
}

impl Number {
    /// Returns the semantic type of this number.
    #[must_use]
    pub const fn semantic_type(&self) -> SemanticType {
        match self {
            Self::Int8(_) => SemanticType::Int8,
            Self::Int16(_) => SemanticType::Int16,
            Self::Int32(_) => SemanticType::Int32,
            Self::Int64(_) => SemanticType::Int64,
            Self::BigInteger(_) => SemanticType::BigInteger,
            Self::Float32(_) => SemanticType::Float32,
            Self::Float64(_) => SemanticType::Float64,
        }
    }

    /// Converts to the equivalent `SqlValue`.
    #[must_use]
    pub fn to_sql_value(&self) -> SqlValue {
        match self {
            Self::Int8(n) => SqlValue::Int8(*n),
            Self::Int16(n) => SqlValue::Int16(*n),
            Self::Int32(n) => SqlValue::Int32(*n),
            Self::Int64(n) => SqlValue::Int64(*n),
            Self::BigInteger(n) => SqlValue::BigInteger(n.clone()),
            Self::Float32(f) => SqlValue::Float32(*f),
            Self::Float64(f) => SqlValue::Float64(*f),
        }
    }
}

macro_rules! impl_number_from {
    ($($ty:ty => $variant:ident),+) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_number_from!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    BigInteger => BigInteger,
    f32 => Float32,
    f64 => Float64
);

/// An expression of any type.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Boolean-valued expression.
    Boolean(BooleanExpr),
    /// Number-valued expression.
    Number(NumberExpr),
    /// String-valued expression.
    String(StringExpr),
}

impl Expr {
    /// Creates a bound parameter from a value.
    ///
    /// Binary values and NULL cannot be bound in an expression position;
    /// use an IS NULL test for the latter.
    pub fn parameter(value: SqlValue) -> Result<Self> {
        Ok(match value {
            SqlValue::Bool(b) => Self::Boolean(BooleanExpr::Parameter(b)),
            SqlValue::Int8(n) => Self::Number(NumberExpr::parameter(n)),
            SqlValue::Int16(n) => Self::Number(NumberExpr::parameter(n)),
            SqlValue::Int32(n) => Self::Number(NumberExpr::parameter(n)),
            SqlValue::Int64(n) => Self::Number(NumberExpr::parameter(n)),
            SqlValue::BigInteger(n) => Self::Number(NumberExpr::parameter(n)),
            SqlValue::Float32(f) => Self::Number(NumberExpr::parameter(f)),
            SqlValue::Float64(f) => Self::Number(NumberExpr::parameter(f)),
            SqlValue::Char(c) => Self::String(StringExpr::Parameter(c.to_string())),
            SqlValue::Text(s) => Self::String(StringExpr::Parameter(s)),
            SqlValue::Blob(_) => {
                return Err(PersistError::Unsupported(String::from(
                    "binary values cannot be bound as expression parameters",
                )));
            }
            SqlValue::Null => {
                return Err(PersistError::Unsupported(String::from(
                    "NULL cannot be bound as an expression parameter; use IS NULL",
                )));
            }
        })
    }

    /// Creates a comparison with another expression.
    #[must_use]
    pub fn compare(self, op: ComparisonOp, right: impl Into<Self>) -> BooleanExpr {
        BooleanExpr::Comparison {
            op,
            left: Box::new(self),
            right: Box::new(right.into()),
        }
    }

    /// Creates an equality comparison.
    #[must_use]
    pub fn eq(self, right: impl Into<Self>) -> BooleanExpr {
        self.compare(ComparisonOp::Equal, right)
    }

    /// Creates an IS NULL test.
    #[must_use]
    pub fn is_null(self) -> BooleanExpr {
        BooleanExpr::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    /// Creates an IS NOT NULL test.
    #[must_use]
    pub fn is_not_null(self) -> BooleanExpr {
        BooleanExpr::IsNull {
            expr: Box::new(self),
            negated: true,
        }
    }

    /// Creates an IN (SELECT ...) test.
    #[must_use]
    pub fn in_selection(self, selection: Select) -> BooleanExpr {
        BooleanExpr::InSelection {
            expr: Box::new(self),
            selection: Box::new(selection),
        }
    }
}

impl From<BooleanExpr> for Expr {
    fn from(expr: BooleanExpr) -> Self {
        Self::Boolean(expr)
    }
}

impl From<NumberExpr> for Expr {
    fn from(expr: NumberExpr) -> Self {
        Self::Number(expr)
    }
}

impl From<StringExpr> for Expr {
    fn from(expr: StringExpr) -> Self {
        Self::String(expr)
    }
}

/// A boolean-valued expression.
#[derive(Debug, Clone, PartialEq)]
pub enum BooleanExpr {
    /// Inline literal.
    Literal(bool),
    /// Bound parameter.
    Parameter(bool),
    /// Boolean column.
    Column(ColumnRef),
    /// Unary operator applied to an operand.
    Unary {
        /// Operator.
        op: BooleanUnaryOp,
        /// Operand.
        operand: Box<BooleanExpr>,
    },
    /// Binary operator over two boolean operands.
    Binary {
        /// Operator.
        op: BooleanBinaryOp,
        /// Left operand.
        left: Box<BooleanExpr>,
        /// Right operand.
        right: Box<BooleanExpr>,
    },
    /// Comparison of two expressions.
    Comparison {
        /// Operator.
        op: ComparisonOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
    /// `BETWEEN` test.
    InRange {
        /// Tested expression.
        expr: Box<NumberExpr>,
        /// Lower bound.
        low: Box<NumberExpr>,
        /// Upper bound.
        high: Box<NumberExpr>,
    },
    /// `IN (SELECT ...)` test.
    InSelection {
        /// Tested expression.
        expr: Box<Expr>,
        /// Subquery.
        selection: Box<Select>,
    },
    /// `IS NULL` / `IS NOT NULL` test.
    IsNull {
        /// Tested expression.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },
}

impl BooleanExpr {
    /// Creates a boolean column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::new(name))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BooleanBinaryOp, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BooleanBinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BooleanBinaryOp::Or, right)
    }

    /// Creates an XOR expression.
    #[must_use]
    pub fn xor(self, right: Self) -> Self {
        self.binary(BooleanBinaryOp::Xor, right)
    }

    /// Negates the expression with NOT.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::Unary {
            op: BooleanUnaryOp::Not,
            operand: Box::new(self),
        }
    }
}

/// A number-valued expression.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberExpr {
    /// Inline literal.
    Literal(Number),
    /// Bound parameter.
    Parameter(Number),
    /// Numeric column.
    Column(ColumnRef),
    /// Unary function applied to an operand.
    Unary {
        /// Operator.
        op: NumberUnaryOp,
        /// Operand.
        operand: Box<NumberExpr>,
    },
    /// Binary arithmetic.
    Binary {
        /// Operator.
        op: NumberBinaryOp,
        /// Left operand.
        left: Box<NumberExpr>,
        /// Right operand.
        right: Box<NumberExpr>,
    },
    /// Variadic function.
    Variadic {
        /// Operator.
        op: NumberVariadicOp,
        /// Operands, in declared order.
        operands: Vec<NumberExpr>,
    },
}

impl NumberExpr {
    /// Creates a numeric column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::new(name))
    }

    /// Creates an inline numeric literal.
    #[must_use]
    pub fn literal(value: impl Into<Number>) -> Self {
        Self::Literal(value.into())
    }

    /// Creates a bound numeric parameter.
    #[must_use]
    pub fn parameter(value: impl Into<Number>) -> Self {
        Self::Parameter(value.into())
    }

    /// Creates a binary arithmetic expression.
    #[must_use]
    pub fn binary(self, op: NumberBinaryOp, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Applies a unary function.
    #[must_use]
    pub fn unary(self, op: NumberUnaryOp) -> Self {
        Self::Unary {
            op,
            operand: Box::new(self),
        }
    }

    /// Creates a variadic function call.
    #[must_use]
    pub const fn variadic(op: NumberVariadicOp, operands: Vec<Self>) -> Self {
        Self::Variadic { op, operands }
    }

    /// Creates a comparison with another number.
    #[must_use]
    pub fn compare(self, op: ComparisonOp, right: Self) -> BooleanExpr {
        Expr::Number(self).compare(op, right)
    }

    /// Creates an equality comparison.
    #[must_use]
    pub fn eq(self, right: Self) -> BooleanExpr {
        self.compare(ComparisonOp::Equal, right)
    }

    /// Creates an inequality comparison.
    #[must_use]
    pub fn not_eq(self, right: Self) -> BooleanExpr {
        self.compare(ComparisonOp::NotEqual, right)
    }

    /// Creates a greater-than comparison.
    #[must_use]
    pub fn gt(self, right: Self) -> BooleanExpr {
        self.compare(ComparisonOp::Greater, right)
    }

    /// Creates a greater-than-or-equal comparison.
    #[must_use]
    pub fn gt_eq(self, right: Self) -> BooleanExpr {
        self.compare(ComparisonOp::GreaterOrEqual, right)
    }

    /// Creates a less-than comparison.
    #[must_use]
    pub fn lt(self, right: Self) -> BooleanExpr {
        self.compare(ComparisonOp::Less, right)
    }

    /// Creates a less-than-or-equal comparison.
    #[must_use]
    pub fn lt_eq(self, right: Self) -> BooleanExpr {
        self.compare(ComparisonOp::LessOrEqual, right)
    }

    /// Creates a BETWEEN test.
    #[must_use]
    pub fn between(self, low: Self, high: Self) -> BooleanExpr {
        BooleanExpr::InRange {
            expr: Box::new(self),
            low: Box::new(low),
            high: Box::new(high),
        }
    }
}

/// A string-valued expression.
#[derive(Debug, Clone, PartialEq)]
pub enum StringExpr {
    /// Inline literal.
    Literal(String),
    /// Bound parameter.
    Parameter(String),
    /// String column.
    Column(ColumnRef),
}

impl StringExpr {
    /// Creates a string column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(ColumnRef::new(name))
    }

    /// Creates an equality comparison.
    #[must_use]
    pub fn eq(self, right: Self) -> BooleanExpr {
        Expr::String(self).compare(ComparisonOp::Equal, right)
    }
}
