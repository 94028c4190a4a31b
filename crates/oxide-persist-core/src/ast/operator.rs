//! Operator leaves of the expression tree.
//!
//! Operators carry no state beyond their kind. Each has a fixed symbol;
//! dialects may substitute a different spelling when unparsing (see
//! [`Dialect`](crate::Dialect)).

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// `>=`
    GreaterOrEqual,
    /// `>`
    Greater,
    /// `<=`
    LessOrEqual,
    /// `<`
    Less,
}

impl ComparisonOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::GreaterOrEqual => ">=",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::Less => "<",
        }
    }
}

/// Binary operators over boolean operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanBinaryOp {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
    /// Exclusive or.
    Xor,
    /// Boolean equality.
    Equal,
    /// Boolean inequality.
    Unequal,
}

impl BooleanBinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Equal => "=",
            Self::Unequal => "!=",
        }
    }
}

/// Unary operators over a boolean operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanUnaryOp {
    /// Logical NOT.
    Not,
}

impl BooleanUnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
        }
    }
}

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBinaryOp {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// Integer division.
    IntegerDivide,
    /// `%`
    Modulo,
}

impl NumberBinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::IntegerDivide => "DIV",
            Self::Modulo => "%",
        }
    }
}

/// Unary arithmetic operators, rendered as function calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberUnaryOp {
    /// `ROUND(x)`
    Round,
    /// `-(x)`
    Negate,
    /// `ABS(x)`
    Abs,
}

impl NumberUnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Round => "ROUND",
            Self::Negate => "-",
            Self::Abs => "ABS",
        }
    }
}

/// Variadic arithmetic functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberVariadicOp {
    /// Largest operand.
    Greatest,
    /// First non-NULL operand.
    Coalesce,
}

impl NumberVariadicOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Greatest => "GREATEST",
            Self::Coalesce => "COALESCE",
        }
    }
}
