//! Static field-descriptor tables.
//!
//! Each persistent type exposes one [`TypeDescriptor`]: its table name and
//! an ordered list of [`FieldDescriptor`]s. The declaration collector and
//! the converters work purely over these tables. `#[derive(Persistent)]`
//! generates them, but they can also be written by hand.

use oxide_persist_core::{
    BigInteger, Blob, BooleanExpr, Expr, NumberExpr, SemanticType, SqlValue, StringExpr,
};

use crate::error::{OrmError, Result};
use crate::value::Value;

/// Describes a persistent struct.
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    /// Rust type name, for error messages.
    pub name: &'static str,
    /// Table the type is stored in.
    pub table: &'static str,
    /// Fields, in declaration order.
    pub fields: &'static [FieldDescriptor],
}

impl TypeDescriptor {
    /// Returns the field with the given name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Describes one field of a persistent struct.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: &'static str,
    /// Column name, or column prefix for embedded fields.
    pub column: &'static str,
    /// What the field holds.
    pub kind: FieldKind,
    /// Whether the field may be absent.
    pub nullable: bool,
    /// Annotations attached to the field.
    pub annotations: Annotations,
}

/// What a field holds.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// A single column value.
    Scalar(SemanticType),
    /// A structured value described by another descriptor.
    Composite(fn() -> &'static TypeDescriptor),
    /// A collection of elements.
    Collection(ElementKind),
}

impl FieldKind {
    /// Replaces the scalar type of a scalar or scalar collection.
    ///
    /// Used to narrow `String` to a bounded string or `Blob` to a fixed
    /// length binary.
    #[must_use]
    pub const fn narrowed(self, ty: SemanticType) -> Self {
        match self {
            Self::Scalar(_) => Self::Scalar(ty),
            Self::Collection(ElementKind::Scalar(_)) => Self::Collection(ElementKind::Scalar(ty)),
            other => other,
        }
    }

    /// Returns the kind of a collection holding elements of this kind.
    #[must_use]
    pub const fn collection(self) -> Self {
        Self::Collection(match self {
            Self::Scalar(ty) => ElementKind::Scalar(ty),
            Self::Composite(descriptor) => ElementKind::Composite(descriptor),
            Self::Collection(_) => ElementKind::Collection,
        })
    }
}

/// What a collection element holds.
#[derive(Debug, Clone, Copy)]
pub enum ElementKind {
    /// A single column value.
    Scalar(SemanticType),
    /// A structured value.
    Composite(fn() -> &'static TypeDescriptor),
    /// Another collection. Rejected when collected.
    Collection,
}

/// A column default, as written in the field annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    Text(&'static str),
}

impl DefaultValue {
    /// Returns the literal expression rendered after DEFAULT.
    #[must_use]
    pub fn to_expr(self) -> Expr {
        match self {
            Self::Bool(b) => Expr::Boolean(BooleanExpr::Literal(b)),
            Self::Int(n) => Expr::Number(NumberExpr::literal(n)),
            Self::Float(f) => Expr::Number(NumberExpr::literal(f)),
            Self::Text(s) => Expr::String(StringExpr::Literal(String::from(s))),
        }
    }
}

/// Field annotations.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Annotations {
    /// Part of the primary key.
    pub primary_key: bool,
    /// Auto-incremented column.
    pub auto_increment: bool,
    /// UNIQUE column.
    pub unique: bool,
    /// NOT NULL column.
    pub not_null: bool,
    /// Flatten a composite into the owning table.
    pub embed: bool,
    /// Store a composite in its own table and keep a foreign key.
    pub references: bool,
    /// Column default.
    pub default: Option<DefaultValue>,
}

impl Annotations {
    /// No annotations.
    pub const NONE: Self = Self {
        primary_key: false,
        auto_increment: false,
        unique: false,
        not_null: false,
        embed: false,
        references: false,
        default: None,
    };
}

/// A value that can be stored in a field.
pub trait PersistValue: Sized {
    /// What a field of this type holds.
    const KIND: FieldKind;
    /// Whether a field of this type may be absent.
    const NULLABLE: bool = false;

    /// Converts to the runtime value shape.
    fn to_value(&self) -> Value;

    /// Converts back from the runtime value shape.
    fn from_value(value: Value) -> Result<Self>;
}

/// A struct stored in its own table.
pub trait Persistent: PersistValue {
    /// Returns the static descriptor of this type.
    fn descriptor() -> &'static TypeDescriptor;
}

macro_rules! impl_scalar {
    ($($ty:ty => $semantic:ident, $variant:ident, |$this:ident| $owned:expr);+ $(;)?) => {
        $(
            impl PersistValue for $ty {
                const KIND: FieldKind = FieldKind::Scalar(SemanticType::$semantic);

                fn to_value(&self) -> Value {
                    let $this = self;
                    Value::Scalar(SqlValue::$variant($owned))
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::Scalar(SqlValue::$variant(v)) => Ok(v),
                        Value::Scalar(other) => Err(OrmError::shape(
                            stringify!($ty),
                            stringify!($variant),
                            other.kind(),
                        )),
                        other => Err(OrmError::shape(stringify!($ty), "scalar", other.kind())),
                    }
                }
            }
        )+
    };
}

impl_scalar!(
    bool => Boolean, Bool, |v| *v;
    i8 => Int8, Int8, |v| *v;
    i16 => Int16, Int16, |v| *v;
    i32 => Int32, Int32, |v| *v;
    i64 => Int64, Int64, |v| *v;
    BigInteger => BigInteger, BigInteger, |v| v.clone();
    f32 => Float32, Float32, |v| *v;
    f64 => Float64, Float64, |v| *v;
    char => Char, Char, |v| *v;
    String => String, Text, |v| v.clone();
    Blob => Binary, Blob, |v| v.clone();
);

impl<T: PersistValue> PersistValue for Option<T> {
    const KIND: FieldKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, T::to_value)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: PersistValue> PersistValue for Box<T> {
    const KIND: FieldKind = T::KIND;
    const NULLABLE: bool = T::NULLABLE;

    fn to_value(&self) -> Value {
        T::to_value(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(Self::new)
    }
}

impl<T: PersistValue> PersistValue for Vec<T> {
    const KIND: FieldKind = T::KIND.collection();

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(T::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(OrmError::shape("collection", "list", other.kind())),
        }
    }
}
