//! Column types, their families, and literal values.

use crate::SchemaError;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use strata_names::{QuoteStyle, quote_str};

/// A literal argument, as it appears in a builder call.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<Value>),
}

impl Value {
    /// Render in builder syntax with the given quote style.
    pub fn render(&self, quote: QuoteStyle) -> String {
        match self {
            Value::Str(s) => quote_str(s, quote),
            Value::Int(n) => n.to_string(),
            Value::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 {
                    format!("{:.1}", x)
                } else {
                    x.to_string()
                }
            }
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Null => "None".to_string(),
            Value::List(items) => {
                let items: Vec<_> = items.iter().map(|v| v.render(quote)).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// False for NaN and infinities, including inside lists. Those have no
    /// builder literal and never compare equal to themselves.
    pub fn is_finite(&self) -> bool {
        match self {
            Value::Float(x) => x.is_finite(),
            Value::List(items) => items.iter().all(Value::is_finite),
            _ => true,
        }
    }

    /// Non-negative integer that fits a `u32` (lengths, precisions).
    pub fn as_size(&self) -> Option<u32> {
        match self {
            Value::Int(n) => u32::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(QuoteStyle::Single))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Groups of column types that share the same constraints and arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Plain,
    /// Accepts `unsigned`.
    Integer,
    /// Carries a length as its first type argument.
    String,
    /// Renders without a column name.
    Timestamp,
    /// Accepts `reference`, `on` and `on_delete`, nothing else.
    ForeignKey,
}

impl Family {
    /// Whether columns of this family accept `constraint`.
    pub fn allows(self, constraint: Constraint) -> bool {
        use Constraint::*;
        match self {
            Family::Plain | Family::String => matches!(constraint, Nullable | Unique | Default),
            Family::Integer => matches!(constraint, Nullable | Unique | Default | Unsigned),
            Family::Timestamp => matches!(constraint, Nullable),
            Family::ForeignKey => matches!(constraint, Reference | On | OnDelete),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Family::Plain => "plain",
            Family::Integer => "integer",
            Family::String => "string",
            Family::Timestamp => "timestamp",
            Family::ForeignKey => "foreign-key",
        };
        write!(f, "{}", name)
    }
}

/// The recognized constraint vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    Nullable,
    Unique,
    Default,
    Unsigned,
    Reference,
    On,
    OnDelete,
}

impl Constraint {
    pub const ALL: [Constraint; 7] = [
        Constraint::Nullable,
        Constraint::Unique,
        Constraint::Default,
        Constraint::Unsigned,
        Constraint::Reference,
        Constraint::On,
        Constraint::OnDelete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Constraint::Nullable => "nullable",
            Constraint::Unique => "unique",
            Constraint::Default => "default",
            Constraint::Unsigned => "unsigned",
            Constraint::Reference => "reference",
            Constraint::On => "on",
            Constraint::OnDelete => "on_delete",
        }
    }

    /// Look up a constraint by its builder name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Number of arguments the call takes.
    pub fn arity(self) -> usize {
        match self {
            Constraint::Nullable | Constraint::Unique | Constraint::Unsigned => 0,
            Constraint::Default | Constraint::Reference | Constraint::On | Constraint::OnDelete => 1,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Declared column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Increments,
    BigIncrements,
    Integer,
    BigInteger,
    MediumInteger,
    SmallInteger,
    TinyInteger,
    String,
    Char,
    Text,
    MediumText,
    LongText,
    Boolean,
    Float,
    Double,
    Decimal,
    Date,
    DateTime,
    Time,
    Timestamp,
    Binary,
    Json,
    Uuid,
    Enum,
    Timestamps,
    NullableTimestamps,
    SoftDeletes,
    Foreign,
}

impl TypeTag {
    pub const ALL: [TypeTag; 28] = [
        TypeTag::Increments,
        TypeTag::BigIncrements,
        TypeTag::Integer,
        TypeTag::BigInteger,
        TypeTag::MediumInteger,
        TypeTag::SmallInteger,
        TypeTag::TinyInteger,
        TypeTag::String,
        TypeTag::Char,
        TypeTag::Text,
        TypeTag::MediumText,
        TypeTag::LongText,
        TypeTag::Boolean,
        TypeTag::Float,
        TypeTag::Double,
        TypeTag::Decimal,
        TypeTag::Date,
        TypeTag::DateTime,
        TypeTag::Time,
        TypeTag::Timestamp,
        TypeTag::Binary,
        TypeTag::Json,
        TypeTag::Uuid,
        TypeTag::Enum,
        TypeTag::Timestamps,
        TypeTag::NullableTimestamps,
        TypeTag::SoftDeletes,
        TypeTag::Foreign,
    ];

    /// The builder method name for this type.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::Increments => "increments",
            TypeTag::BigIncrements => "big_increments",
            TypeTag::Integer => "integer",
            TypeTag::BigInteger => "big_integer",
            TypeTag::MediumInteger => "medium_integer",
            TypeTag::SmallInteger => "small_integer",
            TypeTag::TinyInteger => "tiny_integer",
            TypeTag::String => "string",
            TypeTag::Char => "char",
            TypeTag::Text => "text",
            TypeTag::MediumText => "medium_text",
            TypeTag::LongText => "long_text",
            TypeTag::Boolean => "boolean",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::Decimal => "decimal",
            TypeTag::Date => "date",
            TypeTag::DateTime => "datetime",
            TypeTag::Time => "time",
            TypeTag::Timestamp => "timestamp",
            TypeTag::Binary => "binary",
            TypeTag::Json => "json",
            TypeTag::Uuid => "uuid",
            TypeTag::Enum => "enum",
            TypeTag::Timestamps => "timestamps",
            TypeTag::NullableTimestamps => "nullable_timestamps",
            TypeTag::SoftDeletes => "soft_deletes",
            TypeTag::Foreign => "foreign",
        }
    }

    pub fn family(self) -> Family {
        match self {
            TypeTag::Increments
            | TypeTag::BigIncrements
            | TypeTag::Integer
            | TypeTag::BigInteger
            | TypeTag::MediumInteger
            | TypeTag::SmallInteger
            | TypeTag::TinyInteger => Family::Integer,
            TypeTag::String | TypeTag::Char => Family::String,
            TypeTag::Timestamps | TypeTag::NullableTimestamps | TypeTag::SoftDeletes => {
                Family::Timestamp
            }
            TypeTag::Foreign => Family::ForeignKey,
            _ => Family::Plain,
        }
    }

    /// How many positional type arguments a declaration takes.
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            TypeTag::String => 0..=1,
            TypeTag::Char | TypeTag::Enum => 1..=1,
            TypeTag::Float | TypeTag::Double | TypeTag::Decimal => 0..=2,
            _ => 0..=0,
        }
    }

    /// Validate positional type arguments for a declaration of `column`.
    pub fn check_args(self, column: &str, args: &[Value]) -> Result<(), SchemaError> {
        let arity = self.arity();
        if !arity.contains(&args.len()) {
            let expected = match (*arity.start(), *arity.end()) {
                (0, 0) => "no arguments".to_string(),
                (lo, hi) if lo == hi => format!("exactly {} argument(s)", lo),
                (lo, hi) => format!("between {} and {} arguments", lo, hi),
            };
            return Err(SchemaError::TypeArgument {
                column: column.to_string(),
                tag: self,
                reason: format!("expects {}, got {}", expected, args.len()),
            });
        }

        match self {
            TypeTag::Enum => {
                let ok = matches!(&args[0], Value::List(items) if items.iter().all(|v| v.as_str().is_some()));
                if !ok {
                    return Err(SchemaError::TypeArgument {
                        column: column.to_string(),
                        tag: self,
                        reason: format!("expects a list of strings, got {}", args[0]),
                    });
                }
            }
            _ => {
                if let Some(bad) = args.iter().find(|v| v.as_size().is_none()) {
                    return Err(SchemaError::TypeArgument {
                        column: column.to_string(),
                        tag: self,
                        reason: format!("expects non-negative integer sizes, got {}", bad),
                    });
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TypeTag {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| SchemaError::UnknownType {
                name: s.to_string(),
            })
    }
}
