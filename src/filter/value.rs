use super::ast::Comparator;
use super::error::ValueError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Value, json};
use std::fmt;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// A closed set of named members, matched case-insensitively
#[derive(Debug, PartialEq, Eq)]
pub struct EnumShape {
    pub name: &'static str,
    /// Member names in ordinal order
    pub members: &'static [&'static str],
}

impl EnumShape {
    /// Resolve a member name or ordinal to its ordinal
    pub fn ordinal_of(&self, literal: &str) -> Option<usize> {
        if let Some(idx) = self
            .members
            .iter()
            .position(|m| m.eq_ignore_ascii_case(literal))
        {
            return Some(idx);
        }
        literal
            .parse::<usize>()
            .ok()
            .filter(|idx| *idx < self.members.len())
    }
}

/// The value type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Int32,
    Int64,
    Float64,
    Boolean,
    DateTime,
    Enum(&'static EnumShape),
}

impl ValueKind {
    /// Comparators that make sense for values of this kind
    pub fn allowed_comparators(&self) -> &'static [Comparator] {
        use Comparator::*;
        match self {
            ValueKind::String => &[Equals, NotEquals, Like],
            ValueKind::Int32 | ValueKind::Int64 | ValueKind::Float64 | ValueKind::DateTime => {
                &[Equals, NotEquals, GreaterThan, LessThan]
            }
            ValueKind::Boolean | ValueKind::Enum(_) => &[Equals, NotEquals],
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::String => f.write_str("String"),
            ValueKind::Int32 => f.write_str("Int32"),
            ValueKind::Int64 => f.write_str("Int64"),
            ValueKind::Float64 => f.write_str("Float64"),
            ValueKind::Boolean => f.write_str("Boolean"),
            ValueKind::DateTime => f.write_str("DateTime"),
            ValueKind::Enum(shape) => f.write_str(shape.name),
        }
    }
}

/// A literal coerced to the kind of the field it is compared against
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Enum {
        shape: &'static EnumShape,
        ordinal: usize,
    },
}

impl TypedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::String(_) => ValueKind::String,
            TypedValue::Int32(_) => ValueKind::Int32,
            TypedValue::Int64(_) => ValueKind::Int64,
            TypedValue::Float64(_) => ValueKind::Float64,
            TypedValue::Boolean(_) => ValueKind::Boolean,
            TypedValue::DateTime(_) => ValueKind::DateTime,
            TypedValue::Enum { shape, .. } => ValueKind::Enum(shape),
        }
    }

    /// Database type the value is bound as. Enums are stored as their ordinal.
    pub fn db_type(&self) -> &'static str {
        match self {
            TypedValue::String(_) => "String",
            TypedValue::Int32(_) | TypedValue::Enum { .. } => "Int32",
            TypedValue::Int64(_) => "Int64",
            TypedValue::Float64(_) => "Double",
            TypedValue::Boolean(_) => "Boolean",
            TypedValue::DateTime(_) => "DateTime",
        }
    }

    /// The value as it is handed to the database driver
    pub fn to_json(&self) -> Value {
        match self {
            TypedValue::String(s) => json!(s),
            TypedValue::Int32(n) => json!(n),
            TypedValue::Int64(n) => json!(n),
            TypedValue::Float64(n) => json!(n),
            TypedValue::Boolean(b) => json!(b),
            TypedValue::DateTime(dt) => json!(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
            TypedValue::Enum { ordinal, .. } => json!(ordinal),
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::String(s) => f.write_str(s),
            TypedValue::Int32(n) => write!(f, "{n}"),
            TypedValue::Int64(n) => write!(f, "{n}"),
            TypedValue::Float64(n) => write!(f, "{n}"),
            TypedValue::Boolean(b) => write!(f, "{b}"),
            TypedValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            TypedValue::Enum { shape, ordinal } => {
                f.write_str(shape.members.get(*ordinal).copied().unwrap_or("?"))
            }
        }
    }
}

/// Convert a literal token into a value of `kind`
///
/// A literal wrapped in one pair of single quotes is unquoted first. `field`
/// is only used for error reporting.
pub fn coerce(field: &str, kind: ValueKind, literal: &str) -> Result<TypedValue, ValueError> {
    let text = unquote(literal);

    let value = match kind {
        ValueKind::String => Some(TypedValue::String(text.to_string())),
        ValueKind::Int32 => text.trim().parse().ok().map(TypedValue::Int32),
        ValueKind::Int64 => text.trim().parse().ok().map(TypedValue::Int64),
        ValueKind::Float64 => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(TypedValue::Float64),
        ValueKind::Boolean => parse_bool(text.trim()).map(TypedValue::Boolean),
        ValueKind::DateTime => parse_datetime(text.trim()).map(TypedValue::DateTime),
        ValueKind::Enum(shape) => shape
            .ordinal_of(text.trim())
            .map(|ordinal| TypedValue::Enum { shape, ordinal }),
    };

    value.ok_or_else(|| ValueError::InvalidValue {
        literal: literal.to_string(),
        field: field.to_string(),
    })
}

pub fn comparator_allowed(kind: ValueKind, comparator: Comparator) -> bool {
    kind.allowed_comparators().contains(&comparator)
}

/// Reject comparators that do not apply to `kind`
///
/// `token` is the comparator as the client wrote it.
pub fn check_comparator(
    field: &str,
    kind: ValueKind,
    comparator: Comparator,
    token: &str,
) -> Result<(), ValueError> {
    if comparator_allowed(kind, comparator) {
        Ok(())
    } else {
        Err(ValueError::IllegalComparator {
            comparator: token.to_string(),
            field: field.to_string(),
        })
    }
}

fn unquote(literal: &str) -> &str {
    if literal.len() > 1 && literal.starts_with('\'') && literal.ends_with('\'') {
        &literal[1..literal.len() - 1]
    } else {
        literal
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
