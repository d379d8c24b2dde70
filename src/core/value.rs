//! The rich in-memory form of an attribute.
//!
//! Where [`Primitive`](crate::core::Primitive) is what storage holds,
//! `AttributeValue` is what application code works with: parsed datetimes,
//! canonical value objects, structured maps. Attribute types translate
//! between the two forms.

use crate::core::Primitive;
use crate::values::Country;
use chrono::{DateTime, Utc};
use std::fmt;

/// A typed attribute value as seen by application code.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A parsed point in time.
    DateTime(DateTime<Utc>),
    /// A canonical country code value object.
    Country(Country),
    /// An anonymous structure; flattens to an object literal.
    Map(serde_json::Map<String, serde_json::Value>),
}

impl AttributeValue {
    /// Check whether this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer content, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Borrow the datetime content, if this is a datetime.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Borrow the country content, if this is a country.
    pub fn as_country(&self) -> Option<&Country> {
        match self {
            Self::Country(c) => Some(c),
            _ => None,
        }
    }

    /// A short name for the value's shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "text",
            Self::DateTime(_) => "datetime",
            Self::Country(_) => "country",
            Self::Map(_) => "map",
        }
    }

    /// Reduce to the primitive storage form, if this value is scalar.
    ///
    /// Rich values (datetimes, countries, maps) have no direct primitive
    /// form; they must be reduced through their attribute type instead.
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            Self::Null => Some(Primitive::Null),
            Self::Bool(b) => Some(Primitive::Bool(*b)),
            Self::Int(i) => Some(Primitive::Int(*i)),
            Self::Float(f) => Some(Primitive::Float(*f)),
            Self::Str(s) => Some(Primitive::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Country(c) => f.write_str(c.iso()),
            Self::Map(m) => write!(f, "{}", serde_json::Value::Object(m.clone())),
        }
    }
}

impl From<Primitive> for AttributeValue {
    fn from(raw: Primitive) -> Self {
        match raw {
            Primitive::Null => Self::Null,
            Primitive::Bool(b) => Self::Bool(b),
            Primitive::Int(i) => Self::Int(i),
            Primitive::Float(f) => Self::Float(f),
            Primitive::Str(s) => Self::Str(s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Country> for AttributeValue {
    fn from(value: Country) -> Self {
        Self::Country(value)
    }
}
