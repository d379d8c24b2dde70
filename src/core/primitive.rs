//! The primitive storage form of an attribute.
//!
//! Raw record storage only ever holds primitives: strings, numbers,
//! booleans, or null. Anything richer is produced by casting a primitive
//! through an attribute type on the way out, and reduced back to a
//! primitive on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value in the only form that may be persisted.
///
/// `Primitive` serializes untagged, so a stored attribute map is plain
/// JSON scalars rather than enum wrappers.
///
/// # Example
///
/// ```rust
/// use veneer::core::Primitive;
///
/// let raw = Primitive::Int(42);
/// assert_eq!(serde_json::to_string(&raw).unwrap(), "42");
///
/// let back: Primitive = serde_json::from_str("42").unwrap();
/// assert_eq!(back, raw);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    /// The absence of a value. Distinct from an *absent key* in storage:
    /// default injection fills absent keys, never present-and-null ones.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Primitive {
    /// Check whether this primitive is null.
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

    /// A short name for the primitive's shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "text",
        }
    }

    /// Convert a JSON value to a primitive.
    ///
    /// Returns `None` for arrays and objects: only scalars may be
    /// persisted, and a type that produces one has broken its contract.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(Self::Null),
            serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
            serde_json::Value::Number(n) => {
                n.as_i64().map(Self::Int).or_else(|| n.as_f64().map(Self::Float))
            }
            serde_json::Value::String(s) => Some(Self::Str(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    /// Render this primitive as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::from(*b),
            Self::Int(i) => serde_json::Value::from(*i),
            Self::Float(f) => serde_json::Value::from(*f),
            Self::Str(s) => serde_json::Value::from(s.clone()),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Primitive {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for Primitive {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_untagged() {
        assert_eq!(serde_json::to_value(Primitive::Null).unwrap(), json!(null));
        assert_eq!(serde_json::to_value(Primitive::Bool(true)).unwrap(), json!(true));
        assert_eq!(serde_json::to_value(Primitive::Int(-3)).unwrap(), json!(-3));
        assert_eq!(serde_json::to_value(Primitive::Float(1.5)).unwrap(), json!(1.5));
        assert_eq!(
            serde_json::to_value(Primitive::Str("hi".into())).unwrap(),
            json!("hi")
        );
    }

    #[test]
    fn deserializes_scalars() {
        let raw: Primitive = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(raw, Primitive::Int(7));

        let raw: Primitive = serde_json::from_value(json!(7.25)).unwrap();
        assert_eq!(raw, Primitive::Float(7.25));

        let raw: Primitive = serde_json::from_value(json!(null)).unwrap();
        assert!(raw.is_null());
    }

    #[test]
    fn from_json_rejects_non_scalars() {
        assert_eq!(Primitive::from_json(&json!([1, 2])), None);
        assert_eq!(Primitive::from_json(&json!({"a": 1})), None);
        assert_eq!(Primitive::from_json(&json!("a")), Some(Primitive::Str("a".into())));
    }

    #[test]
    fn json_round_trip_preserves_integers() {
        let raw = Primitive::Int(i64::MAX);
        assert_eq!(Primitive::from_json(&raw.to_json()), Some(raw));
    }

    #[test]
    fn display_matches_storage_form() {
        assert_eq!(Primitive::Null.to_string(), "null");
        assert_eq!(Primitive::Int(12).to_string(), "12");
        assert_eq!(Primitive::Str("abc".into()).to_string(), "abc");
    }
}
