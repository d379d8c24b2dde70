//! Attribute types: the per-field casting and validation contract.
//!
//! An [`AttributeType`] describes one attribute: which of a closed set of
//! kinds it is, whether null is acceptable, and what default (if any) to
//! inject before persistence. The kind drives three operations:
//!
//! - `validate` is the sole place a value may be rejected
//! - `cast_from_primitive` lifts a stored scalar into its rich form
//! - `cast_to_primitive` reduces a rich value back to a storable scalar
//!
//! For every primitive `p` accepted by `validate` in canonical form,
//! `cast_to_primitive(cast_from_primitive(p)) == p`.

pub mod error;

pub use error::TypeError;

use crate::core::{AttributeValue, Primitive};
use crate::values::{Country, CountryDirectory, ReplacementRules};
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fmt;
use std::sync::Arc;

/// Render format used for datetimes when a type carries none of its own.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The closed set of attribute kinds.
#[derive(Clone)]
pub enum TypeKind {
    /// A whole number, optionally restricted to non-negative values.
    Integer { unsigned: bool },
    /// Free text.
    Text,
    /// A point in time, stored as a formatted string.
    DateTime { format: Option<String> },
    /// A key referencing another record. Existence of the target is
    /// checked by the record engine, which has the context this type lacks.
    Relation,
    /// A canonical country code backed by external lookup services.
    Country {
        directory: Arc<dyn CountryDirectory>,
        rules: Arc<dyn ReplacementRules>,
    },
}

impl TypeKind {
    /// The kind's short name, used for introspection and messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer { .. } => "integer",
            Self::Text => "text",
            Self::DateTime { .. } => "datetime",
            Self::Relation => "relation",
            Self::Country { .. } => "country",
        }
    }
}

impl fmt::Debug for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer { unsigned } => {
                f.debug_struct("Integer").field("unsigned", unsigned).finish()
            }
            Self::Text => f.write_str("Text"),
            Self::DateTime { format } => {
                f.debug_struct("DateTime").field("format", format).finish()
            }
            Self::Relation => f.write_str("Relation"),
            Self::Country { .. } => f.write_str("Country"),
        }
    }
}

/// Immutable descriptor for one attribute's casting and validation contract.
///
/// Constructed fluently:
///
/// ```rust
/// use veneer::types::AttributeType;
///
/// let age = AttributeType::integer().unsigned(true).nullable(true);
/// let status = AttributeType::text().default_value("draft");
///
/// assert!(age.is_nullable());
/// assert!(status.has_default());
/// ```
#[derive(Clone, Debug)]
pub struct AttributeType {
    kind: TypeKind,
    nullable: bool,
    default: Option<Primitive>,
}

impl AttributeType {
    fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            nullable: false,
            default: None,
        }
    }

    /// A signed integer attribute.
    pub fn integer() -> Self {
        Self::new(TypeKind::Integer { unsigned: false })
    }

    /// A free-text attribute.
    pub fn text() -> Self {
        Self::new(TypeKind::Text)
    }

    /// A datetime attribute using [`DEFAULT_DATETIME_FORMAT`].
    pub fn datetime() -> Self {
        Self::new(TypeKind::DateTime { format: None })
    }

    /// A relation key attribute.
    pub fn relation() -> Self {
        Self::new(TypeKind::Relation)
    }

    /// A country attribute canonicalized through the given services.
    pub fn country(
        directory: Arc<dyn CountryDirectory>,
        rules: Arc<dyn ReplacementRules>,
    ) -> Self {
        Self::new(TypeKind::Country { directory, rules })
    }

    /// Restrict an integer attribute to non-negative values.
    /// No effect on other kinds.
    pub fn unsigned(mut self, unsigned: bool) -> Self {
        if let TypeKind::Integer { unsigned: u } = &mut self.kind {
            *u = unsigned;
        }
        self
    }

    /// Set the parse and render format of a datetime attribute.
    /// No effect on other kinds.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        if let TypeKind::DateTime { format: f } = &mut self.kind {
            *f = Some(format.into());
        }
        self
    }

    /// Allow null for this attribute.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the default injected when the key is absent at save time.
    pub fn default_value(mut self, default: impl Into<Primitive>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn default(&self) -> Option<&Primitive> {
        self.default.as_ref()
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.kind, TypeKind::Relation)
    }

    /// The kind's short name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Check type-specific constraints. The sole rejection point; never
    /// called with null (callers short-circuit null before invoking).
    pub fn validate(&self, value: &AttributeValue) -> Result<(), TypeError> {
        match (&self.kind, value) {
            (TypeKind::Integer { unsigned }, value) => {
                let parsed = integer_of(value)?;
                if *unsigned && parsed < 0 {
                    return Err(TypeError::NegativeUnsigned { value: parsed });
                }
                Ok(())
            }
            (TypeKind::Text, AttributeValue::Str(_)) => Ok(()),
            (TypeKind::Text, other) => Err(TypeError::ExpectedText {
                found: other.type_name().to_string(),
            }),
            (TypeKind::DateTime { .. }, AttributeValue::DateTime(_)) => Ok(()),
            (TypeKind::DateTime { format }, AttributeValue::Str(s)) => {
                parse_datetime(s, effective_format(format)).map(|_| ())
            }
            (TypeKind::DateTime { .. }, other) => Err(TypeError::ExpectedDateTime {
                found: other.type_name().to_string(),
            }),
            (TypeKind::Relation, value) => {
                let key = integer_of(value).map_err(|_| TypeError::ExpectedRelationKey {
                    found: value.type_name().to_string(),
                })?;
                if key < 1 {
                    return Err(TypeError::NonPositiveRelationKey { value: key });
                }
                Ok(())
            }
            (TypeKind::Country { .. }, AttributeValue::Country(_)) => Ok(()),
            (TypeKind::Country { directory, rules }, AttributeValue::Str(s)) => {
                Country::resolve(s, directory.as_ref(), rules.as_ref())
                    .map(|_| ())
                    .map_err(TypeError::from)
            }
            (TypeKind::Country { .. }, other) => Err(TypeError::Country(
                crate::values::CountryError {
                    value: other.to_string(),
                },
            )),
        }
    }

    /// Lift a stored primitive into the rich form. Total over every
    /// primitive the corresponding `validate` accepts.
    pub fn cast_from_primitive(&self, raw: &Primitive) -> Result<AttributeValue, TypeError> {
        match (&self.kind, raw) {
            (TypeKind::Integer { .. }, Primitive::Int(i)) => Ok(AttributeValue::Int(*i)),
            (TypeKind::Integer { .. }, Primitive::Str(s)) => s
                .parse::<i64>()
                .map(AttributeValue::Int)
                .map_err(|_| TypeError::ExpectedInteger { found: s.clone() }),
            (TypeKind::Integer { .. }, other) => Err(TypeError::ExpectedInteger {
                found: other.type_name().to_string(),
            }),
            (TypeKind::Text, Primitive::Str(s)) => Ok(AttributeValue::Str(s.clone())),
            (TypeKind::Text, other) => Err(TypeError::ExpectedText {
                found: other.type_name().to_string(),
            }),
            (TypeKind::DateTime { format }, Primitive::Str(s)) => {
                parse_datetime(s, effective_format(format)).map(AttributeValue::DateTime)
            }
            (TypeKind::DateTime { .. }, other) => Err(TypeError::ExpectedDateTime {
                found: other.type_name().to_string(),
            }),
            (TypeKind::Relation, Primitive::Int(i)) => Ok(AttributeValue::Int(*i)),
            (TypeKind::Relation, Primitive::Str(s)) => s
                .parse::<i64>()
                .map(AttributeValue::Int)
                .map_err(|_| TypeError::ExpectedRelationKey { found: s.clone() }),
            (TypeKind::Relation, other) => Err(TypeError::ExpectedRelationKey {
                found: other.type_name().to_string(),
            }),
            (TypeKind::Country { directory, rules }, Primitive::Str(s)) => {
                Country::resolve(s, directory.as_ref(), rules.as_ref())
                    .map(AttributeValue::Country)
                    .map_err(TypeError::from)
            }
            (TypeKind::Country { .. }, other) => Err(TypeError::Country(
                crate::values::CountryError {
                    value: other.to_string(),
                },
            )),
        }
    }

    /// Reduce a rich value back to its storable form.
    ///
    /// The result is returned as JSON so the engine can enforce the
    /// scalars-only storage contract on whatever a kind produces.
    pub fn cast_to_primitive(
        &self,
        value: &AttributeValue,
    ) -> Result<serde_json::Value, TypeError> {
        match (&self.kind, value) {
            (TypeKind::Integer { .. }, value) => {
                Ok(serde_json::Value::from(integer_of(value)?))
            }
            (TypeKind::Text, AttributeValue::Str(s)) => Ok(serde_json::Value::from(s.clone())),
            (TypeKind::Text, other) => Err(TypeError::ExpectedText {
                found: other.type_name().to_string(),
            }),
            (TypeKind::DateTime { format }, AttributeValue::DateTime(dt)) => Ok(
                serde_json::Value::from(dt.format(effective_format(format)).to_string()),
            ),
            (TypeKind::DateTime { format }, AttributeValue::Str(s)) => {
                let fmt = effective_format(format);
                let parsed = parse_datetime(s, fmt)?;
                Ok(serde_json::Value::from(parsed.format(fmt).to_string()))
            }
            (TypeKind::DateTime { .. }, other) => Err(TypeError::ExpectedDateTime {
                found: other.type_name().to_string(),
            }),
            (TypeKind::Relation, value) => {
                let key = integer_of(value).map_err(|_| TypeError::ExpectedRelationKey {
                    found: value.type_name().to_string(),
                })?;
                Ok(serde_json::Value::from(key))
            }
            (TypeKind::Country { .. }, AttributeValue::Country(c)) => {
                Ok(serde_json::Value::from(c.iso()))
            }
            (TypeKind::Country { directory, rules }, AttributeValue::Str(s)) => {
                let country = Country::resolve(s, directory.as_ref(), rules.as_ref())?;
                Ok(serde_json::Value::from(country.iso()))
            }
            (TypeKind::Country { .. }, other) => Err(TypeError::Country(
                crate::values::CountryError {
                    value: other.to_string(),
                },
            )),
        }
    }
}

/// Integer content of a value, accepting cleanly parsing text.
fn integer_of(value: &AttributeValue) -> Result<i64, TypeError> {
    match value {
        AttributeValue::Int(i) => Ok(*i),
        AttributeValue::Str(s) => s.parse::<i64>().map_err(|_| TypeError::ExpectedInteger {
            found: s.clone(),
        }),
        other => Err(TypeError::ExpectedInteger {
            found: other.type_name().to_string(),
        }),
    }
}

fn effective_format(format: &Option<String>) -> &str {
    format.as_deref().unwrap_or(DEFAULT_DATETIME_FORMAT)
}

fn parse_datetime(value: &str, format: &str) -> Result<DateTime<Utc>, TypeError> {
    NaiveDateTime::parse_from_str(value, format)
        .map(|naive| naive.and_utc())
        .map_err(|_| TypeError::DateTimeFormat {
            value: value.to_string(),
            format: format.to_string(),
        })
}
