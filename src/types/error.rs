//! Rejections produced by attribute type validation and casting.

use crate::values::CountryError;
use thiserror::Error;

/// A data-validity rejection from an attribute type.
///
/// These are never raised directly at a call site that sets data; the
/// record engine records them into the error ledger and nulls the value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeError {
    #[error("expected an integer, got {found}")]
    ExpectedInteger { found: String },

    #[error("{value} is negative but the attribute is unsigned")]
    NegativeUnsigned { value: i64 },

    #[error("expected text, got {found}")]
    ExpectedText { found: String },

    #[error("expected a datetime, got {found}")]
    ExpectedDateTime { found: String },

    #[error("{value} does not match the datetime format {format}")]
    DateTimeFormat { value: String, format: String },

    #[error("expected a relation key, got {found}")]
    ExpectedRelationKey { found: String },

    #[error("relation keys must be positive, got {value}")]
    NonPositiveRelationKey { value: i64 },

    #[error(transparent)]
    Country(#[from] CountryError),
}
