//! Record engine errors.
//!
//! Two tiers. Contract violations (`ReadOnly`, `NonScalarPrimitive`) fail
//! fast: they indicate a bug in calling code or a type implementation.
//! Data-validity failures are deferred through the error ledger and only
//! surface as an aggregate [`ValidationErrors`] from the validation pass,
//! or as [`RecordError::Erroneous`] when reading a key known to be bad.

use crate::types::TypeError;
use indexmap::IndexMap;
use thiserror::Error;

/// Errors raised by the record engine.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A guarded write touched a read-only attribute.
    #[error("{key} is read-only")]
    ReadOnly { key: String },

    /// The attribute has a recorded error and refuses to be read.
    #[error("{key} error: {message}")]
    Erroneous { key: String, message: String },

    /// A stored primitive could not be cast to its rich form.
    #[error("{key} could not be cast from storage: {source}")]
    Cast { key: String, source: TypeError },

    /// A type reduced a value to something storage cannot hold.
    #[error("primitive value for {key} is not a scalar")]
    NonScalarPrimitive { key: String },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Persistence(#[from] PersistError),
}

/// Aggregate validation failure carrying every invalid field.
///
/// Raised once, after the full validation sweep; entries keep the order
/// in which fields were found invalid.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} attribute(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: IndexMap<String, String>,
}

/// Failure reported by a persistence backend.
#[derive(Debug, Error)]
#[error("persistence failed: {message}")]
pub struct PersistError {
    pub message: String,
}

impl PersistError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
