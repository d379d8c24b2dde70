//! Veneer: a typed attribute layer over primitive record storage.
//!
//! Records persist nothing but primitives: strings, numbers, booleans,
//! null. Veneer sits between that raw storage and application code,
//! letting a record declare a type per attribute that governs how stored
//! primitives cast to rich values and back, whether null is acceptable,
//! which default to inject before persistence, and how the field takes
//! part in validation.
//!
//! # Core Concepts
//!
//! - **Attribute types**: per-field cast/validate contracts via
//!   [`AttributeType`]
//! - **Deferred errors**: bad data never raises at the point of entry;
//!   it lands in the [`ErrorLedger`] so one save attempt reports every
//!   invalid field at once
//! - **Write protection**: read-only keys with a scoped
//!   [`UnguardedScope`] bypass for trusted internal paths
//! - **Value objects**: canonicalizing wrappers like [`Country`] that
//!   either resolve fully at construction or fail
//!
//! # Example
//!
//! ```rust
//! use veneer::{AttributeType, AttributeValue, Schema, TypedRecord};
//!
//! let schema = Schema::builder()
//!     .timestamps(false)
//!     .attribute("title", AttributeType::text())
//!     .attribute("age", AttributeType::integer().unsigned(true).nullable(true))
//!     .build();
//!
//! let mut record = TypedRecord::new(schema);
//!
//! record.set("title", "  Typed storage  ").unwrap();
//! assert_eq!(
//!     record.get("title").unwrap(),
//!     AttributeValue::Str("Typed storage".into())
//! );
//!
//! // Invalid data is deferred into the ledger, not raised here.
//! record.set("age", -40).unwrap();
//! assert!(record.errors().has("age"));
//!
//! // The aggregate pass reports everything at once.
//! let err = record.validate().unwrap_err();
//! assert!(err.errors.contains_key("age"));
//! ```

pub mod core;
pub mod guard;
pub mod ledger;
pub mod record;
pub mod types;
pub mod values;

// Re-export commonly used types
pub use crate::core::{AttributeValue, Primitive};
pub use crate::guard::{is_unguarded, unguarded, ReadOnlySet, UnguardedScope};
pub use crate::ledger::ErrorLedger;
pub use crate::record::{
    Decorations, PersistError, Persistence, RecordBuilder, RecordError, RecordInitializer,
    RelationOracle, Schema, SchemaBuilder, TypedRecord, ValidationErrors, CREATED_AT, UPDATED_AT,
};
pub use crate::types::{AttributeType, TypeError, TypeKind, DEFAULT_DATETIME_FORMAT};
pub use crate::values::{Country, CountryDirectory, CountryError, ReplacementRule, ReplacementRules};
