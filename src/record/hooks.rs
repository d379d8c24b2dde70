//! Boundary contracts between the record engine and its collaborators.
//!
//! The engine never reaches into persistence, relation traversal, or
//! decorated-attribute plumbing itself; it asks these traits. Mutators
//! and lifecycle hooks are registered explicitly per key at construction
//! rather than discovered by naming convention.

use crate::core::{AttributeValue, Primitive};
use crate::record::error::PersistError;
use crate::record::TypedRecord;
use indexmap::IndexMap;

/// Overlay of virtual, computed attributes consulted before typed lookup.
pub trait Decorations: Send + Sync {
    fn has_decorated_attribute(&self, key: &str) -> bool;
    fn decorated_attribute(&self, key: &str) -> AttributeValue;
}

/// Answers whether the record's relation at an accessor name has an
/// existing target.
pub trait RelationOracle: Send + Sync {
    fn exists(&self, relation: &str) -> bool;
}

/// Persistence backend invoked by [`TypedRecord::save`].
///
/// The engine has already injected defaults and validated by the time
/// this is called; a failure here aborts the save.
pub trait Persistence: Send + Sync {
    fn persist(&mut self, attributes: &IndexMap<String, Primitive>) -> Result<(), PersistError>;
}

/// Per-key transform applied to a cast value on read.
pub type GetMutator = Box<dyn Fn(AttributeValue) -> AttributeValue + Send + Sync>;

/// Per-key write hook that owns the raw storage write; the engine
/// re-reads the key afterwards and continues the pipeline with whatever
/// the mutator stored.
pub type SetMutator = Box<dyn Fn(&mut IndexMap<String, Primitive>, AttributeValue) + Send + Sync>;

/// Observer invoked while a record is being constructed.
pub type LifecycleHook = Box<dyn Fn(&mut TypedRecord) + Send + Sync>;

/// A capability composed into a record, initialized in two fixed passes:
/// every initializer's `init` runs before any `after_init`, in
/// registration order. The type registry materializes between the passes.
pub trait RecordInitializer: Send + Sync {
    fn init(&self, record: &mut TypedRecord) {
        let _ = record;
    }

    fn after_init(&self, record: &mut TypedRecord) {
        let _ = record;
    }
}
