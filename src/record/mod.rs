//! The attribute engine and its construction machinery.
//!
//! [`TypedRecord`] orchestrates the typed layer against raw storage:
//! typed getters and setters, the full validation sweep, default
//! injection before persistence, and flattening to plain output. The
//! engine's view of the outside world is limited to the boundary traits
//! in [`hooks`].

pub mod builder;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod schema;

pub use builder::RecordBuilder;
pub use engine::TypedRecord;
pub use error::{PersistError, RecordError, ValidationErrors};
pub use hooks::{Decorations, Persistence, RecordInitializer, RelationOracle};
pub use schema::{Schema, SchemaBuilder, CREATED_AT, UPDATED_AT};
