//! Record schemas: declared attribute types and write protection.
//!
//! A schema is the shared template a record is built from. At record
//! construction it materializes into a type registry by merging built-in
//! defaults (the identifier, and the timestamp pair when enabled) with
//! the declared types; declarations win on key collision.

use crate::types::AttributeType;
use indexmap::IndexMap;

/// Key of the creation timestamp registered by [`Schema`].
pub const CREATED_AT: &str = "created_at";

/// Key of the update timestamp registered by [`Schema`].
pub const UPDATED_AT: &str = "updated_at";

const DEFAULT_IDENTIFIER: &str = "id";

/// Declared shape of a record's typed attributes.
#[derive(Debug, Clone)]
pub struct Schema {
    identifier: String,
    timestamps: bool,
    types: IndexMap<String, AttributeType>,
    read_only: Vec<String>,
}

impl Schema {
    /// Start declaring a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// The identifier attribute key.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Whether the timestamp pair is registered.
    pub fn has_timestamps(&self) -> bool {
        self.timestamps
    }

    /// Keys protected from guarded writes.
    pub fn read_only_keys(&self) -> &[String] {
        &self.read_only
    }

    /// Materialize the full type registry: built-ins first, declared
    /// types merged over them.
    pub fn registry(&self) -> IndexMap<String, AttributeType> {
        let mut registry = IndexMap::new();

        registry.insert(
            self.identifier.clone(),
            AttributeType::integer().unsigned(true),
        );

        if self.timestamps {
            registry.insert(CREATED_AT.to_string(), AttributeType::datetime());
            registry.insert(UPDATED_AT.to_string(), AttributeType::datetime());
        }

        for (key, ty) in &self.types {
            registry.insert(key.clone(), ty.clone());
        }

        registry
    }
}

/// Fluent builder for [`Schema`].
///
/// # Example
///
/// ```rust
/// use veneer::record::Schema;
/// use veneer::types::AttributeType;
///
/// let schema = Schema::builder()
///     .attribute("title", AttributeType::text())
///     .attribute("age", AttributeType::integer().unsigned(true).nullable(true))
///     .read_only("title")
///     .build();
///
/// assert!(schema.registry().contains_key("id"));
/// assert!(schema.registry().contains_key("title"));
/// ```
pub struct SchemaBuilder {
    identifier: String,
    timestamps: bool,
    types: IndexMap<String, AttributeType>,
    read_only: Vec<String>,
}

impl SchemaBuilder {
    fn new() -> Self {
        Self {
            identifier: DEFAULT_IDENTIFIER.to_string(),
            timestamps: true,
            types: IndexMap::new(),
            read_only: Vec::new(),
        }
    }

    /// Declare a typed attribute. Re-declaring a key replaces it.
    pub fn attribute(mut self, key: impl Into<String>, ty: AttributeType) -> Self {
        self.types.insert(key.into(), ty);
        self
    }

    /// Protect a key from guarded writes.
    pub fn read_only(mut self, key: impl Into<String>) -> Self {
        self.read_only.push(key.into());
        self
    }

    /// Enable or disable the timestamp pair. On by default.
    pub fn timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Rename the identifier attribute. `id` by default.
    pub fn identifier(mut self, key: impl Into<String>) -> Self {
        self.identifier = key.into();
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> Schema {
        Schema {
            identifier: self.identifier,
            timestamps: self.timestamps,
            types: self.types,
            read_only: self.read_only,
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AttributeValue, Primitive};

    #[test]
    fn registry_includes_builtin_identifier() {
        let schema = Schema::builder().timestamps(false).build();
        let registry = schema.registry();

        let id = registry.get("id").unwrap();
        assert_eq!(id.name(), "integer");
        assert!(id.validate(&AttributeValue::Int(-1)).is_err());
    }

    #[test]
    fn timestamps_register_datetime_types() {
        let schema = Schema::builder().build();
        let registry = schema.registry();

        assert_eq!(registry.get(CREATED_AT).unwrap().name(), "datetime");
        assert_eq!(registry.get(UPDATED_AT).unwrap().name(), "datetime");
    }

    #[test]
    fn disabled_timestamps_are_absent() {
        let schema = Schema::builder().timestamps(false).build();
        let registry = schema.registry();

        assert!(!registry.contains_key(CREATED_AT));
        assert!(!registry.contains_key(UPDATED_AT));
    }

    #[test]
    fn declared_types_override_builtins() {
        let schema = Schema::builder()
            .timestamps(false)
            .attribute("id", AttributeType::text())
            .build();

        assert_eq!(schema.registry().get("id").unwrap().name(), "text");
    }

    #[test]
    fn identifier_can_be_renamed() {
        let schema = Schema::builder().identifier("uid").timestamps(false).build();
        let registry = schema.registry();

        assert!(registry.contains_key("uid"));
        assert!(!registry.contains_key("id"));
    }

    #[test]
    fn declared_keys_keep_declaration_order() {
        let schema = Schema::builder()
            .timestamps(false)
            .attribute("b", AttributeType::text())
            .attribute("a", AttributeType::integer().default_value(Primitive::Int(0)))
            .build();

        let registry = schema.registry();
        let keys: Vec<&String> = registry.keys().collect();
        assert_eq!(keys, ["id", "b", "a"]);
    }
}
