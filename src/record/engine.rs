//! The attribute engine: typed reads and writes over raw storage.

use crate::core::{AttributeValue, Primitive};
use crate::guard::ReadOnlySet;
use crate::ledger::ErrorLedger;
use crate::record::builder::RecordBuilder;
use crate::record::error::{RecordError, ValidationErrors};
use crate::record::hooks::{Decorations, GetMutator, Persistence, RelationOracle, SetMutator};
use crate::record::schema::{Schema, CREATED_AT, UPDATED_AT};
use crate::types::{AttributeType, TypeKind, DEFAULT_DATETIME_FORMAT};
use indexmap::IndexMap;
use std::collections::HashMap;

/// A record whose attributes are governed by per-key types.
///
/// Reads cast stored primitives up to rich values; writes normalize,
/// validate, and cast back down, deferring data-validity failures into
/// the error ledger so a save attempt can report every bad field at once.
pub struct TypedRecord {
    schema: Schema,
    registry: IndexMap<String, AttributeType>,
    attributes: IndexMap<String, Primitive>,
    original: IndexMap<String, Primitive>,
    ledger: ErrorLedger,
    read_only: ReadOnlySet,
    get_mutators: HashMap<String, GetMutator>,
    set_mutators: HashMap<String, SetMutator>,
    decorations: Option<Box<dyn Decorations>>,
    relations: Option<Box<dyn RelationOracle>>,
    validates: bool,
}

impl std::fmt::Debug for TypedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedRecord")
            .field("schema", &self.schema)
            .field("registry", &self.registry)
            .field("attributes", &self.attributes)
            .field("original", &self.original)
            .field("ledger", &self.ledger)
            .field("read_only", &self.read_only)
            .field("get_mutators", &self.get_mutators.keys().collect::<Vec<_>>())
            .field("set_mutators", &self.set_mutators.keys().collect::<Vec<_>>())
            .field("decorations", &self.decorations.is_some())
            .field("relations", &self.relations.is_some())
            .field("validates", &self.validates)
            .finish()
    }
}

impl TypedRecord {
    /// Start building a record from a schema.
    pub fn builder(schema: Schema) -> RecordBuilder {
        RecordBuilder::new(schema)
    }

    /// Build a record with no initial attributes or collaborators.
    pub fn new(schema: Schema) -> Self {
        Self::builder(schema)
            .build()
            .expect("record build without initial attributes cannot fail")
    }

    pub(crate) fn bare(
        schema: Schema,
        get_mutators: HashMap<String, GetMutator>,
        set_mutators: HashMap<String, SetMutator>,
        decorations: Option<Box<dyn Decorations>>,
        relations: Option<Box<dyn RelationOracle>>,
        validates: bool,
    ) -> Self {
        Self {
            schema,
            registry: IndexMap::new(),
            attributes: IndexMap::new(),
            original: IndexMap::new(),
            ledger: ErrorLedger::new(),
            read_only: ReadOnlySet::default(),
            get_mutators,
            set_mutators,
            decorations,
            relations,
            validates,
        }
    }

    /// Materialize the type registry and write protection from the
    /// schema. Runs between the two initializer passes during build.
    pub(crate) fn materialize_registry(&mut self) {
        self.registry = self.schema.registry();
        self.read_only = ReadOnlySet::new(self.schema.read_only_keys().iter().cloned());
    }

    /// Read an attribute.
    ///
    /// Decorated keys defer to the overlay. Typed keys refuse to read
    /// while the ledger holds an error for them, cast the stored
    /// primitive, and apply the get-mutator if one is registered.
    /// Untyped keys fall through to raw storage.
    pub fn get(&self, key: &str) -> Result<AttributeValue, RecordError> {
        if let Some(decorations) = &self.decorations {
            if decorations.has_decorated_attribute(key) {
                return Ok(decorations.decorated_attribute(key));
            }
        }

        if let Some(ty) = self.registry.get(key) {
            if let Some(message) = self.ledger.get(key) {
                return Err(RecordError::Erroneous {
                    key: key.to_string(),
                    message: message.to_string(),
                });
            }

            let raw = match self.attributes.get(key) {
                None => return Ok(AttributeValue::Null),
                Some(raw) if raw.is_null() => return Ok(AttributeValue::Null),
                Some(raw) => raw,
            };

            let cast = ty
                .cast_from_primitive(raw)
                .map_err(|source| RecordError::Cast {
                    key: key.to_string(),
                    source,
                })?;

            return Ok(match self.get_mutators.get(key) {
                Some(mutator) => mutator(cast),
                None => cast,
            });
        }

        Ok(self
            .attributes
            .get(key)
            .cloned()
            .map(AttributeValue::from)
            .unwrap_or(AttributeValue::Null))
    }

    /// Write an attribute.
    ///
    /// Fails fast only on contract violations: a guarded write to a
    /// read-only key, or a value storage cannot hold. Data-validity
    /// failures are recorded into the ledger and the stored value is
    /// nulled instead.
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<&mut Self, RecordError> {
        if self.read_only.is_read_only(key) {
            return Err(RecordError::ReadOnly {
                key: key.to_string(),
            });
        }

        self.ledger.clear(key);

        let mut value = value.into();

        if let AttributeValue::Str(s) = &value {
            let trimmed = s.trim();
            value = if trimmed.is_empty() {
                AttributeValue::Null
            } else {
                AttributeValue::Str(trimmed.to_string())
            };
        }

        if let Some(mutator) = self.set_mutators.get(key) {
            mutator(&mut self.attributes, value);
            value = self
                .attributes
                .get(key)
                .cloned()
                .map(AttributeValue::from)
                .unwrap_or(AttributeValue::Null);
        }

        let stored = if value.is_null() {
            Primitive::Null
        } else {
            match self.registry.get(key) {
                Some(ty) => {
                    match ty
                        .validate(&value)
                        .and_then(|_| ty.cast_to_primitive(&value))
                    {
                        Ok(json) => match Primitive::from_json(&json) {
                            Some(p) if !p.is_null() => p,
                            _ => {
                                return Err(RecordError::NonScalarPrimitive {
                                    key: key.to_string(),
                                })
                            }
                        },
                        Err(err) => {
                            self.ledger.record(key, err.to_string());
                            Primitive::Null
                        }
                    }
                }
                None => match value.as_primitive() {
                    Some(p) => p,
                    None => {
                        return Err(RecordError::NonScalarPrimitive {
                            key: key.to_string(),
                        })
                    }
                },
            }
        };

        self.attributes.insert(key.to_string(), stored);
        Ok(self)
    }

    /// Guarded bulk assignment through [`set`](Self::set).
    pub fn fill(
        &mut self,
        pairs: impl IntoIterator<Item = (String, AttributeValue)>,
    ) -> Result<&mut Self, RecordError> {
        for (key, value) in pairs {
            self.set(&key, value)?;
        }
        Ok(self)
    }

    /// Validate every registered attribute, deferring each failure into
    /// the ledger, then raise one aggregate error if anything is bad.
    ///
    /// The identifier is skipped; clean timestamp keys are skipped; keys
    /// already in error keep their recorded message. Null values on
    /// attributes that are neither nullable nor defaulted become
    /// "required" entries; non-null relation keys are checked against
    /// the relation oracle.
    pub fn validate(&mut self) -> Result<(), ValidationErrors> {
        for (key, ty) in &self.registry {
            if key == self.schema.identifier() {
                continue;
            }

            if self.ledger.has(key) {
                continue;
            }

            if (key == CREATED_AT || key == UPDATED_AT)
                && self.attributes.get(key) == self.original.get(key)
            {
                continue;
            }

            let raw = self.attributes.get(key).cloned().unwrap_or(Primitive::Null);

            if raw.is_null() {
                if !ty.is_nullable() && !ty.has_default() {
                    self.ledger.record(key.as_str(), format!("{key} is required"));
                }
                continue;
            }

            if ty.is_relation() {
                let relation = relation_name(key);
                let exists = self
                    .relations
                    .as_ref()
                    .map(|oracle| oracle.exists(relation))
                    .unwrap_or(false);

                if !exists {
                    self.ledger
                        .record(key.as_str(), format!("{key} relation #{raw} does not exist"));
                }
            }
        }

        if !self.ledger.is_empty() {
            tracing::debug!(invalid = self.ledger.len(), "validation sweep failed");
            return Err(ValidationErrors {
                errors: self.ledger.all().clone(),
            });
        }

        Ok(())
    }

    /// Persist through the backend.
    ///
    /// Defaults are injected for registered types whose key is absent
    /// from storage (absent, not null), the validation pass runs unless
    /// disabled, and a successful persist re-snapshots the clean state.
    pub fn save(&mut self, store: &mut dyn Persistence) -> Result<(), RecordError> {
        for (key, ty) in &self.registry {
            if let Some(default) = ty.default() {
                if !self.attributes.contains_key(key) {
                    tracing::debug!(attribute = %key, "injecting default before save");
                    self.attributes.insert(key.clone(), default.clone());
                }
            }
        }

        if self.validates {
            self.validate()?;
        }

        store.persist(&self.attributes)?;
        self.original = self.attributes.clone();
        Ok(())
    }

    /// Cast a primitive through the key's type, without consulting
    /// mutators or the ledger. Used by serialization paths.
    pub fn cast_attribute(
        &self,
        key: &str,
        value: &Primitive,
    ) -> Result<AttributeValue, RecordError> {
        if value.is_null() {
            return Ok(AttributeValue::Null);
        }

        match self.registry.get(key) {
            Some(ty) => ty
                .cast_from_primitive(value)
                .map_err(|source| RecordError::Cast {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(AttributeValue::from(value.clone())),
        }
    }

    /// Flatten to a plain output mapping.
    ///
    /// Every non-null value is re-cast through its type: countries yield
    /// their canonical code, datetimes a formatted string, maps an
    /// object literal; everything else passes through unchanged.
    pub fn to_array(&self) -> Result<serde_json::Map<String, serde_json::Value>, RecordError> {
        let mut out = serde_json::Map::new();

        for (key, raw) in &self.attributes {
            if raw.is_null() {
                out.insert(key.clone(), serde_json::Value::Null);
                continue;
            }

            let Some(ty) = self.registry.get(key) else {
                out.insert(key.clone(), raw.to_json());
                continue;
            };

            let cast = ty
                .cast_from_primitive(raw)
                .map_err(|source| RecordError::Cast {
                    key: key.clone(),
                    source,
                })?;

            let rendered = match cast {
                AttributeValue::Country(c) => serde_json::Value::from(c.iso()),
                AttributeValue::DateTime(dt) => {
                    let format = match ty.kind() {
                        TypeKind::DateTime { format } => {
                            format.as_deref().unwrap_or(DEFAULT_DATETIME_FORMAT)
                        }
                        _ => DEFAULT_DATETIME_FORMAT,
                    };
                    serde_json::Value::from(dt.format(format).to_string())
                }
                AttributeValue::Map(m) => serde_json::Value::Object(m),
                _ => raw.to_json(),
            };

            out.insert(key.clone(), rendered);
        }

        Ok(out)
    }

    /// Replace raw storage wholesale, as when materializing from the
    /// backend. Resets the ledger and the clean snapshot.
    pub fn hydrate(&mut self, attributes: IndexMap<String, Primitive>) {
        self.attributes = attributes;
        self.original = self.attributes.clone();
        self.ledger = ErrorLedger::new();
    }

    /// Write one raw primitive directly, bypassing the set pipeline.
    /// The key becomes dirty; the clean snapshot is untouched.
    pub fn set_raw(&mut self, key: impl Into<String>, value: impl Into<Primitive>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// The raw primitive storage.
    pub fn raw_attributes(&self) -> &IndexMap<String, Primitive> {
        &self.attributes
    }

    /// Whether a key differs from the last persisted state.
    pub fn is_dirty(&self, key: &str) -> bool {
        self.attributes.get(key) != self.original.get(key)
    }

    /// Whether a type is registered for the key.
    pub fn has_type(&self, key: &str) -> bool {
        self.registry.contains_key(key)
    }

    /// The registered type for the key, if any.
    pub fn attribute_type(&self, key: &str) -> Option<&AttributeType> {
        self.registry.get(key)
    }

    /// Kind names per registered key, in registry order.
    pub fn type_names(&self) -> IndexMap<String, &'static str> {
        self.registry
            .iter()
            .map(|(key, ty)| (key.clone(), ty.name()))
            .collect()
    }

    /// The deferred error ledger.
    pub fn errors(&self) -> &ErrorLedger {
        &self.ledger
    }

    /// Clear the recorded error for a key, making it readable again.
    pub fn clear_error(&mut self, key: &str) {
        self.ledger.clear(key);
    }

    /// Enable or disable the pre-save validation pass.
    pub fn set_validates(&mut self, validates: bool) {
        self.validates = validates;
    }
}

/// Relation accessor name for a foreign-key attribute: one trailing
/// `_id` stripped, e.g. `author_id` reaches the `author` relation.
fn relation_name(key: &str) -> &str {
    key.strip_suffix("_id").filter(|s| !s.is_empty()).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::unguarded;
    use crate::record::error::PersistError;
    use crate::types::AttributeType;
    use crate::values::{CountryDirectory, ReplacementRule, ReplacementRules};
    use std::sync::Arc;

    struct Directory;

    impl CountryDirectory for Directory {
        fn exists_by_iso(&self, iso: &str) -> bool {
            matches!(iso, "US" | "DE")
        }

        fn exists_by_name(&self, name: &str) -> bool {
            matches!(name, "United States" | "Germany")
        }

        fn iso_by_name(&self, name: &str) -> Option<String> {
            match name {
                "United States" => Some("US".to_string()),
                "Germany" => Some("DE".to_string()),
                _ => None,
            }
        }

        fn name_by_iso(&self, iso: &str) -> Option<String> {
            match iso {
                "US" => Some("United States".to_string()),
                "DE" => Some("Germany".to_string()),
                _ => None,
            }
        }
    }

    struct NoRules;

    impl ReplacementRules for NoRules {
        fn find(&self, _rule_type: &str, _from: &str) -> Option<ReplacementRule> {
            None
        }
    }

    struct Oracle(bool);

    impl RelationOracle for Oracle {
        fn exists(&self, _relation: &str) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: Vec<IndexMap<String, Primitive>>,
    }

    impl Persistence for MemoryStore {
        fn persist(&mut self, attributes: &IndexMap<String, Primitive>) -> Result<(), PersistError> {
            self.saved.push(attributes.clone());
            Ok(())
        }
    }

    fn schema() -> Schema {
        Schema::builder()
            .timestamps(false)
            .attribute("title", AttributeType::text())
            .attribute("age", AttributeType::integer().unsigned(true).nullable(true))
            .attribute("author_id", AttributeType::relation())
            .build()
    }

    #[test]
    fn set_trims_text_and_coerces_empty_to_null() {
        let mut record = TypedRecord::new(schema());

        record.set("title", "  padded  ").unwrap();
        assert_eq!(record.get("title").unwrap(), AttributeValue::Str("padded".into()));

        record.set("title", "   ").unwrap();
        assert_eq!(
            record.raw_attributes().get("title"),
            Some(&Primitive::Null)
        );
    }

    #[test]
    fn invalid_value_lands_in_ledger_and_nulls_the_attribute() {
        let mut record = TypedRecord::new(schema());

        record.set("age", "not a number").unwrap();

        assert!(record.errors().has("age"));
        assert_eq!(record.raw_attributes().get("age"), Some(&Primitive::Null));
    }

    #[test]
    fn reading_an_attribute_in_error_fails() {
        let mut record = TypedRecord::new(schema());
        record.set("age", -3).unwrap();

        let err = record.get("age").unwrap_err();
        assert!(matches!(err, RecordError::Erroneous { .. }));

        record.clear_error("age");
        assert_eq!(record.get("age").unwrap(), AttributeValue::Null);
    }

    #[test]
    fn a_clean_set_clears_the_previous_error() {
        let mut record = TypedRecord::new(schema());

        record.set("age", -3).unwrap();
        assert!(record.errors().has("age"));

        record.set("age", 30).unwrap();
        assert!(!record.errors().has("age"));
        assert_eq!(record.get("age").unwrap(), AttributeValue::Int(30));
    }

    #[test]
    fn guarded_write_to_read_only_fails_fast() {
        let schema = Schema::builder()
            .timestamps(false)
            .attribute("status", AttributeType::text())
            .read_only("status")
            .build();
        let mut record = TypedRecord::new(schema);

        let err = record.set("status", "published").unwrap_err();
        assert!(matches!(err, RecordError::ReadOnly { .. }));
    }

    #[test]
    fn unguarded_write_succeeds_and_protection_returns() {
        let schema = Schema::builder()
            .timestamps(false)
            .attribute("status", AttributeType::text())
            .read_only("status")
            .build();
        let mut record = TypedRecord::new(schema);

        unguarded(|| record.set("status", "published")).unwrap();
        assert_eq!(
            record.get("status").unwrap(),
            AttributeValue::Str("published".into())
        );

        assert!(record.set("status", "draft").is_err());
    }

    #[test]
    fn validate_reports_every_invalid_field_at_once() {
        let mut record = TypedRecord::builder(schema())
            .relations(Oracle(false))
            .build()
            .unwrap();

        record.set("age", -3).unwrap();
        record.set("author_id", 7).unwrap();

        let err = record.validate().unwrap_err();

        assert_eq!(err.errors.len(), 3);
        assert_eq!(err.errors.get("title").unwrap(), "title is required");
        assert!(err.errors.get("age").unwrap().contains("unsigned"));
        assert_eq!(
            err.errors.get("author_id").unwrap(),
            "author_id relation #7 does not exist"
        );
    }

    #[test]
    fn validate_passes_when_relations_exist() {
        let mut record = TypedRecord::builder(schema())
            .relations(Oracle(true))
            .build()
            .unwrap();

        record.set("title", "a title").unwrap();
        record.set("author_id", 7).unwrap();

        assert!(record.validate().is_ok());
    }

    #[test]
    fn nullable_and_defaulted_attributes_may_stay_null() {
        let schema = Schema::builder()
            .timestamps(false)
            .attribute("age", AttributeType::integer().nullable(true))
            .attribute("status", AttributeType::text().default_value("draft"))
            .build();
        let mut record = TypedRecord::new(schema);

        assert!(record.validate().is_ok());
    }

    #[test]
    fn clean_timestamps_are_skipped_dirty_ones_are_not() {
        let schema = Schema::builder()
            .attribute("title", AttributeType::text().nullable(true))
            .build();
        let mut record = TypedRecord::new(schema);

        // Never touched: both timestamp keys are clean and skipped.
        assert!(record.validate().is_ok());

        record.set(UPDATED_AT, "").unwrap();
        let err = record.validate().unwrap_err();

        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors.get(UPDATED_AT).unwrap(), "updated_at is required");
    }

    #[test]
    fn save_injects_defaults_for_absent_keys_only() {
        let schema = Schema::builder()
            .timestamps(false)
            .attribute("status", AttributeType::text().default_value("draft"))
            .attribute("count", AttributeType::integer().default_value(0))
            .build();
        let mut record = TypedRecord::new(schema);
        let mut store = MemoryStore::default();

        record.set("count", 5).unwrap();
        record.save(&mut store).unwrap();

        let saved = &store.saved[0];
        assert_eq!(saved.get("status"), Some(&Primitive::Str("draft".into())));
        assert_eq!(saved.get("count"), Some(&Primitive::Int(5)));
    }

    #[test]
    fn explicitly_set_falsy_values_defeat_default_injection() {
        let schema = Schema::builder()
            .timestamps(false)
            .attribute("count", AttributeType::integer().default_value(10))
            .build();
        let mut record = TypedRecord::new(schema);
        let mut store = MemoryStore::default();

        record.set("count", 0).unwrap();
        record.save(&mut store).unwrap();

        assert_eq!(store.saved[0].get("count"), Some(&Primitive::Int(0)));
    }

    #[test]
    fn failed_validation_aborts_the_save() {
        let mut record = TypedRecord::new(schema());
        let mut store = MemoryStore::default();

        let err = record.save(&mut store).unwrap_err();

        assert!(matches!(err, RecordError::Validation(_)));
        assert!(store.saved.is_empty());
    }

    #[test]
    fn disabling_validation_lets_a_save_through() {
        let mut record = TypedRecord::new(schema());
        let mut store = MemoryStore::default();

        record.set_validates(false);
        record.save(&mut store).unwrap();

        assert_eq!(store.saved.len(), 1);
    }

    #[test]
    fn save_resnapshots_the_clean_state() {
        let mut record = TypedRecord::builder(schema())
            .relations(Oracle(true))
            .build()
            .unwrap();
        let mut store = MemoryStore::default();

        record.set("title", "a title").unwrap();
        record.set("author_id", 1).unwrap();
        assert!(record.is_dirty("title"));

        record.save(&mut store).unwrap();

        assert!(!record.is_dirty("title"));
        assert!(!record.is_dirty("author_id"));
    }

    #[test]
    fn get_mutator_transforms_the_cast_value() {
        let mut record = TypedRecord::builder(schema())
            .get_mutator("title", |value| match value {
                AttributeValue::Str(s) => AttributeValue::Str(s.to_uppercase()),
                other => other,
            })
            .build()
            .unwrap();

        record.set("title", "quiet").unwrap();

        assert_eq!(record.get("title").unwrap(), AttributeValue::Str("QUIET".into()));
        // Storage keeps the unmutated form.
        assert_eq!(
            record.raw_attributes().get("title"),
            Some(&Primitive::Str("quiet".into()))
        );
    }

    #[test]
    fn set_mutator_owns_the_raw_write() {
        let mut record = TypedRecord::builder(schema())
            .set_mutator("title", |attributes, value| {
                let slug = match value {
                    AttributeValue::Str(s) => s.replace(' ', "-"),
                    other => other.to_string(),
                };
                attributes.insert("title".to_string(), Primitive::Str(slug));
            })
            .build()
            .unwrap();

        record.set("title", "hello world").unwrap();

        assert_eq!(
            record.get("title").unwrap(),
            AttributeValue::Str("hello-world".into())
        );
    }

    #[test]
    fn decorated_attributes_shadow_typed_lookup() {
        struct FullName;

        impl Decorations for FullName {
            fn has_decorated_attribute(&self, key: &str) -> bool {
                key == "title"
            }

            fn decorated_attribute(&self, _key: &str) -> AttributeValue {
                AttributeValue::Str("decorated".into())
            }
        }

        let mut record = TypedRecord::builder(schema())
            .decorations(FullName)
            .build()
            .unwrap();
        record.set_raw("title", "stored");

        assert_eq!(
            record.get("title").unwrap(),
            AttributeValue::Str("decorated".into())
        );
    }

    #[test]
    fn untyped_keys_fall_through_to_raw_storage() {
        let mut record = TypedRecord::new(schema());

        record.set("nickname", "ada").unwrap();

        assert_eq!(record.get("nickname").unwrap(), AttributeValue::Str("ada".into()));
        assert!(!record.has_type("nickname"));
    }

    #[test]
    fn untyped_rich_values_cannot_reach_storage() {
        let mut record = TypedRecord::new(schema());

        let err = record
            .set("blob", AttributeValue::Map(serde_json::Map::new()))
            .unwrap_err();

        assert!(matches!(err, RecordError::NonScalarPrimitive { .. }));
    }

    #[test]
    fn cast_attribute_ignores_ledger_and_mutators() {
        let mut record = TypedRecord::builder(schema())
            .get_mutator("age", |_| AttributeValue::Int(999))
            .build()
            .unwrap();

        record.set("age", -3).unwrap();
        assert!(record.errors().has("age"));

        let cast = record.cast_attribute("age", &Primitive::Int(7)).unwrap();
        assert_eq!(cast, AttributeValue::Int(7));
    }

    #[test]
    fn to_array_renders_rich_values() {
        let schema = Schema::builder()
            .timestamps(false)
            .attribute("title", AttributeType::text())
            .attribute("seen_at", AttributeType::datetime())
            .attribute(
                "country",
                AttributeType::country(Arc::new(Directory), Arc::new(NoRules)),
            )
            .build();
        let mut record = TypedRecord::new(schema);

        record.set("title", "hello").unwrap();
        record.set("seen_at", "2024-06-01 12:30:00").unwrap();
        record.set("country", "United States").unwrap();
        record.set("untyped", 4).unwrap();
        record.set_raw("missing", Primitive::Null);

        let out = record.to_array().unwrap();

        assert_eq!(out.get("title").unwrap(), "hello");
        assert_eq!(out.get("seen_at").unwrap(), "2024-06-01 12:30:00");
        assert_eq!(out.get("country").unwrap(), "US");
        assert_eq!(out.get("untyped").unwrap(), 4);
        assert!(out.get("missing").unwrap().is_null());
    }

    #[test]
    fn hydration_resets_errors_and_the_clean_snapshot() {
        let mut record = TypedRecord::new(schema());
        record.set("age", -3).unwrap();
        assert!(record.errors().has("age"));

        let mut raw = IndexMap::new();
        raw.insert("title".to_string(), Primitive::Str("stored".into()));
        raw.insert("age".to_string(), Primitive::Int(44));
        record.hydrate(raw);

        assert!(record.errors().is_empty());
        assert!(!record.is_dirty("title"));
        assert_eq!(record.get("age").unwrap(), AttributeValue::Int(44));
    }

    #[test]
    fn type_names_expose_the_registry() {
        let record = TypedRecord::new(schema());
        let names = record.type_names();

        assert_eq!(names.get("id"), Some(&"integer"));
        assert_eq!(names.get("author_id"), Some(&"relation"));
    }

    #[test]
    fn relation_names_strip_one_key_suffix() {
        assert_eq!(relation_name("author_id"), "author");
        assert_eq!(relation_name("parent_comment_id"), "parent_comment");
        assert_eq!(relation_name("owner"), "owner");
        assert_eq!(relation_name("_id"), "_id");
    }
}
