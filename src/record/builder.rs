//! Builder for constructing typed records.
//!
//! Everything the original discovered dynamically (mutators by naming
//! convention, initializers by trait reflection) is registered here
//! explicitly before `build()` assembles the record.

use crate::core::{AttributeValue, Primitive};
use crate::record::engine::TypedRecord;
use crate::record::error::RecordError;
use crate::record::hooks::{
    Decorations, GetMutator, LifecycleHook, RecordInitializer, RelationOracle, SetMutator,
};
use crate::record::schema::Schema;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Builder for [`TypedRecord`] with a fluent registration API.
///
/// `build()` runs the construction lifecycle in a fixed order:
/// constructing hooks, the initializer `init` pass, type registry
/// materialization, the initializer `after_init` pass, hydration of raw
/// attributes, guarded fill of initial attributes, constructed hooks.
pub struct RecordBuilder {
    schema: Schema,
    raw: IndexMap<String, Primitive>,
    attributes: Vec<(String, AttributeValue)>,
    initializers: Vec<Box<dyn RecordInitializer>>,
    constructing: Vec<LifecycleHook>,
    constructed: Vec<LifecycleHook>,
    get_mutators: HashMap<String, GetMutator>,
    set_mutators: HashMap<String, SetMutator>,
    decorations: Option<Box<dyn Decorations>>,
    relations: Option<Box<dyn RelationOracle>>,
    validates: bool,
}

impl RecordBuilder {
    pub(crate) fn new(schema: Schema) -> Self {
        Self {
            schema,
            raw: IndexMap::new(),
            attributes: Vec::new(),
            initializers: Vec::new(),
            constructing: Vec::new(),
            constructed: Vec::new(),
            get_mutators: HashMap::new(),
            set_mutators: HashMap::new(),
            decorations: None,
            relations: None,
            validates: true,
        }
    }

    /// Hydrate raw storage wholesale, as when materializing a persisted
    /// record. Bypasses the set pipeline.
    pub fn raw(mut self, attributes: IndexMap<String, Primitive>) -> Self {
        self.raw = attributes;
        self
    }

    /// Queue an initial attribute, assigned through the guarded set
    /// pipeline after construction.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Register a read transform for a key.
    pub fn get_mutator<F>(mut self, key: impl Into<String>, mutator: F) -> Self
    where
        F: Fn(AttributeValue) -> AttributeValue + Send + Sync + 'static,
    {
        self.get_mutators.insert(key.into(), Box::new(mutator));
        self
    }

    /// Register a write hook for a key. The hook owns the raw storage
    /// write; the engine re-reads the key afterwards.
    pub fn set_mutator<F>(mut self, key: impl Into<String>, mutator: F) -> Self
    where
        F: Fn(&mut IndexMap<String, Primitive>, AttributeValue) + Send + Sync + 'static,
    {
        self.set_mutators.insert(key.into(), Box::new(mutator));
        self
    }

    /// Attach the decorated-attribute overlay.
    pub fn decorations(mut self, decorations: impl Decorations + 'static) -> Self {
        self.decorations = Some(Box::new(decorations));
        self
    }

    /// Attach the relation-existence oracle.
    pub fn relations(mut self, relations: impl RelationOracle + 'static) -> Self {
        self.relations = Some(Box::new(relations));
        self
    }

    /// Register a composed capability's initializer.
    pub fn initializer(mut self, initializer: impl RecordInitializer + 'static) -> Self {
        self.initializers.push(Box::new(initializer));
        self
    }

    /// Observe the record before any type initialization.
    pub fn on_constructing<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut TypedRecord) + Send + Sync + 'static,
    {
        self.constructing.push(Box::new(hook));
        self
    }

    /// Observe the fully constructed record.
    pub fn on_constructed<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut TypedRecord) + Send + Sync + 'static,
    {
        self.constructed.push(Box::new(hook));
        self
    }

    /// Enable or disable the pre-save validation pass. On by default.
    pub fn validates(mut self, validates: bool) -> Self {
        self.validates = validates;
        self
    }

    /// Assemble the record.
    ///
    /// Fails only if an initial attribute hits a contract violation
    /// (e.g. a read-only key); data-validity problems in initial
    /// attributes land in the ledger as usual.
    pub fn build(self) -> Result<TypedRecord, RecordError> {
        let RecordBuilder {
            schema,
            raw,
            attributes,
            initializers,
            constructing,
            constructed,
            get_mutators,
            set_mutators,
            decorations,
            relations,
            validates,
        } = self;

        let mut record = TypedRecord::bare(
            schema,
            get_mutators,
            set_mutators,
            decorations,
            relations,
            validates,
        );

        for hook in &constructing {
            hook(&mut record);
        }

        for initializer in &initializers {
            initializer.init(&mut record);
        }

        record.materialize_registry();

        for initializer in &initializers {
            initializer.after_init(&mut record);
        }

        if !raw.is_empty() {
            record.hydrate(raw);
        }

        for (key, value) in attributes {
            record.set(&key, value)?;
        }

        for hook in &constructed {
            hook(&mut record);
        }

        Ok(record)
    }
}
