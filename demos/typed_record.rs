//! Walkthrough of the typed attribute pipeline: declared types, deferred
//! errors, read-only protection, and default injection on save.

use indexmap::IndexMap;
use veneer::{
    unguarded, AttributeType, PersistError, Persistence, Primitive, RelationOracle, Schema,
    TypedRecord,
};

struct ConsoleStore;

impl Persistence for ConsoleStore {
    fn persist(&mut self, attributes: &IndexMap<String, Primitive>) -> Result<(), PersistError> {
        println!("persisting:");
        for (key, value) in attributes {
            println!("  {key} = {value}");
        }
        Ok(())
    }
}

struct Authors;

impl RelationOracle for Authors {
    fn exists(&self, relation: &str) -> bool {
        relation == "author"
    }
}

fn main() {
    let schema = Schema::builder()
        .timestamps(false)
        .attribute("title", AttributeType::text())
        .attribute("age_limit", AttributeType::integer().unsigned(true).nullable(true))
        .attribute("status", AttributeType::text().default_value("draft"))
        .attribute("author_id", AttributeType::relation())
        .read_only("status")
        .build();

    let mut record = TypedRecord::builder(schema)
        .relations(Authors)
        .build()
        .expect("no initial attributes");

    // Bad data never raises here; it is recorded per field.
    record.set("title", "   ").unwrap();
    record.set("age_limit", -1).unwrap();

    match record.validate() {
        Ok(()) => println!("valid"),
        Err(err) => {
            println!("{err}:");
            for (key, message) in &err.errors {
                println!("  {key}: {message}");
            }
        }
    }

    // Setting a field again clears its recorded error.
    record.set("title", "Typed attributes").unwrap();
    record.set("age_limit", 18).unwrap();
    record.set("author_id", 7).unwrap();

    assert!(record.set("status", "published").is_err());
    unguarded(|| record.set("status", "published")).unwrap();

    // Defaults fill absent keys just before persisting; "status" was set
    // explicitly, so it keeps its value.
    record.save(&mut ConsoleStore).unwrap();
}
