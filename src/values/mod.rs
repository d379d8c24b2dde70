//! Value objects: construction-validated wrappers around one canonical
//! primitive. A value object either resolves fully or fails to construct.

pub mod country;

pub use country::{Country, CountryDirectory, CountryError, ReplacementRule, ReplacementRules};
