//! Canonicalizing country code value object.
//!
//! A [`Country`] wraps exactly one verified ISO code. Construction either
//! resolves the input to a code that exists in the directory, or fails;
//! there is no partially resolved state observable to callers.
//!
//! Resolution chains three strategies: direct code lookup for two-letter
//! input, full-name lookup, and finally a rewrite through an externally
//! stored replacement rule followed by one more direct attempt.

use thiserror::Error;

/// Lookup service for country codes and display names.
///
/// Implementations are external to this crate: a static table, a database,
/// a remote service. The canonicalizer only asks synchronous questions.
pub trait CountryDirectory: Send + Sync {
    fn exists_by_iso(&self, iso: &str) -> bool;
    fn exists_by_name(&self, name: &str) -> bool;
    fn iso_by_name(&self, name: &str) -> Option<String>;
    fn name_by_iso(&self, iso: &str) -> Option<String>;
}

/// A fallback rewrite rule, e.g. `("country", "Deutschland", "Germany")`.
///
/// Rules live entirely outside this crate; they are looked up during
/// canonicalization and never mutated here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplacementRule {
    pub rule_type: String,
    pub from: String,
    pub to: String,
}

/// Lookup for replacement rules by `(type, from)`.
pub trait ReplacementRules: Send + Sync {
    /// Return the rule matching this type and source value, if any.
    fn find(&self, rule_type: &str, from: &str) -> Option<ReplacementRule>;
}

/// Canonicalization failure, carrying the rejected input.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid country value {value}")]
pub struct CountryError {
    pub value: String,
}

/// A country, held as its canonical ISO code.
///
/// # Example
///
/// ```rust
/// use veneer::values::{Country, CountryDirectory, ReplacementRule, ReplacementRules};
///
/// struct Directory;
///
/// impl CountryDirectory for Directory {
///     fn exists_by_iso(&self, iso: &str) -> bool {
///         iso == "US"
///     }
///     fn exists_by_name(&self, name: &str) -> bool {
///         name == "United States"
///     }
///     fn iso_by_name(&self, name: &str) -> Option<String> {
///         (name == "United States").then(|| "US".to_string())
///     }
///     fn name_by_iso(&self, iso: &str) -> Option<String> {
///         (iso == "US").then(|| "United States".to_string())
///     }
/// }
///
/// struct NoRules;
///
/// impl ReplacementRules for NoRules {
///     fn find(&self, _rule_type: &str, _from: &str) -> Option<ReplacementRule> {
///         None
///     }
/// }
///
/// let country = Country::resolve("United States", &Directory, &NoRules).unwrap();
/// assert_eq!(country.iso(), "US");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Country {
    iso: String,
}

/// Replacement rules for countries are stored under this type tag.
const RULE_TYPE: &str = "country";

impl Country {
    /// Resolve free-form input to a canonical country.
    ///
    /// Tries direct resolution first; on failure, consults the replacement
    /// rules for a rewrite of the original input and tries once more.
    pub fn resolve(
        input: &str,
        directory: &dyn CountryDirectory,
        rules: &dyn ReplacementRules,
    ) -> Result<Self, CountryError> {
        if let Some(iso) = Self::resolve_direct(input, directory) {
            return Ok(Self { iso });
        }

        if let Some(rule) = rules.find(RULE_TYPE, input) {
            if let Some(iso) = Self::resolve_direct(&rule.to, directory) {
                return Ok(Self { iso });
            }
        }

        Err(CountryError {
            value: input.to_string(),
        })
    }

    /// Direct resolution: two-letter input is uppercased and checked as a
    /// code; anything else is checked as a full display name.
    fn resolve_direct(value: &str, directory: &dyn CountryDirectory) -> Option<String> {
        if value.chars().count() == 2 {
            let code = value.to_uppercase();
            if directory.exists_by_iso(&code) {
                return Some(code);
            }
        }

        if directory.exists_by_name(value) {
            return directory.iso_by_name(value);
        }

        None
    }

    /// The canonical ISO code.
    pub fn iso(&self) -> &str {
        &self.iso
    }

    /// The display name for the canonical code.
    pub fn name(&self, directory: &dyn CountryDirectory) -> Option<String> {
        directory.name_by_iso(&self.iso)
    }
}
