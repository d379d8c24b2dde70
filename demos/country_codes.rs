//! Country canonicalization: direct code and name resolution, plus the
//! replacement-rule fallback for spellings the directory does not know.

use veneer::{Country, CountryDirectory, ReplacementRule, ReplacementRules};

struct Directory;

impl CountryDirectory for Directory {
    fn exists_by_iso(&self, iso: &str) -> bool {
        matches!(iso, "US" | "DE" | "BG")
    }

    fn exists_by_name(&self, name: &str) -> bool {
        matches!(name, "United States" | "Germany" | "Bulgaria")
    }

    fn iso_by_name(&self, name: &str) -> Option<String> {
        match name {
            "United States" => Some("US".to_string()),
            "Germany" => Some("DE".to_string()),
            "Bulgaria" => Some("BG".to_string()),
            _ => None,
        }
    }

    fn name_by_iso(&self, iso: &str) -> Option<String> {
        match iso {
            "US" => Some("United States".to_string()),
            "DE" => Some("Germany".to_string()),
            "BG" => Some("Bulgaria".to_string()),
            _ => None,
        }
    }
}

struct Rules;

impl ReplacementRules for Rules {
    fn find(&self, rule_type: &str, from: &str) -> Option<ReplacementRule> {
        (rule_type == "country" && from == "Deutschland").then(|| ReplacementRule {
            rule_type: rule_type.to_string(),
            from: from.to_string(),
            to: "Germany".to_string(),
        })
    }
}

fn main() {
    for input in ["US", "us", "United States", "Deutschland", "Narnia"] {
        match Country::resolve(input, &Directory, &Rules) {
            Ok(country) => println!(
                "{input:>15} -> {} ({})",
                country.iso(),
                country.name(&Directory).unwrap_or_default()
            ),
            Err(err) => println!("{input:>15} -> {err}"),
        }
    }
}
