use std::fmt;

use serde::{Deserialize, Serialize};

/// Ten-digit provider identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Npi(String);

impl Npi {
    pub fn new(raw: &str) -> Result<Self, NpiError> {
        let trimmed = raw.trim();
        if trimmed.len() == 10 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(NpiError::Invalid(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Npi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NpiError {
    #[error("provider NPI must be exactly ten digits, got '{0}'")]
    Invalid(String),
}

/// Key for an office location, stable across renames.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfficeKey(pub String);

impl OfficeKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Office {
    pub key: OfficeKey,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Canonical school district record used to normalize the free-text district
/// strings that arrive from external sync sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolDistrict {
    pub id: u32,
    pub short_name: Option<String>,
    pub name: String,
}

impl SchoolDistrict {
    /// Canonical match against a free-text district string. Exact full-name
    /// comparison modulo surrounding whitespace and case; the suffix-stripped
    /// form is display-only and never used for matching.
    pub fn matches(&self, raw: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(raw.trim())
    }

    /// Short label for the scheduling board.
    pub fn display_name(&self) -> String {
        match &self.short_name {
            Some(short) if !short.trim().is_empty() => short.trim().to_string(),
            _ => strip_district_suffix(&self.name),
        }
    }
}

/// Drop the "School District" / "County School District" boilerplate from a
/// district name. Handles both trailing suffixes ("Charleston County School
/// District") and embedded ones ("Dorchester School District 4").
pub fn strip_district_suffix(name: &str) -> String {
    let trimmed = name.trim();
    for suffix in [" County School District", " School District"] {
        if let Some(stripped) = trimmed.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    for infix in [" County School District ", " School District "] {
        if let Some(position) = trimmed.find(infix) {
            let rest = &trimmed[position + infix.len()..];
            return format!("{} {}", &trimmed[..position], rest).trim().to_string();
        }
    }
    trimmed.to_string()
}

/// Canonical insurance with the free-text aliases seen in historical records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
    pub id: u32,
    pub short_name: String,
    pub aliases: Vec<String>,
}

/// Lookup table normalizing free-text insurance strings to canonical records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceCatalog {
    insurances: Vec<Insurance>,
}

impl InsuranceCatalog {
    pub fn new(insurances: Vec<Insurance>) -> Self {
        Self { insurances }
    }

    /// Resolve a raw insurance string. Exact (case-insensitive) match on the
    /// short name or an alias wins; failing that, an alias appearing inside
    /// the raw string counts, since sync sources embed carrier names in
    /// longer plan descriptions. Unresolvable strings return `None` rather
    /// than erroring.
    pub fn resolve(&self, raw: &str) -> Option<&Insurance> {
        let needle = raw.trim();
        if needle.is_empty() || needle == "-" {
            return None;
        }

        let exact = self.insurances.iter().find(|insurance| {
            insurance.short_name.eq_ignore_ascii_case(needle)
                || insurance
                    .aliases
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(needle))
        });
        if exact.is_some() {
            return exact;
        }

        let lowered = needle.to_lowercase();
        self.insurances.iter().find(|insurance| {
            insurance
                .aliases
                .iter()
                .chain(std::iter::once(&insurance.short_name))
                .any(|alias| lowered.contains(&alias.to_lowercase()))
        })
    }

    /// Short display code for a raw string, falling back to the raw text when
    /// nothing in the catalog matches.
    pub fn short_code(&self, raw: &str) -> String {
        match self.resolve(raw) {
            Some(insurance) => insurance.short_name.clone(),
            None => raw.trim().to_string(),
        }
    }
}

/// Roster entry pre-joined with its blocking and coverage relations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluator {
    pub npi: Npi,
    pub provider_name: String,
    /// Canonical district ids this evaluator will not serve.
    pub blocked_districts: Vec<u32>,
    pub blocked_zips: Vec<String>,
    /// Accepted insurance ids; empty means no insurance constraint.
    pub accepted_insurance_ids: Vec<u32>,
    /// Offices this evaluator covers; empty means coverage is unrestricted.
    pub offices: Vec<OfficeKey>,
}

impl Evaluator {
    pub fn new(npi: Npi, provider_name: impl Into<String>) -> Self {
        Self {
            npi,
            provider_name: provider_name.into(),
            blocked_districts: Vec::new(),
            blocked_zips: Vec::new(),
            accepted_insurance_ids: Vec::new(),
            offices: Vec::new(),
        }
    }

    /// Leading token of the display name, shown on the scheduling board.
    pub fn first_name(&self) -> &str {
        self.provider_name
            .split_whitespace()
            .next()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npi_requires_ten_digits() {
        assert!(Npi::new("1234567890").is_ok());
        assert!(Npi::new(" 1234567890 ").is_ok());
        assert!(Npi::new("123456789").is_err());
        assert!(Npi::new("12345678901").is_err());
        assert!(Npi::new("12345678ab").is_err());
    }

    #[test]
    fn district_suffix_stripping_handles_trailing_and_embedded_forms() {
        assert_eq!(
            strip_district_suffix("Charleston County School District"),
            "Charleston"
        );
        assert_eq!(strip_district_suffix("Berkeley School District"), "Berkeley");
        assert_eq!(
            strip_district_suffix("Dorchester School District 4"),
            "Dorchester 4"
        );
        assert_eq!(strip_district_suffix("Homeschool"), "Homeschool");
    }

    #[test]
    fn district_matching_is_exact_on_full_name() {
        let district = SchoolDistrict {
            id: 4,
            short_name: None,
            name: "Dorchester School District 4".to_string(),
        };

        assert!(district.matches("Dorchester School District 4"));
        assert!(district.matches("  dorchester school district 4 "));
        assert!(!district.matches("Dorchester 4"));
    }

    #[test]
    fn insurance_resolution_prefers_exact_then_substring() {
        let catalog = InsuranceCatalog::new(vec![
            Insurance {
                id: 1,
                short_name: "BabyNet".to_string(),
                aliases: vec!["SC BabyNet".to_string()],
            },
            Insurance {
                id: 2,
                short_name: "Medicaid".to_string(),
                aliases: vec!["Healthy Connections".to_string()],
            },
        ]);

        assert_eq!(catalog.resolve("babynet").map(|i| i.id), Some(1));
        assert_eq!(
            catalog.resolve("Healthy Connections Choices").map(|i| i.id),
            Some(2)
        );
        assert_eq!(catalog.resolve("Aetna PPO").map(|i| i.id), None);
        assert_eq!(catalog.resolve("-"), None);
        assert_eq!(catalog.short_code("Healthy Connections"), "Medicaid");
        assert_eq!(catalog.short_code("Aetna PPO"), "Aetna PPO");
    }

    #[test]
    fn evaluator_first_name_is_leading_token() {
        let evaluator = Evaluator::new(Npi::new("1234567890").expect("valid"), "Dana Whitfield");
        assert_eq!(evaluator.first_name(), "Dana");
    }
}
