use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for intake clients.
///
/// Real clients carry ids from the intake sequence; note-only shell records
/// are created with a synthetic five-digit id so downstream views can tell
/// them apart from full intake records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClientId(pub i64);

/// Snapshot of one intake client as fetched from the store.
///
/// Optional fields stay optional all the way through: a missing insurance
/// string, district, zip, or coordinate never excludes or fails anything, it
/// just contributes nothing to the rule it feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,
    pub hash: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub dob: Option<NaiveDate>,
    pub added_date: Option<NaiveDate>,
    pub high_priority: bool,
    pub baby_net: bool,
    pub primary_insurance: Option<String>,
    pub secondary_insurance: Option<String>,
    pub school_district: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Office keys ranked by proximity, nearest first. Populated by the
    /// geocoding sync; empty when the client has no coordinates yet.
    pub closest_offices: Vec<String>,
    pub pa_expiration: Option<NaiveDate>,
    /// Office assignment for scheduling display; may be the literal
    /// "Virtual" sentinel rather than an office key.
    pub office: Option<String>,
    pub color: Option<String>,
    /// ASD/ADHD evaluation category shown on the scheduling board.
    pub category: Option<String>,
}

impl ClientRecord {
    /// Bare record with the fields every client has; everything optional
    /// starts empty. Tests and the demo seed fill in what they need.
    pub fn new(id: ClientId, hash: impl Into<String>, first: &str, last: &str) -> Self {
        Self {
            id,
            hash: hash.into(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            active: true,
            dob: None,
            added_date: None,
            high_priority: false,
            baby_net: false,
            primary_insurance: None,
            secondary_insurance: None,
            school_district: None,
            zip: None,
            latitude: None,
            longitude: None,
            closest_offices: Vec::new(),
            pa_expiration: None,
            office: None,
            color: None,
            category: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Note-only shell records are minted with a five-digit synthetic id.
    /// Derived predicate, not a separate record kind.
    pub fn is_placeholder(&self) -> bool {
        (10_000..=99_999).contains(&self.id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_detection_uses_five_digit_ids() {
        let shell = ClientRecord::new(ClientId(10_432), "h1", "Note", "Only");
        let real_low = ClientRecord::new(ClientId(432), "h2", "Ada", "Park");
        let real_high = ClientRecord::new(ClientId(100_001), "h3", "Ben", "Cho");

        assert!(shell.is_placeholder());
        assert!(!real_low.is_placeholder());
        assert!(!real_high.is_placeholder());
    }

    #[test]
    fn full_name_trims_missing_parts() {
        let mut client = ClientRecord::new(ClientId(7), "h", "Ada", "");
        assert_eq!(client.full_name(), "Ada");
        client.last_name = "Park".to_string();
        assert_eq!(client.full_name(), "Ada Park");
    }
}
