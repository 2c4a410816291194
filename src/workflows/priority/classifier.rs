use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::ClientRecord;

/// Case-sensitive marker looked for inside free-text insurance strings.
pub const BABYNET_LABEL: &str = "BabyNet";

/// The two date-of-birth cutoffs that drive the BabyNet policy, anchored to an
/// injected "now". Never derived from the system clock here; callers pass the
/// evaluation instant so results are reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeThresholds {
    /// Born on or before this date means the client is at least three years
    /// old and has aged out of BabyNet.
    pub age_out: NaiveDate,
    /// Born on or before this date means the client is at least 2 years
    /// 6 months old, the start of the aging-out window.
    pub high_priority: NaiveDate,
}

impl AgeThresholds {
    pub fn at(now: NaiveDate) -> Self {
        Self {
            age_out: now - Months::new(36),
            high_priority: now - Months::new(30),
        }
    }

    /// True when a client born on `dob` is inside the aging-out window:
    /// at least 2:6 but not yet 3. The 2:6 edge is inclusive, the
    /// third-birthday edge is exclusive (aged out exactly at 3).
    pub fn in_aging_out_window(&self, dob: NaiveDate) -> bool {
        dob > self.age_out && dob <= self.high_priority
    }

    /// True when a client born on `dob` is three or older.
    pub fn aged_out(&self, dob: NaiveDate) -> bool {
        dob <= self.age_out
    }
}

/// Ordinal priority bucket; lower sorts sooner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    BabyNetAndHighPriority,
    BabyNetAgingOut,
    HighPriority,
    AddedDate,
}

impl PriorityTier {
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::BabyNetAndHighPriority => 0,
            Self::BabyNetAgingOut => 1,
            Self::HighPriority => 2,
            Self::AddedDate => 3,
        }
    }
}

/// Outcome of classifying one client: the bucket, the operator-facing reason
/// string, and the date used to break ties inside the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityAssessment {
    pub tier: PriorityTier,
    pub reason: String,
    pub secondary_key: Option<NaiveDate>,
}

impl PriorityAssessment {
    pub fn is_priority(&self) -> bool {
        self.tier != PriorityTier::AddedDate
    }
}

/// A client counts as BabyNet when either insurance string carries the
/// "BabyNet" substring or a case manager set the manual flag.
pub fn is_babynet_category(client: &ClientRecord) -> bool {
    if client.baby_net {
        return true;
    }
    [&client.primary_insurance, &client.secondary_insurance]
        .into_iter()
        .flatten()
        .any(|value| value.contains(BABYNET_LABEL))
}

/// Pure tier assignment for one client snapshot. First match wins:
/// BabyNet-aging-out combined with the manual flag outranks either alone, and
/// everything else falls to intake order.
pub fn classify(client: &ClientRecord, thresholds: AgeThresholds) -> PriorityAssessment {
    let in_window = client
        .dob
        .map(|dob| thresholds.in_aging_out_window(dob))
        .unwrap_or(false);
    let aging_out_babynet = is_babynet_category(client) && in_window;
    let manual = client.high_priority;

    let (tier, reason) = match (aging_out_babynet, manual) {
        (true, true) => (PriorityTier::BabyNetAndHighPriority, "BabyNet and High Priority"),
        (true, false) => (PriorityTier::BabyNetAgingOut, "BabyNet above 2:6"),
        (false, true) => (PriorityTier::HighPriority, "High Priority"),
        (false, false) if client.is_placeholder() => (PriorityTier::AddedDate, "Note only"),
        (false, false) => (PriorityTier::AddedDate, "Added date"),
    };

    // BabyNet buckets break ties on age (oldest in the window ages out
    // soonest); the rest break ties on intake order.
    let secondary_key = match tier {
        PriorityTier::BabyNetAndHighPriority | PriorityTier::BabyNetAgingOut => client.dob,
        PriorityTier::HighPriority | PriorityTier::AddedDate => client.added_date,
    };

    PriorityAssessment {
        tier,
        reason: reason.to_string(),
        secondary_key,
    }
}
