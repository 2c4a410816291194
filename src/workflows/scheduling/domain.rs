use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::workflows::eligibility::domain::Npi;
use crate::workflows::priority::domain::ClientId;

/// Sentinel office assignment for remote evaluations. A literal value, never
/// resolved against the office table.
pub const VIRTUAL_OFFICE: &str = "Virtual";

/// Identifier for one scheduling queue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScheduleEntryId(pub u64);

/// One entry on the scheduling work queue. Date and time stay free-text
/// strings; staff paste in whatever the calendar gave them. Entries are
/// archived when scheduling concludes, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledClient {
    pub id: ScheduleEntryId,
    pub client_id: ClientId,
    pub evaluator_npi: Option<Npi>,
    pub date: Option<String>,
    pub time: Option<String>,
    /// Office key, or the literal `VIRTUAL_OFFICE` sentinel.
    pub office: Option<String>,
    pub notes: Option<String>,
    /// Billing code.
    pub code: Option<String>,
    /// Display color tag.
    pub color: Option<String>,
    pub archived: bool,
}

impl ScheduledClient {
    pub fn new(id: ScheduleEntryId, client_id: ClientId) -> Self {
        Self {
            id,
            client_id,
            evaluator_npi: None,
            date: None,
            time: None,
            office: None,
            notes: None,
            code: None,
            color: None,
            archived: false,
        }
    }
}

/// Partial update to a schedule entry. Absent fields are left alone; a
/// provided blank clears the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluator_npi: Option<Npi>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ScheduleUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply(&self, entry: &mut ScheduledClient) {
        if let Some(color) = &self.color {
            entry.color = non_blank(color);
        }
        if let Some(npi) = &self.evaluator_npi {
            entry.evaluator_npi = Some(npi.clone());
        }
        if let Some(date) = &self.date {
            entry.date = non_blank(date);
        }
        if let Some(time) = &self.time {
            entry.time = non_blank(time);
        }
        if let Some(office) = &self.office {
            entry.office = non_blank(office);
        }
        if let Some(notes) = &self.notes {
            entry.notes = non_blank(notes);
        }
        if let Some(code) = &self.code {
            entry.code = non_blank(code);
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "-" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Columns of the scheduling board that can be faceted and filtered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleColumn {
    Color,
    Name,
    Evaluator,
    Date,
    Time,
    Category,
    Insurance,
    Code,
    Location,
    District,
    PaExpiration,
    Age,
    Notes,
}

impl ScheduleColumn {
    pub const ALL: [Self; 13] = [
        Self::Color,
        Self::Name,
        Self::Evaluator,
        Self::Date,
        Self::Time,
        Self::Category,
        Self::Insurance,
        Self::Code,
        Self::Location,
        Self::District,
        Self::PaExpiration,
        Self::Age,
        Self::Notes,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Name => "name",
            Self::Evaluator => "evaluator",
            Self::Date => "date",
            Self::Time => "time",
            Self::Category => "category",
            Self::Insurance => "insurance",
            Self::Code => "code",
            Self::Location => "location",
            Self::District => "district",
            Self::PaExpiration => "pa_expiration",
            Self::Age => "age",
            Self::Notes => "notes",
        }
    }
}

/// Selected filter values per column. An empty selection for a column means
/// that column imposes no constraint; the default state filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub selections: BTreeMap<ScheduleColumn, BTreeSet<String>>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.selections.values().all(BTreeSet::is_empty)
    }

    pub fn select<I, V>(&mut self, column: ScheduleColumn, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.selections
            .entry(column)
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }
}
