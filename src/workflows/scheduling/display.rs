use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{ScheduleColumn, ScheduledClient, VIRTUAL_OFFICE};
use crate::workflows::eligibility::domain::{Evaluator, InsuranceCatalog, Office, SchoolDistrict};
use crate::workflows::eligibility::reference::ReferenceSnapshot;
use crate::workflows::priority::domain::ClientRecord;

/// Borrowed lookup tables for row derivation, built once per snapshot.
pub struct DisplayLookups<'a> {
    pub evaluators_by_npi: HashMap<&'a str, &'a Evaluator>,
    pub offices_by_key: HashMap<&'a str, &'a Office>,
    pub districts: &'a [SchoolDistrict],
    pub insurances: &'a InsuranceCatalog,
}

impl<'a> DisplayLookups<'a> {
    pub fn from_snapshot(snapshot: &'a ReferenceSnapshot) -> Self {
        Self {
            evaluators_by_npi: snapshot.evaluators_by_npi(),
            offices_by_key: snapshot.offices_by_key(),
            districts: &snapshot.districts,
            insurances: &snapshot.insurances,
        }
    }
}

/// Flat denormalized row for the scheduling board. Every field is already a
/// display string; blanks are uniformly "" so the facet engine never has to
/// tell null apart from a placeholder dash.
///
/// Rows are rederived from the entry and lookups on every read; there is no
/// retained derived state to go stale when a filter toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub entry_id: u64,
    pub color: String,
    pub name: String,
    pub evaluator: String,
    pub date: String,
    pub time: String,
    pub category: String,
    pub insurance: String,
    pub code: String,
    pub location: String,
    pub district: String,
    pub pa_expiration: String,
    pub age: String,
    pub notes: String,
}

impl ScheduleRow {
    pub fn derive(
        entry: &ScheduledClient,
        client: &ClientRecord,
        lookups: &DisplayLookups<'_>,
        now: NaiveDate,
    ) -> Self {
        let evaluator = entry
            .evaluator_npi
            .as_ref()
            .and_then(|npi| lookups.evaluators_by_npi.get(npi.as_str()))
            .map(|evaluator| evaluator.first_name().to_string())
            .unwrap_or_default();

        Self {
            entry_id: entry.id.0,
            color: normalize_blank(entry.color.as_deref()),
            name: client.full_name(),
            evaluator,
            date: normalize_blank(entry.date.as_deref()),
            time: normalize_blank(entry.time.as_deref()),
            category: normalize_blank(client.category.as_deref()),
            insurance: insurance_pair(client, lookups.insurances),
            code: normalize_blank(entry.code.as_deref()),
            location: resolve_location(entry, client, lookups),
            district: resolve_district(client, lookups.districts),
            pa_expiration: client
                .pa_expiration
                .map(format_short_date)
                .unwrap_or_default(),
            age: client
                .dob
                .map(|dob| format_age(dob, now))
                .unwrap_or_default(),
            notes: normalize_blank(entry.notes.as_deref()),
        }
    }

    /// Derived value for one filterable column.
    pub fn value(&self, column: ScheduleColumn) -> &str {
        match column {
            ScheduleColumn::Color => &self.color,
            ScheduleColumn::Name => &self.name,
            ScheduleColumn::Evaluator => &self.evaluator,
            ScheduleColumn::Date => &self.date,
            ScheduleColumn::Time => &self.time,
            ScheduleColumn::Category => &self.category,
            ScheduleColumn::Insurance => &self.insurance,
            ScheduleColumn::Code => &self.code,
            ScheduleColumn::Location => &self.location,
            ScheduleColumn::District => &self.district,
            ScheduleColumn::PaExpiration => &self.pa_expiration,
            ScheduleColumn::Age => &self.age,
            ScheduleColumn::Notes => &self.notes,
        }
    }
}

/// Uniform blank rule: absent, empty, and the "-" placeholder all become "".
pub fn normalize_blank(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() && value != "-" => value.to_string(),
        _ => String::new(),
    }
}

fn insurance_pair(client: &ClientRecord, insurances: &InsuranceCatalog) -> String {
    let primary = normalize_blank(client.primary_insurance.as_deref());
    let secondary = normalize_blank(client.secondary_insurance.as_deref());

    let primary = if primary.is_empty() {
        primary
    } else {
        insurances.short_code(&primary)
    };
    let secondary = if secondary.is_empty() {
        secondary
    } else {
        insurances.short_code(&secondary)
    };

    match (primary.is_empty(), secondary.is_empty()) {
        (true, true) => String::new(),
        (false, true) => primary,
        (true, false) => secondary,
        (false, false) => format!("{primary} | {secondary}"),
    }
}

fn resolve_location(
    entry: &ScheduledClient,
    client: &ClientRecord,
    lookups: &DisplayLookups<'_>,
) -> String {
    let raw = normalize_blank(entry.office.as_deref().or(client.office.as_deref()));
    if raw.is_empty() {
        return raw;
    }
    if raw == VIRTUAL_OFFICE {
        return raw;
    }
    match lookups.offices_by_key.get(raw.as_str()) {
        Some(office) => office.name.clone(),
        None => raw,
    }
}

fn resolve_district(client: &ClientRecord, districts: &[SchoolDistrict]) -> String {
    let raw = normalize_blank(client.school_district.as_deref());
    if raw.is_empty() {
        return raw;
    }
    match districts.iter().find(|district| district.matches(&raw)) {
        Some(district) => district.display_name(),
        None => raw,
    }
}

/// Locale-style short date, month/day/two-digit-year.
fn format_short_date(date: NaiveDate) -> String {
    format!("{}/{}/{:02}", date.month(), date.day(), date.year() % 100)
}

/// Age as whole years and leftover months, e.g. "2y 8m".
fn format_age(dob: NaiveDate, now: NaiveDate) -> String {
    let mut months =
        (now.year() - dob.year()) * 12 + now.month() as i32 - dob.month() as i32;
    if now.day() < dob.day() {
        months -= 1;
    }
    if months < 0 {
        return String::new();
    }
    format!("{}y {}m", months / 12, months % 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_normalization_collapses_null_empty_and_dash() {
        assert_eq!(normalize_blank(None), "");
        assert_eq!(normalize_blank(Some("")), "");
        assert_eq!(normalize_blank(Some("  ")), "");
        assert_eq!(normalize_blank(Some("-")), "");
        assert_eq!(normalize_blank(Some(" 9:30 ")), "9:30");
    }

    #[test]
    fn short_date_is_month_day_two_digit_year() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid");
        assert_eq!(format_short_date(date), "3/7/25");
        let date = NaiveDate::from_ymd_opt(2008, 11, 23).expect("valid");
        assert_eq!(format_short_date(date), "11/23/08");
    }

    #[test]
    fn age_counts_whole_months_until_the_day_passes() {
        let dob = NaiveDate::from_ymd_opt(2022, 10, 20).expect("valid");
        let before_birthday = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid");
        assert_eq!(format_age(dob, before_birthday), "2y 7m");
        let after_day = NaiveDate::from_ymd_opt(2025, 6, 21).expect("valid");
        assert_eq!(format_age(dob, after_day), "2y 8m");
    }
}
