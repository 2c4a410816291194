use serde::{Deserialize, Serialize};

use super::domain::{Evaluator, InsuranceCatalog, Npi, SchoolDistrict};
use crate::workflows::priority::domain::ClientRecord;

/// Roster partition for one client. Soft ranking for presentation: the
/// "other" group stays selectable so staff can override, this is not a
/// security boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilitySplit {
    pub eligible: Vec<Evaluator>,
    pub other: Vec<Evaluator>,
}

/// Applies the layered exclusion rules (district, zip, insurance, office
/// coverage) for one client against the full roster. Pure; operates on one
/// reference snapshot.
pub struct EligibilityFilter<'a> {
    districts: &'a [SchoolDistrict],
    insurances: &'a InsuranceCatalog,
}

impl<'a> EligibilityFilter<'a> {
    pub fn new(districts: &'a [SchoolDistrict], insurances: &'a InsuranceCatalog) -> Self {
        Self {
            districts,
            insurances,
        }
    }

    /// Partition `roster` into eligible and other for `client`, each group
    /// alphabetized by display name.
    ///
    /// `links` carries any pre-materialized client-evaluator associations.
    /// A non-empty set pins the eligible group (it is a cache of a previous
    /// rule run, possibly adjusted by hand); otherwise the rules decide.
    pub fn split_roster(
        &self,
        client: &ClientRecord,
        roster: &[Evaluator],
        links: &[Npi],
    ) -> EligibilitySplit {
        let mut split = EligibilitySplit::default();

        for evaluator in roster {
            let eligible = if links.is_empty() {
                !self.is_excluded(client, evaluator)
            } else {
                links.contains(&evaluator.npi)
            };
            if eligible {
                split.eligible.push(evaluator.clone());
            } else {
                split.other.push(evaluator.clone());
            }
        }

        sort_by_name(&mut split.eligible);
        sort_by_name(&mut split.other);
        split
    }

    /// True when any blocking rule fires. Missing client attributes satisfy
    /// the corresponding rule vacuously.
    pub fn is_excluded(&self, client: &ClientRecord, evaluator: &Evaluator) -> bool {
        self.blocked_by_district(client, evaluator)
            || blocked_by_zip(client, evaluator)
            || self.refused_by_insurance(client, evaluator)
            || outside_office_coverage(client, evaluator)
    }

    fn blocked_by_district(&self, client: &ClientRecord, evaluator: &Evaluator) -> bool {
        let Some(raw) = client.school_district.as_deref() else {
            return false;
        };
        // Normalize the free-text district against canonical records first;
        // an unrecognized string blocks nobody.
        let Some(district) = self.districts.iter().find(|d| d.matches(raw)) else {
            return false;
        };
        evaluator.blocked_districts.contains(&district.id)
    }

    fn refused_by_insurance(&self, client: &ClientRecord, evaluator: &Evaluator) -> bool {
        if evaluator.accepted_insurance_ids.is_empty() {
            return false;
        }

        let resolved: Vec<u32> = [&client.primary_insurance, &client.secondary_insurance]
            .into_iter()
            .flatten()
            .filter_map(|raw| self.insurances.resolve(raw))
            .map(|insurance| insurance.id)
            .collect();

        // Free-text history is noisy; only a confident match can exclude.
        if resolved.is_empty() {
            return false;
        }

        !resolved
            .iter()
            .any(|id| evaluator.accepted_insurance_ids.contains(id))
    }
}

fn blocked_by_zip(client: &ClientRecord, evaluator: &Evaluator) -> bool {
    match client.zip.as_deref().map(str::trim) {
        Some(zip) if !zip.is_empty() => evaluator
            .blocked_zips
            .iter()
            .any(|blocked| blocked.trim() == zip),
        _ => false,
    }
}

fn outside_office_coverage(client: &ClientRecord, evaluator: &Evaluator) -> bool {
    if client.closest_offices.is_empty() || evaluator.offices.is_empty() {
        return false;
    }
    !client
        .closest_offices
        .iter()
        .any(|key| evaluator.offices.iter().any(|office| office.as_str() == key))
}

fn sort_by_name(group: &mut [Evaluator]) {
    group.sort_by(|a, b| {
        a.provider_name
            .to_lowercase()
            .cmp(&b.provider_name.to_lowercase())
    });
}
