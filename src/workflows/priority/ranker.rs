use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::classifier::{classify, AgeThresholds};
use super::domain::ClientRecord;

/// Orderings the queue view can request. `Priority` is the default global
/// queue; the name modes are plain alphabetical; `PaExpiration` reorders by
/// authorization urgency instead of the priority tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueSortMode {
    #[default]
    Priority,
    FirstName,
    LastName,
    PaExpiration,
}

/// One row of the ranked queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedClient {
    pub client: ClientRecord,
    pub tier: u8,
    pub sort_reason: String,
}

/// Produce the total order over `clients` for the requested mode.
///
/// The sort is stable: two clients with the same tier and the same secondary
/// key keep their input order. Absent dates sort after present ones within a
/// comparison group and never panic.
pub fn rank(clients: &[ClientRecord], now: NaiveDate, mode: QueueSortMode) -> Vec<RankedClient> {
    match mode {
        QueueSortMode::Priority => rank_by_priority(clients, now),
        QueueSortMode::FirstName => rank_by_name(clients, now, |client| &client.first_name),
        QueueSortMode::LastName => rank_by_name(clients, now, |client| &client.last_name),
        QueueSortMode::PaExpiration => rank_by_pa_expiration(clients, now),
    }
}

fn rank_by_priority(clients: &[ClientRecord], now: NaiveDate) -> Vec<RankedClient> {
    let thresholds = AgeThresholds::at(now);
    let mut keyed: Vec<(u8, Option<NaiveDate>, RankedClient)> = clients
        .iter()
        .map(|client| {
            let assessment = classify(client, thresholds);
            let tier = assessment.tier.ordinal();
            (
                tier,
                assessment.secondary_key,
                RankedClient {
                    client: client.clone(),
                    tier,
                    sort_reason: assessment.reason,
                },
            )
        })
        .collect();

    keyed.sort_by_key(|(tier, key, _)| date_sort_key(*tier, *key));
    keyed.into_iter().map(|(_, _, ranked)| ranked).collect()
}

fn rank_by_name<'a, F>(clients: &'a [ClientRecord], now: NaiveDate, name: F) -> Vec<RankedClient>
where
    F: Fn(&'a ClientRecord) -> &'a str,
{
    let thresholds = AgeThresholds::at(now);
    let mut keyed: Vec<(String, RankedClient)> = clients
        .iter()
        .map(|client| {
            let assessment = classify(client, thresholds);
            (
                name(client).to_lowercase(),
                RankedClient {
                    client: client.clone(),
                    tier: assessment.tier.ordinal(),
                    sort_reason: assessment.reason,
                },
            )
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, ranked)| ranked).collect()
}

fn rank_by_pa_expiration(clients: &[ClientRecord], now: NaiveDate) -> Vec<RankedClient> {
    let mut keyed: Vec<(u8, Option<NaiveDate>, RankedClient)> = clients
        .iter()
        .map(|client| {
            // Expired authorizations are the most urgent, dated ones rank by
            // how soon they lapse, and clients with no PA at all wait.
            let (tier, reason) = match client.pa_expiration {
                Some(date) if date < now => (0, "Expired PA"),
                Some(_) => (1, "Expiration date"),
                None => (2, "No PA"),
            };
            (
                tier,
                client.pa_expiration,
                RankedClient {
                    client: client.clone(),
                    tier,
                    sort_reason: reason.to_string(),
                },
            )
        })
        .collect();

    keyed.sort_by_key(|(tier, key, _)| date_sort_key(*tier, *key));
    keyed.into_iter().map(|(_, _, ranked)| ranked).collect()
}

fn date_sort_key(tier: u8, key: Option<NaiveDate>) -> (u8, bool, NaiveDate) {
    (tier, key.is_none(), key.unwrap_or(NaiveDate::MAX))
}
