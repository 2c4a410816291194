use chrono::NaiveDate;
use serde::Serialize;

use super::classifier::AgeThresholds;
use super::domain::{ClientId, ClientRecord};

/// Storage abstraction for the flag sweep so the scheduler job and tests can
/// run it against anything that holds client rows.
pub trait ClientFlagRepository: Send + Sync {
    /// All clients whose manual BabyNet flag is currently set.
    fn babynet_flagged(&self) -> Result<Vec<ClientRecord>, HousekeepingError>;
    /// Clear the manual BabyNet flag on one client. Must be idempotent.
    fn clear_babynet_flag(&self, id: &ClientId) -> Result<(), HousekeepingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HousekeepingError {
    #[error("client not found")]
    NotFound,
    #[error("client store unavailable: {0}")]
    Unavailable(String),
}

/// Result of one sweep run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepOutcome {
    pub cleared: usize,
    pub failed: usize,
}

/// Clear the manual BabyNet flag on every flagged client who has turned
/// three. Safe to run from multiple schedulers: each clear is idempotent and
/// a second pass finds nothing left to do.
///
/// Per-row failures are logged and counted, never fatal; only the initial
/// listing can abort the sweep.
pub fn clear_aged_out_babynet_flags(
    repo: &dyn ClientFlagRepository,
    now: NaiveDate,
) -> Result<SweepOutcome, HousekeepingError> {
    let thresholds = AgeThresholds::at(now);
    let mut outcome = SweepOutcome::default();

    for client in repo.babynet_flagged()? {
        let Some(dob) = client.dob else {
            // No date of birth means age is unknowable; leave the flag alone.
            continue;
        };
        if !thresholds.aged_out(dob) {
            continue;
        }

        match repo.clear_babynet_flag(&client.id) {
            Ok(()) => {
                outcome.cleared += 1;
                tracing::info!(client = client.id.0, %dob, "cleared BabyNet flag past age-out");
            }
            Err(err) => {
                outcome.failed += 1;
                tracing::warn!(client = client.id.0, error = %err, "BabyNet flag clear failed");
            }
        }
    }

    Ok(outcome)
}
