//! Client prioritization: the age-windowed BabyNet policy, the global queue
//! ordering, and the periodic flag housekeeping that keeps the manual BabyNet
//! flag honest once a client ages out.

pub mod classifier;
pub mod domain;
pub mod housekeeping;
pub mod ranker;

#[cfg(test)]
mod tests;

pub use classifier::{classify, AgeThresholds, PriorityAssessment, PriorityTier, BABYNET_LABEL};
pub use domain::{ClientId, ClientRecord};
pub use housekeeping::{
    clear_aged_out_babynet_flags, ClientFlagRepository, HousekeepingError, SweepOutcome,
};
pub use ranker::{rank, QueueSortMode, RankedClient};
