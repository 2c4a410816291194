use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::domain::{Evaluator, InsuranceCatalog, Office, SchoolDistrict};

/// One coherent snapshot of the reference data a computation needs. The core
/// treats it as immutable for the duration of a request; staleness is the
/// cache's problem, not the rules'.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
    pub evaluators: Vec<Evaluator>,
    pub offices: Vec<Office>,
    pub districts: Vec<SchoolDistrict>,
    pub insurances: InsuranceCatalog,
}

impl ReferenceSnapshot {
    pub fn evaluators_by_npi(&self) -> HashMap<&str, &Evaluator> {
        self.evaluators
            .iter()
            .map(|evaluator| (evaluator.npi.as_str(), evaluator))
            .collect()
    }

    pub fn offices_by_key(&self) -> HashMap<&str, &Office> {
        self.offices
            .iter()
            .map(|office| (office.key.as_str(), office))
            .collect()
    }
}

/// Where snapshots come from (the relational store in production, a canned
/// snapshot in tests and the demo).
pub trait ReferenceSource: Send + Sync {
    fn load(&self) -> Result<ReferenceSnapshot, ReferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("reference store unavailable: {0}")]
    Unavailable(String),
}

/// Canned source wrapping a fixed snapshot.
pub struct StaticReferenceSource {
    snapshot: ReferenceSnapshot,
}

impl StaticReferenceSource {
    pub fn new(snapshot: ReferenceSnapshot) -> Self {
        Self { snapshot }
    }
}

impl ReferenceSource for StaticReferenceSource {
    fn load(&self) -> Result<ReferenceSnapshot, ReferenceError> {
        Ok(self.snapshot.clone())
    }
}

/// Read-through TTL cache in front of a `ReferenceSource`. Writes to the
/// underlying reference tables go through paths that call `invalidate`, so a
/// fresh snapshot is loaded on the next read rather than waiting out the TTL.
pub struct ReferenceCache<S> {
    source: Arc<S>,
    cache: moka::sync::Cache<(), Arc<ReferenceSnapshot>>,
}

impl<S: ReferenceSource> ReferenceCache<S> {
    pub fn new(source: Arc<S>, ttl: Duration) -> Self {
        let cache = moka::sync::Cache::builder()
            .max_capacity(1)
            .time_to_live(ttl)
            .build();
        Self { source, cache }
    }

    /// The current snapshot, loading through the source on a miss.
    pub fn snapshot(&self) -> Result<Arc<ReferenceSnapshot>, ReferenceError> {
        let source = Arc::clone(&self.source);
        self.cache
            .try_get_with((), move || source.load().map(Arc::new))
            .map_err(|err: Arc<ReferenceError>| ReferenceError::Unavailable(err.to_string()))
    }

    /// Drop the cached snapshot so the next read refetches.
    pub fn invalidate(&self) {
        self.cache.invalidate(&());
    }
}
