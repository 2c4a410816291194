use std::collections::BTreeMap;
use std::sync::Mutex;

use super::domain::{ScheduleEntryId, ScheduleUpdate, ScheduledClient};
use crate::workflows::eligibility::domain::Npi;
use crate::workflows::priority::domain::{ClientId, ClientRecord};
use crate::workflows::priority::housekeeping::{ClientFlagRepository, HousekeepingError};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Client rows as the queue and board consume them.
pub trait ClientRepository: Send + Sync {
    fn fetch(&self, id: &ClientId) -> Result<Option<ClientRecord>, RepositoryError>;
    fn active(&self) -> Result<Vec<ClientRecord>, RepositoryError>;
    /// Pre-materialized evaluator associations for one client. Empty when the
    /// rules should decide.
    fn evaluator_links(&self, id: &ClientId) -> Result<Vec<Npi>, RepositoryError>;
}

/// Scheduling queue storage.
pub trait ScheduleRepository: Send + Sync {
    fn insert(&self, entry: ScheduledClient) -> Result<ScheduledClient, RepositoryError>;
    fn update(
        &self,
        id: ScheduleEntryId,
        update: &ScheduleUpdate,
    ) -> Result<ScheduledClient, RepositoryError>;
    fn set_archived(&self, id: ScheduleEntryId, archived: bool) -> Result<(), RepositoryError>;
    fn fetch(&self, id: ScheduleEntryId) -> Result<Option<ScheduledClient>, RepositoryError>;
    /// Unarchived entries in insertion order.
    fn active(&self) -> Result<Vec<ScheduledClient>, RepositoryError>;
    fn archived(&self) -> Result<Vec<ScheduledClient>, RepositoryError>;
}

/// In-memory store backing tests and the demo CLI. One struct implements all
/// three storage traits the service composes.
#[derive(Default)]
pub struct InMemoryClinicStore {
    clients: Mutex<BTreeMap<i64, ClientRecord>>,
    links: Mutex<BTreeMap<i64, Vec<Npi>>>,
    schedule: Mutex<BTreeMap<u64, ScheduledClient>>,
}

impl InMemoryClinicStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_client(&self, client: ClientRecord) {
        let mut guard = self.clients.lock().expect("client mutex poisoned");
        guard.insert(client.id.0, client);
    }

    pub fn link_evaluators(&self, id: ClientId, npis: Vec<Npi>) {
        let mut guard = self.links.lock().expect("link mutex poisoned");
        guard.insert(id.0, npis);
    }
}

impl ClientRepository for InMemoryClinicStore {
    fn fetch(&self, id: &ClientId) -> Result<Option<ClientRecord>, RepositoryError> {
        let guard = self.clients.lock().expect("client mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn active(&self) -> Result<Vec<ClientRecord>, RepositoryError> {
        let guard = self.clients.lock().expect("client mutex poisoned");
        Ok(guard.values().filter(|c| c.active).cloned().collect())
    }

    fn evaluator_links(&self, id: &ClientId) -> Result<Vec<Npi>, RepositoryError> {
        let guard = self.links.lock().expect("link mutex poisoned");
        Ok(guard.get(&id.0).cloned().unwrap_or_default())
    }
}

impl ScheduleRepository for InMemoryClinicStore {
    fn insert(&self, entry: ScheduledClient) -> Result<ScheduledClient, RepositoryError> {
        let mut guard = self.schedule.lock().expect("schedule mutex poisoned");
        if guard.contains_key(&entry.id.0) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(entry.id.0, entry.clone());
        Ok(entry)
    }

    fn update(
        &self,
        id: ScheduleEntryId,
        update: &ScheduleUpdate,
    ) -> Result<ScheduledClient, RepositoryError> {
        let mut guard = self.schedule.lock().expect("schedule mutex poisoned");
        let entry = guard.get_mut(&id.0).ok_or(RepositoryError::NotFound)?;
        update.apply(entry);
        Ok(entry.clone())
    }

    fn set_archived(&self, id: ScheduleEntryId, archived: bool) -> Result<(), RepositoryError> {
        let mut guard = self.schedule.lock().expect("schedule mutex poisoned");
        let entry = guard.get_mut(&id.0).ok_or(RepositoryError::NotFound)?;
        entry.archived = archived;
        Ok(())
    }

    fn fetch(&self, id: ScheduleEntryId) -> Result<Option<ScheduledClient>, RepositoryError> {
        let guard = self.schedule.lock().expect("schedule mutex poisoned");
        Ok(guard.get(&id.0).cloned())
    }

    fn active(&self) -> Result<Vec<ScheduledClient>, RepositoryError> {
        let guard = self.schedule.lock().expect("schedule mutex poisoned");
        Ok(guard.values().filter(|e| !e.archived).cloned().collect())
    }

    fn archived(&self) -> Result<Vec<ScheduledClient>, RepositoryError> {
        let guard = self.schedule.lock().expect("schedule mutex poisoned");
        Ok(guard.values().filter(|e| e.archived).cloned().collect())
    }
}

impl ClientFlagRepository for InMemoryClinicStore {
    fn babynet_flagged(&self) -> Result<Vec<ClientRecord>, HousekeepingError> {
        let guard = self.clients.lock().expect("client mutex poisoned");
        Ok(guard.values().filter(|c| c.baby_net).cloned().collect())
    }

    fn clear_babynet_flag(&self, id: &ClientId) -> Result<(), HousekeepingError> {
        let mut guard = self.clients.lock().expect("client mutex poisoned");
        let client = guard.get_mut(&id.0).ok_or(HousekeepingError::NotFound)?;
        client.baby_net = false;
        Ok(())
    }
}
