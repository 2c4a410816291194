use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::display::{DisplayLookups, ScheduleRow};
use super::domain::{FilterState, ScheduleColumn, ScheduleEntryId, ScheduleUpdate, ScheduledClient};
use super::facets::{apply_filters, facet_options, FacetOption};
use super::repository::{ClientRepository, RepositoryError, ScheduleRepository};
use crate::workflows::eligibility::filter::{EligibilityFilter, EligibilitySplit};
use crate::workflows::eligibility::reference::{ReferenceCache, ReferenceError, ReferenceSource};
use crate::workflows::priority::domain::ClientId;
use crate::workflows::priority::housekeeping::{
    clear_aged_out_babynet_flags, ClientFlagRepository, HousekeepingError, SweepOutcome,
};
use crate::workflows::priority::ranker::{rank, QueueSortMode, RankedClient};

/// Facet checklist for one board column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnFacets {
    pub column: ScheduleColumn,
    pub options: Vec<FacetOption>,
}

/// Board payload: filtered display rows plus the facet options computed over
/// the unfiltered board, so checklists keep their full option sets and counts
/// while a filter is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleBoard {
    pub rows: Vec<ScheduleRow>,
    pub facets: Vec<ColumnFacets>,
}

static ENTRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_entry_id() -> ScheduleEntryId {
    ScheduleEntryId(ENTRY_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Service composing the client and schedule stores with the cached reference
/// data and the pure core computations.
pub struct SchedulingService<C, S, R> {
    clients: Arc<C>,
    schedule: Arc<S>,
    reference: ReferenceCache<R>,
}

impl<C, S, R> SchedulingService<C, S, R>
where
    C: ClientRepository + ClientFlagRepository + 'static,
    S: ScheduleRepository + 'static,
    R: ReferenceSource + 'static,
{
    pub fn new(clients: Arc<C>, schedule: Arc<S>, reference: ReferenceCache<R>) -> Self {
        Self {
            clients,
            schedule,
            reference,
        }
    }

    /// The global work queue in the requested order.
    pub fn ranked_queue(
        &self,
        now: NaiveDate,
        mode: QueueSortMode,
    ) -> Result<Vec<RankedClient>, SchedulingError> {
        let clients = self.clients.active()?;
        Ok(rank(&clients, now, mode))
    }

    /// Eligible/other evaluator split for one client.
    pub fn evaluators_for(&self, client_id: ClientId) -> Result<EligibilitySplit, SchedulingError> {
        let client = self
            .clients
            .fetch(&client_id)?
            .ok_or(SchedulingError::ClientNotFound(client_id))?;
        let links = self.clients.evaluator_links(&client_id)?;
        let snapshot = self.reference.snapshot()?;

        let filter = EligibilityFilter::new(&snapshot.districts, &snapshot.insurances);
        Ok(filter.split_roster(&client, &snapshot.evaluators, &links))
    }

    /// The scheduling board, filtered by `filters`.
    pub fn board(
        &self,
        now: NaiveDate,
        filters: &FilterState,
    ) -> Result<ScheduleBoard, SchedulingError> {
        let snapshot = self.reference.snapshot()?;
        let lookups = DisplayLookups::from_snapshot(&snapshot);

        let mut rows = Vec::new();
        for entry in self.schedule.active()? {
            // Entries whose client vanished resolve to nothing rather than
            // failing the whole board.
            match self.clients.fetch(&entry.client_id)? {
                Some(client) => rows.push(ScheduleRow::derive(&entry, &client, &lookups, now)),
                None => {
                    tracing::warn!(
                        entry = entry.id.0,
                        client = entry.client_id.0,
                        "schedule entry references missing client"
                    );
                }
            }
        }

        let facets = ScheduleColumn::ALL
            .into_iter()
            .map(|column| ColumnFacets {
                column,
                options: facet_options(&rows, column),
            })
            .collect();

        Ok(ScheduleBoard {
            rows: apply_filters(&rows, filters),
            facets,
        })
    }

    /// Put a client on the scheduling queue.
    pub fn add_entry(
        &self,
        client_id: ClientId,
        fields: ScheduleUpdate,
    ) -> Result<ScheduledClient, SchedulingError> {
        if self.clients.fetch(&client_id)?.is_none() {
            return Err(SchedulingError::ClientNotFound(client_id));
        }

        let mut entry = ScheduledClient::new(next_entry_id(), client_id);
        fields.apply(&mut entry);
        Ok(self.schedule.insert(entry)?)
    }

    /// Apply a partial update to an entry.
    pub fn update_entry(
        &self,
        id: ScheduleEntryId,
        update: ScheduleUpdate,
    ) -> Result<ScheduledClient, SchedulingError> {
        match self.schedule.update(id, &update) {
            Ok(entry) => Ok(entry),
            Err(RepositoryError::NotFound) => Err(SchedulingError::EntryNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Archive or unarchive an entry.
    pub fn set_archived(
        &self,
        id: ScheduleEntryId,
        archived: bool,
    ) -> Result<(), SchedulingError> {
        match self.schedule.set_archived(id, archived) {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(SchedulingError::EntryNotFound(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Run the BabyNet age-out flag sweep.
    pub fn run_babynet_sweep(&self, now: NaiveDate) -> Result<SweepOutcome, SchedulingError> {
        Ok(clear_aged_out_babynet_flags(self.clients.as_ref(), now)?)
    }

    /// Drop the cached reference snapshot after a write to the reference
    /// tables (evaluator blocks, offices, districts, insurance aliases).
    pub fn invalidate_reference(&self) {
        self.reference.invalidate();
    }
}

/// Error raised by the scheduling service.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error("client {} not found", .0 .0)]
    ClientNotFound(ClientId),
    #[error("schedule entry {} not found", .0 .0)]
    EntryNotFound(ScheduleEntryId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Reference(#[from] ReferenceError),
    #[error(transparent)]
    Housekeeping(#[from] HousekeepingError),
}
