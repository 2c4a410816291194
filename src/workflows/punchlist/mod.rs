//! Punch-list import: the spreadsheet the front desk keeps gets exported as
//! CSV and folded back into the scheduling queue by client name. Rows that
//! match no active entry are reported, never fatal.

mod normalizer;
mod parser;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::workflows::eligibility::domain::Npi;
use crate::workflows::priority::domain::ClientId;
use crate::workflows::scheduling::domain::{ScheduleUpdate, ScheduledClient};
use crate::workflows::scheduling::repository::{
    ClientRepository, RepositoryError, ScheduleRepository,
};
use normalizer::normalize_name;
use parser::PunchListRecord;

#[derive(Debug, thiserror::Error)]
pub enum PunchListImportError {
    #[error("failed to read punch list export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid punch list CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not apply punch list data: {0}")]
    Repository(#[from] RepositoryError),
}

/// What one import run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PunchListSummary {
    pub applied: usize,
    /// Raw client names that matched no active schedule entry.
    pub unmatched: Vec<String>,
}

pub struct PunchListImporter;

impl PunchListImporter {
    pub fn from_path<C, S>(
        path: impl AsRef<Path>,
        clients: &C,
        schedule: &S,
    ) -> Result<PunchListSummary, PunchListImportError>
    where
        C: ClientRepository,
        S: ScheduleRepository,
    {
        let file = File::open(path)?;
        Self::from_reader(file, clients, schedule)
    }

    pub fn from_reader<R, C, S>(
        reader: R,
        clients: &C,
        schedule: &S,
    ) -> Result<PunchListSummary, PunchListImportError>
    where
        R: Read,
        C: ClientRepository,
        S: ScheduleRepository,
    {
        let records = parser::parse_records(reader)?;

        let clients_by_name: HashMap<String, ClientId> = clients
            .active()?
            .into_iter()
            .map(|client| (normalize_name(&client.full_name()), client.id))
            .collect();

        let active_entries = schedule.active()?;
        let mut summary = PunchListSummary::default();

        for record in records {
            let Some(entry) = clients_by_name
                .get(&record.normalized_name)
                .and_then(|id| first_entry_for(&active_entries, *id))
            else {
                summary.unmatched.push(record.raw_name);
                continue;
            };

            let update = build_update(&record);
            if update.is_empty() {
                continue;
            }
            schedule.update(entry.id, &update)?;
            summary.applied += 1;
        }

        Ok(summary)
    }
}

fn first_entry_for(entries: &[ScheduledClient], client_id: ClientId) -> Option<&ScheduledClient> {
    entries.iter().find(|entry| entry.client_id == client_id)
}

fn build_update(record: &PunchListRecord) -> ScheduleUpdate {
    let evaluator_npi = record.evaluator_npi.as_deref().and_then(|raw| {
        match Npi::new(raw) {
            Ok(npi) => Some(npi),
            Err(err) => {
                tracing::warn!(client = %record.raw_name, error = %err, "skipping bad NPI cell");
                None
            }
        }
    });

    ScheduleUpdate {
        color: record.color.clone(),
        evaluator_npi,
        date: record.date.clone(),
        time: record.time.clone(),
        office: record.office.clone(),
        notes: record.notes.clone(),
        code: record.code.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use super::*;
    use crate::workflows::priority::domain::{ClientId, ClientRecord};
    use crate::workflows::scheduling::domain::{ScheduleEntryId, ScheduledClient};
    use crate::workflows::scheduling::repository::InMemoryClinicStore;

    fn store_with_entry() -> Arc<InMemoryClinicStore> {
        let store = Arc::new(InMemoryClinicStore::new());
        store.upsert_client(ClientRecord::new(ClientId(501), "hash-501", "Mara", "Quinn"));
        ScheduleRepository::insert(
            store.as_ref(),
            ScheduledClient::new(ScheduleEntryId(1), ClientId(501)),
        )
        .expect("seed entry");
        store
    }

    #[test]
    fn applies_matching_rows_and_reports_the_rest() {
        let store = store_with_entry();
        let csv = "Client,Color,Evaluator NPI,Date,Time,Office,Code,Notes\n\
                   mara  QUINN,red,2222222222,6/20/25,9:30,charleston,96112,call first\n\
                   Nobody Known,blue,,,,,,\n";

        let summary =
            PunchListImporter::from_reader(Cursor::new(csv), store.as_ref(), store.as_ref())
                .expect("import runs");

        assert_eq!(summary.applied, 1);
        assert_eq!(summary.unmatched, vec!["Nobody Known".to_string()]);

        let entry = ScheduleRepository::fetch(store.as_ref(), ScheduleEntryId(1))
            .expect("fetch works")
            .expect("entry exists");
        assert_eq!(entry.color.as_deref(), Some("red"));
        assert_eq!(entry.code.as_deref(), Some("96112"));
        assert_eq!(
            entry.evaluator_npi.as_ref().map(|npi| npi.as_str()),
            Some("2222222222")
        );
    }

    #[test]
    fn bad_npi_cell_skips_the_field_not_the_row() {
        let store = store_with_entry();
        let csv = "Client,Color,Evaluator NPI,Date,Time,Office,Code,Notes\n\
                   Mara Quinn,green,not-an-npi,,,,,\n";

        let summary =
            PunchListImporter::from_reader(Cursor::new(csv), store.as_ref(), store.as_ref())
                .expect("import runs");

        assert_eq!(summary.applied, 1);
        let entry = ScheduleRepository::fetch(store.as_ref(), ScheduleEntryId(1))
            .expect("fetch works")
            .expect("entry exists");
        assert_eq!(entry.color.as_deref(), Some("green"));
        assert!(entry.evaluator_npi.is_none());
    }

    #[test]
    fn row_with_only_blank_fields_applies_nothing() {
        let store = store_with_entry();
        let csv = "Client,Color,Evaluator NPI,Date,Time,Office,Code,Notes\n\
                   Mara Quinn,,,,,,,\n";

        let summary =
            PunchListImporter::from_reader(Cursor::new(csv), store.as_ref(), store.as_ref())
                .expect("import runs");

        assert_eq!(summary.applied, 0);
        assert!(summary.unmatched.is_empty());
    }
}
