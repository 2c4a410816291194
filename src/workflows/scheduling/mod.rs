//! The scheduling board: queue entries, the derived display rows operators
//! filter on, the repositories behind them, and the HTTP surface.

pub mod display;
pub mod domain;
pub mod facets;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use display::{DisplayLookups, ScheduleRow};
pub use domain::{
    FilterState, ScheduleColumn, ScheduleEntryId, ScheduleUpdate, ScheduledClient, VIRTUAL_OFFICE,
};
pub use facets::{apply_filters, facet_options, FacetOption};
pub use repository::{
    ClientRepository, InMemoryClinicStore, RepositoryError, ScheduleRepository,
};
pub use router::scheduling_router;
pub use service::{ColumnFacets, ScheduleBoard, SchedulingError, SchedulingService};
