//! Evaluator eligibility: reference data (evaluators, offices, districts,
//! insurances), the layered blocking rules that narrow the roster for one
//! client, nearest-office geography, and the cached reference snapshot the
//! request handlers read through.

pub mod domain;
pub mod filter;
pub mod geo;
pub mod reference;

#[cfg(test)]
mod tests;

pub use domain::{
    Evaluator, Insurance, InsuranceCatalog, Npi, NpiError, Office, OfficeKey, SchoolDistrict,
};
pub use filter::{EligibilityFilter, EligibilitySplit};
pub use geo::{distance_km, nearest_offices, GeoPoint};
pub use reference::{
    ReferenceCache, ReferenceError, ReferenceSnapshot, ReferenceSource, StaticReferenceSource,
};
