use std::sync::Arc;
use std::time::Duration;

use chrono::{Months, NaiveDate};

use crate::workflows::eligibility::domain::{
    Evaluator, Insurance, InsuranceCatalog, Npi, Office, OfficeKey, SchoolDistrict,
};
use crate::workflows::eligibility::reference::{
    ReferenceCache, ReferenceSnapshot, StaticReferenceSource,
};
use crate::workflows::priority::domain::{ClientId, ClientRecord};
use crate::workflows::scheduling::repository::InMemoryClinicStore;
use crate::workflows::scheduling::service::SchedulingService;

pub(super) type TestService =
    SchedulingService<InMemoryClinicStore, InMemoryClinicStore, StaticReferenceSource>;

pub(super) fn fixed_now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn npi(raw: &str) -> Npi {
    Npi::new(raw).expect("valid test NPI")
}

pub(super) fn snapshot() -> ReferenceSnapshot {
    let mut dana = Evaluator::new(npi("1111111111"), "Dana Whitfield");
    dana.blocked_districts = vec![4];
    let mut omar = Evaluator::new(npi("2222222222"), "Omar Bell");
    omar.accepted_insurance_ids = vec![1, 2];

    ReferenceSnapshot {
        evaluators: vec![dana, omar],
        offices: vec![
            Office {
                key: OfficeKey("charleston".to_string()),
                name: "Charleston Office".to_string(),
                latitude: 32.7765,
                longitude: -79.9311,
            },
            Office {
                key: OfficeKey("summerville".to_string()),
                name: "Summerville Office".to_string(),
                latitude: 33.0185,
                longitude: -80.1756,
            },
        ],
        districts: vec![
            SchoolDistrict {
                id: 2,
                short_name: Some("Charleston".to_string()),
                name: "Charleston County School District".to_string(),
            },
            SchoolDistrict {
                id: 4,
                short_name: None,
                name: "Dorchester School District 4".to_string(),
            },
        ],
        insurances: InsuranceCatalog::new(vec![
            Insurance {
                id: 1,
                short_name: "BabyNet".to_string(),
                aliases: vec!["SC BabyNet".to_string()],
            },
            Insurance {
                id: 2,
                short_name: "Medicaid".to_string(),
                aliases: vec!["Healthy Connections".to_string()],
            },
        ]),
    }
}

pub(super) fn seeded_store() -> Arc<InMemoryClinicStore> {
    let store = Arc::new(InMemoryClinicStore::new());

    let mut mara = ClientRecord::new(ClientId(501), "hash-501", "Mara", "Quinn");
    mara.dob = Some(fixed_now() - Months::new(32));
    mara.added_date = NaiveDate::from_ymd_opt(2024, 4, 1);
    mara.primary_insurance = Some("SC BabyNet".to_string());
    mara.secondary_insurance = Some("Healthy Connections".to_string());
    mara.school_district = Some("Dorchester School District 4".to_string());
    mara.pa_expiration = NaiveDate::from_ymd_opt(2025, 9, 30);
    mara.category = Some("ASD".to_string());
    store.upsert_client(mara);

    let mut theo = ClientRecord::new(ClientId(502), "hash-502", "Theo", "Imani");
    theo.dob = Some(fixed_now() - Months::new(50));
    theo.added_date = NaiveDate::from_ymd_opt(2024, 2, 10);
    theo.office = Some("Virtual".to_string());
    theo.category = Some("ADHD".to_string());
    store.upsert_client(theo);

    store
}

pub(super) fn service_with(store: Arc<InMemoryClinicStore>) -> Arc<TestService> {
    let reference = ReferenceCache::new(
        Arc::new(StaticReferenceSource::new(snapshot())),
        Duration::from_secs(600),
    );
    Arc::new(SchedulingService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        reference,
    ))
}
