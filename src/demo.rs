//! Canned dataset behind the CLI report and the default server wiring.
//! Shaped like production data closely enough to exercise every priority
//! tier, every exclusion rule, and the board's derived columns.

use std::sync::Arc;

use chrono::{Months, NaiveDate};
use clinic_ops::workflows::eligibility::domain::{
    Evaluator, Insurance, InsuranceCatalog, Npi, Office, OfficeKey, SchoolDistrict,
};
use clinic_ops::workflows::eligibility::reference::ReferenceSnapshot;
use clinic_ops::workflows::priority::domain::{ClientId, ClientRecord};
use clinic_ops::workflows::scheduling::domain::{ScheduleEntryId, ScheduledClient, VIRTUAL_OFFICE};
use clinic_ops::workflows::scheduling::repository::{
    InMemoryClinicStore, RepositoryError, ScheduleRepository,
};

fn npi(raw: &str) -> Npi {
    Npi::new(raw).expect("demo NPIs are ten digits")
}

pub(crate) fn reference_snapshot() -> ReferenceSnapshot {
    let mut dana = Evaluator::new(npi("1111111111"), "Dana Whitfield");
    dana.blocked_districts = vec![4];
    dana.blocked_zips = vec!["29410".to_string()];

    let mut omar = Evaluator::new(npi("2222222222"), "Omar Bell");
    omar.accepted_insurance_ids = vec![1, 2];
    omar.offices = vec![OfficeKey("charleston".to_string())];

    let iris = Evaluator::new(npi("3333333333"), "Iris Chen");

    ReferenceSnapshot {
        evaluators: vec![dana, omar, iris],
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
            SchoolDistrict {
                id: 5,
                short_name: Some("Berkeley".to_string()),
                name: "Berkeley County School District".to_string(),
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
            Insurance {
                id: 3,
                short_name: "Tricare".to_string(),
                aliases: vec!["Tricare East".to_string()],
            },
        ]),
    }
}

/// Seed the in-memory store with clients spanning every priority tier plus a
/// couple of board entries. Ages are anchored to `now` so the tier spread
/// survives no matter when the demo runs.
pub(crate) fn seed_store(now: NaiveDate) -> Result<Arc<InMemoryClinicStore>, RepositoryError> {
    let store = Arc::new(InMemoryClinicStore::new());

    let mut nora = ClientRecord::new(ClientId(101), "demo-101", "Nora", "Fields");
    nora.dob = Some(now - Months::new(32));
    nora.added_date = now.checked_sub_months(Months::new(2));
    nora.high_priority = true;
    nora.primary_insurance = Some("SC BabyNet".to_string());
    nora.school_district = Some("Dorchester School District 4".to_string());
    nora.zip = Some("29437".to_string());
    nora.pa_expiration = now.checked_add_months(Months::new(3));
    nora.category = Some("ASD".to_string());
    nora.closest_offices = vec!["charleston".to_string(), "summerville".to_string()];
    store.upsert_client(nora);

    let mut eli = ClientRecord::new(ClientId(102), "demo-102", "Eli", "Navarro");
    eli.dob = Some(now - Months::new(40));
    eli.added_date = now.checked_sub_months(Months::new(5));
    eli.baby_net = true;
    eli.primary_insurance = Some("SC BabyNet".to_string());
    eli.secondary_insurance = Some("Healthy Connections".to_string());
    eli.school_district = Some("Charleston County School District".to_string());
    eli.category = Some("ASD".to_string());
    store.upsert_client(eli);

    let mut lena = ClientRecord::new(ClientId(105), "demo-105", "Lena", "Brooks");
    lena.dob = Some(now - Months::new(34));
    lena.added_date = now.checked_sub_months(Months::new(4));
    lena.primary_insurance = Some("SC BabyNet".to_string());
    lena.category = Some("ASD".to_string());
    store.upsert_client(lena);

    let mut priya = ClientRecord::new(ClientId(103), "demo-103", "Priya", "Shah");
    priya.dob = Some(now - Months::new(60));
    priya.added_date = now.checked_sub_months(Months::new(1));
    priya.high_priority = true;
    priya.primary_insurance = Some("Healthy Connections".to_string());
    priya.pa_expiration = now.checked_sub_months(Months::new(1));
    priya.category = Some("ADHD".to_string());
    store.upsert_client(priya);

    let mut sam = ClientRecord::new(ClientId(104), "demo-104", "Sam", "Okafor");
    sam.dob = Some(now - Months::new(72));
    sam.added_date = now.checked_sub_months(Months::new(8));
    sam.primary_insurance = Some("Tricare East".to_string());
    sam.school_district = Some("Berkeley County School District".to_string());
    sam.category = Some("ADHD".to_string());
    store.upsert_client(sam);

    // Note-only shell, minted in the synthetic five-digit range.
    let mut shell = ClientRecord::new(ClientId(20_001), "demo-20001", "Waitlist", "Inquiry");
    shell.added_date = now.checked_sub_months(Months::new(3));
    store.upsert_client(shell);

    let mut first = ScheduledClient::new(ScheduleEntryId(9_001), ClientId(101));
    first.evaluator_npi = Some(npi("2222222222"));
    first.date = Some("6/20/25".to_string());
    first.time = Some("9:30".to_string());
    first.office = Some("charleston".to_string());
    first.code = Some("96112".to_string());
    first.color = Some("green".to_string());
    store.insert(first)?;

    let mut second = ScheduledClient::new(ScheduleEntryId(9_002), ClientId(103));
    second.office = Some(VIRTUAL_OFFICE.to_string());
    second.notes = Some("records requested".to_string());
    store.insert(second)?;

    Ok(store)
}
