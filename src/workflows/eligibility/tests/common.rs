use crate::workflows::eligibility::domain::{
    Evaluator, Insurance, InsuranceCatalog, Npi, OfficeKey, SchoolDistrict,
};
use crate::workflows::priority::domain::{ClientId, ClientRecord};

pub(super) fn npi(raw: &str) -> Npi {
    Npi::new(raw).expect("valid test NPI")
}

pub(super) fn evaluator(raw_npi: &str, name: &str) -> Evaluator {
    Evaluator::new(npi(raw_npi), name)
}

pub(super) fn districts() -> Vec<SchoolDistrict> {
    vec![
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
    ]
}

pub(super) fn insurances() -> InsuranceCatalog {
    InsuranceCatalog::new(vec![
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
            aliases: Vec::new(),
        },
    ])
}

pub(super) fn client_in(district: Option<&str>, zip: Option<&str>) -> ClientRecord {
    let mut client = ClientRecord::new(ClientId(301), "hash-301", "Casey", "Reid");
    client.school_district = district.map(str::to_string);
    client.zip = zip.map(str::to_string);
    client
}

pub(super) fn office_key(key: &str) -> OfficeKey {
    OfficeKey(key.to_string())
}
