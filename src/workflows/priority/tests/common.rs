use chrono::{Months, NaiveDate};

use crate::workflows::priority::domain::{ClientId, ClientRecord};

/// Fixed evaluation instant used across the priority tests.
pub(super) fn fixed_now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn client(id: i64, first: &str, last: &str) -> ClientRecord {
    let mut record = ClientRecord::new(ClientId(id), format!("hash-{id}"), first, last);
    record.added_date = NaiveDate::from_ymd_opt(2024, 1, 2);
    record
}

/// A client born `months` months before the fixed instant.
pub(super) fn client_aged_months(id: i64, months: u32) -> ClientRecord {
    let mut record = client(id, "Client", &format!("{id}"));
    record.dob = Some(fixed_now() - Months::new(months));
    record
}
