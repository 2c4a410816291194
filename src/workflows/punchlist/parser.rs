use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::normalizer::normalize_name;

/// One normalized punch-list row ready to apply to a schedule entry.
#[derive(Debug)]
pub(crate) struct PunchListRecord {
    pub(crate) normalized_name: String,
    pub(crate) raw_name: String,
    pub(crate) color: Option<String>,
    pub(crate) evaluator_npi: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) time: Option<String>,
    pub(crate) office: Option<String>,
    pub(crate) code: Option<String>,
    pub(crate) notes: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<PunchListRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<PunchListRow>() {
        let row = record?;
        records.push(PunchListRecord {
            normalized_name: normalize_name(&row.client),
            raw_name: row.client,
            color: row.color,
            evaluator_npi: row.evaluator_npi,
            date: row.date,
            time: row.time,
            office: row.office,
            code: row.code,
            notes: row.notes,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct PunchListRow {
    #[serde(rename = "Client")]
    client: String,
    #[serde(rename = "Color", default, deserialize_with = "empty_string_as_none")]
    color: Option<String>,
    #[serde(
        rename = "Evaluator NPI",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    evaluator_npi: Option<String>,
    #[serde(rename = "Date", default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(rename = "Time", default, deserialize_with = "empty_string_as_none")]
    time: Option<String>,
    #[serde(rename = "Office", default, deserialize_with = "empty_string_as_none")]
    office: Option<String>,
    #[serde(rename = "Code", default, deserialize_with = "empty_string_as_none")]
    code: Option<String>,
    #[serde(rename = "Notes", default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
