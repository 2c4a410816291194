use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::display::ScheduleRow;
use super::domain::{FilterState, ScheduleColumn};

/// One checklist entry for a column filter: a distinct derived value and how
/// many rows carry it. Blanks show up as the "" option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub count: usize,
}

/// Distinct normalized values present in `rows` for `column`, with occurrence
/// counts, ordered by value.
pub fn facet_options(rows: &[ScheduleRow], column: ScheduleColumn) -> Vec<FacetOption> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        *counts.entry(row.value(column)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(value, count)| FacetOption {
            value: value.to_string(),
            count,
        })
        .collect()
}

/// Keep the rows matching `state`: columns AND together, values within a
/// column OR together, and a column with nothing selected constrains nothing.
/// Pure over its inputs, so reapplying a state is a no-op.
pub fn apply_filters(rows: &[ScheduleRow], state: &FilterState) -> Vec<ScheduleRow> {
    rows.iter()
        .filter(|row| {
            state.selections.iter().all(|(column, selected)| {
                selected.is_empty() || selected.contains(row.value(*column))
            })
        })
        .cloned()
        .collect()
}
