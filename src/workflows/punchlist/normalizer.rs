/// Normalize a client name from a spreadsheet cell: strip zero-width junk,
/// collapse whitespace, lowercase. Matching is on the normalized form only.
pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}
