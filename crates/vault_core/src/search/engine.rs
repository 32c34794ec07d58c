//! Case-insensitive substring matching over per-record haystacks.
//!
//! # Invariants
//! - Results keep collection order.
//! - A term that is blank after trimming matches nothing.

use crate::model::record::Record;

/// Lowercased haystack: the record's search fields joined by single spaces.
pub fn haystack<R: Record>(record: &R) -> String {
    record.search_fields().join(" ").to_lowercase()
}

/// Normalized needle for `term`, or `None` when the term is blank.
pub fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Whether `record` contains the already-normalized `needle`.
pub fn matches<R: Record>(record: &R, needle: &str) -> bool {
    haystack(record).contains(needle)
}

/// Records whose haystack contains `term`, case-insensitively.
pub fn search<'a, R: Record>(records: &'a [R], term: &str) -> Vec<&'a R> {
    let Some(needle) = normalize_term(term) else {
        return Vec::new();
    };
    records
        .iter()
        .filter(|record| matches(*record, &needle))
        .collect()
}
