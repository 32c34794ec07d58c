//! Sequential identity allocation.
//!
//! # Invariants
//! - A new ID is strictly greater (by numeric suffix) than every existing ID
//!   carrying the same prefix; an empty collection starts at `0001`.
//! - Malformed or foreign-prefixed IDs are skipped, never reported upward.
//! - No locking: callers load, allocate, append and save without another
//!   allocation against the same collection in between.

use crate::model::record::Record;

/// Why an existing ID did not contribute to allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedId {
    /// ID does not start with the expected prefix.
    ForeignPrefix,
    /// Suffix after the prefix is empty, non-numeric or overflows.
    BadSuffix,
}

/// Parses the numeric sequence after `prefix`.
pub fn parse_id_suffix(id: &str, prefix: &str) -> Result<u64, MalformedId> {
    let suffix = id.strip_prefix(prefix).ok_or(MalformedId::ForeignPrefix)?;
    if suffix.is_empty() || !suffix.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(MalformedId::BadSuffix);
    }
    suffix.parse::<u64>().map_err(|_| MalformedId::BadSuffix)
}

/// Formats `prefix` plus a zero-padded four digit sequence.
pub fn format_id(prefix: &str, sequence: u64) -> String {
    format!("{prefix}{sequence:04}")
}

/// Returns the next free ID for `prefix` given the existing IDs.
pub fn next_id<'a, I>(existing: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(|id| parse_id_suffix(id, prefix).ok())
        .max();
    format_id(prefix, max.map_or(1, |value| value.saturating_add(1)))
}

/// Next free ID for a loaded collection, using its collection prefix.
pub fn next_record_id<R: Record>(records: &[R]) -> String {
    next_id(
        records.iter().map(|record| record.id()),
        R::COLLECTION.id_prefix(),
    )
}

#[cfg(test)]
mod tests {
    use super::{format_id, next_id, parse_id_suffix, MalformedId};

    #[test]
    fn empty_collection_starts_at_one() {
        assert_eq!(next_id(Vec::<&str>::new(), "item-"), "item-0001");
    }

    #[test]
    fn next_id_continues_after_maximum_not_count() {
        let ids = ["item-0002", "item-0010", "item-0003"];
        assert_eq!(next_id(ids, "item-"), "item-0011");
    }

    #[test]
    fn malformed_and_foreign_ids_are_ignored() {
        let ids = ["char-0040", "item-", "item-abc", "item-7x", "legacy", "item-0004"];
        assert_eq!(next_id(ids, "item-"), "item-0005");
        assert_eq!(next_id(["legacy", "shop-x"], "shop-"), "shop-0001");
    }

    #[test]
    fn parse_reports_reason_for_rejection() {
        assert_eq!(parse_id_suffix("monster-0012", "monster-"), Ok(12));
        assert_eq!(
            parse_id_suffix("item-0012", "monster-"),
            Err(MalformedId::ForeignPrefix)
        );
        assert_eq!(
            parse_id_suffix("monster-+3", "monster-"),
            Err(MalformedId::BadSuffix)
        );
    }

    #[test]
    fn sequences_past_four_digits_widen() {
        assert_eq!(format_id("quest-", 12345), "quest-12345");
        assert_eq!(next_id(["item-9999"], "item-"), "item-10000");
    }
}
