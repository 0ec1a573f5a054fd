//! Related-tool lookup for the detail view.

use crate::catalog::ToolRecord;
use std::collections::BTreeSet;

/// How many related tools a detail view shows.
pub const RELATED_LIMIT: usize = 3;

/// Other records that share at least one quality dimension with `record`.
///
/// Dimensions are compared by full identifier. The record itself is never
/// returned, results keep the order of `all`, and at most `limit` come back.
pub fn find_related<'a>(
    record: &ToolRecord,
    all: &'a [ToolRecord],
    limit: usize,
) -> Vec<&'a ToolRecord> {
    let own: BTreeSet<&str> = record.dimension_ids().collect();
    if own.is_empty() {
        return Vec::new();
    }
    all.iter()
        .filter(|candidate| candidate.id != record.id)
        .filter(|candidate| candidate.dimension_ids().any(|id| own.contains(id)))
        .take(limit)
        .collect()
}
