//! Facet vocabulary derived from the loaded records.
//!
//! Every option a user can pick comes from the data itself; there is no
//! separately maintained vocabulary. Output lists are deduplicated and sorted
//! so repeated derivations over the same store are identical.

use crate::catalog::ToolRecord;
use serde::Serialize;
use std::collections::BTreeSet;

/// Options for the free-access facet. Boolean-valued, so never scanned.
pub const FREE_OPTIONS: [bool; 2] = [true, false];

/// Category tiers offered by the single-select "software tier" control, from
/// broadest to narrowest.
pub const SOFTWARE_TIERS: [&str; 3] = [
    "ResearchInfrastructureSoftware",
    "PrototypeTool",
    "AnalysisCode",
];

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Distinct values available for each facet.
pub struct FacetOptions {
    pub categories: Vec<String>,
    pub usage: Vec<String>,
    pub licenses: Vec<String>,
    pub free: [bool; 2],
}

/// Scan all records and collect the distinct facet values.
///
/// Categories lose their `rs:` namespace; usage strings and licenses are kept
/// verbatim because the license filter matches the raw string.
pub fn derive_facet_options(records: &[ToolRecord]) -> FacetOptions {
    let mut categories = BTreeSet::new();
    let mut usage = BTreeSet::new();
    let mut licenses = BTreeSet::new();

    for record in records {
        categories.extend(record.category_names().map(str::to_string));
        usage.extend(record.how_to_use.iter().cloned());
        if let Some(license) = &record.license {
            licenses.insert(license.clone());
        }
    }

    FacetOptions {
        categories: categories.into_iter().collect(),
        usage: usage.into_iter().collect(),
        licenses: licenses.into_iter().collect(),
        free: FREE_OPTIONS,
    }
}

/// Distinct quality-dimension names with the `dim:` namespace removed.
pub fn derive_dimension_names(records: &[ToolRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(ToolRecord::dimension_names)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Human-readable license name: the last path segment of the license URI.
pub fn license_label(license: &str) -> &str {
    license.rsplit('/').next().unwrap_or(license)
}

/// Split a CamelCase category into words (`PrototypeTool` -> `Prototype Tool`).
pub fn category_label(category: &str) -> String {
    let mut label = String::with_capacity(category.len() + 4);
    for ch in category.chars() {
        if ch.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(ch);
    }
    label.trim().to_string()
}

/// Dimension name with its first character upper-cased.
pub fn dimension_label(dimension: &str) -> String {
    let mut chars = dimension.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
