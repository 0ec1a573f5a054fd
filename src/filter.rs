//! Search and facet filtering over the tool store.
//!
//! `FilterCriteria` is an immutable value: every user action produces a new
//! criteria value, and callers re-run [`compute_visible`] after each change.
//! Evaluation never fails. A missing or odd field simply does not match the
//! predicate that looks at it.

use crate::catalog::ToolRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Selection value for the free-access facet.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum FreeAccess {
    Yes,
    No,
}

impl FreeAccess {
    pub fn as_str(self) -> &'static str {
        match self {
            FreeAccess::Yes => "Yes",
            FreeAccess::No => "No",
        }
    }
}

impl fmt::Display for FreeAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FreeAccess {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "free" => Ok(FreeAccess::Yes),
            "no" | "false" | "paid" => Ok(FreeAccess::No),
            other => Err(format!("expected yes or no, got '{other}'")),
        }
    }
}

/// Names one of the four facet selections on [`FilterCriteria`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKey {
    Categories,
    Usage,
    Licenses,
    Free,
}

impl FacetKey {
    pub fn as_str(self) -> &'static str {
        match self {
            FacetKey::Categories => "categories",
            FacetKey::Usage => "usage",
            FacetKey::Licenses => "licenses",
            FacetKey::Free => "free",
        }
    }
}

impl fmt::Display for FacetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "categories" | "category" => Ok(FacetKey::Categories),
            "usage" => Ok(FacetKey::Usage),
            "licenses" | "license" => Ok(FacetKey::Licenses),
            "free" => Ok(FacetKey::Free),
            other => Err(format!("unknown facet '{other}'")),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
/// Current search text, dimension choice, and facet selections.
///
/// Every field left empty places no constraint on the result.
pub struct FilterCriteria {
    pub search_text: String,
    pub selected_dimension: String,
    pub selected_categories: BTreeSet<String>,
    pub selected_usage: BTreeSet<String>,
    pub selected_licenses: BTreeSet<String>,
    pub selected_free: BTreeSet<FreeAccess>,
}

impl FilterCriteria {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Select one quality dimension; an empty name removes the constraint.
    pub fn with_dimension(mut self, dimension: impl Into<String>) -> Self {
        self.selected_dimension = dimension.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_usage<I, S>(mut self, usage: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_usage = usage.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_licenses<I, S>(mut self, licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_licenses = licenses.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_free<I>(mut self, free: I) -> Self
    where
        I: IntoIterator<Item = FreeAccess>,
    {
        self.selected_free = free.into_iter().collect();
        self
    }

    /// Replace the selection of one facet. Free-access values that do not
    /// read as yes/no are dropped.
    pub fn with_facet<I, S>(self, key: FacetKey, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into);
        match key {
            FacetKey::Categories => self.with_categories(values),
            FacetKey::Usage => self.with_usage(values),
            FacetKey::Licenses => self.with_licenses(values),
            FacetKey::Free => self.with_free(values.filter_map(|v| v.parse().ok())),
        }
    }

    pub fn toggle_category(mut self, category: &str) -> Self {
        toggle(&mut self.selected_categories, category);
        self
    }

    pub fn toggle_usage(mut self, usage: &str) -> Self {
        toggle(&mut self.selected_usage, usage);
        self
    }

    pub fn toggle_license(mut self, license: &str) -> Self {
        toggle(&mut self.selected_licenses, license);
        self
    }

    pub fn toggle_free(mut self, value: FreeAccess) -> Self {
        if !self.selected_free.remove(&value) {
            self.selected_free.insert(value);
        }
        self
    }

    /// Single-select tier control: picking a tier that is already selected
    /// (alone or alongside others) clears the selection, picking any other
    /// tier makes it the only one.
    pub fn select_tier(mut self, category: &str) -> Self {
        if self.selected_categories.contains(category) {
            self.selected_categories.clear();
        } else {
            self.selected_categories = BTreeSet::from([category.to_string()]);
        }
        self
    }

    /// Single-value license picker; an empty string means "all licenses".
    pub fn select_license(mut self, license: &str) -> Self {
        self.selected_licenses.clear();
        if !license.is_empty() {
            self.selected_licenses.insert(license.to_string());
        }
        self
    }

    /// "Only free access" checkbox.
    pub fn only_free(mut self, enabled: bool) -> Self {
        self.selected_free.clear();
        if enabled {
            self.selected_free.insert(FreeAccess::Yes);
        }
        self
    }

    /// Reset everything, including search text and dimension.
    pub fn cleared(self) -> Self {
        Self::default()
    }

    /// Whether any facet (not search or dimension) is constrained.
    pub fn has_facet_selection(&self) -> bool {
        !self.selected_categories.is_empty()
            || !self.selected_usage.is_empty()
            || !self.selected_licenses.is_empty()
            || !self.selected_free.is_empty()
    }

    /// Whether these criteria let every record through.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty() && self.selected_dimension.is_empty() && !self.has_facet_selection()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Decide whether `record` satisfies every active predicate.
///
/// Predicates run cheapest-rejection first: search, dimension, categories,
/// usage, license, free access.
pub fn is_included(record: &ToolRecord, criteria: &FilterCriteria) -> bool {
    matches_search(record, &criteria.search_text)
        && matches_dimension(record, &criteria.selected_dimension)
        && matches_categories(record, &criteria.selected_categories)
        && matches_usage(record, &criteria.selected_usage)
        && matches_license(record, &criteria.selected_licenses)
        && matches_free(record, &criteria.selected_free)
}

/// Records passing `criteria`, in their original order.
pub fn compute_visible<'a>(
    records: &'a [ToolRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a ToolRecord> {
    records
        .iter()
        .filter(|record| is_included(record, criteria))
        .collect()
}

fn matches_search(record: &ToolRecord, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();
    record.name.to_lowercase().contains(&needle)
        || record
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(&needle))
}

/// Substring test on the namespace-stripped dimension names.
///
/// Related-tool lookup compares full identifiers for equality instead.
pub(crate) fn matches_dimension(record: &ToolRecord, dimension: &str) -> bool {
    dimension.is_empty()
        || record
            .dimension_names()
            .any(|name| name.contains(dimension))
}

fn matches_categories(record: &ToolRecord, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || record.category_names().any(|name| selected.contains(name))
}

fn matches_usage(record: &ToolRecord, selected: &BTreeSet<String>) -> bool {
    selected.is_empty()
        || record
            .how_to_use
            .iter()
            .any(|usage| selected.contains(usage))
}

fn matches_license(record: &ToolRecord, selected: &BTreeSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    record
        .license
        .as_ref()
        .is_some_and(|license| selected.contains(license))
}

fn matches_free(record: &ToolRecord, selected: &BTreeSet<FreeAccess>) -> bool {
    let wants_free = selected.contains(&FreeAccess::Yes);
    let wants_paid = selected.contains(&FreeAccess::No);
    match (wants_free, wants_paid) {
        (true, false) => record.is_free(),
        (false, true) => !record.is_free(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolId;
    use serde_json::{Value, json};

    fn record(id: &str, value: Value) -> ToolRecord {
        ToolRecord::from_value(ToolId(id.to_string()), value).expect("valid record")
    }

    fn alpha() -> ToolRecord {
        record(
            "alpha",
            json!({
                "name": "Alpha",
                "description": "testing tool",
                "license": "https://x/MIT",
                "isAccessibleForFree": true,
                "applicationCategory": {"@id": "rs:AnalysisCode"},
                "howToUse": "library",
                "hasQualityDimension": {"@id": "dim:compatibility"}
            }),
        )
    }

    fn catalog() -> Vec<ToolRecord> {
        vec![
            alpha(),
            record(
                "beta",
                json!({
                    "name": "Beta",
                    "description": "static analysis for notebooks",
                    "isAccessibleForFree": false,
                    "howToUse": ["command-line", "web"],
                    "hasQualityDimension": [{"@id": "dim:maintainability"}]
                }),
            ),
            record("gamma", json!({"name": "Gamma"})),
        ]
    }

    fn ids<'a>(records: &[&'a ToolRecord]) -> Vec<&'a str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_criteria_include_everything() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unconstrained());
        for rec in catalog() {
            assert!(is_included(&rec, &criteria), "{} should pass", rec.id);
        }
    }

    #[test]
    fn search_is_case_insensitive_over_name_and_description() {
        let rec = alpha();
        for text in ["alpha", "ALPHA", "lph", "TESTING"] {
            let criteria = FilterCriteria::default().with_search(text);
            assert!(is_included(&rec, &criteria), "search {text}");
        }
        let criteria = FilterCriteria::default().with_search("notebook");
        assert!(!is_included(&rec, &criteria));
    }

    #[test]
    fn missing_description_does_not_match_description_search() {
        let records = catalog();
        let criteria = FilterCriteria::default().with_search("notebooks");
        assert_eq!(ids(&compute_visible(&records, &criteria)), vec!["beta"]);
    }

    #[test]
    fn dimension_filter_uses_substring_of_stripped_name() {
        let rec = alpha();
        assert!(is_included(&rec, &FilterCriteria::default().with_dimension("compatibility")));
        assert!(is_included(&rec, &FilterCriteria::default().with_dimension("compat")));
        assert!(!is_included(&rec, &FilterCriteria::default().with_dimension("dim:")));
        assert!(!is_included(&rec, &FilterCriteria::default().with_dimension("usability")));
    }

    #[test]
    fn category_filter_matches_any_of_selection() {
        let rec = alpha();
        let hit = FilterCriteria::default().with_categories(["AnalysisCode"]);
        let miss = FilterCriteria::default().with_categories(["PrototypeTool"]);
        let either = FilterCriteria::default().with_categories(["PrototypeTool", "AnalysisCode"]);
        assert!(is_included(&rec, &hit));
        assert!(!is_included(&rec, &miss));
        assert!(is_included(&rec, &either));
    }

    #[test]
    fn usage_filter_matches_any_of_selection() {
        let records = catalog();
        let criteria = FilterCriteria::default().with_usage(["web", "library"]);
        assert_eq!(ids(&compute_visible(&records, &criteria)), vec!["alpha", "beta"]);
    }

    #[test]
    fn license_filter_is_exact_on_raw_string() {
        let rec = alpha();
        assert!(is_included(&rec, &FilterCriteria::default().with_licenses(["https://x/MIT"])));
        assert!(!is_included(&rec, &FilterCriteria::default().with_licenses(["MIT"])));

        let unlicensed = record("gamma", json!({"name": "Gamma"}));
        assert!(!is_included(
            &unlicensed,
            &FilterCriteria::default().with_licenses(["https://x/MIT"])
        ));
    }

    #[test]
    fn free_filter_follows_yes_no_selection() {
        let records = catalog();
        let visible = |free: &[FreeAccess]| {
            let criteria = FilterCriteria::default().with_free(free.iter().copied());
            ids(&compute_visible(&records, &criteria))
        };
        assert_eq!(visible(&[FreeAccess::Yes]), vec!["alpha"]);
        assert_eq!(visible(&[FreeAccess::No]), vec!["beta", "gamma"]);
        assert_eq!(
            visible(&[FreeAccess::Yes, FreeAccess::No]),
            vec!["alpha", "beta", "gamma"]
        );
        assert_eq!(visible(&[]), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let records = catalog();
        let criteria = FilterCriteria::default()
            .with_search("a")
            .with_free([FreeAccess::No])
            .with_usage(["web"]);
        assert_eq!(ids(&compute_visible(&records, &criteria)), vec!["beta"]);
    }

    #[test]
    fn compute_visible_keeps_original_order_and_records() {
        let records = catalog();
        let before = records.clone();
        let criteria = FilterCriteria::default().with_search("a");
        let first = ids(&compute_visible(&records, &criteria));
        let second = ids(&compute_visible(&records, &criteria));
        assert_eq!(first, vec!["alpha", "beta", "gamma"]);
        assert_eq!(first, second);
        assert_eq!(records, before);
    }

    #[test]
    fn tier_selection_is_single_select() {
        let criteria = FilterCriteria::default().select_tier("PrototypeTool");
        assert_eq!(
            criteria.selected_categories,
            BTreeSet::from(["PrototypeTool".to_string()])
        );
        let criteria = criteria.select_tier("AnalysisCode");
        assert_eq!(
            criteria.selected_categories,
            BTreeSet::from(["AnalysisCode".to_string()])
        );
        let criteria = criteria.select_tier("AnalysisCode");
        assert!(criteria.selected_categories.is_empty());

        let criteria = FilterCriteria::default()
            .with_categories(["AnalysisCode", "PrototypeTool"])
            .select_tier("PrototypeTool");
        assert!(criteria.selected_categories.is_empty());
    }

    #[test]
    fn toggles_add_then_remove() {
        let criteria = FilterCriteria::default()
            .toggle_usage("library")
            .toggle_license("https://x/MIT")
            .toggle_category("AnalysisCode")
            .toggle_free(FreeAccess::Yes);
        assert!(criteria.has_facet_selection());

        let criteria = criteria
            .toggle_usage("library")
            .toggle_license("https://x/MIT")
            .toggle_category("AnalysisCode")
            .toggle_free(FreeAccess::Yes);
        assert!(!criteria.has_facet_selection());
    }

    #[test]
    fn single_value_license_and_free_checkbox() {
        let criteria = FilterCriteria::default().select_license("https://x/MIT");
        assert_eq!(criteria.selected_licenses.len(), 1);
        assert!(criteria.select_license("").selected_licenses.is_empty());

        let criteria = FilterCriteria::default().only_free(true);
        assert_eq!(criteria.selected_free, BTreeSet::from([FreeAccess::Yes]));
        assert!(criteria.only_free(false).selected_free.is_empty());
    }

    #[test]
    fn cleared_resets_search_and_dimension_too() {
        let criteria = FilterCriteria::default()
            .with_search("alpha")
            .with_dimension("compatibility")
            .with_usage(["library"])
            .cleared();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn search_and_dimension_do_not_count_as_facets() {
        let criteria = FilterCriteria::default()
            .with_search("alpha")
            .with_dimension("compatibility");
        assert!(!criteria.has_facet_selection());
        assert!(!criteria.is_unconstrained());
    }

    #[test]
    fn free_access_parses_common_spellings() {
        assert_eq!("Yes".parse::<FreeAccess>(), Ok(FreeAccess::Yes));
        assert_eq!("false".parse::<FreeAccess>(), Ok(FreeAccess::No));
        assert!("maybe".parse::<FreeAccess>().is_err());
        assert_eq!(FreeAccess::No.to_string(), "No");
    }

    #[test]
    fn with_facet_replaces_one_selection() {
        let criteria = FilterCriteria::default()
            .with_search("fair")
            .with_usage(["web"])
            .with_facet(FacetKey::Categories, ["PrototypeTool", "AnalysisCode"])
            .with_facet(FacetKey::Usage, ["library"]);
        assert_eq!(criteria.search_text, "fair");
        assert_eq!(
            criteria.selected_categories,
            BTreeSet::from(["AnalysisCode".to_string(), "PrototypeTool".to_string()])
        );
        assert_eq!(criteria.selected_usage, BTreeSet::from(["library".to_string()]));

        let criteria = criteria
            .with_facet(FacetKey::Licenses, ["https://x/MIT"])
            .with_facet(FacetKey::Free, ["yes", "sometimes"]);
        assert_eq!(criteria.selected_licenses.len(), 1);
        assert_eq!(criteria.selected_free, BTreeSet::from([FreeAccess::Yes]));

        let criteria = criteria.with_facet(FacetKey::Usage, Vec::<String>::new());
        assert!(criteria.selected_usage.is_empty());
    }

    #[test]
    fn facet_key_parses_names() {
        assert_eq!("license".parse::<FacetKey>(), Ok(FacetKey::Licenses));
        assert_eq!("Categories".parse::<FacetKey>(), Ok(FacetKey::Categories));
        assert!("dimension".parse::<FacetKey>().is_err());
        assert_eq!(FacetKey::Free.to_string(), "free");
    }
}
