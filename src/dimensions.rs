//! Quality-dimension index: which tools carry each dimension.

use crate::catalog::{ToolId, ToolRecord, ToolStore};
use crate::facets::dimension_label;
use crate::filter::matches_dimension;
use serde::Serialize;

/// Tools listed per dimension before the overview collapses to "+ N more".
pub const DIMENSION_PREVIEW_LIMIT: usize = 5;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// One dimension and the tools that carry it, in store order.
pub struct DimensionEntry {
    pub name: String,
    pub tools: Vec<ToolId>,
}

impl DimensionEntry {
    pub fn label(&self) -> String {
        dimension_label(&self.name)
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    pub fn preview(&self) -> &[ToolId] {
        &self.tools[..self.tools.len().min(DIMENSION_PREVIEW_LIMIT)]
    }

    /// Tools left out of [`Self::preview`].
    pub fn remaining(&self) -> usize {
        self.tools.len().saturating_sub(DIMENSION_PREVIEW_LIMIT)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DimensionIndex {
    entries: Vec<DimensionEntry>,
}

impl DimensionIndex {
    /// Index `records` under each of `names`.
    ///
    /// Membership uses the same containment rule as the dimension filter, so a
    /// dimension's count equals what filtering by it would show.
    pub fn build(records: &[ToolRecord], names: &[String]) -> Self {
        let entries = names
            .iter()
            .map(|name| DimensionEntry {
                name: name.clone(),
                tools: records
                    .iter()
                    .filter(|record| matches_dimension(record, name))
                    .map(|record| record.id.clone())
                    .collect(),
            })
            .collect();
        Self { entries }
    }

    /// Index every dimension that occurs in the store.
    pub fn from_store(store: &ToolStore) -> Self {
        Self::build(store.all(), store.dimension_names())
    }

    pub fn entries(&self) -> &[DimensionEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&DimensionEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
