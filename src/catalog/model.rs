//! Deserializable representation of one tool record.
//!
//! Records are JSON-LD-ish documents. Fields that may hold one value or a list
//! are normalized to `Vec` here, at the ingestion boundary, so nothing
//! downstream has to ask "is this one or many" again. Keys the catalog does not
//! interpret are kept in `extra` so detail views can still show them.

use crate::catalog::identity::{
    CATEGORY_NAMESPACE, DIMENSION_NAMESPACE, Reference, ToolId,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A field that source data writes either as a single value or as a list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(values) => values,
            OneOrMany::One(value) => vec![value],
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<OneOrMany<T>>::deserialize(deserializer)?
        .map(OneOrMany::into_vec)
        .unwrap_or_default())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One entry in the tool catalog.
pub struct ToolRecord {
    /// Assigned from the source filename, never read from the document.
    #[serde(skip_deserializing)]
    pub id: ToolId,
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_accessible_for_free: Option<bool>,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub application_category: Vec<Reference>,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub how_to_use: Vec<String>,
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub has_quality_dimension: Vec<Reference>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ToolRecord {
    /// Build a record from an already-parsed JSON document.
    pub fn from_value(id: ToolId, value: Value) -> Result<Self> {
        let mut record: ToolRecord = serde_json::from_value(value)
            .with_context(|| format!("tool record {id} does not match the expected shape"))?;
        // The file stem is the only id; a stray "id" key would shadow it on output.
        record.extra.remove("id");
        record.id = id;
        Ok(record)
    }

    /// Read and parse a record file; the id comes from the file name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let id = ToolId::from_path(path)
            .with_context(|| format!("{} has no usable file name", path.display()))?;
        let data =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let value: Value =
            serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
        Self::from_value(id, value)
    }

    /// Category names with the `rs:` namespace removed.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.application_category
            .iter()
            .filter_map(|reference| reference.bare_name(CATEGORY_NAMESPACE))
    }

    /// Full quality-dimension identifiers (`dim:compatibility`).
    pub fn dimension_ids(&self) -> impl Iterator<Item = &str> {
        self.has_quality_dimension
            .iter()
            .filter_map(Reference::id)
    }

    /// Quality-dimension names with the `dim:` namespace removed.
    pub fn dimension_names(&self) -> impl Iterator<Item = &str> {
        self.has_quality_dimension
            .iter()
            .filter_map(|reference| reference.bare_name(DIMENSION_NAMESPACE))
    }

    /// Only an explicit `true` counts as free; absent means not free.
    pub fn is_free(&self) -> bool {
        self.is_accessible_for_free == Some(true)
    }
}
