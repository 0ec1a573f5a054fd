//! Read-only store of every tool record.
//!
//! The store is populated once from a directory of `*.json` documents and
//! never mutated afterwards. Derived vocabulary (facet options, dimension
//! names) is computed on first access and cached alongside the records since
//! nothing can invalidate it.

use crate::catalog::identity::ToolId;
use crate::catalog::model::ToolRecord;
use crate::facets::{FacetOptions, derive_dimension_names, derive_facet_options};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
/// A document that was left out of the store, with the reason.
pub struct SkippedRecord {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a directory load: how many documents became records and how
/// many were left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

#[derive(Debug)]
/// Tool records plus an index keyed by tool id.
pub struct ToolStore {
    records: Vec<ToolRecord>,
    by_id: BTreeMap<ToolId, usize>,
    skipped: Vec<SkippedRecord>,
    facets: OnceLock<FacetOptions>,
    dimension_names: OnceLock<Vec<String>>,
}

impl ToolStore {
    /// Load every `*.json` file directly inside `dir`.
    ///
    /// Records come back in file-name order. A document that cannot be parsed
    /// into a record is skipped with a warning; an unreadable directory is an
    /// error because the catalog cannot start without its data.
    pub fn load(dir: &Path) -> Result<Self> {
        let paths = collect_record_files(dir)?;
        let mut records = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();
        for path in paths {
            match ToolRecord::from_path(&path) {
                Ok(record) => {
                    debug!(id = %record.id, "loaded tool record");
                    records.push(record);
                }
                Err(err) => {
                    warn!(path = %path.display(), "skipping tool record: {err:#}");
                    skipped.push(SkippedRecord {
                        path,
                        reason: format!("{err:#}"),
                    });
                }
            }
        }

        let mut store = Self::from_records(records)
            .with_context(|| format!("indexing tool records from {}", dir.display()))?;
        store.skipped = skipped;
        if store.is_empty() {
            warn!(dir = %dir.display(), "tool directory contains no usable records");
        }
        let report = store.report();
        info!(
            records = report.loaded,
            skipped = report.skipped,
            dir = %dir.display(),
            "loaded tool catalog"
        );
        Ok(store)
    }

    /// Build a store from records that were parsed elsewhere.
    ///
    /// Order is kept as given. Ids must be non-empty and unique.
    pub fn from_records(records: Vec<ToolRecord>) -> Result<Self> {
        let mut by_id = BTreeMap::new();
        for (pos, record) in records.iter().enumerate() {
            if record.id.as_str().trim().is_empty() {
                bail!("encountered tool record with no id");
            }
            if by_id.insert(record.id.clone(), pos).is_some() {
                bail!("duplicate tool id {}", record.id);
            }
        }
        Ok(Self {
            records,
            by_id,
            skipped: Vec::new(),
            facets: OnceLock::new(),
            dimension_names: OnceLock::new(),
        })
    }

    /// All records in load order.
    pub fn all(&self) -> &[ToolRecord] {
        &self.records
    }

    /// Resolve a record by id.
    ///
    /// Returns `None` rather than erroring; callers render their own
    /// "not found" state.
    pub fn get(&self, id: &str) -> Option<&ToolRecord> {
        self.by_id
            .get(&ToolId(id.to_string()))
            .map(|&pos| &self.records[pos])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Documents that were present on disk but left out of the store.
    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn report(&self) -> LoadReport {
        LoadReport {
            loaded: self.records.len(),
            skipped: self.skipped.len(),
        }
    }

    /// Facet vocabulary, derived on first use.
    pub fn facets(&self) -> &FacetOptions {
        self.facets
            .get_or_init(|| derive_facet_options(&self.records))
    }

    /// Sorted quality-dimension names, derived on first use.
    pub fn dimension_names(&self) -> &[String] {
        self.dimension_names
            .get_or_init(|| derive_dimension_names(&self.records))
    }
}

/// Convenience wrapper around [`ToolStore::load`].
pub fn load_all(dir: &Path) -> Result<ToolStore> {
    ToolStore::load(dir)
}

fn collect_record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Unable to read tool directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("listing {}", dir.display()))?
            .path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
