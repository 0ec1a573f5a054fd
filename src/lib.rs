//! Shared library for the toolradar catalog browser.
//!
//! The crate loads a directory of bundled JSON tool records once, derives the
//! facet vocabulary from them, and evaluates search/filter criteria against the
//! loaded snapshot. Everything after the initial load is a pure, synchronous
//! computation over the in-memory store; the `toolradar` binary is a thin
//! front end that re-runs those computations for each command.

use anyhow::{Context, Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod dimensions;
pub mod facets;
pub mod filter;
pub mod related;
pub mod render;

pub use catalog::{
    CATEGORY_NAMESPACE, DIMENSION_NAMESPACE, LoadReport, OneOrMany, Reference, SkippedRecord,
    ToolId, ToolRecord, ToolStore, load_all, strip_namespace,
};
pub use dimensions::{DIMENSION_PREVIEW_LIMIT, DimensionEntry, DimensionIndex};
pub use facets::{
    FREE_OPTIONS, FacetOptions, SOFTWARE_TIERS, category_label, derive_dimension_names,
    derive_facet_options, dimension_label, license_label,
};
pub use filter::{FacetKey, FilterCriteria, FreeAccess, compute_visible, is_included};
pub use related::{RELATED_LIMIT, find_related};

/// Directory name the bundled tool records live under.
pub const DATA_DIR_NAME: &str = "software-tools";
const NESTED_DATA_DIR: &str = "data/software-tools";

/// Resolve the directory holding the tool records.
///
/// An explicit path wins and must exist. Otherwise the search climbs from the
/// current directory looking for `software-tools/` or `data/software-tools/`,
/// so the binary works from anywhere inside a checkout that bundles the data.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.is_dir() {
            bail!("tool directory {} does not exist", path.display());
        }
        return fs::canonicalize(path)
            .with_context(|| format!("Unable to canonicalize {}", path.display()));
    }

    let cwd = env::current_dir().context("Unable to read the current directory")?;
    if let Some(found) = search_upwards(&cwd) {
        return Ok(found);
    }

    bail!(
        "Unable to locate a {DATA_DIR_NAME}/ directory above {}. Pass --data-dir to point at the tool records.",
        cwd.display()
    )
}

/// Walk from `start` towards the filesystem root, returning the first data
/// directory found along the way.
pub fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        for candidate in [dir.join(DATA_DIR_NAME), dir.join(NESTED_DATA_DIR)] {
            if candidate.is_dir() {
                return Some(candidate);
            }
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn search_upwards_finds_nested_data_dir() {
        let temp = TempDir::new().expect("temp dir");
        let data = temp.path().join("data").join(DATA_DIR_NAME);
        let deep = temp.path().join("a").join("b");
        fs::create_dir_all(&data).unwrap();
        fs::create_dir_all(&deep).unwrap();

        let found = search_upwards(&deep).expect("data dir should be found");
        assert_eq!(found, fs::canonicalize(&data).unwrap());
    }

    #[test]
    fn search_upwards_prefers_closest_directory() {
        let temp = TempDir::new().expect("temp dir");
        let outer = temp.path().join(DATA_DIR_NAME);
        let project = temp.path().join("project");
        let inner = project.join(DATA_DIR_NAME);
        fs::create_dir_all(&outer).unwrap();
        fs::create_dir_all(&inner).unwrap();

        let found = search_upwards(&project).expect("data dir should be found");
        assert_eq!(found, fs::canonicalize(&inner).unwrap());
    }

    #[test]
    fn resolve_data_dir_rejects_missing_explicit_path() {
        let temp = TempDir::new().expect("temp dir");
        let missing = temp.path().join("nope");
        let err = resolve_data_dir(Some(missing.as_path())).expect_err("missing dir should fail");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn resolve_data_dir_accepts_explicit_path() {
        let temp = TempDir::new().expect("temp dir");
        let resolved = resolve_data_dir(Some(temp.path())).expect("explicit dir");
        assert_eq!(resolved, fs::canonicalize(temp.path()).unwrap());
    }
}
