use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use toolradar::ToolStore;

/// Write one tool document as `<stem>.json` under `dir`.
pub fn write_tool(dir: &Path, stem: &str, value: &Value) -> Result<()> {
    let path = dir.join(format!("{stem}.json"));
    let text = serde_json::to_string_pretty(value)?;
    fs::write(&path, text).with_context(|| format!("writing {}", path.display()))
}

/// Temporary catalog directory seeded with `tools`.
pub fn catalog_dir(tools: &[(&str, Value)]) -> TempDir {
    let temp = TempDir::new().expect("temp dir");
    for (stem, value) in tools {
        write_tool(temp.path(), stem, value).expect("write tool fixture");
    }
    temp
}

pub fn load_store(dir: &Path) -> ToolStore {
    ToolStore::load(dir).expect("tool store should load")
}

/// A small catalog shaped like the bundled research-software records.
pub fn sample_tools() -> Vec<(&'static str, Value)> {
    vec![
        (
            "alpha",
            json!({
                "@context": "https://w3id.org/everse/rs#",
                "@id": "https://w3id.org/everse/tools/alpha",
                "@type": "SoftwareApplication",
                "name": "Alpha",
                "description": "testing tool",
                "url": "https://alpha.example",
                "license": "https://x/MIT",
                "isAccessibleForFree": true,
                "applicationCategory": {"@id": "rs:AnalysisCode"},
                "howToUse": "library",
                "hasQualityDimension": {"@id": "dim:compatibility"}
            }),
        ),
        (
            "bravo",
            json!({
                "name": "Bravo",
                "description": "Checks FAIR compliance of repositories",
                "license": "https://spdx.org/licenses/Apache-2.0",
                "isAccessibleForFree": true,
                "applicationCategory": [{"@id": "rs:PrototypeTool"}, {"@id": "rs:ResearchInfrastructureSoftware"}],
                "howToUse": ["command-line", "web"],
                "hasQualityDimension": [{"@id": "dim:compatibility"}, {"@id": "dim:fairness"}]
            }),
        ),
        (
            "charlie",
            json!({
                "name": "Charlie",
                "license": "https://x/MIT",
                "isAccessibleForFree": false,
                "applicationCategory": {"@id": "rs:PrototypeTool"},
                "howToUse": "web",
                "hasQualityDimension": {"@id": "dim:maintainability"}
            }),
        ),
        (
            "delta",
            json!({
                "name": "Delta",
                "description": "Continuous integration helper",
                "howToUse": ["command-line"],
                "hasQualityDimension": [{"@id": "dim:maintainability"}, {"@id": "dim:fairness"}]
            }),
        ),
    ]
}
