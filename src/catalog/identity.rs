use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Namespace tag carried by `applicationCategory` references (`rs:AnalysisCode`).
pub const CATEGORY_NAMESPACE: &str = "rs:";
/// Namespace tag carried by `hasQualityDimension` references (`dim:compatibility`).
pub const DIMENSION_NAMESPACE: &str = "dim:";

/// Stable identifier for a tool, taken from its source filename.
///
/// The id is what `show <ID>` and shareable links resolve against, so it never
/// depends on record contents.
#[derive(Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolId(pub String);

impl ToolId {
    /// Derive the id from a record path: the file name with its extension removed.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.trim().is_empty())
            .map(|stem| ToolId(stem.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// JSON-LD node reference such as `{"@id": "dim:compatibility"}`.
///
/// Anything that is not an object with a string `@id` deserializes to a
/// reference without an id, which contributes nothing to facets or filters.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawReference")]
pub struct Reference {
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReference {
    Node {
        #[serde(rename = "@id", default)]
        id: Option<Value>,
    },
    Other(Value),
}

impl From<RawReference> for Reference {
    fn from(raw: RawReference) -> Self {
        let id = match raw {
            RawReference::Node {
                id: Some(Value::String(id)),
            } => Some(id),
            _ => None,
        };
        Reference { id }
    }
}

impl Reference {
    pub fn new(id: impl Into<String>) -> Self {
        Reference {
            id: Some(id.into()),
        }
    }

    /// Full identifier including its namespace tag.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Identifier with `namespace` stripped.
    pub fn bare_name(&self, namespace: &str) -> Option<&str> {
        self.id().map(|id| strip_namespace(id, namespace))
    }
}

/// Strip every leading occurrence of `namespace` from `identifier`.
///
/// Identifiers without the tag are returned unchanged.
pub fn strip_namespace<'a>(identifier: &'a str, namespace: &str) -> &'a str {
    if namespace.is_empty() {
        return identifier;
    }
    let mut rest = identifier;
    while let Some(stripped) = rest.strip_prefix(namespace) {
        rest = stripped;
    }
    rest
}
