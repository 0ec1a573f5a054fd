//! Tool catalog wiring.
//!
//! This module wraps the directory of bundled tool documents so callers can
//! load one immutable snapshot and look records up by id. `model` mirrors the
//! document shape, `identity` holds ids and namespaced references, and `store`
//! owns the loaded records.

pub mod identity;
pub mod model;
pub mod store;

pub use identity::{
    CATEGORY_NAMESPACE, DIMENSION_NAMESPACE, Reference, ToolId, strip_namespace,
};
pub use model::{OneOrMany, ToolRecord};
pub use store::{LoadReport, SkippedRecord, ToolStore, load_all};
