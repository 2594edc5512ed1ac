//! Error taxonomy for canvas operations.
//!
//! None of these are fatal. The interaction engine swallows `NotFound` and
//! `UnresolvedAsset` after logging them, since both only arise when a gesture
//! outlives the record it addressed or a load has not landed yet.

use crate::registry::ObjectId;

#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("placed image not found: {0}")]
    NotFound(ObjectId),
    #[error("asset for placed image {0} has not loaded")]
    UnresolvedAsset(ObjectId),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
