//! Asset load tracking.
//!
//! The engine never loads image bytes itself. When a drop references an asset
//! it has not seen, it asks the host to load it (`Action::LoadAsset`) and marks
//! it pending here. The host reports the natural size back once the image has
//! decoded; a failed load just clears the pending mark so the next drop of the
//! same asset asks again.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::collections::HashMap;

use crate::registry::{AssetRef, Size};

/// Load status of one asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssetStatus {
    /// Requested from the host, not answered yet.
    Pending,
    /// Decoded, with its natural pixel size.
    Ready(Size),
}

#[derive(Debug, Default)]
pub struct AssetCache {
    entries: HashMap<AssetRef, AssetStatus>,
}

impl AssetCache {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Note interest in an asset. Returns `true` when the host must be asked
    /// to load it, i.e. it is neither pending nor ready.
    pub fn request(&mut self, asset: &AssetRef) -> bool {
        if self.entries.contains_key(asset) {
            return false;
        }
        self.entries.insert(asset.clone(), AssetStatus::Pending);
        true
    }

    /// Record a completed load.
    pub fn mark_ready(&mut self, asset: &AssetRef, natural: Size) {
        self.entries.insert(asset.clone(), AssetStatus::Ready(natural));
    }

    /// Forget a pending request. A ready asset is left as is.
    pub fn mark_failed(&mut self, asset: &AssetRef) {
        if self.status(asset) == Some(AssetStatus::Pending) {
            self.entries.remove(asset);
        }
    }

    #[must_use]
    pub fn status(&self, asset: &AssetRef) -> Option<AssetStatus> {
        self.entries.get(asset).copied()
    }

    /// Natural size of a loaded asset.
    #[must_use]
    pub fn natural_size(&self, asset: &AssetRef) -> Option<Size> {
        match self.entries.get(asset) {
            Some(AssetStatus::Ready(size)) => Some(*size),
            _ => None,
        }
    }
}
