//! Single-selection state.
//!
//! Holds a lookup key into the registry, never a copy of a record. Membership
//! is not checked here; `EngineCore` only selects ids it has just found in
//! the registry and clears the selection before removing the selected record.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::registry::ObjectId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ObjectId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, replacing any previous selection. Returns `true` if the
    /// selection changed.
    pub fn select(&mut self, id: ObjectId) -> bool {
        let changed = self.selected != Some(id);
        self.selected = Some(id);
        changed
    }

    /// Clear the selection. Returns `true` if something was selected.
    pub fn deselect(&mut self) -> bool {
        self.selected.take().is_some()
    }

    #[must_use]
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    #[must_use]
    pub fn is_selected(&self, id: &ObjectId) -> bool {
        self.selected.as_ref() == Some(id)
    }
}
