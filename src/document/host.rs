//! The seam between the dedup engine and the document owner.

use thiserror::Error;

use super::item::ItemId;
use super::tree::Document;

/// Error returned when the host cannot remove an item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoveError {
    /// Item no longer exists (already removed or never existed).
    #[error("item not found: {0}")]
    NotFound(ItemId),

    /// Item is locked and the host refuses to touch it.
    #[error("item is locked: {0}")]
    Locked(ItemId),

    /// Top-level layers are structural and never removed by the engine.
    #[error("item is a top-level layer: {0}")]
    TopLevelLayer(ItemId),

    /// Host-specific refusal.
    #[error("host refused to remove {id}: {reason}")]
    Refused { id: ItemId, reason: String },
}

impl RemoveError {
    /// The item the failed removal was aimed at.
    #[must_use]
    pub fn id(&self) -> ItemId {
        match self {
            Self::NotFound(id)
            | Self::Locked(id)
            | Self::TopLevelLayer(id)
            | Self::Refused { id, .. } => *id,
        }
    }
}

/// Read access to the document tree plus fallible removal.
///
/// The engine reads everything it needs through [`DocumentHost::document`],
/// snapshots the ids it wants gone, and only then calls
/// [`DocumentHost::remove`] once per id.
pub trait DocumentHost {
    /// The live document.
    fn document(&self) -> &Document;

    /// Remove one item from the document.
    ///
    /// # Errors
    ///
    /// Returns a [`RemoveError`] if the host cannot remove the item. A
    /// failure for one item must not affect removal of any other.
    fn remove(&mut self, id: ItemId) -> Result<(), RemoveError>;
}

impl DocumentHost for Document {
    fn document(&self) -> &Document {
        self
    }

    fn remove(&mut self, id: ItemId) -> Result<(), RemoveError> {
        self.remove_item(id).map(|_| ())
    }
}
