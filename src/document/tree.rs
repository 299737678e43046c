//! The in-memory document: ordered top-level layers plus a selection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::host::RemoveError;
use super::item::{ItemId, ItemKind, PageItem};
use super::DocumentError;

/// A vector document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    /// Top-level entries. Each must be an [`ItemKind::Layer`].
    #[serde(default)]
    pub layers: Vec<PageItem>,
    /// Currently selected items, in selection order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<ItemId>,
}

impl Document {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a top-level layer, assigning ids to any unassigned items.
    #[must_use]
    pub fn with_layer(mut self, layer: PageItem) -> Self {
        self.layers.push(layer);
        self.assign_ids();
        self
    }

    /// Give every unassigned item a fresh id above the current maximum.
    pub fn assign_ids(&mut self) {
        let mut max = 0u64;
        for layer in &self.layers {
            layer.walk(&mut |item| max = max.max(item.id.0));
        }
        let mut next = max;
        for layer in &mut self.layers {
            layer.walk_mut(&mut |item| {
                if !item.id.is_assigned() {
                    next += 1;
                    item.id = ItemId(next);
                }
            });
        }
        if next > max {
            log::trace!("Assigned {} item id(s) in '{}'", next - max, self.name);
        }
    }

    /// Check structural rules: top-level entries are layers, ids are unique.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::NotALayer`] or [`DocumentError::DuplicateId`].
    pub fn validate(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for (index, layer) in self.layers.iter().enumerate() {
            if !matches!(layer.kind, ItemKind::Layer { .. }) {
                return Err(DocumentError::NotALayer { index });
            }
            let mut duplicate = None;
            layer.walk(&mut |item| {
                if item.id.is_assigned() && !seen.insert(item.id) && duplicate.is_none() {
                    duplicate = Some(item.id);
                }
            });
            if let Some(id) = duplicate {
                return Err(DocumentError::DuplicateId(id));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn find(&self, id: ItemId) -> Option<&PageItem> {
        self.layers.iter().find_map(|layer| layer.find(id))
    }

    /// First item with the given name, depth-first in document order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&PageItem> {
        let mut found = None;
        for layer in &self.layers {
            layer.walk(&mut |item| {
                if found.is_none() && item.name.as_deref() == Some(name) {
                    found = Some(item);
                }
            });
        }
        found
    }

    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Add an item to the selection by name. Returns false if no such item.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match self.find_by_name(name).map(|item| item.id) {
            Some(id) => {
                self.selection.push(id);
                true
            }
            None => false,
        }
    }

    /// Selected items that still exist, in selection order.
    pub fn selected_items(&self) -> impl Iterator<Item = &PageItem> {
        self.selection.iter().filter_map(move |&id| {
            let item = self.find(id);
            if item.is_none() {
                log::debug!("Selection refers to missing item {}", id);
            }
            item
        })
    }

    /// Total number of page items, layers included.
    #[must_use]
    pub fn item_count(&self) -> usize {
        let mut count = 0;
        for layer in &self.layers {
            layer.walk(&mut |_| count += 1);
        }
        count
    }

    /// Remove a non-layer item from wherever it sits in the tree.
    ///
    /// # Errors
    ///
    /// - `TopLevelLayer` if `id` names a top-level layer
    /// - `Locked` if the item is locked
    /// - `NotFound` if no item has this id
    pub fn remove_item(&mut self, id: ItemId) -> Result<PageItem, RemoveError> {
        if self.layers.iter().any(|layer| layer.id == id) {
            return Err(RemoveError::TopLevelLayer(id));
        }
        match self.find(id) {
            None => return Err(RemoveError::NotFound(id)),
            Some(item) if item.flags.locked => return Err(RemoveError::Locked(id)),
            Some(_) => {}
        }

        let removed = self
            .layers
            .iter_mut()
            .find_map(|layer| layer.remove_descendant(id))
            .ok_or(RemoveError::NotFound(id))?;

        // Drop the removed item and its descendants from the selection.
        let mut gone = HashSet::new();
        removed.walk(&mut |item| {
            gone.insert(item.id);
        });
        self.selection.retain(|sel| !gone.contains(sel));

        log::trace!("Removed {} from '{}'", id, self.name);
        Ok(removed)
    }
}
