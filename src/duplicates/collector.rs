//! Tree traversal that gathers eligible shapes.
//!
//! # Rules
//!
//! For each child, in stored order:
//! 1. Any eligibility flag set: skip it and everything below it.
//! 2. Kind matches and the item has geometry: collect it.
//! 3. Otherwise, if it is a layer, group or compound path: descend.
//! 4. Anything else is ignored.
//!
//! A compound path is a container when simple paths are requested, so its
//! sub-paths are simple-shape candidates too.

use std::collections::HashSet;

use crate::document::{Document, ItemId, ItemKind, PageItem, ShapeKind};

/// Collect eligible shapes of `kind` from `children`, depth-first, into `out`.
pub fn collect<'a>(children: &'a [PageItem], kind: ShapeKind, out: &mut Vec<&'a PageItem>) {
    for child in children {
        if !child.is_eligible() {
            log::trace!("Skipping ineligible {} and its contents", child.id);
            continue;
        }

        if child.shape_kind() == Some(kind) {
            if child.has_geometry() {
                out.push(child);
            } else {
                log::trace!("Skipping {} {} without geometry", kind, child.id);
            }
        } else if child.is_container() {
            collect(child.children(), kind, out);
        }
    }
}

/// Collect eligible shapes of `kind` from every top-level layer.
///
/// Layers flagged locked, hidden, guide or clipping are skipped entirely.
#[must_use]
pub fn collect_document(document: &Document, kind: ShapeKind) -> Vec<&PageItem> {
    let mut out = Vec::new();
    for layer in &document.layers {
        if !layer.is_eligible() {
            log::debug!("Skipping ineligible layer {}", layer.id);
            continue;
        }
        collect(layer.children(), kind, &mut out);
    }
    log::debug!(
        "Collected {} {}(s) from {} layer(s)",
        out.len(),
        kind,
        document.layers.len()
    );
    out
}

/// Collect simple-shape candidates from the current selection.
///
/// A directly selected path is taken as-is, without an eligibility check.
/// A selected container is checked for eligibility and then expanded with
/// [`collect`]. Items reached more than once are kept at their first
/// position only.
#[must_use]
pub fn collect_selection(document: &Document) -> Vec<&PageItem> {
    let mut gathered = Vec::new();
    for item in document.selected_items() {
        match &item.kind {
            ItemKind::Path(_) => gathered.push(item),
            ItemKind::Layer { .. } | ItemKind::Group { .. } | ItemKind::Compound { .. } => {
                if item.is_eligible() {
                    collect(item.children(), ShapeKind::Simple, &mut gathered);
                } else {
                    log::debug!("Skipping ineligible selected container {}", item.id);
                }
            }
            ItemKind::Other => {}
        }
    }

    let mut seen: HashSet<ItemId> = HashSet::with_capacity(gathered.len());
    gathered.retain(|item| seen.insert(item.id));

    log::debug!(
        "Collected {} path item(s) from {} selected item(s)",
        gathered.len(),
        document.selection.len()
    );
    gathered
}
