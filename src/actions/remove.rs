//! Batch removal of duplicate items through the document host.
//!
//! # Overview
//!
//! Every id in a removal plan is attempted exactly once, in order. A failure
//! for one item is logged and recorded, and the batch moves on to the next
//! id. Only successful removals count.
//!
//! # Example
//!
//! ```
//! use pathdedup::actions::remove_batch;
//! use pathdedup::document::{Document, PageItem, SimpleShape};
//!
//! let mut doc = Document::new("doc").with_layer(PageItem::layer(vec![
//!     PageItem::path(SimpleShape::rect(0.0, 0.0, 1.0, 1.0)).with_name("a"),
//!     PageItem::path(SimpleShape::rect(0.0, 0.0, 1.0, 1.0)).with_name("b"),
//! ]));
//! let b = doc.find_by_name("b").unwrap().id;
//!
//! let result = remove_batch(&mut doc, &[b], None);
//! assert_eq!(result.success_count(), 1);
//! assert!(!doc.contains_name("b"));
//! ```

use crate::document::{DocumentHost, ItemId, RemoveError};
use crate::progress::ProgressCallback;

/// A removal the host refused or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalFailure {
    pub id: ItemId,
    pub error: RemoveError,
}

impl RemovalFailure {
    #[must_use]
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// Results of a batch removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRemoveResult {
    /// Successfully removed items, in attempt order.
    pub removed: Vec<ItemId>,
    /// Failed removals with their errors.
    pub failures: Vec<RemovalFailure>,
}

impl BatchRemoveResult {
    /// Number of successful removals.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.removed.len()
    }

    /// Number of failed removals.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of attempted removals.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.removed.len() + self.failures.len()
    }

    /// Check if all removals succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary for diagnostics.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!("Removed {} item(s)", self.success_count())
        } else {
            format!(
                "Removed {} item(s), {} failed",
                self.success_count(),
                self.failure_count()
            )
        }
    }
}

/// Attempt to remove every id in `plan`, continuing past failures.
///
/// `plan` must already be final: it is read once, front to back, and the
/// document is not consulted to extend or reorder it.
pub fn remove_batch<H: DocumentHost + ?Sized>(
    host: &mut H,
    plan: &[ItemId],
    callback: Option<&dyn ProgressCallback>,
) -> BatchRemoveResult {
    let mut result = BatchRemoveResult::default();

    for (index, &id) in plan.iter().enumerate() {
        match host.remove(id) {
            Ok(()) => {
                log::debug!("Removed duplicate {}", id);
                result.removed.push(id);
            }
            Err(error) => {
                log::warn!("Failed to remove {}: {}", id, error);
                result.failures.push(RemovalFailure { id, error });
            }
        }

        if let Some(cb) = callback {
            cb.on_progress(index + 1, &id.to_string());
        }
    }

    if !plan.is_empty() {
        log::debug!("{}", result.summary());
    }

    result
}
