//! Host document model.
//!
//! This module provides the object model the dedup engine reads from:
//! - Path geometry (control points, simple outlines)
//! - Page items with explicit kind discriminants and eligibility flags
//! - Documents (ordered top-level layers plus a selection)
//! - Workspaces (open documents plus the active one), persisted as JSON
//!
//! The engine never depends on the concrete [`Document`] for mutation; it
//! goes through the [`DocumentHost`] trait so hosts can refuse removals.

pub mod geometry;
pub mod host;
pub mod item;
pub mod tree;
pub mod workspace;

use std::path::PathBuf;

use thiserror::Error;

pub use geometry::{ControlPoint, Point2D, PointKind, SimpleShape};
pub use host::{DocumentHost, RemoveError};
pub use item::{EligibilityFlags, ItemId, ItemKind, PageItem, ShapeKind};
pub use tree::Document;
pub use workspace::Workspace;

/// Errors for loading, saving and validating documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A top-level entry of a document is not a layer.
    #[error("top-level item {index} is not a layer")]
    NotALayer { index: usize },

    /// Two items in one document share an id.
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),

    /// Workspace JSON could not be parsed.
    #[error("invalid workspace JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Workspace could not be serialized.
    #[error("failed to serialize workspace: {0}")]
    Serialize(#[source] serde_json::Error),

    /// File I/O failed.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
