//! Document actions.
//!
//! This module provides functionality for:
//! - Removing planned duplicates through a [`DocumentHost`](crate::document::DocumentHost)
//! - Containing per-item failures so one refusal never stops a batch
//!
//! ```
//! use pathdedup::actions::{remove_batch, BatchRemoveResult};
//! use pathdedup::document::Document;
//!
//! let mut doc = Document::new("empty");
//! let result: BatchRemoveResult = remove_batch(&mut doc, &[], None);
//! assert!(result.all_succeeded());
//! ```

pub mod remove;

pub use remove::{remove_batch, BatchRemoveResult, RemovalFailure};
