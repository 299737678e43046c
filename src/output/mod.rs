//! Output formatters for dedup runs.
//!
//! - Text: a single status line
//! - JSON: for automation and scripting
//!
//! The format is chosen with [`OutputFormat`](crate::cli::OutputFormat).
//!
//! # Example
//!
//! ```
//! use pathdedup::document::{Document, PageItem, SimpleShape};
//! use pathdedup::duplicates::DedupEngine;
//! use pathdedup::output::json::JsonReport;
//!
//! let mut doc = Document::new("d").with_layer(PageItem::layer(vec![
//!     PageItem::path(SimpleShape::rect(0.0, 0.0, 1.0, 1.0)),
//! ]));
//! let result = DedupEngine::default().run(&mut doc);
//! let report = JsonReport::new(Some("d"), &result);
//! println!("{}", report.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod report;

pub use json::{JsonOutputError, JsonReport};
pub use report::{format_summary, status_message, NOTHING_ELIGIBLE_MESSAGE, NO_DOCUMENT_MESSAGE};
