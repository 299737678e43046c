//! Duplicate detection and removal.
//!
//! This module provides functionality for:
//! - Collecting eligible shapes from the document tree
//! - Fingerprint grouping in first-seen order
//! - Two-phase removal (compound paths, then path items)

pub mod collector;
pub mod engine;
pub mod groups;

pub use collector::{collect, collect_document, collect_selection};
pub use engine::{
    dedup, DedupEngine, DedupError, DedupOutcome, EngineConfig, PhaseReport, Scope,
    DEFAULT_PARALLEL_THRESHOLD,
};
pub use groups::{
    fingerprint_candidates, group_by_fingerprint, removal_plan, GroupingStats, ShapeGroup,
};
