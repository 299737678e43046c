//! Two-phase duplicate removal.
//!
//! # Overview
//!
//! 1. **Phase 1 - Compound paths**: collect every eligible compound path in
//!    the document, group by compound fingerprint, keep the first of each
//!    group and remove the rest.
//! 2. **Phase 2 - Path items**: collect simple paths from the selection (or
//!    the whole document), group by fingerprint, keep first, remove the rest.
//!
//! Phase 1 always runs to completion before phase 2 collects anything, so
//! sub-paths of compound paths removed in phase 1 are never phase 2
//! candidates. Within a phase the full removal plan is built before the
//! first removal.
//!
//! # Example
//!
//! ```
//! use pathdedup::document::{Document, PageItem, SimpleShape};
//! use pathdedup::duplicates::{DedupEngine, EngineConfig};
//!
//! let mut doc = Document::new("doc").with_layer(PageItem::layer(vec![
//!     PageItem::path(SimpleShape::rect(0.0, 0.0, 5.0, 5.0)),
//!     PageItem::path(SimpleShape::rect(0.0, 0.0, 5.0, 5.0)),
//! ]));
//!
//! let engine = DedupEngine::new(EngineConfig::default());
//! let outcome = engine.run(&mut doc).unwrap();
//! assert_eq!(outcome.removed_simple(), 1);
//! assert_eq!(outcome.removed_compound(), 0);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::collector::{collect_document, collect_selection};
use super::groups::{fingerprint_candidates, group_by_fingerprint, removal_plan, GroupingStats};
use crate::actions::{remove_batch, RemovalFailure};
use crate::document::{DocumentHost, PageItem, ShapeKind};
use crate::fingerprint::Precision;
use crate::progress::{ProgressCallback, PHASE_COMPOUND, PHASE_SIMPLE};

/// Which simple paths phase 2 considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every eligible path in every layer.
    #[default]
    WholeDocument,
    /// The selected items; falls back to the whole document when nothing is
    /// selected at the start of the run.
    Selection,
}

/// Default candidate count at which fingerprinting goes parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Configuration for the dedup engine.
#[derive(Clone)]
pub struct EngineConfig {
    /// Decimal digits kept when fingerprinting.
    pub precision: Precision,
    /// Phase 2 candidate scope.
    pub scope: Scope,
    /// Candidate count at which fingerprinting uses rayon.
    pub parallel_threshold: usize,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("precision", &self.precision)
            .field("scope", &self.scope)
            .field("parallel_threshold", &self.parallel_threshold)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            scope: Scope::WholeDocument,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            progress_callback: None,
        }
    }
}

impl EngineConfig {
    /// Set the fingerprint precision.
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Set the phase 2 scope.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Set the parallel fingerprinting threshold.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Result of one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub kind: ShapeKind,
    /// Eligible shapes collected for this phase.
    pub candidates: usize,
    pub stats: GroupingStats,
    /// Successful removals.
    pub removed: usize,
    pub failures: Vec<RemovalFailure>,
}

impl PhaseReport {
    fn empty(kind: ShapeKind) -> Self {
        Self {
            kind,
            candidates: 0,
            stats: GroupingStats::default(),
            removed: 0,
            failures: Vec::new(),
        }
    }
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOutcome {
    pub compound: PhaseReport,
    pub simple: PhaseReport,
}

impl DedupOutcome {
    #[must_use]
    pub fn removed_simple(&self) -> usize {
        self.simple.removed
    }

    #[must_use]
    pub fn removed_compound(&self) -> usize {
        self.compound.removed
    }

    /// All failed removals, compound phase first.
    pub fn failures(&self) -> impl Iterator<Item = &RemovalFailure> {
        self.compound.failures.iter().chain(self.simple.failures.iter())
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Conditions that end a run without a summary.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupError {
    /// The host has no active document.
    #[error("No documents open.")]
    NoDocumentOpen,

    /// Neither phase found a single eligible shape.
    #[error("No eligible path items or compound paths found.")]
    NothingEligible,
}

/// Dedup engine that runs both phases against a document host.
#[derive(Debug, Clone, Default)]
pub struct DedupEngine {
    config: EngineConfig,
}

impl DedupEngine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run against the host's active document, if there is one.
    ///
    /// # Errors
    ///
    /// `NoDocumentOpen` when `host` is `None`, otherwise see [`DedupEngine::run`].
    pub fn run_on_active<H: DocumentHost + ?Sized>(
        &self,
        host: Option<&mut H>,
    ) -> Result<DedupOutcome, DedupError> {
        match host {
            Some(host) => self.run(host),
            None => {
                log::warn!("No active document");
                Err(DedupError::NoDocumentOpen)
            }
        }
    }

    /// Run both phases.
    ///
    /// # Errors
    ///
    /// `NothingEligible` if neither phase collected any shape. No removal is
    /// attempted in that case.
    pub fn run<H: DocumentHost + ?Sized>(&self, host: &mut H) -> Result<DedupOutcome, DedupError> {
        let precision = self.config.precision;
        log::info!(
            "Deduplicating '{}' at precision {} ({:?})",
            host.document().name,
            precision,
            self.config.scope
        );

        // Decided before phase 1, which drops removed items from the selection.
        let from_selection =
            self.config.scope == Scope::Selection && !host.document().selection.is_empty();

        // Phase 1: compound paths, always the whole document.
        let compound = {
            let candidates = collect_document(host.document(), ShapeKind::Compound);
            self.plan_phase(&candidates, ShapeKind::Compound)
        };
        let compound = self.execute_phase(host, compound, PHASE_COMPOUND);

        // Phase 2: simple paths from what survives of the selection, or the
        // whole document.
        let simple = {
            let document = host.document();
            let candidates = if from_selection {
                collect_selection(document)
            } else {
                collect_document(document, ShapeKind::Simple)
            };
            self.plan_phase(&candidates, ShapeKind::Simple)
        };

        if compound.candidates == 0 && simple.report.candidates == 0 {
            log::info!("Nothing eligible in '{}'", host.document().name);
            return Err(DedupError::NothingEligible);
        }

        let simple = self.execute_phase(host, simple, PHASE_SIMPLE);

        log::info!(
            "Removed {} duplicate path item(s) and {} duplicate compound path(s)",
            simple.removed,
            compound.removed
        );

        Ok(DedupOutcome { compound, simple })
    }

    fn plan_phase(&self, candidates: &[&PageItem], kind: ShapeKind) -> PlannedPhase {
        let mut report = PhaseReport::empty(kind);
        report.candidates = candidates.len();

        let keyed = fingerprint_candidates(
            candidates,
            kind,
            self.config.precision,
            self.config.parallel_threshold,
        );
        let (groups, stats) = group_by_fingerprint(keyed);
        let plan = removal_plan(&groups);

        log::info!(
            "{} phase: {} candidate(s), {} duplicate group(s), {} to remove",
            kind,
            report.candidates,
            stats.duplicate_groups,
            plan.len()
        );

        report.stats = stats;
        PlannedPhase { report, plan }
    }

    fn execute_phase<H: DocumentHost + ?Sized>(
        &self,
        host: &mut H,
        planned: PlannedPhase,
        phase: &str,
    ) -> PhaseReport {
        let PlannedPhase { mut report, plan } = planned;
        let callback = self.config.progress_callback.as_deref();

        if let Some(cb) = callback {
            cb.on_phase_start(phase, plan.len());
        }

        let result = remove_batch(host, &plan, callback);

        if let Some(cb) = callback {
            cb.on_phase_end(phase);
        }

        report.removed = result.success_count();
        report.failures = result.failures;
        report
    }
}

/// Phase report plus the ids still to remove.
struct PlannedPhase {
    report: PhaseReport,
    plan: Vec<crate::document::ItemId>,
}

/// Run the engine once with the given scope and precision.
///
/// # Errors
///
/// See [`DedupEngine::run`].
pub fn dedup<H: DocumentHost + ?Sized>(
    host: &mut H,
    scope: Scope,
    precision: Precision,
) -> Result<DedupOutcome, DedupError> {
    DedupEngine::new(
        EngineConfig::default()
            .with_scope(scope)
            .with_precision(precision),
    )
    .run(host)
}
