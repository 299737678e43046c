//! Progress reporting utilities using indicatif.
//!
//! The engine reports each removal phase through [`ProgressCallback`]; the
//! [`Progress`] struct renders those callbacks as terminal progress bars for
//! the CLI.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Phase name for compound path removal.
pub const PHASE_COMPOUND: &str = "compound";
/// Phase name for simple path removal.
pub const PHASE_SIMPLE: &str = "simple";

/// Progress callback for dedup phases.
///
/// Implement this trait to receive progress updates while the engine
/// removes duplicate items.
pub trait ProgressCallback: Send + Sync {
    /// Called when a removal phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase ([`PHASE_COMPOUND`] or [`PHASE_SIMPLE`])
    /// * `total` - Number of removals that will be attempted
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called after each removal attempt.
    ///
    /// # Arguments
    ///
    /// * `current` - Attempt number (1-based)
    /// * `item` - Display label of the item
    fn on_progress(&self, current: usize, item: &str);

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// Progress reporter using indicatif.
#[derive(Default)]
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
}

impl Progress {
    /// Create a new progress reporter drawing to stderr.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathdedup::progress::Progress;
    ///
    /// let progress = Progress::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█>-")
    }

    fn phase_label(phase: &str) -> &str {
        match phase {
            PHASE_COMPOUND => "Removing duplicate compound paths",
            PHASE_SIMPLE => "Removing duplicate path items",
            other => other,
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if total == 0 {
            return;
        }

        let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        pb.set_style(Self::style());
        pb.set_message(Self::phase_label(phase).to_string());
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_progress(&self, current: usize, item: &str) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(ref pb) = *slot {
                pb.set_position(current as u64);
                log::trace!("Progress {}: {}", current, item);
            }
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
                log::debug!("Phase '{}' finished", phase);
            }
        }
    }
}
