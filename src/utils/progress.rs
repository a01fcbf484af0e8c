//! Progress reporting for extraction runs
//!
//! Wraps an `indicatif` bar that counts written regions. Workers advance
//! it concurrently; the bar is shared by reference.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Bar layout: spinner, elapsed time, bar, counts, ETA and last message
const TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} regions ({eta}) {msg}";

/// Progress bar counting written regions
pub struct ProgressTracker {
    bar: ProgressBar,
}

impl ProgressTracker {
    /// Create a tracker for a run
    ///
    /// # Arguments
    /// * `total` - Number of regions that will be dispatched
    /// * `visible` - Draw to stderr; a hidden tracker still counts
    pub fn new(total: u64, visible: bool) -> Self {
        let target = if visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(total), target);
        if let Ok(style) = ProgressStyle::with_template(TEMPLATE) {
            bar.set_style(style.progress_chars("#>-"));
        }
        ProgressTracker { bar }
    }

    /// Count one written region and show its label
    pub fn region_done(&self, label: &str) {
        self.bar.set_message(label.to_string());
        self.bar.inc(1);
    }

    /// Number of regions counted so far
    pub fn done(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar after a successful run
    pub fn finish(&self) {
        self.bar.finish_with_message(format!("{} written", self.done()));
    }

    /// Leave the bar in place after a failed run
    pub fn abandon(&self, failed: usize) {
        self.bar.abandon_with_message(format!("{} failed", failed));
    }
}
