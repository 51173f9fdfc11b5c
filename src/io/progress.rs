//! Solve progress display
//!
//! Wraps a single `indicatif` bar tracking how many cells the solver has
//! fixed so far. Quiet mode swallows every update so callers never branch.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static SOLVE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} cells")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress display for one solve run
pub struct SolveProgress {
    bar: Option<ProgressBar>,
}

impl SolveProgress {
    /// Create a display over the total cell count; `quiet` disables it
    pub fn new(total_cells: usize, quiet: bool) -> Self {
        let bar = (!quiet).then(|| {
            let bar = ProgressBar::new(total_cells as u64);
            bar.set_style(SOLVE_STYLE.clone());
            bar
        });
        Self { bar }
    }

    /// Label the current attempt
    pub fn start_attempt(&self, attempt: usize) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("attempt {}", attempt + 1));
            bar.set_position(0);
        }
    }

    /// Report how many cells are fixed so far
    pub fn update(&self, fixed_cells: usize) {
        if let Some(bar) = &self.bar {
            bar.set_position(fixed_cells as u64);
        }
    }

    /// Close the display with a final message
    pub fn finish(&self, message: String) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message);
        }
    }
}
