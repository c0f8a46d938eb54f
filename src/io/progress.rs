//! Progress display for board generation
//!
//! One bar tracks resolved cells out of the board total. Restarts rewind
//! the bar and surface the attempt count as the bar message; that is the
//! only place routine contradictions are visible.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BOARD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress display for one board generation run
pub struct GenerationProgress {
    bar: ProgressBar,
}

impl GenerationProgress {
    /// Create a visible progress bar sized to the board
    pub fn new(total_cells: u64) -> Self {
        let bar = ProgressBar::new(total_cells);
        bar.set_style(BOARD_STYLE.clone());
        Self { bar }
    }

    /// Create a progress sink that displays nothing
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Report the number of cells resolved so far
    pub fn update(&self, resolved: u64) {
        self.bar.set_position(resolved);
    }

    /// Report that a contradiction discarded the board
    pub fn note_restart(&self, attempt: usize) {
        self.bar.set_position(0);
        self.bar.set_message(format!("attempt {attempt}"));
    }

    /// Close out the display after generation ends
    pub fn finish(&self) {
        self.bar.finish_with_message("generation complete");
    }
}

#[cfg(test)]
mod tests {
    use super::GenerationProgress;

    #[test]
    fn test_hidden_progress_accepts_updates() {
        let progress = GenerationProgress::hidden();
        progress.update(3);
        progress.note_restart(2);
        progress.finish();
    }
}
