//! Progress bar display for archive extraction

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display while unpacking one archive
pub struct ExtractProgress {
    pb: ProgressBar,
}

impl ExtractProgress {
    /// Create a progress display for `total_entries` archive entries
    pub fn new(total_entries: u64, archive_name: &str) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let pb = ProgressBar::new(total_entries);
        pb.set_style(style);
        pb.set_message(archive_name.to_string());

        Self { pb }
    }

    /// Advance by one entry
    pub fn inc(&self) {
        self.pb.inc(1);
    }

    /// Remove the bar once extraction completes
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
