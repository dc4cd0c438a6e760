//! Progress indicators for network work using indicatif

use std::time::Duration;

use indicatif::{HumanBytes, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Spinner shown while a single page is fetched. Clear it before printing the result.
pub fn fetch_spinner(url: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} {elapsed:.dim}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(format!("Fetching {}", url));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// One bar over the distinct assets of a page.
///
/// The message tracks the last saved file and the running byte total; failures
/// are printed above the bar so they stay visible after it finishes.
pub struct AssetProgress {
    bar: ProgressBar,
    bytes: u64,
    failed: usize,
}

impl AssetProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg:.dim}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        bar.set_prefix("Assets");
        Self {
            bar,
            bytes: 0,
            failed: 0,
        }
    }

    /// Same bar, drawn nowhere
    pub fn hidden(total: usize) -> Self {
        let progress = Self::new(total);
        progress.bar.set_draw_target(ProgressDrawTarget::hidden());
        progress
    }

    pub fn saved(&mut self, file_name: &str, bytes: usize) {
        self.bytes += bytes as u64;
        self.bar.set_message(format!("{} ({} total)", file_name, HumanBytes(self.bytes)));
        self.bar.inc(1);
    }

    pub fn failed(&mut self, url: &str, reason: &str) {
        self.failed += 1;
        self.bar.println(format!("⚠️  Failed to download {}: {}", url, reason));
        self.bar.inc(1);
    }

    pub fn downloaded_bytes(&self) -> u64 {
        self.bytes
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Leave a one-line summary in place of the bar
    pub fn finish(&self) {
        let summary = if self.failed == 0 {
            format!("✅ {} downloaded", HumanBytes(self.bytes))
        } else {
            format!(
                "⚠️  {} downloaded, {} asset(s) skipped",
                HumanBytes(self.bytes),
                self.failed
            )
        };
        self.bar.finish_with_message(summary);
    }
}
