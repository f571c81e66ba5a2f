use copycat_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// CLI progress reporter using indicatif progress bars.
///
/// - Load phase: spinner (file count unknown upfront)
/// - Compare phase: progress bar over outer comparison rows
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn set_bar(&self, pb: ProgressBar) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(old) = guard.take() {
            old.finish_and_clear();
        }
        *guard = Some(pb);
    }

    fn finish_bar(&self) {
        let mut guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_load_start(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_chars(TICK_CHARS),
        );
        pb.set_message("Loading submissions...");
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    fn on_load_complete(&self, submissions: usize, files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Load complete: {} submissions, {} files in {:.2}s",
            submissions, files, duration_secs
        );
    }

    fn on_compare_start(&self, total_files: usize) {
        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Comparing [{bar:30.cyan/dim}] {pos}/{len} files ({eta} remaining)",
            )
            .unwrap()
            .progress_chars("━╸─")
            .tick_chars(TICK_CHARS),
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        self.set_bar(pb);
    }

    /// Rows finish on different workers, so `rows_done` can arrive out of order. Each
    /// call counts one finished row.
    fn on_compare_progress(&self, _rows_done: usize, total_rows: usize) {
        let guard = self.bar.lock().unwrap();
        if let Some(pb) = guard.as_ref() {
            if pb.length() != Some(total_rows as u64) {
                pb.set_length(total_rows as u64);
            }
            pb.inc(1);
        }
    }

    fn on_compare_complete(&self, similar_pairs: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  \x1b[32m✓\x1b[0m Compare complete: {} similar pairs in {:.2}s",
            similar_pairs, duration_secs
        );
    }

    fn on_cluster_complete(&self, clusters: usize, duration_secs: f64) {
        eprintln!(
            "  \x1b[32m✓\x1b[0m Clustering complete: {} clusters in {:.2}s",
            clusters, duration_secs
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(reporter: &CliReporter) -> u64 {
        reporter.bar.lock().unwrap().as_ref().unwrap().position()
    }

    #[test]
    fn test_out_of_order_rows_never_move_bar_backwards() {
        let reporter = CliReporter::new();
        reporter.set_bar(ProgressBar::hidden());

        let mut last = 0;
        for rows_done in [2, 1, 4, 3, 5] {
            reporter.on_compare_progress(rows_done, 5);
            let pos = position(&reporter);
            assert!(pos > last, "bar moved from {} to {}", last, pos);
            last = pos;
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn test_progress_without_bar_is_ignored() {
        let reporter = CliReporter::new();
        reporter.on_compare_progress(1, 3);
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
