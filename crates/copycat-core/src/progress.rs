/// Trait for reporting detection progress.
///
/// The CLI implements it with indicatif; tests and library callers use `SilentReporter`.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_load_start(&self) {}
    fn on_load_complete(&self, _submissions: usize, _files: usize, _duration_secs: f64) {}
    fn on_compare_start(&self, _total_files: usize) {}
    fn on_compare_progress(&self, _rows_done: usize, _total_rows: usize) {}
    fn on_compare_complete(&self, _similar_pairs: usize, _duration_secs: f64) {}
    fn on_cluster_complete(&self, _clusters: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
