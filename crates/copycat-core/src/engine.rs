use crate::analysis::{compare_all, find_clusters, SimilarityGraph};
use crate::config::AppConfig;
use crate::error::Error;
use crate::normalizer::ContentCache;
use crate::progress::ProgressReporter;
use crate::report::{build_cases, Case};
use crate::scanner;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub struct DetectionEngine {
    config: AppConfig,
}

#[derive(Debug)]
pub struct DetectionResult {
    pub cases: Vec<Case>,
    pub load_duration: Duration,
    pub compare_duration: Duration,
    pub cluster_duration: Duration,
    pub submissions: usize,
    pub total_files: usize,
    pub unreadable_files: usize,
    pub similar_pairs: usize,
    pub clusters: usize,
}

impl DetectionEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the full detection pipeline:
    /// 1. Load submission folders and their files
    /// 2. Normalize every file once and score all file pairs
    /// 3. Build the similarity graph and extract clusters
    /// 4. Turn clusters into numbered report cases
    ///
    /// The content cache lives for this call only.
    pub fn run(&self, reporter: &dyn ProgressReporter) -> Result<DetectionResult, Error> {
        self.config.validate()?;

        let root = Path::new(&self.config.root_path);
        info!("Processing submissions under {}", root.display());

        let ignore_pattern_slices: Vec<&str> = self
            .config
            .ignore_patterns
            .iter()
            .map(|s| s.as_str())
            .collect();

        // Phase 1: Load
        reporter.on_load_start();
        let load_start = Instant::now();
        let corpus = scanner::load_corpus(root, &ignore_pattern_slices)?;
        let files = corpus.files();
        let load_duration = load_start.elapsed();
        reporter.on_load_complete(
            corpus.submissions.len(),
            files.len(),
            load_duration.as_secs_f64(),
        );
        debug!(
            "Load completed in {:.2}s: {} submissions, {} files",
            load_duration.as_secs_f64(),
            corpus.submissions.len(),
            files.len(),
        );

        // Phase 2: Compare
        let cache = ContentCache::new();
        let compare_start = Instant::now();
        let pairs = compare_all(&files, &cache, self.config.threshold, reporter);
        let compare_duration = compare_start.elapsed();
        reporter.on_compare_complete(pairs.len(), compare_duration.as_secs_f64());
        debug!(
            "Compare completed in {:.2}s: {} similar pairs, {} unreadable files",
            compare_duration.as_secs_f64(),
            pairs.len(),
            cache.failures(),
        );

        // Phase 3: Cluster
        let cluster_start = Instant::now();
        let graph = SimilarityGraph::from_pairs(&pairs);
        let clusters = find_clusters(&graph);
        let cases = build_cases(&clusters, &cache);
        let cluster_duration = cluster_start.elapsed();
        reporter.on_cluster_complete(clusters.len(), cluster_duration.as_secs_f64());
        debug!(
            "Clustering completed in {:.2}s: {} clusters",
            cluster_duration.as_secs_f64(),
            clusters.len(),
        );

        Ok(DetectionResult {
            cases,
            load_duration,
            compare_duration,
            cluster_duration,
            submissions: corpus.submissions.len(),
            total_files: files.len(),
            unreadable_files: cache.failures(),
            similar_pairs: pairs.len(),
            clusters: clusters.len(),
        })
    }
}
