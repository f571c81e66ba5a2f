use crate::model::ScoredPair;
use crate::normalizer::{CanonicalContent, ContentCache};
use crate::progress::ProgressReporter;
use ahash::AHashSet;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Jaccard similarity of two canonical sets as a percentage.
///
/// 0 when both sets are empty.
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &CanonicalContent, b: &CanonicalContent) -> f64 {
    let intersection = a.intersection_len(b);
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64 * 100.0
}

/// Upper bound on `similarity(a, b)` from set sizes alone: the intersection can be at
/// most the smaller set and the union at least the larger one.
#[allow(clippy::cast_precision_loss)]
fn size_bound(a: &CanonicalContent, b: &CanonicalContent) -> f64 {
    let (small, large) = if a.len() <= b.len() {
        (a.len(), b.len())
    } else {
        (b.len(), a.len())
    };
    if large == 0 {
        return 0.0;
    }
    small as f64 / large as f64 * 100.0
}

/// Score every unordered pair of distinct files and keep those at or above
/// `threshold`.
///
/// 1. Load canonical content for every file through `cache` (parallel, once per path)
/// 2. Evaluate pairs (i, j) with i < j, sharded by `i` across the rayon pool
/// 3. Skip pairs whose size bound is already under the threshold
/// 4. Merge and sort by (i, j) so output order does not depend on scheduling
pub fn compare_all(
    files: &[PathBuf],
    cache: &ContentCache,
    threshold: f64,
    reporter: &dyn ProgressReporter,
) -> Vec<ScoredPair> {
    let mut seen = AHashSet::with_capacity(files.len());
    let files: Vec<&PathBuf> = files.iter().filter(|f| seen.insert(*f)).collect();
    let total = files.len();

    reporter.on_compare_start(total);
    info!(
        "Comparing {} files ({} candidate pairs, threshold={:.2})...",
        total,
        total * total.saturating_sub(1) / 2,
        threshold
    );

    let contents: Vec<Arc<CanonicalContent>> =
        files.par_iter().map(|f| cache.get_or_load(f)).collect();

    let rows_done = AtomicUsize::new(0);
    let pruned = AtomicUsize::new(0);

    let mut scored: Vec<(usize, usize, f64)> = (0..total)
        .into_par_iter()
        .flat_map_iter(|i| {
            let mut row = Vec::new();
            for j in (i + 1)..total {
                if size_bound(&contents[i], &contents[j]) < threshold {
                    pruned.fetch_add(1, Ordering::Relaxed);
                    continue;
                }
                let score = similarity(&contents[i], &contents[j]);
                if score >= threshold {
                    row.push((i, j, score));
                }
            }
            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            reporter.on_compare_progress(done, total);
            row
        })
        .collect();

    scored.sort_by(|x, y| (x.0, x.1).cmp(&(y.0, y.1)));

    debug!(
        "{} pairs pruned by size bound, {} pairs at or above threshold",
        pruned.load(Ordering::Relaxed),
        scored.len()
    );

    scored
        .into_iter()
        .map(|(i, j, score)| ScoredPair {
            a: files[i].clone(),
            b: files[j].clone(),
            score,
        })
        .collect()
}
