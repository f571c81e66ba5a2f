use serde::Serialize;
use std::path::{Path, PathBuf};

/// One extracted submission: a direct child directory of the corpus root.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionFolder {
    pub path: PathBuf,
    /// Every file under `path`, recursively, sorted by path.
    pub files: Vec<PathBuf>,
}

impl SubmissionFolder {
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// All submissions found under one root, in path order.
#[derive(Debug, Clone, Serialize)]
pub struct Corpus {
    pub root: PathBuf,
    pub submissions: Vec<SubmissionFolder>,
}

impl Corpus {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Flattened file population across every submission, in submission order.
    pub fn files(&self) -> Vec<PathBuf> {
        self.submissions
            .iter()
            .flat_map(|s| s.files.iter().cloned())
            .collect()
    }

    pub fn file_count(&self) -> usize {
        self.submissions.iter().map(|s| s.files.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.file_count() == 0
    }
}

/// A file pair whose similarity met the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPair {
    pub a: PathBuf,
    pub b: PathBuf,
    pub score: f64,
}

/// A connected group of mutually reachable files and its representative.
#[derive(Debug, Clone, Serialize)]
pub struct Cluster {
    pub central: PathBuf,
    /// All members including `central`, sorted by path.
    pub members: Vec<PathBuf>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn others(&self) -> impl Iterator<Item = &PathBuf> {
        self.members.iter().filter(move |m| **m != self.central)
    }
}
