use crate::model::{Corpus, SubmissionFolder};
use glob::Pattern;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Discover the submission folders directly under `root` and list every file in each,
/// recursively. Files sitting directly in `root` (typically the original archives)
/// are not part of any submission and are skipped.
pub fn load_corpus(root: &Path, ignore_globs: &[&str]) -> io::Result<Corpus> {
    let ignore_patterns = compile_patterns(ignore_globs);

    let entries = fs::read_dir(root).map_err(|err| {
        io::Error::new(
            err.kind(),
            format!("Error reading root directory {}: {}", root.display(), err),
        )
    })?;

    let mut submissions = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("Error reading entry in directory {}: {}", root.display(), err),
            )
        })?;

        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                error!("Error getting file type for {}: {}", path.display(), err);
                continue;
            }
        };

        if !file_type.is_dir() {
            continue;
        }
        if is_ignored(&path, &ignore_patterns) {
            debug!("Ignoring submission {}", path.display());
            continue;
        }

        let mut files = Vec::new();
        visit_dirs(&path, &mut files, &ignore_patterns);
        files.sort();

        debug!("Submission {} has {} files", path.display(), files.len());
        submissions.push(SubmissionFolder { path, files });
    }

    submissions.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(Corpus {
        root: root.to_path_buf(),
        submissions,
    })
}

fn compile_patterns(ignore_globs: &[&str]) -> Vec<Pattern> {
    ignore_globs
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect()
}

fn is_ignored(path: &Path, ignore_patterns: &[Pattern]) -> bool {
    ignore_patterns
        .iter()
        .any(|pattern| pattern.matches_path(path))
}

/// Problems inside a submission are logged and skipped; one broken folder must not
/// hide the rest of the cohort.
fn visit_dirs(dir: &Path, files: &mut Vec<PathBuf>, ignore_patterns: &[Pattern]) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            if err.kind() == io::ErrorKind::PermissionDenied {
                error!("Access denied reading directory {}: {}", dir.display(), err);
            } else {
                error!("Error reading directory {}: {}", dir.display(), err);
            }
            return;
        }
    };

    for entry_result in entries {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Error reading entry in directory {}: {}", dir.display(), err);
                continue;
            }
        };

        let path = entry.path();
        // DirEntry::file_type does not follow symlinks.
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(err) => {
                warn!("Error getting file type for {}: {}", path.display(), err);
                continue;
            }
        };

        if file_type.is_symlink() || is_ignored(&path, ignore_patterns) {
            continue;
        }

        if file_type.is_dir() {
            visit_dirs(&path, files, ignore_patterns);
        } else if file_type.is_file() {
            files.push(path);
        }
    }
}
