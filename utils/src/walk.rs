//! Go source discovery.
//!
//! Walks a root directory depth-first with siblings in path order, so the
//! same tree always yields the same file list. Unreadable entries below the
//! root are logged and skipped; only a bad root is an error.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use thiserror::Error;

pub const GO_EXTENSION: &str = "go";

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to locate path '{}': {source}", .path.display())]
    Missing {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("path '{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
}

/// Which files a walk should consider.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Globs matched against the root-relative path; matching files are skipped.
    pub exclude: GlobSet,
    /// Honor `.gitignore`, `.ignore` and git excludes.
    pub respect_gitignore: bool,
    /// Descend into dot-directories and check dot-files.
    pub include_hidden: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            exclude: GlobSet::empty(),
            respect_gitignore: false,
            include_hidden: true,
        }
    }
}

impl ScanOptions {
    /// Compile `patterns` into the exclude set. `*` does not cross `/`.
    pub fn with_excludes<I, S>(mut self, patterns: I) -> Result<Self, globset::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern.as_ref())
                .literal_separator(true)
                .build()?;
            builder.add(glob);
        }
        self.exclude = builder.build()?;
        Ok(self)
    }
}

/// All `.go` files under `root`, in walk order.
pub fn discover_go_files(root: &Path, options: &ScanOptions) -> Result<Vec<PathBuf>, WalkError> {
    // Like lstat: a symlinked root is not followed.
    let metadata = fs::symlink_metadata(root).map_err(|source| WalkError::Missing {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.follow_links(false);
    builder.hidden(!options.include_hidden);
    if options.respect_gitignore {
        builder.ignore(true);
        builder.git_ignore(true);
        builder.git_global(true);
        builder.git_exclude(true);
        builder.require_git(false);
    }
    builder.filter_entry(|entry| entry.file_name() != ".git");
    builder.sort_by_file_path(|a, b| a.cmp(b));

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to walk dir entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(GO_EXTENSION) {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if options.exclude.is_match(rel) {
            tracing::debug!(path = %normalize_path(rel), "Excluded by pattern");
            continue;
        }

        files.push(path.to_path_buf());
    }

    tracing::debug!(root = %root.display(), files = files.len(), "Discovered Go sources");
    Ok(files)
}

/// Normalize path separators to forward slashes.
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
