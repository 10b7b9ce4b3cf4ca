//! # Docs Extraction
//!
//! Copies the configured docs subdirectory of a fetched repository into its
//! destination in the docs tree.
//!
//! ## Process
//!
//! 1.  **Locate**: resolve the docs path against the fetched root. If it does
//!     not exist the repository simply does not publish docs there and the
//!     result is [`ExtractOutcome::Skipped`]; nothing is created.
//!
//! 2.  **Create Destination**: create the destination directory and any
//!     missing ancestors.
//!
//! 3.  **Copy**: walk the docs directory depth-first in pre-order, so every
//!     directory is created before anything is written into it. Files are
//!     copied byte for byte and overwrite whatever is at the destination.
//!     `.git` directories are not copied. Symbolic links are followed when
//!     they point at a file inside the fetched repository and skipped
//!     otherwise, so a repository cannot publish host files.
//!
//! Only content and directory structure are reproduced. Files already in
//! the destination that do not exist in the source are left alone.

use std::fs;
use std::path::Path;

use log::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::path::resolve_docs_path;

/// Result of extracting one repository's docs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Docs were copied into the destination.
    Copied { files: usize, directories: usize },
    /// The docs path does not exist in the fetched repository.
    Skipped,
}

fn extract_error(path: &Path, action: &str, e: impl std::fmt::Display) -> Error {
    Error::Extract {
        path: path.to_path_buf(),
        message: format!("{}: {}", action, e),
    }
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == ".git"
}

/// Extract `docs_path` from `fetched_root` into `destination`.
pub fn extract(fetched_root: &Path, docs_path: &str, destination: &Path) -> Result<ExtractOutcome> {
    let source = resolve_docs_path(fetched_root, docs_path);

    if !source.exists() {
        debug!("Docs path {} does not exist", source.display());
        return Ok(ExtractOutcome::Skipped);
    }
    if !source.is_dir() {
        return Err(Error::Extract {
            path: source,
            message: "docs path is not a directory".to_string(),
        });
    }

    let repo_root = fs::canonicalize(fetched_root)
        .map_err(|e| extract_error(fetched_root, "Failed to resolve repository root", e))?;
    if !is_within(&source, &repo_root) {
        return Err(Error::Extract {
            path: source,
            message: "docs path points outside the repository".to_string(),
        });
    }

    fs::create_dir_all(destination)
        .map_err(|e| extract_error(destination, "Failed to create directory", e))?;

    let mut files = 0;
    let mut directories = 0;

    let walker = WalkDir::new(&source)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_git_dir(entry));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| source.clone());
            extract_error(&path, "Failed to read", e)
        })?;

        let relative = entry
            .path()
            .strip_prefix(&source)
            .map_err(|e| extract_error(entry.path(), "Unexpected path outside docs", e))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| extract_error(&target, "Failed to create directory", e))?;
            directories += 1;
        } else if entry.file_type().is_file() || resolves_to_file(entry.path(), &repo_root) {
            copy_file(entry.path(), &target)?;
            files += 1;
        } else {
            debug!("Skipping {}", entry.path().display());
        }
    }

    Ok(ExtractOutcome::Copied { files, directories })
}

/// True when `path` canonicalizes to somewhere under `root`.
fn is_within(path: &Path, root: &Path) -> bool {
    fs::canonicalize(path)
        .map(|resolved| resolved.starts_with(root))
        .unwrap_or(false)
}

/// Symlinks count as files only when their target is a file in the repository.
fn resolves_to_file(path: &Path, repo_root: &Path) -> bool {
    is_within(path, repo_root) && fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

fn copy_file(source: &Path, target: &Path) -> Result<()> {
    // fs::copy carries permissions over, so a previous run may have left a
    // read-only copy that cannot be opened for writing.
    if let Ok(metadata) = fs::symlink_metadata(target) {
        if metadata.is_file() && metadata.permissions().readonly() {
            fs::remove_file(target)
                .map_err(|e| extract_error(target, "Failed to replace read-only file", e))?;
        }
    }

    fs::copy(source, target)
        .map(|_| ())
        .map_err(|e| extract_error(target, &format!("Failed to copy '{}'", source.display()), e))
}
