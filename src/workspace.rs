//! # Temporary Workspaces
//!
//! Every repository is fetched into its own freshly created directory under
//! the system's temporary area (or a configured root). The directory is
//! owned by a [`Workspace`] guard for the duration of one repository's
//! processing and removed afterwards, whatever the outcome.
//!
//! Release happens exactly once: either explicitly through
//! [`Workspace::release`] or implicitly when the guard is dropped (early
//! return, `?`, or a panic unwinding through the repository step). Removal is
//! best-effort; a failure is logged and never surfaces as an error, so it
//! cannot mask the repository's own result.

use std::path::{Path, PathBuf};

use log::debug;
use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::path::encode_workspace_prefix;

/// Creates isolated, uniquely named workspace directories.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    root: PathBuf,
}

impl WorkspaceManager {
    /// Create workspaces under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create workspaces under the system temporary directory.
    pub fn system() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Directory that workspaces are created in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create a new, empty workspace whose name starts with `name_prefix`.
    ///
    /// The prefix is encoded so that unsafe collection names cannot place
    /// the workspace outside the root.
    pub fn acquire(&self, name_prefix: &str) -> Result<Workspace> {
        let prefix = format!("{}-", encode_workspace_prefix(name_prefix));
        let dir = tempfile::Builder::new()
            .prefix(&prefix)
            .tempdir_in(&self.root)
            .map_err(|e| Error::Workspace {
                message: format!(
                    "Failed to create workspace in '{}': {}",
                    self.root.display(),
                    e
                ),
            })?;

        debug!("Acquired workspace {}", dir.path().display());
        Ok(Workspace { dir: Some(dir) })
    }
}

impl Default for WorkspaceManager {
    fn default() -> Self {
        Self::system()
    }
}

/// A temporary directory owned by one repository-processing step.
#[derive(Debug)]
pub struct Workspace {
    dir: Option<TempDir>,
}

impl Workspace {
    /// Path of the workspace directory.
    ///
    /// Only meaningful before release; the guard is consumed by `release`,
    /// so a released workspace cannot be asked for its path.
    pub fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }

    /// Recursively remove the workspace directory.
    pub fn release(mut self) {
        self.release_inner();
    }

    fn release_inner(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };

        let path = dir.path().to_path_buf();
        match dir.close() {
            Ok(()) => debug!("Released workspace {}", path.display()),
            Err(e) => {
                // Already gone (or partially removed by someone else) is fine.
                if path.exists() {
                    debug!("Failed to remove workspace {}: {}", path.display(), e);
                    let _ = std::fs::remove_dir_all(&path);
                }
            }
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.release_inner();
    }
}
