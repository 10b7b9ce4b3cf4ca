//! # Sync Orchestrator
//!
//! Drives a complete sync run. For every repository entry, in configuration
//! order:
//!
//! 1.  **Destination**: compose `{docs_root}/{collection}/{target_subdir?}/{title}`.
//! 2.  **Workspace**: acquire a fresh temporary directory for this repository.
//! 3.  **Fetch**: materialize the repository into the workspace.
//! 4.  **Extract**: copy the docs path from the workspace into the destination.
//! 5.  **Release**: remove the workspace, whatever happened in 2-4.
//!
//! Failures are contained per repository. A workspace, fetch or extract error
//! is logged against the repository title, recorded in the [`SyncReport`],
//! and the run moves on to the next entry. Nothing in here returns an error
//! for the run as a whole; only loading the configuration can do that.
//!
//! ## Parallelism
//!
//! Repositories share no state besides the destination tree, so with
//! `jobs > 1` they are processed on a bounded `rayon` pool. Every per-repo
//! guarantee above still holds and the report keeps configuration order.

use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;

use crate::config::{Collection, RepoEntry, RepositoriesConfig};
use crate::error::{Error, Result};
use crate::extract::{extract, ExtractOutcome};
use crate::fetch::{Fetcher, GitFetcher};
use crate::workspace::WorkspaceManager;

/// What happened to one repository during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoStatus {
    /// Docs were copied into the destination.
    Copied { files: usize },
    /// The docs path does not exist in the repository.
    Skipped,
    /// Workspace, fetch or extract failed; carries the error message.
    Failed(String),
}

/// Outcome of one repository entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoOutcome {
    pub collection: String,
    pub title: String,
    pub destination: PathBuf,
    pub status: RepoStatus,
}

/// Per-repository outcomes of a run, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    outcomes: Vec<RepoOutcome>,
}

impl SyncReport {
    pub fn outcomes(&self) -> &[RepoOutcome] {
        &self.outcomes
    }

    pub fn copied(&self) -> usize {
        self.count(|s| matches!(s, RepoStatus::Copied { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, RepoStatus::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, RepoStatus::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, predicate: impl Fn(&RepoStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.status)).count()
    }
}

/// The main entry point for syncing docs.
pub struct SyncOrchestrator {
    docs_root: PathBuf,
    workspaces: WorkspaceManager,
    fetcher: Box<dyn Fetcher>,
    jobs: usize,
}

impl SyncOrchestrator {
    /// Creates an orchestrator writing under `docs_root`.
    pub fn new(
        docs_root: impl Into<PathBuf>,
        workspaces: WorkspaceManager,
        fetcher: Box<dyn Fetcher>,
    ) -> Self {
        Self {
            docs_root: docs_root.into(),
            workspaces,
            fetcher,
            jobs: 1,
        }
    }

    /// Creates an orchestrator using `git` and the system temp directory.
    pub fn with_defaults(docs_root: impl Into<PathBuf>) -> Self {
        Self::new(docs_root, WorkspaceManager::system(), Box::new(GitFetcher))
    }

    /// Process up to `jobs` repositories at a time (minimum 1).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn docs_root(&self) -> &Path {
        &self.docs_root
    }

    /// Sync every repository in `config`.
    pub fn run(&self, config: &RepositoriesConfig) -> SyncReport {
        let entries: Vec<(&Collection, &RepoEntry)> = config.entries().collect();

        let outcomes: Vec<RepoOutcome> = if self.jobs > 1 && entries.len() > 1 {
            match rayon::ThreadPoolBuilder::new().num_threads(self.jobs).build() {
                Ok(pool) => pool.install(|| {
                    entries
                        .par_iter()
                        .map(|(collection, repo)| self.sync_repo(collection, repo))
                        .collect()
                }),
                Err(e) => {
                    warn!("Could not start {} workers, syncing sequentially: {}", self.jobs, e);
                    self.run_sequential(&entries)
                }
            }
        } else {
            self.run_sequential(&entries)
        };

        info!("All done!");
        SyncReport { outcomes }
    }

    fn run_sequential(&self, entries: &[(&Collection, &RepoEntry)]) -> Vec<RepoOutcome> {
        entries
            .iter()
            .map(|(collection, repo)| self.sync_repo(collection, repo))
            .collect()
    }

    /// Process one repository; never fails, the outcome says what happened.
    fn sync_repo(&self, collection: &Collection, repo: &RepoEntry) -> RepoOutcome {
        let destination = repo.destination(&self.docs_root, &collection.name);
        info!("Syncing {} from {}", repo.title, repo.source_url);

        let status = match self.fetch_and_extract(collection, repo, &destination) {
            Ok(ExtractOutcome::Copied { files, .. }) => {
                info!("Copied docs for {} into {}", repo.title, destination.display());
                RepoStatus::Copied { files }
            }
            Ok(ExtractOutcome::Skipped) => {
                warn!(
                    "No \"{}\" directory found in {}, skipping",
                    repo.docs_path, repo.title
                );
                RepoStatus::Skipped
            }
            Err(e) => {
                warn!("Failed to sync {}: {}", repo.title, e);
                RepoStatus::Failed(e.to_string())
            }
        };

        RepoOutcome {
            collection: collection.name.clone(),
            title: repo.title.clone(),
            destination,
            status,
        }
    }

    fn fetch_and_extract(
        &self,
        collection: &Collection,
        repo: &RepoEntry,
        destination: &Path,
    ) -> Result<ExtractOutcome> {
        if !repo.has_usable_title() {
            return Err(Error::Extract {
                path: destination.to_path_buf(),
                message: format!("title {:?} does not name a directory", repo.title),
            });
        }

        let workspace = self.workspaces.acquire(&collection.name)?;

        let result = self
            .fetcher
            .fetch(&repo.source_url, workspace.path())
            .and_then(|()| extract(workspace.path(), &repo.docs_path, destination));

        workspace.release();
        result
    }
}
