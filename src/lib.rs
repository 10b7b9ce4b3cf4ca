//! # Docs Sync Library
//!
//! This library aggregates documentation from a set of external source
//! repositories into a single local directory tree, grouped by named
//! collections. It backs the `docs-sync` command-line tool and can be used
//! directly by documentation-build pipelines.
//!
//! ## Quick Example
//!
//! ```
//! use docs_sync::config;
//! use std::path::Path;
//!
//! let repositories = config::parse_json(r#"{
//!   "collections": [
//!     { "collectionName": "guides",
//!       "repos": [{ "title": "alpha", "baseUrl": "https://example.com/alpha.git",
//!                   "path": "/docs", "targetDir": "team-x" }] }
//!   ]
//! }"#).unwrap();
//!
//! let (collection, repo) = repositories.entries().next().unwrap();
//! assert_eq!(
//!     repo.destination(Path::new("docs"), &collection.name),
//!     Path::new("docs/guides/team-x/alpha")
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the ordered list of collections and the
//!   repositories in each.
//! - **Workspaces (`workspace`)**: one uniquely named temporary directory per
//!   repository, removed on every exit path.
//! - **Fetching (`fetch`)**: materializes a repository into a workspace via
//!   an external command (`git clone --depth 1` by default).
//! - **Extraction (`extract`)**: copies the configured docs subdirectory into
//!   the destination tree.
//! - **Orchestration (`sync`)**: runs workspace, fetch and extract for every
//!   repository, containing failures per repository.
//!
//! ## Execution Flow
//!
//! For each collection, for each repository, in configuration order:
//!
//! 1.  Compose the destination `{docs_root}/{collection}/{target_subdir?}/{title}`.
//! 2.  Acquire a workspace.
//! 3.  Fetch the repository into the workspace.
//! 4.  Extract the docs path into the destination.
//! 5.  Release the workspace.
//!
//! Only configuration loading can fail a whole run; every other error is
//! logged, recorded in the [`sync::SyncReport`], and the run continues.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod path;
pub mod sync;
pub mod workspace;

#[cfg(test)]
mod path_proptest;
