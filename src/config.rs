//! # Configuration Schema and Parsing
//!
//! This module defines the data structures that represent the repositories
//! configuration document, as well as the logic for loading it.
//!
//! ## Schema
//!
//! ```json
//! {
//!   "collections": [
//!     {
//!       "collectionName": "guides",
//!       "repos": [
//!         { "title": "alpha", "baseUrl": "https://example.com/alpha.git",
//!           "path": "/docs", "targetDir": null }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! The serialized field names are kept for compatibility with existing
//! `repositories.json` files; the Rust names describe what each field is
//! used for.
//!
//! ## Formats
//!
//! JSON is the canonical format. `from_file` also accepts YAML (`.yaml`,
//! `.yml`) and TOML (`.toml`) documents with the same structure.

use crate::error::{Error, Result};
use crate::path::{destination_dir, names_directory};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "repositories.json";

/// Default destination root for extracted docs.
pub const DEFAULT_DOCS_DIR: &str = "docs";

const SCHEMA_HINT: &str = "Expected { \"collections\": [{ \"collectionName\": ..., \"repos\": [{ \"title\", \"baseUrl\", \"path\", \"targetDir\" }] }] }";

/// The whole configuration: an ordered list of collections.
///
/// Order matters: later entries are written after earlier ones and win when
/// two entries resolve to the same destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoriesConfig {
    pub collections: Vec<Collection>,
}

/// A named group of repositories sharing a destination subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Used as a path segment under the docs root.
    #[serde(rename = "collectionName")]
    pub name: String,
    pub repos: Vec<RepoEntry>,
}

/// One repository to pull docs from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Human-readable identifier, also the leaf destination directory name.
    pub title: String,
    /// Locator handed verbatim to the fetch mechanism.
    #[serde(rename = "baseUrl")]
    pub source_url: String,
    /// Subdirectory to extract, relative to the fetched repository root.
    #[serde(rename = "path")]
    pub docs_path: String,
    /// Optional segment inserted between the collection name and the title.
    #[serde(rename = "targetDir", default)]
    pub target_subdir: Option<String>,
}

impl RepoEntry {
    /// The target subdirectory, with an empty string treated as absent.
    pub fn target_subdir(&self) -> Option<&str> {
        self.target_subdir.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether the title yields its own leaf directory.
    ///
    /// Titles like `""` or `".."` would put this entry's docs straight into
    /// the collection directory, mixed with its siblings.
    pub fn has_usable_title(&self) -> bool {
        names_directory(&self.title)
    }

    /// Destination directory of this entry within `collection`.
    pub fn destination(&self, docs_root: &Path, collection: &str) -> PathBuf {
        destination_dir(docs_root, collection, self.target_subdir(), &self.title)
    }
}

impl RepositoriesConfig {
    /// Iterate over every `(collection, repo)` pair in configuration order.
    pub fn entries(&self) -> impl Iterator<Item = (&Collection, &RepoEntry)> {
        self.collections
            .iter()
            .flat_map(|collection| collection.repos.iter().map(move |repo| (collection, repo)))
    }

    /// Total number of repository entries across all collections.
    pub fn repo_count(&self) -> usize {
        self.collections.iter().map(|c| c.repos.len()).sum()
    }

    /// `(collection, title)` of every entry whose title is not usable as a
    /// directory name, in configuration order.
    pub fn unusable_titles(&self) -> Vec<(String, String)> {
        self.entries()
            .filter(|(_, repo)| !repo.has_usable_title())
            .map(|(collection, repo)| (collection.name.clone(), repo.title.clone()))
            .collect()
    }

    /// Destinations claimed by more than one entry, with the titles claiming
    /// them in configuration order.
    ///
    /// Duplicates are allowed (last writer wins); this exists so callers can
    /// warn about them.
    pub fn duplicate_destinations(&self, docs_root: &Path) -> Vec<(PathBuf, Vec<String>)> {
        let mut order: Vec<PathBuf> = Vec::new();
        let mut claims: HashMap<PathBuf, Vec<String>> = HashMap::new();

        for (collection, repo) in self.entries() {
            let destination = repo.destination(docs_root, &collection.name);
            let titles = claims.entry(destination.clone()).or_default();
            if titles.is_empty() {
                order.push(destination);
            }
            titles.push(repo.title.clone());
        }

        order
            .into_iter()
            .filter_map(|destination| {
                let titles = claims.remove(&destination)?;
                (titles.len() > 1).then_some((destination, titles))
            })
            .collect()
    }
}

fn parse_error(message: impl ToString) -> Error {
    Error::ConfigParse {
        message: message.to_string(),
        hint: Some(SCHEMA_HINT.to_string()),
    }
}

/// Parse a JSON configuration document
pub fn parse_json(content: &str) -> Result<RepositoriesConfig> {
    serde_json::from_str(content).map_err(parse_error)
}

/// Parse a YAML configuration document
pub fn parse_yaml(content: &str) -> Result<RepositoriesConfig> {
    serde_yaml::from_str(content).map_err(parse_error)
}

/// Parse a TOML configuration document
pub fn parse_toml(content: &str) -> Result<RepositoriesConfig> {
    toml::from_str(content).map_err(parse_error)
}

/// Load a configuration file, picking the parser from its extension
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RepositoriesConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("Failed to read '{}': {}", path.display(), e),
        hint: None,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => parse_yaml(&content),
        Some("toml") => parse_toml(&content),
        _ => parse_json(&content),
    }
}
