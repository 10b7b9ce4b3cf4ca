//! # Error Handling
//!
//! This module defines the centralized error type for `docs-sync`. It uses
//! the `thiserror` library to build an `Error` enum covering every failure
//! the sync pipeline can report.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Each variant corresponds to one class of
//!   failure and carries the context needed to report it.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! ## Scope of each variant
//!
//! Configuration errors (`ConfigNotFound`, `ConfigParse`) are fatal and abort
//! the run before any repository is touched. Everything else (`Workspace`,
//! `Fetch`, `Extract`, `Io`) is scoped to a single repository: the
//! orchestrator catches it, logs it against the repository title and moves
//! on. A docs path that does not exist in a fetched repository is not an
//! error at all; see [`crate::extract::ExtractOutcome::Skipped`].

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for docs-sync operations
#[derive(Error, Debug)]
pub enum Error {
    /// The repositories configuration file does not exist.
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// The repositories configuration could not be read or parsed.
    ///
    /// Includes the parser's message and optionally a hint about how to fix
    /// the document.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A temporary workspace directory could not be created.
    #[error("Workspace error: {message}")]
    Workspace { message: String },

    /// The external fetch command failed for a repository.
    ///
    /// `message` carries the diagnostic output of the failed command.
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Copying docs into the destination tree failed.
    #[error("Extract error at {}: {message}", path.display())]
    Extract { path: PathBuf, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for errors that must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ConfigNotFound { .. } | Error::ConfigParse { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
