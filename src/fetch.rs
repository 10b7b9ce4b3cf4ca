//! # Repository Fetching
//!
//! Fetching a repository means materializing its working tree into an
//! existing, empty workspace directory. The mechanism is an external
//! process; this module wraps it behind the [`Fetcher`] trait so the
//! orchestrator can be driven by a stub in tests.
//!
//! - **`GitFetcher`**: the default, a shallow single-revision `git clone`.
//!   Using the system `git` picks up SSH keys, credential helpers and any
//!   authentication configured in `~/.gitconfig`.
//! - **`CommandFetcher`**: runs an arbitrary program as
//!   `<program> [args...] <url> <destination>`.
//!
//! A non-zero exit status is reported as [`Error::Fetch`] with the process's
//! stderr. There are no retries.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output};

use log::debug;

use crate::error::{Error, Result};

/// Trait for fetch operations - allows stubbing in tests
pub trait Fetcher: Send + Sync {
    /// Materialize the repository at `source_url` into `destination`.
    ///
    /// `destination` must already exist and be empty.
    fn fetch(&self, source_url: &str, destination: &Path) -> Result<()>;
}

/// Shallow clone using the system `git` command.
///
/// The URL follows a `--` separator, so a locator that starts with `-` is
/// never parsed as a git option.
#[derive(Debug, Clone, Default)]
pub struct GitFetcher;

impl Fetcher for GitFetcher {
    fn fetch(&self, source_url: &str, destination: &Path) -> Result<()> {
        run(clone_command(source_url, destination), source_url, "git clone")
    }
}

fn clone_command(source_url: &str, destination: &Path) -> Command {
    let mut command = Command::new("git");
    command
        .args(["clone", "--depth", "1", "--quiet", "--"])
        .arg(source_url)
        .arg(destination);
    command
}

/// Fetch through a user-supplied external command.
///
/// The repository URL and the destination directory are appended after the
/// configured arguments.
#[derive(Debug, Clone)]
pub struct CommandFetcher {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandFetcher {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add leading arguments passed before the URL and destination.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl Fetcher for CommandFetcher {
    fn fetch(&self, source_url: &str, destination: &Path) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(source_url).arg(destination);

        run(command, source_url, &self.program.to_string_lossy())
    }
}

fn run(mut command: Command, source_url: &str, label: &str) -> Result<()> {
    debug!("Running {:?}", command);

    let output = command.output().map_err(|e| Error::Fetch {
        url: source_url.to_string(),
        message: format!("Failed to run {}: {}", label, e),
    })?;

    if output.status.success() {
        return Ok(());
    }

    Err(Error::Fetch {
        url: source_url.to_string(),
        message: failure_message(label, &output),
    })
}

/// Build the diagnostic for a failed fetch, with a hint for auth failures.
fn failure_message(label: &str, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let status = match output.status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    };

    let detail = if stderr.is_empty() {
        format!("{} failed ({})", label, status)
    } else {
        format!("{} failed ({}): {}", label, status, stderr)
    };

    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        format!(
            "{}\n  hint: make sure you have access to the repository \
             (SSH key loaded in ssh-agent, git credentials or a personal access token)",
            detail
        )
    } else {
        detail
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_script(dir: &Path, body: &str) -> std::path::PathBuf {
        let script = dir.join("fetch.sh");
        fs::write(&script, body).unwrap();
        script
    }

    #[cfg(unix)]
    #[test]
    fn test_command_fetcher_receives_url_and_destination() {
        let temp = TempDir::new().unwrap();
        let script = write_script(
            temp.path(),
            "mkdir -p \"$2/docs\" && printf '%s' \"$1\" > \"$2/docs/url.txt\"\n",
        );
        let destination = temp.path().join("ws");
        fs::create_dir(&destination).unwrap();

        let fetcher = CommandFetcher::new("sh").with_args([script]);
        fetcher
            .fetch("https://example.com/alpha.git", &destination)
            .unwrap();

        let url = fs::read_to_string(destination.join("docs/url.txt")).unwrap();
        assert_eq!(url, "https://example.com/alpha.git");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_fetcher_non_zero_exit_is_fetch_error() {
        let temp = TempDir::new().unwrap();
        let script = write_script(temp.path(), "echo 'repository not found' >&2\nexit 128\n");

        let fetcher = CommandFetcher::new("sh").with_args([script]);
        let err = fetcher
            .fetch("https://example.com/missing.git", temp.path())
            .unwrap_err();

        match err {
            Error::Fetch { url, message } => {
                assert_eq!(url, "https://example.com/missing.git");
                assert!(message.contains("exit status 128"), "{}", message);
                assert!(message.contains("repository not found"), "{}", message);
            }
            other => panic!("Expected Fetch error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_auth_failure_gets_hint() {
        let temp = TempDir::new().unwrap();
        let script = write_script(
            temp.path(),
            "echo 'fatal: Authentication failed for repo' >&2\nexit 128\n",
        );

        let fetcher = CommandFetcher::new("sh").with_args([script]);
        let err = fetcher.fetch("https://example.com/private.git", temp.path());
        let message = err.unwrap_err().to_string();
        assert!(message.contains("hint:"), "{}", message);
    }

    #[test]
    fn test_clone_command_separates_url_from_options() {
        let command = clone_command("--upload-pack=touch pwned", Path::new("/tmp/ws"));
        let args: Vec<_> = command.get_args().collect();

        assert_eq!(command.get_program(), "git");
        assert_eq!(
            args,
            ["clone", "--depth", "1", "--quiet", "--", "--upload-pack=touch pwned", "/tmp/ws"]
        );
    }

    #[test]
    fn test_missing_program_is_fetch_error() {
        let temp = TempDir::new().unwrap();
        let fetcher = CommandFetcher::new("docs-sync-definitely-not-a-real-program");

        let err = fetcher.fetch("https://example.com/a.git", temp.path()).unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
        assert!(err.to_string().contains("Failed to run"));
    }

    // Cloning with the real git binary is covered by the
    // `integration-tests` feature in tests/git_fetch_integration.rs.
}
