//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new()
//!     .with_config(configs::ALPHA)
//!     .with_fetch_script(scripts::POPULATE_HELLO);
//! fixture.sync_command().assert().success();
//! ```
//!
//! The fetch mechanism is stubbed with a shell script passed through
//! `--fetch-command sh --fetch-arg <script>`; the script receives the
//! repository URL as `$1` and the workspace directory as `$2`.

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::scripts;
    pub use super::TestFixture;
}

/// Repositories configurations used across tests.
#[allow(dead_code)]
pub mod configs {
    /// One collection `guides` with one repo `alpha`.
    pub const ALPHA: &str = r#"{
  "collections": [
    {
      "collectionName": "guides",
      "repos": [
        { "title": "alpha", "baseUrl": "fake://alpha", "path": "/docs", "targetDir": null }
      ]
    }
  ]
}"#;

    /// Three repos in two collections; `fake://broken` fails under `scripts::BY_URL`.
    pub const MIXED: &str = r#"{
  "collections": [
    {
      "collectionName": "guides",
      "repos": [
        { "title": "alpha", "baseUrl": "fake://alpha", "path": "/docs", "targetDir": null },
        { "title": "broken", "baseUrl": "fake://broken", "path": "/docs", "targetDir": null },
        { "title": "nodocs", "baseUrl": "fake://nodocs", "path": "/docs", "targetDir": null }
      ]
    },
    {
      "collectionName": "api",
      "repos": [
        { "title": "gamma", "baseUrl": "fake://gamma", "path": "/docs", "targetDir": "team-x" }
      ]
    }
  ]
}"#;

    /// Not JSON at all.
    pub const INVALID: &str = "{ \"collections\": [";
}

/// Shell scripts standing in for `git clone`.
#[allow(dead_code)]
pub mod scripts {
    /// Writes `docs/readme.md` containing `hello`.
    pub const POPULATE_HELLO: &str = r#"mkdir -p "$2/docs" && printf hello > "$2/docs/readme.md"
"#;

    /// Always fails like an unreachable remote.
    pub const FAIL: &str = r#"echo "fatal: unable to access '$1': Could not resolve host" >&2
exit 128
"#;

    /// Behaves differently depending on the URL.
    pub const BY_URL: &str = r#"case "$1" in
  fake://broken) echo "fatal: repository '$1' not found" >&2; exit 128 ;;
  fake://nodocs) printf readme > "$2/README.md" ;;
  *) mkdir -p "$2/docs/nested" && printf "docs for $1" > "$2/docs/index.md" && printf deep > "$2/docs/nested/deep.md" ;;
esac
"#;
}

/// A temporary working directory with a config, a fetch stub and a private
/// workspace root.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("workspaces")
            .create_dir_all()
            .expect("Failed to create workspace root");
        Self { temp_dir }
    }

    /// Add a `repositories.json` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("repositories.json")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add the fetch stub script.
    pub fn with_fetch_script(self, body: &str) -> Self {
        self.temp_dir
            .child("fetch.sh")
            .write_str(body)
            .expect("Failed to write fetch script");
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Default docs root (`docs/` under the working directory).
    pub fn docs(&self) -> PathBuf {
        self.path().join("docs")
    }

    /// Directory the CLI creates workspaces in.
    pub fn workspace_root(&self) -> PathBuf {
        self.path().join("workspaces")
    }

    /// Number of entries left in the workspace root.
    pub fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(self.workspace_root())
            .expect("workspace root")
            .count()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("docs-sync");
        cmd.current_dir(self.path())
            .env_remove("DOCS_SYNC_CONFIG")
            .env_remove("DOCS_SYNC_ROOT")
            .env_remove("DOCS_SYNC_WORKSPACE")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `docs-sync sync` wired to the fetch stub and private workspace root.
    pub fn sync_command(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--color")
            .arg("never")
            .arg("sync")
            .arg("--workspace-root")
            .arg(self.workspace_root())
            .arg("--fetch-command")
            .arg("sh")
            .arg("--fetch-arg")
            .arg(self.path().join("fetch.sh"));
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
