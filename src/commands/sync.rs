//! Sync command implementation
//!
//! Loads the repositories configuration and runs the sync orchestrator:
//! every repository is fetched into its own temporary workspace, its docs
//! path is copied into the docs tree, and the workspace is removed.
//!
//! Individual repository failures are reported but do not change the exit
//! status unless `--strict` is given. A missing or malformed configuration
//! always fails the command.

use anyhow::Result;
use clap::Args;
use log::warn;
use std::path::PathBuf;
use std::time::Instant;

use docs_sync::config::{self, DEFAULT_CONFIG_FILE, DEFAULT_DOCS_DIR};
use docs_sync::fetch::{CommandFetcher, Fetcher, GitFetcher};
use docs_sync::output::{emoji, status_line, OutputConfig};
use docs_sync::sync::SyncOrchestrator;
use docs_sync::workspace::WorkspaceManager;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Path to the repositories configuration file (JSON, YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "DOCS_SYNC_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Root of the destination docs tree
    #[arg(short, long, value_name = "DIR", env = "DOCS_SYNC_ROOT", default_value = DEFAULT_DOCS_DIR)]
    pub docs_root: PathBuf,

    /// Directory to create temporary workspaces in (defaults to the system temp dir)
    #[arg(long, value_name = "DIR", env = "DOCS_SYNC_WORKSPACE")]
    pub workspace_root: Option<PathBuf>,

    /// Number of repositories to process at the same time
    #[arg(short, long, value_name = "N", default_value_t = 1)]
    pub jobs: usize,

    /// Program used to fetch a repository instead of `git clone --depth 1`.
    ///
    /// It is invoked as `<PROGRAM> [--fetch-arg ...] <URL> <DESTINATION>`.
    #[arg(long, value_name = "PROGRAM")]
    pub fetch_command: Option<String>,

    /// Extra leading argument for --fetch-command (repeatable)
    #[arg(
        long = "fetch-arg",
        value_name = "ARG",
        requires = "fetch_command",
        allow_hyphen_values = true
    )]
    pub fetch_args: Vec<String>,

    /// Exit with an error if any repository failed to sync
    #[arg(long)]
    pub strict: bool,

    /// Suppress the summary output
    #[arg(short, long)]
    pub quiet: bool,
}

impl SyncArgs {
    fn fetcher(&self) -> Box<dyn Fetcher> {
        match &self.fetch_command {
            Some(program) => {
                Box::new(CommandFetcher::new(program).with_args(self.fetch_args.iter().cloned()))
            }
            None => Box::new(GitFetcher),
        }
    }

    fn workspaces(&self) -> WorkspaceManager {
        match &self.workspace_root {
            Some(root) => WorkspaceManager::new(root),
            None => WorkspaceManager::system(),
        }
    }
}

/// Execute the sync command
pub fn execute(args: SyncArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();

    let repositories = config::from_file(&args.config)?;

    for (destination, titles) in repositories.duplicate_destinations(&args.docs_root) {
        warn!(
            "{} is targeted by {} entries ({}); the last one wins",
            destination.display(),
            titles.len(),
            titles.join(", ")
        );
    }

    if !args.quiet {
        println!(
            "{} Syncing {} repositories into {}",
            emoji(&out, "📚", "[SYNC]"),
            repositories.repo_count(),
            args.docs_root.display()
        );
    }

    let orchestrator = SyncOrchestrator::new(&args.docs_root, args.workspaces(), args.fetcher())
        .with_jobs(args.jobs);
    let report = orchestrator.run(&repositories);

    if !args.quiet {
        for outcome in report.outcomes() {
            println!("   {}", status_line(&out, &outcome.title, &outcome.status));
        }
        println!(
            "{} Done in {:.2}s: {} copied, {} skipped, {} failed",
            emoji(&out, "🏁", "[DONE]"),
            start_time.elapsed().as_secs_f64(),
            report.copied(),
            report.skipped(),
            report.failed()
        );
    }

    if args.strict && report.has_failures() {
        anyhow::bail!("{} repositories failed to sync", report.failed());
    }

    Ok(())
}
