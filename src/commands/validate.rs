//! # Validate Command Implementation
//!
//! Parses a repositories configuration without fetching anything and shows
//! where each repository's docs would be written. Destinations claimed by
//! more than one entry are reported as warnings (last writer wins during a
//! sync); `--strict` turns them into a failure.
//!
//! This command is a read-only operation that does not touch the network or
//! the docs tree.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use docs_sync::config::{self, DEFAULT_CONFIG_FILE, DEFAULT_DOCS_DIR};
use docs_sync::output::{emoji, OutputConfig};

/// Validate a repositories configuration file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the repositories configuration file to validate.
    #[arg(short, long, value_name = "FILE", env = "DOCS_SYNC_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Root of the destination docs tree, used to display destinations.
    #[arg(short, long, value_name = "DIR", env = "DOCS_SYNC_ROOT", default_value = DEFAULT_DOCS_DIR)]
    pub docs_root: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    println!(
        "{} Validating configuration: {}",
        emoji(&out, "🔍", "[SCAN]"),
        args.config.display()
    );

    let repositories = match config::from_file(&args.config) {
        Ok(repositories) => repositories,
        Err(e) => {
            println!(
                "{} Configuration parsing failed",
                emoji(&out, "❌", "[ERR]")
            );
            return Err(e.into());
        }
    };

    for (collection, repo) in repositories.entries() {
        println!(
            "   {} {}/{} <- {} ({})",
            emoji(&out, "📄", "-"),
            collection.name,
            repo.title,
            repo.source_url,
            repo.docs_path
        );
        println!(
            "      -> {}",
            repo.destination(&args.docs_root, &collection.name).display()
        );
    }

    let duplicates = repositories.duplicate_destinations(&args.docs_root);
    for (destination, titles) in &duplicates {
        println!(
            "{} {} is targeted by {} entries: {}",
            emoji(&out, "⚠️", "[WARN]"),
            destination.display(),
            titles.len(),
            titles.join(", ")
        );
    }

    let unusable = repositories.unusable_titles();
    for (collection, title) in &unusable {
        println!(
            "{} {}: title {:?} does not name a directory and will fail to sync",
            emoji(&out, "⚠️", "[WARN]"),
            collection,
            title
        );
    }

    if args.strict && !duplicates.is_empty() {
        anyhow::bail!(
            "Validation failed: {} duplicate destination(s)",
            duplicates.len()
        );
    }
    if args.strict && !unusable.is_empty() {
        anyhow::bail!("Validation failed: {} unusable title(s)", unusable.len());
    }

    println!(
        "{} Configuration is valid: {} collections, {} repositories",
        emoji(&out, "✅", "[OK]"),
        repositories.collections.len(),
        repositories.repo_count()
    );
    Ok(())
}
