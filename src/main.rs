//! # Docs Sync CLI
//!
//! This is the binary entry point for the `docs-sync` command-line tool.
//!
//! Its responsibilities are parsing command-line arguments with `clap`,
//! running the selected command and turning top-level failures (such as an
//! unreadable configuration) into a non-zero exit status. The sync logic
//! itself lives in the `docs_sync` library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
