//! # CLI Command Implementations
//!
//! Each subcommand of the `docs-sync` command-line tool lives in its own
//! file. A command module contains an `Args` struct derived with `clap` and
//! an `execute` function that calls into the `docs_sync` library.

pub mod sync;
pub mod validate;
