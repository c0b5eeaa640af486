//! Tracklink - paste a music link, get the same track everywhere.
//!
//! Resolves a Spotify, Apple Music or YouTube track link into a canonical
//! track with deep links (or search fallbacks) on every supported provider
//! and a short share URL. Runs as an HTTP service by default; see `--help`
//! for the one-shot CLI commands.

pub mod cli;
pub mod config;
pub mod error;
pub mod resolver;
pub mod server;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("tracklink=info".parse()?))
        .init();

    cli::run_command(&args)
}
