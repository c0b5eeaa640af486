//! Command-line interface for tracklink.
//!
//! Runs the HTTP server (the default), resolves a single link from the
//! terminal, shows how a link would be parsed, or writes a starter config
//! file.

mod commands;

pub use commands::{Cli, Commands, run_command};
