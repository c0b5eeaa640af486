//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `serve`: HTTP server
//! - `resolve`: one-shot resolution and offline parsing
//! - `init_config`: write a starter config file

mod init_config;
mod resolve;
mod serve;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::{self, Config};

pub use init_config::cmd_init_config;
pub use resolve::{cmd_parse, cmd_resolve};
pub use serve::cmd_serve;

/// Tracklink CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub overrides: Overrides,
}

/// Settings that override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Config file (default: OS config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Spotify client id (or set SPOTIFY_CLIENT_ID env var)
    #[arg(long, global = true, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    pub spotify_client_id: Option<String>,

    /// Spotify client secret (or set SPOTIFY_CLIENT_SECRET env var)
    #[arg(long, global = true, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: Option<String>,

    /// YouTube Data API key (or set YOUTUBE_API_KEY env var)
    #[arg(long, global = true, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: Option<String>,
}

impl Overrides {
    /// Load the config file and apply these overrides on top.
    pub fn load_config(&self) -> Config {
        let mut config = match &self.config {
            Some(path) => config::load_from(path),
            None => config::load(),
        };
        self.apply(&mut config);
        config
    }

    pub fn apply(&self, config: &mut Config) {
        let creds = &mut config.credentials;
        if self.spotify_client_id.is_some() {
            creds.spotify_client_id = self.spotify_client_id.clone();
        }
        if self.spotify_client_secret.is_some() {
            creds.spotify_client_secret = self.spotify_client_secret.clone();
        }
        if self.youtube_api_key.is_some() {
            creds.youtube_api_key = self.youtube_api_key.clone();
        }
    }
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Listen address, e.g. 0.0.0.0:8080
        #[arg(long)]
        bind: Option<String>,
        /// Public base URL used in short links
        #[arg(long)]
        public_url: Option<String>,
    },
    /// Resolve one link and print the result
    Resolve {
        /// Track URL on Spotify, Apple Music or YouTube
        url: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the provider and track id a link parses to (no network)
    Parse {
        /// Track URL
        url: String,
    },
    /// Write the effective configuration to the config file
    InitConfig {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Run the specified CLI command, or the server when none is given.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let command = cli.command.clone().unwrap_or(Commands::Serve {
        bind: None,
        public_url: None,
    });

    match command {
        Commands::Parse { url } => cmd_parse(&url),
        Commands::InitConfig { force } => {
            let config = cli.overrides.load_config();
            cmd_init_config(&config, cli.overrides.config.as_deref(), force)
        }
        Commands::Resolve { url, json } => {
            let rt = Runtime::new()?;
            cmd_resolve(&rt, cli.overrides.load_config(), &url, json)
        }
        Commands::Serve { bind, public_url } => {
            let mut config = cli.overrides.load_config();
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            if let Some(public_url) = public_url {
                config.server.public_url = public_url;
            }
            let rt = Runtime::new()?;
            cmd_serve(&rt, config)
        }
    }
}
