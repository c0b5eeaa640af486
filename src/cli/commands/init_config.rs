//! Config file bootstrap command.

use std::path::{Path, PathBuf};

use crate::config::{self, Config};

/// Write the effective configuration (file values plus overrides) to disk
pub fn cmd_init_config(config: &Config, path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let written = write_config(config, path, force)?;
    println!("Wrote config to {}", written.display());
    Ok(())
}

/// Save `config` to `path`, or the default location when `path` is `None`.
///
/// An existing file is only replaced when `force` is set.
fn write_config(config: &Config, path: Option<&Path>, force: bool) -> anyhow::Result<PathBuf> {
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => config::config_path().ok_or(config::ConfigError::NoConfigDir)?,
    };

    if target.exists() && !force {
        anyhow::bail!(
            "Config file {} already exists (use --force to overwrite)",
            target.display()
        );
    }

    match path {
        Some(path) => config::save_to(config, path)?,
        None => config::save(config)?,
    }
    Ok(target)
}
