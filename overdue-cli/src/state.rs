use anyhow::{Context, Result};
use std::path::PathBuf;

/// `$OVERDUE_HOME`, or `~/.overdue` when unset.
pub fn overdue_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("OVERDUE_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".overdue"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(overdue_home()?.join("config.toml"))
}
