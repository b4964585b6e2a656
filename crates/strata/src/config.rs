//! Configuration file handling.
//!
//! Looks for `.config/strata.styx` in the starting directory or any parent.

pub use strata_config::Config;

use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_PATH: &str = ".config/strata.styx";

/// Load configuration from `.config/strata.styx`, searching up from the
/// current directory.
pub fn load() -> Result<(Config, PathBuf), ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io(e.to_string()))?;
    load_from(&cwd)
}

/// Load configuration starting from a specific directory.
pub fn load_from(start: &Path) -> Result<(Config, PathBuf), ConfigError> {
    let config_path = find_config_file(start)?;
    let content =
        std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io(e.to_string()))?;
    let config = parse(&content)?;
    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok((config, config_path))
}

/// Parse the contents of a `strata.styx` file.
pub fn parse(content: &str) -> Result<Config, ConfigError> {
    facet_styx::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

fn find_config_file(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_PATH);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(ConfigError::NotFound);
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `.config/strata.styx` in the starting directory or any parent
    #[error("no .config/strata.styx found in current directory or any parent")]
    NotFound,
    /// I/O error reading the file
    #[error("failed to read .config/strata.styx: {0}")]
    Io(String),
    /// Parse error in the Styx file
    #[error("failed to parse .config/strata.styx: {0}")]
    Parse(String),
}
