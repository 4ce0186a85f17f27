use std::path::{Path, PathBuf};

use safeguard_common::config::SystemConfig;

use super::validation;

/// Complete engine configuration loaded from the config directory.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Parsed system.toml, or the built-in defaults.
    pub system: SystemConfig,
}

/// Load all configuration from the given config directory.
///
/// A missing system.toml falls back to the built-in policy defaults. A file
/// that exists but fails to parse or validate is an error, and the service
/// refuses to start on it.
pub fn load_config(config_dir: &Path) -> Result<EngineConfig, ConfigError> {
    tracing::info!(config_dir = %config_dir.display(), "Loading configuration");

    let system_path = config_dir.join("system.toml");
    let system = if system_path.exists() {
        load_system_config(&system_path)?
    } else {
        tracing::warn!(
            path = %system_path.display(),
            "system.toml does not exist, using built-in defaults"
        );
        SystemConfig::default()
    };

    let config = EngineConfig { system };

    validation::validate(&config.system)?;

    tracing::info!(
        clear_max = config.system.scoring.clear_max,
        clouded_max = config.system.scoring.clouded_max,
        initial_threshold = config.system.ledger.initial_threshold,
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn load_system_config(path: &Path) -> Result<SystemConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}
