//! Configuration loader

use crate::config::{ClientConfig, ENV_HOST, ENV_PORT};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Configuration loader for various formats
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ClientConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match ext {
            "json" => Self::from_json(&content),
            "toml" | "" => Self::from_toml(&content),
            _ => Err(Error::Config(format!("Unknown config format: {}", ext))),
        }
    }

    /// Load an explicit file, or the default file if it exists, or defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<ClientConfig> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Loading configuration from {}", path.display());
                Self::load(path)
            }
            _ => Ok(ClientConfig::default()),
        }
    }

    /// `<config_dir>/colornav/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("colornav").join("config.toml"))
    }

    /// Parse JSON configuration
    pub fn from_json(content: &str) -> Result<ClientConfig> {
        serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid JSON: {}", e)))
    }

    /// Parse TOML configuration
    pub fn from_toml(content: &str) -> Result<ClientConfig> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Apply `COLORNAV_HOST` / `COLORNAV_PORT` from the process environment
    pub fn apply_env(config: &mut ClientConfig) -> Result<()> {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST).filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(port) = lookup(ENV_PORT).filter(|p| !p.is_empty()) {
            config.port = port
                .parse()
                .map_err(|_| Error::Config(format!("{} is not a valid port: {}", ENV_PORT, port)))?;
        }
        Ok(())
    }
}
