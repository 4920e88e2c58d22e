use std::fs;
use std::path::{Path, PathBuf};

pub mod user;

pub use user::UserConfig;

use crate::error::{PlayerError, Result};

/// Locates and reads `config.toml`. The file is read-only to the player:
/// nothing is ever written back.
pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nocturne")
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_log_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nocturne")
            .join("logs")
    }

    /// Load from `path` (or the default location). A missing file yields
    /// defaults; an unreadable or malformed one is an error.
    pub fn try_load(path: Option<&Path>) -> Result<UserConfig> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::get_config_path);

        if !path.exists() {
            return Ok(UserConfig::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| PlayerError::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<UserConfig> {
        let config: UserConfig =
            toml::from_str(content).map_err(|e| PlayerError::Config(e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Default config as pretty TOML, for `--generate-config`.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&UserConfig::default()).unwrap_or_default()
    }
}
