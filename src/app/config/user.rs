use serde::{Deserialize, Serialize};

use crate::app::keys::KeyConfig;
use crate::app::state::{DEFAULT_VOLUME, MAX_VOLUME};
use crate::error::{PlayerError, Result};

/// User-editable configuration, stored in `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Starting volume, 0-100.
    #[serde(default = "default_volume")]
    pub volume: u8,
    /// Playback clock period in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_true")]
    pub show_lyrics: bool,
    /// Filter directive used when `NOCTURNE_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub keys: KeyConfig,
}

fn default_volume() -> u8 {
    DEFAULT_VOLUME
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
            tick_ms: default_tick_ms(),
            show_lyrics: true,
            log_level: default_log_level(),
            keys: KeyConfig::default(),
        }
    }
}

impl UserConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(PlayerError::Config("tick_ms must be >= 1".into()));
        }
        if self.volume > MAX_VOLUME {
            return Err(PlayerError::Config(format!("volume must be <= {MAX_VOLUME}")));
        }
        Ok(())
    }
}
