//! Configuration management for warbot

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::error::WarbotError;
use crate::render::ImageFormat;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WarbotConfig {
    /// Roster and picture locations
    pub battlefield: BattlefieldConfig,
    /// Round scheduling
    pub schedule: ScheduleConfig,
    /// Status table rendering
    pub render: RenderConfig,
    /// Twitter posting
    pub twitter: TwitterConfig,
}

/// Where the roster lives and where pictures are written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BattlefieldConfig {
    /// Roster file, one participant per line
    pub roster_path: PathBuf,
    /// Picture output directory; defaults to the roster file's directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_dir: Option<PathBuf>,
}

impl Default for BattlefieldConfig {
    fn default() -> Self {
        Self {
            roster_path: PathBuf::from("example_battlefield/battle.txt"),
            picture_dir: None,
        }
    }
}

/// How often rounds are played
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Hours between rounds
    pub interval_hours: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { interval_hours: 12 }
    }
}

const SECS_PER_HOUR: u64 = 3600;

impl ScheduleConfig {
    /// Period between rounds. Saturates for intervals `validate` rejects.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.saturating_mul(SECS_PER_HOUR))
    }
}

/// Status table appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub format: ImageFormat,
    /// Width of one column in pixels
    pub column_width: u32,
    /// Height of one row in pixels
    pub row_height: u32,
    /// Multiplier applied to the 8x8 bitmap glyphs
    pub glyph_scale: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::Jpeg,
            column_width: 560,
            row_height: 20,
            glyph_scale: 2,
        }
    }
}

/// Twitter API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    /// `KEY=VALUE` token file
    pub credentials_path: PathBuf,
    /// Base URL for the posting endpoint
    pub api_base: String,
    /// Base URL for the media upload endpoint
    pub upload_base: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("config/tokens.env"),
            api_base: "https://api.twitter.com".to_string(),
            upload_base: "https://upload.twitter.com".to_string(),
            timeout_secs: 30,
        }
    }
}

impl WarbotConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WarbotError> {
        let content = fs::read_to_string(path).map_err(|e| {
            WarbotError::Configuration {
                message: format!("Failed to read config file: {}", e),
                field: "config_file".to_string(),
            }
        })?;

        let config: WarbotConfig = toml::from_str(&content).map_err(|e| {
            WarbotError::Configuration {
                message: format!("Failed to parse config file: {}", e),
                field: "config_format".to_string(),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WarbotError> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            WarbotError::Configuration {
                message: format!("Failed to serialize config: {}", e),
                field: "config_serialization".to_string(),
            }
        })?;

        fs::write(path, content).map_err(|e| {
            WarbotError::Configuration {
                message: format!("Failed to write config file: {}", e),
                field: "config_write".to_string(),
            }
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), WarbotError> {
        if self.battlefield.roster_path.as_os_str().is_empty() {
            return Err(WarbotError::Configuration {
                message: "Roster path must not be empty".to_string(),
                field: "battlefield.roster_path".to_string(),
            });
        }

        if self.schedule.interval_hours == 0 {
            return Err(WarbotError::Configuration {
                message: "Round interval must be at least one hour".to_string(),
                field: "schedule.interval_hours".to_string(),
            });
        }

        if self.schedule.interval_hours.checked_mul(SECS_PER_HOUR).is_none() {
            return Err(WarbotError::Configuration {
                message: format!("Round interval of {} hours is too large", self.schedule.interval_hours),
                field: "schedule.interval_hours".to_string(),
            });
        }

        if self.render.glyph_scale == 0 {
            return Err(WarbotError::Configuration {
                message: "Glyph scale must be greater than 0".to_string(),
                field: "render.glyph_scale".to_string(),
            });
        }

        // A cell has to fit at least one glyph
        let Some(glyph) = 8u32.checked_mul(self.render.glyph_scale) else {
            return Err(WarbotError::Configuration {
                message: format!("Glyph scale {} is too large", self.render.glyph_scale),
                field: "render.glyph_scale".to_string(),
            });
        };
        if self.render.row_height < glyph || self.render.column_width < glyph {
            return Err(WarbotError::Configuration {
                message: format!("Cells must be at least {}px to fit a glyph", glyph),
                field: "render.row_height".to_string(),
            });
        }

        if self.twitter.api_base.is_empty() || self.twitter.upload_base.is_empty() {
            return Err(WarbotError::Configuration {
                message: "Twitter API base URLs must not be empty".to_string(),
                field: "twitter.api_base".to_string(),
            });
        }

        if self.twitter.timeout_secs == 0 {
            return Err(WarbotError::Configuration {
                message: "Request timeout must be greater than 0".to_string(),
                field: "twitter.timeout_secs".to_string(),
            });
        }

        Ok(())
    }
}
