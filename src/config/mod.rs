//! # Configuration Management Module
//!
//! Central, serde-backed configuration for the house builder. Every section has
//! sensible defaults so a missing file or section never blocks startup.
//!
//! ## Configuration Structure
//!
//! - [`HouseConfig`] - Layout geometry (house size, item size, drag grid, spawn margin)
//! - [`TimingConfig`] - Transition, message and idle-behaviour timings
//! - [`ShareConfig`] - Share link construction
//! - [`StorageConfig`] - Saved-history location
//! - [`LoggingConfig`] - Logging settings
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hamsterhouse::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("House: {}x{}", config.house.width, config.house.height);
//!
//!     Config::create_default("config.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [house]
//! width = 400.0
//! height = 300.0
//! grid_pitch = 20.0
//!
//! [share]
//! base_url = "https://hamster.house/builder"
//!
//! [storage]
//! data_dir = "./data"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::fs;

use crate::surface::Size;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub house: HouseConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Layout geometry in house units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    pub width: f64,
    pub height: f64,
    /// Edge length of a furnishing item; drags keep the whole item inside the house.
    pub item_size: f64,
    /// Resting positions after a drag are multiples of this.
    pub grid_pitch: f64,
    /// Distance newly placed items keep from the house edges.
    pub spawn_margin: f64,
    pub mascot_width: f64,
    pub mascot_height: f64,
    /// Vertical band the mascot wanders in, starting at `mascot_top`.
    pub mascot_wander_height: f64,
    pub mascot_top: f64,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 300.0,
            item_size: 30.0,
            grid_pitch: 20.0,
            spawn_margin: 20.0,
            mascot_width: 80.0,
            mascot_height: 60.0,
            mascot_wander_height: 100.0,
            mascot_top: 20.0,
        }
    }
}

impl HouseConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn item(&self) -> Size {
        Size::new(self.item_size, self.item_size)
    }

    pub fn mascot(&self) -> Size {
        Size::new(self.mascot_width, self.mascot_height)
    }
}

/// Timings in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub entrance_delay_ms: u64,
    pub exit_ms: u64,
    pub message_ttl_ms: u64,
    pub message_fade_ms: u64,
    pub bounce_ms: u64,
    pub wander_transition_ms: u64,
    pub layer_pulse_ms: u64,
    pub sparkle_count: u32,
    pub sparkle_stagger_ms: u64,
    pub sparkle_lifetime_ms: u64,
    pub button_feedback_ms: u64,
    pub welcome_delay_ms: u64,
    pub wander_interval_ms: u64,
    pub chatter_interval_ms: u64,
    /// Chance that a chatter tick actually produces a message.
    pub chatter_probability: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            entrance_delay_ms: 100,
            exit_ms: 300,
            message_ttl_ms: 3000,
            message_fade_ms: 300,
            bounce_ms: 1000,
            wander_transition_ms: 2000,
            layer_pulse_ms: 300,
            sparkle_count: 5,
            sparkle_stagger_ms: 200,
            sparkle_lifetime_ms: 2000,
            button_feedback_ms: 2000,
            welcome_delay_ms: 1000,
            wander_interval_ms: 8000,
            chatter_interval_ms: 15000,
            chatter_probability: 0.3,
        }
    }
}

impl TimingConfig {
    pub fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Page the share link points at (origin + path, no query).
    pub base_url: String,
    pub query_param: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hamster.house/builder".to_string(),
            query_param: "design".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    /// Slot holding the saved-history array.
    pub history_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            history_key: "hamsterHouseDesigns".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Level filter from the configured name; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let config = Config::default();
        assert_eq!(config.house.width, 400.0);
        assert_eq!(config.house.height, 300.0);
        assert_eq!(config.house.item_size, 30.0);
        assert_eq!(config.house.grid_pitch, 20.0);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [house]
            width = 640.0

            [timing]
            chatter_probability = 1.0
            "#,
        )
        .unwrap();
        assert_eq!(config.house.width, 640.0);
        assert_eq!(config.house.height, 300.0);
        assert_eq!(config.timing.chatter_probability, 1.0);
        assert_eq!(config.timing.wander_interval_ms, 8000);
        assert_eq!(config.storage.history_key, "hamsterHouseDesigns");
    }

    #[test]
    fn test_partial_logging_section() {
        let config: Config = toml::from_str(
            r#"
            [house]
            width = 640.0

            [logging]
            file = "hamster.log"
            "#,
        )
        .unwrap();
        assert_eq!(config.house.width, 640.0);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file.as_deref(), Some("hamster.log"));
    }

    #[test]
    fn test_logging_level_filter() {
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.level_filter(), log::LevelFilter::Info);
        logging.level = "debug".into();
        assert_eq!(logging.level_filter(), log::LevelFilter::Debug);
        logging.level = "chatty".into();
        assert_eq!(logging.level_filter(), log::LevelFilter::Info);
    }

    #[tokio::test]
    async fn test_create_default_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        let path = path.to_string_lossy().to_string();
        Config::create_default(&path).await.unwrap();
        let loaded = Config::load(&path).await.unwrap();
        assert_eq!(loaded.share.query_param, "design");
        assert_eq!(loaded.timing.sparkle_count, 5);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let err = Config::load("/definitely/not/here.toml").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
