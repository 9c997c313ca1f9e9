//! # Configuration Management Module
//!
//! TOML configuration for the bot, the history store and logging, plus any
//! extra games beyond the built-in catalog.
//!
//! ## Configuration Structure
//!
//! - [`BotConfig`] - command prefix, batch size, attempt budget, cooldown
//! - [`StorageConfig`] - where the history database lives
//! - [`LoggingConfig`] - log level and optional log file
//! - `games` - additional [`GameRulesConfig`] entries appended to the catalog
//!
//! ## Configuration File Format
//!
//! ```toml
//! [bot]
//! name = "NickForge"
//! command_prefix = "/"
//! batch_size = 5
//! max_attempts = 100
//! generate_cooldown_ms = 1000
//! restore_seen_on_start = false
//!
//! [storage]
//! data_dir = "./data"
//!
//! [logging]
//! level = "info"
//! file = "nickforge.log"
//!
//! [[games]]
//! id = "Valorant"
//! max_length = 16
//! forbidden_chars = "[^A-Za-z0-9 ]"
//! allowed_patterns = ["letters", "numbers", "spaces"]
//! description = "Letters, digits and spaces"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nickforge::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     println!("Bot: {}", config.bot.name);
//!     let catalog = config.rule_catalog()?;
//!     println!("{} games", catalog.len());
//!     Ok(())
//! }
//! ```

use crate::generator::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_ATTEMPTS};
use crate::rules::{GameRulesConfig, RuleCatalog};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;

/// Prefix characters accepted for bot commands.
pub const ALLOWED_PREFIXES: [char; 4] = ['/', '!', '^', '.'];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    pub name: String,
    /// Command prefix. Must be one of [`ALLOWED_PREFIXES`]; anything else falls back to `/`.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Minimum gap between two generation commands from the same user (ms). 0 disables.
    #[serde(default = "default_generate_cooldown_ms")]
    pub generate_cooldown_ms: u64,
    /// Warm the seen-set from persisted digests at start-up, so names handed out
    /// before a restart stay reserved.
    #[serde(default)]
    pub restore_seen_on_start: bool,
}

fn default_command_prefix() -> String {
    "/".to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

fn default_generate_cooldown_ms() -> u64 {
    1000
}

impl BotConfig {
    pub fn prefix_char(&self) -> char {
        let mut chars = self.command_prefix.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if ALLOWED_PREFIXES.contains(&c) => c,
            _ => '/',
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

impl StorageConfig {
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("history")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub games: Vec<GameRulesConfig>,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
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

    pub fn validate(&self) -> Result<()> {
        if self.bot.batch_size == 0 {
            return Err(anyhow!("bot.batch_size must be at least 1"));
        }
        if self.bot.batch_size > 20 {
            return Err(anyhow!("bot.batch_size must be at most 20"));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        Ok(())
    }

    /// Built-in games plus the `[[games]]` declared here.
    pub fn rule_catalog(&self) -> Result<RuleCatalog> {
        Ok(RuleCatalog::with_extra(&self.games)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bot: BotConfig {
                name: "NickForge".to_string(),
                command_prefix: default_command_prefix(),
                batch_size: DEFAULT_BATCH_SIZE,
                max_attempts: DEFAULT_MAX_ATTEMPTS,
                generate_cooldown_ms: default_generate_cooldown_ms(),
                restore_seen_on_start: false,
            },
            storage: StorageConfig {
                data_dir: "./data".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("nickforge.log".to_string()),
            },
            games: Vec::new(),
        }
    }
}
