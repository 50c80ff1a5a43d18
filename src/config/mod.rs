//! Bot configuration
//!
//! Loaded from `rankup.toml` in the working directory (or `--config`).
//! Every field has a default, so a missing file just means default config.
//! The authentication token never lives in the file; it comes from the
//! `RANKUP_TOKEN` environment variable, with a local `.env` honored.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Environment variable holding the chat platform token
pub const TOKEN_ENV: &str = "RANKUP_TOKEN";

/// Config file name looked up in the working directory
pub const CONFIG_FILE: &str = "rankup.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Prefix that marks a message as a command
    #[serde(default = "default_prefix")]
    pub command_prefix: String,

    /// Snapshot file name, resolved against the working directory
    #[serde(default = "default_snapshot")]
    pub snapshot: String,

    /// XP needed to climb from level i to i + 1
    #[serde(default = "default_level_xp")]
    pub level_xp: Vec<u64>,
}

fn default_prefix() -> String {
    "$".to_string()
}

fn default_snapshot() -> String {
    "xp.json".to_string()
}

fn default_level_xp() -> Vec<u64> {
    vec![100, 200, 300, 400, 500, 600, 700, 800, 900, 1000]
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_prefix(),
            snapshot: default_snapshot(),
            level_xp: default_level_xp(),
        }
    }
}

impl BotConfig {
    /// Load from an explicit file, or `<work_dir>/rankup.toml`, or defaults
    /// when neither exists. The result is always validated.
    pub fn load(work_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = work_dir.join(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Reject configurations the bot cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.command_prefix.is_empty() {
            bail!("command_prefix must not be empty");
        }
        if self.snapshot.is_empty() {
            bail!("snapshot must not be empty");
        }
        if self.level_xp.is_empty() {
            bail!("level_xp must contain at least one threshold");
        }
        if let Some(i) = self.level_xp.iter().position(|&t| t == 0) {
            bail!("level_xp[{}] must be positive", i);
        }
        Ok(())
    }

    /// Snapshot path under the working directory
    pub fn snapshot_path(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(&self.snapshot)
    }
}

/// Read the bot token from the environment; absence is fatal to startup.
pub fn token_from_env() -> Result<String> {
    token_from(TOKEN_ENV)
}

fn token_from(var: &str) -> Result<String> {
    match std::env::var(var) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => bail!("chat token not found. Set {} in the environment or a .env file", var),
    }
}
