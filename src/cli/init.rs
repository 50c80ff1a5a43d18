//! Init command implementation

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// Default configuration content for rankup init
pub const DEFAULT_CONFIG: &str = r#"# rankup configuration
#
# The bot token is NOT stored here. Set RANKUP_TOKEN in the environment
# or in a .env file next to this one.

# Prefix that marks a message as a command ($level, $leaderboard, ...)
command_prefix = "$"

# Snapshot file with everyone's XP, relative to the working directory.
# Written after every grant; safe to back up or inspect.
snapshot = "xp.json"

# XP needed to climb from level i to i + 1. The table length is the
# maximum level; users who clear every threshold stop earning XP.
level_xp = [100, 200, 300, 400, 500, 600, 700, 800, 900, 1000]
"#;

/// Write a fresh rankup.toml into the working directory
pub async fn init_command(work_dir: &Path, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| work_dir.join(rankup::config::CONFIG_FILE));

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankup::config::BotConfig;

    #[test]
    fn test_default_config_matches_built_in_defaults() {
        let parsed: BotConfig = toml::from_str(DEFAULT_CONFIG).expect("default config must parse");
        parsed.validate().expect("default config must validate");
        assert_eq!(parsed, BotConfig::default());
    }
}
