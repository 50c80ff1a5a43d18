//! Run command: start the bot on the console transport

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use rankup::bot::{self, Bot};
use rankup::chat::console::ConsoleChat;
use rankup::config::{self, BotConfig};
use rankup::ledger::{LevelTable, XpLedger};

/// Load everything, connect the console transport and run until EOF
pub async fn run_command(work_dir: &Path, config_path: Option<PathBuf>) -> Result<()> {
    // .env is optional; a missing file is not an error
    dotenvy::dotenv().ok();
    let token = config::token_from_env()?;

    let config = BotConfig::load(work_dir, config_path.as_deref())?;
    let levels = LevelTable::new(config.level_xp.clone());
    let ledger = XpLedger::load(config.snapshot_path(work_dir), levels)?;
    info!(
        "ledger loaded: {} users, max level {}",
        ledger.len(),
        ledger.levels().max_level()
    );

    let (events, chat) = ConsoleChat::start(&token);
    let bot = Bot::new(config, ledger, chat);

    bot::run(bot, events).await
}
