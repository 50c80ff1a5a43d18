//! Top command: offline leaderboard straight from the snapshot

use std::path::{Path, PathBuf};

use anyhow::Result;

use rankup::config::BotConfig;
use rankup::ledger::{LevelTable, XpLedger};

/// Print the top users by XP without connecting to chat.
/// Shows raw user ids; display names live in the platform's cache.
pub async fn top_command(work_dir: &Path, config_path: Option<PathBuf>, limit: usize) -> Result<()> {
    let config = BotConfig::load(work_dir, config_path.as_deref())?;
    let levels = LevelTable::new(config.level_xp.clone());
    let ledger = XpLedger::load(config.snapshot_path(work_dir), levels)?;

    if ledger.is_empty() {
        println!("No XP recorded yet.");
        return Ok(());
    }

    println!("Leaderboard ({} users tracked):", ledger.len());
    for (rank, (user_id, xp)) in ledger.top(limit).into_iter().enumerate() {
        let progress = ledger.progress_of(&user_id);
        println!(
            "{:>3}. {:<24} {:>8} XP  (level {})",
            rank + 1,
            user_id,
            xp,
            progress.level
        );
    }

    Ok(())
}
