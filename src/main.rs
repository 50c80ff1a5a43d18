use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "rankup")]
#[command(about = "Chat XP bot - rate-limited XP grants, levels and leaderboards")]
#[command(version)]
struct Cli {
    /// Working directory holding rankup.toml and the XP snapshot (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Path to the config file (defaults to rankup.toml in the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot on the console transport (one `name: message` per stdin line)
    Run,

    /// Show the leaderboard from the snapshot without connecting to chat
    Top {
        /// Maximum number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Initialize a new rankup.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Determine the working directory
    let work_dir = cli.path.unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Commands::Run) | None => {
            cli::run::run_command(&work_dir, cli.config).await?;
        }
        Some(Commands::Top { limit }) => {
            cli::top::top_command(&work_dir, cli.config, limit).await?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(&work_dir, cli.config, force).await?;
        }
    }

    Ok(())
}
