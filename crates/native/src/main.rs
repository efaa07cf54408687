pub mod handlers;
pub mod shared;
pub mod system;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use handlers::auth::AuthAction;
use handlers::theme::ThemeAction;

/// Theme preference and sign-in flows from the terminal.
#[derive(Debug, Parser)]
#[command(name = "native", version)]
struct Cli {
    /// Path to a config.toml (defaults to the one next to the executable)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Sign in, sign up or inspect the session
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    system::tracing::initialize()?;
    let config = shared::config::load_config(cli.config.as_deref())?;

    // The core is single-threaded; everything it spawns runs on this set
    let local = tokio::task::LocalSet::new();
    let result = local
        .run_until(async {
            match cli.command {
                Command::Theme { action } => handlers::theme::run(action, &config).await,
                Command::Auth { action } => handlers::auth::run(action, &config).await,
            }
        })
        .await;

    // Let pending preference writes finish before exiting
    local.await;
    result
}
