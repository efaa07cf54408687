use std::rc::Rc;
use std::time::Duration;

use app_core::theme::{ThemeOption, ThemeSelectorState, ThemeStore};
use clap::Subcommand;
use contracts::shared::theme::ThemePreferenceState;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::shared::appearance::PollingAppearance;
use crate::shared::config::{get_storage_path, Config};
use crate::shared::spawner::TokioSpawner;
use crate::shared::storage::JsonFileStore;

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// Print the stored mode and the resolved appearance
    Show,
    /// Store a mode: light, dark or system
    Set { mode: String },
    /// Pick a mode from a menu
    Select,
    /// Print every appearance change until Ctrl+C
    Watch,
}

fn build_store(config: &Config) -> ThemeStore {
    let path = get_storage_path(config);
    tracing::debug!("Theme preference file: {}", path.display());
    ThemeStore::new(
        Rc::new(JsonFileStore::new(path)),
        Rc::new(PollingAppearance::new(Duration::from_millis(
            config.appearance.poll_interval_ms,
        ))),
        Rc::new(TokioSpawner),
    )
}

fn describe(state: &ThemePreferenceState) -> String {
    format!(
        "{} {} (appearance: {})",
        state.mode.icon(),
        state.mode.display_name(),
        state.effective.as_str()
    )
}

/// Maps menu input to a mode name; `None` dismisses the menu.
fn resolve_choice(input: &str, options: &[ThemeOption]) -> Option<String> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("q") {
        return None;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => {
            Some(options[n - 1].mode.as_str().to_string())
        }
        _ => Some(input.to_string()),
    }
}

pub async fn run(action: ThemeAction, config: &Config) -> anyhow::Result<()> {
    let store = build_store(config);
    store.initialize().await;

    let result = match action {
        ThemeAction::Show => {
            println!("{}", describe(&store.state()));
            Ok(())
        }
        ThemeAction::Set { mode } => store
            .set_mode_str(&mode)
            .map(|state| println!("{}", describe(&state)))
            .map_err(anyhow::Error::from),
        ThemeAction::Select => select(&store).await,
        ThemeAction::Watch => watch(&store).await,
    };

    store.shutdown();
    result
}

async fn select(store: &ThemeStore) -> anyhow::Result<()> {
    let mut selector = ThemeSelectorState::default();
    selector.open();

    let options = selector.options(store);
    println!("Choose Theme");
    for (i, option) in options.iter().enumerate() {
        let marker = if option.active { "✓" } else { " " };
        println!("  {}. {} {} {}", i + 1, option.icon, option.label, marker);
    }
    println!("Enter a number or name (empty to cancel):");

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    match resolve_choice(&line, &options) {
        Some(choice) => {
            let state = selector.select_str(store, &choice)?;
            println!("{}", describe(&state));
        }
        None => {
            selector.dismiss();
            println!("Unchanged: {}", describe(&store.state()));
        }
    }
    Ok(())
}

async fn watch(store: &ThemeStore) -> anyhow::Result<()> {
    println!("{}", describe(&store.state()));
    if !store.is_following_os() {
        println!("Mode is fixed; switch to system to follow the OS.");
    }

    let _subscription = store.subscribe(|state| println!("{}", describe(state)));
    tokio::signal::ctrl_c().await?;
    Ok(())
}
