use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub appearance: AppearanceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Origin of the auth service; endpoints live under `/api/auth`.
    pub base_url: String,
    #[serde(default = "default_callback_url")]
    pub callback_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub poll_interval_ms: u64,
}

fn default_callback_url() -> String {
    contracts::system::auth::DEFAULT_CALLBACK_URL.to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[auth]
base_url = "http://localhost:3000"
callback_url = "/dashboard"

[storage]
path = "data/preferences.json"

[appearance]
poll_interval_ms = 2000
"#;

/// Load configuration
///
/// Search order:
/// 1. `explicit` path (from `--config`), which must exist
/// 2. config.toml next to the executable
/// 3. Falls back to embedded default config
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return read_config(path);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return read_config(&config_path);
            } else {
                tracing::debug!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

/// Get the preferences file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_storage_path(config: &Config) -> PathBuf {
    let storage_path = Path::new(&config.storage.path);

    if storage_path.is_absolute() {
        return storage_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(storage_path);
        }
    }

    // Fallback: use relative to current directory
    PathBuf::from(&config.storage.path)
}
