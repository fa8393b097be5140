use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5000;

/// Root configuration, deserialized from `.deadrepo/config.toml`.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the fetch/analyze backend.
    pub backend_url: String,
    /// How long a notification stays visible. `0` keeps it until dismissed.
    pub toast_duration_ms: u64,
    /// Where the last submitted URL is remembered.
    /// Defaults to `<data dir>/deadrepo/state.json`.
    pub state_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            state_file: None,
        }
    }
}

impl Config {
    pub fn state_file(&self) -> Option<PathBuf> {
        self.state_file
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("deadrepo").join("state.json")))
    }
}

/// Load configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<cwd>/.deadrepo/config.toml`
/// 3. `~/.config/deadrepo/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(cwd: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = cwd.join(".deadrepo").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("deadrepo").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}
