//! Remembers the last submitted repository URL between runs.
//!
//! The backing store is a small JSON object on disk. Every failure (missing
//! file, unreadable JSON, read-only directory) degrades to "nothing
//! remembered"; callers never see an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

pub const LAST_URL_KEY: &str = "deadrepo_last_url";

#[derive(Debug, Clone)]
pub struct UrlStore {
    path: Option<PathBuf>,
}

impl UrlStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Last stored URL, or an empty string when there is none.
    pub fn load(&self) -> String {
        let Some(path) = &self.path else {
            return String::new();
        };
        read_entries(path)
            .and_then(|mut entries| entries.remove(LAST_URL_KEY))
            .unwrap_or_default()
    }

    /// Best-effort write.
    pub fn save(&self, url: &str) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = write_entry(path, url) {
            debug!(path = %path.display(), error = %e, "could not persist last url");
        }
    }
}

fn read_entries(path: &Path) -> Option<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(entries) => Some(entries),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring unreadable state file");
            None
        }
    }
}

fn write_entry(path: &Path, url: &str) -> anyhow::Result<()> {
    let mut entries = read_entries(path).unwrap_or_default();
    entries.insert(LAST_URL_KEY.to_string(), url.to_string());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&entries)?)?;
    Ok(())
}
