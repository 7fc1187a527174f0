use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::machine::{DEFAULT_HIGHLIGHT_DELAY, MachineConfig};
use crate::navigate::SearchEngine;
use crate::storage::APP_DIR_NAME;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub search: Option<SearchConfig>,
    pub storage: Option<StorageConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub base_url: Option<String>,
    pub highlight_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub fps: Option<u32>,
}

impl ConfigFile {
    pub fn base_url(&self) -> Option<&str> {
        self.search.as_ref().and_then(|s| s.base_url.as_deref())
    }

    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage
            .as_ref()
            .and_then(|s| s.data_dir.as_ref())
            .map(PathBuf::from)
    }

    pub fn theme(&self) -> Option<&str> {
        self.display.as_ref().and_then(|d| d.theme.as_deref())
    }

    pub fn fps(&self) -> Option<u32> {
        self.display.as_ref().and_then(|d| d.fps)
    }

    /// State machine settings, falling back to defaults for unset fields.
    pub fn machine_config(&self) -> MachineConfig {
        let search = self.search.clone().unwrap_or_default();
        MachineConfig {
            engine: search
                .base_url
                .map(SearchEngine::new)
                .unwrap_or_default(),
            highlight_delay: search
                .highlight_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_HIGHLIGHT_DELAY),
        }
    }
}

/// Platform config directory path: `<config_dir>/scholar-queue/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
}

/// Load config by cascading CWD `.scholar-queue.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".scholar-queue.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        search: Some(SearchConfig {
            base_url: overlay
                .search
                .as_ref()
                .and_then(|s| s.base_url.clone())
                .or_else(|| base.search.as_ref().and_then(|s| s.base_url.clone())),
            highlight_delay_ms: overlay
                .search
                .as_ref()
                .and_then(|s| s.highlight_delay_ms)
                .or_else(|| base.search.as_ref().and_then(|s| s.highlight_delay_ms)),
        }),
        storage: Some(StorageConfig {
            data_dir: overlay
                .storage
                .as_ref()
                .and_then(|s| s.data_dir.clone())
                .or_else(|| base.storage.as_ref().and_then(|s| s.data_dir.clone())),
        }),
        display: Some(DisplayConfig {
            theme: overlay
                .display
                .as_ref()
                .and_then(|d| d.theme.clone())
                .or_else(|| base.display.as_ref().and_then(|d| d.theme.clone())),
            fps: overlay
                .display
                .as_ref()
                .and_then(|d| d.fps)
                .or_else(|| base.display.as_ref().and_then(|d| d.fps)),
        }),
    }
}
