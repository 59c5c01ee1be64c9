//! Gameplay settings on disk
//!
//! Settings live in `~/.config/strider/gameplay.toml` unless a path is given.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use strider_game::GameplayConfig;
use tracing::{info, warn};

/// Get the config directory path
fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("strider"))
}

/// Default settings file path
pub fn default_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("gameplay.toml"))
}

/// Load settings from `path` (or the default location), falling back to defaults
pub fn load(path: Option<&Path>) -> GameplayConfig {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let Some(path) = default_path() else {
                warn!("Could not determine config directory, using defaults");
                return GameplayConfig::default();
            };
            if !path.exists() {
                info!("No settings file found, using defaults");
                return GameplayConfig::default();
            }
            path
        }
    };

    match GameplayConfig::load(&path) {
        Ok(config) => {
            info!("Loaded settings from {:?}", path);
            config
        }
        Err(e) => {
            warn!("{}, using defaults", e);
            GameplayConfig::default()
        }
    }
}

/// Write `config` to `path`, creating parent directories as needed
pub fn save(config: &GameplayConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
    }

    let content = config.to_toml_string()?;
    fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("Saved settings to {:?}", path);
    Ok(())
}
