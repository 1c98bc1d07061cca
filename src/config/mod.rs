// SPDX-License-Identifier: MPL-2.0
//! Editor preferences, persisted to a `settings.toml` in the user's config
//! directory. These are the editor's own knobs (where the gdipp document
//! lives, which renderer binary to launch), not the gdipp settings
//! themselves.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Glyphtune";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the fixed gdipp document installation path.
    #[serde(default)]
    pub document_path: Option<PathBuf>,
    /// Overrides the preview renderer binary.
    #[serde(default)]
    pub renderer_path: Option<PathBuf>,
    /// Overrides the preview sample text.
    #[serde(default)]
    pub sample_text: Option<String>,
}

/// Platform location of the preferences file, `None` when the platform has
/// no config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_overrides() {
        let config = Config {
            document_path: Some(PathBuf::from("/tmp/gdipp_setting.xml")),
            renderer_path: Some(PathBuf::from("/usr/local/bin/glyphtune_preview")),
            sample_text: Some("Grumpy wizards".to_string()),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded.document_path, config.document_path);
        assert_eq!(loaded.renderer_path, config.renderer_path);
        assert_eq!(loaded.sample_text, config.sample_text);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.document_path.is_none());
    }
}
