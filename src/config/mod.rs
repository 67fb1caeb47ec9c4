// SPDX-License-Identifier: MPL-2.0
//! This module handles the viewer's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use lightbox_gallery::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.language = Some("fr".to_string());
//!
//! // Save to and reload from a specific path
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.language, Some("fr".to_string()));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::domain::ui::FadeDuration;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "LightboxGallery";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    #[serde(default)]
    pub fade_duration_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            fade_duration_ms: Some(defaults::DEFAULT_FADE_DURATION_MS),
        }
    }
}

impl Config {
    /// Fade duration to use, falling back to the default when unset.
    #[must_use]
    pub fn fade_duration(&self) -> FadeDuration {
        self.fade_duration_ms
            .map(FadeDuration::from_millis)
            .unwrap_or_default()
    }
}

/// Resolved viewer settings: the markup contract plus user-tunable timing.
#[derive(Debug, Clone, PartialEq)]
pub struct LightboxSettings {
    pub overlay_id: String,
    pub toolbar_id: String,
    pub gallery_class: String,
    pub image_class: String,
    pub alt_prefix: String,
    pub fade: FadeDuration,
}

impl Default for LightboxSettings {
    fn default() -> Self {
        Self {
            overlay_id: defaults::OVERLAY_ID.to_string(),
            toolbar_id: defaults::TOOLBAR_ID.to_string(),
            gallery_class: defaults::GALLERY_CLASS.to_string(),
            image_class: defaults::IMAGE_CLASS.to_string(),
            alt_prefix: defaults::ALT_PREFIX.to_string(),
            fade: FadeDuration::default(),
        }
    }
}

impl From<&Config> for LightboxSettings {
    fn from(config: &Config) -> Self {
        Self {
            fade: config.fade_duration(),
            ..Self::default()
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring invalid settings file");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
