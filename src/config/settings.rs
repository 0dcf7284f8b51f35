//! User settings for Guyun
//!
//! This module handles user-configurable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::QuizConfig;
use crate::stores::DEFAULT_FAVORITES_KEY;

/// User settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Quiz shape
    #[serde(default)]
    pub quiz: QuizConfig,

    /// Storage key for the favorites payload
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,

    /// External catalog file, the bundled catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Fixed seed for the recommendation panel, random when unset
    #[serde(default)]
    pub recommendation_seed: Option<u64>,
}

fn default_favorites_key() -> String {
    DEFAULT_FAVORITES_KEY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quiz: QuizConfig::default(),
            favorites_key: default_favorites_key(),
            catalog_path: None,
            recommendation_seed: None,
        }
    }
}

impl Settings {
    /// Load settings from `path`, writing defaults when the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read settings file")?;
            let settings: Settings =
                serde_json::from_str(&content).context("Failed to parse settings file")?;
            Ok(settings)
        } else {
            let settings = Self::default();
            settings.save(path)?;
            Ok(settings)
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content).context("Failed to write settings file")?;

        Ok(())
    }

    /// Update a setting value and save
    pub fn update<F>(&mut self, path: &Path, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self),
    {
        f(self);
        self.save(path)
    }
}
