//! Path management for Guyun
//!
//! This module manages the filesystem locations used by the application.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static PATHS: OnceCell<Arc<Paths>> = OnceCell::new();

/// Manages all filesystem paths for the application
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root data directory
    data_dir: PathBuf,
}

impl Paths {
    /// Initialize the paths singleton
    pub fn init(data_dir: Option<PathBuf>) -> Result<Arc<Paths>> {
        let paths = PATHS.get_or_try_init(|| {
            let paths = Self::new(data_dir)?;
            Ok::<_, anyhow::Error>(Arc::new(paths))
        })?;
        Ok(Arc::clone(paths))
    }

    /// Get the global paths instance
    pub fn get() -> Result<Arc<Paths>> {
        PATHS.get().map(Arc::clone).context("Paths not initialized")
    }

    /// Resolve and create the directory layout without touching the singleton
    pub fn new(data_override: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_override {
            Some(path) => path,
            None => directories::ProjectDirs::from("", "", "guyun")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".guyun")),
        };

        let paths = Self { data_dir };
        paths.create_directories()?;

        Ok(paths)
    }

    fn create_directories(&self) -> Result<()> {
        std::fs::create_dir_all(self.storage_dir()).with_context(|| {
            format!("Failed to create data directory {:?}", self.data_dir)
        })?;
        Ok(())
    }

    /// Get the data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.json")
    }

    /// Get the key-value storage directory
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_creation() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("guyun");

        // Note: Can't use init() in tests due to OnceCell
        let paths = Paths::new(Some(root.clone())).unwrap();

        assert_eq!(paths.data_dir(), root.as_path());
        assert!(paths.storage_dir().exists());
        assert_eq!(paths.settings_path(), root.join("settings.json"));
    }
}
