//! Persisted inventory and root paths.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::print_warning;

/// Paths as saved on disk. Missing keys default to empty strings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPaths {
    #[serde(default)]
    pub inventory_path: String,
    #[serde(default)]
    pub root_path: String,
}

/// TOML file holding the last successfully assigned paths.
#[derive(Debug, Clone)]
pub struct PathsStore {
    path: PathBuf,
}

impl StoredPaths {
    /// Parse stored paths from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<Self>(toml_str).map_err(|e| anyhow::anyhow!("Failed to parse paths: {e}"))
    }
}

impl PathsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the default location under the user config directory.
    #[must_use]
    pub fn default_location() -> Option<Self> {
        crate::config::PATHS_PATH.as_deref().map(Self::new)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored paths.
    /// A missing or unreadable file falls back to empty paths.
    #[must_use]
    pub fn load(&self) -> StoredPaths {
        match fs::read_to_string(&self.path) {
            Ok(content) => StoredPaths::from_toml_str(&content).unwrap_or_else(|error| {
                print_warning!("Ignoring paths file {}: {error}", self.path.display());
                StoredPaths::default()
            }),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => StoredPaths::default(),
            Err(error) => {
                print_warning!("Failed to read paths file {}: {error}", self.path.display());
                StoredPaths::default()
            }
        }
    }

    /// Write the given paths, creating the parent directory if needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, paths: &StoredPaths) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = toml::to_string(paths).context("Failed to serialize paths")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write paths file: {}", self.path.display()))
    }
}
