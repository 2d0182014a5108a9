//! Directory listing for browsing the inventory.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A visible entry in a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub kind: EntryKind,
    pub path: PathBuf,
}

/// List the entries of `dir` sorted by name, skipping hidden ones.
///
/// # Errors
/// Returns an error if the directory does not exist or cannot be read.
pub fn list_files(dir: &Path) -> Result<Vec<FileEntry>> {
    if !dir.exists() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))? {
        let entry = entry?;
        if crate::is_hidden_name(&entry.file_name()) {
            continue;
        }
        let path = entry.path();
        let kind = if path.is_file() {
            EntryKind::File
        } else {
            EntryKind::Directory
        };
        entries.push(FileEntry {
            name: crate::os_str_to_string(&entry.file_name()),
            kind,
            path,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

impl Session {
    /// List `dir`, or the inventory when no directory is given.
    ///
    /// # Errors
    /// Returns an error if the directory does not exist or cannot be read.
    pub fn list_files(&self, dir: Option<&Path>) -> Result<Vec<FileEntry>> {
        list_files(dir.unwrap_or(&self.inventory))
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
        }
    }
}
