//! Session state: the inventory and root paths and the tag index derived from the root.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::index::collect_tags;
use super::resolve::MatchMode;
use super::store::{PathsStore, StoredPaths};

/// Inventory and root paths with the tag index of the root tree.
///
/// Queries borrow the session immutably,
/// path assignment and tag refresh need exclusive access.
#[derive(Debug, Default)]
pub struct Session {
    pub(super) inventory: PathBuf,
    pub(super) root: PathBuf,
    pub(super) tags: BTreeSet<String>,
    pub(super) match_mode: MatchMode,
    store: Option<PathsStore>,
}

/// Outcome of assigning new inventory and root paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPathsReport {
    pub success: bool,
    pub inventory_ok: bool,
    pub root_ok: bool,
    pub messages: Vec<String>,
}

impl Session {
    /// Create a session for the given paths without persistence.
    pub fn new(inventory: impl AsRef<Path>, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let tags = collect_tags(&root);
        Self {
            inventory: inventory.as_ref().to_path_buf(),
            root,
            tags,
            match_mode: MatchMode::default(),
            store: None,
        }
    }

    /// Create a session from the paths saved in `store`.
    /// Later successful path assignments are written back to it.
    #[must_use]
    pub fn from_store(store: PathsStore) -> Self {
        let StoredPaths {
            inventory_path,
            root_path,
        } = store.load();
        Self {
            store: Some(store),
            ..Self::new(inventory_path, root_path)
        }
    }

    #[must_use]
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    #[must_use]
    pub fn inventory(&self) -> &Path {
        &self.inventory
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Tag index snapshot from the last root assignment or refresh.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    #[must_use]
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    #[must_use]
    pub const fn store(&self) -> Option<&PathsStore> {
        self.store.as_ref()
    }

    /// Assign new inventory and root paths.
    ///
    /// Both paths are checked first and each missing path is reported separately.
    /// Nothing changes unless both exist; then the tag index is rebuilt and the paths are saved.
    pub fn set_paths(&mut self, inventory: &Path, root: &Path) -> SetPathsReport {
        let mut messages = Vec::new();

        let new_inventory = existing_path(inventory);
        if new_inventory.is_none() {
            messages.push(format!(
                "The specified inventory path does not exist: {}",
                inventory.display()
            ));
        }
        let new_root = existing_path(root);
        if new_root.is_none() {
            messages.push(format!("The specified root path does not exist: {}", root.display()));
        }

        let inventory_ok = new_inventory.is_some();
        let root_ok = new_root.is_some();
        let (Some(new_inventory), Some(new_root)) = (new_inventory, new_root) else {
            return SetPathsReport {
                success: false,
                inventory_ok,
                root_ok,
                messages,
            };
        };

        self.inventory = new_inventory;
        self.root = new_root;
        self.refresh_tags();
        messages.push(format!("Inventory path set successfully: {}", self.inventory.display()));
        messages.push(format!("Root path set successfully: {}", self.root.display()));

        let mut success = true;
        if let Some(store) = &self.store {
            let paths = StoredPaths {
                inventory_path: crate::path_to_string(&self.inventory),
                root_path: crate::path_to_string(&self.root),
            };
            if let Err(error) = store.save(&paths) {
                success = false;
                messages.push(format!("{error:#}"));
            }
        }

        SetPathsReport {
            success,
            inventory_ok,
            root_ok,
            messages,
        }
    }

    /// Parent of `current_dir`, never leaving the inventory directory.
    ///
    /// `.` and `..` components are resolved before the comparison.
    /// Directories outside the inventory go back to the inventory itself.
    #[must_use]
    pub fn go_one_dir_back(&self, current_dir: &Path) -> PathBuf {
        let inventory = normalize_lexically(&self.inventory);
        let current = normalize_lexically(current_dir);
        if inventory.as_os_str().is_empty() || !current.starts_with(&inventory) {
            return self.inventory.clone();
        }
        match current.parent() {
            Some(parent) if parent.starts_with(&inventory) => parent.to_path_buf(),
            _ => self.inventory.clone(),
        }
    }
}

/// Resolve `.` and `..` components without touching the file system.
///
/// `..` at the file system root stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

/// Absolute form of an existing path, or `None` if it does not exist.
fn existing_path(path: &Path) -> Option<PathBuf> {
    if path.as_os_str().is_empty() || !path.exists() {
        return None;
    }
    // Canonicalize fails for network drives on Windows :(
    Some(dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inventory: {}", self.inventory.display())?;
        writeln!(f, "Root:      {}", self.root.display())?;
        write!(f, "Tags:      {}", self.tags.len())
    }
}
