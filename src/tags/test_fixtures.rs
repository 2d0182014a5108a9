//! Temporary inventory and root trees for tests.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use super::Session;

static TREE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A temporary directory with `inventory` and `root` subdirectories.
///
/// Substring matching looks at the full path, including the system temp prefix.
/// Tags in substring-mode tests always contain a digit or an uppercase letter (`2024`, `Q1`, `Docs`, `A`),
/// so the base name only uses lowercase letters
/// and the temp prefix must not contain digits or uppercase letters either.
/// Otherwise `/tmp` is used, as on macOS where the default temp dir is under `/var/folders/..`.
pub struct TestTree {
    base: PathBuf,
    pub inventory: PathBuf,
    pub root: PathBuf,
}

impl TestTree {
    pub fn new() -> Self {
        let base = tag_free_temp_dir().join(unique_dir_name());
        if base.exists() {
            fs::remove_dir_all(&base).expect("Failed to remove stale test dir");
        }
        fs::create_dir_all(&base).expect("Failed to create test dir");
        // Canonical paths so comparisons hold where the temp dir is behind a symlink.
        let base = dunce::canonicalize(&base).expect("Failed to canonicalize test dir");
        let inventory = base.join("inventory");
        let root = base.join("root");
        fs::create_dir_all(&inventory).expect("Failed to create inventory");
        fs::create_dir_all(&root).expect("Failed to create root");
        Self { base, inventory, root }
    }

    /// Create the given slash-separated directory chains under the root.
    pub fn with_dirs(self, dirs: &[&str]) -> Self {
        for dir in dirs {
            fs::create_dir_all(self.root.join(dir)).expect("Failed to create directory");
        }
        self
    }

    /// Create an empty file in the inventory and return its path.
    pub fn add_inventory_file(&self, name: &str) -> PathBuf {
        let path = self.inventory.join(name);
        File::create(&path).expect("Failed to create test file");
        path
    }

    /// Absolute path of a slash-separated chain under the root.
    pub fn root_path(&self, relative: &str) -> PathBuf {
        relative.split('/').fold(self.root.clone(), |path, part| path.join(part))
    }

    pub fn session(&self) -> Session {
        Session::new(&self.inventory, &self.root)
    }
}

impl Drop for TestTree {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.base);
    }
}

/// System temp dir, or `/tmp` if the former can match test tags.
fn tag_free_temp_dir() -> PathBuf {
    let temp_dir = std::env::temp_dir();
    if is_tag_free(&temp_dir) {
        return temp_dir;
    }
    let fallback = PathBuf::from("/tmp");
    assert!(
        fallback.is_dir() && is_tag_free(&fallback),
        "Temp dir {} contains digits or uppercase letters that can match test tags",
        temp_dir.display()
    );
    fallback
}

/// True if the path has no characters that can occur in test tags.
pub fn is_tag_free(path: &Path) -> bool {
    !crate::path_to_string(path)
        .chars()
        .any(|c| c.is_ascii_digit() || c.is_uppercase())
}

/// Process id and a running counter spelled with the letters `a` to `z`.
fn unique_dir_name() -> String {
    let mut value = (u64::from(std::process::id()) << 24) | TREE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = String::from("tagsort-");
    loop {
        name.push(char::from(b'a' + (value % 26) as u8));
        value /= 26;
        if value == 0 {
            break;
        }
    }
    name
}

/// Helper to create a file with the given name.
pub fn create_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).expect("Failed to create test file");
    path
}

#[cfg(test)]
mod test_fixtures_tests {
    use super::*;

    #[test]
    fn base_name_has_only_lowercase_letters() {
        let tree = TestTree::new();
        assert!(is_tag_free(&tree.root), "{}", tree.root.display());
    }

    #[test]
    fn tag_free_rejects_digits_and_uppercase() {
        assert!(is_tag_free(Path::new("/tmp/tagsort-abc/root")));
        assert!(!is_tag_free(Path::new("/var/folders/x7/T/tagsort-abc")));
        assert!(!is_tag_free(Path::new("/tmp/Q")));
    }
}
