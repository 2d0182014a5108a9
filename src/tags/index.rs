//! Tag index: the set of all directory names in the root tree.

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use super::Session;

/// Walk the whole tree under `root` and collect the name of every directory, including `root` itself.
///
/// A missing root gives an empty set.
/// Unreadable entries are skipped.
#[must_use]
pub fn collect_tags(root: &Path) -> BTreeSet<String> {
    if root.as_os_str().is_empty() {
        return BTreeSet::new();
    }
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| crate::normalized_file_name(entry.path()))
        .collect()
}

impl Session {
    /// Recompute the tag index from the current root tree.
    pub fn refresh_tags(&mut self) -> &BTreeSet<String> {
        self.tags = collect_tags(&self.root);
        &self.tags
    }

    /// Tags containing `query`, ignoring case, in index order.
    #[must_use]
    pub fn recommend_tags(&self, query: &str) -> Vec<String> {
        let query = query.to_lowercase();
        self.tags
            .iter()
            .filter(|tag| tag.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }
}
