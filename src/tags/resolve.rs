//! Resolve a tag set to directories in the root tree.

use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

use super::Session;
use super::status::{AmbiguityReason, Resolution};

/// How requested tags are matched against a candidate directory path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Every tag must occur somewhere in the full path string.
    /// A tag that is part of an unrelated directory name also counts,
    /// so `Q1` matches inside `/data/Q1-archive/2024`.
    #[default]
    Substring,
    /// Every tag must equal the root name or one of the path segments below the root.
    Segment,
}

/// Find all directories under `root` whose name is one of `tags`
/// and whose path contains every tag.
///
/// Paths are returned in tree-walk order.
pub fn find_possible_paths<S: AsRef<str>>(root: &Path, tags: &[S], mode: MatchMode) -> Vec<PathBuf> {
    if tags.is_empty() || root.as_os_str().is_empty() {
        return Vec::new();
    }
    let tags: Vec<String> = tags.iter().map(|tag| tag.as_ref().nfc().collect()).collect();

    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| {
            crate::normalized_file_name(entry.path()).is_some_and(|name| tags.contains(&name))
                && contains_all_tags(root, entry.path(), &tags, mode)
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

fn contains_all_tags(root: &Path, path: &Path, tags: &[String], mode: MatchMode) -> bool {
    match mode {
        MatchMode::Substring => {
            let path_string = crate::path_to_normalized_string(path);
            tags.iter().all(|tag| path_string.contains(tag.as_str()))
        }
        MatchMode::Segment => {
            let relative = path.strip_prefix(root).unwrap_or(path);
            let segments: Vec<String> = crate::normalized_file_name(root)
                .into_iter()
                .chain(
                    relative
                        .components()
                        .filter_map(|component| crate::normalized_file_name(Path::new(component.as_os_str()))),
                )
                .collect();
            tags.iter().all(|tag| segments.contains(tag))
        }
    }
}

impl Session {
    /// Find candidate directories for the given tags in the current root.
    #[must_use]
    pub fn find_possible_paths<S: AsRef<str>>(&self, tags: &[S]) -> Vec<PathBuf> {
        find_possible_paths(&self.root, tags, self.match_mode)
    }

    /// Classify the given tags as resolving to exactly one, none, or several directories.
    ///
    /// Always reads the live tree.
    #[must_use]
    pub fn check_path<S: AsRef<str>>(&self, tags: &[S]) -> Resolution {
        if tags.is_empty() {
            return Resolution::Ambiguous(AmbiguityReason::NoTags);
        }
        let mut paths = self.find_possible_paths(tags);
        match paths.len() {
            0 => Resolution::NotFound,
            1 => Resolution::Unambiguous(paths.remove(0)),
            count => Resolution::Ambiguous(AmbiguityReason::MultipleMatches(count)),
        }
    }
}
