//! Create destination directories for tag sets that do not resolve yet.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itertools::Itertools;

use super::Session;
use super::status::Resolution;

/// All subsets of `tags`, largest first, ending with the empty subset.
///
/// Within one size, subsets follow the lexicographic order of tag positions.
pub fn tag_subsets<'a>(tags: &[&'a str]) -> impl Iterator<Item = Vec<&'a str>> {
    (0..=tags.len())
        .rev()
        .flat_map(move |size| tags.iter().copied().combinations(size))
}

impl Session {
    /// Create the destination directory for `tags` and return it.
    ///
    /// Without `intelligent`, the chain `root/tag1/.../tagN` is created in the given order.
    /// With `intelligent`, the most specific existing directory matching a subset of the tags
    /// is extended with the remaining tags instead.
    /// Creating an existing chain is not an error.
    ///
    /// # Errors
    /// Returns an error if the root is not set, a tag is not a valid directory name,
    /// or the directories cannot be created.
    pub fn create_new_path<S: AsRef<str>>(&self, tags: &[S], intelligent: bool) -> Result<PathBuf> {
        let path = self.plan_new_path(tags, intelligent)?;
        fs::create_dir_all(&path).with_context(|| format!("Failed to create directory: {}", path.display()))?;
        Ok(path)
    }

    /// Compute the directory `create_new_path` would create, without touching the file system.
    ///
    /// The intelligent search walks the tree once per tag subset,
    /// which is `2^n` walks for `n` tags. Fine for the handful of tags a file usually gets.
    ///
    /// # Errors
    /// Returns an error if the root is not set or a tag is not a valid directory name.
    pub fn plan_new_path<S: AsRef<str>>(&self, tags: &[S], intelligent: bool) -> Result<PathBuf> {
        if !self.root.is_dir() {
            anyhow::bail!("Root path is not set or does not exist: '{}'", self.root.display());
        }
        let tags = unique_tags(tags)?;

        // An already unambiguous tag set still gets the literal chain under root.
        if intelligent
            && !matches!(self.check_path(&tags), Resolution::Unambiguous(_))
            && let Some((base, remaining)) = self.best_partial_match(&tags)
        {
            return Ok(join_tags(&base, &remaining));
        }
        Ok(join_tags(&self.root, &tags))
    }

    /// Find the largest tag subset with an existing directory.
    /// Returns the shortest matching path and the tags it is missing, in their original order.
    fn best_partial_match<'a>(&self, tags: &[&'a str]) -> Option<(PathBuf, Vec<&'a str>)> {
        tag_subsets(tags).find_map(|subset| {
            let base = self
                .find_possible_paths(&subset)
                .into_iter()
                .min_by_key(|path| crate::path_to_string(path).chars().count())?;
            let remaining = tags.iter().copied().filter(|tag| !subset.contains(tag)).collect();
            Some((base, remaining))
        })
    }
}

/// Deduplicate tags keeping first occurrences, and check each is usable as a directory name.
fn unique_tags<S: AsRef<str>>(tags: &[S]) -> Result<Vec<&str>> {
    let tags: Vec<&str> = tags.iter().map(|tag| tag.as_ref()).unique().collect();
    for tag in &tags {
        if tag.is_empty() || *tag == "." || *tag == ".." || tag.contains(['/', '\\']) {
            anyhow::bail!("Invalid tag for a directory name: '{tag}'");
        }
    }
    Ok(tags)
}

fn join_tags(base: &Path, tags: &[&str]) -> PathBuf {
    tags.iter().fold(base.to_path_buf(), |path, tag| path.join(tag))
}
