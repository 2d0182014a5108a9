//! Move inventory files into their tag destination.

use std::fs;
use std::path::{Path, PathBuf};

use super::Session;
use super::status::{AmbiguityReason, PathStatus, Resolution};

/// Status of a move and the destination directory it targeted, if one was determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub status: PathStatus,
    pub destination: Option<PathBuf>,
}

impl MoveOutcome {
    const fn new(status: PathStatus, destination: Option<PathBuf>) -> Self {
        Self { status, destination }
    }

    const fn without_destination(status: PathStatus) -> Self {
        Self::new(status, None)
    }
}

impl Session {
    /// Move `file_name` from the inventory into the directory for `tags`, naming it `new_name`.
    ///
    /// With `create_new`, a missing destination is created with [`Session::create_new_path`].
    /// Otherwise the tags must resolve to exactly one existing directory.
    /// An existing file at the destination is never overwritten.
    /// Failures are reported in the returned status, at most one file is moved.
    pub fn move_file<S: AsRef<str>>(
        &self,
        new_name: &str,
        file_name: &Path,
        tags: &[S],
        create_new: bool,
        intelligent: bool,
    ) -> MoveOutcome {
        if tags.is_empty() {
            return MoveOutcome::without_destination(PathStatus::DestNotClear(AmbiguityReason::NoTags));
        }

        let destination = if create_new {
            match self.create_new_path(tags, intelligent) {
                Ok(path) => path,
                Err(error) => return MoveOutcome::without_destination(PathStatus::Error(format!("{error:#}"))),
            }
        } else {
            match self.check_path(tags) {
                Resolution::Unambiguous(path) => path,
                resolution => return MoveOutcome::without_destination(resolution.status()),
            }
        };

        // An absolute file name replaces the inventory in the join.
        let source = self.inventory.join(file_name);
        let status = move_file_to_destination(new_name, &source, &destination);
        MoveOutcome::new(status, Some(destination))
    }
}

/// Check that `name` is a plain file name without directory components.
#[must_use]
pub fn is_valid_file_name(name: &str) -> bool {
    !name.is_empty() && Path::new(name).file_name().is_some_and(|file_name| file_name == name)
}

fn move_file_to_destination(new_name: &str, source: &Path, destination_dir: &Path) -> PathStatus {
    if !is_valid_file_name(new_name) {
        return PathStatus::Error(format!("Invalid file name: '{new_name}'"));
    }
    let destination_file = destination_dir.join(new_name);
    if destination_file.exists() {
        return PathStatus::FileAlreadyExists;
    }
    match fs::rename(source, &destination_file) {
        Ok(()) => PathStatus::Successful,
        Err(error) => PathStatus::Error(format!(
            "Failed to move {} to {}: {error}",
            source.display(),
            destination_file.display()
        )),
    }
}
