//! Tag-based file sorting.
//!
//! A flat inventory directory holds incoming files,
//! and a root directory holds a tree of nested directories whose names act as tags.
//! This module resolves an unordered set of tags to a destination directory in the root tree,
//! creates missing destinations, and moves or trashes inventory files.
//! The directory tree itself is the index: the tag set is always a recomputed snapshot.

mod builder;
mod index;
mod listing;
mod opener;
mod relocate;
mod resolve;
mod session;
mod status;
mod store;
mod trash;

#[cfg(test)]
mod test_fixtures;

pub use builder::tag_subsets;
pub use index::collect_tags;
pub use listing::{EntryKind, FileEntry, list_files};
pub use relocate::{MoveOutcome, is_valid_file_name};
pub use resolve::{MatchMode, find_possible_paths};
pub use session::{Session, SetPathsReport};
pub use status::{AmbiguityReason, PathStatus, Resolution, STATUS_NAMES, status_message};
pub use store::{PathsStore, StoredPaths};
pub use trash::move_to_trash;
