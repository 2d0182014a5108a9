//! Status kinds shared by resolution, relocation and trash operations.

use std::fmt;
use std::path::PathBuf;

/// Why a tag set could not be resolved to a single destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityReason {
    /// No tags were given.
    NoTags,
    /// The tags matched this many directories.
    MultipleMatches(usize),
}

/// Result of resolving a tag set against the root tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one directory matched.
    Unambiguous(PathBuf),
    /// No directory matched.
    NotFound,
    /// Zero tags, or more than one directory matched.
    Ambiguous(AmbiguityReason),
}

/// Operation status, also used as the user-facing status name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStatus {
    Successful,
    DestNotClear(AmbiguityReason),
    DestNotExist,
    FileAlreadyExists,
    Error(String),
    DestClear,
}

/// All status names in declaration order.
pub const STATUS_NAMES: [&str; 6] = [
    "SUCCESSFUL",
    "DEST_NOT_CLEAR",
    "DEST_NOT_EXIST",
    "FILE_ALREADY_EXISTS",
    "ERROR",
    "DEST_CLEAR",
];

const UNKNOWN_STATUS_MESSAGE: &str = "Unknown status. Please check the input.";

/// Look up the human-readable message for a status name such as `DEST_NOT_EXIST`.
///
/// Unknown names return a generic message instead of failing.
#[must_use]
pub fn status_message(name: &str) -> &'static str {
    match name {
        "SUCCESSFUL" => "Successfully moved to: ",
        "DEST_NOT_CLEAR" => {
            "The destination is ambiguous or not clearly defined. \
             Please refine your tag selection or select 'new'."
        }
        "DEST_NOT_EXIST" => "The specified destination does not exist. Would you like to create it? Select 'new'",
        "FILE_ALREADY_EXISTS" => {
            "A file with the same name already exists at the destination. Change the name to proceed!"
        }
        "ERROR" => "An unexpected error occurred.",
        "DEST_CLEAR" => "The destination is clear and ready for the operation.",
        _ => UNKNOWN_STATUS_MESSAGE,
    }
}

impl Resolution {
    /// Returns the destination path for an unambiguous resolution.
    #[must_use]
    pub const fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Unambiguous(path) => Some(path),
            Self::NotFound | Self::Ambiguous(_) => None,
        }
    }

    /// Map to the corresponding status kind.
    #[must_use]
    pub const fn status(&self) -> PathStatus {
        match self {
            Self::Unambiguous(_) => PathStatus::DestClear,
            Self::NotFound => PathStatus::DestNotExist,
            Self::Ambiguous(reason) => PathStatus::DestNotClear(*reason),
        }
    }
}

impl PathStatus {
    /// Status name used in messages and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Successful => STATUS_NAMES[0],
            Self::DestNotClear(_) => STATUS_NAMES[1],
            Self::DestNotExist => STATUS_NAMES[2],
            Self::FileAlreadyExists => STATUS_NAMES[3],
            Self::Error(_) => STATUS_NAMES[4],
            Self::DestClear => STATUS_NAMES[5],
        }
    }

    /// Human-readable message for this status.
    #[must_use]
    pub fn message(&self) -> &'static str {
        status_message(self.name())
    }

    #[must_use]
    pub const fn is_successful(&self) -> bool {
        matches!(self, Self::Successful)
    }
}

impl fmt::Display for AmbiguityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTags => write!(f, "no tags given"),
            Self::MultipleMatches(count) => write!(f, "{count} matching directories"),
        }
    }
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DestNotClear(reason) => write!(f, "{} ({reason})", self.name()),
            Self::Error(message) if !message.is_empty() => write!(f, "{}: {message}", self.name()),
            _ => write!(f, "{}", self.name()),
        }
    }
}
