use std::path::Path;

use super::status::PathStatus;

/// Move a file or directory to the platform trash instead of deleting it permanently.
///
/// A missing path is reported as an error and nothing is touched.
pub fn move_to_trash(path: &Path) -> (PathStatus, String) {
    if !path.exists() {
        return (
            PathStatus::Error(String::from("file not found")),
            format!("File not found: {}", path.display()),
        );
    }
    match trash::delete(path) {
        Ok(()) => (
            PathStatus::Successful,
            format!("File successfully moved to trash: {}", path.display()),
        ),
        Err(error) => (PathStatus::Error(error.to_string()), format!("An error occurred: {error}")),
    }
}
