use std::io;
use std::path::Path;
use std::process::Command;

use super::Session;

impl Session {
    /// Open an inventory file with the default application and describe the result.
    #[must_use]
    pub fn open_file(&self, file_name: &str) -> String {
        let file_path = self.inventory.join(file_name);
        if !file_path.is_file() {
            return format!("File does not exist: {file_name}");
        }
        match open_with_default_app(&file_path) {
            Ok(()) => format!("Opened file: {file_name}"),
            Err(error) => format!("Error opening file: {error}"),
        }
    }
}

fn open_with_default_app(path: &Path) -> io::Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    };
    let status = command.arg(path).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("opener exited with {status}")))
    }
}
