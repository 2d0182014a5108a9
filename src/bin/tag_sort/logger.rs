use std::fs;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;

use tag_sort::tags::{MoveOutcome, PathStatus, Session, SetPathsReport};

use crate::config::Config;

/// Simple file logger for sorting operations with buffered writes
pub struct FileLogger {
    writer: BufWriter<File>,
}

impl FileLogger {
    /// Create a new file logger, appending to ~/logs/tag-sort/tag_sort_<date>.log
    pub(crate) fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Failed to get home directory")?;
        let log_dir = home_dir.join("logs").join("tag-sort");

        if !log_dir.exists() {
            fs::create_dir_all(&log_dir).context("Failed to create log directory")?;
        }

        let log_path = log_dir.join(format!("tag_sort_{}.log", Local::now().format("%Y-%m-%d")));
        Self::open(&log_path)
    }

    fn open(log_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;

        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    fn timestamp() -> String {
        Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Log when starting the program
    pub(crate) fn log_init(&mut self, command: &str, session: &Session, config: &Config) {
        let _ = writeln!(self.writer, "[{}] INIT {command}", Self::timestamp());
        let _ = writeln!(self.writer, "  inventory: \"{}\"", session.inventory().display());
        let _ = writeln!(self.writer, "  root: \"{}\"", session.root().display());
        let _ = writeln!(self.writer, "  tags: {}", session.tags().len());
        let _ = writeln!(self.writer, "  match_mode: {:?}", config.match_mode);
        let _ = writeln!(self.writer, "  dryrun: {}", config.dryrun);
        let _ = self.writer.flush();
    }

    /// Log the result of a move
    pub(crate) fn log_move(&mut self, source: &Path, new_name: &str, outcome: &MoveOutcome) {
        let destination = outcome
            .destination
            .as_ref()
            .map_or_else(|| "-".to_string(), |path| path.join(new_name).display().to_string());
        let _ = writeln!(
            self.writer,
            "[{}] MOVE    \"{}\" -> \"{}\" | {}",
            Self::timestamp(),
            source.display(),
            destination,
            outcome.status
        );
        let _ = self.writer.flush();
    }

    /// Log a created destination directory
    pub(crate) fn log_create(&mut self, path: &Path) {
        let _ = writeln!(self.writer, "[{}] CREATE  \"{}\"", Self::timestamp(), path.display());
        let _ = self.writer.flush();
    }

    /// Log the result of moving a file to the trash
    pub(crate) fn log_trash(&mut self, path: &Path, status: &PathStatus) {
        let _ = writeln!(
            self.writer,
            "[{}] TRASH   \"{}\" | {status}",
            Self::timestamp(),
            path.display()
        );
        let _ = self.writer.flush();
    }

    /// Log a path assignment
    pub(crate) fn log_paths(&mut self, report: &SetPathsReport) {
        let result = if report.success { "OK" } else { "FAILED" };
        let _ = writeln!(self.writer, "[{}] PATHS   {result}", Self::timestamp());
        for message in &report.messages {
            let _ = writeln!(self.writer, "  {message}");
        }
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod logger_tests {
    use super::*;

    use std::path::PathBuf;

    use tag_sort::tags::AmbiguityReason;

    fn read_log(logger: FileLogger, path: &Path) -> String {
        drop(logger);
        fs::read_to_string(path).expect("Failed to read log")
    }

    #[test]
    fn writes_move_and_trash_lines() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let log_path = dir.path().join("test.log");
        let mut logger = FileLogger::open(&log_path).expect("Failed to open log");

        logger.log_move(
            Path::new("/inbox/report.pdf"),
            "report.pdf",
            &MoveOutcome {
                status: PathStatus::Successful,
                destination: Some(PathBuf::from("/archive/2024/Q1")),
            },
        );
        logger.log_move(
            Path::new("/inbox/scan.jpg"),
            "scan.jpg",
            &MoveOutcome {
                status: PathStatus::DestNotClear(AmbiguityReason::MultipleMatches(2)),
                destination: None,
            },
        );
        logger.log_trash(Path::new("/inbox/old.txt"), &PathStatus::Successful);

        let content = read_log(logger, &log_path);
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("MOVE"));
        assert!(lines[0].ends_with("\"/inbox/report.pdf\" -> \"/archive/2024/Q1/report.pdf\" | SUCCESSFUL"));
        assert!(lines[1].ends_with("\"/inbox/scan.jpg\" -> - | DEST_NOT_CLEAR (2 matching directories)"));
        assert!(lines[2].contains("TRASH"));
    }

    #[test]
    fn appends_to_existing_log() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let log_path = dir.path().join("test.log");
        fs::write(&log_path, "earlier\n").expect("Failed to write");

        let mut logger = FileLogger::open(&log_path).expect("Failed to open log");
        logger.log_create(Path::new("/archive/2024/Q2"));

        let content = read_log(logger, &log_path);
        assert!(content.starts_with("earlier\n"));
        assert!(content.contains("CREATE  \"/archive/2024/Q2\""));
    }

    #[test]
    fn writes_paths_report_messages() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let log_path = dir.path().join("test.log");
        let mut logger = FileLogger::open(&log_path).expect("Failed to open log");
        logger.log_paths(&SetPathsReport {
            success: false,
            inventory_ok: true,
            root_ok: false,
            messages: vec!["The specified root path does not exist: /missing".to_string()],
        });

        let content = read_log(logger, &log_path);
        assert!(content.contains("PATHS   FAILED"));
        assert!(content.contains("  The specified root path does not exist: /missing"));
    }
}
