//! tagsort - Sort files into a directory tree where directory names act as tags.
//!
//! Files arrive in a flat inventory directory.
//! Giving a file a set of tags moves it to the directory in the root tree
//! whose path contains all of those tags, optionally creating it.

mod config;
mod logger;
mod sorter;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::sorter::TagSort;

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Sort files into directories using directory names as tags"
)]
pub(crate) struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Print debug information
    #[arg(short = 'D', long, global = true)]
    debug: bool,

    /// Only print changes without moving, creating or trashing anything
    #[arg(short = 'p', long, global = true)]
    print: bool,

    /// Match tags against whole path segments instead of substrings
    #[arg(short = 's', long, global = true)]
    segments: bool,

    /// File for the saved inventory and root paths
    #[arg(long, value_hint = clap::ValueHint::FilePath, global = true, name = "FILE")]
    store: Option<PathBuf>,

    /// Generate shell completion
    #[arg(short = 'l', long, name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// List all tags in the root directory
    Tags,

    /// Suggest tags containing the given text
    Recommend {
        /// Text to search for, case-insensitive
        query: String,
    },

    /// Check which directory the given tags resolve to
    Check {
        /// Tags in any order
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// List every directory matching the given tags
    Find {
        /// Tags in any order
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Create the directory for the given tags
    New {
        /// Tags in the order used for new directories
        #[arg(required = true)]
        tags: Vec<String>,

        /// Extend the best existing partial match instead of creating under root
        #[arg(short = 'i', long)]
        intelligent: bool,
    },

    /// Move an inventory file to the directory for the given tags
    Move {
        /// File name in the inventory, or an absolute path
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Tags in any order
        #[arg(required = true)]
        tags: Vec<String>,

        /// New file name at the destination
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Create the destination if the tags do not resolve
        #[arg(short = 'c', long)]
        create: bool,

        /// Extend the best existing partial match when creating (implies --create)
        #[arg(short = 'i', long)]
        intelligent: bool,
    },

    /// Move a file to the trash
    Trash {
        /// File name in the inventory, or an absolute path
        #[arg(value_hint = clap::ValueHint::AnyPath)]
        path: PathBuf,
    },

    /// Show or set the inventory and root paths
    Paths {
        /// New inventory directory
        #[arg(short = 'i', long, requires = "root", value_hint = clap::ValueHint::DirPath)]
        inventory: Option<PathBuf>,

        /// New root directory
        #[arg(short = 'r', long, requires = "inventory", value_hint = clap::ValueHint::DirPath)]
        root: Option<PathBuf>,
    },

    /// List files in the inventory or the given directory
    Ls {
        /// Directory relative to the inventory, or an absolute path
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: Option<PathBuf>,
    },

    /// Open an inventory file with the default application
    Open {
        /// File name in the inventory
        file: String,
    },

    /// Print the parent directory without leaving the inventory
    Back {
        /// Current directory
        #[arg(value_hint = clap::ValueHint::DirPath)]
        dir: PathBuf,
    },

    /// Print the message for a status name such as DEST_NOT_EXIST
    Status {
        /// Status name
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();
    if let Some(ref shell) = args.completion {
        tag_sort::generate_shell_completion(*shell, Args::command(), true, env!("CARGO_BIN_NAME"))
    } else {
        let command = args.command.take();
        TagSort::new(&args)?.run(command)
    }
}

#[cfg(test)]
mod cli_args_tests {
    use super::*;

    #[test]
    fn parses_move_with_tags() {
        let args = Args::try_parse_from(["test", "move", "report.pdf", "2024", "Q1"]).expect("should parse");
        assert_eq!(
            args.command,
            Some(Command::Move {
                file: PathBuf::from("report.pdf"),
                tags: vec!["2024".to_string(), "Q1".to_string()],
                name: None,
                create: false,
                intelligent: false,
            })
        );
    }

    #[test]
    fn parses_move_options() {
        let args = Args::try_parse_from(["test", "move", "scan.jpg", "Receipts", "-n", "Groceries.jpg", "-ci"])
            .expect("should parse");
        let Some(Command::Move {
            name,
            create,
            intelligent,
            ..
        }) = args.command
        else {
            panic!("expected move command");
        };
        assert_eq!(name.as_deref(), Some("Groceries.jpg"));
        assert!(create);
        assert!(intelligent);
    }

    #[test]
    fn move_requires_tags() {
        assert!(Args::try_parse_from(["test", "move", "report.pdf"]).is_err());
        assert!(Args::try_parse_from(["test", "check"]).is_err());
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["test", "check", "2024", "-s", "-v", "-p"]).expect("should parse");
        assert!(args.segments);
        assert!(args.verbose);
        assert!(args.print);
    }

    #[test]
    fn paths_requires_both_directories() {
        assert!(Args::try_parse_from(["test", "paths", "--inventory", "/tmp/inbox"]).is_err());
        let args = Args::try_parse_from(["test", "paths", "-i", "/tmp/inbox", "-r", "/tmp/archive"])
            .expect("should parse");
        assert_eq!(
            args.command,
            Some(Command::Paths {
                inventory: Some(PathBuf::from("/tmp/inbox")),
                root: Some(PathBuf::from("/tmp/archive")),
            })
        );
    }

    #[test]
    fn parses_store_override() {
        let args = Args::try_parse_from(["test", "--store", "/tmp/paths.toml", "tags"]).expect("should parse");
        assert_eq!(args.store, Some(PathBuf::from("/tmp/paths.toml")));
        assert_eq!(args.command, Some(Command::Tags));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let args = Args::try_parse_from(["test"]).expect("should parse");
        assert!(args.command.is_none());
    }
}
