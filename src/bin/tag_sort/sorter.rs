use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use tag_sort::tags::{
    EntryKind, PathStatus, PathsStore, Resolution, STATUS_NAMES, Session, is_valid_file_name, move_to_trash,
    status_message,
};
use tag_sort::{get_relative_path_or_filename, path_to_filename_string, print_bold, print_error, print_warning};

use crate::config::Config;
use crate::logger::FileLogger;
use crate::{Args, Command};

/// Runs one `tagsort` command against the saved session.
pub struct TagSort {
    session: Session,
    config: Config,
    logger: Option<FileLogger>,
}

impl TagSort {
    pub fn new(args: &Args) -> Result<Self> {
        let config = Config::from_args(args)?;
        let store = match &config.store {
            Some(path) => PathsStore::new(path),
            None => PathsStore::default_location().context("Failed to get home directory for the paths file")?,
        };
        let session = Session::from_store(store).with_match_mode(config.match_mode);
        if config.debug {
            eprintln!("Config: {config:#?}");
            eprintln!("{session}");
        }

        let logger = if config.log {
            FileLogger::new()
                .map_err(|error| print_warning!("Logging disabled: {error:#}"))
                .ok()
        } else {
            None
        };

        Ok(Self {
            session,
            config,
            logger,
        })
    }

    pub fn run(&mut self, command: Option<Command>) -> Result<()> {
        if let Some(logger) = self.logger.as_mut() {
            let name = command.as_ref().map_or_else(|| "Paths".to_string(), |c| format!("{c:?}"));
            logger.log_init(&name, &self.session, &self.config);
        }

        match command {
            None => {
                self.print_paths();
                Ok(())
            }
            Some(Command::Tags) => self.print_tags(),
            Some(Command::Recommend { query }) => self.recommend(&query),
            Some(Command::Check { tags }) => self.check(&tags),
            Some(Command::Find { tags }) => self.find(&tags),
            Some(Command::New { tags, intelligent }) => self.create(&tags, intelligent),
            Some(Command::Move {
                file,
                tags,
                name,
                create,
                intelligent,
            }) => self.move_file(&file, &tags, name.as_deref(), create, intelligent),
            Some(Command::Trash { path }) => self.trash(&path),
            Some(Command::Paths { inventory, root }) => self.paths(inventory, root),
            Some(Command::Ls { dir }) => self.list(dir.as_deref()),
            Some(Command::Open { file }) => self.open(&file),
            Some(Command::Back { dir }) => self.back(&dir),
            Some(Command::Status { name }) => {
                self.print_status(&name);
                Ok(())
            }
        }
    }

    fn print_paths(&self) {
        println!("{}", self.session);
        if let Some(store) = self.session.store() {
            println!("Saved in:  {}", store.path().display());
        }
    }

    fn print_tags(&self) -> Result<()> {
        self.ensure_root()?;
        let tags = self.session.tags();
        for tag in tags {
            println!("{tag}");
        }
        if self.config.verbose {
            print_bold!("{} tags in {}", tags.len(), self.session.root().display());
        }
        Ok(())
    }

    fn recommend(&self, query: &str) -> Result<()> {
        self.ensure_root()?;
        let recommendations = self.session.recommend_tags(query);
        if recommendations.is_empty() && self.config.verbose {
            println!("No tags contain '{query}'");
        }
        for tag in recommendations {
            println!("{tag}");
        }
        Ok(())
    }

    fn check(&self, tags: &[String]) -> Result<()> {
        self.ensure_root()?;
        let resolution = self.session.check_path(tags);
        let status = resolution.status();
        match &resolution {
            Resolution::Unambiguous(path) => {
                println!("{}: {}", status.name().green(), self.display_in_root(path));
            }
            Resolution::NotFound => {
                println!("{}", status.to_string().yellow());
                println!("{}", status.message());
            }
            Resolution::Ambiguous(_) => {
                println!("{}", status.to_string().yellow());
                println!("{}", status.message());
                if self.config.verbose {
                    for path in self.session.find_possible_paths(tags) {
                        println!("  {}", self.display_in_root(&path));
                    }
                }
            }
        }
        Ok(())
    }

    fn find(&self, tags: &[String]) -> Result<()> {
        self.ensure_root()?;
        let paths = self.session.find_possible_paths(tags);
        if paths.is_empty() && self.config.verbose {
            println!("No matching directories");
        }
        for path in &paths {
            println!("{}", self.display_in_root(path));
        }
        Ok(())
    }

    fn create(&mut self, tags: &[String], intelligent: bool) -> Result<()> {
        self.ensure_root()?;
        let intelligent = intelligent || self.config.intelligent;
        let planned = self.session.plan_new_path(tags, intelligent)?;
        let display = self.display_in_root(&planned);
        if planned.is_dir() {
            println!("Already exists: {display}");
            return Ok(());
        }
        if self.config.dryrun {
            print_bold!("Would create: {display}");
            return Ok(());
        }

        let path = self.session.create_new_path(tags, intelligent)?;
        self.log(|logger| logger.log_create(&path));
        println!("{} {}", "Created:".green(), self.display_in_root(&path));
        Ok(())
    }

    fn move_file(
        &mut self,
        file: &Path,
        tags: &[String],
        name: Option<&str>,
        create: bool,
        intelligent: bool,
    ) -> Result<()> {
        self.ensure_root()?;
        self.ensure_inventory()?;
        let source = self.session.inventory().join(file);
        if !source.is_file() {
            anyhow::bail!("File not found: {}", source.display());
        }

        let original_name = path_to_filename_string(&source);
        let new_name = name.map_or_else(|| original_name.clone(), |name| name.trim().to_string());
        let intelligent = intelligent || self.config.intelligent;
        let create = create || intelligent || self.config.create;

        if new_name != original_name {
            tag_sort::show_diff(&original_name, &new_name);
        }
        if self.config.dryrun {
            return self.print_planned_move(&new_name, tags, create, intelligent);
        }

        let outcome = self.session.move_file(&new_name, &source, tags, create, intelligent);
        self.log(|logger| logger.log_move(&source, &new_name, &outcome));

        match (&outcome.status, &outcome.destination) {
            (PathStatus::Successful, Some(destination)) => {
                println!(
                    "{}{}",
                    outcome.status.message().green(),
                    self.display_in_root(&destination.join(&new_name))
                );
                Ok(())
            }
            (status, _) => Err(status_error(status)),
        }
    }

    fn print_planned_move(&self, new_name: &str, tags: &[String], create: bool, intelligent: bool) -> Result<()> {
        if !is_valid_file_name(new_name) {
            return Err(status_error(&PathStatus::Error(format!("Invalid file name: '{new_name}'"))));
        }
        let destination = if create {
            self.session.plan_new_path(tags, intelligent)?
        } else {
            match self.session.check_path(tags) {
                Resolution::Unambiguous(path) => path,
                resolution => return Err(status_error(&resolution.status())),
            }
        };
        let target = destination.join(new_name);
        if target.exists() {
            return Err(status_error(&PathStatus::FileAlreadyExists));
        }
        if !destination.is_dir() {
            print_bold!("Would create: {}", self.display_in_root(&destination));
        }
        print_bold!("Would move to: {}", self.display_in_root(&target));
        Ok(())
    }

    fn trash(&mut self, path: &Path) -> Result<()> {
        if path.is_relative() {
            self.ensure_inventory()?;
        }
        let path = self.session.inventory().join(path);
        if self.config.dryrun {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            print_bold!("Would move to trash: {}", path.display());
            return Ok(());
        }

        let (status, message) = move_to_trash(&path);
        self.log(|logger| logger.log_trash(&path, &status));
        if status.is_successful() {
            println!("{}", message.green());
            Ok(())
        } else {
            Err(anyhow::anyhow!(message))
        }
    }

    fn paths(&mut self, inventory: Option<PathBuf>, root: Option<PathBuf>) -> Result<()> {
        let (Some(inventory), Some(root)) = (inventory, root) else {
            self.print_paths();
            return Ok(());
        };
        if self.config.dryrun {
            print_bold!("Would set inventory: {}", inventory.display());
            print_bold!("Would set root:      {}", root.display());
            return Ok(());
        }

        let report = self.session.set_paths(&inventory, &root);
        self.log(|logger| logger.log_paths(&report));
        for message in &report.messages {
            if report.success {
                println!("{}", message.green());
            } else {
                print_error!("{message}");
            }
        }
        if !report.success {
            anyhow::bail!("Paths were not saved");
        }
        if self.config.verbose {
            println!("Found {} tags", self.session.tags().len());
        }
        Ok(())
    }

    fn list(&self, dir: Option<&Path>) -> Result<()> {
        if dir.is_none() {
            self.ensure_inventory()?;
        }
        let dir = dir.map(|dir| self.session.inventory().join(dir));
        let entries = self.session.list_files(dir.as_deref())?;
        for entry in &entries {
            match entry.kind {
                EntryKind::Directory => println!("{}", format!("{}/", entry.name).cyan()),
                EntryKind::File => println!("{}", entry.name),
            }
        }
        if self.config.verbose {
            print_bold!("{} entries", entries.len());
        }
        Ok(())
    }

    fn open(&self, file: &str) -> Result<()> {
        self.ensure_inventory()?;
        if !self.session.inventory().join(file).is_file() {
            anyhow::bail!("File does not exist: {file}");
        }
        println!("{}", self.session.open_file(file));
        Ok(())
    }

    fn back(&self, dir: &Path) -> Result<()> {
        self.ensure_inventory()?;
        let current = self.session.inventory().join(dir);
        println!("{}", self.session.go_one_dir_back(&current).display());
        Ok(())
    }

    fn print_status(&self, name: &str) {
        println!("{}", status_message(name));
        if self.config.verbose && !STATUS_NAMES.contains(&name) {
            println!("Known statuses: {}", STATUS_NAMES.join(", "));
        }
    }

    fn ensure_root(&self) -> Result<()> {
        let root = self.session.root();
        if root.as_os_str().is_empty() {
            anyhow::bail!("Root path is not set. Use `paths --inventory <DIR> --root <DIR>` first");
        }
        if !root.is_dir() {
            anyhow::bail!("Root directory does not exist: {}", root.display());
        }
        Ok(())
    }

    fn ensure_inventory(&self) -> Result<()> {
        let inventory = self.session.inventory();
        if inventory.as_os_str().is_empty() {
            anyhow::bail!("Inventory path is not set. Use `paths --inventory <DIR> --root <DIR>` first");
        }
        if !inventory.is_dir() {
            anyhow::bail!("Inventory directory does not exist: {}", inventory.display());
        }
        Ok(())
    }

    fn display_in_root(&self, path: &Path) -> String {
        get_relative_path_or_filename(path, self.session.root())
    }

    fn log(&mut self, write: impl FnOnce(&mut FileLogger)) {
        if let Some(logger) = self.logger.as_mut() {
            write(logger);
        }
    }
}

/// Error with the status and its user-facing message.
fn status_error(status: &PathStatus) -> anyhow::Error {
    anyhow::anyhow!("{status}\n{}", status.message())
}
