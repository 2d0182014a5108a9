//! Configuration for `TagSort`.
//!
//! Handles reading configuration from CLI arguments and the user config file.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

use tag_sort::tags::MatchMode;

use crate::Args;

/// Config from the user config file.
#[derive(Debug, Default, Deserialize)]
pub struct TagSortConfig {
    #[serde(default)]
    create: bool,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    dryrun: bool,
    #[serde(default)]
    intelligent: bool,
    #[serde(default)]
    log: bool,
    #[serde(default)]
    match_segments: bool,
    #[serde(default)]
    paths_file: Option<PathBuf>,
    #[serde(default)]
    verbose: bool,
}

/// Wrapper needed for parsing the config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    tagsort: TagSortConfig,
}

/// Final config created from CLI arguments and user config file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Create missing destinations when moving, unless given per command.
    pub(crate) create: bool,
    pub(crate) debug: bool,
    pub(crate) dryrun: bool,
    /// Default for the intelligent creation flag.
    pub(crate) intelligent: bool,
    pub(crate) log: bool,
    pub(crate) match_mode: MatchMode,
    /// Paths store override. `None` uses the default location.
    pub(crate) store: Option<PathBuf>,
    pub(crate) verbose: bool,
}

impl TagSortConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    pub(crate) fn get_user_config() -> Result<Self> {
        let Some(path) = tag_sort::config::CONFIG_PATH.as_deref() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow::anyhow!(
                "Failed to read config file {}: {error}",
                path.display()
            )),
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.tagsort)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {e}"))
    }
}

impl Config {
    /// Create config from given command line args and user config file.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or parsed.
    pub fn from_args(args: &Args) -> Result<Self> {
        let user_config = TagSortConfig::get_user_config()?;
        Ok(Self::from_parts(args, user_config))
    }

    /// Combine CLI flags with the user config. Flags can only enable options.
    fn from_parts(args: &Args, user_config: TagSortConfig) -> Self {
        let match_mode = if args.segments || user_config.match_segments {
            MatchMode::Segment
        } else {
            MatchMode::Substring
        };
        Self {
            create: user_config.create,
            debug: args.debug || user_config.debug,
            dryrun: args.print || user_config.dryrun,
            intelligent: user_config.intelligent,
            log: user_config.log,
            match_mode,
            store: args.store.clone().or(user_config.paths_file),
            verbose: args.verbose || user_config.verbose,
        }
    }
}

#[cfg(test)]
mod tag_sort_config_tests {
    use super::*;

    use clap::Parser;

    #[test]
    fn from_toml_str_parses_empty_config() {
        let config = TagSortConfig::from_toml_str("").expect("should parse empty config");
        assert!(!config.create);
        assert!(!config.debug);
        assert!(!config.dryrun);
        assert!(!config.intelligent);
        assert!(!config.log);
        assert!(!config.match_segments);
        assert!(config.paths_file.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn from_toml_str_parses_tagsort_section() {
        let toml = r#"
[tagsort]
create = true
dryrun = true
intelligent = true
log = true
match_segments = true
paths_file = "/data/tag-sort/paths.toml"
verbose = true
"#;
        let config = TagSortConfig::from_toml_str(toml).expect("should parse config");
        assert!(config.create);
        assert!(config.dryrun);
        assert!(config.intelligent);
        assert!(config.log);
        assert!(config.match_segments);
        assert_eq!(config.paths_file, Some(PathBuf::from("/data/tag-sort/paths.toml")));
        assert!(config.verbose);
    }

    #[test]
    fn from_toml_str_invalid_toml_returns_error() {
        assert!(TagSortConfig::from_toml_str("this is not valid toml {{{").is_err());
    }

    #[test]
    fn from_toml_str_wrong_type_returns_error() {
        let toml = r#"
[tagsort]
verbose = "yes"
"#;
        assert!(TagSortConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn from_toml_str_ignores_other_sections() {
        let toml = r"
[dupefind]
verbose = false

[tagsort]
verbose = true
";
        let config = TagSortConfig::from_toml_str(toml).expect("should parse config");
        assert!(config.verbose);
        assert!(!config.dryrun);
    }

    #[test]
    fn cli_flags_enable_options() {
        let args = Args::try_parse_from(["test", "-p", "-s", "-v", "tags"]).expect("should parse");
        let config = Config::from_parts(&args, TagSortConfig::default());
        assert!(config.dryrun);
        assert!(config.verbose);
        assert!(!config.debug);
        assert_eq!(config.match_mode, MatchMode::Segment);
        assert!(config.store.is_none());
    }

    #[test]
    fn user_config_is_used_without_flags() {
        let args = Args::try_parse_from(["test", "tags"]).expect("should parse");
        let user_config = TagSortConfig::from_toml_str(
            r#"
[tagsort]
dryrun = true
match_segments = true
paths_file = "/data/paths.toml"
"#,
        )
        .expect("should parse config");
        let config = Config::from_parts(&args, user_config);
        assert!(config.dryrun);
        assert_eq!(config.match_mode, MatchMode::Segment);
        assert_eq!(config.store, Some(PathBuf::from("/data/paths.toml")));
    }

    #[test]
    fn store_flag_overrides_config_file() {
        let args = Args::try_parse_from(["test", "--store", "/tmp/other.toml", "tags"]).expect("should parse");
        let user_config = TagSortConfig::from_toml_str(
            r#"
[tagsort]
paths_file = "/data/paths.toml"
"#,
        )
        .expect("should parse config");
        let config = Config::from_parts(&args, user_config);
        assert_eq!(config.store, Some(PathBuf::from("/tmp/other.toml")));
        assert_eq!(config.match_mode, MatchMode::Substring);
    }
}
