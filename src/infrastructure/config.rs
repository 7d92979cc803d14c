use clap::{Arg, ArgMatches, Command};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::logging::normalize_level;

const DATA_DIR_NAME: &str = ".albumlist";
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("HOME is not set; pass --data-dir to choose where albums are stored")]
    MissingHome,
    #[error("{0}")]
    InvalidLogLevel(String),
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding the album slot file.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

pub fn command() -> Command {
    Command::new("albumlist")
        .about("Keep a list of your albums in the terminal")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Directory where the album list is stored [default: ~/.albumlist]"),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .value_name("DIR")
                .help("Directory for log files [default: <data-dir>/logs]"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("One of error, warn, info, debug, trace [default: info]"),
        )
}

impl Settings {
    /// Builds settings from parsed arguments, falling back to `$HOME`.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, ConfigError> {
        let home = env::var("HOME").ok();
        Self::resolve(matches, home.as_deref())
    }

    fn resolve(matches: &ArgMatches, home: Option<&str>) -> Result<Self, ConfigError> {
        let data_dir = match matches.get_one::<String>("data-dir") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir(home.ok_or(ConfigError::MissingHome)?),
        };

        let log_dir = matches
            .get_one::<String>("log-dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(LOG_DIR_NAME));

        let level = matches
            .get_one::<String>("log-level")
            .map(String::as_str)
            .unwrap_or(DEFAULT_LOG_LEVEL);
        let log_level = normalize_level(level).map_err(ConfigError::InvalidLogLevel)?;

        Ok(Self {
            data_dir,
            log_dir,
            log_level,
        })
    }
}

fn default_data_dir(home_dir: &str) -> PathBuf {
    Path::new(home_dir).join(DATA_DIR_NAME)
}
