//! Command-line configuration.
//!
//! Usage:
//!   backtrack-grep [-r] -E `<pattern>` [`<path>`...]
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Everything a search run needs, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub pattern: String,
    pub recursive: bool,
    pub paths: Vec<PathBuf>,
}

impl Config {
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let pattern = matches
            .get_one::<String>("pattern")
            .cloned()
            .ok_or_else(|| {
                command().error(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "Expected first argument to be '-E'",
                )
            })?;
        let recursive = matches.get_flag("recursive");
        let mut paths: Vec<PathBuf> = matches
            .get_many::<PathBuf>("paths")
            .map(|paths| paths.cloned().collect())
            .unwrap_or_default();
        if recursive && paths.is_empty() {
            paths.push(PathBuf::from("."));
        }
        Ok(Self {
            pattern,
            recursive,
            paths,
        })
    }

    /// Whether matching lines get a `<path>:` prefix.
    pub fn prefix_file_names(&self) -> bool {
        self.recursive || self.paths.len() > 1
    }
}

pub fn command() -> Command {
    Command::new("backtrack-grep")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print lines that match a restricted regular expression")
        .arg(
            Arg::new("pattern")
                .short('E')
                .value_name("PATTERN")
                .help("Pattern to search for")
                .required(true)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .help("Search directories recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .help("Files or directories to search; standard input when absent")
                .num_args(0..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}
