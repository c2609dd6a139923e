use std::path::PathBuf;

use clap::Parser;
use clap::error::ErrorKind;

use crate::cli::LogLevel;

/// Exit code for missing or malformed arguments
pub const USAGE_EXIT_CODE: u8 = 1;

/// Compare two directory trees by file size and content digest
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// The tree to compare from
    pub old_dir: PathBuf,
    /// The tree to compare against
    pub new_dir: PathBuf,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// YAML file with comparison settings
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    /// Follow symbolic links while walking the trees
    #[clap(long)]
    pub follow_links: bool,

    /// Print the status of every path before the summary
    #[clap(long)]
    pub list: bool,

    /// Skip files and directories with this name, may be repeated
    #[clap(long, short = 'x', value_name = "NAME")]
    pub exclude: Vec<String>,
}

impl Cli {
    /// Parses the process arguments.
    ///
    /// `--help` and `--version` print and exit the process with code 0. Any
    /// other parse failure is printed and returned as [`USAGE_EXIT_CODE`].
    pub fn parse_args() -> Result<Self, u8> {
        Self::try_parse().or_else(|error| match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            _ => {
                let _ = error.print();
                Err(USAGE_EXIT_CODE)
            }
        })
    }
}
