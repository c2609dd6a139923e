use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::DiffConfig;
use crate::filesystem::TraversalOptions;

/// Settings for one comparison, after merging the config file with the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub old_root: PathBuf,
    pub new_root: PathBuf,
    pub traversal: TraversalOptions,
    pub list_entries: bool,
}

impl RuntimeConfig {
    /// Flags given on the command line are added on top of the file settings
    pub fn merge(cli: Cli, file_config: DiffConfig) -> Self {
        let mut exclude = file_config.exclude;
        exclude.extend(cli.exclude);

        Self {
            old_root: cli.old_dir,
            new_root: cli.new_dir,
            traversal: TraversalOptions {
                follow_links: cli.follow_links || file_config.follow_links,
                exclude,
            },
            list_entries: cli.list || file_config.list,
        }
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self::merge(cli, DiffConfig::default())
    }
}
