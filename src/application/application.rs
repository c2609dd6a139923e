use std::io;
use std::path::{Path, PathBuf};

use snafu::IntoError;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::cli::Cli;
use crate::config::{DiffConfig, DiffConfigError};
use crate::diff::{DiffEngine, DiffReport};
use crate::digest::MetroDigester;
use crate::ext::BestEffortPathExt;
use crate::filesystem::Inventory;

pub struct Application;

/// Outcome of a successful run
#[derive(Debug)]
pub struct Comparison {
    pub config: RuntimeConfig,
    pub report: DiffReport,
}

impl Application {
    pub async fn run(cli_args: Cli) -> Result<Comparison, ApplicationError> {
        let old_root = Self::resolve_root(&cli_args.old_dir)?;
        let new_root = Self::resolve_root(&cli_args.new_dir)?;

        let file_config = match &cli_args.config {
            Some(path) => DiffConfig::from_path(path).await.context(ConfigSnafu)?,
            None => DiffConfig::default(),
        };
        debug!("Loaded config: {:?}", file_config);

        let config = RuntimeConfig {
            old_root,
            new_root,
            ..RuntimeConfig::merge(cli_args, file_config)
        };
        debug!("Runtime config: {:?}", config);

        let report = Self::compare(&config).await;
        for (path, error) in report.failures() {
            warn!("Could not compare '{}': {}", path, error);
        }

        Ok(Comparison { config, report })
    }

    /// Inventories both roots and classifies every path found in either
    pub async fn compare(config: &RuntimeConfig) -> DiffReport {
        let old = Inventory::build(&config.old_root, &config.traversal);
        let new = Inventory::build(&config.new_root, &config.traversal);

        if old.is_empty() && new.is_empty() {
            info!("Both trees are empty, nothing to compare");
        } else {
            info!("Comparing {} files against {} files", old.len(), new.len());
        }
        DiffEngine::new(&old, &new, &MetroDigester).run().await
    }

    fn resolve_root(path: &Path) -> Result<PathBuf, ApplicationError> {
        let resolved = path.canonicalize().map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PathNotFoundSnafu { path }.into_error(source),
            _ => PathAccessSnafu { path }.into_error(source),
        })?;
        ensure!(resolved.is_dir(), NotADirectorySnafu { path: resolved });
        Ok(resolved)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to load configuration: {}", source))]
    ConfigError { source: DiffConfigError },
    #[snafu(display("One or more paths do not exist: {}", path.best_effort_path_display()))]
    PathNotFoundError {
        path: PathBuf,
        source: io::Error,
    },
    #[snafu(display("Cannot access {}: {}", path.best_effort_path_display(), source))]
    PathAccessError { path: PathBuf, source: io::Error },
    #[snafu(display("{} is not a directory", path.display()))]
    NotADirectoryError { path: PathBuf },
}

impl ApplicationError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ApplicationError::PathNotFoundError { .. }
            | ApplicationError::PathAccessError { .. }
            | ApplicationError::NotADirectoryError { .. } => 2,
            ApplicationError::ConfigError { .. } => 3,
        }
    }
}
