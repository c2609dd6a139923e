#![allow(clippy::enum_variant_names)]

use std::io::{self, Write as _};
use std::process::ExitCode;
use std::time::Instant;

use tracing::{debug, error};

use crate::{
    application::Application,
    cli::{Cli, ReportPrinter},
};

mod application;
mod cli;
mod config;
mod diff;
mod digest;
mod ext;
mod filesystem;

#[compio::main]
async fn main() -> ExitCode {
    let started = Instant::now();
    let cli_args = match Cli::parse_args() {
        Ok(cli_args) => cli_args,
        Err(code) => return ExitCode::from(code),
    };
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    let comparison = match Application::run(cli_args).await {
        Ok(comparison) => comparison,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{}", snafu::Report::from_error(err));
            return ExitCode::from(code);
        }
    };

    ReportPrinter::detect_color_support();
    let mut stdout = io::stdout().lock();
    let printed = ReportPrinter::new(&comparison.report, comparison.config.list_entries)
        .print(&mut stdout, started.elapsed())
        .and_then(|()| stdout.flush());
    if let Err(err) = printed {
        error!("Failed to write the report: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_tracing(cli_args: &Cli) {
    tracing_subscriber::fmt()
        .with_max_level(cli_args.log_level)
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();
}
