mod cli;
mod log_level;
mod report_printer;

pub use cli::Cli;
pub use log_level::LogLevel;
pub use report_printer::ReportPrinter;
