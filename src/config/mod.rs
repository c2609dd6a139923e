mod diff_config;

pub use diff_config::{DiffConfig, DiffConfigError};
