mod application;
mod runtime_config;

pub use application::Application;
pub use runtime_config::RuntimeConfig;
