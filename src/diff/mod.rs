mod diff_engine;
mod diff_entry;

pub use diff_engine::DiffEngine;
pub use diff_entry::{DiffReport, DiffStatus};
