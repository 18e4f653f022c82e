//! CLI command handlers, one per file.

mod config;
mod simulate;

pub use config::run_config;
pub use simulate::{run_simulate, SimulateOptions};
