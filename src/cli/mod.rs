//! CLI commands
//!
//! Command implementations for the `pr-import` binary.

mod process;
mod progress;
mod resolve;
pub mod style;

pub use process::{run_import_link, run_process};
pub use resolve::run_resolve;
