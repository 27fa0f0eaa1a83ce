//! gridflow-cli library: load a JSON grid description, compile it and run
//! it against an in-memory actor.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! let report = gridflow_cli::run_file(path, &RunOptions::default())?;
//! println!("{} actions", report.actions.len());
//! ```

mod format;
mod run;

pub use format::{build_grid, parse, GridFile, PieceEntry};
pub use run::{run_file, run_source, RunOptions, RunReport};

/// Error type used across loading, compilation and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

#[cfg(test)]
mod tests;
