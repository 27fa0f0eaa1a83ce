//! Logging utilities for compilation and program runs.
//!
//! With the `tracing` feature these emit structured events; otherwise they
//! fall back to `eprintln!` so hosts without a subscriber still see what the
//! engine is doing.

use crate::compiler::CompileError;
use crate::error::RuntimeError;
use crate::grid::Coordinate;
use crate::piece::Value;

/// Log the start of a compilation.
pub fn log_compile_start(name: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(program = name, "Starting compilation");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] Starting compilation: {}", name);
}

/// Log a successful compilation and its action count.
pub fn log_compile_complete(name: &str, actions: usize) {
    #[cfg(feature = "tracing")]
    tracing::info!(program = name, actions, "Compilation complete");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[INFO] Compilation complete: {} ({} actions)", name, actions);
}

/// Log a failed compilation.
pub fn log_compile_error(error: &CompileError) {
    #[cfg(feature = "tracing")]
    tracing::error!(?error, "Compilation failed");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[ERROR] Compilation failed: {:?}", error);
}

/// Log the start of a program run.
pub fn log_run_start(name: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(program = name, "Starting run");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] Starting run: {}", name);
}

/// Log one action about to execute.
pub fn log_action_start(pos: Coordinate, key: &str) {
    #[cfg(feature = "tracing")]
    tracing::debug!(%pos, key, "Executing action");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[DEBUG] Executing action: {} at {}", key, pos);
}

/// Log a completed run.
pub fn log_run_complete(name: &str) {
    #[cfg(feature = "tracing")]
    tracing::info!(program = name, "Run complete");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[INFO] Run complete: {}", name);
}

/// Log a failed run.
pub fn log_run_error(error: &RuntimeError) {
    #[cfg(feature = "tracing")]
    tracing::error!(%error, "Run failed");

    #[cfg(not(feature = "tracing"))]
    eprintln!("[ERROR] Run failed: {}", error);
}

/// Log a value observed by a debug piece.
pub fn log_piece_value(pos: Coordinate, value: Option<&Value>) {
    #[cfg(feature = "tracing")]
    match value {
        Some(v) => tracing::info!(%pos, value = %v, "Debug value"),
        None => tracing::info!(%pos, "Debug value: none"),
    }

    #[cfg(not(feature = "tracing"))]
    match value {
        Some(v) => eprintln!("[INFO] Debug value at {}: {}", pos, v),
        None => eprintln!("[INFO] Debug value at {}: none", pos),
    }
}
