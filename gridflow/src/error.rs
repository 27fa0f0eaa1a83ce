//! Runtime error types.
//!
//! Returned by `Piece::execute` and `CompiledProgram::run`. A runtime error
//! aborts the current run only; the compiled program stays valid for later runs.

use thiserror::Error;

/// Error raised while a compiled program is running.
///
/// Effects of actions that already ran are not rolled back; callers decide
/// whether to report or retry, the engine never retries on its own.
#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    /// A required target parameter produced no value.
    #[error("target does not exist")]
    NullTarget,

    /// A required vector parameter produced no value.
    #[error("vector does not exist")]
    NullVector,

    /// A divisor evaluated to zero at run time.
    #[error("division by zero")]
    DivideByZero,

    /// A number read from a parameter was NaN or infinite. Raised at the
    /// point of read, not where the number was produced.
    #[error("a number was NaN or infinite")]
    NaNOrInfinite,

    /// A position is farther from the actor than the allowed range.
    #[error("position is outside the allowed radius")]
    OutsideRadius,

    /// The actor has no storage device attached.
    #[error("no active device")]
    NoActiveDevice,

    /// The host reported the target as immune to the attempted effect.
    #[error("target is immune")]
    ImmuneTarget,

    /// Piece- or host-specific failure with a message.
    #[error("{0}")]
    Failed(String),
}
