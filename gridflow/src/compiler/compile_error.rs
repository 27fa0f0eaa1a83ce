//! Compilation error.
//!
//! Returned by [`compile`](crate::compiler::compile) when the grid does not
//! describe a valid program. Compilation aborts on the first error; no
//! partial program is ever produced. Errors carry the offending coordinate
//! when one is known, for host-side highlighting.

use thiserror::Error;

use crate::grid::Coordinate;

/// Error when compiling a grid into a program.
#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    /// No piece on the grid is a terminal action.
    #[error("program has no terminal action")]
    NoRoots,

    /// The program was given an empty name.
    #[error("program has no name")]
    NoName,

    /// A parameter path revisits a piece still being resolved, directly or
    /// through any number of connectors.
    #[error("parameter loop at {0}")]
    InfiniteLoop(Coordinate),

    /// Two enabled parameters of one piece are bound to the same side.
    #[error("two parameters share a side at {0}")]
    SameSideParams(Coordinate),

    /// A required parameter is disabled.
    #[error("required parameter left unset at {0}")]
    UnsetParam(Coordinate),

    /// An enabled parameter resolves to nothing.
    #[error("parameter has no source at {0}")]
    NullParam(Coordinate),

    /// An enabled parameter resolves to a piece of the wrong type.
    #[error("parameter source has the wrong type at {0}")]
    InvalidParam(Coordinate),

    /// A static bound that must be at least one is not.
    #[error("value must be positive at {0}")]
    NonPositiveValue(Coordinate),

    /// Aggregated stats left the valid range.
    #[error("program stats overflowed")]
    StatOverflow,

    /// A connector chain exceeded the hop cap without repeating.
    #[error("redirection limit exceeded at {0}")]
    RedirectionLimitExceeded(Coordinate),

    /// A static division whose divisor range spans zero.
    #[error("static division by zero at {0}")]
    DivisionByZero(Coordinate),
}

impl CompileError {
    /// Coordinate the error points at, when one is known.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            CompileError::NoRoots | CompileError::NoName | CompileError::StatOverflow => None,
            CompileError::InfiniteLoop(pos)
            | CompileError::SameSideParams(pos)
            | CompileError::UnsetParam(pos)
            | CompileError::NullParam(pos)
            | CompileError::InvalidParam(pos)
            | CompileError::NonPositiveValue(pos)
            | CompileError::RedirectionLimitExceeded(pos)
            | CompileError::DivisionByZero(pos) => Some(*pos),
        }
    }
}
