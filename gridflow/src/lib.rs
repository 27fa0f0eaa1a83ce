//! # Gridflow
//!
//! A compiler and executor for small dataflow programs authored as typed
//! pieces on a bounded 2D grid. Pieces read their inputs from neighboring
//! cells through directional parameter bindings; connector pieces forward
//! lookups transparently. Compilation validates every binding, rejects
//! cycles, estimates static cost bounds and produces an immutable,
//! dependency-ordered action list; running replays that list against a
//! per-run value cache.
//!
//! ## Design principles
//!
//! - **Compile once, run many**: [`compile`] is a pure function of a grid
//!   snapshot. A [`CompiledProgram`] never changes; a failed run leaves it
//!   valid for the next one.
//! - **Pieces stay local**: a piece only ever sees its own coordinate plus
//!   a grid handle via the scope types; no piece holds a reference to
//!   another piece.
//! - **Hosts own the world**: effects and entity access go through the
//!   [`Actor`]/[`Device`] traits; the engine is synchronous and
//!   single-threaded throughout.
//!
//! ## Main modules
//!
//! - [`grid`]: [`Grid`], [`Coordinate`], [`Side`] and redirection-aware
//!   neighbor resolution.
//! - [`piece`]: the [`Piece`] trait, parameter model, built-in piece
//!   library and [`PieceRegistry`].
//! - [`compiler`]: [`compile`], [`CompiledProgram`], [`CompileError`],
//!   [`Metadata`].
//! - [`interval`]: compile-time numeric ranges.
//! - [`context`]: per-run [`ExecutionContext`] and the host actor seam.
//!
//! ## Quick start
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use gridflow::piece::{DebugTrick, NumberConstant};
//! use gridflow::{compile, Coordinate, ExecutionContext, Grid, MockActor, Piece, Side};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut grid = Grid::new(9, 9);
//! grid.place(Coordinate::new(0, 0), Arc::new(NumberConstant::new(5.0)))?;
//!
//! let mut debug = DebugTrick::new();
//! debug.params_mut().bind("target", Side::Left)?;
//! grid.place(Coordinate::new(1, 0), Arc::new(debug))?;
//!
//! let program = compile(grid, "five")?;
//! let mut context = ExecutionContext::new(Arc::new(MockActor::new()), HashMap::new());
//! program.run(&mut context)?;
//! # Ok(())
//! # }
//! ```

pub mod compiler;
pub mod context;
pub mod error;
pub mod grid;
pub mod interval;
pub mod logging;
pub mod piece;

pub use compiler::{compile, Action, CompileError, CompiledProgram, Metadata, Stat};
pub use context::{Actor, Device, ExecutionContext, MockActor, MockDevice, MAX_RANGE};
pub use error::RuntimeError;
pub use grid::{Coordinate, Grid, GridError, Side, MAX_REDIRECT_HOPS};
pub use interval::Interval;
pub use piece::{
    BindError, EvalScope, EvalType, Param, ParamKind, ParamSlot, ParamTable, Piece, PieceKind,
    PieceRegistry, Redirector, RegistryError, RunScope, TargetId, Value, Vector3,
};
