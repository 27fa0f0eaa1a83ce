//! Grid compiler: validates bindings, detects cycles, orders actions.
//!
//! [`compile`] walks the grid depth-first from every terminal piece,
//! rejecting invalid bindings and parameter cycles, and produces a
//! [`CompiledProgram`] whose action list puts every dependency before its
//! dependents. Connectors are validated and folded into metadata exactly
//! once but never occupy an action slot.

mod compile_error;
mod compiled;
mod metadata;

pub use compile_error::CompileError;
pub use compiled::{Action, CompiledProgram};
pub use metadata::{Metadata, Stat};

use std::collections::HashSet;
use std::sync::Arc;

use crate::grid::{Coordinate, Grid, Side};
use crate::logging;
use crate::piece::{EvalScope, ParamSlot, Piece};

/// Compiles a grid snapshot into a program.
///
/// Stateless and pure: the grid is consumed as an immutable snapshot and
/// embedded in the resulting program. Any error aborts the whole
/// compilation; no partial program is returned.
pub fn compile(grid: Grid, name: impl Into<String>) -> Result<CompiledProgram, CompileError> {
    let name = name.into();
    logging::log_compile_start(&name);
    match build(&grid, &name) {
        Ok((actions, metadata)) => {
            logging::log_compile_complete(&name, actions.len());
            Ok(CompiledProgram {
                name,
                actions,
                metadata,
                grid,
            })
        }
        Err(e) => {
            logging::log_compile_error(&e);
            Err(e)
        }
    }
}

fn build(grid: &Grid, name: &str) -> Result<(Vec<Action>, Metadata), CompileError> {
    let roots: Vec<Coordinate> = grid
        .pieces()
        .filter(|(_, piece)| piece.kind().is_terminal())
        .map(|(pos, _)| pos)
        .collect();
    if roots.is_empty() {
        return Err(CompileError::NoRoots);
    }

    let mut builder = Builder {
        grid,
        actions: Vec::new(),
        metadata: Metadata::new(),
        built: HashSet::new(),
    };
    for root in roots {
        let mut visiting = HashSet::new();
        builder.build_piece(root, &mut visiting)?;
    }

    if builder.metadata.has_negative() {
        return Err(CompileError::StatOverflow);
    }
    if name.is_empty() {
        return Err(CompileError::NoName);
    }
    Ok((builder.actions, builder.metadata))
}

/// Walk state threaded through one compilation: the action list under
/// construction, the metadata accumulator and the whole-compile dedup set.
/// The per-root cycle set travels separately so it spans one call chain.
struct Builder<'a> {
    grid: &'a Grid,
    actions: Vec<Action>,
    metadata: Metadata,
    built: HashSet<Coordinate>,
}

impl Builder<'_> {
    fn build_piece(
        &mut self,
        pos: Coordinate,
        visiting: &mut HashSet<Coordinate>,
    ) -> Result<(), CompileError> {
        if !visiting.insert(pos) {
            return Err(CompileError::InfiniteLoop(pos));
        }

        // A piece reachable from several paths is built once; later
        // encounters only participate in cycle tracking.
        if self.built.insert(pos) {
            let grid = self.grid;
            let piece = grid
                .piece_at(pos)
                .expect("compile walk only visits occupied cells");

            let mut used_sides: Vec<Side> = Vec::new();
            for slot in piece.params().slots() {
                if check_side_disabled(slot, pos, &mut used_sides)? {
                    continue;
                }
                let resolved = grid.resolve(pos, slot.side, |redirect_pos, redirect| {
                    self.build_redirect(redirect_pos, redirect)
                })?;
                let Some((source_pos, source)) = resolved else {
                    return Err(CompileError::NullParam(pos));
                };
                if !slot.param.can_accept(source.as_ref()) {
                    return Err(CompileError::InvalidParam(pos));
                }
                self.build_piece(source_pos, visiting)?;
            }

            self.actions.push(Action {
                pos,
                piece: Arc::clone(piece),
            });
            piece.add_to_metadata(&EvalScope::new(grid, pos), &mut self.metadata)?;
        }

        visiting.remove(&pos);
        Ok(())
    }

    /// Lightweight validation of a connector the resolver stepped through:
    /// its own side-uniqueness/disable rules plus its metadata, folded once
    /// per compilation on first discovery. No action-list entry.
    fn build_redirect(&mut self, pos: Coordinate, piece: &dyn Piece) -> Result<(), CompileError> {
        if self.built.insert(pos) {
            let mut used_sides: Vec<Side> = Vec::new();
            for slot in piece.params().slots() {
                check_side_disabled(slot, pos, &mut used_sides)?;
            }
            piece.add_to_metadata(&EvalScope::new(self.grid, pos), &mut self.metadata)?;
        }
        Ok(())
    }
}

/// Returns whether the slot is disabled and should be skipped. An enabled
/// side may appear only once per piece; a disabled side is only legal when
/// the param permits it.
fn check_side_disabled(
    slot: &ParamSlot,
    pos: Coordinate,
    used_sides: &mut Vec<Side>,
) -> Result<bool, CompileError> {
    if slot.side.is_enabled() {
        if used_sides.contains(&slot.side) {
            return Err(CompileError::SameSideParams(pos));
        }
        used_sides.push(slot.side);
        Ok(false)
    } else if slot.param.can_disable {
        Ok(true)
    } else {
        Err(CompileError::UnsetParam(pos))
    }
}
