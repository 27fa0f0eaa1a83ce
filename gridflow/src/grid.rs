//! Sparse 2D piece placement and redirection-aware neighbor resolution.
//!
//! A [`Grid`] holds at most one piece per coordinate inside fixed bounds.
//! [`Grid::resolve`] follows a bound side to its source piece, stepping
//! transparently through connector pieces; a revisited connector within one
//! resolution is a cycle and fails compilation.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compiler::CompileError;
use crate::piece::Piece;

/// Upper bound on connector hops in a single resolution. The visited set
/// already rejects any repeated connector; this additionally bounds
/// repeat-free chains on very large grids.
pub const MAX_REDIRECT_HOPS: usize = 256;

/// Identity of a grid cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Coordinate { x, y }
    }

    /// Neighboring coordinate one step in `side`'s direction.
    /// `Side::Off` steps nowhere.
    pub fn step(self, side: Side) -> Coordinate {
        let (dx, dy) = side.offset();
        Coordinate::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Direction a parameter is bound to, or `Off` for a disabled binding.
///
/// Screen convention: `Top` is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Off,
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The four enabled directions, in a fixed order.
    pub const ENABLED: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn is_enabled(self) -> bool {
        self != Side::Off
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Off => Side::Off,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Side::Off => (0, 0),
            Side::Top => (0, -1),
            Side::Bottom => (0, 1),
            Side::Left => (-1, 0),
            Side::Right => (1, 0),
        }
    }
}

/// Authoring error when placing a piece.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coordinate),

    #[error("coordinate {0} is already occupied")]
    Occupied(Coordinate),
}

/// Bounded sparse grid of pieces.
///
/// Iteration order over cells is coordinate order (x, then y), which keeps
/// root collection and therefore compilation deterministic.
#[derive(Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: BTreeMap<Coordinate, Arc<dyn Piece>>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field(
                "cells",
                &self
                    .cells
                    .iter()
                    .map(|(coord, piece)| (coord, piece.key()))
                    .collect::<BTreeMap<_, _>>(),
            )
            .finish()
    }
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Grid {
            width,
            height,
            cells: BTreeMap::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: Coordinate) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Places a piece; each cell holds at most one.
    pub fn place(&mut self, pos: Coordinate, piece: Arc<dyn Piece>) -> Result<(), GridError> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        if self.cells.contains_key(&pos) {
            return Err(GridError::Occupied(pos));
        }
        self.cells.insert(pos, piece);
        Ok(())
    }

    pub fn piece_at(&self, pos: Coordinate) -> Option<&Arc<dyn Piece>> {
        self.cells.get(&pos)
    }

    /// All placed pieces in coordinate order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coordinate, &Arc<dyn Piece>)> {
        self.cells.iter().map(|(pos, piece)| (*pos, piece))
    }

    /// Follows `side` from `from` to the piece that sources the value,
    /// stepping through connectors via their side remapping.
    ///
    /// `on_redirect` runs once per newly visited connector coordinate so the
    /// compiler can validate it and fold its metadata exactly once. An empty
    /// or out-of-bounds cell, or a connector lane mapped to `Off`, resolves
    /// to `Ok(None)`. Revisiting a connector within this call is a cycle.
    pub fn resolve<F>(
        &self,
        from: Coordinate,
        side: Side,
        mut on_redirect: F,
    ) -> Result<Option<(Coordinate, &Arc<dyn Piece>)>, CompileError>
    where
        F: FnMut(Coordinate, &dyn Piece) -> Result<(), CompileError>,
    {
        let mut at = from;
        let mut side = side;
        let mut seen: HashSet<Coordinate> = HashSet::new();
        let mut hops = 0usize;
        loop {
            if !side.is_enabled() {
                return Ok(None);
            }
            let next = at.step(side);
            if !self.in_bounds(next) {
                return Ok(None);
            }
            let Some(piece) = self.cells.get(&next) else {
                return Ok(None);
            };
            let Some(redirector) = piece.as_redirector() else {
                return Ok(Some((next, piece)));
            };
            if !seen.insert(next) {
                return Err(CompileError::InfiniteLoop(next));
            }
            hops += 1;
            if hops > MAX_REDIRECT_HOPS {
                return Err(CompileError::RedirectionLimitExceeded(next));
            }
            on_redirect(next, piece.as_ref())?;
            side = redirector.remap_side(side);
            at = next;
        }
    }
}
