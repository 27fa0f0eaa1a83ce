//! JSON grid description: the editor-facing persistence format.
//!
//! A file holds a program name, grid dimensions and a list of piece
//! entries; each entry names a registry key, a cell, an optional data
//! payload and the side bindings of its parameters:
//!
//! ```json
//! {
//!   "name": "demo",
//!   "pieces": [
//!     { "key": "constant_number", "x": 0, "y": 0, "data": { "value": 5 } },
//!     { "key": "trick_debug", "x": 1, "y": 0, "params": { "target": "left" } }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use gridflow::{Coordinate, Grid, Piece, PieceRegistry, Side};

use crate::Error;

fn default_dimension() -> i32 {
    9
}

/// Top-level grid description.
#[derive(Debug, Deserialize)]
pub struct GridFile {
    pub name: String,
    #[serde(default = "default_dimension")]
    pub width: i32,
    #[serde(default = "default_dimension")]
    pub height: i32,
    #[serde(default)]
    pub pieces: Vec<PieceEntry>,
}

/// One authored piece: registry key, cell, payload and bindings.
#[derive(Debug, Deserialize)]
pub struct PieceEntry {
    pub key: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub params: HashMap<String, Side>,
}

/// Parses a grid description from JSON text.
pub fn parse(source: &str) -> Result<GridFile, Error> {
    Ok(serde_json::from_str(source)?)
}

/// Builds the runnable grid: constructs every piece through the registry,
/// applies its bindings and places it.
pub fn build_grid(file: &GridFile, registry: &PieceRegistry) -> Result<Grid, Error> {
    let mut grid = Grid::new(file.width, file.height);
    for entry in &file.pieces {
        let mut piece = registry.create(&entry.key, &entry.data)?;
        for (param, side) in &entry.params {
            piece.params_mut().bind(param, *side)?;
        }
        grid.place(Coordinate::new(entry.x, entry.y), Arc::from(piece))?;
    }
    Ok(grid)
}
