//! Routes two values through one cell with a cross connector.
//!
//! Run with: `cargo run -p gridflow-examples --example cross_wires`

use std::collections::HashMap;
use std::sync::Arc;

use gridflow::piece::{CrossConnector, DebugTrick, NumberConstant, PiConstant};
use gridflow::{compile, Coordinate, ExecutionContext, Grid, MockActor, Piece, Side};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut grid = Grid::new(9, 9);
    grid.place(Coordinate::new(0, 1), Arc::new(NumberConstant::new(42.0)))?;
    grid.place(Coordinate::new(1, 0), Arc::new(PiConstant::new()))?;

    let mut cross = CrossConnector::new();
    cross.params_mut().bind("from1", Side::Left)?;
    cross.params_mut().bind("to1", Side::Right)?;
    cross.params_mut().bind("from2", Side::Top)?;
    cross.params_mut().bind("to2", Side::Bottom)?;
    grid.place(Coordinate::new(1, 1), Arc::new(cross))?;

    let mut east = DebugTrick::new();
    east.params_mut().bind("target", Side::Left)?;
    grid.place(Coordinate::new(2, 1), Arc::new(east))?;

    let mut south = DebugTrick::new();
    south.params_mut().bind("target", Side::Top)?;
    grid.place(Coordinate::new(1, 2), Arc::new(south))?;

    let program = compile(grid, "cross-wires")?;
    println!(
        "Compiled {} actions (the connector occupies none of them)",
        program.actions().len()
    );

    let mut context = ExecutionContext::new(Arc::new(MockActor::new()), HashMap::new());
    program.run(&mut context)?;
    Ok(())
}
