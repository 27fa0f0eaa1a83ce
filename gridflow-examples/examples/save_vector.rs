//! Saves a vector into the actor's device and reads it back through a
//! selector.
//!
//! Run with: `cargo run -p gridflow-examples --example save_vector`

use std::collections::HashMap;
use std::sync::Arc;

use gridflow::piece::{NumberConstant, SaveVectorTrick, VectorConstruct};
use gridflow::{compile, Coordinate, ExecutionContext, Grid, MockActor, Piece, Side};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut grid = Grid::new(9, 9);
    grid.place(Coordinate::new(0, 0), Arc::new(NumberConstant::new(1.0)))?;
    grid.place(Coordinate::new(2, 1), Arc::new(NumberConstant::new(7.0)))?;

    let mut vector = VectorConstruct::new();
    vector.params_mut().bind("x", Side::Right)?;
    grid.place(Coordinate::new(1, 1), Arc::new(vector))?;

    let mut save = SaveVectorTrick::new();
    save.params_mut().bind("number", Side::Left)?;
    save.params_mut().bind("target", Side::Bottom)?;
    grid.place(Coordinate::new(1, 0), Arc::new(save))?;

    let program = compile(grid, "stash")?;
    println!(
        "Compiled '{}' with potency {}",
        program.name(),
        program
            .metadata()
            .stat(gridflow::Stat::Potency)
    );

    let actor = Arc::new(MockActor::with_device());
    let mut context = ExecutionContext::new(actor.clone(), HashMap::new());
    program.run(&mut context)?;

    for (slot, vector) in actor.device.as_ref().map(|d| d.slots()).unwrap_or_default() {
        println!("slot {} holds {}", slot + 1, vector);
    }
    Ok(())
}
