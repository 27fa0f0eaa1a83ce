//! Compiles and runs (2 + 3) * 4, reading the result back from the run
//! cache.
//!
//! Run with: `cargo run -p gridflow-examples --example arithmetic`

use std::collections::HashMap;
use std::sync::Arc;

use gridflow::piece::{Add, DebugTrick, Multiply, NumberConstant};
use gridflow::{compile, Coordinate, ExecutionContext, Grid, MockActor, Piece, Side, Value};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut grid = Grid::new(9, 9);
    grid.place(Coordinate::new(0, 0), Arc::new(NumberConstant::new(2.0)))?;
    grid.place(Coordinate::new(2, 0), Arc::new(NumberConstant::new(3.0)))?;

    let mut add = Add::new();
    add.params_mut().bind("number1", Side::Left)?;
    add.params_mut().bind("number2", Side::Right)?;
    grid.place(Coordinate::new(1, 0), Arc::new(add))?;

    grid.place(Coordinate::new(0, 1), Arc::new(NumberConstant::new(4.0)))?;
    let mut multiply = Multiply::new();
    multiply.params_mut().bind("number1", Side::Top)?;
    multiply.params_mut().bind("number2", Side::Left)?;
    grid.place(Coordinate::new(1, 1), Arc::new(multiply))?;

    let mut debug = DebugTrick::new();
    debug.params_mut().bind("target", Side::Top)?;
    grid.place(Coordinate::new(1, 2), Arc::new(debug))?;

    let program = compile(grid, "arithmetic")?;
    println!("Compiled {} actions:", program.actions().len());
    for action in program.actions() {
        println!("  {} {}", action.pos(), action.key());
    }

    let mut context = ExecutionContext::new(Arc::new(MockActor::new()), HashMap::new());
    program.run(&mut context)?;

    if let Some(Value::Number(n)) = context.cached(Coordinate::new(1, 1)) {
        println!("(2 + 3) * 4 = {}", n);
    }
    Ok(())
}
