//! Successful compilations: ordering guarantees, determinism, shared
//! subgraphs and connector handling.

use gridflow::piece::{
    Add, Connector, CrossConnector, DebugTrick, Multiply, NumberConstant,
};
use gridflow::{compile, Coordinate, Grid, Side, Stat};

use crate::common::{action_positions, place, with_bindings};

/// **Scenario**: every value-producing action precedes every action that
/// reads it.
#[test]
fn producers_precede_consumers() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, NumberConstant::new(2.0));
    place(&mut grid, 2, 0, NumberConstant::new(3.0));
    place(
        &mut grid,
        1,
        0,
        with_bindings(
            Add::new(),
            &[("number1", Side::Left), ("number2", Side::Right)],
        ),
    );
    place(
        &mut grid,
        1,
        1,
        with_bindings(DebugTrick::new(), &[("target", Side::Top)]),
    );

    let program = compile(grid, "sum").unwrap();
    let positions = action_positions(&program);

    let index =
        |pos: Coordinate| positions.iter().position(|p| *p == pos).expect("action present");
    assert!(index(Coordinate::new(0, 0)) < index(Coordinate::new(1, 0)));
    assert!(index(Coordinate::new(2, 0)) < index(Coordinate::new(1, 0)));
    assert!(index(Coordinate::new(1, 0)) < index(Coordinate::new(1, 1)));
}

/// **Scenario**: compiling the same grid twice yields identical action
/// ordering and identical metadata.
#[test]
fn compilation_is_deterministic() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, NumberConstant::new(2.0));
    place(&mut grid, 2, 0, NumberConstant::new(3.0));
    place(
        &mut grid,
        1,
        0,
        with_bindings(
            Multiply::new(),
            &[("number1", Side::Left), ("number2", Side::Right)],
        ),
    );
    place(
        &mut grid,
        1,
        1,
        with_bindings(DebugTrick::new(), &[("target", Side::Top)]),
    );
    place(
        &mut grid,
        0,
        1,
        with_bindings(DebugTrick::new(), &[("target", Side::Top)]),
    );

    let first = compile(grid.clone(), "twice").unwrap();
    let second = compile(grid, "twice").unwrap();

    assert_eq!(action_positions(&first), action_positions(&second));
    let keys = |p: &gridflow::CompiledProgram| {
        p.actions().iter().map(|a| a.key()).collect::<Vec<_>>()
    };
    assert_eq!(keys(&first), keys(&second));
    assert_eq!(first.metadata(), second.metadata());
}

/// **Scenario**: a subgraph shared by two roots compiles exactly once, at
/// its first-encounter position.
#[test]
fn shared_subgraph_compiles_once() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, NumberConstant::new(1.0));
    place(
        &mut grid,
        0,
        1,
        with_bindings(DebugTrick::new(), &[("target", Side::Top)]),
    );
    place(
        &mut grid,
        1,
        0,
        with_bindings(DebugTrick::new(), &[("target", Side::Left)]),
    );

    let program = compile(grid, "shared").unwrap();
    let positions = action_positions(&program);

    let shared = Coordinate::new(0, 0);
    assert_eq!(positions.iter().filter(|p| **p == shared).count(), 1);
    // Root scan order puts (0, 1) first, so the shared constant lands at
    // the head of the list.
    assert_eq!(positions[0], shared);
    assert_eq!(positions.len(), 3);
}

/// **Scenario**: connectors never occupy an action slot, but their
/// metadata folds in exactly once.
#[test]
fn connector_is_transparent() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, NumberConstant::new(4.0));
    place(
        &mut grid,
        1,
        0,
        with_bindings(Connector::new(), &[("from", Side::Left)]),
    );
    place(
        &mut grid,
        2,
        0,
        with_bindings(DebugTrick::new(), &[("target", Side::Left)]),
    );

    let program = compile(grid, "through").unwrap();
    let positions = action_positions(&program);

    assert_eq!(
        positions,
        vec![Coordinate::new(0, 0), Coordinate::new(2, 0)]
    );
    // One point of complexity from the connector, one from the trick.
    assert_eq!(program.metadata().stat(Stat::Complexity), 2);
}

/// **Scenario**: both lanes of a cross connector resolve independently.
#[test]
fn cross_connector_carries_two_lanes() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 1, NumberConstant::new(1.0));
    place(&mut grid, 1, 0, NumberConstant::new(2.0));
    place(
        &mut grid,
        1,
        1,
        with_bindings(
            CrossConnector::new(),
            &[
                ("from1", Side::Left),
                ("to1", Side::Right),
                ("from2", Side::Top),
                ("to2", Side::Bottom),
            ],
        ),
    );
    place(
        &mut grid,
        2,
        1,
        with_bindings(DebugTrick::new(), &[("target", Side::Left)]),
    );
    place(
        &mut grid,
        1,
        2,
        with_bindings(DebugTrick::new(), &[("target", Side::Top)]),
    );

    let program = compile(grid, "cross").unwrap();
    let positions = action_positions(&program);

    assert_eq!(positions.len(), 4);
    assert!(positions.contains(&Coordinate::new(0, 1)));
    assert!(positions.contains(&Coordinate::new(1, 0)));
    assert!(!positions.contains(&Coordinate::new(1, 1)));
}

/// **Scenario**: a disabled optional parameter compiles.
#[test]
fn optional_disabled_param_compiles() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, DebugTrick::new());

    let program = compile(grid, "lonely").unwrap();
    assert_eq!(program.actions().len(), 1);
    assert_eq!(program.name(), "lonely");
}
