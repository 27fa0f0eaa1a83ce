//! Compilation failures: missing roots and names, binding violations,
//! parameter cycles through pieces and connectors.

use gridflow::piece::{
    Add, Connector, CrossConnector, DebugTrick, Divide, MarkPositionTrick, NumberConstant,
    PiConstant, VectorConstruct,
};
use gridflow::{compile, CompileError, Coordinate, Grid, Side};

use crate::common::{place, with_bindings};

/// **Scenario**: a grid holding only a constant has nothing to run.
#[test]
fn constant_without_root_fails_no_roots() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, PiConstant::new());

    assert_eq!(compile(grid, "pi").unwrap_err(), CompileError::NoRoots);
}

/// **Scenario**: a valid grid with an empty name is rejected after the walk.
#[test]
fn empty_name_fails_no_name() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, DebugTrick::new());

    assert_eq!(compile(grid, "").unwrap_err(), CompileError::NoName);
}

/// **Scenario**: two operators reading each other are a parameter cycle.
#[test]
fn direct_cycle_fails_infinite_loop() {
    let mut grid = Grid::new(9, 9);
    place(
        &mut grid,
        0,
        0,
        with_bindings(Add::new(), &[("number1", Side::Right), ("number2", Side::Bottom)]),
    );
    place(
        &mut grid,
        1,
        0,
        with_bindings(Add::new(), &[("number1", Side::Left), ("number2", Side::Bottom)]),
    );
    place(
        &mut grid,
        0,
        1,
        with_bindings(DebugTrick::new(), &[("target", Side::Top)]),
    );

    assert_eq!(
        compile(grid, "loop").unwrap_err(),
        CompileError::InfiniteLoop(Coordinate::new(0, 0))
    );
}

/// **Scenario**: a cycle running only through connectors is still an
/// infinite loop, not a redirection-limit overflow.
#[test]
fn connector_cycle_fails_infinite_loop() {
    let mut grid = Grid::new(9, 9);
    place(
        &mut grid,
        0,
        0,
        with_bindings(DebugTrick::new(), &[("target", Side::Right)]),
    );
    place(
        &mut grid,
        1,
        0,
        with_bindings(Connector::new(), &[("from", Side::Right)]),
    );
    place(
        &mut grid,
        2,
        0,
        with_bindings(Connector::new(), &[("from", Side::Left)]),
    );

    assert!(matches!(
        compile(grid, "ring").unwrap_err(),
        CompileError::InfiniteLoop(_)
    ));
}

/// **Scenario**: two enabled parameters on one side always fail, even
/// though each binding alone would be type-correct.
#[test]
fn shared_side_fails_same_side_params() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, NumberConstant::new(1.0));
    place(
        &mut grid,
        1,
        0,
        with_bindings(Add::new(), &[("number1", Side::Left), ("number2", Side::Left)]),
    );
    place(
        &mut grid,
        1,
        1,
        with_bindings(DebugTrick::new(), &[("target", Side::Top)]),
    );

    assert_eq!(
        compile(grid, "clash").unwrap_err(),
        CompileError::SameSideParams(Coordinate::new(1, 0))
    );
}

/// **Scenario**: a disabled required parameter is rejected.
#[test]
fn disabled_required_param_fails_unset_param() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, NumberConstant::new(1.0));
    place(
        &mut grid,
        1,
        0,
        with_bindings(Add::new(), &[("number1", Side::Left)]),
    );
    place(
        &mut grid,
        1,
        1,
        with_bindings(DebugTrick::new(), &[("target", Side::Top)]),
    );

    assert_eq!(
        compile(grid, "unset").unwrap_err(),
        CompileError::UnsetParam(Coordinate::new(1, 0))
    );
}

/// **Scenario**: an enabled parameter pointing at an empty cell has no
/// source.
#[test]
fn empty_neighbor_fails_null_param() {
    let mut grid = Grid::new(9, 9);
    place(
        &mut grid,
        0,
        0,
        with_bindings(MarkPositionTrick::new(), &[("position", Side::Right)]),
    );

    assert_eq!(
        compile(grid, "hollow").unwrap_err(),
        CompileError::NullParam(Coordinate::new(0, 0))
    );
}

/// **Scenario**: a number parameter sourced by a vector piece is type
/// incompatible.
#[test]
fn wrong_source_type_fails_invalid_param() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, VectorConstruct::new());
    place(&mut grid, 2, 0, NumberConstant::new(1.0));
    place(
        &mut grid,
        1,
        0,
        with_bindings(
            Divide::new(),
            &[("number1", Side::Left), ("number2", Side::Right)],
        ),
    );
    place(
        &mut grid,
        1,
        1,
        with_bindings(DebugTrick::new(), &[("target", Side::Top)]),
    );

    assert_eq!(
        compile(grid, "mismatch").unwrap_err(),
        CompileError::InvalidParam(Coordinate::new(1, 0))
    );
}

/// **Scenario**: a cross connector whose lanes share a side fails the
/// side-uniqueness check during its first-discovery validation.
#[test]
fn cross_connector_duplicate_lane_sides_fail() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 2, 0, NumberConstant::new(1.0));
    place(
        &mut grid,
        1,
        0,
        with_bindings(
            CrossConnector::new(),
            &[
                ("from1", Side::Right),
                ("to1", Side::Left),
                ("from2", Side::Top),
                ("to2", Side::Left),
            ],
        ),
    );
    place(
        &mut grid,
        0,
        0,
        with_bindings(DebugTrick::new(), &[("target", Side::Right)]),
    );

    assert_eq!(
        compile(grid, "tangled").unwrap_err(),
        CompileError::SameSideParams(Coordinate::new(1, 0))
    );
}
