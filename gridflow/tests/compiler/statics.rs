//! Static interval analysis and metadata checks.

use gridflow::piece::{
    DebugTrick, Divide, NumberConstant, SaveVectorTrick, VectorConstruct,
};
use gridflow::{compile, CompileError, Coordinate, Grid, Side, Stat};

use crate::common::{place, with_bindings, SpanPiece};

fn save_vector_grid(slot_count: f64) -> Grid {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, NumberConstant::new(slot_count));
    place(&mut grid, 1, 1, VectorConstruct::new());
    place(
        &mut grid,
        1,
        0,
        with_bindings(
            SaveVectorTrick::new(),
            &[("number", Side::Left), ("target", Side::Bottom)],
        ),
    );
    grid
}

/// **Scenario**: a divisor range spanning zero fails statically, although
/// the runtime value (the range midpoint, 1.0) never divides by zero.
#[test]
fn divisor_spanning_zero_fails_statically() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, SpanPiece::new(-1.0, 3.0));
    place(&mut grid, 1, 1, NumberConstant::new(8.0));
    place(
        &mut grid,
        1,
        0,
        with_bindings(
            Divide::new(),
            &[("number1", Side::Bottom), ("number2", Side::Left)],
        ),
    );
    place(&mut grid, 2, 1, VectorConstruct::new());
    place(
        &mut grid,
        2,
        0,
        with_bindings(
            SaveVectorTrick::new(),
            &[("number", Side::Left), ("target", Side::Bottom)],
        ),
    );

    assert_eq!(
        compile(grid, "span").unwrap_err(),
        CompileError::DivisionByZero(Coordinate::new(1, 0))
    );
}

/// **Scenario**: static evaluation runs lazily: a divide-by-zero-prone
/// piece compiles when nothing pulls its interval.
#[test]
fn static_evaluation_is_lazy() {
    let mut grid = Grid::new(9, 9);
    place(&mut grid, 0, 0, NumberConstant::new(5.0));
    place(&mut grid, 2, 0, NumberConstant::new(0.0));
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

    // The debug trick's metadata needs no bound, so the divide's static
    // evaluation never runs and compilation succeeds.
    assert!(compile(grid, "lazy").is_ok());
}

/// **Scenario**: a save slot bound below one is rejected.
#[test]
fn slot_below_one_fails_non_positive() {
    assert_eq!(
        compile(save_vector_grid(0.5), "small").unwrap_err(),
        CompileError::NonPositiveValue(Coordinate::new(1, 0))
    );
}

/// **Scenario**: a pathological slot bound wraps the potency stat negative
/// and fails the end-of-compile check.
#[test]
fn wrapped_stat_fails_stat_overflow() {
    assert_eq!(
        compile(save_vector_grid(3.0e9), "huge").unwrap_err(),
        CompileError::StatOverflow
    );
}

/// **Scenario**: a sane save slot contributes potency proportional to its
/// upper bound.
#[test]
fn save_vector_potency_tracks_bound() {
    let program = compile(save_vector_grid(3.0), "sane").unwrap();
    assert_eq!(program.metadata().stat(Stat::Potency), 24);
    assert_eq!(program.metadata().stat(Stat::Complexity), 1);
}
