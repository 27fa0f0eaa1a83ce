//! Shared helpers for compiler integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use gridflow::{
    CompileError, Coordinate, EvalScope, EvalType, ExecutionContext, Grid, Interval, MockActor,
    ParamTable, Piece, PieceKind, RunScope, RuntimeError, Side, Value,
};

/// Places a piece, panicking on authoring mistakes in the test setup.
pub fn place(grid: &mut Grid, x: i32, y: i32, piece: impl Piece + 'static) {
    grid.place(Coordinate::new(x, y), Arc::new(piece))
        .expect("test cell is free and in bounds");
}

/// Applies parameter bindings to a freshly built piece.
pub fn with_bindings<P: Piece>(mut piece: P, bindings: &[(&str, Side)]) -> P {
    for (name, side) in bindings {
        piece
            .params_mut()
            .bind(name, *side)
            .expect("test binds declared params");
    }
    piece
}

/// Fresh context over a plain mock actor.
pub fn context() -> ExecutionContext {
    ExecutionContext::new(Arc::new(MockActor::new()), HashMap::new())
}

/// Fresh context over the given actor.
pub fn context_with(actor: Arc<MockActor>) -> ExecutionContext {
    ExecutionContext::new(actor, HashMap::new())
}

/// Coordinates of the compiled actions, in execution order.
pub fn action_positions(program: &gridflow::CompiledProgram) -> Vec<Coordinate> {
    program.actions().iter().map(|a| a.pos()).collect()
}

/// Number-typed test piece with an arbitrary static range, for exercising
/// interval analysis beyond point ranges. Runs as the range midpoint.
#[derive(Debug)]
pub struct SpanPiece {
    interval: Interval,
    table: ParamTable,
}

impl SpanPiece {
    pub fn new(min: f64, max: f64) -> Self {
        SpanPiece {
            interval: Interval::new(min, max),
            table: ParamTable::new(),
        }
    }
}

impl Piece for SpanPiece {
    fn key(&self) -> &'static str {
        "test_span"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Operator
    }

    fn evaluation_type(&self) -> EvalType {
        EvalType::Number
    }

    fn params(&self) -> &ParamTable {
        &self.table
    }

    fn params_mut(&mut self) -> &mut ParamTable {
        &mut self.table
    }

    fn static_evaluate(&self, _scope: &EvalScope<'_>) -> Result<Option<Interval>, CompileError> {
        Ok(Some(self.interval))
    }

    fn execute(&self, _scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        Ok(Some(Value::Number((self.interval.min + self.interval.max) / 2.0)))
    }
}
