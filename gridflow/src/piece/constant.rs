//! Constant pieces: fixed numbers with a degenerate static range.

use crate::compiler::CompileError;
use crate::error::RuntimeError;
use crate::interval::Interval;
use crate::piece::{EvalScope, EvalType, ParamTable, Piece, PieceKind, RunScope, Value};

/// A literal number chosen by the author.
#[derive(Debug)]
pub struct NumberConstant {
    value: f64,
    table: ParamTable,
}

impl NumberConstant {
    pub fn new(value: f64) -> Self {
        NumberConstant {
            value,
            table: ParamTable::new(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Piece for NumberConstant {
    fn key(&self) -> &'static str {
        "constant_number"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Constant
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
        Ok(Some(Interval::point(self.value)))
    }

    fn execute(&self, _scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        Ok(Some(Value::Number(self.value)))
    }
}

/// The circle constant.
#[derive(Debug)]
pub struct PiConstant {
    table: ParamTable,
}

impl PiConstant {
    pub fn new() -> Self {
        PiConstant {
            table: ParamTable::new(),
        }
    }
}

impl Default for PiConstant {
    fn default() -> Self {
        PiConstant::new()
    }
}

impl Piece for PiConstant {
    fn key(&self) -> &'static str {
        "constant_pi"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Constant
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
        Ok(Some(Interval::point(std::f64::consts::PI)))
    }

    fn execute(&self, _scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        Ok(Some(Value::Number(std::f64::consts::PI)))
    }
}
