//! Vector operators. Vector pieces carry no numeric range, so their static
//! evaluation yields no interval.

use crate::error::RuntimeError;
use crate::piece::{
    EvalType, Param, ParamKind, ParamTable, Piece, PieceKind, RunScope, Value, Vector3,
};

/// Builds a vector from up to three number components; a disabled component
/// reads as zero.
#[derive(Debug)]
pub struct VectorConstruct {
    table: ParamTable,
}

impl VectorConstruct {
    const X: usize = 0;
    const Y: usize = 1;
    const Z: usize = 2;

    pub fn new() -> Self {
        let mut table = ParamTable::new();
        table.add(Param::new("x", ParamKind::Number, true));
        table.add(Param::new("y", ParamKind::Number, true));
        table.add(Param::new("z", ParamKind::Number, true));
        VectorConstruct { table }
    }
}

impl Piece for VectorConstruct {
    fn key(&self) -> &'static str {
        "operator_vector_construct"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Operator
    }

    fn evaluation_type(&self) -> EvalType {
        EvalType::Vector
    }

    fn params(&self) -> &ParamTable {
        &self.table
    }

    fn params_mut(&mut self) -> &mut ParamTable {
        &mut self.table
    }

    fn execute(&self, scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        let x = scope.optional_number(self.table.slot(Self::X))?.unwrap_or(0.0);
        let y = scope.optional_number(self.table.slot(Self::Y))?.unwrap_or(0.0);
        let z = scope.optional_number(self.table.slot(Self::Z))?.unwrap_or(0.0);
        Ok(Some(Value::Vector(Vector3::new(x, y, z))))
    }
}

/// Dot product of two vectors.
#[derive(Debug)]
pub struct VectorDotProduct {
    table: ParamTable,
}

impl VectorDotProduct {
    const VEC1: usize = 0;
    const VEC2: usize = 1;

    pub fn new() -> Self {
        let mut table = ParamTable::new();
        table.add(Param::new("vector1", ParamKind::Vector, false));
        table.add(Param::new("vector2", ParamKind::Vector, false));
        VectorDotProduct { table }
    }
}

impl Piece for VectorDotProduct {
    fn key(&self) -> &'static str {
        "operator_vector_dot_product"
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

    fn execute(&self, scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        let v1 = scope.vector(self.table.slot(Self::VEC1))?;
        let v2 = scope.vector(self.table.slot(Self::VEC2))?;
        Ok(Some(Value::Number(v1.dot(v2))))
    }
}
