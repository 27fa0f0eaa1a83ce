//! Connector pieces: forward a parameter lookup to another side without
//! producing a value or occupying an action slot.

use crate::compiler::{CompileError, Metadata, Stat};
use crate::error::RuntimeError;
use crate::grid::Side;
use crate::piece::{
    EvalScope, EvalType, Param, ParamKind, ParamTable, Piece, PieceKind, Redirector, RunScope,
    Value,
};

/// Single-lane connector: every lookup reaching it continues along its
/// bound `from` side.
#[derive(Debug)]
pub struct Connector {
    table: ParamTable,
}

impl Connector {
    const FROM: usize = 0;

    pub fn new() -> Self {
        let mut table = ParamTable::new();
        table.add(Param::new("from", ParamKind::Any, false));
        Connector { table }
    }
}

impl Piece for Connector {
    fn key(&self) -> &'static str {
        "connector"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Connector
    }

    fn evaluation_type(&self) -> EvalType {
        EvalType::None
    }

    fn params(&self) -> &ParamTable {
        &self.table
    }

    fn params_mut(&mut self) -> &mut ParamTable {
        &mut self.table
    }

    fn add_to_metadata(
        &self,
        _scope: &EvalScope<'_>,
        meta: &mut Metadata,
    ) -> Result<(), CompileError> {
        meta.add_stat(Stat::Complexity, 1);
        Ok(())
    }

    fn execute(&self, _scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        Ok(None)
    }

    fn as_redirector(&self) -> Option<&dyn Redirector> {
        Some(self)
    }
}

impl Redirector for Connector {
    fn remap_side(&self, _incoming: Side) -> Side {
        self.table.side(Self::FROM)
    }
}

/// Two independent lanes crossing one cell. A lookup arriving opposite one
/// of the `to` sides continues along the matching `from` side; anything
/// else finds no source.
#[derive(Debug)]
pub struct CrossConnector {
    table: ParamTable,
}

impl CrossConnector {
    const FROM1: usize = 0;
    const TO1: usize = 1;
    const FROM2: usize = 2;
    const TO2: usize = 3;

    pub fn new() -> Self {
        let mut table = ParamTable::new();
        table.add(Param::new("from1", ParamKind::Any, false));
        table.add(Param::new("to1", ParamKind::Any, false));
        table.add(Param::new("from2", ParamKind::Any, false));
        table.add(Param::new("to2", ParamKind::Any, false));
        CrossConnector { table }
    }
}

impl Piece for CrossConnector {
    fn key(&self) -> &'static str {
        "connector_cross"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Connector
    }

    fn evaluation_type(&self) -> EvalType {
        EvalType::None
    }

    fn params(&self) -> &ParamTable {
        &self.table
    }

    fn params_mut(&mut self) -> &mut ParamTable {
        &mut self.table
    }

    fn add_to_metadata(
        &self,
        scope: &EvalScope<'_>,
        meta: &mut Metadata,
    ) -> Result<(), CompileError> {
        meta.add_stat(Stat::Complexity, 1);
        // Lanes sharing a side would make the remapping ambiguous.
        let sides: Vec<Side> = self.table.slots().iter().map(|s| s.side).collect();
        for (i, side) in sides.iter().enumerate() {
            if sides[..i].contains(side) {
                return Err(CompileError::InvalidParam(scope.pos()));
            }
        }
        Ok(())
    }

    fn execute(&self, _scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        Ok(None)
    }

    fn as_redirector(&self) -> Option<&dyn Redirector> {
        Some(self)
    }
}

impl Redirector for CrossConnector {
    fn remap_side(&self, incoming: Side) -> Side {
        if self.table.side(Self::TO1).opposite() == incoming {
            self.table.side(Self::FROM1)
        } else if self.table.side(Self::TO2).opposite() == incoming {
            self.table.side(Self::FROM2)
        } else {
            Side::Off
        }
    }
}
