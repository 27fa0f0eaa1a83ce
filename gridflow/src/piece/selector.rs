//! Selector pieces: read state from the actor rather than from parameters.

use crate::error::RuntimeError;
use crate::piece::{EvalType, ParamTable, Piece, PieceKind, RunScope, Value};

/// Yields the actor itself as a target.
#[derive(Debug)]
pub struct ActorSelector {
    table: ParamTable,
}

impl ActorSelector {
    pub fn new() -> Self {
        ActorSelector {
            table: ParamTable::new(),
        }
    }
}

impl Piece for ActorSelector {
    fn key(&self) -> &'static str {
        "selector_actor"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Selector
    }

    fn evaluation_type(&self) -> EvalType {
        EvalType::Target
    }

    fn params(&self) -> &ParamTable {
        &self.table
    }

    fn params_mut(&mut self) -> &mut ParamTable {
        &mut self.table
    }

    fn execute(&self, scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        Ok(Some(Value::Target(scope.actor().self_target())))
    }
}

/// Yields the actor's current position.
#[derive(Debug)]
pub struct ActorPositionSelector {
    table: ParamTable,
}

impl ActorPositionSelector {
    pub fn new() -> Self {
        ActorPositionSelector {
            table: ParamTable::new(),
        }
    }
}

impl Piece for ActorPositionSelector {
    fn key(&self) -> &'static str {
        "selector_actor_position"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Selector
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
        Ok(Some(Value::Vector(scope.actor().position())))
    }
}

/// Reads a vector previously saved to the actor's device. Slots are
/// numbered from one in authored data; an empty slot reads as the zero
/// vector.
#[derive(Debug)]
pub struct SavedVectorSelector {
    slot: usize,
    table: ParamTable,
}

impl SavedVectorSelector {
    /// `slot` is the 1-based authored slot number.
    pub fn new(slot: usize) -> Self {
        SavedVectorSelector {
            slot: slot.saturating_sub(1),
            table: ParamTable::new(),
        }
    }
}

impl Piece for SavedVectorSelector {
    fn key(&self) -> &'static str {
        "selector_saved_vector"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Selector
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
        let actor = scope.actor();
        let device = actor.device().ok_or(RuntimeError::NoActiveDevice)?;
        let stored = device.stored_vector(self.slot).unwrap_or_default();
        Ok(Some(Value::Vector(stored)))
    }
}
