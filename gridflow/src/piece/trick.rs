//! Trick pieces: the terminal actions of a program. Tricks produce no value
//! for other pieces; their effects go through the actor.

use crate::compiler::{CompileError, Metadata, Stat};
use crate::error::RuntimeError;
use crate::logging;
use crate::piece::{
    EvalScope, EvalType, Param, ParamKind, ParamTable, Piece, PieceKind, RunScope, Value,
};

/// Custom-data key prefix marking a device slot as written this run.
pub const SLOT_LOCK_PREFIX: &str = "gridflow:slot_locked/";

/// Logs whatever its parameter evaluates to. The one trick that is useful
/// with nothing wired in.
#[derive(Debug)]
pub struct DebugTrick {
    table: ParamTable,
}

impl DebugTrick {
    const TARGET: usize = 0;

    pub fn new() -> Self {
        let mut table = ParamTable::new();
        table.add(Param::new("target", ParamKind::Any, true));
        DebugTrick { table }
    }
}

impl Piece for DebugTrick {
    fn key(&self) -> &'static str {
        "trick_debug"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Trick
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

    fn execute(&self, scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        let value = scope.value(self.table.slot(Self::TARGET))?;
        logging::log_piece_value(scope.pos(), value.as_ref());
        Ok(None)
    }
}

/// Saves a vector into a numbered device slot. Each slot is written at most
/// once per run; a lock entry in the run's custom data marks it used.
#[derive(Debug)]
pub struct SaveVectorTrick {
    table: ParamTable,
}

impl SaveVectorTrick {
    const NUMBER: usize = 0;
    const TARGET: usize = 1;

    pub fn new() -> Self {
        let mut table = ParamTable::new();
        table.add(Param::new("number", ParamKind::Number, false));
        table.add(Param::new("target", ParamKind::Vector, false));
        SaveVectorTrick { table }
    }
}

impl Piece for SaveVectorTrick {
    fn key(&self) -> &'static str {
        "trick_save_vector"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Trick
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
        let slot_bound = scope.required_interval(self.table.slot(Self::NUMBER))?;
        if slot_bound.max < 1.0 {
            return Err(CompileError::NonPositiveValue(scope.pos()));
        }
        meta.add_stat(Stat::Potency, (slot_bound.max as i32).wrapping_mul(8));
        Ok(())
    }

    fn execute(&self, scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        let number = scope.number(self.table.slot(Self::NUMBER))?;
        let target = scope.vector(self.table.slot(Self::TARGET))?;

        let slot = number as i64 - 1;
        if slot < 0 {
            return Err(RuntimeError::Failed("vector slot must be positive".into()));
        }
        let lock_key = format!("{SLOT_LOCK_PREFIX}{slot}");
        if scope.context().custom_data.contains_key(&lock_key) {
            return Ok(None);
        }

        let actor = scope.actor();
        let device = actor.device().ok_or(RuntimeError::NoActiveDevice)?;
        device.store_vector(slot as usize, target);

        scope
            .context_mut()
            .custom_data
            .insert(lock_key, Value::Number(0.0));
        Ok(None)
    }
}

/// Marks a world position through the actor; the position must lie within
/// the allowed range.
#[derive(Debug)]
pub struct MarkPositionTrick {
    table: ParamTable,
}

impl MarkPositionTrick {
    const POSITION: usize = 0;

    pub fn new() -> Self {
        let mut table = ParamTable::new();
        table.add(Param::new("position", ParamKind::Vector, false));
        MarkPositionTrick { table }
    }
}

impl Piece for MarkPositionTrick {
    fn key(&self) -> &'static str {
        "trick_mark_position"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Trick
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
        meta.add_stat(Stat::Cost, 10);
        meta.add_stat(Stat::Potency, 10);
        Ok(())
    }

    fn execute(&self, scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        let position = scope.vector(self.table.slot(Self::POSITION))?;
        if !scope.is_in_range(position) {
            return Err(RuntimeError::OutsideRadius);
        }
        scope.actor().mark_position(position);
        Ok(None)
    }
}

/// Pushes a target along a direction through the actor; the host may
/// report the target as immune.
#[derive(Debug)]
pub struct PushTargetTrick {
    table: ParamTable,
}

impl PushTargetTrick {
    const TARGET: usize = 0;
    const DIRECTION: usize = 1;

    pub fn new() -> Self {
        let mut table = ParamTable::new();
        table.add(Param::new("target", ParamKind::Target, false));
        table.add(Param::new("direction", ParamKind::Vector, false));
        PushTargetTrick { table }
    }
}

impl Piece for PushTargetTrick {
    fn key(&self) -> &'static str {
        "trick_push_target"
    }

    fn kind(&self) -> PieceKind {
        PieceKind::Trick
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
        meta.add_stat(Stat::Cost, 20);
        meta.add_stat(Stat::Potency, 15);
        Ok(())
    }

    fn execute(&self, scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError> {
        let target = scope.target(self.table.slot(Self::TARGET))?;
        let direction = scope.vector(self.table.slot(Self::DIRECTION))?;
        scope.actor().push_target(target, direction)?;
        Ok(None)
    }
}
