//! Piece model: typed graph vertices with side-bound parameters.
//!
//! A piece exposes ordered parameters bound to sides, an evaluation type,
//! a static evaluator over [`Interval`]s and a runtime executor. Pieces
//! never hold references to other pieces; all neighbor access goes through
//! the scope types ([`EvalScope`], [`RunScope`]), which carry the grid
//! handle and the piece's own coordinate.

mod connector;
mod constant;
mod number_ops;
mod registry;
mod selector;
mod trick;
mod vector_ops;

pub use connector::{Connector, CrossConnector};
pub use constant::{NumberConstant, PiConstant};
pub use number_ops::{Add, Divide, Maximum, Minimum, Multiply, Subtract};
pub use registry::{PieceFactory, PieceRegistry, RegistryError};
pub use selector::{ActorPositionSelector, ActorSelector, SavedVectorSelector};
pub use trick::{
    DebugTrick, MarkPositionTrick, PushTargetTrick, SaveVectorTrick, SLOT_LOCK_PREFIX,
};
pub use vector_ops::{VectorConstruct, VectorDotProduct};

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::compiler::CompileError;
use crate::context::{Actor, ExecutionContext};
use crate::error::RuntimeError;
use crate::grid::{Coordinate, Grid, Side};
use crate::interval::Interval;

/// 3-component vector value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3 { x, y, z }
    }

    pub fn dot(self, other: Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Vector3) -> f64 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z).length()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Opaque host handle to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TargetId(pub u64);

/// A value flowing between pieces at run time. "No value" is the absence of
/// a cache entry, not a variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Vector(Vector3),
    Target(TargetId),
}

impl Value {
    pub fn eval_type(&self) -> EvalType {
        match self {
            Value::Number(_) => EvalType::Number,
            Value::Vector(_) => EvalType::Vector,
            Value::Target(_) => EvalType::Target,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Vector(v) => write!(f, "{v}"),
            Value::Target(t) => write!(f, "target #{}", t.0),
        }
    }
}

/// What a piece evaluates to. `None` tags pure-effect pieces that other
/// pieces cannot read a value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalType {
    Number,
    Vector,
    Target,
    None,
}

/// Broad piece families. `Trick` pieces are the program's terminal actions
/// and seed the compile traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Constant,
    Operator,
    Selector,
    Connector,
    Trick,
}

impl PieceKind {
    /// Whether pieces of this kind are roots of the compile walk.
    pub fn is_terminal(self) -> bool {
        matches!(self, PieceKind::Trick)
    }
}

/// Required type of a parameter. `Any` accepts every piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Number,
    Vector,
    Target,
    Any,
}

/// A single declared parameter of a piece.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub can_disable: bool,
}

impl Param {
    pub fn new(name: &'static str, kind: ParamKind, can_disable: bool) -> Self {
        Param {
            name,
            kind,
            can_disable,
        }
    }

    /// Whether `candidate` may source this parameter.
    pub fn can_accept(&self, candidate: &dyn Piece) -> bool {
        match self.kind {
            ParamKind::Any => true,
            ParamKind::Number => candidate.evaluation_type() == EvalType::Number,
            ParamKind::Vector => candidate.evaluation_type() == EvalType::Vector,
            ParamKind::Target => candidate.evaluation_type() == EvalType::Target,
        }
    }
}

/// A declared parameter together with its currently bound side.
#[derive(Debug, Clone)]
pub struct ParamSlot {
    pub param: Param,
    pub side: Side,
}

/// Binding a parameter that the piece does not declare.
#[derive(Debug, Error, PartialEq)]
#[error("piece has no parameter named \"{0}\"")]
pub struct BindError(pub String);

/// Ordered parameter slots of one piece. Insertion order is display-only
/// and never semantic; bindings default to `Side::Off`.
#[derive(Debug, Clone, Default)]
pub struct ParamTable {
    slots: Vec<ParamSlot>,
}

impl ParamTable {
    pub fn new() -> Self {
        ParamTable { slots: Vec::new() }
    }

    pub fn add(&mut self, param: Param) {
        self.slots.push(ParamSlot {
            param,
            side: Side::Off,
        });
    }

    pub fn slots(&self) -> &[ParamSlot] {
        &self.slots
    }

    /// Slot by declaration index. Pieces address their own slots through
    /// per-piece index constants.
    pub fn slot(&self, index: usize) -> &ParamSlot {
        &self.slots[index]
    }

    pub fn side(&self, index: usize) -> Side {
        self.slots[index].side
    }

    /// Binds a parameter by name; used by authoring hosts.
    pub fn bind(&mut self, name: &str, side: Side) -> Result<(), BindError> {
        match self.slots.iter_mut().find(|s| s.param.name == name) {
            Some(slot) => {
                slot.side = side;
                Ok(())
            }
            None => Err(BindError(name.to_string())),
        }
    }
}

/// A dataflow graph vertex.
///
/// Implementations are registered in a [`PieceRegistry`] under a stable
/// string key and placed on a [`Grid`] behind `Arc<dyn Piece>`.
pub trait Piece: fmt::Debug {
    /// Stable type key, as registered.
    fn key(&self) -> &'static str;

    fn kind(&self) -> PieceKind;

    fn evaluation_type(&self) -> EvalType;

    fn params(&self) -> &ParamTable;

    fn params_mut(&mut self) -> &mut ParamTable;

    /// Compile-time range of this piece's output, or `None` when the piece
    /// has no numeric range (vectors, targets, pure effects). Must not
    /// mutate grid or program state.
    fn static_evaluate(&self, scope: &EvalScope<'_>) -> Result<Option<Interval>, CompileError> {
        let _ = scope;
        Ok(None)
    }

    /// Folds this piece's static stats into the program metadata. Invoked
    /// once per piece per compilation.
    fn add_to_metadata(
        &self,
        scope: &EvalScope<'_>,
        meta: &mut crate::compiler::Metadata,
    ) -> Result<(), CompileError> {
        let _ = (scope, meta);
        Ok(())
    }

    /// Runs this piece. A `Some` result is cached under the piece's
    /// coordinate for downstream reads in the same run.
    fn execute(&self, scope: &mut RunScope<'_>) -> Result<Option<Value>, RuntimeError>;

    /// Connector pieces return their redirection behavior here; they are
    /// stepped through during resolution and never occupy an action slot.
    fn as_redirector(&self) -> Option<&dyn Redirector> {
        None
    }
}

/// Side remapping of a connector piece.
pub trait Redirector {
    /// Maps the incoming travel direction to the side the lookup should
    /// continue along from this piece; `Side::Off` ends the lookup with no
    /// source.
    fn remap_side(&self, incoming: Side) -> Side;
}

/// Compile-time view of one piece's surroundings: grid handle plus the
/// piece's own coordinate. Used by `static_evaluate` and `add_to_metadata`.
pub struct EvalScope<'a> {
    grid: &'a Grid,
    pos: Coordinate,
}

impl<'a> EvalScope<'a> {
    pub(crate) fn new(grid: &'a Grid, pos: Coordinate) -> Self {
        EvalScope { grid, pos }
    }

    pub fn pos(&self) -> Coordinate {
        self.pos
    }

    /// Static evaluation of the piece sourcing `slot`, resolved through
    /// connectors. `None` when the slot is disabled, unresolved, type
    /// incompatible, or the source has no numeric range.
    pub fn interval(&self, slot: &ParamSlot) -> Result<Option<Interval>, CompileError> {
        if !slot.side.is_enabled() {
            return Ok(None);
        }
        let resolved = self.grid.resolve(self.pos, slot.side, |_, _| Ok(()))?;
        let Some((source_pos, source)) = resolved else {
            return Ok(None);
        };
        if !slot.param.can_accept(source.as_ref()) {
            return Ok(None);
        }
        source.static_evaluate(&EvalScope::new(self.grid, source_pos))
    }

    /// Like [`EvalScope::interval`], failing with `NullParam` at this
    /// piece's coordinate when no range is available.
    pub fn required_interval(&self, slot: &ParamSlot) -> Result<Interval, CompileError> {
        self.interval(slot)?
            .ok_or(CompileError::NullParam(self.pos))
    }

    /// Like [`EvalScope::interval`] with a default; for optional slots.
    pub fn interval_or(
        &self,
        slot: &ParamSlot,
        default: Interval,
    ) -> Result<Interval, CompileError> {
        Ok(self.interval(slot)?.unwrap_or(default))
    }
}

/// Runtime view of one piece: grid handle, own coordinate and the run's
/// [`ExecutionContext`]. Parameter reads re-resolve the bound side through
/// the same redirection rule as compile time, then read the source
/// coordinate from the run cache; a read before the source has run yields
/// no value rather than forcing eager computation.
pub struct RunScope<'a> {
    grid: &'a Grid,
    pos: Coordinate,
    context: &'a mut ExecutionContext,
}

impl<'a> RunScope<'a> {
    pub(crate) fn new(grid: &'a Grid, pos: Coordinate, context: &'a mut ExecutionContext) -> Self {
        RunScope { grid, pos, context }
    }

    pub fn pos(&self) -> Coordinate {
        self.pos
    }

    pub fn context(&self) -> &ExecutionContext {
        self.context
    }

    pub fn context_mut(&mut self) -> &mut ExecutionContext {
        self.context
    }

    pub fn actor(&self) -> Arc<dyn Actor> {
        Arc::clone(self.context.actor())
    }

    /// Whether `pos` lies within the allowed range of the actor.
    pub fn is_in_range(&self, pos: Vector3) -> bool {
        self.context.is_in_range(pos)
    }

    /// Cached value of the piece sourcing `slot`, if any. A NaN or infinite
    /// number fails here, at the point of read.
    pub fn value(&self, slot: &ParamSlot) -> Result<Option<Value>, RuntimeError> {
        let Some(value) = self.raw_value(slot) else {
            return Ok(None);
        };
        if let Value::Number(n) = value {
            if !n.is_finite() {
                return Err(RuntimeError::NaNOrInfinite);
            }
        }
        Ok(Some(value.clone()))
    }

    /// Required number; a missing value is a missing target.
    pub fn number(&self, slot: &ParamSlot) -> Result<f64, RuntimeError> {
        match self.value(slot)? {
            Some(Value::Number(n)) => Ok(n),
            _ => Err(RuntimeError::NullTarget),
        }
    }

    /// Optional number, for slots whose param can disable.
    pub fn optional_number(&self, slot: &ParamSlot) -> Result<Option<f64>, RuntimeError> {
        match self.value(slot)? {
            Some(Value::Number(n)) => Ok(Some(n)),
            _ => Ok(None),
        }
    }

    /// Required vector.
    pub fn vector(&self, slot: &ParamSlot) -> Result<Vector3, RuntimeError> {
        match self.value(slot)? {
            Some(Value::Vector(v)) => Ok(v),
            _ => Err(RuntimeError::NullVector),
        }
    }

    /// Required target.
    pub fn target(&self, slot: &ParamSlot) -> Result<TargetId, RuntimeError> {
        match self.value(slot)? {
            Some(Value::Target(t)) => Ok(t),
            _ => Err(RuntimeError::NullTarget),
        }
    }

    fn raw_value(&self, slot: &ParamSlot) -> Option<&Value> {
        if !slot.side.is_enabled() {
            return None;
        }
        let (source_pos, source) = self
            .grid
            .resolve(self.pos, slot.side, |_, _| Ok(()))
            .ok()
            .flatten()?;
        if !slot.param.can_accept(source.as_ref()) {
            return None;
        }
        self.context.cached(source_pos)
    }
}
