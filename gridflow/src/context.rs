//! Per-run execution state and the host-facing actor seam.
//!
//! An [`ExecutionContext`] is created for exactly one run and discarded
//! afterwards: it holds the coordinate-keyed value cache, a string-keyed
//! custom data bag shared by pieces, and the actor on whose behalf the
//! program runs. World effects and entity access go through the [`Actor`]
//! and [`Device`] traits; the engine itself never touches a world.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::RuntimeError;
use crate::grid::Coordinate;
use crate::piece::{TargetId, Value, Vector3};

/// Maximum distance from the actor a position-affecting piece may reach.
pub const MAX_RANGE: f64 = 32.0;

/// The entity a program runs on behalf of. Implemented by the host;
/// implementations use interior mutability where effects need recording
/// (the engine is single-threaded, no `Send`/`Sync` is required).
pub trait Actor {
    /// Current position of the actor.
    fn position(&self) -> Vector3;

    /// Handle the actor uses to refer to itself.
    fn self_target(&self) -> TargetId;

    /// Attached storage device, if any.
    fn device(&self) -> Option<&dyn Device>;

    /// Marks a world position. The visual consequence is host business.
    fn mark_position(&self, pos: Vector3);

    /// Applies a push to a target; hosts report immunity as
    /// [`RuntimeError::ImmuneTarget`].
    fn push_target(&self, target: TargetId, direction: Vector3) -> Result<(), RuntimeError>;
}

/// Slot-addressed vector storage attached to an actor.
pub trait Device {
    fn store_vector(&self, slot: usize, value: Vector3);

    fn stored_vector(&self, slot: usize) -> Option<Vector3>;
}

/// Mutable state of one program run.
pub struct ExecutionContext {
    actor: Arc<dyn Actor>,
    /// Free-form data pieces share within one run (e.g. slot locks).
    pub custom_data: HashMap<String, Value>,
    cache: HashMap<Coordinate, Value>,
}

impl ExecutionContext {
    pub fn new(actor: Arc<dyn Actor>, custom_data: HashMap<String, Value>) -> Self {
        ExecutionContext {
            actor,
            custom_data,
            cache: HashMap::new(),
        }
    }

    pub fn actor(&self) -> &Arc<dyn Actor> {
        &self.actor
    }

    /// Value computed at `pos` earlier in this run, if any.
    pub fn cached(&self, pos: Coordinate) -> Option<&Value> {
        self.cache.get(&pos)
    }

    pub(crate) fn cache_insert(&mut self, pos: Coordinate, value: Value) {
        self.cache.insert(pos, value);
    }

    /// Whether `pos` lies within [`MAX_RANGE`] of the actor.
    pub fn is_in_range(&self, pos: Vector3) -> bool {
        self.actor.position().distance(pos) <= MAX_RANGE
    }
}

/// In-memory actor for dev and tests: no world behind it, records marks and
/// pushes so callers can assert on them.
#[derive(Default)]
pub struct MockActor {
    pub position: Vector3,
    pub target: TargetId,
    pub device: Option<MockDevice>,
    /// When set, `push_target` reports the target as immune.
    pub immune: bool,
    pub marks: RefCell<Vec<Vector3>>,
    pub pushes: RefCell<Vec<(TargetId, Vector3)>>,
}

impl MockActor {
    pub fn new() -> Self {
        MockActor::default()
    }

    /// Actor with an empty storage device attached.
    pub fn with_device() -> Self {
        MockActor {
            device: Some(MockDevice::new()),
            ..MockActor::default()
        }
    }

    /// Positions marked so far, in order.
    pub fn marks(&self) -> Vec<Vector3> {
        self.marks.borrow().clone()
    }

    /// Pushes applied so far, in order.
    pub fn pushes(&self) -> Vec<(TargetId, Vector3)> {
        self.pushes.borrow().clone()
    }
}

impl Actor for MockActor {
    fn position(&self) -> Vector3 {
        self.position
    }

    fn self_target(&self) -> TargetId {
        self.target
    }

    fn device(&self) -> Option<&dyn Device> {
        self.device.as_ref().map(|d| d as &dyn Device)
    }

    fn mark_position(&self, pos: Vector3) {
        self.marks.borrow_mut().push(pos);
    }

    fn push_target(&self, target: TargetId, direction: Vector3) -> Result<(), RuntimeError> {
        if self.immune {
            return Err(RuntimeError::ImmuneTarget);
        }
        self.pushes.borrow_mut().push((target, direction));
        Ok(())
    }
}

/// In-memory [`Device`] backing [`MockActor`].
#[derive(Default)]
pub struct MockDevice {
    slots: RefCell<BTreeMap<usize, Vector3>>,
}

impl MockDevice {
    pub fn new() -> Self {
        MockDevice::default()
    }

    /// Stored vectors in slot order.
    pub fn slots(&self) -> Vec<(usize, Vector3)> {
        self.slots.borrow().iter().map(|(k, v)| (*k, *v)).collect()
    }
}

impl Device for MockDevice {
    fn store_vector(&self, slot: usize, value: Vector3) {
        self.slots.borrow_mut().insert(slot, value);
    }

    fn stored_vector(&self, slot: usize) -> Option<Vector3> {
        self.slots.borrow().get(&slot).copied()
    }
}
