//! Piece registry: stable string keys to factory functions.
//!
//! Hosts deserialize authored grids through the registry; an unmatched key
//! is a data-format error, never a crash. Factories take an opaque JSON
//! payload for pieces that carry authored data (constants, slot numbers).

use std::collections::HashMap;

use thiserror::Error;

use crate::piece::{
    ActorPositionSelector, ActorSelector, Add, Connector, CrossConnector, DebugTrick, Divide,
    MarkPositionTrick, Maximum, Minimum, Multiply, NumberConstant, PiConstant, Piece,
    PushTargetTrick, SaveVectorTrick, SavedVectorSelector, Subtract, VectorConstruct,
    VectorDotProduct,
};

/// Data-format error while constructing a piece from authored data.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("unknown piece key: {0}")]
    UnknownKey(String),

    #[error("invalid data for piece {key}: {message}")]
    InvalidData { key: String, message: String },
}

/// Constructs a piece from its authored JSON payload (`Null` when the
/// author supplied none).
pub type PieceFactory = fn(&serde_json::Value) -> Result<Box<dyn Piece>, RegistryError>;

/// Maps stable piece keys to factories. Populated once at startup.
#[derive(Default)]
pub struct PieceRegistry {
    factories: HashMap<String, PieceFactory>,
}

impl PieceRegistry {
    /// Empty registry, for hosts that bring their own piece set.
    pub fn new() -> Self {
        PieceRegistry::default()
    }

    /// Registry holding every built-in piece.
    pub fn with_builtins() -> Self {
        let mut registry = PieceRegistry::new();
        registry.register("constant_number", number_constant);
        registry.register("constant_pi", |_| Ok(Box::new(PiConstant::new())));
        registry.register("operator_add", |_| Ok(Box::new(Add::new())));
        registry.register("operator_subtract", |_| Ok(Box::new(Subtract::new())));
        registry.register("operator_multiply", |_| Ok(Box::new(Multiply::new())));
        registry.register("operator_divide", |_| Ok(Box::new(Divide::new())));
        registry.register("operator_min", |_| Ok(Box::new(Minimum::new())));
        registry.register("operator_max", |_| Ok(Box::new(Maximum::new())));
        registry.register("operator_vector_construct", |_| {
            Ok(Box::new(VectorConstruct::new()))
        });
        registry.register("operator_vector_dot_product", |_| {
            Ok(Box::new(VectorDotProduct::new()))
        });
        registry.register("selector_actor", |_| Ok(Box::new(ActorSelector::new())));
        registry.register("selector_actor_position", |_| {
            Ok(Box::new(ActorPositionSelector::new()))
        });
        registry.register("selector_saved_vector", saved_vector_selector);
        registry.register("connector", |_| Ok(Box::new(Connector::new())));
        registry.register("connector_cross", |_| Ok(Box::new(CrossConnector::new())));
        registry.register("trick_debug", |_| Ok(Box::new(DebugTrick::new())));
        registry.register("trick_save_vector", |_| Ok(Box::new(SaveVectorTrick::new())));
        registry.register("trick_mark_position", |_| {
            Ok(Box::new(MarkPositionTrick::new()))
        });
        registry.register("trick_push_target", |_| {
            Ok(Box::new(PushTargetTrick::new()))
        });
        registry
    }

    /// Registers a factory; a repeated key replaces the earlier entry.
    pub fn register(&mut self, key: impl Into<String>, factory: PieceFactory) {
        self.factories.insert(key.into(), factory);
    }

    /// Constructs a piece for `key` from `data`.
    pub fn create(
        &self,
        key: &str,
        data: &serde_json::Value,
    ) -> Result<Box<dyn Piece>, RegistryError> {
        match self.factories.get(key) {
            Some(factory) => factory(data),
            None => Err(RegistryError::UnknownKey(key.to_string())),
        }
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

fn number_constant(data: &serde_json::Value) -> Result<Box<dyn Piece>, RegistryError> {
    let value = data
        .get("value")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(|| RegistryError::InvalidData {
            key: "constant_number".into(),
            message: "missing numeric \"value\"".into(),
        })?;
    Ok(Box::new(NumberConstant::new(value)))
}

fn saved_vector_selector(data: &serde_json::Value) -> Result<Box<dyn Piece>, RegistryError> {
    let slot = data
        .get("slot")
        .and_then(serde_json::Value::as_u64)
        .filter(|slot| *slot >= 1)
        .ok_or_else(|| RegistryError::InvalidData {
            key: "selector_saved_vector".into(),
            message: "missing positive integer \"slot\"".into(),
        })?;
    Ok(Box::new(SavedVectorSelector::new(slot as usize)))
}
