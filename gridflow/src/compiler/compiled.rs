//! Compiled program: immutable, supports run only.
//!
//! Built by [`compile`](crate::compiler::compile). Holds the action list in
//! dependency order, the aggregated metadata and the grid snapshot it was
//! compiled from (parameter reads at run time re-resolve sides against it).

use std::fmt;
use std::sync::Arc;

use crate::compiler::Metadata;
use crate::context::ExecutionContext;
use crate::error::RuntimeError;
use crate::grid::{Coordinate, Grid};
use crate::logging;
use crate::piece::{Piece, RunScope};

/// One executable step: a piece at its coordinate.
#[derive(Clone)]
pub struct Action {
    pub(crate) pos: Coordinate,
    pub(crate) piece: Arc<dyn Piece>,
}

impl Action {
    pub fn pos(&self) -> Coordinate {
        self.pos
    }

    pub fn key(&self) -> &'static str {
        self.piece.key()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.piece.key(), self.pos)
    }
}

/// Ordered action list plus final metadata; compilation's output.
///
/// Immutable once produced. The action/metadata accessors exist for hosts
/// and tooling to display; execution is driven only by [`CompiledProgram::run`].
#[derive(Debug)]
pub struct CompiledProgram {
    pub(crate) name: String,
    pub(crate) actions: Vec<Action>,
    pub(crate) metadata: Metadata,
    pub(crate) grid: Grid,
}

impl CompiledProgram {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Actions in execution order: every value-producing action precedes
    /// the actions reading it.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Runs the program against a fresh per-run context.
    ///
    /// Actions execute strictly in compiled order; a `Some` result is cached
    /// under the action's coordinate for downstream parameter reads. The
    /// first runtime error aborts the rest of the run; effects of actions
    /// that already ran are not rolled back, and the program stays valid for
    /// future runs.
    pub fn run(&self, context: &mut ExecutionContext) -> Result<(), RuntimeError> {
        logging::log_run_start(&self.name);
        for action in &self.actions {
            logging::log_action_start(action.pos, action.piece.key());
            let result = {
                let mut scope = RunScope::new(&self.grid, action.pos, context);
                action.piece.execute(&mut scope)
            };
            match result {
                Ok(Some(value)) => context.cache_insert(action.pos, value),
                Ok(None) => {}
                Err(e) => {
                    logging::log_run_error(&e);
                    return Err(e);
                }
            }
        }
        logging::log_run_complete(&self.name);
        Ok(())
    }
}
