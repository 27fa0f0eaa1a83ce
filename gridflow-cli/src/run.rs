//! Load → compile → run pipeline behind the binary.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use gridflow::{compile, ExecutionContext, MockActor, PieceRegistry, Stat, Vector3};

use crate::format;
use crate::Error;

/// Options from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Overrides the program name from the file.
    pub name_override: Option<String>,
    /// Stop after compilation; report actions and metadata only.
    pub compile_only: bool,
}

/// What a load/compile/run round produced, ready for printing.
#[derive(Debug)]
pub struct RunReport {
    pub name: String,
    /// Stat name and value, in a fixed order.
    pub stats: Vec<(&'static str, i32)>,
    /// Human-readable action list in execution order.
    pub actions: Vec<String>,
    /// Whether the program ran (false with `compile_only`).
    pub ran: bool,
    /// Positions the actor marked during the run.
    pub marks: Vec<Vector3>,
    /// Device slots written during the run.
    pub stored_vectors: Vec<(usize, Vector3)>,
}

/// Loads a grid description from a file, compiles and runs it.
pub fn run_file(path: &Path, options: &RunOptions) -> Result<RunReport, Error> {
    let source = std::fs::read_to_string(path)?;
    run_source(&source, options)
}

/// Same as [`run_file`] from in-memory JSON text.
pub fn run_source(source: &str, options: &RunOptions) -> Result<RunReport, Error> {
    let file = format::parse(source)?;
    let registry = PieceRegistry::with_builtins();
    let grid = format::build_grid(&file, &registry)?;

    let name = options
        .name_override
        .clone()
        .unwrap_or_else(|| file.name.clone());
    let program = compile(grid, name)?;

    let mut report = RunReport {
        name: program.name().to_string(),
        stats: Stat::ALL
            .iter()
            .map(|s| (s.name(), program.metadata().stat(*s)))
            .collect(),
        actions: program
            .actions()
            .iter()
            .map(|a| format!("{} {}", a.pos(), a.key()))
            .collect(),
        ran: false,
        marks: Vec::new(),
        stored_vectors: Vec::new(),
    };
    if options.compile_only {
        return Ok(report);
    }

    let actor = Arc::new(MockActor::with_device());
    let mut context = ExecutionContext::new(actor.clone(), HashMap::new());
    program.run(&mut context)?;

    report.ran = true;
    report.marks = actor.marks();
    report.stored_vectors = actor
        .device
        .as_ref()
        .map(|d| d.slots())
        .unwrap_or_default();
    Ok(report)
}
