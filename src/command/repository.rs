// CommandRepository - label to prototype command lookup

use crate::command::commands::{BinaryOp, CalcCommand, UnaryOp};
use crate::command::trait_def::UndoableCommand;
use crate::error::{CalcError, CalcResult};
use std::collections::BTreeMap;
use tracing::debug;

/// Holds one prototype command per label
///
/// Dispatch never runs a prototype: `allocate` hands out a fresh copy that
/// the caller owns.
#[derive(Debug, Default)]
pub struct CommandRepository {
    prototypes: BTreeMap<String, CalcCommand>,
}

impl CommandRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository with every built-in operation registered
    pub fn with_core_commands() -> Self {
        let mut repository = Self::new();
        for e in register_core_commands(&mut repository) {
            debug!(%e, "core command skipped");
        }
        repository
    }

    /// Register a prototype under `label`
    ///
    /// # Errors
    /// Returns `DuplicateLabel` if the label is taken.
    pub fn register(&mut self, label: &str, prototype: CalcCommand) -> CalcResult<()> {
        if self.prototypes.contains_key(label) {
            return Err(CalcError::DuplicateLabel(label.to_string()));
        }
        debug!(label, "command registered");
        self.prototypes.insert(label.to_string(), prototype);
        Ok(())
    }

    /// Remove a label, returning its prototype
    pub fn deregister(&mut self, label: &str) -> Option<CalcCommand> {
        self.prototypes.remove(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.prototypes.contains_key(label)
    }

    /// Fresh, unexecuted copy of the prototype registered under `label`
    ///
    /// # Errors
    /// Returns `UnrecognizedLabel` on an unknown label.
    pub fn allocate(&self, label: &str) -> CalcResult<CalcCommand> {
        self.prototypes
            .get(label)
            .map(CalcCommand::fresh)
            .ok_or_else(|| CalcError::UnrecognizedLabel(label.to_string()))
    }

    /// Registered labels in sorted order
    pub fn labels(&self) -> Vec<&str> {
        self.prototypes.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    pub fn help_message(&self, label: &str) -> Option<&'static str> {
        self.prototypes.get(label).map(|cmd| cmd.help())
    }

    /// One `label: help` line per registered command
    pub fn help_text(&self) -> String {
        let width = self.prototypes.keys().map(String::len).max().unwrap_or(0);
        self.prototypes
            .iter()
            .map(|(label, cmd)| format!("{:<width$} : {}", label, cmd.help(), width = width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Register every built-in operation
///
/// Registration failures do not stop the others; they are returned so the
/// caller can report them.
pub fn register_core_commands(repository: &mut CommandRepository) -> Vec<CalcError> {
    let mut prototypes: Vec<CalcCommand> = [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
    ]
    .into_iter()
    .map(CalcCommand::binary)
    .collect();

    prototypes.extend(
        [
            UnaryOp::Sine,
            UnaryOp::Cosine,
            UnaryOp::Tangent,
            UnaryOp::ArcSine,
            UnaryOp::ArcCosine,
            UnaryOp::ArcTangent,
        ]
        .into_iter()
        .map(CalcCommand::unary),
    );

    prototypes.extend([
        CalcCommand::swap(),
        CalcCommand::clear(),
        CalcCommand::drop_top(),
    ]);

    prototypes
        .into_iter()
        .filter_map(|prototype| {
            let label = prototype.label();
            repository.register(label, prototype).err()
        })
        .collect()
}
