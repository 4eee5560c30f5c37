// CommandDispatcher - routes input tokens to commands

use crate::command::commands::CalcCommand;
use crate::command::manager::CommandManager;
use crate::command::repository::CommandRepository;
use crate::command::trait_def::UndoableCommand;
use crate::error::CalcResult;
use crate::stack::OperandStack;
use tracing::{info, warn};

/// What a successfully dispatched token did
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    /// A command ran; carries its description
    Executed(String),
    Undone(String),
    Redone(String),
    /// Help text for every registered command
    Help(String),
}

/// Resolves tokens and runs the matching command through the history
///
/// Resolution order: the words `undo`, `redo` and `help`, then finite
/// number literals, then repository labels.
pub struct CommandDispatcher {
    repository: CommandRepository,
    manager: CommandManager,
}

impl CommandDispatcher {
    pub fn new(repository: CommandRepository, manager: CommandManager) -> Self {
        Self {
            repository,
            manager,
        }
    }

    /// Handle one token
    ///
    /// # Errors
    /// Returns `UnrecognizedLabel` for unknown tokens, or the error of the
    /// command that failed. A failed command is discarded and the stack is
    /// left as it was.
    pub fn dispatch(&mut self, token: &str, stack: &mut OperandStack) -> CalcResult<Dispatched> {
        let result = self.route(token, stack);
        match &result {
            Ok(outcome) => info!(token, ?outcome, "dispatched"),
            Err(e) => warn!(token, %e, "command failed"),
        }
        result
    }

    fn route(&mut self, token: &str, stack: &mut OperandStack) -> CalcResult<Dispatched> {
        match token {
            "undo" => return self.manager.undo(stack).map(Dispatched::Undone),
            "redo" => return self.manager.redo(stack).map(Dispatched::Redone),
            "help" => return Ok(Dispatched::Help(self.repository.help_text())),
            _ => {}
        }

        let command = match parse_number(token) {
            Some(value) => CalcCommand::enter_number(value),
            None => self.repository.allocate(token)?,
        };
        let description = command.description();
        self.manager.execute(command, stack)?;
        Ok(Dispatched::Executed(description))
    }

    pub fn repository(&self) -> &CommandRepository {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut CommandRepository {
        &mut self.repository
    }

    pub fn history(&self) -> &CommandManager {
        &self.manager
    }
}

/// Parse a finite floating-point literal
///
/// `inf`, `nan` and friends are not numbers here; they fall through to the
/// label lookup.
pub fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}
