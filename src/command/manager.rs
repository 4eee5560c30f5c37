// CommandManager - Manages undo/redo stacks

use crate::command::commands::CalcCommand;
use crate::command::trait_def::UndoableCommand;
use crate::error::{CalcError, CalcResult};
use crate::stack::OperandStack;
use std::collections::VecDeque;
use tracing::debug;

/// Default maximum number of commands to keep in history
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Manages command execution and undo/redo functionality
///
/// The CommandManager maintains two stacks:
/// - Undo stack: Commands that have been executed and can be undone
/// - Redo stack: Commands that have been undone and can be redone
///
/// When a new command is executed:
/// 1. Execute the command
/// 2. Push it onto the undo stack
/// 3. Clear the redo stack (since we're on a new timeline)
///
/// # Memory Management
/// The manager limits the number of commands in the undo stack. When the
/// limit is reached, the oldest command is removed.
pub struct CommandManager {
    /// Stack of commands that can be undone (most recent at the back)
    undo_stack: VecDeque<CalcCommand>,

    /// Stack of commands that can be redone (most recent at the back)
    redo_stack: VecDeque<CalcCommand>,

    /// Maximum number of commands to keep in history
    max_history: usize,
}

impl CommandManager {
    /// Create a new CommandManager with default settings
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_HISTORY)
    }

    /// Create a new CommandManager with a custom history limit
    pub fn with_capacity(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(max_history.min(DEFAULT_MAX_HISTORY)),
            redo_stack: VecDeque::new(),
            max_history,
        }
    }

    /// Execute a command and add it to the undo stack
    ///
    /// # Errors
    /// Returns the command's error if execution fails. A failed command is
    /// not recorded and the redo stack is left as it was.
    pub fn execute(&mut self, mut command: CalcCommand, stack: &mut OperandStack) -> CalcResult<()> {
        command.execute(stack)?;

        self.undo_stack.push_back(command);

        // New timeline: whatever was undone can no longer be redone
        self.redo_stack.clear();

        if self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }

        Ok(())
    }

    /// Undo the last command
    ///
    /// Returns the description of the undone command.
    ///
    /// # Errors
    /// Returns `NothingToUndo` if the history is empty, or the command's error
    /// if undoing fails (the command then stays on the undo stack).
    pub fn undo(&mut self, stack: &mut OperandStack) -> CalcResult<String> {
        let mut command = self.undo_stack.pop_back().ok_or(CalcError::NothingToUndo)?;

        let description = command.description();

        if let Err(e) = command.undo(stack) {
            self.undo_stack.push_back(command);
            return Err(e);
        }
        debug!(%description, "undone");

        self.redo_stack.push_back(command);

        Ok(description)
    }

    /// Redo the last undone command
    ///
    /// # Errors
    /// Returns `NothingToRedo` if there is nothing to redo, or the command's
    /// error if re-executing fails (the command then stays on the redo stack).
    pub fn redo(&mut self, stack: &mut OperandStack) -> CalcResult<String> {
        let mut command = self.redo_stack.pop_back().ok_or(CalcError::NothingToRedo)?;

        let description = command.description();

        if let Err(e) = command.execute(stack) {
            self.redo_stack.push_back(command);
            return Err(e);
        }
        debug!(%description, "redone");

        self.undo_stack.push_back(command);

        Ok(description)
    }

    /// Check if there are commands that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if there are commands that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get a description of the command that would be undone
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(|cmd| cmd.description())
    }

    /// Get a description of the command that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.back().map(|cmd| cmd.description())
    }

    /// Clear all command history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Get the number of commands in the undo stack
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of commands in the redo stack
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for CommandManager {
    fn default() -> Self {
        Self::new()
    }
}
