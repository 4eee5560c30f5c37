// Command Pattern for reversible stack operations
//
// Every stack mutation the user asks for goes through UndoableCommand.
//
// Architecture:
// - UndoableCommand trait: precondition, apply, postcondition, revert, help
// - Concrete commands: UnaryCommand, BinaryCommand, EnterNumber, SwapCommand,
//   ClearCommand, DropCommand, gathered in the closed CalcCommand enum
// - CommandRepository: label -> prototype; dispatch works on fresh copies
// - CommandManager: undo/redo history
// - CommandDispatcher: token -> number literal, reserved word or label

pub mod commands;
pub mod dispatcher;
pub mod manager;
pub mod repository;
pub mod trait_def;

pub use commands::{BinaryOp, CalcCommand, UnaryOp};
pub use dispatcher::{CommandDispatcher, Dispatched};
pub use manager::CommandManager;
pub use repository::{CommandRepository, register_core_commands};
pub use trait_def::UndoableCommand;
