// rpncalc - Library exports for the binary, tests and benchmarks

pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod stack;
pub mod ui;

// Re-export commonly used types for convenience
pub use command::{
    CalcCommand, CommandDispatcher, CommandManager, CommandRepository, Dispatched, UndoableCommand,
};
pub use config::CalcConfig;
pub use error::{CalcError, CalcResult};
pub use messaging::{EventBus, Listener, STACK_CHANGED, STACK_ERROR, StackEvent};
pub use stack::{ChangeEvent, OperandStack};
pub use ui::Cli;
