// Error taxonomy shared by the stack, the commands and the dispatcher

use crate::messaging::notification::ErrorKind;

/// Result type for stack and command operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors that can occur while operating on the calculator
///
/// Every variant is recoverable: a failing command leaves the operand
/// stack untouched and the session goes on.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("Attempting to pop empty stack")]
    EmptyStack,

    #[error("Stack must have at least {required} element(s), found {available}")]
    InsufficientOperands { required: usize, available: usize },

    #[error("Division by zero")]
    DivideByZero,

    #[error("Result is infinite")]
    InfiniteResult,

    #[error("Unknown command: {0}")]
    UnrecognizedLabel(String),

    #[error("Command already registered: {0}")]
    DuplicateLabel(String),

    #[error("Unknown event channel: {0}")]
    UnknownChannel(String),

    #[error("Event channel already registered: {0}")]
    DuplicateChannel(String),

    #[error("Cannot undo '{0}': command holds no undo state")]
    NotExecuted(&'static str),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

impl CalcError {
    /// Notification kind carried on the `stackError` channel, if any
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CalcError::EmptyStack => Some(ErrorKind::Empty),
            CalcError::InsufficientOperands { .. } => Some(ErrorKind::InsufficientOperands),
            CalcError::DivideByZero => Some(ErrorKind::DivideByZero),
            CalcError::InfiniteResult => Some(ErrorKind::InfiniteResult),
            _ => None,
        }
    }
}
