// Stack notifications - payloads published by the operand stack

/// Channel carrying `StackEvent::Changed`
pub const STACK_CHANGED: &str = "stackChanged";

/// Channel carrying `StackEvent::Error`
pub const STACK_ERROR: &str = "stackError";

/// Kind of failure reported on the `stackError` channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Empty,
    InsufficientOperands,
    DivideByZero,
    InfiniteResult,
}

impl ErrorKind {
    /// Fixed human-readable message for this kind
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Empty => "Attempting to pop empty stack",
            ErrorKind::InsufficientOperands => "Stack must have at least 2 element(s)",
            ErrorKind::DivideByZero => "Division by zero",
            ErrorKind::InfiniteResult => "Result is infinite",
        }
    }
}

/// Event published by the operand stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackEvent {
    /// The stack content changed; observers re-read it
    Changed,
    /// An operation on the stack was rejected
    Error(ErrorKind),
}

impl StackEvent {
    /// Name of the channel this event is published on
    pub fn channel(&self) -> &'static str {
        match self {
            StackEvent::Changed => STACK_CHANGED,
            StackEvent::Error(_) => STACK_ERROR,
        }
    }

    /// Message for error events, `None` for change events
    pub fn message(&self) -> Option<&'static str> {
        match self {
            StackEvent::Changed => None,
            StackEvent::Error(kind) => Some(kind.message()),
        }
    }
}
