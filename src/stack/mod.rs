// Operand stack - the single data model the commands operate on
//
// There is no global instance: the shell owns the stack and hands a
// mutable reference to every command it executes.

pub mod operand_stack;

pub use operand_stack::{ChangeEvent, OperandStack};
