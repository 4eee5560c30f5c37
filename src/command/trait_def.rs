// UndoableCommand trait definition

use crate::error::CalcResult;
use crate::stack::OperandStack;

/// Trait for reversible operations on the operand stack
///
/// `execute` is a template method: it checks the precondition, applies the
/// operation (capturing whatever is needed to reverse it) and then checks
/// the postcondition. Implementors override the inner steps only.
///
/// A failing precondition must leave the stack untouched, so every check
/// that can reject the operation belongs in `check_precondition`.
///
/// # Example
/// ```no_run
/// use rpncalc::command::trait_def::UndoableCommand;
/// use rpncalc::error::{CalcError, CalcResult};
/// use rpncalc::stack::{ChangeEvent, OperandStack};
///
/// struct Negate {
///     operand: Option<f64>,
/// }
///
/// impl UndoableCommand for Negate {
///     fn check_precondition(&self, stack: &OperandStack) -> CalcResult<()> {
///         stack.top().map(|_| ())
///     }
///
///     fn apply(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
///         let value = stack.pop(ChangeEvent::Suppress)?;
///         self.operand = Some(value);
///         stack.push(-value, ChangeEvent::Emit);
///         Ok(())
///     }
///
///     fn revert(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
///         let value = self.operand.take().ok_or(CalcError::NotExecuted("neg"))?;
///         stack.pop(ChangeEvent::Suppress)?;
///         stack.push(value, ChangeEvent::Emit);
///         Ok(())
///     }
///
///     fn label(&self) -> &'static str {
///         "neg"
///     }
///
///     fn help(&self) -> &'static str {
///         "Negates the top element of the stack"
///     }
/// }
/// ```
pub trait UndoableCommand {
    /// Reject the operation before anything is mutated
    ///
    /// Default implementation accepts every state.
    fn check_precondition(&self, _stack: &OperandStack) -> CalcResult<()> {
        Ok(())
    }

    /// Perform the operation and capture the undo state
    fn apply(&mut self, stack: &mut OperandStack) -> CalcResult<()>;

    /// Hook run after a successful `apply`
    ///
    /// Default implementation does nothing.
    fn check_postcondition(&self, _stack: &OperandStack) -> CalcResult<()> {
        Ok(())
    }

    /// Reverse the last `apply` using the captured state
    fn revert(&mut self, stack: &mut OperandStack) -> CalcResult<()>;

    /// Label the command is registered under
    fn label(&self) -> &'static str;

    /// Static help text
    fn help(&self) -> &'static str;

    /// Run the command: precondition, operation, postcondition
    fn execute(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        self.check_precondition(stack)?;
        self.apply(stack)?;
        self.check_postcondition(stack)
    }

    /// Restore the stack to its content before the last `execute`
    fn undo(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        self.revert(stack)
    }

    /// Human-readable description, used for the undo/redo history
    fn description(&self) -> String {
        self.label().to_string()
    }
}
