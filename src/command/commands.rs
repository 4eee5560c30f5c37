// Concrete command implementations

use crate::command::trait_def::UndoableCommand;
use crate::error::{CalcError, CalcResult};
use crate::stack::{ChangeEvent, OperandStack};

/// Distance from zero below which `cos(x)` makes `tan(x)` infinite
pub const TANGENT_EPSILON: f64 = 1e-12;

/// Operations consuming one operand and producing one result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Sine,
    Cosine,
    Tangent,
    ArcSine,
    ArcCosine,
    ArcTangent,
}

impl UnaryOp {
    pub fn evaluate(self, x: f64) -> f64 {
        match self {
            UnaryOp::Sine => x.sin(),
            UnaryOp::Cosine => x.cos(),
            UnaryOp::Tangent => x.tan(),
            UnaryOp::ArcSine => x.asin(),
            UnaryOp::ArcCosine => x.acos(),
            UnaryOp::ArcTangent => x.atan(),
        }
    }

    /// Operation-specific guard on the operand, run before anything is popped
    fn check_operand(self, x: f64) -> CalcResult<()> {
        match self {
            UnaryOp::Tangent if x.cos().abs() < TANGENT_EPSILON => Err(CalcError::InfiniteResult),
            _ => Ok(()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UnaryOp::Sine => "sin",
            UnaryOp::Cosine => "cos",
            UnaryOp::Tangent => "tan",
            UnaryOp::ArcSine => "arcsin",
            UnaryOp::ArcCosine => "arccos",
            UnaryOp::ArcTangent => "arctan",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            UnaryOp::Sine => "Replaces the top element of the stack with its sine (radians)",
            UnaryOp::Cosine => "Replaces the top element of the stack with its cosine (radians)",
            UnaryOp::Tangent => "Replaces the top element of the stack with its tangent (radians)",
            UnaryOp::ArcSine => "Replaces the top element of the stack with its arcsine",
            UnaryOp::ArcCosine => "Replaces the top element of the stack with its arccosine",
            UnaryOp::ArcTangent => "Replaces the top element of the stack with its arctangent",
        }
    }
}

/// Operations consuming two operands and producing one result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// `next` is the element below the top, `top` the top element
    pub fn evaluate(self, next: f64, top: f64) -> f64 {
        match self {
            BinaryOp::Add => next + top,
            BinaryOp::Subtract => next - top,
            BinaryOp::Multiply => next * top,
            BinaryOp::Divide => next / top,
        }
    }

    fn check_top(self, top: f64) -> CalcResult<()> {
        match self {
            BinaryOp::Divide if top == 0.0 => Err(CalcError::DivideByZero),
            _ => Ok(()),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            BinaryOp::Add => "Replaces the top two elements of the stack with their sum",
            BinaryOp::Subtract => {
                "Replaces the top two elements of the stack with their difference (next - top)"
            }
            BinaryOp::Multiply => "Replaces the top two elements of the stack with their product",
            BinaryOp::Divide => {
                "Replaces the top two elements of the stack with their quotient (next / top)"
            }
        }
    }
}

fn require_operands(stack: &OperandStack, required: usize) -> CalcResult<()> {
    let available = stack.size();
    if available < required {
        return Err(CalcError::InsufficientOperands {
            required,
            available,
        });
    }
    Ok(())
}

/// Pops one operand and pushes `op(operand)`
///
/// Keeps the popped operand so undo can put it back.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryCommand {
    op: UnaryOp,
    operand: Option<f64>,
}

impl UnaryCommand {
    pub fn new(op: UnaryOp) -> Self {
        Self { op, operand: None }
    }

    pub fn op(&self) -> UnaryOp {
        self.op
    }
}

impl UndoableCommand for UnaryCommand {
    fn check_precondition(&self, stack: &OperandStack) -> CalcResult<()> {
        require_operands(stack, 1)?;
        self.op.check_operand(stack.top()?)
    }

    fn apply(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        let operand = stack.pop(ChangeEvent::Suppress)?;
        self.operand = Some(operand);
        stack.push(self.op.evaluate(operand), ChangeEvent::Emit);
        Ok(())
    }

    fn revert(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        let operand = self.operand.ok_or(CalcError::NotExecuted(self.label()))?;
        stack.pop(ChangeEvent::Suppress)?;
        self.operand = None;
        stack.push(operand, ChangeEvent::Emit);
        Ok(())
    }

    fn label(&self) -> &'static str {
        self.op.label()
    }

    fn help(&self) -> &'static str {
        self.op.help()
    }
}

/// Pops `top` then `next` and pushes `op(next, top)`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryCommand {
    op: BinaryOp,
    /// (next, top) as they were before execution
    operands: Option<(f64, f64)>,
}

impl BinaryCommand {
    pub fn new(op: BinaryOp) -> Self {
        Self { op, operands: None }
    }

    pub fn op(&self) -> BinaryOp {
        self.op
    }
}

impl UndoableCommand for BinaryCommand {
    fn check_precondition(&self, stack: &OperandStack) -> CalcResult<()> {
        require_operands(stack, 2)?;
        self.op.check_top(stack.top()?)
    }

    fn apply(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        let top = stack.pop(ChangeEvent::Suppress)?;
        let next = stack.pop(ChangeEvent::Suppress)?;
        self.operands = Some((next, top));
        stack.push(self.op.evaluate(next, top), ChangeEvent::Emit);
        Ok(())
    }

    fn revert(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        let (next, top) = self
            .operands
            .ok_or(CalcError::NotExecuted(self.label()))?;
        stack.pop(ChangeEvent::Suppress)?;
        self.operands = None;
        stack.push(next, ChangeEvent::Suppress);
        stack.push(top, ChangeEvent::Emit);
        Ok(())
    }

    fn label(&self) -> &'static str {
        self.op.label()
    }

    fn help(&self) -> &'static str {
        self.op.help()
    }
}

/// Pushes a literal number
#[derive(Debug, Clone, PartialEq)]
pub struct EnterNumber {
    value: f64,
    executed: bool,
}

impl EnterNumber {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            executed: false,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl UndoableCommand for EnterNumber {
    fn apply(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        stack.push(self.value, ChangeEvent::Emit);
        self.executed = true;
        Ok(())
    }

    fn revert(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        if !self.executed {
            return Err(CalcError::NotExecuted(self.label()));
        }
        stack.pop(ChangeEvent::Emit)?;
        self.executed = false;
        Ok(())
    }

    fn label(&self) -> &'static str {
        "enter"
    }

    fn help(&self) -> &'static str {
        "Pushes a number onto the stack"
    }

    fn description(&self) -> String {
        format!("enter {}", self.value)
    }
}

/// Exchanges the two topmost elements; its own inverse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapCommand {
    executed: bool,
}

impl SwapCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UndoableCommand for SwapCommand {
    fn check_precondition(&self, stack: &OperandStack) -> CalcResult<()> {
        require_operands(stack, 2)
    }

    fn apply(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        stack.swap()?;
        self.executed = true;
        Ok(())
    }

    fn revert(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        if !self.executed {
            return Err(CalcError::NotExecuted(self.label()));
        }
        stack.swap()?;
        self.executed = false;
        Ok(())
    }

    fn label(&self) -> &'static str {
        "swap"
    }

    fn help(&self) -> &'static str {
        "Swaps the top two elements of the stack"
    }
}

/// Empties the stack, keeping every removed value for undo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClearCommand {
    /// Values in removal order: the former top comes first
    removed: Option<Vec<f64>>,
}

impl ClearCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UndoableCommand for ClearCommand {
    fn apply(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        let mut removed = Vec::with_capacity(stack.size());
        while !stack.is_empty() {
            removed.push(stack.pop(ChangeEvent::Suppress)?);
        }
        // Publishes the single change notification for the whole drain
        stack.clear();
        self.removed = Some(removed);
        Ok(())
    }

    fn revert(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        let removed = self
            .removed
            .take()
            .ok_or(CalcError::NotExecuted(self.label()))?;
        let last = removed.len().saturating_sub(1);
        for (i, value) in removed.into_iter().rev().enumerate() {
            let notify = if i == last {
                ChangeEvent::Emit
            } else {
                ChangeEvent::Suppress
            };
            stack.push(value, notify);
        }
        Ok(())
    }

    fn label(&self) -> &'static str {
        "clear"
    }

    fn help(&self) -> &'static str {
        "Removes every element from the stack"
    }
}

/// Removes the top element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DropCommand {
    dropped: Option<f64>,
}

impl DropCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UndoableCommand for DropCommand {
    fn check_precondition(&self, stack: &OperandStack) -> CalcResult<()> {
        stack.top().map(|_| ())
    }

    fn apply(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        self.dropped = Some(stack.pop(ChangeEvent::Emit)?);
        Ok(())
    }

    fn revert(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        let value = self
            .dropped
            .take()
            .ok_or(CalcError::NotExecuted(self.label()))?;
        stack.push(value, ChangeEvent::Emit);
        Ok(())
    }

    fn label(&self) -> &'static str {
        "drop"
    }

    fn help(&self) -> &'static str {
        "Removes the top element of the stack"
    }
}

/// Closed set of every command the calculator knows
///
/// `Clone` copies the command together with its captured undo state;
/// `fresh` gives an unexecuted copy for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcCommand {
    Unary(UnaryCommand),
    Binary(BinaryCommand),
    EnterNumber(EnterNumber),
    Swap(SwapCommand),
    Clear(ClearCommand),
    Drop(DropCommand),
}

impl CalcCommand {
    pub fn unary(op: UnaryOp) -> Self {
        CalcCommand::Unary(UnaryCommand::new(op))
    }

    pub fn binary(op: BinaryOp) -> Self {
        CalcCommand::Binary(BinaryCommand::new(op))
    }

    pub fn enter_number(value: f64) -> Self {
        CalcCommand::EnterNumber(EnterNumber::new(value))
    }

    pub fn swap() -> Self {
        CalcCommand::Swap(SwapCommand::new())
    }

    pub fn clear() -> Self {
        CalcCommand::Clear(ClearCommand::new())
    }

    pub fn drop_top() -> Self {
        CalcCommand::Drop(DropCommand::new())
    }

    /// Copy of this command's configuration with no undo state
    pub fn fresh(&self) -> Self {
        match self {
            CalcCommand::Unary(cmd) => Self::unary(cmd.op()),
            CalcCommand::Binary(cmd) => Self::binary(cmd.op()),
            CalcCommand::EnterNumber(cmd) => Self::enter_number(cmd.value()),
            CalcCommand::Swap(_) => Self::swap(),
            CalcCommand::Clear(_) => Self::clear(),
            CalcCommand::Drop(_) => Self::drop_top(),
        }
    }

    fn inner(&self) -> &dyn UndoableCommand {
        match self {
            CalcCommand::Unary(cmd) => cmd,
            CalcCommand::Binary(cmd) => cmd,
            CalcCommand::EnterNumber(cmd) => cmd,
            CalcCommand::Swap(cmd) => cmd,
            CalcCommand::Clear(cmd) => cmd,
            CalcCommand::Drop(cmd) => cmd,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn UndoableCommand {
        match self {
            CalcCommand::Unary(cmd) => cmd,
            CalcCommand::Binary(cmd) => cmd,
            CalcCommand::EnterNumber(cmd) => cmd,
            CalcCommand::Swap(cmd) => cmd,
            CalcCommand::Clear(cmd) => cmd,
            CalcCommand::Drop(cmd) => cmd,
        }
    }
}

impl UndoableCommand for CalcCommand {
    fn check_precondition(&self, stack: &OperandStack) -> CalcResult<()> {
        self.inner().check_precondition(stack)
    }

    fn apply(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        self.inner_mut().apply(stack)
    }

    fn check_postcondition(&self, stack: &OperandStack) -> CalcResult<()> {
        self.inner().check_postcondition(stack)
    }

    fn revert(&mut self, stack: &mut OperandStack) -> CalcResult<()> {
        self.inner_mut().revert(stack)
    }

    fn label(&self) -> &'static str {
        self.inner().label()
    }

    fn help(&self) -> &'static str {
        self.inner().help()
    }

    fn description(&self) -> String {
        self.inner().description()
    }
}

impl From<UnaryCommand> for CalcCommand {
    fn from(cmd: UnaryCommand) -> Self {
        CalcCommand::Unary(cmd)
    }
}

impl From<BinaryCommand> for CalcCommand {
    fn from(cmd: BinaryCommand) -> Self {
        CalcCommand::Binary(cmd)
    }
}
