// OperandStack - the calculator's data model

use crate::error::{CalcError, CalcResult};
use crate::messaging::bus::{EventBus, Listener};
use crate::messaging::notification::{ErrorKind, STACK_CHANGED, STACK_ERROR, StackEvent};
use std::sync::Arc;
use tracing::debug;

/// Whether a mutation publishes `StackEvent::Changed`
///
/// Commands that pop a value and immediately push a replacement suppress the
/// intermediate notification so observers only see the final state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Emit,
    Suppress,
}

/// Last-in-first-out stack of operands
///
/// The stack owns its values and its event bus. It is mutated only through
/// `push`, `pop`, `swap` and `clear`.
pub struct OperandStack {
    values: Vec<f64>,
    bus: EventBus<StackEvent>,
}

impl OperandStack {
    /// Create an empty stack with the `stackChanged` and `stackError` channels
    pub fn new() -> Self {
        let mut bus = EventBus::new();
        for channel in [STACK_CHANGED, STACK_ERROR] {
            if let Err(e) = bus.register_channel(channel) {
                debug!(%e, "stack channel already registered");
            }
        }
        Self {
            values: Vec::new(),
            bus,
        }
    }

    /// Push a value on top of the stack
    pub fn push(&mut self, value: f64, notify: ChangeEvent) {
        debug!(value, ?notify, "push");
        self.values.push(value);
        if notify == ChangeEvent::Emit {
            self.publish(StackEvent::Changed);
        }
    }

    /// Remove and return the top value
    ///
    /// # Errors
    /// Returns `EmptyStack` (after publishing an `Empty` error event) if the
    /// stack holds no value.
    pub fn pop(&mut self, notify: ChangeEvent) -> CalcResult<f64> {
        let Some(value) = self.values.pop() else {
            self.publish(StackEvent::Error(ErrorKind::Empty));
            return Err(CalcError::EmptyStack);
        };
        debug!(value, ?notify, "pop");
        if notify == ChangeEvent::Emit {
            self.publish(StackEvent::Changed);
        }
        Ok(value)
    }

    /// Return the top value without removing it
    pub fn top(&self) -> CalcResult<f64> {
        self.values.last().copied().ok_or(CalcError::EmptyStack)
    }

    /// Exchange the two topmost values
    ///
    /// # Errors
    /// Returns `InsufficientOperands` (after publishing an error event) if the
    /// stack holds fewer than two values.
    pub fn swap(&mut self) -> CalcResult<()> {
        let len = self.values.len();
        if len < 2 {
            self.publish(StackEvent::Error(ErrorKind::InsufficientOperands));
            return Err(CalcError::InsufficientOperands {
                required: 2,
                available: len,
            });
        }
        self.values.swap(len - 1, len - 2);
        debug!("swap");
        self.publish(StackEvent::Changed);
        Ok(())
    }

    /// Remove every value
    pub fn clear(&mut self) {
        debug!(size = self.values.len(), "clear");
        self.values.clear();
        self.publish(StackEvent::Changed);
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Up to `n` most recent values, top first
    pub fn elements(&self, n: usize) -> Vec<f64> {
        self.values.iter().rev().take(n).copied().collect()
    }

    /// Subscribe a listener to one of the stack channels
    pub fn subscribe<L>(&mut self, channel: &str, listener: &Arc<L>) -> CalcResult<()>
    where
        L: Listener<StackEvent> + 'static,
    {
        self.bus.subscribe(channel, listener)
    }

    /// Remove a listener from one of the stack channels
    pub fn unsubscribe<L>(&mut self, channel: &str, listener: &Arc<L>) -> CalcResult<bool>
    where
        L: Listener<StackEvent> + 'static,
    {
        self.bus.unsubscribe(channel, listener)
    }

    fn publish(&mut self, event: StackEvent) {
        // Both channels are registered in new(), so this cannot miss
        if let Err(e) = self.bus.publish(event.channel(), &event) {
            debug!(%e, "stack event not delivered");
        }
    }
}

impl Default for OperandStack {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OperandStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperandStack")
            .field("values", &self.values)
            .finish()
    }
}
