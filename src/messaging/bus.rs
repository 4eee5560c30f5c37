// EventBus - named publish/subscribe channels with weakly held listeners

use crate::error::{CalcError, CalcResult};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::trace;

/// Receiver of events published on a bus channel
///
/// Closures `Fn(&E) + Send + Sync` are listeners too.
pub trait Listener<E>: Send + Sync {
    fn on_event(&self, event: &E);
}

impl<E, F> Listener<E> for F
where
    F: Fn(&E) + Send + Sync,
{
    fn on_event(&self, event: &E) {
        self(event)
    }
}

/// Publish/subscribe bus with named channels
///
/// The bus only keeps `Weak` references: a listener stays subscribed for as
/// long as its owner keeps the `Arc` alive. Dead references are dropped on
/// the next publish to their channel.
///
/// Publishing is synchronous; listeners run in registration order.
pub struct EventBus<E> {
    channels: HashMap<String, Vec<Weak<dyn Listener<E>>>>,
}

impl<E: 'static> EventBus<E> {
    /// Create a bus with no channels
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
        }
    }

    /// Declare a channel that listeners can subscribe to
    ///
    /// # Errors
    /// Returns `DuplicateChannel` if the name is already registered.
    pub fn register_channel(&mut self, name: &str) -> CalcResult<()> {
        if self.channels.contains_key(name) {
            return Err(CalcError::DuplicateChannel(name.to_string()));
        }
        self.channels.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Check whether a channel has been registered
    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Subscribe a listener to a channel
    ///
    /// The bus does not take ownership: dropping every `Arc` to the listener
    /// unsubscribes it implicitly.
    pub fn subscribe<L>(&mut self, channel: &str, listener: &Arc<L>) -> CalcResult<()>
    where
        L: Listener<E> + 'static,
    {
        let listeners = self
            .channels
            .get_mut(channel)
            .ok_or_else(|| CalcError::UnknownChannel(channel.to_string()))?;
        let weak: Weak<L> = Arc::downgrade(listener);
        listeners.push(weak);
        trace!(channel, "listener subscribed");
        Ok(())
    }

    /// Remove a listener from a channel
    ///
    /// Returns whether the listener was subscribed.
    pub fn unsubscribe<L>(&mut self, channel: &str, listener: &Arc<L>) -> CalcResult<bool>
    where
        L: Listener<E> + 'static,
    {
        let listeners = self
            .channels
            .get_mut(channel)
            .ok_or_else(|| CalcError::UnknownChannel(channel.to_string()))?;
        let target = Arc::as_ptr(listener) as *const ();
        let before = listeners.len();
        listeners.retain(|weak| weak.as_ptr() as *const () != target);
        Ok(listeners.len() != before)
    }

    /// Deliver an event to every live listener of a channel
    ///
    /// Returns the number of listeners reached.
    pub fn publish(&mut self, channel: &str, event: &E) -> CalcResult<usize> {
        let listeners = self
            .channels
            .get_mut(channel)
            .ok_or_else(|| CalcError::UnknownChannel(channel.to_string()))?;

        let mut delivered = 0;
        listeners.retain(|weak| match weak.upgrade() {
            Some(listener) => {
                listener.on_event(event);
                delivered += 1;
                true
            }
            None => false,
        });
        trace!(channel, delivered, "event published");
        Ok(delivered)
    }

    /// Number of live listeners on a channel (0 for unknown channels)
    pub fn listener_count(&self, channel: &str) -> usize {
        self.channels
            .get(channel)
            .map(|listeners| listeners.iter().filter(|w| w.strong_count() > 0).count())
            .unwrap_or(0)
    }
}

impl<E: 'static> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}
