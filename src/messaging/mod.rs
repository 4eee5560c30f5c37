// Messaging - stack notifications and their delivery
//
// - bus: named publish/subscribe channels, weak listener references
// - notification: StackEvent payloads and channel names
// - channels: ringbuffer queue the shell polls after each dispatch

pub mod bus;
pub mod channels;
pub mod notification;

pub use bus::{EventBus, Listener};
pub use channels::{QueuedListener, create_notification_channel, drain_notifications};
pub use notification::{ErrorKind, STACK_CHANGED, STACK_ERROR, StackEvent};
