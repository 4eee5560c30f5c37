// Lock-free notification queue between the stack and the shell
//
// The shell subscribes a QueuedListener to the stack's bus and drains the
// consumer after each dispatched token.

use crate::messaging::bus::Listener;
use ringbuf::traits::{Consumer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};
use std::fmt::Debug;
use std::sync::Mutex;
use tracing::warn;

pub type NotificationProducer<E> = HeapProd<E>;
pub type NotificationConsumer<E> = HeapCons<E>;

pub fn create_notification_channel<E>(
    capacity: usize,
) -> (NotificationProducer<E>, NotificationConsumer<E>) {
    let rb = HeapRb::<E>::new(capacity);
    rb.split()
}

/// Listener that forwards every event into a bounded ringbuffer
///
/// Events that do not fit are dropped and logged.
pub struct QueuedListener<E> {
    producer: Mutex<NotificationProducer<E>>,
}

impl<E> QueuedListener<E> {
    pub fn new(producer: NotificationProducer<E>) -> Self {
        Self {
            producer: Mutex::new(producer),
        }
    }
}

impl<E> Listener<E> for QueuedListener<E>
where
    E: Clone + Debug + Send,
{
    fn on_event(&self, event: &E) {
        match self.producer.lock() {
            Ok(mut producer) => {
                if producer.try_push(event.clone()).is_err() {
                    warn!(?event, "notification queue full, event dropped");
                }
            }
            Err(_) => warn!(?event, "notification queue poisoned, event dropped"),
        }
    }
}

/// Drain every pending notification
pub fn drain_notifications<E>(consumer: &mut NotificationConsumer<E>) -> Vec<E> {
    consumer.pop_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::notification::{ErrorKind, StackEvent};

    #[test]
    fn test_queue_forwards_events() {
        let (tx, mut rx) = create_notification_channel::<StackEvent>(8);
        let listener = QueuedListener::new(tx);

        listener.on_event(&StackEvent::Changed);
        listener.on_event(&StackEvent::Error(ErrorKind::Empty));

        assert_eq!(
            drain_notifications(&mut rx),
            vec![StackEvent::Changed, StackEvent::Error(ErrorKind::Empty)]
        );
        assert!(drain_notifications(&mut rx).is_empty());
    }

    #[test]
    fn test_queue_drops_when_full() {
        let (tx, mut rx) = create_notification_channel::<StackEvent>(2);
        let listener = QueuedListener::new(tx);

        for _ in 0..5 {
            listener.on_event(&StackEvent::Changed);
        }

        assert_eq!(drain_notifications(&mut rx).len(), 2);
    }
}
