//! Change feed: fan-out of `ChangeEvent`s over crossbeam channels.
//!
//! The engine publishes an event after every committed mutation; each
//! registered receiver gets its own unbounded channel. Disconnected
//! receivers are pruned on the next publish.

use std::sync::Mutex;

use crossbeam_channel::{unbounded, Receiver, Sender};

use facrev_core::ChangeEvent;

/// Broadcast hub for store change events.
#[derive(Default)]
pub struct ChangeFeed {
    senders: Mutex<Vec<Sender<ChangeEvent>>>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener. Events published after this call are
    /// delivered; there is no replay of earlier events.
    pub fn register(&self) -> Receiver<ChangeEvent> {
        let (tx, rx) = unbounded();
        // Poisoning only happens if a publisher panicked; registering on
        // the surviving list is still sound.
        let mut senders = self.senders.lock().unwrap_or_else(|e| e.into_inner());
        senders.push(tx);
        rx
    }

    /// Deliver an event to every live listener, dropping dead ones.
    pub fn publish(&self, event: ChangeEvent) {
        let mut senders = self.senders.lock().unwrap_or_else(|e| e.into_inner());
        senders.retain(|tx| tx.send(event).is_ok());
    }

    /// Number of live listeners (observability only).
    pub fn listener_count(&self) -> usize {
        let senders = self.senders.lock().unwrap_or_else(|e| e.into_inner());
        senders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facrev_core::Collection;

    #[test]
    fn publish_reaches_all_registered_listeners() {
        let feed = ChangeFeed::new();
        let rx1 = feed.register();
        let rx2 = feed.register();

        feed.publish(ChangeEvent::new(Collection::Reviews));

        assert_eq!(rx1.recv().unwrap().collection, Collection::Reviews);
        assert_eq!(rx2.recv().unwrap().collection, Collection::Reviews);
    }

    #[test]
    fn dropped_listener_is_pruned_on_next_publish() {
        let feed = ChangeFeed::new();
        let rx = feed.register();
        drop(feed.register());

        feed.publish(ChangeEvent::new(Collection::Users));
        assert_eq!(feed.listener_count(), 1);
        assert_eq!(rx.recv().unwrap().collection, Collection::Users);
    }
}
