//! # Rig Events
//!
//! Typed notifications for the start and end of manipulation sessions.
//! Listeners register closures on an [`EventBus`]; every emitted event is also
//! kept in a queue that hosts can drain once per frame instead of subscribing.

use std::collections::VecDeque;

/// Manipulation lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RigEvent {
    RotateStarted,
    RotateStopped,
    ScaleStarted,
    ScaleStopped,
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(RigEvent)>;

/// Observer registry plus a pending-event queue
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    pending: VecDeque<RigEvent>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            pending: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Register a listener called synchronously for every emitted event
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(RigEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: RigEvent) {
        log::debug!("rig event: {:?}", event);
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
        self.pending.push_back(event);
    }

    /// Take every event emitted since the last drain, oldest first
    pub fn drain(&mut self) -> Vec<RigEvent> {
        self.pending.drain(..).collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_emit_unsubscribe() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let id = bus.subscribe(move |event| sink.borrow_mut().push(event));
        assert_eq!(bus.listener_count(), 1);

        bus.emit(RigEvent::ScaleStarted);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(RigEvent::ScaleStopped);

        assert_eq!(*seen.borrow(), vec![RigEvent::ScaleStarted]);
        assert_eq!(
            bus.drain(),
            vec![RigEvent::ScaleStarted, RigEvent::ScaleStopped]
        );
        assert!(bus.drain().is_empty());
    }
}
