//! Typed controller notifications.
//!
//! Replaces stringly-keyed event firing with a closed enum: subscribers
//! get every event and match on the variants they care about. Payload
//! deltas are in camera space, already converted from pixels.

use glam::{Vec2, Vec3};

/// Notification emitted by a
/// [`PanZoomController`](crate::controller::PanZoomController).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// The camera position changed, for any reason. Fired after every
    /// applied pan, zoom or kinetic step — redraw on this.
    Change,
    /// A drag produced its first movement.
    PanStart,
    /// A pan step was applied.
    Pan {
        /// Camera-space position delta of this step.
        delta: Vec2,
    },
    /// The drag ended (kinetic coasting may continue).
    PanEnd,
    /// A zoom step is about to be applied.
    ///
    /// Fired before the camera moves, once per applied step — wheel
    /// notches, pinch steps and glide frames alike. Rejected
    /// (out-of-range) steps fire nothing.
    ZoomStart {
        /// Camera-space position delta the step will apply.
        delta: Vec3,
    },
    /// A zoom interaction concluded (wheel notch applied, pinch
    /// lifted, or glide completed/cancelled).
    ZoomEnd,
}

/// Subscription handle returned by
/// [`EventListeners::subscribe`]; pass back to
/// [`EventListeners::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of event subscribers.
///
/// Listeners are plain `FnMut` closures invoked synchronously, in
/// subscription order, on the caller's thread. A listener must not
/// re-enter the controller that owns the registry.
#[derive(Default)]
pub struct EventListeners {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn FnMut(&ControllerEvent)>)>,
}

impl EventListeners {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; the returned id unsubscribes it.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ControllerEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver an event to every listener in subscription order.
    pub fn emit(&mut self, event: &ControllerEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventListeners")
            .field("len", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_subscribe_emit_unsubscribe() {
        let mut listeners = EventListeners::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        let id = listeners.subscribe(move |event| {
            sink.borrow_mut().push(*event);
        });

        listeners.emit(&ControllerEvent::PanStart);
        listeners.emit(&ControllerEvent::Change);
        assert_eq!(
            *seen.borrow(),
            vec![ControllerEvent::PanStart, ControllerEvent::Change],
        );

        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&ControllerEvent::PanEnd);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_listeners_fire_in_subscription_order() {
        let mut listeners = EventListeners::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in 0..3 {
            let sink = Rc::clone(&order);
            let _ = listeners.subscribe(move |_| {
                sink.borrow_mut().push(tag);
            });
        }
        listeners.emit(&ControllerEvent::Change);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }
}
