//! Widget events
//!
//! A drop down raises three events to host code:
//!
//! - [`EventKind::Opened`] when the user brings up the selection surface
//! - [`EventKind::Closed`] when the surface goes away
//! - [`EventKind::SelectedIndexChanged`] when the logical selection changes,
//!   carrying `{old_index, new_index}`
//!
//! Events are queued while the widget state is being mutated and dispatched
//! once the mutation has finished, so listeners always observe post-write
//! values and may freely read or write the widget.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Identifier for a registered event listener
    pub struct ListenerId;
}

/// Event names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Selection surface shown
    Opened,
    /// Selection surface dismissed
    Closed,
    /// Logical selection changed
    SelectedIndexChanged,
}

impl EventKind {
    /// Framework event name
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Opened => "opened",
            EventKind::Closed => "closed",
            EventKind::SelectedIndexChanged => "selectedIndexChanged",
        }
    }
}

/// An event raised by a drop down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDownEvent {
    /// Selection surface shown
    Opened,
    /// Selection surface dismissed
    Closed,
    /// Logical selection changed
    SelectedIndexChanged {
        /// Index before the change (`None` = unset)
        old_index: Option<usize>,
        /// Index after the change (`None` = unset)
        new_index: Option<usize>,
    },
}

impl DropDownEvent {
    /// The kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            DropDownEvent::Opened => EventKind::Opened,
            DropDownEvent::Closed => EventKind::Closed,
            DropDownEvent::SelectedIndexChanged { .. } => EventKind::SelectedIndexChanged,
        }
    }
}

/// Listener callback type
pub type EventCallback = Rc<dyn Fn(&DropDownEvent)>;

struct Listener {
    kind: EventKind,
    callback: EventCallback,
}

/// Listener registry with `on`/`off`/`notify`
#[derive(Default)]
pub struct EventEmitter {
    listeners: RefCell<SlotMap<ListenerId, Listener>>,
}

impl EventEmitter {
    /// Create an empty emitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one event kind
    pub fn on<F>(&self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&DropDownEvent) + 'static,
    {
        self.listeners.borrow_mut().insert(Listener {
            kind,
            callback: Rc::new(callback),
        })
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn off(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(id).is_some()
    }

    /// Remove every listener for `kind`
    pub fn off_all(&self, kind: EventKind) {
        self.listeners
            .borrow_mut()
            .retain(|_, listener| listener.kind != kind);
    }

    /// Number of listeners for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .values()
            .filter(|listener| listener.kind == kind)
            .count()
    }

    /// Deliver an event to every listener of its kind
    pub fn notify(&self, event: &DropDownEvent) {
        let kind = event.kind();
        // Listeners may register or remove listeners, so none of them run under the borrow.
        let callbacks: SmallVec<[EventCallback; 4]> = self
            .listeners
            .borrow()
            .values()
            .filter(|listener| listener.kind == kind)
            .map(|listener| listener.callback.clone())
            .collect();
        tracing::trace!("notify {} to {} listener(s)", kind.name(), callbacks.len());
        for callback in callbacks {
            callback(event);
        }
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_filters_by_kind() {
        let emitter = EventEmitter::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen_clone = seen.clone();
        emitter.on(EventKind::SelectedIndexChanged, move |e| {
            seen_clone.borrow_mut().push(*e)
        });

        emitter.notify(&DropDownEvent::Opened);
        emitter.notify(&DropDownEvent::SelectedIndexChanged {
            old_index: None,
            new_index: Some(2),
        });

        assert_eq!(
            *seen.borrow(),
            vec![DropDownEvent::SelectedIndexChanged {
                old_index: None,
                new_index: Some(2)
            }]
        );
    }

    #[test]
    fn test_off() {
        let emitter = EventEmitter::new();
        let count = Rc::new(RefCell::new(0));
        let count_clone = count.clone();
        let id = emitter.on(EventKind::Opened, move |_| *count_clone.borrow_mut() += 1);

        emitter.notify(&DropDownEvent::Opened);
        assert!(emitter.off(id));
        emitter.notify(&DropDownEvent::Opened);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(emitter.listener_count(EventKind::Opened), 0);
    }

    #[test]
    fn test_listener_may_unregister_itself() {
        let emitter = Rc::new(EventEmitter::new());
        let emitter_clone = emitter.clone();
        emitter.on(EventKind::Closed, move |_| emitter_clone.off_all(EventKind::Closed));
        emitter.notify(&DropDownEvent::Closed);
        assert_eq!(emitter.listener_count(EventKind::Closed), 0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventKind::Opened.name(), "opened");
        assert_eq!(EventKind::SelectedIndexChanged.name(), "selectedIndexChanged");
    }
}
