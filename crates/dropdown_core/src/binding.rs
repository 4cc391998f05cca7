//! Two-way form binding
//!
//! [`SelectedIndexValueAccessor`] connects a drop down's `selectedIndex` to a
//! form model. Values written before the view is initialized are buffered
//! and applied by [`after_view_init`](SelectedIndexValueAccessor::after_view_init).

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::coerce::IndexCandidate;
use crate::events::{DropDownEvent, EventKind, ListenerId};
use crate::peer::NativePeer;
use crate::widget::DropDown;

type ChangeFn = Rc<dyn Fn(Option<usize>)>;
type TouchedFn = Rc<dyn Fn()>;

#[derive(Default)]
struct AccessorState {
    normalized: IndexCandidate,
    view_initialized: bool,
    on_change: Option<ChangeFn>,
    on_touched: Option<TouchedFn>,
}

/// Binds `selectedIndex` to a form control
pub struct SelectedIndexValueAccessor<P: NativePeer> {
    view: DropDown<P>,
    state: Rc<RefCell<AccessorState>>,
    listeners: SmallVec<[ListenerId; 2]>,
}

impl<P: NativePeer> SelectedIndexValueAccessor<P> {
    pub fn new(view: DropDown<P>) -> Self {
        let state = Rc::new(RefCell::new(AccessorState::default()));

        let change_state = state.clone();
        let on_change = view.on(EventKind::SelectedIndexChanged, move |event| {
            if let DropDownEvent::SelectedIndexChanged { new_index, .. } = event {
                let callback = change_state.borrow().on_change.clone();
                if let Some(callback) = callback {
                    callback(*new_index);
                }
            }
        });

        let touched_state = state.clone();
        let on_closed = view.on(EventKind::Closed, move |_| {
            let callback = touched_state.borrow().on_touched.clone();
            if let Some(callback) = callback {
                callback();
            }
        });

        Self {
            view,
            state,
            listeners: SmallVec::from_slice(&[on_change, on_closed]),
        }
    }

    pub fn view(&self) -> &DropDown<P> {
        &self.view
    }

    /// Write a model value into the view
    ///
    /// An empty string is treated as unset.
    pub fn write_value(&self, value: impl Into<IndexCandidate>) {
        let normalized = match value.into() {
            IndexCandidate::Text(text) if text.is_empty() => IndexCandidate::Unset,
            other => other,
        };
        let initialized = {
            let mut state = self.state.borrow_mut();
            state.normalized = normalized.clone();
            state.view_initialized
        };
        if initialized {
            self.view.set_selected_index(normalized);
        }
    }

    /// Apply the buffered value once the view exists
    pub fn after_view_init(&self) {
        let normalized = {
            let mut state = self.state.borrow_mut();
            state.view_initialized = true;
            state.normalized.clone()
        };
        self.view.set_selected_index(normalized);
    }

    /// Called with the new index whenever the view's selection changes
    pub fn register_on_change(&self, callback: impl Fn(Option<usize>) + 'static) {
        self.state.borrow_mut().on_change = Some(Rc::new(callback));
    }

    /// Called whenever the selection surface closes
    pub fn register_on_touched(&self, callback: impl Fn() + 'static) {
        self.state.borrow_mut().on_touched = Some(Rc::new(callback));
    }

    pub fn set_disabled_state(&self, disabled: bool) {
        self.view.set_enabled(!disabled);
    }
}

impl<P: NativePeer> Drop for SelectedIndexValueAccessor<P> {
    fn drop(&mut self) {
        for id in self.listeners.drain(..) {
            self.view.off(id);
        }
    }
}
