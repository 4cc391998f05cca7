//! The drop down widget handle
//!
//! [`DropDown<P>`] owns the shared model and one platform peer. Handles are
//! cheap to clone; native delegates hold a [`WeakDropDown<P>`] instead so the
//! widget always outlives them.
//!
//! # Example
//!
//! ```ignore
//! use dropdown_core::{DropDown, EventKind, DropDownEvent};
//!
//! let dropdown = DropDown::new(peer);
//! dropdown.set_hint("My Hint");
//! dropdown.set_items((0..200).map(|i| format!("Item {}", i)).collect::<Vec<_>>());
//!
//! dropdown.on(EventKind::SelectedIndexChanged, |event| {
//!     if let DropDownEvent::SelectedIndexChanged { old_index, new_index } = event {
//!         println!("{:?} -> {:?}", old_index, new_index);
//!     }
//! });
//!
//! dropdown.create_native_view();
//! dropdown.set_selected_index(15);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::base::DropDownBase;
use crate::coerce::IndexCandidate;
use crate::events::{DropDownEvent, EventEmitter, EventKind, ListenerId};
use crate::items::Items;
use crate::peer::NativePeer;
use crate::style::{Color, Font, Padding, StyleProperty, TextAlignment, TextDecoration, TextTransform};

struct WidgetState<P> {
    base: DropDownBase,
    peer: P,
}

struct Shared<P> {
    state: RefCell<WidgetState<P>>,
    events: EventEmitter,
}

/// A cross-platform drop down
pub struct DropDown<P: NativePeer> {
    shared: Rc<Shared<P>>,
}

impl<P: NativePeer> Clone for DropDown<P> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

/// Non-owning back-reference to a drop down
pub struct WeakDropDown<P: NativePeer> {
    shared: Weak<Shared<P>>,
}

impl<P: NativePeer> Clone for WeakDropDown<P> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<P: NativePeer> WeakDropDown<P> {
    /// A back-reference that never upgrades
    pub fn new() -> Self {
        Self { shared: Weak::new() }
    }

    /// Upgrade to a strong handle if the widget is still alive
    pub fn upgrade(&self) -> Option<DropDown<P>> {
        self.shared.upgrade().map(|shared| DropDown { shared })
    }
}

impl<P: NativePeer> Default for WeakDropDown<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: NativePeer> fmt::Debug for WeakDropDown<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakDropDown")
            .field("alive", &(self.shared.strong_count() > 0))
            .finish()
    }
}

impl<P: NativePeer> DropDown<P> {
    /// Create a widget around a platform peer. No native view exists yet.
    pub fn new(peer: P) -> Self {
        Self {
            shared: Rc::new(Shared {
                state: RefCell::new(WidgetState {
                    base: DropDownBase::new(),
                    peer,
                }),
                events: EventEmitter::new(),
            }),
        }
    }

    /// Non-owning back-reference for native delegates
    pub fn downgrade(&self) -> WeakDropDown<P> {
        WeakDropDown {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Whether both handles refer to the same widget
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// Run `f` against the model and the peer, then dispatch queued events
    ///
    /// Re-entrant calls (from inside another `update`) are refused and
    /// return `R::default()`.
    pub fn update<R: Default>(&self, f: impl FnOnce(&mut DropDownBase, &mut P) -> R) -> R {
        let (result, events) = {
            let Ok(mut state) = self.shared.state.try_borrow_mut() else {
                tracing::warn!("re-entrant drop down update ignored");
                return R::default();
            };
            let WidgetState { base, peer } = &mut *state;
            let result = f(&mut *base, &mut *peer);
            (result, base.take_pending())
        };
        for event in &events {
            self.shared.events.notify(event);
        }
        result
    }

    /// Read the model
    pub fn with_base<R: Default>(&self, f: impl FnOnce(&DropDownBase) -> R) -> R {
        match self.shared.state.try_borrow() {
            Ok(state) => f(&state.base),
            Err(_) => {
                tracing::warn!("drop down read during mutation ignored");
                R::default()
            }
        }
    }

    /// Read the peer
    pub fn with_peer<R: Default>(&self, f: impl FnOnce(&P) -> R) -> R {
        match self.shared.state.try_borrow() {
            Ok(state) => f(&state.peer),
            Err(_) => {
                tracing::warn!("drop down peer read during mutation ignored");
                R::default()
            }
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Construct the native widget and push the current state onto it
    pub fn create_native_view(&self) {
        let owner = self.downgrade();
        self.update(|base, peer| {
            if peer.is_attached() {
                return;
            }
            peer.create_native_view(owner);
            peer.init_native_view(base);
            tracing::debug!("{} native view created", peer.platform_name());
        });
    }

    /// Tear the native widget down
    pub fn dispose_native_view(&self) {
        self.update(|_, peer| {
            if peer.is_attached() {
                peer.dispose_native_view();
                tracing::debug!("{} native view disposed", peer.platform_name());
            }
        });
    }

    pub fn is_attached(&self) -> bool {
        self.with_peer(|peer| peer.is_attached())
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn items(&self) -> Option<Items> {
        self.with_base(|base| base.items().cloned())
    }

    /// Assign `items`
    ///
    /// An observable sequence is subscribed to so in-place mutations call
    /// [`refresh`](Self::refresh). The previous sequence's subscription is
    /// detached.
    pub fn set_items(&self, items: impl Into<Items>) {
        self.assign_items(Some(items.into()));
    }

    /// Unset `items`
    pub fn clear_items(&self) {
        self.assign_items(None);
    }

    fn assign_items(&self, items: Option<Items>) {
        let subscription = items.as_ref().and_then(Items::observable).map(|array| {
            let owner = self.downgrade();
            let id = array.subscribe(move |change| {
                if let Some(dropdown) = owner.upgrade() {
                    tracing::trace!("observable items changed: {:?}", change.action);
                    dropdown.refresh();
                }
            });
            (array.clone(), id)
        });
        let fresh = subscription.clone();

        let (applied, stale) = self.update(move |base, peer| {
            let stale = base.set_items_subscription(subscription);
            base.write_items(peer, items);
            (true, stale)
        });

        if !applied {
            // The write was refused, so the new subscription was never stored.
            if let Some((array, id)) = fresh {
                array.unsubscribe(id);
            }
        }
        if let Some((array, id)) = stale {
            array.unsubscribe(id);
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.with_base(|base| base.selected_index())
    }

    /// Assign `selectedIndex`; the value is coerced against the current items
    pub fn set_selected_index(&self, candidate: impl Into<IndexCandidate>) {
        let candidate = candidate.into();
        self.update(|base, peer| base.write_selected_index(peer, &candidate));
    }

    pub fn hint(&self) -> String {
        self.with_base(|base| base.hint().to_string())
    }

    pub fn set_hint(&self, hint: impl Into<String>) {
        let hint = hint.into();
        self.update(|base, peer| base.write_hint(peer, hint));
    }

    pub fn is_enabled(&self) -> bool {
        self.with_base(|base| base.is_enabled())
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.update(|base, peer| base.write_enabled(peer, enabled));
    }

    pub fn is_items_source_in(&self) -> bool {
        self.with_base(|base| base.is_items_source_in())
    }

    pub fn is_value_list_in(&self) -> bool {
        self.with_base(|base| base.is_value_list_in())
    }

    /// Text of the row at `index`
    pub fn get_item_as_string(&self, index: Option<usize>) -> Option<String> {
        self.with_base(|base| base.get_item_as_string(index))
    }

    // =========================================================================
    // Style
    // =========================================================================

    pub fn style(&self) -> crate::style::Style {
        self.with_base(|base| base.style().clone())
    }

    fn write_style(&self, property: StyleProperty, f: impl FnOnce(&mut crate::style::Style) -> bool) {
        self.update(|base, peer| {
            if f(base.style_mut()) && peer.is_attached() {
                peer.apply_style(base, property);
            }
        });
    }

    pub fn set_color(&self, color: Option<Color>) {
        self.write_style(StyleProperty::Color, |style| {
            std::mem::replace(&mut style.color, color) != color
        });
    }

    pub fn set_background_color(&self, color: Option<Color>) {
        self.write_style(StyleProperty::BackgroundColor, |style| {
            std::mem::replace(&mut style.background_color, color) != color
        });
    }

    pub fn set_font(&self, font: Font) {
        self.write_style(StyleProperty::Font, |style| {
            if style.font == font {
                return false;
            }
            style.font = font;
            true
        });
    }

    pub fn set_text_alignment(&self, alignment: TextAlignment) {
        self.write_style(StyleProperty::TextAlignment, |style| {
            std::mem::replace(&mut style.text_alignment, alignment) != alignment
        });
    }

    pub fn set_text_decoration(&self, decoration: TextDecoration) {
        self.write_style(StyleProperty::TextDecoration, |style| {
            std::mem::replace(&mut style.text_decoration, decoration) != decoration
        });
    }

    pub fn set_text_transform(&self, transform: TextTransform) {
        self.write_style(StyleProperty::TextTransform, |style| {
            std::mem::replace(&mut style.text_transform, transform) != transform
        });
    }

    pub fn set_padding(&self, padding: Padding) {
        self.write_style(StyleProperty::Padding, |style| {
            std::mem::replace(&mut style.padding, padding) != padding
        });
    }

    /// Alignment of rows in the opened surface
    pub fn set_items_text_alignment(&self, alignment: Option<TextAlignment>) {
        self.write_style(StyleProperty::ItemsTextAlignment, |style| {
            std::mem::replace(&mut style.items_text_alignment, alignment) != alignment
        });
    }

    /// Padding of rows in the opened surface
    pub fn set_items_padding(&self, padding: Option<Padding>) {
        self.write_style(StyleProperty::ItemsPadding, |style| {
            std::mem::replace(&mut style.items_padding, padding) != padding
        });
    }

    // =========================================================================
    // Methods
    // =========================================================================

    /// Show the selection surface. Ignored while disabled or detached.
    pub fn open(&self) {
        self.update(|base, peer| {
            if !base.is_enabled() {
                tracing::debug!("open ignored: drop down is disabled");
                return;
            }
            if peer.is_attached() {
                peer.open(base);
            }
        });
    }

    /// Dismiss the selection surface
    pub fn close(&self) {
        self.update(|base, peer| {
            if peer.is_attached() {
                peer.close(base);
            }
        });
    }

    /// Re-validate the selection and re-notify the native widget
    pub fn refresh(&self) {
        self.update(|base, peer| base.refresh(peer));
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Subscribe to an event
    pub fn on<F>(&self, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&DropDownEvent) + 'static,
    {
        self.shared.events.on(kind, callback)
    }

    /// Unsubscribe a listener
    pub fn off(&self, id: ListenerId) -> bool {
        self.shared.events.off(id)
    }
}

impl<P: NativePeer> fmt::Debug for DropDown<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shared.state.try_borrow() {
            Ok(state) => f
                .debug_struct("DropDown")
                .field("platform", &state.peer.platform_name())
                .field("base", &state.base)
                .field("events", &self.shared.events)
                .finish(),
            Err(_) => f.debug_struct("DropDown").finish_non_exhaustive(),
        }
    }
}
