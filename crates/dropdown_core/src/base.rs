//! Shared property model
//!
//! [`DropDownBase`] is the single source of truth for a drop down's state.
//! Every external write goes through three steps:
//!
//! 1. coerce the candidate against the current items
//! 2. store the result and queue `selectedIndexChanged` if the logical index moved
//! 3. push the new state to the native peer, if one is attached
//!
//! The composed operations are generic over the [`NativePeer`] so that both
//! host writes (through [`DropDown`](crate::DropDown)) and native callbacks
//! (through a platform delegate) follow the same path.

use std::collections::VecDeque;

use crate::coerce::{coerce_selected_index, IndexCandidate};
use crate::events::DropDownEvent;
use crate::items::{get_item_text, Items, ItemsProbe};
use crate::observable::{ObservableArray, SubscriptionId};
use crate::peer::NativePeer;
use crate::style::Style;

/// Cross-platform drop down state
#[derive(Debug)]
pub struct DropDownBase {
    items: Option<Items>,
    selected_index: Option<usize>,
    hint: String,
    enabled: bool,
    style: Style,
    probe: ItemsProbe,
    /// Events raised during the current mutation, dispatched once it ends
    pending: VecDeque<DropDownEvent>,
    /// Change-signal subscription on an observable `items`
    items_subscription: Option<(ObservableArray, SubscriptionId)>,
}

impl Default for DropDownBase {
    fn default() -> Self {
        Self::new()
    }
}

impl DropDownBase {
    /// Empty state: no items, no selection, empty hint, enabled
    pub fn new() -> Self {
        Self {
            items: None,
            selected_index: None,
            hint: String::new(),
            enabled: true,
            style: Style::default(),
            probe: ItemsProbe::default(),
            pending: VecDeque::new(),
            items_subscription: None,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn items(&self) -> Option<&Items> {
        self.items.as_ref()
    }

    /// Number of items, `None` when `items` is unset
    pub fn item_count(&self) -> Option<usize> {
        self.items.as_ref().map(Items::len)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn is_items_source_in(&self) -> bool {
        self.probe.is_items_source_in
    }

    pub fn is_value_list_in(&self) -> bool {
        self.probe.is_value_list_in
    }

    /// Text of the row at `index`, shared by every renderer
    pub fn get_item_as_string(&self, index: Option<usize>) -> Option<String> {
        get_item_text(self.items.as_ref(), index)
    }

    /// Row text with the current text transform applied
    pub fn render_item_text(&self, index: Option<usize>) -> Option<String> {
        self.get_item_as_string(index)
            .map(|text| self.style.text_transform.apply(&text))
    }

    /// Hint with the current text transform applied
    pub fn render_hint(&self) -> String {
        self.style.text_transform.apply(&self.hint)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Queue an event for dispatch after the current mutation
    pub fn emit(&mut self, event: DropDownEvent) {
        self.pending.push_back(event);
    }

    /// Drain queued events
    pub fn take_pending(&mut self) -> Vec<DropDownEvent> {
        self.pending.drain(..).collect()
    }

    /// Store a coerced index, queueing `selectedIndexChanged` if it moved
    ///
    /// Returns whether the index changed. Comparison is by logical index only.
    fn commit_selected_index(&mut self, new_index: Option<usize>) -> bool {
        let old_index = self.selected_index;
        if old_index == new_index {
            return false;
        }
        self.selected_index = new_index;
        tracing::debug!("selectedIndex {:?} -> {:?}", old_index, new_index);
        self.emit(DropDownEvent::SelectedIndexChanged {
            old_index,
            new_index,
        });
        true
    }

    // =========================================================================
    // Composed writes
    // =========================================================================

    /// Coerce, store and push a new `selectedIndex`
    pub fn write_selected_index<P: NativePeer>(
        &mut self,
        peer: &mut P,
        candidate: &IndexCandidate,
    ) -> bool {
        let resolved = coerce_selected_index(candidate, self.item_count());
        let changed = self.commit_selected_index(resolved);
        if changed && peer.is_attached() {
            peer.selected_index_changed(self);
        }
        changed
    }

    /// Replace `items`, re-coerce the selection and push both
    ///
    /// Returns the previous items. The caller owns subscription management
    /// for observable sequences.
    pub fn write_items<P: NativePeer>(&mut self, peer: &mut P, items: Option<Items>) -> Option<Items> {
        let previous = std::mem::replace(&mut self.items, items);
        self.probe = self.items.as_ref().map(Items::probe).unwrap_or_default();
        tracing::debug!(
            "items set on {}: count={:?} items_source={} value_list={}",
            peer.platform_name(),
            self.item_count(),
            self.probe.is_items_source_in,
            self.probe.is_value_list_in
        );

        let changed = self.revalidate_selection(peer);
        if peer.is_attached() {
            peer.items_changed(self);
            if changed {
                peer.selected_index_changed(self);
            }
        }
        previous
    }

    /// Re-validate the selection against the current items and re-notify the peer
    pub fn refresh<P: NativePeer>(&mut self, peer: &mut P) -> bool {
        let changed = self.revalidate_selection(peer);
        if peer.is_attached() {
            if changed {
                peer.selected_index_changed(self);
            }
            peer.refresh(self);
        }
        changed
    }

    /// Platform policy first, then the shared clamp
    fn revalidate_selection<P: NativePeer>(&mut self, peer: &P) -> bool {
        let count = self.item_count().unwrap_or(0);
        let by_platform = peer.coerce_on_items_changed(self.selected_index, count);
        let resolved = coerce_selected_index(&by_platform.into(), self.item_count());
        self.commit_selected_index(resolved)
    }

    pub fn write_hint<P: NativePeer>(&mut self, peer: &mut P, hint: String) {
        if self.hint == hint {
            return;
        }
        self.hint = hint;
        if peer.is_attached() {
            peer.hint_changed(self);
        }
    }

    pub fn write_enabled<P: NativePeer>(&mut self, peer: &mut P, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        if peer.is_attached() {
            peer.enabled_changed(self);
        }
    }

    /// Mutable access to the style snapshot; the caller pushes the change
    pub(crate) fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub(crate) fn set_items_subscription(
        &mut self,
        subscription: Option<(ObservableArray, SubscriptionId)>,
    ) -> Option<(ObservableArray, SubscriptionId)> {
        std::mem::replace(&mut self.items_subscription, subscription)
    }
}

impl Drop for DropDownBase {
    fn drop(&mut self) {
        if let Some((array, id)) = self.items_subscription.take() {
            array.unsubscribe(id);
        }
    }
}
