//! Spinner delegates and hint row translation
//!
//! The native spinner has no "no selection" state and no hint, so a
//! synthetic hint row always sits at native index 0:
//!
//! ```text
//! native   0        1        2        3
//!        ┌──────┬────────┬────────┬────────┐
//!        │ hint │ Item 0 │ Item 1 │ Item 2 │
//!        └──────┴────────┴────────┴────────┘
//! logical  None     0        1        2
//! ```
//!
//! Every delegate holds a [`WeakDropDown`] and answers with an inert default
//! (0, `None`, `false`) once the widget is gone or busy.
//!
//! "Busy" covers re-entrancy: a delegate called synchronously from inside
//! [`DropDown::update`](dropdown_core::DropDown::update), such as a native
//! `notifyDataSetChanged` that calls back into `getCount()`, gets 0 rows and
//! no view. The spinner state lives behind the same borrow, so there is no
//! last-known count to fall back on. A bridge must queue data-set
//! notifications and deliver them once `update` returns.

use dropdown_core::WeakDropDown;

use crate::realized::{NativeViewId, RealizedViewType};
use crate::spinner::SpinnerPeer;

// =============================================================================
// Index translation
// =============================================================================

/// Native row of a logical index
pub fn native_index_of(logical: Option<usize>) -> usize {
    match logical {
        Some(index) => index + 1,
        None => 0,
    }
}

/// Logical index of a native row; the hint row maps to unset
pub fn logical_index_of(native: usize) -> Option<usize> {
    native.checked_sub(1)
}

/// Rows reported to the spinner: every item plus the hint row
pub fn row_count(item_count: Option<usize>) -> usize {
    item_count.unwrap_or(0) + 1
}

// =============================================================================
// DropDownAdapter
// =============================================================================

/// The spinner's row adapter (`BaseAdapter`)
#[derive(Clone, Debug, Default)]
pub struct DropDownAdapter {
    owner: WeakDropDown<SpinnerPeer>,
}

impl DropDownAdapter {
    pub(crate) fn new(owner: WeakDropDown<SpinnerPeer>) -> Self {
        Self { owner }
    }

    pub fn get_count(&self) -> usize {
        match self.owner.upgrade() {
            Some(dropdown) => dropdown.with_base(|base| row_count(base.item_count())),
            None => 0,
        }
    }

    /// Text of native row `index`; the hint for row 0
    pub fn get_item(&self, index: usize) -> Option<String> {
        let dropdown = self.owner.upgrade()?;
        dropdown.with_base(|base| {
            if index >= row_count(base.item_count()) {
                return None;
            }
            match logical_index_of(index) {
                None => Some(base.hint().to_string()),
                logical => base.get_item_as_string(logical),
            }
        })
    }

    pub fn get_item_id(&self, index: usize) -> i64 {
        index as i64
    }

    pub fn has_stable_ids(&self) -> bool {
        true
    }

    /// The hint row can be shown but never picked
    pub fn is_enabled(&self, index: usize) -> bool {
        index != 0 && self.owner.upgrade().is_some()
    }

    /// Row for the closed spinner
    pub fn get_view(&self, index: usize, convert_view: Option<NativeViewId>) -> Option<NativeViewId> {
        self.generate_view(index, convert_view, RealizedViewType::ItemView)
    }

    /// Row for the open popup
    pub fn get_drop_down_view(
        &self,
        index: usize,
        convert_view: Option<NativeViewId>,
    ) -> Option<NativeViewId> {
        self.generate_view(index, convert_view, RealizedViewType::DropDownView)
    }

    fn generate_view(
        &self,
        index: usize,
        convert_view: Option<NativeViewId>,
        kind: RealizedViewType,
    ) -> Option<NativeViewId> {
        let Some(dropdown) = self.owner.upgrade() else {
            tracing::warn!("{:?} requested for row {} after teardown", kind, index);
            return None;
        };
        dropdown.update(|base, peer| peer.generate_view(base, index, convert_view, kind))
    }

    /// The native list removed a row container from its parent
    pub fn on_view_orphaned(&self, view: NativeViewId) {
        if let Some(dropdown) = self.owner.upgrade() {
            dropdown.update(|_, peer| peer.cache_mut().orphan(view));
        }
    }

    /// The native list destroyed a row container
    pub fn on_view_released(&self, view: NativeViewId) {
        if let Some(dropdown) = self.owner.upgrade() {
            dropdown.update(|_, peer| peer.cache_mut().release(view));
        }
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// `OnItemSelectedListener` of the spinner
#[derive(Clone, Debug, Default)]
pub struct ItemSelectedListener {
    owner: WeakDropDown<SpinnerPeer>,
}

impl ItemSelectedListener {
    pub(crate) fn new(owner: WeakDropDown<SpinnerPeer>) -> Self {
        Self { owner }
    }

    /// The user picked native row `index`
    pub fn on_item_selected(&self, index: usize) {
        let Some(dropdown) = self.owner.upgrade() else {
            tracing::warn!("row {} selected after teardown", index);
            return;
        };
        dropdown.update(|base, peer| peer.commit_native_selection(base, index));
    }

    pub fn on_nothing_selected(&self) {}
}

/// Window focus callback of the spinner, used to detect popup dismissal
#[derive(Clone, Debug, Default)]
pub struct WindowFocusListener {
    owner: WeakDropDown<SpinnerPeer>,
}

impl WindowFocusListener {
    pub(crate) fn new(owner: WeakDropDown<SpinnerPeer>) -> Self {
        Self { owner }
    }

    pub fn on_window_focus_changed(&self, has_focus: bool) {
        if let Some(dropdown) = self.owner.upgrade() {
            dropdown.update(|base, peer| peer.on_window_focus_changed(base, has_focus));
        }
    }
}
