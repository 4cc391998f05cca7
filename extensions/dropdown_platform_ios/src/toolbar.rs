//! Input accessory toolbar

use dropdown_core::WeakDropDown;

use crate::peer::PickerPeer;

/// Toolbar height in points
pub const TOOLBAR_HEIGHT: f32 = 44.0;

/// Toolbar items, left to right
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarButtonItem {
    FlexibleSpace,
    Done,
}

/// Toolbar shown above the picker with a right-aligned Done button
#[derive(Clone, Debug, PartialEq)]
pub struct Toolbar {
    pub height: f32,
    pub items: [BarButtonItem; 2],
}

impl Default for Toolbar {
    fn default() -> Self {
        Self {
            height: TOOLBAR_HEIGHT,
            items: [BarButtonItem::FlexibleSpace, BarButtonItem::Done],
        }
    }
}

/// Target of the Done button
#[derive(Clone, Debug, Default)]
pub struct DoneTapHandler {
    owner: WeakDropDown<PickerPeer>,
}

impl DoneTapHandler {
    pub(crate) fn new(owner: WeakDropDown<PickerPeer>) -> Self {
        Self { owner }
    }

    /// Resign first responder, closing the picker
    pub fn tap(&self) {
        match self.owner.upgrade() {
            Some(dropdown) => dropdown.update(|base, peer| peer.resign_first_responder(base)),
            None => tracing::warn!("Done tapped after teardown"),
        }
    }
}
