//! iOS native peer
//!
//! ```text
//! closed ──── label tap / open() ────► opened ──── Done / row pick / close() ───► closed
//!        becomeFirstResponder                  resignFirstResponder
//!        emits `opened`                        emits `closed`
//! ```
//!
//! Selection is mirrored on the label text and on the picker wheel. The
//! first push to the wheel after creation is deferred by one main-queue
//! tick; selecting a row synchronously while the wheel initializes is
//! not reliable on the native side.

use dropdown_core::{DropDownBase, DropDownEvent, NativePeer, StyleProperty, WeakDropDown};
use dropdown_platform::MainQueue;

use crate::label::{DropDownLabel, LabelTapHandler};
use crate::picker::{PickerDelegate, PickerView};
use crate::toolbar::{DoneTapHandler, Toolbar};

/// Native views of one drop down
#[derive(Debug)]
pub struct NativeViews {
    pub label: DropDownLabel,
    pub picker: PickerView,
    pub toolbar: Toolbar,
    pub label_tap: LabelTapHandler,
    pub picker_delegate: PickerDelegate,
    pub done_tap: DoneTapHandler,
}

/// iOS [`NativePeer`]: label with a picker wheel input view
#[derive(Debug)]
pub struct PickerPeer {
    main_queue: MainQueue,
    owner: WeakDropDown<PickerPeer>,
    native: Option<NativeViews>,
    accessory_view_visible: bool,
}

impl PickerPeer {
    /// Deferred work is posted to `main_queue`
    pub fn new(main_queue: MainQueue) -> Self {
        Self {
            main_queue,
            owner: WeakDropDown::new(),
            native: None,
            accessory_view_visible: true,
        }
    }

    pub fn native(&self) -> Option<&NativeViews> {
        self.native.as_ref()
    }

    pub fn accessory_view_visible(&self) -> bool {
        self.accessory_view_visible
    }

    /// Show or hide the Done toolbar above the picker
    pub fn set_accessory_view_visible(&mut self, visible: bool) {
        self.accessory_view_visible = visible;
        self.sync_input_views();
    }

    fn sync_input_views(&mut self) {
        let visible = self.accessory_view_visible;
        if let Some(native) = self.native.as_mut() {
            native.label.has_input_view = true;
            native.label.has_input_accessory_view = visible;
        }
    }

    pub(crate) fn become_first_responder(&mut self, base: &mut DropDownBase) {
        let opened = self
            .native
            .as_mut()
            .map(|native| native.label.become_first_responder())
            .unwrap_or(false);
        if opened {
            base.emit(DropDownEvent::Opened);
        }
    }

    pub(crate) fn resign_first_responder(&mut self, base: &mut DropDownBase) {
        let closed = self
            .native
            .as_mut()
            .map(|native| native.label.resign_first_responder())
            .unwrap_or(false);
        if closed {
            base.emit(DropDownEvent::Closed);
        }
    }

    /// Record the row the wheel settled on
    pub(crate) fn picker_selected(&mut self, row: usize) {
        if let Some(native) = self.native.as_mut() {
            native.picker.select_row(row);
        }
    }

    fn sync_label(&mut self, base: &DropDownBase) {
        if let Some(native) = self.native.as_mut() {
            native.label.sync_text(base);
        }
    }

    fn push_selection(&mut self, base: &DropDownBase) {
        if let (Some(native), Some(index)) = (self.native.as_mut(), base.selected_index()) {
            native.picker.select_row(index);
        }
    }

    fn reload_picker(&mut self, base: &DropDownBase) {
        if let Some(native) = self.native.as_mut() {
            native.picker.reload_all_components(base.item_count().unwrap_or(0));
        }
    }

    fn schedule_initial_selection(&self) {
        let owner = self.owner.clone();
        self.main_queue.post(move || {
            if let Some(dropdown) = owner.upgrade() {
                dropdown.update(|base, peer| {
                    tracing::trace!("applying deferred picker selection {:?}", base.selected_index());
                    peer.push_selection(base);
                });
            }
        });
    }
}

impl NativePeer for PickerPeer {
    fn platform_name(&self) -> &'static str {
        "ios"
    }

    fn create_native_view(&mut self, owner: WeakDropDown<Self>) {
        self.native = Some(NativeViews {
            label: DropDownLabel::default(),
            picker: PickerView::default(),
            toolbar: Toolbar::default(),
            label_tap: LabelTapHandler::new(owner.clone()),
            picker_delegate: PickerDelegate::new(owner.clone()),
            done_tap: DoneTapHandler::new(owner.clone()),
        });
        self.owner = owner;
    }

    fn init_native_view(&mut self, base: &mut DropDownBase) {
        if let Some(native) = self.native.as_mut() {
            native.label.set_enabled(base.is_enabled());
            native.label.apply_style(base.style());
        }
        self.sync_input_views();
        self.reload_picker(base);
        self.sync_label(base);
        self.schedule_initial_selection();
    }

    fn dispose_native_view(&mut self) {
        if let Some(mut native) = self.native.take() {
            native.label.has_input_view = false;
            native.label.has_input_accessory_view = false;
        }
        self.owner = WeakDropDown::new();
    }

    fn is_attached(&self) -> bool {
        self.native.is_some()
    }

    fn items_changed(&mut self, base: &DropDownBase) {
        self.reload_picker(base);
        self.sync_label(base);
    }

    fn selected_index_changed(&mut self, base: &DropDownBase) {
        self.sync_label(base);
        self.push_selection(base);
    }

    fn hint_changed(&mut self, base: &DropDownBase) {
        self.sync_label(base);
    }

    fn enabled_changed(&mut self, base: &DropDownBase) {
        if let Some(native) = self.native.as_mut() {
            native.label.set_enabled(base.is_enabled());
        }
    }

    fn apply_style(&mut self, base: &DropDownBase, property: StyleProperty) {
        if let Some(native) = self.native.as_mut() {
            native.label.apply_style(base.style());
        }
        match property {
            StyleProperty::TextTransform => self.sync_label(base),
            StyleProperty::Padding | StyleProperty::TextAlignment => {}
            // Rows are rebuilt on demand; reload so visible rows pick up the change
            _ => self.reload_picker(base),
        }
    }

    fn refresh(&mut self, base: &DropDownBase) {
        self.reload_picker(base);
        self.sync_label(base);
    }

    fn open(&mut self, base: &mut DropDownBase) {
        self.become_first_responder(base);
    }

    fn close(&mut self, base: &mut DropDownBase) {
        self.resign_first_responder(base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropdown_core::{Color, IndexCandidate, Items};

    fn attached(base: &mut DropDownBase, queue: &MainQueue) -> PickerPeer {
        let mut peer = PickerPeer::new(queue.clone());
        peer.create_native_view(WeakDropDown::new());
        peer.init_native_view(base);
        peer
    }

    #[test]
    fn test_shrink_clamps() {
        let queue = MainQueue::new();
        let mut base = DropDownBase::new();
        let mut peer = attached(&mut base, &queue);
        base.write_items(&mut peer, Some(Items::from((0..20).collect::<Vec<i64>>())));
        base.write_selected_index(&mut peer, &IndexCandidate::Index(15));
        base.write_items(&mut peer, Some(Items::from((0..5).collect::<Vec<i64>>())));

        assert_eq!(base.selected_index(), Some(4));
        let native = peer.native().unwrap();
        assert_eq!(native.label.text(), "4");
        assert_eq!(native.picker.selected_row(), Some(4));
    }

    #[test]
    fn test_label_tracks_hint() {
        let queue = MainQueue::new();
        let mut base = DropDownBase::new();
        base.write_hint(&mut PickerPeer::new(queue.clone()), "Choose".into());
        let mut peer = attached(&mut base, &queue);
        assert_eq!(peer.native().map(|n| n.label.text()), Some("Choose"));
        assert_eq!(
            peer.native().map(|n| n.label.text_color),
            Some(Color::PLACEHOLDER_GRAY)
        );

        base.write_items(&mut peer, Some(vec!["a", "b"].into()));
        base.write_selected_index(&mut peer, &IndexCandidate::Index(1));
        let label = &peer.native().unwrap().label;
        assert_eq!(label.text(), "b");
        assert!(!label.is_showing_hint());
        assert_eq!(label.text_color, Color::BLACK);
    }

    #[test]
    fn test_accessory_view_toggle() {
        let queue = MainQueue::new();
        let mut base = DropDownBase::new();
        let mut peer = attached(&mut base, &queue);
        assert!(peer.native().unwrap().label.has_input_accessory_view);

        peer.set_accessory_view_visible(false);
        assert!(!peer.native().unwrap().label.has_input_accessory_view);
        assert!(peer.native().unwrap().label.has_input_view);
    }
}
