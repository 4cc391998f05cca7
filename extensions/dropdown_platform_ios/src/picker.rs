//! Picker wheel
//!
//! The picker is the label's input view. Its row 0 is logical index 0; the
//! unset state never reaches it. Rows are not cached: the wheel always asks
//! without a reusable view, so every request builds a fresh row from the
//! current style snapshot.

use dropdown_core::{
    Color, DropDownBase, Font, IndexCandidate, Padding, TextAlignment, TextDecoration,
    WeakDropDown,
};

use crate::peer::PickerPeer;

/// Native picker wheel state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PickerView {
    row_count: usize,
    selected_row: Option<usize>,
    reload_generation: u64,
}

impl PickerView {
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Row under the selection indicator; always some row once rows exist
    pub fn selected_row(&self) -> Option<usize> {
        self.selected_row
    }

    /// Number of `reloadAllComponents` calls
    pub fn reload_generation(&self) -> u64 {
        self.reload_generation
    }

    pub(crate) fn reload_all_components(&mut self, row_count: usize) {
        self.row_count = row_count;
        self.reload_generation += 1;
        self.selected_row = match self.selected_row {
            _ if row_count == 0 => None,
            Some(row) => Some(row.min(row_count - 1)),
            None => Some(0),
        };
    }

    pub(crate) fn select_row(&mut self, row: usize) {
        if row < self.row_count {
            self.selected_row = Some(row);
        }
    }
}

/// A freshly built picker row
#[derive(Clone, Debug, PartialEq)]
pub struct PickerRowView {
    pub row: usize,
    pub text: String,
    pub color: Color,
    pub background_color: Option<Color>,
    pub font: Font,
    pub alignment: TextAlignment,
    pub decoration: TextDecoration,
    pub padding: Padding,
}

impl PickerRowView {
    pub(crate) fn build(base: &DropDownBase, row: usize) -> Self {
        let style = base.style();
        Self {
            row,
            text: base.render_item_text(Some(row)).unwrap_or_default(),
            color: style.color.unwrap_or(Color::BLACK),
            background_color: style.background_color,
            font: style.font.clone(),
            alignment: style.effective_items_alignment(),
            decoration: style.text_decoration,
            padding: style.items_padding.unwrap_or_default(),
        }
    }
}

/// Data source and delegate of the picker wheel
#[derive(Clone, Debug, Default)]
pub struct PickerDelegate {
    owner: WeakDropDown<PickerPeer>,
}

impl PickerDelegate {
    pub(crate) fn new(owner: WeakDropDown<PickerPeer>) -> Self {
        Self { owner }
    }

    pub fn number_of_rows(&self) -> usize {
        match self.owner.upgrade() {
            Some(dropdown) => dropdown.with_base(|base| base.item_count().unwrap_or(0)),
            None => 0,
        }
    }

    /// Build the view for `row`
    pub fn view_for_row(&self, row: usize) -> Option<PickerRowView> {
        let dropdown = self.owner.upgrade()?;
        dropdown.with_base(|base| {
            if row >= base.item_count().unwrap_or(0) {
                return None;
            }
            tracing::trace!("building picker row {}", row);
            Some(PickerRowView::build(base, row))
        })
    }

    /// The user settled the wheel on `row`
    pub fn did_select_row(&self, row: usize) {
        let Some(dropdown) = self.owner.upgrade() else {
            tracing::warn!("picker row {} selected after teardown", row);
            return;
        };
        dropdown.update(|base, peer| {
            peer.picker_selected(row);
            base.write_selected_index(peer, &IndexCandidate::from(row));
            peer.resign_first_responder(base);
        });
    }
}
