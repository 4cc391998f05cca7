//! Realized row views
//!
//! A realized view is the label-in-container pair built for one spinner row.
//! The native list hands back the container's handle as `convertView` when
//! it wants the row reused.

use dropdown_core::{Color, Font, Padding, TextAlignment, TextDecoration};

slotmap::new_key_type! {
    /// Handle of a native container view owned by the spinner
    pub struct NativeViewId;
}

/// Which adapter callback a row was realized for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RealizedViewType {
    /// Row shown in the closed spinner (`getView`)
    ItemView,
    /// Row shown in the open popup (`getDropDownView`)
    DropDownView,
}

/// Label inside a realized container
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RowLabel {
    pub text: String,
    pub color: Option<Color>,
    pub font: Font,
    pub alignment: TextAlignment,
    pub decoration: TextDecoration,
}

/// Container view plus its label
#[derive(Clone, Debug, PartialEq)]
pub struct RealizedView {
    pub id: NativeViewId,
    pub kind: RealizedViewType,
    /// Native row this view last rendered
    pub native_index: usize,
    pub label: RowLabel,
    pub background_color: Option<Color>,
    /// Container padding in device pixels
    pub padding: Padding,
    /// Fixed height in device pixels; `Some(1.0)` collapses an empty hint row
    pub height: Option<f32>,
    /// Rows that cannot be picked render greyed and ignore taps
    pub enabled: bool,
    /// Whether the container currently sits in the native view tree
    pub attached: bool,
}

impl RealizedView {
    pub(crate) fn new(id: NativeViewId, kind: RealizedViewType) -> Self {
        Self {
            id,
            kind,
            native_index: 0,
            label: RowLabel::default(),
            background_color: None,
            padding: Padding::default(),
            height: None,
            enabled: true,
            attached: true,
        }
    }

    /// Whether this view renders the synthetic hint row
    pub fn is_hint_row(&self) -> bool {
        self.native_index == 0
    }
}
