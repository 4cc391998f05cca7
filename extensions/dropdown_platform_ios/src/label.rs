//! Closed-state label
//!
//! The label shows the selected item's text, or the hint in the system
//! placeholder color when nothing is selected. Becoming first responder
//! brings up its input view (the picker wheel) and input accessory view
//! (the Done toolbar).

use dropdown_core::{
    Color, DropDownBase, Font, Padding, Style, TextAlignment, TextDecoration, WeakDropDown,
};

use crate::peer::PickerPeer;

/// Native label state
#[derive(Clone, Debug, PartialEq)]
pub struct DropDownLabel {
    text: String,
    showing_hint: bool,
    pub text_color: Color,
    pub background_color: Option<Color>,
    pub font: Font,
    pub alignment: TextAlignment,
    pub decoration: TextDecoration,
    pub padding: Padding,
    enabled: bool,
    first_responder: bool,
    /// Picker wheel installed as the input view
    pub has_input_view: bool,
    /// Done toolbar installed as the input accessory view
    pub has_input_accessory_view: bool,
}

impl Default for DropDownLabel {
    fn default() -> Self {
        Self {
            text: String::new(),
            showing_hint: true,
            text_color: Color::PLACEHOLDER_GRAY,
            background_color: None,
            font: Font::default(),
            alignment: TextAlignment::default(),
            decoration: TextDecoration::default(),
            padding: Padding::default(),
            enabled: true,
            first_responder: false,
            has_input_view: false,
            has_input_accessory_view: false,
        }
    }
}

impl DropDownLabel {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the label currently shows the hint instead of content
    pub fn is_showing_hint(&self) -> bool {
        self.showing_hint
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_first_responder(&self) -> bool {
        self.first_responder
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Show the selected item's text, falling back to the hint
    ///
    /// An unset index always shows the hint, even when items are unset.
    pub(crate) fn sync_text(&mut self, base: &DropDownBase) {
        let text = base
            .selected_index()
            .and_then(|index| base.render_item_text(Some(index)));
        match text {
            Some(text) => {
                self.text = text;
                self.showing_hint = false;
            }
            None => {
                self.text = base.render_hint();
                self.showing_hint = true;
            }
        }
        self.text_color = self.resolve_color(base.style());
    }

    /// Copy presentation attributes from the style snapshot
    pub(crate) fn apply_style(&mut self, style: &Style) {
        self.text_color = self.resolve_color(style);
        self.background_color = style.background_color;
        self.font = style.font.clone();
        self.alignment = style.text_alignment;
        self.decoration = style.text_decoration;
        self.padding = style.padding;
    }

    fn resolve_color(&self, style: &Style) -> Color {
        if self.showing_hint {
            Color::PLACEHOLDER_GRAY
        } else {
            style.color.unwrap_or(Color::BLACK)
        }
    }

    /// Returns true on a closed → opened transition
    pub(crate) fn become_first_responder(&mut self) -> bool {
        if !self.enabled || self.first_responder {
            return false;
        }
        self.first_responder = true;
        true
    }

    /// Returns true on an opened → closed transition
    pub(crate) fn resign_first_responder(&mut self) -> bool {
        std::mem::replace(&mut self.first_responder, false)
    }
}

/// Tap gesture recognizer target on the label
#[derive(Clone, Debug, Default)]
pub struct LabelTapHandler {
    owner: WeakDropDown<PickerPeer>,
}

impl LabelTapHandler {
    pub(crate) fn new(owner: WeakDropDown<PickerPeer>) -> Self {
        Self { owner }
    }

    /// Request first responder; ignored while the widget is disabled
    pub fn tap(&self) {
        let Some(dropdown) = self.owner.upgrade() else {
            tracing::warn!("label tapped after teardown");
            return;
        };
        dropdown.update(|base, peer| {
            if base.is_enabled() {
                peer.become_first_responder(base);
            } else {
                tracing::debug!("label tap ignored: drop down is disabled");
            }
        });
    }
}
