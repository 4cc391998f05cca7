//! Declarative configuration
//!
//! A drop down can be described in TOML, the way templates declare it:
//!
//! ```toml
//! hint = "Choose a fruit"
//! items = ["Apple", "Banana", "Cherry"]
//! selected_index = 1
//!
//! [style]
//! color = "#333333"
//! text_transform = "uppercase"
//! items_padding = { top = 8, right = 12, bottom = 8, left = 12 }
//! ```
//!
//! [`DropDown::apply_config`] replays every field through the normal
//! setters, so coercion and native pushes happen exactly as for host code.

use serde::{Deserialize, Serialize};

use crate::error::{DropDownError, Result};
use crate::items::Items;
use crate::peer::NativePeer;
use crate::style::{Color, Font, Padding, TextAlignment, TextDecoration, TextTransform};
use crate::value::ItemValue;
use crate::value_list::ValueList;
use crate::widget::DropDown;

/// Declarative drop down description
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DropDownConfig {
    /// Plain items
    #[serde(default)]
    pub items: Option<Vec<ItemValue>>,
    /// Value/display pairs, exclusive with `items`
    #[serde(default)]
    pub value_list: Option<ValueList<String>>,
    #[serde(default)]
    pub selected_index: Option<i64>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub style: StyleConfig,
    /// Show the Done toolbar above the picker (iOS only)
    #[serde(default)]
    pub accessory_view_visible: Option<bool>,
}

/// Style table of a [`DropDownConfig`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub background_color: Option<Color>,
    #[serde(default)]
    pub font: Option<Font>,
    #[serde(default)]
    pub text_alignment: Option<TextAlignment>,
    #[serde(default)]
    pub text_decoration: Option<TextDecoration>,
    #[serde(default)]
    pub text_transform: Option<TextTransform>,
    #[serde(default)]
    pub padding: Option<Padding>,
    #[serde(default)]
    pub items_text_alignment: Option<TextAlignment>,
    #[serde(default)]
    pub items_padding: Option<Padding>,
}

impl DropDownConfig {
    /// Parse and validate a TOML description
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: DropDownConfig = toml::from_str(source)?;
        if config.items.is_some() && config.value_list.is_some() {
            return Err(DropDownError::ConflictingItems);
        }
        Ok(config)
    }

    /// The `items` value described by this config, if any
    pub fn items(&self) -> Option<Items> {
        if let Some(list) = &self.value_list {
            return Some(Items::from(list.clone()));
        }
        self.items.clone().map(Items::List)
    }
}

impl<P: NativePeer> DropDown<P> {
    /// Apply every field of `config`
    ///
    /// Items are applied before `selected_index` so the index is coerced
    /// against the configured items.
    pub fn apply_config(&self, config: &DropDownConfig) {
        if let Some(hint) = &config.hint {
            self.set_hint(hint.clone());
        }
        if let Some(enabled) = config.enabled {
            self.set_enabled(enabled);
        }
        if let Some(items) = config.items() {
            self.set_items(items);
        }
        if let Some(index) = config.selected_index {
            self.set_selected_index(index);
        }

        let style = &config.style;
        if style.color.is_some() {
            self.set_color(style.color);
        }
        if style.background_color.is_some() {
            self.set_background_color(style.background_color);
        }
        if let Some(font) = &style.font {
            self.set_font(font.clone());
        }
        if let Some(alignment) = style.text_alignment {
            self.set_text_alignment(alignment);
        }
        if let Some(decoration) = style.text_decoration {
            self.set_text_decoration(decoration);
        }
        if let Some(transform) = style.text_transform {
            self.set_text_transform(transform);
        }
        if let Some(padding) = style.padding {
            self.set_padding(padding);
        }
        if style.items_text_alignment.is_some() {
            self.set_items_text_alignment(style.items_text_alignment);
        }
        if style.items_padding.is_some() {
            self.set_items_padding(style.items_padding);
        }
        tracing::debug!("applied drop down config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::tests::RecordingPeer;

    const FRUITS: &str = r##"
hint = "Choose a fruit"
items = ["Apple", "Banana", "Cherry"]
selected_index = 7

[style]
color = "#333333"
text_transform = "uppercase"
items_text_alignment = "center"
items_padding = { top = 8.0, right = 12.0, bottom = 8.0, left = 12.0 }
"##;

    #[test]
    fn test_parse_and_apply() {
        let config = DropDownConfig::from_toml_str(FRUITS).unwrap();
        let dropdown = DropDown::new(RecordingPeer::default());
        dropdown.apply_config(&config);

        assert_eq!(dropdown.hint(), "Choose a fruit");
        assert_eq!(dropdown.selected_index(), Some(2));
        assert_eq!(dropdown.get_item_as_string(Some(0)).as_deref(), Some("Apple"));

        let style = dropdown.style();
        assert_eq!(style.color, Some(Color::rgb(0x33, 0x33, 0x33)));
        assert_eq!(style.text_transform, TextTransform::Uppercase);
        assert_eq!(style.effective_items_alignment(), TextAlignment::Center);
        assert_eq!(style.items_padding.map(|p| p.left), Some(12.0));
    }

    #[test]
    fn test_value_list_config() {
        let config = DropDownConfig::from_toml_str(
            r#"value_list = [{ value = "fr", display = "France" }, { value = "de", display = "Germany" }]"#,
        )
        .unwrap();
        let dropdown = DropDown::new(RecordingPeer::default());
        dropdown.apply_config(&config);
        assert!(dropdown.is_value_list_in());
        assert_eq!(dropdown.get_item_as_string(Some(1)).as_deref(), Some("Germany"));
    }

    #[test]
    fn test_conflicting_items_rejected() {
        let err = DropDownConfig::from_toml_str(
            r#"
items = ["a"]
value_list = [{ value = "b", display = "B" }]
"#,
        )
        .unwrap_err();
        assert!(matches!(err, DropDownError::ConflictingItems));
    }

    #[test]
    fn test_invalid_color_rejected() {
        let err = DropDownConfig::from_toml_str("[style]\ncolor = \"blue\"").unwrap_err();
        assert!(matches!(err, DropDownError::Config(_)));
    }
}
