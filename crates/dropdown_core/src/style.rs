//! Presentation attributes
//!
//! Style values never affect selection state. Whenever one changes, the
//! widget hands the matching [`StyleProperty`] to its native peer, which
//! re-stamps the value onto the label and every realized row view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DropDownError;

/// 8-bit ARGB color, the representation both native toolkits accept
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);
    /// Grey used for hint text on the spinner
    pub const HINT_GRAY: Color = Color::argb(255, 148, 150, 148);
    /// System placeholder grey used for hint text on the picker label
    pub const PLACEHOLDER_GRAY: Color = Color::rgb(199, 199, 205);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Build from a packed `0xAARRGGBB` value
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packed `0xAARRGGBB` value, as Android's `Color` int
    pub const fn to_argb_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parse `#RGB`, `#RRGGBB` or `#AARRGGBB`
    pub fn parse(literal: &str) -> Result<Self, DropDownError> {
        let invalid = || DropDownError::InvalidColor(literal.to_string());
        let hex = literal.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
        match hex.len() {
            3 => {
                let r = ((value >> 8) & 0xF) as u8 * 17;
                let g = ((value >> 4) & 0xF) as u8 * 17;
                let b = (value & 0xF) as u8 * 17;
                Ok(Color::rgb(r, g, b))
            }
            6 => Ok(Color::from_argb_u32(0xFF00_0000 | value)),
            8 => Ok(Color::from_argb_u32(value)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = DropDownError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Medium,
    Bold,
}

/// Font description
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Family name, `None` for the system font
    #[serde(default)]
    pub family: Option<String>,
    /// Size in device-independent units
    #[serde(default = "default_font_size")]
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub italic: bool,
}

fn default_font_size() -> f32 {
    17.0
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: None,
            size: default_font_size(),
            weight: FontWeight::Normal,
            italic: false,
        }
    }
}

/// Horizontal text alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlignment {
    #[default]
    Initial,
    Left,
    Center,
    Right,
}

/// Text decoration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
    UnderlineLineThrough,
}

/// Case transform applied to rendered text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

impl TextTransform {
    /// Apply the transform to `text`
    pub fn apply(&self, text: &str) -> String {
        match self {
            TextTransform::None => text.to_string(),
            TextTransform::Uppercase => text.to_uppercase(),
            TextTransform::Lowercase => text.to_lowercase(),
            TextTransform::Capitalize => capitalize_words(text),
        }
    }
}

fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// Edge insets in device-independent units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub right: f32,
    #[serde(default)]
    pub bottom: f32,
    #[serde(default)]
    pub left: f32,
}

impl Padding {
    /// Same inset on every edge
    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Scale every edge, e.g. from dips to device pixels
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            top: self.top * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
            left: self.left * factor,
        }
    }
}

/// Identifies which style attribute changed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Color,
    BackgroundColor,
    Font,
    TextAlignment,
    TextDecoration,
    TextTransform,
    Padding,
    ItemsTextAlignment,
    ItemsPadding,
}

/// Snapshot of every presentation attribute of a drop down
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Text color, `None` for the platform default
    pub color: Option<Color>,
    /// Background color, `None` for transparent
    pub background_color: Option<Color>,
    pub font: Font,
    pub text_alignment: TextAlignment,
    pub text_decoration: TextDecoration,
    pub text_transform: TextTransform,
    /// Padding of the closed control
    pub padding: Padding,
    /// Alignment of rows in the opened surface; falls back to `text_alignment`
    pub items_text_alignment: Option<TextAlignment>,
    /// Padding of rows in the opened surface; falls back to the platform default
    pub items_padding: Option<Padding>,
}

impl Style {
    /// Alignment used for rows in the opened surface
    pub fn effective_items_alignment(&self) -> TextAlignment {
        self.items_text_alignment.unwrap_or(self.text_alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("#FF0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse("#80FF0000").unwrap(), Color::argb(128, 255, 0, 0));
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert!(Color::parse("red").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#+12345").is_err());
    }

    #[test]
    fn test_color_display_round_trip() {
        let color = Color::argb(0x80, 0x10, 0x20, 0x30);
        assert_eq!(Color::parse(&color.to_string()).unwrap(), color);
        assert_eq!(Color::HINT_GRAY.to_argb_u32(), 0xFF94_9694);
    }

    #[test]
    fn test_text_transform() {
        assert_eq!(TextTransform::Uppercase.apply("Item 1"), "ITEM 1");
        assert_eq!(TextTransform::Lowercase.apply("Item 1"), "item 1");
        assert_eq!(TextTransform::Capitalize.apply("hello  wide world"), "Hello  Wide World");
        assert_eq!(TextTransform::None.apply("MiXeD"), "MiXeD");
    }

    #[test]
    fn test_items_alignment_fallback() {
        let mut style = Style {
            text_alignment: TextAlignment::Right,
            ..Default::default()
        };
        assert_eq!(style.effective_items_alignment(), TextAlignment::Right);
        style.items_text_alignment = Some(TextAlignment::Center);
        assert_eq!(style.effective_items_alignment(), TextAlignment::Center);
    }
}
