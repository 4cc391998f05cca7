//! Item values
//!
//! Items handed to a drop down come from host code that may store anything in
//! a row: text, numbers, flags, or nothing at all. [`ItemValue`] is the
//! transport type for a single row before it is stringified for display.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single raw item as stored in a plain sequence or returned by an items source
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    /// Missing item (a gap in a sparse source)
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// UTF-8 text
    Text(String),
}

impl ItemValue {
    /// Whether this is the null item
    pub fn is_null(&self) -> bool {
        matches!(self, ItemValue::Null)
    }

    /// Extract as string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ItemValue::Text(v) => Some(v),
            _ => None,
        }
    }

    /// Extract as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ItemValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ItemValue::Float(v) => Some(*v),
            ItemValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Extract as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ItemValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get type name for log messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ItemValue::Null => "Null",
            ItemValue::Bool(_) => "Bool",
            ItemValue::Int(_) => "Int",
            ItemValue::Float(_) => "Float",
            ItemValue::Text(_) => "Text",
        }
    }
}

impl fmt::Display for ItemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemValue::Null => f.write_str("null"),
            ItemValue::Bool(v) => write!(f, "{}", v),
            ItemValue::Int(v) => write!(f, "{}", v),
            ItemValue::Float(v) => write!(f, "{}", v),
            ItemValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ItemValue {
    fn from(value: &str) -> Self {
        ItemValue::Text(value.to_string())
    }
}

impl From<String> for ItemValue {
    fn from(value: String) -> Self {
        ItemValue::Text(value)
    }
}

impl From<i64> for ItemValue {
    fn from(value: i64) -> Self {
        ItemValue::Int(value)
    }
}

impl From<i32> for ItemValue {
    fn from(value: i32) -> Self {
        ItemValue::Int(value as i64)
    }
}

impl From<f64> for ItemValue {
    fn from(value: f64) -> Self {
        ItemValue::Float(value)
    }
}

impl From<bool> for ItemValue {
    fn from(value: bool) -> Self {
        ItemValue::Bool(value)
    }
}

impl<T: Into<ItemValue>> From<Option<T>> for ItemValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ItemValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_value_accessors() {
        assert_eq!(ItemValue::from("a").as_str(), Some("a"));
        assert_eq!(ItemValue::from(7i32).as_i64(), Some(7));
        assert_eq!(ItemValue::from(7i64).as_f64(), Some(7.0));
        assert_eq!(ItemValue::from(true).as_bool(), Some(true));
        assert!(ItemValue::from(None::<String>).is_null());
    }

    #[test]
    fn test_item_value_display() {
        assert_eq!(ItemValue::Text("Item 3".into()).to_string(), "Item 3");
        assert_eq!(ItemValue::Int(-4).to_string(), "-4");
        assert_eq!(ItemValue::Float(1.5).to_string(), "1.5");
        assert_eq!(ItemValue::Bool(false).to_string(), "false");
    }
}
