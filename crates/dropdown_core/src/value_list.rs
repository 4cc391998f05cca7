//! Value/display pair lists
//!
//! A [`ValueList`] stores what the host application cares about (`value`)
//! next to what the user sees (`display`). It can be assigned directly as a
//! drop down's `items`; the widget renders the display text and the host maps
//! the selected index back to a value with [`ValueList::get_value`].
//!
//! ```ignore
//! let countries = ValueList::from_pairs([("FR", "France"), ("DE", "Germany")]);
//! dropdown.set_items(countries.clone());
//!
//! let code = dropdown.selected_index().and_then(|i| countries.get_value(i));
//! ```

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::items::{ItemsSource, ValueListAccess};
use crate::value::ItemValue;

/// A single value/display pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueItem<T> {
    /// The value handed back to host code
    pub value: T,
    /// The text rendered in the widget
    pub display: String,
}

impl<T> ValueItem<T> {
    /// Create a new pair
    pub fn new(value: T, display: impl Into<String>) -> Self {
        Self {
            value,
            display: display.into(),
        }
    }
}

/// Ordered list of value/display pairs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueList<T> {
    items: Vec<ValueItem<T>>,
}

impl<T> Default for ValueList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ValueList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from `(value, display)` tuples
    pub fn from_pairs<D, I>(pairs: I) -> Self
    where
        D: Into<String>,
        I: IntoIterator<Item = (T, D)>,
    {
        Self {
            items: pairs
                .into_iter()
                .map(|(value, display)| ValueItem::new(value, display))
                .collect(),
        }
    }

    /// Append a pair
    pub fn push(&mut self, value: T, display: impl Into<String>) {
        self.items.push(ValueItem::new(value, display));
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pair at `index`
    pub fn get(&self, index: usize) -> Option<&ValueItem<T>> {
        self.items.get(index)
    }

    /// Display text at `index`, or an empty string outside `[0, len)`
    pub fn get_display(&self, index: usize) -> String {
        self.items
            .get(index)
            .map(|item| item.display.clone())
            .unwrap_or_default()
    }

    /// Value at `index`
    pub fn get_value(&self, index: usize) -> Option<&T> {
        self.items.get(index).map(|item| &item.value)
    }

    /// Iterate over the pairs
    pub fn iter(&self) -> std::slice::Iter<'_, ValueItem<T>> {
        self.items.iter()
    }
}

impl<T: PartialEq> ValueList<T> {
    /// Index of the first pair holding `value`
    pub fn get_index(&self, value: &T) -> Option<usize> {
        self.items.iter().position(|item| &item.value == value)
    }
}

impl<T> FromIterator<ValueItem<T>> for ValueList<T> {
    fn from_iter<I: IntoIterator<Item = ValueItem<T>>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a ValueList<T> {
    type Item = &'a ValueItem<T>;
    type IntoIter = std::slice::Iter<'a, ValueItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: 'static> ValueListAccess for ValueList<T> {
    fn display_len(&self) -> usize {
        self.len()
    }

    fn display_at(&self, index: usize) -> String {
        self.get_display(index)
    }
}

impl<T: 'static> ItemsSource for ValueList<T> {
    fn length(&self) -> usize {
        self.len()
    }

    fn get_item(&self, index: usize) -> ItemValue {
        self.items
            .get(index)
            .map(|item| ItemValue::Text(item.display.clone()))
            .unwrap_or(ItemValue::Null)
    }

    fn as_value_list(&self) -> Option<&dyn ValueListAccess> {
        Some(self)
    }
}

impl<T: 'static> From<ValueList<T>> for crate::items::Items {
    fn from(list: ValueList<T>) -> Self {
        crate::items::Items::Source(Rc::new(list))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> ValueList<u32> {
        ValueList::from_pairs([(10, "Apple"), (20, "Banana"), (30, "Cherry")])
    }

    #[test]
    fn test_lookups() {
        let list = fruits();
        assert_eq!(list.len(), 3);
        assert_eq!(list.get_display(1), "Banana");
        assert_eq!(list.get_value(2), Some(&30));
        assert_eq!(list.get_index(&20), Some(1));
        assert_eq!(list.get_index(&99), None);
    }

    #[test]
    fn test_out_of_range_display_is_empty() {
        let list = fruits();
        assert_eq!(list.get_display(3), "");
        assert_eq!(list.get_value(3), None);
    }

    #[test]
    fn test_value_list_probe() {
        let list = fruits();
        assert!(list.as_value_list().is_some());
        assert_eq!(list.get_item(0), ItemValue::from("Apple"));
    }

    #[test]
    fn test_deserialize_pairs() {
        #[derive(Deserialize)]
        struct Doc {
            list: ValueList<String>,
        }
        let doc: Doc = toml::from_str(
            r#"list = [{ value = "fr", display = "France" }, { value = "de", display = "Germany" }]"#,
        )
        .unwrap();
        assert_eq!(doc.list.get_index(&"de".to_string()), Some(1));
    }
}
