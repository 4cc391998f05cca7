//! Items adapter
//!
//! A drop down accepts three shapes of `items`:
//!
//! - a plain sequence ([`Items::List`], or [`Items::Observable`] when in-place
//!   mutations should re-render the widget)
//! - an items source, any type implementing [`ItemsSource`]
//! - a value list, an items source that also exposes display text through
//!   [`ItemsSource::as_value_list`]
//!
//! Every renderer reads rows through [`get_item_text`] so all three shapes
//! produce the same text on every platform.

use std::fmt;
use std::rc::Rc;

use crate::observable::ObservableArray;
use crate::value::ItemValue;

/// Display-text accessor of a value list
pub trait ValueListAccess {
    /// Number of pairs
    fn display_len(&self) -> usize;

    /// Display text at `index`, empty outside `[0, len)`
    fn display_at(&self, index: usize) -> String;
}

/// A capability object exposing indexed items without being a plain sequence
pub trait ItemsSource {
    /// Number of items
    fn length(&self) -> usize;

    /// Item at `index`. Sources return [`ItemValue::Null`] for gaps.
    fn get_item(&self, index: usize) -> ItemValue;

    /// Display/value accessor, for sources that are value lists
    fn as_value_list(&self) -> Option<&dyn ValueListAccess> {
        None
    }
}

/// The `items` property value
#[derive(Clone)]
pub enum Items {
    /// Plain sequence
    List(Vec<ItemValue>),
    /// Plain sequence raising a change signal on in-place mutation
    Observable(ObservableArray),
    /// Items source or value list
    Source(Rc<dyn ItemsSource>),
}

/// Capability flags derived from an `items` value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemsProbe {
    /// `items` is an items source (and not a value list)
    pub is_items_source_in: bool,
    /// `items` exposes a display/value accessor
    pub is_value_list_in: bool,
}

impl Items {
    /// Wrap an items source
    pub fn source<S: ItemsSource + 'static>(source: S) -> Self {
        Items::Source(Rc::new(source))
    }

    /// Number of items
    pub fn len(&self) -> usize {
        match self {
            Items::List(items) => items.len(),
            Items::Observable(array) => array.len(),
            Items::Source(source) => source.length(),
        }
    }

    /// Whether there are no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw item at `index`. Out-of-range reads yield [`ItemValue::Null`].
    pub fn item_at(&self, index: usize) -> ItemValue {
        match self {
            Items::List(items) => items.get(index).cloned().unwrap_or_default(),
            Items::Observable(array) => array.get(index).unwrap_or_default(),
            Items::Source(source) => {
                if index < source.length() {
                    source.get_item(index)
                } else {
                    ItemValue::Null
                }
            }
        }
    }

    /// Compute the capability flags
    ///
    /// The value-list accessor wins over the items-source accessor when a
    /// source offers both.
    pub fn probe(&self) -> ItemsProbe {
        match self {
            Items::Source(source) => {
                let is_value_list_in = source.as_value_list().is_some();
                ItemsProbe {
                    is_items_source_in: !is_value_list_in,
                    is_value_list_in,
                }
            }
            Items::List(_) | Items::Observable(_) => ItemsProbe::default(),
        }
    }

    /// The change-emitting sequence behind these items, if any
    pub fn observable(&self) -> Option<&ObservableArray> {
        match self {
            Items::Observable(array) => Some(array),
            _ => None,
        }
    }

    /// Whether both values are the same object (not merely equal contents)
    pub fn same_identity(&self, other: &Items) -> bool {
        match (self, other) {
            (Items::Observable(a), Items::Observable(b)) => a.ptr_eq(b),
            (Items::Source(a), Items::Source(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Items {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Items::List(items) => f.debug_tuple("List").field(items).finish(),
            Items::Observable(array) => f.debug_tuple("Observable").field(array).finish(),
            Items::Source(source) => f
                .debug_struct("Source")
                .field("length", &source.length())
                .field("value_list", &source.as_value_list().is_some())
                .finish(),
        }
    }
}

impl<T: Into<ItemValue>> From<Vec<T>> for Items {
    fn from(items: Vec<T>) -> Self {
        Items::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<ObservableArray> for Items {
    fn from(array: ObservableArray) -> Self {
        Items::Observable(array)
    }
}

impl From<Rc<dyn ItemsSource>> for Items {
    fn from(source: Rc<dyn ItemsSource>) -> Self {
        Items::Source(source)
    }
}

/// Render the text of one row
///
/// - no items: a single space, so native rows never collapse
/// - no index: `None`, the caller must not render a row
/// - value list: the display text, empty outside `[0, length)`
/// - otherwise: the stringified item, or the stringified index when the item
///   is null
pub fn get_item_text(items: Option<&Items>, index: Option<usize>) -> Option<String> {
    let Some(items) = items else {
        return Some(" ".to_string());
    };
    let index = index?;

    if let Items::Source(source) = items {
        if let Some(list) = source.as_value_list() {
            return Some(list.display_at(index));
        }
    }

    let item = items.item_at(index);
    if item.is_null() {
        Some(index.to_string())
    } else {
        Some(item.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_list::ValueList;

    struct Sparse(Vec<Option<&'static str>>);

    impl ItemsSource for Sparse {
        fn length(&self) -> usize {
            self.0.len()
        }

        fn get_item(&self, index: usize) -> ItemValue {
            self.0[index].into()
        }
    }

    #[test]
    fn test_no_items_renders_space() {
        assert_eq!(get_item_text(None, Some(3)), Some(" ".to_string()));
        assert_eq!(get_item_text(None, None), Some(" ".to_string()));
    }

    #[test]
    fn test_identity_is_by_object() {
        let array = ObservableArray::from_vec(vec!["a".into()]);
        let shared = Items::from(array.clone());
        assert!(shared.same_identity(&Items::from(array)));
        assert!(!shared.same_identity(&Items::from(ObservableArray::from_vec(vec!["a".into()]))));

        let source = Items::source(Sparse(vec![Some("x")]));
        assert!(source.same_identity(&source.clone()));
        assert!(!source.same_identity(&Items::source(Sparse(vec![Some("x")]))));

        let list = Items::from(vec!["a"]);
        assert!(!list.same_identity(&list.clone()));
    }

    #[test]
    fn test_no_index_renders_nothing() {
        let items = Items::from(vec!["a"]);
        assert_eq!(get_item_text(Some(&items), None), None);
    }

    #[test]
    fn test_plain_sequence() {
        let items = Items::from(vec![
            ItemValue::from("Item 0"),
            ItemValue::Null,
            ItemValue::from(42),
        ]);
        assert_eq!(get_item_text(Some(&items), Some(0)).as_deref(), Some("Item 0"));
        assert_eq!(get_item_text(Some(&items), Some(1)).as_deref(), Some("1"));
        assert_eq!(get_item_text(Some(&items), Some(2)).as_deref(), Some("42"));
    }

    #[test]
    fn test_items_source_gap_renders_index() {
        let items = Items::source(Sparse(vec![Some("x"), None]));
        assert_eq!(items.probe().is_items_source_in, true);
        assert_eq!(get_item_text(Some(&items), Some(0)).as_deref(), Some("x"));
        assert_eq!(get_item_text(Some(&items), Some(1)).as_deref(), Some("1"));
    }

    #[test]
    fn test_value_list_precedence() {
        let items = Items::from(ValueList::from_pairs([(1, "One"), (2, "Two")]));
        let probe = items.probe();
        assert!(probe.is_value_list_in);
        assert!(!probe.is_items_source_in);
        assert_eq!(get_item_text(Some(&items), Some(1)).as_deref(), Some("Two"));
        assert_eq!(get_item_text(Some(&items), Some(5)).as_deref(), Some(""));
    }

    #[test]
    fn test_defined_index_never_none() {
        let items = Items::from(vec![ItemValue::Null; 4]);
        for i in 0..8 {
            assert!(get_item_text(Some(&items), Some(i)).is_some());
        }
    }

    #[test]
    fn test_plain_probe_is_empty() {
        assert_eq!(Items::from(vec!["a"]).probe(), ItemsProbe::default());
        let observable = Items::from(ObservableArray::new());
        assert_eq!(observable.probe(), ItemsProbe::default());
        assert!(observable.observable().is_some());
    }
}
