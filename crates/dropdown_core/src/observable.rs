//! Observable item sequences
//!
//! An [`ObservableArray`] is a plain sequence that raises a change signal on
//! every in-place mutation. A drop down whose `items` is an observable array
//! subscribes to that signal so pushes, removals and splices re-render the
//! widget without reassigning `items`.
//!
//! Handles are cheap to clone and share one backing store. The array is
//! single-threaded: mutate it on the UI thread only.
//!
//! ```ignore
//! let items = ObservableArray::from_iter(["Apple", "Banana"]);
//! dropdown.set_items(items.clone());
//!
//! // Triggers dropdown.refresh()
//! items.push("Cherry");
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::value::ItemValue;

new_key_type! {
    /// Identifier for a change-signal subscription
    pub struct SubscriptionId;
}

/// Kind of in-place mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    /// Items appended at the end
    Add,
    /// Items removed
    Delete,
    /// A single item replaced
    Update,
    /// Items removed and/or inserted at an index
    Splice,
}

/// Payload of the change signal
#[derive(Debug, Clone, PartialEq)]
pub struct ChangedData {
    /// What happened
    pub action: ChangeAction,
    /// First affected index
    pub index: usize,
    /// Items removed by the mutation
    pub removed: Vec<ItemValue>,
    /// Number of items inserted by the mutation
    pub added_count: usize,
}

type ChangeCallback = Rc<dyn Fn(&ChangedData)>;

#[derive(Default)]
struct ArrayInner {
    items: Vec<ItemValue>,
    subscribers: SlotMap<SubscriptionId, ChangeCallback>,
}

/// A shared, change-emitting item sequence
#[derive(Clone, Default)]
pub struct ObservableArray {
    inner: Rc<RefCell<ArrayInner>>,
}

impl ObservableArray {
    /// Create an empty array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an array from existing items
    pub fn from_vec(items: Vec<ItemValue>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ArrayInner {
                items,
                subscribers: SlotMap::with_key(),
            })),
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    /// Whether the array holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone the item at `index`
    pub fn get(&self, index: usize) -> Option<ItemValue> {
        self.inner.borrow().items.get(index).cloned()
    }

    /// Snapshot of all items
    pub fn to_vec(&self) -> Vec<ItemValue> {
        self.inner.borrow().items.clone()
    }

    /// Whether two handles share the same backing store
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Append an item
    pub fn push(&self, item: impl Into<ItemValue>) {
        let index = {
            let mut inner = self.inner.borrow_mut();
            inner.items.push(item.into());
            inner.items.len() - 1
        };
        self.emit(ChangedData {
            action: ChangeAction::Add,
            index,
            removed: Vec::new(),
            added_count: 1,
        });
    }

    /// Remove and return the last item
    pub fn pop(&self) -> Option<ItemValue> {
        let (popped, index) = {
            let mut inner = self.inner.borrow_mut();
            let popped = inner.items.pop()?;
            let index = inner.items.len();
            (popped, index)
        };
        self.emit(ChangedData {
            action: ChangeAction::Delete,
            index,
            removed: vec![popped.clone()],
            added_count: 0,
        });
        Some(popped)
    }

    /// Insert an item at `index` (clamped to the current length)
    pub fn insert(&self, index: usize, item: impl Into<ItemValue>) {
        self.splice(index, 0, vec![item.into()]);
    }

    /// Remove the item at `index`
    pub fn remove(&self, index: usize) -> Option<ItemValue> {
        self.splice(index, 1, Vec::new()).into_iter().next()
    }

    /// Replace the item at `index`. Out-of-range writes are ignored.
    pub fn set_item(&self, index: usize, item: impl Into<ItemValue>) {
        let previous = {
            let mut inner = self.inner.borrow_mut();
            match inner.items.get_mut(index) {
                Some(slot) => std::mem::replace(slot, item.into()),
                None => return,
            }
        };
        self.emit(ChangedData {
            action: ChangeAction::Update,
            index,
            removed: vec![previous],
            added_count: 1,
        });
    }

    /// Remove `delete_count` items at `start` and insert `items` in their place
    ///
    /// Returns the removed items.
    pub fn splice(&self, start: usize, delete_count: usize, items: Vec<ItemValue>) -> Vec<ItemValue> {
        let added_count = items.len();
        let (start, removed) = {
            let mut inner = self.inner.borrow_mut();
            let len = inner.items.len();
            let start = start.min(len);
            let end = start.saturating_add(delete_count).min(len);
            let removed: Vec<ItemValue> = inner.items.splice(start..end, items).collect();
            (start, removed)
        };
        if removed.is_empty() && added_count == 0 {
            return removed;
        }
        self.emit(ChangedData {
            action: ChangeAction::Splice,
            index: start,
            removed: removed.clone(),
            added_count,
        });
        removed
    }

    /// Remove every item
    pub fn clear(&self) {
        let len = self.len();
        self.splice(0, len, Vec::new());
    }

    /// Subscribe to in-place mutations
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ChangedData) + 'static,
    {
        self.inner.borrow_mut().subscribers.insert(Rc::new(callback))
    }

    /// Detach a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().subscribers.remove(id).is_some()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn emit(&self, data: ChangedData) {
        // Callbacks may read or mutate the array, so none of them run under the borrow.
        let callbacks: Vec<ChangeCallback> =
            self.inner.borrow().subscribers.values().cloned().collect();
        for callback in callbacks {
            callback(&data);
        }
    }
}

impl<T: Into<ItemValue>> FromIterator<T> for ObservableArray {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for ObservableArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ObservableArray")
            .field("items", &inner.items)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(array: &ObservableArray) -> (SubscriptionId, Rc<RefCell<Vec<ChangedData>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = log.clone();
        let id = array.subscribe(move |data| log_clone.borrow_mut().push(data.clone()));
        (id, log)
    }

    #[test]
    fn test_push_pop_emit() {
        let array: ObservableArray = ["a", "b"].into_iter().collect();
        let (_id, log) = recorder(&array);

        array.push("c");
        assert_eq!(array.len(), 3);
        assert_eq!(array.pop(), Some(ItemValue::from("c")));

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].action, ChangeAction::Add);
        assert_eq!(log[0].index, 2);
        assert_eq!(log[1].action, ChangeAction::Delete);
        assert_eq!(log[1].removed, vec![ItemValue::from("c")]);
    }

    #[test]
    fn test_splice_clamps_range() {
        let array: ObservableArray = ["a", "b", "c"].into_iter().collect();
        let removed = array.splice(1, 10, vec![ItemValue::from("x")]);
        assert_eq!(removed, vec![ItemValue::from("b"), ItemValue::from("c")]);
        assert_eq!(array.to_vec(), vec![ItemValue::from("a"), ItemValue::from("x")]);
    }

    #[test]
    fn test_noop_splice_is_silent() {
        let array: ObservableArray = ["a"].into_iter().collect();
        let (_id, log) = recorder(&array);
        array.splice(5, 3, Vec::new());
        array.set_item(9, "z");
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe() {
        let array = ObservableArray::new();
        let (id, log) = recorder(&array);
        assert!(array.unsubscribe(id));
        assert!(!array.unsubscribe(id));
        array.push(1);
        assert!(log.borrow().is_empty());
        assert_eq!(array.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_read_array() {
        let array: ObservableArray = ["a"].into_iter().collect();
        let seen = Rc::new(RefCell::new(0));
        let seen_clone = seen.clone();
        let reader = array.clone();
        array.subscribe(move |_| *seen_clone.borrow_mut() = reader.len());
        array.push("b");
        assert_eq!(*seen.borrow(), 2);
    }
}
