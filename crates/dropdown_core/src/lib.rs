//! DropDown Core
//!
//! Platform-independent half of the drop down control:
//!
//! - **Items**: plain lists, observable arrays, item sources and value lists
//!   behind one [`Items`] adapter
//! - **Coercion**: every `selectedIndex` write is clamped against the items
//! - **Shared model**: [`DropDownBase`] stores state and queues events
//! - **Native peers**: each platform backend implements [`NativePeer`]
//! - **Widget handle**: [`DropDown<P>`] ties the model to one peer
//!
//! # Example
//!
//! ```rust
//! use dropdown_core::{coerce_selected_index, IndexCandidate, ValueList};
//!
//! let countries = ValueList::from_pairs([("fr", "France"), ("de", "Germany")]);
//! assert_eq!(countries.get_display(1), "Germany");
//! assert_eq!(countries.get_index(&"fr"), Some(0));
//!
//! assert_eq!(coerce_selected_index(&IndexCandidate::Index(42), Some(10)), Some(9));
//! assert_eq!(coerce_selected_index(&IndexCandidate::Index(3), Some(0)), None);
//! ```

pub mod base;
pub mod binding;
pub mod coerce;
pub mod config;
pub mod error;
pub mod events;
pub mod items;
pub mod observable;
pub mod peer;
pub mod style;
pub mod value;
pub mod value_list;
pub mod widget;

pub use base::DropDownBase;
pub use binding::SelectedIndexValueAccessor;
pub use coerce::{coerce_selected_index, IndexCandidate};
pub use config::{DropDownConfig, StyleConfig};
pub use error::{DropDownError, Result};
pub use events::{DropDownEvent, EventCallback, EventEmitter, EventKind, ListenerId};
pub use items::{get_item_text, Items, ItemsProbe, ItemsSource, ValueListAccess};
pub use observable::{ChangeAction, ChangedData, ObservableArray, SubscriptionId};
pub use peer::NativePeer;
pub use style::{
    Color, Font, FontWeight, Padding, Style, StyleProperty, TextAlignment, TextDecoration,
    TextTransform,
};
pub use value::ItemValue;
pub use value_list::{ValueItem, ValueList};
pub use widget::{DropDown, WeakDropDown};
