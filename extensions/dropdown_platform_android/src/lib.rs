//! DropDown Android Platform
//!
//! Android backend for the drop down: a `Spinner` driven through a row
//! adapter, an item-selected listener and a window focus callback.
//!
//! The spinner has no notion of "no selection", so the backend injects a
//! synthetic hint row at native index 0 and translates every index by one
//! (see [`adapter`]). Row views are recycled per spinner through a
//! [`ViewRecyclingCache`].
//!
//! # Example
//!
//! ```ignore
//! use dropdown_platform::Platform;
//! use dropdown_platform_android::{AndroidDropDown, AndroidPlatform};
//!
//! dropdown_platform_android::init_logging();
//! let platform = AndroidPlatform::with_density(2.0)?;
//! let dropdown = AndroidDropDown::new(&platform);
//! dropdown.set_hint("My Hint");
//! dropdown.set_items(vec!["Item 0", "Item 1"]);
//! dropdown.create_native_view();
//!
//! // The JNI bridge forwards native callbacks to the delegates
//! let adapter = dropdown.native_adapter().unwrap();
//! assert_eq!(adapter.get_count(), 3);
//! ```

pub mod adapter;
pub mod realized;
pub mod recycler;
pub mod spinner;

use std::ops::Deref;

use dropdown_core::DropDown;
use dropdown_platform::{checked_scale_factor, MainQueue, Platform, PlatformError};

pub use adapter::{
    logical_index_of, native_index_of, row_count, DropDownAdapter, ItemSelectedListener,
    WindowFocusListener,
};
pub use realized::{NativeViewId, RealizedView, RealizedViewType, RowLabel};
pub use recycler::ViewRecyclingCache;
pub use spinner::{Spinner, SpinnerPeer};

/// Install a `tracing` subscriber filtered by `RUST_LOG`
///
/// Calling it again once a subscriber is installed does nothing.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

/// Android platform implementation
pub struct AndroidPlatform {
    density: f64,
    main_queue: MainQueue,
}

impl AndroidPlatform {
    /// Create a platform with the density reported by `DisplayMetrics`
    pub fn with_density(density: f64) -> Result<Self, PlatformError> {
        Ok(Self {
            density: checked_scale_factor(density)?,
            main_queue: MainQueue::new(),
        })
    }
}

impl Platform for AndroidPlatform {
    fn new() -> Result<Self, PlatformError> {
        Self::with_density(1.0)
    }

    fn name(&self) -> &'static str {
        "android"
    }

    fn scale_factor(&self) -> f64 {
        self.density
    }

    fn main_queue(&self) -> &MainQueue {
        &self.main_queue
    }
}

/// Drop down rendered as an Android spinner
#[derive(Clone, Debug)]
pub struct AndroidDropDown {
    inner: DropDown<SpinnerPeer>,
}

impl AndroidDropDown {
    pub fn new(platform: &AndroidPlatform) -> Self {
        Self {
            inner: DropDown::new(SpinnerPeer::new(platform.scale_factor() as f32)),
        }
    }

    /// Row adapter installed on the spinner, while one exists
    pub fn native_adapter(&self) -> Option<DropDownAdapter> {
        self.inner
            .with_peer(|peer| peer.spinner().map(|spinner| spinner.adapter().clone()))
    }

    pub fn item_selected_listener(&self) -> Option<ItemSelectedListener> {
        self.inner.with_peer(|peer| {
            peer.spinner()
                .map(|spinner| spinner.on_item_selected_listener().clone())
        })
    }

    pub fn window_focus_listener(&self) -> Option<WindowFocusListener> {
        self.inner
            .with_peer(|peer| peer.spinner().map(|spinner| spinner.window_focus_listener().clone()))
    }

    /// Native row the spinner currently shows
    pub fn native_selection(&self) -> Option<usize> {
        self.inner
            .with_peer(|peer| peer.spinner().map(|spinner| spinner.selection()))
    }

    pub fn into_inner(self) -> DropDown<SpinnerPeer> {
        self.inner
    }
}

impl Deref for AndroidDropDown {
    type Target = DropDown<SpinnerPeer>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropdown_core::{Color, DropDownEvent, EventKind, ObservableArray, Padding, TextTransform};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dropdown() -> AndroidDropDown {
        AndroidDropDown::new(&AndroidPlatform::with_density(2.0).unwrap())
    }

    fn record(dropdown: &AndroidDropDown) -> Rc<RefCell<Vec<DropDownEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in [EventKind::Opened, EventKind::Closed, EventKind::SelectedIndexChanged] {
            let log = log.clone();
            dropdown.on(kind, move |event| log.borrow_mut().push(*event));
        }
        log
    }

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Item {}", i)).collect()
    }

    fn item_view(dropdown: &AndroidDropDown, id: NativeViewId) -> Option<RealizedView> {
        dropdown.with_peer(|peer| peer.cache().get(RealizedViewType::ItemView, id).cloned())
    }

    #[test]
    fn test_platform_metrics() {
        let platform = AndroidPlatform::with_density(3.0).unwrap();
        assert_eq!(platform.name(), "android");
        assert_eq!(platform.dp_to_px(4.0), 12.0);
        assert!(AndroidPlatform::with_density(0.0).is_err());
        assert_eq!(AndroidPlatform::new().unwrap().scale_factor(), 1.0);
    }

    #[test]
    fn test_initial_display_shows_hint() {
        let dropdown = dropdown();
        let log = record(&dropdown);
        dropdown.set_items(items(200));
        dropdown.set_selected_index(None::<usize>);
        dropdown.set_hint("My Hint");
        dropdown.create_native_view();

        assert_eq!(dropdown.native_selection(), Some(0));
        let adapter = dropdown.native_adapter().unwrap();
        assert_eq!(adapter.get_count(), 201);

        let shown = adapter.get_view(0, None).and_then(|id| item_view(&dropdown, id)).unwrap();
        assert_eq!(shown.label.text, "My Hint");
        assert_eq!(shown.label.color, Some(Color::HINT_GRAY));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_host_selection_fires_once() {
        let dropdown = dropdown();
        dropdown.set_items(items(200));
        dropdown.create_native_view();
        let log = record(&dropdown);

        dropdown.set_selected_index(15);
        assert_eq!(dropdown.native_selection(), Some(16));
        assert_eq!(
            *log.borrow(),
            vec![DropDownEvent::SelectedIndexChanged {
                old_index: None,
                new_index: Some(15)
            }]
        );
    }

    #[test]
    fn test_shrinking_items_unsets_selection() {
        let dropdown = dropdown();
        dropdown.set_items(items(200));
        dropdown.create_native_view();
        dropdown.set_selected_index(15);
        let log = record(&dropdown);

        dropdown.set_items(items(5));
        assert_eq!(dropdown.selected_index(), None);
        assert_eq!(dropdown.native_selection(), Some(0));
        assert_eq!(dropdown.native_adapter().map(|a| a.get_count()), Some(6));
        assert_eq!(
            *log.borrow(),
            vec![DropDownEvent::SelectedIndexChanged {
                old_index: Some(15),
                new_index: None
            }]
        );
    }

    #[test]
    fn test_shrink_policy_applies_before_attach() {
        let dropdown = dropdown();
        dropdown.set_items(items(20));
        dropdown.set_selected_index(15);
        dropdown.set_items(items(5));
        assert_eq!(dropdown.selected_index(), None);
    }

    #[test]
    fn test_hint_row_tap_when_unset_is_silent() {
        let dropdown = dropdown();
        dropdown.set_items(items(10));
        dropdown.create_native_view();
        let log = record(&dropdown);

        let listener = dropdown.item_selected_listener().unwrap();
        listener.on_item_selected(0);
        assert_eq!(dropdown.selected_index(), None);
        assert!(log.borrow().is_empty());

        listener.on_item_selected(4);
        assert_eq!(dropdown.selected_index(), Some(3));
        listener.on_item_selected(0);
        assert_eq!(dropdown.selected_index(), None);
        assert_eq!(
            *log.borrow(),
            vec![
                DropDownEvent::SelectedIndexChanged {
                    old_index: None,
                    new_index: Some(3)
                },
                DropDownEvent::SelectedIndexChanged {
                    old_index: Some(3),
                    new_index: None
                },
            ]
        );
    }

    #[test]
    fn test_open_then_focus_regained_closes() {
        let dropdown = dropdown();
        dropdown.set_items(items(3));
        dropdown.create_native_view();
        let log = record(&dropdown);

        dropdown.open();
        dropdown.item_selected_listener().unwrap().on_item_selected(2);
        dropdown.window_focus_listener().unwrap().on_window_focus_changed(true);
        assert_eq!(
            *log.borrow(),
            vec![
                DropDownEvent::Opened,
                DropDownEvent::SelectedIndexChanged {
                    old_index: None,
                    new_index: Some(1)
                },
                DropDownEvent::Closed,
            ]
        );
    }

    #[test]
    fn test_popup_cache_cleared_on_items_change_and_selection() {
        let dropdown = dropdown();
        dropdown.set_items(items(5));
        dropdown.create_native_view();
        let adapter = dropdown.native_adapter().unwrap();

        let item = adapter.get_view(1, None).unwrap();
        let popup = adapter.get_drop_down_view(1, None).unwrap();
        let cached = |kind| dropdown.with_peer(|peer| peer.cache().len(kind));
        assert_eq!(cached(RealizedViewType::DropDownView), 1);

        dropdown.set_items(items(4));
        assert_eq!(cached(RealizedViewType::DropDownView), 0);
        assert_eq!(cached(RealizedViewType::ItemView), 1);
        assert_ne!(adapter.get_drop_down_view(1, Some(popup)), Some(popup));

        dropdown.item_selected_listener().unwrap().on_item_selected(2);
        assert_eq!(cached(RealizedViewType::DropDownView), 0);

        // Closed-state rows survive and are reused
        assert_eq!(adapter.get_view(2, Some(item)), Some(item));
        assert_eq!(item_view(&dropdown, item).map(|v| v.label.text), Some("Item 1".to_string()));
    }

    #[test]
    fn test_reassigning_same_observable_keeps_popup_rows() {
        let dropdown = dropdown();
        let array: ObservableArray = items(3).into_iter().collect();
        dropdown.set_items(array.clone());
        dropdown.create_native_view();
        let adapter = dropdown.native_adapter().unwrap();
        let cached = |kind| dropdown.with_peer(|peer| peer.cache().len(kind));

        let popup = adapter.get_drop_down_view(1, None).unwrap();
        dropdown.set_items(array.clone());
        assert_eq!(cached(RealizedViewType::DropDownView), 1);
        assert_eq!(adapter.get_drop_down_view(1, Some(popup)), Some(popup));

        let other: ObservableArray = items(3).into_iter().collect();
        dropdown.set_items(other);
        assert_eq!(cached(RealizedViewType::DropDownView), 0);
        assert_eq!(array.subscriber_count(), 0);
    }

    #[test]
    fn test_out_of_range_row_report_resyncs_spinner() {
        let dropdown = dropdown();
        dropdown.set_items(items(3));
        dropdown.create_native_view();
        dropdown.set_selected_index(2);
        assert_eq!(dropdown.native_selection(), Some(3));
        let log = record(&dropdown);

        dropdown.item_selected_listener().unwrap().on_item_selected(10);
        assert_eq!(dropdown.selected_index(), Some(2));
        assert_eq!(dropdown.native_selection(), Some(3));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_parentless_row_is_reattached() {
        let dropdown = dropdown();
        dropdown.set_items(items(3));
        dropdown.create_native_view();
        let adapter = dropdown.native_adapter().unwrap();

        let id = adapter.get_view(1, None).unwrap();
        adapter.on_view_orphaned(id);
        assert_eq!(item_view(&dropdown, id).map(|v| v.attached), Some(false));
        assert_eq!(adapter.get_view(1, Some(id)), Some(id));
        assert_eq!(item_view(&dropdown, id).map(|v| v.attached), Some(true));

        adapter.on_view_released(id);
        assert!(item_view(&dropdown, id).is_none());
    }

    #[test]
    fn test_dispose_clears_cache_and_orphans_delegates() {
        let dropdown = dropdown();
        dropdown.set_items(items(3));
        dropdown.create_native_view();
        let adapter = dropdown.native_adapter().unwrap();
        adapter.get_view(0, None);
        adapter.get_drop_down_view(1, None);

        dropdown.dispose_native_view();
        assert!(dropdown.with_peer(|peer| peer.cache().is_empty()));
        assert_eq!(adapter.get_view(1, None), None);

        let listener = dropdown.item_selected_listener();
        assert!(listener.is_none());
        drop(dropdown);
        assert_eq!(adapter.get_count(), 0);
    }

    #[test]
    fn test_adapter_items_and_ids() {
        let dropdown = dropdown();
        dropdown.set_hint("Pick");
        dropdown.set_items(items(2));
        dropdown.create_native_view();
        let adapter = dropdown.native_adapter().unwrap();

        assert_eq!(adapter.get_item(0).as_deref(), Some("Pick"));
        assert_eq!(adapter.get_item(2).as_deref(), Some("Item 1"));
        assert_eq!(adapter.get_item(3), None);
        assert!(!adapter.is_enabled(0));
        assert!(adapter.is_enabled(1));
        assert_eq!(adapter.get_item_id(2), 2);
    }

    #[test]
    fn test_style_restamps_realized_rows() {
        let dropdown = dropdown();
        dropdown.set_items(items(3));
        dropdown.create_native_view();
        let adapter = dropdown.native_adapter().unwrap();
        let row = adapter.get_view(1, None).unwrap();
        let popup = adapter.get_drop_down_view(2, None).unwrap();

        dropdown.set_color(Some(Color::BLACK));
        dropdown.set_text_transform(TextTransform::Uppercase);
        dropdown.set_items_padding(Some(Padding::uniform(10.0)));
        dropdown.set_padding(Padding::uniform(3.0));

        let row = item_view(&dropdown, row).unwrap();
        assert_eq!(row.label.color, Some(Color::BLACK));
        assert_eq!(row.label.text, "ITEM 0");
        let popup = dropdown
            .with_peer(|peer| peer.cache().get(RealizedViewType::DropDownView, popup).cloned())
            .unwrap();
        assert_eq!(popup.padding, Padding::uniform(20.0));
        assert_eq!(
            dropdown.with_peer(|peer| peer.spinner().map(|s| s.padding())),
            Some(Padding::uniform(6.0))
        );
    }

    #[test]
    fn test_observable_shrink_unsets_through_refresh() {
        let dropdown = dropdown();
        let array: ObservableArray = items(4).into_iter().collect();
        dropdown.set_items(array.clone());
        dropdown.create_native_view();
        dropdown.set_selected_index(3);

        let generation = dropdown.with_peer(|p| p.spinner().map(|s| s.data_set_generation()));
        array.pop();
        assert_eq!(dropdown.selected_index(), None);
        assert_eq!(dropdown.native_selection(), Some(0));
        assert_ne!(
            dropdown.with_peer(|p| p.spinner().map(|s| s.data_set_generation())),
            generation
        );
    }

    #[test]
    fn test_disabled_spinner_ignores_open() {
        let dropdown = dropdown();
        dropdown.create_native_view();
        dropdown.set_enabled(false);
        let log = record(&dropdown);
        dropdown.open();
        assert!(log.borrow().is_empty());
        assert_eq!(
            dropdown.with_peer(|peer| peer.spinner().map(Spinner::is_enabled)),
            Some(false)
        );
    }
}
