//! DropDown iOS Platform
//!
//! iOS backend for the drop down: a label whose input view is a picker
//! wheel and whose input accessory view is a toolbar with a Done button.
//!
//! # Architecture
//!
//! There is no synthetic hint row on iOS. Wheel row 0 is logical index 0,
//! and the unset state only shows up as the label falling back to the hint.
//! Opening and closing follow the label's first-responder status:
//!
//! - **Label tap** requests first responder while the widget is enabled
//! - **Done** and **row selection** resign it
//!
//! # Usage
//!
//! ```ignore
//! use dropdown_platform::Platform;
//! use dropdown_platform_ios::{IOSDropDown, IOSPlatform};
//!
//! let platform = IOSPlatform::with_scale(3.0)?;
//! let dropdown = IOSDropDown::new(&platform);
//! dropdown.set_items(vec!["Small", "Medium", "Large"]);
//! dropdown.set_selected_index(1);
//! dropdown.create_native_view();
//!
//! // The initial wheel selection lands on the next run loop tick
//! platform.main_queue().run_pending();
//! ```

pub mod label;
pub mod peer;
pub mod picker;
pub mod toolbar;

use std::ops::Deref;

use dropdown_core::{DropDown, DropDownConfig};
use dropdown_platform::{checked_scale_factor, MainQueue, Platform, PlatformError};

pub use label::{DropDownLabel, LabelTapHandler};
pub use peer::{NativeViews, PickerPeer};
pub use picker::{PickerDelegate, PickerRowView, PickerView};
pub use toolbar::{BarButtonItem, DoneTapHandler, Toolbar, TOOLBAR_HEIGHT};

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

/// iOS platform implementation
pub struct IOSPlatform {
    scale: f64,
    main_queue: MainQueue,
}

impl IOSPlatform {
    /// Create a platform with the `UIScreen` scale
    pub fn with_scale(scale: f64) -> Result<Self, PlatformError> {
        Ok(Self {
            scale: checked_scale_factor(scale)?,
            main_queue: MainQueue::new(),
        })
    }
}

impl Platform for IOSPlatform {
    fn new() -> Result<Self, PlatformError> {
        Self::with_scale(2.0)
    }

    fn name(&self) -> &'static str {
        "ios"
    }

    fn scale_factor(&self) -> f64 {
        self.scale
    }

    fn main_queue(&self) -> &MainQueue {
        &self.main_queue
    }
}

/// Drop down rendered as a label with a picker wheel
#[derive(Clone, Debug)]
pub struct IOSDropDown {
    inner: DropDown<PickerPeer>,
}

impl IOSDropDown {
    pub fn new(platform: &IOSPlatform) -> Self {
        Self {
            inner: DropDown::new(PickerPeer::new(platform.main_queue().clone())),
        }
    }

    pub fn accessory_view_visible(&self) -> bool {
        self.inner.with_peer(|peer| peer.accessory_view_visible())
    }

    /// Show or hide the Done toolbar (shown by default)
    pub fn set_accessory_view_visible(&self, visible: bool) {
        self.inner
            .update(|_, peer| peer.set_accessory_view_visible(visible));
    }

    /// Apply `config`, including the iOS-only accessory view flag
    pub fn apply_config(&self, config: &DropDownConfig) {
        self.inner.apply_config(config);
        if let Some(visible) = config.accessory_view_visible {
            self.set_accessory_view_visible(visible);
        }
    }

    /// Snapshot of the label, while native views exist
    pub fn label(&self) -> Option<DropDownLabel> {
        self.inner
            .with_peer(|peer| peer.native().map(|native| native.label.clone()))
    }

    pub fn picker(&self) -> Option<PickerView> {
        self.inner
            .with_peer(|peer| peer.native().map(|native| native.picker.clone()))
    }

    pub fn label_tap_handler(&self) -> Option<LabelTapHandler> {
        self.inner
            .with_peer(|peer| peer.native().map(|native| native.label_tap.clone()))
    }

    pub fn picker_delegate(&self) -> Option<PickerDelegate> {
        self.inner
            .with_peer(|peer| peer.native().map(|native| native.picker_delegate.clone()))
    }

    pub fn done_tap_handler(&self) -> Option<DoneTapHandler> {
        self.inner
            .with_peer(|peer| peer.native().map(|native| native.done_tap.clone()))
    }

    pub fn into_inner(self) -> DropDown<PickerPeer> {
        self.inner
    }
}

impl Deref for IOSDropDown {
    type Target = DropDown<PickerPeer>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
