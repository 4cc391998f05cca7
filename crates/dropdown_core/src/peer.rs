//! Native peer capability
//!
//! Each platform backend implements [`NativePeer`] once. The shared model
//! calls these hooks after it has coerced and stored a new value, so a peer
//! only ever sees valid state and never has to validate anything itself.
//!
//! ```text
//! host write ──► coerce ──► DropDownBase ──► NativePeer hook ──► native widget
//!                                ▲                                   │
//!                                └──── delegate (weak back-ref) ◄────┘
//!                                           native callback
//! ```

use crate::base::DropDownBase;
use crate::style::StyleProperty;
use crate::widget::WeakDropDown;

/// Platform adapter for a drop down
///
/// Hooks that push state take `&DropDownBase`; hooks that may raise
/// `opened`/`closed` take `&mut DropDownBase` and queue events with
/// [`DropDownBase::emit`].
pub trait NativePeer: Sized + 'static {
    /// Platform name for diagnostics ("android", "ios", ...)
    fn platform_name(&self) -> &'static str;

    /// Construct the native widget and its delegates
    ///
    /// Delegates keep `owner` as a non-owning back-reference and must return
    /// inert defaults once it no longer upgrades.
    fn create_native_view(&mut self, owner: WeakDropDown<Self>);

    /// Push the full current state onto a freshly created native widget
    fn init_native_view(&mut self, base: &mut DropDownBase);

    /// Tear the native widget down and release every realized view
    fn dispose_native_view(&mut self);

    /// Whether a native widget currently exists
    fn is_attached(&self) -> bool;

    /// Platform policy applied before the shared clamp whenever the item
    /// count may have changed under the current selection
    fn coerce_on_items_changed(&self, current: Option<usize>, _item_count: usize) -> Option<usize> {
        current
    }

    /// `items` was reassigned
    fn items_changed(&mut self, base: &DropDownBase);

    /// `selectedIndex` changed
    fn selected_index_changed(&mut self, base: &DropDownBase);

    /// `hint` changed
    fn hint_changed(&mut self, base: &DropDownBase);

    /// `isEnabled` changed
    fn enabled_changed(&mut self, base: &DropDownBase);

    /// A style attribute changed
    fn apply_style(&mut self, base: &DropDownBase, property: StyleProperty);

    /// Backing data changed in place; re-notify the native widget
    fn refresh(&mut self, base: &DropDownBase);

    /// Show the selection surface
    fn open(&mut self, base: &mut DropDownBase);

    /// Dismiss the selection surface
    fn close(&mut self, base: &mut DropDownBase);
}
