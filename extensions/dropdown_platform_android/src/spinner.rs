//! Native spinner and its peer
//!
//! [`Spinner`] mirrors the state of an `android.widget.Spinner`: current
//! native selection, row count as of the last data-set notification, and
//! whether its popup is showing. [`SpinnerPeer`] implements
//! [`NativePeer`] on top of it.
//!
//! # Open/close
//!
//! ```text
//!            perform_click                    window focus regained
//! closed ───────────────────► opened ──────────────────────────────► closed
//!         emits `opened`,              (row picked or popup dismissed)
//!         arms one-shot close          emits `closed`
//! ```

use dropdown_core::{
    Color, DropDownBase, DropDownEvent, Items, NativePeer, Padding, StyleProperty, WeakDropDown,
};

use crate::adapter::{
    logical_index_of, native_index_of, row_count, DropDownAdapter, ItemSelectedListener,
    WindowFocusListener,
};
use crate::realized::{NativeViewId, RealizedView, RealizedViewType};
use crate::recycler::ViewRecyclingCache;

/// Padding of popup rows when `itemsPadding` is unset, in dips
pub const DEFAULT_ITEM_PADDING_DP: f32 = 4.0;

/// Height that keeps an empty hint row laid out but invisible, in pixels
pub const COLLAPSED_ROW_HEIGHT: f32 = 1.0;

// =============================================================================
// Spinner
// =============================================================================

/// Native spinner state
#[derive(Debug)]
pub struct Spinner {
    selection: usize,
    count: usize,
    data_set_generation: u64,
    enabled: bool,
    popup_showing: bool,
    close_armed: bool,
    padding: Padding,
    background_color: Option<Color>,
    adapter: DropDownAdapter,
    listener: ItemSelectedListener,
    focus_listener: WindowFocusListener,
}

impl Spinner {
    fn new(owner: WeakDropDown<SpinnerPeer>) -> Self {
        Self {
            selection: 0,
            count: 0,
            data_set_generation: 0,
            enabled: true,
            popup_showing: false,
            close_armed: false,
            padding: Padding::default(),
            background_color: None,
            adapter: DropDownAdapter::new(owner.clone()),
            listener: ItemSelectedListener::new(owner.clone()),
            focus_listener: WindowFocusListener::new(owner),
        }
    }

    /// Selected native row
    pub fn selection(&self) -> usize {
        self.selection
    }

    /// Row count as of the last data-set notification
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of data-set notifications received
    pub fn data_set_generation(&self) -> u64 {
        self.data_set_generation
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_popup_showing(&self) -> bool {
        self.popup_showing
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn adapter(&self) -> &DropDownAdapter {
        &self.adapter
    }

    pub fn on_item_selected_listener(&self) -> &ItemSelectedListener {
        &self.listener
    }

    pub fn window_focus_listener(&self) -> &WindowFocusListener {
        &self.focus_listener
    }

    fn set_selection(&mut self, native_index: usize) {
        self.selection = native_index;
    }

    fn notify_data_set_changed(&mut self, count: usize) {
        self.count = count;
        self.data_set_generation += 1;
        if self.selection >= count {
            self.selection = 0;
        }
    }

    /// Show the popup. Returns false when it cannot open.
    fn perform_click(&mut self) -> bool {
        if !self.enabled || self.popup_showing {
            return false;
        }
        self.popup_showing = true;
        self.close_armed = true;
        true
    }

    /// Hide the popup. Returns false when it was not showing.
    fn dismiss_popup(&mut self) -> bool {
        self.close_armed = false;
        std::mem::replace(&mut self.popup_showing, false)
    }

    /// Returns true when an armed close fired
    fn window_focus_changed(&mut self, has_focus: bool) -> bool {
        if has_focus && self.close_armed {
            self.close_armed = false;
            self.popup_showing = false;
            return true;
        }
        false
    }
}

// =============================================================================
// SpinnerPeer
// =============================================================================

/// Android [`NativePeer`]: spinner with a synthetic hint row
#[derive(Debug)]
pub struct SpinnerPeer {
    density: f32,
    spinner: Option<Spinner>,
    cache: ViewRecyclingCache,
    // Last shared sequence or source pushed, kept only for identity checks
    items_identity: Option<Items>,
}

impl SpinnerPeer {
    /// `density` is the display density used to scale dips to pixels
    pub fn new(density: f32) -> Self {
        Self {
            density,
            spinner: None,
            cache: ViewRecyclingCache::new(),
            items_identity: None,
        }
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn spinner(&self) -> Option<&Spinner> {
        self.spinner.as_ref()
    }

    pub fn cache(&self) -> &ViewRecyclingCache {
        &self.cache
    }

    pub(crate) fn cache_mut(&mut self) -> &mut ViewRecyclingCache {
        &mut self.cache
    }

    /// Build or reuse the view for native row `index`
    pub(crate) fn generate_view(
        &mut self,
        base: &DropDownBase,
        index: usize,
        convert_view: Option<NativeViewId>,
        kind: RealizedViewType,
    ) -> Option<NativeViewId> {
        if self.spinner.is_none() {
            tracing::warn!("{:?} requested for row {} without a spinner", kind, index);
            return None;
        }
        let density = self.density;
        let view = self.cache.realize(kind, convert_view);
        view.native_index = index;
        stamp_row(view, base, density);
        tracing::trace!("realized {:?} row {} as {:?}", kind, index, view.id);
        Some(view.id)
    }

    /// The user picked native row `index`
    pub(crate) fn commit_native_selection(&mut self, base: &mut DropDownBase, index: usize) {
        let logical = logical_index_of(index);
        if base.write_selected_index(self, &logical.into()) {
            // Popup rows are stale once a selection commits
            self.cache.clear(RealizedViewType::DropDownView);
        }
        // The coerced index may differ from the row the spinner reported
        self.push_selection(base);
    }

    pub(crate) fn on_window_focus_changed(&mut self, base: &mut DropDownBase, has_focus: bool) {
        let closed = self
            .spinner
            .as_mut()
            .map(|spinner| spinner.window_focus_changed(has_focus))
            .unwrap_or(false);
        if closed {
            base.emit(DropDownEvent::Closed);
        }
    }

    fn notify_data_set_changed(&mut self, base: &DropDownBase) {
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.notify_data_set_changed(row_count(base.item_count()));
        }
    }

    /// Record the identity of the current items; true when it is unchanged
    fn track_items_identity(&mut self, base: &DropDownBase) -> bool {
        let current = base
            .items()
            .filter(|items| !matches!(items, Items::List(_)))
            .cloned();
        let same = match (self.items_identity.as_ref(), current.as_ref()) {
            (Some(previous), Some(current)) => previous.same_identity(current),
            _ => false,
        };
        self.items_identity = current;
        same
    }

    fn push_selection(&mut self, base: &DropDownBase) {
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.set_selection(native_index_of(base.selected_index()));
        }
    }

    fn apply_spinner_style(&mut self, base: &DropDownBase) {
        let density = self.density;
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.padding = base.style().padding.scaled(density);
            spinner.background_color = base.style().background_color;
        }
    }

    fn restamp(&mut self, base: &DropDownBase, kind: RealizedViewType) {
        let density = self.density;
        for view in self.cache.views_mut(kind) {
            stamp_row(view, base, density);
        }
    }
}

/// Copy text and style from the model onto a realized row
fn stamp_row(view: &mut RealizedView, base: &DropDownBase, density: f32) {
    let style = base.style();
    let is_hint = view.is_hint_row();

    view.label.text = if is_hint {
        base.render_hint()
    } else {
        base.render_item_text(logical_index_of(view.native_index))
            .unwrap_or_default()
    };
    view.label.color = if is_hint { Some(Color::HINT_GRAY) } else { style.color };
    view.label.font = style.font.clone();
    view.label.decoration = style.text_decoration;
    view.background_color = style.background_color;

    match view.kind {
        RealizedViewType::ItemView => {
            view.label.alignment = style.text_alignment;
            view.padding = Padding::default();
            view.height = None;
            view.enabled = true;
        }
        RealizedViewType::DropDownView => {
            view.label.alignment = style.effective_items_alignment();
            view.padding = match style.items_padding {
                Some(padding) => padding.scaled(density),
                None => Padding::uniform(DEFAULT_ITEM_PADDING_DP * density),
            };
            view.height = (is_hint && base.hint().is_empty()).then_some(COLLAPSED_ROW_HEIGHT);
            view.enabled = !is_hint;
        }
    }
}

impl NativePeer for SpinnerPeer {
    fn platform_name(&self) -> &'static str {
        "android"
    }

    fn create_native_view(&mut self, owner: WeakDropDown<Self>) {
        self.spinner = Some(Spinner::new(owner));
    }

    fn init_native_view(&mut self, base: &mut DropDownBase) {
        let enabled = base.is_enabled();
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.enabled = enabled;
        }
        self.apply_spinner_style(base);
        self.track_items_identity(base);
        self.notify_data_set_changed(base);
        // A selection set from a template before the spinner existed
        self.push_selection(base);
    }

    fn dispose_native_view(&mut self) {
        let released = self.cache.clear_all();
        self.spinner = None;
        self.items_identity = None;
        tracing::debug!("spinner disposed, released {} realized view(s)", released);
    }

    fn is_attached(&self) -> bool {
        self.spinner.is_some()
    }

    /// Unset rather than clamp when the selection falls off the end
    fn coerce_on_items_changed(&self, current: Option<usize>, item_count: usize) -> Option<usize> {
        match current {
            Some(index) if index >= item_count => None,
            other => other,
        }
    }

    fn items_changed(&mut self, base: &DropDownBase) {
        if self.track_items_identity(base) {
            // Same sequence reassigned: row keys still hold, only text may differ
            self.restamp(base, RealizedViewType::DropDownView);
        } else {
            self.cache.clear(RealizedViewType::DropDownView);
        }
        self.notify_data_set_changed(base);
    }

    fn selected_index_changed(&mut self, base: &DropDownBase) {
        self.push_selection(base);
    }

    fn hint_changed(&mut self, base: &DropDownBase) {
        self.notify_data_set_changed(base);
    }

    fn enabled_changed(&mut self, base: &DropDownBase) {
        let enabled = base.is_enabled();
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.enabled = enabled;
        }
    }

    fn apply_style(&mut self, base: &DropDownBase, property: StyleProperty) {
        match property {
            StyleProperty::Padding | StyleProperty::BackgroundColor => {
                self.apply_spinner_style(base);
            }
            _ => {}
        }
        match property {
            StyleProperty::ItemsTextAlignment | StyleProperty::ItemsPadding => {
                self.restamp(base, RealizedViewType::DropDownView);
            }
            StyleProperty::Padding => {}
            _ => {
                self.restamp(base, RealizedViewType::ItemView);
                self.restamp(base, RealizedViewType::DropDownView);
            }
        }
    }

    fn refresh(&mut self, base: &DropDownBase) {
        self.notify_data_set_changed(base);
    }

    fn open(&mut self, base: &mut DropDownBase) {
        let opened = self
            .spinner
            .as_mut()
            .map(Spinner::perform_click)
            .unwrap_or(false);
        if opened {
            base.emit(DropDownEvent::Opened);
        }
    }

    fn close(&mut self, base: &mut DropDownBase) {
        let closed = self
            .spinner
            .as_mut()
            .map(Spinner::dismiss_popup)
            .unwrap_or(false);
        if closed {
            base.emit(DropDownEvent::Closed);
        }
    }
}
