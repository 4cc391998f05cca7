//! View recycling cache
//!
//! The spinner asks for row views through two callbacks and may hand back a
//! previously returned container (`convertView`) for reuse. Rows are cached
//! in two independent buckets so the same row can be live in the closed
//! spinner and in the popup at the same time with different styling.
//!
//! ```text
//!                    ┌──────────────────────────────┐
//! getView ─────────► │ ItemView bucket              │  kept across items changes
//!                    ├──────────────────────────────┤
//! getDropDownView ─► │ DropDownView bucket          │  cleared on items change
//!                    └──────────────────────────────┘  and after a selection commits
//! ```
//!
//! Handles are slotmap keys, so a handle whose view was released never
//! resolves again even if the native side keeps passing it back.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::realized::{NativeViewId, RealizedView, RealizedViewType};

/// Two-bucket cache of realized row views, owned by one spinner
#[derive(Debug, Default)]
pub struct ViewRecyclingCache {
    /// Every live native container, with the bucket it belongs to
    handles: SlotMap<NativeViewId, RealizedViewType>,
    item_views: FxHashMap<NativeViewId, RealizedView>,
    drop_down_views: FxHashMap<NativeViewId, RealizedView>,
}

impl ViewRecyclingCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, kind: RealizedViewType) -> &FxHashMap<NativeViewId, RealizedView> {
        match kind {
            RealizedViewType::ItemView => &self.item_views,
            RealizedViewType::DropDownView => &self.drop_down_views,
        }
    }

    fn bucket_mut(&mut self, kind: RealizedViewType) -> &mut FxHashMap<NativeViewId, RealizedView> {
        match kind {
            RealizedViewType::ItemView => &mut self.item_views,
            RealizedViewType::DropDownView => &mut self.drop_down_views,
        }
    }

    /// Get a view for `kind`, reusing `convert_view` when it is cached
    ///
    /// A cached view that lost its parent is re-attached before it is
    /// returned. An unknown or released handle yields a fresh view.
    pub fn realize(
        &mut self,
        kind: RealizedViewType,
        convert_view: Option<NativeViewId>,
    ) -> &mut RealizedView {
        let id = match convert_view {
            Some(id) if self.bucket(kind).contains_key(&id) => id,
            other => {
                if let Some(unknown) = other {
                    tracing::trace!("{:?} convert view {:?} not cached, realizing fresh", kind, unknown);
                }
                let id = self.handles.insert(kind);
                self.store(RealizedView::new(id, kind));
                id
            }
        };

        let view = self
            .bucket_mut(kind)
            .entry(id)
            .or_insert_with(|| RealizedView::new(id, kind));
        if !view.attached {
            tracing::debug!("re-attaching parentless {:?} view {:?}", kind, id);
            view.attached = true;
        }
        view
    }

    /// Insert `view`, evicting any entry already stored under its handle
    fn store(&mut self, view: RealizedView) {
        let (kind, id) = (view.kind, view.id);
        self.evict(kind, id);
        self.bucket_mut(kind).insert(id, view);
    }

    /// Remove an entry from `kind`'s bucket and detach it
    fn evict(&mut self, kind: RealizedViewType, id: NativeViewId) -> Option<RealizedView> {
        let mut view = self.bucket_mut(kind).remove(&id)?;
        view.attached = false;
        Some(view)
    }

    pub fn get(&self, kind: RealizedViewType, id: NativeViewId) -> Option<&RealizedView> {
        self.bucket(kind).get(&id)
    }

    /// Every cached view of `kind`
    pub fn views_mut(&mut self, kind: RealizedViewType) -> impl Iterator<Item = &mut RealizedView> {
        self.bucket_mut(kind).values_mut()
    }

    pub fn len(&self, kind: RealizedViewType) -> usize {
        self.bucket(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_views.is_empty() && self.drop_down_views.is_empty()
    }

    /// The native tree removed a container from its parent but kept it alive
    pub fn orphan(&mut self, id: NativeViewId) {
        if let Some(&kind) = self.handles.get(id) {
            if let Some(view) = self.bucket_mut(kind).get_mut(&id) {
                view.attached = false;
            }
        }
    }

    /// The native container was destroyed; drop its entry and handle
    pub fn release(&mut self, id: NativeViewId) -> bool {
        match self.handles.remove(id) {
            Some(kind) => {
                self.evict(kind, id);
                true
            }
            None => false,
        }
    }

    /// Detach and drop every view of `kind`
    pub fn clear(&mut self, kind: RealizedViewType) -> usize {
        let ids: Vec<NativeViewId> = self.bucket(kind).keys().copied().collect();
        for id in &ids {
            self.release(*id);
        }
        if !ids.is_empty() {
            tracing::debug!("cleared {} {:?} view(s)", ids.len(), kind);
        }
        ids.len()
    }

    /// Detach and drop every view in both buckets
    pub fn clear_all(&mut self) -> usize {
        self.clear(RealizedViewType::ItemView) + self.clear(RealizedViewType::DropDownView)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::realized::RealizedViewType::{DropDownView, ItemView};

    #[test]
    fn test_reuses_cached_convert_view() {
        let mut cache = ViewRecyclingCache::new();
        let id = cache.realize(ItemView, None).id;
        cache.realize(ItemView, Some(id)).label.text = "Item 3".into();

        assert_eq!(cache.len(ItemView), 1);
        assert_eq!(cache.get(ItemView, id).map(|v| v.label.text.as_str()), Some("Item 3"));
    }

    #[test]
    fn test_buckets_are_independent() {
        let mut cache = ViewRecyclingCache::new();
        let item = cache.realize(ItemView, None).id;
        // A handle from the other bucket is not reused
        let popup = cache.realize(DropDownView, Some(item)).id;
        assert_ne!(item, popup);
        assert_eq!(cache.len(ItemView), 1);
        assert_eq!(cache.len(DropDownView), 1);

        assert_eq!(cache.clear(DropDownView), 1);
        assert_eq!(cache.len(ItemView), 1);
        assert!(cache.get(DropDownView, popup).is_none());
    }

    #[test]
    fn test_parentless_view_is_reattached() {
        let mut cache = ViewRecyclingCache::new();
        let id = cache.realize(DropDownView, None).id;
        cache.orphan(id);
        assert_eq!(cache.get(DropDownView, id).map(|v| v.attached), Some(false));

        let view = cache.realize(DropDownView, Some(id));
        assert_eq!(view.id, id);
        assert!(view.attached);
    }

    #[test]
    fn test_released_handle_never_resolves() {
        let mut cache = ViewRecyclingCache::new();
        let id = cache.realize(ItemView, None).id;
        assert!(cache.release(id));
        assert!(!cache.release(id));

        let fresh = cache.realize(ItemView, Some(id)).id;
        assert_ne!(fresh, id);
        assert_eq!(cache.len(ItemView), 1);
    }

    #[test]
    fn test_clear_all() {
        let mut cache = ViewRecyclingCache::new();
        for _ in 0..3 {
            cache.realize(ItemView, None);
            cache.realize(DropDownView, None);
        }
        assert_eq!(cache.clear_all(), 6);
        assert!(cache.is_empty());
    }
}
