//! Readiness tracking for record images.
//!
//! Fetching and decoding belong to the host. The engine only learns that the
//! image for a record became ready (or failed) and repaints when the
//! generation counter moves.

use crate::data_types::RecordId;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageState {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Default)]
pub struct ImageCache {
    states: RwLock<HashMap<RecordId, ImageState>>,
    generation: AtomicU64,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a fetch as in flight. Already settled entries are left alone.
    pub fn mark_pending(&self, id: &RecordId) {
        self.states
            .write()
            .entry(id.clone())
            .or_insert(ImageState::Pending);
    }

    /// Drops every entry whose id fails `keep`, e.g. records gone after a reload.
    pub fn retain(&self, keep: impl Fn(&RecordId) -> bool) {
        let mut states = self.states.write();
        let before = states.len();
        states.retain(|id, _| keep(id));
        if states.len() != before {
            tracing::trace!(dropped = before - states.len(), "pruned image states");
        }
    }

    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }

    pub fn mark_ready(&self, id: &RecordId) {
        self.settle(id, ImageState::Ready);
    }

    pub fn mark_failed(&self, id: &RecordId) {
        self.settle(id, ImageState::Failed);
    }

    fn settle(&self, id: &RecordId, state: ImageState) {
        let previous = self.states.write().insert(id.clone(), state);
        if previous != Some(state) {
            self.generation.fetch_add(1, Ordering::Release);
            tracing::trace!(%id, ?state, "image settled");
        }
    }

    pub fn state(&self, id: &RecordId) -> Option<ImageState> {
        self.states.read().get(id).copied()
    }

    pub fn is_ready(&self, id: &RecordId) -> bool {
        self.state(id) == Some(ImageState::Ready)
    }

    /// Bumped on every completed load; a change means a repaint is due.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_moves_only_on_completion() {
        let cache = ImageCache::new();
        let id = RecordId::new("evt_0001");
        cache.mark_pending(&id);
        assert_eq!(cache.generation(), 0);
        cache.mark_ready(&id);
        assert_eq!(cache.generation(), 1);
        cache.mark_ready(&id);
        assert_eq!(cache.generation(), 1);
        assert!(cache.is_ready(&id));
    }

    #[test]
    fn retain_drops_stale_ids_and_keeps_settled_ones() {
        let cache = ImageCache::new();
        let (kept, gone) = (RecordId::new("evt_0001"), RecordId::new("evt_0002"));
        cache.mark_ready(&kept);
        cache.mark_pending(&gone);
        cache.retain(|id| *id == kept);
        assert_eq!(cache.len(), 1);
        assert!(cache.is_ready(&kept));
        assert_eq!(cache.state(&gone), None);
    }

    #[test]
    fn failed_images_are_not_ready() {
        let cache = ImageCache::new();
        let id = RecordId::new("evt_0002");
        cache.mark_failed(&id);
        assert!(!cache.is_ready(&id));
        assert_eq!(cache.state(&id), Some(ImageState::Failed));
    }
}
