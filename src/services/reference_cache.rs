//! Read-mostly cache of reference skeletons keyed by sign id
//!
//! Populated by infrequent explicit load calls and read on every frame,
//! so entries sit behind a read/write lock: a reader never observes a
//! partially written skeleton. The cache is owned by the coordinator and
//! cleared at session end; there is no cross-session state.

use crate::domain::{HandSkeleton, LandmarkRecord, SignId};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

/// Sign id → reference skeleton cache
#[derive(Debug, Default)]
pub struct ReferenceCache {
    entries: RwLock<FxHashMap<SignId, HandSkeleton>>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self { entries: RwLock::new(FxHashMap::default()) }
    }

    /// Load a reference payload for a sign
    ///
    /// Returns false without touching the cache when the payload is
    /// structurally malformed (record count != 21). This is the one
    /// load-time error surfaced distinctly; it never reaches the
    /// per-frame path.
    pub fn load(&self, sign: SignId, records: &[LandmarkRecord]) -> bool {
        match HandSkeleton::from_records(records) {
            Some(skeleton) => {
                debug!(sign = %sign, "reference_loaded");
                self.entries.write().insert(sign, skeleton);
                true
            }
            None => {
                warn!(
                    sign = %sign,
                    record_count = %records.len(),
                    "reference_payload_malformed"
                );
                false
            }
        }
    }

    /// Cloned reference for a sign, if one is loaded
    pub fn get(&self, sign: &SignId) -> Option<HandSkeleton> {
        self.entries.read().get(sign).cloned()
    }

    pub fn contains(&self, sign: &SignId) -> bool {
        self.entries.read().contains_key(sign)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all references at session end
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HAND_LANDMARK_COUNT;

    fn records(n: usize) -> Vec<LandmarkRecord> {
        vec![LandmarkRecord { x: 0.5, y: 0.5, z: 0.0 }; n]
    }

    #[test]
    fn test_load_and_get() {
        let cache = ReferenceCache::new();
        let sign = SignId::from("open-hand");

        assert!(cache.load(sign.clone(), &records(HAND_LANDMARK_COUNT)));
        assert!(cache.contains(&sign));
        assert!(cache.get(&sign).unwrap().is_valid());
    }

    #[test]
    fn test_malformed_payload_rejected() {
        let cache = ReferenceCache::new();
        let sign = SignId::from("pinch");

        assert!(!cache.load(sign.clone(), &records(20)));
        assert!(!cache.contains(&sign));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reload_replaces_entry() {
        let cache = ReferenceCache::new();
        let sign = SignId::from("closed-ring");

        let mut first = records(HAND_LANDMARK_COUNT);
        first[0].x = 0.1;
        let mut second = records(HAND_LANDMARK_COUNT);
        second[0].x = 0.9;

        assert!(cache.load(sign.clone(), &first));
        assert!(cache.load(sign.clone(), &second));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&sign).unwrap().points[0].x, 0.9);
    }

    #[test]
    fn test_clear() {
        let cache = ReferenceCache::new();
        cache.load(SignId::from("a"), &records(HAND_LANDMARK_COUNT));
        cache.load(SignId::from("b"), &records(HAND_LANDMARK_COUNT));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }
}
