use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::graph::NodeId;
use crate::route::SingleRoute;

/// Directed pair of end nodes identifying one waypoint leg.
///
/// `(a, b)` and `(b, a)` are distinct keys: under an asymmetric cost model the
/// best route differs by direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentKey {
    pub from: NodeId,
    pub to: NodeId,
}

impl SegmentKey {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

/// Memo of computed legs, including legs found to be unreachable.
pub struct SegmentCache {
    entries: LruCache<SegmentKey, Option<SingleRoute>>,
}

impl SegmentCache {
    /// Cache that never evicts.
    pub fn unbounded() -> Self {
        Self {
            entries: LruCache::unbounded(),
        }
    }

    /// Cache that evicts the least recently used leg beyond `capacity` entries.
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Bounded when `max_entries` is a positive number, unbounded otherwise.
    pub fn with_max_entries(max_entries: Option<usize>) -> Self {
        match max_entries.and_then(NonZeroUsize::new) {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }

    /// Cached outcome for `key`; `Some(None)` means the leg is known to be unreachable.
    pub fn get(&mut self, key: &SegmentKey) -> Option<&Option<SingleRoute>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &SegmentKey) -> bool {
        self.entries.contains(key)
    }

    pub fn insert(&mut self, key: SegmentKey, route: Option<SingleRoute>) {
        self.entries.put(key, route);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for SegmentCache {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl fmt::Debug for SegmentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentCache")
            .field("len", &self.entries.len())
            .field("cap", &self.entries.cap())
            .finish()
    }
}
