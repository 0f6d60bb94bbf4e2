//! Frame cache for memoizing whole-tree layouts.
//!
//! The cache stores (width, key) -> FrameList mappings. The key is chosen
//! by the host and identifies the content that was laid out (for example a
//! message id); the width is the only constraint a layout depends on. Each
//! width gets its own LRU, so a burst of layouts at one width cannot evict
//! entries computed for another.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::primitives::Rect;

/// Frames from one layout run.
///
/// Entry 0 is the root's occupied rect (including its margin); the rest are
/// leaf frames in pre-order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameList(Vec<Rect>);

impl FrameList {
    pub fn new(root: Rect, leaves: impl IntoIterator<Item = Rect>) -> Self {
        let mut frames = vec![root];
        frames.extend(leaves);
        Self(frames)
    }

    /// The root's occupied rect.
    pub fn root(&self) -> Rect {
        self.0.first().copied().unwrap_or(Rect::ZERO)
    }

    /// Leaf frames in pre-order.
    pub fn leaves(&self) -> &[Rect] {
        self.0.get(1..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Rect>> for FrameList {
    fn from(frames: Vec<Rect>) -> Self {
        Self(frames)
    }
}

/// Bit pattern of a width, with `-0.0` folded onto `0.0`.
#[inline]
fn width_key(width: f32) -> u32 {
    if width == 0.0 { 0 } else { width.to_bits() }
}

/// A persistent cache of layout results, retained across layout runs.
#[derive(Debug)]
pub struct LayoutCache {
    /// One LRU per width.
    entries: HashMap<u32, LruCache<String, FrameList>>,
    /// Capacity of each per-width LRU.
    capacity: NonZeroUsize,

    /// Stats for debugging
    #[cfg(debug_assertions)]
    pub hits: u64,
    #[cfg(debug_assertions)]
    pub misses: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(256)
    }
}

impl LayoutCache {
    /// Create an empty cache holding up to `capacity` keys per width.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            #[cfg(debug_assertions)]
            hits: 0,
            #[cfg(debug_assertions)]
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Look up cached frames, marking the entry as recently used.
    pub fn lookup(&mut self, width: f32, key: &str) -> Option<&FrameList> {
        let found = self
            .entries
            .get_mut(&width_key(width))
            .and_then(|lru| lru.get(key));
        #[cfg(debug_assertions)]
        {
            if found.is_some() {
                self.hits += 1;
            } else {
                self.misses += 1;
            }
        }
        found
    }

    /// Store frames for `(width, key)`, replacing any previous entry.
    pub fn store(&mut self, width: f32, key: impl Into<String>, frames: FrameList) {
        let capacity = self.capacity;
        self.entries
            .entry(width_key(width))
            .or_insert_with(|| LruCache::new(capacity))
            .put(key.into(), frames);
    }

    /// Drop the entry for `(width, key)`.
    pub fn remove(&mut self, width: f32, key: &str) -> Option<FrameList> {
        let bucket = width_key(width);
        let lru = self.entries.get_mut(&bucket)?;
        let removed = lru.pop(key);
        if lru.is_empty() {
            self.entries.remove(&bucket);
        }
        removed
    }

    /// Drop every entry for `key`, at all widths.
    pub fn invalidate(&mut self, key: &str) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, lru| {
            if lru.pop(key).is_some() {
                removed += 1;
            }
            !lru.is_empty()
        });
        removed
    }

    /// Get the number of cached entries across all widths.
    pub fn len(&self) -> usize {
        self.entries.values().map(LruCache::len).sum()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct widths with cached entries.
    pub fn widths(&self) -> usize {
        self.entries.len()
    }

    /// Clear all cached entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get cache stats (debug builds only).
    #[cfg(debug_assertions)]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Reset stats (debug builds only).
    #[cfg(debug_assertions)]
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }
}

// =========================================================================
// Tests
// =========================================================================
