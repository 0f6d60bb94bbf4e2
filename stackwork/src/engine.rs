//! Layout orchestration.
//!
//! `LayoutEngine` owns one element tree and drives a full layout run per
//! width: one measure pass with unbounded height, then one layout pass at
//! the measured height, consulting the frame cache when the host supplies
//! a cache key.

use crate::action::ActionContext;
use crate::config::LayoutConfig;
use crate::definition::BoundValues;
use crate::layout::{Element, ElementKind, FrameList, LayoutCache, LayoutContext};
use crate::primitives::{Rect, Size};
use crate::text_engine::{MonospaceMeasurer, TextMeasurer};

/// Drives measure and layout passes over one element tree.
pub struct LayoutEngine {
    root: Element,
    cache: LayoutCache,
    config: LayoutConfig,
    measurer: Box<dyn TextMeasurer + Send>,
    /// Leaf count of `root`, fixed for the tree's lifetime.
    leaf_count: usize,
}

impl std::fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("leaf_count", &self.leaf_count)
            .field("cached", &self.cache.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LayoutEngine {
    /// Create an engine using the monospace measurer described by `config`.
    pub fn new(root: Element, config: LayoutConfig) -> Self {
        let measurer = MonospaceMeasurer::from_config(&config);
        Self::with_measurer(root, config, measurer)
    }

    /// Create an engine with a custom text measurer.
    pub fn with_measurer(
        root: Element,
        config: LayoutConfig,
        measurer: impl TextMeasurer + Send + 'static,
    ) -> Self {
        let leaf_count = root.leaf_count();
        Self {
            root,
            cache: LayoutCache::new(config.cache_capacity),
            config,
            measurer: Box::new(measurer),
            leaf_count,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn cache(&self) -> &LayoutCache {
        &self.cache
    }

    /// Mutable access for hosts that seed or prune the cache themselves.
    /// Entries that do not match this tree's leaf count are dropped on lookup.
    pub fn cache_mut(&mut self) -> &mut LayoutCache {
        &mut self.cache
    }

    /// Frame of the root, excluding its margin.
    pub fn root_frame(&self) -> Rect {
        self.root.frame()
    }

    /// Leaf frames in pre-order.
    pub fn leaf_frames(&self) -> Vec<Rect> {
        self.root.leaf_frames()
    }

    /// Replace the tree. Cached frames belong to the old tree and are dropped.
    pub fn rebuild(&mut self, root: Element) {
        self.leaf_count = root.leaf_count();
        self.root = root;
        let dropped = self.cache.len();
        self.cache.clear();
        tracing::debug!(leaves = self.leaf_count, dropped, "rebuilt layout tree");
    }

    /// Drop cached frames for `key` at every width.
    pub fn invalidate(&mut self, key: &str) {
        let removed = self.cache.invalidate(key);
        tracing::debug!(key, removed, "invalidated cached layout");
    }

    /// Apply bound values to the tree's leaves.
    ///
    /// Cached frames are not touched; invalidate the key of the model whose
    /// values changed.
    pub fn bind(&mut self, values: &BoundValues) {
        self.root.bind(values);
    }

    /// Lay out the tree at `width` and return the root's occupied rect
    /// (including margin).
    ///
    /// With a `key`, a cached frame list for `(width, key)` is applied
    /// instead of running the passes, and a fresh run is stored.
    pub fn layout(&mut self, width: f32, key: Option<&str>) -> Rect {
        let width = if width.is_finite() && width > 0.0 {
            width
        } else {
            if width != 0.0 {
                tracing::warn!(width, "layout width is not a finite positive number, using 0");
            }
            0.0
        };

        if let Some(key) = key {
            if let Some(root) = self.apply_cached(width, key) {
                return root;
            }
        }

        let occupied = {
            let mut ctx = LayoutContext::new(&*self.measurer);
            let measured = self.root.measure(&mut ctx, Size::new(width, f32::INFINITY));
            self.root
                .layout(&mut ctx, Rect::new(0.0, 0.0, width, measured.height))
        };

        if let Some(key) = key {
            let frames = FrameList::new(occupied, self.root.leaf_frames());
            self.cache.store(width, key, frames);
            tracing::debug!(key, width, "stored layout");
        }
        occupied
    }

    /// Apply cached frames if a consistent entry exists.
    fn apply_cached(&mut self, width: f32, key: &str) -> Option<Rect> {
        let expected = 1 + self.leaf_count;
        let frames = self.cache.lookup(width, key)?.clone();
        if frames.len() != expected {
            tracing::debug!(
                key,
                width,
                cached = frames.len(),
                expected,
                "dropping stale cached layout"
            );
            self.cache.remove(width, key);
            return None;
        }
        tracing::debug!(key, width, "layout cache hit");
        self.apply(&frames);
        Some(frames.root())
    }

    /// Apply a frame list to the tree.
    ///
    /// The root's frame is recovered by removing its margin from the
    /// occupied rect; containers other than the root keep their last frame.
    fn apply(&mut self, frames: &FrameList) {
        let root = frames.root().inset(&self.root.margin_edges());
        self.root.set_frame(root);
        let mut leaves = frames.leaves().iter().copied();
        self.root.traverse_mut(&mut |e| {
            if e.is_leaf() {
                if let Some(frame) = leaves.next() {
                    e.set_frame(frame);
                }
            }
        });
    }

    /// Dispatch the action of the leaf at `leaf_index` (pre-order).
    ///
    /// Returns `false` when the leaf does not exist, is not a button, has no
    /// action, or is hidden.
    pub fn dispatch_action(&self, leaf_index: usize, ctx: &mut dyn ActionContext) -> bool {
        let mut index = 0;
        let mut target = None;
        self.root.traverse(&mut |e| {
            if e.is_leaf() {
                if index == leaf_index {
                    target = Some(e);
                }
                index += 1;
            }
        });

        let Some(leaf) = target else {
            return false;
        };
        match leaf.kind() {
            ElementKind::Button(button) if leaf.visible() => match button.action.as_deref() {
                Some(action) => {
                    tracing::debug!(action, leaf_index, "dispatching action");
                    ctx.perform(action, leaf.frame());
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::RecordedActions;
    use crate::layout::{ButtonElement, Stack, TextElement, ViewElement};
    use crate::primitives::Edges;

    fn config() -> LayoutConfig {
        LayoutConfig {
            char_width: 10.0,
            line_height: 18.0,
            ..LayoutConfig::default()
        }
    }

    fn tree() -> Element {
        Element::from(
            Stack::column()
                .spacing(4.0)
                .push(TextElement::new("hello world"))
                .push(ButtonElement::new("Go").size(40.0, 20.0).action("go"))
                .push(ViewElement::new(10.0, 10.0)),
        )
        .margin(Edges::all(2.0))
    }

    #[test]
    fn test_layout_uses_measured_height() {
        let mut engine = LayoutEngine::new(tree(), config());
        let occupied = engine.layout(60.0, None);
        // text wraps to 2 lines at 56px: 36 + 4 + 20 + 4 + 10 = 74
        assert_eq!(engine.root_frame(), Rect::new(2.0, 2.0, 56.0, 74.0));
        assert_eq!(occupied, Rect::new(0.0, 0.0, 60.0, 78.0));
        assert!(engine.cache().is_empty());
    }

    #[test]
    fn test_cache_hit_reapplies_frames() {
        let mut engine = LayoutEngine::new(tree(), config());
        let first = engine.layout(60.0, Some("a"));
        let fresh = engine.leaf_frames();
        assert_eq!(engine.cache().len(), 1);

        engine.layout(200.0, None);
        assert_ne!(engine.leaf_frames(), fresh);

        let again = engine.layout(60.0, Some("a"));
        assert_eq!(again, first);
        assert_eq!(engine.leaf_frames(), fresh);
        assert_eq!(engine.root_frame(), Rect::new(2.0, 2.0, 56.0, 74.0));
    }

    #[test]
    fn test_rebuild_clears_cache() {
        let mut engine = LayoutEngine::new(tree(), config());
        engine.layout(60.0, Some("a"));
        engine.rebuild(Element::from(ViewElement::new(5.0, 5.0)));
        assert!(engine.cache().is_empty());
        assert_eq!(engine.layout(60.0, Some("a")), Rect::new(0.0, 0.0, 5.0, 5.0));
    }

    #[test]
    fn test_invalidate_key() {
        let mut engine = LayoutEngine::new(tree(), config());
        engine.layout(60.0, Some("a"));
        engine.layout(80.0, Some("a"));
        engine.layout(60.0, Some("b"));
        engine.invalidate("a");
        assert_eq!(engine.cache().len(), 1);
    }

    #[test]
    fn test_invalid_width_is_sanitized() {
        let mut engine = LayoutEngine::new(tree(), config());
        let occupied = engine.layout(f32::NAN, None);
        assert_eq!(occupied.width, 0.0);
        assert!(engine.leaf_frames().iter().all(|f| f.width.is_finite()));
    }

    #[test]
    fn test_dispatch_action() {
        let mut engine = LayoutEngine::new(tree(), config());
        engine.layout(60.0, None);

        let mut ctx = RecordedActions::default();
        assert!(engine.dispatch_action(1, &mut ctx));
        assert_eq!(ctx.performed.len(), 1);
        assert_eq!(ctx.performed[0].0, "go");
        assert_eq!(ctx.performed[0].1, engine.leaf_frames()[1]);

        assert!(!engine.dispatch_action(0, &mut ctx));
        assert!(!engine.dispatch_action(9, &mut ctx));
    }
}
