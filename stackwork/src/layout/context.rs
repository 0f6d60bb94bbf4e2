//! Layout context threaded through measure and layout passes.
//!
//! The LayoutContext carries:
//! - The text measurer used by text and button leaves
//! - Depth and current container name for trace logging
//!
//! It holds no layout results; those live on the elements themselves.

use crate::primitives::{Rect, Size};
use crate::text_engine::TextMeasurer;

use super::length::SizeRange;

/// Context passed down the element tree during a pass.
pub struct LayoutContext<'a> {
    measurer: &'a dyn TextMeasurer,
    depth: u32,
    current_name: &'static str,
    name_stack: Vec<&'static str>,
}

impl<'a> LayoutContext<'a> {
    pub fn new(measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            measurer,
            depth: 0,
            current_name: "Root",
            name_stack: Vec::with_capacity(16),
        }
    }

    /// The text measurer for this pass.
    #[inline]
    pub fn measurer(&self) -> &'a dyn TextMeasurer {
        self.measurer
    }

    /// Enter a container scope.
    pub fn enter(&mut self, name: &'static str) {
        self.name_stack.push(self.current_name);
        self.current_name = name;
        self.depth += 1;
    }

    /// Exit the current scope.
    pub fn exit(&mut self) {
        self.current_name = self.name_stack.pop().unwrap_or("Root");
        self.depth = self.depth.saturating_sub(1);
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Trace a measure result.
    pub fn log_measure(&self, available: Size, result: SizeRange) {
        tracing::trace!(
            depth = self.depth,
            element = self.current_name,
            "measure {{w:{:.1}, h:{:.1}}} -> {{min:{:.1}, max:{:.1}, h:{:.1}}}",
            available.width,
            available.height,
            result.min_width,
            result.max_width,
            result.height,
        );
    }

    /// Trace a layout result.
    pub fn log_layout(&self, bounds: Rect, occupied: Rect) {
        tracing::trace!(
            depth = self.depth,
            element = self.current_name,
            "layout {{x:{:.1}, y:{:.1}, w:{:.1}, h:{:.1}}} -> {{w:{:.1}, h:{:.1}}}",
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            occupied.width,
            occupied.height,
        );
    }
}
