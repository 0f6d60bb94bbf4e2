//! Single-child wrappers: padding and anchor.

use crate::primitives::{Edges, Rect, Size};

use super::context::LayoutContext;
use super::element::Element;
use super::length::{Anchor, SizeRange};

// =========================================================================
// PaddingElement
// =========================================================================

/// Insets around a single child.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddingElement {
    pub insets: Edges,
    pub(crate) child: Box<Element>,
}

impl PaddingElement {
    pub fn new(insets: Edges, child: impl Into<Element>) -> Self {
        Self {
            insets: insets.sanitized(),
            child: Box::new(child.into()),
        }
    }

    pub fn child(&self) -> &Element {
        &self.child
    }

    pub(crate) fn measure(&self, ctx: &mut LayoutContext, bounds: Size) -> SizeRange {
        self.child
            .measure(ctx, bounds.deflate(&self.insets))
            .expand(self.insets.horizontal(), self.insets.vertical())
    }

    pub(crate) fn layout(&mut self, ctx: &mut LayoutContext, bounds: Rect) -> Rect {
        self.child
            .layout(ctx, bounds.inset(&self.insets))
            .outset(&self.insets)
    }
}

// =========================================================================
// AnchorElement
// =========================================================================

/// Places an undersized child inside larger bounds without stretching it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorElement {
    pub anchor: Anchor,
    pub(crate) child: Box<Element>,
}

impl AnchorElement {
    pub fn new(anchor: Anchor, child: impl Into<Element>) -> Self {
        Self {
            anchor,
            child: Box::new(child.into()),
        }
    }

    pub fn child(&self) -> &Element {
        &self.child
    }

    /// The child's natural size, measured without constraints.
    pub(crate) fn measure(&self, ctx: &mut LayoutContext) -> SizeRange {
        self.child.measure(ctx, Size::UNBOUNDED)
    }

    /// Occupies all of `bounds`; the child keeps its measured size.
    pub(crate) fn layout(&mut self, ctx: &mut LayoutContext, bounds: Rect) -> Rect {
        let measured = self.child.measure(ctx, Size::UNBOUNDED).max_size();
        let placed = self.anchor.place(measured, bounds);
        self.child.layout(ctx, placed);
        bounds
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::elements::{TextElement, ViewElement};
    use crate::text_engine::MonospaceMeasurer;

    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer::new(10.0, 18.0)
    }

    #[test]
    fn test_padding_measure_adds_insets() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let p = PaddingElement::new(Edges::new(1.0, 2.0, 3.0, 4.0), ViewElement::new(10.0, 10.0));
        assert_eq!(p.measure(&mut ctx, Size::new(100.0, 100.0)), SizeRange::new(16.0, 16.0, 14.0));
    }

    #[test]
    fn test_padding_measure_rewraps_text_inside_insets() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        // 70px available, 20px of insets: "hello world" wraps at 50px
        let p = PaddingElement::new(Edges::symmetric(10.0, 0.0), TextElement::new("hello world"));
        let range = p.measure(&mut ctx, Size::new(70.0, f32::INFINITY));
        assert_eq!(range.max_width, 70.0);
        assert_eq!(range.height, 36.0);
    }

    #[test]
    fn test_padding_layout_insets_child() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let mut p = PaddingElement::new(Edges::all(5.0), ViewElement::new(10.0, 10.0));
        let occupied = p.layout(&mut ctx, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(p.child().frame(), Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(occupied, Rect::new(0.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_anchor_centers_without_stretching() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let mut a = AnchorElement::new(Anchor::Center, ViewElement::new(20.0, 10.0));
        let occupied = a.layout(&mut ctx, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(occupied, Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(a.child().frame(), Rect::new(40.0, 20.0, 20.0, 10.0));
    }

    #[test]
    fn test_anchor_bottom_right() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let mut a = AnchorElement::new(Anchor::BottomRight, ViewElement::new(20.0, 10.0));
        a.layout(&mut ctx, Rect::new(10.0, 10.0, 100.0, 50.0));
        assert_eq!(a.child().frame(), Rect::new(90.0, 50.0, 20.0, 10.0));
    }

    #[test]
    fn test_anchor_measures_child_unconstrained() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let a = AnchorElement::new(Anchor::TopLeft, TextElement::new("hello world"));
        assert_eq!(a.measure(&mut ctx).max_width, 110.0);
    }
}
