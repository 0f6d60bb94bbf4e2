//! Layered - children drawn on top of each other in the same bounds.

use crate::primitives::{Rect, Size};

use super::context::LayoutContext;
use super::element::Element;
use super::length::SizeRange;

/// Overlapping children sharing one set of bounds.
///
/// Later children are drawn above earlier ones; the host decides paint
/// order, layout only hands every child the full bounds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layered {
    children: Vec<Element>,
}

impl Layered {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add any child element.
    pub fn push(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    /// Per-field maximum over visible children.
    pub(crate) fn measure(&self, ctx: &mut LayoutContext, bounds: Size) -> SizeRange {
        self.children
            .iter()
            .filter(|c| c.visible())
            .map(|c| c.measure(ctx, bounds))
            .fold(SizeRange::ZERO, |acc, r| {
                SizeRange::new(
                    acc.min_width.max(r.min_width),
                    acc.max_width.max(r.max_width),
                    acc.height.max(r.height),
                )
            })
    }

    pub(crate) fn layout(&mut self, ctx: &mut LayoutContext, bounds: Rect) -> Rect {
        for child in &mut self.children {
            // Invisible children collapse inside Element::layout.
            child.layout(ctx, bounds);
        }
        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::elements::{TextElement, ViewElement};
    use crate::text_engine::MonospaceMeasurer;

    #[test]
    fn test_measure_takes_largest_child() {
        let m = MonospaceMeasurer::new(10.0, 18.0);
        let mut ctx = LayoutContext::new(&m);
        let layered = Layered::new()
            .push(ViewElement::new(40.0, 10.0))
            .push(TextElement::new("hello world"))
            .push(ViewElement::new(20.0, 30.0));
        let range = layered.measure(&mut ctx, Size::new(500.0, 500.0));
        assert_eq!(range, SizeRange::new(50.0, 110.0, 30.0));
    }

    #[test]
    fn test_children_share_bounds() {
        let m = MonospaceMeasurer::new(10.0, 18.0);
        let mut ctx = LayoutContext::new(&m);
        let mut root = Element::from(
            Layered::new()
                .push(ViewElement::new(40.0, 10.0))
                .push(ViewElement::new(20.0, 30.0)),
        );
        let occupied = root.layout(&mut ctx, Rect::new(5.0, 5.0, 100.0, 80.0));
        assert_eq!(occupied, Rect::new(5.0, 5.0, 100.0, 80.0));
        let frames = root.leaf_frames();
        assert_eq!(frames[0], Rect::new(5.0, 5.0, 40.0, 10.0));
        assert_eq!(frames[1], Rect::new(5.0, 5.0, 20.0, 30.0));
    }

    #[test]
    fn test_hidden_children_do_not_count() {
        let m = MonospaceMeasurer::new(10.0, 18.0);
        let mut ctx = LayoutContext::new(&m);
        let layered = Layered::new()
            .push(ViewElement::new(10.0, 10.0))
            .push(TextElement::new(""));
        let range = layered.measure(&mut ctx, Size::new(100.0, 100.0));
        assert_eq!(range, SizeRange::new(10.0, 10.0, 10.0));
    }
}
