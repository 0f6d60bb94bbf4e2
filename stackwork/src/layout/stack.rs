//! Stack - linear layout container.
//!
//! Children flow along one main axis (left to right, or top to bottom).
//! Horizontal and vertical stacks share one algorithm, parameterized by
//! `Direction`:
//!
//! 1. Pre-measure every visible child against the available space.
//! 2. Negotiate main-axis sizes (`flex::distribute`).
//! 3. Re-measure each child at the size it was given, since text rewraps.
//! 4. Walk a cursor along the main axis and place children, aligning each
//!    on the cross axis with the stack's `across` policy.

use crate::primitives::{Rect, Size};

use super::context::LayoutContext;
use super::element::Element;
use super::flex::{Branch, Distribution, MainRange, distribute};
use super::length::{Alignment, Direction, SizeRange};

// =========================================================================
// Stack
// =========================================================================

/// A linear layout container.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    direction: Direction,
    /// Main axis distribution policy.
    along: Alignment,
    /// Cross axis alignment policy.
    across: Alignment,
    /// Spacing between visible children.
    spacing: f32,
    children: Vec<Element>,
}

/// Outcome of negotiating sizes for one available space.
#[derive(Debug)]
struct Negotiation {
    /// Per child (visible or not); `None` for invisible children.
    slots: Vec<Option<Slot>>,
    distribution: Distribution,
    spacing_total: f32,
    /// Largest cross extent after re-measuring.
    max_cross: f32,
    /// Largest re-measured `min_width` (cross minimum of a vertical stack).
    max_cross_min: f32,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    main: f32,
    cross: f32,
}

impl Stack {
    /// Create a new stack flowing in `direction`.
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            along: Alignment::Leading,
            across: Alignment::Leading,
            spacing: 0.0,
            children: Vec::new(),
        }
    }

    /// Horizontal stack.
    pub fn row() -> Self {
        Self::new(Direction::Horizontal)
    }

    /// Vertical stack.
    pub fn column() -> Self {
        Self::new(Direction::Vertical)
    }

    /// Set main axis distribution.
    pub fn along(mut self, alignment: Alignment) -> Self {
        self.along = alignment;
        self
    }

    /// Set cross axis alignment.
    pub fn across(mut self, alignment: Alignment) -> Self {
        self.across = alignment;
        self
    }

    /// Set spacing between children.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = if spacing.is_finite() { spacing.max(0.0) } else { 0.0 };
        self
    }

    /// Add any child element.
    pub fn push(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    /// The child's alignment along this stack's main axis.
    fn main_alignment(&self, child: &Element) -> Alignment {
        match self.direction {
            Direction::Horizontal => child.horizontal_alignment(),
            Direction::Vertical => child.vertical_alignment(),
        }
    }

    /// Run passes A and B for the given available space.
    fn negotiate(&self, ctx: &mut LayoutContext, available: Size) -> Negotiation {
        let dir = self.direction;
        let (avail_main, avail_cross) = dir.split(available);

        let visible: Vec<bool> = self.children.iter().map(Element::visible).collect();
        let visible_count = visible.iter().filter(|v| **v).count();
        let spacing_total = self.spacing * visible_count.saturating_sub(1) as f32;

        // Pass A: pre-measure against the space left after spacing.
        let pre_bounds = dir.join((avail_main - spacing_total).max(0.0), avail_cross);
        let inputs: Vec<MainRange> = self
            .children
            .iter()
            .zip(&visible)
            .filter(|(_, v)| **v)
            .map(|(child, _)| {
                let range = child.measure(ctx, pre_bounds);
                let (min, max, _) = dir.main_range(&range);
                MainRange::new(min, max, self.main_alignment(child).is_fill())
            })
            .collect();

        // Pass B: resolve main sizes.
        let distribution = distribute(&inputs, avail_main, spacing_total, self.along);
        tracing::trace!(
            depth = ctx.depth(),
            ?dir,
            branch = ?distribution.branch,
            available = avail_main,
            total_min = distribution.total_min,
            total_max = distribution.total_max,
            "stack negotiated"
        );
        if distribution.branch == Branch::Shrink {
            tracing::debug!(
                available = avail_main,
                total_min = distribution.total_min,
                "stack children overflow even at minimum size"
            );
        }

        // Re-measure at the assigned main size: cross extents depend on it.
        let mut sizes = distribution.sizes.iter().copied();
        let mut max_cross = 0.0f32;
        let mut max_cross_min = 0.0f32;
        let slots = self
            .children
            .iter()
            .zip(&visible)
            .map(|(child, v)| {
                if !*v {
                    return None;
                }
                let main = sizes.next().unwrap_or(0.0);
                let range = child.measure(ctx, dir.join(main, avail_cross));
                let (_, _, cross) = dir.main_range(&range);
                max_cross = max_cross.max(cross);
                max_cross_min = max_cross_min.max(range.min_width);
                Some(Slot { main, cross })
            })
            .collect();

        Negotiation {
            slots,
            distribution,
            spacing_total,
            max_cross,
            max_cross_min,
        }
    }

    pub(crate) fn measure(&self, ctx: &mut LayoutContext, bounds: Size) -> SizeRange {
        let n = self.negotiate(ctx, bounds);
        let d = &n.distribution;
        if d.branch == Branch::Empty {
            return SizeRange::ZERO;
        }
        match self.direction {
            Direction::Horizontal => {
                let (avail_main, _) = self.direction.split(bounds);
                let max_width = if d.fills_axis { avail_main } else { d.total_max };
                SizeRange::new(d.total_min, max_width, n.max_cross)
            }
            // Natural height only. Fill children stretch in layout, against
            // the height the parent actually hands down.
            Direction::Vertical => SizeRange::new(n.max_cross_min, n.max_cross, d.total_max),
        }
    }

    /// Pass C: place children inside `bounds`.
    pub(crate) fn layout(&mut self, ctx: &mut LayoutContext, bounds: Rect) -> Rect {
        let dir = self.direction;
        let n = self.negotiate(ctx, bounds.size());
        let (main_origin, cross_origin) = match dir {
            Direction::Horizontal => (bounds.x, bounds.y),
            Direction::Vertical => (bounds.y, bounds.x),
        };
        let (main_extent, cross_available) = dir.split(bounds.size());

        if n.distribution.branch == Branch::Empty {
            for child in &mut self.children {
                child.layout(ctx, Rect::new(bounds.x, bounds.y, 0.0, 0.0));
            }
            return Rect::new(bounds.x, bounds.y, 0.0, 0.0);
        }

        let cross_extent = if self.across.is_fill() {
            cross_available
        } else {
            n.max_cross.min(cross_available)
        };

        let used = n.distribution.used(n.spacing_total);
        let bounded = main_extent.is_finite();
        let free = if bounded { (main_extent - used).max(0.0) } else { 0.0 };
        let offset = if n.distribution.fills_axis {
            0.0
        } else {
            match self.along {
                Alignment::Leading | Alignment::Fill => 0.0,
                Alignment::Center => free / 2.0,
                Alignment::Trailing => free,
            }
        };

        let mut cursor = main_origin + offset;
        let mut placed_any = false;
        for (child, slot) in self.children.iter_mut().zip(&n.slots) {
            let Some(slot) = slot else {
                let (x, y) = match dir {
                    Direction::Horizontal => (cursor, cross_origin),
                    Direction::Vertical => (cross_origin, cursor),
                };
                child.layout(ctx, Rect::new(x, y, 0.0, 0.0));
                continue;
            };
            if placed_any {
                cursor += self.spacing;
            }
            let (cross_pos, cross_len) = self.across.resolve(slot.cross, cross_origin, cross_extent);
            child.layout(ctx, dir.rect(cursor, cross_pos, slot.main, cross_len));
            cursor += slot.main;
            placed_any = true;
        }

        let stretched = n.distribution.fills_axis || self.along != Alignment::Leading;
        let occupied_main = if stretched && bounded {
            main_extent
        } else {
            used
        };
        dir.rect(main_origin, cross_origin, occupied_main, cross_extent)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::elements::{ImageElement, TextElement, ViewElement};
    use crate::text_engine::MonospaceMeasurer;

    fn measurer() -> MonospaceMeasurer {
        MonospaceMeasurer::new(10.0, 18.0)
    }

    fn layout(stack: Stack, bounds: Rect) -> Element {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let mut root = Element::from(stack);
        root.layout(&mut ctx, bounds);
        root
    }

    #[test]
    fn test_empty_stack_is_zero() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let stack = Stack::row().spacing(10.0);
        assert_eq!(stack.measure(&mut ctx, Size::new(100.0, 100.0)), SizeRange::ZERO);
    }

    #[test]
    fn test_row_measure_reports_min_and_max() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let stack = Stack::row()
            .spacing(10.0)
            .push(ViewElement::new(40.0, 20.0))
            .push(TextElement::new("hello world"));
        let range = stack.measure(&mut ctx, Size::new(500.0, f32::INFINITY));
        assert_eq!(range, SizeRange::new(100.0, 160.0, 20.0));
    }

    #[test]
    fn test_row_with_fill_reports_available_width() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let stack = Stack::row()
            .push(ViewElement::new(40.0, 20.0))
            .push(Element::from(ImageElement::new(10.0, 10.0)).fill_width());
        let range = stack.measure(&mut ctx, Size::new(300.0, f32::INFINITY));
        assert_eq!(range.max_width, 300.0);
    }

    #[test]
    fn test_column_stacks_top_to_bottom() {
        let root = layout(
            Stack::column()
                .spacing(5.0)
                .push(ViewElement::new(10.0, 20.0))
                .push(ViewElement::new(10.0, 30.0))
                .push(ViewElement::new(10.0, 40.0)),
            Rect::new(0.0, 0.0, 100.0, 1000.0),
        );
        let frames = root.leaf_frames();
        assert_eq!(frames[0].y, 0.0);
        assert_eq!(frames[1].y, 25.0);
        assert_eq!(frames[2].y, 60.0);
        assert_eq!(root.frame().height, 100.0);
    }

    #[test]
    fn test_spacing_skips_invisible_children() {
        let root = layout(
            Stack::row()
                .spacing(10.0)
                .push(ViewElement::new(20.0, 10.0))
                .push(TextElement::new(""))
                .push(ViewElement::new(20.0, 10.0)),
            Rect::new(0.0, 0.0, 200.0, 10.0),
        );
        let frames = root.leaf_frames();
        assert_eq!(frames[0].x, 0.0);
        assert_eq!(frames[1].width, 0.0);
        assert_eq!(frames[2].x, 30.0);
        assert_eq!(root.frame().width, 50.0);
    }

    #[test]
    fn test_along_center_and_trailing() {
        let centered = layout(
            Stack::row().along(Alignment::Center).push(ViewElement::new(20.0, 10.0)),
            Rect::new(0.0, 0.0, 100.0, 10.0),
        );
        assert_eq!(centered.leaf_frames()[0].x, 40.0);

        let trailing = layout(
            Stack::row().along(Alignment::Trailing).push(ViewElement::new(20.0, 10.0)),
            Rect::new(0.0, 0.0, 100.0, 10.0),
        );
        assert_eq!(trailing.leaf_frames()[0].x, 80.0);
        assert_eq!(trailing.frame().width, 100.0);
    }

    #[test]
    fn test_across_alignment() {
        let root = layout(
            Stack::row()
                .across(Alignment::Center)
                .push(ViewElement::new(20.0, 40.0))
                .push(ViewElement::new(20.0, 10.0)),
            Rect::new(0.0, 0.0, 100.0, 100.0),
        );
        let frames = root.leaf_frames();
        // Cross extent is the tallest child, not the bounds.
        assert_eq!(frames[0].y, 0.0);
        assert_eq!(frames[1].y, 15.0);
        assert_eq!(root.frame().height, 40.0);
    }

    #[test]
    fn test_across_fill_uses_bounds() {
        let root = layout(
            Stack::row()
                .across(Alignment::Fill)
                .push(Element::from(TextElement::new("hi"))),
            Rect::new(0.0, 0.0, 100.0, 60.0),
        );
        assert_eq!(root.frame().height, 60.0);
    }

    #[test]
    fn test_text_rewraps_at_assigned_width() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        // 100px: fixed 40 + text gets 60 -> "hello world" wraps onto two lines
        let stack = Stack::row()
            .push(ViewElement::new(40.0, 10.0))
            .push(TextElement::new("hello world"));
        let range = stack.measure(&mut ctx, Size::new(100.0, f32::INFINITY));
        assert_eq!(range.height, 36.0);
    }

    #[test]
    fn test_nested_stacks() {
        let root = layout(
            Stack::column()
                .spacing(4.0)
                .push(
                    Stack::row()
                        .spacing(2.0)
                        .push(ViewElement::new(10.0, 10.0))
                        .push(ViewElement::new(10.0, 10.0)),
                )
                .push(ViewElement::new(30.0, 5.0)),
            Rect::new(10.0, 20.0, 100.0, 100.0),
        );
        let frames = root.leaf_frames();
        assert_eq!(frames[0], Rect::new(10.0, 20.0, 10.0, 10.0));
        assert_eq!(frames[1], Rect::new(22.0, 20.0, 10.0, 10.0));
        assert_eq!(frames[2], Rect::new(10.0, 34.0, 30.0, 5.0));
    }

    #[test]
    fn test_column_with_fill_reports_natural_height() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let stack = Stack::column()
            .spacing(4.0)
            .push(Element::from(ViewElement::new(10.0, 20.0)).fill_height())
            .push(ViewElement::new(10.0, 6.0));
        // Same answer whether or not the bounds leave room to stretch.
        let tall = stack.measure(&mut ctx, Size::new(100.0, 500.0));
        let open = stack.measure(&mut ctx, Size::new(100.0, f32::INFINITY));
        assert_eq!(tall.height, 30.0);
        assert_eq!(open.height, 30.0);
    }

    #[test]
    fn test_column_fill_child_stretches_in_layout() {
        let root = layout(
            Stack::column()
                .push(
                    Stack::column().push(Element::from(ViewElement::new(10.0, 20.0)).fill_height()),
                )
                .push(ViewElement::new(10.0, 30.0)),
            Rect::new(0.0, 0.0, 100.0, 80.0),
        );
        let frames = root.leaf_frames();
        assert_eq!(frames[0], Rect::new(0.0, 0.0, 10.0, 20.0));
        assert_eq!(frames[1], Rect::new(0.0, 20.0, 10.0, 30.0));
    }

    #[test]
    fn test_measure_is_idempotent() {
        let m = measurer();
        let mut ctx = LayoutContext::new(&m);
        let stack = Stack::row()
            .spacing(3.0)
            .push(TextElement::new("some wrapping text"))
            .push(Element::from(ImageElement::new(30.0, 30.0)).fill_width());
        let a = stack.measure(&mut ctx, Size::new(120.0, f32::INFINITY));
        let b = stack.measure(&mut ctx, Size::new(120.0, f32::INFINITY));
        assert_eq!(a, b);
    }
}
