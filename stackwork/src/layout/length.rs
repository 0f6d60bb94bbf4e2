//! Sizing and alignment types.
//!
//! `SizeRange` is the measured shape of a node; `Alignment` and `Anchor`
//! decide where a measured size lands inside the space it was given.

use serde::{Deserialize, Serialize};

use crate::primitives::{Rect, Size, finite_extent, sanitize_extent};

// Text metrics for the default monospace estimate at 14px.
pub const CHAR_WIDTH: f32 = 8.4;
pub const LINE_HEIGHT: f32 = 18.0;
pub const BASE_FONT_SIZE: f32 = 14.0;

/// Measured shape of an element for a given available space.
///
/// `min_width == max_width` marks a fixed-size element that can be neither
/// compressed nor stretched along the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizeRange {
    pub min_width: f32,
    pub max_width: f32,
    pub height: f32,
}

impl SizeRange {
    pub const ZERO: Self = Self {
        min_width: 0.0,
        max_width: 0.0,
        height: 0.0,
    };

    /// Build a range, restoring `0 <= min <= max` and dropping NaN/infinity.
    pub fn new(min_width: f32, max_width: f32, height: f32) -> Self {
        let max_width = finite_extent(max_width);
        Self {
            min_width: finite_extent(min_width).min(max_width),
            max_width,
            height: finite_extent(height),
        }
    }

    /// A fixed-size range (`min == max`).
    pub fn fixed(size: Size) -> Self {
        Self::new(size.width, size.width, size.height)
    }

    pub fn is_fixed(&self) -> bool {
        self.min_width == self.max_width
    }

    /// The largest size this range describes.
    pub fn max_size(&self) -> Size {
        Size::new(self.max_width, self.height)
    }

    /// Grow the range by fixed horizontal and vertical amounts.
    pub fn expand(&self, horizontal: f32, vertical: f32) -> Self {
        Self::new(
            self.min_width + horizontal,
            self.max_width + horizontal,
            self.height + vertical,
        )
    }
}

/// Per-axis alignment of a node inside the space it is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Pack at the start of the axis.
    #[default]
    Leading,
    /// Center on the axis.
    Center,
    /// Pack at the end of the axis.
    Trailing,
    /// Take the whole axis (and, on a stack's main axis, a share of leftover space).
    Fill,
}

impl Alignment {
    /// Resolve one axis: returns `(offset, extent)` for a measured extent
    /// placed in `available` starting at `origin`.
    ///
    /// The measured extent never overflows the available extent.
    #[inline]
    pub fn resolve(self, measured: f32, origin: f32, available: f32) -> (f32, f32) {
        let available = finite_extent(available);
        let measured = sanitize_extent(measured).min(available);
        match self {
            Alignment::Leading => (origin, measured),
            Alignment::Center => (origin + (available - measured) / 2.0, measured),
            Alignment::Trailing => (origin + available - measured, measured),
            Alignment::Fill => (origin, available),
        }
    }

    pub fn is_fill(self) -> bool {
        self == Alignment::Fill
    }
}

/// Place a measured size inside bounds using one alignment per axis.
pub fn place(measured: Size, horizontal: Alignment, vertical: Alignment, bounds: Rect) -> Rect {
    let (x, width) = horizontal.resolve(measured.width, bounds.x, bounds.width);
    let (y, height) = vertical.resolve(measured.height, bounds.y, bounds.height);
    Rect::new(x, y, width, height)
}

/// Direction of flow for a linear stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    /// Split a size into `(main, cross)` for this direction.
    #[inline]
    pub fn split(self, size: Size) -> (f32, f32) {
        match self {
            Direction::Horizontal => (size.width, size.height),
            Direction::Vertical => (size.height, size.width),
        }
    }

    /// Inverse of `split`.
    #[inline]
    pub fn join(self, main: f32, cross: f32) -> Size {
        match self {
            Direction::Horizontal => Size::new(main, cross),
            Direction::Vertical => Size::new(cross, main),
        }
    }

    /// `(min_main, max_main, cross)` of a measured range.
    ///
    /// A range only carries a single height, so along a vertical axis every
    /// child is fixed-size and its natural width is the cross extent.
    #[inline]
    pub fn main_range(self, range: &SizeRange) -> (f32, f32, f32) {
        match self {
            Direction::Horizontal => (range.min_width, range.max_width, range.height),
            Direction::Vertical => (range.height, range.height, range.max_width),
        }
    }

    /// Build a rect from main/cross positions and extents.
    #[inline]
    pub fn rect(self, main_pos: f32, cross_pos: f32, main: f32, cross: f32) -> Rect {
        match self {
            Direction::Horizontal => Rect::new(main_pos, cross_pos, main, cross),
            Direction::Vertical => Rect::new(cross_pos, main_pos, cross, main),
        }
    }
}

/// One of the nine anchor points used by the anchor wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    /// The per-axis alignments this anchor stands for.
    pub fn alignments(self) -> (Alignment, Alignment) {
        use Alignment::{Center, Leading, Trailing};
        match self {
            Anchor::TopLeft => (Leading, Leading),
            Anchor::Top => (Center, Leading),
            Anchor::TopRight => (Trailing, Leading),
            Anchor::Left => (Leading, Center),
            Anchor::Center => (Center, Center),
            Anchor::Right => (Trailing, Center),
            Anchor::BottomLeft => (Leading, Trailing),
            Anchor::Bottom => (Center, Trailing),
            Anchor::BottomRight => (Trailing, Trailing),
        }
    }

    /// Place `size` inside `bounds` without stretching it.
    pub fn place(self, size: Size, bounds: Rect) -> Rect {
        let (h, v) = self.alignments();
        place(size, h, v, bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_range_invariants() {
        let r = SizeRange::new(50.0, 20.0, 10.0);
        assert_eq!(r.min_width, 20.0);
        assert_eq!(r.max_width, 20.0);

        let r = SizeRange::new(f32::NAN, f32::INFINITY, -3.0);
        assert_eq!(r, SizeRange::ZERO);
    }

    #[test]
    fn test_size_range_fixed() {
        let r = SizeRange::fixed(Size::new(40.0, 18.0));
        assert!(r.is_fixed());
        assert_eq!(r.expand(10.0, 4.0), SizeRange::new(50.0, 50.0, 22.0));
    }

    #[test]
    fn test_alignment_resolve() {
        assert_eq!(Alignment::Leading.resolve(20.0, 10.0, 100.0), (10.0, 20.0));
        assert_eq!(Alignment::Center.resolve(20.0, 10.0, 100.0), (50.0, 20.0));
        assert_eq!(Alignment::Trailing.resolve(20.0, 10.0, 100.0), (90.0, 20.0));
        assert_eq!(Alignment::Fill.resolve(20.0, 10.0, 100.0), (10.0, 100.0));
    }

    #[test]
    fn test_alignment_clamps_oversized() {
        assert_eq!(Alignment::Trailing.resolve(150.0, 0.0, 100.0), (0.0, 100.0));
    }

    #[test]
    fn test_place_rect() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let r = place(Size::new(20.0, 10.0), Alignment::Center, Alignment::Trailing, bounds);
        assert_eq!(r, Rect::new(40.0, 40.0, 20.0, 10.0));
    }

    #[test]
    fn test_direction_split_join() {
        let s = Size::new(3.0, 7.0);
        assert_eq!(Direction::Vertical.split(s), (7.0, 3.0));
        assert_eq!(Direction::Vertical.join(7.0, 3.0), s);
        assert_eq!(
            Direction::Vertical.main_range(&SizeRange::new(5.0, 30.0, 12.0)),
            (12.0, 12.0, 30.0)
        );
    }

    #[test]
    fn test_anchor_place() {
        let bounds = Rect::new(10.0, 10.0, 100.0, 100.0);
        let size = Size::new(20.0, 20.0);
        assert_eq!(Anchor::Center.place(size, bounds), Rect::new(50.0, 50.0, 20.0, 20.0));
        assert_eq!(Anchor::BottomRight.place(size, bounds), Rect::new(90.0, 90.0, 20.0, 20.0));
        assert_eq!(Anchor::Left.place(size, bounds), Rect::new(10.0, 50.0, 20.0, 20.0));
    }

    #[test]
    fn test_alignment_serde_names() {
        let a: Alignment = serde_json::from_str("\"fill\"").unwrap();
        assert_eq!(a, Alignment::Fill);
        let anchor: Anchor = serde_json::from_str("\"bottom_right\"").unwrap();
        assert_eq!(anchor, Anchor::BottomRight);
    }
}
