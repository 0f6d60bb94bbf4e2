//! Leaf layout elements - TextElement, ImageElement, ViewElement, ButtonElement.
//!
//! These are the "atoms" of the layout system - they don't contain other
//! elements, so measuring them never recurses.

use crate::primitives::{Edges, Rect, Size, finite_extent};

use super::context::LayoutContext;
use super::length::{BASE_FONT_SIZE, SizeRange};

// =========================================================================
// Helper Functions
// =========================================================================

/// Anchor a fixed size at the top-left of `bounds`, never exceeding them.
#[inline]
fn clamp_to_bounds(size: Size, bounds: Rect) -> Rect {
    Rect::new(
        bounds.x,
        bounds.y,
        finite_extent(size.width).min(bounds.width),
        finite_extent(size.height).min(bounds.height),
    )
}

// =========================================================================
// TextElement
// =========================================================================

/// A text leaf.
///
/// Wraps within the width it is given unless `nowrap` is set. An empty or
/// absent string hides the element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextElement {
    /// Text content. `None` until bound when the text comes from a model.
    pub text: Option<String>,
    /// Font size (if different from default).
    pub size: Option<f32>,
    /// Maximum visible lines; 0 means unlimited.
    pub max_lines: u32,
    /// Measure on a single line at unlimited width.
    pub nowrap: bool,
    /// Index into the bound value array.
    pub(crate) binding: Option<usize>,
}

impl TextElement {
    /// Create a text element with literal content.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Create a text element whose content is filled in by binding.
    pub fn bound(binding: usize) -> Self {
        Self {
            binding: Some(binding),
            ..Self::default()
        }
    }

    /// Set the font size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Clamp to at most `lines` lines.
    pub fn max_lines(mut self, lines: u32) -> Self {
        self.max_lines = lines;
        self
    }

    /// Never wrap.
    pub fn nowrap(mut self) -> Self {
        self.nowrap = true;
        self
    }

    pub fn binding(&self) -> Option<usize> {
        self.binding
    }

    pub fn visible(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Get the effective font size for this element.
    pub(crate) fn font_size(&self) -> f32 {
        self.size.unwrap_or(BASE_FONT_SIZE)
    }

    pub(crate) fn measure(&self, ctx: &mut LayoutContext, bounds: Size) -> SizeRange {
        let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) else {
            return SizeRange::ZERO;
        };
        let measurer = ctx.measurer();
        let font_size = self.font_size();

        if self.nowrap {
            let m = measurer.measure(text, font_size, None);
            return SizeRange::new(m.width, m.width, self.clamp_height(ctx, text, m.height));
        }

        let available = bounds.width;
        let natural = measurer.measure(text, font_size, None);
        let wrapped = if available.is_finite() && available < natural.width {
            measurer.measure(text, font_size, Some(available))
        } else {
            natural
        };

        let max_width = natural.width.min(available);
        let min_width = measurer.min_content_width(text, font_size).min(max_width);
        SizeRange::new(min_width, max_width, self.clamp_height(ctx, text, wrapped.height))
    }

    /// Apply the `max_lines` cap.
    ///
    /// The per-line height is measured on the text collapsed to a single
    /// line, independent of wrapping, then the wrapped height is capped.
    fn clamp_height(&self, ctx: &LayoutContext, text: &str, height: f32) -> f32 {
        if self.max_lines == 0 {
            return height;
        }
        let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let line_height = ctx
            .measurer()
            .measure(&single_line, self.font_size(), None)
            .height;
        height.min(line_height * self.max_lines as f32)
    }

    pub(crate) fn layout(&self, ctx: &mut LayoutContext, bounds: Rect) -> Rect {
        let range = self.measure(ctx, bounds.size());
        clamp_to_bounds(Size::new(bounds.width.min(range.max_width), range.height), bounds)
    }
}

// =========================================================================
// ImageElement
// =========================================================================

/// An image placeholder with a fixed display size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageElement {
    /// Image name or URL, passed through to the host.
    pub source: Option<String>,
    /// Display size in logical pixels.
    pub size: Size,
    /// Narrowest width the image may be squeezed to. Defaults to the full
    /// width, which makes the image fixed-size.
    pub min_width: Option<f32>,
    /// Hidden when its binding resolved to no value.
    pub(crate) hidden: bool,
    pub(crate) binding: Option<usize>,
}

impl ImageElement {
    /// Create a new image element with explicit size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Allow the image to be compressed down to `width`.
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn binding(&self) -> Option<usize> {
        self.binding
    }

    pub fn visible(&self) -> bool {
        !self.hidden
    }

    pub(crate) fn measure(&self) -> SizeRange {
        let min = self.min_width.unwrap_or(self.size.width);
        SizeRange::new(min, self.size.width, self.size.height)
    }

    pub(crate) fn layout(&self, bounds: Rect) -> Rect {
        clamp_to_bounds(self.size, bounds)
    }
}

// =========================================================================
// ViewElement
// =========================================================================

/// A fixed-size placeholder for a host-provided view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewElement {
    pub size: Size,
}

impl ViewElement {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    pub(crate) fn measure(&self) -> SizeRange {
        SizeRange::fixed(self.size)
    }

    pub(crate) fn layout(&self, bounds: Rect) -> Rect {
        clamp_to_bounds(self.size, bounds)
    }
}

// =========================================================================
// ButtonElement
// =========================================================================

/// A button placeholder.
///
/// Sized explicitly, or from its single-line label plus padding.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonElement {
    /// Button label text.
    pub label: String,
    /// Explicit size; overrides the label estimate.
    pub size: Option<Size>,
    /// Padding around the label.
    pub padding: Edges,
    /// Action name dispatched when the host reports a tap.
    pub action: Option<String>,
}

impl ButtonElement {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            size: None,
            padding: Edges::new(3.0, 14.0, 3.0, 14.0),
            action: None,
        }
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    fn intrinsic_size(&self, ctx: &LayoutContext) -> Size {
        if let Some(size) = self.size {
            return size;
        }
        let m = ctx.measurer().measure(&self.label, BASE_FONT_SIZE, None);
        Size::new(
            m.width + self.padding.horizontal(),
            m.height + self.padding.vertical(),
        )
    }

    pub(crate) fn measure(&self, ctx: &mut LayoutContext) -> SizeRange {
        SizeRange::fixed(self.intrinsic_size(ctx))
    }

    pub(crate) fn layout(&self, ctx: &mut LayoutContext, bounds: Rect) -> Rect {
        clamp_to_bounds(self.intrinsic_size(ctx), bounds)
    }
}

// =========================================================================
// Tests
// =========================================================================
