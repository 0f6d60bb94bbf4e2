//! Element - the node type of the layout tree.
//!
//! `ElementKind` is the central switchboard: containers don't know the
//! concrete type of their children, they call `Element::measure` and
//! `Element::layout` and let the kind dispatch. Margins, visibility and
//! frame bookkeeping are handled here once, so every kind is written
//! against a margin-free coordinate space.

use crate::primitives::{Edges, Rect, Size};

use super::context::LayoutContext;
use super::elements::{ButtonElement, ImageElement, TextElement, ViewElement};
use super::layered::Layered;
use super::length::{Alignment, SizeRange};
use super::stack::Stack;
use super::wrappers::{AnchorElement, PaddingElement};

// =========================================================================
// ElementKind
// =========================================================================

/// What an element is.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    /// A text leaf.
    Text(TextElement),
    /// An image leaf.
    Image(ImageElement),
    /// A fixed-size host view leaf.
    View(ViewElement),
    /// A button leaf.
    Button(ButtonElement),
    /// Insets around a single child.
    Padding(PaddingElement),
    /// Positions a single child at one of nine anchors.
    Anchor(AnchorElement),
    /// Linear stack along one axis.
    Stack(Stack),
    /// Children stacked on top of each other.
    Layered(Layered),
}

impl ElementKind {
    fn name(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "Text",
            ElementKind::Image(_) => "Image",
            ElementKind::View(_) => "View",
            ElementKind::Button(_) => "Button",
            ElementKind::Padding(_) => "Padding",
            ElementKind::Anchor(_) => "Anchor",
            ElementKind::Stack(_) => "Stack",
            ElementKind::Layered(_) => "Layered",
        }
    }
}

// =========================================================================
// Element
// =========================================================================

/// A node in the layout tree.
///
/// The tree's shape is fixed once built; measure and layout only update the
/// recorded frames. Rebuild the tree when definitions change.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    kind: ElementKind,
    margin: Edges,
    horizontal: Alignment,
    vertical: Alignment,
    /// Last laid-out frame, excluding margins.
    frame: Rect,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            margin: Edges::ZERO,
            horizontal: Alignment::Leading,
            vertical: Alignment::Leading,
            frame: Rect::ZERO,
        }
    }

    /// Set the margin around this element.
    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin.sanitized();
        self
    }

    /// Set the horizontal alignment.
    pub fn horizontal(mut self, alignment: Alignment) -> Self {
        self.horizontal = alignment;
        self
    }

    /// Set the vertical alignment.
    pub fn vertical(mut self, alignment: Alignment) -> Self {
        self.vertical = alignment;
        self
    }

    /// Shorthand for `horizontal(Fill)`.
    pub fn fill_width(self) -> Self {
        self.horizontal(Alignment::Fill)
    }

    /// Shorthand for `vertical(Fill)`.
    pub fn fill_height(self) -> Self {
        self.vertical(Alignment::Fill)
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    pub fn margin_edges(&self) -> Edges {
        self.margin
    }

    pub fn horizontal_alignment(&self) -> Alignment {
        self.horizontal
    }

    pub fn vertical_alignment(&self) -> Alignment {
        self.vertical
    }

    /// The last laid-out frame (without margins).
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Leaves decide locally; containers are visible iff any child is.
    pub fn visible(&self) -> bool {
        match &self.kind {
            ElementKind::Text(t) => t.visible(),
            ElementKind::Image(img) => img.visible(),
            ElementKind::View(_) | ElementKind::Button(_) => true,
            ElementKind::Padding(p) => p.child.visible(),
            ElementKind::Anchor(a) => a.child.visible(),
            ElementKind::Stack(s) => s.children().iter().any(Element::visible),
            ElementKind::Layered(l) => l.children().iter().any(Element::visible),
        }
    }

    /// Whether this is a leaf (no children).
    pub fn is_leaf(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Text(_) | ElementKind::Image(_) | ElementKind::View(_) | ElementKind::Button(_)
        )
    }

    /// Direct children, in order.
    pub fn children(&self) -> &[Element] {
        match &self.kind {
            ElementKind::Padding(p) => std::slice::from_ref(&*p.child),
            ElementKind::Anchor(a) => std::slice::from_ref(&*a.child),
            ElementKind::Stack(s) => s.children(),
            ElementKind::Layered(l) => l.children(),
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> &mut [Element] {
        match &mut self.kind {
            ElementKind::Padding(p) => std::slice::from_mut(&mut *p.child),
            ElementKind::Anchor(a) => std::slice::from_mut(&mut *a.child),
            ElementKind::Stack(s) => s.children_mut(),
            ElementKind::Layered(l) => l.children_mut(),
            _ => &mut [],
        }
    }

    /// Pre-order walk over this element and its descendants.
    pub fn traverse<'s>(&'s self, visit: &mut impl FnMut(&'s Element)) {
        visit(self);
        for child in self.children() {
            child.traverse(visit);
        }
    }

    /// Pre-order walk with mutable access.
    pub fn traverse_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit(self);
        for child in self.children_mut() {
            child.traverse_mut(visit);
        }
    }

    /// Number of leaves under (and including) this element.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |e| {
            if e.is_leaf() {
                count += 1;
            }
        });
        count
    }

    /// Leaf frames in pre-order.
    pub fn leaf_frames(&self) -> Vec<Rect> {
        let mut frames = Vec::new();
        self.traverse(&mut |e| {
            if e.is_leaf() {
                frames.push(e.frame);
            }
        });
        frames
    }

    /// Measure this element's natural size range for the available space.
    ///
    /// `bounds` is the space offered to the element including its margin;
    /// the result includes the margin too.
    pub fn measure(&self, ctx: &mut LayoutContext, bounds: Size) -> SizeRange {
        if !self.visible() {
            return SizeRange::ZERO;
        }
        let inner = bounds.sanitized().deflate(&self.margin);

        ctx.enter(self.kind.name());
        let range = match &self.kind {
            ElementKind::Text(t) => t.measure(ctx, inner),
            ElementKind::Image(img) => img.measure(),
            ElementKind::View(v) => v.measure(),
            ElementKind::Button(b) => b.measure(ctx),
            ElementKind::Padding(p) => p.measure(ctx, inner),
            ElementKind::Anchor(a) => a.measure(ctx),
            ElementKind::Stack(s) => s.measure(ctx, inner),
            ElementKind::Layered(l) => l.measure(ctx, inner),
        };
        ctx.log_measure(inner, range);
        ctx.exit();

        range.expand(self.margin.horizontal(), self.margin.vertical())
    }

    /// Position this element (and its descendants) inside `bounds`.
    ///
    /// Returns the occupied rect including margin. Invisible elements
    /// collapse to a zero-size frame at the bounds origin.
    pub fn layout(&mut self, ctx: &mut LayoutContext, bounds: Rect) -> Rect {
        let bounds = bounds.sanitized();
        if !self.visible() {
            self.collapse(bounds.x, bounds.y);
            return Rect::new(bounds.x, bounds.y, 0.0, 0.0);
        }
        let inner = bounds.inset(&self.margin);

        let name = self.kind.name();
        ctx.enter(name);
        let occupied = match &mut self.kind {
            ElementKind::Text(t) => t.layout(ctx, inner),
            ElementKind::Image(img) => img.layout(inner),
            ElementKind::View(v) => v.layout(inner),
            ElementKind::Button(b) => b.layout(ctx, inner),
            ElementKind::Padding(p) => p.layout(ctx, inner),
            ElementKind::Anchor(a) => a.layout(ctx, inner),
            ElementKind::Stack(s) => s.layout(ctx, inner),
            ElementKind::Layered(l) => l.layout(ctx, inner),
        };
        ctx.log_layout(inner, occupied);
        ctx.exit();

        self.frame = occupied;
        occupied.outset(&self.margin)
    }

    /// Zero this element's frame and every descendant's at one point.
    fn collapse(&mut self, x: f32, y: f32) {
        self.traverse_mut(&mut |e| e.frame = Rect::new(x, y, 0.0, 0.0));
    }
}

// =========================================================================
// From impls for Element, so containers accept any kind in `.push()`
// =========================================================================

impl From<ElementKind> for Element {
    fn from(kind: ElementKind) -> Self {
        Self::new(kind)
    }
}

impl From<TextElement> for Element {
    fn from(v: TextElement) -> Self {
        Self::new(ElementKind::Text(v))
    }
}

impl From<ImageElement> for Element {
    fn from(v: ImageElement) -> Self {
        Self::new(ElementKind::Image(v))
    }
}

impl From<ViewElement> for Element {
    fn from(v: ViewElement) -> Self {
        Self::new(ElementKind::View(v))
    }
}

impl From<ButtonElement> for Element {
    fn from(v: ButtonElement) -> Self {
        Self::new(ElementKind::Button(v))
    }
}

impl From<PaddingElement> for Element {
    fn from(v: PaddingElement) -> Self {
        Self::new(ElementKind::Padding(v))
    }
}

impl From<AnchorElement> for Element {
    fn from(v: AnchorElement) -> Self {
        Self::new(ElementKind::Anchor(v))
    }
}

impl From<Stack> for Element {
    fn from(v: Stack) -> Self {
        Self::new(ElementKind::Stack(v))
    }
}

impl From<Layered> for Element {
    fn from(v: Layered) -> Self {
        Self::new(ElementKind::Layered(v))
    }
}

// =========================================================================
// Tests
// =========================================================================
