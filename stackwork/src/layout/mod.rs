//! Layout System for Stackwork
//!
//! Provides stack-based layout containers that negotiate space between
//! children and record one frame per element. A layout run is two walks
//! over the tree:
//!
//! ```text
//! measure(width, unbounded) -> SizeRange -> layout(0, 0, width, height) -> frames
//! ```
//!
//! Stacks are the only containers that distribute space; padding, anchor
//! and layered wrappers just forward bounds to their children.

pub mod cache;
pub mod context;
pub mod element;
pub mod elements;
pub mod flex;
pub mod layered;
pub mod length;
pub mod stack;
pub mod wrappers;

// Re-export core types
pub use cache::{FrameList, LayoutCache};
pub use context::LayoutContext;
pub use length::{Alignment, Anchor, Direction, SizeRange, BASE_FONT_SIZE, CHAR_WIDTH, LINE_HEIGHT};

// Re-export elements
pub use element::{Element, ElementKind};
pub use elements::{ButtonElement, ImageElement, TextElement, ViewElement};

// Re-export containers
pub use layered::Layered;
pub use stack::Stack;
pub use wrappers::{AnchorElement, PaddingElement};
