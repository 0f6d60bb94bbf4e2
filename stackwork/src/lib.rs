//! Stackwork: Flexible Box Layout Engine
//!
//! Stackwork lays out a tree of declarative UI elements and reports one
//! frame per leaf, for a host that positions its own platform views:
//! - Two-pass measure/layout protocol over an element tree
//! - Linear stacks that negotiate space under min/max constraints
//! - A per-width, per-key frame cache to skip repeated layouts
//!
//! # Architecture
//!
//! Definitions (JSON) are compiled once into a `Template` with a static
//! binding table. The host instantiates the template, binds model values
//! and hands the tree to a `LayoutEngine`, which produces `Rect`s in the
//! root's coordinate space.
//!
//! # Usage
//!
//! ```ignore
//! use stackwork::{LayoutConfig, LayoutEngine, Template};
//!
//! let template = Template::load("card.json")?;
//! let values = template.values_from_json(r#"{ "title": "Hello" }"#)?;
//! let mut root = template.instantiate();
//! root.bind(&values);
//!
//! let mut engine = LayoutEngine::new(root, LayoutConfig::default());
//! let occupied = engine.layout(320.0, Some("message-42"));
//! for frame in engine.leaf_frames() {
//!     // position host views
//! }
//! ```

// Core primitives
pub mod primitives;

// Layout system (elements, stacks, cache)
pub mod layout;

// Text measurement (monospace estimate, optional cosmic-text)
pub mod text_engine;

// Definitions and binding
pub mod definition;

// Orchestration
pub mod action;
pub mod config;
pub mod engine;
pub mod error;

// Re-export core types
pub use action::{ActionContext, RecordedActions};
pub use config::LayoutConfig;
pub use definition::{BindingKind, BindingTable, BoundValues, ElementDef, KindDef, Template, Value};
pub use engine::LayoutEngine;
pub use error::{Error, Result};
pub use primitives::{Edges, Rect, Size};
pub use text_engine::{MonospaceMeasurer, TextMeasurer, TextMetrics};

#[cfg(feature = "cosmic-text")]
pub use text_engine::CosmicMeasurer;

// Re-export layout types
pub use layout::{
    Alignment, Anchor, AnchorElement, ButtonElement, Direction, Element, ElementKind, FrameList,
    ImageElement, Layered, LayoutCache, LayoutContext, PaddingElement, SizeRange, Stack,
    TextElement, ViewElement,
};
