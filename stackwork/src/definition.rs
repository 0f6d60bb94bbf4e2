//! Element definitions and value binding.
//!
//! A definition is the already-resolved description of a tree (kinds,
//! static attributes, binding names). It is compiled once into a
//! `Template`, which owns a `BindingTable` mapping each binding name to a
//! slot in a typed value array. Instantiating the template yields a fresh
//! `Element` tree whose bound leaves refer to those slots by index, so
//! binding a model is a single indexed walk with no name lookups.
//!
//! ```text
//! ElementDef (JSON) -> Template::compile -> instantiate() -> Element
//!                                        -> bind_values() -> BoundValues -> Element::bind
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{
    Alignment, Anchor, AnchorElement, ButtonElement, Direction, Element, ElementKind, ImageElement,
    Layered, PaddingElement, Stack, TextElement, ViewElement,
};
use crate::primitives::{Edges, Size};

// =========================================================================
// Definitions
// =========================================================================

/// One node of a definition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementDef {
    #[serde(flatten)]
    pub kind: KindDef,
    #[serde(default)]
    pub margin: Edges,
    #[serde(default)]
    pub horizontal: Alignment,
    #[serde(default)]
    pub vertical: Alignment,
}

/// Kind-specific attributes, tagged by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum KindDef {
    Text {
        #[serde(default)]
        text: Option<String>,
        /// Binding name. A bound text starts hidden and `text` is ignored.
        #[serde(default)]
        bind: Option<String>,
        #[serde(default)]
        size: Option<f32>,
        #[serde(default)]
        max_lines: u32,
        #[serde(default)]
        nowrap: bool,
    },
    Image {
        width: f32,
        height: f32,
        #[serde(default)]
        min_width: Option<f32>,
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        bind: Option<String>,
    },
    View {
        width: f32,
        height: f32,
    },
    Button {
        label: String,
        #[serde(default)]
        width: Option<f32>,
        #[serde(default)]
        height: Option<f32>,
        #[serde(default)]
        padding: Option<Edges>,
        #[serde(default)]
        action: Option<String>,
    },
    Padding {
        #[serde(default)]
        insets: Edges,
        #[serde(default)]
        child: Option<Box<ElementDef>>,
    },
    Anchor {
        #[serde(default)]
        anchor: Anchor,
        #[serde(default)]
        child: Option<Box<ElementDef>>,
    },
    Stack {
        #[serde(default)]
        direction: Direction,
        #[serde(default)]
        along: Alignment,
        #[serde(default)]
        across: Alignment,
        #[serde(default)]
        spacing: f32,
        #[serde(default)]
        children: Vec<ElementDef>,
    },
    Layered {
        #[serde(default)]
        children: Vec<ElementDef>,
    },
}

impl ElementDef {
    /// Parse a definition tree from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// =========================================================================
// Binding table
// =========================================================================

/// What kind of leaf a binding feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Text,
    Image,
}

impl BindingKind {
    fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Empty) => true,
            (BindingKind::Text, Value::Text(_)) => true,
            (BindingKind::Image, Value::Text(_) | Value::Size(_)) => true,
            (BindingKind::Text, Value::Size(_)) => false,
        }
    }

    fn expected(self) -> &'static str {
        match self {
            BindingKind::Text => "text",
            BindingKind::Image => "text or size",
        }
    }
}

/// Binding name -> slot index, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingTable {
    slots: IndexMap<String, BindingKind>,
}

impl BindingTable {
    /// Register `name`, reusing its slot if it was seen before.
    fn register(&mut self, name: &str, kind: BindingKind) -> Result<usize> {
        if let Some((index, _, existing)) = self.slots.get_full(name) {
            if *existing != kind {
                return Err(Error::ConflictingBinding(name.to_string()));
            }
            return Ok(index);
        }
        let (index, _) = self.slots.insert_full(name.to_string(), kind);
        Ok(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.slots.get_index_of(name)
    }

    pub fn kind(&self, index: usize) -> Option<BindingKind> {
        self.slots.get_index(index).map(|(_, kind)| *kind)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// =========================================================================
// Bound values
// =========================================================================

/// A resolved leaf value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    Text(String),
    Size(Size),
    /// No value; hides the leaf.
    #[default]
    Empty,
}

/// Values for every slot of a binding table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundValues(Vec<Value>);

impl BoundValues {
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// JSON shape of a bound value: a string, a `{width, height}` object, or null.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Size(Size),
}

// =========================================================================
// Template
// =========================================================================

/// A validated definition with its binding table.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    def: ElementDef,
    bindings: BindingTable,
}

impl Template {
    /// Validate a definition and build its binding table.
    pub fn compile(def: ElementDef) -> Result<Self> {
        let mut bindings = BindingTable::default();
        validate(&def, "root", &mut bindings)?;
        tracing::debug!(bindings = bindings.len(), "compiled template");
        Ok(Self { def, bindings })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::compile(ElementDef::from_json(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn definition(&self) -> &ElementDef {
        &self.def
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Build a fresh element tree. Bound leaves start empty.
    pub fn instantiate(&self) -> Element {
        build(&self.def, &self.bindings)
    }

    /// Resolve named values against the binding table.
    ///
    /// Slots without a value stay `Empty`.
    pub fn bind_values<N, I>(&self, values: I) -> Result<BoundValues>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = (N, Value)>,
    {
        let mut slots = vec![Value::Empty; self.bindings.len()];
        for (name, value) in values {
            let name = name.as_ref();
            let index = self
                .bindings
                .index_of(name)
                .ok_or_else(|| Error::UnknownBinding(name.to_string()))?;
            if let Some(kind) = self.bindings.kind(index) {
                if !kind.accepts(&value) {
                    return Err(Error::BindingKind {
                        name: name.to_string(),
                        expected: kind.expected(),
                    });
                }
            }
            slots[index] = value;
        }
        Ok(BoundValues(slots))
    }

    /// Resolve a JSON object of `name -> string | {width, height} | null`.
    pub fn values_from_json(&self, json: &str) -> Result<BoundValues> {
        let raw: IndexMap<String, Option<RawValue>> = serde_json::from_str(json)?;
        self.bind_values(raw.into_iter().map(|(name, value)| {
            let value = match value {
                Some(RawValue::Text(text)) => Value::Text(text),
                Some(RawValue::Size(size)) => Value::Size(size),
                None => Value::Empty,
            };
            (name, value)
        }))
    }
}

// ===== Validation =====

fn check_extent(path: &str, attribute: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidAttribute {
            path: path.to_string(),
            attribute,
            reason: format!("expected a finite, non-negative number, got {value}"),
        })
    }
}

fn check_edges(path: &str, attribute: &'static str, edges: &Edges) -> Result<()> {
    for value in [edges.top, edges.right, edges.bottom, edges.left] {
        check_extent(path, attribute, value)?;
    }
    Ok(())
}

fn missing_child(path: &str) -> Error {
    Error::InvalidAttribute {
        path: path.to_string(),
        attribute: "child",
        reason: "a single child is required".to_string(),
    }
}

fn validate(def: &ElementDef, path: &str, bindings: &mut BindingTable) -> Result<()> {
    check_edges(path, "margin", &def.margin)?;

    match &def.kind {
        KindDef::Text { size, bind, .. } => {
            if let Some(size) = size {
                check_extent(path, "size", *size)?;
            }
            if let Some(name) = bind {
                bindings.register(name, BindingKind::Text)?;
            }
        }
        KindDef::Image {
            width,
            height,
            min_width,
            bind,
            ..
        } => {
            check_extent(path, "width", *width)?;
            check_extent(path, "height", *height)?;
            if let Some(min) = min_width {
                check_extent(path, "min_width", *min)?;
            }
            if let Some(name) = bind {
                bindings.register(name, BindingKind::Image)?;
            }
        }
        KindDef::View { width, height } => {
            check_extent(path, "width", *width)?;
            check_extent(path, "height", *height)?;
        }
        KindDef::Button {
            width,
            height,
            padding,
            ..
        } => {
            if width.is_some() != height.is_some() {
                return Err(Error::InvalidAttribute {
                    path: path.to_string(),
                    attribute: "width",
                    reason: "width and height must be given together".to_string(),
                });
            }
            if let Some(width) = width {
                check_extent(path, "width", *width)?;
            }
            if let Some(height) = height {
                check_extent(path, "height", *height)?;
            }
            if let Some(padding) = padding {
                check_edges(path, "padding", padding)?;
            }
        }
        KindDef::Padding { insets, child } => {
            check_edges(path, "insets", insets)?;
            let child = child.as_deref().ok_or_else(|| missing_child(path))?;
            validate(child, &format!("{path}/child"), bindings)?;
        }
        KindDef::Anchor { child, .. } => {
            let child = child.as_deref().ok_or_else(|| missing_child(path))?;
            validate(child, &format!("{path}/child"), bindings)?;
        }
        KindDef::Stack {
            spacing, children, ..
        } => {
            check_extent(path, "spacing", *spacing)?;
            for (i, child) in children.iter().enumerate() {
                validate(child, &format!("{path}/children[{i}]"), bindings)?;
            }
        }
        KindDef::Layered { children } => {
            for (i, child) in children.iter().enumerate() {
                validate(child, &format!("{path}/children[{i}]"), bindings)?;
            }
        }
    }
    Ok(())
}

// ===== Instantiation =====

/// Build an element from a validated definition.
fn build(def: &ElementDef, bindings: &BindingTable) -> Element {
    let slot = |name: &Option<String>| name.as_deref().and_then(|n| bindings.index_of(n));

    let kind = match &def.kind {
        KindDef::Text {
            text,
            bind,
            size,
            max_lines,
            nowrap,
        } => ElementKind::Text(TextElement {
            // Bound text stays hidden until a value arrives.
            text: if bind.is_some() { None } else { text.clone() },
            size: *size,
            max_lines: *max_lines,
            nowrap: *nowrap,
            binding: slot(bind),
        }),
        KindDef::Image {
            width,
            height,
            min_width,
            source,
            bind,
        } => {
            let binding = slot(bind);
            ElementKind::Image(ImageElement {
                source: source.clone(),
                size: Size::new(*width, *height),
                min_width: *min_width,
                hidden: binding.is_some(),
                binding,
            })
        }
        KindDef::View { width, height } => ElementKind::View(ViewElement::new(*width, *height)),
        KindDef::Button {
            label,
            width,
            height,
            padding,
            action,
        } => {
            let mut button = ButtonElement::new(label.clone());
            if let (Some(w), Some(h)) = (width, height) {
                button = button.size(*w, *h);
            }
            if let Some(padding) = padding {
                button = button.padding(*padding);
            }
            button.action = action.clone();
            ElementKind::Button(button)
        }
        KindDef::Padding { insets, child } => {
            let child = child
                .as_deref()
                .map(|c| build(c, bindings))
                .unwrap_or_else(|| Element::from(Layered::new()));
            ElementKind::Padding(PaddingElement::new(*insets, child))
        }
        KindDef::Anchor { anchor, child } => {
            let child = child
                .as_deref()
                .map(|c| build(c, bindings))
                .unwrap_or_else(|| Element::from(Layered::new()));
            ElementKind::Anchor(AnchorElement::new(*anchor, child))
        }
        KindDef::Stack {
            direction,
            along,
            across,
            spacing,
            children,
        } => {
            let stack = Stack::new(*direction)
                .along(*along)
                .across(*across)
                .spacing(*spacing);
            ElementKind::Stack(
                children
                    .iter()
                    .fold(stack, |stack, child| stack.push(build(child, bindings))),
            )
        }
        KindDef::Layered { children } => ElementKind::Layered(
            children
                .iter()
                .fold(Layered::new(), |layered, child| layered.push(build(child, bindings))),
        ),
    };

    Element::new(kind)
        .margin(def.margin)
        .horizontal(def.horizontal)
        .vertical(def.vertical)
}

// ===== Binding =====

impl Element {
    /// Apply bound values to every bound leaf in this tree.
    ///
    /// Text slots set the text (`Empty` hides the leaf). Image slots take a
    /// size or a source; `Empty` hides the image.
    pub fn bind(&mut self, values: &BoundValues) {
        self.traverse_mut(&mut |e| match e.kind_mut() {
            ElementKind::Text(text) => {
                if let Some(index) = text.binding {
                    text.text = match values.get(index) {
                        Some(Value::Text(s)) => Some(s.clone()),
                        _ => None,
                    };
                }
            }
            ElementKind::Image(image) => {
                if let Some(index) = image.binding {
                    match values.get(index) {
                        Some(Value::Size(size)) => {
                            image.size = *size;
                            image.hidden = false;
                        }
                        Some(Value::Text(source)) => {
                            image.source = Some(source.clone());
                            image.hidden = false;
                        }
                        Some(Value::Empty) | None => image.hidden = true,
                    }
                }
            }
            _ => {}
        });
    }
}

// =========================================================================
// Tests
// =========================================================================
