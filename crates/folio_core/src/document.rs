//! Document seam and an in-memory document
//!
//! The animation engine and the page controller never touch a real DOM
//! directly; they go through [`Document`]. A browser host implements it on
//! top of the page, while [`MemoryDocument`] keeps an element tree in memory
//! so the orchestration can run headless.
//!
//! Selectors support the subset the portfolio page needs: tag names, `#id`,
//! `.class`, compounds of those (`div.card#hero`) and the descendant
//! combinator (`.about-text p`).

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::value::{Property, PropertyValue, Rect, Size};

new_key_type! {
    /// Handle to an element in a document
    pub struct ElementId;
}

/// Access to the host page
///
/// All methods take `&self`; implementations use interior mutability so a
/// document can be shared between the engine and the page controller.
pub trait Document: Send + Sync {
    /// All elements matching `selector`, in document order
    fn query_selector_all(&self, selector: &str) -> Vec<ElementId>;

    /// Descendants of `scope` matching `selector`, in document order
    fn query_selector_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId>;

    /// First element matching `selector`
    fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// The `<body>` element
    fn body(&self) -> Option<ElementId> {
        self.query_selector("body")
    }

    /// Current value of an animatable property, `None` if never written
    fn property(&self, element: ElementId, property: Property) -> Option<PropertyValue>;
    fn set_property(&self, element: ElementId, property: Property, value: PropertyValue);

    fn text(&self, element: ElementId) -> Option<String>;
    fn set_text(&self, element: ElementId, text: &str);

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;
    fn set_attribute(&self, element: ElementId, name: &str, value: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool;
    /// Toggle `class`, returning whether it is present afterwards
    fn toggle_class(&self, element: ElementId, class: &str) -> bool;

    fn style(&self, element: ElementId, name: &str) -> Option<String>;
    fn set_style(&self, element: ElementId, name: &str, value: &str);
    fn remove_style(&self, element: ElementId, name: &str);

    /// Layout box in document coordinates
    fn bounds(&self, element: ElementId) -> Option<Rect>;

    fn viewport(&self) -> Size;
}

/// Document shared between the engine and the page
pub type SharedDocument = Arc<dyn Document>;

// ============================================================================
// Element description
// ============================================================================

/// Description of an element to append to a [`MemoryDocument`]
#[derive(Clone, Debug, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    bounds: Rect,
    text: String,
    properties: Vec<(Property, PropertyValue)>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Initial value of an animatable property (as a stylesheet would set it)
    pub fn property(mut self, property: Property, value: impl Into<PropertyValue>) -> Self {
        self.properties.push((property, value.into()));
        self
    }
}

// ============================================================================
// In-memory document
// ============================================================================

#[derive(Debug)]
struct ElementNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    parent: Option<ElementId>,
    bounds: Rect,
    text: String,
    properties: FxHashMap<Property, PropertyValue>,
    attributes: FxHashMap<String, String>,
    styles: FxHashMap<String, String>,
}

impl ElementNode {
    fn from_spec(spec: ElementSpec, parent: Option<ElementId>) -> Self {
        Self {
            tag: spec.tag,
            id: spec.id,
            classes: spec.classes,
            parent,
            bounds: spec.bounds,
            text: spec.text,
            properties: spec.properties.into_iter().collect(),
            attributes: FxHashMap::default(),
            styles: FxHashMap::default(),
        }
    }
}

#[derive(Debug, Default)]
struct DocumentInner {
    nodes: SlotMap<ElementId, ElementNode>,
    /// Document order
    order: Vec<ElementId>,
    viewport: Size,
}

/// An element tree held in memory
///
/// Elements are kept in the order they were appended, which is treated as
/// document order. Build parents before their children.
#[derive(Debug)]
pub struct MemoryDocument {
    inner: RwLock<DocumentInner>,
    root: ElementId,
}

impl MemoryDocument {
    /// Create a document containing only a `<body>` covering the viewport
    pub fn new(viewport: Size) -> Self {
        let mut inner = DocumentInner {
            viewport,
            ..Default::default()
        };
        let root = inner.nodes.insert(ElementNode::from_spec(
            ElementSpec::new("body").bounds(Rect::new(0.0, 0.0, viewport.width, viewport.height)),
            None,
        ));
        inner.order.push(root);
        Self {
            inner: RwLock::new(inner),
            root,
        }
    }

    /// Create a new document wrapped in Arc for sharing
    pub fn new_shared(viewport: Size) -> Arc<Self> {
        Arc::new(Self::new(viewport))
    }

    /// The `<body>` element every document starts with
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Append an element under `parent`
    pub fn append(&self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let mut inner = self.write();
        let id = inner.nodes.insert(ElementNode::from_spec(spec, Some(parent)));
        inner.order.push(id);
        id
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.write().viewport = viewport;
    }

    pub fn set_bounds(&self, element: ElementId, bounds: Rect) {
        if let Some(node) = self.write().nodes.get_mut(element) {
            node.bounds = bounds;
        }
    }

    pub fn len(&self) -> usize {
        self.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, DocumentInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DocumentInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    fn matching(&self, scope: Option<ElementId>, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            tracing::debug!("Unsupported selector: {:?}", selector);
            return Vec::new();
        };
        let inner = self.read();
        inner
            .order
            .iter()
            .copied()
            .filter(|&id| scope.map_or(true, |s| inner.is_descendant(id, s)))
            .filter(|&id| selector.matches(&inner, id))
            .collect()
    }
}

impl DocumentInner {
    fn is_descendant(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut current = self.nodes.get(element).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }
}

impl Document for MemoryDocument {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        self.matching(None, selector)
    }

    fn query_selector_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        self.matching(Some(scope), selector)
    }

    fn body(&self) -> Option<ElementId> {
        Some(self.root)
    }

    fn property(&self, element: ElementId, property: Property) -> Option<PropertyValue> {
        self.read()
            .nodes
            .get(element)
            .and_then(|n| n.properties.get(&property).copied())
    }

    fn set_property(&self, element: ElementId, property: Property, value: PropertyValue) {
        if let Some(node) = self.write().nodes.get_mut(element) {
            node.properties.insert(property, value);
        }
    }

    fn text(&self, element: ElementId) -> Option<String> {
        self.read().nodes.get(element).map(|n| n.text.clone())
    }

    fn set_text(&self, element: ElementId, text: &str) {
        if let Some(node) = self.write().nodes.get_mut(element) {
            node.text = text.to_string();
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.read()
            .nodes
            .get(element)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.write().nodes.get_mut(element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.read()
            .nodes
            .get(element)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn toggle_class(&self, element: ElementId, class: &str) -> bool {
        let mut inner = self.write();
        let Some(node) = inner.nodes.get_mut(element) else {
            return false;
        };
        if let Some(pos) = node.classes.iter().position(|c| c == class) {
            node.classes.remove(pos);
            false
        } else {
            node.classes.push(class.to_string());
            true
        }
    }

    fn style(&self, element: ElementId, name: &str) -> Option<String> {
        self.read()
            .nodes
            .get(element)
            .and_then(|n| n.styles.get(name).cloned())
    }

    fn set_style(&self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.write().nodes.get_mut(element) {
            node.styles.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_style(&self, element: ElementId, name: &str) {
        if let Some(node) = self.write().nodes.get_mut(element) {
            node.styles.remove(name);
        }
    }

    fn bounds(&self, element: ElementId) -> Option<Rect> {
        self.read().nodes.get(element).map(|n| n.bounds)
    }

    fn viewport(&self) -> Size {
        self.read().viewport
    }
}

// ============================================================================
// Selector matching
// ============================================================================

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(input: &str) -> Option<Self> {
        let mut compound = Compound::default();
        let mut rest = input;

        let tag_end = rest.find(&['.', '#'][..]).unwrap_or(rest.len());
        if tag_end > 0 {
            compound.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(&['.', '#'][..]).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return None;
            }
            match marker {
                '#' => compound.id = Some(name.to_string()),
                _ => compound.classes.push(name.to_string()),
            }
            rest = &body[end..];
        }

        Some(compound)
    }

    fn matches(&self, node: &ElementNode) -> bool {
        self.tag.as_deref().map_or(true, |t| node.tag == t)
            && self
                .id
                .as_deref()
                .map_or(true, |id| node.id.as_deref() == Some(id))
            && self.classes.iter().all(|c| node.classes.contains(c))
    }
}

/// Compounds joined by descendant combinators
#[derive(Debug, PartialEq)]
struct Selector(Vec<Compound>);

impl Selector {
    fn parse(input: &str) -> Option<Self> {
        let compounds = input
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()?;
        (!compounds.is_empty()).then_some(Selector(compounds))
    }

    fn matches(&self, doc: &DocumentInner, element: ElementId) -> bool {
        let Some((last, ancestors)) = self.0.split_last() else {
            return false;
        };
        let Some(node) = doc.nodes.get(element) else {
            return false;
        };
        if !last.matches(node) {
            return false;
        }

        // Greedy right-to-left walk up the ancestor chain
        let mut pending = ancestors.iter().rev().peekable();
        let mut current = node.parent;
        while let (Some(compound), Some(id)) = (pending.peek().copied(), current) {
            let Some(ancestor) = doc.nodes.get(id) else {
                break;
            };
            if compound.matches(ancestor) {
                pending.next();
            }
            current = ancestor.parent;
        }
        pending.peek().is_none()
    }
}
