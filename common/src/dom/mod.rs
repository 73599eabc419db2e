//! Platform seam between the locale and navbar logic and a document host.
//!
//! Everything that touches a live page goes through [`Platform`]: element
//! selection and mutation, the current location, event subscription, and the
//! vendor-specific fullscreen entry points. Browser hosts implement the trait
//! over their own DOM bindings; [`MemoryDom`] implements it over an in-memory
//! tree so the rest of the workspace can run without a browser.
//!
//! Node handles are opaque [`NodeId`] values minted by the host. Handles of
//! removed nodes stay valid as values but no longer match any selection.

use std::rc::Rc;

use serde_json::Value;

mod memory;

pub use memory::MemoryDom;

/// Opaque handle for a node owned by a [`Platform`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

impl NodeId {
    /// Wrap a host-specific node index.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Return the host-specific node index.
    #[must_use]
    pub const fn raw(self) -> usize {
        self.0
    }
}

/// Handle returned by [`Platform::listen`], used to detach the listener.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Wrap a host-specific listener counter.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the host-specific listener counter.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Where an event is delivered.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EventTarget {
    /// The global window object (`hashchange`).
    Window,
    /// The document object (`fullscreenchange` and its vendor variants).
    Document,
    /// A single element.
    Node(NodeId),
}

/// A dispatched event with an optional structured payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    kind: String,
    target: EventTarget,
    detail: Option<Value>,
}

impl Event {
    /// Create an event without a payload.
    #[must_use]
    pub fn new(kind: impl Into<String>, target: EventTarget) -> Self {
        Self {
            kind: kind.into(),
            target,
            detail: None,
        }
    }

    /// Attach a payload, mirroring a `CustomEvent` detail.
    #[must_use]
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    /// Event type, for example `click`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Target the event was dispatched to.
    #[must_use]
    pub const fn target(&self) -> EventTarget {
        self.target
    }

    /// Payload carried by the event, if any.
    #[must_use]
    pub const fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }
}

/// Callback invoked with the platform that dispatched the event.
pub type Listener = Rc<dyn Fn(&mut dyn Platform, &Event)>;

/// Box a closure as a [`Listener`].
#[must_use]
pub fn listener<F>(callback: F) -> Listener
where
    F: Fn(&mut dyn Platform, &Event) + 'static,
{
    Rc::new(callback)
}

/// Host operations consumed by the locale registry and the navbar.
///
/// Selections follow `querySelectorAll` semantics: they return the matching
/// descendants of `scope` in document order, and selectors may refer to
/// ancestors outside `scope`. Selectors the host cannot parse match nothing. Class helpers operate on the whitespace
/// separated `class` attribute.
pub trait Platform {
    /// The root element of the document (`<html>`).
    fn document_element(&self) -> NodeId;

    /// The `<head>` element, when the document has one.
    fn head(&self) -> Option<NodeId>;

    /// All elements below `scope` that match `selector`.
    fn select_all(&self, scope: NodeId, selector: &str) -> Vec<NodeId>;

    /// First element below `scope` that matches `selector`.
    fn select(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        self.select_all(scope, selector).into_iter().next()
    }

    /// Element children of `node`, skipping text.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Whether `node` is `ancestor` or lies below it in the live document.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Append a new element named `tag` as the last child of `parent`.
    fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId;

    /// Detach `node` and its subtree, dropping listeners attached to them.
    fn remove(&mut self, node: NodeId);

    /// Attribute value on `node`.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Set an attribute value on `node`.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Whether `class` is present on `node`.
    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|entry| entry == class))
    }

    /// Add or remove `class` on `node`.
    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        let current = self.attribute(node, "class").unwrap_or_default();
        let mut classes: Vec<&str> = current
            .split_whitespace()
            .filter(|entry| *entry != class)
            .collect();
        if enabled {
            classes.push(class);
        }
        self.set_attribute(node, "class", &classes.join(" "));
    }

    /// Concatenated text content of `node`.
    fn text(&self, node: NodeId) -> String;

    /// Replace the children of `node` with a single text node.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Serialised markup of the children of `node`.
    fn inner_html(&self, node: NodeId) -> String;

    /// Replace the children of `node` with parsed `markup`.
    fn set_inner_html(&mut self, node: NodeId, markup: &str);

    /// Serialised markup of `node` itself.
    fn outer_html(&self, node: NodeId) -> String;

    /// The full page location (`document.location.href`).
    fn location(&self) -> String;

    /// The location hash including the leading `#`, or an empty string.
    fn location_hash(&self) -> String;

    /// Subscribe `listener` to `kind` events delivered to `target`.
    fn listen(&mut self, target: EventTarget, kind: &str, listener: Listener) -> ListenerId;

    /// Remove a listener; unknown handles are ignored.
    fn unlisten(&mut self, id: ListenerId);

    /// Deliver `event` to the listeners registered for its target and type.
    fn dispatch(&mut self, event: Event);

    /// Whether the host exposes the named fullscreen method, such as
    /// `requestFullscreen` or `webkitCancelFullScreen`.
    fn fullscreen_method_available(&self, name: &str) -> bool;

    /// Invoke a fullscreen method previously reported as available.
    fn call_fullscreen_method(&mut self, name: &str);

    /// Read a fullscreen state property such as `fullscreen` or
    /// `msFullscreenElement`, coerced to a boolean.
    fn fullscreen_flag(&self, name: &str) -> bool;
}
