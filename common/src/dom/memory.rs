//! In-memory document host built on `scraper`'s node tree.
//!
//! Markup is parsed by html5ever through [`Html::parse_fragment`], the
//! resulting nodes are grafted into a single `ego_tree` document, and
//! selections run through [`scraper::Selector`], so any selector a browser
//! accepts for `querySelectorAll` behaves the same here.

use std::collections::HashMap;
use std::fmt;

use ego_tree::{NodeRef, Tree};
use html5ever::{Attribute, LocalName, QualName, ns};
use indexmap::IndexMap;
use log::warn;
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, Selector, StrTendril};
use url::Url;

use super::{Event, EventTarget, Listener, ListenerId, NodeId, Platform};

const BLANK_LOCATION: &str = "about:blank";

struct Registration {
    id: ListenerId,
    target: EventTarget,
    kind: String,
    listener: Listener,
}

/// A [`Platform`] backed by an in-memory document, a fixed location, and a
/// scripted fullscreen capability set.
///
/// The document starts as `<html><head></head><body></body></html>`. Every
/// node gets a handle when it enters the tree and handles are never reused,
/// so handles of removed nodes simply stop matching selections.
///
/// ```
/// use navglot_common::dom::{MemoryDom, Platform};
///
/// let mut dom = MemoryDom::new();
/// let body = dom.body();
/// dom.set_inner_html(body, r#"<nav id="main"><a class="item">Home</a></nav>"#);
///
/// let links = dom.select_all(body, "#main > a.item:first-child");
/// assert_eq!(links.len(), 1);
/// assert_eq!(dom.text(links[0]), "Home");
/// ```
pub struct MemoryDom {
    tree: Tree<Node>,
    handles: Vec<ego_tree::NodeId>,
    lookup: HashMap<ego_tree::NodeId, NodeId>,
    document_element: NodeId,
    head: NodeId,
    body: NodeId,
    location: Option<Url>,
    listeners: Vec<Registration>,
    next_listener: u64,
    fullscreen_methods: Vec<String>,
    fullscreen_flags: IndexMap<String, bool>,
    fullscreen_calls: Vec<String>,
}

impl fmt::Debug for MemoryDom {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("MemoryDom")
            .field("location", &self.location())
            .field("nodes", &self.handles.len())
            .field("listeners", &self.listeners.len())
            .field("fullscreen_calls", &self.fullscreen_calls)
            .finish_non_exhaustive()
    }
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create an empty document located at `about:blank`.
    #[must_use]
    pub fn new() -> Self {
        let tree = Tree::new(Node::Document);
        let root = tree.root().id();
        let mut dom = Self {
            tree,
            handles: Vec::new(),
            lookup: HashMap::new(),
            document_element: NodeId::new(0),
            head: NodeId::new(0),
            body: NodeId::new(0),
            location: None,
            listeners: Vec::new(),
            next_listener: 0,
            fullscreen_methods: Vec::new(),
            fullscreen_flags: IndexMap::new(),
            fullscreen_calls: Vec::new(),
        };
        let document = dom.register(root);
        dom.document_element = dom.append_node(document, element("html"));
        dom.head = dom.append_node(dom.document_element, element("head"));
        dom.body = dom.append_node(dom.document_element, element("body"));
        dom
    }

    /// Create an empty document located at `location`.
    pub fn with_location(location: &str) -> Result<Self, url::ParseError> {
        let mut dom = Self::new();
        dom.location = Some(Url::parse(location)?);
        Ok(dom)
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Change the location hash and fire `hashchange` on the window when the
    /// location actually changed. Accepts the hash with or without `#`.
    /// Documents at `about:blank` have no hash to change.
    pub fn set_location_hash(&mut self, hash: &str) {
        let Some(location) = self.location.as_mut() else {
            return;
        };
        let fragment = hash.strip_prefix('#').unwrap_or(hash);
        let previous = location.as_str().to_owned();
        location.set_fragment(Some(fragment).filter(|value| !value.is_empty()));
        if previous != location.as_str() {
            self.dispatch(Event::new("hashchange", EventTarget::Window));
        }
    }

    /// Dispatch a `click` on `node`.
    pub fn click(&mut self, node: NodeId) {
        self.dispatch(Event::new("click", EventTarget::Node(node)));
    }

    /// Declare which fullscreen methods the host exposes.
    pub fn support_fullscreen_methods<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fullscreen_methods = names.into_iter().map(Into::into).collect();
    }

    /// Set a fullscreen state property without firing any event.
    pub fn set_fullscreen_flag(&mut self, name: &str, value: bool) {
        self.fullscreen_flags.insert(name.to_owned(), value);
    }

    /// Fullscreen methods invoked so far, in call order.
    #[must_use]
    pub fn fullscreen_calls(&self) -> &[String] {
        &self.fullscreen_calls
    }

    /// Number of live listeners for `kind` on `target`.
    #[must_use]
    pub fn listener_count(&self, target: EventTarget, kind: &str) -> usize {
        self.listeners
            .iter()
            .filter(|registration| registration.target == target && registration.kind == kind)
            .count()
    }

    fn register(&mut self, id: ego_tree::NodeId) -> NodeId {
        if let Some(handle) = self.lookup.get(&id) {
            return *handle;
        }
        let handle = NodeId::new(self.handles.len());
        self.handles.push(id);
        self.lookup.insert(id, handle);
        handle
    }

    fn tree_id(&self, node: NodeId) -> Option<ego_tree::NodeId> {
        self.handles.get(node.raw()).copied()
    }

    fn handle(&self, id: ego_tree::NodeId) -> Option<NodeId> {
        self.lookup.get(&id).copied()
    }

    fn node(&self, node: NodeId) -> Option<NodeRef<'_, Node>> {
        self.tree.get(self.tree_id(node)?)
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.node(node).and_then(ElementRef::wrap)
    }

    // Nodes appended under an unknown parent become orphans: they get a
    // handle but never appear in selections.
    fn append_node(&mut self, parent: NodeId, value: Node) -> NodeId {
        let Some(mut parent_node) = self.tree_id(parent).and_then(|id| self.tree.get_mut(id))
        else {
            let orphan = self.tree.orphan(value).id();
            return self.register(orphan);
        };
        let child = parent_node.append(value).id();
        self.register(child)
    }

    fn append_copy(&mut self, parent: NodeId, source: NodeRef<'_, Node>) {
        if !(source.value().is_element() || source.value().is_text()) {
            return;
        }
        let copy = self.append_node(parent, source.value().clone());
        for child in source.children() {
            self.append_copy(copy, child);
        }
    }

    fn child_handles(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|parent| {
                parent
                    .children()
                    .filter_map(|child| self.handle(child.id()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn clear_children(&mut self, node: NodeId) {
        for child in self.child_handles(node) {
            self.remove(child);
        }
    }
}

fn element(tag: &str) -> Node {
    Node::Element(Element::new(
        QualName::new(None, ns!(html), LocalName::from(tag)),
        Vec::new(),
    ))
}

fn text_node(text: &str) -> Node {
    Node::Text(Text {
        text: StrTendril::from(text),
    })
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
    out
}

impl Platform for MemoryDom {
    fn document_element(&self) -> NodeId {
        self.document_element
    }

    fn head(&self) -> Option<NodeId> {
        Some(self.head)
    }

    fn select_all(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let parsed = Selector::parse(selector)
            .inspect_err(|error| {
                warn!(target: "navglot::dom", "invalid selector `{selector}`: {error}");
            })
            .ok();
        parsed
            .zip(self.element(scope))
            .map(|(compiled, root)| {
                root.select(&compiled)
                    .filter_map(|found| self.handle(found.id()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|parent| {
                parent
                    .children()
                    .filter(|child| child.value().is_element())
                    .filter_map(|child| self.handle(child.id()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let (Some(ancestor_id), Some(current)) = (self.tree_id(ancestor), self.node(node)) else {
            return false;
        };
        current.id() == ancestor_id
            || current
                .ancestors()
                .any(|candidate| candidate.id() == ancestor_id)
    }

    fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.append_node(parent, element(&tag.to_ascii_lowercase()))
    }

    fn remove(&mut self, node: NodeId) {
        let Some(id) = self.tree_id(node) else {
            return;
        };
        let removed: Vec<NodeId> = self
            .tree
            .get(id)
            .map(|root| {
                root.descendants()
                    .filter_map(|descendant| self.handle(descendant.id()))
                    .collect()
            })
            .unwrap_or_default();
        if let Some(mut detached) = self.tree.get_mut(id) {
            detached.detach();
        }
        self.listeners.retain(|registration| match registration.target {
            EventTarget::Node(target) => !removed.contains(&target),
            EventTarget::Window | EventTarget::Document => true,
        });
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.attr(name).map(str::to_owned)
    }

    // Elements cache their id and classes, so an attribute change rebuilds
    // the element rather than editing its map in place.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(mut target) = self.tree_id(node).and_then(|id| self.tree.get_mut(id)) else {
            return;
        };
        let Node::Element(current) = target.value() else {
            return;
        };
        let mut attributes = current.attrs.clone();
        attributes.insert(
            QualName::new(None, ns!(), LocalName::from(name)),
            StrTendril::from(value),
        );
        *current = Element::new(
            current.name.clone(),
            attributes
                .into_iter()
                .map(|(qualified, content)| Attribute {
                    name: qualified,
                    value: content,
                })
                .collect(),
        );
    }

    fn text(&self, node: NodeId) -> String {
        self.node(node)
            .map(|root| {
                root.descendants()
                    .filter_map(|descendant| descendant.value().as_text())
                    .map(|text| &**text)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        if !text.is_empty() {
            self.append_node(node, text_node(text));
        }
    }

    fn inner_html(&self, node: NodeId) -> String {
        self.element(node).map_or_else(
            || {
                self.child_handles(node)
                    .into_iter()
                    .map(|child| self.outer_html(child))
                    .collect()
            },
            |found| found.inner_html(),
        )
    }

    fn set_inner_html(&mut self, node: NodeId, markup: &str) {
        self.clear_children(node);
        let fragment = Html::parse_fragment(markup);
        for parsed in fragment.root_element().children() {
            self.append_copy(node, parsed);
        }
    }

    fn outer_html(&self, node: NodeId) -> String {
        let Some(found) = self.node(node) else {
            return String::new();
        };
        match found.value() {
            Node::Element(_) => ElementRef::wrap(found)
                .map(|wrapped| wrapped.html())
                .unwrap_or_default(),
            Node::Text(text) => escape_text(text),
            _ => String::new(),
        }
    }

    fn location(&self) -> String {
        self.location
            .as_ref()
            .map_or_else(|| String::from(BLANK_LOCATION), Url::to_string)
    }

    fn location_hash(&self) -> String {
        self.location
            .as_ref()
            .and_then(Url::fragment)
            .filter(|fragment| !fragment.is_empty())
            .map(|fragment| format!("#{fragment}"))
            .unwrap_or_default()
    }

    fn listen(&mut self, target: EventTarget, kind: &str, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Registration {
            id,
            target,
            kind: kind.to_owned(),
            listener,
        });
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|registration| registration.id != id);
    }

    fn dispatch(&mut self, event: Event) {
        let listeners: Vec<Listener> = self
            .listeners
            .iter()
            .filter(|registration| {
                registration.target == event.target() && registration.kind == event.kind()
            })
            .map(|registration| Listener::clone(&registration.listener))
            .collect();
        for listener in listeners {
            listener(&mut *self, &event);
        }
    }

    fn fullscreen_method_available(&self, name: &str) -> bool {
        self.fullscreen_methods.iter().any(|method| method == name)
    }

    fn call_fullscreen_method(&mut self, name: &str) {
        self.fullscreen_calls.push(name.to_owned());
    }

    fn fullscreen_flag(&self, name: &str) -> bool {
        self.fullscreen_flags.get(name).copied().unwrap_or(false)
    }
}
