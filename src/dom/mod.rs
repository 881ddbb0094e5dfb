//! In-memory page document.
//!
//! The renderers and viewers never talk to a browser directly; they work
//! against this element tree, which stands in for the "page root" capability
//! a host provides. It covers exactly what the site logic needs:
//!
//! - element creation, id/class/attribute/text access, a `hidden` flag
//! - `set_inner_html` for injected layout partials, parsed into real nodes
//!   by [`fragment`] so later passes can query into them
//! - a small selector subset: `#id`, `.class`, `tag`, `tag[attr="value"]`
//! - click and keydown listeners with bubbling, plus document-level listeners
//! - modal dialogs with a top-layer stack and focus trapping
//! - host-supplied layout bounds used for outside-click dismissal
//!
//! The tree uses interior mutability so that many cooperative tasks can hold
//! `&Document` at once, the same way page scripts share one DOM. No borrow is
//! ever held across a listener call or an `.await`.
//!
//! Serialization goes through maud's [`Render`] trait, so text and attribute
//! values are escaped by the same code that escapes `html!` interpolation.

mod fragment;

use maud::{Escaper, Render};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;
use std::rc::Rc;

/// Handle to a node in a [`Document`]. Only meaningful for the document that
/// created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Axis-aligned layout box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    /// Edges count as inside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

/// A dispatched UI event.
#[derive(Debug)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    pub key: Option<Key>,
    /// Client coordinates of a pointer event; `None` for synthetic clicks
    /// (keyboard activation, scripted `click()`).
    pub pointer: Option<(f64, f64)>,
    default_prevented: Cell<bool>,
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            key: None,
            pointer: None,
            default_prevented: Cell::new(false),
        }
    }

    pub fn click_at(target: NodeId, x: f64, y: f64) -> Self {
        Self {
            pointer: Some((x, y)),
            ..Self::click(target)
        }
    }

    pub fn key(target: NodeId, key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            key: Some(key),
            pointer: None,
            default_prevented: Cell::new(false),
        }
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

pub type Listener = Rc<dyn Fn(&Document, &Event)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerTarget {
    Node(NodeId),
    Document,
}

#[derive(Debug)]
enum NodeKind {
    Element(String),
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    hidden: bool,
    bounds: Option<Rect>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            hidden: false,
            bounds: None,
        }
    }

    fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }
}

/// Elements that never get a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A page's element tree rooted at `<body>`.
pub struct Document {
    nodes: RefCell<Vec<NodeData>>,
    root: NodeId,
    listeners: RefCell<Vec<(ListenerTarget, EventKind, Listener)>>,
    /// Open modals, innermost last, each with the element to refocus on close.
    top_layer: RefCell<Vec<(NodeId, Option<NodeId>)>>,
    focused: Cell<Option<NodeId>>,
    navigations: RefCell<Vec<String>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: RefCell::new(vec![NodeData::new(NodeKind::Element("body".into()))]),
            root: NodeId(0),
            listeners: RefCell::new(Vec::new()),
            top_layer: RefCell::new(Vec::new()),
            focused: Cell::new(None),
            navigations: RefCell::new(Vec::new()),
        }
    }

    /// The `<body>` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    // ------------------------------------------------------------------
    // Construction and mutation
    // ------------------------------------------------------------------

    fn push(&self, data: NodeData) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(data);
        NodeId(nodes.len() - 1)
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> NodeId {
        self.push(NodeData::new(NodeKind::Element(tag.to_ascii_lowercase())))
    }

    /// Create a detached text node.
    pub fn create_text(&self, text: &str) -> NodeId {
        self.push(NodeData::new(NodeKind::Text(text.to_string())))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append(&self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(parent);
        nodes[parent.0].children.push(child);
    }

    fn detach(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    /// Remove every child of `node` (the `innerHTML = ""` idiom).
    ///
    /// The removed subtrees are discarded: listeners registered on any of
    /// their nodes are dropped with them.
    pub fn clear_children(&self, node: NodeId) {
        let removed = {
            let mut nodes = self.nodes.borrow_mut();
            let children = std::mem::take(&mut nodes[node.0].children);
            for child in &children {
                nodes[child.0].parent = None;
            }
            let mut removed = HashSet::new();
            let mut stack = children;
            while let Some(n) = stack.pop() {
                if removed.insert(n) {
                    stack.extend(nodes[n.0].children.iter().copied());
                }
            }
            removed
        };
        if removed.is_empty() {
            return;
        }
        self.listeners.borrow_mut().retain(|(target, _, _)| match target {
            ListenerTarget::Node(n) => !removed.contains(n),
            ListenerTarget::Document => true,
        });
    }

    /// Replace the children of `node` with a single text node.
    pub fn set_text(&self, node: NodeId, text: &str) {
        self.clear_children(node);
        let text_node = self.create_text(text);
        self.append(node, text_node);
    }

    /// Replace the children of `node` with the parsed HTML fragment.
    pub fn set_inner_html(&self, node: NodeId, html: &str) {
        self.clear_children(node);
        for child in fragment::parse(self, html) {
            self.append(node, child);
        }
    }

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        match name {
            "class" => {
                self.nodes.borrow_mut()[node.0].classes =
                    value.split_whitespace().map(str::to_string).collect();
            }
            "hidden" => self.set_hidden(node, true),
            _ => {
                self.nodes.borrow_mut()[node.0]
                    .attrs
                    .insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn remove_attr(&self, node: NodeId, name: &str) {
        let mut nodes = self.nodes.borrow_mut();
        match name {
            "class" => nodes[node.0].classes.clear(),
            "hidden" => nodes[node.0].hidden = false,
            _ => {
                nodes[node.0].attrs.remove(name);
            }
        }
    }

    pub fn add_class(&self, node: NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, node: NodeId, class: &str) {
        self.nodes.borrow_mut()[node.0].classes.retain(|c| c != class);
    }

    pub fn set_hidden(&self, node: NodeId, hidden: bool) {
        self.nodes.borrow_mut()[node.0].hidden = hidden;
    }

    /// Record the layout box the host computed for `node`.
    pub fn set_bounds(&self, node: NodeId, rect: Rect) {
        self.nodes.borrow_mut()[node.0].bounds = Some(rect);
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.nodes.borrow()[node.0].tag().map(str::to_string)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        match name {
            "class" => Some(nodes[node.0].classes.join(" ")).filter(|c| !c.is_empty()),
            "hidden" => nodes[node.0].hidden.then(String::new),
            _ => nodes[node.0].attrs.get(name).cloned(),
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0].classes.iter().any(|c| c == class)
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.nodes.borrow()[node.0].hidden
    }

    pub fn bounds(&self, node: NodeId) -> Option<Rect> {
        self.nodes.borrow()[node.0].bounds
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    /// Element children only; text nodes are skipped.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        nodes[node.0]
            .children
            .iter()
            .copied()
            .filter(|c| nodes[c.0].tag().is_some())
            .collect()
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self, node: NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        collect_text(&nodes, node, &mut out);
        out
    }

    /// True when `node` is `ancestor` or lives beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = nodes[n.0].parent;
        }
        false
    }

    /// True when `node` is attached to the document tree.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Shorthand for `query("#id")`.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_within(self.root, &format!("#{id}"))
    }

    /// First connected element matching `selector`, in document order.
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_within(self.root, selector)
    }

    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_all_within(self.root, selector)
    }

    /// First descendant of `scope` (excluding `scope`) matching `selector`.
    pub fn query_within(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        self.query_all_within(scope, selector).into_iter().next()
    }

    pub fn query_all_within(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            if selector.matches(&nodes[n.0]) {
                out.push(n);
            }
            stack.extend(nodes[n.0].children.iter().rev().copied());
        }
        out
    }

    /// Nearest ancestor-or-self matching `selector`.
    pub fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        let nodes = self.nodes.borrow();
        let mut cur = Some(node);
        while let Some(n) = cur {
            if selector.matches(&nodes[n.0]) {
                return Some(n);
            }
            cur = nodes[n.0].parent;
        }
        None
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn add_listener(&self, node: NodeId, kind: EventKind, listener: Listener) {
        self.listeners
            .borrow_mut()
            .push((ListenerTarget::Node(node), kind, listener));
    }

    pub fn add_document_listener(&self, kind: EventKind, listener: Listener) {
        self.listeners
            .borrow_mut()
            .push((ListenerTarget::Document, kind, listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `event` to listeners on the target, then each ancestor, then
    /// the document. An unprevented click inside a link with an `href`
    /// performs a navigation, recorded in [`Document::navigations`].
    pub fn dispatch(&self, event: &Event) {
        let path: Vec<NodeId> = {
            let nodes = self.nodes.borrow();
            let mut path = Vec::new();
            let mut cur = Some(event.target);
            while let Some(n) = cur {
                path.push(n);
                cur = nodes[n.0].parent;
            }
            path
        };

        let to_call: Vec<Listener> = {
            let registered = self.listeners.borrow();
            let on_path = path.iter().flat_map(|node| {
                registered
                    .iter()
                    .filter(move |(t, k, _)| *t == ListenerTarget::Node(*node) && *k == event.kind)
                    .map(|(_, _, l)| l.clone())
            });
            let on_document = registered
                .iter()
                .filter(|(t, k, _)| *t == ListenerTarget::Document && *k == event.kind)
                .map(|(_, _, l)| l.clone());
            on_path.chain(on_document).collect()
        };

        for listener in to_call {
            listener(self, event);
        }

        if event.kind == EventKind::Click && !event.default_prevented() {
            if let Some(href) = self
                .closest(event.target, "a")
                .and_then(|a| self.attr(a, "href"))
            {
                self.navigations.borrow_mut().push(href);
            }
        }
    }

    /// Hrefs followed by unprevented link clicks, oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.navigations.borrow().clone()
    }

    // ------------------------------------------------------------------
    // Dialogs and focus
    // ------------------------------------------------------------------

    /// Open `dialog` modally: mark it `open`, push it onto the top layer and
    /// move focus to its first focusable descendant. Re-showing an already
    /// open dialog only refreshes focus.
    pub fn show_modal(&self, dialog: NodeId) {
        self.set_attr(dialog, "open", "");
        {
            let mut layer = self.top_layer.borrow_mut();
            if !layer.iter().any(|(d, _)| *d == dialog) {
                layer.push((dialog, self.focused.get()));
            }
        }
        let target = self.first_focusable(dialog).unwrap_or(dialog);
        self.focused.set(Some(target));
    }

    /// Close `dialog` and return focus to whatever held it before opening.
    pub fn close_dialog(&self, dialog: NodeId) {
        self.remove_attr(dialog, "open");
        let restore = {
            let mut layer = self.top_layer.borrow_mut();
            layer
                .iter()
                .position(|(d, _)| *d == dialog)
                .map(|pos| layer.remove(pos).1)
        };
        if let Some(previous) = restore {
            self.focused.set(previous);
        }
    }

    pub fn is_open(&self, dialog: NodeId) -> bool {
        self.attr(dialog, "open").is_some()
    }

    /// The innermost open modal, if any.
    pub fn active_modal(&self) -> Option<NodeId> {
        self.top_layer.borrow().last().map(|(d, _)| *d)
    }

    /// Move focus to `node`. While a modal is open, focus cannot leave it.
    pub fn focus(&self, node: NodeId) -> bool {
        if let Some(modal) = self.active_modal() {
            if !self.contains(modal, node) {
                return false;
            }
        }
        self.focused.set(Some(node));
        true
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused.get()
    }

    fn first_focusable(&self, scope: NodeId) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        let mut stack: Vec<NodeId> = nodes[scope.0].children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            let data = &nodes[n.0];
            let focusable = match data.tag() {
                Some("button") => !data.attrs.contains_key("disabled"),
                Some("a") => data.attrs.contains_key("href"),
                Some(_) => data.attrs.contains_key("tabindex"),
                None => false,
            };
            if focusable && !data.hidden {
                return Some(n);
            }
            if !data.hidden {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        None
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialized children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        for child in &nodes[node.0].children {
            write_node(&nodes, *child, &mut out);
        }
        out
    }

    /// Serialized `node` including its own tag.
    pub fn outer_html(&self, node: NodeId) -> String {
        let nodes = self.nodes.borrow();
        let mut out = String::new();
        write_node(&nodes, node, &mut out);
        out
    }
}

impl Render for Document {
    fn render_to(&self, buffer: &mut String) {
        let nodes = self.nodes.borrow();
        write_node(&nodes, self.root, buffer);
    }
}

fn collect_text(nodes: &[NodeData], node: NodeId, out: &mut String) {
    match &nodes[node.0].kind {
        NodeKind::Text(t) => out.push_str(t),
        NodeKind::Element(_) => {
            for child in &nodes[node.0].children {
                collect_text(nodes, *child, out);
            }
        }
    }
}

fn write_escaped(out: &mut String, text: &str) {
    // Writing into a String cannot fail.
    let _ = Escaper::new(out).write_str(text);
}

fn write_node(nodes: &[NodeData], node: NodeId, out: &mut String) {
    let data = &nodes[node.0];
    let tag = match &data.kind {
        NodeKind::Text(t) => return write_escaped(out, t),
        NodeKind::Element(tag) => tag,
    };

    out.push('<');
    out.push_str(tag);
    if !data.classes.is_empty() {
        out.push_str(" class=\"");
        write_escaped(out, &data.classes.join(" "));
        out.push('"');
    }
    for (name, value) in &data.attrs {
        out.push(' ');
        out.push_str(name);
        if !value.is_empty() {
            out.push_str("=\"");
            write_escaped(out, value);
            out.push('"');
        }
    }
    if data.hidden {
        out.push_str(" hidden");
    }
    out.push('>');

    if VOID_TAGS.contains(&tag.as_str()) {
        return;
    }
    for child in &data.children {
        write_node(nodes, *child, out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// One compound selector: optional tag plus at most one of id, class or
/// attribute-equals.
#[derive(Debug, PartialEq)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    class: Option<String>,
    attr: Option<(String, String)>,
}

impl Selector {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        let split = input.find(['#', '.', '[']).unwrap_or(input.len());
        let (tag, rest) = input.split_at(split);
        let mut selector = Selector {
            tag: (!tag.is_empty()).then(|| tag.to_ascii_lowercase()),
            id: None,
            class: None,
            attr: None,
        };

        if let Some(id) = rest.strip_prefix('#') {
            selector.id = Some(id.to_string());
        } else if let Some(class) = rest.strip_prefix('.') {
            selector.class = Some(class.to_string());
        } else if let Some(body) = rest.strip_prefix('[') {
            let body = body.strip_suffix(']')?;
            let (name, value) = body.split_once('=')?;
            let value = value.trim_matches(|c| c == '"' || c == '\'');
            selector.attr = Some((name.trim().to_string(), value.to_string()));
        } else if !rest.is_empty() {
            return None;
        }
        Some(selector)
    }

    fn matches(&self, node: &NodeData) -> bool {
        let Some(tag) = node.tag() else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if node.attrs.get("id") != Some(id) {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !node.classes.iter().any(|c| c == class) {
                return false;
            }
        }
        if let Some((name, value)) = &self.attr {
            if node.attrs.get(name) != Some(value) {
                return false;
            }
        }
        true
    }
}
