//! Arena-backed model of the host page's document.
//!
//! The engine never owns the page it runs in. Everything it reads or writes
//! goes through this surface: tree structure, text, geometry, focus, caret,
//! listener registration, mutation batches and synthetic input notifications.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    Input,
    KeyDown,
}

/// Collapsed selection: `offset` counts children for elements, chars for text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub node: NodeId,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub content_editable: bool,
    pub value: Option<String>,
    pub rect: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "blockquote",
    "section", "article", "main", "form", "header", "footer", "body",
];

const VOID_TAGS: &[&str] = &["br", "hr", "img", "meta", "link", "source", "wbr"];

pub fn is_block_tag(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

pub fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

/// Emits the line a pending block edge stands for, if content precedes it.
fn break_at_edge(out: &mut String, edge: &mut bool) {
    if std::mem::take(edge) && !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    listeners: HashMap<NodeId, BTreeSet<ListenerKind>>,
    focused: Option<NodeId>,
    caret: Option<Caret>,
    viewport: Rect,
    mutations_pending: bool,
    dispatched: Vec<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            listeners: HashMap::new(),
            focused: None,
            caret: None,
            viewport: Rect::new(0.0, 0.0, 1280.0, 800.0),
            mutations_pending: false,
            dispatched: Vec::new(),
        };
        let root = doc.create_element("html");
        let body = doc.create_element("body");
        doc.root = root;
        doc.body = body;
        doc.append_child(root, body);
        doc.mutations_pending = false;
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // --- Construction ---

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    // --- Tree structure ---

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&c| c == node)?;
        siblings.get(pos + 1).copied()
    }

    /// Appends `child` as last child of `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.contains(child, parent) {
            return;
        }
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.mutations_pending = true;
    }

    /// Inserts `child` right after `reference`. No-op when `reference` has no parent.
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) -> bool {
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        if reference == child || self.contains(child, parent) {
            return false;
        }
        self.detach(child);
        let siblings = &mut self.nodes[parent.0].children;
        let pos = siblings
            .iter()
            .position(|&c| c == reference)
            .map_or(siblings.len(), |p| p + 1);
        siblings.insert(pos, child);
        self.nodes[child.0].parent = Some(parent);
        self.mutations_pending = true;
        true
    }

    pub fn remove(&mut self, node: NodeId) {
        if self.parent(node).is_some() {
            self.detach(node);
            self.mutations_pending = true;
        }
    }

    /// Puts `replacement` where `old` was. `old` stays alive but disconnected.
    pub fn replace_with(&mut self, old: NodeId, replacement: NodeId) -> bool {
        if old == replacement {
            return false;
        }
        if !self.insert_after(old, replacement) {
            return false;
        }
        self.remove(old);
        true
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.mutations_pending = true;
    }

    /// True when `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    /// Pre-order walk of `node` and everything under it.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    // --- Queries ---

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text(_) => None,
        }
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag.as_str())
    }

    pub fn is_text(&self, node: NodeId) -> bool {
        matches!(
            self.nodes.get(node.0).map(|n| &n.kind),
            Some(NodeKind::Text(_))
        )
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_first(self.root, |doc, n| {
            doc.element(n).and_then(|el| el.id.as_deref()) == Some(id)
        })
    }

    pub fn find_first(
        &self,
        scope: NodeId,
        predicate: impl Fn(&Document, NodeId) -> bool,
    ) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| predicate(self, n))
    }

    /// Elements under `scope` (excluding `scope` itself) with the given tag.
    pub fn query_all(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .skip(1)
            .filter(|&n| self.tag(n) == Some(tag))
            .collect()
    }

    // --- Identity, classes, attributes ---

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(el) = self.element_mut(node) {
            el.id = Some(id.to_string());
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.retain(|c| c != class);
        }
    }

    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .and_then(|el| el.attributes.get(name))
            .map(String::as_str)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn set_content_editable(&mut self, node: NodeId, editable: bool) {
        if let Some(el) = self.element_mut(node) {
            el.content_editable = editable;
        }
    }

    /// Editable region root or a descendant of one.
    pub fn is_editable(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.element(n).is_some_and(|el| el.content_editable) {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    pub fn is_value_field(&self, node: NodeId) -> bool {
        matches!(self.tag(node), Some("textarea" | "input"))
    }

    // --- Text ---

    pub fn text_content(&self, node: NodeId) -> String {
        self.descendants(node)
            .into_iter()
            .filter_map(|n| match &self.nodes[n.0].kind {
                NodeKind::Text(t) => Some(t.as_str()),
                NodeKind::Element(_) => None,
            })
            .collect()
    }

    /// Rendered text: blocks on their own lines, `<br>` as a line break.
    ///
    /// Block edges only separate content and never add leading or trailing
    /// lines; every `<br>` outside a placeholder paragraph is kept, a trailing
    /// one included.
    pub fn inner_text(&self, node: NodeId) -> String {
        let mut out = String::new();
        let mut edge = false;
        self.collect_inner_text(node, &mut out, &mut edge);
        out
    }

    fn collect_inner_text(&self, node: NodeId, out: &mut String, edge: &mut bool) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(t) => {
                if !t.is_empty() {
                    break_at_edge(out, edge);
                    out.push_str(t);
                }
            }
            NodeKind::Element(el) => {
                if el.tag == "br" {
                    break_at_edge(out, edge);
                    out.push('\n');
                    return;
                }
                let block = is_block_tag(&el.tag);
                let children = self.children(node);
                let placeholder =
                    block && children.len() == 1 && self.tag(children[0]) == Some("br");
                *edge |= block;
                if !placeholder {
                    for &child in children {
                        self.collect_inner_text(child, out, edge);
                    }
                }
                *edge |= block;
            }
        }
    }

    /// Replaces the children of `node` with text, turning `\n` into `<br>`.
    pub fn set_inner_text(&mut self, node: NodeId, text: &str) {
        if self.element(node).is_none() {
            if let Some(Node {
                kind: NodeKind::Text(t),
                ..
            }) = self.nodes.get_mut(node.0)
            {
                *t = text.to_string();
                self.mutations_pending = true;
            }
            return;
        }
        self.clear_children(node);
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                let br = self.create_element("br");
                self.append_child(node, br);
            }
            if !line.is_empty() {
                let t = self.create_text(line);
                self.append_child(node, t);
            }
        }
    }

    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(|el| el.value.as_deref())
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(el) = self.element_mut(node) {
            el.value = Some(value.to_string());
        }
    }

    // --- Geometry ---

    pub fn rect(&self, node: NodeId) -> Option<Rect> {
        self.element(node).and_then(|el| el.rect)
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Option<Rect>) {
        if let Some(el) = self.element_mut(node) {
            el.rect = rect;
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Topmost connected element whose rect contains the point, in paint
    /// order: descendants over ancestors, later siblings over earlier ones.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .rev()
            .find(|&n| self.rect(n).is_some_and(|r| r.contains(x, y)))
    }

    // --- Focus & caret ---

    pub fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn caret(&self) -> Option<Caret> {
        self.caret
    }

    pub fn set_caret(&mut self, caret: Caret) {
        self.caret = Some(caret);
    }

    // --- Listeners ---

    pub fn add_listener(&mut self, node: NodeId, kind: ListenerKind) {
        self.listeners.entry(node).or_default().insert(kind);
    }

    pub fn remove_listener(&mut self, node: NodeId, kind: ListenerKind) {
        if let Some(kinds) = self.listeners.get_mut(&node) {
            kinds.remove(&kind);
            if kinds.is_empty() {
                self.listeners.remove(&node);
            }
        }
    }

    pub fn has_listener(&self, node: NodeId, kind: ListenerKind) -> bool {
        self.listeners
            .get(&node)
            .is_some_and(|kinds| kinds.contains(&kind))
    }

    /// Nodes carrying at least one listener.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Nearest node from `target` upwards listening for `kind` (bubbling order).
    pub fn listening_ancestor(&self, target: NodeId, kind: ListenerKind) -> Option<NodeId> {
        let mut current = Some(target);
        while let Some(n) = current {
            if self.has_listener(n, kind) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    // --- Notifications ---

    /// Drains the pending mutation batch. True when anything structural changed.
    pub fn take_mutations(&mut self) -> bool {
        std::mem::take(&mut self.mutations_pending)
    }

    pub fn dispatch_input(&mut self, target: NodeId) {
        self.dispatched.push(target);
    }

    pub fn take_dispatched(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.dispatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with_paragraphs(doc: &mut Document, lines: &[&str]) -> NodeId {
        let editor = doc.create_element("div");
        doc.set_content_editable(editor, true);
        let body = doc.body();
        doc.append_child(body, editor);
        for line in lines {
            let p = doc.create_element("p");
            doc.set_inner_text(p, line);
            doc.append_child(editor, p);
        }
        editor
    }

    #[test]
    fn test_inner_text_separates_blocks() {
        let mut doc = Document::new();
        let editor = editor_with_paragraphs(&mut doc, &["first", "second"]);
        assert_eq!(doc.inner_text(editor), "first\nsecond");
        assert_eq!(doc.text_content(editor), "firstsecond");
    }

    #[test]
    fn test_placeholder_paragraph_renders_empty() {
        let mut doc = Document::new();
        let editor = editor_with_paragraphs(&mut doc, &["hello"]);
        let p = doc.create_element("p");
        let br = doc.create_element("br");
        doc.append_child(p, br);
        doc.append_child(editor, p);
        assert_eq!(doc.inner_text(p), "");
        assert_eq!(doc.inner_text(editor), "hello");
    }

    #[test]
    fn test_set_inner_text_turns_newlines_into_breaks() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_inner_text(div, "a\nb");
        let tags: Vec<_> = doc
            .children(div)
            .iter()
            .map(|&c| doc.tag(c).unwrap_or("#text").to_string())
            .collect();
        assert_eq!(tags, vec!["#text", "br", "#text"]);
        assert_eq!(doc.inner_text(div), "a\nb");
    }

    #[test]
    fn test_trailing_break_survives_read_back() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_inner_text(div, "done\n");
        assert_eq!(doc.inner_text(div), "done\n");

        let mut text = doc.inner_text(div);
        text.push('c');
        doc.set_inner_text(div, &text);
        assert_eq!(doc.inner_text(div), "done\nc");
    }

    #[test]
    fn test_replace_keeps_old_node_detached() {
        let mut doc = Document::new();
        let body = doc.body();
        let old = doc.create_element("div");
        doc.set_id(old, "prompt-textarea");
        doc.append_child(body, old);
        doc.take_mutations();

        let new = doc.create_element("div");
        doc.set_id(new, "prompt-textarea");
        assert!(doc.replace_with(old, new));

        assert!(doc.take_mutations());
        assert!(!doc.take_mutations());
        assert!(!doc.is_connected(old));
        assert_eq!(doc.get_element_by_id("prompt-textarea"), Some(new));
    }

    #[test]
    fn test_insert_after_preserves_order() {
        let mut doc = Document::new();
        let editor = editor_with_paragraphs(&mut doc, &["a", "c"]);
        let first = doc.query_all(editor, "p")[0];
        let b = doc.create_element("p");
        doc.set_inner_text(b, "b");
        doc.insert_after(first, b);
        assert_eq!(doc.inner_text(editor), "a\nb\nc");
        assert_eq!(doc.next_sibling(first), Some(b));
    }

    #[test]
    fn test_listening_ancestor_bubbles() {
        let mut doc = Document::new();
        let editor = editor_with_paragraphs(&mut doc, &["x"]);
        let p = doc.query_all(editor, "p")[0];
        assert_eq!(doc.listening_ancestor(p, ListenerKind::Input), None);
        doc.add_listener(editor, ListenerKind::Input);
        assert_eq!(doc.listening_ancestor(p, ListenerKind::Input), Some(editor));
        assert_eq!(doc.listening_ancestor(p, ListenerKind::KeyDown), None);
        doc.remove_listener(editor, ListenerKind::Input);
        assert_eq!(doc.listener_count(), 0);
    }

    #[test]
    fn test_hit_test_follows_paint_order() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.set_rect(body, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        let under = doc.create_element("div");
        doc.set_rect(under, Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
        let nested = doc.create_element("span");
        doc.set_rect(nested, Some(Rect::new(0.0, 0.0, 30.0, 30.0)));
        let over = doc.create_element("div");
        doc.set_rect(over, Some(Rect::new(10.0, 10.0, 50.0, 50.0)));
        doc.append_child(body, under);
        doc.append_child(under, nested);
        doc.append_child(body, over);

        assert_eq!(doc.hit_test(20.0, 20.0), Some(over));
        assert_eq!(doc.hit_test(5.0, 5.0), Some(nested));
        assert_eq!(doc.hit_test(40.0, 5.0), Some(under));
        assert_eq!(doc.hit_test(90.0, 90.0), Some(body));
        assert_eq!(doc.hit_test(200.0, 200.0), None);
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner);
        doc.append_child(inner, outer);
        assert_eq!(doc.parent(outer), None);
        assert!(doc.contains(outer, inner));
    }
}
