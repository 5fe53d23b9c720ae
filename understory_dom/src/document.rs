// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document tree.

use alloc::string::String;
use alloc::vec::Vec;
use alloc::{format, vec};
use smallvec::{SmallVec, smallvec};

use crate::mutation::{MutationRecord, ObserveOptions};
use crate::registry::{LinkRegistry, StyleRegistry};
use crate::style::StyleMap;
use crate::NodeId;

/// Element payload: tag name, attributes, inline style.
#[derive(Clone, Debug, Default)]
pub struct Element {
    tag: String,
    /// Lowercase names, insertion order.
    attributes: Vec<(String, String)>,
    style: StyleMap,
    disabled: bool,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// The lowercase tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The inline style.
    #[must_use]
    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    /// Looks up an attribute, ignoring ASCII case.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Iterates `(name, value)` pairs in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// What a node holds.
#[derive(Clone, Debug)]
pub enum NodeData {
    /// An element.
    Element(Element),
    /// A text node.
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    data: NodeData,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// A live document tree.
///
/// The document owns every node, the head-level [`StyleRegistry`] and
/// [`LinkRegistry`], and the queue of [`MutationRecord`]s collected while
/// observation is on.
///
/// A fresh document contains a connected `html` root with a `body` child.
/// Nodes created with [`Document::create_element`] start detached; they become
/// connected once appended somewhere under the root.
///
/// ```rust
/// use understory_dom::{Document, MutationRecord, ObserveOptions};
///
/// let mut doc = Document::new();
/// doc.observe(ObserveOptions::all());
///
/// let div = doc.create_element("DIV");
/// doc.set_attribute(div, "Anchor", "topLeft"); // detached: not recorded
/// doc.append_child(doc.body(), div);
///
/// let records = doc.take_records();
/// assert_eq!(records.len(), 1);
/// assert!(matches!(&records[0], MutationRecord::ChildList { added, .. } if added[0] == div));
/// assert_eq!(doc.tag_name(div), Some("div"));
/// assert_eq!(doc.attribute(div, "anchor"), Some("topLeft"));
/// ```
#[derive(Clone, Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
    body: NodeId,
    styles: StyleRegistry,
    links: LinkRegistry,
    observe: ObserveOptions,
    records: Vec<MutationRecord>,
    next_uid: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document with an `html` root and a `body` child.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::new(0, 0),
            body: NodeId::new(0, 0),
            styles: StyleRegistry::new(),
            links: LinkRegistry::default(),
            observe: ObserveOptions::empty(),
            records: Vec::new(),
            next_uid: 0,
        };
        doc.root = doc.alloc(NodeData::Element(Element::new("html")));
        doc.body = doc.alloc(NodeData::Element(Element::new("body")));
        doc.link(doc.root, doc.body, None);
        doc
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `body` element.
    #[must_use]
    pub fn body(&self) -> NodeId {
        self.body
    }

    // ---------------------------------------------------------------------
    // Node lifecycle

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeData::Element(Element::new(tag)))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(String::from(text)))
    }

    /// Returns `true` if `id` refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns `true` if `id` is a live element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Returns `true` if `id` is reachable from the root.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.node(node).and_then(|n| n.parent);
        }
        false
    }

    /// Appends `child` as the last child of `parent`, detaching it first.
    ///
    /// Returns `false` if either node is stale, `parent` is not an element, or
    /// the insertion would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` under `parent` before `reference`, or last when `reference` is `None`.
    ///
    /// A `reference` that is not a child of `parent` appends at the end.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> bool {
        if !self.is_element(parent) || !self.is_alive(child) || self.is_inclusive_ancestor(child, parent) {
            return false;
        }
        self.detach(child);
        self.link(parent, child, reference);
        if self.observe.contains(ObserveOptions::CHILD_LIST) && self.is_connected(parent) {
            self.records.push(MutationRecord::ChildList {
                target: parent,
                added: smallvec![child],
            });
        }
        true
    }

    /// Detaches `id` from its parent, keeping the node and its subtree alive.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return false;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_mut(id) {
            n.parent = None;
        }
        true
    }

    /// Removes `id` and its whole subtree.
    ///
    /// Every scoped style block owned by a removed node is removed from the
    /// registry too, so no head entry outlives the node it was keyed to.
    /// The root and body cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) || id == self.root || id == self.body {
            return false;
        }
        self.detach(id);
        for node in self.subtree(id) {
            self.styles.remove_owned_by(node);
            let slot = &mut self.slots[node.idx()];
            slot.node = None;
            self.free.push(node.0);
        }
        true
    }

    // ---------------------------------------------------------------------
    // Structure

    /// The parent of `id`, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// The children of `id`, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns `true` if `id` has at least one child node.
    #[must_use]
    pub fn has_content(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    /// `id` followed by all of its descendants, in pre-order.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Returns `true` if `ancestor` is `node` or one of its ancestors.
    #[must_use]
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    // ---------------------------------------------------------------------
    // Element data

    /// The element payload of `id`.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id)?.data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    /// The data of `id`.
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).map(|n| &n.data)
    }

    /// The lowercase tag name of an element.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::tag)
    }

    /// Reads an attribute, ignoring ASCII case of `name`.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attribute(name)
    }

    /// Returns `true` if the attribute is present.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    /// A snapshot of all attributes of an element, in insertion order.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        self.element(id)
            .map(|e| e.attributes.clone())
            .unwrap_or_default()
    }

    /// Writes an attribute. Names are stored lowercase.
    ///
    /// Every write on a connected element is recorded while attribute
    /// observation is on, even when the value does not change.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let name = name.to_ascii_lowercase();
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        match element.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = String::from(value),
            None => element.attributes.push((name.clone(), String::from(value))),
        }
        self.record_attribute(id, name);
        true
    }

    /// Removes an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        let element = self.element_mut(id)?;
        let idx = element.attributes.iter().position(|(k, _)| *k == name)?;
        let (_, old) = element.attributes.remove(idx);
        self.record_attribute(id, name);
        Some(old)
    }

    /// The inline style of an element.
    #[must_use]
    pub fn style(&self, id: NodeId) -> Option<&StyleMap> {
        self.element(id).map(Element::style)
    }

    /// Mutable access to the inline style of an element.
    ///
    /// Style writes are never recorded as mutations.
    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut StyleMap> {
        self.element_mut(id).map(|e| &mut e.style)
    }

    /// Reads one inline style property, or `""` when unset or not an element.
    #[must_use]
    pub fn style_value(&self, id: NodeId, property: &str) -> &str {
        self.style(id).map(|s| s.value(property)).unwrap_or("")
    }

    /// Writes one inline style property. An empty value removes it.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) -> bool {
        match self.style_mut(id) {
            Some(style) => {
                style.set(property, value);
                true
            }
            None => false,
        }
    }

    /// Whether the element is flagged disabled.
    #[must_use]
    pub fn is_disabled(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| e.disabled)
    }

    /// Flags the element as disabled or enabled.
    pub fn set_disabled(&mut self, id: NodeId, disabled: bool) {
        if let Some(e) = self.element_mut(id) {
            e.disabled = disabled;
        }
    }

    // ---------------------------------------------------------------------
    // Classes and ids

    /// The class tokens of an element.
    #[must_use]
    pub fn classes(&self, id: NodeId) -> Vec<&str> {
        self.attribute(id, "class")
            .map(|c| c.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Returns `true` if the element carries `class`.
    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|t| t == class))
    }

    /// Adds a class token unless already present. Empty tokens are ignored.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        let class = class.trim();
        if class.is_empty() || !self.is_element(id) || self.has_class(id, class) {
            return false;
        }
        let value = match self.attribute(id, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => String::from(class),
        };
        self.set_attribute(id, "class", &value)
    }

    /// Removes a class token. Returns `true` if it was present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        if !self.has_class(id, class) {
            return false;
        }
        let value: Vec<&str> = self
            .classes(id)
            .into_iter()
            .filter(|t| *t != class)
            .collect();
        let value = value.join(" ");
        self.set_attribute(id, "class", &value)
    }

    /// The `id` attribute of an element.
    #[must_use]
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.attribute(id, "id").filter(|v| !v.is_empty())
    }

    /// Finds the first connected element whose `id` attribute equals `value`.
    #[must_use]
    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        self.subtree(self.root)
            .into_iter()
            .find(|n| self.element_id(*n) == Some(value))
    }

    /// Generates an element id that no live element currently uses.
    pub fn generate_id(&mut self) -> String {
        loop {
            self.next_uid += 1;
            let candidate = format!("u{}", base36(self.next_uid));
            let taken = self
                .slots
                .iter()
                .filter_map(|s| match &s.node.as_ref()?.data {
                    NodeData::Element(e) => e.attribute("id"),
                    NodeData::Text(_) => None,
                })
                .any(|v| v == candidate);
            if !taken {
                return candidate;
            }
        }
    }

    // ---------------------------------------------------------------------
    // Text

    /// Concatenated text of all text nodes under `id`.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.subtree(id) {
            if let Some(NodeData::Text(t)) = self.data(node) {
                out.push_str(t);
            }
        }
        out
    }

    /// Replaces all children of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if !self.is_element(id) {
            return;
        }
        for child in self.children(id).to_vec() {
            self.remove(child);
        }
        if !text.is_empty() {
            let t = self.create_text(text);
            self.append_child(id, t);
        }
    }

    // ---------------------------------------------------------------------
    // Head

    /// The head-level style block registry.
    #[must_use]
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// Mutable access to the style block registry.
    pub fn styles_mut(&mut self) -> &mut StyleRegistry {
        &mut self.styles
    }

    /// The stylesheet link registry.
    #[must_use]
    pub fn links(&self) -> &LinkRegistry {
        &self.links
    }

    /// Adds a stylesheet link unless already present.
    pub fn add_link(&mut self, href: &str) -> bool {
        self.links.add(href)
    }

    // ---------------------------------------------------------------------
    // Observation

    /// Starts recording the given kinds of mutation for the whole connected tree.
    pub fn observe(&mut self, options: ObserveOptions) {
        self.observe = options;
    }

    /// Stops recording and drops pending records.
    pub fn disconnect(&mut self) {
        self.observe = ObserveOptions::empty();
        self.records.clear();
    }

    /// The current observation options.
    #[must_use]
    pub fn observed(&self) -> ObserveOptions {
        self.observe
    }

    /// Returns `true` if records are waiting to be taken.
    #[must_use]
    pub fn has_records(&self) -> bool {
        !self.records.is_empty()
    }

    /// Takes all pending records, oldest first.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        core::mem::take(&mut self.records)
    }

    // ---------------------------------------------------------------------
    // Internals

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let node = Node {
            parent: None,
            children: SmallVec::new(),
            data,
        };
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.node = Some(node);
            NodeId::new(idx, slot.generation)
        } else {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "a document never holds more than u32::MAX nodes"
            )]
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            NodeId::new(idx, 1)
        }
    }

    fn link(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if let Some(p) = self.node_mut(parent) {
            let at = reference
                .and_then(|r| p.children.iter().position(|c| *c == r))
                .unwrap_or(p.children.len());
            p.children.insert(at, child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn record_attribute(&mut self, id: NodeId, name: String) {
        if self.observe.contains(ObserveOptions::ATTRIBUTES) && self.is_connected(id) {
            self.records.push(MutationRecord::Attribute { target: id, name });
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.node.as_mut()
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut buf = Vec::new();
    loop {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_document_has_connected_body() {
        let doc = Document::new();
        assert_eq!(doc.tag_name(doc.root()), Some("html"));
        assert_eq!(doc.tag_name(doc.body()), Some("body"));
        assert!(doc.is_connected(doc.body()));
    }

    #[test]
    fn stale_ids_do_not_alias() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        assert!(doc.remove(a));
        let b = doc.create_element("span");
        assert_eq!(a.index(), b.index());
        assert!(!doc.is_alive(a));
        assert_eq!(doc.tag_name(b), Some("span"));
    }

    #[test]
    fn only_connected_mutations_are_recorded() {
        let mut doc = Document::new();
        doc.observe(ObserveOptions::all());

        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        doc.append_child(outer, inner);
        doc.set_attribute(inner, "gap", "4px");
        assert!(!doc.has_records());

        doc.append_child(doc.body(), outer);
        let records = doc.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target(), doc.body());

        doc.set_attribute(inner, "Gap", "8px");
        let records = doc.take_records();
        assert_eq!(
            records,
            [MutationRecord::Attribute {
                target: inner,
                name: String::from("gap")
            }]
        );
    }

    #[test]
    fn insert_rejects_cycles() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        assert!(doc.append_child(a, b));
        assert!(!doc.append_child(b, a));
        assert!(!doc.append_child(a, a));
    }

    #[test]
    fn insert_before_reference() {
        let mut doc = Document::new();
        let p = doc.create_element("div");
        let a = doc.create_element("a");
        let b = doc.create_element("b");
        doc.append_child(p, a);
        doc.insert_before(p, b, Some(a));
        assert_eq!(doc.children(p), &[b, a]);
    }

    #[test]
    fn remove_drops_owned_style_blocks() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_element("div");
        doc.append_child(parent, child);
        doc.append_child(doc.body(), parent);
        doc.styles_mut().upsert("c-style", child, "#c > * {}");
        doc.remove(parent);
        assert!(doc.styles().is_empty());
        assert!(!doc.is_alive(child));
    }

    #[test]
    fn classes_append_without_duplicates() {
        let mut doc = Document::new();
        let e = doc.create_element("i");
        doc.add_class(e, "icon");
        doc.add_class(e, "iconfont");
        doc.add_class(e, "icon");
        assert_eq!(doc.classes(e), ["icon", "iconfont"]);
        assert!(doc.has_class(e, "iconfont"));
    }

    #[test]
    fn generated_ids_skip_taken_values() {
        let mut doc = Document::new();
        let e = doc.create_element("div");
        doc.set_attribute(e, "id", "u1");
        let id = doc.generate_id();
        assert_ne!(id, "u1");
        assert_eq!(id, "u2");
    }

    #[test]
    fn text_content_concatenates() {
        let mut doc = Document::new();
        let e = doc.create_element("div");
        doc.set_text_content(e, "hello");
        assert!(doc.has_content(e));
        assert_eq!(doc.text_content(e), "hello");
        doc.set_text_content(e, "");
        assert!(!doc.has_content(e));
    }
}
