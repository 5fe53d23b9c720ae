// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped style blocks: rules that target a node's children.
//!
//! A node owns at most one block, registered in the document head under
//! `<id>-style`. Every write replaces the block's text, so repeated calls
//! never accumulate blocks. When the node's `id` changes, the next write
//! moves its block to the new key.

use alloc::format;
use alloc::string::String;

use understory_dom::{Document, NodeId, camel_to_kebab};

/// Returns the node's `id`, assigning a generated one first if it has none.
pub fn ensure_id(doc: &mut Document, node: NodeId) -> String {
    if let Some(id) = doc.element_id(node).filter(|id| !id.is_empty()) {
        return String::from(id);
    }
    let id = doc.generate_id();
    doc.set_attribute(node, "id", &id);
    id
}

/// Head key of the block owned by the element with id `id`.
#[must_use]
pub fn block_key(id: &str) -> String {
    format!("{id}-style")
}

/// Publishes `css` as the node's block, replacing earlier content.
///
/// Returns the block key.
pub fn publish_block(doc: &mut Document, node: NodeId, css: impl Into<String>) -> String {
    let id = ensure_id(doc, node);
    let key = block_key(&id);
    doc.styles_mut().upsert_owned(&key, node, css);
    key
}

/// Applies `property: value` to every direct child of `node`.
///
/// ```rust
/// use understory_attr_style::child_style::inject_child_rule;
/// use understory_dom::Document;
///
/// let mut doc = Document::new();
/// let row = doc.create_element("row");
/// doc.set_attribute(row, "id", "r1");
/// let key = inject_child_rule(&mut doc, row, "margin", "0 20px 0 0");
/// assert_eq!(key, "r1-style");
/// assert_eq!(doc.styles().get(&key).unwrap().css, "#r1 > *  {margin: 0 20px 0 0 }");
/// ```
pub fn inject_child_rule(doc: &mut Document, node: NodeId, property: &str, value: &str) -> String {
    let id = ensure_id(doc, node);
    let css = format!("#{id} > *  {{{}: {value} }}", camel_to_kebab(property));
    publish_block(doc, node, css)
}

/// Makes every direct child of `node` share its main axis equally.
pub fn inject_child_fill(doc: &mut Document, node: NodeId) -> String {
    doc.set_style(node, "display", "flex");
    let id = ensure_id(doc, node);
    publish_block(doc, node, format!("#{id} > * {{ flex: 1}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinjection_replaces_block() {
        let mut doc = Document::new();
        let n = doc.create_element("div");
        doc.append_child(doc.body(), n);
        let first = inject_child_rule(&mut doc, n, "margin", "1px");
        let second = inject_child_rule(&mut doc, n, "margin", "2px");
        assert_eq!(first, second);
        assert_eq!(doc.styles().len(), 1);
        let id = doc.element_id(n).unwrap();
        assert_eq!(
            doc.styles().get(&second).unwrap().css,
            format!("#{id} > *  {{margin: 2px }}")
        );
    }

    #[test]
    fn renamed_node_keeps_a_single_block() {
        let mut doc = Document::new();
        let row = doc.create_element("row");
        doc.append_child(doc.body(), row);
        let first = inject_child_rule(&mut doc, row, "margin", "1px");
        doc.set_attribute(row, "id", "named");
        let second = inject_child_rule(&mut doc, row, "margin", "2px");
        assert_ne!(first, second);
        assert_eq!(second, "named-style");
        assert_eq!(doc.styles().len(), 1);
        assert!(doc.styles().get(&first).is_none());
        assert_eq!(
            doc.styles().get("named-style").unwrap().css,
            "#named > *  {margin: 2px }"
        );
    }

    #[test]
    fn existing_id_is_kept() {
        let mut doc = Document::new();
        let n = doc.create_element("div");
        doc.set_attribute(n, "id", "keep");
        assert_eq!(ensure_id(&mut doc, n), "keep");
        assert_eq!(inject_child_fill(&mut doc, n), "keep-style");
        assert_eq!(doc.style_value(n, "display"), "flex");
        assert_eq!(doc.styles().get("keep-style").unwrap().css, "#keep > * { flex: 1}");
    }

    #[test]
    fn camel_property_is_kebab_in_rule() {
        let mut doc = Document::new();
        let n = doc.create_element("div");
        doc.set_attribute(n, "id", "p");
        inject_child_rule(&mut doc, n, "paddingLeft", "4px");
        assert_eq!(doc.styles().get("p-style").unwrap().css, "#p > *  {padding-left: 4px }");
    }
}
