// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node lifecycle across markup, observation and removal.

use understory_dom::{Document, MutationRecord, ObserveOptions};

#[test]
fn batch_attached_subtree_reports_only_its_root() {
    let mut doc = Document::new();
    doc.observe(ObserveOptions::all());

    let top = doc
        .parse_fragment(r#"<row><rect anchor="center"/><rect/></row>"#)
        .unwrap();
    assert!(!doc.has_records());

    doc.append_child(doc.body(), top[0]);
    let records = doc.take_records();
    assert_eq!(records.len(), 1);
    match &records[0] {
        MutationRecord::ChildList { target, added } => {
            assert_eq!(*target, doc.body());
            assert_eq!(added.as_slice(), &[top[0]]);
        }
        other => panic!("unexpected record {other:?}"),
    }
    assert_eq!(doc.subtree(top[0]).len(), 3);
}

#[test]
fn attribute_removal_is_recorded() {
    let mut doc = Document::new();
    let body = doc.body();
    let top = doc.parse_into(body, r#"<rect bg="red"/>"#).unwrap();
    doc.observe(ObserveOptions::ATTRIBUTES);

    assert_eq!(doc.remove_attribute(top[0], "BG").as_deref(), Some("red"));
    assert_eq!(doc.remove_attribute(top[0], "bg"), None);
    let records = doc.take_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].target(), top[0]);
}

#[test]
fn disconnect_drops_pending_records() {
    let mut doc = Document::new();
    doc.observe(ObserveOptions::all());
    let e = doc.create_element("div");
    doc.append_child(doc.body(), e);
    doc.disconnect();
    assert!(!doc.has_records());
    doc.set_attribute(e, "z", "1");
    assert!(!doc.has_records());
}

#[test]
fn removing_a_styled_node_cleans_the_head() {
    let mut doc = Document::new();
    let body = doc.body();
    let top = doc.parse_into(body, "<column><rect/></column>").unwrap();
    let id = doc.generate_id();
    doc.set_attribute(top[0], "id", &id);
    let key = format!("{id}-style");
    assert!(doc.styles_mut().upsert(&key, top[0], "a {}"));
    assert!(!doc.styles_mut().upsert(&key, top[0], "b {}"));
    assert_eq!(doc.styles().len(), 1);
    assert_eq!(doc.styles().get(&key).map(|b| b.css.as_str()), Some("b {}"));

    doc.remove(top[0]);
    assert!(doc.styles().get(&key).is_none());
    assert_eq!(doc.get_element_by_id(&id), None);
}

#[test]
fn links_are_deduplicated() {
    let mut doc = Document::new();
    assert!(doc.add_link("/css/icons.css"));
    assert!(!doc.add_link("/css/icons.css"));
    assert_eq!(doc.links().iter().count(), 1);
    assert!(doc.links().contains("/css/icons.css"));
}
