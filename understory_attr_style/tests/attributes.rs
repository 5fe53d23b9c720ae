// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute translation through the live pipeline.

use understory_attr_style::Engine;
use understory_attr_style::child_style::block_key;
use understory_dom::NodeId;

fn running() -> Engine {
    let mut engine = Engine::new();
    engine.start();
    engine
}

fn load(engine: &mut Engine, markup: &str) -> NodeId {
    let body = engine.document().body();
    engine.parse_into(body, markup).unwrap()[0]
}

#[test]
fn anchor_pins_to_the_corner() {
    let mut engine = running();
    let rect = load(&mut engine, r#"<rect anchor="topLeft"/>"#);
    let doc = engine.document();
    assert_eq!(doc.style_value(rect, "position"), "absolute");
    assert_eq!(doc.style_value(rect, "top"), "0px");
    assert_eq!(doc.style_value(rect, "left"), "0px");

    engine.set_attribute(rect, "anchor", "bottomRight").unwrap();
    let doc = engine.document();
    assert_eq!(doc.style_value(rect, "bottom"), "0px");
    assert_eq!(doc.style_value(rect, "right"), "0px");
}

#[test]
fn standard_property_names_write_through() {
    let mut engine = running();
    let div = load(&mut engine, r#"<div BorderRadius="4px" fontsize="12px" radius="3px"/>"#);
    let doc = engine.document();
    assert_eq!(doc.style_value(div, "fontSize"), "12px");
    // `radius` is an alias and is written after the catalog match.
    assert_eq!(doc.style_value(div, "borderRadius"), "3px");
}

#[test]
fn later_writes_are_translated_again() {
    let mut engine = running();
    let div = load(&mut engine, r#"<div bgColor="red"/>"#);
    assert_eq!(engine.document().style_value(div, "backgroundColor"), "red");

    engine.document_mut().set_attribute(div, "bgcolor", "blue");
    engine.settle();
    assert_eq!(engine.document().style_value(div, "backgroundColor"), "blue");

    engine.document_mut().remove_attribute(div, "bgcolor");
    engine.settle();
    assert_eq!(engine.document().style_value(div, "backgroundColor"), "");
}

#[test]
fn stopped_engine_still_translates_direct_writes() {
    let mut engine = Engine::new();
    let body = engine.document().body();
    let div = engine.document_mut().create_element("div");
    engine.document_mut().append_child(body, div);
    engine.set_attribute(div, "visible", "false").unwrap();
    assert_eq!(engine.document().style_value(div, "visibility"), "hidden");
}

#[test]
fn row_gap_becomes_a_child_rule() {
    let mut engine = running();
    let row = load(&mut engine, r#"<row id="r" gap="20px"><rect/><rect/></row>"#);
    let doc = engine.document();
    assert_eq!(doc.style_value(row, "display"), "flex");
    let block = doc.styles().get(&block_key("r")).unwrap();
    assert_eq!(block.css, "#r > *  {margin: 0 20px 0 0 }");
}

#[test]
fn child_rules_never_accumulate() {
    let mut engine = running();
    let div = load(&mut engine, r#"<div childMargin="4px"/>"#);
    for value in ["8px", "12px", "16px"] {
        engine.set_attribute(div, "childMargin", value).unwrap();
    }
    let doc = engine.document();
    let id = doc.element_id(div).unwrap();
    assert_eq!(doc.styles().len(), 1);
    assert_eq!(
        doc.styles().get(&block_key(id)).unwrap().css,
        format!("#{id} > *  {{margin: 16px }}")
    );
}

#[test]
fn child_anchor_fill_shares_the_axis() {
    let mut engine = running();
    let div = load(&mut engine, r#"<div id="f" childAnchor="fill"><rect/></div>"#);
    let doc = engine.document();
    assert_eq!(doc.style_value(div, "display"), "flex");
    assert_eq!(doc.styles().get("f-style").unwrap().css, "#f > * { flex: 1}");
}

#[test]
fn grid_spans() {
    let mut engine = running();
    let cell = load(&mut engine, r#"<div gridC="2-3" gridR="2/5"/>"#);
    let doc = engine.document();
    assert_eq!(doc.style_value(cell, "gridColumnStart"), "2");
    assert_eq!(doc.style_value(cell, "gridColumnEnd"), "5");
    assert_eq!(doc.style_value(cell, "gridRow"), "2/5");
}

#[test]
fn unknown_anchor_is_ignored() {
    let mut engine = running();
    let div = load(&mut engine, r#"<div anchor="nowhere" lineAnchor="nowhere"/>"#);
    let doc = engine.document();
    assert_eq!(doc.style_value(div, "position"), "");
    assert_eq!(doc.style_value(div, "display"), "");
}

#[test]
fn effects() {
    let mut engine = running();
    let div = load(
        &mut engine,
        r#"<div shadow="true" rotate="45" bgImage="a.png" newClass="card"/>"#,
    );
    let doc = engine.document();
    assert!(!doc.style_value(div, "boxShadow").is_empty());
    assert_eq!(doc.style_value(div, "transform"), "rotate(45deg)");
    assert_eq!(doc.style_value(div, "backgroundImage"), "url('a.png')");
    assert!(doc.has_class(div, "card"));
}

#[test]
fn stale_nodes_are_reported() {
    let mut engine = running();
    let div = load(&mut engine, "<div/>");
    assert!(engine.remove(div));
    assert!(engine.set_attribute(div, "width", "1px").is_err());
}

#[test]
fn prebuilt_node_is_translated_when_appended() {
    let mut engine = running();
    let body = engine.document().body();
    let div = engine.document_mut().create_element("div");
    engine.document_mut().set_attribute(div, "anchor", "topLeft");
    assert_eq!(engine.document().style_value(div, "position"), "");

    engine.append(body, div).unwrap();
    let doc = engine.document();
    assert_eq!(doc.style_value(div, "position"), "absolute");
    assert_eq!(doc.style_value(div, "top"), "0px");
    assert_eq!(doc.style_value(div, "left"), "0px");
}

#[test]
fn batch_attached_descendants_wait_for_process_subtree() {
    let mut engine = running();
    let body = engine.document().body();
    let top = engine
        .document_mut()
        .parse_fragment(r#"<div anchor="topLeft"><div anchor="bottomRight"/></div>"#)
        .unwrap();
    let outer = top[0];
    let inner = engine.document().children(outer)[0];

    engine.append(body, outer).unwrap();
    let doc = engine.document();
    assert_eq!(doc.style_value(outer, "position"), "absolute");
    assert_eq!(doc.style_value(inner, "position"), "");

    engine.process_subtree(outer).unwrap();
    let doc = engine.document();
    assert_eq!(doc.style_value(inner, "position"), "absolute");
    assert_eq!(doc.style_value(inner, "bottom"), "0px");
    assert_eq!(doc.style_value(inner, "right"), "0px");
}
