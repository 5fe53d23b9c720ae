// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clicks, hover, async handlers and theme switches.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use understory_attr_style::{
    ClickGuard, DocumentEvent, Engine, HandlerError, Theme, ThemeBuilder, ThemeSlot,
};
use understory_dom::NodeId;

fn load(engine: &mut Engine, markup: &str) -> NodeId {
    let body = engine.document().body();
    engine.parse_into(body, markup).unwrap()[0]
}

#[test]
fn button_defaults_follow_the_theme() {
    let mut engine = Engine::new();
    engine.start();
    let button = load(&mut engine, "<button>OK</button>");

    let doc = engine.document();
    assert_eq!(doc.attribute(button, "themecls"), Some("primary"));
    assert_eq!(doc.style_value(button, "backgroundColor"), "#007bff");
    assert_eq!(doc.style_value(button, "color"), "white");
    assert_eq!(doc.style_value(button, "borderRadius"), "8px");
    assert_eq!(doc.style_value(button, "border"), "1px solid rgb(0, 98, 204)");
    assert_eq!(doc.style_value(button, "width"), "120px");

    engine.set_theme(Theme::dark());
    assert_eq!(engine.document().style_value(button, "color"), "#f0f0f0");

    let bordered = ThemeBuilder::new("outlined")
        .set(ThemeSlot::Primary, "#101010")
        .set(ThemeSlot::Border, "2px dashed red")
        .build();
    engine.set_theme(bordered);
    let doc = engine.document();
    assert_eq!(doc.style_value(button, "backgroundColor"), "#101010");
    assert_eq!(doc.style_value(button, "border"), "2px dashed red");
}

#[test]
fn button_border_darkens_named_colors() {
    let mut engine = Engine::new();
    engine.start();
    let button = load(&mut engine, "<button>OK</button>");

    let teal = ThemeBuilder::new("teal").set(ThemeSlot::Primary, "teal").build();
    engine.set_theme(teal);
    let doc = engine.document();
    assert_eq!(doc.style_value(button, "backgroundColor"), "teal");
    assert_eq!(doc.style_value(button, "border"), "1px solid rgb(0, 102, 102)");

    let short = ThemeBuilder::new("short").set(ThemeSlot::Primary, "#fff").build();
    engine.set_theme(short);
    assert_eq!(
        engine.document().style_value(button, "border"),
        "1px solid rgb(204, 204, 204)"
    );
}

#[test]
fn theme_switch_notifies_once() {
    let mut engine = Engine::new();
    engine.start();
    load(&mut engine, r#"<div><button/><button themeCls="danger"/><div themeCls="info"/></div>"#);

    let seen = Rc::new(Cell::new(0));
    let counter = seen.clone();
    engine.on_document_event(
        DocumentEvent::ThemeChanged,
        Rc::new(move |engine: &mut Engine, _: DocumentEvent| {
            counter.set(counter.get() + 1);
            assert_eq!(engine.theme().name(), "MaterialDark");
        }),
    );
    engine.set_theme(Theme::dark());
    assert_eq!(seen.get(), 1);
}

#[test]
fn hover_swaps_and_restores() {
    let mut engine = Engine::new();
    engine.start();
    let div = load(&mut engine, r#"<div bgColor="white" hoverBgColor="red"/>"#);

    engine.pointer_over(div).unwrap();
    assert_eq!(engine.document().style_value(div, "backgroundColor"), "red");
    assert_eq!(engine.document().style_value(div, "cursor"), "pointer");
    engine.pointer_out(div).unwrap();
    assert_eq!(engine.document().style_value(div, "backgroundColor"), "white");
    assert_eq!(engine.document().style_value(div, "cursor"), "");

    // Rebinding replaces the earlier pair.
    engine.set_attribute(div, "hoverBgColor", "blue").unwrap();
    engine.pointer_over(div).unwrap();
    assert_eq!(engine.document().style_value(div, "backgroundColor"), "blue");
}

#[test]
fn click_runs_the_named_callback() {
    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    let mut engine = Engine::builder()
        .callback("hit", move |engine: &mut Engine, node: NodeId| {
            counter.set(counter.get() + 1);
            engine.document_mut().set_style(node, "color", "green");
            Ok(())
        })
        .build();
    engine.start();
    let div = load(&mut engine, r#"<div click="hit"><span/></div>"#);
    let span = engine.document().children(div)[0];

    assert!(engine.click(span).unwrap());
    assert_eq!(clicks.get(), 1);
    assert_eq!(engine.document().style_value(div, "color"), "green");

    engine.set_enabled(div, false);
    assert!(!engine.click(span).unwrap());
    assert_eq!(clicks.get(), 1);
}

#[test]
fn missing_callback_is_not_an_error() {
    let mut engine = Engine::new();
    engine.start();
    let div = load(&mut engine, r#"<div click="nobody"/>"#);
    assert!(engine.click(div).is_ok());
}

#[test]
fn async_click_releases_on_failure() {
    let mut engine = Engine::new();
    engine.register_async_callback(
        "save",
        |_: &mut Engine, _: NodeId, _guard: ClickGuard| -> Result<(), HandlerError> {
            Err(HandlerError::new("disk full"))
        },
    );
    engine.start();
    let button = load(&mut engine, r#"<button asyncClick="save"/>"#);

    let err = engine.click(button).unwrap_err();
    assert!(format!("{err}").contains("disk full"));
    assert!(!engine.document().is_disabled(button));
}

#[test]
fn async_click_holds_until_the_guard_drops() {
    let parked: Rc<RefCell<Option<ClickGuard>>> = Rc::new(RefCell::new(None));
    let slot = parked.clone();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let mut engine = Engine::builder()
        .async_callback("load", move |_: &mut Engine, _: NodeId, guard: ClickGuard| {
            counter.set(counter.get() + 1);
            *slot.borrow_mut() = Some(guard);
            Ok(())
        })
        .build();
    engine.start();
    let button = load(&mut engine, r#"<button asyncClick="load"/>"#);

    engine.click(button).unwrap();
    assert!(engine.document().is_disabled(button));
    assert_eq!(engine.document().style_value(button, "filter"), "grayscale(100%)");

    // Ignored while the first run is pending.
    engine.click(button).unwrap();
    assert_eq!(calls.get(), 1);

    let guard = parked.borrow_mut().take().unwrap();
    assert_eq!(guard.node(), button);
    drop(guard);
    engine.advance(core::time::Duration::ZERO);
    assert!(!engine.document().is_disabled(button));
}
