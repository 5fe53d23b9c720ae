// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `button`: themed push button.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;

use understory_dom::NodeId;

use super::TagRenderer;
use crate::Engine;
use crate::color::darker;
use crate::events::ListenerKey;
use crate::theme::ThemeSlot;

/// `button`: fixed chrome, hover dimming, an optional leading `icon` and
/// colors that follow the theme.
///
/// `asyncClick="name"` binds an async callback; the button is disabled until
/// the callback's guard is released. Without `themeCls` the button uses
/// `primary`.
#[derive(Copy, Clone, Debug, Default)]
pub struct ButtonTag;

impl TagRenderer for ButtonTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let doc = &mut engine.document;
        doc.set_style(node, "boxSizing", "border-box");
        doc.set_style(node, "transition", "all 0.5s");
        doc.set_style(node, "padding", "10px");
        doc.set_style(node, "overflow", "hidden");
        doc.set_style(node, "borderRadius", "8px");
        doc.set_style(node, "borderWidth", "0px");
        doc.set_style(node, "height", "44px");
        doc.set_style(node, "width", "120px");
        doc.set_style(node, "userSelect", "none");
        doc.set_style(node, "textAlign", "center");
        engine.bind_hover(node, ListenerKey::HoverOpacity, "opacity", "0.8");

        if let Some(icon) = engine.document.attribute(node, "icon").map(String::from) {
            insert_icon(engine, node, &icon);
        }
        if let Some(name) = engine.document.attribute(node, "asyncclick").map(String::from) {
            engine.bind_click(node, &name, true);
        }
        if !engine.document.has_attribute(node, "themecls") {
            engine.document.set_attribute(node, "themecls", "primary");
        }

        engine.set_theme_hook(node, Rc::new(refresh_button));
        refresh_button(engine, node);
        node
    }
}

fn insert_icon(engine: &mut Engine, node: NodeId, key: &str) {
    let doc = &mut engine.document;
    let first = doc.children(node).first().copied();
    if let Some(first) = first {
        if doc.tag_name(first) == Some("icon") && doc.attribute(first, "key") == Some(key) {
            return;
        }
    }
    let icon = doc.create_element("icon");
    doc.set_attribute(icon, "key", key);
    doc.set_style(icon, "color", engine.theme.color(ThemeSlot::TextLight));
    doc.set_style(icon, "fontSize", "20px");
    doc.set_style(icon, "marginRight", "4px");
    doc.insert_before(node, icon, first);
}

/// Theme hook: radius and text color from the theme, and a border that is
/// either the theme's or a darker shade of the background.
fn refresh_button(engine: &mut Engine, node: NodeId) {
    let theme = engine.theme.clone();
    let doc = &mut engine.document;
    doc.set_style(node, "borderRadius", theme.color(ThemeSlot::Radius));
    doc.set_style(node, "color", theme.color(ThemeSlot::TextLight));
    match theme.get(ThemeSlot::Border).filter(|b| !b.is_empty()) {
        Some(border) => {
            doc.set_style(node, "border", border);
        }
        None => {
            let background = String::from(doc.style_value(node, "backgroundColor"));
            if background.is_empty() {
                return;
            }
            let shade = darker(&background, 0.2).unwrap_or(background);
            doc.set_style(node, "border", format!("1px solid {shade}"));
        }
    }
}
