// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Images and icon fonts.

use alloc::format;
use alloc::string::String;

use understory_dom::NodeId;

use super::TagRenderer;
use crate::Engine;

/// `img`: `icon="name"` points `src` at the icon directory, `avatar` makes a
/// round framed picture.
#[derive(Copy, Clone, Debug, Default)]
pub struct ImgTag;

impl TagRenderer for ImgTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        engine.document.set_style(node, "boxSizing", "border-box");
        if let Some(icon) = engine.document.attribute(node, "icon") {
            let src = engine.config.icon_url(icon);
            engine.document.set_attribute(node, "src", &src);
        }
        if engine.document.has_attribute(node, "avatar") {
            let doc = &mut engine.document;
            let width = String::from(doc.style_value(node, "width"));
            doc.set_style(node, "height", width);
            doc.set_style(node, "backgroundColor", "white");
            doc.set_style(node, "padding", "5px");
            doc.set_style(node, "border", "1px solid #a0a0a0");
            doc.set_style(node, "borderRadius", "50%");
        }
        node
    }
}

/// `icon`: a glyph from the bundled icon font, selected by `key`.
#[derive(Copy, Clone, Debug, Default)]
pub struct IconTag;

impl TagRenderer for IconTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let href = engine.config.icon_font_href();
        let doc = &mut engine.document;
        doc.set_style(node, "display", "inline-block");
        doc.set_style(node, "transition", "all 0.5s");
        doc.add_class(node, "icon");
        doc.add_class(node, "iconfont");
        if let Some(key) = doc.attribute(node, "key").map(|k| format!("icon-{k}")) {
            doc.add_class(node, &key);
        }
        doc.add_link(&href);
        node
    }
}

/// `icona`: a Font Awesome glyph, selected by `key` and `type`.
#[derive(Copy, Clone, Debug, Default)]
pub struct IconAwesomeTag;

impl TagRenderer for IconAwesomeTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let href = engine.config.font_awesome_href.clone();
        let doc = &mut engine.document;
        doc.set_style(node, "display", "inline-block");
        doc.set_style(node, "transition", "all 0.5s");
        for attribute in ["key", "type"] {
            if let Some(class) = doc.attribute(node, attribute).map(|v| format!("fa-{v}")) {
                doc.add_class(node, &class);
            }
        }
        doc.add_link(&href);
        node
    }
}
