// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use log::debug;
use understory_dom::NodeId;

use super::px;
use crate::Engine;
use crate::error::HandlerError;
use crate::events::{Event, EventKind, ListenerKey, Outcome};

/// Element id of the tooltip while it is showing.
pub const TOOLTIP_ID: &str = "tooltip";

/// Where a tooltip takes its text from.
#[derive(Clone)]
pub enum TooltipText {
    /// The node's text content.
    Content,
    /// An attribute of the node. `style.<property>` reads an inline style
    /// value instead.
    Attribute(String),
    /// Computed by the host when the tooltip shows.
    Compute(Rc<dyn Fn(&Engine, NodeId) -> String>),
}

impl fmt::Debug for TooltipText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content => f.write_str("Content"),
            Self::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
            Self::Compute(_) => f.write_str("Compute(..)"),
        }
    }
}

impl TooltipText {
    fn resolve(&self, engine: &Engine, node: NodeId) -> String {
        let doc = &engine.document;
        match self {
            Self::Content => doc.text_content(node),
            Self::Attribute(name) => match name.strip_prefix("style.") {
                Some(property) => String::from(doc.style_value(node, property)),
                None => String::from(doc.attribute(node, name).unwrap_or_default()),
            },
            Self::Compute(f) => f(engine, node),
        }
    }
}

impl Engine {
    /// Shows a tooltip for `node` while the pointer is over it.
    ///
    /// Binding again replaces the earlier text source.
    pub fn bind_tooltip(&mut self, node: NodeId, text: TooltipText) {
        let show = Rc::new(
            move |engine: &mut Self, _: &Event| -> Result<Outcome, HandlerError> {
                engine.show_tooltip(node, &text);
                Ok(Outcome::Continue)
            },
        );
        let hide = Rc::new(|engine: &mut Self, _: &Event| -> Result<Outcome, HandlerError> {
            engine.hide_tooltip();
            Ok(Outcome::Continue)
        });
        self.add_listener(node, EventKind::PointerOver, ListenerKey::Tooltip, show);
        self.add_listener(node, EventKind::PointerOut, ListenerKey::Tooltip, hide);
    }

    /// Places a tooltip 4px below `node`, aligned with its left edge.
    ///
    /// Replaces any tooltip already showing. Returns `None` without showing
    /// anything when the text is empty.
    pub fn show_tooltip(&mut self, node: NodeId, text: &TooltipText) -> Option<NodeId> {
        if !self.document.is_element(node) {
            return None;
        }
        let text = text.resolve(self, node);
        if text.is_empty() {
            return None;
        }
        self.hide_tooltip();

        let rect = self.metrics.node_rect(&self.document, node);
        let doc = &mut self.document;
        let tip = doc.create_element("div");
        doc.set_attribute(tip, "id", TOOLTIP_ID);
        for (property, value) in [
            ("display", "block"),
            ("position", "fixed"),
            ("backgroundColor", "white"),
            ("border", "1px solid #ccc"),
            ("borderRadius", "4px"),
            ("padding", "5px"),
            ("zIndex", "999"),
        ] {
            doc.set_style(tip, property, value);
        }
        doc.set_style(tip, "left", px(rect.x0));
        doc.set_style(tip, "top", px(rect.y1 + 4.0));
        let label = doc.create_text(&text);
        doc.append_child(tip, label);
        let body = doc.body();
        doc.append_child(body, tip);
        debug!("tooltip for {node:?} at ({}, {})", rect.x0, rect.y1 + 4.0);
        self.settle();
        Some(tip)
    }

    /// Removes the tooltip if one is showing.
    pub fn hide_tooltip(&mut self) -> bool {
        match self.document.get_element_by_id(TOOLTIP_ID) {
            Some(tip) => self.remove(tip),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with(markup: &str) -> (Engine, NodeId) {
        let mut engine = Engine::new();
        engine.start();
        let body = engine.document().body();
        let node = engine.parse_into(body, markup).unwrap()[0];
        (engine, node)
    }

    #[test]
    fn text_sources() {
        let (mut engine, node) = engine_with(r#"<div tip="hint">Label</div>"#);
        engine.document_mut().set_style(node, "width", "40px");
        let text = |source: TooltipText| source.resolve(&engine, node);
        assert_eq!(text(TooltipText::Content), "Label");
        assert_eq!(text(TooltipText::Attribute("tip".into())), "hint");
        assert_eq!(text(TooltipText::Attribute("style.width".into())), "40px");
        assert_eq!(text(TooltipText::Attribute("missing".into())), "");
        let computed = TooltipText::Compute(Rc::new(|e: &Engine, n: NodeId| {
            String::from(e.document().tag_name(n).unwrap_or_default())
        }));
        assert_eq!(text(computed), "div");
    }

    #[test]
    fn empty_text_shows_nothing() {
        let (mut engine, node) = engine_with("<div/>");
        assert_eq!(engine.show_tooltip(node, &TooltipText::Content), None);
        assert!(engine.document().get_element_by_id(TOOLTIP_ID).is_none());
    }
}
