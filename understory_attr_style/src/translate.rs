// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute translation: one attribute in, style writes out.
//!
//! A name goes through two independent steps:
//!
//! 1. If it names a catalog property (ignoring case), the value is written to
//!    that property as is.
//! 2. If it is an alias, the alias rule runs. Aliases run after the catalog
//!    write, so for names found in both (`rotate`, `scale`) the alias decides
//!    what ends up in `transform` while the catalog property keeps the raw
//!    value.
//!
//! Anything else stays a plain attribute. Values are never validated.

use alloc::string::String;

use understory_dom::NodeId;

use crate::Engine;
use crate::anchor::{self, Anchor, Position};
use crate::child_style;
use crate::effects::{self, TransformKind};
use crate::error::EngineError;
use crate::events::ListenerKey;
use crate::grid::{GridAxis, grid_span};

impl Engine {
    /// Sets an attribute and translates it.
    ///
    /// Connected nodes are translated through the pipeline when it is running;
    /// other nodes are translated directly.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), EngineError> {
        if !self.document.is_alive(node) {
            return Err(EngineError::StaleNode(node));
        }
        if !self.document.is_element(node) {
            return Ok(());
        }
        self.document.set_attribute(node, name, value);
        if self.running && self.document.is_connected(node) {
            self.settle();
        } else {
            self.translate(node, &name.to_ascii_lowercase(), value);
            self.drain_releases();
        }
        Ok(())
    }

    /// Reads an attribute the way it was declared.
    ///
    /// Catalog properties read back from inline style; other names read the
    /// attribute.
    #[must_use]
    pub fn custom_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        if let Some(property) = self.catalog.resolve(name) {
            return self.document.style(node).map(|s| String::from(s.value(property)));
        }
        self.document.attribute(node, name).map(String::from)
    }

    /// Translates one attribute. `name` must be lowercase.
    pub(crate) fn translate(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(property) = self.catalog.resolve(name) {
            let property = String::from(property);
            self.document.set_style(node, &property, value);
        }
        if let Some(property) = alias_property(name) {
            self.document.set_style(node, property, value);
            return;
        }

        match name {
            "bgimage" => {
                let url = effects::background_image(value);
                self.document.set_style(node, "backgroundImage", url);
            }
            "gridc" => self.apply_bundle(node, &grid_span(GridAxis::Column, value)),
            "gridr" => self.apply_bundle(node, &grid_span(GridAxis::Row, value)),

            "newclass" => {
                self.document.add_class(node, value);
            }
            "visible" => {
                self.document
                    .set_style(node, "visibility", effects::visibility(value));
            }

            "anchor" => self.set_anchor(node, value, Position::Absolute),
            "fixanchor" => self.set_anchor(node, value, Position::Fixed),
            "dock" => {
                if let Some(a) = Anchor::parse(value) {
                    self.apply_bundle(node, &anchor::dock(a, Position::Absolute));
                }
            }
            "lineanchor" => {
                if let Some(a) = Anchor::parse(value) {
                    self.apply_bundle(node, &anchor::line_anchor(a));
                }
            }

            "childanchor" => self.set_child_anchor(node, value),
            "childmargin" => {
                child_style::inject_child_rule(&mut self.document, node, "margin", value);
            }
            "childpadding" => {
                child_style::inject_child_rule(&mut self.document, node, "padding", value);
            }

            "themecls" => self.set_theme_class(node, value),

            "shadow" => {
                let shadow = effects::box_shadow(value).into_owned();
                self.document.set_style(node, "boxShadow", shadow);
            }
            "textshadow" => {
                let shadow = effects::text_shadow(value).into_owned();
                self.document.set_style(node, "textShadow", shadow);
            }
            "rotate" => self.set_transform(node, TransformKind::Rotate, value),
            "skew" => self.set_transform(node, TransformKind::Skew, value),
            "scale" => self.set_transform(node, TransformKind::Scale, value),
            "hoverbgcolor" => {
                self.bind_hover(node, ListenerKey::HoverBackground, "backgroundColor", value);
            }
            "hovercolor" => self.bind_hover(node, ListenerKey::HoverColor, "color", value),

            "click" => self.bind_click(node, value, false),
            "draggable" => {
                if self.document.attribute(node, "draggable") != Some(value) {
                    self.document.set_attribute(node, "draggable", value);
                }
            }
            _ => {}
        }
    }

    /// Pins `node` by anchor. Unknown anchors are ignored.
    pub fn set_anchor(&mut self, node: NodeId, value: &str, position: Position) {
        if let Some(a) = Anchor::parse(value) {
            self.apply_bundle(node, &anchor::self_anchor(a, position));
        }
    }

    fn set_transform(&mut self, node: NodeId, kind: TransformKind, value: &str) {
        let transform = effects::transform(kind, value);
        self.document.set_style(node, "transform", transform);
    }

    /// Lays out `node`'s children by anchor. An empty value restores block flow.
    pub fn set_child_anchor(&mut self, node: NodeId, value: &str) {
        if value.is_empty() {
            self.apply_bundle(node, &anchor::child_anchor(None));
            return;
        }
        let Some(a) = Anchor::parse(value) else {
            return;
        };
        self.apply_bundle(node, &anchor::child_anchor(Some(a)));
        if a == Anchor::Fill {
            child_style::inject_child_fill(&mut self.document, node);
        }
    }
}

/// Attributes that are plain renames of one style property.
fn alias_property(name: &str) -> Option<&'static str> {
    Some(match name {
        "z" => "zIndex",
        "radius" => "borderRadius",
        "box" => "boxSizing",
        "bg" => "background",
        "bgcolor" => "backgroundColor",
        "bgrepeat" => "backgroundRepeat",
        "bgposition" => "backgroundPosition",
        "bgsize" => "backgroundSize",
        "events" => "pointerEvents",
        _ => return None,
    })
}
