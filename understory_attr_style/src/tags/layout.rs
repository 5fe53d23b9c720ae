// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boxes and layout containers.

use alloc::format;
use alloc::string::String;

use understory_dom::NodeId;

use super::TagRenderer;
use crate::Engine;
use crate::anchor::{Anchor, child_anchor};
use crate::child_style::{ensure_id, inject_child_rule, publish_block};

const FRAME_BORDER: &str = "1px solid #a0a0a0";

/// `rect`: a fixed 100px box that centers its content.
#[derive(Copy, Clone, Debug, Default)]
pub struct RectTag;

impl TagRenderer for RectTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let doc = &mut engine.document;
        doc.set_style(node, "transition", "all 0.4s");
        doc.set_style(node, "width", "100px");
        doc.set_style(node, "height", "100px");
        doc.set_style(node, "border", FRAME_BORDER);
        doc.set_style(node, "boxSizing", "border-box");
        doc.set_style(node, "overflow", "hidden");
        if doc.has_content(node) {
            engine.apply_bundle(node, &child_anchor(Some(Anchor::Center)));
        }
        node
    }
}

/// `circle`: a bordered box, round when it has a `width`.
#[derive(Copy, Clone, Debug, Default)]
pub struct CircleTag;

impl TagRenderer for CircleTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let doc = &mut engine.document;
        doc.set_style(node, "border", FRAME_BORDER);
        doc.set_style(node, "boxSizing", "border-box");
        doc.set_style(node, "overflow", "hidden");
        if let Some(width) = doc.attribute(node, "width").map(String::from) {
            doc.set_style(node, "height", width);
            doc.set_style(node, "borderRadius", "50%");
        }
        if doc.has_content(node) {
            engine.apply_bundle(node, &child_anchor(Some(Anchor::Center)));
        }
        node
    }
}

/// `row`: a full-width flex row. `gap` spaces the children.
#[derive(Copy, Clone, Debug, Default)]
pub struct RowTag;

impl TagRenderer for RowTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let doc = &mut engine.document;
        doc.set_style(node, "width", "100%");
        doc.set_style(node, "height", "100px");
        doc.set_style(node, "display", "flex");
        doc.set_style(node, "flexDirection", "row");
        if let Some(gap) = doc.attribute(node, "gap").map(String::from) {
            inject_child_rule(doc, node, "margin", &format!("0 {gap} 0 0"));
        }
        node
    }
}

/// `column`: a full-height flex column. `gap` spaces the children.
#[derive(Copy, Clone, Debug, Default)]
pub struct ColumnTag;

impl TagRenderer for ColumnTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let doc = &mut engine.document;
        doc.set_style(node, "width", "100px");
        doc.set_style(node, "height", "100%");
        doc.set_style(node, "display", "flex");
        doc.set_style(node, "flexDirection", "column");
        if let Some(gap) = doc.attribute(node, "gap").map(String::from) {
            inject_child_rule(doc, node, "margin", &format!("0 0 {gap} 0"));
        }
        node
    }
}

/// `grid`: a CSS grid, four equal columns unless `columns` says otherwise.
///
/// Numeric `columns` and `rows` expand to `repeat(n, 1fr)`; other values are
/// used as track lists.
#[derive(Copy, Clone, Debug, Default)]
pub struct GridTag;

impl TagRenderer for GridTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let doc = &mut engine.document;
        doc.set_style(node, "display", "grid");
        doc.set_style(node, "gap", "10px");
        doc.set_style(node, "gridTemplateColumns", tracks("4"));
        if let Some(gap) = doc.attribute(node, "gap").map(String::from) {
            doc.set_style(node, "gap", gap);
        }
        if let Some(columns) = doc.attribute(node, "columns").map(tracks) {
            doc.set_style(node, "gridTemplateColumns", columns);
        }
        if let Some(rows) = doc.attribute(node, "rows").map(tracks) {
            doc.set_style(node, "gridTemplateRows", rows);
        }
        node
    }
}

fn tracks(value: &str) -> String {
    if value.trim().parse::<f64>().is_ok() {
        format!("repeat({value}, 1fr)")
    } else {
        String::from(value)
    }
}

const FORM_CSS: &str = "
.gridForm {
    display: grid;
    gap: 10px;
    padding: 10px;
}
@media (min-width: 400px)  {.gridForm { grid-template-columns: auto; }}
@media (min-width: 800px)  {.gridForm { grid-template-columns: 100px auto; }}
@media (min-width: 1000px) {.gridForm { grid-template-columns: 100px auto 100px auto; }}
@media (min-width: 1200px) {.gridForm { grid-template-columns: 100px auto 100px auto 100px auto 100px auto;}}
@media (min-width: 1400px) {.gridForm { grid-template-columns: 100px auto 100px auto 100px auto 100px auto 100px auto 100px auto;}}
.gridForm > * {text-align: left; height: 30px;}
.gridForm > label {padding-top: 0px;}
.gridForm > input {border-radius: 4px; border: 1px solid gray;}
";

/// `form`: a label/field grid that gains columns as the viewport widens.
#[derive(Copy, Clone, Debug, Default)]
pub struct FormTag;

impl TagRenderer for FormTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let doc = &mut engine.document;
        doc.add_class(node, "gridForm");
        ensure_id(doc, node);
        if let Some(gap) = doc.attribute(node, "gap").map(String::from) {
            doc.set_style(node, "gap", gap);
        }
        publish_block(doc, node, FORM_CSS);
        node
    }
}

/// Viewport breakpoints and the container width used from each one up.
const CONTAINER_STEPS: [(u32, u32); 7] = [
    (576, 540),
    (768, 720),
    (992, 960),
    (1200, 1140),
    (1500, 1400),
    (1800, 1700),
    (2000, 1900),
];

/// `container`: a centered block whose max width follows the viewport.
#[derive(Copy, Clone, Debug, Default)]
pub struct ContainerTag;

impl TagRenderer for ContainerTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        let doc = &mut engine.document;
        let id = ensure_id(doc, node);
        doc.set_style(node, "display", "block");
        doc.set_style(node, "transition", "all 0.5s");
        let mut css = format!(
            "#{id} {{\n    width: 100%;\n    margin-left: auto;\n    margin-right: auto;\n    padding-left: 15px;\n    padding-right: 15px;\n}}\n"
        );
        for (min, max) in CONTAINER_STEPS {
            css.push_str(&format!(
                "@media (min-width: {min}px) {{ #{id} {{max-width: {max}px;}}}}\n"
            ));
        }
        publish_block(doc, node, css);
        node
    }
}
