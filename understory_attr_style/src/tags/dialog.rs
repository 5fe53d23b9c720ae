// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `dialog`: a movable, resizable popup.

use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;

use log::debug;
use understory_dom::NodeId;
use understory_event_state::drag::{DragResizeState, ResizeEdge};

use super::TagRenderer;
use crate::Engine;
use crate::child_style::publish_block;
use crate::error::HandlerError;
use crate::events::{Event, EventKind, ListenerKey, Outcome};
use crate::overlay::DialogState;

const DIALOG_CSS: &str = "
.popup {
    position: absolute;
    background-color: white;
    padding: 40px 20px 20px 20px;
    border-radius: 10px;
    box-shadow: 0 0 10px rgba(0, 0, 0, 0.4);
    display: none;
    overflow: auto;
    box-sizing: border-box;
    width: 500px;
    height: 400px;
    z-index: 999;
}
.popup-content {
    text-align: center;
}
.btn-close {
    position: absolute;
    top: 10px;
    right: 10px;
    cursor: pointer;
    user-select: none;
}
.btn-close:hover {
    color: red;
}
.resizer {
    position: absolute;
    cursor: pointer;
}
";

/// `dialog`: hidden until [`Engine::show_dialog`].
///
/// The renderer moves the element's children into a `popup-content` box and
/// adds a close button and eight resize handles. Pressing a handle resizes the
/// dialog, pressing anywhere else drags it.
#[derive(Copy, Clone, Debug, Default)]
pub struct DialogTag;

impl TagRenderer for DialogTag {
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        if engine.document.has_class(node, "popup") {
            return node;
        }
        let thickness = engine.config.handle_thickness;
        let doc = &mut engine.document;
        doc.add_class(node, "popup");
        doc.set_style(node, "transition", "all 0.5s");
        doc.set_style(node, "display", "none");
        publish_block(doc, node, dialog_css(thickness));

        let close = doc.create_element("span");
        doc.add_class(close, "btn-close");
        doc.set_text_content(close, "×");

        let content = doc.create_element("div");
        doc.add_class(content, "popup-content");
        let moved: Vec<NodeId> = doc.children(node).to_vec();
        for child in moved {
            doc.detach(child);
            doc.append_child(content, child);
        }
        doc.append_child(node, close);
        doc.append_child(node, content);

        for edge in ResizeEdge::ALL {
            let handle = doc.create_element("div");
            doc.set_attribute(handle, "class", &format!("resizer resizer-{}", edge.name()));
            doc.append_child(node, handle);
        }

        engine.add_listener(
            close,
            EventKind::Click,
            ListenerKey::CloseButton,
            Rc::new(move |engine: &mut Engine, _: &Event| -> Result<Outcome, HandlerError> {
                engine.close_dialog(node, true).map_err(|e| HandlerError::new(format!("{e}")))?;
                Ok(Outcome::Stop)
            }),
        );
        engine.add_listener(
            node,
            EventKind::PointerDown,
            ListenerKey::DialogPress,
            Rc::new(move |engine: &mut Engine, event: &Event| -> Result<Outcome, HandlerError> {
                engine.begin_dialog_drag(node, event.target, event.position);
                Ok(Outcome::Continue)
            }),
        );

        let mut drag = DragResizeState::new();
        if let Some(min) = engine.config.min_resize {
            drag = drag.with_min_size(min);
        }
        engine.dialogs.insert(node, DialogState::new(close, content, drag));
        debug!("dialog {node:?} ready");
        node
    }
}

fn dialog_css(thickness: f64) -> alloc::string::String {
    let mut css = alloc::string::String::from(DIALOG_CSS);
    for edge in ResizeEdge::ALL {
        let (offsets, size) = match edge {
            ResizeEdge::Top => ("top: 0;\n    left: 0;\n    right: 0;", "height"),
            ResizeEdge::Bottom => ("bottom: 0;\n    left: 0;\n    right: 0;", "height"),
            ResizeEdge::Left => ("top: 0;\n    bottom: 0;\n    left: 0;", "width"),
            ResizeEdge::Right => ("top: 0;\n    bottom: 0;\n    right: 0;", "width"),
            ResizeEdge::TopLeft => ("top: 0;\n    left: 0;", "both"),
            ResizeEdge::TopRight => ("top: 0;\n    right: 0;", "both"),
            ResizeEdge::BottomLeft => ("bottom: 0;\n    left: 0;", "both"),
            ResizeEdge::BottomRight => ("bottom: 0;\n    right: 0;", "both"),
        };
        let size = match size {
            "both" => format!("width: {thickness}px;\n    height: {thickness}px;"),
            axis => format!("{axis}: {thickness}px;"),
        };
        css.push_str(&format!(
            ".resizer-{} {{\n    {offsets}\n    {size}\n    cursor: {};\n}}\n",
            edge.name(),
            edge.cursor()
        ));
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_covers_every_handle() {
        let css = dialog_css(10.0);
        for edge in ResizeEdge::ALL {
            assert!(css.contains(&format!(".resizer-{} {{", edge.name())));
        }
        assert!(css.contains(".resizer-bottomright {\n    bottom: 0;\n    right: 0;\n    width: 10px;\n    height: 10px;\n    cursor: nwse-resize;\n}"));
    }
}
