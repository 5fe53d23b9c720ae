// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dialog placement choreography and pointer-driven drag/resize.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use log::{debug, trace};
use understory_dom::NodeId;
use understory_event_state::drag::{DragResizeState, Grip, ResizeEdge, hit_grip};

use super::mask::MASK_Z_INDEX;
use super::px;
use crate::Engine;
use crate::anchor::Anchor;
use crate::error::EngineError;
use crate::metrics::calc_px;
use crate::tags::{DialogTag, TagRenderer};

/// How [`Engine::show_dialog`] presents a dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogOptions {
    /// Show the modal backdrop.
    pub modal: bool,
    /// Show the close button.
    pub closable: bool,
    /// Dialog width.
    pub width: String,
    /// Dialog height.
    pub height: String,
    /// Left offset; used together with `y`, it overrides `dock`.
    pub x: String,
    /// Top offset; used together with `x`, it overrides `dock`.
    pub y: String,
    /// Placement: `center`, `fill`, `left`, `right`, `top` or `bottom`.
    pub dock: String,
    /// Parent for a detached dialog. Defaults to the body.
    pub parent: Option<NodeId>,
}

impl Default for DialogOptions {
    fn default() -> Self {
        Self {
            modal: true,
            closable: true,
            width: String::from("600px"),
            height: String::from("400px"),
            x: String::new(),
            y: String::new(),
            dock: String::from("center"),
            parent: None,
        }
    }
}

impl DialogOptions {
    /// Places the dialog at an explicit offset.
    #[must_use]
    pub fn at(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x = x.into();
        self.y = y.into();
        self
    }

    /// Docks the dialog.
    #[must_use]
    pub fn dock(mut self, dock: impl Into<String>) -> Self {
        self.dock = dock.into();
        self
    }

    /// Sets the dialog size.
    #[must_use]
    pub fn size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = width.into();
        self.height = height.into();
        self
    }

    /// Turns the backdrop on or off.
    #[must_use]
    pub fn modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    /// Shows or hides the close button.
    #[must_use]
    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }
}

#[derive(Debug)]
pub(crate) struct DialogState {
    close: NodeId,
    content: NodeId,
    drag: DragResizeState,
    dock: String,
    modal: bool,
    start_rect: Option<Rect>,
}

impl DialogState {
    pub(crate) fn new(close: NodeId, content: NodeId, drag: DragResizeState) -> Self {
        Self {
            close,
            content,
            drag,
            dock: String::new(),
            modal: false,
            start_rect: None,
        }
    }
}

impl Engine {
    /// Shows a dialog.
    ///
    /// With `x` and `y` set, the dialog grows from a point at the target
    /// position. Otherwise `dock` decides: `center` places it at once, the
    /// edge docks and `fill` slide it in from outside the viewport. Each
    /// animated step lands one
    /// [`EngineConfig::step_interval`](crate::EngineConfig::step_interval)
    /// later. Elements that are not dialogs yet are turned into one first.
    pub fn show_dialog(&mut self, node: NodeId, options: &DialogOptions) -> Result<(), EngineError> {
        if !self.document.is_element(node) {
            return Err(EngineError::StaleNode(node));
        }
        if !self.dialogs.contains_key(&node) {
            DialogTag.render(self, node);
        }
        if self.document.parent(node).is_none() {
            let parent = options.parent.unwrap_or_else(|| self.document.body());
            self.document.append_child(parent, node);
            self.settle();
        }
        if options.modal {
            self.show_mask(MASK_Z_INDEX);
        }
        let Some(state) = self.dialogs.get_mut(&node) else {
            return Err(EngineError::StaleNode(node));
        };
        state.dock.clone_from(&options.dock);
        state.modal = options.modal;
        state.start_rect = None;
        let close = state.close;

        let doc = &mut self.document;
        doc.set_style(close, "display", if options.closable { "block" } else { "none" });
        doc.set_style(node, "display", "block");
        doc.set_style(node, "width", options.width.as_str());
        doc.set_style(node, "height", options.height.as_str());

        let viewport = self.metrics.viewport();
        let size = self.metrics.node_rect(&self.document, node).size();
        let (vw, vh, pw, ph) = (viewport.width, viewport.height, size.width, size.height);
        debug!("show dialog {node:?}: dock {:?}, {pw}x{ph} in {vw}x{vh}", options.dock);

        if !options.x.is_empty() && !options.y.is_empty() {
            let root_font = self.config.root_font_size;
            let x = calc_px(&self.document, node, &options.x, root_font);
            let y = calc_px(&self.document, node, &options.y, root_font);
            let start = Rect::from_origin_size(Point::new(x + pw / 2.0, y), Size::ZERO);
            let finals = Vec::from([
                ("left", px(x)),
                ("top", px(y)),
                ("width", options.width.clone()),
                ("height", options.height.clone()),
            ]);
            self.slide_in(node, start, finals);
            return Ok(());
        }

        let zero = || String::from("0");
        match Anchor::parse(&options.dock) {
            Some(Anchor::Center) => {
                self.document.set_style(node, "left", px((vw - pw) / 2.0));
                self.document.set_style(node, "top", px((vh - ph) / 2.0));
            }
            Some(Anchor::Fill) => self.slide_in(
                node,
                Rect::new(vw, 0.0, 2.0 * vw, vh),
                Vec::from([("left", zero()), ("borderRadius", zero())]),
            ),
            Some(Anchor::Left) => self.slide_in(
                node,
                Rect::new(-pw, 0.0, 0.0, vh),
                Vec::from([
                    ("left", zero()),
                    ("borderTopLeftRadius", zero()),
                    ("borderBottomLeftRadius", zero()),
                ]),
            ),
            Some(Anchor::Right) => self.slide_in(
                node,
                Rect::new(vw, 0.0, vw + pw, vh),
                Vec::from([
                    ("left", px(vw - pw)),
                    ("borderTopRightRadius", zero()),
                    ("borderBottomRightRadius", zero()),
                ]),
            ),
            Some(Anchor::Top) => self.slide_in(
                node,
                Rect::new(0.0, -ph, vw, 0.0),
                Vec::from([
                    ("top", zero()),
                    ("borderTopLeftRadius", zero()),
                    ("borderTopRightRadius", zero()),
                ]),
            ),
            Some(Anchor::Bottom) => self.slide_in(
                node,
                Rect::new(0.0, vh, vw, vh + ph),
                Vec::from([
                    ("top", px(vh - ph)),
                    ("borderBottomLeftRadius", zero()),
                    ("borderBottomRightRadius", zero()),
                ]),
            ),
            _ => {}
        }
        Ok(())
    }

    /// Applies `start` now and `finals` one step later.
    fn slide_in(&mut self, node: NodeId, start: Rect, finals: Vec<(&'static str, String)>) {
        self.set_bound(node, start);
        if let Some(state) = self.dialogs.get_mut(&node) {
            state.start_rect = Some(start);
        }
        let step = self.config.step_interval;
        self.after_for(step, node, move |engine| {
            for (property, value) in finals {
                engine.document.set_style(node, property, value);
            }
        });
    }

    fn set_bound(&mut self, node: NodeId, rect: Rect) {
        let doc = &mut self.document;
        doc.set_style(node, "left", px(rect.x0));
        doc.set_style(node, "top", px(rect.y0));
        doc.set_style(node, "width", px(rect.width()));
        doc.set_style(node, "height", px(rect.height()));
    }

    /// Closes a dialog, optionally removing it from the tree.
    ///
    /// A docked dialog first slides back towards where it came from. The
    /// dialog is hidden after one or two steps and the backdrop of a modal
    /// dialog fades one step later.
    pub fn close_dialog(&mut self, node: NodeId, remove: bool) -> Result<(), EngineError> {
        if !self.document.is_alive(node) {
            return Err(EngineError::StaleNode(node));
        }
        let Some(state) = self.dialogs.get(&node) else {
            return Ok(());
        };
        let (start, modal) = (state.start_rect, state.modal);
        let dock = state.dock.clone();
        let step = self.config.step_interval;
        let mut delay = step;
        if let Some(start) = start {
            let retreat = match dock.as_str() {
                "top" | "bottom" => Some(("top", start.y0)),
                "left" | "right" | "fill" => Some(("left", start.x0)),
                _ => None,
            };
            if let Some((property, value)) = retreat {
                self.document.set_style(node, property, px(value));
            }
            delay += step;
        }
        debug!("close dialog {node:?} (remove: {remove})");
        self.after_for(delay, node, move |engine| {
            engine.document.set_style(node, "display", "none");
            if remove {
                engine.remove(node);
            }
        });
        if modal {
            self.after(delay + step, Self::hide_mask);
        }
        Ok(())
    }

    /// The off-screen rectangle the last [`Engine::show_dialog`] started from.
    ///
    /// `None` for centered dialogs.
    #[must_use]
    pub fn dialog_start_rect(&self, node: NodeId) -> Option<Rect> {
        self.dialogs.get(&node).and_then(|s| s.start_rect)
    }

    /// The box holding a dialog's content.
    #[must_use]
    pub fn dialog_content(&self, node: NodeId) -> Option<NodeId> {
        self.dialogs.get(&node).map(|s| s.content)
    }

    /// Whether `node` has been set up as a dialog.
    #[must_use]
    pub fn is_dialog(&self, node: NodeId) -> bool {
        self.dialogs.contains_key(&node)
    }

    pub(crate) fn begin_dialog_drag(&mut self, dialog: NodeId, pressed: NodeId, position: Point) {
        let rect = self.metrics.node_rect(&self.document, dialog);
        let handle = if self.document.parent(pressed) == Some(dialog) {
            self.document
                .classes(pressed)
                .into_iter()
                .find_map(|c| c.strip_prefix("resizer-").and_then(ResizeEdge::from_name))
        } else {
            None
        };
        let grip = match handle {
            Some(edge) => Grip::Resize(edge),
            None => hit_grip(rect, position, self.config.handle_thickness).unwrap_or(Grip::Move),
        };
        let Some(state) = self.dialogs.get_mut(&dialog) else {
            return;
        };
        state.drag.begin(grip, position, rect);
        self.dragging = Some(dialog);
        let root = self.document.root();
        self.document.set_style(root, "cursor", grip.cursor());
        debug!("press {dialog:?}: {grip:?} at {position:?}, from {rect:?}");
    }

    /// Moves the pointer. Drags or resizes the pressed dialog, if any.
    ///
    /// Returns the dialog's new rectangle.
    pub fn pointer_move(&mut self, position: Point) -> Option<Rect> {
        let dialog = self.dragging?;
        let state = self.dialogs.get_mut(&dialog)?;
        let grip = state.drag.grip()?;
        let rect = state.drag.update(position)?;
        let (left, top, width, height) = match grip {
            Grip::Move => (true, true, false, false),
            Grip::Resize(edge) => (
                edge.moves_left(),
                edge.moves_top(),
                edge.moves_left() || edge.grows_right(),
                edge.moves_top() || edge.grows_down(),
            ),
        };
        let doc = &mut self.document;
        if left {
            doc.set_style(dialog, "left", px(rect.x0));
        }
        if top {
            doc.set_style(dialog, "top", px(rect.y0));
        }
        if width {
            doc.set_style(dialog, "width", px(rect.width()));
        }
        if height {
            doc.set_style(dialog, "height", px(rect.height()));
        }
        trace!("{grip:?} {dialog:?} -> {rect:?} at {position:?}");
        Some(rect)
    }

    /// Releases the pointer, ending any drag or resize.
    ///
    /// Returns whether a session ended.
    pub fn pointer_up(&mut self) -> bool {
        let ended = self
            .dragging
            .take()
            .and_then(|d| self.dialogs.get_mut(&d))
            .and_then(|s| s.drag.end())
            .is_some();
        if !self.dialogs.is_empty() {
            let root = self.document.root();
            self.document.set_style(root, "cursor", "auto");
        }
        ended
    }
}
