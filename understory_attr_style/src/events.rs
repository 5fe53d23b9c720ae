// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events, listeners and dispatch.
//!
//! Listeners are keyed by node, event kind and a [`ListenerKey`]. Binding the
//! same key again replaces the earlier listener, so re-applying an attribute
//! such as `hoverColor` never stacks handlers.
//!
//! Dispatch walks from the target up through its ancestors. A handler that
//! returns [`Outcome::Stop`] ends propagation once the remaining listeners of
//! the current node have run.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use log::warn;
use smallvec::SmallVec;
use understory_dom::NodeId;

use crate::Engine;
use crate::callbacks::ClickGuard;
use crate::error::{EngineError, HandlerError};

/// Kinds of pointer events the engine routes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Primary button click.
    Click,
    /// Pointer entered the node.
    PointerOver,
    /// Pointer left the node.
    PointerOut,
    /// Primary button pressed.
    PointerDown,
    /// Pointer moved.
    PointerMove,
    /// Primary button released.
    PointerUp,
}

/// An event travelling from `target` towards the root.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// The node the pointer is over.
    pub target: NodeId,
    /// Pointer position in viewport coordinates.
    pub position: Point,
}

impl Event {
    /// Creates an event at the origin.
    #[must_use]
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            position: Point::ZERO,
        }
    }

    /// Sets the pointer position.
    #[must_use]
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }
}

/// Propagation decision returned by handlers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Keep bubbling.
    #[default]
    Continue,
    /// Stop after the current node.
    Stop,
}

/// Identifies a listener slot on a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerKey {
    /// `click` attribute.
    Click,
    /// Async click bound by a button's `asyncClick`.
    AsyncClick,
    /// `hoverBgColor` attribute.
    HoverBackground,
    /// `hoverColor` attribute.
    HoverColor,
    /// Button hover opacity.
    HoverOpacity,
    /// Dialog drag/resize press.
    DialogPress,
    /// Dialog close button.
    CloseButton,
    /// Tooltip show and hide.
    Tooltip,
    /// Listeners added by the host.
    Custom(u32),
}

/// A listener callback.
pub type Handler = Rc<dyn Fn(&mut Engine, &Event) -> Result<Outcome, HandlerError>>;

/// Document-wide notifications.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocumentEvent {
    /// [`Engine::set_theme`] finished updating the tree.
    ThemeChanged,
}

/// A document-level notification callback.
pub type DocumentHandler = Rc<dyn Fn(&mut Engine, DocumentEvent)>;

struct Listener {
    node: NodeId,
    kind: EventKind,
    key: ListenerKey,
    handler: Handler,
}

#[derive(Default)]
pub(crate) struct ListenerTable {
    entries: Vec<Listener>,
}

impl ListenerTable {
    pub(crate) fn insert(&mut self, node: NodeId, kind: EventKind, key: ListenerKey, handler: Handler) {
        match self.position(node, kind, key) {
            Some(idx) => self.entries[idx].handler = handler,
            None => self.entries.push(Listener {
                node,
                kind,
                key,
                handler,
            }),
        }
    }

    pub(crate) fn remove(&mut self, node: NodeId, kind: EventKind, key: ListenerKey) -> bool {
        match self.position(node, kind, key) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_node(&mut self, node: NodeId) {
        self.entries.retain(|l| l.node != node);
    }

    pub(crate) fn contains(&self, node: NodeId, kind: EventKind, key: ListenerKey) -> bool {
        self.position(node, kind, key).is_some()
    }

    pub(crate) fn handlers(&self, node: NodeId, kind: EventKind) -> SmallVec<[Handler; 2]> {
        self.entries
            .iter()
            .filter(|l| l.node == node && l.kind == kind)
            .map(|l| l.handler.clone())
            .collect()
    }

    fn position(&self, node: NodeId, kind: EventKind, key: ListenerKey) -> Option<usize> {
        self.entries
            .iter()
            .position(|l| l.node == node && l.kind == kind && l.key == key)
    }
}

impl fmt::Debug for ListenerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|l| (l.node, l.kind, l.key)))
            .finish()
    }
}

impl Engine {
    /// Adds or replaces a listener.
    pub fn add_listener(&mut self, node: NodeId, kind: EventKind, key: ListenerKey, handler: Handler) {
        self.listeners.insert(node, kind, key, handler);
    }

    /// Removes a listener. Returns whether one was bound.
    pub fn remove_listener(&mut self, node: NodeId, kind: EventKind, key: ListenerKey) -> bool {
        self.listeners.remove(node, kind, key)
    }

    /// Whether a listener is bound.
    #[must_use]
    pub fn has_listener(&self, node: NodeId, kind: EventKind, key: ListenerKey) -> bool {
        self.listeners.contains(node, kind, key)
    }

    /// Routes `event` from its target up to the root.
    ///
    /// Returns `true` when a handler stopped propagation. A failing handler
    /// aborts dispatch; its error is returned after pending releases and
    /// mutations have been processed.
    pub fn dispatch(&mut self, event: Event) -> Result<bool, EngineError> {
        if !self.document.is_alive(event.target) {
            return Err(EngineError::StaleNode(event.target));
        }
        let mut path = Vec::new();
        let mut cursor = Some(event.target);
        while let Some(node) = cursor {
            path.push(node);
            cursor = self.document.parent(node);
        }
        let mut stopped = false;
        let mut failure = None;
        'path: for node in path {
            for handler in self.listeners.handlers(node, event.kind) {
                match handler(self, &event) {
                    Ok(Outcome::Continue) => {}
                    Ok(Outcome::Stop) => stopped = true,
                    Err(err) => {
                        failure = Some(err);
                        break 'path;
                    }
                }
            }
            if stopped {
                break;
            }
        }
        self.drain_releases();
        self.settle();
        match failure {
            Some(err) => Err(err.into()),
            None => Ok(stopped),
        }
    }

    /// Clicks `target`.
    ///
    /// Nothing happens when the target or an ancestor is disabled or has
    /// `pointerEvents: none`.
    pub fn click(&mut self, target: NodeId) -> Result<bool, EngineError> {
        if !self.document.is_alive(target) {
            return Err(EngineError::StaleNode(target));
        }
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            if self.document.is_disabled(node) || self.document.style_value(node, "pointerEvents") == "none" {
                return Ok(false);
            }
            cursor = self.document.parent(node);
        }
        self.dispatch(Event::new(EventKind::Click, target))
    }

    /// Moves the pointer onto `target`.
    pub fn pointer_over(&mut self, target: NodeId) -> Result<bool, EngineError> {
        self.dispatch(Event::new(EventKind::PointerOver, target))
    }

    /// Moves the pointer off `target`.
    pub fn pointer_out(&mut self, target: NodeId) -> Result<bool, EngineError> {
        self.dispatch(Event::new(EventKind::PointerOut, target))
    }

    /// Presses the primary button over `target`.
    pub fn pointer_down(&mut self, target: NodeId, position: Point) -> Result<bool, EngineError> {
        self.dispatch(Event::new(EventKind::PointerDown, target).at(position))
    }

    /// Enables or disables a node.
    ///
    /// A disabled node ignores clicks and renders in grayscale.
    pub fn set_enabled(&mut self, node: NodeId, enabled: bool) {
        self.document.set_disabled(node, !enabled);
        let bundle = crate::effects::enabled_style(enabled);
        self.apply_bundle(node, &bundle);
    }

    /// Binds an over/out pair that swaps `property` to `value` and shows a
    /// pointer cursor while hovered.
    pub(crate) fn bind_hover(&mut self, node: NodeId, key: ListenerKey, property: &'static str, value: &str) {
        let old_value = String::from(self.document.style_value(node, property));
        let old_cursor = String::from(self.document.style_value(node, "cursor"));
        let value = String::from(value);
        self.listeners.insert(
            node,
            EventKind::PointerOver,
            key,
            Rc::new(move |engine: &mut Self, _: &Event| -> Result<Outcome, HandlerError> {
                engine.document.set_style(node, property, value.as_str());
                engine.document.set_style(node, "cursor", "pointer");
                Ok(Outcome::Continue)
            }),
        );
        self.listeners.insert(
            node,
            EventKind::PointerOut,
            key,
            Rc::new(move |engine: &mut Self, _: &Event| -> Result<Outcome, HandlerError> {
                engine.document.set_style(node, property, old_value.as_str());
                engine.document.set_style(node, "cursor", old_cursor.as_str());
                Ok(Outcome::Continue)
            }),
        );
    }

    /// Binds `name` as the node's click handler. An empty name unbinds.
    pub(crate) fn bind_click(&mut self, node: NodeId, name: &str, deferred: bool) {
        let key = if deferred {
            ListenerKey::AsyncClick
        } else {
            ListenerKey::Click
        };
        if name.is_empty() {
            self.listeners.remove(node, EventKind::Click, key);
            return;
        }
        let name = String::from(name);
        self.listeners.insert(
            node,
            EventKind::Click,
            key,
            Rc::new(move |engine: &mut Self, _: &Event| -> Result<Outcome, HandlerError> {
                if deferred {
                    engine.run_async_click(node, &name)?;
                } else {
                    engine.run_click(node, &name)?;
                }
                Ok(Outcome::Stop)
            }),
        );
    }

    fn run_click(&mut self, node: NodeId, name: &str) -> Result<(), HandlerError> {
        if let Some(callback) = self.callbacks.get(name) {
            return callback(self, node);
        }
        if let Some(host) = self.script_host.clone() {
            return host.run(self, node, name);
        }
        warn!("click on {node:?}: no callback named `{name}`");
        Ok(())
    }

    fn run_async_click(&mut self, node: NodeId, name: &str) -> Result<(), HandlerError> {
        self.set_enabled(node, false);
        let guard = ClickGuard::new(node, self.releases.clone());
        if let Some(callback) = self.callbacks.get_async(name) {
            return callback(self, node, guard);
        }
        if let Some(callback) = self.callbacks.get(name) {
            let result = callback(self, node);
            drop(guard);
            return result;
        }
        if let Some(host) = self.script_host.clone() {
            return host.run_async(self, node, name, guard);
        }
        warn!("async click on {node:?}: no callback named `{name}`");
        drop(guard);
        Ok(())
    }

    /// Re-enables nodes whose click guards were dropped.
    pub(crate) fn drain_releases(&mut self) {
        let pending = core::mem::take(&mut *self.releases.borrow_mut());
        for node in pending {
            if self.document.is_alive(node) {
                self.set_enabled(node, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_dom::Document;

    fn noop() -> Handler {
        Rc::new(|_: &mut Engine, _: &Event| -> Result<Outcome, HandlerError> {
            Ok(Outcome::Continue)
        })
    }

    #[test]
    fn same_key_replaces() {
        let body = Document::new().body();
        let mut table = ListenerTable::default();
        table.insert(body, EventKind::Click, ListenerKey::Click, noop());
        table.insert(body, EventKind::Click, ListenerKey::Click, noop());
        table.insert(body, EventKind::Click, ListenerKey::Custom(1), noop());
        assert_eq!(table.handlers(body, EventKind::Click).len(), 2);
        assert!(table.remove(body, EventKind::Click, ListenerKey::Click));
        assert!(!table.remove(body, EventKind::Click, ListenerKey::Click));
        table.remove_node(body);
        assert!(table.handlers(body, EventKind::Click).is_empty());
    }
}
