// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named click callbacks and the guard that re-enables async click targets.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use understory_dom::NodeId;

use crate::Engine;
use crate::error::HandlerError;

/// A callback bound with `click="name"`.
pub type Callback = Rc<dyn Fn(&mut Engine, NodeId) -> Result<(), HandlerError>>;

/// A callback bound with `asyncClick="name"`.
///
/// The node stays disabled until the [`ClickGuard`] is dropped. Move the guard
/// into a timer task with [`Engine::after`] to keep the node disabled while
/// the operation is pending.
pub type AsyncCallback = Rc<dyn Fn(&mut Engine, NodeId, ClickGuard) -> Result<(), HandlerError>>;

pub(crate) type ReleaseQueue = Rc<RefCell<Vec<NodeId>>>;

/// Keeps an async click target disabled while alive.
///
/// Dropping the guard, on any path, queues the node for re-enabling. The engine
/// re-enables queued nodes as soon as control returns to it.
pub struct ClickGuard {
    node: NodeId,
    releases: ReleaseQueue,
}

impl ClickGuard {
    pub(crate) fn new(node: NodeId, releases: ReleaseQueue) -> Self {
        Self { node, releases }
    }

    /// The node that was clicked.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Drop for ClickGuard {
    fn drop(&mut self) {
        self.releases.borrow_mut().push(self.node);
    }
}

impl fmt::Debug for ClickGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClickGuard")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

#[derive(Default, Clone)]
pub(crate) struct CallbackRegistry {
    sync: HashMap<String, Callback>,
    deferred: HashMap<String, AsyncCallback>,
}

impl CallbackRegistry {
    pub(crate) fn insert(&mut self, name: impl Into<String>, callback: Callback) {
        self.sync.insert(name.into(), callback);
    }

    pub(crate) fn insert_async(&mut self, name: impl Into<String>, callback: AsyncCallback) {
        self.deferred.insert(name.into(), callback);
    }

    pub(crate) fn get(&self, name: &str) -> Option<Callback> {
        self.sync.get(name).cloned()
    }

    pub(crate) fn get_async(&self, name: &str) -> Option<AsyncCallback> {
        self.deferred.get(name).cloned()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("sync", &self.sync.len())
            .field("async", &self.deferred.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_queues_on_drop() {
        let queue = ReleaseQueue::default();
        let node = understory_dom::Document::new().body();
        let guard = ClickGuard::new(node, queue.clone());
        assert!(queue.borrow().is_empty());
        drop(guard);
        assert_eq!(*queue.borrow(), [node]);
    }
}
