// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change detection: turning mutation records into renders and translations.
//!
//! While running, the engine observes insertions and attribute writes on the
//! connected tree. [`Engine::settle`] drains the records:
//!
//! - An inserted element is rendered by its tag kind, then every attribute it
//!   carries is translated.
//! - A written attribute is translated again, alone. `style` and `id` are
//!   skipped. A removed attribute translates as the empty string.
//!
//! A subtree assembled while detached and attached in one call only reports its
//! outermost node. Use [`Engine::process_subtree`] for such subtrees.

use alloc::vec::Vec;

use log::{debug, warn};
use understory_dom::{MutationRecord, NodeId, ObserveOptions};

use crate::Engine;
use crate::error::EngineError;

impl Engine {
    /// Starts observing the document.
    ///
    /// Elements already in the tree are not processed; call
    /// [`Engine::process_subtree`] on the body for markup loaded earlier.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        debug!("pipeline started");
        self.document
            .observe(ObserveOptions::CHILD_LIST | ObserveOptions::ATTRIBUTES);
        self.running = true;
    }

    /// Stops observing. Pending records are discarded.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        debug!("pipeline stopped");
        self.document.disconnect();
        self.running = false;
    }

    /// Whether the pipeline is observing.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Handles pending mutation records until none are left.
    ///
    /// Handling a record can produce new ones; the loop gives up after
    /// [`EngineConfig::max_settle_rounds`](crate::EngineConfig::max_settle_rounds)
    /// rounds and leaves the rest queued. Returns the number of records handled.
    pub fn settle(&mut self) -> usize {
        if !self.running {
            return 0;
        }
        let mut handled = 0;
        for _ in 0..self.config.max_settle_rounds {
            let records = self.document.take_records();
            if records.is_empty() {
                return handled;
            }
            handled += records.len();
            for record in records {
                self.handle_record(record);
            }
        }
        if self.document.has_records() {
            warn!(
                "mutations still pending after {} settle rounds; attribute feedback loop?",
                self.config.max_settle_rounds
            );
        }
        handled
    }

    fn handle_record(&mut self, record: MutationRecord) {
        match record {
            MutationRecord::ChildList { added, .. } => {
                for node in added {
                    if self.document.is_element(node) {
                        self.render_and_translate(node);
                    }
                }
            }
            MutationRecord::Attribute { target, name } => {
                if name == "style" || name == "id" || !self.document.is_element(target) {
                    return;
                }
                let value = alloc::string::String::from(
                    self.document.attribute(target, &name).unwrap_or(""),
                );
                self.translate(target, &name, &value);
            }
        }
    }

    /// Renders `node` by its tag kind and translates all of its attributes.
    ///
    /// Returns the node whose attributes were translated. Text nodes are left
    /// alone.
    pub fn process_node(&mut self, node: NodeId) -> Result<NodeId, EngineError> {
        if !self.document.is_alive(node) {
            return Err(EngineError::StaleNode(node));
        }
        if !self.document.is_element(node) {
            return Ok(node);
        }
        let node = self.render_and_translate(node);
        self.drain_releases();
        self.settle();
        Ok(node)
    }

    /// Processes `node` and every element below it, parents first.
    ///
    /// Children a renderer adds or moves are visited too.
    pub fn process_subtree(&mut self, node: NodeId) -> Result<(), EngineError> {
        if !self.document.is_alive(node) {
            return Err(EngineError::StaleNode(node));
        }
        let mut stack: Vec<NodeId> = Vec::from([node]);
        while let Some(next) = stack.pop() {
            if !self.document.is_element(next) {
                continue;
            }
            let rendered = self.render_and_translate(next);
            stack.extend(self.document.children(rendered).iter().rev().copied());
        }
        self.drain_releases();
        self.settle();
        Ok(())
    }

    fn render_and_translate(&mut self, node: NodeId) -> NodeId {
        let mut node = node;
        let renderer = self
            .document
            .tag_name(node)
            .and_then(|tag| self.tags.get(tag));
        if let Some(renderer) = renderer {
            debug!(
                "render <{}> {node:?}",
                self.document.tag_name(node).unwrap_or_default()
            );
            node = renderer.render(self, node);
        }
        for (name, value) in self.document.attributes(node) {
            if name == "style" || name == "id" {
                continue;
            }
            self.translate(node, &name, &value);
        }
        node
    }
}
