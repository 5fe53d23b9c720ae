// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Head-level style blocks and stylesheet links.

use alloc::string::String;
use alloc::vec::Vec;

use crate::NodeId;

/// A style block registered in the document head and owned by one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleBlock {
    /// Registry key, conventionally `<node-id>-style`.
    pub key: String,
    /// The node that owns the block.
    pub owner: NodeId,
    /// The CSS text of the block.
    pub css: String,
}

/// Document-level registry of [`StyleBlock`]s keyed by name.
///
/// There is at most one block per key: [`StyleRegistry::upsert`] replaces the
/// text of an existing block instead of adding a second one.
#[derive(Clone, Debug, Default)]
pub struct StyleRegistry {
    blocks: Vec<StyleBlock>,
}

impl StyleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a block, or replaces the text and owner of the block with the same key.
    ///
    /// Returns `true` if a new block was created.
    pub fn upsert(&mut self, key: &str, owner: NodeId, css: impl Into<String>) -> bool {
        let css = css.into();
        if let Some(block) = self.blocks.iter_mut().find(|b| b.key == key) {
            block.owner = owner;
            block.css = css;
            false
        } else {
            self.blocks.push(StyleBlock {
                key: String::from(key),
                owner,
                css,
            });
            true
        }
    }

    /// Writes the block owned by `owner`, moving it to `key` if the owner's
    /// block was registered under another key.
    ///
    /// Any other block already registered under `key` is dropped, so both
    /// keys and owners stay unique. Returns `true` if a new block was created.
    pub fn upsert_owned(&mut self, key: &str, owner: NodeId, css: impl Into<String>) -> bool {
        let Some(idx) = self.blocks.iter().position(|b| b.owner == owner) else {
            return self.upsert(key, owner, css);
        };
        let block = &mut self.blocks[idx];
        if block.key != key {
            block.key = String::from(key);
            self.blocks.retain(|b| b.key != key || b.owner == owner);
        }
        if let Some(block) = self.blocks.iter_mut().find(|b| b.owner == owner) {
            block.css = css.into();
        }
        false
    }

    /// Returns the block owned by `owner`, if any.
    #[must_use]
    pub fn owned_by(&self, owner: NodeId) -> Option<&StyleBlock> {
        self.blocks.iter().find(|b| b.owner == owner)
    }

    /// Looks up a block by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StyleBlock> {
        self.blocks.iter().find(|b| b.key == key)
    }

    /// Removes a block by key.
    pub fn remove(&mut self, key: &str) -> Option<StyleBlock> {
        let idx = self.blocks.iter().position(|b| b.key == key)?;
        Some(self.blocks.remove(idx))
    }

    /// Removes every block owned by `owner`, returning how many were removed.
    pub fn remove_owned_by(&mut self, owner: NodeId) -> usize {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.owner != owner);
        before - self.blocks.len()
    }

    /// Returns the number of registered blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if no block is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates blocks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleBlock> + '_ {
        self.blocks.iter()
    }
}

/// Stylesheet links added to the document head, without duplicates.
#[derive(Clone, Debug, Default)]
pub struct LinkRegistry {
    hrefs: Vec<String>,
}

impl LinkRegistry {
    /// Adds a stylesheet link unless the same `href` is already present.
    ///
    /// Returns `true` if the link was added.
    pub fn add(&mut self, href: &str) -> bool {
        if self.contains(href) {
            return false;
        }
        self.hrefs.push(String::from(href));
        true
    }

    /// Returns `true` if a link with this `href` exists.
    #[must_use]
    pub fn contains(&self, href: &str) -> bool {
        self.hrefs.iter().any(|h| h == href)
    }

    /// Iterates link targets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.hrefs.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_in_place() {
        let mut reg = StyleRegistry::new();
        let owner = NodeId::new(1, 1);
        assert!(reg.upsert("a-style", owner, "#a > * { margin: 1px }"));
        assert!(!reg.upsert("a-style", owner, "#a > * { margin: 2px }"));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("a-style").map(|b| b.css.as_str()), Some("#a > * { margin: 2px }"));
    }

    #[test]
    fn remove_owned_by_only_touches_owner() {
        let mut reg = StyleRegistry::new();
        let a = NodeId::new(1, 1);
        let b = NodeId::new(2, 1);
        reg.upsert("a-style", a, "");
        reg.upsert("b-style", b, "");
        assert_eq!(reg.remove_owned_by(a), 1);
        assert!(reg.get("a-style").is_none());
        assert!(reg.get("b-style").is_some());
    }

    #[test]
    fn upsert_owned_moves_block_to_new_key() {
        let mut reg = StyleRegistry::new();
        let owner = NodeId::new(1, 1);
        let other = NodeId::new(2, 1);
        assert!(reg.upsert_owned("u1-style", owner, "#u1 > * { margin: 1px }"));
        reg.upsert("named-style", other, "stale");
        assert!(!reg.upsert_owned("named-style", owner, "#named > * { margin: 2px }"));
        assert_eq!(reg.len(), 1);
        assert!(reg.get("u1-style").is_none());
        let block = reg.owned_by(owner).unwrap();
        assert_eq!(block.key, "named-style");
        assert_eq!(block.css, "#named > * { margin: 2px }");
    }

    #[test]
    fn links_are_deduplicated() {
        let mut links = LinkRegistry::default();
        assert!(links.add("iconfont.css"));
        assert!(!links.add("iconfont.css"));
        assert_eq!(links.iter().count(), 1);
    }
}
