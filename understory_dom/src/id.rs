// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identifiers.

use core::fmt;

/// Identifier for a node in a [`Document`](crate::Document).
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - On removal, the slot is freed; any `NodeId` that pointed to it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale identifiers never alias a different live node because the generation must match.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Returns the slot index of this identifier.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Returns the generation of this identifier.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}v{})", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn debug_shows_index_and_generation() {
        let id = NodeId::new(7, 3);
        assert_eq!(format!("{id:?}"), "NodeId(7v3)");
        assert_eq!(id.index(), 7);
        assert_eq!(id.generation(), 3);
    }
}
