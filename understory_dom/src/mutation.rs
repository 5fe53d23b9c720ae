// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutation records produced by a [`Document`](crate::Document) while observed.

use alloc::string::String;
use smallvec::SmallVec;

use crate::NodeId;

bitflags::bitflags! {
    /// Which mutations a [`Document`](crate::Document) records.
    ///
    /// Observation always covers the whole connected tree; detached subtrees never
    /// produce records.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ObserveOptions: u8 {
        /// Record node insertions under connected parents.
        const CHILD_LIST = 0b0000_0001;
        /// Record attribute writes and removals on connected elements.
        const ATTRIBUTES = 0b0000_0010;
    }
}

/// One observed change to the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationRecord {
    /// Nodes were inserted under `target`.
    ///
    /// Only the inserted roots are listed. Descendants that were attached
    /// together with them are not reported individually.
    ChildList {
        /// The parent that received the nodes.
        target: NodeId,
        /// The inserted nodes, in insertion order.
        added: SmallVec<[NodeId; 1]>,
    },
    /// An attribute of `target` was written or removed.
    Attribute {
        /// The element whose attribute changed.
        target: NodeId,
        /// The lowercase attribute name.
        name: String,
    },
}

impl MutationRecord {
    /// Returns the node the record is about.
    #[must_use]
    pub fn target(&self) -> NodeId {
        match self {
            Self::ChildList { target, .. } | Self::Attribute { target, .. } => *target,
        }
    }
}
