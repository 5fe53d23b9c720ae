// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dom --heading-base-level=0

//! Understory DOM: a small live document tree for attribute-driven UIs.
//!
//! The tree holds elements and text nodes addressed by generational [`NodeId`]s.
//! Elements carry string attributes (names are case-insensitive and stored
//! lowercase), an inline [`StyleMap`] of camelCase style properties, and a
//! class list kept in the `class` attribute.
//!
//! Next to the tree, a [`Document`] owns two head-level registries:
//! - [`StyleRegistry`]: scoped style blocks, at most one per key, each owned by a node.
//!   Removing a node removes the blocks it owns.
//! - [`LinkRegistry`]: stylesheet links, deduplicated by `href`.
//!
//! ## Observing mutations
//!
//! [`Document::observe`] turns on recording of [`MutationRecord`]s for the
//! connected tree. Insertions under a connected parent produce
//! [`MutationRecord::ChildList`]; attribute writes and removals on connected
//! elements produce [`MutationRecord::Attribute`]. Inline style writes are never
//! recorded. Records are drained with [`Document::take_records`].
//!
//! A subtree built while detached and attached in one operation yields a single
//! insertion record for its outermost node. Consumers that need per-node
//! processing must walk [`Document::subtree`] themselves.
//!
//! ## Markup
//!
//! [`Document::parse_into`] streams elements into a live parent, one insertion
//! per element, with attributes set before each insertion.
//! [`Document::parse_fragment`] builds detached nodes instead.
//!
//! ```rust
//! use understory_dom::Document;
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let top = doc
//!     .parse_into(body, r#"<column gap="8px"><rect id="a"/></column>"#)
//!     .unwrap();
//!
//! assert_eq!(doc.tag_name(top[0]), Some("column"));
//! let a = doc.get_element_by_id("a").unwrap();
//! assert_eq!(doc.parent(a), Some(top[0]));
//! ```

#![no_std]

extern crate alloc;

mod document;
mod id;
mod markup;
mod mutation;
mod registry;
mod style;

pub use document::{Document, Element, NodeData};
pub use id::NodeId;
pub use markup::{MarkupError, MarkupErrorKind};
pub use mutation::{MutationRecord, ObserveOptions};
pub use registry::{LinkRegistry, StyleBlock, StyleRegistry};
pub use style::{StyleMap, camel_to_kebab, kebab_to_camel, parse_declarations};
