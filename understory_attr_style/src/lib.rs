// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_attr_style --heading-base-level=0

//! Understory Attr Style: declarative attributes and custom tags, translated
//! into live inline style.
//!
//! An [`Engine`] owns an [`understory_dom::Document`] and keeps it styled:
//!
//! - Attributes that name a standard style property (case-insensitively) are
//!   written through to that property. `width="300px"` sets `width`.
//! - Shorthand attributes expand into several properties: `anchor`, `dock`,
//!   `childAnchor`, `gridC`, `shadow`, `themeCls`, `hoverBgColor`, `click` and
//!   more.
//! - Custom tags (`rect`, `row`, `grid`, `button`, `dialog`, ...) are rendered
//!   by a [`TagRenderer`](tags::TagRenderer) from the [`TagRegistry`](tags::TagRegistry)
//!   when they are inserted.
//!
//! Rules that have to reach a node's children go to scoped style blocks in the
//! document's [`StyleRegistry`](understory_dom::StyleRegistry), keyed by the
//! node id. See [`child_style`].
//!
//! ## Pipeline
//!
//! After [`Engine::start`], insertions and attribute writes on the connected
//! tree are recorded. [`Engine::settle`] handles them; the engine's own
//! mutating entry points settle for you. Markup loaded before the engine
//! started can be processed with [`Engine::process_subtree`].
//!
//! ## Time and input
//!
//! Animated behavior (dialogs sliding in, the modal mask fading, toasts) is
//! scheduled on a virtual clock. Nothing happens until the host calls
//! [`Engine::advance`]. Input arrives the same way, through [`Engine::click`],
//! [`Engine::pointer_over`], [`Engine::pointer_down`], [`Engine::pointer_move`]
//! and [`Engine::pointer_up`].
//!
//! ## Themes
//!
//! A [`Theme`] is a named palette. Elements with a `themeCls` attribute take
//! their colors from it, and [`Engine::set_theme`] recolors the whole tree and
//! notifies [`DocumentEvent::ThemeChanged`] handlers once.
//!
//! ## Example
//!
//! ```rust
//! use understory_attr_style::Engine;
//!
//! let mut engine = Engine::new();
//! engine.start();
//! let body = engine.document().body();
//! let nodes = engine
//!     .parse_into(body, r#"<rect anchor="topLeft" width="300px" bgColor="red"/>"#)
//!     .unwrap();
//!
//! let doc = engine.document();
//! assert_eq!(doc.style_value(nodes[0], "position"), "absolute");
//! assert_eq!(doc.style_value(nodes[0], "top"), "0px");
//! assert_eq!(doc.style_value(nodes[0], "width"), "300px");
//! assert_eq!(doc.style_value(nodes[0], "backgroundColor"), "red");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod anchor;
pub mod child_style;
pub mod tags;

mod callbacks;
mod catalog;
mod color;
mod config;
mod effects;
mod engine;
mod error;
mod events;
mod grid;
mod legacy;
mod metrics;
mod overlay;
mod pipeline;
mod theme;
mod translate;

pub use anchor::{Anchor, Position, StyleBundle};
pub use callbacks::{AsyncCallback, Callback, ClickGuard};
pub use catalog::{STANDARD_PROPERTIES, StyleCatalog};
pub use color::{darker, lighter, parse_color, with_opacity};
pub use config::{EngineConfig, EngineConfigBuilder, FONT_AWESOME_HREF};
pub use effects::{
    TransformKind, background_image, box_shadow, enabled_style, text_shadow, transform,
    visibility,
};
pub use engine::{Engine, EngineBuilder, ThemeHook};
pub use error::{EngineError, HandlerError};
pub use events::{
    DocumentEvent, DocumentHandler, Event, EventKind, Handler, ListenerKey, Outcome,
};
pub use grid::{GridAxis, grid_span};
pub use legacy::ScriptHost;
pub use metrics::{InlineMetrics, Metrics, calc_px};
pub use overlay::{DialogOptions, MASK_Z_INDEX, TOOLTIP_ID, ToastOptions, TooltipText};
pub use theme::{Theme, ThemeBuilder, ThemeClass, ThemeSlot, base_theme};
