// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag kinds: renderers that give a custom element its baseline style.
//!
//! A renderer runs once when the pipeline first sees an element whose tag name
//! is registered, before the element's attributes are translated. Attributes
//! therefore always override what the renderer set.

mod button;
mod dialog;
mod layout;
mod media;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use understory_dom::NodeId;

use crate::Engine;

pub use button::ButtonTag;
pub use dialog::DialogTag;
pub use layout::{CircleTag, ColumnTag, ContainerTag, FormTag, GridTag, RectTag, RowTag};
pub use media::{IconAwesomeTag, IconTag, ImgTag};

/// Sets up an element of one tag kind.
pub trait TagRenderer {
    /// Applies defaults and behavior to `node`.
    ///
    /// Returns the node whose attributes should be translated next, normally
    /// `node` itself.
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId;
}

impl<F> TagRenderer for F
where
    F: Fn(&mut Engine, NodeId) -> NodeId,
{
    fn render(&self, engine: &mut Engine, node: NodeId) -> NodeId {
        self(engine, node)
    }
}

/// Map from lowercase tag name to renderer.
#[derive(Clone, Default)]
pub struct TagRegistry {
    renderers: HashMap<String, Rc<dyn TagRenderer>>,
}

impl TagRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in kinds.
    ///
    /// ```rust
    /// use understory_attr_style::tags::TagRegistry;
    ///
    /// let tags = TagRegistry::builtin();
    /// assert!(tags.contains("Row"));
    /// assert!(tags.contains("icona"));
    /// assert!(!tags.contains("div"));
    /// ```
    #[must_use]
    pub fn builtin() -> Self {
        let mut tags = Self::new();
        tags.register("rect", RectTag);
        tags.register("circle", CircleTag);
        tags.register("row", RowTag);
        tags.register("column", ColumnTag);
        tags.register("grid", GridTag);
        tags.register("form", FormTag);
        tags.register("container", ContainerTag);
        tags.register("button", ButtonTag);
        tags.register("img", ImgTag);
        tags.register("icon", IconTag);
        tags.register("icona", IconAwesomeTag);
        tags.register("dialog", DialogTag);
        tags
    }

    /// Registers `renderer` for `name`, replacing any earlier renderer.
    ///
    /// Names are case-insensitive.
    pub fn register(&mut self, name: &str, renderer: impl TagRenderer + 'static) {
        self.renderers
            .insert(name.to_ascii_lowercase(), Rc::new(renderer));
    }

    /// Removes the renderer for `name`.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.renderers.remove(&name.to_ascii_lowercase()).is_some()
    }

    /// Whether `name` has a renderer.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(&name.to_ascii_lowercase())
    }

    /// The renderer for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<dyn TagRenderer>> {
        self.renderers.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.renderers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for TagRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
