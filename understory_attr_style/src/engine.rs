// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: document, registries, theme and virtual clock in one place.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use hashbrown::HashMap;
use log::{debug, warn};
use understory_dom::{Document, NodeId};
use understory_timing::{TimerId, TimerQueue};

use crate::anchor::StyleBundle;
use crate::callbacks::{AsyncCallback, Callback, CallbackRegistry, ReleaseQueue};
use crate::catalog::StyleCatalog;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::events::{DocumentEvent, DocumentHandler, ListenerTable};
use crate::legacy::ScriptHost;
use crate::metrics::{InlineMetrics, Metrics};
use crate::overlay::DialogState;
use crate::tags::{TagRegistry, TagRenderer};
use crate::theme::{Theme, ThemeClass, base_theme};

/// Called on a node whenever its theme is reapplied.
pub type ThemeHook = Rc<dyn Fn(&mut Engine, NodeId)>;

pub(crate) type Task = Box<dyn FnOnce(&mut Engine)>;

/// Keeps declarative attributes and inline style in sync.
///
/// The engine owns a [`Document`]. Once [`started`](Engine::start), every
/// element inserted into the connected tree is rendered by its tag kind and
/// has its attributes translated, and every later attribute write is
/// translated again. Work happens at [`settle`](Engine::settle), which all
/// engine entry points call before returning.
///
/// Time is virtual: waits used by dialogs, the mask and toasts are timer
/// tasks that run when the host calls [`advance`](Engine::advance).
pub struct Engine {
    pub(crate) document: Document,
    pub(crate) catalog: StyleCatalog,
    pub(crate) tags: TagRegistry,
    pub(crate) callbacks: CallbackRegistry,
    pub(crate) script_host: Option<Rc<dyn ScriptHost>>,
    pub(crate) listeners: ListenerTable,
    pub(crate) document_handlers: Vec<(DocumentEvent, DocumentHandler)>,
    pub(crate) theme_hooks: HashMap<NodeId, ThemeHook>,
    pub(crate) theme: Theme,
    pub(crate) running: bool,
    pub(crate) timers: TimerQueue<Task>,
    pub(crate) config: EngineConfig,
    pub(crate) metrics: Box<dyn Metrics>,
    pub(crate) dialogs: HashMap<NodeId, DialogState>,
    pub(crate) dragging: Option<NodeId>,
    pub(crate) mask: Option<NodeId>,
    pub(crate) toast_count: usize,
    pub(crate) releases: ReleaseQueue,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("running", &self.running)
            .field("theme", &self.theme.name())
            .field("tags", &self.tags)
            .field("listeners", &self.listeners)
            .field("timers", &self.timers)
            .field("dialogs", &self.dialogs.len())
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Engine {
    /// Creates a stopped engine with the built-in tags and default config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a builder.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the document.
    ///
    /// Attribute writes made here are picked up at the next
    /// [`settle`](Engine::settle).
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The current theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The style property catalog.
    #[must_use]
    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    /// The tag registry.
    #[must_use]
    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Mutable access to the tag registry.
    pub fn tags_mut(&mut self) -> &mut TagRegistry {
        &mut self.tags
    }

    /// The metrics provider.
    #[must_use]
    pub fn metrics(&self) -> &dyn Metrics {
        &*self.metrics
    }

    /// Virtual time elapsed since the engine was built.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Registers a callback for `click="name"`.
    pub fn register_callback(
        &mut self,
        name: impl Into<String>,
        callback: impl Fn(&mut Self, NodeId) -> Result<(), crate::HandlerError> + 'static,
    ) {
        self.callbacks.insert(name, Rc::new(callback));
    }

    /// Registers a callback for `asyncClick="name"`.
    pub fn register_async_callback(
        &mut self,
        name: impl Into<String>,
        callback: impl Fn(&mut Self, NodeId, crate::ClickGuard) -> Result<(), crate::HandlerError>
        + 'static,
    ) {
        self.callbacks.insert_async(name, Rc::new(callback));
    }

    /// Writes a list of style properties to `node`.
    pub(crate) fn apply_bundle(&mut self, node: NodeId, bundle: &StyleBundle) {
        for (property, value) in bundle {
            self.document.set_style(node, property, value.as_ref());
        }
    }

    /// Appends `child` to `parent` and settles.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), EngineError> {
        for id in [parent, child] {
            if !self.document.is_alive(id) {
                return Err(EngineError::StaleNode(id));
            }
        }
        self.document.append_child(parent, child);
        self.settle();
        Ok(())
    }

    /// Parses `markup` into `parent` and settles.
    ///
    /// Returns the top-level nodes of the markup.
    pub fn parse_into(&mut self, parent: NodeId, markup: &str) -> Result<Vec<NodeId>, EngineError> {
        if !self.document.is_alive(parent) {
            return Err(EngineError::StaleNode(parent));
        }
        let nodes = self.document.parse_into(parent, markup)?;
        self.settle();
        Ok(nodes)
    }

    /// Removes `node` and its subtree, along with everything the engine keeps
    /// for them.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if !self.document.is_alive(node) {
            return false;
        }
        for id in self.document.subtree(node) {
            self.listeners.remove_node(id);
            self.theme_hooks.remove(&id);
            self.dialogs.remove(&id);
            if self.dragging == Some(id) {
                self.dragging = None;
            }
            if self.mask == Some(id) {
                self.mask = None;
            }
        }
        self.document.remove(node)
    }

    /// Schedules `task` to run `delay` from now.
    pub fn after(&mut self, delay: Duration, task: impl FnOnce(&mut Self) + 'static) -> TimerId {
        self.timers.schedule(delay, Box::new(task))
    }

    /// Schedules `task` for `node`; the task is skipped if the node is gone.
    pub(crate) fn after_for(
        &mut self,
        delay: Duration,
        node: NodeId,
        task: impl FnOnce(&mut Self) + 'static,
    ) -> TimerId {
        self.after(delay, move |engine| {
            if engine.document.is_alive(node) {
                task(engine);
            } else {
                warn!("timer task for {node:?} skipped: node was removed");
            }
        })
    }

    /// Cancels a scheduled task. Returns whether it was pending.
    pub fn cancel_timer(&mut self, id: TimerId) -> bool {
        let cancelled = self.timers.cancel(id).is_some();
        self.drain_releases();
        cancelled
    }

    /// Whether any timer task is pending.
    #[must_use]
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Advances virtual time by `dt`, running due tasks in deadline order.
    ///
    /// Tasks scheduled by running tasks also run if they fall due within `dt`.
    /// Nodes whose [`ClickGuard`](crate::ClickGuard)s were dropped since the
    /// last call are re-enabled even when no task is due.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.timers.now() + dt;
        while let Some((_, task)) = self.timers.pop_due(until) {
            task(self);
            self.drain_releases();
            self.settle();
        }
        self.timers.advance_to(until);
        self.drain_releases();
        self.settle();
    }

    /// Replaces the current theme and reapplies it to the whole tree.
    ///
    /// Every element with a `themeCls` attribute gets its base colors again and
    /// every theme hook runs. Then [`DocumentEvent::ThemeChanged`] is sent once.
    pub fn set_theme(&mut self, theme: Theme) {
        debug!("theme -> {}", theme.name());
        self.theme = theme;
        let root = self.document.root();
        for node in self.document.subtree(root) {
            if !self.document.is_alive(node) {
                continue;
            }
            if let Some(class) = self.document.attribute(node, "themecls") {
                let bundle = base_theme(&self.theme, ThemeClass::parse(class));
                self.apply_bundle(node, &bundle);
            }
            if let Some(hook) = self.theme_hooks.get(&node).cloned() {
                hook(self, node);
            }
        }
        self.emit(DocumentEvent::ThemeChanged);
        self.drain_releases();
        self.settle();
    }

    /// Applies the base theme for `class` to one node and runs its hook.
    pub fn set_theme_class(&mut self, node: NodeId, class: &str) {
        if !self.document.is_element(node) {
            return;
        }
        let bundle = base_theme(&self.theme, ThemeClass::parse(class));
        self.apply_bundle(node, &bundle);
        if let Some(hook) = self.theme_hooks.get(&node).cloned() {
            hook(self, node);
        }
    }

    /// Installs the hook run when `node`'s theme is reapplied.
    pub fn set_theme_hook(&mut self, node: NodeId, hook: ThemeHook) {
        self.theme_hooks.insert(node, hook);
    }

    /// Observes document-wide notifications.
    pub fn on_document_event(&mut self, event: DocumentEvent, handler: DocumentHandler) {
        self.document_handlers.push((event, handler));
    }

    fn emit(&mut self, event: DocumentEvent) {
        let handlers: Vec<DocumentHandler> = self
            .document_handlers
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(self, event);
        }
    }
}

/// Builder for [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    catalog: Option<StyleCatalog>,
    tags: Option<TagRegistry>,
    callbacks: CallbackRegistry,
    metrics: Option<Box<dyn Metrics>>,
    script_host: Option<Rc<dyn ScriptHost>>,
}

impl fmt::Debug for EngineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("config", &self.config)
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}

impl EngineBuilder {
    /// Uses `config`.
    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the style property catalog.
    #[must_use]
    pub fn catalog(mut self, catalog: StyleCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replaces the whole tag registry, built-in kinds included.
    ///
    /// Kinds added earlier with [`EngineBuilder::tag`] are discarded.
    #[must_use]
    pub fn tags(mut self, tags: TagRegistry) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Adds or overrides one tag kind.
    #[must_use]
    pub fn tag(mut self, name: &str, renderer: impl TagRenderer + 'static) -> Self {
        self.tags
            .get_or_insert_with(TagRegistry::builtin)
            .register(name, renderer);
        self
    }

    /// Registers a callback for `click="name"`.
    #[must_use]
    pub fn callback(
        mut self,
        name: impl Into<String>,
        callback: impl Fn(&mut Engine, NodeId) -> Result<(), crate::HandlerError> + 'static,
    ) -> Self {
        let callback: Callback = Rc::new(callback);
        self.callbacks.insert(name, callback);
        self
    }

    /// Registers a callback for `asyncClick="name"`.
    #[must_use]
    pub fn async_callback(
        mut self,
        name: impl Into<String>,
        callback: impl Fn(&mut Engine, NodeId, crate::ClickGuard) -> Result<(), crate::HandlerError>
        + 'static,
    ) -> Self {
        let callback: AsyncCallback = Rc::new(callback);
        self.callbacks.insert_async(name, callback);
        self
    }

    /// Uses a custom metrics provider instead of [`InlineMetrics`].
    #[must_use]
    pub fn metrics(mut self, metrics: impl Metrics + 'static) -> Self {
        self.metrics = Some(Box::new(metrics));
        self
    }

    /// Installs a host for click handlers given as source text.
    #[must_use]
    pub fn script_host(mut self, host: impl ScriptHost + 'static) -> Self {
        self.script_host = Some(Rc::new(host));
        self
    }

    /// Builds a stopped engine.
    #[must_use]
    pub fn build(self) -> Engine {
        let tags = self.tags.unwrap_or_else(TagRegistry::builtin);
        let metrics: Box<dyn Metrics> = match self.metrics {
            Some(metrics) => metrics,
            None => Box::new(InlineMetrics::new(
                self.config.viewport,
                self.config.root_font_size,
            )),
        };
        Engine {
            document: Document::new(),
            catalog: self.catalog.unwrap_or_else(StyleCatalog::standard),
            tags,
            callbacks: self.callbacks,
            script_host: self.script_host,
            listeners: ListenerTable::default(),
            document_handlers: Vec::new(),
            theme_hooks: HashMap::new(),
            theme: self.config.theme.clone(),
            running: false,
            timers: TimerQueue::new(),
            config: self.config,
            metrics,
            dialogs: HashMap::new(),
            dragging: None,
            mask: None,
            toast_count: 0,
            releases: ReleaseQueue::default(),
        }
    }
}
