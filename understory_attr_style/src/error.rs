// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types surfaced by the engine.
//!
//! Malformed attribute values are never errors: they are ignored or passed
//! through to style verbatim. Only author callbacks and markup parsing can fail.

use alloc::string::String;
use core::fmt;

use understory_dom::{MarkupError, NodeId};

/// Failure reported by an author-supplied handler or callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Creates a handler error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message passed to [`HandlerError::new`].
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler failed: {}", self.message)
    }
}

impl core::error::Error for HandlerError {}

/// Errors returned from [`Engine`](crate::Engine) entry points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// The node handle no longer refers to a live node.
    StaleNode(NodeId),
    /// A click, listener or callback failed.
    Handler(HandlerError),
    /// Markup handed to the engine could not be parsed.
    Markup(MarkupError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleNode(id) => write!(f, "stale node handle {id:?}"),
            Self::Handler(err) => fmt::Display::fmt(err, f),
            Self::Markup(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::StaleNode(_) => None,
            Self::Handler(err) => Some(err),
            Self::Markup(err) => Some(err),
        }
    }
}

impl From<HandlerError> for EngineError {
    fn from(err: HandlerError) -> Self {
        Self::Handler(err)
    }
}

impl From<MarkupError> for EngineError {
    fn from(err: MarkupError) -> Self {
        Self::Markup(err)
    }
}
