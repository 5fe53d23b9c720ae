// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compatibility path for click handlers written as source text.
//!
//! Markup such as `click="alert('hi')"` names no registered callback. When a
//! [`ScriptHost`] is installed, the engine hands such text to it; without one
//! the click logs a warning and does nothing. Prefer registered callbacks.

use understory_dom::NodeId;

use crate::Engine;
use crate::callbacks::ClickGuard;
use crate::error::HandlerError;

/// Evaluates click handler source text on behalf of the engine.
pub trait ScriptHost {
    /// Runs `code` for a click on `node`.
    fn run(&self, engine: &mut Engine, node: NodeId, code: &str) -> Result<(), HandlerError>;

    /// Runs `code` for an async click on `node`.
    ///
    /// The default runs [`ScriptHost::run`] and then releases the guard.
    fn run_async(
        &self,
        engine: &mut Engine,
        node: NodeId,
        code: &str,
        guard: ClickGuard,
    ) -> Result<(), HandlerError> {
        let result = self.run(engine, node, code);
        drop(guard);
        result
    }
}
