// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::ToString;

use log::debug;
use understory_dom::NodeId;

use crate::Engine;

/// Stacking order used by modal dialogs.
pub const MASK_Z_INDEX: i32 = 99;

impl Engine {
    /// Shows the full-viewport backdrop at stacking order `z`.
    ///
    /// The backdrop is created on first use. It darkens after
    /// [`EngineConfig::mask_fade_in`](crate::EngineConfig::mask_fade_in).
    pub fn show_mask(&mut self, z: i32) -> NodeId {
        let existing = self.mask.filter(|m| self.document.is_alive(*m));
        let mask = match existing {
            Some(mask) => mask,
            None => {
                let body = self.document.body();
                let doc = &mut self.document;
                let mask = doc.create_element("div");
                doc.set_style(mask, "position", "fixed");
                doc.set_style(mask, "top", "0");
                doc.set_style(mask, "left", "0");
                doc.set_style(mask, "width", "100%");
                doc.set_style(mask, "height", "100%");
                doc.set_style(mask, "display", "none");
                doc.set_style(mask, "transition", "all 0.5s");
                doc.set_style(mask, "zIndex", z.to_string());
                doc.append_child(body, mask);
                self.mask = Some(mask);
                mask
            }
        };
        debug!("mask {mask:?} shown");
        self.document.set_style(mask, "display", "block");
        let delay = self.config.mask_fade_in;
        self.after_for(delay, mask, move |engine| {
            engine
                .document
                .set_style(mask, "backgroundColor", "rgba(0, 0, 0, 0.3)");
        });
        self.settle();
        mask
    }

    /// Fades the backdrop out and removes it after
    /// [`EngineConfig::mask_fade_out`](crate::EngineConfig::mask_fade_out).
    pub fn hide_mask(&mut self) {
        let Some(mask) = self.mask.take() else {
            return;
        };
        if !self.document.is_alive(mask) {
            return;
        }
        debug!("mask {mask:?} hiding");
        self.document
            .set_style(mask, "backgroundColor", "rgba(0, 0, 0, 0.0)");
        let delay = self.config.mask_fade_out;
        self.after_for(delay, mask, move |engine| {
            engine.document.set_style(mask, "display", "none");
            engine.remove(mask);
        });
    }

    /// The backdrop, while shown.
    #[must_use]
    pub fn mask(&self) -> Option<NodeId> {
        self.mask
    }
}
