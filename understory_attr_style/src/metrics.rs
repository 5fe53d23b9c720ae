// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry queries the engine needs from its host.
//!
//! The engine never lays anything out. Dialog placement and drag sessions ask a
//! [`Metrics`] provider for the viewport and for a node's rectangle. Hosts with
//! a real layout engine plug their own provider in; [`InlineMetrics`] answers
//! from inline style alone, which is enough for absolutely positioned overlays.

use kurbo::{Rect, Size};
use understory_dom::{Document, NodeId};

use crate::grid::leading_int;

/// Source of layout measurements.
pub trait Metrics {
    /// Size of the visible area.
    fn viewport(&self) -> Size;

    /// Border box of `node` relative to the viewport.
    fn node_rect(&self, doc: &Document, node: NodeId) -> Rect;
}

/// Measures nodes from their inline `left`, `top`, `width` and `height`.
///
/// Lengths in `px`, `%` (of the viewport), `em` and `rem` resolve; anything
/// else counts as zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InlineMetrics {
    viewport: Size,
    root_font_size: f64,
}

impl InlineMetrics {
    /// Creates a provider for a fixed viewport.
    #[must_use]
    pub const fn new(viewport: Size, root_font_size: f64) -> Self {
        Self {
            viewport,
            root_font_size,
        }
    }

    /// Resolves a length, with `%` taken against `extent`.
    ///
    /// ```rust
    /// use kurbo::Size;
    /// use understory_attr_style::InlineMetrics;
    /// use understory_dom::Document;
    ///
    /// let doc = Document::new();
    /// let m = InlineMetrics::new(Size::new(1000.0, 500.0), 16.0);
    /// let body = doc.body();
    /// assert_eq!(m.resolve(&doc, body, "40px", 1000.0), Some(40.0));
    /// assert_eq!(m.resolve(&doc, body, "50%", 500.0), Some(250.0));
    /// assert_eq!(m.resolve(&doc, body, "2rem", 0.0), Some(32.0));
    /// assert_eq!(m.resolve(&doc, body, "auto", 0.0), None);
    /// ```
    #[must_use]
    pub fn resolve(&self, doc: &Document, node: NodeId, value: &str, extent: f64) -> Option<f64> {
        let (number, unit) = split_length(value)?;
        match unit {
            "px" | "" => Some(number),
            "%" => Some(number * extent / 100.0),
            "rem" => Some(number * self.root_font_size),
            "em" => {
                let base = doc
                    .parent(node)
                    .map_or(self.root_font_size, |p| self.font_size(doc, p));
                Some(number * base)
            }
            _ => None,
        }
    }

    /// Font size of `node` in pixels, inherited through ancestors.
    #[must_use]
    pub fn font_size(&self, doc: &Document, node: NodeId) -> f64 {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if let Some((number, "px")) = split_length(doc.style_value(id, "fontSize")) {
                return number;
            }
            cursor = doc.parent(id);
        }
        self.root_font_size
    }
}

impl Metrics for InlineMetrics {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn node_rect(&self, doc: &Document, node: NodeId) -> Rect {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let length = |property: &str, extent: f64| {
            self.resolve(doc, node, doc.style_value(node, property), extent)
                .unwrap_or(0.0)
        };
        let x = length("left", w);
        let y = length("top", h);
        Rect::new(x, y, x + length("width", w), y + length("height", h))
    }
}

/// Splits `"12.5px"` into `(12.5, "px")`.
pub(crate) fn split_length(text: &str) -> Option<(f64, &str)> {
    let text = text.trim();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(text.len());
    let number = text[..end].parse::<f64>().ok()?;
    Some((number, text[end..].trim()))
}

/// Converts a `px`, `rem` or `em` length to whole pixels.
///
/// Only the integer part of the number is used; other units yield 0.
#[must_use]
pub fn calc_px(doc: &Document, node: NodeId, value: &str, root_font_size: f64) -> f64 {
    let Some(number) = leading_int(value) else {
        return 0.0;
    };
    let number = number as f64;
    if value.ends_with("px") {
        number
    } else if value.ends_with("rem") {
        number * trunc_px(root_font_size)
    } else if value.ends_with("em") {
        let metrics = InlineMetrics::new(Size::ZERO, root_font_size);
        let base = doc
            .parent(node)
            .map_or(root_font_size, |p| metrics.font_size(doc, p));
        number * trunc_px(base)
    } else {
        0.0
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "font sizes are far inside i64 range"
)]
fn trunc_px(value: f64) -> f64 {
    (value as i64) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_length_units() {
        assert_eq!(split_length("12.5px"), Some((12.5, "px")));
        assert_eq!(split_length("-3em"), Some((-3.0, "em")));
        assert_eq!(split_length("0"), Some((0.0, "")));
        assert_eq!(split_length("px"), None);
    }

    #[test]
    fn node_rect_reads_inline_style() {
        let mut doc = Document::new();
        let n = doc.create_element("div");
        doc.append_child(doc.body(), n);
        doc.set_style(n, "left", "10px");
        doc.set_style(n, "top", "50%");
        doc.set_style(n, "width", "600px");
        doc.set_style(n, "height", "25rem");
        let m = InlineMetrics::new(Size::new(1000.0, 800.0), 16.0);
        assert_eq!(m.node_rect(&doc, n), Rect::new(10.0, 400.0, 610.0, 800.0));
    }

    #[test]
    fn em_uses_parent_font() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_element("div");
        doc.append_child(doc.body(), parent);
        doc.append_child(parent, child);
        doc.set_style(parent, "fontSize", "20px");
        let m = InlineMetrics::new(Size::new(100.0, 100.0), 16.0);
        assert_eq!(m.resolve(&doc, child, "2em", 0.0), Some(40.0));
        assert_eq!(calc_px(&doc, child, "2em", 16.0), 40.0);
        assert_eq!(calc_px(&doc, child, "1.5rem", 16.0), 16.0);
        assert_eq!(calc_px(&doc, child, "120.7px", 16.0), 120.0);
        assert_eq!(calc_px(&doc, child, "30%", 16.0), 0.0);
    }
}
