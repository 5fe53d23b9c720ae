// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value rewrites for the visual effect attributes.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;

use crate::anchor::StyleBundle;

/// `boxShadow` for a `shadow` value: `true` and `false` are presets, anything
/// else is used as is.
#[must_use]
pub fn box_shadow(value: &str) -> Cow<'_, str> {
    toggle(value, "5px 5px 10px lightgray")
}

/// `textShadow` for a `textShadow` value.
#[must_use]
pub fn text_shadow(value: &str) -> Cow<'_, str> {
    toggle(value, "5px 5px 10px black")
}

fn toggle<'a>(value: &'a str, preset: &'static str) -> Cow<'a, str> {
    match value {
        "true" => Cow::Borrowed(preset),
        "false" => Cow::Borrowed(""),
        other => Cow::Borrowed(other),
    }
}

/// `visibility` for a `visible` value. Only `true` shows the node.
#[must_use]
pub fn visibility(value: &str) -> &'static str {
    if value == "true" { "visible" } else { "hidden" }
}

/// The transform functions reachable from attributes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransformKind {
    /// `rotate="45"` is `rotate(45deg)`.
    Rotate,
    /// `skew="10"` is `skew(10deg)`.
    Skew,
    /// `scale="1.5"` is `scale(1.5)`.
    Scale,
}

/// Builds a `transform` value.
#[must_use]
pub fn transform(kind: TransformKind, value: &str) -> String {
    match kind {
        TransformKind::Rotate => format!("rotate({value}deg)"),
        TransformKind::Skew => format!("skew({value}deg)"),
        TransformKind::Scale => format!("scale({value})"),
    }
}

/// `backgroundImage` for a `bgImage` value.
#[must_use]
pub fn background_image(url: &str) -> String {
    format!("url('{url}')")
}

/// Style writes toggling a node between enabled and disabled.
///
/// A disabled node ignores the pointer and renders in grayscale.
#[must_use]
pub fn enabled_style(enabled: bool) -> StyleBundle {
    let mut out = StyleBundle::new();
    if enabled {
        out.push(("pointerEvents", Cow::Borrowed("")));
        out.push(("filter", Cow::Borrowed("")));
    } else {
        out.push(("pointerEvents", Cow::Borrowed("none")));
        out.push(("filter", Cow::Borrowed("grayscale(100%)")));
    }
    out
}
