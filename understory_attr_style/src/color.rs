// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS color arithmetic used by theme refresh hooks.
//!
//! Parsing goes through [`peniko::color`], so any CSS color the browser
//! would accept (hex in every length, named colors, `rgb()`, `hsl()`,
//! `transparent`) works as input. Output is always `rgb(...)`, or
//! `rgba(...)` when the input carried transparency.

use alloc::format;
use alloc::string::String;

use peniko::color::{AlphaColor, Rgba8, Srgb};

/// Parses any CSS color into sRGB.
///
/// Returns `None` for text that is not a color.
#[must_use]
pub fn parse_color(text: &str) -> Option<AlphaColor<Srgb>> {
    peniko::color::parse_color(text.trim())
        .ok()
        .map(|c| c.to_alpha_color::<Srgb>())
}

/// Mixes `color` toward black by `factor` (0 keeps it, 1 is black).
#[must_use]
pub fn darker(color: &str, factor: f64) -> Option<String> {
    let c = parse_color(color)?;
    let scale = |v: u8| clamp_channel(round(f64::from(v) * (1.0 - factor)));
    Some(css(c, scale))
}

/// Mixes `color` toward white by `factor` (0 keeps it, 1 is white).
#[must_use]
pub fn lighter(color: &str, factor: f64) -> Option<String> {
    let c = parse_color(color)?;
    let scale = |v: u8| {
        let v = f64::from(v);
        clamp_channel(round(v + (255.0 - v) * factor))
    };
    Some(css(c, scale))
}

/// `color` with the given opacity as `rgba(...)`, or `white` when unparseable.
#[must_use]
pub fn with_opacity(color: &str, opacity: f64) -> String {
    match parse_color(color) {
        Some(c) => {
            let Rgba8 { r, g, b, .. } = c.to_rgba8();
            format!("rgba({r}, {g}, {b}, {opacity})")
        }
        None => String::from("white"),
    }
}

/// Formats `c` with `scale` applied to each color channel, keeping alpha.
fn css(c: AlphaColor<Srgb>, scale: impl Fn(u8) -> u8) -> String {
    let Rgba8 { r, g, b, .. } = c.to_rgba8();
    let (r, g, b) = (scale(r), scale(g), scale(b));
    let alpha = c.components[3];
    if alpha < 1.0 {
        format!("rgba({r}, {g}, {b}, {alpha})")
    } else {
        format!("rgb({r}, {g}, {b})")
    }
}

/// Rounds half up, for non-negative channel math.
fn round(v: f64) -> f64 {
    #[expect(clippy::cast_possible_truncation, reason = "channel values are small")]
    let floor = (v + 0.5) as i64;
    floor as f64
}

fn clamp_channel(v: f64) -> u8 {
    #[expect(
        clippy::cast_possible_truncation,
        reason = "clamped to the channel range first"
    )]
    let c = v.clamp(0.0, 255.0) as u8;
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba8(text: &str) -> Option<Rgba8> {
        parse_color(text).map(AlphaColor::to_rgba8)
    }

    #[test]
    fn parses_css_notations() {
        assert_eq!(
            rgba8("#007bff"),
            Some(Rgba8 { r: 0, g: 0x7b, b: 0xff, a: 255 })
        );
        assert_eq!(
            rgba8("rgb(40, 167, 69)"),
            Some(Rgba8 { r: 40, g: 167, b: 69, a: 255 })
        );
        assert_eq!(rgba8("#fff"), Some(Rgba8 { r: 255, g: 255, b: 255, a: 255 }));
        assert_eq!(rgba8("teal"), Some(Rgba8 { r: 0, g: 128, b: 128, a: 255 }));
        assert_eq!(rgba8("transparent").map(|c| c.a), Some(0));
        assert_eq!(rgba8("not a color"), None);
        assert_eq!(rgba8(""), None);
    }

    #[test]
    fn darker_scales_toward_black() {
        assert_eq!(darker("#007bff", 0.2).as_deref(), Some("rgb(0, 98, 204)"));
        assert_eq!(darker("rgb(100, 100, 100)", 0.5).as_deref(), Some("rgb(50, 50, 50)"));
        assert_eq!(
            darker("rgba(100, 0, 0, 0.5)", 0.5).as_deref(),
            Some("rgba(50, 0, 0, 0.5)")
        );
        assert_eq!(darker("not a color", 0.2), None);
    }

    #[test]
    fn darker_accepts_named_short_hex_and_hsl() {
        assert_eq!(darker("red", 0.2).as_deref(), Some("rgb(204, 0, 0)"));
        assert_eq!(darker("#fff", 0.2).as_deref(), Some("rgb(204, 204, 204)"));
        assert_eq!(
            darker("hsl(0, 100%, 50%)", 0.2).as_deref(),
            Some("rgb(204, 0, 0)")
        );
        assert_eq!(darker("teal", 0.2).as_deref(), Some("rgb(0, 102, 102)"));
    }

    #[test]
    fn lighter_scales_toward_white() {
        assert_eq!(lighter("rgb(0, 0, 0)", 0.5).as_deref(), Some("rgb(128, 128, 128)"));
        assert_eq!(lighter("#ffffff", 0.5).as_deref(), Some("rgb(255, 255, 255)"));
        assert_eq!(lighter("black", 0.5).as_deref(), Some("rgb(128, 128, 128)"));
    }

    #[test]
    fn opacity() {
        assert_eq!(with_opacity("#28a745", 0.8), "rgba(40, 167, 69, 0.8)");
        assert_eq!(with_opacity("white", 0.5), "rgba(255, 255, 255, 0.5)");
        assert_eq!(with_opacity("nope", 0.8), "white");
    }
}
