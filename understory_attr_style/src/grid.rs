// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `gridc` / `gridr` span shorthand.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;

use crate::anchor::StyleBundle;

/// Which grid axis a shorthand addresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GridAxis {
    /// `gridc`: columns.
    Column,
    /// `gridr`: rows.
    Row,
}

impl GridAxis {
    const fn properties(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Column => ("gridColumn", "gridColumnStart", "gridColumnEnd"),
            Self::Row => ("gridRow", "gridRowStart", "gridRowEnd"),
        }
    }
}

/// Expands a span shorthand.
///
/// `start-length` becomes a start line of `start` and an end line of
/// `start + length`. Anything without a hyphen (typically `start/end`) is
/// written to the combined property unchanged. Nothing is validated: the start
/// is passed through verbatim (a negative start like `-1-2` included), and the
/// end line is only written when both parts begin with an integer.
///
/// ```rust
/// use understory_attr_style::{GridAxis, grid_span};
///
/// let b = grid_span(GridAxis::Column, "2-3");
/// assert_eq!(b[0], ("gridColumnStart", "2".into()));
/// assert_eq!(b[1], ("gridColumnEnd", "5".into()));
///
/// let b = grid_span(GridAxis::Row, "1/4");
/// assert_eq!(b[0], ("gridRow", "1/4".into()));
/// ```
#[must_use]
pub fn grid_span(axis: GridAxis, expr: &str) -> StyleBundle {
    let (combined, start_prop, end_prop) = axis.properties();
    let mut out = StyleBundle::new();
    // A leading minus belongs to the start line.
    let sign = usize::from(expr.starts_with('-'));
    let Some(split) = expr[sign..].find('-').map(|i| i + sign) else {
        out.push((combined, Cow::Owned(String::from(expr))));
        return out;
    };
    let start = &expr[..split];
    let length = expr[split + 1..].split('-').next().unwrap_or_default();
    out.push((start_prop, Cow::Owned(String::from(start))));
    if let (Some(s), Some(l)) = (leading_int(start), leading_int(length)) {
        out.push((end_prop, Cow::Owned(format!("{}", s.saturating_add(l)))));
    }
    out
}

/// Parses an optional sign followed by digits, ignoring leading whitespace and
/// anything after the digits.
pub(crate) fn leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(b: &StyleBundle) -> alloc::vec::Vec<(&str, &str)> {
        b.iter().map(|(k, v)| (*k, v.as_ref())).collect()
    }

    #[test]
    fn start_length_adds() {
        assert_eq!(
            text(&grid_span(GridAxis::Column, "2-3")),
            [("gridColumnStart", "2"), ("gridColumnEnd", "5")]
        );
        assert_eq!(
            text(&grid_span(GridAxis::Row, "1-1")),
            [("gridRowStart", "1"), ("gridRowEnd", "2")]
        );
    }

    #[test]
    fn slash_form_passes_through() {
        assert_eq!(text(&grid_span(GridAxis::Column, "2/5")), [("gridColumn", "2/5")]);
        assert_eq!(
            text(&grid_span(GridAxis::Column, "span 2")),
            [("gridColumn", "span 2")]
        );
    }

    #[test]
    fn malformed_start_is_passed_through() {
        assert_eq!(
            text(&grid_span(GridAxis::Column, "a-2")),
            [("gridColumnStart", "a")]
        );
    }

    #[test]
    fn negative_start_is_kept() {
        assert_eq!(
            text(&grid_span(GridAxis::Row, "-1-2")),
            [("gridRowStart", "-1"), ("gridRowEnd", "1")]
        );
        assert_eq!(
            text(&grid_span(GridAxis::Column, "-3-1")),
            [("gridColumnStart", "-3"), ("gridColumnEnd", "-2")]
        );
        assert_eq!(text(&grid_span(GridAxis::Column, "-1")), [("gridColumn", "-1")]);
    }

    #[test]
    fn leading_int_parses_prefix() {
        assert_eq!(leading_int("12px"), Some(12));
        assert_eq!(leading_int(" -3"), Some(-3));
        assert_eq!(leading_int("px"), None);
        assert_eq!(leading_int(""), None);
    }
}
