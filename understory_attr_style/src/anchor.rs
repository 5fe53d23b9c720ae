// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named position presets and the style bundles they expand to.
//!
//! Three independent tables map an [`Anchor`] to inline style:
//!
//! - [`self_anchor`]: pins the node itself (`anchor`, `fixanchor`).
//! - [`dock`]: pins the node to edges and stretches its cross axis (`dock`).
//! - [`child_anchor`]: lays out the node's children with flexbox (`childanchor`).
//!
//! [`line_anchor`] aligns a block in normal flow (`lineanchor`).
//!
//! Each table only covers the values that make sense for it; the rest map to
//! an empty bundle.

use alloc::borrow::Cow;
use smallvec::SmallVec;

/// An ordered list of `(property, value)` style writes.
///
/// Properties are camelCase. An empty value clears the property.
pub type StyleBundle = SmallVec<[(&'static str, Cow<'static, str>); 8]>;

/// A relative position preset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// `topLeft`
    TopLeft,
    /// `top`
    Top,
    /// `topRight`
    TopRight,
    /// `left`
    Left,
    /// `center`
    Center,
    /// `centerH`: centered horizontally only.
    CenterH,
    /// `right`
    Right,
    /// `bottomLeft`
    BottomLeft,
    /// `bottom`
    Bottom,
    /// `bottomRight`
    BottomRight,
    /// `fill`
    Fill,
}

impl Anchor {
    /// All presets.
    pub const ALL: [Self; 11] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Left,
        Self::Center,
        Self::CenterH,
        Self::Right,
        Self::BottomLeft,
        Self::Bottom,
        Self::BottomRight,
        Self::Fill,
    ];

    /// The attribute spelling, e.g. `"topLeft"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "topLeft",
            Self::Top => "top",
            Self::TopRight => "topRight",
            Self::Left => "left",
            Self::Center => "center",
            Self::CenterH => "centerH",
            Self::Right => "right",
            Self::BottomLeft => "bottomLeft",
            Self::Bottom => "bottom",
            Self::BottomRight => "bottomRight",
            Self::Fill => "fill",
        }
    }

    /// Parses the exact attribute spelling. Values are case-sensitive.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == value)
    }
}

/// CSS positioning mode used by [`self_anchor`] and [`dock`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Position {
    /// `position: absolute`
    Absolute,
    /// `position: fixed`
    Fixed,
}

impl Position {
    /// The CSS keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
        }
    }
}

fn bundle(entries: &[(&'static str, &'static str)]) -> StyleBundle {
    entries
        .iter()
        .map(|(k, v)| (*k, Cow::Borrowed(*v)))
        .collect()
}

fn positioned(position: Position, rest: &[(&'static str, &'static str)]) -> StyleBundle {
    let mut out = bundle(&[("position", position.as_str())]);
    out.extend(rest.iter().map(|(k, v)| (*k, Cow::Borrowed(*v))));
    out
}

/// Pins a node relative to its containing block.
///
/// Edge midpoints and the center add a translate transform so the node is
/// centered on the anchor point. `fill` stretches to all four edges.
/// `centerH` has no entry.
#[must_use]
pub fn self_anchor(anchor: Anchor, position: Position) -> StyleBundle {
    match anchor {
        Anchor::TopLeft => positioned(position, &[("top", "0px"), ("left", "0px")]),
        Anchor::Top => positioned(
            position,
            &[("top", "0px"), ("left", "50%"), ("transform", "translateX(-50%)")],
        ),
        Anchor::TopRight => positioned(position, &[("top", "0px"), ("right", "0px")]),
        Anchor::BottomLeft => positioned(position, &[("bottom", "0px"), ("left", "0px")]),
        Anchor::Bottom => positioned(
            position,
            &[("bottom", "0px"), ("left", "50%"), ("transform", "translateX(-50%)")],
        ),
        Anchor::BottomRight => positioned(position, &[("bottom", "0px"), ("right", "0px")]),
        Anchor::Left => positioned(
            position,
            &[("top", "50%"), ("left", "0px"), ("transform", "translateY(-50%)")],
        ),
        Anchor::Center => positioned(
            position,
            &[
                ("top", "50%"),
                ("left", "50%"),
                ("transform", "translate3D(-50%, -50%, 0)"),
            ],
        ),
        Anchor::Right => positioned(
            position,
            &[("top", "50%"), ("right", "0px"), ("transform", "translateY(-50%)")],
        ),
        Anchor::Fill => positioned(
            position,
            &[
                ("top", "0"),
                ("right", "0"),
                ("bottom", "0"),
                ("left", "0"),
                ("width", "100%"),
                ("height", "100%"),
            ],
        ),
        Anchor::CenterH => StyleBundle::new(),
    }
}

/// Docks a node to one edge, or to all of them for `fill`.
///
/// The explicit size along the stretched axis is cleared. Only `top`,
/// `bottom`, `left`, `right` and `fill` have entries.
#[must_use]
pub fn dock(anchor: Anchor, position: Position) -> StyleBundle {
    match anchor {
        Anchor::Top => positioned(
            position,
            &[("width", ""), ("top", "0"), ("left", "0"), ("right", "0")],
        ),
        Anchor::Bottom => positioned(
            position,
            &[("width", ""), ("bottom", "0"), ("left", "0"), ("right", "0")],
        ),
        Anchor::Left => positioned(
            position,
            &[("height", ""), ("top", "0"), ("bottom", "0"), ("left", "0")],
        ),
        Anchor::Right => positioned(
            position,
            &[("height", ""), ("top", "0"), ("bottom", "0"), ("right", "0")],
        ),
        Anchor::Fill => positioned(
            position,
            &[
                ("width", ""),
                ("height", ""),
                ("top", "0"),
                ("bottom", "0"),
                ("left", "0"),
                ("right", "0"),
            ],
        ),
        _ => StyleBundle::new(),
    }
}

/// Lays out a node's children with flexbox.
///
/// `None` is the unset branch: every flex property written by this table is
/// cleared, restoring block flow. `center` stacks children in a column; every
/// other preset uses a row. For `fill` only `display: flex` is returned; the
/// caller must also give every child `flex: 1` through a scoped child rule.
#[must_use]
pub fn child_anchor(anchor: Option<Anchor>) -> StyleBundle {
    let Some(anchor) = anchor else {
        return bundle(&[
            ("display", ""),
            ("flexDirection", ""),
            ("justifyContent", ""),
            ("alignItems", ""),
        ]);
    };
    let (direction, justify, align) = match anchor {
        Anchor::TopLeft => ("row", "flex-start", "flex-start"),
        Anchor::Top => ("row", "center", "flex-start"),
        Anchor::TopRight => ("row", "flex-end", "flex-start"),
        Anchor::Left => ("row", "flex-start", "center"),
        Anchor::Center => ("column", "center", "center"),
        Anchor::CenterH => ("row", "center", "center"),
        Anchor::Right => ("row", "flex-end", "center"),
        Anchor::BottomLeft => ("row", "flex-start", "flex-end"),
        Anchor::Bottom => ("row", "center", "flex-end"),
        Anchor::BottomRight => ("row", "flex-end", "flex-end"),
        Anchor::Fill => return bundle(&[("display", "flex")]),
    };
    bundle(&[
        ("display", "flex"),
        ("flexDirection", direction),
        ("justifyContent", justify),
        ("alignItems", align),
    ])
}

/// Aligns a block-level node inside its line with a fixed width.
///
/// Only `left`, `center` and `right` have entries.
#[must_use]
pub fn line_anchor(anchor: Anchor) -> StyleBundle {
    match anchor {
        Anchor::Left => bundle(&[("display", "block"), ("width", "400px"), ("marginLeft", "0")]),
        Anchor::Center => bundle(&[("display", "block"), ("width", "400px"), ("margin", "0 auto")]),
        Anchor::Right => bundle(&[
            ("display", "block"),
            ("width", "400px"),
            ("marginLeft", "auto"),
            ("marginRight", "0"),
        ]),
        _ => StyleBundle::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn pairs(b: &StyleBundle) -> Vec<(&str, &str)> {
        b.iter().map(|(k, v)| (*k, v.as_ref())).collect()
    }

    #[test]
    fn names_round_trip() {
        for a in Anchor::ALL {
            assert_eq!(Anchor::parse(a.name()), Some(a));
        }
        assert_eq!(Anchor::parse("TopLeft"), None);
        assert_eq!(Anchor::parse(""), None);
    }

    #[test]
    fn self_anchor_table() {
        use Anchor::*;
        let p = Position::Absolute;
        let expect: [(Anchor, &[(&str, &str)]); 11] = [
            (TopLeft, &[("position", "absolute"), ("top", "0px"), ("left", "0px")]),
            (
                Top,
                &[
                    ("position", "absolute"),
                    ("top", "0px"),
                    ("left", "50%"),
                    ("transform", "translateX(-50%)"),
                ],
            ),
            (TopRight, &[("position", "absolute"), ("top", "0px"), ("right", "0px")]),
            (
                Left,
                &[
                    ("position", "absolute"),
                    ("top", "50%"),
                    ("left", "0px"),
                    ("transform", "translateY(-50%)"),
                ],
            ),
            (
                Center,
                &[
                    ("position", "absolute"),
                    ("top", "50%"),
                    ("left", "50%"),
                    ("transform", "translate3D(-50%, -50%, 0)"),
                ],
            ),
            (CenterH, &[]),
            (
                Right,
                &[
                    ("position", "absolute"),
                    ("top", "50%"),
                    ("right", "0px"),
                    ("transform", "translateY(-50%)"),
                ],
            ),
            (BottomLeft, &[("position", "absolute"), ("bottom", "0px"), ("left", "0px")]),
            (
                Bottom,
                &[
                    ("position", "absolute"),
                    ("bottom", "0px"),
                    ("left", "50%"),
                    ("transform", "translateX(-50%)"),
                ],
            ),
            (BottomRight, &[("position", "absolute"), ("bottom", "0px"), ("right", "0px")]),
            (
                Fill,
                &[
                    ("position", "absolute"),
                    ("top", "0"),
                    ("right", "0"),
                    ("bottom", "0"),
                    ("left", "0"),
                    ("width", "100%"),
                    ("height", "100%"),
                ],
            ),
        ];
        for (anchor, bundle) in expect {
            assert_eq!(pairs(&self_anchor(anchor, p)), bundle, "{anchor:?}");
        }
    }

    #[test]
    fn fixed_mode_only_changes_position() {
        for a in Anchor::ALL {
            let abs = self_anchor(a, Position::Absolute);
            let fixed = self_anchor(a, Position::Fixed);
            assert_eq!(abs.len(), fixed.len());
            if let Some((_, v)) = fixed.first() {
                assert_eq!(v, "fixed");
            }
        }
    }

    #[test]
    fn dock_table() {
        use Anchor::*;
        let p = Position::Absolute;
        for a in Anchor::ALL {
            let bundle = dock(a, p);
            let b = pairs(&bundle);
            match a {
                Top => assert_eq!(
                    b,
                    [("position", "absolute"), ("width", ""), ("top", "0"), ("left", "0"), ("right", "0")]
                ),
                Bottom => assert_eq!(
                    b,
                    [("position", "absolute"), ("width", ""), ("bottom", "0"), ("left", "0"), ("right", "0")]
                ),
                Left => assert_eq!(
                    b,
                    [("position", "absolute"), ("height", ""), ("top", "0"), ("bottom", "0"), ("left", "0")]
                ),
                Right => assert_eq!(
                    b,
                    [("position", "absolute"), ("height", ""), ("top", "0"), ("bottom", "0"), ("right", "0")]
                ),
                Fill => assert_eq!(
                    b,
                    [
                        ("position", "absolute"),
                        ("width", ""),
                        ("height", ""),
                        ("top", "0"),
                        ("bottom", "0"),
                        ("left", "0"),
                        ("right", "0")
                    ]
                ),
                _ => assert!(b.is_empty(), "{a:?}"),
            }
        }
    }

    #[test]
    fn child_anchor_table() {
        use Anchor::*;
        let flex = |d, j, a| {
            [
                ("display", "flex"),
                ("flexDirection", d),
                ("justifyContent", j),
                ("alignItems", a),
            ]
        };
        for a in Anchor::ALL {
            let bundle = child_anchor(Some(a));
            let b = pairs(&bundle);
            let expected = match a {
                TopLeft => flex("row", "flex-start", "flex-start"),
                Top => flex("row", "center", "flex-start"),
                TopRight => flex("row", "flex-end", "flex-start"),
                Left => flex("row", "flex-start", "center"),
                Center => flex("column", "center", "center"),
                CenterH => flex("row", "center", "center"),
                Right => flex("row", "flex-end", "center"),
                BottomLeft => flex("row", "flex-start", "flex-end"),
                Bottom => flex("row", "center", "flex-end"),
                BottomRight => flex("row", "flex-end", "flex-end"),
                Fill => {
                    assert_eq!(b, [("display", "flex")]);
                    continue;
                }
            };
            assert_eq!(b, expected, "{a:?}");
        }
    }

    #[test]
    fn child_anchor_unset_clears_flex() {
        let bundle = child_anchor(None);
        let b = pairs(&bundle);
        assert_eq!(
            b,
            [
                ("display", ""),
                ("flexDirection", ""),
                ("justifyContent", ""),
                ("alignItems", "")
            ]
        );
    }

    #[test]
    fn line_anchor_table() {
        for a in Anchor::ALL {
            let bundle = line_anchor(a);
            let b = pairs(&bundle);
            match a {
                Anchor::Left => {
                    assert_eq!(b, [("display", "block"), ("width", "400px"), ("marginLeft", "0")]);
                }
                Anchor::Center => {
                    assert_eq!(b, [("display", "block"), ("width", "400px"), ("margin", "0 auto")]);
                }
                Anchor::Right => assert_eq!(
                    b,
                    [
                        ("display", "block"),
                        ("width", "400px"),
                        ("marginLeft", "auto"),
                        ("marginRight", "0")
                    ]
                ),
                _ => assert!(b.is_empty()),
            }
        }
    }
}
