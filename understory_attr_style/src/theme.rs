// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named color palettes and the base theme applied through `themeCls`.

use alloc::borrow::Cow;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::anchor::StyleBundle;

/// A palette entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeSlot {
    /// Body text.
    Text,
    /// Text on colored backgrounds.
    TextLight,
    /// Page background.
    Background,
    /// Links.
    Link,
    /// Hovered links.
    LinkHover,
    /// Visited links.
    LinkVisited,
    /// Primary accent.
    Primary,
    /// Secondary accent.
    Secondary,
    /// Success state.
    Success,
    /// Informational state.
    Info,
    /// Warning state.
    Warning,
    /// Danger state.
    Danger,
    /// Dark neutral.
    Dark,
    /// Light neutral.
    Light,
    /// Border shorthand, e.g. `1px solid #cdcdcd`.
    Border,
    /// Corner radius.
    Radius,
}

#[derive(Debug)]
struct ThemeData {
    name: String,
    values: Vec<(ThemeSlot, String)>,
}

/// An immutable, named palette.
///
/// Cloning is cheap; clones share the same data.
///
/// ```rust
/// use understory_attr_style::{Theme, ThemeSlot};
///
/// let light = Theme::light();
/// assert_eq!(light.name(), "iOSLight");
/// assert_eq!(light.get(ThemeSlot::Primary), Some("#007bff"));
/// assert_eq!(light.get(ThemeSlot::Border), None);
///
/// let custom = light.to_builder().name("Brand").set(ThemeSlot::Primary, "#ff5500").build();
/// assert_eq!(custom.color(ThemeSlot::Primary), "#ff5500");
/// assert_eq!(custom.color(ThemeSlot::Success), "#28a745");
/// ```
#[derive(Clone, Debug)]
pub struct Theme {
    inner: Rc<ThemeData>,
}

impl Theme {
    /// The light palette, `iOSLight`.
    #[must_use]
    pub fn light() -> Self {
        ThemeBuilder::new("iOSLight")
            .set(ThemeSlot::Text, "black")
            .set(ThemeSlot::TextLight, "white")
            .set(ThemeSlot::Background, "white")
            .set(ThemeSlot::Link, "blue")
            .set(ThemeSlot::LinkHover, "darkblue")
            .set(ThemeSlot::LinkVisited, "gray")
            .with_accents()
            .build()
    }

    /// The dark palette, `MaterialDark`.
    #[must_use]
    pub fn dark() -> Self {
        ThemeBuilder::new("MaterialDark")
            .set(ThemeSlot::Text, "#cccccc")
            .set(ThemeSlot::TextLight, "#f0f0f0")
            .set(ThemeSlot::Background, "#171717")
            .set(ThemeSlot::Link, "red")
            .set(ThemeSlot::LinkHover, "green")
            .set(ThemeSlot::LinkVisited, "gray")
            .with_accents()
            .build()
    }

    /// The palette name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Looks up a slot.
    #[must_use]
    pub fn get(&self, slot: ThemeSlot) -> Option<&str> {
        let values = &self.inner.values;
        values
            .binary_search_by_key(&slot, |(s, _)| *s)
            .ok()
            .map(|idx| values[idx].1.as_str())
    }

    /// Looks up a slot, returning `""` when it is not set.
    #[must_use]
    pub fn color(&self, slot: ThemeSlot) -> &str {
        self.get(slot).unwrap_or("")
    }

    /// A builder seeded with this palette.
    #[must_use]
    pub fn to_builder(&self) -> ThemeBuilder {
        ThemeBuilder {
            name: self.inner.name.clone(),
            values: self.inner.values.clone(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl PartialEq for Theme {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.name == other.inner.name && self.inner.values == other.inner.values)
    }
}

/// Builder for [`Theme`] values.
#[derive(Clone, Debug, Default)]
pub struct ThemeBuilder {
    name: String,
    values: Vec<(ThemeSlot, String)>,
}

impl ThemeBuilder {
    /// Starts an empty palette.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Renames the palette.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a slot, replacing any previous value.
    #[must_use]
    pub fn set(mut self, slot: ThemeSlot, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.values.binary_search_by_key(&slot, |(s, _)| *s) {
            Ok(idx) => self.values[idx].1 = value,
            Err(idx) => self.values.insert(idx, (slot, value)),
        }
        self
    }

    /// Clears a slot.
    #[must_use]
    pub fn unset(mut self, slot: ThemeSlot) -> Self {
        if let Ok(idx) = self.values.binary_search_by_key(&slot, |(s, _)| *s) {
            self.values.remove(idx);
        }
        self
    }

    fn with_accents(self) -> Self {
        self.set(ThemeSlot::Primary, "#007bff")
            .set(ThemeSlot::Secondary, "#7633d4")
            .set(ThemeSlot::Success, "#28a745")
            .set(ThemeSlot::Info, "#17a2b8")
            .set(ThemeSlot::Warning, "#ffc107")
            .set(ThemeSlot::Danger, "#dc3545")
            .set(ThemeSlot::Dark, "#343a40")
            .set(ThemeSlot::Light, "#f8f9fa")
            .set(ThemeSlot::Radius, "8px")
    }

    /// Builds the palette.
    #[must_use]
    pub fn build(self) -> Theme {
        Theme {
            inner: Rc::new(ThemeData {
                name: self.name,
                values: self.values,
            }),
        }
    }
}

/// The background role selected by a `themeCls` value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ThemeClass {
    /// `bg`, and any unrecognized value.
    #[default]
    Bg,
    /// `primary`
    Primary,
    /// `secondary`
    Secondary,
    /// `success`
    Success,
    /// `info`
    Info,
    /// `warning`
    Warning,
    /// `danger`
    Danger,
}

impl ThemeClass {
    /// Parses a `themeCls` value. Unknown values fall back to [`ThemeClass::Bg`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            "success" => Self::Success,
            "info" => Self::Info,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            _ => Self::Bg,
        }
    }

    /// The palette slot used as background.
    #[must_use]
    pub const fn slot(self) -> ThemeSlot {
        match self {
            Self::Bg => ThemeSlot::Background,
            Self::Primary => ThemeSlot::Primary,
            Self::Secondary => ThemeSlot::Secondary,
            Self::Success => ThemeSlot::Success,
            Self::Info => ThemeSlot::Info,
            Self::Warning => ThemeSlot::Warning,
            Self::Danger => ThemeSlot::Danger,
        }
    }
}

/// Base theme writes for a node: transition, text color and background.
#[must_use]
pub fn base_theme(theme: &Theme, class: ThemeClass) -> StyleBundle {
    let mut out = StyleBundle::new();
    out.push(("transition", Cow::Borrowed("all 0.4s")));
    out.push(("color", Cow::Owned(String::from(theme.color(ThemeSlot::Text)))));
    out.push((
        "backgroundColor",
        Cow::Owned(String::from(theme.color(class.slot()))),
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_share_accents() {
        let (l, d) = (Theme::light(), Theme::dark());
        assert_eq!(d.name(), "MaterialDark");
        assert_eq!(d.color(ThemeSlot::Background), "#171717");
        for slot in [ThemeSlot::Primary, ThemeSlot::Danger, ThemeSlot::Radius] {
            assert_eq!(l.get(slot), d.get(slot));
        }
        assert_ne!(l, d);
        assert_eq!(l, Theme::light());
    }

    #[test]
    fn builder_replaces_and_unsets() {
        let t = ThemeBuilder::new("t")
            .set(ThemeSlot::Text, "a")
            .set(ThemeSlot::Text, "b")
            .set(ThemeSlot::Border, "1px solid red")
            .unset(ThemeSlot::Border)
            .build();
        assert_eq!(t.get(ThemeSlot::Text), Some("b"));
        assert_eq!(t.get(ThemeSlot::Border), None);
    }

    #[test]
    fn class_parsing_defaults_to_background() {
        assert_eq!(ThemeClass::parse("danger"), ThemeClass::Danger);
        assert_eq!(ThemeClass::parse("Danger"), ThemeClass::Bg);
        assert_eq!(ThemeClass::parse(""), ThemeClass::Bg);
    }

    #[test]
    fn base_theme_writes() {
        let b = base_theme(&Theme::dark(), ThemeClass::Success);
        let b: alloc::vec::Vec<_> = b.iter().map(|(k, v)| (*k, v.as_ref())).collect();
        assert_eq!(
            b,
            [
                ("transition", "all 0.4s"),
                ("color", "#cccccc"),
                ("backgroundColor", "#28a745")
            ]
        );
    }
}
