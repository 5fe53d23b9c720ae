// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline style declarations.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

/// The inline style of an element: camelCase property names mapped to string values.
///
/// Values are stored verbatim. Nothing here validates them; a malformed value is
/// simply kept and reported back. Writing an empty value removes the property,
/// which matches how assigning `""` to a style property unsets it.
///
/// Entries are kept sorted by property name for binary-search lookup.
///
/// ```rust
/// use understory_dom::StyleMap;
///
/// let mut style = StyleMap::new();
/// style.set("backgroundColor", "red");
/// style.set("zIndex", "3");
/// assert_eq!(style.get("backgroundColor"), Some("red"));
///
/// style.set("zIndex", "");
/// assert_eq!(style.get("zIndex"), None);
/// assert_eq!(style.css_text(), "background-color: red;");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    /// Creates an empty style map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no property is set.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of properties set.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gets the value of a property, if set.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.position(property)
            .ok()
            .map(|idx| self.entries[idx].1.as_str())
    }

    /// Gets the value of a property, or `""` when unset.
    #[must_use]
    pub fn value(&self, property: &str) -> &str {
        self.get(property).unwrap_or("")
    }

    /// Sets a property. An empty value removes it.
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.remove(property);
            return;
        }
        match self.position(property) {
            Ok(idx) => self.entries[idx].1 = value,
            Err(idx) => self.entries.insert(idx, (String::from(property), value)),
        }
    }

    /// Removes a property, returning its previous value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.position(property)
            .ok()
            .map(|idx| self.entries.remove(idx).1)
    }

    /// Iterates `(property, value)` pairs in property-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes the declarations as CSS text with kebab-case property names.
    #[must_use]
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        for (idx, (property, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}: {value};", camel_to_kebab(property));
        }
        out
    }

    fn position(&self, property: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(property))
    }
}

/// Converts a camelCase property name (`backgroundColor`) to kebab-case (`background-color`).
#[must_use]
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts a kebab-case property name (`background-color`) to camelCase (`backgroundColor`).
#[must_use]
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = false;
    for c in name.trim().chars() {
        if c == '-' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

/// Parses a `style` attribute value (`"a-b: c; d: e"`) into camelCase declarations.
///
/// Declarations without a colon are skipped.
pub fn parse_declarations(text: &str) -> impl Iterator<Item = (String, String)> + '_ {
    text.split(';').filter_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        let name = kebab_to_camel(name);
        if name.is_empty() {
            return None;
        }
        Some((name, String::from(value.trim())))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn set_replaces_and_keeps_sorted() {
        let mut style = StyleMap::new();
        style.set("width", "10px");
        style.set("height", "20px");
        style.set("width", "30px");

        let entries: Vec<_> = style.iter().collect();
        assert_eq!(entries, [("height", "20px"), ("width", "30px")]);
    }

    #[test]
    fn empty_value_removes_property() {
        let mut style = StyleMap::new();
        style.set("display", "flex");
        style.set("display", "");
        assert!(style.is_empty());
        assert_eq!(style.value("display"), "");
    }

    #[test]
    fn case_conversion() {
        assert_eq!(camel_to_kebab("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(kebab_to_camel("border-top-left-radius"), "borderTopLeftRadius");
        assert_eq!(kebab_to_camel(" Z-INDEX "), "zIndex");
    }

    #[test]
    fn declarations_parse_into_camel_case() {
        let decls: Vec<_> = parse_declarations("background-color: red; bogus; margin:0 auto;").collect();
        assert_eq!(
            decls,
            [
                (String::from("backgroundColor"), String::from("red")),
                (String::from("margin"), String::from("0 auto")),
            ]
        );
    }
}
