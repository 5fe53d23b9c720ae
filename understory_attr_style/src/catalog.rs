// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The universe of native style property names.

use alloc::string::String;
use hashbrown::HashMap;

/// camelCase names of the standard style properties.
pub const STANDARD_PROPERTIES: &[&str] = &[
    "alignContent", "alignItems", "alignSelf", "all", "animation", "animationDelay",
    "animationDirection", "animationDuration", "animationFillMode", "animationIterationCount",
    "animationName", "animationPlayState", "animationTimingFunction", "appearance", "aspectRatio",
    "backdropFilter", "backfaceVisibility", "background", "backgroundAttachment",
    "backgroundBlendMode", "backgroundClip", "backgroundColor", "backgroundImage",
    "backgroundOrigin", "backgroundPosition", "backgroundPositionX", "backgroundPositionY",
    "backgroundRepeat", "backgroundSize", "blockSize", "border", "borderBlock", "borderBlockColor",
    "borderBlockEnd", "borderBlockStart", "borderBlockStyle", "borderBlockWidth", "borderBottom",
    "borderBottomColor", "borderBottomLeftRadius", "borderBottomRightRadius", "borderBottomStyle",
    "borderBottomWidth", "borderCollapse", "borderColor", "borderImage", "borderImageOutset",
    "borderImageRepeat", "borderImageSlice", "borderImageSource", "borderImageWidth",
    "borderInline", "borderInlineColor", "borderInlineEnd", "borderInlineStart",
    "borderInlineStyle", "borderInlineWidth", "borderLeft", "borderLeftColor", "borderLeftStyle",
    "borderLeftWidth", "borderRadius", "borderRight", "borderRightColor", "borderRightStyle",
    "borderRightWidth", "borderSpacing", "borderStyle", "borderTop", "borderTopColor",
    "borderTopLeftRadius", "borderTopRightRadius", "borderTopStyle", "borderTopWidth",
    "borderWidth", "bottom", "boxShadow", "boxSizing", "breakAfter", "breakBefore", "breakInside",
    "captionSide", "caretColor", "clear", "clip", "clipPath", "color", "colorScheme",
    "columnCount", "columnFill", "columnGap", "columnRule", "columnRuleColor", "columnRuleStyle",
    "columnRuleWidth", "columnSpan", "columnWidth", "columns", "contain", "content",
    "contentVisibility", "counterIncrement", "counterReset", "counterSet", "cursor", "direction",
    "display", "emptyCells", "filter", "flex", "flexBasis", "flexDirection", "flexFlow",
    "flexGrow", "flexShrink", "flexWrap", "float", "font", "fontFamily", "fontFeatureSettings",
    "fontKerning", "fontSize", "fontSizeAdjust", "fontStretch", "fontStyle", "fontVariant",
    "fontWeight", "gap", "grid", "gridArea", "gridAutoColumns", "gridAutoFlow", "gridAutoRows",
    "gridColumn", "gridColumnEnd", "gridColumnGap", "gridColumnStart", "gridGap", "gridRow",
    "gridRowEnd", "gridRowGap", "gridRowStart", "gridTemplate", "gridTemplateAreas",
    "gridTemplateColumns", "gridTemplateRows", "height", "hyphens", "imageRendering",
    "inlineSize", "inset", "insetBlock", "insetInline", "isolation", "justifyContent",
    "justifyItems", "justifySelf", "left", "letterSpacing", "lineBreak", "lineHeight",
    "listStyle", "listStyleImage", "listStylePosition", "listStyleType", "margin", "marginBlock",
    "marginBottom", "marginInline", "marginLeft", "marginRight", "marginTop", "mask",
    "maskImage", "maxBlockSize", "maxHeight", "maxInlineSize", "maxWidth", "minBlockSize",
    "minHeight", "minInlineSize", "minWidth", "mixBlendMode", "objectFit", "objectPosition",
    "offset", "opacity", "order", "orphans", "outline", "outlineColor", "outlineOffset",
    "outlineStyle", "outlineWidth", "overflow", "overflowAnchor", "overflowWrap", "overflowX",
    "overflowY", "overscrollBehavior", "padding", "paddingBlock", "paddingBottom",
    "paddingInline", "paddingLeft", "paddingRight", "paddingTop", "pageBreakAfter",
    "pageBreakBefore", "pageBreakInside", "perspective", "perspectiveOrigin", "placeContent",
    "placeItems", "placeSelf", "pointerEvents", "position", "quotes", "resize", "right",
    "rotate", "rowGap", "scale", "scrollBehavior", "scrollMargin", "scrollPadding",
    "scrollSnapAlign", "scrollSnapType", "scrollbarGutter", "shapeOutside", "tabSize",
    "tableLayout", "textAlign", "textAlignLast", "textDecoration", "textDecorationColor",
    "textDecorationLine", "textDecorationStyle", "textDecorationThickness", "textIndent",
    "textOrientation", "textOverflow", "textRendering", "textShadow", "textTransform",
    "textUnderlineOffset", "top", "touchAction", "transform", "transformOrigin",
    "transformStyle", "transition", "transitionDelay", "transitionDuration",
    "transitionProperty", "transitionTimingFunction", "translate", "unicodeBidi", "userSelect",
    "verticalAlign", "visibility", "whiteSpace", "widows", "width", "willChange", "wordBreak",
    "wordSpacing", "wordWrap", "writingMode", "zIndex", "zoom",
];

/// Case-insensitive lookup from attribute names to native style properties.
///
/// ```rust
/// use understory_attr_style::StyleCatalog;
///
/// let catalog = StyleCatalog::standard();
/// assert_eq!(catalog.resolve("backgroundcolor"), Some("backgroundColor"));
/// assert_eq!(catalog.resolve("BORDERRADIUS"), Some("borderRadius"));
/// assert_eq!(catalog.resolve("radius"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StyleCatalog {
    by_lowercase: HashMap<String, String>,
}

impl StyleCatalog {
    /// An empty catalog. No attribute maps 1:1 onto a property.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog of [`STANDARD_PROPERTIES`].
    #[must_use]
    pub fn standard() -> Self {
        Self::from_names(STANDARD_PROPERTIES.iter().copied())
    }

    /// Builds a catalog from camelCase property names.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut catalog = Self::new();
        for name in names {
            catalog.insert(name);
        }
        catalog
    }

    /// Adds a property name.
    pub fn insert(&mut self, name: &str) {
        self.by_lowercase
            .insert(name.to_ascii_lowercase(), String::from(name));
    }

    /// The canonical property name matching `name` case-insensitively.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            self.by_lowercase
                .get(name.to_ascii_lowercase().as_str())
                .map(String::as_str)
        } else {
            self.by_lowercase.get(name).map(String::as_str)
        }
    }

    /// Number of known properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_lowercase.len()
    }

    /// Returns `true` if the catalog knows no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_lowercase.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_standard_name_resolves_to_itself() {
        let catalog = StyleCatalog::standard();
        assert_eq!(catalog.len(), STANDARD_PROPERTIES.len());
        for name in STANDARD_PROPERTIES {
            assert_eq!(catalog.resolve(&name.to_ascii_lowercase()), Some(*name));
        }
    }

    #[test]
    fn aliases_are_not_properties() {
        let catalog = StyleCatalog::standard();
        for alias in ["z", "radius", "bg", "bgcolor", "anchor", "dock", "gridc", "click"] {
            assert_eq!(catalog.resolve(alias), None, "{alias}");
        }
    }

    #[test]
    fn custom_catalog() {
        let mut catalog = StyleCatalog::new();
        assert!(catalog.is_empty());
        catalog.insert("accentColor");
        assert_eq!(catalog.resolve("AccentColor"), Some("accentColor"));
    }
}
