// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use alloc::format;
use alloc::string::String;
use core::time::Duration;

use kurbo::Size;

use crate::theme::Theme;

/// Stylesheet linked by `icona` tags.
pub const FONT_AWESOME_HREF: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

/// Host settings read by the engine.
///
/// Build one with [`EngineConfig::builder`]; the defaults match a desktop
/// browser window with a 16px root font.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Viewport used for `%` lengths and dialog placement.
    pub viewport: Size,
    /// Root font size in pixels, used for `rem` and as the `em` fallback.
    pub root_font_size: f64,
    /// Prefix for icon image urls.
    pub icon_root: String,
    /// Directory holding `iconfont.css`.
    pub icon_font_root: String,
    /// Stylesheet linked by `icona` tags.
    pub font_awesome_href: String,
    /// Theme active when the engine starts.
    pub theme: Theme,
    /// Wait between dialog choreography steps.
    pub step_interval: Duration,
    /// Delay before the modal mask darkens.
    pub mask_fade_in: Duration,
    /// Delay between fading the mask out and removing it.
    pub mask_fade_out: Duration,
    /// Delay before a toast slides in.
    pub toast_slide_in: Duration,
    /// How long a toast stays visible.
    pub toast_visible: Duration,
    /// Delay between a toast sliding out and its removal.
    pub toast_exit: Duration,
    /// Width of the dialog resize handles.
    pub handle_thickness: f64,
    /// Optional lower bound for dialog resizing.
    pub min_resize: Option<Size>,
    /// Upper bound on mutation rounds handled by one settle.
    pub max_settle_rounds: usize,
}

impl EngineConfig {
    /// Starts a builder with default values.
    #[must_use]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Resolves an icon name to an image url.
    ///
    /// Names without an extension get `.png`.
    ///
    /// ```rust
    /// use understory_attr_style::EngineConfig;
    ///
    /// let config = EngineConfig::default();
    /// assert_eq!(config.icon_url("white-bulb"), "../img/white-bulb.png");
    /// assert_eq!(config.icon_url("logo.svg"), "../img/logo.svg");
    /// ```
    #[must_use]
    pub fn icon_url(&self, name: &str) -> String {
        if name.contains('.') {
            format!("{}{name}", self.icon_root)
        } else {
            format!("{}{name}.png", self.icon_root)
        }
    }

    /// Url of the icon font stylesheet.
    #[must_use]
    pub fn icon_font_href(&self) -> String {
        format!("{}iconfont.css", self.icon_font_root)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            root_font_size: 16.0,
            icon_root: String::from("../img/"),
            icon_font_root: String::from("../iconfont/"),
            font_awesome_href: String::from(FONT_AWESOME_HREF),
            theme: Theme::light(),
            step_interval: Duration::from_millis(100),
            mask_fade_in: Duration::from_millis(50),
            mask_fade_out: Duration::from_millis(500),
            toast_slide_in: Duration::from_millis(50),
            toast_visible: Duration::from_millis(2000),
            toast_exit: Duration::from_millis(1000),
            handle_thickness: 10.0,
            min_resize: None,
            max_settle_rounds: 64,
        }
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Sets the viewport size.
    #[must_use]
    pub fn viewport(mut self, viewport: Size) -> Self {
        self.config.viewport = viewport;
        self
    }

    /// Sets the root font size in pixels.
    #[must_use]
    pub fn root_font_size(mut self, px: f64) -> Self {
        self.config.root_font_size = px;
        self
    }

    /// Sets the icon image prefix.
    #[must_use]
    pub fn icon_root(mut self, root: impl Into<String>) -> Self {
        self.config.icon_root = root.into();
        self
    }

    /// Sets the icon font directory.
    #[must_use]
    pub fn icon_font_root(mut self, root: impl Into<String>) -> Self {
        self.config.icon_font_root = root.into();
        self
    }

    /// Sets the stylesheet linked by `icona` tags.
    #[must_use]
    pub fn font_awesome_href(mut self, href: impl Into<String>) -> Self {
        self.config.font_awesome_href = href.into();
        self
    }

    /// Sets the initial theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    /// Sets the dialog choreography step.
    #[must_use]
    pub fn step_interval(mut self, step: Duration) -> Self {
        self.config.step_interval = step;
        self
    }

    /// Sets the mask fade delays.
    #[must_use]
    pub fn mask_timing(mut self, fade_in: Duration, fade_out: Duration) -> Self {
        self.config.mask_fade_in = fade_in;
        self.config.mask_fade_out = fade_out;
        self
    }

    /// Sets the toast delays.
    #[must_use]
    pub fn toast_timing(mut self, slide_in: Duration, visible: Duration, exit: Duration) -> Self {
        self.config.toast_slide_in = slide_in;
        self.config.toast_visible = visible;
        self.config.toast_exit = exit;
        self
    }

    /// Sets the resize handle width.
    #[must_use]
    pub fn handle_thickness(mut self, px: f64) -> Self {
        self.config.handle_thickness = px;
        self
    }

    /// Sets a minimum dialog size for resizing.
    #[must_use]
    pub fn min_resize(mut self, min: Size) -> Self {
        self.config.min_resize = Some(min);
        self
    }

    /// Sets the settle round limit.
    #[must_use]
    pub fn max_settle_rounds(mut self, rounds: usize) -> Self {
        self.config.max_settle_rounds = rounds;
        self
    }

    /// Finishes the configuration.
    #[must_use]
    pub fn build(self) -> EngineConfig {
        self.config
    }
}
