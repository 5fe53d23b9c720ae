// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

use log::debug;
use understory_dom::NodeId;

use crate::Engine;
use crate::error::EngineError;
use crate::theme::ThemeSlot;

/// How [`Engine::show_toast`] presents a notification.
#[derive(Clone, Debug, PartialEq)]
pub struct ToastOptions {
    /// Icon name, resolved through [`EngineConfig::icon_url`](crate::EngineConfig::icon_url).
    pub icon: String,
    /// Toast width.
    pub width: String,
    /// Toast height. Also sets the spacing of stacked toasts.
    pub height: String,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            icon: String::from("white-bulb"),
            width: String::from("400px"),
            height: String::from("38px"),
        }
    }
}

impl Engine {
    /// Shows a transient notification at the top of the viewport.
    ///
    /// The toast starts above the viewport, slides down below any toasts
    /// still showing, stays for
    /// [`EngineConfig::toast_visible`](crate::EngineConfig::toast_visible)
    /// and slides back up before it is removed.
    pub fn show_toast(&mut self, text: &str, options: &ToastOptions) -> Result<NodeId, EngineError> {
        let id = self.document.generate_id();
        let markup = format!(
            "<rect id='{id}' box='border-box' fixanchor='top' top='-100px' childanchor='centerH' \
             width='{width}' height='{height}' radius='6px' border='0' \
             bgcolor='{bg}' color='{fg}' opacity='0.8'>\
             <img src='{src}' width='20px' height='20px'/><div>{text}</div></rect>",
            width = escape(&options.width),
            height = escape(&options.height),
            bg = escape(self.theme.color(ThemeSlot::Success)),
            fg = escape(self.theme.color(ThemeSlot::Light)),
            src = escape(&self.config.icon_url(&options.icon)),
            text = escape(text),
        );
        let nodes = self.document.parse_fragment(&markup)?;
        let Some(&toast) = nodes.first() else {
            return Err(EngineError::StaleNode(self.document.body()));
        };
        let body = self.document.body();
        self.document.append_child(body, toast);
        self.process_subtree(toast)?;

        self.toast_count += 1;
        let (value, unit) = leading_length(&options.height).unwrap_or((38.0, "px"));
        let slot = (self.toast_count - 1) as f64;
        let top = format!("{}{unit}", 25.0 + slot * (value + 10.0));
        debug!("toast {toast:?} #{} at {top}", self.toast_count);

        let (slide_in, visible, exit) = (
            self.config.toast_slide_in,
            self.config.toast_visible,
            self.config.toast_exit,
        );
        self.after_for(slide_in, toast, move |engine| {
            engine.document.set_style(toast, "top", top);
            engine.after_for(visible, toast, move |engine| {
                engine.document.set_style(toast, "top", "-100px");
            });
        });
        self.after(slide_in + visible + exit, move |engine| {
            engine.remove(toast);
            engine.toast_count = engine.toast_count.saturating_sub(1);
        });
        Ok(toast)
    }

    /// Toasts currently on screen.
    #[must_use]
    pub fn toast_count(&self) -> usize {
        self.toast_count
    }
}

/// The first `<number><unit>` in `text`, for units `px`, `rem`, `em` and `%`.
fn leading_length(text: &str) -> Option<(f64, &str)> {
    let bytes = text.as_bytes();
    for start in 0..bytes.len() {
        if !bytes[start].is_ascii_digit() {
            continue;
        }
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
            end += 1;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
        }
        let rest = &text[end..];
        let Some(unit) = ["px", "rem", "em", "%"]
            .into_iter()
            .find(|unit| rest.starts_with(unit))
        else {
            continue;
        };
        let value = text[start..end].parse().ok()?;
        return Some((value, &text[end..end + unit.len()]));
    }
    None
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape, leading_length};

    #[test]
    fn length_scanner_finds_first_unit() {
        assert_eq!(leading_length("38px"), Some((38.0, "px")));
        assert_eq!(leading_length("2.5rem"), Some((2.5, "rem")));
        assert_eq!(leading_length("calc(10% + 4px)"), Some((10.0, "%")));
        assert_eq!(leading_length("auto"), None);
        assert_eq!(leading_length("40"), None);
    }

    #[test]
    fn escape_markup() {
        assert_eq!(escape("a < b & 'c'"), "a &lt; b &amp; &apos;c&apos;");
    }
}
