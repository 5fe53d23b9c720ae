// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup parsing into a [`Document`].
//!
//! Markup is tokenized with `xmlparser`, so it must be well formed: every
//! element is closed, either explicitly or with `/>`. Several top-level
//! elements and text runs are allowed. Whitespace-only text is dropped.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use xmlparser::{ElementEnd, Token, Tokenizer};

use crate::style::parse_declarations;
use crate::{Document, NodeId};

/// What went wrong while parsing markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupErrorKind {
    /// The tokenizer rejected the input.
    Syntax(String),
    /// A closing tag did not match the innermost open element.
    MismatchedClose {
        /// The element that was open.
        expected: String,
        /// The closing tag that was found.
        found: String,
    },
    /// A closing tag appeared with no open element.
    UnexpectedClose(String),
    /// The input ended while elements were still open.
    Unclosed(String),
    /// The target parent is not a live element.
    InvalidParent,
}

/// Error returned by [`Document::parse_into`] and [`Document::parse_fragment`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupError {
    /// The failure.
    pub kind: MarkupErrorKind,
    /// 1-based line of the failure.
    pub row: u32,
    /// 1-based column of the failure.
    pub col: u32,
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MarkupErrorKind::Syntax(msg) => write!(f, "malformed markup: {msg}")?,
            MarkupErrorKind::MismatchedClose { expected, found } => {
                write!(f, "expected </{expected}>, found </{found}>")?;
            }
            MarkupErrorKind::UnexpectedClose(tag) => write!(f, "unexpected </{tag}>")?,
            MarkupErrorKind::Unclosed(tag) => write!(f, "<{tag}> is never closed")?,
            MarkupErrorKind::InvalidParent => write!(f, "parse target is not a live element")?,
        }
        write!(f, " at {}:{}", self.row, self.col)
    }
}

impl core::error::Error for MarkupError {}

impl MarkupError {
    fn at(kind: MarkupErrorKind, text: &str, offset: usize) -> Self {
        let before = &text[..offset.min(text.len())];
        let row = before.matches('\n').count() + 1;
        let col = before.rfind('\n').map_or(before.len(), |nl| before.len() - nl - 1) + 1;
        Self {
            kind,
            row: u32::try_from(row).unwrap_or(u32::MAX),
            col: u32::try_from(col).unwrap_or(u32::MAX),
        }
    }
}

impl Document {
    /// Parses `markup` and streams the resulting nodes into `parent`.
    ///
    /// Each element is inserted as soon as its start tag is complete, with its
    /// attributes already set, so an observed, connected `parent` yields one
    /// insertion record per element, like a document parser would.
    ///
    /// Returns the top-level nodes. On error, nodes inserted before the failure
    /// stay in place.
    pub fn parse_into(&mut self, parent: NodeId, markup: &str) -> Result<Vec<NodeId>, MarkupError> {
        if !self.is_element(parent) {
            return Err(MarkupError::at(MarkupErrorKind::InvalidParent, markup, 0));
        }
        self.build(Some(parent), markup)
    }

    /// Parses `markup` into detached nodes and returns the top-level ones.
    ///
    /// Nothing is recorded until the caller attaches the result. On error no
    /// nodes are left behind.
    pub fn parse_fragment(&mut self, markup: &str) -> Result<Vec<NodeId>, MarkupError> {
        self.build(None, markup)
    }

    fn build(&mut self, parent: Option<NodeId>, markup: &str) -> Result<Vec<NodeId>, MarkupError> {
        let mut top = Vec::new();
        let result = self.build_inner(parent, markup, &mut top);
        if result.is_err() && parent.is_none() {
            for node in &top {
                self.remove(*node);
            }
        }
        result.map(|()| top)
    }

    fn build_inner(
        &mut self,
        parent: Option<NodeId>,
        markup: &str,
        top: &mut Vec<NodeId>,
    ) -> Result<(), MarkupError> {
        let mut open: Vec<NodeId> = Vec::new();
        let mut pending: Option<NodeId> = None;

        for token in Tokenizer::from_fragment(markup, 0..markup.len()) {
            let token = token.map_err(|e| {
                let pos = e.pos();
                MarkupError {
                    kind: MarkupErrorKind::Syntax(format!("{e}")),
                    row: pos.row,
                    col: pos.col,
                }
            })?;
            match token {
                Token::ElementStart { prefix, local, .. } => {
                    if let Some(stray) = pending.take() {
                        self.remove(stray);
                    }
                    pending = Some(self.create_element(&qualified(prefix.as_str(), local.as_str())));
                }
                Token::Attribute {
                    prefix,
                    local,
                    value,
                    ..
                } => {
                    let Some(element) = pending else { continue };
                    let name = qualified(prefix.as_str(), local.as_str());
                    let value = unescape(value.as_str());
                    if name.eq_ignore_ascii_case("style") {
                        for (property, v) in parse_declarations(&value) {
                            self.set_style(element, &property, v);
                        }
                    } else {
                        self.set_attribute(element, &name, &value);
                    }
                }
                Token::ElementEnd { end, span } => match end {
                    ElementEnd::Open => {
                        if let Some(element) = pending.take() {
                            self.place(parent, &open, top, element);
                            open.push(element);
                        }
                    }
                    ElementEnd::Empty => {
                        if let Some(element) = pending.take() {
                            self.place(parent, &open, top, element);
                        }
                    }
                    ElementEnd::Close(prefix, local) => {
                        let found = qualified(prefix.as_str(), local.as_str()).to_ascii_lowercase();
                        let Some(current) = open.pop() else {
                            return Err(MarkupError::at(
                                MarkupErrorKind::UnexpectedClose(found),
                                markup,
                                span.start(),
                            ));
                        };
                        let expected = self.tag_name(current).unwrap_or_default();
                        if expected != found {
                            return Err(MarkupError::at(
                                MarkupErrorKind::MismatchedClose {
                                    expected: String::from(expected),
                                    found,
                                },
                                markup,
                                span.start(),
                            ));
                        }
                    }
                },
                Token::Text { text } | Token::Cdata { text, .. } => {
                    if text.as_str().trim().is_empty() {
                        continue;
                    }
                    let node = self.create_text(&unescape(text.as_str()));
                    self.place(parent, &open, top, node);
                }
                _ => {}
            }
        }

        if let Some(current) = open.last() {
            let tag = String::from(self.tag_name(*current).unwrap_or_default());
            return Err(MarkupError::at(MarkupErrorKind::Unclosed(tag), markup, markup.len()));
        }
        Ok(())
    }

    fn place(&mut self, parent: Option<NodeId>, open: &[NodeId], top: &mut Vec<NodeId>, node: NodeId) {
        if let Some(target) = open.last().copied().or(parent) {
            self.append_child(target, node);
        }
        if open.is_empty() {
            top.push(node);
        }
    }
}

fn qualified(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        String::from(local)
    } else {
        format!("{prefix}:{local}")
    }
}

fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return String::from(text);
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
