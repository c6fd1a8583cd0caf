// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! HTML rendering.
//!
//! Two renderers are available:
//! - [`HtmlMode::BlockApproximation`] maps each block to one element and
//!   wraps the whole block text in `<strong>`, `<em>` and `<del>` if any
//!   character of the block carries that style. Links, alignment and
//!   images are dropped.
//! - [`HtmlMode::Precise`] follows style boundaries per character, renders
//!   links as `<a href>`, groups consecutive list items into `<ul>`/`<ol>`,
//!   renders images as `<img>` and alignment as an inline `text-align`.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::document::{
    Block, BlockKind, Document, Entity, EntityKey, InlineStyle,
};
use crate::plain_text::decode_for_display;
use crate::utf16;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HtmlMode {
    #[default]
    BlockApproximation,
    Precise,
}

fn block_tag(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Plain | BlockKind::Media => "p",
        BlockKind::HeaderOne => "h1",
        BlockKind::HeaderTwo => "h2",
        BlockKind::HeaderThree => "h3",
        BlockKind::UnorderedItem | BlockKind::OrderedItem => "li",
        BlockKind::Quote => "blockquote",
    }
}

/// The list wrapper currently open while rendering precisely.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ListWrapper {
    None,
    Ordered,
    Unordered,
}

impl ListWrapper {
    fn for_kind(kind: BlockKind) -> Self {
        match kind {
            BlockKind::OrderedItem => Self::Ordered,
            BlockKind::UnorderedItem => Self::Unordered,
            _ => Self::None,
        }
    }

    fn tag(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Ordered => Some("ol"),
            Self::Unordered => Some("ul"),
        }
    }
}

/// An inline element open around text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Inline {
    Link(EntityKey),
    Style(InlineStyle),
}

impl Document {
    /// Render with the block-level approximation.
    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut html = String::new();
        for block in self.blocks().iter().filter(|b| !b.is_media()) {
            let mut inner = encode_text(block.text()).into_owned();
            for style in InlineStyle::iter() {
                if block.has_style_anywhere(style) {
                    let tag = style.html_tag();
                    inner = format!("<{tag}>{inner}</{tag}>");
                }
            }
            let tag = block_tag(block.kind());
            html.push_str(&format!("<{tag}>{inner}</{tag}>"));
        }
        html
    }

    /// Render style boundaries, links, lists, images and alignment.
    pub fn to_html_precise(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let mut html = String::new();
        let mut wrapper = ListWrapper::None;

        for block in self.blocks() {
            let next = ListWrapper::for_kind(block.kind());
            if next != wrapper {
                if let Some(tag) = wrapper.tag() {
                    html.push_str(&format!("</{tag}>"));
                }
                if let Some(tag) = next.tag() {
                    html.push_str(&format!("<{tag}>"));
                }
                wrapper = next;
            }

            if block.is_media() {
                self.push_image(&mut html, block);
                continue;
            }

            let tag = block_tag(block.kind());
            match block.alignment() {
                Some(alignment) => html.push_str(&format!(
                    "<{tag} style=\"text-align:{alignment}\">"
                )),
                None => html.push_str(&format!("<{tag}>")),
            }
            self.push_inline(&mut html, block);
            html.push_str(&format!("</{tag}>"));
        }

        if let Some(tag) = wrapper.tag() {
            html.push_str(&format!("</{tag}>"));
        }
        html
    }

    pub fn to_html_with(&self, mode: HtmlMode) -> String {
        match mode {
            HtmlMode::BlockApproximation => self.to_html(),
            HtmlMode::Precise => self.to_html_precise(),
        }
    }

    fn push_image(&self, html: &mut String, block: &Block) {
        let image = block.media_entity().and_then(|key| self.entity(key));
        if let Some(Entity::Image { src, alt }) = image {
            html.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\">",
                encode_double_quoted_attribute(src),
                encode_double_quoted_attribute(alt)
            ));
        }
    }

    fn push_inline(&self, html: &mut String, block: &Block) {
        let text = block.text();
        let mut boundaries = vec![0, block.len()];
        for range in block.style_ranges() {
            boundaries.extend([range.offset, range.offset + range.length]);
        }
        for range in block.entity_ranges() {
            boundaries.extend([range.offset, range.offset + range.length]);
        }
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut open: Vec<Inline> = Vec::new();
        for pair in boundaries.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let desired = self.inline_at(block, start);

            let common = open
                .iter()
                .zip(&desired)
                .take_while(|(a, b)| a == b)
                .count();
            while open.len() > common {
                if let Some(inline) = open.pop() {
                    push_close(html, inline);
                }
            }
            for inline in &desired[common..] {
                self.push_open(html, *inline);
                open.push(*inline);
            }

            html.push_str(&encode_text(&utf16::slice(text, start, end)));
        }
        while let Some(inline) = open.pop() {
            push_close(html, inline);
        }
    }

    /// Elements wrapping the character at `offset`, outermost first.
    fn inline_at(&self, block: &Block, offset: usize) -> Vec<Inline> {
        let link = block
            .entity_at(offset)
            .filter(|key| matches!(self.entity(*key), Some(Entity::Link { .. })))
            .map(Inline::Link);
        link.into_iter()
            .chain(block.styles_at(offset).into_iter().map(Inline::Style))
            .collect()
    }

    fn push_open(&self, html: &mut String, inline: Inline) {
        match inline {
            Inline::Link(key) => {
                if let Some(Entity::Link { url }) = self.entity(key) {
                    html.push_str(&format!(
                        "<a href=\"{}\">",
                        encode_double_quoted_attribute(url)
                    ));
                }
            }
            Inline::Style(style) => {
                html.push_str(&format!("<{}>", style.html_tag()));
            }
        }
    }
}

fn push_close(html: &mut String, inline: Inline) {
    match inline {
        Inline::Link(_) => html.push_str("</a>"),
        Inline::Style(style) => {
            html.push_str(&format!("</{}>", style.html_tag()));
        }
    }
}

/// Render serialized content with the block-level approximation, or return
/// `raw` unchanged when it does not decode.
pub fn render_html(raw: &str) -> String {
    render_html_with(raw, HtmlMode::BlockApproximation)
}

/// Render serialized content precisely, or return `raw` unchanged when it
/// does not decode.
pub fn render_html_precise(raw: &str) -> String {
    render_html_with(raw, HtmlMode::Precise)
}

pub fn render_html_with(raw: &str, mode: HtmlMode) -> String {
    match decode_for_display(raw) {
        Some(document) => document.to_html_with(mode),
        None => raw.to_owned(),
    }
}
