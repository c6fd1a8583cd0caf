// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! A block-structured rich text document with inline styles and entities,
//! the edit commands of a post composer, and plain text / HTML renderers
//! for stored content.
//!
//! ```
//! use rich_doc::{render_html, EditorState};
//!
//! let update = EditorState::new().insert_text("Hello").state.split_block();
//! assert_eq!(render_html(&update.content), "<p>Hello</p><p></p>");
//! ```

mod block_ops;
mod document;
mod editor;
mod error;
mod formatting;
mod history;
mod html;
mod links;
mod media;
mod plain_text;
mod ranges;
mod selection;
mod serialize;
mod text_ops;
mod utf16;

pub use crate::document::{
    Alignment, Block, BlockData, BlockKey, BlockKind, Document, Entity,
    EntityKey, EntityRange, InlineStyle, StyleRange,
};
pub use crate::editor::{EditorState, EditorUpdate};
pub use crate::error::{DocumentError, Result};
pub use crate::history::{History, DEFAULT_HISTORY_LIMIT};
pub use crate::html::{
    render_html, render_html_precise, render_html_with, HtmlMode,
};
pub use crate::links::normalize_link_url;
pub use crate::plain_text::{
    has_content, looks_like_serialized, render_plain_text,
};
pub use crate::selection::{Position, Selection};
