// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Editor state: a document together with a selection.
//!
//! [`EditorState`] is an immutable value. Every edit command borrows the
//! current state and returns an [`EditorUpdate`] holding the next state and
//! its serialized snapshot, so callers decide what to keep (see
//! [`crate::History`]) and nothing is shared between renders.

use crate::document::{Block, BlockKey, BlockKind, Document};
use crate::error::Result;
use crate::selection::{Position, Selection, SelectionBounds};

/// A document plus the user's selection within it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorState {
    pub(crate) document: Document,
    pub(crate) selection: Selection,
}

/// The result of an edit command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorUpdate {
    /// The state after the command.
    pub state: EditorState,
    /// `state`'s document in serialized form, ready to be stored.
    pub content: String,
}

impl EditorUpdate {
    pub(crate) fn new(state: EditorState) -> Self {
        let content = state.document.serialize();
        Self { state, content }
    }

    pub fn into_state(self) -> EditorState {
        self.state
    }
}

impl EditorState {
    /// An empty document: one plain block with the caret at its start.
    pub fn new() -> Self {
        let key = BlockKey::new("b0");
        Self {
            document: Document::new().with_block(Block::new(
                key.clone(),
                BlockKind::Plain,
                "",
            )),
            selection: Selection::collapsed(Position::new(key, 0)),
        }
    }

    /// Wrap an existing document, placing the caret at its end.
    ///
    /// A document without blocks gets one empty plain block so there is
    /// always somewhere to put the caret.
    pub fn with_document(document: Document) -> Self {
        let mut document = document;
        if document.blocks().is_empty() {
            let key = document.next_block_key();
            document
                .blocks_mut()
                .push(Block::new(key, BlockKind::Plain, ""));
        }
        let last = &document.blocks()[document.blocks().len() - 1];
        let caret = Position::new(last.key().clone(), last.len());
        Self {
            document,
            selection: Selection::collapsed(caret),
        }
    }

    /// Decode serialized content into a fresh state.
    pub fn from_serialized(raw: &str) -> Result<Self> {
        Ok(Self::with_document(Document::deserialize(raw)?))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn serialize(&self) -> String {
        self.document.serialize()
    }

    /// Move the selection. Positions naming unknown blocks leave the state
    /// unchanged; offsets are clamped to their block's length.
    pub fn select(&self, anchor: Position, focus: Position) -> EditorState {
        let clamp = |pos: Position| {
            let len = self.document.block(&pos.block)?.len();
            Some(Position {
                offset: pos.offset.min(len),
                block: pos.block,
            })
        };
        let (Some(anchor), Some(focus)) = (clamp(anchor), clamp(focus)) else {
            tracing::debug!("ignoring selection of unknown block");
            return self.clone();
        };
        EditorState {
            document: self.document.clone(),
            selection: Selection::new(anchor, focus),
        }
    }

    /// Select `[start, end)` within a single block.
    pub fn select_in_block(
        &self,
        block: &BlockKey,
        start: usize,
        end: usize,
    ) -> EditorState {
        self.select(
            Position::new(block.clone(), start),
            Position::new(block.clone(), end),
        )
    }

    /// Place a collapsed caret.
    pub fn place_caret(&self, block: &BlockKey, offset: usize) -> EditorState {
        self.select_in_block(block, offset, offset)
    }

    pub(crate) fn bounds(&self) -> Option<SelectionBounds> {
        self.selection.bounds(&self.document)
    }

    /// Package `document` and `selection` as the next state.
    pub(crate) fn next(
        &self,
        document: Document,
        selection: Selection,
    ) -> EditorUpdate {
        document.assert_invariants();
        EditorUpdate::new(EditorState {
            document,
            selection,
        })
    }

    /// The same state again, for commands that turn out to be no-ops.
    pub(crate) fn unchanged(&self) -> EditorUpdate {
        EditorUpdate::new(self.clone())
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
