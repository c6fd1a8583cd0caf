// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Selection management.
//!
//! A [`Selection`] is an anchor/focus pair of block positions. Commands
//! resolve it against a document into [`SelectionBounds`], which are
//! ordered, clamped and expressed as block indices.

use std::ops::RangeInclusive;

use crate::document::{BlockKey, Document};

/// A caret position: a block and a UTF-16 offset within its text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub block: BlockKey,
    pub offset: usize,
}

impl Position {
    pub fn new(block: impl Into<BlockKey>, offset: usize) -> Self {
        Self {
            block: block.into(),
            offset,
        }
    }
}

/// Where the selection started (anchor) and where it ends (focus).
/// The focus may come before the anchor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    pub fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(at: Position) -> Self {
        Self {
            anchor: at.clone(),
            focus: at,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Resolve against `document`. `None` when either end names a block
    /// the document does not contain.
    pub(crate) fn bounds(&self, document: &Document) -> Option<SelectionBounds> {
        let resolve = |pos: &Position| {
            let index = document.block_index(&pos.block)?;
            let len = document.blocks()[index].len();
            Some((index, pos.offset.min(len)))
        };
        let anchor = resolve(&self.anchor)?;
        let focus = resolve(&self.focus)?;
        let (start, end) = if anchor <= focus {
            (anchor, focus)
        } else {
            (focus, anchor)
        };
        Some(SelectionBounds { start, end })
    }
}

/// A selection resolved to `(block index, offset)` pairs, `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SelectionBounds {
    pub(crate) start: (usize, usize),
    pub(crate) end: (usize, usize),
}

impl SelectionBounds {
    pub(crate) fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Indices of every block the selection touches.
    pub(crate) fn block_indices(&self) -> RangeInclusive<usize> {
        self.start.0..=self.end.0
    }

    /// The selected `[start, end)` offsets inside block `index`.
    pub(crate) fn span_in(
        &self,
        index: usize,
        document: &Document,
    ) -> (usize, usize) {
        let start = if index == self.start.0 { self.start.1 } else { 0 };
        let end = if index == self.end.0 {
            self.end.1
        } else {
            document.blocks()[index].len()
        };
        (start, end)
    }
}
