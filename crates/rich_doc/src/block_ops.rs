// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Block-level operations: block kinds, alignment and splitting.

use crate::document::{Alignment, Block, BlockKind};
use crate::editor::{EditorState, EditorUpdate};
use crate::selection::{Position, Selection};
use crate::text_ops::replace_span;

impl EditorState {
    /// Set the kind of every block touched by the selection.
    ///
    /// If the block where the selection starts already has `kind`, the
    /// touched blocks revert to [`BlockKind::Plain`] instead, so applying
    /// the same kind twice restores the original. Media blocks are never
    /// retyped and [`BlockKind::Media`] is not accepted as a target.
    pub fn set_block_kind(&self, kind: BlockKind) -> EditorUpdate {
        if kind == BlockKind::Media {
            tracing::debug!("media blocks are only created by insert_media");
            return self.unchanged();
        }
        let Some(bounds) = self.bounds() else {
            return self.unchanged();
        };

        let current = self.document.blocks()[bounds.start.0].kind();
        let target = if current == kind {
            BlockKind::Plain
        } else {
            kind
        };

        let mut document = self.document.clone();
        for i in bounds.block_indices() {
            let block = &mut document.blocks_mut()[i];
            if !block.is_media() {
                block.set_kind(target);
            }
        }

        self.next(document, self.selection.clone())
    }

    /// Toggle an ordered list on the selected blocks.
    pub fn ordered_list(&self) -> EditorUpdate {
        self.set_block_kind(BlockKind::OrderedItem)
    }

    /// Toggle an unordered list on the selected blocks.
    pub fn unordered_list(&self) -> EditorUpdate {
        self.set_block_kind(BlockKind::UnorderedItem)
    }

    /// Toggle a quote on the selected blocks.
    pub fn quote(&self) -> EditorUpdate {
        self.set_block_kind(BlockKind::Quote)
    }

    /// Attach `alignment` to every block touched by the selection.
    pub fn set_alignment(&self, alignment: Alignment) -> EditorUpdate {
        let Some(bounds) = self.bounds() else {
            return self.unchanged();
        };
        let mut document = self.document.clone();
        for i in bounds.block_indices() {
            document.blocks_mut()[i].set_alignment(alignment);
        }
        self.next(document, self.selection.clone())
    }

    /// Replace the selection and split the block at the caret (enter key).
    ///
    /// List items continue as list items; every other kind continues as a
    /// plain block. Alignment carries over. On a media block a new empty
    /// block is opened after it.
    pub fn split_block(&self) -> EditorUpdate {
        let Some(bounds) = self.bounds() else {
            return self.unchanged();
        };
        let mut document = self.document.clone();
        let key = document.next_block_key();

        let start_block = &document.blocks()[bounds.start.0];
        let new_block = if start_block.is_media() {
            let mut block = Block::new(key.clone(), BlockKind::Plain, "");
            if let Some(alignment) = start_block.alignment() {
                block.set_alignment(alignment);
            }
            document.blocks_mut().insert(bounds.start.0 + 1, block);
            key
        } else {
            let caret = replace_span(&mut document, &bounds, "");
            let index = bounds.start.0;
            let head = &mut document.blocks_mut()[index];
            let tail = head.split_off(caret.offset);
            let kind = if head.kind().is_list_item() {
                head.kind()
            } else {
                BlockKind::Plain
            };
            let mut block = Block::new(key.clone(), kind, "");
            if let Some(alignment) = head.alignment() {
                block.set_alignment(alignment);
            }
            block.append(tail);
            document.blocks_mut().insert(index + 1, block);
            key
        };

        self.next(document, Selection::collapsed(Position::new(new_block, 0)))
    }
}
