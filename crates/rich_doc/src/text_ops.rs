// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Text insertion and replacement.

use crate::document::Document;
use crate::editor::{EditorState, EditorUpdate};
use crate::selection::{Position, Selection, SelectionBounds};
use crate::utf16;

impl EditorState {
    /// Replace the selection with `text`.
    ///
    /// Inserted text is unformatted. A selection spanning blocks merges its
    /// first and last block; the first block keeps its kind and data. The
    /// caret ends up after the inserted text.
    pub fn insert_text(&self, text: &str) -> EditorUpdate {
        let Some(bounds) = self.bounds() else {
            return self.unchanged();
        };
        if self.document.blocks()[bounds.start.0].is_media() {
            tracing::debug!("cannot type into a media block");
            return self.unchanged();
        }
        if bounds.is_collapsed() && text.is_empty() {
            return self.unchanged();
        }

        let mut document = self.document.clone();
        let caret = replace_span(&mut document, &bounds, text);
        self.next(document, Selection::collapsed(caret))
    }

    /// Remove the selected content.
    pub fn delete_selection(&self) -> EditorUpdate {
        self.insert_text("")
    }
}

/// Replace the span described by `bounds` with unformatted `text`,
/// returning the position just after it.
///
/// The start block must not be a media block. Blocks strictly after the
/// start block up to the end block are removed and whatever follows the
/// selection in the end block is appended to the start block, unless the
/// end block is a media block, in which case nothing of it survives.
pub(crate) fn replace_span(
    document: &mut Document,
    bounds: &SelectionBounds,
    text: &str,
) -> Position {
    let (first, start) = bounds.start;
    let (last, end) = bounds.end;

    if first == last {
        let block = &mut document.blocks_mut()[first];
        block.splice(start, end, text);
        return Position::new(block.key().clone(), start + utf16::len(text));
    }

    let blocks = document.blocks_mut();
    let tail = if blocks[last].is_media() {
        None
    } else {
        Some(blocks[last].split_off(end))
    };
    blocks.drain(first + 1..=last);

    let block = &mut blocks[first];
    let len = block.len();
    block.splice(start, len, text);
    if let Some(tail) = tail {
        block.append(tail);
    }
    Position::new(block.key().clone(), start + utf16::len(text))
}

#[cfg(test)]
mod tests {
    use crate::{
        Block, BlockKey, BlockKind, Document, EditorState, EntityKey,
        InlineStyle, Position,
    };

    fn state_with_text(text: &str) -> EditorState {
        EditorState::with_document(
            Document::new().with_block(Block::new("a", BlockKind::Plain, text)),
        )
    }

    fn key() -> BlockKey {
        BlockKey::new("a")
    }

    fn texts(state: &EditorState) -> Vec<&str> {
        state.document().blocks().iter().map(Block::text).collect()
    }

    // ===================================================================
    // Single block
    // ===================================================================

    #[test]
    fn typing_into_an_empty_state() {
        let state = EditorState::new().insert_text("hi").state;
        assert_eq!(texts(&state), vec!["hi"]);
        assert_eq!(state.selection().focus.offset, 2);
    }

    #[test]
    fn typing_replaces_the_selection() {
        let state = state_with_text("hello world")
            .select_in_block(&key(), 6, 11)
            .insert_text("there")
            .state;
        assert_eq!(texts(&state), vec!["hello there"]);
        assert_eq!(state.selection().focus, Position::new("a", 11));
    }

    #[test]
    fn typing_shifts_later_styles() {
        let doc = Document::new().with_block(
            Block::new("a", BlockKind::Plain, "abcdef").with_style(
                InlineStyle::Italic,
                3,
                3,
            ),
        );
        let state = EditorState::with_document(doc)
            .place_caret(&key(), 1)
            .insert_text("XY")
            .state;
        let block = &state.document().blocks()[0];
        assert_eq!(block.text(), "aXYbcdef");
        assert_eq!(block.style_ranges()[0].offset, 5);
        assert_eq!(block.style_ranges()[0].length, 3);
    }

    #[test]
    fn inserted_text_is_unstyled() {
        let doc = Document::new().with_block(
            Block::new("a", BlockKind::Plain, "abcd").with_style(
                InlineStyle::Bold,
                0,
                4,
            ),
        );
        let state = EditorState::with_document(doc)
            .place_caret(&key(), 2)
            .insert_text("--")
            .state;
        let block = &state.document().blocks()[0];
        assert!(block.styles_at(1).contains(&InlineStyle::Bold));
        assert!(block.styles_at(2).is_empty());
        assert!(block.styles_at(3).is_empty());
        assert!(block.styles_at(4).contains(&InlineStyle::Bold));
    }

    #[test]
    fn replacing_truncates_crossing_entity_ranges() {
        let doc = Document::new()
            .with_block(
                Block::new("a", BlockKind::Plain, "click here").with_entity(
                    EntityKey(0),
                    0,
                    10,
                ),
            )
            .with_entity(
                EntityKey(0),
                crate::Entity::Link {
                    url: "https://example.com/".into(),
                },
            );
        let state = EditorState::with_document(doc)
            .select_in_block(&key(), 5, 10)
            .insert_text("")
            .state;
        let block = &state.document().blocks()[0];
        assert_eq!(block.text(), "click");
        assert_eq!(block.entity_ranges()[0].length, 5);
    }

    #[test]
    fn offsets_count_utf16_units() {
        let state = state_with_text("🙂x")
            .place_caret(&key(), 2)
            .insert_text("!")
            .state;
        assert_eq!(texts(&state), vec!["🙂!x"]);
        assert_eq!(state.selection().focus.offset, 3);
    }

    // ===================================================================
    // Spanning blocks
    // ===================================================================

    #[test]
    fn replacing_across_blocks_merges_them() {
        let doc = Document::new()
            .with_block(Block::new("a", BlockKind::HeaderOne, "Title here"))
            .with_block(Block::new("b", BlockKind::Plain, "middle"))
            .with_block(Block::new("c", BlockKind::Quote, "end of it"));
        let state = EditorState::with_document(doc)
            .select(Position::new("a", 6), Position::new("c", 4))
            .insert_text("-")
            .state;
        let blocks = state.document().blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "Title -of it");
        assert_eq!(blocks[0].kind(), BlockKind::HeaderOne);
        assert_eq!(state.selection().focus, Position::new("a", 7));
    }

    #[test]
    fn tail_keeps_its_styles_after_a_merge() {
        let doc = Document::new()
            .with_block(Block::new("a", BlockKind::Plain, "abc"))
            .with_block(
                Block::new("b", BlockKind::Plain, "def").with_style(
                    InlineStyle::Bold,
                    2,
                    1,
                ),
            );
        let state = EditorState::with_document(doc)
            .select(Position::new("a", 3), Position::new("b", 0))
            .delete_selection()
            .state;
        let block = &state.document().blocks()[0];
        assert_eq!(block.text(), "abcdef");
        assert!(block.styles_at(5).contains(&InlineStyle::Bold));
        assert!(block.styles_at(4).is_empty());
    }

    #[test]
    fn typing_into_media_is_a_noop() {
        let state = EditorState::new().insert_media("a.png", "").state;
        let media = state.document().blocks()[1].key().clone();
        let state = state.place_caret(&media, 0);
        let update = state.insert_text("x");
        assert_eq!(update.state, state);
    }
}
