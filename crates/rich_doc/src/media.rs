// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::document::{Block, BlockKind, Entity};
use crate::editor::{EditorState, EditorUpdate};
use crate::selection::{Position, Selection};
use crate::text_ops::replace_span;

impl EditorState {
    /// Embed an image at the selection.
    ///
    /// The selected content is removed and the block is split at the caret
    /// with a media block between the halves. The caret moves to the start
    /// of the block after the image. When the selection starts on a media
    /// block the image goes after it, followed by an empty block.
    pub fn insert_media(&self, src: &str, alt: &str) -> EditorUpdate {
        let Some(bounds) = self.bounds() else {
            return self.unchanged();
        };
        let mut document = self.document.clone();
        let image = document.insert_entity(Entity::Image {
            src: src.to_owned(),
            alt: alt.to_owned(),
        });

        let index = bounds.start.0;
        let tail = if document.blocks()[index].is_media() {
            None
        } else {
            let caret = replace_span(&mut document, &bounds, "");
            Some(document.blocks_mut()[index].split_off(caret.offset))
        };

        let media_key = document.next_block_key();
        document
            .blocks_mut()
            .insert(index + 1, Block::media(media_key, image));

        let after_key = document.next_block_key();
        let mut after = Block::new(after_key.clone(), BlockKind::Plain, "");
        if let Some(tail) = tail {
            after.append(tail);
        }
        document.blocks_mut().insert(index + 2, after);

        tracing::debug!(%image, src, "inserted media block");
        self.next(document, Selection::collapsed(Position::new(after_key, 0)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Block, BlockKey, BlockKind, Document, EditorState, Entity};

    fn kinds(state: &EditorState) -> Vec<BlockKind> {
        state.document().blocks().iter().map(Block::kind).collect()
    }

    #[test]
    fn media_splits_the_block_at_the_caret() {
        let doc = Document::new()
            .with_block(Block::new("a", BlockKind::HeaderOne, "before after"));
        let state = EditorState::with_document(doc)
            .place_caret(&BlockKey::new("a"), 6)
            .insert_media("https://img.example/cat.png", "A cat")
            .state;

        let blocks = state.document().blocks();
        assert_eq!(
            kinds(&state),
            vec![BlockKind::HeaderOne, BlockKind::Media, BlockKind::Plain]
        );
        assert_eq!(blocks[0].text(), "before");
        assert_eq!(blocks[1].text(), Block::MEDIA_PLACEHOLDER);
        assert_eq!(blocks[2].text(), " after");
        assert_eq!(state.selection().focus.block, *blocks[2].key());
        assert_eq!(state.selection().focus.offset, 0);
    }

    #[test]
    fn media_block_references_a_new_image_entity() {
        let state = EditorState::new().insert_media("cat.png", "A cat").state;
        let media = &state.document().blocks()[1];
        let key = media.media_entity().unwrap();
        assert_eq!(
            state.document().entity(key),
            Some(&Entity::Image {
                src: "cat.png".into(),
                alt: "A cat".into()
            })
        );
        assert_eq!(media.entity_ranges()[0].length, 1);
    }

    #[test]
    fn media_replaces_the_selection() {
        let doc = Document::new()
            .with_block(Block::new("a", BlockKind::Plain, "keep DROP keep"));
        let state = EditorState::with_document(doc)
            .select_in_block(&BlockKey::new("a"), 5, 10)
            .insert_media("x.png", "")
            .state;
        let blocks = state.document().blocks();
        assert_eq!(blocks[0].text(), "keep ");
        assert_eq!(blocks[2].text(), "keep");
    }

    #[test]
    fn media_after_media_opens_an_empty_block() {
        let state = EditorState::new().insert_media("one.png", "").state;
        let first_media = state.document().blocks()[1].key().clone();
        let state = state
            .place_caret(&first_media, 0)
            .insert_media("two.png", "")
            .state;
        assert_eq!(
            kinds(&state),
            vec![
                BlockKind::Plain,
                BlockKind::Media,
                BlockKind::Media,
                BlockKind::Plain,
                BlockKind::Plain,
            ]
        );
        assert_eq!(state.document().entities().len(), 2);
        assert!(state.document().check_invariants().is_ok());
    }
}
