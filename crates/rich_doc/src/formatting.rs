// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Inline formatting: bold, italic, strikethrough.

use crate::document::InlineStyle;
use crate::editor::{EditorState, EditorUpdate};

impl EditorState {
    /// Toggle `style` over the selection.
    ///
    /// When every selected character (media blocks aside) already carries
    /// the style it is removed from the whole selection, otherwise it is
    /// applied to the whole selection. A collapsed selection is a no-op.
    pub fn apply_inline_style(&self, style: InlineStyle) -> EditorUpdate {
        let Some(bounds) = self.bounds().filter(|b| !b.is_collapsed()) else {
            tracing::debug!(%style, "no selection to format");
            return self.unchanged();
        };

        let blocks = self.document.blocks();
        let targets: Vec<(usize, usize, usize)> = bounds
            .block_indices()
            .filter(|&i| !blocks[i].is_media())
            .map(|i| {
                let (start, end) = bounds.span_in(i, &self.document);
                (i, start, end)
            })
            .filter(|&(_, start, end)| start < end)
            .collect();

        if targets.is_empty() {
            return self.unchanged();
        }

        let is_active = targets.iter().all(|&(i, start, end)| {
            blocks[i].covers_style(style, start, end)
        });

        let mut document = self.document.clone();
        for (i, start, end) in targets {
            let block = &mut document.blocks_mut()[i];
            if is_active {
                block.remove_style(style, start, end);
            } else {
                block.add_style(style, start, end);
            }
        }

        self.next(document, self.selection.clone())
    }

    /// Toggle bold.
    pub fn bold(&self) -> EditorUpdate {
        self.apply_inline_style(InlineStyle::Bold)
    }

    /// Toggle italic.
    pub fn italic(&self) -> EditorUpdate {
        self.apply_inline_style(InlineStyle::Italic)
    }

    /// Toggle strikethrough.
    pub fn strike_through(&self) -> EditorUpdate {
        self.apply_inline_style(InlineStyle::Strikethrough)
    }
}
