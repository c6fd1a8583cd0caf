// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Plain text rendering and decoding stored content for display.

use crate::document::Document;

impl Document {
    /// Block texts joined by `\n`. Media blocks contribute an empty line.
    pub fn to_plain_text(&self) -> String {
        self.blocks()
            .iter()
            .map(|b| if b.is_media() { "" } else { b.text() })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether anything would be shown: non-blank text or an image.
    pub fn has_content(&self) -> bool {
        self.blocks()
            .iter()
            .any(|b| b.is_media() || !b.text().trim().is_empty())
    }
}

/// Whether `raw` looks like a serialized document rather than free text.
pub fn looks_like_serialized(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.starts_with('{') && trimmed.ends_with('}')
}

/// Decode stored content, or `None` when it should be shown verbatim.
pub(crate) fn decode_for_display(raw: &str) -> Option<Document> {
    match Document::deserialize(raw) {
        Ok(document) => Some(document),
        Err(error) if looks_like_serialized(raw) => {
            tracing::warn!(%error, "failed to decode stored document");
            None
        }
        Err(error) => {
            tracing::debug!(%error, "showing content verbatim");
            None
        }
    }
}

/// Whether stored content shows anything. Content that does not decode
/// counts when it is not blank.
pub fn has_content(raw: &str) -> bool {
    match Document::deserialize(raw) {
        Ok(document) => document.has_content(),
        Err(_) => !raw.trim().is_empty(),
    }
}

/// The plain text of serialized content, or `raw` itself when it does not
/// decode.
pub fn render_plain_text(raw: &str) -> String {
    decode_for_display(raw)
        .map(|document| document.to_plain_text())
        .unwrap_or_else(|| raw.to_owned())
}
