// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use url::Url;

use crate::document::Entity;
use crate::editor::{EditorState, EditorUpdate};
use crate::error::{DocumentError, Result};

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

impl EditorState {
    /// Link the selected text to `url`.
    ///
    /// A single link entity is created and every selected non-media span is
    /// pointed at it, replacing links it overlaps. Fails with
    /// [`DocumentError::InvalidSelection`] when nothing linkable is selected
    /// and with [`DocumentError::InvalidUrl`] when `url` is not usable.
    pub fn insert_link(&self, url: &str) -> Result<EditorUpdate> {
        let bounds = self
            .bounds()
            .filter(|b| !b.is_collapsed())
            .ok_or(DocumentError::InvalidSelection)?;
        let url = normalize_link_url(url)?;

        let targets: Vec<(usize, usize, usize)> = bounds
            .block_indices()
            .filter(|&i| !self.document.blocks()[i].is_media())
            .map(|i| {
                let (start, end) = bounds.span_in(i, &self.document);
                (i, start, end)
            })
            .filter(|&(_, start, end)| start < end)
            .collect();
        if targets.is_empty() {
            return Err(DocumentError::InvalidSelection);
        }

        let mut document = self.document.clone();
        let link = document.insert_entity(Entity::Link { url });
        for (i, start, end) in targets {
            document.blocks_mut()[i].set_entity(link, start, end);
        }
        Ok(self.next(document, self.selection.clone()))
    }
}

/// Trim and validate a link target.
///
/// Targets without a scheme are treated as web addresses, so
/// `example.com` becomes `https://example.com/`. Only `http`, `https` and
/// `mailto` links are accepted.
pub fn normalize_link_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DocumentError::InvalidUrl(raw.to_owned()));
    }

    let candidate = if trimmed.contains("://") || trimmed.starts_with("mailto:")
    {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let url = Url::parse(&candidate)
        .map_err(|_| DocumentError::InvalidUrl(raw.to_owned()))?;
    if !ALLOWED_SCHEMES.contains(&url.scheme()) {
        return Err(DocumentError::InvalidUrl(raw.to_owned()));
    }
    if url.scheme() != "mailto" && url.host_str().is_none() {
        return Err(DocumentError::InvalidUrl(raw.to_owned()));
    }
    Ok(url.to_string())
}
