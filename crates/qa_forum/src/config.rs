// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Forum configuration, loaded from TOML.
//!
//! ```toml
//! answer_order = "newest_first"
//! html_mode = "precise"
//! require_owner_for_delete = true
//! max_tags = 5
//! excerpt_graphemes = 160
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;

use rich_doc::HtmlMode;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where newly submitted answers go in a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOrder {
    #[default]
    OldestFirst,
    NewestFirst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumConfig {
    #[serde(default)]
    pub answer_order: AnswerOrder,

    #[serde(default)]
    pub html_mode: HtmlMode,

    /// Only let authors delete their own answers.
    #[serde(default)]
    pub require_owner_for_delete: bool,

    #[serde(default = "default_max_tags")]
    pub max_tags: usize,

    /// Length of listing excerpts, in grapheme clusters.
    #[serde(default = "default_excerpt_graphemes")]
    pub excerpt_graphemes: usize,
}

fn default_max_tags() -> usize {
    5
}

fn default_excerpt_graphemes() -> usize {
    160
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            answer_order: AnswerOrder::default(),
            html_mode: HtmlMode::default(),
            require_owner_for_delete: false,
            max_tags: default_max_tags(),
            excerpt_graphemes: default_excerpt_graphemes(),
        }
    }
}

impl ForumConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Read a TOML file. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %path.display(),
                    "no config, using defaults"
                );
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
