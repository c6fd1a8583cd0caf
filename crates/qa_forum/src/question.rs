// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rich_doc::render_plain_text;
use serde::{Deserialize, Serialize};

use crate::error::{ForumError, Result};
use crate::ids::{AnswerId, QuestionId, UserId};

static TAG_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;]").expect("Invalid regex"));

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    /// A serialized document.
    pub description: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub answers: Vec<AnswerId>,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    pub fn description_text(&self) -> String {
        render_plain_text(&self.description)
    }

    /// Case-insensitive match against the title, the description text or
    /// any tag. `term` must already be lowercase.
    pub(crate) fn matches(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(term)
            || self.description_text().to_lowercase().contains(term)
            || self.tags.iter().any(|t| t.to_lowercase().contains(term))
    }
}

/// What the ask form submits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub title: String,
    /// A serialized document.
    pub description: String,
    /// Tags separated by commas or semicolons.
    #[serde(default)]
    pub tags: String,
}

/// Split a tag field into distinct tags.
///
/// Entries are trimmed, empty ones dropped and repeats (ignoring case)
/// removed, keeping the first spelling. More than `max` tags is an error.
pub fn parse_tags(raw: &str, max: usize) -> Result<Vec<String>> {
    let mut tags: Vec<String> = Vec::new();
    for tag in TAG_SEPARATOR.split(raw).map(str::trim) {
        if tag.is_empty() {
            continue;
        }
        let lower = tag.to_lowercase();
        if tags.iter().any(|t| t.to_lowercase() == lower) {
            continue;
        }
        tags.push(tag.to_owned());
    }
    if tags.len() > max {
        return Err(ForumError::Validation(format!(
            "at most {max} tags are allowed, got {}",
            tags.len()
        )));
    }
    Ok(tags)
}
