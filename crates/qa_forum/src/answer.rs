// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rich_doc::{render_html_with, render_plain_text, HtmlMode};
use serde::{Deserialize, Serialize};

use crate::ids::{AnswerId, QuestionId, UserId};
use crate::vote::{VoteDirection, VoteState};

/// Highest star rating an answer can be given.
pub const MAX_STARS: u8 = 5;

/// An answer to a question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    /// Serialized documents, rendered one after another.
    pub content: Vec<String>,
    pub votes: i64,
    #[serde(default)]
    pub voters: BTreeMap<UserId, VoteState>,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
    /// 0 when unrated, otherwise 1 to [`MAX_STARS`].
    #[serde(default)]
    pub stars: u8,
}

impl Answer {
    pub fn new(
        id: AnswerId,
        question_id: QuestionId,
        author: UserId,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            question_id,
            content: vec![content.into()],
            votes: 0,
            voters: BTreeMap::new(),
            author,
            created_at,
            stars: 0,
        }
    }

    /// How `voter` has currently voted.
    pub fn vote_of(&self, voter: &UserId) -> VoteState {
        self.voters.get(voter).copied().unwrap_or_default()
    }

    /// Apply a vote by `voter`, returning the change to the count.
    pub(crate) fn apply_vote(
        &mut self,
        voter: &UserId,
        direction: VoteDirection,
    ) -> i64 {
        let (next, delta) = self.vote_of(voter).apply(direction);
        if next == VoteState::None {
            self.voters.remove(voter);
        } else {
            self.voters.insert(voter.clone(), next);
        }
        self.votes += delta;
        delta
    }

    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|segment| render_plain_text(segment))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_html(&self, mode: HtmlMode) -> String {
        self.content
            .iter()
            .map(|segment| render_html_with(segment, mode))
            .collect()
    }
}
