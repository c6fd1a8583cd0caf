// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The question listing and the ask form.

use chrono::{DateTime, Utc};
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::age::format_age;
use crate::config::ForumConfig;
use crate::error::{ForumError, Result};
use crate::identity::{require_user, IdentityProvider};
use crate::ids::{QuestionId, UserId};
use crate::question::{parse_tags, NewQuestion, Question};
use crate::store::ForumStore;

/// One row of the question listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionSummary {
    pub id: QuestionId,
    pub title: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub author: UserId,
    pub age: String,
    pub answer_count: usize,
}

#[derive(Clone, Debug)]
pub struct QuestionBoard {
    questions: Vec<Question>,
    config: ForumConfig,
}

impl QuestionBoard {
    pub fn new(config: ForumConfig) -> Self {
        Self {
            questions: Vec::new(),
            config,
        }
    }

    pub fn load(store: &dyn ForumStore, config: ForumConfig) -> Result<Self> {
        let questions = store.list_questions()?;
        tracing::debug!(count = questions.len(), "loaded questions");
        Ok(Self { questions, config })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Post a question as the current user.
    pub fn ask(
        &mut self,
        store: &mut dyn ForumStore,
        identity: &dyn IdentityProvider,
        new: NewQuestion,
    ) -> Result<QuestionId> {
        let user = require_user(identity, "ask a question")?;

        let title = new.title.trim();
        if title.is_empty() {
            return Err(ForumError::Validation("title is required".to_owned()));
        }
        if !rich_doc::has_content(&new.description) {
            return Err(ForumError::Validation(
                "description is required".to_owned(),
            ));
        }
        let tags = parse_tags(&new.tags, self.config.max_tags)?;

        let question =
            store.create_question(&user.id, title, &new.description, &tags)?;
        let id = question.id;
        tracing::info!(question_id = %id, tags = tags.len(), "question asked");
        self.questions.push(question);
        Ok(id)
    }

    /// Questions whose title, description text or tags contain `term`,
    /// ignoring case, newest first. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Question> {
        let term = term.trim().to_lowercase();
        let mut found: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| term.is_empty() || q.matches(&term))
            .collect();
        found.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        found
    }

    /// The listing, newest first, with ages relative to `now`.
    pub fn summaries(&self, now: DateTime<Utc>) -> Vec<QuestionSummary> {
        self.search("")
            .into_iter()
            .map(|q| QuestionSummary {
                id: q.id,
                title: q.title.clone(),
                excerpt: excerpt(
                    &q.description_text(),
                    self.config.excerpt_graphemes,
                ),
                tags: q.tags.clone(),
                author: q.author.clone(),
                age: format_age(q.created_at, now),
                answer_count: q.answers.len(),
            })
            .collect()
    }
}

/// At most `limit` grapheme clusters of `text` on one line, with `…` when
/// cut short.
fn excerpt(text: &str, limit: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut graphemes = flat.graphemes(true);
    let head: String = graphemes.by_ref().take(limit).collect();
    if graphemes.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}
