// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The answers to one question, plus the answer being composed.

use rich_doc::{has_content, EditorState, EditorUpdate};

use crate::answer::{Answer, MAX_STARS};
use crate::config::{AnswerOrder, ForumConfig};
use crate::error::{ForumError, Result};
use crate::identity::{require_user, IdentityProvider};
use crate::ids::{AnswerId, QuestionId};
use crate::store::ForumStore;
use crate::vote::{VoteDirection, VoteState};

#[derive(Clone, Debug)]
pub struct AnswerThread {
    question_id: QuestionId,
    answers: Vec<Answer>,
    draft: EditorState,
    config: ForumConfig,
}

impl AnswerThread {
    pub fn new(question_id: QuestionId, config: ForumConfig) -> Self {
        Self {
            question_id,
            answers: Vec::new(),
            draft: EditorState::new(),
            config,
        }
    }

    /// Fetch the question's answers from `store`.
    pub fn load(
        store: &dyn ForumStore,
        question_id: QuestionId,
        config: ForumConfig,
    ) -> Result<Self> {
        let mut answers = store.list_answers(question_id)?;
        answers.sort_by_key(|a| (a.created_at, a.id));
        if config.answer_order == AnswerOrder::NewestFirst {
            answers.reverse();
        }
        tracing::debug!(%question_id, count = answers.len(), "loaded answers");
        Ok(Self {
            question_id,
            answers,
            draft: EditorState::new(),
            config,
        })
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn answer(&self, id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    /// The answer being composed.
    pub fn draft(&self) -> &EditorState {
        &self.draft
    }

    /// Keep the result of an edit command as the new draft.
    pub fn update_draft(&mut self, update: EditorUpdate) {
        self.draft = update.state;
    }

    fn answer_mut(&mut self, id: AnswerId) -> Result<&mut Answer> {
        self.answers
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ForumError::AnswerNotFound(id))
    }

    /// Vote on an answer as the current user, returning the new count.
    pub fn vote(
        &mut self,
        identity: &dyn IdentityProvider,
        answer_id: AnswerId,
        direction: VoteDirection,
    ) -> Result<i64> {
        let user = require_user(identity, "vote")?;
        let answer = self.answer_mut(answer_id)?;
        let delta = answer.apply_vote(&user.id, direction);
        tracing::debug!(
            %answer_id,
            %direction,
            delta,
            votes = answer.votes,
            "vote applied"
        );
        Ok(answer.votes)
    }

    /// The current user's vote on an answer.
    pub fn vote_of(
        &self,
        identity: &dyn IdentityProvider,
        answer_id: AnswerId,
    ) -> VoteState {
        match (identity.current_user(), self.answer(answer_id)) {
            (Some(user), Some(answer)) => answer.vote_of(&user.id),
            _ => VoteState::None,
        }
    }

    /// Post `content` (a serialized document, or plain text) as an answer
    /// by the current user and clear the draft.
    pub fn submit_answer(
        &mut self,
        store: &mut dyn ForumStore,
        identity: &dyn IdentityProvider,
        content: &str,
    ) -> Result<AnswerId> {
        let user = require_user(identity, "submit an answer")?;
        if !has_content(content) {
            return Err(ForumError::Validation("answer is empty".to_owned()));
        }

        let answer = store.create_answer(self.question_id, &user.id, content)?;
        let id = answer.id;
        match self.config.answer_order {
            AnswerOrder::OldestFirst => self.answers.push(answer),
            AnswerOrder::NewestFirst => self.answers.insert(0, answer),
        }
        self.draft = EditorState::new();
        tracing::info!(
            question_id = %self.question_id,
            answer_id = %id,
            "answer submitted"
        );
        Ok(id)
    }

    /// Submit the draft.
    pub fn submit_draft(
        &mut self,
        store: &mut dyn ForumStore,
        identity: &dyn IdentityProvider,
    ) -> Result<AnswerId> {
        let content = self.draft.serialize();
        self.submit_answer(store, identity, &content)
    }

    /// Remove an answer.
    ///
    /// Anyone may delete unless the configuration requires the author.
    pub fn delete_answer(
        &mut self,
        store: &mut dyn ForumStore,
        identity: &dyn IdentityProvider,
        id: AnswerId,
    ) -> Result<Answer> {
        let index = self
            .answers
            .iter()
            .position(|a| a.id == id)
            .ok_or(ForumError::AnswerNotFound(id))?;

        if self.config.require_owner_for_delete {
            let user = require_user(identity, "delete an answer")?;
            if self.answers[index].author != user.id {
                tracing::warn!(
                    answer_id = %id,
                    user = %user.id,
                    "not the author"
                );
                return Err(ForumError::NotAnswerOwner(id));
            }
        }

        store.delete_answer(id)?;
        tracing::info!(answer_id = %id, "answer deleted");
        Ok(self.answers.remove(index))
    }

    /// Give an answer 1 to 5 stars.
    pub fn rate_answer(&mut self, id: AnswerId, stars: u8) -> Result<()> {
        if !(1..=MAX_STARS).contains(&stars) {
            return Err(ForumError::Validation(format!(
                "rating must be between 1 and {MAX_STARS}, got {stars}"
            )));
        }
        self.answer_mut(id)?.stars = stars;
        Ok(())
    }

    /// Render an answer's content as HTML in the configured mode.
    pub fn render_answer(&self, id: AnswerId) -> Result<String> {
        let answer = self.answer(id).ok_or(ForumError::AnswerNotFound(id))?;
        Ok(answer.to_html(self.config.html_mode))
    }
}
