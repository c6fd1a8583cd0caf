// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Persistence for questions and answers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::answer::Answer;
use crate::error::{ForumError, Result};
use crate::ids::{AnswerId, QuestionId, UserId};
use crate::question::Question;

/// Where questions and answers are kept. Failures surface as
/// [`ForumError::Fetch`]; callers do not retry.
pub trait ForumStore {
    fn create_question(
        &mut self,
        author: &UserId,
        title: &str,
        description: &str,
        tags: &[String],
    ) -> Result<Question>;

    /// Create an answer and append its id to the question's answers.
    fn create_answer(
        &mut self,
        question_id: QuestionId,
        author: &UserId,
        content: &str,
    ) -> Result<Answer>;

    fn list_questions(&self) -> Result<Vec<Question>>;

    fn list_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>>;

    fn delete_answer(&mut self, id: AnswerId) -> Result<()>;
}

/// An in-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    questions: BTreeMap<QuestionId, Question>,
    answers: BTreeMap<AnswerId, Answer>,
    last_id: u64,
    offline: bool,
    fixed_now: Option<DateTime<Utc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail, as if the backend were unreachable.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Stamp new records with `now` instead of the system clock.
    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.fixed_now = Some(now);
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn check_online(&self) -> Result<()> {
        if self.offline {
            return Err(ForumError::Fetch("store is offline".to_owned()));
        }
        Ok(())
    }
}

impl ForumStore for MemoryStore {
    fn create_question(
        &mut self,
        author: &UserId,
        title: &str,
        description: &str,
        tags: &[String],
    ) -> Result<Question> {
        self.check_online()?;
        let now = self.now();
        let question = Question {
            id: QuestionId(self.next_id()),
            title: title.to_owned(),
            description: description.to_owned(),
            tags: tags.to_vec(),
            answers: Vec::new(),
            author: author.clone(),
            created_at: now,
            updated_at: now,
        };
        self.questions.insert(question.id, question.clone());
        Ok(question)
    }

    fn create_answer(
        &mut self,
        question_id: QuestionId,
        author: &UserId,
        content: &str,
    ) -> Result<Answer> {
        self.check_online()?;
        if !self.questions.contains_key(&question_id) {
            return Err(ForumError::QuestionNotFound(question_id));
        }
        let answer = Answer::new(
            AnswerId(self.next_id()),
            question_id,
            author.clone(),
            content,
            self.now(),
        );
        if let Some(question) = self.questions.get_mut(&question_id) {
            question.answers.push(answer.id);
        }
        self.answers.insert(answer.id, answer.clone());
        Ok(answer)
    }

    fn list_questions(&self) -> Result<Vec<Question>> {
        self.check_online()?;
        Ok(self.questions.values().cloned().collect())
    }

    fn list_answers(&self, question_id: QuestionId) -> Result<Vec<Answer>> {
        self.check_online()?;
        if !self.questions.contains_key(&question_id) {
            return Err(ForumError::QuestionNotFound(question_id));
        }
        Ok(self
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect())
    }

    fn delete_answer(&mut self, id: AnswerId) -> Result<()> {
        self.check_online()?;
        let answer = self
            .answers
            .remove(&id)
            .ok_or(ForumError::AnswerNotFound(id))?;
        if let Some(question) = self.questions.get_mut(&answer.question_id) {
            question.answers.retain(|a| *a != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> UserId {
        UserId::new("u1")
    }

    #[test]
    fn answers_are_linked_to_their_question() {
        let mut store = MemoryStore::new();
        let question = store
            .create_question(&author(), "Title", "{}", &["sql".to_owned()])
            .unwrap();
        let answer =
            store.create_answer(question.id, &author(), "content").unwrap();

        let questions = store.list_questions().unwrap();
        assert_eq!(questions[0].answers, vec![answer.id]);
        assert_eq!(store.list_answers(question.id).unwrap(), vec![answer]);
    }

    #[test]
    fn answering_an_unknown_question_fails() {
        let mut store = MemoryStore::new();
        let err = store
            .create_answer(QuestionId(9), &author(), "content")
            .unwrap_err();
        assert!(matches!(err, ForumError::QuestionNotFound(QuestionId(9))));
    }

    #[test]
    fn deleting_unlinks_the_answer() {
        let mut store = MemoryStore::new();
        let question =
            store.create_question(&author(), "T", "{}", &[]).unwrap();
        let answer = store.create_answer(question.id, &author(), "x").unwrap();
        store.delete_answer(answer.id).unwrap();
        assert!(store.list_answers(question.id).unwrap().is_empty());
        assert!(store.list_questions().unwrap()[0].answers.is_empty());
        assert!(matches!(
            store.delete_answer(answer.id),
            Err(ForumError::AnswerNotFound(_))
        ));
    }

    #[test]
    fn offline_store_fails_with_fetch_errors() {
        let mut store = MemoryStore::new();
        store.set_offline(true);
        assert!(matches!(store.list_questions(), Err(ForumError::Fetch(_))));
        assert!(matches!(
            store.create_question(&author(), "T", "{}", &[]),
            Err(ForumError::Fetch(_))
        ));
    }
}
