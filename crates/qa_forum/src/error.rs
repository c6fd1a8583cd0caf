// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

use crate::ids::{AnswerId, QuestionId};

#[derive(Error, Debug)]
pub enum ForumError {
    #[error("Sign in required")]
    Unauthenticated,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Answer not found: {0}")]
    AnswerNotFound(AnswerId),

    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    #[error("Answer {0} belongs to another user")]
    NotAnswerOwner(AnswerId),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results with ForumError
pub type Result<T> = std::result::Result<T, ForumError>;
