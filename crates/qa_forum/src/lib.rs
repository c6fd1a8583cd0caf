// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Question-and-answer forum state: questions, answer threads with voting,
//! ratings and deletion, and the listing view.
//!
//! Question descriptions and answer bodies are serialized
//! [`rich_doc::Document`]s; anything that fails to decode is shown as
//! plain text.

mod age;
mod answer;
mod board;
mod config;
mod error;
mod identity;
mod ids;
mod question;
mod store;
mod thread;
mod vote;

pub use crate::age::format_age;
pub use crate::answer::{Answer, MAX_STARS};
pub use crate::board::{QuestionBoard, QuestionSummary};
pub use crate::config::{AnswerOrder, ForumConfig};
pub use crate::error::{ForumError, Result};
pub use crate::identity::{IdentityProvider, StaticIdentity, User};
pub use crate::ids::{AnswerId, QuestionId, UserId};
pub use crate::question::{parse_tags, NewQuestion, Question};
pub use crate::store::{ForumStore, MemoryStore};
pub use crate::thread::AnswerThread;
pub use crate::vote::{VoteDirection, VoteState};
