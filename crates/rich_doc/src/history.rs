// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Undo / redo over editor state snapshots.
//!
//! [`History`] is a plain value: `record`, `undo` and `redo` consume it and
//! return the next history, so the caller owns it alongside everything else.

use crate::editor::EditorState;

/// Snapshots kept before the oldest one is dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    past: Vec<EditorState>,
    present: EditorState,
    future: Vec<EditorState>,
    limit: usize,
}

impl History {
    pub fn new(present: EditorState) -> Self {
        Self::with_limit(present, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(present: EditorState, limit: usize) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
            limit,
        }
    }

    pub fn present(&self) -> &EditorState {
        &self.present
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Make `state` the present, remembering the previous one.
    ///
    /// Recording a state whose document is unchanged only moves the
    /// selection and leaves undo/redo alone.
    pub fn record(mut self, state: EditorState) -> Self {
        if state.document() == self.present.document() {
            self.present = state;
            return self;
        }
        let previous = std::mem::replace(&mut self.present, state);
        self.past.push(previous);
        if self.past.len() > self.limit {
            let excess = self.past.len() - self.limit;
            self.past.drain(..excess);
        }
        self.future.clear();
        self
    }

    pub fn undo(mut self) -> Self {
        match self.past.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.present, previous);
                self.future.push(current);
            }
            None => tracing::debug!("nothing to undo"),
        }
        self
    }

    pub fn redo(mut self) -> Self {
        match self.future.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.present, next);
                self.past.push(current);
            }
            None => tracing::debug!("nothing to redo"),
        }
        self
    }
}
