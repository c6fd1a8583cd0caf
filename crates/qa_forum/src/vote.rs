// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Per-voter vote states.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A voter's current vote on one answer.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    #[default]
    None,
    Up,
    Down,
}

/// A click on the up or down button.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteState {
    /// The state after voting `direction`, and the change to the count.
    ///
    /// Voting the same way twice withdraws the vote; voting the other way
    /// flips it.
    pub fn apply(self, direction: VoteDirection) -> (VoteState, i64) {
        use VoteDirection as D;
        match (self, direction) {
            (Self::None, D::Up) => (Self::Up, 1),
            (Self::None, D::Down) => (Self::Down, -1),
            (Self::Up, D::Up) => (Self::None, -1),
            (Self::Up, D::Down) => (Self::Down, -2),
            (Self::Down, D::Down) => (Self::None, 1),
            (Self::Down, D::Up) => (Self::Up, 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn replay(votes: &[VoteDirection]) -> (VoteState, i64) {
        votes.iter().fold((VoteState::None, 0), |(state, total), &v| {
            let (next, delta) = state.apply(v);
            (next, total + delta)
        })
    }

    #[test]
    fn transition_table() {
        use VoteDirection::{Down, Up};
        let cases = [
            (VoteState::None, Up, VoteState::Up, 1),
            (VoteState::None, Down, VoteState::Down, -1),
            (VoteState::Up, Up, VoteState::None, -1),
            (VoteState::Up, Down, VoteState::Down, -2),
            (VoteState::Down, Down, VoteState::None, 1),
            (VoteState::Down, Up, VoteState::Up, 2),
        ];
        for (current, command, next, delta) in cases {
            assert_eq!(
                current.apply(command),
                (next, delta),
                "{current} + {command}"
            );
        }
    }

    #[test]
    fn vote_sequences() {
        use VoteDirection::{Down, Up};
        assert_eq!(replay(&[Up, Up]), (VoteState::None, 0));
        assert_eq!(replay(&[Up, Down]), (VoteState::Down, -1));
        assert_eq!(replay(&[Down, Up, Up]), (VoteState::None, 0));
    }

    #[test]
    fn switching_sides_moves_the_count_by_two() {
        use VoteDirection::{Down, Up};
        let (up, _) = VoteState::None.apply(Up);
        assert_eq!(up.apply(Down), (VoteState::Down, -2));
    }

    #[test]
    fn string_forms() {
        assert_eq!(VoteState::Up.to_string(), "up");
        assert_eq!(VoteDirection::from_str("down").unwrap(), VoteDirection::Down);
        assert_eq!(
            serde_json::to_string(&VoteState::None).unwrap(),
            "\"none\""
        );
    }
}
