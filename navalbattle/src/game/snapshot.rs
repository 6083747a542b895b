// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Plain summaries of a match for scoreboards and for handing state to other processes.
use crate::game::{AttackRecord, Match, MatchStatus, Side};

/// Scoreboard line for one player.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSnapshot {
    pub side: Side,
    pub name: String,
    pub hits: usize,
    /// Vessels still afloat.
    pub remaining: usize,
    pub sunk: usize,
}

/// Summary of a match at one point in time.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub current: Side,
    pub status: MatchStatus,
    /// The most recent attacks within the match's display window, most recent first.
    pub history: Vec<AttackRecord>,
}

impl MatchSnapshot {
    pub(super) fn new(game: &Match) -> Self {
        Self {
            players: Side::BOTH
                .iter()
                .map(|&side| {
                    let player = game.player(side);
                    PlayerSnapshot {
                        side,
                        name: player.name().to_owned(),
                        hits: player.hits(),
                        remaining: player.remaining(),
                        sunk: player.board().sunk_count(),
                    }
                })
                .collect(),
            current: game.current_side(),
            status: game.status(),
            history: game.recent_history().cloned().collect(),
        }
    }
}
