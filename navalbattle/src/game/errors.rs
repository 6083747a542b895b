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

use thiserror::Error;

use crate::{
    board::{Coordinate, OutOfBounds},
    config::ConfigError,
    game::Side,
    placement::{LayoutError, PlacementError},
};

/// Reason why an attack was rejected without touching the match.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum AttackError {
    /// The target cell is not on the defending board. This points at a bug in whatever
    /// produced the coordinate, so it is never treated as a miss.
    #[error("the target coordinate {0:?} is out of bounds")]
    OutOfBounds(Coordinate),

    /// The match already has a winner.
    #[error("the match is already over, {winner} won")]
    MatchOver { winner: Side },
}

impl From<OutOfBounds> for AttackError {
    fn from(err: OutOfBounds) -> Self {
        AttackError::OutOfBounds(err.coord)
    }
}

/// Error returned when a side's board could not be built.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SetupError {
    #[error("invalid game configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("could not place ships for {side}: {source}")]
    Placement {
        side: Side,
        #[source]
        source: PlacementError,
    },

    #[error("invalid layout for {side}: {source}")]
    Layout {
        side: Side,
        #[source]
        source: LayoutError,
    },
}
