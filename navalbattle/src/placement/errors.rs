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

use crate::board::Coordinate;

/// Error returned when a fleet could not be placed on a board.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum PlacementError {
    /// Random placement ran out of board restarts. The board size and vessel lengths
    /// most likely cannot be satisfied together.
    #[error("could not place all vessels after {attempts} board attempts")]
    Exhausted { attempts: usize },

    /// A vessel is longer than the board is wide, so no placement can ever succeed.
    #[error("vessel of length {length} cannot fit on a {size}x{size} board")]
    VesselTooLong { length: usize, size: usize },

    /// Vessels must occupy at least one cell.
    #[error("vessel {idx} has length 0")]
    ZeroLength { idx: usize },

    /// An externally supplied layout was rejected.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Reason an externally supplied layout was rejected.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum LayoutError {
    #[error("expected {expected} vessels, layout has {found}")]
    VesselCount { expected: usize, found: usize },

    #[error("vessel {idx} should have length {expected}, has {found}")]
    VesselLength {
        idx: usize,
        expected: usize,
        found: usize,
    },

    #[error("vessel {idx} has no cells")]
    EmptyVessel { idx: usize },

    #[error("vessel {idx} has cell {coord:?} outside the {size}x{size} board")]
    OutOfBounds {
        idx: usize,
        coord: Coordinate,
        size: usize,
    },

    #[error("cell {coord:?} is used more than once")]
    Overlap { coord: Coordinate },

    #[error("vessel {idx} is not a straight run of adjacent cells")]
    NotStraight { idx: usize },
}
