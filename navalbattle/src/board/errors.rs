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

//! Errors used by the `Board` and `FleetSetup`.

use thiserror::Error;

use crate::board::{Coordinate, Orientation};

/// Error returned when constructing a board with a size of zero, or one whose cell count
/// does not fit in a `usize`.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("board size must be nonzero and its cell count must fit in a usize")]
pub struct InvalidSize;

/// Reason why a vessel could not be placed at a given position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// One or more of the vessel's cells would fall outside the board.
    #[error("insufficient space for the vessel at the specified position")]
    OutOfBounds,
    /// One or more of the cells was already occupied by another vessel.
    #[error("the requested position was already occupied")]
    AlreadyOccupied,
    /// Vessels must have a length of at least one.
    #[error("vessels must have a nonzero length")]
    ZeroLength,
}

/// Error caused when attempting to place a vessel in an invalid position.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("could not place vessel of length {length} at {start:?} ({orientation}): {reason}")]
pub struct PlaceError {
    #[source]
    reason: CannotPlaceReason,
    start: Coordinate,
    length: usize,
    orientation: Orientation,
}

impl PlaceError {
    /// Construct a placement error from a reason and the attempted placement.
    pub(super) fn new(
        reason: CannotPlaceReason,
        start: Coordinate,
        length: usize,
        orientation: Orientation,
    ) -> Self {
        Self {
            reason,
            start,
            length,
            orientation,
        }
    }

    /// Get the reason placement was aborted.
    pub fn reason(&self) -> CannotPlaceReason {
        self.reason
    }

    /// Get the cell where placement was attempted.
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Get the length of the vessel that was being placed.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Get the orientation that was attempted.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

/// Error returned when a coordinate does not lie on the board.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("coordinate {coord:?} is out of bounds for a {size}x{size} board")]
pub struct OutOfBounds {
    /// The coordinate that was requested.
    pub coord: Coordinate,
    /// Size of the board it was checked against.
    pub size: usize,
}

/// Error returned when a coordinate label such as `C4` cannot be parsed.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("invalid coordinate {input:?}, expected a letter followed by a column number")]
pub struct ParseCoordinateError {
    input: String,
}

impl ParseCoordinateError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}
