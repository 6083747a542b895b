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

//! Populating boards with vessels, either from a layout supplied by a setup phase or by
//! randomized search.
//!
//! Random placement retries each vessel locally a bounded number of times. When a vessel
//! runs out of attempts, the whole board is wiped and the full fleet is placed again from
//! the first vessel. There is no per-vessel backtracking.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::{
    board::{Board, Coordinate, Orientation},
    config::PlacementLimits,
    ships::VesselId,
};

pub use self::errors::{LayoutError, PlacementError};

mod errors;

/// Cells of a single vessel in a [`Layout`], in order from one end to the other.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VesselLayout {
    pub cells: Vec<Coordinate>,
}

impl VesselLayout {
    /// Build the cells of a straight vessel.
    pub fn straight(start: Coordinate, length: usize, orientation: Orientation) -> Self {
        Self {
            cells: (0..length)
                .filter_map(|offset| start.step(orientation, offset))
                .collect(),
        }
    }

    /// Check that the cells form a straight run of adjacent cells in increasing order.
    fn is_straight(&self) -> bool {
        let start = match self.cells.first() {
            Some(&start) => start,
            None => return false,
        };
        [Orientation::Horizontal, Orientation::Vertical]
            .iter()
            .any(|&orientation| {
                self.cells
                    .iter()
                    .enumerate()
                    .all(|(offset, &cell)| start.step(orientation, offset) == Some(cell))
            })
    }
}

impl From<Vec<Coordinate>> for VesselLayout {
    fn from(cells: Vec<Coordinate>) -> Self {
        Self { cells }
    }
}

/// Vessel placements for one board, produced outside the random search (for example by a
/// [`FleetSetup`][crate::board::FleetSetup]). Vessel IDs follow the order of the list.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Layout(pub Vec<VesselLayout>);

impl Layout {
    /// Capture the current vessel placements of a board.
    pub fn from_board(board: &Board) -> Self {
        Layout(
            board
                .vessels()
                .iter()
                .map(|vessel| VesselLayout::from(vessel.coords().to_vec()))
                .collect(),
        )
    }

    /// The vessels in this layout.
    pub fn vessels(&self) -> &[VesselLayout] {
        &self.0
    }

    /// Fully validate the layout against a board size and the expected vessel lengths.
    ///
    /// [`place_from_layout`] trusts its input. Layouts from untrusted sources should be
    /// checked here first.
    pub fn validate(&self, size: usize, lengths: &[usize]) -> Result<(), LayoutError> {
        if self.0.len() != lengths.len() {
            return Err(LayoutError::VesselCount {
                expected: lengths.len(),
                found: self.0.len(),
            });
        }
        let mut seen = HashSet::new();
        for (idx, (vessel, &expected)) in self.0.iter().zip(lengths).enumerate() {
            if vessel.cells.len() != expected {
                return Err(LayoutError::VesselLength {
                    idx,
                    expected,
                    found: vessel.cells.len(),
                });
            }
            for &coord in vessel.cells.iter() {
                if coord.row >= size || coord.col >= size {
                    return Err(LayoutError::OutOfBounds { idx, coord, size });
                }
                if !seen.insert(coord) {
                    return Err(LayoutError::Overlap { coord });
                }
            }
            if !vessel.is_straight() {
                return Err(LayoutError::NotStraight { idx });
            }
        }
        Ok(())
    }
}

/// Place every vessel of `layout` onto `board` as given.
///
/// This is the deterministic path used when a setup phase already chose positions. The
/// layout is trusted: overlapping cells are not detected. Cells outside the board and
/// empty vessels are still rejected, before anything is placed.
pub fn place_from_layout(board: &mut Board, layout: &Layout) -> Result<(), LayoutError> {
    for (idx, vessel) in layout.0.iter().enumerate() {
        if vessel.cells.is_empty() {
            return Err(LayoutError::EmptyVessel { idx });
        }
        if let Some(&coord) = vessel.cells.iter().find(|&&coord| !board.contains(coord)) {
            return Err(LayoutError::OutOfBounds {
                idx,
                coord,
                size: board.size(),
            });
        }
    }
    for vessel in layout.0.iter() {
        board.insert_vessel(vessel.cells.clone());
    }
    Ok(())
}

/// Randomized fleet placement with bounded retries.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PlacementEngine {
    limits: PlacementLimits,
}

impl PlacementEngine {
    /// Construct a [`PlacementEngine`] with the given retry limits.
    pub fn new(limits: PlacementLimits) -> Self {
        Self { limits }
    }

    /// The retry limits used by this engine.
    pub fn limits(&self) -> PlacementLimits {
        self.limits
    }

    /// Clear `board` and place one vessel per entry of `lengths`, in order, at random
    /// non-overlapping positions.
    ///
    /// Returns the number of board attempts used, counting the successful one. On failure
    /// the board is left empty, never partially filled.
    pub fn place_randomly<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        lengths: &[usize],
        rng: &mut R,
    ) -> Result<usize, PlacementError> {
        let size = board.size();
        if let Some(idx) = lengths.iter().position(|&length| length == 0) {
            return Err(PlacementError::ZeroLength { idx });
        }
        if let Some(&length) = lengths.iter().find(|&&length| length > size) {
            return Err(PlacementError::VesselTooLong { length, size });
        }

        for attempt in 1..=self.limits.board_attempts {
            board.clear();
            match self.place_fleet(board, lengths, rng) {
                Ok(()) => {
                    debug!(
                        "placed {} vessels on {}x{} board after {} board attempt(s)",
                        lengths.len(),
                        size,
                        size,
                        attempt
                    );
                    return Ok(attempt);
                }
                Err(length) => debug!(
                    "no room for vessel of length {} on board attempt {}, restarting",
                    length, attempt
                ),
            }
        }
        board.clear();
        Err(PlacementError::Exhausted {
            attempts: self.limits.board_attempts,
        })
    }

    /// Place every vessel in order. Returns the length of the first vessel that could not
    /// be placed.
    fn place_fleet<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        lengths: &[usize],
        rng: &mut R,
    ) -> Result<(), usize> {
        for &length in lengths {
            self.place_vessel(board, length, rng).ok_or(length)?;
        }
        Ok(())
    }

    /// Try random in-bounds starts for a single vessel until one fits or the per-vessel
    /// attempts run out.
    fn place_vessel<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        length: usize,
        rng: &mut R,
    ) -> Option<VesselId> {
        let size = board.size();
        for _ in 0..self.limits.attempts_per_vessel {
            let orientation: Orientation = rng.gen();
            let (max_row, max_col) = match orientation {
                Orientation::Horizontal => (size - 1, size - length),
                Orientation::Vertical => (size - length, size - 1),
            };
            let start = Coordinate::new(rng.gen_range(0..=max_row), rng.gen_range(0..=max_col));
            if let Ok(id) = board.place_vessel(start, length, orientation) {
                return Some(id);
            }
        }
        None
    }
}
