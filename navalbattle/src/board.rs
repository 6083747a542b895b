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

//! Types that make up the game board.

use log::trace;

use crate::ships::{Vessel, VesselId};

use self::grid::Grid;
pub use self::{
    coordinate::{Coordinate, Label, Orientation},
    errors::{CannotPlaceReason, InvalidSize, OutOfBounds, ParseCoordinateError, PlaceError},
    setup::FleetSetup,
};

mod coordinate;
mod errors;
mod grid;
pub mod setup;

/// Default width and height of a board.
pub const DEFAULT_SIZE: usize = 10;

/// Reference to a particular cell in the board.
#[derive(Debug, Copy, Clone)]
pub struct CellRef<'a> {
    /// Coordinate of this cell.
    coord: Coordinate,

    /// Whether this cell was attacked.
    attacked: bool,

    /// The vessel that occupies this cell if any.
    vessel: Option<&'a Vessel>,
}

impl<'a> CellRef<'a> {
    /// The grid coordinate of this cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// Whether this cell has been attacked previously.
    pub fn attacked(&self) -> bool {
        self.attacked
    }

    /// Whether a vessel occupies this cell.
    pub fn occupied(&self) -> bool {
        self.vessel.is_some()
    }

    /// The vessel that occupies this cell, if any.
    pub fn vessel(&self) -> Option<&'a Vessel> {
        self.vessel
    }
}

/// Result of a single attack against one cell of a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The cell had been attacked before. Nothing changed.
    AlreadyAttacked,
    /// The attack did not hit anything.
    Miss,
    /// The attack hit the given vessel, but did not sink it.
    Hit(VesselId),
    /// The attack hit the given vessel and that was its last intact cell.
    HitAndSunk(VesselId),
}

impl Outcome {
    /// Get the id of the vessel that was hit.
    pub fn vessel(&self) -> Option<VesselId> {
        match *self {
            Outcome::AlreadyAttacked | Outcome::Miss => None,
            Outcome::Hit(id) | Outcome::HitAndSunk(id) => Some(id),
        }
    }

    /// True for [`Outcome::Hit`] and [`Outcome::HitAndSunk`].
    pub fn is_hit(&self) -> bool {
        self.vessel().is_some()
    }

    /// True only for [`Outcome::HitAndSunk`].
    pub fn is_sunk(&self) -> bool {
        matches!(self, Outcome::HitAndSunk(_))
    }
}

/// A single player's board: the cells of their side of the ocean and the vessels placed on
/// it. Vessel IDs are indexes into the vessel list, and cells only store those IDs.
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid of cells occupied by vessels.
    grid: Grid,

    /// Vessels in placement order, indexed by [`VesselId`].
    vessels: Vec<Vessel>,
}

impl Board {
    /// Construct an empty `size` x `size` board. Fails if `size` is 0 or `size * size`
    /// overflows.
    pub fn new(size: usize) -> Result<Self, InvalidSize> {
        if size == 0 || size.checked_mul(size).is_none() {
            return Err(InvalidSize);
        }
        Ok(Self {
            grid: Grid::new(size),
            vessels: Vec::new(),
        })
    }

    /// Width and height of the board.
    pub fn size(&self) -> usize {
        self.grid.size
    }

    /// Check whether the coordinate lies on this board.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.grid.try_linearize(coord).is_some()
    }

    /// Check if a vessel of `length` could be placed from `start` along `orientation`
    /// without placing it.
    pub fn can_place(
        &self,
        start: Coordinate,
        length: usize,
        orientation: Orientation,
    ) -> Result<(), CannotPlaceReason> {
        self.project(start, length, orientation).map(|_| ())
    }

    /// Compute the cells a vessel would occupy, checking bounds and occupancy.
    fn project(
        &self,
        start: Coordinate,
        length: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coordinate>, CannotPlaceReason> {
        if length == 0 {
            return Err(CannotPlaceReason::ZeroLength);
        }
        let mut coords = Vec::with_capacity(length);
        for offset in 0..length {
            let coord = start
                .step(orientation, offset)
                .ok_or(CannotPlaceReason::OutOfBounds)?;
            match self.grid.get(coord) {
                None => return Err(CannotPlaceReason::OutOfBounds),
                Some(cell) if cell.vessel.is_some() => {
                    return Err(CannotPlaceReason::AlreadyOccupied)
                }
                Some(_) => coords.push(coord),
            }
        }
        Ok(coords)
    }

    /// Attempts to place a vessel of `length` consecutive cells starting at `start` and
    /// extending along `orientation`. On success the vessel gets the next sequential ID.
    /// On failure nothing is modified.
    pub fn place_vessel(
        &mut self,
        start: Coordinate,
        length: usize,
        orientation: Orientation,
    ) -> Result<VesselId, PlaceError> {
        let coords = self
            .project(start, length, orientation)
            .map_err(|reason| PlaceError::new(reason, start, length, orientation))?;
        Ok(self.insert_vessel(coords))
    }

    /// Add a vessel over the given cells without checking them for overlap. Cells must be
    /// in bounds and `coords` must be nonempty.
    pub(crate) fn insert_vessel(&mut self, coords: Vec<Coordinate>) -> VesselId {
        let id = VesselId::new(self.vessels.len());
        for &coord in coords.iter() {
            self.grid[coord].vessel = Some(id);
        }
        self.vessels.push(Vessel::new(id, coords));
        id
    }

    /// Remove the most recently placed vessel, clearing its cells. Returns `None` if no
    /// vessels are placed.
    pub(crate) fn pop_vessel(&mut self) -> Option<Vessel> {
        let vessel = self.vessels.pop()?;
        for &coord in vessel.coords() {
            let cell = &mut self.grid[coord];
            if cell.vessel == Some(vessel.id()) {
                cell.vessel = None;
            }
        }
        Some(vessel)
    }

    /// Remove every vessel and reset every cell, keeping the size.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.vessels.clear();
    }

    /// Fire at the given cell.
    ///
    /// Attacking a cell that was already attacked returns [`Outcome::AlreadyAttacked`] and
    /// changes nothing, so repeating a query is safe. Coordinates off the board are an
    /// error rather than a miss.
    pub fn attack(&mut self, coord: Coordinate) -> Result<Outcome, OutOfBounds> {
        let size = self.size();
        let cell = self
            .grid
            .get_mut(coord)
            .ok_or(OutOfBounds { coord, size })?;
        if cell.attacked {
            trace!("{} already attacked", coord.label());
            return Ok(Outcome::AlreadyAttacked);
        }
        cell.attacked = true;
        let outcome = match cell.vessel {
            None => Outcome::Miss,
            Some(id) => {
                // Cells only ever hold IDs of vessels in this board.
                if self.vessels[id.index()].hit() {
                    Outcome::HitAndSunk(id)
                } else {
                    Outcome::Hit(id)
                }
            }
        };
        trace!("attack on {}: {:?}", coord.label(), outcome);
        Ok(outcome)
    }

    /// Returns true if every vessel on this board has been sunk. A board without vessels
    /// counts as all sunk.
    pub fn all_sunk(&self) -> bool {
        self.vessels.iter().all(Vessel::sunk)
    }

    /// Number of vessels not yet sunk.
    pub fn remaining_count(&self) -> usize {
        self.vessels.iter().filter(|vessel| !vessel.sunk()).count()
    }

    /// Number of vessels that have been sunk.
    pub fn sunk_count(&self) -> usize {
        self.vessels.len() - self.remaining_count()
    }

    /// All vessels on this board, in placement order.
    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    /// Get the vessel with the specified ID if it exists.
    pub fn vessel(&self, id: VesselId) -> Option<&Vessel> {
        self.vessels.get(id.index())
    }

    /// Get a reference to the cell at the given coordinate. Returns None if the
    /// coordinate is out of bounds.
    pub fn cell(&self, coord: Coordinate) -> Option<CellRef<'_>> {
        self.grid.get(coord).map(|cell| CellRef {
            coord,
            attacked: cell.attacked,
            vessel: cell.vessel.and_then(|id| self.vessel(id)),
        })
    }

    /// Get an iterator over the rows of this board. Each row is an iterator over the cells
    /// of that row.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = CellRef<'_>> + '_> + '_ {
        let size = self.size();
        (0..size).map(move |row| {
            (0..size).map(move |col| CellRef {
                coord: Coordinate::new(row, col),
                attacked: self.grid.cells[row * size + col].attacked,
                vessel: self.grid.cells[row * size + col]
                    .vessel
                    .and_then(|id| self.vessel(id)),
            })
        })
    }

    /// Get an iterator over the coordinates of every cell that has not been attacked yet.
    pub fn unattacked(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.grid
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.attacked)
            .map(move |(idx, _)| self.grid.un_linearize(idx))
    }

    /// Render a coordinate as a letter + number label. Presentation helper only.
    pub fn coordinate_label(coord: Coordinate) -> String {
        coord.label().to_string()
    }
}

impl Default for Board {
    /// An empty board of [`DEFAULT_SIZE`].
    fn default() -> Self {
        Self {
            grid: Grid::new(DEFAULT_SIZE),
            vessels: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(Board::new(0).unwrap_err(), InvalidSize);
        assert_eq!(Board::new(1).unwrap().size(), 1);
    }

    #[test]
    fn overflowing_size_is_rejected() {
        let side = 1usize << (usize::BITS / 2);
        assert_eq!(Board::new(side).unwrap_err(), InvalidSize);
        assert_eq!(Board::new(usize::MAX).unwrap_err(), InvalidSize);
    }

    #[test]
    fn place_assigns_sequential_ids() {
        let mut board = Board::new(10).unwrap();
        let a = board.place_vessel(c(0, 0), 5, Orientation::Horizontal).unwrap();
        let b = board.place_vessel(c(1, 0), 4, Orientation::Vertical).unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(
            board.vessel(b).unwrap().coords(),
            &[c(1, 0), c(2, 0), c(3, 0), c(4, 0)]
        );
        assert_eq!(board.cell(c(0, 4)).unwrap().vessel().unwrap().id(), a);
        assert!(!board.cell(c(0, 5)).unwrap().occupied());
    }

    #[test]
    fn failed_placement_leaves_board_untouched() {
        let mut board = Board::new(10).unwrap();
        board.place_vessel(c(2, 2), 3, Orientation::Vertical).unwrap();

        let err = board
            .place_vessel(c(3, 0), 4, Orientation::Horizontal)
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::AlreadyOccupied);
        // Cells before the overlap must not have been claimed.
        assert!(!board.cell(c(3, 0)).unwrap().occupied());
        assert!(!board.cell(c(3, 1)).unwrap().occupied());

        let err = board
            .place_vessel(c(0, 8), 3, Orientation::Horizontal)
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::OutOfBounds);
        assert!(!board.cell(c(0, 8)).unwrap().occupied());

        let err = board.place_vessel(c(0, 0), 0, Orientation::Vertical).unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::ZeroLength);

        assert_eq!(board.vessels().len(), 1);
    }

    #[test]
    fn placement_fits_exactly_at_the_edge() {
        let mut board = Board::new(10).unwrap();
        assert!(board.place_vessel(c(0, 5), 5, Orientation::Horizontal).is_ok());
        assert!(board.place_vessel(c(5, 9), 5, Orientation::Vertical).is_ok());
        assert_eq!(
            board.can_place(c(6, 0), 5, Orientation::Vertical),
            Err(CannotPlaceReason::OutOfBounds)
        );
    }

    #[test]
    fn horizontal_length_three_scenario() {
        let mut board = Board::new(10).unwrap();
        let id = board.place_vessel(c(2, 3), 3, Orientation::Horizontal).unwrap();

        assert_eq!(board.attack(c(2, 3)).unwrap(), Outcome::Hit(id));
        assert_eq!(board.attack(c(2, 4)).unwrap(), Outcome::Hit(id));
        assert_eq!(board.attack(c(2, 5)).unwrap(), Outcome::HitAndSunk(id));
        assert_eq!(board.remaining_count(), 0);
        assert_eq!(board.attack(c(2, 3)).unwrap(), Outcome::AlreadyAttacked);
        assert_eq!(board.vessel(id).unwrap().hits(), 3);
        assert!(board.all_sunk());
    }

    #[test]
    fn miss_then_repeat() {
        let mut board = Board::new(10).unwrap();
        board.place_vessel(c(0, 0), 2, Orientation::Horizontal).unwrap();
        assert_eq!(board.attack(c(5, 5)).unwrap(), Outcome::Miss);
        assert_eq!(board.attack(c(5, 5)).unwrap(), Outcome::AlreadyAttacked);
        assert!(board.cell(c(5, 5)).unwrap().attacked());
        assert_eq!(board.remaining_count(), 1);
    }

    #[test]
    fn attack_out_of_bounds_is_an_error() {
        let mut board = Board::new(10).unwrap();
        let err = board.attack(c(10, 0)).unwrap_err();
        assert_eq!(err.coord, c(10, 0));
        assert_eq!(err.size, 10);
    }

    #[test]
    fn pop_vessel_frees_cells() {
        let mut board = Board::new(10).unwrap();
        board.place_vessel(c(0, 0), 3, Orientation::Horizontal).unwrap();
        let popped = board.pop_vessel().unwrap();
        assert_eq!(popped.len(), 3);
        assert!(board.vessels().is_empty());
        assert!(board.can_place(c(0, 0), 3, Orientation::Horizontal).is_ok());
        assert!(board.pop_vessel().is_none());
    }

    #[test]
    fn rows_cover_the_whole_board() {
        let mut board = Board::new(3).unwrap();
        board.place_vessel(c(1, 0), 3, Orientation::Horizontal).unwrap();
        board.attack(c(0, 0)).unwrap();
        let occupied: Vec<Vec<bool>> = board
            .rows()
            .map(|row| row.map(|cell| cell.occupied()).collect())
            .collect();
        assert_eq!(
            occupied,
            vec![
                vec![false, false, false],
                vec![true, true, true],
                vec![false, false, false],
            ]
        );
        assert_eq!(board.unattacked().count(), 8);
        assert!(board.unattacked().all(|coord| coord != c(0, 0)));
    }

    #[test]
    fn labels() {
        assert_eq!(Board::coordinate_label(c(1, 6)), "B7");
        let err = "7b".parse::<Coordinate>().unwrap_err();
        assert_eq!(err.input(), "7b");
    }
}
