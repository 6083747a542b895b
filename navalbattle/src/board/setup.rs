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

//! Implements the setup phase of a board: placing a named fleet one ship at a time.
use log::debug;
use rand::Rng;

use crate::{
    board::{Board, CannotPlaceReason, Coordinate, InvalidSize, Orientation, PlaceError},
    placement::{Layout, PlacementEngine, PlacementError},
    ships::{ShipClass, VesselId, STANDARD_FLEET},
};

/// Cells a ship would cover if placed at a given start, and whether that placement is
/// allowed. Cells off the board are left out.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Preview {
    /// Cells the ship would cover that lie on the board.
    pub cells: Vec<Coordinate>,
    /// `Ok` if the ship can be placed here.
    pub valid: Result<(), CannotPlaceReason>,
}

/// Setup phase for a [`Board`]. Ships are placed in the order of the fleet, one at a time,
/// using the currently selected orientation.
#[derive(Debug, Clone)]
pub struct FleetSetup {
    /// Board the ships are being placed into.
    board: Board,

    /// Ships to place, in order.
    fleet: Vec<ShipClass>,

    /// Orientation used for the next placement.
    orientation: Orientation,
}

impl FleetSetup {
    /// Begin setup of a `size` x `size` board for the given fleet.
    pub fn new(size: usize, fleet: Vec<ShipClass>) -> Result<Self, InvalidSize> {
        Ok(Self {
            board: Board::new(size)?,
            fleet,
            orientation: Orientation::Horizontal,
        })
    }

    /// Begin setup of a standard 10x10 board with the standard fleet.
    pub fn standard() -> Self {
        Self {
            board: Board::default(),
            fleet: STANDARD_FLEET.to_vec(),
            orientation: Orientation::Horizontal,
        }
    }

    /// The board as placed so far.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All ships in the fleet, in placement order.
    pub fn fleet(&self) -> &[ShipClass] {
        &self.fleet
    }

    /// Number of ships placed so far.
    pub fn placed(&self) -> usize {
        self.board.vessels().len()
    }

    /// The next ship to place, or `None` if every ship is placed.
    pub fn current(&self) -> Option<ShipClass> {
        self.fleet.get(self.placed()).copied()
    }

    /// Ships that still need to be placed.
    pub fn pending(&self) -> &[ShipClass] {
        &self.fleet[self.placed()..]
    }

    /// Returns `true` once every ship in the fleet is placed.
    pub fn is_ready(&self) -> bool {
        self.placed() == self.fleet.len()
    }

    /// Orientation the next ship will be placed with.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Switch between horizontal and vertical placement.
    pub fn toggle_orientation(&mut self) -> Orientation {
        self.orientation = self.orientation.rotated();
        self.orientation
    }

    /// Select the orientation used for the next placement.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Show where the current ship would go if placed at `start`. Returns `None` when every
    /// ship is already placed.
    pub fn preview(&self, start: Coordinate) -> Option<Preview> {
        let class = self.current()?;
        let cells = (0..class.length())
            .filter_map(|offset| start.step(self.orientation, offset))
            .filter(|&coord| self.board.contains(coord))
            .collect();
        Some(Preview {
            cells,
            valid: self
                .board
                .can_place(start, class.length(), self.orientation),
        })
    }

    /// Place the current ship at `start` with the selected orientation and move on to the
    /// next one. Returns `Ok(None)` if every ship was already placed.
    pub fn place(&mut self, start: Coordinate) -> Result<Option<VesselId>, PlaceError> {
        let class = match self.current() {
            Some(class) => class,
            None => return Ok(None),
        };
        let id = self
            .board
            .place_vessel(start, class.length(), self.orientation)?;
        debug!("placed {} at {} ({})", class, start.label(), self.orientation);
        Ok(Some(id))
    }

    /// Take back the most recently placed ship. Returns its class, or `None` if nothing was
    /// placed.
    pub fn undo(&mut self) -> Option<ShipClass> {
        self.board.pop_vessel()?;
        self.current()
    }

    /// Remove every placed ship.
    pub fn clear(&mut self) {
        self.board.clear();
    }

    /// Discard the current placements and place the whole fleet at random.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        engine: &PlacementEngine,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        let lengths: Vec<_> = self.fleet.iter().map(ShipClass::length).collect();
        engine
            .place_randomly(&mut self.board, &lengths, rng)
            .map(|_| ())
    }

    /// Export the placements made so far.
    pub fn layout(&self) -> Layout {
        Layout::from_board(&self.board)
    }

    /// Finish setup, returning the board if every ship is placed and `self` otherwise.
    pub fn finish(self) -> Result<Board, Self> {
        if self.is_ready() {
            Ok(self.board)
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::ships::{BATTLESHIP, CARRIER, DESTROYER};

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn places_ships_in_fleet_order() {
        let mut setup = FleetSetup::new(10, vec![CARRIER, DESTROYER]).unwrap();
        assert_eq!(setup.current(), Some(CARRIER));
        setup.place(c(0, 0)).unwrap();
        assert_eq!(setup.current(), Some(DESTROYER));
        setup.toggle_orientation();
        setup.place(c(1, 0)).unwrap();
        assert!(setup.is_ready());
        assert_eq!(setup.place(c(5, 5)), Ok(None));

        let layout = setup.layout();
        assert_eq!(layout.vessels()[1].cells, vec![c(1, 0), c(2, 0)]);
        assert_eq!(layout.validate(10, &[5, 2]), Ok(()));
    }

    #[test]
    fn rejected_placement_keeps_current_ship() {
        let mut setup = FleetSetup::new(10, vec![CARRIER, BATTLESHIP]).unwrap();
        setup.place(c(0, 0)).unwrap();
        let err = setup.place(c(0, 2)).unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::AlreadyOccupied);
        assert_eq!(setup.current(), Some(BATTLESHIP));
    }

    #[test]
    fn preview_clips_to_board() {
        let setup = FleetSetup::new(10, vec![CARRIER]).unwrap();
        let preview = setup.preview(c(0, 7)).unwrap();
        assert_eq!(preview.cells, vec![c(0, 7), c(0, 8), c(0, 9)]);
        assert_eq!(preview.valid, Err(CannotPlaceReason::OutOfBounds));
        assert_eq!(setup.preview(c(0, 0)).unwrap().valid, Ok(()));
    }

    #[test]
    fn undo_and_clear() {
        let mut setup = FleetSetup::standard();
        setup.place(c(0, 0)).unwrap();
        setup.place(c(1, 0)).unwrap();
        assert_eq!(setup.undo(), Some(BATTLESHIP));
        assert_eq!(setup.placed(), 1);
        setup.clear();
        assert_eq!(setup.placed(), 0);
        assert_eq!(setup.undo(), None);
        assert!(setup.finish().is_err());
    }

    #[test]
    fn randomize_places_whole_fleet() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut setup = FleetSetup::standard();
        setup.place(c(9, 0)).unwrap();
        setup
            .randomize(&PlacementEngine::default(), &mut rng)
            .unwrap();
        assert!(setup.is_ready());
        let board = setup.finish().unwrap();
        assert_eq!(board.vessels().len(), 5);
    }
}
