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

//! Defines the cell storage of a board. Cells only carry the handle of the vessel that
//! occupies them; the vessels themselves live in the board.

use std::ops::{Index, IndexMut};

use crate::{board::Coordinate, ships::VesselId};

/// A single cell in the player's grid.
#[derive(Debug, Default, Clone)]
pub(super) struct GridCell {
    /// The ID of the vessel that occupies this cell, if any.
    pub(super) vessel: Option<VesselId>,

    /// Whether this cell has been attacked. Never reset once set.
    pub(super) attacked: bool,
}

/// Square array of cells.
#[derive(Debug, Clone)]
pub(super) struct Grid {
    /// Width and height of the grid.
    pub(super) size: usize,
    /// Cells that make up this grid, in row-major order.
    pub(super) cells: Box<[GridCell]>,
}

impl Grid {
    /// Allocate an empty `size` x `size` grid. Callers check that `size` is nonzero and
    /// that `size * size` does not overflow.
    pub(super) fn new(size: usize) -> Self {
        let cells = (0..size * size).map(|_| GridCell::default()).collect();
        Self { size, cells }
    }

    /// Convert a coordinate to an index into `cells`, or `None` if it is out of bounds.
    pub(super) fn try_linearize(&self, coord: Coordinate) -> Option<usize> {
        if coord.row < self.size && coord.col < self.size {
            Some(coord.row * self.size + coord.col)
        } else {
            None
        }
    }

    /// Convert an index into `cells` back into a coordinate.
    pub(super) fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate::new(idx / self.size, idx % self.size)
    }

    /// Get a reference to the cell at the given [`Coordinate`].
    pub(super) fn get(&self, coord: Coordinate) -> Option<&GridCell> {
        self.try_linearize(coord).and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(super) fn get_mut(&mut self, coord: Coordinate) -> Option<&mut GridCell> {
        self.try_linearize(coord)
            .and_then(move |i| self.cells.get_mut(i))
    }

    /// Reset every cell to empty and unattacked.
    pub(super) fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = GridCell::default();
        }
    }
}

impl Index<Coordinate> for Grid {
    type Output = GridCell;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}
