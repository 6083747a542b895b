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

//! Types used for defining vessels and the classes they are built from.
use std::fmt;

use crate::board::Coordinate;

/// Handle to a vessel within a single board. Handles are assigned sequentially from zero
/// in placement order and double as the vessel's index in the board's vessel list.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VesselId(usize);

impl VesselId {
    pub(crate) fn new(idx: usize) -> Self {
        VesselId(idx)
    }

    /// Index of the vessel in its board's vessel list.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vessel placed on a board: its cells plus a counter of how many of them were hit.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Vessel {
    id: VesselId,
    coords: Vec<Coordinate>,
    hits: usize,
}

impl Vessel {
    /// Callers guarantee `coords` is nonempty.
    pub(crate) fn new(id: VesselId, coords: Vec<Coordinate>) -> Self {
        debug_assert!(!coords.is_empty());
        Self {
            id,
            coords,
            hits: 0,
        }
    }

    /// Get the ID of the vessel.
    pub fn id(&self) -> VesselId {
        self.id
    }

    /// Number of cells the vessel occupies.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// The cells this vessel occupies, in placement order.
    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    /// Number of distinct cells of this vessel that were hit.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Check if this vessel has been sunk.
    pub fn sunk(&self) -> bool {
        self.hits == self.coords.len()
    }

    /// Record a hit. Returns `true` if the vessel is now sunk.
    pub(crate) fn hit(&mut self) -> bool {
        debug_assert!(self.hits < self.coords.len());
        if self.hits < self.coords.len() {
            self.hits += 1;
        }
        self.sunk()
    }
}

/// A named kind of ship with a fixed length, used by the fleet setup.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ShipClass {
    name: &'static str,
    length: usize,
}

impl ShipClass {
    /// Create a new ship class. Panics if `length` is 0.
    pub const fn new(name: &'static str, length: usize) -> Self {
        assert!(length > 0);
        Self { name, length }
    }

    /// Display name of the class.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of cells a ship of this class occupies.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name)
    }
}

/// Carrier: length 5.
pub const CARRIER: ShipClass = ShipClass::new("Carrier", 5);
/// Battleship: length 4.
pub const BATTLESHIP: ShipClass = ShipClass::new("Battleship", 4);
/// Submarine: length 3.
pub const SUBMARINE: ShipClass = ShipClass::new("Submarine", 3);
/// Cruiser: length 3.
pub const CRUISER: ShipClass = ShipClass::new("Cruiser", 3);
/// Destroyer: length 2.
pub const DESTROYER: ShipClass = ShipClass::new("Destroyer", 2);

/// The standard fleet, in placement order.
pub const STANDARD_FLEET: [ShipClass; 5] = [CARRIER, BATTLESHIP, SUBMARINE, CRUISER, DESTROYER];

/// Lengths of the standard fleet, in placement order.
pub const STANDARD_LENGTHS: [usize; 5] = [5, 4, 3, 3, 2];
