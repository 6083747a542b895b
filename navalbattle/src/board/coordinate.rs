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

//! Coordinates and orientations on a square board.
use std::{fmt, str::FromStr};

use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::board::ParseCoordinateError;

/// The coordinates of a cell in the board. Both axes are 0-indexed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Vertical position of the cell.
    pub row: usize,
    /// Horizontal position of the cell.
    pub col: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `row` and `col`.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Get the coordinate `offset` steps away from this one along `orientation`. Returns
    /// `None` on overflow.
    pub fn step(self, orientation: Orientation, offset: usize) -> Option<Self> {
        match orientation {
            Orientation::Horizontal => self.col.checked_add(offset).map(|col| Self { col, ..self }),
            Orientation::Vertical => self.row.checked_add(offset).map(|row| Self { row, ..self }),
        }
    }

    /// Get a display helper that renders this coordinate as a letter + number label, such
    /// as `C4` for row 2, column 3.
    pub fn label(self) -> Label {
        Label(self)
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(row, col)` pair.
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into a `(row, col)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}

/// Display helper for the letter + number form of a [`Coordinate`].
///
/// Rows past `Z` continue through the following code points (`'A' + row`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Label(Coordinate);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let row = (b'A' as usize)
            .checked_add(self.0.row)
            .and_then(|r| std::char::from_u32(r as u32))
            .unwrap_or('?');
        f.pad(&format!("{}{}", row, self.0.col.saturating_add(1)))
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    /// Parse a label such as `C4` or `c4` back into a [`Coordinate`]. Only single-letter
    /// rows are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(|| ParseCoordinateError::new(s))?;
        let col: usize = chars
            .as_str()
            .parse()
            .map_err(|_| ParseCoordinateError::new(s))?;
        if col == 0 {
            return Err(ParseCoordinateError::new(s));
        }
        let row = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
        Ok(Self::new(row, col - 1))
    }
}

/// Direction a vessel extends in from its starting cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Columns increase along the vessel.
    Horizontal,
    /// Rows increase along the vessel.
    Vertical,
}

impl Orientation {
    /// Get the other orientation.
    pub fn rotated(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Horizontal
    }
}

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_uses_letter_row_and_one_based_column() {
        assert_eq!(Coordinate::new(0, 0).label().to_string(), "A1");
        assert_eq!(Coordinate::new(2, 3).label().to_string(), "C4");
        assert_eq!(Coordinate::new(9, 9).label().to_string(), "J10");
    }

    #[test]
    fn parse_label() {
        assert_eq!("C4".parse::<Coordinate>().unwrap(), Coordinate::new(2, 3));
        assert_eq!(" j10 ".parse::<Coordinate>().unwrap(), Coordinate::new(9, 9));
        assert!("4C".parse::<Coordinate>().is_err());
        assert!("A0".parse::<Coordinate>().is_err());
        assert!("A".parse::<Coordinate>().is_err());
        assert!("".parse::<Coordinate>().is_err());
    }

    #[test]
    fn step_along_orientation() {
        let start = Coordinate::new(2, 3);
        assert_eq!(start.step(Orientation::Horizontal, 2), Some(Coordinate::new(2, 5)));
        assert_eq!(start.step(Orientation::Vertical, 2), Some(Coordinate::new(4, 3)));
        assert_eq!(
            Coordinate::new(0, usize::max_value()).step(Orientation::Horizontal, 1),
            None
        );
    }
}
