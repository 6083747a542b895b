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

//! Game configuration: board size, fleet lengths and placement retry limits.
use thiserror::Error;

use crate::{board::DEFAULT_SIZE, ships::STANDARD_LENGTHS};

/// Number of random placements tried for a single vessel before the whole board is
/// restarted.
pub const DEFAULT_ATTEMPTS_PER_VESSEL: usize = 100;

/// Number of times the whole board is restarted before random placement gives up.
pub const DEFAULT_BOARD_ATTEMPTS: usize = 10;

/// Number of attack records shown by front ends.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Retry bounds for randomized placement.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementLimits {
    /// Random placements tried per vessel before restarting the board.
    pub attempts_per_vessel: usize,
    /// Full-board attempts before failing.
    pub board_attempts: usize,
}

impl Default for PlacementLimits {
    fn default() -> Self {
        Self {
            attempts_per_vessel: DEFAULT_ATTEMPTS_PER_VESSEL,
            board_attempts: DEFAULT_BOARD_ATTEMPTS,
        }
    }
}

/// Settings shared by both sides of a match.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Width and height of each board.
    pub size: usize,
    /// Lengths of the vessels each side places, in placement order.
    pub lengths: Vec<usize>,
    /// Retry bounds for random placement.
    pub limits: PlacementLimits,
    /// Number of most recent attacks front ends should display.
    pub history_window: usize,
}

impl GameConfig {
    /// Check that the configuration describes a playable game. This does not check that
    /// the fleet actually fits; random placement reports that on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.size.checked_mul(self.size).is_none() {
            return Err(ConfigError::SizeTooLarge { size: self.size });
        }
        if self.lengths.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        if let Some(idx) = self.lengths.iter().position(|&len| len == 0) {
            return Err(ConfigError::ZeroLength { idx });
        }
        if let Some(&length) = self.lengths.iter().find(|&&len| len > self.size) {
            return Err(ConfigError::VesselTooLong {
                length,
                size: self.size,
            });
        }
        if self.limits.attempts_per_vessel == 0 || self.limits.board_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if self.history_window == 0 {
            return Err(ConfigError::ZeroHistoryWindow);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    /// The classic game: a 10x10 board and the five standard ships.
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            lengths: STANDARD_LENGTHS.to_vec(),
            limits: PlacementLimits::default(),
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

/// Reason a [`GameConfig`] was rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("board size must be nonzero")]
    ZeroSize,
    #[error("board size {size} is too large")]
    SizeTooLarge { size: usize },
    #[error("at least one vessel length is required")]
    EmptyFleet,
    #[error("vessel {idx} has length 0")]
    ZeroLength { idx: usize },
    #[error("vessel of length {length} cannot fit on a {size}x{size} board")]
    VesselTooLong { length: usize, size: usize },
    #[error("placement retry limits must be nonzero")]
    ZeroAttempts,
    #[error("history window must be nonzero")]
    ZeroHistoryWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.size, 10);
        assert_eq!(config.lengths, vec![5, 4, 3, 3, 2]);
        assert_eq!(config.limits.attempts_per_vessel, 100);
        assert_eq!(config.limits.board_attempts, 10);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_unplayable_configs() {
        let mut config = GameConfig::default();
        config.size = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSize));

        let mut config = GameConfig::default();
        config.size = usize::MAX;
        assert_eq!(
            config.validate(),
            Err(ConfigError::SizeTooLarge { size: usize::MAX })
        );

        let mut config = GameConfig::default();
        config.lengths.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyFleet));

        let mut config = GameConfig::default();
        config.lengths = vec![3, 0];
        assert_eq!(config.validate(), Err(ConfigError::ZeroLength { idx: 1 }));

        let mut config = GameConfig::default();
        config.size = 4;
        assert_eq!(
            config.validate(),
            Err(ConfigError::VesselTooLong { length: 5, size: 4 })
        );

        let mut config = GameConfig::default();
        config.history_window = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroHistoryWindow));
    }
}
