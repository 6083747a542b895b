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

//! Engine for the classic two-player game of Battleship.
//!
//! [`board`] holds a single player's side of the ocean: the cells, the vessels placed on
//! it and attack resolution. [`placement`] fills boards either from a [`Layout`] produced
//! by a setup phase ([`board::FleetSetup`]) or at random. [`game`] ties two boards into a
//! [`Match`] with turns, history and a winner.
//!
//! ```
//! use navalbattle::{Coordinate, GameConfig, Match};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let mut game = Match::random(&GameConfig::default(), "Ana", "Bia", &mut rng).unwrap();
//! let result = game.attack(Coordinate::new(0, 0)).unwrap();
//! println!("{} fired at A1: {:?}", game.player(result.attacker).name(), result.outcome);
//! ```
//!
//! The crate logs through the [`log`] facade and never installs a logger itself.

pub mod board;
pub mod config;
pub mod game;
pub mod placement;
pub mod ships;

pub use crate::{
    board::{Board, Coordinate, Orientation, Outcome},
    config::{GameConfig, PlacementLimits},
    game::{AttackError, AttackResult, Match, MatchEvent, MatchStatus, Player, Side},
    placement::{place_from_layout, Layout, PlacementEngine, PlacementError, VesselLayout},
    ships::{Vessel, VesselId},
};
