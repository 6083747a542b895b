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

//! Two-player match: turn order, attack history and win detection.
//!
//! A [`Match`] owns one [`Board`] per side. Each call to [`Match::attack`] is resolved
//! against the defending side's board, and the turn passes to the other side unless the
//! attack repeated a cell or ended the match. All mutation goes through `&mut self`, so a
//! match shared between threads must be wrapped in a lock by its owner.
use std::{collections::VecDeque, fmt};

use log::{debug, info, trace};
use rand::Rng;

use crate::{
    board::{Board, Coordinate, Outcome},
    config::{ConfigError, GameConfig, DEFAULT_HISTORY_WINDOW},
    placement::{place_from_layout, Layout, PlacementEngine},
    ships::VesselId,
};

pub use self::{
    errors::{AttackError, SetupError},
    snapshot::{MatchSnapshot, PlayerSnapshot},
};

mod errors;
mod snapshot;

/// One of the two participants of a match.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// Attacks first.
    First,
    /// Attacks second.
    Second,
}

impl Side {
    /// Both sides, in turn order.
    pub const BOTH: [Side; 2] = [Side::First, Side::Second];

    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Side::First => "player 1",
            Side::Second => "player 2",
        })
    }
}

/// A named participant with their board and the number of hits they have scored.
#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    board: Board,
    hits: usize,
}

impl Player {
    /// Create a player owning an already populated board.
    pub fn new(name: impl Into<String>, board: Board) -> Self {
        Self {
            name: name.into(),
            board,
            hits: 0,
        }
    }

    /// Display name of the player.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This player's own board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of attacks by this player that hit a vessel.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of this player's vessels still afloat.
    pub fn remaining(&self) -> usize {
        self.board.remaining_count()
    }
}

/// State of a match. `Complete` is final.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchStatus {
    InProgress,
    Complete { winner: Side },
}

/// Entry of the attack log.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRecord {
    /// Side that fired.
    pub side: Side,
    /// Name of the player that fired.
    pub attacker: String,
    /// Target cell.
    pub coord: Coordinate,
    /// Letter + number label of the target cell.
    pub label: String,
    /// What the attack did. Never [`Outcome::AlreadyAttacked`].
    pub outcome: Outcome,
    /// Whether the attack sank a vessel.
    pub sunk: bool,
}

/// Result of a resolved attack.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AttackResult {
    /// Side that fired.
    pub attacker: Side,
    /// Target cell.
    pub coord: Coordinate,
    /// What the attack did.
    pub outcome: Outcome,
    /// Set when this attack ended the match: the winning side and its name.
    pub winner: Option<(Side, String)>,
}

/// Notification sent to observers registered with [`Match::on_event`]. Front ends use
/// these to drive sound or animation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatchEvent {
    Miss {
        attacker: Side,
        coord: Coordinate,
    },
    Hit {
        attacker: Side,
        coord: Coordinate,
        vessel: VesselId,
    },
    Sunk {
        attacker: Side,
        coord: Coordinate,
        vessel: VesselId,
    },
    Victory {
        winner: Side,
    },
    TurnChanged {
        to: Side,
    },
}

type Observer = Box<dyn FnMut(&MatchEvent)>;

/// Handles gameplay between two players.
pub struct Match {
    /// Players indexed by [`Side`].
    players: [Player; 2],

    /// Side whose turn it currently is.
    current: Side,

    /// Attack log, most recent first.
    history: VecDeque<AttackRecord>,

    status: MatchStatus,

    /// Number of records returned by [`Match::recent_history`].
    history_window: usize,

    observers: Vec<Observer>,
}

impl Match {
    /// Start a match between two players whose boards are already populated. `first`
    /// attacks first. A player without any vessels loses on the first attack against them.
    pub fn new(first: Player, second: Player) -> Self {
        Self {
            players: [first, second],
            current: Side::First,
            history: VecDeque::new(),
            status: MatchStatus::InProgress,
            history_window: DEFAULT_HISTORY_WINDOW,
            observers: Vec::new(),
        }
    }

    /// Start a match where both fleets are placed at random according to `config`.
    pub fn random<R: Rng + ?Sized>(
        config: &GameConfig,
        first: impl Into<String>,
        second: impl Into<String>,
        rng: &mut R,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let engine = PlacementEngine::new(config.limits);
        let first = Player::new(first, random_board(config, &engine, Side::First, rng)?);
        let second = Player::new(second, random_board(config, &engine, Side::Second, rng)?);
        Ok(Self::new(first, second).with_history_window(config.history_window))
    }

    /// Start a match from layouts produced by a setup phase. Layouts are trusted; see
    /// [`Layout::validate`] for checking untrusted input first.
    pub fn from_layouts(
        config: &GameConfig,
        first: impl Into<String>,
        first_layout: &Layout,
        second: impl Into<String>,
        second_layout: &Layout,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let first = Player::new(first, layout_board(config, Side::First, first_layout)?);
        let second = Player::new(second, layout_board(config, Side::Second, second_layout)?);
        Ok(Self::new(first, second).with_history_window(config.history_window))
    }

    /// Set the number of records returned by [`Match::recent_history`]. A window of 0 is
    /// raised to 1.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window.max(1);
        self
    }

    /// Register a callback invoked for every [`MatchEvent`].
    pub fn on_event(&mut self, observer: impl FnMut(&MatchEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Get the side whose turn it currently is.
    pub fn current_side(&self) -> Side {
        self.current
    }

    /// Get the side being attacked this turn.
    pub fn defending_side(&self) -> Side {
        self.current.opponent()
    }

    /// Get the player on the given side.
    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    /// Get the player whose turn it currently is.
    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    /// Get the player being attacked this turn.
    pub fn defending_player(&self) -> &Player {
        self.player(self.defending_side())
    }

    /// Get the status of the match.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Returns `None` while the match is in progress, otherwise the winner.
    pub fn winner(&self) -> Option<Side> {
        match self.status {
            MatchStatus::InProgress => None,
            MatchStatus::Complete { winner } => Some(winner),
        }
    }

    /// All attacks so far, most recent first. Repeated attacks are not recorded.
    pub fn history(&self) -> impl Iterator<Item = &AttackRecord> + '_ {
        self.history.iter()
    }

    /// The most recent attacks, limited to the configured display window.
    pub fn recent_history(&self) -> impl Iterator<Item = &AttackRecord> + '_ {
        self.history.iter().take(self.history_window)
    }

    /// Returns true if `coord` is an unattacked cell of the defending board and the match
    /// is still in progress.
    pub fn is_attackable(&self, coord: Coordinate) -> bool {
        self.status == MatchStatus::InProgress
            && self
                .defending_player()
                .board
                .cell(coord)
                .map_or(false, |cell| !cell.attacked())
    }

    /// Fire at `coord` on the defending side's board for the side whose turn it is.
    ///
    /// A cell that was already attacked yields [`Outcome::AlreadyAttacked`] and leaves
    /// turn, hit counts and history as they were. Any other outcome is logged and either
    /// ends the match, if the defender has no vessels left, or passes the turn.
    pub fn attack(&mut self, coord: Coordinate) -> Result<AttackResult, AttackError> {
        if let MatchStatus::Complete { winner } = self.status {
            return Err(AttackError::MatchOver { winner });
        }
        let attacker = self.current;
        let defender = attacker.opponent();
        let outcome = self.players[defender.index()].board.attack(coord)?;

        let mut result = AttackResult {
            attacker,
            coord,
            outcome,
            winner: None,
        };
        let event = match outcome {
            Outcome::AlreadyAttacked => {
                trace!("{} repeated attack on {}", attacker, coord.label());
                return Ok(result);
            }
            Outcome::Miss => MatchEvent::Miss { attacker, coord },
            Outcome::Hit(vessel) => MatchEvent::Hit {
                attacker,
                coord,
                vessel,
            },
            Outcome::HitAndSunk(vessel) => MatchEvent::Sunk {
                attacker,
                coord,
                vessel,
            },
        };

        if outcome.is_hit() {
            self.players[attacker.index()].hits += 1;
        }
        self.history.push_front(AttackRecord {
            side: attacker,
            attacker: self.players[attacker.index()].name.clone(),
            coord,
            label: coord.label().to_string(),
            outcome,
            sunk: outcome.is_sunk(),
        });
        debug!("{} attacked {}: {:?}", attacker, coord.label(), outcome);
        self.emit(event);

        if self.players[defender.index()].board.all_sunk() {
            self.status = MatchStatus::Complete { winner: attacker };
            let name = self.players[attacker.index()].name.clone();
            info!("{} ({}) won after {} attacks", name, attacker, self.history.len());
            result.winner = Some((attacker, name));
            self.emit(MatchEvent::Victory { winner: attacker });
        } else {
            self.current = defender;
            self.emit(MatchEvent::TurnChanged { to: defender });
        }
        Ok(result)
    }

    /// Capture the state of the match for display or handoff.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::new(self)
    }

    fn emit(&mut self, event: MatchEvent) {
        for observer in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Match")
            .field("players", &self.players)
            .field("current", &self.current)
            .field("history", &self.history)
            .field("status", &self.status)
            .field("history_window", &self.history_window)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Allocate an empty board of the configured size.
fn empty_board(config: &GameConfig) -> Result<Board, ConfigError> {
    Board::new(config.size).map_err(|_| match config.size {
        0 => ConfigError::ZeroSize,
        size => ConfigError::SizeTooLarge { size },
    })
}

/// Build a board for `side` with its fleet placed at random.
fn random_board<R: Rng + ?Sized>(
    config: &GameConfig,
    engine: &PlacementEngine,
    side: Side,
    rng: &mut R,
) -> Result<Board, SetupError> {
    let mut board = empty_board(config)?;
    engine
        .place_randomly(&mut board, &config.lengths, rng)
        .map_err(|source| SetupError::Placement { side, source })?;
    Ok(board)
}

/// Build a board for `side` from a setup layout.
fn layout_board(config: &GameConfig, side: Side, layout: &Layout) -> Result<Board, SetupError> {
    let mut board = empty_board(config)?;
    place_from_layout(&mut board, layout).map_err(|source| SetupError::Layout { side, source })?;
    Ok(board)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::{
        board::Orientation,
        placement::VesselLayout,
    };

    fn c(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    /// Both sides get a single vessel of length 2 at the top-left corner.
    fn small_match() -> Match {
        let layout = Layout(vec![VesselLayout::straight(c(0, 0), 2, Orientation::Horizontal)]);
        Match::from_layouts(&GameConfig::default(), "Ana", &layout, "Bia", &layout).unwrap()
    }

    #[test]
    fn turns_alternate_on_hits_and_misses() {
        let mut game = small_match();
        assert_eq!(game.current_side(), Side::First);
        assert_eq!(game.defending_side(), Side::Second);

        game.attack(c(5, 5)).unwrap();
        assert_eq!(game.current_side(), Side::Second);
        game.attack(c(0, 0)).unwrap();
        assert_eq!(game.current_side(), Side::First);
        assert_eq!(game.player(Side::Second).hits(), 1);
        assert_eq!(game.player(Side::First).hits(), 0);
    }

    #[test]
    fn repeated_attack_changes_nothing() {
        let mut game = small_match();
        game.attack(c(0, 0)).unwrap();
        game.attack(c(9, 9)).unwrap();
        assert_eq!(game.current_side(), Side::First);

        let result = game.attack(c(0, 0)).unwrap();
        assert_eq!(result.outcome, Outcome::AlreadyAttacked);
        assert_eq!(game.current_side(), Side::First);
        assert_eq!(game.player(Side::First).hits(), 1);
        assert_eq!(game.history().count(), 2);
    }

    #[test]
    fn sinking_last_vessel_completes_match_without_switching() {
        let mut game = small_match();
        game.attack(c(0, 0)).unwrap();
        game.attack(c(9, 9)).unwrap();
        let result = game.attack(c(0, 1)).unwrap();
        assert!(matches!(result.outcome, Outcome::HitAndSunk(_)));
        assert_eq!(result.winner, Some((Side::First, "Ana".to_owned())));
        assert_eq!(game.status(), MatchStatus::Complete { winner: Side::First });
        assert_eq!(game.current_side(), Side::First);

        let err = game.attack(c(0, 0)).unwrap_err();
        assert_eq!(err, AttackError::MatchOver { winner: Side::First });
        assert_eq!(game.history().count(), 3);
        assert!(!game.is_attackable(c(5, 5)));
    }

    #[test]
    fn history_is_most_recent_first() {
        let mut game = small_match().with_history_window(2);
        game.attack(c(3, 3)).unwrap();
        game.attack(c(0, 1)).unwrap();
        game.attack(c(4, 4)).unwrap();

        let labels: Vec<_> = game.history().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["E5", "A2", "D4"]);
        let recent: Vec<_> = game.recent_history().map(|r| r.attacker.as_str()).collect();
        assert_eq!(recent, vec!["Ana", "Bia"]);
        let hit = game.history().nth(1).unwrap();
        assert_eq!(hit.side, Side::Second);
        assert!(!hit.sunk);
    }

    #[test]
    fn out_of_bounds_is_rejected_without_side_effects() {
        let mut game = small_match();
        assert_eq!(
            game.attack(c(10, 0)).unwrap_err(),
            AttackError::OutOfBounds(c(10, 0))
        );
        assert_eq!(game.current_side(), Side::First);
        assert_eq!(game.history().count(), 0);
    }

    #[test]
    fn attackable_cells_follow_defender() {
        let mut game = small_match();
        assert!(game.is_attackable(c(0, 0)));
        game.attack(c(0, 0)).unwrap();
        // Second side now attacks the first side's board, which is untouched.
        assert!(game.is_attackable(c(0, 0)));
        game.attack(c(2, 2)).unwrap();
        assert!(!game.is_attackable(c(0, 0)));
        assert!(!game.is_attackable(c(10, 10)));
    }

    #[test]
    fn observers_see_every_resolved_attack() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut game = small_match();
        let sink = Rc::clone(&events);
        game.on_event(move |event| sink.borrow_mut().push(*event));

        game.attack(c(0, 0)).unwrap();
        game.attack(c(0, 0)).unwrap();
        game.attack(c(0, 0)).unwrap();
        game.attack(c(0, 1)).unwrap();

        let vessel = VesselId::new(0);
        assert_eq!(
            *events.borrow(),
            vec![
                MatchEvent::Hit {
                    attacker: Side::First,
                    coord: c(0, 0),
                    vessel
                },
                MatchEvent::TurnChanged { to: Side::Second },
                MatchEvent::Hit {
                    attacker: Side::Second,
                    coord: c(0, 0),
                    vessel
                },
                MatchEvent::TurnChanged { to: Side::First },
                MatchEvent::Sunk {
                    attacker: Side::First,
                    coord: c(0, 1),
                    vessel
                },
                MatchEvent::Victory {
                    winner: Side::First
                },
            ]
        );
    }

    #[test]
    fn setup_errors_name_the_side() {
        let good = Layout(vec![VesselLayout::from(vec![c(0, 0)])]);
        let bad = Layout(vec![VesselLayout::from(vec![c(0, 10)])]);
        let err = Match::from_layouts(&GameConfig::default(), "Ana", &good, "Bia", &bad)
            .unwrap_err();
        assert!(matches!(err, SetupError::Layout { side: Side::Second, .. }));

        let mut config = GameConfig::default();
        config.size = 0;
        assert!(matches!(
            Match::from_layouts(&config, "Ana", &good, "Bia", &good),
            Err(SetupError::Config(ConfigError::ZeroSize))
        ));

        config.size = usize::MAX;
        assert!(matches!(
            Match::from_layouts(&config, "Ana", &good, "Bia", &good),
            Err(SetupError::Config(ConfigError::SizeTooLarge { .. }))
        ));
    }

    #[test]
    fn history_window_is_at_least_one() {
        let mut game = small_match().with_history_window(0);
        game.attack(c(3, 3)).unwrap();
        game.attack(c(4, 4)).unwrap();
        let recent: Vec<_> = game.recent_history().map(|r| r.label.as_str()).collect();
        assert_eq!(recent, vec!["E5"]);
        assert_eq!(game.snapshot().history.len(), 1);
    }
}
