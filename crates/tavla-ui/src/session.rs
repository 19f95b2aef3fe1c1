use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::Player;

/// Supplies face values for a roll. Trajectories never feed into it.
pub trait DieValueSource {
    fn roll(&mut self) -> [u8; 2];
}

/// Two independent uniform draws from `1..=6`.
pub struct RandomDice<R: Rng = SmallRng> {
    rng: R,
}

impl RandomDice<SmallRng> {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDice<SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> DieValueSource for RandomDice<R> {
    fn roll(&mut self) -> [u8; 2] {
        [self.rng.random_range(1..=6), self.rng.random_range(1..=6)]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionError {
    RollNotAllowed,
    NothingToUndo,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::RollNotAllowed => f.write_str("dice were already rolled this turn"),
            SessionError::NothingToUndo => f.write_str("there is no roll to undo"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Turn and roll state behind the control bar.
pub struct GameSession<S: DieValueSource = RandomDice> {
    source: S,
    current_turn: Player,
    dice: Option<[u8; 2]>,
    undo_dice: Option<Option<[u8; 2]>>,
    can_roll: bool,
}

impl GameSession<RandomDice> {
    pub fn new() -> Self {
        Self::with_source(RandomDice::new())
    }
}

impl Default for GameSession<RandomDice> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DieValueSource> GameSession<S> {
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            current_turn: Player::One,
            dice: None,
            undo_dice: None,
            can_roll: true,
        }
    }

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn dice(&self) -> Option<[u8; 2]> {
        self.dice
    }

    pub fn can_roll(&self) -> bool {
        self.can_roll
    }

    pub fn can_undo(&self) -> bool {
        self.undo_dice.is_some()
    }

    /// Draws a fresh pair. Allowed once per turn until undone.
    pub fn roll(&mut self) -> Result<[u8; 2], SessionError> {
        if !self.can_roll {
            return Err(SessionError::RollNotAllowed);
        }
        let values = self.source.roll();
        self.undo_dice = Some(self.dice.replace(values));
        self.can_roll = false;
        log::info!("{:?} rolled {}-{}", self.current_turn, values[0], values[1]);
        Ok(values)
    }

    /// Reverts the last roll.
    pub fn undo(&mut self) -> Result<(), SessionError> {
        let previous = self.undo_dice.take().ok_or(SessionError::NothingToUndo)?;
        self.dice = previous;
        self.can_roll = true;
        log::debug!("{:?} undid their roll", self.current_turn);
        Ok(())
    }

    /// Hands the dice to the other player.
    pub fn end_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
        self.undo_dice = None;
        self.can_roll = true;
    }
}
