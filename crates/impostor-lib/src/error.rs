use thiserror::Error;

use crate::game_state::{CardState, Phase};

pub type GameResult<T> = Result<T, GameError>;

/// Reason an operation on the game was rejected. A rejected operation never changes state.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid precondition: {0}")]
    InvalidPrecondition(#[from] Precondition),
    #[error("Constraint violated: {0}")]
    ConstraintViolation(#[from] Constraint),
}

impl GameError {
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::InvalidPrecondition(_))
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

/// An operation was called outside of the phase or card state it is valid in.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Precondition {
    #[error("{action} requires phase {expected:?} but the game is in {found:?}")]
    Phase {
        action: &'static str,
        expected: Phase,
        found: Phase,
    },
    #[error("{action} requires the card to be {expected:?} but it is {found:?}")]
    Card {
        action: &'static str,
        expected: CardState,
        found: CardState,
    },
}

/// An operation was called in a valid state, but with arguments (or a roster) it can't accept.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    #[error("Player name is blank")]
    BlankName,
    #[error("Player '{0}' is already in the roster")]
    DuplicateName(String),
    #[error("Roster is full ({max} players)")]
    RosterFull { max: usize },
    #[error("At least {min} players are needed, only {count} joined")]
    NotEnoughPlayers { count: usize, min: usize },
    #[error("At most {max} players can play, {count} joined")]
    TooManyPlayers { count: usize, max: usize },
    #[error("At least one category must stay enabled")]
    LastCategory,
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("None of the enabled categories exist in the catalog")]
    NoEnabledCategories,
    #[error("{0} minutes is not an available round length")]
    InvalidDuration(u32),
    #[error("Roster limits of {min} to {max} players are invalid")]
    InvalidLimits { min: usize, max: usize },
}
