use thiserror::Error;

use crate::round::RoundPhase;

/// Bet validation failures. The display text is what the host shows as the
/// seat's bet error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BetError {
    #[error("Bet must be a number")]
    NotANumber,
    #[error("Bet must be greater than zero")]
    NotPositive,
    #[error("Minimum bet is ${0}")]
    BelowMinimum(f64),
    #[error("Maximum bet is ${0}")]
    AboveMaximum(f64),
    #[error("Bet exceeds bankroll of ${0}")]
    ExceedsBankroll(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChipError {
    #[error("Chip amount must be a non-negative finite number")]
    InvalidAmount,
    #[error("Chip denominations must be positive")]
    ZeroDenomination,
    #[error("Denominations cannot represent {remainder} of the amount")]
    Unrepresentable { remainder: u32 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Table needs at least one deck")]
    NoDecks,
    #[error("Penetration must be between 1 and 100, got {0}")]
    Penetration(u8),
    #[error("Invalid bet limits: min {min}, max {max}")]
    BetLimits { min: f64, max: f64 },
    #[error("Table needs between 1 and {max} seats, got {got}")]
    SeatCount { got: usize, max: usize },
    #[error("Seat id {0} is used twice")]
    DuplicateSeat(u32),
    #[error("Invalid strategy table: {0}")]
    Strategy(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Bet(#[from] BetError),
    #[error(transparent)]
    Chips(#[from] ChipError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Cannot {action}: {reason}")]
    IllegalAction { action: &'static str, reason: &'static str },
    #[error("Expected {expected:?} phase, table is in {actual:?}")]
    WrongPhase { expected: RoundPhase, actual: RoundPhase },
    #[error("No seat with id {0}")]
    UnknownSeat(u32),
    #[error("Seat {0} has no bet placed")]
    MissingBet(u32),
    #[error("It is not seat {0}'s turn")]
    NotYourTurn(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
