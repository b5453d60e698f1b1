//! Error types for table operations.
//!
//! Every rejected intent leaves the engine untouched; hosts that want the
//! silently-ignoring button surface of a real table UI can discard these
//! values.

use thiserror::Error;

/// Errors that can occur while building a bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// The chip denomination is not in the tray.
    #[error("unknown chip denomination")]
    UnknownDenomination,
    /// The bet would exceed the bankroll.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// No chip at the given index.
    #[error("no chip at that index")]
    NoSuchChip,
    /// Bets can only change before the deal.
    #[error("round in progress")]
    RoundInProgress,
}

/// Errors that can occur when requesting a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid table phase for dealing.
    #[error("invalid phase for dealing")]
    InvalidPhase,
    /// No chips in the betting circle.
    #[error("no bet placed")]
    EmptyBet,
    /// The bet exceeds the bankroll.
    #[error("insufficient funds")]
    InsufficientFunds,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid table phase for this action.
    #[error("invalid phase for this action")]
    InvalidPhase,
    /// The active hand has already finished.
    #[error("hand is not active")]
    HandNotActive,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Only one split per round.
    #[error("hand has already been split")]
    AlreadySplit,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
}

/// Errors that can occur when reconfiguring the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Deck count or shuffle point outside 1..=8.
    #[error("value outside the supported range")]
    OutOfRange,
    /// The shoe cannot change under a live round.
    #[error("round in progress")]
    RoundInProgress,
}
