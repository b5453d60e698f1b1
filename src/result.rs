//! Round settlement results.

extern crate alloc;

use alloc::vec::Vec;

/// Outcome of a single hand at settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has the higher total).
    Win,
    /// Player loses (player busts or dealer has the higher total).
    Lose,
    /// Push (tie).
    Push,
    /// Player has a natural blackjack.
    Blackjack,
}

/// Settlement detail for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// The hand index (1 is the second hand of a split).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The bet riding on this hand (doubles included).
    pub bet: usize,
    /// The amount credited back to the bankroll (stake included).
    pub payout: usize,
    /// The player's final total.
    pub player_value: u8,
}

/// Settlement summary for the whole round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    /// Per-hand results, in lane order.
    pub hands: Vec<HandResult>,
    /// The dealer's final total.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had a natural blackjack.
    pub dealer_blackjack: bool,
    /// Net bankroll movement for the round: Σ(payout − bet).
    pub net: i64,
}
