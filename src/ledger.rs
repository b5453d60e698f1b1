//! Bankroll, chip betting, and session statistics.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::BetError;
use crate::result::{HandOutcome, HandResult};

/// Chip denominations, largest first (the normalization order).
pub const CHIP_DENOMINATIONS: [usize; 5] = [100, 50, 25, 10, 5];

/// An ordered pile of chips making up the current bet.
///
/// After every change the stack renormalizes into the canonical greedy
/// largest-denomination-first breakdown, so five $5 chips collapse into one
/// $25 chip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipStack {
    chips: Vec<usize>,
}

impl ChipStack {
    /// Creates an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { chips: Vec::new() }
    }

    /// Returns the chips, largest denominations first.
    #[must_use]
    pub fn chips(&self) -> &[usize] {
        &self.chips
    }

    /// Returns the total value of the stack.
    #[must_use]
    pub fn total(&self) -> usize {
        self.chips.iter().sum()
    }

    /// Returns the number of chips.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chips.len()
    }

    /// Returns whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    /// Adds one chip and renormalizes.
    pub fn push(&mut self, denomination: usize) {
        self.chips.push(denomination);
        self.normalize();
    }

    /// Removes the chip at `index` and renormalizes.
    pub fn remove(&mut self, index: usize) {
        self.chips.remove(index);
        self.normalize();
    }

    /// Empties the stack.
    pub fn clear(&mut self) {
        self.chips.clear();
    }

    fn normalize(&mut self) {
        let mut total = self.total();
        self.chips.clear();
        for denomination in CHIP_DENOMINATIONS {
            while total >= denomination {
                self.chips.push(denomination);
                total -= denomination;
            }
        }
    }
}

/// Session statistics across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Rounds dealt.
    pub hands: u32,
    /// Hands won (blackjacks included).
    pub wins: u32,
    /// Hands lost.
    pub losses: u32,
    /// Hands pushed.
    pub pushes: u32,
    /// Net bankroll movement across all settled hands.
    pub net: i64,
}

/// The table ledger: bankroll, current and last bet, session stats, and the
/// basic-strategy mistake counter.
///
/// The bankroll is debited by the full bet when a round is dealt and
/// credited with payouts at settlement; every debit is guarded, so it never
/// goes negative.
#[derive(Debug, Clone)]
pub struct Ledger {
    bankroll: usize,
    bet: ChipStack,
    last_bet: ChipStack,
    stats: SessionStats,
    mistakes: u32,
}

impl Ledger {
    /// Creates a ledger with the given starting bankroll.
    #[must_use]
    pub const fn new(bankroll: usize) -> Self {
        Self {
            bankroll,
            bet: ChipStack::new(),
            last_bet: ChipStack::new(),
            stats: SessionStats {
                hands: 0,
                wins: 0,
                losses: 0,
                pushes: 0,
                net: 0,
            },
            mistakes: 0,
        }
    }

    /// Returns the bankroll (bet not yet deducted before the deal).
    #[must_use]
    pub const fn bankroll(&self) -> usize {
        self.bankroll
    }

    /// Returns the bankroll minus the staged bet, the figure a table
    /// displays while chips sit in the betting circle.
    #[must_use]
    pub fn available(&self) -> usize {
        self.bankroll.saturating_sub(self.bet.total())
    }

    /// Returns the current bet stack.
    #[must_use]
    pub const fn bet(&self) -> &ChipStack {
        &self.bet
    }

    /// Returns the current bet total.
    #[must_use]
    pub fn bet_total(&self) -> usize {
        self.bet.total()
    }

    /// Returns the most recently dealt bet total.
    #[must_use]
    pub fn last_bet_total(&self) -> usize {
        self.last_bet.total()
    }

    /// Returns the session statistics.
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Returns the mistake count.
    #[must_use]
    pub const fn mistakes(&self) -> u32 {
        self.mistakes
    }

    /// Adds one chip to the bet.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown denomination, or when the chip would
    /// push the bet past the bankroll.
    pub fn add_chip(&mut self, denomination: usize) -> Result<(), BetError> {
        if !CHIP_DENOMINATIONS.contains(&denomination) {
            return Err(BetError::UnknownDenomination);
        }
        if self.bet.total() + denomination > self.bankroll {
            return Err(BetError::InsufficientFunds);
        }
        self.bet.push(denomination);
        Ok(())
    }

    /// Removes the bet chip at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if no chip sits at that index.
    pub fn remove_chip(&mut self, index: usize) -> Result<(), BetError> {
        if index >= self.bet.len() {
            return Err(BetError::NoSuchChip);
        }
        self.bet.remove(index);
        Ok(())
    }

    /// Credits funds to the bankroll. Zero amounts are ignored.
    pub const fn add_funds(&mut self, amount: usize) {
        self.bankroll += amount;
    }

    /// Remembers the current bet as the rebet target.
    pub fn save_last_bet(&mut self) {
        self.last_bet = self.bet.clone();
    }

    /// Restores the saved bet into the betting circle.
    pub fn restore_last_bet(&mut self) {
        self.bet = self.last_bet.clone();
    }

    /// Empties the betting circle.
    pub fn clear_bet(&mut self) {
        self.bet.clear();
    }

    /// Starts a round: debits the bet from the bankroll and counts the
    /// hand. Returns the debited total.
    ///
    /// The caller must have checked that the bet fits the bankroll.
    pub fn begin_round(&mut self) -> usize {
        let total = self.bet.total();
        self.bankroll = self.bankroll.saturating_sub(total);
        self.stats.hands += 1;
        total
    }

    /// Debits an additional stake (double or split).
    ///
    /// # Errors
    ///
    /// Returns an error when the bankroll cannot cover the amount.
    pub const fn debit(&mut self, amount: usize) -> Result<(), BetError> {
        if self.bankroll < amount {
            return Err(BetError::InsufficientFunds);
        }
        self.bankroll -= amount;
        Ok(())
    }

    /// Applies settled hand results: credits payouts and updates the
    /// per-hand win/loss/push tallies and the session net.
    pub fn settle(&mut self, results: &[HandResult]) {
        for result in results {
            self.bankroll += result.payout;
            match result.outcome {
                HandOutcome::Push => self.stats.pushes += 1,
                HandOutcome::Lose => self.stats.losses += 1,
                HandOutcome::Win | HandOutcome::Blackjack => self.stats.wins += 1,
            }
            #[expect(
                clippy::cast_possible_wrap,
                reason = "payout and bet values fit in i64"
            )]
            {
                self.stats.net += result.payout as i64 - result.bet as i64;
            }
        }
    }

    /// Counts one basic-strategy mistake.
    pub const fn record_mistake(&mut self) {
        self.mistakes += 1;
    }
}
