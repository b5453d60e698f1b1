//! Hi-Lo card counting.

use crate::card::{Card, DECK_SIZE};

/// Hi-Lo weight of a card: 2–6 are +1, 7–9 are 0, tens and aces are −1.
#[must_use]
pub const fn hi_lo_value(card: &Card) -> i32 {
    match card.rank {
        2..=6 => 1,
        7..=9 => 0,
        1 | 10..=13 => -1,
        _ => 0,
    }
}

/// Running-count accumulator over the cards revealed since the last shuffle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountTracker {
    running: i32,
}

impl CountTracker {
    /// Creates a tracker at a zero count.
    #[must_use]
    pub const fn new() -> Self {
        Self { running: 0 }
    }

    /// Feeds one visible card into the running count.
    ///
    /// Call this once per card that becomes face-up at the table; the hole
    /// card is observed at reveal time, not when it is dealt.
    pub const fn observe(&mut self, card: &Card) {
        self.running += hi_lo_value(card);
    }

    /// Resets the count to zero (shoe was reshuffled).
    pub const fn reset(&mut self) {
        self.running = 0;
    }

    /// Returns the running count.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.running
    }

    /// Returns the true count: running count divided by the estimated decks
    /// remaining, floored at a quarter deck to keep the ratio stable at the
    /// back of the shoe.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    pub fn true_count(&self, cards_remaining: usize) -> f64 {
        let decks_left = (cards_remaining as f64 / DECK_SIZE as f64).max(0.25);
        f64::from(self.running) / decks_left
    }
}
