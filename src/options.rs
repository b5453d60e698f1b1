//! Table configuration options.

use core::time::Duration;

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Smallest supported deck count.
pub const MIN_DECKS: u8 = 1;
/// Largest supported deck count (and shuffle point).
pub const MAX_DECKS: u8 = 8;

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use vegas::TableOptions;
///
/// let options = TableOptions::default()
///     .with_decks(6)
///     .with_shuffle_after(3)
///     .with_starting_bankroll(2_500);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Number of decks in the shoe (1..=8).
    pub decks: u8,
    /// Shuffle point: rebuild once fewer than this many decks remain.
    pub shuffle_after: u8,
    /// Whether the dealer hits soft 17 (H17).
    pub hits_soft_17: bool,
    /// Whether double down is allowed after a split (DAS).
    pub double_after_split: bool,
    /// Blackjack payout ratio (typically 1.5).
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Starting bankroll.
    pub starting_bankroll: usize,
    /// Debounce between a deal request and the actual deal.
    pub arming_delay: Duration,
    /// Pause between dealer draws.
    pub dealer_draw_delay: Duration,
    /// How long the outcome banner stays up before the table resets.
    pub outcome_delay: Duration,
    /// Pause before an auto-rebet re-arms the next deal.
    pub rebet_delay: Duration,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            decks: 8,
            shuffle_after: 2,
            hits_soft_17: true,
            double_after_split: true,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
            starting_bankroll: 1_000,
            arming_delay: Duration::from_millis(500),
            dealer_draw_delay: Duration::from_millis(700),
            outcome_delay: Duration::from_secs(4),
            rebet_delay: Duration::from_millis(350),
        }
    }
}

impl TableOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use vegas::TableOptions;
    ///
    /// let options = TableOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the shuffle point, in decks remaining.
    ///
    /// # Example
    ///
    /// ```
    /// use vegas::TableOptions;
    ///
    /// let options = TableOptions::default().with_shuffle_after(4);
    /// assert_eq!(options.shuffle_after, 4);
    /// ```
    #[must_use]
    pub const fn with_shuffle_after(mut self, shuffle_after: u8) -> Self {
        self.shuffle_after = shuffle_after;
        self
    }

    /// Sets whether the dealer hits soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use vegas::TableOptions;
    ///
    /// let options = TableOptions::default().with_hits_soft_17(false);
    /// assert_eq!(options.hits_soft_17, false);
    /// ```
    #[must_use]
    pub const fn with_hits_soft_17(mut self, hits: bool) -> Self {
        self.hits_soft_17 = hits;
        self
    }

    /// Sets whether double down is allowed after a split.
    ///
    /// # Example
    ///
    /// ```
    /// use vegas::TableOptions;
    ///
    /// let options = TableOptions::default().with_double_after_split(false);
    /// assert_eq!(options.double_after_split, false);
    /// ```
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use vegas::TableOptions;
    ///
    /// let options = TableOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use vegas::{RoundingMode, TableOptions};
    ///
    /// let options = TableOptions::default().with_rounding_blackjack(RoundingMode::Up);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the starting bankroll.
    ///
    /// # Example
    ///
    /// ```
    /// use vegas::TableOptions;
    ///
    /// let options = TableOptions::default().with_starting_bankroll(500);
    /// assert_eq!(options.starting_bankroll, 500);
    /// ```
    #[must_use]
    pub const fn with_starting_bankroll(mut self, bankroll: usize) -> Self {
        self.starting_bankroll = bankroll;
        self
    }

    /// Sets the arming debounce before a deal.
    #[must_use]
    pub const fn with_arming_delay(mut self, delay: Duration) -> Self {
        self.arming_delay = delay;
        self
    }

    /// Sets the pause between dealer draws.
    #[must_use]
    pub const fn with_dealer_draw_delay(mut self, delay: Duration) -> Self {
        self.dealer_draw_delay = delay;
        self
    }

    /// Sets how long the outcome banner is displayed.
    #[must_use]
    pub const fn with_outcome_delay(mut self, delay: Duration) -> Self {
        self.outcome_delay = delay;
        self
    }

    /// Sets the pause before an auto-rebet re-arms the deal.
    #[must_use]
    pub const fn with_rebet_delay(mut self, delay: Duration) -> Self {
        self.rebet_delay = delay;
        self
    }
}
