//! The presentation adapter interface.
//!
//! The engine depends on this capability trait instead of a UI: cards,
//! totals, counts, and outcomes are pushed out through it, and pacing is
//! delegated to the host by asking it to schedule timer tokens. Every
//! method has a no-op default, so a headless adapter for tests or
//! simulation is a one-liner.

use core::time::Duration;

use crate::card::Card;
use crate::engine::TimerToken;
use crate::ledger::SessionStats;
use crate::result::RoundSummary;
use crate::strategy::Advice;

/// Identifies a hand at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandId {
    /// The dealer's hand.
    Dealer,
    /// A player lane (0, or 1 after a split).
    Player(usize),
}

/// Which action buttons are currently legal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet {
    /// Deal is available.
    pub deal: bool,
    /// Hit is available.
    pub hit: bool,
    /// Stand is available.
    pub stand: bool,
    /// Double down is available.
    pub double: bool,
    /// Split is available.
    pub split: bool,
}

impl ActionSet {
    /// The everything-disabled set.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            deal: false,
            hit: false,
            stand: false,
            double: false,
            split: false,
        }
    }
}

/// Outbound interface from the engine to the table presentation.
///
/// Implementations render state changes however they like; the engine never
/// reads anything back. [`schedule`](TableView::schedule) is the one method
/// with behavior the round flow depends on: the host must arrange for
/// [`Engine::timer_fired`](crate::Engine::timer_fired) to be called with the
/// token after the delay. Stale tokens are harmless — the engine discards
/// them — so a host may fire them late or not at all once a round has been
/// torn down.
pub trait TableView {
    /// A card was dealt to `hand`. Face-down cards show their back.
    fn card_dealt(&mut self, hand: HandId, card: Card, face_up: bool) {
        let _ = (hand, card, face_up);
    }

    /// The dealer's hole card was turned over.
    fn hole_revealed(&mut self, card: Card) {
        let _ = card;
    }

    /// A hand's total changed. The dealer reports the upcard value until
    /// the hole is revealed.
    fn total_changed(&mut self, hand: HandId, total: u8) {
        let _ = (hand, total);
    }

    /// The spotlight moved to another player lane.
    fn active_hand_changed(&mut self, hand: usize) {
        let _ = hand;
    }

    /// Button enablement changed.
    fn actions_changed(&mut self, actions: ActionSet) {
        let _ = actions;
    }

    /// The betting circle changed.
    fn bet_changed(&mut self, chips: &[usize], total: usize) {
        let _ = (chips, total);
    }

    /// Spendable funds changed (bankroll minus the staged bet).
    fn bankroll_changed(&mut self, available: usize) {
        let _ = available;
    }

    /// The running or true count changed.
    fn count_changed(&mut self, running: i32, true_count: f64) {
        let _ = (running, true_count);
    }

    /// Session statistics changed.
    fn stats_changed(&mut self, stats: &SessionStats) {
        let _ = stats;
    }

    /// The mistake counter changed; `expected` carries the advice the
    /// player ignored when a settled round had a mistake to flash.
    fn mistakes_changed(&mut self, count: u32, expected: Option<Advice>) {
        let _ = (count, expected);
    }

    /// The strategy hint changed (`None` when hidden or not applicable).
    fn advice_changed(&mut self, advice: Option<Advice>) {
        let _ = advice;
    }

    /// The active hand was split; `moved_card` now heads the second lane.
    fn hand_split(&mut self, moved_card: Card) {
        let _ = moved_card;
    }

    /// The round settled; show the outcome banner.
    fn round_settled(&mut self, summary: &RoundSummary) {
        let _ = summary;
    }

    /// The outcome banner expired and the table reset for betting.
    fn outcome_cleared(&mut self) {}

    /// An intent was refused for lack of funds.
    fn insufficient_funds(&mut self) {}

    /// The shoe was rebuilt and the count restarted.
    fn shoe_reshuffled(&mut self) {}

    /// Ask the host to call
    /// [`Engine::timer_fired`](crate::Engine::timer_fired) with `token`
    /// after `delay`.
    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        let _ = (token, delay);
    }
}

/// A view that ignores everything, for headless use.
///
/// Note that `NullView` also swallows [`TableView::schedule`], so timed
/// transitions (the armed deal, dealer draws, the outcome reset) never fire
/// on their own; drive them manually or use a scheduling view.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl TableView for NullView {}
