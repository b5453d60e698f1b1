//! The round engine: table state and the phase machine.

use alloc::vec::Vec;

use core::time::Duration;

use crate::card::Card;
use crate::count::CountTracker;
use crate::error::ConfigError;
use crate::hand::{DealerHand, Hand};
use crate::ledger::Ledger;
use crate::options::{MAX_DECKS, MIN_DECKS, TableOptions};
use crate::shoe::Shoe;
use crate::strategy::{Advice, advise};
use crate::view::{ActionSet, HandId, TableView};

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::{Phase, TimerKind, TimerToken};

/// A single-seat blackjack table engine.
///
/// The engine owns the shoe, the count, the ledger, and all round state,
/// and pushes every observable change into the injected [`TableView`].
/// All transitions are driven by discrete calls — player intents and
/// [`timer_fired`](Engine::timer_fired) — and run to completion before
/// returning; the engine itself never blocks or sleeps.
pub struct Engine<V> {
    pub(super) options: TableOptions,
    pub(super) shoe: Shoe,
    pub(super) count: CountTracker,
    pub(super) ledger: Ledger,
    pub(super) phase: Phase,
    pub(super) dealer: DealerHand,
    pub(super) hands: Vec<Hand>,
    pub(super) active_hand: usize,
    pub(super) is_split: bool,
    pub(super) hint_enabled: bool,
    pub(super) auto_rebet: bool,
    /// Advice the player ignored this round, flashed at settlement.
    pub(super) round_mistake: Option<Advice>,
    pub(super) timer_generation: u64,
    pub(super) view: V,
}

impl<V: TableView> Engine<V> {
    /// Creates an engine with a freshly shuffled shoe and the configured
    /// starting bankroll.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use vegas::{Engine, NullView, TableOptions};
    ///
    /// let engine = Engine::new(TableOptions::default(), 42, NullView);
    /// let _ = engine;
    /// ```
    #[must_use]
    pub fn new(options: TableOptions, seed: u64, view: V) -> Self {
        let shoe = Shoe::new(options.decks, options.shuffle_after, seed);
        let ledger = Ledger::new(options.starting_bankroll);

        Self {
            options,
            shoe,
            count: CountTracker::new(),
            ledger,
            phase: Phase::Betting,
            dealer: DealerHand::new(),
            hands: Vec::new(),
            active_hand: 0,
            is_split: false,
            hint_enabled: false,
            auto_rebet: false,
            round_mistake: None,
            timer_generation: 0,
            view,
        }
    }

    /// Returns the current table phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the ledger.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Returns the player hands for the current round (empty between
    /// rounds).
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the index of the hand holding the spotlight.
    #[must_use]
    pub const fn active_hand(&self) -> usize {
        self.active_hand
    }

    /// Returns whether this round has been split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        self.is_split
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer_hand(&self) -> &DealerHand {
        &self.dealer
    }

    /// Returns the running Hi-Lo count.
    #[must_use]
    pub const fn running_count(&self) -> i32 {
        self.count.running_count()
    }

    /// Returns the true count for the current shoe depth.
    #[must_use]
    pub fn true_count(&self) -> f64 {
        self.count.true_count(self.shoe.cards_remaining())
    }

    /// Returns the number of cards left in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.shoe.cards_remaining()
    }

    /// Returns whether the strategy hint is on.
    #[must_use]
    pub const fn hint_enabled(&self) -> bool {
        self.hint_enabled
    }

    /// Returns whether auto-rebet is on.
    #[must_use]
    pub const fn auto_rebet(&self) -> bool {
        self.auto_rebet
    }

    /// Returns the injected view.
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Returns the injected view mutably.
    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Replaces the shoe contents with an explicit draw sequence (drawn
    /// from the end), suspending the reshuffle check until it runs dry.
    ///
    /// Intended for deterministic setups and tests.
    pub fn stack_shoe(&mut self, cards: Vec<Card>) {
        self.shoe.stack(cards);
    }

    /// Sets the number of decks and rebuilds the shoe.
    ///
    /// The count resets with the shoe, and a pending armed deal is
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns an error outside 1..=8 decks or while a round is live.
    pub fn set_deck_count(&mut self, decks: u8) -> Result<(), ConfigError> {
        if !(MIN_DECKS..=MAX_DECKS).contains(&decks) {
            return Err(ConfigError::OutOfRange);
        }
        match self.phase {
            Phase::Betting => {}
            Phase::Arming => {
                // The armed deal would fire into a rebuilt shoe.
                self.invalidate_timers();
                self.phase = Phase::Betting;
            }
            _ => return Err(ConfigError::RoundInProgress),
        }

        self.options.decks = decks;
        self.shoe.set_decks(decks);
        self.shoe.rebuild();
        self.count.reset();
        self.view.shoe_reshuffled();
        self.push_count();
        self.push_actions();
        Ok(())
    }

    /// Sets the shuffle point in decks, effective at the next draw.
    ///
    /// # Errors
    ///
    /// Returns an error outside 1..=8 decks.
    pub fn set_shuffle_point(&mut self, shuffle_after: u8) -> Result<(), ConfigError> {
        if !(MIN_DECKS..=MAX_DECKS).contains(&shuffle_after) {
            return Err(ConfigError::OutOfRange);
        }
        self.options.shuffle_after = shuffle_after;
        self.shoe.set_shuffle_after(shuffle_after);
        Ok(())
    }

    /// Shows or hides the basic-strategy hint. Mistake tracking follows
    /// the same switch.
    pub fn set_hint_enabled(&mut self, enabled: bool) {
        self.hint_enabled = enabled;
        self.push_advice();
    }

    /// Delivers a scheduled timer.
    ///
    /// Tokens from a superseded generation, or whose kind does not match
    /// the current phase, are discarded — this is how a cancelled arming
    /// or a reset round sheds its in-flight pacing.
    pub fn timer_fired(&mut self, token: TimerToken) {
        if token.generation != self.timer_generation {
            return;
        }

        match (token.kind, self.phase) {
            (TimerKind::Deal, Phase::Arming) => self.begin_deal(),
            (TimerKind::DealerDraw, Phase::DealerTurn) => self.dealer_step(),
            (TimerKind::ClearOutcome, Phase::Settling) => self.finish_settlement(),
            (TimerKind::Rebet, Phase::Betting) => self.try_rebet(),
            _ => {}
        }
    }

    /// Re-emits the full table state into the view.
    ///
    /// Useful once at startup so a fresh UI can paint bankroll, count, and
    /// stats without waiting for changes.
    pub fn refresh_view(&mut self) {
        self.push_bankroll();
        self.push_bet();
        self.push_count();
        self.push_stats();
        self.view.mistakes_changed(self.ledger.mistakes(), None);
        self.push_advice();
        self.push_actions();
    }

    pub(super) fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        let token = TimerToken {
            kind,
            generation: self.timer_generation,
        };
        self.view.schedule(token, delay);
    }

    /// Strands every outstanding timer token.
    pub(super) const fn invalidate_timers(&mut self) {
        self.timer_generation = self.timer_generation.wrapping_add(1);
    }

    /// Draws the next card, resetting the count when the shoe rebuilt
    /// itself under the shuffle point.
    pub(super) fn next_card(&mut self) -> Card {
        let drawn = self.shoe.draw();
        if drawn.reshuffled {
            self.count.reset();
            self.view.shoe_reshuffled();
            self.push_count();
        }
        drawn.card
    }

    /// Feeds a card that just became visible into the count.
    pub(super) fn observe(&mut self, card: Card) {
        self.count.observe(&card);
        self.push_count();
    }

    pub(super) fn push_count(&mut self) {
        let running = self.count.running_count();
        let true_count = self.count.true_count(self.shoe.cards_remaining());
        self.view.count_changed(running, true_count);
    }

    pub(super) fn push_bankroll(&mut self) {
        // Staged chips are reserved funds before the deal; once the round
        // is live the bet has actually been debited.
        let shown = match self.phase {
            Phase::Betting | Phase::Arming => self.ledger.available(),
            _ => self.ledger.bankroll(),
        };
        self.view.bankroll_changed(shown);
    }

    pub(super) fn push_bet(&mut self) {
        let total = self.ledger.bet_total();
        self.view.bet_changed(self.ledger.bet().chips(), total);
    }

    pub(super) fn push_stats(&mut self) {
        let stats = self.ledger.stats();
        self.view.stats_changed(&stats);
    }

    pub(super) fn push_totals(&mut self) {
        let dealer_total = self.dealer.visible_value();
        if !self.dealer.is_empty() {
            self.view.total_changed(HandId::Dealer, dealer_total);
        }
        for (index, hand) in self.hands.iter().enumerate() {
            self.view.total_changed(HandId::Player(index), hand.value());
        }
    }

    pub(super) fn push_actions(&mut self) {
        let actions = self.legal_actions();
        self.view.actions_changed(actions);
    }

    pub(super) fn push_advice(&mut self) {
        let advice = if self.hint_enabled && self.phase == Phase::PlayerTurn {
            self.current_advice()
        } else {
            None
        };
        self.view.advice_changed(advice);
    }

    /// Basic-strategy advice for the active hand, if any.
    pub(super) fn current_advice(&self) -> Option<Advice> {
        let hand = self.hands.get(self.active_hand)?;
        let upcard = self.dealer.up_card()?;
        advise(hand.cards(), upcard)
    }

    fn legal_actions(&self) -> ActionSet {
        match self.phase {
            Phase::Betting => ActionSet {
                deal: self.ledger.bet_total() > 0,
                ..ActionSet::none()
            },
            Phase::PlayerTurn => {
                let Some(hand) = self.hands.get(self.active_hand) else {
                    return ActionSet::none();
                };
                let live = hand.status() == crate::hand::HandStatus::Active;
                ActionSet {
                    deal: false,
                    hit: live,
                    stand: live,
                    double: live
                        && hand.len() == 2
                        && (!self.is_split || self.options.double_after_split),
                    split: live
                        && !self.is_split
                        && self.hands.first().is_some_and(Hand::can_split),
                }
            }
            _ => ActionSet::none(),
        }
    }
}
