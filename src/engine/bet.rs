//! Chip betting, the armed deal, and the rebet loop.

use crate::error::{BetError, DealError};
use crate::hand::{Hand, HandStatus};
use crate::view::{HandId, TableView};

use super::{Engine, Phase, TimerKind};

impl<V: TableView> Engine<V> {
    /// Adds a chip of `denomination` to the betting circle.
    ///
    /// The bet renormalizes into the canonical largest-first breakdown.
    /// With auto-rebet on, a successful chip immediately requests the deal
    /// (the table plays itself once chips are down).
    ///
    /// # Errors
    ///
    /// Returns an error outside the betting window, for an unknown
    /// denomination, or when the chip would push the bet past the bankroll
    /// (the insufficient-funds notice fires too).
    pub fn add_chip(&mut self, denomination: usize) -> Result<(), BetError> {
        self.ensure_betting_window()?;

        match self.ledger.add_chip(denomination) {
            Ok(()) => {}
            Err(BetError::InsufficientFunds) => {
                self.view.insufficient_funds();
                return Err(BetError::InsufficientFunds);
            }
            Err(err) => return Err(err),
        }

        self.push_bet();
        self.push_bankroll();
        self.push_actions();

        if self.auto_rebet && self.phase == Phase::Betting {
            let _ = self.request_deal();
        }
        Ok(())
    }

    /// Removes the bet chip at `index` from the betting circle.
    ///
    /// # Errors
    ///
    /// Returns an error outside the betting window or for a bad index.
    pub fn remove_chip(&mut self, index: usize) -> Result<(), BetError> {
        self.ensure_betting_window()?;
        self.ledger.remove_chip(index)?;

        self.push_bet();
        self.push_bankroll();
        self.push_actions();
        Ok(())
    }

    /// Credits funds to the bankroll. A zero amount is ignored.
    pub fn add_funds(&mut self, amount: usize) {
        if amount == 0 {
            return;
        }
        self.ledger.add_funds(amount);
        self.push_bankroll();
    }

    /// Turns auto-rebet on or off.
    ///
    /// Turning it on while idle starts the deal path: with chips down the
    /// deal arms right away, otherwise the last bet is restored first.
    /// Turning it off cancels any pending rebet, and during Arming cancels
    /// the armed deal so a stale timer cannot fire into the cleared table.
    pub fn set_auto_rebet(&mut self, enabled: bool) {
        self.auto_rebet = enabled;

        if enabled {
            if self.phase == Phase::Betting {
                if self.ledger.bet_total() == 0 && self.ledger.last_bet_total() > 0 {
                    self.ledger.restore_last_bet();
                    self.push_bet();
                    self.push_bankroll();
                }
                if self.ledger.bet_total() > 0 {
                    let _ = self.request_deal();
                }
            }
            return;
        }

        match self.phase {
            Phase::Arming => {
                self.invalidate_timers();
                self.phase = Phase::Betting;
                self.push_actions();
            }
            Phase::Betting => {
                // Strands a scheduled rebet, if one is in flight.
                self.invalidate_timers();
            }
            _ => {}
        }
    }

    /// Requests a deal for the staged bet.
    ///
    /// Enters Arming and schedules the debounced deal. Repeat requests
    /// during Arming or Dealing are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error mid-round, with an empty bet, or when the bet
    /// exceeds the bankroll (the insufficient-funds notice fires too).
    pub fn request_deal(&mut self) -> Result<(), DealError> {
        match self.phase {
            Phase::Betting => {}
            // Idempotent: the deal is already on its way.
            Phase::Arming | Phase::Dealing => return Ok(()),
            _ => return Err(DealError::InvalidPhase),
        }

        let total = self.ledger.bet_total();
        if total == 0 {
            return Err(DealError::EmptyBet);
        }
        if total > self.ledger.bankroll() {
            self.view.insufficient_funds();
            return Err(DealError::InsufficientFunds);
        }

        self.ledger.save_last_bet();
        self.phase = Phase::Arming;
        self.push_actions();
        self.schedule(TimerKind::Deal, self.options.arming_delay);
        Ok(())
    }

    /// The arming debounce elapsed: deal the round.
    ///
    /// The bet is revalidated because chips may have moved during Arming;
    /// a bet that emptied or outgrew the bankroll drops the table back to
    /// Betting.
    pub(super) fn begin_deal(&mut self) {
        debug_assert_eq!(self.phase, Phase::Arming);

        let total = self.ledger.bet_total();
        if total == 0 {
            self.phase = Phase::Betting;
            self.push_actions();
            return;
        }
        if total > self.ledger.bankroll() {
            self.phase = Phase::Betting;
            self.view.insufficient_funds();
            self.push_actions();
            return;
        }

        self.phase = Phase::Dealing;
        self.ledger.save_last_bet();
        let bet = self.ledger.begin_round();
        self.push_bankroll();
        self.push_stats();

        self.round_mistake = None;
        self.is_split = false;
        self.active_hand = 0;
        self.dealer.clear();
        self.hands.clear();
        self.hands.push(Hand::new(bet));

        // Deal order: player up, dealer up, player up, dealer hole.
        self.deal_to_player(0, true);
        self.deal_to_dealer(true);
        self.deal_to_player(0, true);
        self.deal_to_dealer(false);

        self.push_totals();

        if self.hands[0].status() == HandStatus::Blackjack {
            // Natural: settle now, skipping the player and dealer turns.
            self.reveal_hole();
            self.push_totals();
            self.resolve_round();
            return;
        }

        self.phase = Phase::PlayerTurn;
        self.view.active_hand_changed(0);
        self.push_actions();
        self.push_advice();
    }

    /// The rebet pause elapsed: restore the bet if needed and re-arm.
    ///
    /// An insufficient bankroll halts the loop with the notice instead of
    /// re-arming.
    pub(super) fn try_rebet(&mut self) {
        if !self.auto_rebet || self.phase != Phase::Betting {
            return;
        }

        if self.ledger.bet_total() == 0 {
            if self.ledger.last_bet_total() == 0 {
                return;
            }
            self.ledger.restore_last_bet();
            self.push_bet();
            self.push_bankroll();
        }

        if self.ledger.bet_total() > self.ledger.bankroll() {
            self.view.insufficient_funds();
            return;
        }

        let _ = self.request_deal();
    }

    pub(super) fn deal_to_player(&mut self, hand_index: usize, face_up: bool) {
        let card = self.next_card();
        if face_up {
            self.observe(card);
        }
        if let Some(hand) = self.hands.get_mut(hand_index) {
            hand.add_card(card);
        }
        self.view.card_dealt(HandId::Player(hand_index), card, face_up);
    }

    pub(super) fn deal_to_dealer(&mut self, face_up: bool) {
        let card = self.next_card();
        if face_up {
            self.observe(card);
        }
        self.dealer.add_card(card);
        self.view.card_dealt(HandId::Dealer, card, face_up);
    }

    fn ensure_betting_window(&self) -> Result<(), BetError> {
        // Arming still counts: the armed deal revalidates the bet.
        match self.phase {
            Phase::Betting | Phase::Arming => Ok(()),
            _ => Err(BetError::RoundInProgress),
        }
    }
}
