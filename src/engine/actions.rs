//! Player actions: hit, stand, double down, split.

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::{Hand, HandStatus};
use crate::strategy::Advice;
use crate::view::{HandId, TableView};

use super::{Engine, Phase};

impl<V: TableView> Engine<V> {
    /// Player action: Hit (draw a card).
    ///
    /// A bust finishes the hand; when every hand is finished the round
    /// moves on (dealer turn, or straight to settlement if everything
    /// busted).
    ///
    /// # Errors
    ///
    /// Returns an error outside the player turn or when the active hand
    /// has already finished.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        self.ensure_active_hand()?;
        self.note_action(Advice::Hit);

        let index = self.active_hand;
        let card = self.next_card();
        self.observe(card);
        let Some(hand) = self.hands.get_mut(index) else {
            return Err(ActionError::HandNotActive);
        };
        hand.add_card(card);
        let busted = hand.status() == HandStatus::Bust;

        self.view.card_dealt(HandId::Player(index), card, true);
        self.push_totals();
        self.push_actions();
        self.push_advice();

        if busted {
            self.advance_or_finish();
        }
        Ok(card)
    }

    /// Player action: Stand (keep the current hand).
    ///
    /// # Errors
    ///
    /// Returns an error outside the player turn or when the active hand
    /// has already finished.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_active_hand()?;
        self.note_action(Advice::Stand);

        if let Some(hand) = self.hands.get_mut(self.active_hand) {
            hand.set_status(HandStatus::Stand);
        }
        self.advance_or_finish();
        Ok(())
    }

    /// Player action: Double down (double the bet, draw one card, done).
    ///
    /// Legal on a 2-card active hand, on split hands only when
    /// double-after-split is enabled, and only when the bankroll covers a
    /// second stake. The hand finishes either way: Bust when the draw
    /// breaks 21, Stand otherwise — split and non-split hands alike.
    ///
    /// # Errors
    ///
    /// Returns an error outside the player turn, on a finished hand, when
    /// doubling is not legal for the hand, or for insufficient funds (the
    /// notice fires too).
    pub fn double_down(&mut self) -> Result<Card, ActionError> {
        self.ensure_active_hand()?;

        let index = self.active_hand;
        let Some(hand) = self.hands.get(index) else {
            return Err(ActionError::HandNotActive);
        };
        if hand.len() != 2 {
            return Err(ActionError::CannotDouble);
        }
        if self.is_split && !self.options.double_after_split {
            return Err(ActionError::CannotDouble);
        }

        let stake = hand.bet();
        if self.ledger.bankroll() < stake {
            self.view.insufficient_funds();
            return Err(ActionError::InsufficientFunds);
        }

        self.note_action(Advice::Double);

        self.ledger
            .debit(stake)
            .map_err(|_| ActionError::InsufficientFunds)?;
        self.push_bankroll();

        let card = self.next_card();
        self.observe(card);
        let Some(hand) = self.hands.get_mut(index) else {
            return Err(ActionError::HandNotActive);
        };
        hand.double_bet();
        hand.add_card(card);
        if hand.status() != HandStatus::Bust {
            hand.set_status(HandStatus::Stand);
        }

        self.view.card_dealt(HandId::Player(index), card, true);
        self.push_totals();

        self.advance_or_finish();
        Ok(card)
    }

    /// Player action: Split the initial pair into two hands.
    ///
    /// Legal once per round, on the initial 2-card hand only, when both
    /// cards share a split rank (ten-value cards all match) and the
    /// bankroll covers the second stake. Each new hand immediately
    /// receives one more card; split hands cannot re-split. Splitting is
    /// never graded against basic strategy.
    ///
    /// # Errors
    ///
    /// Returns an error outside the player turn, after a split, on an
    /// ineligible pair, or for insufficient funds (the notice fires too).
    pub fn split(&mut self) -> Result<(), ActionError> {
        self.ensure_active_hand()?;

        if self.is_split {
            return Err(ActionError::AlreadySplit);
        }
        let Some(hand) = self.hands.first() else {
            return Err(ActionError::HandNotActive);
        };
        if !hand.can_split() {
            return Err(ActionError::CannotSplit);
        }

        let stake = hand.bet();
        if self.ledger.bankroll() < stake {
            self.view.insufficient_funds();
            return Err(ActionError::InsufficientFunds);
        }
        self.ledger
            .debit(stake)
            .map_err(|_| ActionError::InsufficientFunds)?;
        self.push_bankroll();

        let Some(moved) = self.hands[0].take_split_card() else {
            return Err(ActionError::CannotSplit);
        };
        self.is_split = true;
        self.hands.push(Hand::from_split(moved, stake));
        self.view.hand_split(moved);

        // One fresh card on each lane.
        self.deal_to_player(0, true);
        self.deal_to_player(1, true);

        self.active_hand = 0;
        self.view.active_hand_changed(0);
        self.push_totals();
        self.push_actions();
        self.push_advice();
        Ok(())
    }

    /// Moves the spotlight to the next unfinished hand, or out of the
    /// player turn when none remains: to the dealer when any hand stood,
    /// straight to settlement when everything busted.
    pub(super) fn advance_or_finish(&mut self) {
        if let Some(next) = self
            .hands
            .iter()
            .position(|hand| hand.status() == HandStatus::Active)
        {
            if next != self.active_hand {
                self.active_hand = next;
                self.view.active_hand_changed(next);
            }
            self.push_actions();
            self.push_advice();
            return;
        }

        let all_bust = self
            .hands
            .iter()
            .all(|hand| hand.status() == HandStatus::Bust);

        if all_bust {
            // The dealer has nothing to play for.
            self.reveal_hole();
            self.push_totals();
            self.resolve_round();
        } else {
            self.start_dealer_turn();
        }
    }

    /// Grades the chosen action against basic strategy before it applies.
    fn note_action(&mut self, chosen: Advice) {
        if !self.hint_enabled {
            return;
        }
        let Some(expected) = self.current_advice() else {
            return;
        };
        if expected != chosen {
            self.ledger.record_mistake();
            self.round_mistake = Some(expected);
            let count = self.ledger.mistakes();
            self.view.mistakes_changed(count, None);
        }
    }

    fn ensure_active_hand(&self) -> Result<(), ActionError> {
        if self.phase != Phase::PlayerTurn {
            return Err(ActionError::InvalidPhase);
        }
        let live = self
            .hands
            .get(self.active_hand)
            .is_some_and(|hand| hand.status() == HandStatus::Active);
        if live { Ok(()) } else { Err(ActionError::HandNotActive) }
    }
}
