//! Dealer automation (H17) and round settlement.

use alloc::vec::Vec;

use crate::hand::HandStatus;
use crate::options::RoundingMode;
use crate::result::{HandOutcome, HandResult, RoundSummary};
use crate::view::{HandId, TableView};

use super::{Engine, Phase, TimerKind};

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

impl<V: TableView> Engine<V> {
    /// Enters the dealer turn: buttons off, hole card up, and either the
    /// first paced draw is scheduled or the dealer already stands and the
    /// round settles immediately.
    pub(super) fn start_dealer_turn(&mut self) {
        self.phase = Phase::DealerTurn;
        self.push_actions();
        self.push_advice();
        self.reveal_hole();
        self.push_totals();
        self.continue_dealer();
    }

    /// One paced dealer draw.
    pub(super) fn dealer_step(&mut self) {
        debug_assert_eq!(self.phase, Phase::DealerTurn);

        let card = self.next_card();
        self.observe(card);
        self.dealer.add_card(card);
        self.view.card_dealt(HandId::Dealer, card, true);
        self.push_totals();
        self.continue_dealer();
    }

    /// Turns the hole card over, feeding it into the count exactly once.
    pub(super) fn reveal_hole(&mut self) {
        if let Some(card) = self.dealer.reveal_hole() {
            self.observe(card);
            self.view.hole_revealed(card);
        }
    }

    fn continue_dealer(&mut self) {
        if self.dealer_should_hit() {
            self.schedule(TimerKind::DealerDraw, self.options.dealer_draw_delay);
        } else {
            self.resolve_round();
        }
    }

    /// Stand on hard 17+; hit soft 17 under H17.
    fn dealer_should_hit(&self) -> bool {
        let value = self.dealer.value();
        let is_soft = self.dealer.is_soft();
        value < 17 || (value == 17 && is_soft && self.options.hits_soft_17)
    }

    /// Settles every hand against the dealer, pays the ledger, publishes
    /// the summary, and schedules the outcome teardown.
    pub(super) fn resolve_round(&mut self) {
        self.phase = Phase::Settling;
        self.push_actions();
        self.push_advice();

        let dealer_value = self.dealer.value();
        let dealer_bust = self.dealer.is_bust();
        let dealer_blackjack = self.dealer.is_blackjack();

        let mut results = Vec::with_capacity(self.hands.len());
        let mut net: i64 = 0;

        for (hand_index, hand) in self.hands.iter().enumerate() {
            let bet = hand.bet();
            let player_value = hand.value();

            let (outcome, payout) = match hand.status() {
                HandStatus::Bust => (HandOutcome::Lose, 0),
                HandStatus::Blackjack => {
                    if dealer_blackjack {
                        (HandOutcome::Push, bet)
                    } else {
                        #[expect(
                            clippy::cast_precision_loss,
                            reason = "f64 has sufficient precision for monetary values"
                        )]
                        let winnings = (bet as f64) * self.options.blackjack_pays;
                        let rounded = round_amount(winnings, self.options.rounding_blackjack);
                        (HandOutcome::Blackjack, bet + rounded)
                    }
                }
                HandStatus::Stand | HandStatus::Active => {
                    if dealer_bust || player_value > dealer_value {
                        (HandOutcome::Win, bet * 2)
                    } else if player_value < dealer_value {
                        (HandOutcome::Lose, 0)
                    } else {
                        (HandOutcome::Push, bet)
                    }
                }
            };

            #[expect(
                clippy::cast_possible_wrap,
                reason = "payout and bet values fit in i64"
            )]
            {
                net += payout as i64 - bet as i64;
            }

            results.push(HandResult {
                hand_index,
                outcome,
                bet,
                payout,
                player_value,
            });
        }

        self.ledger.settle(&results);
        self.push_bankroll();
        self.push_stats();

        let summary = RoundSummary {
            hands: results,
            dealer_value,
            dealer_bust,
            dealer_blackjack,
            net,
        };
        self.view.round_settled(&summary);

        if let Some(expected) = self.round_mistake {
            let count = self.ledger.mistakes();
            self.view.mistakes_changed(count, Some(expected));
        }

        self.schedule(TimerKind::ClearOutcome, self.options.outcome_delay);
    }

    /// The outcome display elapsed: clear the table back to Betting, and
    /// with auto-rebet on, queue the next bet restore.
    pub(super) fn finish_settlement(&mut self) {
        debug_assert_eq!(self.phase, Phase::Settling);

        self.view.outcome_cleared();
        self.dealer.clear();
        self.hands.clear();
        self.active_hand = 0;
        self.is_split = false;
        self.round_mistake = None;
        self.phase = Phase::Betting;

        if self.auto_rebet && self.ledger.last_bet_total() > 0 {
            self.ledger.restore_last_bet();
            self.schedule(TimerKind::Rebet, self.options.rebet_delay);
        } else {
            self.ledger.clear_bet();
        }

        self.push_bet();
        self.push_bankroll();
        self.push_actions();
        self.push_advice();
        let count = self.ledger.mistakes();
        self.view.mistakes_changed(count, None);
    }
}
