//! Engine integration tests.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use vegas::{
    ActionError, Advice, BetError, Card, ConfigError, CountTracker, DealError, DealerHand, Engine,
    Hand, HandId, HandOutcome, HandStatus, Phase, RoundSummary, Shoe, Suit, TableOptions,
    TableView, TimerToken, advise,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

const fn c(rank: u8) -> Card {
    Card::new(Suit::Hearts, rank)
}

/// Headless adapter that records what the engine pushes out.
#[derive(Default)]
struct RecordingView {
    timers: VecDeque<(TimerToken, Duration)>,
    dealt: Vec<(HandId, Card, bool)>,
    settled: Vec<RoundSummary>,
    mistakes: Vec<(u32, Option<Advice>)>,
    insufficient: usize,
    reshuffles: usize,
}

impl TableView for RecordingView {
    fn card_dealt(&mut self, hand: HandId, card: Card, face_up: bool) {
        self.dealt.push((hand, card, face_up));
    }

    fn mistakes_changed(&mut self, count: u32, expected: Option<Advice>) {
        self.mistakes.push((count, expected));
    }

    fn round_settled(&mut self, summary: &RoundSummary) {
        self.settled.push(summary.clone());
    }

    fn insufficient_funds(&mut self) {
        self.insufficient += 1;
    }

    fn shoe_reshuffled(&mut self) {
        self.reshuffles += 1;
    }

    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.timers.push_back((token, delay));
    }
}

fn new_engine(options: TableOptions) -> Engine<RecordingView> {
    Engine::new(options, 7, RecordingView::default())
}

/// Stacks the shoe so that `draws` come out in slice order.
fn stack_draws(engine: &mut Engine<RecordingView>, draws: &[Card]) {
    let mut cards: Vec<Card> = draws.to_vec();
    cards.reverse();
    engine.stack_shoe(cards);
}

/// Fires scheduled timers until none are pending. Do not use while
/// auto-rebet is on: the table would keep dealing itself forever.
fn run_timers(engine: &mut Engine<RecordingView>) {
    while let Some((token, _)) = engine.view_mut().timers.pop_front() {
        engine.timer_fired(token);
    }
}

fn fire_next(engine: &mut Engine<RecordingView>) {
    if let Some((token, _)) = engine.view_mut().timers.pop_front() {
        engine.timer_fired(token);
    }
}

/// Bets 100 on the stacked draws and runs the deal through arming.
fn deal_hundred(engine: &mut Engine<RecordingView>, draws: &[Card]) {
    stack_draws(engine, draws);
    engine.add_chip(100).unwrap();
    engine.request_deal().unwrap();
    run_timers(engine);
}

#[test]
fn hand_value_is_order_invariant() {
    let orderings = [
        [c(1), c(13), c(5)],
        [c(13), c(1), c(5)],
        [c(5), c(13), c(1)],
    ];
    for cards in orderings {
        let mut hand = Hand::new(10);
        for card in cards {
            hand.add_card(card);
        }
        assert_eq!(hand.value(), 16);
        assert!(!hand.is_soft());
    }
}

#[test]
fn ace_ten_is_a_soft_blackjack() {
    let mut hand = Hand::new(10);
    hand.add_card(card(Suit::Hearts, 1));
    hand.add_card(card(Suit::Spades, 13));
    assert_eq!(hand.value(), 21);
    assert!(hand.is_soft());
    assert_eq!(hand.status(), HandStatus::Blackjack);
}

#[test]
fn aces_reduce_one_at_a_time() {
    let mut hand = Hand::new(10);
    hand.add_card(c(1));
    hand.add_card(card(Suit::Clubs, 1));
    hand.add_card(c(9));
    assert_eq!(hand.value(), 21);
    assert!(hand.is_soft());
}

#[test]
fn split_hand_twenty_one_is_not_blackjack() {
    let mut hand = Hand::from_split(c(1), 10);
    hand.add_card(card(Suit::Clubs, 13));
    assert_eq!(hand.value(), 21);
    assert_eq!(hand.status(), HandStatus::Active);
}

#[test]
fn ten_value_pairs_can_split() {
    let mut hand = Hand::new(10);
    hand.add_card(c(13));
    hand.add_card(card(Suit::Clubs, 10));
    assert!(hand.can_split());

    let mut other = Hand::new(10);
    other.add_card(c(9));
    other.add_card(c(10));
    assert!(!other.can_split());
}

#[test]
fn advisor_follows_the_chart() {
    // Hard 11 doubles against anything.
    for up in [2, 6, 7, 10, 1] {
        assert_eq!(advise(&[c(6), c(5)], &c(up)), Some(Advice::Double));
    }
    // Hard 16 stands against 6, hits against 7.
    assert_eq!(advise(&[c(10), c(6)], &c(6)), Some(Advice::Stand));
    assert_eq!(advise(&[c(10), c(6)], &c(7)), Some(Advice::Hit));
    // Hard 9 doubles only against 3 through 6.
    assert_eq!(advise(&[c(4), c(5)], &c(3)), Some(Advice::Double));
    assert_eq!(advise(&[c(4), c(5)], &c(2)), Some(Advice::Hit));
    // Hard 12 stands only against 4 through 6.
    assert_eq!(advise(&[c(10), c(2)], &c(4)), Some(Advice::Stand));
    assert_eq!(advise(&[c(10), c(2)], &c(3)), Some(Advice::Hit));
    // Soft 18 hits into strong upcards, stands otherwise.
    assert_eq!(advise(&[c(1), c(7)], &c(9)), Some(Advice::Hit));
    assert_eq!(advise(&[c(1), c(7)], &c(1)), Some(Advice::Hit));
    assert_eq!(advise(&[c(1), c(7)], &c(8)), Some(Advice::Stand));
    // Soft 19 stands.
    assert_eq!(advise(&[c(1), c(8)], &c(10)), Some(Advice::Stand));
    // No advice without cards.
    assert_eq!(advise(&[], &c(5)), None);
}

#[test]
fn rebuilt_single_deck_has_52_unique_cards() {
    let shoe = Shoe::new(1, 1, 3);
    assert_eq!(shoe.cards_remaining(), 52);
    let unique: HashSet<(Suit, u8)> = shoe.cards().iter().map(|c| (c.suit, c.rank)).collect();
    assert_eq!(unique.len(), 52);
}

#[test]
fn hi_lo_count_tracks_observed_cards() {
    let mut count = CountTracker::new();
    for rank in 2..=6 {
        count.observe(&c(rank));
    }
    assert_eq!(count.running_count(), 5);

    for rank in [10, 11, 12, 13, 1] {
        count.observe(&c(rank));
    }
    assert_eq!(count.running_count(), 0);
}

#[test]
fn true_count_floors_decks_remaining() {
    let mut count = CountTracker::new();
    for rank in [2, 3, 4, 5, 6] {
        count.observe(&c(rank));
    }
    // A full deck remaining divides straight through.
    assert!((count.true_count(52) - 5.0).abs() < 1e-9);
    // Six cards left would explode without the quarter-deck floor.
    assert!((count.true_count(6) - 20.0).abs() < 1e-9);
}

#[test]
fn engine_counts_visible_cards_only() {
    let mut engine = new_engine(TableOptions::default());
    // Player 2 and 4, dealer shows 3, hole ten stays hidden.
    deal_hundred(&mut engine, &[c(2), c(3), c(4), c(10), c(5)]);
    assert_eq!(engine.running_count(), 3);

    // Standing reveals the hole (-1); the dealer then draws the 5 (+1).
    engine.stand().unwrap();
    run_timers(&mut engine);
    assert_eq!(engine.running_count(), 3);
}

#[test]
fn bust_round_settles_as_a_loss() {
    let mut engine = new_engine(TableOptions::default());
    deal_hundred(&mut engine, &[c(10), c(6), c(7), c(9), c(8)]);

    assert_eq!(engine.phase(), Phase::PlayerTurn);
    assert_eq!(engine.ledger().bankroll(), 900);

    // 10 + 7 + 8 busts at 25.
    engine.hit().unwrap();
    assert_eq!(engine.phase(), Phase::Settling);

    let summary = engine.view().settled.last().unwrap();
    assert_eq!(summary.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(summary.net, -100);

    let stats = engine.ledger().stats();
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.net, -100);
    assert_eq!(engine.ledger().bankroll(), 900);

    // Outcome teardown returns the table to betting with an empty circle.
    run_timers(&mut engine);
    assert_eq!(engine.phase(), Phase::Betting);
    assert_eq!(engine.ledger().bet_total(), 0);
}

#[test]
fn natural_blackjack_pays_three_to_two() {
    let mut engine = new_engine(TableOptions::default());
    deal_hundred(&mut engine, &[c(1), c(9), c(13), c(7)]);

    let summary = engine.view().settled.last().unwrap();
    assert_eq!(summary.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(summary.hands[0].payout, 250);
    assert_eq!(summary.net, 150);
    assert!(!summary.dealer_blackjack);

    assert_eq!(engine.ledger().bankroll(), 1_150);
    assert_eq!(engine.ledger().stats().wins, 1);
    assert_eq!(engine.ledger().stats().net, 150);
}

#[test]
fn dealt_blackjack_against_dealer_blackjack_pushes() {
    let mut engine = new_engine(TableOptions::default());
    deal_hundred(&mut engine, &[c(1), c(1), c(13), c(10)]);

    let summary = engine.view().settled.last().unwrap();
    assert_eq!(summary.hands[0].outcome, HandOutcome::Push);
    assert_eq!(summary.net, 0);
    assert!(summary.dealer_blackjack);
    assert_eq!(engine.ledger().bankroll(), 1_000);
}

#[test]
fn split_deals_one_card_to_each_lane() {
    let mut engine = new_engine(TableOptions::default());
    deal_hundred(
        &mut engine,
        &[c(8), c(6), c(8), c(10), c(3), c(2), c(10), c(10)],
    );

    engine.split().unwrap();
    assert!(engine.is_split());
    assert_eq!(engine.hands().len(), 2);
    assert_eq!(engine.hands()[0].len(), 2);
    assert_eq!(engine.hands()[1].len(), 2);
    // Second stake is down.
    assert_eq!(engine.ledger().bankroll(), 800);

    // Double after split is allowed: lane 0 holds 8+3 = 11.
    engine.double_down().unwrap();
    assert_eq!(engine.hands()[0].bet(), 200);
    assert_eq!(engine.hands()[0].status(), HandStatus::Stand);
    assert_eq!(engine.ledger().bankroll(), 700);

    // Lane 1 (8+2) stands; the dealer turns 16 and busts on the last ten.
    engine.stand().unwrap();
    run_timers(&mut engine);

    let summary = engine.view().settled.last().unwrap();
    assert!(summary.dealer_bust);
    assert_eq!(summary.hands[0].outcome, HandOutcome::Win);
    assert_eq!(summary.hands[1].outcome, HandOutcome::Win);
    assert_eq!(summary.net, 300);
    assert_eq!(engine.ledger().bankroll(), 1_300);
    assert_eq!(engine.ledger().stats().wins, 2);
}

#[test]
fn split_is_single_level_and_needs_matching_ranks() {
    let mut engine = new_engine(TableOptions::default());
    deal_hundred(
        &mut engine,
        &[c(8), c(6), c(8), c(10), c(8), c(2), c(10), c(5), c(10)],
    );

    engine.split().unwrap();
    // Lane 0 drew another 8; re-splitting is still refused.
    assert_eq!(engine.split().unwrap_err(), ActionError::AlreadySplit);

    let mut other = new_engine(TableOptions::default());
    deal_hundred(&mut other, &[c(9), c(6), c(8), c(10)]);
    assert_eq!(other.split().unwrap_err(), ActionError::CannotSplit);
}

#[test]
fn double_into_bust_loses_on_a_split_hand() {
    let mut engine = new_engine(TableOptions::default());
    deal_hundred(
        &mut engine,
        &[c(8), c(7), c(8), c(10), c(10), c(3), c(10)],
    );

    engine.split().unwrap();
    // Lane 0 holds 8+10; the double card is another ten: 28.
    engine.double_down().unwrap();
    assert_eq!(engine.hands()[0].status(), HandStatus::Bust);

    // Lane 1 stands on 11; dealer shows 17 and stays put.
    engine.stand().unwrap();
    run_timers(&mut engine);

    let summary = engine.view().settled.last().unwrap();
    assert_eq!(summary.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(summary.hands[0].bet, 200);
    assert_eq!(summary.hands[0].payout, 0);
    assert_eq!(summary.hands[1].outcome, HandOutcome::Lose);
}

#[test]
fn dealer_hits_soft_17_and_stands_hard_17() {
    let mut engine = new_engine(TableOptions::default());
    // Dealer holds A+6 behind the ace; H17 forces one more card.
    deal_hundred(&mut engine, &[c(10), c(1), c(10), c(6), c(10)]);
    engine.stand().unwrap();
    run_timers(&mut engine);

    let summary = engine.view().settled.last().unwrap();
    assert_eq!(summary.dealer_value, 17);
    let dealer_cards = engine
        .view()
        .dealt
        .iter()
        .filter(|(hand, _, _)| *hand == HandId::Dealer)
        .count();
    assert_eq!(dealer_cards, 3);
    // Player 20 beats the drawn-out 17.
    assert_eq!(summary.hands[0].outcome, HandOutcome::Win);

    // Hard 17 resolves with no draw at all.
    let mut other = new_engine(TableOptions::default());
    deal_hundred(&mut other, &[c(9), c(10), c(9), c(7)]);
    other.stand().unwrap();
    assert_eq!(other.phase(), Phase::Settling);
    let summary = other.view().settled.last().unwrap();
    assert_eq!(summary.dealer_value, 17);
    assert_eq!(summary.hands[0].outcome, HandOutcome::Win);
}

#[test]
fn stood_21_pushes_a_dealer_two_card_21() {
    let mut engine = new_engine(TableOptions::default());
    // Player draws to 21 on three cards; the dealer turns A+K.
    deal_hundred(&mut engine, &[c(10), c(1), c(4), c(13), c(7)]);
    engine.hit().unwrap();
    engine.stand().unwrap();
    run_timers(&mut engine);

    let summary = engine.view().settled.last().unwrap();
    assert_eq!(summary.dealer_value, 21);
    assert_eq!(summary.hands[0].outcome, HandOutcome::Push);
}

#[test]
fn hole_reveal_is_idempotent() {
    let mut dealer = DealerHand::new();
    dealer.add_card(c(10));
    dealer.add_card(c(6));

    assert_eq!(dealer.visible_value(), 10);
    assert_eq!(dealer.reveal_hole(), Some(c(6)));
    assert_eq!(dealer.reveal_hole(), None);
    assert_eq!(dealer.visible_value(), 16);
}

#[test]
fn chip_stack_normalizes_largest_first() {
    let mut engine = new_engine(TableOptions::default());
    for _ in 0..5 {
        engine.add_chip(5).unwrap();
    }
    assert_eq!(engine.ledger().bet().chips(), &[25]);
    assert_eq!(engine.ledger().bet_total(), 25);

    engine.add_chip(10).unwrap();
    engine.add_chip(10).unwrap();
    assert_eq!(engine.ledger().bet().chips(), &[25, 10, 10]);

    engine.remove_chip(0).unwrap();
    assert_eq!(engine.ledger().bet_total(), 20);
    assert_eq!(
        engine.remove_chip(5).unwrap_err(),
        BetError::NoSuchChip
    );
}

#[test]
fn bets_cannot_outgrow_the_bankroll() {
    let mut engine = new_engine(TableOptions::default().with_starting_bankroll(120));
    engine.add_chip(100).unwrap();
    assert_eq!(
        engine.add_chip(50).unwrap_err(),
        BetError::InsufficientFunds
    );
    assert_eq!(engine.view().insufficient, 1);
    assert_eq!(
        engine.add_chip(7).unwrap_err(),
        BetError::UnknownDenomination
    );

    engine.add_funds(500);
    engine.add_chip(50).unwrap();
    assert_eq!(engine.ledger().bet_total(), 150);
}

#[test]
fn deal_requests_are_debounced_and_idempotent() {
    let mut engine = new_engine(TableOptions::default());
    assert_eq!(
        engine.request_deal().unwrap_err(),
        DealError::EmptyBet
    );

    stack_draws(&mut engine, &[c(10), c(9), c(7), c(5)]);
    engine.add_chip(100).unwrap();
    engine.request_deal().unwrap();
    assert_eq!(engine.phase(), Phase::Arming);
    // Repeat requests while armed are swallowed without a second timer.
    engine.request_deal().unwrap();
    assert_eq!(engine.view().timers.len(), 1);

    fire_next(&mut engine);
    assert_eq!(engine.phase(), Phase::PlayerTurn);
    assert_eq!(engine.request_deal().unwrap_err(), DealError::InvalidPhase);
    assert_eq!(
        engine.add_chip(5).unwrap_err(),
        BetError::RoundInProgress
    );
}

#[test]
fn stale_deal_timer_is_discarded() {
    let mut engine = new_engine(TableOptions::default());
    engine.add_chip(100).unwrap();
    engine.request_deal().unwrap();
    assert_eq!(engine.phase(), Phase::Arming);

    // Switching auto-rebet off cancels the armed deal.
    engine.set_auto_rebet(false);
    assert_eq!(engine.phase(), Phase::Betting);

    run_timers(&mut engine);
    assert_eq!(engine.phase(), Phase::Betting);
    assert!(engine.view().dealt.is_empty());
    assert_eq!(engine.ledger().bankroll(), 1_000);
}

#[test]
fn emptied_bet_aborts_the_armed_deal() {
    let mut engine = new_engine(TableOptions::default());
    engine.add_chip(100).unwrap();
    engine.request_deal().unwrap();
    // Chips may still move while the deal is armed.
    engine.remove_chip(0).unwrap();

    run_timers(&mut engine);
    assert_eq!(engine.phase(), Phase::Betting);
    assert!(engine.view().dealt.is_empty());
}

#[test]
fn auto_rebet_restores_the_last_bet_and_rearms() {
    let mut engine = new_engine(TableOptions::default());
    engine.set_auto_rebet(true);
    stack_draws(&mut engine, &[c(10), c(10), c(6), c(10)]);
    // Dropping a chip with auto-rebet on arms the deal by itself.
    engine.add_chip(100).unwrap();
    assert_eq!(engine.phase(), Phase::Arming);
    fire_next(&mut engine);

    engine.stand().unwrap();
    assert_eq!(engine.phase(), Phase::Settling);

    // Outcome teardown restores the bet and queues the rebet.
    fire_next(&mut engine);
    assert_eq!(engine.phase(), Phase::Betting);
    assert_eq!(engine.ledger().bet_total(), 100);

    // The rebet fires into a fresh armed deal.
    fire_next(&mut engine);
    assert_eq!(engine.phase(), Phase::Arming);
}

#[test]
fn auto_rebet_halts_on_insufficient_funds() {
    let mut engine = new_engine(TableOptions::default().with_starting_bankroll(100));
    engine.set_auto_rebet(true);
    // Dealer 20 beats the stood 16: the whole bankroll is gone.
    stack_draws(&mut engine, &[c(10), c(10), c(6), c(10)]);
    engine.add_chip(100).unwrap();
    fire_next(&mut engine);
    engine.stand().unwrap();

    fire_next(&mut engine); // outcome teardown, bet restored
    assert_eq!(engine.ledger().bankroll(), 0);
    fire_next(&mut engine); // rebet attempt

    assert_eq!(engine.phase(), Phase::Betting);
    assert!(engine.view().timers.is_empty());
    assert!(engine.view().insufficient >= 1);
}

#[test]
fn mistakes_count_against_the_chart() {
    let mut engine = new_engine(TableOptions::default());
    engine.set_hint_enabled(true);
    // Hard 17 against a 9: the chart says stand.
    deal_hundred(&mut engine, &[c(10), c(9), c(7), c(5), c(2), c(10)]);

    engine.hit().unwrap();
    assert_eq!(engine.ledger().mistakes(), 1);

    // Standing on 19 agrees with the chart.
    engine.stand().unwrap();
    run_timers(&mut engine);
    assert_eq!(engine.ledger().mistakes(), 1);

    // The settled round flashes the ignored advice.
    assert!(
        engine
            .view()
            .mistakes
            .iter()
            .any(|&(count, expected)| count == 1 && expected == Some(Advice::Stand))
    );
}

#[test]
fn mistakes_are_not_tracked_with_the_hint_off() {
    let mut engine = new_engine(TableOptions::default());
    deal_hundred(&mut engine, &[c(10), c(9), c(7), c(5), c(2), c(10)]);
    engine.hit().unwrap();
    engine.stand().unwrap();
    run_timers(&mut engine);
    assert_eq!(engine.ledger().mistakes(), 0);
}

#[test]
fn double_requires_funds_and_two_cards() {
    let mut engine = new_engine(TableOptions::default().with_starting_bankroll(150));
    deal_hundred(&mut engine, &[c(5), c(6), c(6), c(10), c(4), c(9)]);

    // Only 50 left behind a 100 bet.
    assert_eq!(
        engine.double_down().unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(engine.view().insufficient, 1);

    engine.hit().unwrap();
    // Three cards can no longer double.
    assert_eq!(engine.double_down().unwrap_err(), ActionError::CannotDouble);
}

#[test]
fn deck_count_changes_rebuild_the_shoe_between_rounds() {
    let mut engine = new_engine(TableOptions::default());
    assert_eq!(engine.set_deck_count(0).unwrap_err(), ConfigError::OutOfRange);
    assert_eq!(engine.set_deck_count(9).unwrap_err(), ConfigError::OutOfRange);

    engine.set_deck_count(4).unwrap();
    assert_eq!(engine.cards_remaining(), 4 * 52);
    assert_eq!(engine.running_count(), 0);

    deal_hundred(&mut engine, &[c(10), c(9), c(7), c(5)]);
    assert_eq!(
        engine.set_deck_count(6).unwrap_err(),
        ConfigError::RoundInProgress
    );

    engine.set_shuffle_point(4).unwrap();
    assert_eq!(
        engine.set_shuffle_point(0).unwrap_err(),
        ConfigError::OutOfRange
    );
}

#[test]
fn deck_count_change_cancels_an_armed_deal() {
    let mut engine = new_engine(TableOptions::default());
    engine.add_chip(100).unwrap();
    engine.request_deal().unwrap();
    assert_eq!(engine.phase(), Phase::Arming);

    engine.set_deck_count(2).unwrap();
    assert_eq!(engine.phase(), Phase::Betting);

    run_timers(&mut engine);
    assert!(engine.view().dealt.is_empty());
}

#[test]
fn shoe_rebuilds_below_the_shuffle_point() {
    let mut shoe = Shoe::new(1, 1, 9);
    // 52 cards is not yet below one deck.
    let first = shoe.draw();
    assert!(!first.reshuffled);
    // 51 is, so the shoe rebuilds before serving the card.
    let second = shoe.draw();
    assert!(second.reshuffled);
    assert_eq!(shoe.cards_remaining(), 51);
}

#[test]
fn count_resets_when_the_shoe_rebuilds() {
    let mut engine = new_engine(TableOptions::default());
    // Stack exactly the deal; the hit afterwards runs the stack dry and
    // rebuilds the shoe, which restarts the count.
    deal_hundred(&mut engine, &[c(2), c(3), c(4), c(10)]);
    assert_eq!(engine.running_count(), 3);

    engine.hit().unwrap();
    assert_eq!(engine.view().reshuffles, 1);
    // The count restarted before the freshly drawn card was observed.
    let (_, drawn, _) = *engine.view().dealt.last().unwrap();
    assert_eq!(engine.running_count(), vegas::count::hi_lo_value(&drawn));
}
