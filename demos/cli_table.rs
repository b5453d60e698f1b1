//! CLI blackjack table demo.

#![allow(clippy::missing_docs_in_private_items)]

use std::collections::VecDeque;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use vegas::{
    Advice, CHIP_DENOMINATIONS, Card, Engine, HandId, HandOutcome, Phase, RoundSummary, Suit,
    TableOptions, TableView, TimerToken,
};

fn format_card(card: Card) -> String {
    let rank = match card.rank {
        1 => "A".to_string(),
        11 => "J".to_string(),
        12 => "Q".to_string(),
        13 => "K".to_string(),
        n => n.to_string(),
    };
    let suit = match card.suit {
        Suit::Hearts => "♥",
        Suit::Diamonds => "♦",
        Suit::Clubs => "♣",
        Suit::Spades => "♠",
    };
    format!("{rank}{suit}")
}

/// Console adapter: prints what the engine pushes out and queues its timer
/// requests so the main loop can pace them with real sleeps.
#[derive(Default)]
struct ConsoleView {
    timers: VecDeque<(TimerToken, Duration)>,
    running: i32,
    true_count: f64,
    advice: Option<Advice>,
}

impl TableView for ConsoleView {
    fn card_dealt(&mut self, hand: HandId, card: Card, face_up: bool) {
        let who = match hand {
            HandId::Dealer => "Dealer",
            HandId::Player(0) => "You",
            HandId::Player(_) => "You (second lane)",
        };
        if face_up {
            println!("  {who}: {}", format_card(card));
        } else {
            println!("  {who}: [face down]");
        }
    }

    fn hole_revealed(&mut self, card: Card) {
        println!("  Dealer turns over {}", format_card(card));
    }

    fn active_hand_changed(&mut self, hand: usize) {
        if hand == 1 {
            println!("  Playing the second lane.");
        }
    }

    fn count_changed(&mut self, running: i32, true_count: f64) {
        self.running = running;
        self.true_count = true_count;
    }

    fn advice_changed(&mut self, advice: Option<Advice>) {
        self.advice = advice;
    }

    fn round_settled(&mut self, summary: &RoundSummary) {
        for result in &summary.hands {
            let label = match result.outcome {
                HandOutcome::Blackjack => "Blackjack!",
                HandOutcome::Win => "You win",
                HandOutcome::Lose => "Dealer wins",
                HandOutcome::Push => "Push",
            };
            println!(
                "  Hand {}: {label} ({} vs dealer {})",
                result.hand_index + 1,
                result.player_value,
                summary.dealer_value
            );
        }
        if summary.net >= 0 {
            println!("  Net +${}", summary.net);
        } else {
            println!("  Net -${}", -summary.net);
        }
    }

    fn mistakes_changed(&mut self, count: u32, expected: Option<Advice>) {
        if let Some(expected) = expected {
            println!("  Basic strategy said {expected:?} ({count} mistakes so far).");
        }
    }

    fn insufficient_funds(&mut self) {
        println!("  Not enough funds.");
    }

    fn shoe_reshuffled(&mut self) {
        println!("  Shoe reshuffled, count reset.");
    }

    fn schedule(&mut self, token: TimerToken, delay: Duration) {
        self.timers.push_back((token, delay));
    }
}

/// Sleeps out and delivers every pending timer, so armed deals, dealer
/// pacing, and the outcome teardown play out like the real table.
fn pump(engine: &mut Engine<ConsoleView>) {
    while let Some((token, delay)) = engine.view_mut().timers.pop_front() {
        thread::sleep(delay);
        engine.timer_fired(token);
    }
}

fn main() {
    println!("Blackjack table demo (h/s/d/p to play, c for the count, q to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    // Short pacing so the terminal stays snappy.
    let options = TableOptions::default()
        .with_arming_delay(Duration::from_millis(150))
        .with_dealer_draw_delay(Duration::from_millis(300))
        .with_outcome_delay(Duration::from_millis(600));
    let mut engine = Engine::new(options, seed, ConsoleView::default());
    engine.set_hint_enabled(true);
    engine.refresh_view();

    loop {
        let bankroll = engine.ledger().bankroll();
        if bankroll < CHIP_DENOMINATIONS[CHIP_DENOMINATIONS.len() - 1] {
            println!("You are out of money. Game over.");
            break;
        }

        let stats = engine.ledger().stats();
        println!(
            "\nBankroll ${bankroll} | {} hands, {}W/{}L/{}P | count {} (true {:.1})",
            stats.hands,
            stats.wins,
            stats.losses,
            stats.pushes,
            engine.running_count(),
            engine.true_count(),
        );

        let Some(bet) = prompt_usize(&format!("Bet amount (multiples of 5, max {bankroll}, 0 to quit): "))
        else {
            break;
        };
        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if !place_bet(&mut engine, bet) {
            continue;
        }

        if engine.request_deal().is_err() {
            clear_bet(&mut engine);
            continue;
        }
        pump(&mut engine);

        while engine.phase() == Phase::PlayerTurn {
            print_player_lanes(&engine);
            if let Some(advice) = engine.view().advice {
                println!("Hint: {advice:?}");
            }

            let action = prompt_line("Action (h/s/d/p/c/q): ");
            let result = match action.as_str() {
                "h" | "hit" => engine.hit().map(|_| ()),
                "s" | "stand" => engine.stand(),
                "d" | "double" => engine.double_down().map(|_| ()),
                "p" | "split" => engine.split(),
                "c" | "count" => {
                    println!(
                        "Running count {} (true {:.1})",
                        engine.running_count(),
                        engine.true_count()
                    );
                    continue;
                }
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("  {err}");
            }
            pump(&mut engine);
        }

        // Dealer pacing and the outcome display run off the same queue.
        pump(&mut engine);
    }
}

fn place_bet(engine: &mut Engine<ConsoleView>, amount: usize) -> bool {
    let mut remaining = amount;
    for denomination in CHIP_DENOMINATIONS {
        while remaining >= denomination {
            if engine.add_chip(denomination).is_err() {
                clear_bet(engine);
                return false;
            }
            remaining -= denomination;
        }
    }
    if remaining > 0 {
        println!("  Bets are chip multiples of 5.");
        clear_bet(engine);
        return false;
    }
    true
}

fn clear_bet(engine: &mut Engine<ConsoleView>) {
    while !engine.ledger().bet().is_empty() {
        if engine.remove_chip(0).is_err() {
            break;
        }
    }
}

fn print_player_lanes(engine: &Engine<ConsoleView>) {
    let dealer = engine.dealer_hand();
    if let Some(up) = dealer.up_card() {
        println!("Dealer shows {} ({})", format_card(*up), dealer.visible_value());
    }
    for (index, hand) in engine.hands().iter().enumerate() {
        let marker = if index == engine.active_hand() { ">" } else { " " };
        let cards: Vec<String> = hand.cards().iter().map(|c| format_card(*c)).collect();
        println!(
            "{marker} Lane {}: {} ({})",
            index + 1,
            cards.join(" "),
            hand.value()
        );
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let line = prompt_line(prompt);
        if line.is_empty() {
            return None;
        }
        match line.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Enter a number."),
        }
    }
}
