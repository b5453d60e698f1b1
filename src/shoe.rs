//! The card shoe: a multi-deck pool with a depletion-driven reshuffle.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Suit};

/// A card drawn from the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnCard {
    /// The drawn card.
    pub card: Card,
    /// Whether the shoe rebuilt itself before this draw.
    ///
    /// A rebuild discards everything the table has seen, so the caller must
    /// reset its running count when this is set.
    pub reshuffled: bool,
}

/// A shoe of `decks × 52` cards, drawn from the end.
///
/// The reshuffle check runs before every draw: once fewer than
/// `shuffle_after` decks remain, the shoe rebuilds itself and only then
/// serves the card.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: u8,
    shuffle_after: u8,
    /// A stacked shoe skips the reshuffle check until the next rebuild.
    stacked: bool,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a shoe with the given deck count and shuffle point (in
    /// decks), seeded for reproducible shuffles.
    #[must_use]
    pub fn new(decks: u8, shuffle_after: u8, seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            decks,
            shuffle_after,
            stacked: false,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        shoe.rebuild();
        shoe
    }

    /// Rebuilds the shoe: `decks` standard decks, uniformly shuffled.
    pub fn rebuild(&mut self) {
        self.cards.clear();
        self.cards.reserve(self.decks as usize * DECK_SIZE);

        for _ in 0..self.decks {
            for suit in Suit::ALL {
                for rank in 1..=13 {
                    self.cards.push(Card::new(suit, rank));
                }
            }
        }

        self.cards.shuffle(&mut self.rng);
        self.stacked = false;
    }

    /// Draws one card, rebuilding first if the shoe has passed its shuffle
    /// point.
    #[expect(
        clippy::missing_panics_doc,
        reason = "a rebuilt shoe always holds at least one full deck"
    )]
    pub fn draw(&mut self) -> DrawnCard {
        let mut reshuffled = false;
        if !self.stacked && self.cards.len() < self.reshuffle_point() {
            self.rebuild();
            reshuffled = true;
        }

        let card = match self.cards.pop() {
            Some(card) => card,
            None => {
                // Only reachable when a stacked shoe runs dry.
                self.rebuild();
                reshuffled = true;
                self.cards.pop().expect("rebuilt shoe is never empty")
            }
        };

        DrawnCard { card, reshuffled }
    }

    /// Replaces the shoe contents with an explicit card sequence.
    ///
    /// Cards are drawn from the end of the slice, so the last card is served
    /// first. The reshuffle check is suspended until the stack runs dry or
    /// the shoe is rebuilt, which makes deterministic round setups possible.
    pub fn stack(&mut self, cards: Vec<Card>) {
        self.cards = cards;
        self.stacked = true;
    }

    /// Returns the remaining cards; the back of the slice is served first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns the configured number of decks.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Returns the shuffle point in decks.
    #[must_use]
    pub const fn shuffle_after(&self) -> u8 {
        self.shuffle_after
    }

    /// Sets the number of decks. Takes effect at the next rebuild.
    pub const fn set_decks(&mut self, decks: u8) {
        self.decks = decks;
    }

    /// Sets the shuffle point in decks. Takes effect at the next draw.
    pub const fn set_shuffle_after(&mut self, shuffle_after: u8) {
        self.shuffle_after = shuffle_after;
    }

    const fn reshuffle_point(&self) -> usize {
        self.shuffle_after as usize * DECK_SIZE
    }
}
