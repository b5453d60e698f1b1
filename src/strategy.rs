//! Basic-strategy advisor.
//!
//! The table is the fixed hit/stand/double chart the mistake tracker grades
//! against; it ignores the count and the split option.

use crate::card::Card;
use crate::hand::evaluate_cards;

/// A recommended player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    /// Draw another card.
    Hit,
    /// Keep the current hand.
    Stand,
    /// Double the bet and draw exactly one card.
    Double,
}

/// Returns the basic-strategy action for the player hand against the dealer
/// upcard, or `None` when the player hand is empty.
///
/// # Example
///
/// ```
/// use vegas::{Advice, Card, Suit, advise};
///
/// let hand = [Card::new(Suit::Hearts, 6), Card::new(Suit::Clubs, 5)];
/// let upcard = Card::new(Suit::Spades, 10);
/// assert_eq!(advise(&hand, &upcard), Some(Advice::Double));
/// ```
#[must_use]
pub fn advise(player_cards: &[Card], dealer_upcard: &Card) -> Option<Advice> {
    if player_cards.is_empty() {
        return None;
    }

    let (total, is_soft) = evaluate_cards(player_cards);
    let d = dealer_upcard.value();

    let advice = if is_soft {
        match total {
            0..=17 => Advice::Hit,
            18 => {
                if d >= 9 {
                    Advice::Hit
                } else {
                    Advice::Stand
                }
            }
            _ => Advice::Stand,
        }
    } else {
        match total {
            0..=8 => Advice::Hit,
            9 => {
                if (3..=6).contains(&d) {
                    Advice::Double
                } else {
                    Advice::Hit
                }
            }
            10 => {
                if d <= 9 {
                    Advice::Double
                } else {
                    Advice::Hit
                }
            }
            11 => Advice::Double,
            12 => {
                if (4..=6).contains(&d) {
                    Advice::Stand
                } else {
                    Advice::Hit
                }
            }
            13..=16 => {
                if d <= 6 {
                    Advice::Stand
                } else {
                    Advice::Hit
                }
            }
            _ => Advice::Stand,
        }
    };

    Some(advice)
}
