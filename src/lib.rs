//! A single-player blackjack table engine with optional `no_std` support.
//!
//! The crate provides an [`Engine`] type that manages the full table flow:
//! chip betting, the armed deal, player actions (hit/stand/double/split),
//! H17 dealer automation, and settlement, together with a Hi-Lo
//! [`CountTracker`], a basic-strategy [`advise`] function with mistake
//! tracking, and a bankroll/stats [`Ledger`].
//!
//! Presentation is injected through the [`TableView`] trait; the engine
//! pushes every observable change (cards, totals, counts, outcomes, timer
//! requests) into it and never touches a UI itself.
//!
//! # Example
//!
//! ```no_run
//! use vegas::{Engine, NullView, TableOptions};
//!
//! let options = TableOptions::default();
//! let engine = Engine::new(options, 42, NullView);
//! let _ = engine;
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod count;
pub mod engine;
pub mod error;
pub mod hand;
pub mod ledger;
pub mod options;
pub mod result;
pub mod shoe;
pub mod strategy;
pub mod view;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use count::CountTracker;
pub use engine::{Engine, Phase, TimerKind, TimerToken};
pub use error::{ActionError, BetError, ConfigError, DealError};
pub use hand::{DealerHand, Hand, HandStatus};
pub use ledger::{CHIP_DENOMINATIONS, ChipStack, Ledger, SessionStats};
pub use options::{RoundingMode, TableOptions};
pub use result::{HandOutcome, HandResult, RoundSummary};
pub use shoe::{DrawnCard, Shoe};
pub use strategy::{Advice, advise};
pub use view::{ActionSet, HandId, NullView, TableView};
