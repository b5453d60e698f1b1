//! Table phase and timer token types.

/// Table phase.
///
/// The round lifecycle is
/// `Betting → Arming → Dealing → PlayerTurn → DealerTurn → Settling → Betting`,
/// with `Dealing` short-circuiting straight to `Settling` on a dealt
/// blackjack and `PlayerTurn` short-circuiting past `DealerTurn` when every
/// hand busts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting chips for the next round.
    Betting,
    /// Deal requested; the debounce timer is running.
    Arming,
    /// Initial cards are going out.
    Dealing,
    /// Waiting for player actions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Outcome is on display before the table resets.
    Settling,
}

/// What a scheduled timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Arming debounce elapsed: deal the round.
    Deal,
    /// Dealer pacing elapsed: draw one dealer card.
    DealerDraw,
    /// Outcome display elapsed: clear the table for betting.
    ClearOutcome,
    /// Rebet pause elapsed: re-request the deal.
    Rebet,
}

/// A cancellable handle to one scheduled task.
///
/// The generation pins the token to the engine state that scheduled it;
/// when the engine invalidates its timers the generation moves on and old
/// tokens are ignored on delivery, which is what keeps a stale auto-deal
/// from firing into a cleared table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    /// The scheduled task.
    pub kind: TimerKind,
    /// Generation at scheduling time.
    pub generation: u64,
}
