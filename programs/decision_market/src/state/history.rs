//! Trade History
//!
//! Two append-only records are created inside every trade transaction,
//! both seeded by the market's `trade_count` at commit time, so the
//! sequence `0..trade_count` is the complete, gapless history in commit
//! order. Neither account is ever mutated after creation.
//!
//! Charting clients read the snapshot series and derive
//! probability-over-time from the reserve pair alone — no transaction
//! replay, and no variation math inside the engine.

use anchor_lang::prelude::*;

use crate::state::Side;

/// Immutable record of one committed buy or sell
///
/// Seeds: ["trade", market, seq.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct TradeRecord {
    /// Market traded on
    pub market: Pubkey,

    /// Position in the market's trade sequence
    pub seq: u64,

    /// Trader who committed the trade
    pub trader: Pubkey,

    /// Outcome side traded
    pub side: Side,

    /// Buy or sell
    pub kind: TradeKind,

    /// Shares moved (micro-shares)
    pub shares: u64,

    /// Cost paid (buy) or proceeds received (sell), micro-currency
    pub amount: u64,

    /// Normalized per-share price: the traded side's reserve-implied
    /// probability (bps) right after this trade committed
    pub price_bps: u64,

    /// Commit timestamp
    pub timestamp: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl TradeRecord {
    pub const SEED: &'static [u8] = b"trade";
}

/// Immutable point on a market's odds-over-time series
///
/// Seeds: ["snapshot", market, seq.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct CourseSnapshot {
    /// Market this point belongs to
    pub market: Pubkey,

    /// Position in the market's trade sequence
    pub seq: u64,

    /// Commit timestamp; non-decreasing along the sequence
    pub timestamp: i64,

    /// YES pool reserve after the trade (micro-currency)
    pub yes_reserve: u64,

    /// NO pool reserve after the trade (micro-currency)
    pub no_reserve: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl CourseSnapshot {
    pub const SEED: &'static [u8] = b"snapshot";
}

/// Direction of a trade
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum TradeKind {
    Buy,
    Sell,
}
