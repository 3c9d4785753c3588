//! Trader Positions
//!
//! One account per (trader, market) pair holding both outcome sides.
//! Created lazily on the first buy, zeroed on a full exit, kept around
//! while any shares remain.

use anchor_lang::prelude::*;

use crate::state::Side;

/// Share balance and cost basis in one outcome of one market.
///
/// `total_invested` is display-only (portfolio views); pricing never
/// reads it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub struct Holding {
    /// Shares currently owned (micro-shares)
    pub shares_owned: u64,

    /// Cumulative currency spent acquiring the current shares
    /// (micro-units), reduced pro-rata on partial sells
    pub total_invested: u64,
}

/// Per-trader position account
///
/// Seeds: ["position", market, owner]
#[account]
#[derive(InitSpace)]
pub struct Position {
    /// Market this position belongs to
    pub market: Pubkey,

    /// Position owner
    pub owner: Pubkey,

    /// YES-side holding
    pub yes: Holding,

    /// NO-side holding
    pub no: Holding,

    /// PDA bump seed
    pub bump: u8,
}

impl Position {
    pub const SEED: &'static [u8] = b"position";

    pub fn holding(&self, side: Side) -> &Holding {
        match side {
            Side::Yes => &self.yes,
            Side::No => &self.no,
        }
    }

    pub fn holding_mut(&mut self, side: Side) -> &mut Holding {
        match side {
            Side::Yes => &mut self.yes,
            Side::No => &mut self.no,
        }
    }
}
