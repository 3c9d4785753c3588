//! # Decision Market Engine
//!
//! Binary-outcome prediction markets for tracked real-world decisions.
//! Every decision gets a YES pool and a NO pool, each priced along an
//! independent linear bonding curve, so price comes from accumulated
//! supply instead of order matching. Community-implied odds come from
//! the capital committed to each side.
//!
//! ## How a trade works
//!
//! buy/sell → pool state read under the market's account lock → curve
//! integral prices the trade → collateral moves between trader and vault
//! → pool, position and history records commit in the same transaction.
//!
//! Buying is limited to an investment window that every purchase
//! stretches a little; selling stays open until the decision resolves.

use anchor_lang::prelude::*;

pub mod curve;
pub mod instructions;
pub mod state;
pub mod window;

pub use curve::*;
pub use instructions::*;

use state::Side;

declare_id!("59fqWLqLf61r4b5TpBU6pm1gA9fxLheezWCQBaFb5rWf");

/// Main decision market program
#[program]
pub mod decision_market {
    use super::*;

    /// Initialize the protocol with global configuration
    pub fn initialize(
        ctx: Context<Initialize>,
        oracle: Pubkey,
        default_window_secs: i64,
    ) -> Result<()> {
        ctx.accounts
            .initialize(oracle, default_window_secs, &ctx.bumps)
    }

    /// Halt or resume market creation and trading (admin only)
    pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
        ctx.accounts.set_paused(paused)
    }

    /// Open a market for a tracked decision
    pub fn create_market(
        ctx: Context<CreateMarket>,
        decision_id: u64,
        slope_yes: u64,
        slope_no: u64,
        ghost_yes: u64,
        ghost_no: u64,
        window_duration: i64,
    ) -> Result<()> {
        ctx.accounts.create_market(
            decision_id,
            slope_yes,
            slope_no,
            ghost_yes,
            ghost_no,
            window_duration,
            &ctx.bumps,
        )
    }

    /// Buy a fixed number of outcome shares
    pub fn buy_shares(
        ctx: Context<Trade>,
        shares: u64,
        side: Side,
        max_cost: u64,
    ) -> Result<u64> {
        ctx.accounts.buy_shares(shares, side, max_cost, &ctx.bumps)
    }

    /// Spend a currency budget on outcome shares
    pub fn buy_for_budget(
        ctx: Context<Trade>,
        budget: u64,
        side: Side,
        min_shares_out: u64,
    ) -> Result<u64> {
        ctx.accounts
            .buy_for_budget(budget, side, min_shares_out, &ctx.bumps)
    }

    /// Sell outcome shares back into the pool
    pub fn sell_shares(
        ctx: Context<Trade>,
        shares: u64,
        side: Side,
        min_proceeds: u64,
    ) -> Result<u64> {
        ctx.accounts
            .sell_shares(shares, side, min_proceeds, &ctx.bumps)
    }

    /// Flag the decision as tracked (oracle only)
    pub fn set_tracking(ctx: Context<UpdateMarketStatus>) -> Result<()> {
        ctx.accounts.set_tracking()
    }

    /// Resolve the market and freeze trading (oracle only)
    pub fn resolve_market(ctx: Context<UpdateMarketStatus>, winner: Side) -> Result<()> {
        ctx.accounts.resolve_market(winner)
    }

    /// Redeem a winning position for collateral
    pub fn redeem(ctx: Context<Redeem>) -> Result<u64> {
        ctx.accounts.redeem()
    }
}
