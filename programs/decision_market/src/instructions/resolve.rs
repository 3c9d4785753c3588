//! Market Lifecycle: Tracking and Resolution
//!
//! Status moves one way: `Open → Tracking → Resolved`. `Tracking` is a
//! purely informational step the platform flips when the decision enters
//! formal follow-up; pricing is unaffected. Resolution is the terminal
//! transition: the oracle names the winning outcome, the losing pool's
//! reserve folds into the winning pool as the prize pot, and every
//! subsequent buy/sell is rejected.

use anchor_lang::prelude::*;

use crate::state::{Config, Market, MarketStatus, Outcome, Side};

/// Event emitted when a market enters tracking
#[event]
pub struct MarketTracking {
    pub market_id: u64,
    pub timestamp: i64,
}

/// Event emitted when a market is resolved
#[event]
pub struct MarketResolved {
    pub market_id: u64,
    pub outcome: Outcome,
    pub resolver: Pubkey,
    pub prize_pot: u64,
    pub timestamp: i64,
}

/// Accounts for lifecycle transitions
#[derive(Accounts)]
pub struct UpdateMarketStatus<'info> {
    /// Oracle authorized to move market status
    #[account(
        constraint = oracle.key() == config.oracle @ ResolveError::Unauthorized
    )]
    pub oracle: Signer<'info>,

    /// Protocol configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Market being transitioned
    #[account(
        mut,
        constraint = market.status != MarketStatus::Resolved @ ResolveError::AlreadyResolved,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> UpdateMarketStatus<'info> {
    /// Flag the decision as being tracked. One-way, no pricing effect.
    pub fn set_tracking(&mut self) -> Result<()> {
        require!(
            self.market.status == MarketStatus::Open,
            ResolveError::InvalidTransition
        );
        self.market.status = MarketStatus::Tracking;

        let clock = Clock::get()?;
        emit!(MarketTracking {
            market_id: self.market.id,
            timestamp: clock.unix_timestamp,
        });

        Ok(())
    }

    /// Resolve the market with the winning outcome and freeze trading.
    pub fn resolve_market(&mut self, winner: Side) -> Result<()> {
        let clock = Clock::get()?;

        let prize_pot = self.market.apply_resolution(winner)?;

        emit!(MarketResolved {
            market_id: self.market.id,
            outcome: self.market.outcome,
            resolver: self.oracle.key(),
            prize_pot,
            timestamp: clock.unix_timestamp,
        });

        msg!(
            "Market {} resolved: {:?}",
            self.market.id,
            self.market.outcome
        );

        Ok(())
    }
}

#[error_code]
pub enum ResolveError {
    #[msg("Only the configured oracle can move market status")]
    Unauthorized,
    #[msg("Market is already resolved")]
    AlreadyResolved,
    #[msg("Status can only move forward")]
    InvalidTransition,
}
