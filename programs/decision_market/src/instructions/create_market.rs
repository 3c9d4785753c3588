//! Market Creation
//!
//! One instruction creates the market account (both outcome pools) and
//! its collateral vault atomically. Pools open with zero issued supply
//! and zero reserve; the ghost seed makes the first share cost something
//! without anyone funding liquidity up front.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::state::{Config, Market, MarketStatus, Outcome, Pool};

/// Event emitted when a market opens for trading
#[event]
pub struct MarketCreated {
    pub market_id: u64,
    pub decision_id: u64,
    pub creator: Pubkey,
    pub window_duration: i64,
    pub created_at: i64,
}

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [Market::SEED, config.key().as_ref(), config.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        constraint = collateral_mint.key() == config.collateral_mint @ CreateMarketError::WrongCollateral,
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// Market's collateral vault, the pot every trade settles against
    #[account(
        init,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    #[allow(clippy::too_many_arguments)]
    pub fn create_market(
        &mut self,
        decision_id: u64,
        slope_yes: u64,
        slope_no: u64,
        ghost_yes: u64,
        ghost_no: u64,
        window_duration: i64,
        bumps: &CreateMarketBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        require!(!self.config.paused, CreateMarketError::ProtocolPaused);
        require!(slope_yes > 0 && slope_no > 0, CreateMarketError::InvalidSlope);
        require!(window_duration >= 0, CreateMarketError::InvalidWindow);

        // zero means "use the protocol default"
        let window_duration = if window_duration == 0 {
            self.config.default_window_secs
        } else {
            window_duration
        };

        let market_id = self.config.market_count;

        self.market.set_inner(Market {
            id: market_id,
            decision_id,
            creator: self.creator.key(),
            collateral_mint: self.collateral_mint.key(),
            created_at: clock.unix_timestamp,
            window_duration,
            yes_pool: Pool {
                total_supply: 0,
                ghost_supply: ghost_yes,
                slope: slope_yes,
                reserve: 0,
            },
            no_pool: Pool {
                total_supply: 0,
                ghost_supply: ghost_no,
                slope: slope_no,
                reserve: 0,
            },
            trade_count: 0,
            status: MarketStatus::Open,
            outcome: Outcome::Undetermined,
            bump: bumps.market,
        });

        self.config.market_count += 1;

        emit!(MarketCreated {
            market_id,
            decision_id,
            creator: self.creator.key(),
            window_duration,
            created_at: clock.unix_timestamp,
        });

        Ok(())
    }
}

#[error_code]
pub enum CreateMarketError {
    #[msg("Protocol is paused")]
    ProtocolPaused,
    #[msg("Slope must be positive")]
    InvalidSlope,
    #[msg("Window duration must not be negative")]
    InvalidWindow,
    #[msg("Collateral mint does not match protocol configuration")]
    WrongCollateral,
}
