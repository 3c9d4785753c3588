//! Share Trading
//!
//! Buying and selling of YES/NO decision shares against the linear
//! bonding curve. Each trade is one transaction: the collateral
//! debit/credit, the pool mutation, the position upsert and the two
//! history records either all commit or none do. The market account is
//! write-locked for the duration, which serializes trades per market
//! while leaving unrelated markets fully parallel.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::curve::LinearCurve;
use crate::state::{
    Config, CourseSnapshot, Market, MarketStatus, Position, Side, TradeKind, TradeRecord,
};

/// Event emitted when shares are bought
#[event]
pub struct SharesBought {
    pub market_id: u64,
    pub trader: Pubkey,
    pub side: Side,
    pub shares: u64,
    pub cost: u64,
    pub probability_yes_bps: u64,
    pub window_expires_at: i64,
}

/// Event emitted when shares are sold
#[event]
pub struct SharesSold {
    pub market_id: u64,
    pub trader: Pubkey,
    pub side: Side,
    pub shares: u64,
    pub proceeds: u64,
    pub probability_yes_bps: u64,
}

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Protocol configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Market being traded on; resolved markets take no further trades
    #[account(
        mut,
        constraint = market.status != MarketStatus::Resolved @ TradeError::MarketClosed,
    )]
    pub market: Account<'info, Market>,

    /// Collateral mint
    #[account(
        constraint = collateral_mint.key() == market.collateral_mint,
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// Trader's collateral account (the external balance being
    /// debited/credited)
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = trader,
    )]
    pub trader_collateral: InterfaceAccount<'info, TokenAccount>,

    /// Market's collateral vault
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Trader's position ledger for this market
    #[account(
        init_if_needed,
        payer = trader,
        space = 8 + Position::INIT_SPACE,
        seeds = [Position::SEED, market.key().as_ref(), trader.key().as_ref()],
        bump,
    )]
    pub position: Account<'info, Position>,

    /// Immutable record of this trade, appended at the current sequence
    #[account(
        init,
        payer = trader,
        space = 8 + TradeRecord::INIT_SPACE,
        seeds = [TradeRecord::SEED, market.key().as_ref(), market.trade_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub trade_record: Account<'info, TradeRecord>,

    /// Odds-over-time point, appended at the same sequence
    #[account(
        init,
        payer = trader,
        space = 8 + CourseSnapshot::INIT_SPACE,
        seeds = [CourseSnapshot::SEED, market.key().as_ref(), market.trade_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub snapshot: Account<'info, CourseSnapshot>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    /// Buy a fixed number of shares of one outcome
    pub fn buy_shares(
        &mut self,
        shares: u64,
        side: Side,
        max_cost: u64,
        bumps: &TradeBumps,
    ) -> Result<u64> {
        require!(shares > 0, TradeError::InvalidAmount);
        self.execute_buy(shares, side, max_cost, bumps)
    }

    /// Spend a currency budget on one outcome; shares come from the
    /// closed-form curve inverse, then the buy path is identical
    pub fn buy_for_budget(
        &mut self,
        budget: u64,
        side: Side,
        min_shares_out: u64,
        bumps: &TradeBumps,
    ) -> Result<u64> {
        require!(budget > 0, TradeError::InvalidAmount);

        let pool = self.market.pool(side);
        let shares =
            LinearCurve::shares_for_budget(pool.slope, pool.total_supply, pool.ghost_supply, budget)?;
        require!(shares > 0, TradeError::BudgetTooSmall);
        require!(shares >= min_shares_out, TradeError::SlippageExceeded);

        self.execute_buy(shares, side, budget, bumps)?;
        Ok(shares)
    }

    /// Sell shares back into the pool. Allowed after window expiry —
    /// unwinding a position is always permitted until resolution.
    pub fn sell_shares(
        &mut self,
        shares: u64,
        side: Side,
        min_proceeds: u64,
        bumps: &TradeBumps,
    ) -> Result<u64> {
        let clock = Clock::get()?;

        require!(shares > 0, TradeError::InvalidAmount);
        require!(!self.config.paused, TradeError::ProtocolPaused);

        let held = self.position.holding(side).shares_owned;
        require!(held >= shares, TradeError::InsufficientShares);

        let proceeds = self.market.apply_sell(side, shares)?;
        require!(proceeds >= min_proceeds, TradeError::SlippageExceeded);

        // credit the trader from the vault
        let config_key = self.config.key();
        let market_id = self.market.id.to_le_bytes();
        let market_seeds = &[
            Market::SEED,
            config_key.as_ref(),
            market_id.as_ref(),
            &[self.market.bump],
        ];
        let market_signer = &[&market_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.trader_collateral.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                market_signer,
            ),
            proceeds,
            self.collateral_mint.decimals,
        )?;

        // shrink the holding; cost basis comes down pro-rata and zeroes
        // out on a full exit
        let holding = self.position.holding_mut(side);
        let invested_out = ((holding.total_invested as u128) * (shares as u128)
            / (held as u128)) as u64;
        holding.shares_owned = holding
            .shares_owned
            .checked_sub(shares)
            .ok_or(TradeError::InsufficientShares)?;
        holding.total_invested = holding
            .total_invested
            .checked_sub(invested_out)
            .ok_or(TradeError::Overflow)?;
        if holding.shares_owned == 0 {
            holding.total_invested = 0;
        }

        self.record_trade(side, TradeKind::Sell, shares, proceeds, clock.unix_timestamp, bumps)?;

        let probability_yes_bps = self.market.probability_yes_bps()?;
        emit!(SharesSold {
            market_id: self.market.id,
            trader: self.trader.key(),
            side,
            shares,
            proceeds,
            probability_yes_bps,
        });

        Ok(proceeds)
    }

    /// The shared buy path: window check, pricing, debit, position
    /// upsert, history append.
    fn execute_buy(
        &mut self,
        shares: u64,
        side: Side,
        max_cost: u64,
        bumps: &TradeBumps,
    ) -> Result<u64> {
        let clock = Clock::get()?;

        require!(!self.config.paused, TradeError::ProtocolPaused);
        require!(
            !self.market.window_expired(clock.unix_timestamp),
            TradeError::WindowExpired
        );

        // price against the locked pool state; also stretches the window
        let cost = self.market.apply_buy(side, shares)?;
        require!(cost <= max_cost, TradeError::SlippageExceeded);
        require!(
            self.trader_collateral.amount >= cost,
            TradeError::InsufficientBalance
        );

        // debit the trader into the vault
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_collateral.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            cost,
            self.collateral_mint.decimals,
        )?;

        // upsert the holding
        if self.position.market == Pubkey::default() {
            self.position.market = self.market.key();
            self.position.owner = self.trader.key();
            self.position.bump = bumps.position;
        }
        let holding = self.position.holding_mut(side);
        holding.shares_owned = holding
            .shares_owned
            .checked_add(shares)
            .ok_or(TradeError::Overflow)?;
        holding.total_invested = holding
            .total_invested
            .checked_add(cost)
            .ok_or(TradeError::Overflow)?;

        self.record_trade(side, TradeKind::Buy, shares, cost, clock.unix_timestamp, bumps)?;

        let probability_yes_bps = self.market.probability_yes_bps()?;
        emit!(SharesBought {
            market_id: self.market.id,
            trader: self.trader.key(),
            side,
            shares,
            cost,
            probability_yes_bps,
            window_expires_at: self.market.expires_at(),
        });

        Ok(cost)
    }

    /// Append the immutable trade record and course snapshot at the
    /// current sequence number, then advance it.
    fn record_trade(
        &mut self,
        side: Side,
        kind: TradeKind,
        shares: u64,
        amount: u64,
        timestamp: i64,
        bumps: &TradeBumps,
    ) -> Result<()> {
        let seq = self.market.trade_count;
        let price_bps = self.market.probability_bps(side)?;

        self.trade_record.set_inner(TradeRecord {
            market: self.market.key(),
            seq,
            trader: self.trader.key(),
            side,
            kind,
            shares,
            amount,
            price_bps,
            timestamp,
            bump: bumps.trade_record,
        });

        self.snapshot.set_inner(CourseSnapshot {
            market: self.market.key(),
            seq,
            timestamp,
            yes_reserve: self.market.yes_pool.reserve,
            no_reserve: self.market.no_pool.reserve,
            bump: bumps.snapshot,
        });

        self.market.trade_count = seq.checked_add(1).ok_or(TradeError::Overflow)?;

        Ok(())
    }
}

#[error_code]
pub enum TradeError {
    #[msg("Market is resolved and takes no further trades")]
    MarketClosed,
    #[msg("Investment window has expired, buying is closed")]
    WindowExpired,
    #[msg("Amount must be greater than zero")]
    InvalidAmount,
    #[msg("Insufficient collateral balance")]
    InsufficientBalance,
    #[msg("Insufficient shares held")]
    InsufficientShares,
    #[msg("Budget too small to buy any shares")]
    BudgetTooSmall,
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,
    #[msg("Protocol is paused")]
    ProtocolPaused,
    #[msg("Arithmetic overflow")]
    Overflow,
}
