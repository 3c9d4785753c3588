//! Position Redemption
//!
//! After resolution, holders of the winning outcome trade their whole
//! holding for a proportional slice of the prize pot:
//!
//! ```text
//! payout = shares_owned / winning_supply * pot
//! ```
//!
//! The ghost seed never counts toward `winning_supply`, so the pot is
//! divided among real holders only. Losing-side holdings pay nothing and
//! stay readable for history.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::state::{Config, Market, MarketStatus, Outcome, Position, Side};

/// Event emitted when a winning position is redeemed
#[event]
pub struct PositionRedeemed {
    pub market_id: u64,
    pub redeemer: Pubkey,
    pub shares_redeemed: u64,
    pub payout: u64,
}

/// Accounts for redemption
#[derive(Accounts)]
pub struct Redeem<'info> {
    /// User redeeming their position
    #[account(mut)]
    pub user: Signer<'info>,

    /// Protocol configuration
    #[account(
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    /// Resolved market
    #[account(
        mut,
        constraint = market.status == MarketStatus::Resolved @ RedeemError::NotResolved,
    )]
    pub market: Account<'info, Market>,

    /// User's position in this market
    #[account(
        mut,
        seeds = [Position::SEED, market.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
    )]
    pub position: Account<'info, Position>,

    /// Collateral mint
    #[account(
        constraint = collateral_mint.key() == market.collateral_mint,
    )]
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// User's collateral account
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = user,
    )]
    pub user_collateral: InterfaceAccount<'info, TokenAccount>,

    /// Market's collateral vault
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: InterfaceAccount<'info, TokenAccount>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Redeem<'info> {
    /// Redeem the whole winning holding for collateral
    pub fn redeem(&mut self) -> Result<u64> {
        let winning_side = match self.market.outcome {
            Outcome::Yes => Side::Yes,
            Outcome::No => Side::No,
            Outcome::Undetermined => return err!(RedeemError::NotResolved),
        };

        let shares = self.position.holding(winning_side).shares_owned;
        require!(shares > 0, RedeemError::NoWinningShares);

        // retire the shares and their slice of the pot
        let payout = self.market.apply_redeem(winning_side, shares)?;

        // pay out from the vault
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
                    to: self.user_collateral.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                market_signer,
            ),
            payout,
            self.collateral_mint.decimals,
        )?;

        let holding = self.position.holding_mut(winning_side);
        holding.shares_owned = 0;
        holding.total_invested = 0;

        emit!(PositionRedeemed {
            market_id: self.market.id,
            redeemer: self.user.key(),
            shares_redeemed: shares,
            payout,
        });

        Ok(payout)
    }
}

#[error_code]
pub enum RedeemError {
    #[msg("Market is not resolved")]
    NotResolved,
    #[msg("No winning shares to redeem")]
    NoWinningShares,
}
