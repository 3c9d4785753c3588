//! Protocol Initialization
//!
//! Sets up the global configuration for the decision market engine.
//! Called once during deployment; the pause switch below is the only
//! admin knob after that.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::state::Config;

/// Accounts required for protocol initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Protocol administrator (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// Collateral token mint (the platform currency)
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    /// Initialize the protocol configuration
    pub fn initialize(
        &mut self,
        oracle: Pubkey,
        default_window_secs: i64,
        bumps: &InitializeBumps,
    ) -> Result<()> {
        require!(default_window_secs > 0, InitializeError::InvalidWindow);

        self.config.set_inner(Config {
            admin: self.admin.key(),
            oracle,
            collateral_mint: self.collateral_mint.key(),
            default_window_secs,
            market_count: 0,
            bump: bumps.config,
            paused: false,
        });

        msg!("Protocol initialized");
        msg!("Admin: {}", self.admin.key());
        msg!("Oracle: {}", oracle);
        msg!("Default window: {}s", default_window_secs);

        Ok(())
    }
}

/// Accounts for the admin pause switch
#[derive(Accounts)]
pub struct SetPaused<'info> {
    #[account(
        constraint = admin.key() == config.admin @ InitializeError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> SetPaused<'info> {
    /// Halt or resume market creation and trading
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        self.config.paused = paused;
        msg!("Protocol paused: {}", paused);
        Ok(())
    }
}

#[error_code]
pub enum InitializeError {
    #[msg("Default window duration must be positive")]
    InvalidWindow,
    #[msg("Only the protocol admin can do this")]
    Unauthorized,
}
