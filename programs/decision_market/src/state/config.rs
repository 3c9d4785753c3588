//! Global Protocol Configuration
//!
//! Protocol-wide settings that apply to every decision market.

use anchor_lang::prelude::*;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Protocol administrator with special privileges
    pub admin: Pubkey,

    /// Authority allowed to mark decisions tracked/resolved. This is the
    /// platform's backend signer or a multisig standing in for it.
    pub oracle: Pubkey,

    /// Collateral token mint (the platform's 6-decimal currency)
    pub collateral_mint: Pubkey,

    /// Suggested investment-window duration for new markets, in seconds
    pub default_window_secs: i64,

    /// Total markets created (used as incrementing ID)
    pub market_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Whether the protocol is paused
    pub paused: bool,
}

impl Config {
    pub const SEED: &'static [u8] = b"config";
}
