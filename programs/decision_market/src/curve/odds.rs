//! Reserve-Based Probability
//!
//! Community-implied odds come from the capital committed to each pool,
//! not from the bonding curve: `P(yes) = reserve_yes / (reserve_yes +
//! reserve_no)`. Capital is the robust consensus signal — it stays
//! well-defined even when the two pools run different slopes.
//!
//! Probabilities are expressed in basis points (`10_000` = 100%). A
//! market with no capital on either side reads 50/50.

use anchor_lang::prelude::*;

use crate::curve::CurveError;

/// Full certainty, in basis points
pub const PROBABILITY_SCALE: u64 = 10_000;

/// Probability of the YES outcome in basis points, derived from
/// committed reserves. Cold-start (both reserves zero) reads 5000.
pub fn probability_yes_bps(yes_reserve: u64, no_reserve: u64) -> Result<u64> {
    let total = (yes_reserve as u128)
        .checked_add(no_reserve as u128)
        .ok_or(CurveError::Overflow)?;
    if total == 0 {
        return Ok(PROBABILITY_SCALE / 2);
    }

    let bps = (yes_reserve as u128)
        .checked_mul(PROBABILITY_SCALE as u128)
        .ok_or(CurveError::Overflow)?
        .checked_div(total)
        .ok_or(CurveError::DivisionByZero)?;

    Ok(bps as u64)
}

/// Probability of the NO outcome, the complement of [`probability_yes_bps`].
pub fn probability_no_bps(yes_reserve: u64, no_reserve: u64) -> Result<u64> {
    Ok(PROBABILITY_SCALE - probability_yes_bps(yes_reserve, no_reserve)?)
}

/// Payout multiplier display value in basis points: `1 / probability`.
///
/// Always derived from the same reserve-based probability every other
/// surface reads; a price-based multiplier does not exist. Zero
/// probability has no finite multiplier.
pub fn multiplier_bps(probability_bps: u64) -> Result<u64> {
    require!(probability_bps > 0, CurveError::DivisionByZero);
    let m = (PROBABILITY_SCALE as u128)
        .checked_mul(PROBABILITY_SCALE as u128)
        .ok_or(CurveError::Overflow)?
        .checked_div(probability_bps as u128)
        .ok_or(CurveError::DivisionByZero)?;
    Ok(m as u64)
}
