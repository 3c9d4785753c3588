//! # Linear Bonding Curve
//!
//! Implements the pricing law for one outcome pool:
//!
//! ```text
//! price(s)        = slope * (s + ghost)
//! cost(s₀, Δ)     = slope/2 * ((s₀+ghost+Δ)² − (s₀+ghost)²)
//! proceeds(s₀, Δ) = slope/2 * ((s₀+ghost)² − (s₀+ghost−Δ)²)
//! ```
//!
//! Cost and proceeds are the same integral run in opposite directions,
//! so `proceeds(s₀, Δ) == cost(s₀ − Δ, Δ)` holds exactly in the integer
//! units used here (no floating point anywhere).
//!
//! ## Fixed-point units
//!
//! * Shares and currency carry 6 decimals ([`PRECISION`]), matching a
//!   6-decimal collateral mint.
//! * Slope carries 9 decimals ([`SLOPE_SCALE`]): `slope = 0.001` is
//!   stored as `1_000_000`.
//! * All intermediate math is checked `u128`.
//!
//! ## Budget inverse
//!
//! Shares purchasable for a currency budget come from the closed-form
//! quadratic root
//!
//! ```text
//! Δ = −(s₀+ghost) + √((s₀+ghost)² + 2B/slope)
//! ```
//!
//! with an integer square root (Newton's method). Flooring means the
//! inverse can only undershoot: it never spends more than the budget.
//! Small-step iteration toward the budget is deliberately not used — it
//! accumulates truncation error and its result depends on the step size.

use anchor_lang::prelude::*;

/// Errors raised by curve arithmetic
#[error_code]
pub enum CurveError {
    #[msg("Cannot sell more shares than the pool has issued")]
    InsufficientShares,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Division by zero")]
    DivisionByZero,
}

/// Fixed-point scale for shares and currency (6 decimals)
pub const PRECISION: u128 = 1_000_000;

/// Fixed-point scale for the slope constant (9 decimals)
pub const SLOPE_SCALE: u128 = 1_000_000_000;

/// Denominator folding the ½ factor and both scales out of the cost
/// integral: `2 * SLOPE_SCALE * PRECISION`
const COST_DENOM: u128 = 2 * SLOPE_SCALE * PRECISION;

/// Linear bonding curve over `(slope, total_supply, ghost_supply)`
///
/// Stateless; callers pass the pool's numbers in.
pub struct LinearCurve;

impl LinearCurve {
    /// Marginal price of the next infinitesimal share, in micro-currency
    /// per whole share.
    ///
    /// `price = slope * (supply + ghost)`
    pub fn spot_price(slope: u64, supply: u64, ghost: u64) -> Result<u64> {
        let base = Self::priced_supply(supply, ghost)?;
        let price = (slope as u128)
            .checked_mul(base)
            .ok_or(CurveError::Overflow)?
            .checked_div(SLOPE_SCALE)
            .ok_or(CurveError::DivisionByZero)?;
        Ok(price as u64)
    }

    /// Exact cost of buying `shares` from current `supply`, in
    /// micro-currency.
    ///
    /// `cost = slope/2 * ((s+g+Δ)² − (s+g)²)`; `shares == 0` costs `0`.
    ///
    /// # Example
    /// ```ignore
    /// // slope 0.001, ghost 1000, empty pool, buy 100 shares:
    /// // 0.001/2 * (1100² − 1000²) = 105.0
    /// let cost = LinearCurve::buy_cost(1_000_000, 0, 1_000_000_000, 100_000_000)?;
    /// assert_eq!(cost, 105_000_000);
    /// ```
    pub fn buy_cost(slope: u64, supply: u64, ghost: u64, shares: u64) -> Result<u64> {
        if shares == 0 {
            return Ok(0);
        }
        let base = Self::priced_supply(supply, ghost)?;
        let target = base
            .checked_add(shares as u128)
            .ok_or(CurveError::Overflow)?;
        Self::segment_value(slope, base, target)
    }

    /// Exact proceeds of selling `shares` back into the pool, in
    /// micro-currency. Requires `shares ≤ supply`; ghost supply is not
    /// sellable.
    pub fn sell_proceeds(slope: u64, supply: u64, ghost: u64, shares: u64) -> Result<u64> {
        if shares == 0 {
            return Ok(0);
        }
        require!(shares <= supply, CurveError::InsufficientShares);
        let base = Self::priced_supply(supply, ghost)?;
        // shares ≤ supply ≤ base, so this cannot underflow
        let target = base
            .checked_sub(shares as u128)
            .ok_or(CurveError::Overflow)?;
        Self::segment_value(slope, target, base)
    }

    /// Shares purchasable for `budget` micro-currency, via the
    /// closed-form quadratic root. Floors, so
    /// `buy_cost(result) ≤ budget` always.
    pub fn shares_for_budget(slope: u64, supply: u64, ghost: u64, budget: u64) -> Result<u64> {
        if budget == 0 {
            return Ok(0);
        }
        let base = Self::priced_supply(supply, ghost)?;
        // base² + B * 2·S·P / slope  ==  base² + 2B/slope in whole units
        let radicand = base
            .checked_mul(base)
            .ok_or(CurveError::Overflow)?
            .checked_add(
                (budget as u128)
                    .checked_mul(COST_DENOM)
                    .ok_or(CurveError::Overflow)?
                    .checked_div(slope as u128)
                    .ok_or(CurveError::DivisionByZero)?,
            )
            .ok_or(CurveError::Overflow)?;
        let shares = integer_sqrt(radicand).saturating_sub(base);
        u64::try_from(shares).map_err(|_| error!(CurveError::Overflow))
    }

    /// Supply the curve actually prices: issued shares plus the ghost
    /// seed.
    fn priced_supply(supply: u64, ghost: u64) -> Result<u128> {
        (supply as u128)
            .checked_add(ghost as u128)
            .ok_or_else(|| error!(CurveError::Overflow))
    }

    /// Integral of the price line between two priced-supply points
    /// `lo ≤ hi`: `slope * (hi² − lo²) / (2·S·P)`.
    fn segment_value(slope: u64, lo: u128, hi: u128) -> Result<u64> {
        let hi_sq = hi.checked_mul(hi).ok_or(CurveError::Overflow)?;
        let lo_sq = lo.checked_mul(lo).ok_or(CurveError::Overflow)?;
        let span = hi_sq.checked_sub(lo_sq).ok_or(CurveError::Overflow)?;
        let value = (slope as u128)
            .checked_mul(span)
            .ok_or(CurveError::Overflow)?
            .checked_div(COST_DENOM)
            .ok_or(CurveError::DivisionByZero)?;
        u64::try_from(value).map_err(|_| error!(CurveError::Overflow))
    }
}

/// Integer square root using Newton's method
///
/// Computes floor(√x) for any non-negative integer.
pub fn integer_sqrt(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }

    let mut z = (x + 1) / 2;
    let mut y = x;

    while z < y {
        y = z;
        z = (x / z + z) / 2;
    }

    y
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // slope 0.001, ghost 1000 shares — the canonical market shape
    const SLOPE: u64 = 1_000_000;
    const GHOST: u64 = 1_000 * PRECISION as u64;

    fn whole(n: u64) -> u64 {
        n * PRECISION as u64
    }

    #[test]
    fn test_integer_sqrt() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(4), 2);
        assert_eq!(integer_sqrt(10), 3); // floor(√10) = 3
        assert_eq!(integer_sqrt(1_000_000), 1_000);
        assert_eq!(integer_sqrt(u128::from(u64::MAX)), 4_294_967_295);
    }

    #[test]
    fn test_spot_price_strictly_increasing() {
        let mut last = 0;
        for s in 1..=50u64 {
            let price = LinearCurve::spot_price(SLOPE, whole(s * 10), GHOST).unwrap();
            assert!(price > last, "price must rise with supply");
            last = price;
        }
    }

    #[test]
    fn test_spot_price_at_birth_comes_from_ghost() {
        // 0.001 * 1000 = 1.0 per share even with zero issued supply
        let price = LinearCurve::spot_price(SLOPE, 0, GHOST).unwrap();
        assert_eq!(price, whole(1));
    }

    #[test]
    fn test_zero_shares_cost_nothing() {
        assert_eq!(LinearCurve::buy_cost(SLOPE, whole(500), GHOST, 0).unwrap(), 0);
        assert_eq!(LinearCurve::sell_proceeds(SLOPE, whole(500), GHOST, 0).unwrap(), 0);
        assert_eq!(LinearCurve::shares_for_budget(SLOPE, whole(500), GHOST, 0).unwrap(), 0);
    }

    #[test]
    fn test_reference_scenario_costs() {
        // 0.001/2 * (1100² − 1000²) = 105.0
        let yes_cost = LinearCurve::buy_cost(SLOPE, 0, GHOST, whole(100)).unwrap();
        assert_eq!(yes_cost, 105 * PRECISION as u64);

        // 0.001/2 * (1050² − 1000²) = 51.25
        let no_cost = LinearCurve::buy_cost(SLOPE, 0, GHOST, whole(50)).unwrap();
        assert_eq!(no_cost, 51_250_000);
    }

    #[test]
    fn test_cost_proceeds_symmetry_exact() {
        for (supply, delta) in [(100u64, 30u64), (1, 1), (5_000, 4_999), (777, 123)] {
            let proceeds =
                LinearCurve::sell_proceeds(SLOPE, whole(supply), GHOST, whole(delta)).unwrap();
            let cost =
                LinearCurve::buy_cost(SLOPE, whole(supply - delta), GHOST, whole(delta)).unwrap();
            assert_eq!(proceeds, cost);
        }
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let supply = whole(250);
        let delta = whole(40);
        let cost = LinearCurve::buy_cost(SLOPE, supply, GHOST, delta).unwrap();
        let proceeds = LinearCurve::sell_proceeds(SLOPE, supply + delta, GHOST, delta).unwrap();
        assert_eq!(cost, proceeds);
    }

    #[test]
    fn test_budget_inverse_exact_on_reference_numbers() {
        // 105.0 buys back exactly the 100 shares it priced
        let shares = LinearCurve::shares_for_budget(SLOPE, 0, GHOST, 105_000_000).unwrap();
        assert_eq!(shares, whole(100));
    }

    #[test]
    fn test_budget_inverse_never_overspends() {
        let supply = whole(317);
        for budget in [1u64, 999, 1_000_000, 33_333_333, 105_000_001, 9_999_999_999] {
            let shares = LinearCurve::shares_for_budget(SLOPE, supply, GHOST, budget).unwrap();
            let cost = LinearCurve::buy_cost(SLOPE, supply, GHOST, shares).unwrap();
            assert!(cost <= budget, "inverse overspent: {} > {}", cost, budget);

            // one more whole share would have burst the budget
            let next = LinearCurve::buy_cost(SLOPE, supply, GHOST, shares + whole(1)).unwrap();
            assert!(next > budget);
        }
    }

    #[test]
    fn test_closed_form_matches_stepped_iteration() {
        // Migration check: the originating system stepped toward the
        // budget in 0.01-share increments. The closed form must land
        // within one step of that approximation.
        let supply = whole(80);
        let budget = 73_500_000u64;
        let step = PRECISION as u64 / 100;

        let mut stepped = 0u64;
        loop {
            let cost = LinearCurve::buy_cost(SLOPE, supply, GHOST, stepped + step).unwrap();
            if cost > budget {
                break;
            }
            stepped += step;
        }

        let closed = LinearCurve::shares_for_budget(SLOPE, supply, GHOST, budget).unwrap();
        assert!(closed >= stepped);
        assert!(closed - stepped < step);
    }

    #[test]
    fn test_cannot_sell_ghost_supply() {
        let err = LinearCurve::sell_proceeds(SLOPE, whole(10), GHOST, whole(11));
        assert!(err.is_err());
        // selling everything issued is fine, the ghost stays priced in
        let proceeds = LinearCurve::sell_proceeds(SLOPE, whole(10), GHOST, whole(10)).unwrap();
        assert!(proceeds > 0);
    }
}
