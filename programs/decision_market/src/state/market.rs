//! Decision Market State
//!
//! One market tracks one real-world decision and carries both outcome
//! pools in a single account, so the runtime's per-account write lock
//! serializes every trade touching the pair — markets contend only with
//! themselves and run in parallel with each other.

use anchor_lang::prelude::*;

use crate::curve::{self, CurveError, LinearCurve};
use crate::window;

/// One outcome's financial state.
///
/// `ghost_supply` is the virtual seed that sets the opening price; it is
/// priced on every evaluation but never issued, sold or redeemed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub struct Pool {
    /// Shares issued to traders (micro-shares, excludes the ghost seed)
    pub total_supply: u64,

    /// Virtual seed supply (micro-shares)
    pub ghost_supply: u64,

    /// Price steepness, fixed at creation (SLOPE_SCALE fixed-point)
    pub slope: u64,

    /// Currency collected from buys minus paid out on sells (micro-units)
    pub reserve: u64,
}

impl Pool {
    /// Marginal price of the next share at current supply.
    pub fn spot_price(&self) -> Result<u64> {
        LinearCurve::spot_price(self.slope, self.total_supply, self.ghost_supply)
    }
}

/// Market account — one per tracked decision
///
/// Seeds: ["market", config, market_id.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct Market {
    /// Sequential market identifier
    pub id: u64,

    /// The platform decision this market tracks
    pub decision_id: u64,

    /// Market creator's address
    pub creator: Pubkey,

    /// Collateral token mint address
    pub collateral_mint: Pubkey,

    /// Unix timestamp when the market was created
    pub created_at: i64,

    /// Effective investment-window duration in seconds; grows on buys,
    /// never shrinks, never moves `created_at`
    pub window_duration: i64,

    /// YES outcome pool
    pub yes_pool: Pool,

    /// NO outcome pool
    pub no_pool: Pool,

    /// Committed trades so far; sequence number for history records
    pub trade_count: u64,

    /// Market lifecycle status
    pub status: MarketStatus,

    /// Winning outcome (only valid after resolution)
    pub outcome: Outcome,

    /// PDA bump seed
    pub bump: u8,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";

    pub fn pool(&self, side: Side) -> &Pool {
        match side {
            Side::Yes => &self.yes_pool,
            Side::No => &self.no_pool,
        }
    }

    pub fn pool_mut(&mut self, side: Side) -> &mut Pool {
        match side {
            Side::Yes => &mut self.yes_pool,
            Side::No => &mut self.no_pool,
        }
    }

    /// Community-implied YES probability in basis points.
    pub fn probability_yes_bps(&self) -> Result<u64> {
        curve::probability_yes_bps(self.yes_pool.reserve, self.no_pool.reserve)
    }

    /// Probability of the given side — the value trade history records
    /// as the normalized per-share price.
    pub fn probability_bps(&self, side: Side) -> Result<u64> {
        match side {
            Side::Yes => self.probability_yes_bps(),
            Side::No => curve::probability_no_bps(self.yes_pool.reserve, self.no_pool.reserve),
        }
    }

    /// Absolute investment-window expiry.
    pub fn expires_at(&self) -> i64 {
        window::expires_at(self.created_at, self.window_duration)
    }

    /// Whether buying has closed at `now`.
    pub fn window_expired(&self, now: i64) -> bool {
        window::is_expired(now, self.created_at, self.window_duration)
    }

    /// Price and commit a buy against one pool: read supply, integrate
    /// the curve, write supply/reserve and stretch the window. Returns
    /// the cost in micro-currency.
    ///
    /// Callers hold the account lock for the whole read-compute-write,
    /// so the cost is always computed against the exact supply it
    /// commits on top of.
    pub fn apply_buy(&mut self, side: Side, shares: u64) -> Result<u64> {
        let pool = self.pool_mut(side);
        let cost = LinearCurve::buy_cost(pool.slope, pool.total_supply, pool.ghost_supply, shares)?;

        pool.total_supply = pool
            .total_supply
            .checked_add(shares)
            .ok_or(CurveError::Overflow)?;
        pool.reserve = pool.reserve.checked_add(cost).ok_or(CurveError::Overflow)?;

        self.window_duration = self
            .window_duration
            .checked_add(window::extension_secs(shares))
            .ok_or(CurveError::Overflow)?;

        Ok(cost)
    }

    /// Price and commit a sell against one pool. Returns the proceeds in
    /// micro-currency. The window is untouched.
    pub fn apply_sell(&mut self, side: Side, shares: u64) -> Result<u64> {
        let pool = self.pool_mut(side);
        let proceeds =
            LinearCurve::sell_proceeds(pool.slope, pool.total_supply, pool.ghost_supply, shares)?;

        // Per-trade truncation on earlier buys can leave the reserve a
        // few micro-units short of the full integral; pay out what the
        // pool actually holds so the reserve never goes negative.
        let proceeds = proceeds.min(pool.reserve);

        pool.total_supply = pool
            .total_supply
            .checked_sub(shares)
            .ok_or(CurveError::InsufficientShares)?;
        pool.reserve = pool
            .reserve
            .checked_sub(proceeds)
            .ok_or(CurveError::Overflow)?;

        Ok(proceeds)
    }

    /// Resolve the market: record the winning outcome, freeze trading
    /// and fold the losing pool's reserve into the winning pool. The
    /// combined pot backs redemption and odds read 100/0 from here on.
    /// Returns the pot in micro-currency.
    pub fn apply_resolution(&mut self, winner: Side) -> Result<u64> {
        self.outcome = match winner {
            Side::Yes => Outcome::Yes,
            Side::No => Outcome::No,
        };
        self.status = MarketStatus::Resolved;

        let (winning, losing) = match winner {
            Side::Yes => (&mut self.yes_pool, &mut self.no_pool),
            Side::No => (&mut self.no_pool, &mut self.yes_pool),
        };
        winning.reserve = winning
            .reserve
            .checked_add(losing.reserve)
            .ok_or(CurveError::Overflow)?;
        losing.reserve = 0;

        Ok(winning.reserve)
    }

    /// Retire `shares` winning shares for their pro-rata slice of the
    /// pot after resolution:
    ///
    /// ```text
    /// payout = shares / total_supply * reserve
    /// ```
    ///
    /// Floor division; the remainder stays in the reserve until later
    /// redeemers drain it, and the last redeemer sweeps it, since the
    /// supply empties along with the pot. Ghost supply never counts
    /// toward `total_supply`, so the pot divides among real holders
    /// only. Returns the payout in micro-currency.
    pub fn apply_redeem(&mut self, side: Side, shares: u64) -> Result<u64> {
        let pool = self.pool_mut(side);
        require!(
            shares > 0 && shares <= pool.total_supply,
            CurveError::InsufficientShares
        );

        let payout = (shares as u128)
            .checked_mul(pool.reserve as u128)
            .ok_or(CurveError::Overflow)?
            .checked_div(pool.total_supply as u128)
            .ok_or(CurveError::DivisionByZero)? as u64;

        pool.total_supply = pool
            .total_supply
            .checked_sub(shares)
            .ok_or(CurveError::Overflow)?;
        pool.reserve = pool
            .reserve
            .checked_sub(payout)
            .ok_or(CurveError::Overflow)?;

        Ok(payout)
    }
}

/// Traded outcome side
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum Side {
    Yes,
    No,
}

/// Market lifecycle status (one-way transitions)
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum MarketStatus {
    /// Market is open for trading
    #[default]
    Open,
    /// Decision is being tracked; purely informational, no pricing effect
    Tracking,
    /// Market has been resolved, all trading frozen
    Resolved,
}

/// Decision outcome
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum Outcome {
    /// Not yet determined
    #[default]
    Undetermined,
    /// YES outcome occurred
    Yes,
    /// NO outcome occurred
    No,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::PRECISION;

    const DAY: i64 = 24 * 60 * 60;

    fn whole(n: u64) -> u64 {
        n * PRECISION as u64
    }

    fn fresh_market() -> Market {
        let pool = Pool {
            total_supply: 0,
            ghost_supply: whole(1_000),
            slope: 1_000_000, // 0.001
            reserve: 0,
        };
        Market {
            id: 0,
            decision_id: 7,
            creator: Pubkey::default(),
            collateral_mint: Pubkey::default(),
            created_at: 1_700_000_000,
            window_duration: DAY,
            yes_pool: pool,
            no_pool: pool,
            trade_count: 0,
            status: MarketStatus::Open,
            outcome: Outcome::Undetermined,
            bump: 255,
        }
    }

    #[test]
    fn test_reference_scenario_end_to_end() {
        let mut market = fresh_market();

        let yes_cost = market.apply_buy(Side::Yes, whole(100)).unwrap();
        assert_eq!(yes_cost, 105_000_000);
        assert_eq!(market.yes_pool.total_supply, whole(100));
        assert_eq!(market.yes_pool.reserve, 105_000_000);
        assert_eq!(market.probability_yes_bps().unwrap(), 10_000);
        // marginal price moved from 1.0 to 0.001 * 1100 = 1.1
        assert_eq!(market.yes_pool.spot_price().unwrap(), 1_100_000);

        let no_cost = market.apply_buy(Side::No, whole(50)).unwrap();
        assert_eq!(no_cost, 51_250_000);
        assert_eq!(market.probability_yes_bps().unwrap(), 6_720);
    }

    #[test]
    fn test_serialized_buys_accumulate_marginal_costs() {
        // Unit buys applied one after another must each be priced
        // against the supply the previous one committed — a lost update
        // would repeat a price and undercount the reserve.
        let mut market = fresh_market();
        let mut expected_reserve = 0u64;
        let mut last_cost = 0u64;

        for i in 0..20u64 {
            let supply_before = market.yes_pool.total_supply;
            let cost = market.apply_buy(Side::Yes, whole(1)).unwrap();
            assert_eq!(market.yes_pool.total_supply, supply_before + whole(1));
            assert!(cost > last_cost, "buy {} not priced on fresh supply", i);
            expected_reserve += cost;
            last_cost = cost;
        }

        assert_eq!(market.yes_pool.total_supply, whole(20));
        assert_eq!(market.yes_pool.reserve, expected_reserve);
    }

    #[test]
    fn test_buy_sell_round_trip_restores_pool_exactly() {
        let mut market = fresh_market();
        market.apply_buy(Side::Yes, whole(33)).unwrap();
        let supply_before = market.yes_pool.total_supply;
        let reserve_before = market.yes_pool.reserve;

        let cost = market.apply_buy(Side::Yes, whole(12)).unwrap();
        let proceeds = market.apply_sell(Side::Yes, whole(12)).unwrap();

        assert_eq!(cost, proceeds);
        assert_eq!(market.yes_pool.total_supply, supply_before);
        assert_eq!(market.yes_pool.reserve, reserve_before);
    }

    #[test]
    fn test_no_negative_state_under_mixed_sequence() {
        let mut market = fresh_market();
        market.apply_buy(Side::Yes, whole(10)).unwrap();
        market.apply_buy(Side::No, whole(4)).unwrap();
        market.apply_sell(Side::Yes, whole(3)).unwrap();
        market.apply_buy(Side::Yes, whole(1)).unwrap();
        market.apply_sell(Side::Yes, whole(8)).unwrap();
        market.apply_sell(Side::No, whole(4)).unwrap();

        assert_eq!(market.yes_pool.total_supply, 0);
        assert_eq!(market.no_pool.total_supply, 0);
        // reserves drained but never below zero
        assert_eq!(market.no_pool.reserve, 0);
    }

    #[test]
    fn test_selling_beyond_supply_rejected() {
        let mut market = fresh_market();
        market.apply_buy(Side::No, whole(5)).unwrap();
        assert!(market.apply_sell(Side::No, whole(6)).is_err());
        // pool untouched by the failed sell
        assert_eq!(market.no_pool.total_supply, whole(5));
    }

    #[test]
    fn test_window_grows_on_buy_only() {
        let mut market = fresh_market();
        let expiry0 = market.expires_at();

        market.apply_buy(Side::Yes, whole(100)).unwrap();
        let expiry1 = market.expires_at();
        assert_eq!(expiry1, expiry0 + 3_600); // 100 shares = 1h of window

        market.apply_sell(Side::Yes, whole(100)).unwrap();
        assert_eq!(market.expires_at(), expiry1);
    }

    #[test]
    fn test_resolution_folds_losing_reserve_into_pot() {
        let mut market = fresh_market();
        let yes_cost = market.apply_buy(Side::Yes, whole(100)).unwrap();
        let no_cost = market.apply_buy(Side::No, whole(50)).unwrap();

        let pot = market.apply_resolution(Side::Yes).unwrap();
        assert_eq!(pot, yes_cost + no_cost);
        assert_eq!(market.yes_pool.reserve, pot);
        assert_eq!(market.no_pool.reserve, 0);
        assert_eq!(market.status, MarketStatus::Resolved);
        assert_eq!(market.outcome, Outcome::Yes);
        assert_eq!(market.probability_yes_bps().unwrap(), 10_000);
    }

    #[test]
    fn test_redemption_splits_pot_pro_rata() {
        let mut market = fresh_market();
        // two winning holders at 60/40, one losing holder funding the pot
        let cost_a = market.apply_buy(Side::Yes, whole(60)).unwrap();
        let cost_b = market.apply_buy(Side::Yes, whole(40)).unwrap();
        let cost_no = market.apply_buy(Side::No, whole(50)).unwrap();

        let pot = market.apply_resolution(Side::Yes).unwrap();
        assert_eq!(pot, cost_a + cost_b + cost_no);

        let payout_a = market.apply_redeem(Side::Yes, whole(60)).unwrap();
        assert_eq!(payout_a, pot * 60 / 100);
        let payout_b = market.apply_redeem(Side::Yes, whole(40)).unwrap();
        assert_eq!(payout_b, pot * 40 / 100);

        // the whole pot leaves and the pool empties
        assert_eq!(payout_a + payout_b, pot);
        assert_eq!(market.yes_pool.total_supply, 0);
        assert_eq!(market.yes_pool.reserve, 0);
    }

    #[test]
    fn test_redemption_excludes_ghost_supply_from_the_split() {
        let mut market = fresh_market();
        market.apply_buy(Side::Yes, whole(10)).unwrap();
        market.apply_buy(Side::No, whole(10)).unwrap();
        let pot = market.apply_resolution(Side::Yes).unwrap();

        // the sole holder of all issued shares takes the full pot; if
        // the ghost seed counted toward the supply the payout would be
        // a hundredth of this
        let payout = market.apply_redeem(Side::Yes, whole(10)).unwrap();
        assert_eq!(payout, pot);
    }

    #[test]
    fn test_redemption_flooring_dust_goes_to_the_last_redeemer() {
        let mut market = fresh_market();
        // 3 winning shares against a pot of 5.0065 — not divisible by 3
        market.apply_buy(Side::Yes, whole(3)).unwrap();
        market.apply_buy(Side::No, whole(2)).unwrap();
        let pot = market.apply_resolution(Side::Yes).unwrap();
        assert_eq!(pot, 5_006_500);
        assert_ne!(pot % 3, 0);

        let first = market.apply_redeem(Side::Yes, whole(1)).unwrap();
        assert_eq!(first, pot / 3); // floored
        let second = market.apply_redeem(Side::Yes, whole(1)).unwrap();
        let last = market.apply_redeem(Side::Yes, whole(1)).unwrap();

        // flooring leaves the remainder in the reserve, and the last
        // redeemer drains it along with the supply
        assert!(last >= first);
        assert_eq!(first + second + last, pot);
        assert_eq!(market.yes_pool.reserve, 0);
        assert_eq!(market.yes_pool.total_supply, 0);
    }

    #[test]
    fn test_redemption_beyond_issued_supply_rejected() {
        let mut market = fresh_market();
        market.apply_buy(Side::Yes, whole(5)).unwrap();
        market.apply_resolution(Side::Yes).unwrap();

        assert!(market.apply_redeem(Side::Yes, whole(6)).is_err());
        assert!(market.apply_redeem(Side::Yes, 0).is_err());
        // pool untouched by the failed redemptions
        assert_eq!(market.yes_pool.total_supply, whole(5));
    }

    #[test]
    fn test_window_expiry_gates_by_timestamp() {
        let market = fresh_market();
        assert!(!market.window_expired(market.created_at + DAY - 1));
        assert!(market.window_expired(market.created_at + DAY));
    }
}
