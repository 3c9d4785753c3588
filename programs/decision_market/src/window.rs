//! Investment Window
//!
//! Buying is only open for a bounded span after market creation:
//! `expiry = created_at + window_duration`. Every buy stretches the
//! effective duration by a small amount proportional to the shares
//! bought, so heavily-traded markets stay open longer while idle ones
//! expire on schedule. Sells never move the window, and selling remains
//! allowed after expiry until the market resolves.

use crate::curve::PRECISION;

/// Window-time granted per whole share bought: 0.01 hour = 36 seconds.
pub const TIME_PER_SHARE_SECS: u64 = 36;

/// Extra window seconds earned by buying `shares` (6-decimal micro-shares).
pub fn extension_secs(shares: u64) -> i64 {
    ((shares as u128) * (TIME_PER_SHARE_SECS as u128) / PRECISION) as i64
}

/// Absolute expiry timestamp of a window.
pub fn expires_at(created_at: i64, window_duration: i64) -> i64 {
    created_at.saturating_add(window_duration)
}

/// Whether the window has closed at `now`.
pub fn is_expired(now: i64, created_at: i64, window_duration: i64) -> bool {
    now >= expires_at(created_at, window_duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 24 * 60 * 60;

    #[test]
    fn test_extension_is_proportional_to_shares() {
        assert_eq!(extension_secs(0), 0);
        assert_eq!(extension_secs(PRECISION as u64), 36); // one share
        assert_eq!(extension_secs(100 * PRECISION as u64), 3_600); // 100 shares = 1h
        assert_eq!(extension_secs(PRECISION as u64 / 2), 18); // fractional shares count
    }

    #[test]
    fn test_expiry_boundary() {
        let created = 1_700_000_000;
        assert!(!is_expired(created + DAY - 1, created, DAY));
        assert!(is_expired(created + DAY, created, DAY));
    }

    #[test]
    fn test_expiry_monotonic_under_buys() {
        let created = 1_700_000_000;
        let mut duration = DAY;
        let mut last_expiry = expires_at(created, duration);
        for shares in [1u64, 50, 1_000, 0] {
            duration += extension_secs(shares * PRECISION as u64);
            let expiry = expires_at(created, duration);
            assert!(expiry >= last_expiry);
            last_expiry = expiry;
        }
    }
}
