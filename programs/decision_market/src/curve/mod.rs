//! # Bonding-Curve Pricing Module
//!
//! Pricing for YES/NO decision shares. Each outcome is backed by its own
//! pool and priced along a **linear bonding curve**:
//!
//! ```text
//!            price(s) = slope * (s + ghost)
//!
//!   price ▲
//!         │                        ╱
//!         │                      ╱   cost of Δ shares
//!         │                    ╱   = area under the line
//!         │                  ╱█████
//!         │                ╱███████
//!         │  slope·ghost ╱█████████
//!         └──────────────┴────────┴──▶ supply
//!                        s₀      s₀+Δ
//! ```
//!
//! `ghost` is a virtual seed supply: it lifts the curve off zero so the
//! first share never costs nothing, but it is never minted, traded or
//! redeemed. Cost and proceeds are the exact integral of the line, and
//! the budget inverse is the closed-form quadratic root, so every
//! quantity is deterministic integer arithmetic.
//!
//! Probability is a separate concern: it comes from the capital committed
//! to each pool (see [`odds`]), not from the curve itself.

pub mod linear;
pub mod odds;

pub use linear::*;
pub use odds::*;
