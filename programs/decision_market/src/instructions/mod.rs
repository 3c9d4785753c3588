//! Instruction handlers for the decision market engine
//!
//! Each instruction represents an action the platform can take:
//! - `initialize` / `set_paused` - protocol setup and the admin switch
//! - `create_market` - open a market for a tracked decision
//! - `buy_shares` / `buy_for_budget` / `sell_shares` - trade outcome shares
//! - `set_tracking` / `resolve_market` - lifecycle transitions (oracle only)
//! - `redeem` - claim winnings after resolution

pub mod create_market;
pub mod initialize;
pub mod redeem;
pub mod resolve;
pub mod trade;

pub use create_market::*;
pub use initialize::*;
pub use redeem::*;
pub use resolve::*;
pub use trade::*;
