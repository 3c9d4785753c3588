//! State structures for the decision market engine

pub mod config;
pub mod history;
pub mod market;
pub mod position;

pub use config::*;
pub use history::*;
pub use market::*;
pub use position::*;
