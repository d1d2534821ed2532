//! Regional price adjustment and savings estimates.

mod locality;
mod savings;

pub use locality::{adjust_prices, LocalityAdjustment, LocalityTable, PricedRecord, DEFAULT_LOCALITY};
pub use savings::SavingsEstimate;
