//! Human-readable formatting for prices, volumes and percentages.

pub mod num;
