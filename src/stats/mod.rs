//! Stats module - per-channel descriptive statistics

mod calculator;

pub use calculator::{ChannelStats, StatsCalculator};
