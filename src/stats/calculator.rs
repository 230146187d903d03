//! Statistics Calculator Module
//! Descriptive statistics for each sensor channel of a loaded frame.

use polars::prelude::*;
use rayon::prelude::*;

use crate::data::DataProcessor;

/// Statistics for a single channel.
#[derive(Debug, Clone)]
pub struct ChannelStats {
    pub channel: String,
    pub count: usize,
    pub null_count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
    pub p95: f64,
    pub p05: f64,
}

impl Default for ChannelStats {
    fn default() -> Self {
        Self {
            channel: String::new(),
            count: 0,
            null_count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            variance: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            p95: f64::NAN,
            p05: f64::NAN,
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(values: &[f64]) -> ChannelStats {
        let n = values.len();
        if n == 0 {
            return ChannelStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        // Sample variance (ddof = 1)
        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        ChannelStats {
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            variance,
            min: sorted[0],
            max: sorted[n - 1],
            p95: Self::percentile(&sorted, 95.0),
            p05: Self::percentile(&sorted, 5.0),
            ..ChannelStats::default()
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Non-null, non-NaN values of a channel as f64.
    pub fn channel_values(df: &DataFrame, channel: &str) -> PolarsResult<Vec<f64>> {
        let values = df.column(channel)?.cast(&DataType::Float64)?;
        Ok(values
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect())
    }

    /// Compute statistics for one channel.
    pub fn compute_channel_stats(df: &DataFrame, channel: &str) -> PolarsResult<ChannelStats> {
        let values = Self::channel_values(df, channel)?;
        let mut stats = Self::compute_descriptive_stats(&values);
        stats.channel = channel.to_string();
        stats.null_count = df.height() - values.len();
        Ok(stats)
    }

    /// Compute statistics for every numeric channel in parallel, in frame order.
    pub fn compute_all_stats_parallel(df: &DataFrame) -> PolarsResult<Vec<ChannelStats>> {
        let channels = DataProcessor::channel_names(df);

        channels
            .par_iter()
            .map(|channel| Self::compute_channel_stats(df, channel))
            .collect()
    }

    /// Lay out channel statistics as a DataFrame, one row per channel.
    pub fn to_dataframe(stats: &[ChannelStats]) -> PolarsResult<DataFrame> {
        let column = |name: &str, f: fn(&ChannelStats) -> f64| {
            Column::new(name.into(), stats.iter().map(f).collect::<Vec<f64>>())
        };

        DataFrame::new(vec![
            Column::new(
                "channel".into(),
                stats.iter().map(|s| s.channel.clone()).collect::<Vec<String>>(),
            ),
            Column::new(
                "count".into(),
                stats.iter().map(|s| s.count as u64).collect::<Vec<u64>>(),
            ),
            Column::new(
                "null_count".into(),
                stats.iter().map(|s| s.null_count as u64).collect::<Vec<u64>>(),
            ),
            column("mean", |s| s.mean),
            column("std", |s| s.std),
            column("min", |s| s.min),
            column("p05", |s| s.p05),
            column("median", |s| s.median),
            column("p95", |s| s.p95),
            column("max", |s| s.max),
        ])
    }
}
