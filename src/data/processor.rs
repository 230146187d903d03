//! Data Processor Module
//! Reshapes loaded logger frames: sample-list reduction and stacking to long format.

use super::loader::TIME_COLUMN;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("DataFrame has no \"Time\" column")]
    MissingTimeColumn,
    #[error("No channels selected for stacking")]
    NoChannels,
}

/// How a per-second list of samples collapses to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleReduction {
    First,
    /// Matches the converter's own CSV dump.
    #[default]
    Last,
    Mean,
}

/// Handles reshaping operations on loaded frames.
pub struct DataProcessor;

impl DataProcessor {
    /// Numeric columns other than `Time`, in frame order.
    pub fn channel_names(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| col.name().as_str() != TIME_COLUMN && is_numeric(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Columns holding per-record sample lists (e.g. acceleration bursts).
    pub fn list_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| matches!(col.dtype(), DataType::List(_)))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Replace every list column with a single value per row.
    pub fn reduce_sample_lists(
        df: &DataFrame,
        reduction: SampleReduction,
    ) -> Result<DataFrame, ProcessorError> {
        let exprs: Vec<Expr> = Self::list_columns(df)
            .iter()
            .map(|name| {
                let list = col(name.as_str()).list();
                match reduction {
                    SampleReduction::First => list.first(),
                    SampleReduction::Last => list.last(),
                    SampleReduction::Mean => list.mean(),
                }
                .alias(name.as_str())
            })
            .collect();

        if exprs.is_empty() {
            return Ok(df.clone());
        }

        let reduced = df.clone().lazy().with_columns(exprs).collect()?;
        Ok(reduced)
    }

    /// Transform channel columns to long format.
    ///
    /// Output columns: ["Time", "channel", "value"], grouped by channel in the given order.
    pub fn stack_to_long(df: &DataFrame, channels: &[String]) -> Result<DataFrame, ProcessorError> {
        if df.get_column_index(TIME_COLUMN).is_none() {
            return Err(ProcessorError::MissingTimeColumn);
        }
        if channels.is_empty() {
            return Err(ProcessorError::NoChannels);
        }

        let parts: Vec<LazyFrame> = channels
            .iter()
            .map(|channel| {
                df.clone().lazy().select([
                    col(TIME_COLUMN),
                    lit(channel.as_str()).alias("channel"),
                    col(channel.as_str())
                        .cast(DataType::Float64)
                        .alias("value"),
                ])
            })
            .collect();

        let long = concat(parts, UnionArgs::default())?.collect()?;
        Ok(long)
    }
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
