//! templog - load templogger DAT files and print them as a table
//!
//! Runs the `templogger` converter, parses its JSON output with Polars and
//! prints the frame, its channel statistics, or writes it to CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use templog_frame::data::{
    DataProcessor, DatLoader, LoadOptions, PayloadMode, SampleReduction, TimeResolution,
};
use templog_frame::export::write_csv;
use templog_frame::stats::StatsCalculator;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TimeUnitArg {
    Ms,
    Us,
    Ns,
}

impl From<TimeUnitArg> for TimeResolution {
    fn from(v: TimeUnitArg) -> Self {
        match v {
            TimeUnitArg::Ms => TimeResolution::Milliseconds,
            TimeUnitArg::Us => TimeResolution::Microseconds,
            TimeUnitArg::Ns => TimeResolution::Nanoseconds,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReduceArg {
    First,
    Last,
    Mean,
}

impl From<ReduceArg> for SampleReduction {
    fn from(v: ReduceArg) -> Self {
        match v {
            ReduceArg::First => SampleReduction::First,
            ReduceArg::Last => SampleReduction::Last,
            ReduceArg::Mean => SampleReduction::Mean,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "templog", version, about = "Load templogger DAT files as a table")]
struct Cli {
    /// DAT files, passed to the converter in order
    #[arg(required = true)]
    files: Vec<String>,

    /// Converter executable
    #[arg(long, default_value = "templogger")]
    converter: String,

    /// JSON file with load options; flags below override it
    #[arg(long)]
    options: Option<PathBuf>,

    /// strftime format of the Time values (inferred when omitted)
    #[arg(long = "time-format")]
    time_format: Option<String>,

    #[arg(long = "time-unit", value_enum)]
    time_unit: Option<TimeUnitArg>,

    /// Parse all of stdout instead of only its first line
    #[arg(long = "whole-output", default_value_t = false)]
    whole_output: bool,

    /// Collapse per-second sample lists (acceleration) to one value
    #[arg(long, value_enum)]
    reduce: Option<ReduceArg>,

    /// Print channels stacked as Time/channel/value
    #[arg(long, default_value_t = false)]
    long: bool,

    /// Print per-channel statistics instead of the data
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Write the table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl Cli {
    fn load_options(&self) -> Result<LoadOptions> {
        let mut opts = match &self.options {
            Some(path) => LoadOptions::from_json_file(path)?,
            None => LoadOptions::default(),
        };

        if let Some(fmt) = &self.time_format {
            opts.time_format = Some(fmt.clone());
        }
        if let Some(unit) = self.time_unit {
            opts.time_unit = unit.into();
        }
        if self.whole_output {
            opts.payload_mode = PayloadMode::WholeOutput;
        }
        Ok(opts)
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only data
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let options = cli.load_options()?;

    let loader = DatLoader::new(cli.converter.as_str());
    let mut df = loader
        .load(&cli.files, &options)
        .with_context(|| format!("loading {}", cli.files.join(" ")))?;
    info!(rows = df.height(), columns = df.width(), "loaded");

    if let Some(reduction) = cli.reduce {
        df = DataProcessor::reduce_sample_lists(&df, reduction.into())?;
    }

    if cli.long {
        let channels = DataProcessor::channel_names(&df);
        df = DataProcessor::stack_to_long(&df, &channels)?;
    }

    if let Some(path) = &cli.csv {
        write_csv(&mut df, path).with_context(|| format!("writing {}", path.display()))?;
    }

    if cli.stats {
        let stats = StatsCalculator::compute_all_stats_parallel(&df)?;
        println!("{}", StatsCalculator::to_dataframe(&stats)?);
    } else if cli.csv.is_none() {
        println!("{df}");
    }

    Ok(())
}
