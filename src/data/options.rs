//! Load Options Module
//! Typed settings for payload extraction and JSON/timestamp parsing.

use polars::prelude::TimeUnit;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Failed to read options file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Invalid options file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Which part of the converter's stdout holds the JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadMode {
    /// Only the first line. Pretty-printed output (`templogger -t`) gets truncated.
    #[default]
    FirstLine,
    /// Everything written to stdout.
    WholeOutput,
}

/// Resolution of the parsed `Time` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeResolution {
    #[serde(rename = "ms")]
    Milliseconds,
    #[default]
    #[serde(rename = "us")]
    Microseconds,
    #[serde(rename = "ns")]
    Nanoseconds,
}

impl From<TimeResolution> for TimeUnit {
    fn from(value: TimeResolution) -> Self {
        match value {
            TimeResolution::Milliseconds => TimeUnit::Milliseconds,
            TimeResolution::Microseconds => TimeUnit::Microseconds,
            TimeResolution::Nanoseconds => TimeUnit::Nanoseconds,
        }
    }
}

/// Options controlling how converter output becomes a DataFrame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    pub payload_mode: PayloadMode,
    /// strftime format of the `Time` strings; inferred when `None`.
    pub time_format: Option<String>,
    pub time_unit: TimeResolution,
    /// Fail on unparseable timestamps instead of producing nulls.
    pub strict_time: bool,
    /// Records scanned for JSON schema inference; `None` scans all of them.
    pub infer_schema_length: Option<usize>,
    /// Columns to keep. `Time` is always kept.
    pub columns: Option<Vec<String>>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            payload_mode: PayloadMode::FirstLine,
            time_format: None,
            time_unit: TimeResolution::Microseconds,
            strict_time: true,
            infer_schema_length: Some(100),
            columns: None,
        }
    }
}

impl LoadOptions {
    /// Read options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| OptionsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Pull the JSON payload out of captured stdout.
    pub fn extract_payload<'a>(&self, stdout: &'a str) -> &'a str {
        match self.payload_mode {
            PayloadMode::FirstLine => stdout.lines().next().unwrap_or(""),
            PayloadMode::WholeOutput => stdout,
        }
    }
}
