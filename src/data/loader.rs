//! DAT Data Loader Module
//! Runs the templogger converter and turns its JSON dump into a Polars DataFrame.

use super::options::LoadOptions;
use super::runner::{ProcessRunner, SystemRunner};
use polars::prelude::*;
use std::io::Cursor;
use std::num::NonZeroUsize;
use thiserror::Error;
use tracing::{debug, warn};

/// Timestamp column every converter record carries.
pub const TIME_COLUMN: &str = "Time";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Converter executable must not be empty")]
    EmptyExecutable,
    #[error("At least one data file is required")]
    NoFilenames,
    #[error("Failed to launch converter '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("Converter produced no output: {command}")]
    EmptyOutput { command: String },
    #[error("Failed to parse converter JSON: {0}")]
    Json(#[source] PolarsError),
    #[error("Converter output has no \"Time\" column")]
    MissingTimeColumn,
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// A converter command: program plus its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// `<program> --format json <file1> <file2> ...`
    pub fn json_dump<S: AsRef<str>>(program: &str, filenames: &[S]) -> Self {
        let mut args = Vec::with_capacity(filenames.len() + 2);
        args.push("--format".to_string());
        args.push("json".to_string());
        args.extend(filenames.iter().map(|f| f.as_ref().to_string()));

        Self {
            program: program.to_string(),
            args,
        }
    }

    /// The invocation rendered as a single space-separated command line.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Loads templogger `.dat` files by shelling out to the converter.
pub struct DatLoader<R = SystemRunner> {
    executable: String,
    runner: R,
}

impl DatLoader<SystemRunner> {
    pub fn new(executable: impl Into<String>) -> Self {
        Self::with_runner(executable, SystemRunner)
    }
}

impl<R: ProcessRunner> DatLoader<R> {
    pub fn with_runner(executable: impl Into<String>, runner: R) -> Self {
        Self {
            executable: executable.into(),
            runner,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    /// Build the converter invocation for the given files.
    pub fn invocation<S: AsRef<str>>(&self, filenames: &[S]) -> Result<Invocation, LoaderError> {
        if self.executable.trim().is_empty() {
            return Err(LoaderError::EmptyExecutable);
        }
        if filenames.is_empty() {
            return Err(LoaderError::NoFilenames);
        }
        Ok(Invocation::json_dump(&self.executable, filenames))
    }

    /// Convert `filenames` and return them as one DataFrame with a datetime `Time` column.
    ///
    /// Blocks until the converter exits. A failing converter is not treated as
    /// an error by itself; its (usually empty) output fails to parse instead.
    pub fn load<S: AsRef<str>>(
        &self,
        filenames: &[S],
        options: &LoadOptions,
    ) -> Result<DataFrame, LoaderError> {
        let invocation = self.invocation(filenames)?;
        let command = invocation.command_line();
        debug!(%command, "running converter");

        let output = self
            .runner
            .run(&invocation.program, &invocation.args)
            .map_err(|source| LoaderError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        if !output.success {
            warn!(
                %command,
                code = ?output.code,
                stderr = output.stderr.trim(),
                "converter exited unsuccessfully"
            );
        }

        let payload = options.extract_payload(&output.stdout);
        if payload.trim().is_empty() {
            return Err(LoaderError::EmptyOutput { command });
        }
        debug!(bytes = payload.len(), "parsing converter output");

        let df = parse_payload(payload, options)?;
        let df = normalize_time(df, options)?;
        debug!(rows = df.height(), columns = df.width(), "loaded converter output");

        Ok(df)
    }
}

/// Load `.dat` files with the system converter at `executable`.
pub fn read_dat<S: AsRef<str>>(
    executable: &str,
    filenames: &[S],
    options: &LoadOptions,
) -> Result<DataFrame, LoaderError> {
    DatLoader::new(executable).load(filenames, options)
}

/// Parse a JSON array of records into a DataFrame, applying the column projection.
pub fn parse_payload(payload: &str, options: &LoadOptions) -> Result<DataFrame, LoaderError> {
    let df = JsonReader::new(Cursor::new(payload.as_bytes()))
        .with_json_format(JsonFormat::Json)
        .infer_schema_len(options.infer_schema_length.and_then(NonZeroUsize::new))
        .finish()
        .map_err(LoaderError::Json)?;

    let Some(columns) = &options.columns else {
        return Ok(df);
    };

    let mut selection: Vec<&str> = Vec::with_capacity(columns.len() + 1);
    if !columns.iter().any(|c| c == TIME_COLUMN) {
        selection.push(TIME_COLUMN);
    }
    selection.extend(columns.iter().map(String::as_str));

    if df.get_column_index(TIME_COLUMN).is_none() {
        return Err(LoaderError::MissingTimeColumn);
    }
    Ok(df.select(selection)?)
}

/// Replace the textual `Time` column with a datetime column at the same position.
pub fn normalize_time(df: DataFrame, options: &LoadOptions) -> Result<DataFrame, LoaderError> {
    if df.get_column_index(TIME_COLUMN).is_none() {
        return Err(LoaderError::MissingTimeColumn);
    }

    let strptime = StrptimeOptions {
        format: options.time_format.as_deref().map(Into::into),
        strict: options.strict_time,
        exact: true,
        cache: true,
    };

    let df = df
        .lazy()
        .with_column(col(TIME_COLUMN).str().to_datetime(
            Some(options.time_unit.into()),
            None,
            strptime,
            lit("raise"),
        ))
        .collect()?;

    Ok(df)
}
