//! CSV Export Module
//! Writes a loaded frame to CSV using the logger's timestamp layout.

use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

use crate::data::DataProcessor;

/// Timestamp layout used in exported CSV files.
pub const CSV_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Column '{0}' holds sample lists; reduce them before exporting to CSV")]
    ListColumn(String),
    #[error("Failed to create {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to write CSV: {0}")]
    Polars(#[from] PolarsError),
}

/// Write `df` to `path` as CSV with a header row.
pub fn write_csv(df: &mut DataFrame, path: impl AsRef<Path>) -> Result<(), ExportError> {
    if let Some(name) = DataProcessor::list_columns(df).into_iter().next() {
        return Err(ExportError::ListColumn(name));
    }

    let path = path.as_ref();
    let mut file = File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_datetime_format(Some(CSV_DATETIME_FORMAT.to_string()))
        .finish(df)?;

    tracing::info!(path = %path.display(), rows = df.height(), "wrote CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{normalize_time, LoadOptions};

    #[test]
    fn writes_header_and_formatted_times() {
        let df = DataFrame::new(vec![
            Column::new("Time".into(), &["2019-11-23T13:33:36", "2019-11-23T13:33:37"]),
            Column::new("Temperature".into(), &[26.5f64, 27.25]),
        ])
        .unwrap();
        let mut df = normalize_time(df, &LoadOptions::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&mut df, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Time,Temperature");
        assert_eq!(lines[1], "2019-11-23 13:33:36,26.5");
        assert_eq!(lines[2], "2019-11-23 13:33:37,27.25");
    }

    #[test]
    fn refuses_list_columns() {
        let acc = Series::new(
            "AccelerationX".into(),
            &[Series::new("".into(), &[1.0f64, 2.0])],
        );
        let mut df = DataFrame::new(vec![
            Column::new("Time".into(), &["2019-11-23T13:33:36"]),
            acc.into_column(),
        ])
        .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let err = write_csv(&mut df, dir.path().join("out.csv")).unwrap_err();
        assert!(matches!(err, ExportError::ListColumn(ref name) if name == "AccelerationX"));
    }
}
