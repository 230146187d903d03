#![cfg(unix)]

mod common;

use common::{converters, path_str};
use polars::prelude::*;
use templog_frame::data::{
    DataProcessor, DatLoader, LoadOptions, LoaderError, PayloadMode, SampleReduction,
};

#[test]
fn loads_every_file_in_argument_order() {
    let loader = DatLoader::new(path_str(&converters().echo));
    let df = loader
        .load(&["data/12161037.DAT", "data/12161237.DAT"], &LoadOptions::default())
        .unwrap();

    assert_eq!(df.height(), 2);
    assert!(matches!(
        df.column("Time").unwrap().dtype(),
        DataType::Datetime(_, _)
    ));

    let files = df.column("File").unwrap().str().unwrap().clone();
    assert_eq!(files.get(0), Some("data/12161037.DAT"));
    assert_eq!(files.get(1), Some("data/12161237.DAT"));
}

#[test]
fn acceleration_bursts_reduce_to_last_sample() {
    let df = DatLoader::new(path_str(&converters().echo))
        .load(&["a.dat"], &LoadOptions::default())
        .unwrap();

    let reduced = DataProcessor::reduce_sample_lists(&df, SampleReduction::Last).unwrap();
    assert_eq!(
        reduced.column("AccelerationX").unwrap().f64().unwrap().get(0),
        Some(3.0)
    );
}

#[test]
fn failing_converter_yields_no_table() {
    let err = DatLoader::new(path_str(&converters().failing))
        .load(&["missing.dat"], &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, LoaderError::EmptyOutput { .. }));
}

#[test]
fn missing_executable_fails_to_launch() {
    let missing = converters().echo.with_file_name("not-installed");
    let err = DatLoader::new(path_str(&missing))
        .load(&["a.dat"], &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, LoaderError::Spawn { .. }));
}

#[test]
fn missing_time_field_fails() {
    let err = DatLoader::new(path_str(&converters().no_time))
        .load(&["a.dat"], &LoadOptions::default())
        .unwrap_err();
    assert!(matches!(err, LoaderError::MissingTimeColumn));
}

#[test]
fn indented_output_requires_whole_output_mode() {
    let loader = DatLoader::new(path_str(&converters().pretty));

    assert!(loader.load(&["a.dat"], &LoadOptions::default()).is_err());

    let options = LoadOptions {
        payload_mode: PayloadMode::WholeOutput,
        ..Default::default()
    };
    let df = loader.load(&["a.dat"], &options).unwrap();
    assert_eq!(df.height(), 1);
    assert_eq!(df.column("Value").unwrap().f64().unwrap().get(0), Some(1.0));
}
