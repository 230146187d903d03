//! Data module - converter invocation, loading and reshaping

mod loader;
mod options;
mod processor;
mod runner;

pub use loader::{
    normalize_time, parse_payload, read_dat, DatLoader, Invocation, LoaderError, TIME_COLUMN,
};
pub use options::{LoadOptions, OptionsError, PayloadMode, TimeResolution};
pub use processor::{DataProcessor, ProcessorError, SampleReduction};
pub use runner::{ProcessOutput, ProcessRunner, SystemRunner};
