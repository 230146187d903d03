//! templog-frame - load templogger `.dat` files into Polars DataFrames
//!
//! The proprietary logger format is decoded by the external `templogger`
//! converter; this crate runs it, parses its JSON dump and normalizes the
//! `Time` column.

pub mod data;
pub mod export;
pub mod stats;

pub use data::{read_dat, DatLoader, LoadOptions, LoaderError};
