//! Data module - time-series file loading

mod reader;

pub use reader::{ReaderError, Series, SeriesReader};
