//! Time-Series File Reader Module
//! Parses whitespace-delimited two-column `<time> <value>` text files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: expected two numeric fields, got {text:?}")]
    Malformed {
        path: PathBuf,
        line: usize,
        text: String,
    },
}

/// One time-series: parallel (time, value) vectors in file line order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub time: Vec<f64>,
    pub value: Vec<f64>,
}

impl Series {
    /// Number of data points.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Iterate the points as (time, value) pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.value.iter().copied())
    }
}

/// Reads whitespace-delimited two-column series files.
pub struct SeriesReader;

impl SeriesReader {
    /// Read a series file.
    ///
    /// Blank lines are skipped. Every other line must contain exactly two
    /// whitespace-separated numeric fields; anything else fails the whole
    /// read. An empty file yields an empty series.
    pub fn read_file(path: &Path) -> Result<Series, ReaderError> {
        let file = File::open(path).map_err(|source| ReaderError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut series = Series::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| ReaderError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let (t, v) = Self::parse_line(&line).ok_or_else(|| ReaderError::Malformed {
                path: path.to_path_buf(),
                line: idx + 1,
                text: line.clone(),
            })?;
            series.time.push(t);
            series.value.push(v);
        }

        Ok(series)
    }

    /// Split a non-blank line into exactly two f64 fields.
    fn parse_line(line: &str) -> Option<(f64, f64)> {
        let mut fields = line.split_whitespace();
        let t = fields.next()?.parse().ok()?;
        let v = fields.next()?.parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some((t, v))
    }
}
