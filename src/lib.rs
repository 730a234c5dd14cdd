//! netmetrics - network metrics time-series plotter.
//!
//! Reads four two-column `<time> <value>` data files (throughput, packet
//! loss, delay, latency) and renders them as a 2x2 grid of line charts
//! saved as one PNG.
//!
//! # Example
//!
//! ```ignore
//! use netmetrics::pipeline;
//! use std::path::Path;
//!
//! // Reads the .dat files in the directory and writes Network_metrics.png
//! let output = pipeline::run(Path::new("."))?;
//! println!("wrote {}", output.display());
//! ```

pub mod charts;
pub mod data;
pub mod pipeline;
