//! Pipeline module - wires the series readers into the figure renderer.
//!
//! The four input files, their panel annotations, and the output name are
//! fixed; the pipeline iterates a descriptor table rather than hardcoding
//! four plotting calls, so adding a metric means adding a descriptor.

use crate::charts::{FigureRenderer, GridPosition, DEFAULT_DPI};
use crate::data::{Series, SeriesReader};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Name of the composite image written next to the input files.
pub const OUTPUT_FILE: &str = "Network_metrics.png";

/// One entry of the figure: which file lands in which cell, with labels.
#[derive(Debug, Clone, Copy)]
pub struct PanelDescriptor {
    pub file: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub position: GridPosition,
}

/// The four network metrics, in fill order.
pub const PANELS: [PanelDescriptor; 4] = [
    PanelDescriptor {
        file: "throughput.dat",
        title: "Throughput vs Time",
        x_label: "Time (s)",
        y_label: "Throughput (Mbps)",
        position: GridPosition::TopLeft,
    },
    PanelDescriptor {
        file: "packet_loss.dat",
        title: "Packet Loss vs Time",
        x_label: "Time (s)",
        y_label: "Packet Loss (%)",
        position: GridPosition::TopRight,
    },
    PanelDescriptor {
        file: "delay.dat",
        title: "Average Delay vs Time",
        x_label: "Time (s)",
        y_label: "Delay (ms)",
        position: GridPosition::BottomLeft,
    },
    PanelDescriptor {
        file: "latency.dat",
        title: "Latency vs Time",
        x_label: "Time (s)",
        y_label: "Latency (ms)",
        position: GridPosition::BottomRight,
    },
];

/// Read every metric file under `dir`, render the 2x2 figure, and write
/// `Network_metrics.png` into `dir` at 300 DPI with tight margins.
///
/// Returns the path of the written image. Any read or render failure
/// aborts the run; nothing is written in that case.
pub fn run(dir: &Path) -> Result<PathBuf> {
    // The reads are independent; order is restored by the indexed collect.
    let series: Vec<Series> = PANELS
        .par_iter()
        .map(|descriptor| SeriesReader::read_file(&dir.join(descriptor.file)))
        .collect::<Result<_, _>>()?;

    let mut renderer = FigureRenderer::new();
    for (descriptor, series) in PANELS.iter().zip(series) {
        renderer.add_panel(
            descriptor.position,
            series,
            descriptor.title,
            descriptor.x_label,
            descriptor.y_label,
        );
    }

    let output = dir.join(OUTPUT_FILE);
    renderer
        .finalize(&output, DEFAULT_DPI, true)
        .with_context(|| format!("writing {}", output.display()))?;

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ReaderError;
    use std::fs;

    fn write_metric_files(dir: &Path) {
        fs::write(dir.join("throughput.dat"), "0 10\n1 20\n2 15\n").unwrap();
        fs::write(dir.join("packet_loss.dat"), "0 0.1\n1 0.2\n2 0.05\n").unwrap();
        fs::write(dir.join("delay.dat"), "0 1.5\n1 2.5\n").unwrap();
        fs::write(dir.join("latency.dat"), "0 3.0\n1 4.0\n").unwrap();
    }

    #[test]
    fn run_writes_the_composite_image() {
        let dir = tempfile::tempdir().unwrap();
        write_metric_files(dir.path());

        let output = run(dir.path()).unwrap();
        assert_eq!(output, dir.path().join(OUTPUT_FILE));
        assert!(fs::metadata(&output).unwrap().len() > 0);
    }

    #[test]
    fn run_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_metric_files(dir.path());

        let output = run(dir.path()).unwrap();
        let first = fs::read(&output).unwrap();
        run(dir.path()).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn run_fails_when_an_input_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        write_metric_files(dir.path());
        fs::remove_file(dir.path().join("latency.dat")).unwrap();

        let err = run(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReaderError>(),
            Some(ReaderError::Open { .. })
        ));
        assert!(!dir.path().join(OUTPUT_FILE).exists());
    }

    #[test]
    fn run_fails_on_a_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        write_metric_files(dir.path());
        fs::write(dir.path().join("delay.dat"), "0 1.5\n1.0 2.0 3.0\n").unwrap();

        let err = run(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReaderError>(),
            Some(ReaderError::Malformed { line: 2, .. })
        ));
        assert!(!dir.path().join(OUTPUT_FILE).exists());
    }

    #[test]
    fn descriptors_cover_every_grid_cell() {
        for position in GridPosition::ALL {
            assert!(PANELS.iter().any(|d| d.position == position));
        }
    }
}
