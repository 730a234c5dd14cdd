//! Static Figure Renderer
//! Composes line-chart panels into a 2x2 grid and writes one PNG.
//!
//! Layout:
//! 1. Four equal cells, row-major: top-left, top-right, bottom-left, bottom-right
//! 2. Each cell: caption, axis descriptions, mesh gridlines, one line series
//! 3. Canvas is 15x10 inches rasterized at the requested DPI

use crate::data::Series;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output raster resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 300;

/// Figure canvas size in inches.
const FIG_WIDTH_IN: f64 = 15.0;
const FIG_HEIGHT_IN: f64 = 10.0;

/// Grid shape; the renderer holds exactly `GRID_ROWS * GRID_COLS` panels.
const GRID_ROWS: usize = 2;
const GRID_COLS: usize = 2;

/// Fraction of the data span added on each side of an axis.
const AXIS_PAD: f64 = 0.05;

/// Line color, tab:blue from the tableau palette.
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Output directory does not exist: {}", .0.display())]
    OutputDir(PathBuf),
    #[error("Panel {0:?} was never populated")]
    MissingPanel(GridPosition),
    #[error("Chart drawing failed: {0}")]
    Draw(String),
}

/// One of the four fixed cells of the figure, row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl GridPosition {
    pub const ALL: [GridPosition; 4] = [
        GridPosition::TopLeft,
        GridPosition::TopRight,
        GridPosition::BottomLeft,
        GridPosition::BottomRight,
    ];

    /// Cell index in the row-major split of the canvas.
    fn index(self) -> usize {
        match self {
            GridPosition::TopLeft => 0,
            GridPosition::TopRight => 1,
            GridPosition::BottomLeft => 2,
            GridPosition::BottomRight => 3,
        }
    }
}

/// One populated cell: a series plus its annotations.
struct Panel {
    series: Series,
    title: String,
    x_label: String,
    y_label: String,
    show_grid: bool,
}

/// Builds the composite 2x2 figure and writes it to disk.
///
/// The figure is populated cell by cell with [`FigureRenderer::add_panel`]
/// and written exactly once with [`FigureRenderer::finalize`]; any existing
/// file at the output path is overwritten.
pub struct FigureRenderer {
    panels: [Option<Panel>; 4],
}

impl Default for FigureRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl FigureRenderer {
    pub fn new() -> Self {
        Self {
            panels: [None, None, None, None],
        }
    }

    /// Place a line plot of `series` into `position`, with gridlines.
    ///
    /// Adding to an occupied cell replaces the previous panel.
    pub fn add_panel(
        &mut self,
        position: GridPosition,
        series: Series,
        title: &str,
        x_label: &str,
        y_label: &str,
    ) {
        self.panels[position.index()] = Some(Panel {
            series,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            show_grid: true,
        });
    }

    /// Rasterize the figure and write it to `path` at `dpi` dots per inch.
    ///
    /// `tight` shrinks the outer margins so the saved image is cropped
    /// close to the rendered content. Fails if any cell was never
    /// populated (first empty cell in row-major order is reported) or if
    /// the parent directory of `path` does not exist.
    pub fn finalize(&self, path: &Path, dpi: u32, tight: bool) -> Result<(), RenderError> {
        let mut panels = Vec::with_capacity(GridPosition::ALL.len());
        for position in GridPosition::ALL {
            match &self.panels[position.index()] {
                Some(panel) => panels.push(panel),
                None => return Err(RenderError::MissingPanel(position)),
            }
        }

        // Checked up front so the failure mode is a typed error rather
        // than a backend-specific message at present() time.
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(RenderError::OutputDir(parent.to_path_buf()));
            }
        }

        let scale = dpi as f64 / 100.0;
        let size = (
            (FIG_WIDTH_IN * dpi as f64).round() as u32,
            (FIG_HEIGHT_IN * dpi as f64).round() as u32,
        );
        let margin = (if tight { 4.0 * scale } else { 16.0 * scale }) as u32;

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let cells = root.split_evenly((GRID_ROWS, GRID_COLS));
        for (cell, panel) in cells.iter().zip(panels) {
            Self::draw_panel(cell, panel, scale, margin)?;
        }

        root.present().map_err(draw_err)
    }

    fn draw_panel(
        cell: &DrawingArea<BitMapBackend<'_>, Shift>,
        panel: &Panel,
        scale: f64,
        margin: u32,
    ) -> Result<(), RenderError> {
        let x_range = axis_range(&panel.series.time);
        let y_range = axis_range(&panel.series.value);

        let mut chart = ChartBuilder::on(cell)
            .caption(&panel.title, ("sans-serif", (14.0 * scale) as u32))
            .margin(margin)
            .x_label_area_size((28.0 * scale) as u32)
            .y_label_area_size((40.0 * scale) as u32)
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        let mut mesh = chart.configure_mesh();
        if !panel.show_grid {
            mesh.disable_mesh();
        }
        mesh.x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .axis_desc_style(("sans-serif", (11.0 * scale) as u32))
            .label_style(("sans-serif", (9.0 * scale) as u32))
            .draw()
            .map_err(draw_err)?;

        let style = ShapeStyle::from(&LINE_COLOR).stroke_width((1.5 * scale).round() as u32);
        chart
            .draw_series(LineSeries::new(panel.series.points(), style))
            .map_err(draw_err)?;

        Ok(())
    }
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

/// Data-driven axis range with padding; degenerate inputs fall back to a
/// half-unit pad (constant series) or 0..1 (empty series).
fn axis_range(values: &[f64]) -> Range<f64> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }

    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = (hi - lo) * AXIS_PAD;
    (lo - pad)..(hi + pad)
}
