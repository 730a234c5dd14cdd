//! Charts module - static figure rendering

mod renderer;

pub use renderer::{FigureRenderer, GridPosition, RenderError, DEFAULT_DPI};
