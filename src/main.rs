//! netmetrics - plots network metric time-series into one composite PNG.

use anyhow::Result;
use netmetrics::pipeline;
use std::path::Path;

fn main() -> Result<()> {
    // Input files and the output image are resolved against the current
    // working directory; there are no flags or arguments.
    pipeline::run(Path::new("."))?;
    Ok(())
}
