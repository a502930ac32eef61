//! CLI commands for the bytebpe tokenizer.

pub mod encode;
pub mod train;

pub use encode::EncodeCommand;
pub use train::TrainCommand;

use anyhow::{Context, Result};
use std::path::Path;

/// Input file used when a command omits `<input_file>`.
pub const DEFAULT_INPUT: &str = "shakespeare.txt";

/// Read an input file as raw bytes.
pub(crate) fn read_input(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path)
        .with_context(|| format!("Cannot read input file: {}", path.display()))?;
    log::info!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}
