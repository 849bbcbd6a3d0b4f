use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::util::write_atomic;

pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, value).context("failed to serialize json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

pub fn write_lines(lines: &[String]) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    for line in lines {
        writeln!(output, "{line}")?;
    }
    output.flush()?;
    Ok(())
}

pub fn save_page(output: Option<PathBuf>, default_name: String, bytes: &[u8]) -> Result<PathBuf> {
    let path = output.unwrap_or_else(|| PathBuf::from(default_name));
    write_atomic(&path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote certificate page");
    Ok(path)
}
