use anyhow::{Context, Result};
use std::path::Path;

use crate::fs::atomic_write;
use crate::pipeline::PipelineOutcome;

pub const CSV_HEADER: [&str; 2] = ["Original Text", "Translated Text"];

/// Serializes the `(original, translation)` rows of a run.
pub fn to_csv(outcome: &PipelineOutcome) -> Result<Vec<u8>> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for (original, translated) in outcome.rows() {
        writer.write_record([original, translated])?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV output: {}", e.error()))
}

/// Writes the two-column CSV for a run.
pub fn write_csv(path: &Path, outcome: &PipelineOutcome) -> Result<()> {
    let bytes = to_csv(outcome)?;
    atomic_write(path, &bytes)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))
}
