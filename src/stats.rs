use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::config::RectifyOptions;

/// Counters for one rectification run
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct RectifySummary {
    pub chromosome: String,
    pub reference_length: usize,
    pub output_length: usize,
    pub pileup_lines: usize,
    pub covered_positions: usize,
    pub backfilled_positions: usize,
    pub low_depth_positions: usize,
    pub ambiguous_positions: usize,
    pub snps: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl RectifySummary {
    pub fn corrections(&self) -> usize {
        self.snps + self.insertions + self.deletions
    }

    /// Net change in sequence length
    pub fn length_delta(&self) -> i64 {
        self.output_length as i64 - self.reference_length as i64
    }
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    options: &'a RectifyOptions,
    summary: &'a RectifySummary,
}

/// Write the run summary and the options that produced it as JSON
pub fn write_summary(
    summary: &RectifySummary,
    options: &RectifyOptions,
    output: &Path,
) -> io::Result<()> {
    let file = File::create(output)?;
    serde_json::to_writer_pretty(file, &SummaryFile { options, summary })?;
    Ok(())
}
