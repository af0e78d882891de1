// src/config.rs
use std::path::PathBuf;

use serde::Serialize;

use crate::error::{RectifyError, Result};

pub const DEFAULT_CUTOFF: f64 = 0.9;
pub const DEFAULT_MIN_DEPTH: usize = 10;
pub const DEFAULT_MAX_INDEL_VARIANTS: usize = 100;
pub const DEFAULT_MAX_REPORT_ENTRIES: usize = 10_000;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 100_000;
pub const DEFAULT_REPORT_NAME: &str = "RefRectify.report";

/// Everything a rectification run needs
#[derive(Debug, Clone, Serialize)]
pub struct RectifyOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub reference: PathBuf,
    pub report: PathBuf,
    pub summary: Option<PathBuf>,
    /// Fraction of depth an alternate call must exceed
    pub cutoff: f64,
    pub min_depth: usize,
    pub max_indel_variants: usize,
    pub max_report_entries: usize,
    pub max_line_length: usize,
    pub line_width: usize,
}

impl RectifyOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, reference: impl Into<PathBuf>) -> Self {
        RectifyOptions {
            input: input.into(),
            output: output.into(),
            reference: reference.into(),
            report: PathBuf::from(DEFAULT_REPORT_NAME),
            summary: None,
            cutoff: DEFAULT_CUTOFF,
            min_depth: DEFAULT_MIN_DEPTH,
            max_indel_variants: DEFAULT_MAX_INDEL_VARIANTS,
            max_report_entries: DEFAULT_MAX_REPORT_ENTRIES,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            line_width: crate::io::fasta::LINE_WIDTH,
        }
    }

    /// Reject settings that would make the run meaningless, before any I/O
    pub fn validate(&self) -> Result<()> {
        if !self.cutoff.is_finite() || self.cutoff <= 0.5 || self.cutoff >= 1.0 {
            return Err(RectifyError::Config(format!(
                "cutoff must be greater than 0.5 and below 1.0, got {}",
                self.cutoff
            )));
        }
        for (name, path) in [
            ("input", &self.input),
            ("output", &self.output),
            ("reference", &self.reference),
            ("report", &self.report),
        ] {
            if path.as_os_str().is_empty() {
                return Err(RectifyError::Config(format!("{} path is required", name)));
            }
        }
        for (name, value) in [
            ("max indel variants", self.max_indel_variants),
            ("max report entries", self.max_report_entries),
            ("max line length", self.max_line_length),
            ("line width", self.line_width),
        ] {
            if value == 0 {
                return Err(RectifyError::Config(format!("{} must be positive", name)));
            }
        }
        Ok(())
    }
}
