// src/consensus/report.rs
use std::fmt;

use serde::Serialize;

use crate::error::{RectifyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrectionKind {
    #[serde(rename = "SNP")]
    Snp,
    #[serde(rename = "INS")]
    Ins,
    #[serde(rename = "DEL")]
    Del,
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CorrectionKind::Snp => "SNP",
            CorrectionKind::Ins => "INS",
            CorrectionKind::Del => "DEL",
        };
        f.write_str(s)
    }
}

/// One correction applied to the reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub chrom: String,
    pub position: usize,
    pub kind: CorrectionKind,
    pub reference_base: char,
    /// Single base for SNPs, full variant encoding (`A+2AT`) for indels
    pub alternate: String,
    pub depth: usize,
    pub alt_count: usize,
}

/// Append-only list of corrections with a hard ceiling
#[derive(Debug, Clone)]
pub struct ReportLog {
    entries: Vec<ReportEntry>,
    cap: usize,
}

impl ReportLog {
    pub fn new(cap: usize) -> Self {
        ReportLog {
            entries: Vec::new(),
            cap,
        }
    }

    pub fn push(&mut self, entry: ReportEntry) -> Result<()> {
        if self.entries.len() >= self.cap {
            return Err(RectifyError::ReportCapacity {
                position: entry.position,
                cap: self.cap,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: CorrectionKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}
