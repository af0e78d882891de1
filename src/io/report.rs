// src/io/report.rs
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::consensus::report::ReportEntry;

pub const REPORT_HEADER: &str = "CHROM\tPOS\tTYPE\tREF\tALT\tCOVERAGE:ALTCOUNT";

/// Write corrections in arrival order, one tab-separated row each
pub fn write_report<W: Write>(writer: &mut W, entries: &[ReportEntry]) -> io::Result<()> {
    writeln!(writer, "{}", REPORT_HEADER)?;
    for entry in entries {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}:{}",
            entry.chrom,
            entry.position,
            entry.kind,
            entry.reference_base,
            entry.alternate,
            entry.depth,
            entry.alt_count
        )?;
    }
    Ok(())
}

/// Create (or truncate) the report file
pub fn export_report(entries: &[ReportEntry], output_path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    write_report(&mut writer, entries)?;
    writer.flush()
}
