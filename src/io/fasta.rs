// src/io/fasta.rs
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Result, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::assemble::buffer::AssemblyBuffer;

/// Column width of the rectified FASTA
pub const LINE_WIDTH: usize = 50;

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

impl FastaWriter {
    /// Open for appending; a `.gz` path gets a new gzip member
    pub fn append(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let gz = path.extension().map_or(false, |ext| ext == "gz");
        Ok(if gz {
            FastaWriter::Compressed(BufWriter::new(GzEncoder::new(file, Compression::default())))
        } else {
            FastaWriter::Plain(BufWriter::new(file))
        })
    }

    fn inner(&mut self) -> &mut dyn Write {
        match self {
            FastaWriter::Plain(writer) => writer as &mut dyn Write,
            FastaWriter::Compressed(writer) => writer as &mut dyn Write,
        }
    }

    /// Write the header and the rectified sequence, returning the number of bases
    pub fn write_rectified(
        &mut self,
        chrom: &str,
        buffer: &AssemblyBuffer,
        line_width: usize,
    ) -> Result<usize> {
        write_rectified(self.inner(), chrom, buffer, line_width)
    }

    pub fn finish(self) -> Result<()> {
        match self {
            FastaWriter::Plain(mut writer) => writer.flush(),
            FastaWriter::Compressed(writer) => {
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?;
                Ok(())
            }
        }
    }
}

/// Serialize the assembly as FASTA wrapped at `line_width` bases per line.
/// Every line but the last is exactly `line_width` long.
pub fn write_rectified<W: Write + ?Sized>(
    writer: &mut W,
    chrom: &str,
    buffer: &AssemblyBuffer,
    line_width: usize,
) -> Result<usize> {
    writeln!(writer, ">{}\tComplete Genome", chrom)?;

    let mut line = Vec::with_capacity(line_width + 1);
    let mut emitted = 0;
    for base in buffer.rectified_bases() {
        line.push(base);
        emitted += 1;
        if line.len() == line_width {
            line.push(b'\n');
            writer.write_all(&line)?;
            line.clear();
        }
    }
    if !line.is_empty() {
        line.push(b'\n');
        writer.write_all(&line)?;
    }
    Ok(emitted)
}
