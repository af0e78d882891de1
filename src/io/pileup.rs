// src/io/pileup.rs
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::error::{ParseErrorKind, RectifyError, Result};

/// Columns consumed from one mpileup line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PileupRecord {
    /// 1-based line number in the input
    pub line: usize,
    pub position: usize,
    pub reference_base: u8,
    pub read_string: Vec<u8>,
}

/// Open a pileup for reading, handles gzipped files automatically
pub fn open_pileup(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| RectifyError::io(path, e))?;
    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Split one line into position, reference base and read-string.
/// Column order: chrom, pos, ref, count, bases, quals.
pub fn parse_pileup_line(line: &[u8], line_number: usize) -> Result<PileupRecord> {
    let fail = |kind| RectifyError::Parse {
        line: line_number,
        kind,
    };
    let fields: Vec<&[u8]> = line.split(|&b| b == b'\t').collect();
    if fields.len() < 5 {
        return Err(fail(ParseErrorKind::MissingColumns(fields.len())));
    }

    let position_text = String::from_utf8_lossy(fields[1]);
    let parsed = position_text.trim().parse::<usize>();
    let position = match parsed {
        Ok(p) if p > 0 => p,
        _ => return Err(fail(ParseErrorKind::InvalidPosition(position_text.into_owned()))),
    };

    let reference_base = match fields[2].first() {
        Some(&b) => b.to_ascii_uppercase(),
        None => return Err(fail(ParseErrorKind::MissingReferenceBase)),
    };

    Ok(PileupRecord {
        line: line_number,
        position,
        reference_base,
        read_string: fields[4].to_vec(),
    })
}

/// Streams [`PileupRecord`]s, rejecting lines above `max_line_length` bytes
pub struct PileupReader<R: BufRead> {
    reader: R,
    path: PathBuf,
    max_line_length: usize,
    line_number: usize,
    scratch: Vec<u8>,
}

impl<R: BufRead> PileupReader<R> {
    pub fn new(reader: R, path: impl Into<PathBuf>, max_line_length: usize) -> Self {
        PileupReader {
            reader,
            path: path.into(),
            max_line_length,
            line_number: 0,
            scratch: Vec::new(),
        }
    }

    pub fn lines_read(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for PileupReader<R> {
    type Item = Result<PileupRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.scratch.clear();
            match self.reader.read_until(b'\n', &mut self.scratch) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(RectifyError::io(&self.path, e))),
            }
            self.line_number += 1;

            while matches!(self.scratch.last(), Some(b'\n') | Some(b'\r')) {
                self.scratch.pop();
            }
            if self.scratch.len() > self.max_line_length {
                return Some(Err(RectifyError::LineTooLong {
                    line: self.line_number,
                    length: self.scratch.len(),
                    limit: self.max_line_length,
                }));
            }
            if self.scratch.iter().all(|b| b.is_ascii_whitespace()) {
                continue;
            }
            return Some(parse_pileup_line(&self.scratch, self.line_number));
        }
    }
}
