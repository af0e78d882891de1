// src/io/reference.rs
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use bio::io::fasta::{Index, IndexedReader};
use tracing::info;

use crate::error::{RectifyError, Result};

/// Location of a chromosome inside an indexed FASTA
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromosomeMeta {
    pub name: String,
    pub length: usize,
    /// Byte offset of the first base in the FASTA file
    pub offset: u64,
    pub line_bases: usize,
    pub line_width: usize,
}

impl ChromosomeMeta {
    /// Parse one `.fai` record: name, length, offset, bases per line, bytes per line
    pub fn from_fai_line(line: &str) -> std::result::Result<Self, String> {
        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        if fields.len() < 5 {
            return Err(format!("expected 5 columns, found {}", fields.len()));
        }
        let number = |i: usize, what: &str| {
            fields[i]
                .parse::<u64>()
                .map_err(|_| format!("invalid {} '{}'", what, fields[i]))
        };
        Ok(ChromosomeMeta {
            name: fields[0].to_string(),
            length: number(1, "length")? as usize,
            offset: number(2, "offset")?,
            line_bases: number(3, "line bases")? as usize,
            line_width: number(4, "line width")? as usize,
        })
    }
}

pub fn fai_path(reference: &Path) -> PathBuf {
    let mut name = reference.as_os_str().to_owned();
    name.push(".fai");
    PathBuf::from(name)
}

/// First chromosome listed in `<reference>.fai`
pub fn read_chromosome_meta(reference: &Path) -> Result<ChromosomeMeta> {
    let index_path = fai_path(reference);
    let file = File::open(&index_path).map_err(|e| RectifyError::io(&index_path, e))?;
    let mut first = String::new();
    BufReader::new(file)
        .read_line(&mut first)
        .map_err(|e| RectifyError::io(&index_path, e))?;
    if first.trim().is_empty() {
        return Err(RectifyError::FastaIndex {
            path: index_path,
            reason: "index is empty".into(),
        });
    }
    ChromosomeMeta::from_fai_line(&first).map_err(|reason| RectifyError::FastaIndex {
        path: index_path,
        reason,
    })
}

/// Fetch the whole chromosome, uppercased
pub fn load_reference(reference: &Path, meta: &ChromosomeMeta) -> Result<Vec<u8>> {
    let index_path = fai_path(reference);
    let index = Index::from_file(&index_path).map_err(|e| RectifyError::FastaIndex {
        path: index_path.clone(),
        reason: e.to_string(),
    })?;
    let file = File::open(reference).map_err(|e| RectifyError::io(reference, e))?;
    let mut reader = IndexedReader::with_index(file, index);

    let mut sequence = Vec::with_capacity(meta.length);
    reader
        .fetch_all(&meta.name)
        .map_err(|e| RectifyError::io(reference, e))?;
    reader
        .read(&mut sequence)
        .map_err(|e| RectifyError::io(reference, e))?;
    sequence.make_ascii_uppercase();

    if sequence.len() != meta.length {
        return Err(RectifyError::FastaIndex {
            path: index_path,
            reason: format!(
                "{} is indexed as {} bases but {} were read",
                meta.name,
                meta.length,
                sequence.len()
            ),
        });
    }
    info!("Loaded reference {} ({} bp)", meta.name, sequence.len());
    Ok(sequence)
}
