//! Error types for a rectification run. Every failure is terminal for the run.

use std::path::PathBuf;
use thiserror::Error;

/// Malformed content inside one pileup read-string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("indel sign at byte {offset} has no preceding base call")]
    UnanchoredIndel { offset: usize },
    #[error("indel at byte {offset} is missing its length digits")]
    MissingIndelLength { offset: usize },
    #[error("indel length at byte {offset} does not fit in memory")]
    IndelLengthOverflow { offset: usize },
    #[error("indel at byte {offset} declares {declared} bases but only {available} remain")]
    TruncatedIndel {
        offset: usize,
        declared: usize,
        available: usize,
    },
    #[error("more than {cap} distinct indel variants at one position")]
    TooManyVariants { cap: usize },
}

/// Why a pileup line was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("expected at least 5 tab-separated columns, found {0}")]
    MissingColumns(usize),
    #[error("invalid position '{0}'")]
    InvalidPosition(String),
    #[error("empty reference base column")]
    MissingReferenceBase,
    #[error("malformed read string: {0}")]
    ReadString(#[from] ScanError),
}

#[derive(Error, Debug)]
pub enum RectifyError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fasta index {}: {reason}", .path.display())]
    FastaIndex { path: PathBuf, reason: String },

    #[error("pileup line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("pileup line {line} is {length} bytes, above the {limit} byte limit")]
    LineTooLong {
        line: usize,
        length: usize,
        limit: usize,
    },

    #[error("position {position} holds more than {cap} distinct indel variants")]
    IndelCapacity { position: usize, cap: usize },

    #[error("more than {cap} corrections in one run (at position {position})")]
    ReportCapacity { position: usize, cap: usize },

    #[error("pileup position {position} does not follow previous position {previous}")]
    PositionOutOfOrder { position: usize, previous: usize },

    #[error("pileup position {position} is beyond the reference length {length}")]
    PositionBeyondReference { position: usize, length: usize },
}

impl RectifyError {
    /// Place a read-string failure in the context of its pileup line
    pub fn from_scan(err: ScanError, line: usize, position: usize) -> Self {
        match err {
            ScanError::TooManyVariants { cap } => RectifyError::IndelCapacity { position, cap },
            other => RectifyError::Parse {
                line,
                kind: ParseErrorKind::ReadString(other),
            },
        }
    }

    /// Attach a path to an I/O failure
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RectifyError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RectifyError>;
