//! Rectify a reference sequence against mpileup evidence.
//!
//! Each pileup column is tallied into match, mismatch and indel evidence,
//! resolved to a single consensus call under a frequency cutoff, and the
//! calls are stitched back into the reference to produce a corrected FASTA
//! plus a report of every SNP, insertion and deletion applied.

pub mod assemble;
pub mod config;
pub mod consensus;
pub mod error;
pub mod io;
pub mod pileup;
pub mod pipeline;
pub mod stats;

pub use config::RectifyOptions;
pub use error::{RectifyError, Result};
pub use pipeline::run_rectify;
