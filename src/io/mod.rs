//! File formats: pileup input, indexed reference, rectified FASTA and report output

pub mod fasta;
pub mod pileup;
pub mod reference;
pub mod report;
