//! Pileup column parsing: read-string scanner, indel registry and per-position tally

pub mod registry;
pub mod scanner;
pub mod tally;

pub use registry::{IndelRegistry, IndelVariant};
pub use scanner::{normalize_anchor, scan_read_string, tally_position};
pub use tally::PositionTally;
