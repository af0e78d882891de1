//! Consensus decision per position and the correction report

pub mod report;
pub mod resolver;

pub use report::{CorrectionKind, ReportEntry, ReportLog};
pub use resolver::{Call, ConsensusResolver, ConsensusUnit, Resolution};
