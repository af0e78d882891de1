// src/consensus/resolver.rs
use crate::consensus::report::{CorrectionKind, ReportEntry};
use crate::pileup::tally::{PositionTally, MATCH_SLOT, SLOT_MARKERS};

/// Resolved output for one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsensusUnit {
    Reference(u8),
    Substitution(u8),
    /// Anchor base followed by inserted bases
    Insertion { anchor: u8, bases: Vec<u8> },
    /// Anchor base kept, the next `length` output bases dropped
    Deletion { anchor: u8, length: usize },
}

/// Which rule decided a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    LowDepth,
    Reference,
    Corrected,
    Ambiguous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub unit: ConsensusUnit,
    pub report: Option<ReportEntry>,
    pub call: Call,
}

impl Resolution {
    fn keep(tally: &PositionTally, call: Call) -> Self {
        Resolution {
            unit: ConsensusUnit::Reference(tally.reference_base),
            report: None,
            call,
        }
    }
}

/// Frequency-cutoff consensus rule
#[derive(Debug, Clone, Copy)]
pub struct ConsensusResolver {
    pub cutoff: f64,
    pub min_depth: usize,
}

impl ConsensusResolver {
    pub fn new(cutoff: f64, min_depth: usize) -> Self {
        ConsensusResolver { cutoff, min_depth }
    }

    fn exceeds(&self, count: usize, depth: usize) -> bool {
        count as f64 / depth as f64 > self.cutoff
    }

    /// Decide the output for one position. First satisfied rule wins:
    /// depth floor, reference support, base substitution, indel variant.
    pub fn resolve(&self, tally: &PositionTally, chrom: &str) -> Resolution {
        let depth = tally.depth;
        if depth == 0 || depth < self.min_depth {
            return Resolution::keep(tally, Call::LowDepth);
        }
        if self.exceeds(tally.slots[MATCH_SLOT], depth) {
            return Resolution::keep(tally, Call::Reference);
        }

        let report = |kind, alternate: String, alt_count| ReportEntry {
            chrom: chrom.to_string(),
            position: tally.position,
            kind,
            reference_base: tally.reference_base as char,
            alternate,
            depth,
            alt_count,
        };

        for slot in 1..SLOT_MARKERS.len() {
            let count = tally.slots[slot];
            if self.exceeds(count, depth) {
                let base = SLOT_MARKERS[slot];
                return Resolution {
                    unit: ConsensusUnit::Substitution(base),
                    report: Some(report(CorrectionKind::Snp, (base as char).to_string(), count)),
                    call: Call::Corrected,
                };
            }
        }

        for variant in tally.indels.variants() {
            if !self.exceeds(variant.count, depth) {
                continue;
            }
            let (unit, kind) = if variant.is_insertion() {
                (
                    ConsensusUnit::Insertion {
                        anchor: variant.anchor(),
                        bases: variant.bases().to_vec(),
                    },
                    CorrectionKind::Ins,
                )
            } else {
                (
                    ConsensusUnit::Deletion {
                        anchor: variant.anchor(),
                        length: variant.bases().len(),
                    },
                    CorrectionKind::Del,
                )
            };
            return Resolution {
                unit,
                report: Some(report(kind, variant.encoded.clone(), variant.count)),
                call: Call::Corrected,
            };
        }

        Resolution::keep(tally, Call::Ambiguous)
    }
}
