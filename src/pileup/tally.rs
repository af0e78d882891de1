// src/pileup/tally.rs
use crate::error::ScanError;
use crate::pileup::registry::IndelRegistry;

/// Slot markers; index 0 stands for "matches the reference".
pub const SLOT_MARKERS: [u8; 5] = [b'!', b'A', b'T', b'G', b'C'];

pub const MATCH_SLOT: usize = 0;

/// Mismatch slot for an explicit base call, case-insensitive
pub fn base_slot(base: u8) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'A' => Some(1),
        b'T' => Some(2),
        b'G' => Some(3),
        b'C' => Some(4),
        _ => None,
    }
}

/// Evidence collected for a single pileup position.
///
/// Every classified observation is attributed to exactly one of the match
/// slot, one mismatch slot, or one indel variant, so
/// `depth == slots.sum() + indels.total()` at all times.
#[derive(Debug, Clone)]
pub struct PositionTally {
    /// 1-based coordinate
    pub position: usize,
    pub reference_base: u8,
    pub depth: usize,
    pub slots: [usize; 5],
    pub read_string: Vec<u8>,
    pub indels: IndelRegistry,
}

impl PositionTally {
    pub fn new(position: usize, reference_base: u8, read_string: Vec<u8>, max_variants: usize) -> Self {
        PositionTally {
            position,
            reference_base: reference_base.to_ascii_uppercase(),
            depth: 0,
            slots: [0; 5],
            read_string,
            indels: IndelRegistry::new(max_variants),
        }
    }

    pub fn record_match(&mut self) {
        self.depth += 1;
        self.slots[MATCH_SLOT] += 1;
    }

    pub fn record_base(&mut self, slot: usize) {
        self.depth += 1;
        self.slots[slot] += 1;
    }

    /// Move one observation from `credited_slot` onto an indel variant.
    ///
    /// A `None` slot means the anchor was never counted (e.g. an `N` call),
    /// so the observation is new depth.
    pub fn record_indel(
        &mut self,
        encoded: &str,
        digit_width: usize,
        credited_slot: Option<usize>,
    ) -> Result<(), ScanError> {
        self.indels.register(encoded, digit_width)?;
        match credited_slot {
            Some(slot) if self.slots[slot] > 0 => self.slots[slot] -= 1,
            _ => self.depth += 1,
        }
        Ok(())
    }

    pub fn match_count(&self) -> usize {
        self.slots[MATCH_SLOT]
    }

    /// Holds the depth accounting invariant
    pub fn is_balanced(&self) -> bool {
        self.depth == self.slots.iter().sum::<usize>() + self.indels.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_slot_is_case_insensitive() {
        assert_eq!(base_slot(b'a'), Some(1));
        assert_eq!(base_slot(b'T'), Some(2));
        assert_eq!(base_slot(b'g'), Some(3));
        assert_eq!(base_slot(b'C'), Some(4));
        assert_eq!(base_slot(b'N'), None);
        assert_eq!(base_slot(b'.'), None);
    }

    #[test]
    fn test_indel_debits_credited_slot() {
        let mut tally = PositionTally::new(7, b'a', Vec::new(), 100);
        assert_eq!(tally.reference_base, b'A');

        tally.record_match();
        tally.record_base(2);
        tally.record_indel("A+1G", 1, Some(MATCH_SLOT)).unwrap();
        tally.record_indel("T-1C", 1, Some(2)).unwrap();

        assert_eq!(tally.depth, 2);
        assert_eq!(tally.slots, [0, 0, 0, 0, 0]);
        assert!(tally.is_balanced());
    }

    #[test]
    fn test_uncredited_anchor_adds_depth() {
        let mut tally = PositionTally::new(1, b'C', Vec::new(), 100);
        tally.record_indel("N+1A", 1, None).unwrap();
        assert_eq!(tally.depth, 1);
        assert!(tally.is_balanced());
    }
}
