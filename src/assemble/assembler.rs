// src/assemble/assembler.rs
use tracing::debug;

use crate::assemble::buffer::AssemblyBuffer;
use crate::consensus::resolver::ConsensusUnit;
use crate::error::{RectifyError, Result};

/// Stitches consensus units into a gap-free chromosome, copying the
/// original reference for positions the pileup skipped.
pub struct ReferenceAssembler<'a> {
    reference: &'a [u8],
    /// Last 1-based position written, 0 before the first unit
    last_position: usize,
    backfilled: usize,
    buffer: AssemblyBuffer,
}

impl<'a> ReferenceAssembler<'a> {
    pub fn new(reference: &'a [u8]) -> Self {
        ReferenceAssembler {
            reference,
            last_position: 0,
            backfilled: 0,
            buffer: AssemblyBuffer::with_capacity(reference.len()),
        }
    }

    pub fn last_position(&self) -> usize {
        self.last_position
    }

    /// Reference positions copied verbatim so far
    pub fn backfilled(&self) -> usize {
        self.backfilled
    }

    pub fn append(&mut self, position: usize, unit: ConsensusUnit) -> Result<()> {
        if position <= self.last_position {
            return Err(RectifyError::PositionOutOfOrder {
                position,
                previous: self.last_position,
            });
        }
        if position > self.reference.len() {
            return Err(RectifyError::PositionBeyondReference {
                position,
                length: self.reference.len(),
            });
        }

        if position - self.last_position > 1 {
            let gap = &self.reference[self.last_position..position - 1];
            debug!(
                "Backfilling {} reference bases before position {}",
                gap.len(),
                position
            );
            self.buffer.extend_reference(gap);
            self.backfilled += gap.len();
        }
        self.buffer.push_unit(unit);
        self.last_position = position;
        Ok(())
    }

    /// Copy the reference tail after the last unit and hand over the buffer
    pub fn finish(mut self) -> (AssemblyBuffer, usize) {
        let tail = &self.reference[self.last_position..];
        self.buffer.extend_reference(tail);
        self.backfilled += tail.len();
        (self.buffer, self.backfilled)
    }
}
