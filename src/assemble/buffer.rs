// src/assemble/buffer.rs
use crate::consensus::resolver::ConsensusUnit;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    Insert(Vec<u8>),
    Delete(usize),
}

/// Indel applied right after the base at `offset`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub offset: usize,
    pub kind: EditKind,
}

/// Assembled chromosome: one base per reference position plus the indel
/// edits anchored on them. Grows only by appending.
#[derive(Debug, Clone, Default)]
pub struct AssemblyBuffer {
    bases: Vec<u8>,
    edits: Vec<Edit>,
}

impl AssemblyBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        AssemblyBuffer {
            bases: Vec::with_capacity(capacity),
            edits: Vec::new(),
        }
    }

    pub fn extend_reference(&mut self, span: &[u8]) {
        self.bases.extend_from_slice(span);
    }

    pub fn push_unit(&mut self, unit: ConsensusUnit) {
        match unit {
            ConsensusUnit::Reference(base) | ConsensusUnit::Substitution(base) => {
                self.bases.push(base)
            }
            ConsensusUnit::Insertion { anchor, bases } => {
                self.edits.push(Edit {
                    offset: self.bases.len(),
                    kind: EditKind::Insert(bases),
                });
                self.bases.push(anchor);
            }
            ConsensusUnit::Deletion { anchor, length } => {
                self.edits.push(Edit {
                    offset: self.bases.len(),
                    kind: EditKind::Delete(length),
                });
                self.bases.push(anchor);
            }
        }
    }

    /// Number of reference positions covered
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Final sequence with insertions materialized and deletions dropped
    pub fn rectified_bases(&self) -> RectifiedBases<'_> {
        RectifiedBases {
            buffer: self,
            offset: 0,
            next_edit: 0,
            pending_insert: &[],
            pending_delete: 0,
        }
    }
}

/// Iterator over the output bases of an [`AssemblyBuffer`].
///
/// A deletion of length `n` drops the next `n` bases that would otherwise
/// be emitted, including bases supplied by later positions.
pub struct RectifiedBases<'a> {
    buffer: &'a AssemblyBuffer,
    offset: usize,
    next_edit: usize,
    pending_insert: &'a [u8],
    pending_delete: usize,
}

impl<'a> Iterator for RectifiedBases<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        loop {
            let (base, anchored_at) = if let Some((&first, rest)) = self.pending_insert.split_first() {
                self.pending_insert = rest;
                (first, None)
            } else if self.offset < self.buffer.bases.len() {
                self.offset += 1;
                (self.buffer.bases[self.offset - 1], Some(self.offset - 1))
            } else {
                return None;
            };

            let dropped = self.pending_delete > 0;
            if dropped {
                self.pending_delete -= 1;
            }

            // Edits take effect after their anchor base
            if let Some(at) = anchored_at {
                let buffer: &'a AssemblyBuffer = self.buffer;
                let edits = &buffer.edits;
                while self.next_edit < edits.len() && edits[self.next_edit].offset == at {
                    match &edits[self.next_edit].kind {
                        EditKind::Insert(bases) => self.pending_insert = bases,
                        EditKind::Delete(length) => self.pending_delete += length,
                    }
                    self.next_edit += 1;
                }
            }

            if !dropped {
                return Some(base);
            }
        }
    }
}
