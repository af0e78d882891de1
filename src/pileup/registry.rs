// src/pileup/registry.rs
use ahash::AHashMap;

use crate::error::ScanError;

/// One distinct insertion or deletion seen at a position.
///
/// The canonical encoding is anchor + sign + decimal length + bases,
/// e.g. `A+2AT` or `G-1A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndelVariant {
    pub encoded: String,
    pub count: usize,
    /// Character width of the decimal length (`2` for `T-12AAAAAAAAAAAA`)
    pub digit_width: usize,
}

impl IndelVariant {
    pub fn is_insertion(&self) -> bool {
        self.encoded.as_bytes().get(1) == Some(&b'+')
    }

    pub fn anchor(&self) -> u8 {
        self.encoded.as_bytes()[0]
    }

    /// Inserted or deleted bases, sliced using the stored digit width
    pub fn bases(&self) -> &[u8] {
        &self.encoded.as_bytes()[2 + self.digit_width..]
    }
}

/// Deduplicating counter of indel variants, kept in discovery order
#[derive(Debug, Clone)]
pub struct IndelRegistry {
    variants: Vec<IndelVariant>,
    index: AHashMap<String, usize>,
    cap: usize,
}

impl IndelRegistry {
    pub fn new(cap: usize) -> Self {
        IndelRegistry {
            variants: Vec::new(),
            index: AHashMap::new(),
            cap,
        }
    }

    /// Count one observation of `encoded`, inserting it if unseen
    pub fn register(&mut self, encoded: &str, digit_width: usize) -> Result<(), ScanError> {
        if let Some(&i) = self.index.get(encoded) {
            self.variants[i].count += 1;
            return Ok(());
        }
        if self.variants.len() >= self.cap {
            return Err(ScanError::TooManyVariants { cap: self.cap });
        }
        self.index.insert(encoded.to_string(), self.variants.len());
        self.variants.push(IndelVariant {
            encoded: encoded.to_string(),
            count: 1,
            digit_width,
        });
        Ok(())
    }

    pub fn variants(&self) -> &[IndelVariant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Total observations across all variants
    pub fn total(&self) -> usize {
        self.variants.iter().map(|v| v.count).sum()
    }
}
