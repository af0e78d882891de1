// src/pileup/scanner.rs
use crate::error::ScanError;
use crate::pileup::tally::{base_slot, PositionTally, MATCH_SLOT};

fn is_match_symbol(b: u8) -> bool {
    b == b'.' || b == b','
}

/// Leading character of an indel variant.
///
/// | preceding symbol | result                     |
/// |------------------|----------------------------|
/// | `.` or `,`       | reference base, uppercased |
/// | anything else    | the symbol, uppercased     |
pub fn normalize_anchor(preceding: u8, reference_base: u8) -> u8 {
    if is_match_symbol(preceding) {
        reference_base.to_ascii_uppercase()
    } else {
        preceding.to_ascii_uppercase()
    }
}

/// Slot the scanner already credited for the anchor symbol, if any
fn credited_slot(preceding: u8) -> Option<usize> {
    if is_match_symbol(preceding) {
        Some(MATCH_SLOT)
    } else {
        base_slot(preceding)
    }
}

/// Tally every observation in one pileup read-string.
///
/// `^` consumes the mapping-quality byte that follows it, so a quality
/// character such as `.` or `A` is never mistaken for a base call.
pub fn scan_read_string(read: &[u8], tally: &mut PositionTally) -> Result<(), ScanError> {
    let mut i = 0;
    while i < read.len() {
        match read[i] {
            b'.' | b',' => {
                tally.record_match();
                i += 1;
            }
            b'^' => i += 2,
            b'$' | b'*' | b']' => i += 1,
            b'+' | b'-' => i += parse_indel(read, i, tally)?,
            b => {
                if let Some(slot) = base_slot(b) {
                    tally.record_base(slot);
                }
                i += 1;
            }
        }
    }
    Ok(())
}

/// Register the indel token starting at `at` and return its byte length
/// (sign + digits + bases).
fn parse_indel(read: &[u8], at: usize, tally: &mut PositionTally) -> Result<usize, ScanError> {
    if at == 0 {
        return Err(ScanError::UnanchoredIndel { offset: at });
    }
    let preceding = read[at - 1];

    let digits_start = at + 1;
    let digits_end = read[digits_start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(read.len(), |p| digits_start + p);
    if digits_end == digits_start {
        return Err(ScanError::MissingIndelLength { offset: at });
    }

    let digits = &read[digits_start..digits_end];
    let length = digits
        .iter()
        .try_fold(0usize, |acc, &d| {
            acc.checked_mul(10)?.checked_add((d - b'0') as usize)
        })
        .ok_or(ScanError::IndelLengthOverflow { offset: at })?;

    let available = read.len() - digits_end;
    if available < length {
        return Err(ScanError::TruncatedIndel {
            offset: at,
            declared: length,
            available,
        });
    }

    let mut encoded = String::with_capacity(2 + digits.len() + length);
    encoded.push(normalize_anchor(preceding, tally.reference_base) as char);
    encoded.push(read[at] as char);
    encoded.extend(digits.iter().map(|&d| d as char));
    encoded.extend(
        read[digits_end..digits_end + length]
            .iter()
            .map(|b| b.to_ascii_uppercase() as char),
    );

    tally.record_indel(&encoded, digits.len(), credited_slot(preceding))?;
    Ok(1 + digits.len() + length)
}

/// Build the tally for one pileup position from its read-string
pub fn tally_position(
    position: usize,
    reference_base: u8,
    read_string: Vec<u8>,
    max_variants: usize,
) -> Result<PositionTally, ScanError> {
    let mut tally = PositionTally::new(position, reference_base, Vec::new(), max_variants);
    scan_read_string(&read_string, &mut tally)?;
    tally.read_string = read_string;
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(reference: u8, read: &str) -> PositionTally {
        tally_position(1, reference, read.as_bytes().to_vec(), 100).unwrap()
    }

    #[test]
    fn test_normalize_anchor_truth_table() {
        assert_eq!(normalize_anchor(b'.', b'g'), b'G');
        assert_eq!(normalize_anchor(b',', b'A'), b'A');
        assert_eq!(normalize_anchor(b't', b'A'), b'T');
        assert_eq!(normalize_anchor(b'C', b'A'), b'C');
        assert_eq!(normalize_anchor(b'n', b'A'), b'N');
    }

    #[test]
    fn test_scan_matches_and_mismatches() {
        let t = tally(b'A', ".,.,tTgC");
        assert_eq!(t.depth, 8);
        assert_eq!(t.slots, [4, 0, 2, 1, 1]);
        assert!(t.is_balanced());
    }

    #[test]
    fn test_markers_are_not_counted() {
        // `^]` starts a read with mapping quality `]`, `$` ends one
        let t = tally(b'C', "^].$*,^Aa$");
        assert_eq!(t.depth, 3);
        assert_eq!(t.slots, [2, 1, 0, 0, 0]);
    }

    #[test]
    fn test_read_start_consumes_quality_byte() {
        // The quality byte `.` must not become a match
        let t = tally(b'G', "^.T");
        assert_eq!(t.depth, 1);
        assert_eq!(t.slots[2], 1);
        assert_eq!(t.match_count(), 0);
    }

    #[test]
    fn test_insertion_after_match_uses_reference_anchor() {
        let t = tally(b'a', ".+2at,+2AT.");
        assert_eq!(t.depth, 3);
        assert_eq!(t.match_count(), 1);
        assert_eq!(t.indels.len(), 1);
        let v = &t.indels.variants()[0];
        assert_eq!(v.encoded, "A+2AT");
        assert_eq!(v.count, 2);
        assert_eq!(v.digit_width, 1);
        assert!(t.is_balanced());
    }

    #[test]
    fn test_deletion_after_mismatch_debits_mismatch_slot() {
        let t = tally(b'A', "c-1g,");
        assert_eq!(t.depth, 2);
        assert_eq!(t.slots, [1, 0, 0, 0, 0]);
        assert_eq!(t.indels.variants()[0].encoded, "C-1G");
        assert!(t.is_balanced());
    }

    #[test]
    fn test_multi_digit_length() {
        let t = tally(b'T', ".-12acgtacgtacgt.");
        assert_eq!(t.indels.variants()[0].encoded, "T-12ACGTACGTACGT");
        assert_eq!(t.indels.variants()[0].digit_width, 2);
        assert_eq!(t.match_count(), 1);
    }

    #[test]
    fn test_truncated_indel_is_an_error() {
        let mut t = PositionTally::new(1, b'A', Vec::new(), 100);
        let err = scan_read_string(b".+3AC", &mut t).unwrap_err();
        assert_eq!(
            err,
            ScanError::TruncatedIndel {
                offset: 1,
                declared: 3,
                available: 2
            }
        );
    }

    #[test]
    fn test_indel_without_length_or_anchor() {
        let mut t = PositionTally::new(1, b'A', Vec::new(), 100);
        assert_eq!(
            scan_read_string(b".+AC", &mut t).unwrap_err(),
            ScanError::MissingIndelLength { offset: 1 }
        );

        let mut t = PositionTally::new(1, b'A', Vec::new(), 100);
        assert_eq!(
            scan_read_string(b"-1A", &mut t).unwrap_err(),
            ScanError::UnanchoredIndel { offset: 0 }
        );
    }

    #[test]
    fn test_variant_cap_is_enforced() {
        let err = tally_position(1, b'A', b".+1A.+1C.+1G".to_vec(), 2).unwrap_err();
        assert_eq!(err, ScanError::TooManyVariants { cap: 2 });
    }
}
