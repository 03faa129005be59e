// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! Fixed-capacity, stack-only scratch buffers.
//!
//! Sized to the worst-case expansion factors documented in spec section 5:
//! canonical decomposition expands a single code point by at most 18x, and
//! case mapping by at most 3x. `tinyvec::ArrayVec` is used rather than
//! `smallvec` because it never falls back to the heap — it's the same
//! crate the `unicode-normalization` reference crate uses for this exact
//! no_std, zero-allocation buffering role.

use tinyvec::ArrayVec;

/// One combining sequence: a starter plus every non-starter up to (but not
/// including) the next starter. Bounded by the canonical decomposition
/// expansion factor with headroom for a decomposed Hangul LVT triple plus
/// any trailing combining marks a single source character can carry.
pub const COMBINING_SEQUENCE_CAP: usize = 32;
pub type CombiningSequence = ArrayVec<[u32; COMBINING_SEQUENCE_CAP]>;

/// The 1..N code points a single input code point expands to under a case
/// mapping operation. Unicode's SpecialCasing.txt never produces more than
/// three code points from one input (see DESIGN.md).
pub const CASE_EXPANSION_CAP: usize = 4;
pub type CaseExpansion = ArrayVec<[u32; CASE_EXPANSION_CAP]>;

/// The (typically 1, at most 4) UTF-8 bytes a single code point encodes to.
pub type Utf8Scratch = ArrayVec<[u8; 4]>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffers_never_spill_to_heap() {
        let mut seq = CombiningSequence::new();
        for cp in 0..COMBINING_SEQUENCE_CAP as u32 {
            seq.push(cp);
        }
        assert_eq!(seq.len(), COMBINING_SEQUENCE_CAP);
    }
}
