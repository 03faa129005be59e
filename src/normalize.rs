// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! C5: Unicode Normalization Forms C/D/KC/KD, plus quick-check (spec
//! section 4.5).

use crate::buffer::CombiningSequence;
use crate::category::{NormalizationForm, NormalizeFlags};
use crate::codec::{check_overlap, decode_next, encode, encoded_len};
use crate::error::Utf8Error;
use crate::tables::{self, QuickCheck};

/// Result of [`utf8_is_normalized`]: whether `text` is already in the
/// requested form, and if not, the byte offset of the first code point
/// that prevents it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Normalized {
    Yes,
    No { offset: usize },
    Maybe { offset: usize },
}

/// Single-pass, allocation-free scan (spec section 4.5's quick-check
/// algorithm): tracks the running combining class and reports `No` as
/// soon as a code point is out of canonical order, has quick-check flag
/// `No`, or (for `Maybe`) can actually compose with the preceding
/// unblocked starter under this form.
pub fn utf8_is_normalized(text: &[u8], flags: NormalizeFlags) -> Result<Normalized, Utf8Error> {
    let form = NormalizationForm::from_flags(flags)?;
    let mut rest = text;
    let mut pos = 0usize;
    let mut prev_ccc = 0u8;
    let mut last_starter: Option<(u32, usize)> = None;
    let mut maybe_offset: Option<usize> = None;

    while !rest.is_empty() {
        let (cp, consumed) = decode_next(rest);
        let ccc = tables::ccc(cp);

        if ccc != 0 && prev_ccc > ccc {
            return Ok(Normalized::No { offset: pos });
        }

        match tables::quick_check(cp, form) {
            QuickCheck::No => return Ok(Normalized::No { offset: pos }),
            QuickCheck::Maybe => {
                if form.is_compose() {
                    if let Some((starter_cp, starter_offset)) = last_starter {
                        if tables::compose(starter_cp, cp).is_some() {
                            return Ok(Normalized::No { offset: starter_offset });
                        }
                    }
                }
                maybe_offset.get_or_insert(pos);
            }
            QuickCheck::Yes => {}
        }

        if ccc == 0 {
            last_starter = Some((cp, pos));
        }
        prev_ccc = ccc;
        rest = &rest[consumed..];
        pos += consumed;
    }

    Ok(match maybe_offset {
        Some(offset) => Normalized::Maybe { offset },
        None => Normalized::Yes,
    })
}

/// Recursively decomposes `cp` into `out` (canonical only, or canonical ∪
/// compatibility when `compat` is set), depth-first so the result is
/// already in code-point order before canonical reordering runs.
fn push_decomposed(cp: u32, compat: bool, out: &mut CombiningSequence) {
    let (kind, mapping) = tables::decomposition(cp, compat);
    if kind == crate::tables::DecompKind::None {
        out.push(cp);
        return;
    }
    for &m in mapping.as_slice() {
        push_decomposed(m, compat, out);
    }
}

/// Stable-sorts each maximal run of non-zero combining class following a
/// starter, ascending by combining class (spec section 4.5 step 2).
/// Insertion sort: these runs are short (headroom is a handful of
/// combining marks), and insertion sort is trivially stable.
fn canonical_reorder(seq: &mut [u32]) {
    let mut i = 1;
    while i < seq.len() {
        let ccc_i = tables::ccc(seq[i]);
        if ccc_i == 0 {
            i += 1;
            continue;
        }
        let mut j = i;
        while j > 0 && tables::ccc(seq[j - 1]) != 0 && tables::ccc(seq[j - 1]) > ccc_i {
            seq.swap(j, j - 1);
            j -= 1;
        }
        i += 1;
    }
}

/// Composes a decomposed-and-reordered combining sequence in place
/// (spec section 4.5 step 3): `seq[0]` is the starter.
fn canonical_compose(seq: &CombiningSequence) -> CombiningSequence {
    let mut out = CombiningSequence::new();
    if seq.is_empty() {
        return out;
    }
    let mut starter = seq.as_slice()[0];
    let mut blocking_ccc: Option<u8> = None;
    for &cp in &seq.as_slice()[1..] {
        let ccc = tables::ccc(cp);
        let blocked = blocking_ccc.is_some_and(|b| b >= ccc);
        if !blocked {
            if let Some(composite) = tables::compose(starter, cp) {
                starter = composite;
                continue;
            }
        }
        out.push(cp);
        if ccc == 0 {
            // a second starter in the run only happens for malformed
            // input the decoder already replaced; treat it as blocking.
            blocking_ccc = None;
        } else {
            blocking_ccc = Some(blocking_ccc.map_or(ccc, |b| b.max(ccc)));
        }
    }
    let mut result = CombiningSequence::new();
    result.push(starter);
    result.extend_from_slice(out.as_slice());
    result
}

/// Normalizes `input` to the form selected by `flags`, writing the result
/// to `output` (or just measuring it, when `None`).
pub fn utf8_normalize(input: &[u8], mut output: Option<&mut [u8]>, flags: NormalizeFlags) -> Result<usize, Utf8Error> {
    let form = NormalizationForm::from_flags(flags)?;
    check_overlap(input, output.as_deref())?;

    let mut needed = 0usize;
    let mut rest = input;
    let mut pending: Option<CombiningSequence> = None;

    macro_rules! flush {
        () => {
            if let Some(seq) = pending.take() {
                let finished = if form.is_compose() {
                    canonical_compose(&seq)
                } else {
                    seq
                };
                for &cp in finished.as_slice() {
                    let len = encoded_len(cp);
                    if let Some(out) = output.as_deref_mut() {
                        if needed + len > out.len() {
                            return Err(Utf8Error::NotEnoughSpace);
                        }
                        encode(cp, &mut out[needed..needed + len]);
                    }
                    needed += len;
                }
            }
        };
    }

    while !rest.is_empty() {
        let (cp, consumed) = decode_next(rest);
        rest = &rest[consumed..];

        let mut decomposed = CombiningSequence::new();
        push_decomposed(cp, form.is_compatibility(), &mut decomposed);

        for &dcp in decomposed.as_slice() {
            if tables::ccc(dcp) == 0 {
                flush!();
                let mut seq = CombiningSequence::new();
                seq.push(dcp);
                pending = Some(seq);
            } else {
                match pending.as_mut() {
                    Some(seq) => seq.push(dcp),
                    None => {
                        // A leading combining mark with no preceding
                        // starter in this input: treat it as its own
                        // one-element "sequence" so it still flushes.
                        let mut seq = CombiningSequence::new();
                        seq.push(dcp);
                        pending = Some(seq);
                    }
                }
            }
        }
        if let Some(seq) = pending.as_mut() {
            canonical_reorder_tail(seq);
        }
    }
    flush!();
    Ok(needed)
}

/// Reorders only the trailing non-starter run of `seq` (everything after
/// the last starter), since the prefix was already flushed and reordered
/// when it was completed.
fn canonical_reorder_tail(seq: &mut CombiningSequence) {
    let slice = seq.as_mut_slice();
    let tail_start = slice
        .iter()
        .rposition(|&cp| tables::ccc(cp) == 0)
        .map(|i| i + 1)
        .unwrap_or(0);
    canonical_reorder(&mut slice[tail_start..]);
}
