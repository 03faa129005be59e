// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! C4: streaming case mapper — upper/lower/title/fold with SpecialCasing
//! context rules and locale tailoring (spec section 4.4).

use crate::category::GeneralCategory;
use crate::codec::{check_overlap, decode_next, encode};
use crate::error::Utf8Error;
use crate::locale::Locale;
use crate::tables::{self, CaseKind};

/// Which of the four case transforms to apply.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CaseOp {
    Upper,
    Lower,
    Title,
    Fold,
}

const COMBINING_DOT_ABOVE: u32 = 0x0307;
const LATIN_CAPITAL_I: u32 = 0x0049;
const LATIN_SMALL_I: u32 = 0x0069;
const LATIN_SMALL_J: u32 = 0x006A;
const LATIN_SMALL_I_OGONEK: u32 = 0x012F;
const LATIN_CAPITAL_I_OGONEK: u32 = 0x012E;
const TURKISH_DOTLESS_I: u32 = 0x0131;
const TURKISH_CAPITAL_I_DOT: u32 = 0x0130;
const GREEK_CAPITAL_SIGMA: u32 = 0x03A3;
const GREEK_FINAL_SIGMA: u32 = 0x03C2;
const GREEK_SMALL_SIGMA: u32 = 0x03C3;

fn is_soft_dotted(cp: u32) -> bool {
    matches!(
        cp,
        LATIN_SMALL_I | LATIN_SMALL_J | LATIN_SMALL_I_OGONEK
    )
}

fn is_word_letter(cp: u32) -> bool {
    tables::category(cp).intersects(
        GeneralCategory::LETTER_UPPERCASE
            | GeneralCategory::LETTER_LOWERCASE
            | GeneralCategory::LETTER_TITLECASE
            | GeneralCategory::LETTER_MODIFIER
            | GeneralCategory::LETTER_OTHER,
    )
}

/// True iff no U+0307 (combining dot above) appears before the next
/// starter, scanning forward from `pos`.
fn not_before_dot(input: &[u8], pos: usize) -> bool {
    let mut rest = &input[pos..];
    while !rest.is_empty() {
        let (cp, consumed) = decode_next(rest);
        if cp == COMBINING_DOT_ABOVE {
            return false;
        }
        if tables::ccc(cp) == 0 {
            return true;
        }
        rest = &rest[consumed..];
    }
    true
}

/// True iff a combining class 230 ("above") mark appears before the next
/// starter, scanning forward from `pos`.
fn more_above(input: &[u8], pos: usize) -> bool {
    let mut rest = &input[pos..];
    while !rest.is_empty() {
        let (cp, consumed) = decode_next(rest);
        let class = tables::ccc(cp);
        if class == 0 {
            return false;
        }
        if class == 230 {
            return true;
        }
        rest = &rest[consumed..];
    }
    false
}

/// Decodes the code point immediately preceding byte offset `pos`, if any.
fn preceding_cp(input: &[u8], pos: usize) -> Option<u32> {
    let back = crate::seek::seek(input, pos, -1, crate::seek::SeekFrom::Set);
    if back == pos {
        return None;
    }
    Some(decode_next(&input[back..pos]).0)
}

fn after_i(input: &[u8], pos: usize) -> bool {
    preceding_cp(input, pos) == Some(LATIN_CAPITAL_I)
}

fn after_soft_dotted(input: &[u8], pos: usize) -> bool {
    preceding_cp(input, pos).is_some_and(is_soft_dotted)
}

/// True iff `cp` is preceded (skipping case-ignorable code points) by a
/// cased letter.
fn preceded_by_cased(input: &[u8], pos: usize) -> bool {
    let mut cursor = pos;
    loop {
        let back = crate::seek::seek(input, cursor, -1, crate::seek::SeekFrom::Set);
        if back == cursor {
            return false;
        }
        let cp = decode_next(&input[back..cursor]).0;
        if tables::is_cased(cp) {
            return true;
        }
        if !tables::is_case_ignorable(cp) {
            return false;
        }
        cursor = back;
    }
}

/// True iff the code point following `pos` (skipping case-ignorable code
/// points) is a cased letter.
fn followed_by_cased(input: &[u8], pos: usize) -> bool {
    let mut rest = &input[pos..];
    while !rest.is_empty() {
        let (cp, consumed) = decode_next(rest);
        if tables::is_cased(cp) {
            return true;
        }
        if !tables::is_case_ignorable(cp) {
            return false;
        }
        rest = &rest[consumed..];
    }
    false
}

fn final_sigma(input: &[u8], pos: usize, after_pos: usize) -> bool {
    preceded_by_cased(input, pos) && !followed_by_cased(input, after_pos)
}

/// Maps one code point at byte offset `pos` (whose encoded form spans
/// `pos..after_pos`) under `op`/`locale`, appending the result (possibly
/// empty, for a deleted combiner) to `out`.
fn map_one(
    input: &[u8],
    pos: usize,
    after_pos: usize,
    cp: u32,
    op: CaseOp,
    locale: Locale,
    out: &mut crate::buffer::CaseExpansion,
) {
    // Turkish/Azeri tailoring: the four code points named in spec.md's
    // design note, checked before falling through to the default tables.
    if locale.is_turkic() {
        match (op, cp) {
            (CaseOp::Lower, LATIN_CAPITAL_I) => {
                out.push(if not_before_dot(input, after_pos) {
                    TURKISH_DOTLESS_I
                } else {
                    LATIN_SMALL_I
                });
                return;
            }
            (CaseOp::Lower | CaseOp::Fold, TURKISH_CAPITAL_I_DOT) => {
                out.push(LATIN_SMALL_I);
                return;
            }
            (CaseOp::Lower | CaseOp::Fold, COMBINING_DOT_ABOVE) if after_i(input, pos) => {
                return; // deleted: absorbed into the I -> i mapping above
            }
            (CaseOp::Upper | CaseOp::Title, LATIN_SMALL_I) => {
                out.push(TURKISH_CAPITAL_I_DOT);
                return;
            }
            _ => {}
        }
    }

    // Lithuanian tailoring.
    if locale.is_lithuanian() {
        match (op, cp) {
            (CaseOp::Lower, LATIN_CAPITAL_I | LATIN_CAPITAL_I_OGONEK) if more_above(input, after_pos) => {
                out.push(if cp == LATIN_CAPITAL_I_OGONEK {
                    LATIN_SMALL_I_OGONEK
                } else {
                    LATIN_SMALL_I
                });
                out.push(COMBINING_DOT_ABOVE);
                return;
            }
            (CaseOp::Upper | CaseOp::Title, COMBINING_DOT_ABOVE) if after_soft_dotted(input, pos) => {
                return; // dropped: redundant once the base letter is capitalized
            }
            _ => {}
        }
    }

    // Final_Sigma, locale-independent.
    if matches!(op, CaseOp::Lower | CaseOp::Fold) && cp == GREEK_CAPITAL_SIGMA {
        out.push(if final_sigma(input, pos, after_pos) {
            GREEK_FINAL_SIGMA
        } else {
            GREEK_SMALL_SIGMA
        });
        return;
    }

    let kind = match op {
        CaseOp::Upper | CaseOp::Title => CaseKind::Upper,
        CaseOp::Lower => CaseKind::Lower,
        CaseOp::Fold => CaseKind::Fold,
    };
    out.extend_from_slice(tables::mapping(cp, kind).as_slice());
}

fn transform(input: &[u8], mut output: Option<&mut [u8]>, locale: Locale, op: CaseOp) -> Result<usize, Utf8Error> {
    check_overlap(input, output.as_deref())?;
    let mut needed = 0usize;
    let mut pos = 0usize;
    let mut in_word_after_first_letter = false;
    while pos < input.len() {
        let (cp, consumed) = decode_next(&input[pos..]);
        let after_pos = pos + consumed;

        let mut expansion = crate::buffer::CaseExpansion::new();
        if op == CaseOp::Title && !is_word_letter(cp) {
            in_word_after_first_letter = false;
            expansion.push(cp); // word separators pass through unchanged
        } else {
            let effective_op = if op != CaseOp::Title {
                op
            } else if in_word_after_first_letter {
                CaseOp::Lower
            } else {
                in_word_after_first_letter = true;
                CaseOp::Title
            };
            map_one(input, pos, after_pos, cp, effective_op, locale, &mut expansion);
        }

        for &mapped in expansion.as_slice() {
            let len = crate::codec::encoded_len(mapped);
            if let Some(out) = output.as_deref_mut() {
                if needed + len > out.len() {
                    return Err(Utf8Error::NotEnoughSpace);
                }
                encode(mapped, &mut out[needed..needed + len]);
            }
            needed += len;
        }
        pos = after_pos;
    }
    Ok(needed)
}

pub fn utf8_upper(input: &[u8], output: Option<&mut [u8]>, locale: Locale) -> Result<usize, Utf8Error> {
    transform(input, output, locale, CaseOp::Upper)
}

pub fn utf8_lower(input: &[u8], output: Option<&mut [u8]>, locale: Locale) -> Result<usize, Utf8Error> {
    transform(input, output, locale, CaseOp::Lower)
}

pub fn utf8_title(input: &[u8], output: Option<&mut [u8]>, locale: Locale) -> Result<usize, Utf8Error> {
    transform(input, output, locale, CaseOp::Title)
}

pub fn utf8_casefold(input: &[u8], output: Option<&mut [u8]>, locale: Locale) -> Result<usize, Utf8Error> {
    transform(input, output, locale, CaseOp::Fold)
}
