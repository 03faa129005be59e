// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! C1: read-only Unicode data lookups (spec section 4.1).
//!
//! Every function here is a pure `fn(code point) -> ...` with no
//! allocation and no shared mutable state, backed by the static data in
//! [`data`]. The lookup *interface* (this module's public functions) is
//! the full contract spec section 6.4 describes; only the *data* backing
//! it is a curated subset rather than a full generated UCD table (see
//! `data.rs`'s module doc and DESIGN.md).
#![deny(unsafe_code)]

mod data;

use crate::buffer::{CaseExpansion, CombiningSequence};
use crate::category::GeneralCategory;
use data::{Decomposition, CCC_EXCEPTIONS, DECOMPOSITIONS, SPECIAL_FOLD, SPECIAL_LOWER, SPECIAL_UPPER};

/// Which case-mapping table column a lookup wants (spec section 3).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CaseKind {
    Upper,
    Lower,
    Title,
    Fold,
}

/// Canonical or compatibility decomposition, or none (spec section 3).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecompKind {
    None,
    Canonical,
    Compat,
}

/// Per-form quick-check hint (spec section 3).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QuickCheck {
    Yes,
    Maybe,
    No,
}

/// The general category bitmask for `cp` (spec section 4.1).
///
/// Covers Basic Latin, Latin-1 Supplement, part of Latin Extended-A,
/// Greek, basic Cyrillic, Hangul, and the combining marks this crate's
/// normalizer tables reference. Anything else reports `UNASSIGNED`
/// rather than guessing — see DESIGN.md.
pub fn category(cp: u32) -> GeneralCategory {
    use GeneralCategory as GC;
    match cp {
        0x00..=0x08 | 0x0E..=0x1F | 0x7F..=0x9F => GC::CONTROL,
        0x09..=0x0D => GC::CONTROL,
        0x20 => GC::SEPARATOR_SPACE,
        0x21..=0x23 | 0x25..=0x27 | 0x2A | 0x2C | 0x2E | 0x2F => GC::PUNCTUATION_OTHER,
        0x24 => GC::SYMBOL_CURRENCY,
        0x28 => GC::PUNCTUATION_OPEN,
        0x29 => GC::PUNCTUATION_CLOSE,
        0x2B => GC::SYMBOL_MATH,
        0x2D => GC::PUNCTUATION_DASH,
        0x30..=0x39 => GC::NUMBER_DECIMAL,
        0x3A | 0x3B | 0x3F | 0x40 => GC::PUNCTUATION_OTHER,
        0x3C | 0x3D | 0x3E => GC::SYMBOL_MATH,
        0x41..=0x5A => GC::LETTER_UPPERCASE,
        0x5B => GC::PUNCTUATION_OPEN,
        0x5C => GC::PUNCTUATION_OTHER,
        0x5D => GC::PUNCTUATION_CLOSE,
        0x5E | 0x60 => GC::SYMBOL_MODIFIER,
        0x5F => GC::PUNCTUATION_CONNECTOR,
        0x61..=0x7A => GC::LETTER_LOWERCASE,
        0x7B => GC::PUNCTUATION_OPEN,
        0x7C => GC::SYMBOL_MATH,
        0x7D => GC::PUNCTUATION_CLOSE,
        0x7E => GC::SYMBOL_MATH,
        0xA0 => GC::SEPARATOR_SPACE,
        0xA1 | 0xBF => GC::PUNCTUATION_OTHER,
        0xA2..=0xA5 => GC::SYMBOL_CURRENCY,
        0xAA | 0xBA => GC::LETTER_OTHER,
        0xAB => GC::PUNCTUATION_INITIAL,
        0xB2 | 0xB3 | 0xB9 => GC::NUMBER_OTHER,
        0xB5 => GC::LETTER_LOWERCASE,
        0xBB => GC::PUNCTUATION_FINAL,
        0xB7 => GC::PUNCTUATION_OTHER,
        0xD7 | 0xF7 => GC::SYMBOL_MATH,
        0xC0..=0xD6 | 0xD8..=0xDE => GC::LETTER_UPPERCASE,
        0xDF => GC::LETTER_LOWERCASE,
        0xE0..=0xF6 | 0xF8..=0xFF => GC::LETTER_LOWERCASE,
        0x100..=0x137 => {
            if cp % 2 == 0 {
                GC::LETTER_UPPERCASE
            } else {
                GC::LETTER_LOWERCASE
            }
        }
        0x138 => GC::LETTER_LOWERCASE,
        0x300..=0x36F => GC::MARK_NON_SPACING,
        0x391..=0x3A1 | 0x3A3..=0x3AB => GC::LETTER_UPPERCASE,
        0x3B1..=0x3C9 => GC::LETTER_LOWERCASE,
        0x400..=0x42F => GC::LETTER_UPPERCASE,
        0x430..=0x45F => GC::LETTER_LOWERCASE,
        0x1E00..=0x1E95 | 0x1E9E => {
            // Latin Extended Additional: follows the same even=upper,
            // odd=lower convention as Latin Extended-A for the part of
            // the block this crate's tables reference.
            if cp == 0x1E9E || cp % 2 == 0 {
                GC::LETTER_UPPERCASE
            } else {
                GC::LETTER_LOWERCASE
            }
        }
        0x1100..=0x11FF => GC::LETTER_OTHER, // Hangul Jamo
        0xAC00..=0xD7A3 => GC::LETTER_OTHER, // Hangul syllables
        0xFB00..=0xFB06 => GC::LETTER_LOWERCASE,
        _ => GC::UNASSIGNED,
    }
}

/// Canonical combining class (spec section 4.1). Starters (the vast
/// majority of code points) are 0; see [`data::CCC_EXCEPTIONS`].
pub fn ccc(cp: u32) -> u8 {
    if is_hangul_v(cp) || is_hangul_t(cp) {
        return 0; // Hangul jamo are starters; the syllable algorithm
                  // handles composition/decomposition positionally, not
                  // through combining-class reordering.
    }
    CCC_EXCEPTIONS
        .iter()
        .find(|&&(c, _)| c == cp)
        .map(|&(_, class)| class)
        .unwrap_or(0)
}

pub fn is_starter(cp: u32) -> bool {
    ccc(cp) == 0
}

/// True for code points the case mapper treats as "cased" (spec section
/// 4.4's `Final_Sigma`/titlecasing word-boundary predicates need this).
pub fn is_cased(cp: u32) -> bool {
    category(cp).intersects(GeneralCategory::CASE_MAPPED) || cp == 0x00B5 // µ is cased though Ll-lowercase-like
}

/// True for code points that are ignored when scanning past a cased
/// letter for `Final_Sigma`/`After_Soft_Dotted` context (combining marks,
/// format characters, and a small set of case-ignorable punctuation).
pub fn is_case_ignorable(cp: u32) -> bool {
    category(cp).intersects(GeneralCategory::MARK_NON_SPACING | GeneralCategory::FORMAT)
        || matches!(cp, 0x0027 | 0x00AD | 0x00B7 | 0x2019 | 0x2027)
}

/// The decomposition kind and mapping for `cp`, per spec section 4.1.
/// Returns an empty, `DecompKind::None` result for a code point with no
/// decomposition (including one already a starter with nothing to say).
pub fn decomposition(cp: u32, include_compat: bool) -> (DecompKind, CombiningSequence) {
    let mut out = CombiningSequence::new();
    if let Some(jamo) = hangul_decompose(cp) {
        out.extend_from_slice(jamo.as_slice());
        return (DecompKind::Canonical, out);
    }
    match DECOMPOSITIONS.iter().find(|d| d.code == cp) {
        Some(Decomposition { compat: false, mapping, .. }) => {
            out.extend_from_slice(mapping);
            (DecompKind::Canonical, out)
        }
        Some(Decomposition { compat: true, mapping, .. }) if include_compat => {
            out.extend_from_slice(mapping);
            (DecompKind::Compat, out)
        }
        _ => (DecompKind::None, out),
    }
}

/// Canonical composition `(starter, combiner) -> composite`, including
/// the algorithmic Hangul L+V and LV+T cases (spec section 4.5).
pub fn compose(starter: u32, combiner: u32) -> Option<u32> {
    if let Some(hangul) = hangul_compose(starter, combiner) {
        return Some(hangul);
    }
    DECOMPOSITIONS.iter().find_map(|d| {
        if !d.compat && d.mapping.len() == 2 && d.mapping[0] == starter && d.mapping[1] == combiner
        {
            Some(d.code)
        } else {
            None
        }
    })
}

/// True iff some canonical decomposition has `cp` as its second element —
/// i.e. `cp` can combine backward with a preceding starter. Used to
/// derive the NFC/NFKC quick-check `Maybe` flag without a separate table.
fn is_second_half_of_composition(cp: u32) -> bool {
    is_hangul_v(cp)
        || is_hangul_t(cp)
        || DECOMPOSITIONS
            .iter()
            .any(|d| !d.compat && d.mapping.len() == 2 && d.mapping[1] == cp)
}

/// Quick-check flag for `cp` under `form` (spec section 3/4.5).
///
/// Decomposition forms (NFD/NFKD) are straightforward: anything with a
/// relevant decomposition is unstable. Composition forms (NFC/NFKC) are
/// not simply "has no decomposition": a precomposed character such as Å
/// has a canonical decomposition yet is already in NFC, because its
/// decomposition composes straight back to it (this crate's curated
/// table has no composition exclusions, so canonical decomposability
/// never disqualifies NFC stability here). Only a *compatibility-only*
/// decomposition forces instability under NFKC, since that folding must
/// always be applied.
pub fn quick_check(cp: u32, form: crate::category::NormalizationForm) -> QuickCheck {
    use crate::category::NormalizationForm as F;
    let (canonical_kind, _) = decomposition(cp, false);
    let (full_kind, _) = decomposition(cp, form.is_compatibility());
    match form {
        F::Nfd => {
            if canonical_kind == DecompKind::Canonical {
                QuickCheck::No
            } else {
                QuickCheck::Yes
            }
        }
        F::Nfkd => {
            if full_kind != DecompKind::None {
                QuickCheck::No
            } else {
                QuickCheck::Yes
            }
        }
        F::Nfc => {
            if is_second_half_of_composition(cp) {
                QuickCheck::Maybe
            } else {
                QuickCheck::Yes
            }
        }
        F::Nfkc => {
            if full_kind == DecompKind::Compat {
                QuickCheck::No
            } else if is_second_half_of_composition(cp) {
                QuickCheck::Maybe
            } else {
                QuickCheck::Yes
            }
        }
    }
}

/// The 1..N code point expansion for `cp` under `kind`, ignoring locale
/// and context (spec section 4.4's default/root mapping). Callers in
/// `case.rs` apply locale tailoring and context predicates on top of
/// this.
pub fn mapping(cp: u32, kind: CaseKind) -> CaseExpansion {
    let mut out = CaseExpansion::new();
    match kind {
        CaseKind::Upper | CaseKind::Title => {
            if let Some(&(_, special)) = SPECIAL_UPPER.iter().find(|&&(c, _)| c == cp) {
                out.extend_from_slice(special);
                return out;
            }
            out.push(algorithmic_upper(cp));
        }
        CaseKind::Lower => {
            if let Some(&(_, special)) = SPECIAL_LOWER.iter().find(|&&(c, _)| c == cp) {
                out.extend_from_slice(special);
                return out;
            }
            out.push(algorithmic_lower(cp));
        }
        CaseKind::Fold => {
            if let Some(&(_, special)) = SPECIAL_FOLD.iter().find(|&&(c, _)| c == cp) {
                out.extend_from_slice(special);
                return out;
            }
            out.push(algorithmic_lower(cp));
        }
    }
    out
}

fn algorithmic_upper(cp: u32) -> u32 {
    match cp {
        0x61..=0x7A => cp - 0x20,
        0xE0..=0xF6 | 0xF8..=0xFE => cp - 0x20, // excludes 0xDF, 0xFF (special)
        0x100..=0x137 if cp % 2 == 1 => cp - 1,
        0x3B1..=0x3C9 => cp - 0x20, // excludes 0x3C2 (special)
        0x430..=0x44F => cp - 0x20,
        0x450..=0x45F => cp - 0x50,
        0x1E01..=0x1E95 if cp % 2 == 1 => cp - 1,
        _ => cp,
    }
}

fn algorithmic_lower(cp: u32) -> u32 {
    match cp {
        0x41..=0x5A => cp + 0x20,
        0xC0..=0xD6 | 0xD8..=0xDE => cp + 0x20,
        0x100..=0x136 if cp % 2 == 0 => cp + 1,
        0x391..=0x3A1 | 0x3A3..=0x3AB => cp + 0x20,
        0x410..=0x42F => cp + 0x20,
        0x400..=0x40F => cp + 0x50,
        0x1E00..=0x1E94 if cp % 2 == 0 => cp + 1,
        _ => cp,
    }
}

// --- Hangul algorithmic decomposition/composition (spec section 4.5) ---
// No table lookup: the syllable block is a clean arithmetic progression
// over (L, V, T) jamo indices, per UAX #29 / the Unicode core spec ch. 3.

pub const HANGUL_S_BASE: u32 = 0xAC00;
pub const HANGUL_L_BASE: u32 = 0x1100;
pub const HANGUL_V_BASE: u32 = 0x1161;
pub const HANGUL_T_BASE: u32 = 0x11A7;
pub const HANGUL_L_COUNT: u32 = 19;
pub const HANGUL_V_COUNT: u32 = 21;
pub const HANGUL_T_COUNT: u32 = 28;
pub const HANGUL_N_COUNT: u32 = HANGUL_V_COUNT * HANGUL_T_COUNT; // 588
pub const HANGUL_S_COUNT: u32 = HANGUL_L_COUNT * HANGUL_N_COUNT; // 11172

pub fn is_hangul_syllable(cp: u32) -> bool {
    (HANGUL_S_BASE..HANGUL_S_BASE + HANGUL_S_COUNT).contains(&cp)
}

fn is_hangul_l(cp: u32) -> bool {
    (HANGUL_L_BASE..HANGUL_L_BASE + HANGUL_L_COUNT).contains(&cp)
}

fn is_hangul_v(cp: u32) -> bool {
    (HANGUL_V_BASE..HANGUL_V_BASE + HANGUL_V_COUNT).contains(&cp)
}

fn is_hangul_t(cp: u32) -> bool {
    cp != HANGUL_T_BASE && (HANGUL_T_BASE..HANGUL_T_BASE + HANGUL_T_COUNT).contains(&cp)
}

/// A fixed 2- or 3-element jamo sequence.
pub struct HangulJamo {
    buf: [u32; 3],
    len: u8,
}

impl HangulJamo {
    pub fn as_slice(&self) -> &[u32] {
        &self.buf[..self.len as usize]
    }
}

/// Algorithmic Hangul decomposition: `S -> L V [T]`.
pub fn hangul_decompose(cp: u32) -> Option<HangulJamo> {
    if !is_hangul_syllable(cp) {
        return None;
    }
    let s_index = cp - HANGUL_S_BASE;
    let l = HANGUL_L_BASE + s_index / HANGUL_N_COUNT;
    let v = HANGUL_V_BASE + (s_index % HANGUL_N_COUNT) / HANGUL_T_COUNT;
    let t_index = s_index % HANGUL_T_COUNT;
    if t_index == 0 {
        Some(HangulJamo { buf: [l, v, 0], len: 2 })
    } else {
        Some(HangulJamo { buf: [l, v, HANGUL_T_BASE + t_index], len: 3 })
    }
}

/// Algorithmic Hangul composition: `L+V -> LV`, `LV+T -> LVT`.
pub fn hangul_compose(starter: u32, combiner: u32) -> Option<u32> {
    if is_hangul_l(starter) && is_hangul_v(combiner) {
        let l_index = starter - HANGUL_L_BASE;
        let v_index = combiner - HANGUL_V_BASE;
        return Some(HANGUL_S_BASE + (l_index * HANGUL_V_COUNT + v_index) * HANGUL_T_COUNT);
    }
    if is_hangul_syllable(starter) && (starter - HANGUL_S_BASE) % HANGUL_T_COUNT == 0 && is_hangul_t(combiner)
    {
        let t_index = combiner - HANGUL_T_BASE;
        return Some(starter + t_index);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::NormalizationForm;

    #[test]
    fn latin1_decomposition_round_trips_compose() {
        let (kind, mapping) = decomposition(0x00C5, false);
        assert_eq!(kind, DecompKind::Canonical);
        assert_eq!(mapping.as_slice(), &[0x0041, 0x030A]);
        assert_eq!(compose(0x0041, 0x030A), Some(0x00C5));
    }

    #[test]
    fn s_with_dot_below_and_above_decomposes_recursively_one_level() {
        let (kind, mapping) = decomposition(0x1E69, false);
        assert_eq!(kind, DecompKind::Canonical);
        assert_eq!(mapping.as_slice(), &[0x1E61, 0x0323]);
        let (kind2, mapping2) = decomposition(0x1E61, false);
        assert_eq!(kind2, DecompKind::Canonical);
        assert_eq!(mapping2.as_slice(), &[0x0073, 0x0307]);
    }

    #[test]
    fn hangul_round_trip() {
        // 가 GA = L(0x1100) + V(0x1161)
        let jamo = hangul_decompose(0xAC00).unwrap();
        assert_eq!(jamo.as_slice(), &[0x1100, 0x1161]);
        assert_eq!(hangul_compose(0x1100, 0x1161), Some(0xAC00));
    }

    #[test]
    fn ccc_exceptions_and_ordering() {
        assert_eq!(ccc(0x0307), 230);
        assert_eq!(ccc(0x0323), 220);
        assert!(ccc(0x0323) < ccc(0x0307));
        assert_eq!(ccc(0x0041), 0);
    }

    #[test]
    fn quick_check_flags() {
        assert_eq!(quick_check(0x0065, NormalizationForm::Nfc), QuickCheck::Yes); // 'e'
        assert_eq!(quick_check(0x0301, NormalizationForm::Nfc), QuickCheck::Maybe); // combining acute
        assert_eq!(quick_check(0x00C5, NormalizationForm::Nfd), QuickCheck::No); // Å must decompose
        assert_eq!(quick_check(0x00C5, NormalizationForm::Nfc), QuickCheck::Yes);
    }
}
