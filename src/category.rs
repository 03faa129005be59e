// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! The 30-bit general-category bitmask from spec section 6.4, plus the
//! convenience aliases (`Letter`, `Mark`, `Number`, ... `IsAlnum`).
//!
//! The original C header this crate's function surface is modeled on
//! defines `ISALNUM`, `ISALPHA`, `ISUPPER`, `ISLOWER`, `ISDIGIT` and
//! `ISXDIGIT` as all expanding to `SEPARATOR_SPACE` — almost certainly a
//! copy-paste bug (confirmed against
//! `examples/original_source/include/utf8rewind/utf8rewind.h`). This
//! module defines them correctly instead; see DESIGN.md.

use bitflags::bitflags;

bitflags! {
    /// A union of Unicode general categories.
    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
    pub struct GeneralCategory: u32 {
        const LETTER_UPPERCASE      = 0x0000_0001; // Lu
        const LETTER_LOWERCASE      = 0x0000_0002; // Ll
        const LETTER_TITLECASE      = 0x0000_0004; // Lt
        const LETTER_MODIFIER       = 0x0000_0008; // Lm
        const LETTER_OTHER          = 0x0000_0010; // Lo

        const MARK_NON_SPACING      = 0x0000_0020; // Mn
        const MARK_SPACING          = 0x0000_0040; // Mc
        const MARK_ENCLOSING        = 0x0000_0080; // Me

        const NUMBER_DECIMAL        = 0x0000_0100; // Nd
        const NUMBER_LETTER         = 0x0000_0200; // Nl
        const NUMBER_OTHER          = 0x0000_0400; // No

        const PUNCTUATION_CONNECTOR = 0x0000_0800; // Pc
        const PUNCTUATION_DASH      = 0x0000_1000; // Pd
        const PUNCTUATION_OPEN      = 0x0000_2000; // Ps
        const PUNCTUATION_CLOSE     = 0x0000_4000; // Pe
        const PUNCTUATION_INITIAL   = 0x0000_8000; // Pi
        const PUNCTUATION_FINAL     = 0x0001_0000; // Pf
        const PUNCTUATION_OTHER     = 0x0002_0000; // Po

        const SYMBOL_MATH           = 0x0004_0000; // Sm
        const SYMBOL_CURRENCY       = 0x0008_0000; // Sc
        const SYMBOL_MODIFIER       = 0x0010_0000; // Sk
        const SYMBOL_OTHER          = 0x0020_0000; // So

        const SEPARATOR_SPACE       = 0x0040_0000; // Zs
        const SEPARATOR_LINE        = 0x0080_0000; // Zl
        const SEPARATOR_PARAGRAPH   = 0x0100_0000; // Zp

        const CONTROL               = 0x0200_0000; // Cc
        const FORMAT                = 0x0400_0000; // Cf
        const SURROGATE             = 0x0800_0000; // Cs
        const PRIVATE_USE           = 0x1000_0000; // Co
        const UNASSIGNED            = 0x2000_0000; // Cn

        const LETTER = Self::LETTER_UPPERCASE.bits() | Self::LETTER_LOWERCASE.bits()
            | Self::LETTER_TITLECASE.bits() | Self::LETTER_MODIFIER.bits()
            | Self::LETTER_OTHER.bits();
        const CASE_MAPPED = Self::LETTER_UPPERCASE.bits() | Self::LETTER_LOWERCASE.bits()
            | Self::LETTER_TITLECASE.bits();
        const MARK = Self::MARK_NON_SPACING.bits() | Self::MARK_SPACING.bits()
            | Self::MARK_ENCLOSING.bits();
        const NUMBER = Self::NUMBER_DECIMAL.bits() | Self::NUMBER_LETTER.bits()
            | Self::NUMBER_OTHER.bits();
        const PUNCTUATION = Self::PUNCTUATION_CONNECTOR.bits() | Self::PUNCTUATION_DASH.bits()
            | Self::PUNCTUATION_OPEN.bits() | Self::PUNCTUATION_CLOSE.bits()
            | Self::PUNCTUATION_INITIAL.bits() | Self::PUNCTUATION_FINAL.bits()
            | Self::PUNCTUATION_OTHER.bits();
        const SYMBOL = Self::SYMBOL_MATH.bits() | Self::SYMBOL_CURRENCY.bits()
            | Self::SYMBOL_MODIFIER.bits() | Self::SYMBOL_OTHER.bits();
        const SEPARATOR = Self::SEPARATOR_SPACE.bits() | Self::SEPARATOR_LINE.bits()
            | Self::SEPARATOR_PARAGRAPH.bits();

        const IS_CNTRL = Self::CONTROL.bits();
        const IS_PRINT = Self::LETTER.bits() | Self::NUMBER.bits()
            | Self::PUNCTUATION.bits() | Self::SYMBOL.bits() | Self::SEPARATOR.bits();
        const IS_SPACE = Self::SEPARATOR_SPACE.bits();
        const IS_BLANK = Self::SEPARATOR_SPACE.bits();
        const IS_GRAPH = Self::LETTER.bits() | Self::NUMBER.bits()
            | Self::PUNCTUATION.bits() | Self::SYMBOL.bits();
        const IS_PUNCT = Self::PUNCTUATION.bits() | Self::SYMBOL.bits();

        // Fixed per spec.md section 9 / DESIGN.md: the original C header
        // aliased all six of these to SEPARATOR_SPACE.
        const IS_ALNUM = Self::LETTER.bits() | Self::NUMBER.bits();
        const IS_ALPHA = Self::LETTER.bits();
        const IS_UPPER = Self::LETTER_UPPERCASE.bits();
        const IS_LOWER = Self::LETTER_LOWERCASE.bits();
        const IS_DIGIT = Self::NUMBER_DECIMAL.bits();
        // Hex digits aren't a general category; NUMBER_DECIMAL is the
        // closest representable approximation (ASCII 0-9 is a subset of
        // it). A-Fa-f hex letters fall under LETTER_UPPERCASE/LOWERCASE
        // and must be checked by value, not by category, by callers that
        // need true `isxdigit` semantics.
        const IS_XDIGIT = Self::NUMBER_DECIMAL.bits();
    }
}

bitflags! {
    /// Flags accepted by [`crate::normalize::normalize`] and
    /// [`crate::normalize::is_normalized`] (spec section 6.3).
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct NormalizeFlags: u32 {
        /// Normalize to NFC (or NFKC with `COMPATIBILITY` set).
        const COMPOSE       = 0x1;
        /// Normalize to NFD (or NFKD with `COMPATIBILITY` set).
        const DECOMPOSE     = 0x2;
        /// Modifier: use compatibility decomposition instead of canonical.
        const COMPATIBILITY = 0x4;
    }
}

/// The four normalization forms, derived from a validated [`NormalizeFlags`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NormalizationForm {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl NormalizationForm {
    pub fn from_flags(flags: NormalizeFlags) -> Result<Self, crate::error::Utf8Error> {
        let compose = flags.contains(NormalizeFlags::COMPOSE);
        let decompose = flags.contains(NormalizeFlags::DECOMPOSE);
        if compose == decompose {
            // both or neither set: invalid
            return Err(crate::error::Utf8Error::InvalidFlag);
        }
        let known = NormalizeFlags::COMPOSE | NormalizeFlags::DECOMPOSE | NormalizeFlags::COMPATIBILITY;
        if !known.contains(flags) {
            return Err(crate::error::Utf8Error::InvalidFlag);
        }
        let compat = flags.contains(NormalizeFlags::COMPATIBILITY);
        Ok(match (compose, compat) {
            (true, false) => NormalizationForm::Nfc,
            (true, true) => NormalizationForm::Nfkc,
            (false, false) => NormalizationForm::Nfd,
            (false, true) => NormalizationForm::Nfkd,
        })
    }

    pub fn is_compatibility(self) -> bool {
        matches!(self, NormalizationForm::Nfkc | NormalizationForm::Nfkd)
    }

    pub fn is_compose(self) -> bool {
        matches!(self, NormalizationForm::Nfc | NormalizationForm::Nfkc)
    }
}

/// The number of leading bytes of `input` whose every decoded code point
/// matches `mask`, stopping at the first code point that doesn't (spec
/// section 6.4's `utf8_is_category`).
pub fn utf8_is_category(input: &[u8], mask: GeneralCategory) -> usize {
    let mut pos = 0usize;
    let mut rest = input;
    while !rest.is_empty() {
        let (cp, consumed) = crate::codec::decode_next(rest);
        if !crate::tables::category(cp).intersects(mask) {
            break;
        }
        rest = &rest[consumed..];
        pos += consumed;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_letter_categories_fixed() {
        // The bug named in spec.md section 9: these must NOT all collapse
        // to SEPARATOR_SPACE.
        assert_eq!(GeneralCategory::IS_ALPHA, GeneralCategory::LETTER);
        assert_eq!(GeneralCategory::IS_UPPER, GeneralCategory::LETTER_UPPERCASE);
        assert_eq!(GeneralCategory::IS_LOWER, GeneralCategory::LETTER_LOWERCASE);
        assert_ne!(GeneralCategory::IS_ALPHA, GeneralCategory::SEPARATOR_SPACE);
        assert_ne!(GeneralCategory::IS_UPPER, GeneralCategory::SEPARATOR_SPACE);
    }

    #[test]
    fn flag_validation() {
        use crate::error::Utf8Error;
        assert!(NormalizationForm::from_flags(NormalizeFlags::COMPOSE).is_ok());
        assert!(NormalizationForm::from_flags(NormalizeFlags::DECOMPOSE).is_ok());
        assert_eq!(
            NormalizationForm::from_flags(NormalizeFlags::empty()),
            Err(Utf8Error::InvalidFlag)
        );
        assert_eq!(
            NormalizationForm::from_flags(NormalizeFlags::COMPOSE | NormalizeFlags::DECOMPOSE),
            Err(Utf8Error::InvalidFlag)
        );
        assert_eq!(
            NormalizationForm::from_flags(NormalizeFlags::COMPATIBILITY),
            Err(Utf8Error::InvalidFlag)
        );
        assert_eq!(
            NormalizationForm::from_flags(
                NormalizeFlags::COMPOSE | NormalizeFlags::COMPATIBILITY
            ),
            Ok(NormalizationForm::Nfkc)
        );
    }

    #[test]
    fn is_category_stops_at_first_non_matching_code_point() {
        let n = utf8_is_category(b"abc123", GeneralCategory::IS_ALPHA);
        assert_eq!(n, 3);
        let n = utf8_is_category(b"123abc", GeneralCategory::IS_DIGIT);
        assert_eq!(n, 3);
    }
}
