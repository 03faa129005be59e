// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! Locale tailoring for case mapping (spec section 4.4).
//!
//! The C source this crate's case mapper follows reads the thread's C
//! library locale once per call via `setlocale`/`LC_ALL` inspection. Rust
//! has no portable, allocation-free, safe equivalent of that, and it would
//! violate this crate's "pure function of its arguments" invariant (spec
//! section 3) to read real process-global state. [`Locale`] is passed
//! explicitly instead; see DESIGN.md for this Open Question's resolution.
//! Only Turkish/Azeri and Lithuanian behave differently from the root
//! locale, matching the "locale effect is narrow" design note in spec
//! section 9.

/// Selects locale-specific case-mapping tailoring.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Locale {
    /// Default (root) casing rules: unconditional SpecialCasing mappings,
    /// plus the language-independent conditional rules (Final_Sigma).
    #[default]
    Root,
    /// Turkish tailoring: dotted/dotless I.
    Turkish,
    /// Azeri tailoring: identical to Turkish for the code points this
    /// crate cares about.
    Azeri,
    /// Lithuanian tailoring: explicit dot above retained/added around
    /// soft-dotted letters.
    Lithuanian,
}

impl Locale {
    pub fn is_turkic(self) -> bool {
        matches!(self, Locale::Turkish | Locale::Azeri)
    }

    pub fn is_lithuanian(self) -> bool {
        matches!(self, Locale::Lithuanian)
    }
}
