// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! The error type shared by every transform in this crate.
//!
//! Mirrors the four error codes of the language-agnostic function surface
//! (`NONE`, `INVALID_DATA`, `INVALID_FLAG`, `NOT_ENOUGH_SPACE`,
//! `OVERLAPPING_PARAMETERS`): `NONE` is simply `Ok(_)`.

use displaydoc::Display;

/// Error returned by a transform operation.
///
/// `InvalidData` is advisory: every transform in this crate always
/// completes and substitutes `U+FFFD` for malformed input rather than
/// aborting, so no function in this crate ever actually returns
/// `Err(InvalidData)` — the variant exists so `Utf8Error::code` covers
/// spec section 6.2's full error-code table, and so FFI callers
/// (`ffi::utf8kit_errno`) see the same numbering the C source does.
/// A caller that wants to know whether replacement happened should
/// query [`crate::utf8_contains_invalid`] (or the UTF-16/32 equivalents)
/// rather than inspect a `Result`, since the condition never changes
/// what gets written. The other three variants mean the operation
/// aborted; see each variant's doc comment for what was (or wasn't)
/// written before aborting.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Error {
    /// input contained malformed data; output uses U+FFFD in its place
    InvalidData,
    /// flag combination is invalid or unrecognised
    InvalidFlag,
    /// output buffer is smaller than required; call again with a null buffer to measure
    NotEnoughSpace,
    /// input and output buffers overlap in memory
    OverlappingParameters,
}

#[cfg(feature = "std")]
impl std::error::Error for Utf8Error {}

impl Utf8Error {
    /// The numeric error code from spec section 6.2, for FFI interop.
    pub const fn code(self) -> i32 {
        match self {
            Utf8Error::InvalidData => -1,
            Utf8Error::InvalidFlag => -2,
            Utf8Error::NotEnoughSpace => -3,
            Utf8Error::OverlappingParameters => -4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_spec() {
        assert_eq!(Utf8Error::InvalidData.code(), -1);
        assert_eq!(Utf8Error::InvalidFlag.code(), -2);
        assert_eq!(Utf8Error::NotEnoughSpace.code(), -3);
        assert_eq!(Utf8Error::OverlappingParameters.code(), -4);
    }
}
