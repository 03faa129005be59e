// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! `utf8kit`: allocation-aware Unicode text operations directly over
//! UTF-8 byte buffers — codec conversion, code-point-aware seeking, full
//! case mapping, and Normalization Forms C/D/KC/KD.
//!
//! Every transform is a pure function of its arguments: bytes in, an
//! optional output buffer (pass `None` to measure the required size
//! without writing), and for case mapping a [`Locale`] tailoring
//! selector. Nothing here allocates on the hot path or touches process
//! state.
//!
//! ```
//! use utf8kit::{Locale, utf8_upper};
//!
//! let input = "straße".as_bytes();
//! let needed = utf8_upper(input, None, Locale::Root).unwrap();
//! let mut buf = vec![0u8; needed];
//! utf8_upper(input, Some(&mut buf), Locale::Root).unwrap();
//! assert_eq!(buf, b"STRASSE");
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

mod buffer;
mod case;
mod category;
mod codec;
mod error;
mod locale;
mod normalize;
mod seek;
mod tables;

#[cfg(feature = "capi")]
pub mod ffi;

pub use buffer::{CaseExpansion, CombiningSequence, Utf8Scratch};
pub use case::{utf8_casefold, utf8_lower, utf8_title, utf8_upper, CaseOp};
pub use category::{utf8_is_category, GeneralCategory, NormalizationForm, NormalizeFlags};
pub use codec::{
    buffers_overlap, decode_next, encode, encoded_len, utf16_contains_invalid, utf16_to_utf8,
    utf32_contains_invalid, utf32_to_utf8, utf8_contains_invalid, utf8_length, utf8_to_utf16,
    utf8_to_utf32, utf8_to_wide, wide_to_utf8, REPLACEMENT, WCHAR_WIDTH,
};
pub use error::Utf8Error;
pub use locale::Locale;
pub use normalize::{utf8_is_normalized, utf8_normalize, Normalized};
pub use seek::{seek as utf8_seek, SeekFrom};
