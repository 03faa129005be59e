// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! C2: UTF-8 codec — decode/encode, UTF-16/UTF-32/wide conversion, overlap
//! detection (spec section 4.2).

use crate::buffer::Utf8Scratch;
use crate::error::Utf8Error;

pub const REPLACEMENT: u32 = 0xFFFD;

/// 2 on Windows-like targets (`wchar_t` is `u16` there), 4 elsewhere. Rust
/// has no portable `wchar_t`; this is the crate-level analogue of the
/// original header's preprocessor-time `UTF8_WCHAR_SIZE` choice.
#[cfg(windows)]
pub const WCHAR_WIDTH: usize = 2;
#[cfg(not(windows))]
pub const WCHAR_WIDTH: usize = 4;

/// Decodes one code point starting at `bytes[0]`.
///
/// Returns `(code_point, bytes_consumed)`. A malformed lead or
/// continuation byte yields `(REPLACEMENT, consumed)` with `consumed`
/// equal to however many bytes the ill-formed sequence actually occupies
/// (at least 1), per the "maximal subpart" substitution rule. Panics if
/// `bytes` is empty — callers only invoke this while bytes remain.
pub fn decode_next(bytes: &[u8]) -> (u32, usize) {
    let (cp, consumed, _) = decode_next_raw(bytes);
    (cp, consumed)
}

/// As [`decode_next`], plus a third flag that is `true` iff this code
/// point is a `REPLACEMENT` standing in for malformed input, as opposed
/// to a well-formed sequence that happens to legitimately decode to
/// `U+FFFD`. Used by [`utf8_contains_invalid`] to implement the
/// advisory `INVALID_DATA` condition from spec section 7 without
/// conflating the two.
fn decode_next_raw(bytes: &[u8]) -> (u32, usize, bool) {
    let b0 = bytes[0];
    if b0 < 0x80 {
        return (b0 as u32, 1, false);
    }
    let (len, init) = match b0 {
        // 0xC0/0xC1 can only ever encode an overlong 2-byte sequence, but
        // they're still classified as 2-byte leads here so their
        // continuation byte is inspected and the "maximal subpart" rule
        // reports consumed = 2, not 1, when rejecting them below.
        0xC0..=0xDF => (2, (b0 & 0x1F) as u32),
        0xE0..=0xEF => (3, (b0 & 0x0F) as u32),
        0xF0..=0xF4 => (4, (b0 & 0x07) as u32),
        _ => return (REPLACEMENT, 1, true), // 0x80-0xBF, 0xF5-0xFF: never a valid lead
    };
    if bytes.len() < len {
        // Validate whatever continuation bytes are actually present so we
        // don't over-consume past a second malformed byte.
        return (REPLACEMENT, valid_continuation_run(bytes, 1) + 1, true);
    }
    let valid = valid_continuation_run(&bytes[..len], 1);
    if valid != len - 1 {
        return (REPLACEMENT, valid + 1, true);
    }
    let mut cp = init;
    for &b in &bytes[1..len] {
        cp = (cp << 6) | (b & 0x3F) as u32;
    }
    if is_overlong(cp, len) || (0xD800..=0xDFFF).contains(&cp) || cp > 0x10FFFF {
        return (REPLACEMENT, len, true);
    }
    (cp, len, false)
}

/// True iff decoding all of `input` as UTF-8 would substitute at least one
/// `REPLACEMENT` for genuinely malformed data. Exposes spec section 7's
/// advisory `INVALID_DATA` condition as a pure, allocation-free query a
/// caller can run before or after a transform — the same role the table
/// lookups in [`crate::tables`] play, rather than threading an extra
/// out-parameter through every transform for a condition that never
/// changes what gets written.
pub fn utf8_contains_invalid(input: &[u8]) -> bool {
    let mut rest = input;
    while !rest.is_empty() {
        let (_, consumed, is_error) = decode_next_raw(rest);
        if is_error {
            return true;
        }
        rest = &rest[consumed..];
    }
    false
}

fn valid_continuation_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .take_while(|&&b| (0x80..=0xBF).contains(&b))
        .count()
}

fn is_overlong(cp: u32, len: usize) -> bool {
    match len {
        2 => cp < 0x80,
        3 => cp < 0x800,
        4 => cp < 0x10000,
        _ => false,
    }
}

/// Encodes `cp` into `out`, returning the number of bytes written (1..=4).
/// A code point outside the valid scalar range is replaced with
/// `REPLACEMENT` before encoding. `out` must have room for at least 4
/// bytes; callers needing an exact-size buffer should measure with
/// [`encoded_len`] first.
pub fn encode(cp: u32, out: &mut [u8]) -> usize {
    let cp = if (0xD800..=0xDFFF).contains(&cp) || cp > 0x10FFFF {
        REPLACEMENT
    } else {
        cp
    };
    match cp {
        0x00..=0x7F => {
            out[0] = cp as u8;
            1
        }
        0x80..=0x7FF => {
            out[0] = 0xC0 | (cp >> 6) as u8;
            out[1] = 0x80 | (cp & 0x3F) as u8;
            2
        }
        0x800..=0xFFFF => {
            out[0] = 0xE0 | (cp >> 12) as u8;
            out[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            out[2] = 0x80 | (cp & 0x3F) as u8;
            3
        }
        _ => {
            out[0] = 0xF0 | (cp >> 18) as u8;
            out[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
            out[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            out[3] = 0x80 | (cp & 0x3F) as u8;
            4
        }
    }
}

/// The number of bytes [`encode`] would write for `cp`, without writing.
pub fn encoded_len(cp: u32) -> usize {
    let mut scratch = Utf8Scratch::new();
    scratch.extend_from_slice(&[0; 4]);
    encode(cp, scratch.as_mut_slice())
}

/// Counts the code points in `input`, each malformed maximal subpart
/// counting as one (spec section 6.1's `utf8_length`).
pub fn utf8_length(input: &[u8]) -> usize {
    let mut rest = input;
    let mut count = 0;
    while !rest.is_empty() {
        let (_, consumed) = decode_next(rest);
        rest = &rest[consumed..];
        count += 1;
    }
    count
}

/// True iff `input`/`output` (when both present) could alias the same
/// memory closely enough to corrupt an in-place-unsafe transform. Ported
/// from the original source's `UTF8_VALIDATE_INPUT` separating-axis
/// check: two spans overlap iff the distance between their centres is
/// less than the sum of their half-lengths.
pub fn buffers_overlap(input: &[u8], output: &[u8]) -> bool {
    if input.is_empty() || output.is_empty() {
        return false;
    }
    let i_start = input.as_ptr() as usize;
    let o_start = output.as_ptr() as usize;
    let i_center = i_start as f64 + input.len() as f64 / 2.0;
    let o_center = o_start as f64 + output.len() as f64 / 2.0;
    let distance = (i_center - o_center).abs();
    let half_sum = input.len() as f64 / 2.0 + output.len() as f64 / 2.0;
    distance < half_sum
}

pub(crate) fn check_overlap(input: &[u8], output: Option<&[u8]>) -> Result<(), Utf8Error> {
    if let Some(out) = output {
        if buffers_overlap(input, out) {
            return Err(Utf8Error::OverlappingParameters);
        }
    }
    Ok(())
}

/// Converts UTF-16 `input` to UTF-8. Unpaired surrogates decode as one
/// `REPLACEMENT` each. Returns the byte count written (or required, if
/// `output` is `None`).
pub fn utf16_to_utf8(input: &[u16], mut output: Option<&mut [u8]>) -> Result<usize, Utf8Error> {
    let mut needed = 0usize;
    let mut i = 0usize;
    while i < input.len() {
        let (cp, consumed) = decode_utf16_next(&input[i..]);
        i += consumed;
        let len = encoded_len(cp);
        if let Some(out) = output.as_deref_mut() {
            if needed + len > out.len() {
                return Err(Utf8Error::NotEnoughSpace);
            }
            encode(cp, &mut out[needed..needed + len]);
        }
        needed += len;
    }
    Ok(needed)
}

fn decode_utf16_next(units: &[u16]) -> (u32, usize) {
    let u0 = units[0];
    if (0xD800..=0xDBFF).contains(&u0) {
        if let Some(&u1) = units.get(1) {
            if (0xDC00..=0xDFFF).contains(&u1) {
                let cp = 0x10000 + ((u0 as u32 - 0xD800) << 10) + (u1 as u32 - 0xDC00);
                return (cp, 2);
            }
        }
        return (REPLACEMENT, 1);
    }
    if (0xDC00..=0xDFFF).contains(&u0) {
        return (REPLACEMENT, 1); // unpaired low surrogate
    }
    (u0 as u32, 1)
}

/// True iff `input` contains an unpaired UTF-16 surrogate (spec section
/// 7's advisory `INVALID_DATA` condition for [`utf16_to_utf8`]).
pub fn utf16_contains_invalid(input: &[u16]) -> bool {
    let mut i = 0usize;
    while i < input.len() {
        let (cp, consumed) = decode_utf16_next(&input[i..]);
        if cp == REPLACEMENT {
            return true;
        }
        i += consumed;
    }
    false
}

/// Converts UTF-32 `input` to UTF-8. An out-of-range or surrogate value
/// decodes as one `REPLACEMENT`.
pub fn utf32_to_utf8(input: &[u32], mut output: Option<&mut [u8]>) -> Result<usize, Utf8Error> {
    let mut needed = 0usize;
    for &raw in input {
        let cp = if raw > 0x10FFFF || (0xD800..=0xDFFF).contains(&raw) {
            REPLACEMENT
        } else {
            raw
        };
        let len = encoded_len(cp);
        if let Some(out) = output.as_deref_mut() {
            if needed + len > out.len() {
                return Err(Utf8Error::NotEnoughSpace);
            }
            encode(cp, &mut out[needed..needed + len]);
        }
        needed += len;
    }
    Ok(needed)
}

/// True iff any element of `input` is out of Unicode scalar range or a
/// surrogate (spec section 7's advisory `INVALID_DATA` condition for
/// [`utf32_to_utf8`]).
pub fn utf32_contains_invalid(input: &[u32]) -> bool {
    input.iter().any(|&raw| raw > 0x10FFFF || (0xD800..=0xDFFF).contains(&raw))
}

/// Converts host-`wchar_t`-sized `input` to UTF-8: each element treated as
/// a UTF-16 code unit when [`WCHAR_WIDTH`] is 2, as a scalar value
/// otherwise. Callers on 2-byte-`wchar_t` targets store surrogate pairs
/// across two consecutive `u32` slots, each holding one code unit.
pub fn wide_to_utf8(input: &[u32], mut output: Option<&mut [u8]>) -> Result<usize, Utf8Error> {
    if WCHAR_WIDTH != 2 {
        return utf32_to_utf8(input, output);
    }
    let mut needed = 0usize;
    let mut i = 0usize;
    while i < input.len() {
        let (cp, consumed) = decode_wide16_next(&input[i..]);
        i += consumed;
        let len = encoded_len(cp);
        if let Some(out) = output.as_deref_mut() {
            if needed + len > out.len() {
                return Err(Utf8Error::NotEnoughSpace);
            }
            encode(cp, &mut out[needed..needed + len]);
        }
        needed += len;
    }
    Ok(needed)
}

fn decode_wide16_next(units: &[u32]) -> (u32, usize) {
    let u0 = units[0] as u16;
    if (0xD800..=0xDBFF).contains(&u0) {
        if let Some(&u1) = units.get(1) {
            let u1 = u1 as u16;
            if (0xDC00..=0xDFFF).contains(&u1) {
                let cp = 0x10000 + ((u0 as u32 - 0xD800) << 10) + (u1 as u32 - 0xDC00);
                return (cp, 2);
            }
        }
        return (REPLACEMENT, 1);
    }
    if (0xDC00..=0xDFFF).contains(&u0) {
        return (REPLACEMENT, 1);
    }
    (u0 as u32, 1)
}

/// Converts UTF-8 `input` to UTF-16. Each decoded scalar above the BMP
/// is re-encoded as a surrogate pair.
pub fn utf8_to_utf16(input: &[u8], mut output: Option<&mut [u16]>) -> Result<usize, Utf8Error> {
    let mut needed = 0usize;
    let mut rest = input;
    while !rest.is_empty() {
        let (cp, consumed) = decode_next(rest);
        rest = &rest[consumed..];
        let units_len = if cp > 0xFFFF { 2 } else { 1 };
        if let Some(out) = output.as_deref_mut() {
            if needed + units_len > out.len() {
                return Err(Utf8Error::NotEnoughSpace);
            }
            if cp > 0xFFFF {
                let v = cp - 0x10000;
                out[needed] = 0xD800 + (v >> 10) as u16;
                out[needed + 1] = 0xDC00 + (v & 0x3FF) as u16;
            } else {
                out[needed] = cp as u16;
            }
        }
        needed += units_len;
    }
    Ok(needed)
}

/// Converts UTF-8 `input` to UTF-32 (one `u32` scalar value per code point).
pub fn utf8_to_utf32(input: &[u8], mut output: Option<&mut [u32]>) -> Result<usize, Utf8Error> {
    let mut needed = 0usize;
    let mut rest = input;
    while !rest.is_empty() {
        let (cp, consumed) = decode_next(rest);
        rest = &rest[consumed..];
        if let Some(out) = output.as_deref_mut() {
            if needed + 1 > out.len() {
                return Err(Utf8Error::NotEnoughSpace);
            }
            out[needed] = cp;
        }
        needed += 1;
    }
    Ok(needed)
}

/// Converts UTF-8 `input` to host-wide units, widths as in [`wide_to_utf8`].
pub fn utf8_to_wide(input: &[u8], output: Option<&mut [u32]>) -> Result<usize, Utf8Error> {
    if WCHAR_WIDTH == 2 {
        let mut needed = 0usize;
        let mut rest = input;
        while !rest.is_empty() {
            let (cp, consumed) = decode_next(rest);
            rest = &rest[consumed..];
            needed += if cp > 0xFFFF { 2 } else { 1 };
        }
        if let Some(out) = output {
            if out.len() < needed {
                return Err(Utf8Error::NotEnoughSpace);
            }
            let mut i = 0usize;
            let mut rest = input;
            while !rest.is_empty() {
                let (cp, consumed) = decode_next(rest);
                rest = &rest[consumed..];
                if cp > 0xFFFF {
                    let v = cp - 0x10000;
                    out[i] = 0xD800 + (v >> 10);
                    out[i + 1] = 0xDC00 + (v & 0x3FF);
                    i += 2;
                } else {
                    out[i] = cp;
                    i += 1;
                }
            }
        }
        Ok(needed)
    } else {
        utf8_to_utf32(input, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_round_trips() {
        let (cp, n) = decode_next(b"A");
        assert_eq!((cp, n), (0x41, 1));
        let mut out = [0u8; 4];
        assert_eq!(encode(cp, &mut out), 1);
        assert_eq!(&out[..1], b"A");
    }

    #[test]
    fn overlong_two_byte_is_replaced() {
        // 0xC0 0x80 is an overlong encoding of NUL.
        let (cp, n) = decode_next(&[0xC0, 0x80]);
        assert_eq!(cp, REPLACEMENT);
        assert_eq!(n, 2);
    }

    #[test]
    fn truncated_sequence_at_end_of_buffer() {
        let (cp, n) = decode_next(&[0xE2, 0x82]); // truncated € (E2 82 AC)
        assert_eq!(cp, REPLACEMENT);
        assert_eq!(n, 2);
    }

    #[test]
    fn lone_continuation_byte_consumes_one() {
        let (cp, n) = decode_next(&[0x80, 0x41]);
        assert_eq!(cp, REPLACEMENT);
        assert_eq!(n, 1);
    }

    #[test]
    fn surrogate_half_in_three_byte_form_is_replaced() {
        // ED A0 80 would decode to U+D800, a surrogate.
        let (cp, n) = decode_next(&[0xED, 0xA0, 0x80]);
        assert_eq!(cp, REPLACEMENT);
        assert_eq!(n, 3);
    }

    #[test]
    fn utf16_surrogate_pair_round_trips() {
        // U+1F600 GRINNING FACE
        let units = [0xD83D, 0xDE00];
        let mut buf = [0u8; 8];
        let n = utf16_to_utf8(&units, Some(&mut buf)).unwrap();
        let (cp, consumed) = decode_next(&buf[..n]);
        assert_eq!(cp, 0x1F600);
        assert_eq!(consumed, n);
    }

    #[test]
    fn utf16_unpaired_surrogate_becomes_replacement() {
        let units = [0xD800, 0x0041];
        let mut buf = [0u8; 8];
        let n = utf16_to_utf8(&units, Some(&mut buf)).unwrap();
        let (cp0, c0) = decode_next(&buf[..n]);
        assert_eq!(cp0, REPLACEMENT);
        let (cp1, _) = decode_next(&buf[c0..n]);
        assert_eq!(cp1, 0x41);
    }

    #[test]
    fn measuring_mode_reports_length_without_writing() {
        let text = "héllo".as_bytes();
        let needed = utf16_to_utf8(&[0u16; 0], None).unwrap();
        assert_eq!(needed, 0);
        assert_eq!(utf8_length(text), 5);
    }

    #[test]
    fn not_enough_space_is_reported() {
        let mut tiny = [0u8; 1];
        let err = utf32_to_utf8(&[0x1F600], Some(&mut tiny)).unwrap_err();
        assert_eq!(err, Utf8Error::NotEnoughSpace);
    }

    #[test]
    fn overlap_detection_flags_aliased_buffers() {
        let mut data = [0u8; 16];
        let (input, output) = data.split_at_mut(8);
        // Slide output back so it partially overlaps input's tail half.
        let input_ptr_range = input.as_ptr_range();
        let _ = input_ptr_range;
        assert!(!buffers_overlap(input, output)); // disjoint halves of one array
        let whole = &mut [0u8; 8][..];
        assert!(buffers_overlap(whole, whole)); // identical span trivially overlaps
    }

    #[test]
    fn contains_invalid_flags_malformed_utf8_but_not_literal_replacement_char() {
        assert!(utf8_contains_invalid(&[0xC0, 0x80])); // overlong NUL
        assert!(!utf8_contains_invalid("héllo".as_bytes()));
        assert!(!utf8_contains_invalid("\u{FFFD}".as_bytes())); // genuine U+FFFD, not an error
    }

    #[test]
    fn contains_invalid_flags_unpaired_surrogates_and_out_of_range_scalars() {
        assert!(utf16_contains_invalid(&[0xD800, 0x0041]));
        assert!(!utf16_contains_invalid(&[0xD83D, 0xDE00]));
        assert!(utf32_contains_invalid(&[0xD800]));
        assert!(utf32_contains_invalid(&[0x110000]));
        assert!(!utf32_contains_invalid(&[0x1F600]));
    }
}
