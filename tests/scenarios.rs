// This file is part of utf8kit. For terms of use, please see the file
// called LICENSE at the top level of the utf8kit source tree.

//! Cross-module integration tests exercising the public API surface the
//! way an external consumer would, covering the universal invariants and
//! concrete scenarios this crate's behavior is specified against.

use utf8kit::{
    utf8_casefold, utf8_is_normalized, utf8_lower, utf8_normalize, utf8_seek, utf8_title,
    utf8_to_utf16, utf8_to_utf32, utf8_upper, utf32_to_utf8, Locale, NormalizeFlags, Normalized,
    SeekFrom, Utf8Error,
};

fn upper(s: &str, locale: Locale) -> Vec<u8> {
    let input = s.as_bytes();
    let needed = utf8_upper(input, None, locale).unwrap();
    let mut buf = vec![0u8; needed];
    assert_eq!(utf8_upper(input, Some(&mut buf), locale).unwrap(), needed);
    buf
}

fn lower(s: &str, locale: Locale) -> Vec<u8> {
    let input = s.as_bytes();
    let needed = utf8_lower(input, None, locale).unwrap();
    let mut buf = vec![0u8; needed];
    assert_eq!(utf8_lower(input, Some(&mut buf), locale).unwrap(), needed);
    buf
}

fn normalize(s: &str, flags: NormalizeFlags) -> Vec<u8> {
    let input = s.as_bytes();
    let needed = utf8_normalize(input, None, flags).unwrap();
    let mut buf = vec![0u8; needed];
    assert_eq!(utf8_normalize(input, Some(&mut buf), flags).unwrap(), needed);
    buf
}

#[test]
fn scenario_1_upper_hello() {
    assert_eq!(upper("hello", Locale::Root), b"HELLO");
}

#[test]
fn scenario_2_upper_sharp_s() {
    assert_eq!(upper("\u{00DF}", Locale::Root), b"SS");
}

#[test]
fn scenario_3_lower_capital_i_dot_default_locale() {
    assert_eq!(lower("\u{0130}", Locale::Root), vec![0x69, 0xCC, 0x87]);
}

#[test]
fn scenario_4_lower_capital_i_turkish() {
    assert_eq!(lower("I", Locale::Turkish), vec![0xC4, 0xB1]);
}

#[test]
fn scenario_5_upper_small_i_turkish() {
    assert_eq!(upper("i", Locale::Turkish), vec![0xC4, 0xB0]);
}

#[test]
fn scenario_6_titlecase_nato_alliance() {
    let input = "NATO alliance".as_bytes();
    let needed = utf8_title(input, None, Locale::Root).unwrap();
    let mut buf = vec![0u8; needed];
    utf8_title(input, Some(&mut buf), Locale::Root).unwrap();
    assert_eq!(buf, b"Nato Alliance");
}

#[test]
fn scenario_7_compose_a_plus_ring_above() {
    assert_eq!(normalize("A\u{030A}", NormalizeFlags::COMPOSE), "\u{00C5}".as_bytes());
}

#[test]
fn scenario_8_decompose_a_ring() {
    assert_eq!(normalize("\u{00C5}", NormalizeFlags::DECOMPOSE), "A\u{030A}".as_bytes());
}

#[test]
fn scenario_9_decompose_s_with_dot_below_and_above() {
    assert_eq!(
        normalize("\u{1E69}", NormalizeFlags::DECOMPOSE),
        "s\u{0323}\u{0307}".as_bytes()
    );
}

#[test]
fn scenario_10_is_normalized_cafe() {
    let composed = "café".as_bytes();
    assert_eq!(utf8_is_normalized(composed, NormalizeFlags::COMPOSE).unwrap(), Normalized::Yes);

    let decomposed = "cafe\u{0301}".as_bytes();
    match utf8_is_normalized(decomposed, NormalizeFlags::COMPOSE).unwrap() {
        Normalized::No { offset } => assert_eq!(offset, 3), // the 'e' before the acute accent
        other => panic!("expected No, got {other:?}"),
    }
}

#[test]
fn scenario_11_seek_two_code_points_forward() {
    let text = "\u{03B1}\u{03B2}\u{03B3}".as_bytes(); // αβγ, 2 bytes each
    let pos = utf8_seek(text, 0, 2, SeekFrom::Set);
    assert_eq!(pos, 4);
}

#[test]
fn scenario_12_seek_saturates_at_end() {
    let pos = utf8_seek(b"abc", 3, 99, SeekFrom::Set);
    assert_eq!(pos, 3);
}

#[test]
fn scenario_13_overlong_sequence_then_valid_byte() {
    let mut rest: &[u8] = &[0xE0, 0x80, 0x13];
    let mut out = Vec::new();
    while !rest.is_empty() {
        let (cp, consumed) = utf8kit::decode_next(rest);
        out.push(cp);
        rest = &rest[consumed..];
    }
    assert_eq!(out, vec![utf8kit::REPLACEMENT, 0x13]);
}

#[test]
fn invariant_round_trip_via_utf32() {
    let text = "a\u{0301}\u{1F600}".as_bytes();
    let mut scratch = vec![0u32; utf8_to_utf32(text, None).unwrap()];
    utf8_to_utf32(text, Some(&mut scratch)).unwrap();
    let mut back = vec![0u8; utf32_to_utf8(&scratch, None).unwrap()];
    utf32_to_utf8(&scratch, Some(&mut back)).unwrap();
    assert_eq!(back, text);
}

#[test]
fn invariant_round_trip_via_utf16() {
    let text = "a\u{1F600}b".as_bytes();
    let mut units = vec![0u16; utf8_to_utf16(text, None).unwrap()];
    utf8_to_utf16(text, Some(&mut units)).unwrap();
    let mut back = vec![0u8; utf8kit::utf16_to_utf8(&units, None).unwrap()];
    utf8kit::utf16_to_utf8(&units, Some(&mut back)).unwrap();
    assert_eq!(back, text);
}

#[test]
fn invariant_seek_symmetry() {
    let text = "héllo wörld".as_bytes();
    let len = utf8kit::utf8_length(text);
    for n in 0..=len {
        let forward = utf8_seek(text, 0, n as isize, SeekFrom::Cur);
        let back = utf8_seek(text, forward, -(n as isize), SeekFrom::Cur);
        assert_eq!(back, 0, "seek symmetry failed for n={n}");
    }
}

#[test]
fn invariant_length_bound() {
    let text = "héllo".as_bytes();
    assert!(utf8kit::utf8_length(text) <= text.len());
}

#[test]
fn invariant_normalization_idempotence() {
    for form in [
        NormalizeFlags::COMPOSE,
        NormalizeFlags::DECOMPOSE,
        NormalizeFlags::COMPOSE | NormalizeFlags::COMPATIBILITY,
        NormalizeFlags::DECOMPOSE | NormalizeFlags::COMPATIBILITY,
    ] {
        let once = normalize("Ω\u{0301} ﬁnancial café \u{1E69}", form);
        let once_str = String::from_utf8(once.clone()).unwrap();
        let twice = normalize(&once_str, form);
        assert_eq!(once, twice, "not idempotent under {form:?}");
    }
}

#[test]
fn invariant_decomposition_refinement() {
    let nfd = normalize("ﬁnancial", NormalizeFlags::DECOMPOSE);
    let nfkd = normalize("ﬁnancial", NormalizeFlags::DECOMPOSE | NormalizeFlags::COMPATIBILITY);
    // NFD leaves the fi ligature intact (no canonical decomposition);
    // NFKD expands it, so NFD's code points are a subset of NFKD's.
    let nfd_str = String::from_utf8(nfd).unwrap();
    let nfkd_str = String::from_utf8(nfkd).unwrap();
    assert!(nfkd_str.contains("fi"));
    assert!(nfd_str.contains('\u{FB01}'));
}

#[test]
fn invariant_quick_check_soundness() {
    let samples = ["café", "cafe\u{0301}", "Å", "A\u{030A}", "straße"];
    for s in samples {
        let bytes = s.as_bytes();
        if utf8_is_normalized(bytes, NormalizeFlags::COMPOSE).unwrap() == Normalized::Yes {
            assert_eq!(normalize(s, NormalizeFlags::COMPOSE), bytes);
        }
    }
}

#[test]
fn invariant_replacement_for_malformed_byte() {
    let text: &[u8] = &[0x41, 0xFF, 0x42]; // 'A', invalid lead byte, 'B'
    let mut rest = text;
    let mut replacements = 0;
    while !rest.is_empty() {
        let (cp, consumed) = utf8kit::decode_next(rest);
        if cp == utf8kit::REPLACEMENT {
            replacements += 1;
        }
        rest = &rest[consumed..];
    }
    assert_eq!(replacements, 1);
}

#[test]
fn invariant_overlap_rejection() {
    let mut buf = [0u8; 8];
    buf[..5].copy_from_slice(b"hello");
    // SAFETY: both slices below point into the same 5-byte region of
    // `buf`, deliberately aliased to exercise overlap rejection; neither
    // is dereferenced until after `utf8_upper` has returned.
    let ptr = buf.as_mut_ptr();
    let input: &[u8] = unsafe { core::slice::from_raw_parts(ptr, 5) };
    let output: &mut [u8] = unsafe { core::slice::from_raw_parts_mut(ptr, 5) };
    let err = utf8_upper(input, Some(output), Locale::Root).unwrap_err();
    assert_eq!(err, Utf8Error::OverlappingParameters);
}

#[test]
fn casefold_matches_lowercase_for_default_locale_text() {
    assert_eq!(
        utf8_casefold(b"HELLO", None, Locale::Root).unwrap(),
        utf8_lower(b"HELLO", None, Locale::Root).unwrap()
    );
}
