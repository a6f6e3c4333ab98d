//! Encode then read back with the reference decoder, across every version and level

mod common;

use common::decode_symbol;
use rust_qr_encoder::encoder::mask::score;
use rust_qr_encoder::encoder::tables::data_capacity_bits;
use rust_qr_encoder::{
    Charset, ECLevel, EncodeError, EncodeOptions, Mode, Version, encode, encode_text,
};

/// Bytes that only byte mode can carry, read as ISO-8859-1 so no ECI is added
fn high_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| 0x80 | (i as u8 & 0x7F)).collect()
}

fn max_byte_count(version: Version, level: ECLevel) -> usize {
    let header = 4 + Mode::Byte.char_count_bits(version);
    (data_capacity_bits(version, level) - header) / 8
}

fn pinned(version: Version, level: ECLevel) -> EncodeOptions {
    EncodeOptions::new(level)
        .with_charset(Charset::Iso8859_1)
        .with_version_range(version.number(), version.number())
}

#[test]
fn test_full_symbols_round_trip_every_version_and_level() {
    for version in Version::all() {
        for level in ECLevel::ALL {
            let payload = high_bytes(max_byte_count(version, level));
            let symbol = encode(&payload, &pinned(version, level))
                .unwrap_or_else(|e| panic!("{version}-{level}: {e}"));
            assert_eq!(symbol.version(), version);
            assert_eq!(symbol.size(), version.size());

            let decoded = decode_symbol(&symbol)
                .unwrap_or_else(|e| panic!("{version}-{level}: {e}"));
            assert_eq!(decoded.version, version);
            assert_eq!(decoded.ec_level, level);
            assert_eq!(decoded.mask, symbol.mask());
            assert!(decoded.eci.is_empty());
            assert_eq!(decoded.data, payload, "{version}-{level}");
        }
    }
}

#[test]
fn test_versions_with_narrow_first_alignment_gap() {
    // 36 and 39 place the second alignment centre closer to 6 than the regular step
    for number in [36, 39] {
        let version = Version::new(number).unwrap();
        for level in [ECLevel::L, ECLevel::H] {
            let payload = high_bytes(max_byte_count(version, level) / 2);
            let symbol = encode(&payload, &pinned(version, level)).unwrap();
            assert_eq!(symbol.version(), version);
            let decoded = decode_symbol(&symbol).unwrap();
            assert_eq!(decoded.version, version);
            assert_eq!(decoded.data, payload, "{version}-{level}");
        }
    }
}

#[test]
fn test_one_byte_over_capacity_fails() {
    for version in Version::all() {
        for level in ECLevel::ALL {
            let payload = high_bytes(max_byte_count(version, level) + 1);
            match encode(&payload, &pinned(version, level)) {
                Err(EncodeError::CapacityExceeded {
                    max_capacity_bits,
                    ec_level,
                    max_version,
                    ..
                }) => {
                    assert_eq!(max_capacity_bits, data_capacity_bits(version, level));
                    assert_eq!(ec_level, level);
                    assert_eq!(max_version, version.number());
                }
                other => panic!("{version}-{level}: expected CapacityExceeded, got {other:?}"),
            }
        }
    }
}

#[test]
fn test_mixed_payload_round_trip() {
    let inputs = [
        "HELLO WORLD",
        "01234567890123456789",
        "Order #1234567890123 ships TODAY AT 10:45",
        "https://EXAMPLE.COM/ITEM/00012345678901234567",
        "lower case only, nothing to compress",
    ];
    for text in inputs {
        for level in ECLevel::ALL {
            let symbol = encode_text(text, level).unwrap();
            let decoded = decode_symbol(&symbol).unwrap();
            assert_eq!(decoded.data, text.as_bytes(), "{text:?} at {level}");
            let modes: Vec<u8> = symbol
                .segments()
                .iter()
                .map(|s| s.mode().indicator() as u8)
                .collect();
            assert_eq!(decoded.modes, modes);
        }
    }
}

#[test]
fn test_utf8_gets_eci_and_round_trips() {
    let text = "Gr\u{fc}\u{df}e aus Z\u{fc}rich \u{2014} 2024";
    let symbol = encode_text(text, ECLevel::M).unwrap();
    assert_eq!(symbol.segments()[0].mode(), Mode::Eci);
    let decoded = decode_symbol(&symbol).unwrap();
    assert_eq!(decoded.eci, vec![26]);
    assert_eq!(decoded.data, text.as_bytes());
}

#[test]
fn test_eci_can_be_disabled() {
    let text = "caf\u{e9}";
    let options = EncodeOptions::new(ECLevel::L).with_eci(false);
    let symbol = encode(text.as_bytes(), &options).unwrap();
    assert!(symbol.segments().iter().all(|s| s.mode() != Mode::Eci));
    assert!(decode_symbol(&symbol).unwrap().eci.is_empty());
}

#[test]
fn test_shift_jis_kanji_round_trip() {
    // two kanji, ASCII digits, then two more kanji
    let mut payload = vec![0x93, 0x5F, 0xE4, 0xAA];
    payload.extend_from_slice(b"12345678");
    payload.extend_from_slice(&[0x88, 0x9F, 0x98, 0x61]);

    let options = EncodeOptions::new(ECLevel::H).with_charset(Charset::ShiftJis);
    let symbol = encode(&payload, &options).unwrap();
    let modes: Vec<Mode> = symbol.segments().iter().map(|s| s.mode()).collect();
    assert_eq!(modes, vec![Mode::Kanji, Mode::Numeric, Mode::Kanji]);

    let decoded = decode_symbol(&symbol).unwrap();
    assert!(decoded.eci.is_empty());
    assert_eq!(decoded.data, payload);
}

#[test]
fn test_utf16_round_trip() {
    let text = "QR \u{30b3}\u{30fc}\u{30c9}";
    let payload: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
    let options = EncodeOptions::new(ECLevel::Q).with_charset(Charset::Utf16Be);
    let symbol = encode(&payload, &options).unwrap();
    let decoded = decode_symbol(&symbol).unwrap();
    assert_eq!(decoded.eci, vec![25]);
    assert_eq!(decoded.data, payload);
}

#[test]
fn test_deterministic() {
    let text = "determinism: same input, same symbol 0123456789";
    for level in ECLevel::ALL {
        let a = encode_text(text, level).unwrap();
        let b = encode_text(text, level).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_parallel_and_sequential_agree() {
    let payload = high_bytes(900);
    for level in ECLevel::ALL {
        let base = EncodeOptions::new(level).with_charset(Charset::Iso8859_1);
        let sequential = encode(&payload, &base.clone().with_parallel_masks(false));
        let parallel = encode(&payload, &base.with_parallel_masks(true));
        assert_eq!(sequential, parallel);
    }
}

#[test]
fn test_rescoring_chosen_mask_is_stable() {
    for text in ["HELLO WORLD", "mask selection", "1234567890"] {
        let symbol = encode_text(text, ECLevel::M).unwrap();
        let first = score(symbol.modules());
        let second = score(symbol.modules());
        assert_eq!(first, second);

        // the chosen mask is never beaten by a forced one
        for id in 0..8 {
            let forced = encode(
                text.as_bytes(),
                &EncodeOptions::new(ECLevel::M).with_mask(id),
            )
            .unwrap();
            let other = score(forced.modules()).total();
            assert!(first.total() <= other, "{text:?}: mask {id} scores {other}");
            if other == first.total() {
                assert!(symbol.mask().id() <= id);
            }
        }
    }
}

#[test]
fn test_segmentation_beats_single_mode() {
    let inputs: [&[u8]; 4] = [
        b"ABCDEFGH12345678901234567890abc",
        b"item 000123456789000 QTY 12",
        b"HTTPS://WWW.EXAMPLE.COM/1234567890",
        b"9876543210ZYXWVU",
    ];
    for input in inputs {
        let symbol = encode(input, &EncodeOptions::new(ECLevel::L)).unwrap();
        let version = symbol.version();
        let used: usize = symbol
            .segments()
            .iter()
            .map(|s| s.encoded_len(version).unwrap())
            .sum();
        assert!(used <= 4 + Mode::Byte.char_count_bits(version) + input.len() * 8);
        if input.iter().all(|&b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b' ') {
            let alnum_bits = 4
                + Mode::Alphanumeric.char_count_bits(version)
                + input.len() / 2 * 11
                + input.len() % 2 * 6;
            assert!(used <= alnum_bits);
        }
    }
}

#[test]
fn test_rejects_invalid_input_for_charset() {
    let err = encode(&[b'o', b'k', 0xFF], &EncodeOptions::new(ECLevel::L)).unwrap_err();
    assert_eq!(
        err,
        EncodeError::UnsupportedCharacter {
            offset: 2,
            charset: Charset::Utf8
        }
    );
    let ascii = EncodeOptions::new(ECLevel::L).with_charset(Charset::Ascii);
    assert!(matches!(
        encode("na\u{ef}ve".as_bytes(), &ascii),
        Err(EncodeError::UnsupportedCharacter { offset: 2, .. })
    ));
}

#[test]
fn test_empty_input_rejected() {
    assert_eq!(encode_text("", ECLevel::H), Err(EncodeError::EmptyInput));
}
