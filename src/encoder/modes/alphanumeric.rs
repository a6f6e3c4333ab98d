/// Alphanumeric mode encoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::encoder::bitstream::BitBuffer;
use crate::models::{Mode, Segment};

const ALPHANUMERIC_TABLE: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Index of `byte` in the alphanumeric table
pub fn value_of(byte: u8) -> Option<u32> {
    ALPHANUMERIC_TABLE
        .iter()
        .position(|&c| c == byte)
        .map(|i| i as u32)
}

/// Whether `byte` is in the 45-character set
pub fn is_alphanumeric(byte: u8) -> bool {
    value_of(byte).is_some()
}

/// Data bits for `len` characters
pub fn data_bits_len(len: usize) -> usize {
    len / 2 * 11 + len % 2 * 6
}

/// Pairs = 11 bits (45 * first + second), single = 6 bits
pub fn encode(text: &[u8]) -> Option<Segment> {
    let mut bb = BitBuffer::with_capacity(data_bits_len(text.len()));
    for pair in text.chunks(2) {
        if let [a, b] = *pair {
            bb.append_bits(value_of(a)? * 45 + value_of(b)?, 11);
        } else {
            bb.append_bits(value_of(pair[0])?, 6);
        }
    }

    Some(Segment::new(
        Mode::Alphanumeric,
        text.to_vec(),
        text.len(),
        bb.into_bits(),
    ))
}
