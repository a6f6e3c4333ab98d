/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::encoder::bitstream::BitBuffer;
use crate::models::{Mode, Segment};

/// ASCII digit
pub fn is_numeric(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// Data bits for `len` digits
pub fn data_bits_len(len: usize) -> usize {
    len / 3 * 10 + [0, 4, 7][len % 3]
}

/// None unless every byte is an ASCII digit
pub fn encode(digits: &[u8]) -> Option<Segment> {
    if !digits.iter().all(|&b| is_numeric(b)) {
        return None;
    }

    let mut bb = BitBuffer::with_capacity(data_bits_len(digits.len()));
    for group in digits.chunks(3) {
        let value = group
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + (d - b'0') as u32);
        bb.append_bits(value, group.len() * 3 + 1);
    }

    Some(Segment::new(
        Mode::Numeric,
        digits.to_vec(),
        digits.len(),
        bb.into_bits(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_numeric_encode() {
        // 012 -> 0000001100, 345 -> 0101011001, 67 -> 1000011
        let seg = encode(b"01234567").unwrap();
        assert_eq!(seg.char_count(), 8);
        assert_eq!(
            seg.data_bits(),
            bits(concat!("0000001100", "0101011001", "1000011")).as_slice()
        );
    }

    #[test]
    fn test_group_lengths() {
        assert_eq!(encode(b"9").unwrap().data_bits(), bits("1001").as_slice());
        assert_eq!(data_bits_len(0), 0);
        assert_eq!(data_bits_len(4), 14);
        assert_eq!(data_bits_len(5), 17);
        assert_eq!(data_bits_len(6), 20);
    }

    #[test]
    fn test_rejects_non_digits() {
        assert!(encode(b"12a").is_none());
    }
}
