/// Bit stream assembly: segments, terminator, padding
use crate::error::EncodeError;
use crate::models::{Charset, ECLevel, Mode, Segment, Version};

use super::tables::data_capacity_bits;

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Growable MSB-first bit buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `bits` bits
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 32 && (count == 32 || value >> count == 0));
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
    }

    /// Append bits as given
    pub fn append_slice(&mut self, bits: &[bool]) {
        self.bits.extend_from_slice(bits);
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when no bit has been appended
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits in stream order
    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }

    /// Consume into the underlying bits
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }

    /// Pack into bytes; a trailing partial byte is zero filled
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Encode an ECI designator (8, 16 or 24 bits)
pub fn eci_segment(charset: Charset) -> Segment {
    let designator = charset.eci_designator();
    let mut bb = BitBuffer::new();
    if designator < 1 << 7 {
        bb.append_bits(designator, 8);
    } else if designator < 1 << 14 {
        bb.append_bits(0b10, 2);
        bb.append_bits(designator, 14);
    } else {
        bb.append_bits(0b110, 3);
        bb.append_bits(designator, 21);
    }
    Segment::new(Mode::Eci, Vec::new(), 0, bb.into_bits())
}

/// Concatenate segments and pad to the data capacity of `version`.
///
/// Returns the data codewords. Fails with `CapacityExceeded` rather than
/// truncating when the segments do not fit.
pub fn build_data_codewords(
    segments: &[Segment],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>, EncodeError> {
    let capacity = data_capacity_bits(version, ec_level);
    let mut bb = BitBuffer::with_capacity(capacity);

    if segments.iter().any(|s| s.encoded_len(version).is_none()) {
        let required = segments
            .iter()
            .map(|s| 4 + s.mode().char_count_bits(version) + s.data_bits().len())
            .sum();
        return Err(overflow(required, capacity, ec_level, version));
    }

    for seg in segments {
        let cc_bits = seg.mode().char_count_bits(version);
        bb.append_bits(seg.mode().indicator(), 4);
        bb.append_bits(seg.char_count() as u32, cc_bits);
        bb.append_slice(seg.data_bits());
    }

    if bb.len() > capacity {
        return Err(overflow(bb.len(), capacity, ec_level, version));
    }

    // Terminator, then pad to a byte boundary
    let terminator = (capacity - bb.len()).min(4);
    bb.append_bits(0, terminator);
    let align = (8 - bb.len() % 8) % 8;
    bb.append_bits(0, align);

    let mut codewords = bb.to_bytes();
    let data_len = capacity / 8;
    let filled = codewords.len();
    codewords.extend((0..data_len - filled).map(|i| PAD_BYTES[i % 2]));
    Ok(codewords)
}

fn overflow(required: usize, capacity: usize, ec_level: ECLevel, version: Version) -> EncodeError {
    EncodeError::CapacityExceeded {
        required_bits: required,
        max_capacity_bits: capacity,
        ec_level,
        max_version: version.number(),
    }
}
