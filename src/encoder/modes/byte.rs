/// Byte mode encoder (Mode 0100) for 8-bit data
use crate::encoder::bitstream::BitBuffer;
use crate::models::{Mode, Segment};

/// Eight bits per byte, taken as they are
pub fn encode(bytes: &[u8]) -> Segment {
    let mut bb = BitBuffer::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        bb.append_bits(byte as u32, 8);
    }
    Segment::new(Mode::Byte, bytes.to_vec(), bytes.len(), bb.into_bits())
}
