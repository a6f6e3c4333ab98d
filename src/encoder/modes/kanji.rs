/// Kanji mode encoder (Mode 1000)
/// Shift_JIS 0x8140-0x9FFC and 0xE040-0xEBBF, 13 bits per character
use crate::encoder::bitstream::BitBuffer;
use crate::models::{Mode, Segment};

/// 13-bit value of a Shift_JIS double-byte character, if it is kanji-encodable
pub fn value_of(lead: u8, trail: u8) -> Option<u32> {
    let code = u16::from_be_bytes([lead, trail]);
    let offset = match code {
        0x8140..=0x9FFC => code - 0x8140,
        0xE040..=0xEBBF => code - 0xC140,
        _ => return None,
    };
    let (msb, lsb) = (offset >> 8, offset & 0xFF);
    // trail bytes 0x40-0xFC only; anything above 0xBC after the shift is a gap
    if lsb > 0xBC {
        return None;
    }
    Some((msb * 0xC0 + lsb) as u32)
}

/// Whether `pair` is one kanji-encodable Shift_JIS character
pub fn is_kanji(pair: &[u8]) -> bool {
    matches!(*pair, [lead, trail] if value_of(lead, trail).is_some())
}

/// Encode Shift_JIS double-byte characters; None on an odd length or a
/// pair outside the kanji ranges
pub fn encode(sjis: &[u8]) -> Option<Segment> {
    if sjis.len() % 2 != 0 {
        return None;
    }

    let mut bb = BitBuffer::with_capacity(sjis.len() / 2 * 13);
    for pair in sjis.chunks(2) {
        bb.append_bits(value_of(pair[0], pair[1])?, 13);
    }

    Some(Segment::new(
        Mode::Kanji,
        sjis.to_vec(),
        sjis.len() / 2,
        bb.into_bits(),
    ))
}
