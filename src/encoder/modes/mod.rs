//! Mode encoders
//!
//! One module per data mode, each turning a run of payload bytes into a
//! [`Segment`] with its encoded data bits:
//! - Numeric: digits, three per 10 bits
//! - Alphanumeric: 45-character set, two per 11 bits
//! - Byte: raw 8-bit units
//! - Kanji: Shift_JIS double-byte characters, 13 bits each

/// Alphanumeric mode (0010)
pub mod alphanumeric;
/// Byte mode (0100)
pub mod byte;
/// Kanji mode (1000)
pub mod kanji;
/// Numeric mode (0001)
pub mod numeric;

use crate::models::{Mode, Segment};

/// Encode `payload` in `mode`; None if a unit is not valid for that mode
pub fn encode_run(mode: Mode, payload: &[u8]) -> Option<Segment> {
    match mode {
        Mode::Numeric => numeric::encode(payload),
        Mode::Alphanumeric => alphanumeric::encode(payload),
        Mode::Byte => Some(byte::encode(payload)),
        Mode::Kanji => kanji::encode(payload),
        Mode::Eci => None,
    }
}
