use std::fmt;

use super::Version;

/// Segment data mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits 0-9, three per 10 bits
    Numeric,
    /// 0-9, A-Z, space and `$%*+-./:`, two per 11 bits
    Alphanumeric,
    /// Raw bytes in the declared charset
    Byte,
    /// Shift_JIS double-byte characters, 13 bits each
    Kanji,
    /// Extended channel interpretation designator
    Eci,
}

impl Mode {
    /// Modes a payload unit can be classified into, widest last
    pub const DATA_MODES: [Mode; 4] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte, Mode::Kanji];

    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::Alphanumeric => 0b0010,
            Mode::Byte => 0b0100,
            Mode::Kanji => 0b1000,
            Mode::Eci => 0b0111,
        }
    }

    /// Width of the character count field for `version`
    pub fn char_count_bits(&self, version: Version) -> usize {
        let band = version.band();
        match self {
            Mode::Numeric => [10, 12, 14][band],
            Mode::Alphanumeric => [9, 11, 13][band],
            Mode::Byte => [8, 16, 16][band],
            Mode::Kanji => [8, 10, 12][band],
            Mode::Eci => 0,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Numeric => "numeric",
            Mode::Alphanumeric => "alphanumeric",
            Mode::Byte => "byte",
            Mode::Kanji => "kanji",
            Mode::Eci => "eci",
        };
        f.write_str(name)
    }
}

/// One run of the message encoded in a single mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: Mode,
    payload: Vec<u8>,
    char_count: usize,
    data_bits: Vec<bool>,
}

impl Segment {
    pub(crate) fn new(mode: Mode, payload: Vec<u8>, char_count: usize, data_bits: Vec<bool>) -> Self {
        Self {
            mode,
            payload,
            char_count,
            data_bits,
        }
    }

    /// Encoding mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Source bytes covered by this segment (empty for ECI)
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Value written into the character count field
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Encoded data bits, without mode indicator or count field
    pub fn data_bits(&self) -> &[bool] {
        &self.data_bits
    }

    /// Total bits this segment takes at `version`, or None if the count overflows its field
    pub fn encoded_len(&self, version: Version) -> Option<usize> {
        let cc_bits = self.mode.char_count_bits(version);
        if cc_bits < usize::BITS as usize && self.char_count >> cc_bits != 0 {
            return None;
        }
        Some(4 + cc_bits + self.data_bits.len())
    }
}

/// Sum of [`Segment::encoded_len`] over a message, or None if any segment overflows
pub fn total_bits(segments: &[Segment], version: Version) -> Option<usize> {
    segments
        .iter()
        .try_fold(0usize, |acc, seg| Some(acc + seg.encoded_len(version)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_char_count_bits() {
        assert_eq!(Mode::Numeric.char_count_bits(v(1)), 10);
        assert_eq!(Mode::Alphanumeric.char_count_bits(v(10)), 11);
        assert_eq!(Mode::Byte.char_count_bits(v(9)), 8);
        assert_eq!(Mode::Byte.char_count_bits(v(40)), 16);
        assert_eq!(Mode::Kanji.char_count_bits(v(27)), 12);
        assert_eq!(Mode::Eci.char_count_bits(v(27)), 0);
    }

    #[test]
    fn test_encoded_len_overflow() {
        let seg = Segment::new(Mode::Byte, vec![0; 256], 256, vec![false; 2048]);
        assert_eq!(seg.encoded_len(v(9)), None);
        assert_eq!(seg.encoded_len(v(10)), Some(4 + 16 + 2048));
    }

    #[test]
    fn test_total_bits() {
        let a = Segment::new(Mode::Numeric, b"12".to_vec(), 2, vec![true; 7]);
        let b = Segment::new(Mode::Byte, b"x".to_vec(), 1, vec![false; 8]);
        assert_eq!(total_bits(&[a, b], v(1)), Some((4 + 10 + 7) + (4 + 8 + 8)));
        assert_eq!(total_bits(&[], v(1)), Some(0));
    }
}
