/// BCH coding for format and version information
use crate::models::{ECLevel, MaskPattern, Version};

/// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
/// XOR applied so format information is never all light
const FORMAT_MASK: u32 = 0x5412;
/// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1f25;

/// Format and version information words with their BCH check bits
pub struct BchEncoder;

impl BchEncoder {
    /// 15-bit format information for a level and mask, already XOR-masked
    pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
        let data = ((ec_level.format_bits() as u32) << 3) | mask.id() as u32;
        let bits = (data << 10) | Self::remainder(data, 10, FORMAT_GENERATOR);
        (bits ^ FORMAT_MASK) as u16
    }

    /// 18-bit version information (versions 7-40)
    pub fn version_bits(version: Version) -> u32 {
        let data = version.number() as u32;
        (data << 12) | Self::remainder(data, 12, VERSION_GENERATOR)
    }

    /// Polynomial remainder of data * x^degree modulo generator
    fn remainder(data: u32, degree: u32, generator: u32) -> u32 {
        let mut rem = data;
        for _ in 0..degree {
            rem = (rem << 1) ^ (((rem >> (degree - 1)) & 1) * generator);
        }
        rem & ((1 << degree) - 1)
    }

    /// True if `codeword` (before the 0x5412 XOR is removed) is a valid format word
    pub fn is_valid_format(codeword: u16) -> bool {
        let raw = codeword as u32 ^ FORMAT_MASK;
        Self::remainder(raw >> 10, 10, FORMAT_GENERATOR) == raw & 0x3FF
    }
}
