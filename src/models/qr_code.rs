use std::fmt;
use std::str::FromStr;

use super::{BitMatrix, Segment};
use crate::error::EncodeError;

/// QR code version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest symbol, 21x21
    pub const MIN: Version = Version(1);
    /// Largest symbol, 177x177
    pub const MAX: Version = Version(40);

    /// Create a version, rejecting numbers outside 1-40
    pub fn new(number: u8) -> Result<Self, EncodeError> {
        if (1..=40).contains(&number) {
            Ok(Self(number))
        } else {
            Err(EncodeError::InvalidVersionRequest {
                min: number,
                max: number,
            })
        }
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Character count field band: 0 for 1-9, 1 for 10-26, 2 for 27-40
    pub fn band(&self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    /// Versions 7+ carry two 6x3 version information blocks
    pub fn has_version_info(&self) -> bool {
        self.0 >= 7
    }

    /// Iterate versions from `self` to `last` inclusive
    pub fn range_to(self, last: Version) -> impl Iterator<Item = Version> {
        (self.0..=last.0).map(Version)
    }

    /// Every version, smallest first
    pub fn all() -> impl Iterator<Item = Version> {
        Self::MIN.range_to(Self::MAX)
    }
}

impl TryFrom<u8> for Version {
    type Error = EncodeError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels from weakest to strongest
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Row index into the per-level codeword tables
    pub fn ordinal(&self) -> usize {
        *self as usize
    }

    /// Two-bit field written into format information (L=01, M=00, Q=11, H=10)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// Approximate share of codewords that can be restored
    pub fn recovery_percent(&self) -> u8 {
        match self {
            ECLevel::L => 7,
            ECLevel::M => 15,
            ECLevel::Q => 25,
            ECLevel::H => 30,
        }
    }
}

impl TryFrom<char> for ECLevel {
    type Error = EncodeError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'L' => Ok(ECLevel::L),
            'M' => Ok(ECLevel::M),
            'Q' => Ok(ECLevel::Q),
            'H' => Ok(ECLevel::H),
            _ => Err(EncodeError::InvalidErrorCorrectionLevel(c.to_string())),
        }
    }
}

impl FromStr for ECLevel {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            _ => Err(EncodeError::InvalidErrorCorrectionLevel(s.to_string())),
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            ECLevel::L => 'L',
            ECLevel::M => 'M',
            ECLevel::Q => 'Q',
            ECLevel::H => 'H',
        };
        write!(f, "{c}")
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in id order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its 3-bit id
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }

    /// Numeric id written into format information
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Check if the module at row `i`, column `j` is inverted by this mask
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

impl TryFrom<u8> for MaskPattern {
    type Error = EncodeError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_bits(id).ok_or(EncodeError::InvalidMaskPattern(id))
    }
}

impl fmt::Display for MaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// A finished QR symbol: the module grid plus what a renderer or reader needs to know about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    modules: BitMatrix,
    segments: Vec<Segment>,
}

impl QrSymbol {
    pub(crate) fn new(
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        modules: BitMatrix,
        segments: Vec<Segment>,
    ) -> Self {
        Self {
            version,
            ec_level,
            mask,
            modules,
            segments,
        }
    }

    /// QR code version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask pattern applied to the data area
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// Width and height in modules
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// True if the module at column `x`, row `y` is dark; out of range reads as light
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Module grid (true = dark)
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Segments the payload was split into, in stream order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_size() {
        assert_eq!(Version::MIN.size(), 21);
        assert_eq!(Version::new(2).unwrap().size(), 25);
        assert_eq!(Version::MAX.size(), 177);
    }

    #[test]
    fn test_version_rejects_out_of_range() {
        assert!(Version::new(0).is_err());
        assert!(Version::new(41).is_err());
        assert_eq!(Version::all().count(), 40);
    }

    #[test]
    fn test_version_band() {
        assert_eq!(Version::new(9).unwrap().band(), 0);
        assert_eq!(Version::new(10).unwrap().band(), 1);
        assert_eq!(Version::new(26).unwrap().band(), 1);
        assert_eq!(Version::new(27).unwrap().band(), 2);
    }

    #[test]
    fn test_ec_level_format_bits() {
        for level in ECLevel::ALL {
            assert_eq!(ECLevel::from_format_bits(level.format_bits()), level);
        }
        assert_eq!(ECLevel::L.format_bits(), 0b01);
        assert_eq!(ECLevel::H.format_bits(), 0b10);
    }

    #[test]
    fn test_ec_level_parse() {
        assert_eq!("q".parse::<ECLevel>().unwrap(), ECLevel::Q);
        assert_eq!(" H ".parse::<ECLevel>().unwrap(), ECLevel::H);
        assert_eq!(
            "X".parse::<ECLevel>(),
            Err(EncodeError::InvalidErrorCorrectionLevel("X".to_string()))
        );
        assert!("LM".parse::<ECLevel>().is_err());
        assert!("".parse::<ECLevel>().is_err());
    }

    #[test]
    fn test_mask_pattern() {
        let mask = MaskPattern::Pattern0;
        assert!(mask.is_masked(0, 0));
        assert!(!mask.is_masked(0, 1));
        assert!(mask.is_masked(1, 1));
        assert!(MaskPattern::Pattern2.is_masked(1, 3));
        assert!(!MaskPattern::Pattern2.is_masked(3, 1));
    }

    #[test]
    fn test_mask_pattern_ids() {
        for (id, mask) in MaskPattern::ALL.iter().enumerate() {
            assert_eq!(mask.id() as usize, id);
        }
        assert_eq!(MaskPattern::try_from(8), Err(EncodeError::InvalidMaskPattern(8)));
    }
}
