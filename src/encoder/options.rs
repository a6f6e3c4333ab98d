use crate::error::EncodeError;
use crate::models::{Charset, ECLevel, MaskPattern, Version};

use super::config;

/// Per-call encoder configuration.
///
/// Built once and passed by reference into [`crate::encode`]; nothing in it is
/// mutated during encoding. Version bounds and the forced mask are kept as
/// plain numbers and validated when encoding starts, so a bad value surfaces
/// as an [`EncodeError`] instead of a panic at construction time.
///
/// ```
/// use rust_qr_encoder::{Charset, ECLevel, EncodeOptions};
///
/// let options = EncodeOptions::new(ECLevel::Q)
///     .with_charset(Charset::ShiftJis)
///     .with_version_range(2, 10)
///     .with_mask(3);
/// assert_eq!(options.max_version, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// How the input bytes are to be interpreted
    pub charset: Charset,
    /// Error correction level
    pub ec_level: ECLevel,
    /// Smallest version to consider (1-40)
    pub min_version: u8,
    /// Largest version to consider (1-40)
    pub max_version: u8,
    /// Force a mask id (0-7) instead of picking the lowest penalty
    pub mask: Option<u8>,
    /// Emit an ECI header when byte segments need one to be read correctly
    pub eci: bool,
    /// Score mask candidates on the rayon pool for larger versions
    pub parallel_masks: bool,
}

impl EncodeOptions {
    /// UTF-8 input at `ec_level`, any version, automatic mask
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            charset: Charset::default(),
            ec_level,
            min_version: Version::MIN.number(),
            max_version: Version::MAX.number(),
            mask: None,
            eci: true,
            parallel_masks: config::parallel_masks(),
        }
    }

    /// Declare how the input bytes are encoded
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Set the error correction level
    pub fn with_ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Smallest version to try, 1-40; checked when encoding starts
    pub fn with_min_version(mut self, min_version: u8) -> Self {
        self.min_version = min_version;
        self
    }

    /// Largest version to try, 1-40; checked when encoding starts
    pub fn with_max_version(mut self, max_version: u8) -> Self {
        self.max_version = max_version;
        self
    }

    /// Both version bounds at once
    pub fn with_version_range(self, min_version: u8, max_version: u8) -> Self {
        self.with_min_version(min_version)
            .with_max_version(max_version)
    }

    /// Force mask `mask` (0-7) instead of scoring all eight
    pub fn with_mask(mut self, mask: u8) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Allow or suppress the ECI header
    pub fn with_eci(mut self, eci: bool) -> Self {
        self.eci = eci;
        self
    }

    /// Score mask candidates in parallel from version
    /// `QR_PARALLEL_MASK_MIN_VERSION` up
    pub fn with_parallel_masks(mut self, parallel_masks: bool) -> Self {
        self.parallel_masks = parallel_masks;
        self
    }

    /// Checked version bounds
    pub fn version_range(&self) -> Result<(Version, Version), EncodeError> {
        let invalid = EncodeError::InvalidVersionRequest {
            min: self.min_version,
            max: self.max_version,
        };
        let min = Version::new(self.min_version).map_err(|_| invalid.clone())?;
        let max = Version::new(self.max_version).map_err(|_| invalid.clone())?;
        if min > max {
            return Err(invalid);
        }
        Ok((min, max))
    }

    /// Checked forced mask, if any
    pub fn forced_mask(&self) -> Result<Option<MaskPattern>, EncodeError> {
        self.mask.map(MaskPattern::try_from).transpose()
    }
}

/// UTF-8 input at level L, the level used when none is chosen
impl Default for EncodeOptions {
    fn default() -> Self {
        Self::new(ECLevel::L)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EncodeOptions::default();
        assert_eq!(options.charset, Charset::Utf8);
        assert_eq!(options.ec_level, ECLevel::L);
        assert_eq!(options.version_range().unwrap(), (Version::MIN, Version::MAX));
        assert_eq!(options.forced_mask().unwrap(), None);
        assert!(options.eci);
    }

    #[test]
    fn test_invalid_version_bounds() {
        for (min, max) in [(0, 5), (1, 41), (10, 9)] {
            let err = EncodeOptions::default()
                .with_version_range(min, max)
                .version_range()
                .unwrap_err();
            assert_eq!(err, EncodeError::InvalidVersionRequest { min, max });
        }
    }

    #[test]
    fn test_invalid_mask() {
        let options = EncodeOptions::default().with_mask(8);
        assert_eq!(options.forced_mask(), Err(EncodeError::InvalidMaskPattern(8)));
        let options = EncodeOptions::default().with_mask(7);
        assert_eq!(options.forced_mask(), Ok(Some(MaskPattern::Pattern7)));
    }
}
