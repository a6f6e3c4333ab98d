/// Main QR encoder - wires every stage together
///
/// Each stage of the pipeline is its own type and consumes the previous one:
/// `Segmented` -> `BlocksReady` -> `Unmasked` -> `QrSymbol`. A failing stage
/// returns an error and nothing partial escapes.
use log::debug;

use crate::error::EncodeError;
use crate::models::segment::total_bits;
use crate::models::{ECLevel, MaskPattern, Mode, ModuleMatrix, QrSymbol, Segment, Version};

use super::bitstream::{build_data_codewords, eci_segment};
use super::blocks::{interleave, split_into_blocks};
use super::config;
use super::function_patterns::draw_function_patterns;
use super::mask::{self, MaskCandidate};
use super::options::EncodeOptions;
use super::placement::place_codewords;
use super::segmenter::Segmenter;
use super::tables::data_capacity_bits;

/// Main QR encoder that runs the whole pipeline
pub struct QrEncoder;

impl QrEncoder {
    /// Encode `input` into a finished symbol
    pub fn encode(input: &[u8], options: &EncodeOptions) -> Result<QrSymbol, EncodeError> {
        let forced_mask = options.forced_mask()?;
        let segmented = Segmented::new(input, options)?;
        let unmasked = segmented.into_blocks()?.into_matrix();
        let parallel = options.parallel_masks
            && unmasked.version().number() >= config::parallel_mask_min_version();
        Ok(unmasked.finish(forced_mask, parallel))
    }
}

/// Payload split into segments with the version chosen
#[derive(Debug, Clone)]
pub struct Segmented {
    version: Version,
    ec_level: ECLevel,
    segments: Vec<Segment>,
}

impl Segmented {
    /// Segment `input` and pick the smallest version in the allowed range that holds it
    pub fn new(input: &[u8], options: &EncodeOptions) -> Result<Self, EncodeError> {
        let (min, max) = options.version_range()?;
        if input.is_empty() {
            return Err(EncodeError::EmptyInput);
        }

        let segmenter = Segmenter::new(input, options.charset)?;
        let ec_level = options.ec_level;

        // Segmentation only changes with the count field widths, so once per band
        let mut band_segments: Option<(usize, Vec<Segment>)> = None;
        let mut required_bits = 0;
        for version in min.range_to(max) {
            let segments = match band_segments.take() {
                Some((band, segments)) if band == version.band() => segments,
                _ => {
                    let mut segments = segmenter.segments(version)?;
                    if needs_eci(options, &segments) {
                        segments.insert(0, eci_segment(options.charset));
                    }
                    segments
                }
            };

            let capacity = data_capacity_bits(version, ec_level);
            match total_bits(&segments, version) {
                Some(bits) if bits <= capacity => {
                    debug!(
                        "version {version}-{ec_level}: {bits} of {capacity} data bits, {} segment(s)",
                        segments.len()
                    );
                    return Ok(Self {
                        version,
                        ec_level,
                        segments,
                    });
                }
                Some(bits) => required_bits = bits,
                // A count field overflows; report the data bits alone as a lower bound
                None => required_bits = segments.iter().map(|s| s.data_bits().len()).sum(),
            }
            band_segments = Some((version.band(), segments));
        }

        Err(EncodeError::CapacityExceeded {
            required_bits,
            max_capacity_bits: data_capacity_bits(max, ec_level),
            ec_level,
            max_version: max.number(),
        })
    }

    /// Smallest version in the allowed range that holds the segments
    pub fn version(&self) -> Version {
        self.version
    }

    /// Segments in stream order, a leading ECI designator included
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Build the data codewords, then the Reed-Solomon blocks, interleaved
    pub fn into_blocks(self) -> Result<BlocksReady, EncodeError> {
        let data = build_data_codewords(&self.segments, self.version, self.ec_level)?;
        let blocks = split_into_blocks(&data, self.version, self.ec_level);
        debug!(
            "{} data codewords in {} block(s)",
            data.len(),
            blocks.len()
        );
        Ok(BlocksReady {
            version: self.version,
            ec_level: self.ec_level,
            segments: self.segments,
            codewords: interleave(&blocks),
        })
    }
}

/// Final interleaved codeword sequence
#[derive(Debug, Clone)]
pub struct BlocksReady {
    version: Version,
    ec_level: ECLevel,
    segments: Vec<Segment>,
    codewords: Vec<u8>,
}

impl BlocksReady {
    /// Data and error correction codewords in placement order
    pub fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    /// Draw the function patterns and place the codewords
    pub fn into_matrix(self) -> Unmasked {
        let mut matrix = draw_function_patterns(self.version);
        place_codewords(&mut matrix, &self.codewords);
        Unmasked {
            version: self.version,
            ec_level: self.ec_level,
            segments: self.segments,
            matrix,
        }
    }
}

/// Laid-out matrix before masking; format areas still reserved
#[derive(Debug, Clone)]
pub struct Unmasked {
    version: Version,
    ec_level: ECLevel,
    segments: Vec<Segment>,
    matrix: ModuleMatrix,
}

impl Unmasked {
    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Every module set except the two format areas
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    /// All eight candidates in mask id order
    pub fn candidates(&self, parallel: bool) -> Vec<MaskCandidate> {
        mask::evaluate_all(&self.matrix, self.ec_level, parallel)
    }

    /// Apply `forced` or the lowest-penalty mask and produce the symbol
    pub fn finish(self, forced: Option<MaskPattern>, parallel: bool) -> QrSymbol {
        let chosen = match forced {
            Some(mask) => mask::evaluate(&self.matrix, self.ec_level, mask),
            None => mask::select(self.candidates(parallel)).unwrap_or_else(|| {
                mask::evaluate(&self.matrix, self.ec_level, MaskPattern::Pattern0)
            }),
        };
        debug!(
            "mask {} (penalty {}{})",
            chosen.mask(),
            chosen.penalty().total(),
            if forced.is_some() { ", forced" } else { "" }
        );
        QrSymbol::new(
            self.version,
            self.ec_level,
            chosen.mask(),
            chosen.into_modules(),
            self.segments,
        )
    }
}

/// ECI is only worth its header when a byte segment would otherwise be read
/// as ISO-8859-1 and that reading differs from the declared charset
fn needs_eci(options: &EncodeOptions, segments: &[Segment]) -> bool {
    let charset = options.charset;
    if !options.eci || charset.is_default_interpretation() {
        return false;
    }
    segments
        .iter()
        .filter(|s| s.mode() == Mode::Byte)
        .any(|s| !charset.is_ascii_compatible() || !s.payload().is_ascii())
}
