use thiserror::Error;

use crate::models::{Charset, ECLevel};

/// Errors returned by the encoder. All of them are terminal for the call:
/// no partial symbol is ever produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Nothing to encode
    #[error("input is empty")]
    EmptyInput,

    /// A byte sequence at `offset` is not valid in the declared charset
    #[error("input byte at offset {offset} is not representable in {charset}")]
    UnsupportedCharacter {
        /// Byte offset of the first offending unit
        offset: usize,
        /// Charset the input was declared in
        charset: Charset,
    },

    /// The message does not fit any version in the allowed range
    #[error(
        "data needs {required_bits} bits but version {max_version}-{ec_level} holds {max_capacity_bits}"
    )]
    CapacityExceeded {
        /// Encoded length at the largest allowed version; the data bits alone
        /// when a character count field overflows there
        required_bits: usize,
        /// Data capacity of the largest allowed version
        max_capacity_bits: usize,
        /// Requested error correction level
        ec_level: ECLevel,
        /// Largest version that was tried
        max_version: u8,
    },

    /// Error correction level name other than L, M, Q or H
    #[error("invalid error correction level {0:?}, expected one of L, M, Q, H")]
    InvalidErrorCorrectionLevel(String),

    /// Version bounds outside 1..=40 or inverted
    #[error("invalid version request {min}..={max}, versions must satisfy 1 <= min <= max <= 40")]
    InvalidVersionRequest {
        /// Requested lower bound
        min: u8,
        /// Requested upper bound
        max: u8,
    },

    /// Mask id outside 0..=7
    #[error("invalid mask pattern {0}, expected 0..=7")]
    InvalidMaskPattern(u8),

    /// Charset name not in the supported list
    #[error("unknown charset {0:?}")]
    UnknownCharset(String),
}

/// Errors returned while turning a symbol into image or text bytes
#[derive(Debug, Error)]
pub enum RenderError {
    /// Colour string that is neither `r,g,b[,a]` nor `#rrggbb`
    #[error(
        "invalid color {0:?}, expected \"r,g,b\" or \"#rrggbb\" with channels in 0-255 and an optional alpha in 0-100"
    )]
    InvalidColor(String),

    /// Output format name other than png, svg, eps or text
    #[error("unknown output format {0:?}, expected png, svg, eps or text")]
    UnknownFormat(String),

    /// Target size of zero, above the size limit, or too small to give every module a pixel
    #[error("invalid output size {0}")]
    InvalidSize(u32),

    /// Quiet zone so wide the symbol no longer fits the output grid
    #[error("invalid margin {0}")]
    InvalidMargin(u32),

    /// Module style name other than square, dot or round, eye style other
    /// than module, square or circle, or an unknown gradient type
    #[error("unknown style {0:?}")]
    UnknownStyle(String),

    /// Dot or round size outside `0 <= size < 1`
    #[error("invalid style size {0}, expected 0 <= size < 1")]
    InvalidStyleSize(f64),

    /// Eye index outside 0-2
    #[error("invalid eye {0}, expected 0 (top left), 1 (top right) or 2 (bottom left)")]
    InvalidEye(usize),

    /// Overlay width fraction outside `0 < scale <= 1`
    #[error("invalid overlay scale {0}, expected 0 < scale <= 1")]
    InvalidOverlayScale(f64),

    /// PNG encoding failed
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Writing the output failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
