//! QR code encoding modules
//!
//! Everything between the input bytes and the finished module grid:
//! - Mode segmentation (numeric, alphanumeric, byte, kanji, ECI)
//! - Bit stream assembly and Reed-Solomon error correction
//! - Function pattern layout and codeword placement
//! - Format/version information and mask selection

/// BCH coding for format and version info
pub mod bch;
/// Bit stream assembly and padding
pub mod bitstream;
/// Block split and interleaving
pub mod blocks;
pub(crate) mod config;
/// Format information placement
pub mod format;
/// Finder, timing, alignment and version patterns
pub mod function_patterns;
/// Mask application and penalty scoring
pub mod mask;
/// Data mode encoders (numeric, alphanumeric, byte, kanji)
pub mod modes;
/// Per-call encoder options
pub mod options;
/// Zig-zag codeword placement
pub mod placement;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Minimal-length mode segmentation
pub mod segmenter;
/// ISO/IEC 18004 tables (ECC codewords/blocks, capacities)
pub mod tables;

pub use options::EncodeOptions;
pub use qr_encoder::QrEncoder;
