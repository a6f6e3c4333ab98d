//! rust_qr_encoder - QR Code Model 2 encoder in pure Rust
//!
//! Turns bytes into a finished QR symbol: optimal mode segmentation,
//! Reed-Solomon error correction, matrix layout and mask selection.
//! Rendering to PNG, SVG, EPS or terminal text, with optional module and
//! finder pattern styles, colours and gradients, sits on top in [`render`].
//!
//! ```
//! use rust_qr_encoder::{encode_text, ECLevel, MaskPattern, Version};
//!
//! let symbol = encode_text("HELLO WORLD", ECLevel::Q).unwrap();
//! assert_eq!(symbol.version(), Version::MIN);
//! assert_eq!(symbol.size(), 21);
//! assert_eq!(symbol.mask(), MaskPattern::Pattern0);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding modules (segmentation, error correction, layout, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QrSymbol, BitMatrix, Segment, Version, etc.)
pub mod models;
/// Output backends (PNG, SVG, EPS, text)
pub mod render;

pub use encoder::EncodeOptions;
pub use error::{EncodeError, RenderError};
pub use models::{
    BitMatrix, Charset, ECLevel, MaskPattern, Mode, QrSymbol, Segment, Version,
};
pub use render::{
    Color, Eye, EyeColor, EyeStyle, Gradient, GradientType, ModuleStyle, OutputFormat, Overlay,
    RenderOptions, render, write_to_file,
};

use encoder::QrEncoder;

/// Encode `input` into a QR symbol
///
/// # Arguments
/// * `input` - Payload bytes, interpreted according to `options.charset`
/// * `options` - Level, charset, version bounds, mask and ECI behaviour
///
/// # Returns
/// The smallest symbol in the allowed version range that holds the payload,
/// or the first error hit. No partial symbol is ever returned.
pub fn encode(input: &[u8], options: &EncodeOptions) -> Result<QrSymbol, EncodeError> {
    QrEncoder::encode(input, options)
}

/// Encode UTF-8 text with default options at `ec_level`
pub fn encode_text(text: &str, ec_level: ECLevel) -> Result<QrSymbol, EncodeError> {
    encode(text.as_bytes(), &EncodeOptions::new(ec_level))
}
