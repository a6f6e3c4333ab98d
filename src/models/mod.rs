/// Declared input character sets and their ECI numbers
pub mod charset;
/// Module grids used while building and after finishing a symbol
pub mod matrix;
/// Version, error correction level, mask pattern and the finished symbol
pub mod qr_code;
/// Modes and encoded segments
pub mod segment;

pub use charset::Charset;
pub use matrix::{BitMatrix, Module, ModuleMatrix};
pub use qr_code::{ECLevel, MaskPattern, QrSymbol, Version};
pub use segment::{Mode, Segment};
