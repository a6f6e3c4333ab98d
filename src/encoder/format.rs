/// Format information placement (EC level + mask id, BCH protected)
use crate::models::{ECLevel, MaskPattern, Module, ModuleMatrix};

use super::bch::BchEncoder;

/// Module coordinates (x, y) of both format copies, indexed by bit (LSB first)
pub fn format_positions(size: usize) -> [[(usize, usize); 15]; 2] {
    let mut first = [(0, 0); 15];
    let mut second = [(0, 0); 15];
    for (i, slot) in first.iter_mut().enumerate() {
        *slot = match i {
            0..=5 => (8, i),
            6 => (8, 7),
            7 => (8, 8),
            8 => (7, 8),
            _ => (14 - i, 8),
        };
    }
    for (i, slot) in second.iter_mut().enumerate() {
        *slot = if i < 8 {
            (size - 1 - i, 8)
        } else {
            (8, size - 15 + i)
        };
    }
    [first, second]
}

/// Write both copies of the format word into the reserved strips
pub fn write_format_info(matrix: &mut ModuleMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let bits = BchEncoder::format_bits(ec_level, mask);
    for copy in format_positions(matrix.size()) {
        for (i, (x, y)) in copy.into_iter().enumerate() {
            matrix.set(x, y, Module::Function((bits >> i) & 1 != 0));
        }
    }
}
