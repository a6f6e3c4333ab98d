/// Function pattern layout: finders, separators, timing, alignment, dark module,
/// reserved format areas and version information
use crate::models::{BitMatrix, Module, ModuleMatrix, Version};

use super::bch::BchEncoder;

/// Alignment pattern centre coordinates for a version (empty for version 1)
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let v = version.number() as usize;
    if v == 1 {
        return Vec::new();
    }
    let num_align = v / 7 + 2;
    let step = (v * 8 + num_align * 3 + 5) / (num_align * 4 - 4) * 2;

    // Counted back from the far edge; the first centre is always 6
    let last = version.size() - 7;
    let mut positions: Vec<usize> = (0..num_align - 1).map(|k| last - k * step).collect();
    positions.push(6);
    positions.reverse();
    positions
}

/// Build the matrix with every function module drawn and the format areas reserved.
///
/// Version information is written immediately since it does not depend on
/// the mask. Everything left `Unset` is data area.
pub fn draw_function_patterns(version: Version) -> ModuleMatrix {
    let size = version.size();
    let mut matrix = ModuleMatrix::new(size);

    // Timing patterns; finders and alignment patterns overwrite the overlaps
    for i in 0..size {
        matrix.set(6, i, Module::Function(i % 2 == 0));
        matrix.set(i, 6, Module::Function(i % 2 == 0));
    }

    draw_finder(&mut matrix, 3, 3);
    draw_finder(&mut matrix, size - 4, 3);
    draw_finder(&mut matrix, 3, size - 4);

    let align = alignment_pattern_positions(version);
    let last = align.len().saturating_sub(1);
    for (i, &cx) in align.iter().enumerate() {
        for (j, &cy) in align.iter().enumerate() {
            let on_finder = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
            if !on_finder {
                draw_alignment(&mut matrix, cx, cy);
            }
        }
    }

    reserve_format_areas(&mut matrix);
    matrix.set(8, size - 8, Module::Function(true));

    if version.has_version_info() {
        draw_version_info(&mut matrix, version);
    }

    matrix
}

/// Dark/function mask for a version: true wherever a module is not data
pub fn function_mask(version: Version) -> BitMatrix {
    draw_function_patterns(version).function_mask()
}

/// 7x7 finder centred on (cx, cy) plus its light separator, clipped to the symbol
fn draw_finder(matrix: &mut ModuleMatrix, cx: usize, cy: usize) {
    let size = matrix.size() as isize;
    for dy in -4isize..=4 {
        for dx in -4isize..=4 {
            let x = cx as isize + dx;
            let y = cy as isize + dy;
            if !(0..size).contains(&x) || !(0..size).contains(&y) {
                continue;
            }
            let dist = dx.abs().max(dy.abs());
            matrix.set(
                x as usize,
                y as usize,
                Module::Function(dist != 2 && dist != 4),
            );
        }
    }
}

/// 5x5 alignment pattern centred on (cx, cy)
fn draw_alignment(matrix: &mut ModuleMatrix, cx: usize, cy: usize) {
    for dy in 0..5 {
        for dx in 0..5 {
            let ring = (dx as isize - 2).abs().max((dy as isize - 2).abs());
            matrix.set(cx + dx - 2, cy + dy - 2, Module::Function(ring != 1));
        }
    }
}

/// Hold both 15-module format strips until the mask is known
fn reserve_format_areas(matrix: &mut ModuleMatrix) {
    let size = matrix.size();
    for i in 0..9 {
        if i != 6 {
            matrix.set(8, i, Module::Reserved);
            matrix.set(i, 8, Module::Reserved);
        }
    }
    for i in 0..8 {
        matrix.set(size - 1 - i, 8, Module::Reserved);
    }
    for i in 0..7 {
        matrix.set(8, size - 1 - i, Module::Reserved);
    }
}

/// Two 6x3 copies of the 18-bit version word, bottom-left and top-right
fn draw_version_info(matrix: &mut ModuleMatrix, version: Version) {
    let size = matrix.size();
    let bits = BchEncoder::version_bits(version);
    for i in 0..18 {
        let dark = (bits >> i) & 1 != 0;
        let a = size - 11 + i % 3;
        let b = i / 3;
        matrix.set(a, b, Module::Function(dark));
        matrix.set(b, a, Module::Function(dark));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::raw_data_modules;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_alignment_positions() {
        assert!(alignment_pattern_positions(v(1)).is_empty());
        assert_eq!(alignment_pattern_positions(v(2)), vec![6, 18]);
        assert_eq!(alignment_pattern_positions(v(7)), vec![6, 22, 38]);
        assert_eq!(alignment_pattern_positions(v(15)), vec![6, 26, 48, 70]);
        assert_eq!(alignment_pattern_positions(v(32)), vec![6, 34, 60, 86, 112, 138]);
        assert_eq!(
            alignment_pattern_positions(v(36)),
            vec![6, 24, 50, 76, 102, 128, 154]
        );
        assert_eq!(
            alignment_pattern_positions(v(39)),
            vec![6, 26, 54, 82, 110, 138, 166]
        );
        assert_eq!(alignment_pattern_positions(v(16)), vec![6, 26, 50, 74]);
        assert_eq!(
            alignment_pattern_positions(v(40)),
            vec![6, 30, 58, 86, 114, 142, 170]
        );
    }

    #[test]
    fn test_data_area_matches_raw_module_count() {
        for version in Version::all() {
            let matrix = draw_function_patterns(version);
            let free = (0..matrix.size())
                .flat_map(|y| (0..matrix.size()).map(move |x| (x, y)))
                .filter(|&(x, y)| matrix.get(x, y) == Module::Unset)
                .count();
            assert_eq!(free, raw_data_modules(version), "version {version}");
        }
    }

    #[test]
    fn test_finder_and_timing() {
        let matrix = draw_function_patterns(v(1));
        // finder corners and separator
        assert!(matrix.is_dark(0, 0));
        assert!(matrix.is_dark(6, 6));
        assert!(!matrix.is_dark(1, 1));
        assert!(matrix.is_dark(3, 3));
        assert!(!matrix.is_dark(7, 0));
        assert!(matrix.is_dark(20, 0));
        assert!(matrix.is_dark(0, 20));
        // timing
        assert!(matrix.is_dark(8, 6));
        assert!(!matrix.is_dark(9, 6));
        assert!(matrix.is_dark(6, 12));
        // dark module
        assert_eq!(matrix.get(8, 13), Module::Function(true));
        // format areas wait for the mask
        assert_eq!(matrix.get(8, 0), Module::Reserved);
        assert_eq!(matrix.get(20, 8), Module::Reserved);
        assert_eq!(matrix.get(8, 20), Module::Reserved);
    }

    #[test]
    fn test_version_info_blocks_mirror() {
        let version = v(7);
        let matrix = draw_function_patterns(version);
        let size = version.size();
        for b in 0..6 {
            for a in size - 11..size - 8 {
                assert_eq!(matrix.get(a, b), matrix.get(b, a));
                assert!(matrix.get(a, b).is_function());
            }
        }
        // bit 0 of 0x07C94 is 0, bit 2 is 1
        assert!(!matrix.is_dark(size - 11, 0));
        assert!(matrix.is_dark(size - 9, 0));
    }

    #[test]
    fn test_function_mask_counts() {
        let mask = function_mask(v(1));
        assert_eq!(mask.width(), 21);
        assert_eq!(21 * 21 - mask.count_ones(), 208);
    }
}
