/// Zig-zag placement of codeword bits into the data area
use crate::models::{Module, ModuleMatrix};

/// Place `codewords` MSB first into every unset module.
///
/// Column pairs are walked from the right edge, skipping the vertical timing
/// column, upward first and alternating. Within a pair the right column comes
/// first. Modules left over once the codewords run out are remainder bits and
/// stay light.
pub fn place_codewords(matrix: &mut ModuleMatrix, codewords: &[u8]) {
    let size = matrix.size();
    let total_bits = codewords.len() * 8;
    let mut bit_index = 0;

    let mut upward = true;
    let mut col = size as isize - 1;
    while col > 0 {
        if col == 6 {
            col -= 1;
        }
        for step in 0..size {
            let y = if upward { size - 1 - step } else { step };
            for x in [col as usize, col as usize - 1] {
                if matrix.get(x, y) != Module::Unset {
                    continue;
                }
                let dark = bit_index < total_bits
                    && (codewords[bit_index / 8] >> (7 - bit_index % 8)) & 1 != 0;
                matrix.set(x, y, Module::Data(dark));
                bit_index += 1;
            }
        }
        upward = !upward;
        col -= 2;
    }

    debug_assert!(bit_index >= total_bits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::function_patterns::draw_function_patterns;
    use crate::encoder::tables::total_codewords;
    use crate::models::Version;

    #[test]
    fn test_first_codeword_lands_bottom_right() {
        let version = Version::MIN;
        let mut matrix = draw_function_patterns(version);
        let mut codewords = vec![0u8; total_codewords(version)];
        codewords[0] = 0b1010_0000;
        place_codewords(&mut matrix, &codewords);

        assert_eq!(matrix.get(20, 20), Module::Data(true));
        assert_eq!(matrix.get(19, 20), Module::Data(false));
        assert_eq!(matrix.get(20, 19), Module::Data(true));
        assert_eq!(matrix.get(19, 19), Module::Data(false));
    }

    #[test]
    fn test_fills_every_free_module() {
        for n in [1u8, 2, 7, 14, 40] {
            let version = Version::new(n).unwrap();
            let mut matrix = draw_function_patterns(version);
            let codewords = vec![0xFFu8; total_codewords(version)];
            place_codewords(&mut matrix, &codewords);
            assert!(matrix.is_complete());

            let dark_data = (0..matrix.size())
                .flat_map(|y| (0..matrix.size()).map(move |x| (x, y)))
                .filter(|&(x, y)| matrix.get(x, y) == Module::Data(true))
                .count();
            assert_eq!(dark_data, codewords.len() * 8);
        }
    }

    #[test]
    fn test_remainder_bits_are_light() {
        // version 2 has 7 remainder bits
        let version = Version::new(2).unwrap();
        let mut matrix = draw_function_patterns(version);
        let codewords = vec![0xFFu8; total_codewords(version)];
        place_codewords(&mut matrix, &codewords);
        let light_data = (0..matrix.size())
            .flat_map(|y| (0..matrix.size()).map(move |x| (x, y)))
            .filter(|&(x, y)| matrix.get(x, y) == Module::Data(false))
            .count();
        assert_eq!(light_data, 7);
    }
}
