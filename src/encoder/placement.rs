use crate::encoder::function_patterns::FunctionPatterns;
use crate::models::BitMatrix;

/// Place interleaved codewords into the data modules of the matrix.
///
/// Follows the canonical traversal: column pairs from the right edge to the
/// left (skipping the timing column), alternating upward and downward,
/// visiting the right cell of each pair first and skipping function modules.
/// Any modules left over once all bits are placed stay light; those are the
/// remainder bits of the version.
pub fn place_codewords(matrix: &mut BitMatrix, func: &FunctionPatterns, codewords: &[u8]) {
    let size = matrix.width() as i32;
    let total_bits = codewords.len() * 8;
    let mut i = 0usize;

    let mut right = size - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        let upward = ((right + 1) & 2) == 0;
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for j in 0..2 {
                let x = right - j;
                if func.is_function(x as usize, y as usize) || i >= total_bits {
                    continue;
                }
                let bit = (codewords[i >> 3] >> (7 - (i & 7))) & 1 == 1;
                matrix.set(x as usize, y as usize, bit);
                i += 1;
            }
        }
        right -= 2;
    }
    debug_assert_eq!(i, total_bits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::num_raw_data_modules;
    use crate::models::Version;

    #[test]
    fn test_placement_fills_every_data_module() {
        let version = Version::new(2);
        let mut matrix = BitMatrix::new(version.size(), version.size());
        let func = FunctionPatterns::stamp(&mut matrix, version).unwrap();

        // All-ones codewords must turn every data module dark except the
        // remainder modules.
        let codewords = vec![0xFFu8; num_raw_data_modules(version) / 8];
        place_codewords(&mut matrix, &func, &codewords);

        let mut dark_data = 0usize;
        for y in 0..version.size() {
            for x in 0..version.size() {
                if !func.is_function(x, y) && matrix.get(x, y) {
                    dark_data += 1;
                }
            }
        }
        assert_eq!(dark_data, num_raw_data_modules(version) / 8 * 8);
    }

    #[test]
    fn test_first_codeword_lands_in_bottom_right() {
        let version = Version::new(1);
        let mut matrix = BitMatrix::new(21, 21);
        let func = FunctionPatterns::stamp(&mut matrix, version).unwrap();

        let mut codewords = vec![0u8; num_raw_data_modules(version) / 8];
        codewords[0] = 0b1000_0000;
        place_codewords(&mut matrix, &func, &codewords);

        // The traversal starts at the bottom-right corner moving upward.
        assert!(matrix.get(20, 20));
        assert!(!matrix.get(19, 20));
        assert!(!matrix.get(20, 19));
    }
}
