use crate::models::{ECLevel, Version};

/// Error correction block structure for one (version, level) pair
pub struct EcBlockInfo {
    /// Number of blocks the data codewords are split into
    pub num_blocks: usize,
    /// Error correction codewords appended to each block
    pub ecc_per_block: usize,
}

// Tables from the QR Code specification (Model 2).
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Block structure for the given version and level
pub fn ec_block_info(version: Version, ec_level: ECLevel) -> EcBlockInfo {
    let idx = ec_level.ordinal();
    let ver = version.number() as usize;
    EcBlockInfo {
        num_blocks: NUM_ERROR_CORRECTION_BLOCKS[idx][ver] as usize,
        ecc_per_block: ECC_CODEWORDS_PER_BLOCK[idx][ver] as usize,
    }
}

/// Number of data modules available for codeword bits at the given version,
/// after all function patterns are excluded
pub fn num_raw_data_modules(version: Version) -> usize {
    let ver = version.number() as usize;
    let mut result = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let num_align = ver / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

/// Number of 8-bit data codewords at the given version and level
pub fn num_data_codewords(version: Version, ec_level: ECLevel) -> usize {
    let info = ec_block_info(version, ec_level);
    num_raw_data_modules(version) / 8 - info.ecc_per_block * info.num_blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_data_modules() {
        // Known totals: v1 = 26 codewords, v3 = 70 (plus 7 remainder bits),
        // v40 = 3706.
        assert_eq!(num_raw_data_modules(Version::new(1)), 208);
        assert_eq!(num_raw_data_modules(Version::new(3)) / 8, 70);
        assert_eq!(num_raw_data_modules(Version::new(3)) % 8, 7);
        assert_eq!(num_raw_data_modules(Version::new(40)) / 8, 3706);
    }

    #[test]
    fn test_data_codewords() {
        assert_eq!(num_data_codewords(Version::new(1), ECLevel::L), 19);
        assert_eq!(num_data_codewords(Version::new(1), ECLevel::M), 16);
        assert_eq!(num_data_codewords(Version::new(1), ECLevel::H), 9);
        assert_eq!(num_data_codewords(Version::new(40), ECLevel::L), 2956);
    }

    #[test]
    fn test_block_info() {
        let info = ec_block_info(Version::new(5), ECLevel::Q);
        assert_eq!(info.num_blocks, 4);
        assert_eq!(info.ecc_per_block, 18);

        let info = ec_block_info(Version::new(1), ECLevel::L);
        assert_eq!(info.num_blocks, 1);
        assert_eq!(info.ecc_per_block, 7);
    }
}
