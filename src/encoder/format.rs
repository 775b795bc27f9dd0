//! Format and version information words.
//!
//! Both words carry a handful of data bits protected by a BCH code; the
//! format word is additionally XORed with a fixed pattern so it is never
//! all-zero.

use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// BCH(15,5) generator polynomial for the format word
const FORMAT_GENERATOR: u32 = 0x537;
/// Pattern XORed into the format word after encoding
const FORMAT_XOR_MASK: u32 = 0x5412;
/// BCH(18,6) generator polynomial for the version word
const VERSION_GENERATOR: u32 = 0x1f25;

/// The 15-bit format word for an error correction level and mask pattern
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u32 {
    let data = u32::from((ec_level.format_bits() << 3) | mask.index());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_GENERATOR);
    }
    ((data << 10) | rem) ^ FORMAT_XOR_MASK
}

/// The 18-bit version word for versions 7 and up
pub fn version_info_bits(version: Version) -> u32 {
    let ver = u32::from(version.number());
    let mut rem = ver;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * VERSION_GENERATOR);
    }
    (ver << 12) | rem
}

/// Write both copies of the format word and the always-dark module
pub fn draw_format(matrix: &mut BitMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let bits = format_bits(ec_level, mask);
    let bit = |i: usize| (bits >> i) & 1 == 1;

    // First copy, wrapped around the top-left finder
    for i in 0..6 {
        matrix.set(8, i, bit(i));
    }
    matrix.set(8, 7, bit(6));
    matrix.set(8, 8, bit(7));
    matrix.set(7, 8, bit(8));
    for i in 9..15 {
        matrix.set(14 - i, 8, bit(i));
    }

    // Second copy, split between the other two finders
    let size = matrix.width();
    for i in 0..8 {
        matrix.set(size - 1 - i, 8, bit(i));
    }
    for i in 8..15 {
        matrix.set(8, size - 15 + i, bit(i));
    }
    matrix.set(8, size - 8, true);
}
