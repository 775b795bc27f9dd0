//! QR symbol encoding.
//!
//! Turns input data into a finished module grid:
//! - segment encoding (numeric, alphanumeric, byte) and padding
//! - Reed-Solomon error correction and block interleaving
//! - function pattern stamping and zig-zag codeword placement
//! - mask selection by penalty score and format information

/// Format and version information words (BCH protected)
pub mod format;
/// Function module stamping (finder/timing/alignment/version)
pub mod function_patterns;
/// Mask application and penalty scoring
pub mod mask;
/// Zig-zag codeword placement
pub mod placement;
/// Reed-Solomon error correction over GF(256)
pub mod reed_solomon;
/// Data segments and bit stream assembly
pub mod segment;
/// QR specification tables (ECC codewords/blocks, capacities)
pub mod tables;

use log::debug;

use crate::error::Error;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};
use function_patterns::FunctionPatterns;
use mask::choose_mask;
use placement::place_codewords;
use reed_solomon::ReedSolomonEncoder;
use segment::{BitBuffer, Segment};
use tables::{ec_block_info, num_data_codewords, num_raw_data_modules};

/// Pad codewords alternated to fill unused data capacity
const PAD_BYTES: [u32; 2] = [0xEC, 0x11];

/// A finished, immutable QR symbol
#[derive(Debug, Clone)]
pub struct EncodedSymbol {
    matrix: BitMatrix,
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    penalty: i32,
}

impl EncodedSymbol {
    /// The module grid; true is dark
    pub fn matrix(&self) -> &BitMatrix {
        &self.matrix
    }

    /// The chosen version (1-40)
    pub fn version(&self) -> Version {
        self.version
    }

    /// Side length of the module grid
    pub fn size(&self) -> usize {
        self.version.size()
    }

    /// The error correction level the symbol was encoded at
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// The committed mask pattern
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// The penalty score of the committed mask
    pub fn penalty_score(&self) -> i32 {
        self.penalty
    }
}

/// Encode arbitrary bytes at the given error correction level
pub fn encode_bytes(data: &[u8], ec_level: ECLevel) -> Result<EncodedSymbol, Error> {
    encode_segments(&[Segment::bytes(data)], ec_level)
}

/// Encode text, picking the narrowest mode its characters allow
pub fn encode_text(text: &str, ec_level: ECLevel) -> Result<EncodedSymbol, Error> {
    if text.is_empty() {
        encode_segments(&[], ec_level)
    } else {
        encode_segments(&[Segment::auto(text)], ec_level)
    }
}

/// Encode pre-built segments at the given error correction level.
///
/// The smallest version whose data capacity holds the segments is chosen;
/// when even version 40 cannot, encoding fails with
/// [`Error::CapacityExceeded`].
pub fn encode_segments(segments: &[Segment], ec_level: ECLevel) -> Result<EncodedSymbol, Error> {
    // Find the minimal version
    let mut version = Version::MIN;
    let used_bits = loop {
        let capacity_bits = num_data_codewords(version, ec_level) * 8;
        match segment::total_bits(segments, version) {
            Some(n) if n <= capacity_bits => break n,
            _ => {}
        }
        if version == Version::MAX {
            return Err(Error::CapacityExceeded);
        }
        version = Version::new(version.number() + 1);
    };
    debug!(
        "version {} holds {} data bits at level {:?}",
        version.number(),
        used_bits,
        ec_level
    );

    // Serialize segments into the data bit stream
    let capacity_bits = num_data_codewords(version, ec_level) * 8;
    let mut bits = BitBuffer::new();
    for seg in segments {
        bits.append_bits(seg.mode().mode_bits(), 4);
        bits.append_bits(seg.num_chars() as u32, seg.mode().char_count_bits(version));
        bits.extend(seg.data_bits());
    }
    debug_assert_eq!(bits.len(), used_bits);

    // Terminator, then pad to a codeword boundary
    bits.append_bits(0, (capacity_bits - bits.len()).min(4));
    bits.append_bits(0, bits.len().wrapping_neg() & 7);

    // Alternating pad codewords up to capacity
    for &pad in PAD_BYTES.iter().cycle() {
        if bits.len() >= capacity_bits {
            break;
        }
        bits.append_bits(pad, 8);
    }

    let data = bits.into_bytes();
    let codewords = add_ecc_and_interleave(&data, version, ec_level);

    // Assemble the matrix
    let size = version.size();
    let mut matrix = BitMatrix::try_new(size, size)?;
    let func = FunctionPatterns::stamp(&mut matrix, version)?;
    place_codewords(&mut matrix, &func, &codewords);
    let (mask, penalty) = choose_mask(&mut matrix, &func, ec_level);

    Ok(EncodedSymbol {
        matrix,
        version,
        ec_level,
        mask,
        penalty,
    })
}

/// Split data codewords into blocks, append Reed-Solomon codewords to each,
/// and interleave the blocks into the final transmission order.
fn add_ecc_and_interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let info = ec_block_info(version, ec_level);
    let raw_codewords = num_raw_data_modules(version) / 8;
    debug_assert_eq!(data.len(), raw_codewords - info.ecc_per_block * info.num_blocks);

    // The first blocks are one codeword shorter when the split is uneven
    let num_short_blocks = info.num_blocks - raw_codewords % info.num_blocks;
    let short_block_len = raw_codewords / info.num_blocks - info.ecc_per_block;

    let rs = ReedSolomonEncoder::new(info.ecc_per_block);
    let mut result = vec![0u8; raw_codewords];
    let mut dat = data;
    for i in 0..info.num_blocks {
        let block_len = short_block_len + usize::from(i >= num_short_blocks);
        let ecc = rs.remainder(&dat[..block_len]);

        let mut k = i;
        for (j, &b) in dat[..block_len].iter().enumerate() {
            if j == short_block_len {
                k -= num_short_blocks;
            }
            result[k] = b;
            k += info.num_blocks;
        }
        let mut k = data.len() + i;
        for &b in &ecc {
            result[k] = b;
            k += info.num_blocks;
        }
        dat = &dat[block_len..];
    }
    debug_assert!(dat.is_empty());
    result
}
