use crate::encoder::format;
use crate::error::Error;
use crate::models::{BitMatrix, Version};

/// Function module map for a specific QR version.
/// true = function/reserved module (not data), false = data module.
pub struct FunctionPatterns {
    mask: BitMatrix,
}

impl FunctionPatterns {
    /// Stamp every function pattern into `matrix` and record the cells they
    /// occupy.
    ///
    /// Finder, separator, timing, alignment and version info modules come out
    /// fully drawn; format info cells are reserved here but drawn later, once
    /// the mask has been chosen.
    pub fn stamp(matrix: &mut BitMatrix, version: Version) -> Result<Self, Error> {
        let size = version.size();
        let mut mask = BitMatrix::try_new(size, size)?;

        // Timing strips
        fill(matrix, &mut mask, 6, 0, 1, size);
        fill(matrix, &mut mask, 0, 6, size, 1);
        // Finder patterns with separators and the adjacent format areas
        fill(matrix, &mut mask, 0, 0, 9, 9);
        fill(matrix, &mut mask, size - 8, 0, 8, 9);
        fill(matrix, &mut mask, 0, size - 8, 9, 8);

        let align = alignment_pattern_positions(version);
        for &cx in &align {
            for &cy in &align {
                if overlaps_finder(cx, cy, size) {
                    continue;
                }
                fill(matrix, &mut mask, cx - 2, cy - 2, 5, 5);
            }
        }

        if version.number() >= 7 {
            fill(matrix, &mut mask, size - 11, 0, 3, 6);
            fill(matrix, &mut mask, 0, size - 11, 6, 3);
        }

        carve_light_modules(matrix, version, &align);
        Ok(Self { mask })
    }

    /// Side length of the module grid
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Whether (x, y) is a function or reserved module
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }

    /// Number of modules available for codeword bits
    pub fn data_module_count(&self) -> usize {
        let size = self.mask.width();
        size * size - self.mask.count_dark()
    }
}

/// Alignment pattern center coordinates for a given version, ascending
pub fn alignment_pattern_positions(version: Version) -> Vec<usize> {
    let ver = version.number() as usize;
    if ver == 1 {
        return Vec::new();
    }
    let num_align = ver / 7 + 2;
    let size = version.size();
    let step = if ver == 32 {
        26
    } else {
        (ver * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2
    };

    let mut positions = vec![6];
    let mut tail: Vec<usize> = Vec::with_capacity(num_align - 1);
    let mut pos = size - 7;
    for _ in 0..num_align - 1 {
        tail.push(pos);
        pos = pos.saturating_sub(step);
    }
    tail.reverse();
    positions.extend(tail);
    positions
}

/// An alignment pattern centered here would collide with one of the three
/// finder patterns.
fn overlaps_finder(cx: usize, cy: usize, size: usize) -> bool {
    let tl = cx <= 8 && cy <= 8;
    let tr = cx >= size - 9 && cy <= 8;
    let bl = cx <= 8 && cy >= size - 9;
    tl || tr || bl
}

/// Mark a rectangle as dark function modules in both matrices
fn fill(matrix: &mut BitMatrix, mask: &mut BitMatrix, left: usize, top: usize, width: usize, height: usize) {
    for dy in 0..height {
        for dx in 0..width {
            matrix.set(left + dx, top + dy, true);
            mask.set(left + dx, top + dy, true);
        }
    }
}

/// Carve the light cells of the stamped patterns and draw the version info
/// bit blocks.
fn carve_light_modules(matrix: &mut BitMatrix, version: Version, align: &[usize]) {
    let size = version.size();

    // Timing strips alternate, dark on even coordinates
    for i in (7..size - 7).step_by(2) {
        matrix.set(6, i, false);
        matrix.set(i, 6, false);
    }

    // Finder rings: light at Chebyshev distance 2 (inner ring) and 4
    // (separator) from each finder center
    let centers = [(3i32, 3i32), (size as i32 - 4, 3), (3, size as i32 - 4)];
    for dy in -4i32..=4 {
        for dx in -4i32..=4 {
            let dist = dx.abs().max(dy.abs());
            if dist == 2 || dist == 4 {
                for &(cx, cy) in &centers {
                    set_signed(matrix, cx + dx, cy + dy, false);
                }
            }
        }
    }

    // Alignment patterns: light ring between the dark border and center
    for &cx in align {
        for &cy in align {
            if overlaps_finder(cx, cy, size) {
                continue;
            }
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    set_signed(
                        matrix,
                        cx as i32 + dx,
                        cy as i32 + dy,
                        dx == 0 && dy == 0,
                    );
                }
            }
        }
    }

    // Version info blocks, two mirrored copies
    if version.number() >= 7 {
        let bits = format::version_info_bits(version);
        for i in 0..18usize {
            let bit = (bits >> i) & 1 == 1;
            let a = size - 11 + i % 3;
            let b = i / 3;
            matrix.set(a, b, bit);
            matrix.set(b, a, bit);
        }
    }
}

fn set_signed(matrix: &mut BitMatrix, x: i32, y: i32, value: bool) {
    if x >= 0 && y >= 0 {
        matrix.set(x as usize, y as usize, value);
    }
}
