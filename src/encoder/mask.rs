//! Mask application and penalty scoring.

use log::debug;

use crate::encoder::format::draw_format;
use crate::encoder::function_patterns::FunctionPatterns;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

/// XOR the mask pattern into every data module.
///
/// Applying the same mask twice restores the original matrix.
pub fn apply_mask(matrix: &mut BitMatrix, func: &FunctionPatterns, mask: MaskPattern) {
    let size = matrix.width();
    for y in 0..size {
        for x in 0..size {
            if !func.is_function(x, y) && mask.is_masked(x, y) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Score a fully drawn matrix with the four penalty rules
pub fn penalty_score(matrix: &BitMatrix) -> i32 {
    let size = matrix.width();
    let mut result = 0i32;

    // Rule 1 and 3 over rows: runs of same-colored modules, and dark runs
    // shaped like a finder pattern with light margins
    for y in 0..size {
        let mut run_color = false;
        let mut run_len = 0i32;
        let mut history = RunHistory::new(size);
        for x in 0..size {
            if matrix.get(x, y) == run_color {
                run_len += 1;
                if run_len == 5 {
                    result += PENALTY_N1;
                } else if run_len > 5 {
                    result += 1;
                }
            } else {
                history.add(run_len);
                if !run_color {
                    result += history.finder_patterns() * PENALTY_N3;
                }
                run_color = matrix.get(x, y);
                run_len = 1;
            }
        }
        result += history.finish(run_color, run_len) * PENALTY_N3;
    }

    // Rules 1 and 3 over columns
    for x in 0..size {
        let mut run_color = false;
        let mut run_len = 0i32;
        let mut history = RunHistory::new(size);
        for y in 0..size {
            if matrix.get(x, y) == run_color {
                run_len += 1;
                if run_len == 5 {
                    result += PENALTY_N1;
                } else if run_len > 5 {
                    result += 1;
                }
            } else {
                history.add(run_len);
                if !run_color {
                    result += history.finder_patterns() * PENALTY_N3;
                }
                run_color = matrix.get(x, y);
                run_len = 1;
            }
        }
        result += history.finish(run_color, run_len) * PENALTY_N3;
    }

    // Rule 2: 2x2 blocks of a single color
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = matrix.get(x, y);
            if color == matrix.get(x + 1, y)
                && color == matrix.get(x, y + 1)
                && color == matrix.get(x + 1, y + 1)
            {
                result += PENALTY_N2;
            }
        }
    }

    // Rule 4: deviation of the dark module share from 50%, in 5% steps
    let dark = matrix.count_dark() as i32;
    let total = (size * size) as i32;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    result += k * PENALTY_N4;

    result
}

/// Apply each of the eight masks, score them with the format bits drawn, and
/// commit the lowest-scoring one. Ties go to the lowest mask index.
pub fn choose_mask(
    matrix: &mut BitMatrix,
    func: &FunctionPatterns,
    ec_level: ECLevel,
) -> (MaskPattern, i32) {
    let mut best_mask = MaskPattern::Pattern0;
    let mut best_score = i32::MAX;
    for mask in MaskPattern::ALL {
        apply_mask(matrix, func, mask);
        draw_format(matrix, ec_level, mask);
        let score = penalty_score(matrix);
        if score < best_score {
            best_mask = mask;
            best_score = score;
        }
        // XOR is self-inverse; this restores the unmasked matrix
        apply_mask(matrix, func, mask);
    }

    debug!(
        "committed mask {} with penalty {}",
        best_mask.index(),
        best_score
    );
    apply_mask(matrix, func, best_mask);
    draw_format(matrix, ec_level, best_mask);
    (best_mask, best_score)
}

/// Rolling window of the last run lengths in one row or column, used to
/// spot the 1:1:3:1:1 finder ratio with a light margin of at least 4
struct RunHistory {
    grid_size: i32,
    runs: [i32; 7],
}

impl RunHistory {
    fn new(size: usize) -> Self {
        Self {
            grid_size: size as i32,
            runs: [0; 7],
        }
    }

    fn add(&mut self, mut run_len: i32) {
        if self.runs[0] == 0 {
            // The leading light margin extends past the symbol edge
            run_len += self.grid_size;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = run_len;
    }

    fn finder_patterns(&self) -> i32 {
        let r = &self.runs;
        let n = r[1];
        let core = n > 0 && r[2] == n && r[3] == n * 3 && r[4] == n && r[5] == n;
        i32::from(core && (r[0] >= n * 4 || r[6] >= n * 4))
    }

    fn finish(mut self, run_color: bool, mut run_len: i32) -> i32 {
        if run_color {
            self.add(run_len);
            run_len = 0;
        }
        run_len += self.grid_size;
        self.add(run_len);
        self.finder_patterns()
    }
}
