//! Discovery of contiguous dark regions and their boundary edges.

use bitflags::bitflags;
use itertools::iproduct;

use crate::models::BitMatrix;

bitflags! {
    /// The four edges of a module cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct EdgeSet: u8 {
        const TOP = 1;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT = 1 << 3;
    }
}

/// A directed piece of a region outline between two lattice points.
///
/// Boundary edges are oriented so the dark cell lies on the right-hand side
/// of the travel direction: outer loops come out clockwise (with y growing
/// downward) and hole loops counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl Segment {
    /// Unit step of the travel direction
    pub fn direction(&self) -> (i32, i32) {
        (
            (self.end.0 - self.start.0).signum(),
            (self.end.1 - self.start.1).signum(),
        )
    }

    /// Length in module units
    pub fn len(&self) -> i32 {
        (self.end.0 - self.start.0).abs() + (self.end.1 - self.start.1).abs()
    }
}

/// A maximal 4-connected group of dark modules
#[derive(Debug, Clone)]
pub(crate) struct Region {
    /// Member cells; the first one is the topmost-leftmost
    pub cells: Vec<(usize, usize)>,
}

/// Find all dark regions, ordered by their topmost-leftmost module
/// (row-major).
pub(crate) fn find_regions(matrix: &BitMatrix) -> Vec<Region> {
    let width = matrix.width();
    let height = matrix.height();
    let mut claimed = BitMatrix::new(width, height);
    let mut regions = Vec::new();

    for (y, x) in iproduct!(0..height, 0..width) {
        if !matrix.get(x, y) || claimed.get(x, y) {
            continue;
        }

        let mut cells = Vec::new();
        let mut stack = vec![(x, y)];
        claimed.set(x, y, true);
        while let Some((cx, cy)) = stack.pop() {
            cells.push((cx, cy));
            let mut visit = |nx: usize, ny: usize| {
                if matrix.get(nx, ny) && !claimed.get(nx, ny) {
                    claimed.set(nx, ny, true);
                    stack.push((nx, ny));
                }
            };
            if cx > 0 {
                visit(cx - 1, cy);
            }
            visit(cx + 1, cy);
            if cy > 0 {
                visit(cx, cy - 1);
            }
            visit(cx, cy + 1);
        }
        regions.push(Region { cells });
    }
    regions
}

/// Directed boundary segments of one region, one per cell edge that faces a
/// light or out-of-bounds neighbor.
pub(crate) fn boundary_segments(matrix: &BitMatrix, region: &Region) -> Vec<Segment> {
    let mut segments = Vec::new();
    for &(x, y) in &region.cells {
        let mut edges = EdgeSet::empty();
        if y == 0 || !matrix.get(x, y - 1) {
            edges |= EdgeSet::TOP;
        }
        if !matrix.get(x + 1, y) {
            edges |= EdgeSet::RIGHT;
        }
        if !matrix.get(x, y + 1) {
            edges |= EdgeSet::BOTTOM;
        }
        if x == 0 || !matrix.get(x - 1, y) {
            edges |= EdgeSet::LEFT;
        }

        let (x, y) = (x as i32, y as i32);
        if edges.contains(EdgeSet::TOP) {
            segments.push(Segment {
                start: (x, y),
                end: (x + 1, y),
            });
        }
        if edges.contains(EdgeSet::RIGHT) {
            segments.push(Segment {
                start: (x + 1, y),
                end: (x + 1, y + 1),
            });
        }
        if edges.contains(EdgeSet::BOTTOM) {
            segments.push(Segment {
                start: (x + 1, y + 1),
                end: (x, y + 1),
            });
        }
        if edges.contains(EdgeSet::LEFT) {
            segments.push(Segment {
                start: (x, y + 1),
                end: (x, y),
            });
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_from(rows: &[&str]) -> BitMatrix {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let mut m = BitMatrix::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.bytes().enumerate() {
                m.set(x, y, c == b'#');
            }
        }
        m
    }

    #[test]
    fn test_single_region() {
        let m = matrix_from(&["##", "##"]);
        let regions = find_regions(&m);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].cells.len(), 4);
        assert_eq!(regions[0].cells[0], (0, 0));
    }

    #[test]
    fn test_diagonal_cells_are_separate_regions() {
        let m = matrix_from(&["#.", ".#"]);
        let regions = find_regions(&m);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].cells, vec![(0, 0)]);
        assert_eq!(regions[1].cells, vec![(1, 1)]);
    }

    #[test]
    fn test_region_order_is_row_major() {
        let m = matrix_from(&[".#.", "...", "#.#"]);
        let regions = find_regions(&m);
        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0].cells[0], (1, 0));
        assert_eq!(regions[1].cells[0], (0, 2));
        assert_eq!(regions[2].cells[0], (2, 2));
    }

    #[test]
    fn test_isolated_cell_boundary() {
        let m = matrix_from(&["#"]);
        let regions = find_regions(&m);
        let segs = boundary_segments(&m, &regions[0]);
        assert_eq!(segs.len(), 4);
        // Clockwise orientation: top, right, bottom, left
        assert_eq!(
            segs[0],
            Segment {
                start: (0, 0),
                end: (1, 0)
            }
        );
        assert_eq!(
            segs[1],
            Segment {
                start: (1, 0),
                end: (1, 1)
            }
        );
    }

    #[test]
    fn test_shared_edges_are_not_boundaries() {
        let m = matrix_from(&["##"]);
        let regions = find_regions(&m);
        let segs = boundary_segments(&m, &regions[0]);
        // Each cell loses the edge it shares with the other
        assert_eq!(segs.len(), 6);
        assert!(!segs.contains(&Segment {
            start: (1, 0),
            end: (1, 1)
        }));
    }

    #[test]
    fn test_ring_has_inner_boundary() {
        let m = matrix_from(&["###", "#.#", "###"]);
        let regions = find_regions(&m);
        assert_eq!(regions.len(), 1);
        let segs = boundary_segments(&m, &regions[0]);
        // 12 outer edges plus 4 hole edges
        assert_eq!(segs.len(), 16);
        // A hole edge runs along the light center, reversed relative to the
        // outer orientation
        assert!(segs.contains(&Segment {
            start: (1, 1),
            end: (1, 2)
        }));
    }
}
