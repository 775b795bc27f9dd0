//! Outline tracing and rounded-corner emission.
//!
//! Boundary segments of a region are chained into closed loops, collinear
//! runs are merged, and every corner is replaced by a quarter-circle arc:
//! a generous one where the outline turns around the shape (convex) and a
//! tighter one where it turns into the shape (concave). Straight edges
//! between merged modules disappear entirely.

use std::collections::HashMap;

use core::f32::consts::{FRAC_PI_2, PI};
use log::trace;

use crate::models::{BitMatrix, Point, Size};
use crate::path::region::{Segment, boundary_segments, find_regions};
use crate::path::sink::PathSink;

/// Corner radius in module units where the outline turns clockwise
const CONVEX_CORNER_RADIUS: f64 = 0.5;
/// Corner radius in module units where the outline turns counter-clockwise
const CONCAVE_CORNER_RADIUS: f64 = 0.25;

/// Trace every dark region of the module grid into the sink, scaled into
/// the given bounding box.
///
/// Subpaths are emitted in a stable order: regions row-major by their
/// topmost-leftmost module, loops within a region by their topmost-leftmost
/// lattice point. Identical input produces an identical command sequence.
pub fn synthesize<S: PathSink>(matrix: &BitMatrix, box_size: Size, sink: &mut S) {
    let n = matrix.width();
    if n == 0 {
        return;
    }
    let unit = module_unit(box_size, n);

    let regions = find_regions(matrix);
    trace!("tracing {} dark regions", regions.len());
    for region in &regions {
        let segments = boundary_segments(matrix, region);
        for lp in trace_loops(&segments) {
            emit_loop(&merge_collinear(lp), unit, sink);
        }
    }
}

/// Edge length of one module in output coordinates.
///
/// The scale is uniform so corner arcs stay circular; a degenerate box
/// collapses every coordinate to zero rather than dividing into nonsense.
fn module_unit(box_size: Size, modules: usize) -> f64 {
    let shorter = box_size.width.min(box_size.height);
    if shorter.is_finite() && shorter > 0.0 {
        shorter / modules as f64
    } else {
        0.0
    }
}

/// Chain directed segments into closed loops.
///
/// Each walk starts at the unused segment with the smallest start vertex in
/// row-major order and follows end-to-start matches. Where two diagonally
/// touching cells of one region share a lattice point, the walk takes the
/// sharpest right turn, which keeps every loop simple.
fn trace_loops(segments: &[Segment]) -> Vec<Vec<Segment>> {
    let mut by_start: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
    for (i, seg) in segments.iter().enumerate() {
        by_start.entry(seg.start).or_default().push(i);
    }

    let mut order: Vec<usize> = (0..segments.len()).collect();
    order.sort_by_key(|&i| (segments[i].start.1, segments[i].start.0));

    let mut used = vec![false; segments.len()];
    let mut loops = Vec::new();
    for &first in &order {
        if used[first] {
            continue;
        }
        let origin = segments[first].start;
        let mut lp = Vec::new();
        let mut current = first;
        loop {
            used[current] = true;
            lp.push(segments[current]);
            let end = segments[current].end;
            if end == origin {
                break;
            }
            let dir = segments[current].direction();
            let next = by_start
                .get(&end)
                .into_iter()
                .flatten()
                .copied()
                .filter(|&i| !used[i])
                .max_by_key(|&i| {
                    let d = segments[i].direction();
                    dir.0 * d.1 - dir.1 * d.0
                });
            let Some(next) = next else {
                break;
            };
            current = next;
        }
        loops.push(lp);
    }
    loops
}

/// Merge collinear neighbors and rotate the loop to begin at a corner
fn merge_collinear(lp: Vec<Segment>) -> Vec<Segment> {
    let m = lp.len();
    if m < 2 {
        return lp;
    }
    let start = (0..m)
        .find(|&i| lp[i].direction() != lp[(i + m - 1) % m].direction())
        .unwrap_or(0);

    let mut merged: Vec<Segment> = Vec::new();
    for k in 0..m {
        let seg = lp[(start + k) % m];
        match merged.last_mut() {
            Some(last) if last.direction() == seg.direction() => last.end = seg.end,
            _ => merged.push(seg),
        }
    }
    merged
}

/// Emit one closed loop as move/line/arc commands bracketed by a close.
fn emit_loop<S: PathSink>(segs: &[Segment], unit: f64, sink: &mut S) {
    let m = segs.len();
    if m == 0 {
        return;
    }

    // Corner i sits between segs[i] and segs[i + 1]; the radius is clamped
    // to half the shorter adjacent edge so offsets never cross.
    let mut radius = vec![0.0f64; m];
    let mut clockwise = vec![false; m];
    for i in 0..m {
        let a = segs[i];
        let b = segs[(i + 1) % m];
        let da = a.direction();
        let db = b.direction();
        let cross = da.0 * db.1 - da.1 * db.0;
        clockwise[i] = cross > 0;
        let base = if clockwise[i] {
            CONVEX_CORNER_RADIUS
        } else {
            CONCAVE_CORNER_RADIUS
        };
        radius[i] = base
            .min(f64::from(a.len()) / 2.0)
            .min(f64::from(b.len()) / 2.0);
    }

    let at = |x: f64, y: f64| Point::new(x * unit, y * unit);

    let d0 = segs[0].direction();
    let r_before = radius[m - 1];
    let start = (
        f64::from(segs[0].start.0) + f64::from(d0.0) * r_before,
        f64::from(segs[0].start.1) + f64::from(d0.1) * r_before,
    );
    sink.move_to(at(start.0, start.1));

    for i in 0..m {
        let seg = segs[i];
        let d = seg.direction();
        let r_in = radius[(i + m - 1) % m];
        let r_out = radius[i];

        let sx = f64::from(seg.start.0) + f64::from(d.0) * r_in;
        let sy = f64::from(seg.start.1) + f64::from(d.1) * r_in;
        let ex = f64::from(seg.end.0) - f64::from(d.0) * r_out;
        let ey = f64::from(seg.end.1) - f64::from(d.1) * r_out;
        if (sx, sy) != (ex, ey) {
            sink.line_to(at(ex, ey));
        }

        // Quarter-circle corner between this segment and the next
        let dn = segs[(i + 1) % m].direction();
        let r = radius[i];
        let cx = f64::from(seg.end.0) - f64::from(d.0) * r + f64::from(dn.0) * r;
        let cy = f64::from(seg.end.1) - f64::from(d.1) * r + f64::from(dn.1) * r;
        let start_angle = if ex == cx {
            if ey < cy { PI * 1.5 } else { FRAC_PI_2 }
        } else if ex < cx {
            PI
        } else {
            0.0
        };
        let end_angle = start_angle + if clockwise[i] { FRAC_PI_2 } else { -FRAC_PI_2 };
        sink.arc_to(at(cx, cy), r * unit, start_angle, end_angle, clockwise[i]);
    }

    sink.close_path();
}
