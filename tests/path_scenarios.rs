//! End-to-end scenarios for the builder and path synthesis.

use rounded_qr::{
    Builder, DisplayList, ECLevel, Error, PathCommand, PathSink, Point, Size, trace_text,
};

/// Track the extremes of every coordinate that reaches the sink.
#[derive(Default)]
struct BoundsSink {
    min: Option<(f64, f64)>,
    max: Option<(f64, f64)>,
    commands: usize,
}

impl BoundsSink {
    fn include(&mut self, x: f64, y: f64) {
        let (mut min_x, mut min_y) = self.min.unwrap_or((x, y));
        let (mut max_x, mut max_y) = self.max.unwrap_or((x, y));
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
        self.min = Some((min_x, min_y));
        self.max = Some((max_x, max_y));
    }
}

impl PathSink for BoundsSink {
    fn move_to(&mut self, point: Point) {
        self.commands += 1;
        self.include(point.x, point.y);
    }

    fn line_to(&mut self, point: Point) {
        self.commands += 1;
        self.include(point.x, point.y);
    }

    fn arc_to(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f32,
        end_angle: f32,
        _clockwise: bool,
    ) {
        self.commands += 1;
        // A quarter arc between axis-aligned endpoints stays inside the box
        // its endpoints span, so the endpoints bound it.
        for angle in [start_angle, end_angle] {
            let x = center.x + radius * f64::from(angle.cos());
            let y = center.y + radius * f64::from(angle.sin());
            self.include(x, y);
        }
    }

    fn close_path(&mut self) {
        self.commands += 1;
    }
}

#[test]
fn minimal_symbol_fills_the_box() {
    // One ASCII character at medium level resolves to version 1 and a
    // 21x21 grid whose outline spans the whole 200x200 box.
    let mut builder = Builder::text("A")
        .error_correction_level(ECLevel::M)
        .size(Size::new(200.0, 200.0));
    assert_eq!(builder.symbol().unwrap().version().number(), 1);
    assert_eq!(builder.symbol().unwrap().size(), 21);

    let mut bounds = BoundsSink::default();
    builder.build_with_sink(&mut bounds).unwrap();
    assert!(bounds.commands > 0);

    let (min_x, min_y) = bounds.min.unwrap();
    let (max_x, max_y) = bounds.max.unwrap();
    let tolerance = 1e-6;
    assert!(min_x.abs() < tolerance, "min_x = {min_x}");
    assert!(min_y.abs() < tolerance, "min_y = {min_y}");
    assert!((max_x - 200.0).abs() < tolerance, "max_x = {max_x}");
    assert!((max_y - 200.0).abs() < tolerance, "max_y = {max_y}");
}

#[test]
fn build_path_is_idempotent() {
    let mut builder = Builder::binary(b"idempotent?")
        .error_correction_level(ECLevel::H)
        .size(Size::new(300.0, 300.0));

    let mut first = DisplayList::new();
    builder.build_with_sink(&mut first).unwrap();
    let mut second = DisplayList::new();
    builder.build_with_sink(&mut second).unwrap();
    let mut third = DisplayList::new();
    builder.build_with_sink(&mut third).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(second, third);
}

#[test]
fn oversized_payload_never_fires_a_callback() {
    let data = vec![0u8; 1300];
    let mut builder = Builder::binary(&data).error_correction_level(ECLevel::H);
    let mut bounds = BoundsSink::default();
    assert_eq!(
        builder.build_with_sink(&mut bounds).unwrap_err(),
        Error::CapacityExceeded
    );
    assert_eq!(bounds.commands, 0);
}

#[test]
fn every_subpath_is_bracketed() {
    let list = trace_text("BRACKETS/123", ECLevel::M, Size::new(210.0, 210.0)).unwrap();

    let mut depth = 0i32;
    let mut subpaths = 0usize;
    for cmd in list.commands() {
        match cmd {
            PathCommand::MoveTo(_) => {
                assert_eq!(depth, 0, "nested move");
                depth = 1;
                subpaths += 1;
            }
            PathCommand::ClosePath => {
                assert_eq!(depth, 1, "close outside a subpath");
                depth = 0;
            }
            _ => assert_eq!(depth, 1, "drawing outside a subpath"),
        }
    }
    assert_eq!(depth, 0);
    assert!(subpaths > 0);
}

#[test]
fn zero_box_degenerates_without_failing() {
    let list = trace_text("ZERO", ECLevel::L, Size::new(0.0, 0.0)).unwrap();
    assert!(!list.is_empty());
    for cmd in list.commands() {
        match cmd {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                assert_eq!((p.x, p.y), (0.0, 0.0));
            }
            PathCommand::ArcTo { center, radius, .. } => {
                assert_eq!((center.x, center.y), (0.0, 0.0));
                assert_eq!(*radius, 0.0);
            }
            PathCommand::ClosePath => {}
        }
    }
}

#[test]
fn finder_pattern_produces_ring_and_core_subpaths() {
    // Whatever the data, the three finder patterns contribute rings with
    // holes, so there are strictly more subpaths than regions of a blank
    // grid and at least one counter-clockwise arc.
    let list = trace_text("FINDERS", ECLevel::M, Size::new(100.0, 100.0)).unwrap();
    let ccw_arcs = list
        .commands()
        .iter()
        .filter(|c| matches!(c, PathCommand::ArcTo { clockwise: false, .. }))
        .count();
    assert!(ccw_arcs > 0);
}
