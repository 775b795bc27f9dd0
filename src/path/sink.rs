//! The vector-drawing callback protocol and a recording implementation.

use std::fmt::Write;

use crate::models::Point;

/// Receiver for path drawing operations.
///
/// The builder describes the symbol outline through this capability and
/// never needs to know what the caller does with it. Operations arrive in
/// emission order, on the calling thread, and every subpath is bracketed by
/// exactly one [`move_to`](PathSink::move_to) and one
/// [`close_path`](PathSink::close_path).
pub trait PathSink {
    /// Begin a new subpath at the given point
    fn move_to(&mut self, point: Point);
    /// Draw a straight line from the current point
    fn line_to(&mut self, point: Point);
    /// Draw a circular arc around `center` from `start_angle` to
    /// `end_angle` (radians, measured from the positive x axis with y
    /// growing downward), in the direction given by `clockwise`
    fn arc_to(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    );
    /// Close the current subpath back to its starting point
    fn close_path(&mut self);
}

/// One recorded drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Begin a subpath
    MoveTo(Point),
    /// Straight segment
    LineTo(Point),
    /// Circular arc
    ArcTo {
        /// Arc center
        center: Point,
        /// Arc radius
        radius: f64,
        /// Angle of the arc start point
        start_angle: f32,
        /// Angle of the arc end point
        end_angle: f32,
        /// Sweep direction
        clockwise: bool,
    },
    /// Close the subpath
    ClosePath,
}

/// A recorded sequence of drawing operations that can be replayed into any
/// [`PathSink`] later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<PathCommand>,
}

impl DisplayList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded operations in emission order
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Number of recorded operations
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every operation into the given sink, in order
    pub fn present<S: PathSink>(&self, sink: &mut S) {
        for op in &self.commands {
            match *op {
                PathCommand::MoveTo(p) => sink.move_to(p),
                PathCommand::LineTo(p) => sink.line_to(p),
                PathCommand::ArcTo {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    clockwise,
                } => sink.arc_to(center, radius, start_angle, end_angle, clockwise),
                PathCommand::ClosePath => sink.close_path(),
            }
        }
    }
}

impl PathSink for DisplayList {
    fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.commands.push(PathCommand::LineTo(point));
    }

    fn arc_to(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) {
        self.commands.push(PathCommand::ArcTo {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        });
    }

    fn close_path(&mut self) {
        self.commands.push(PathCommand::ClosePath);
    }
}

/// Serializes the path protocol into SVG path data.
///
/// Arcs become endpoint `A` commands; a quarter circle never needs the
/// large-arc flag.
#[derive(Debug, Clone, Default)]
pub struct SvgPathSink {
    d: String,
}

impl SvgPathSink {
    /// Create an empty serializer
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated path data string
    pub fn path_data(&self) -> &str {
        self.d.trim_end()
    }
}

impl PathSink for SvgPathSink {
    fn move_to(&mut self, point: Point) {
        let _ = write!(self.d, "M{:.3} {:.3} ", point.x, point.y);
    }

    fn line_to(&mut self, point: Point) {
        let _ = write!(self.d, "L{:.3} {:.3} ", point.x, point.y);
    }

    fn arc_to(
        &mut self,
        center: Point,
        radius: f64,
        _start_angle: f32,
        end_angle: f32,
        clockwise: bool,
    ) {
        let end_x = center.x + radius * f64::from(end_angle.cos());
        let end_y = center.y + radius * f64::from(end_angle.sin());
        let sweep = i32::from(clockwise);
        let _ = write!(
            self.d,
            "A{:.3} {:.3} 0 0 {} {:.3} {:.3} ",
            radius, radius, sweep, end_x, end_y
        );
    }

    fn close_path(&mut self) {
        self.d.push_str("Z ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_replay() {
        let mut list = DisplayList::new();
        list.move_to(Point::new(1.0, 2.0));
        list.line_to(Point::new(3.0, 2.0));
        list.arc_to(Point::new(3.0, 3.0), 1.0, 0.0, 1.0, true);
        list.close_path();
        assert_eq!(list.len(), 4);

        let mut replayed = DisplayList::new();
        list.present(&mut replayed);
        assert_eq!(list, replayed);
    }

    #[test]
    fn test_svg_sink() {
        let mut svg = SvgPathSink::new();
        svg.move_to(Point::new(0.5, 0.0));
        svg.line_to(Point::new(1.5, 0.0));
        // Quarter circle from angle 3pi/2 to 2pi around (1.5, 0.5)
        svg.arc_to(
            Point::new(1.5, 0.5),
            0.5,
            core::f32::consts::PI * 1.5,
            core::f32::consts::PI * 2.0,
            true,
        );
        svg.close_path();

        let d = svg.path_data();
        assert!(d.starts_with("M0.500 0.000 L1.500 0.000 A0.500 0.500 0 0 1 "));
        assert!(d.ends_with("Z"));
        // The arc lands on the right edge of the module
        assert!(d.contains("2.000 0.500"));
    }
}
