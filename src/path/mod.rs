//! Path synthesis: turning a module grid into rounded vector outlines.

/// Outline tracing and rounded-corner emission
pub mod outline;
/// Dark-region discovery and boundary edges
mod region;
/// The drawing callback protocol and recording sinks
pub mod sink;

pub use outline::synthesize;
pub use sink::{DisplayList, PathCommand, PathSink, SvgPathSink};
