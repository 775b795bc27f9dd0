//! rounded_qr - QR codes as smooth vector outlines
//!
//! A pure Rust QR code generator that encodes arbitrary data into a
//! standards-correct symbol and emits it as a rounded-corner vector path
//! instead of a grid of sharp squares. Adjacent dark modules merge into
//! compound shapes whose outlines are streamed through a small
//! move/line/arc/close protocol, ready to feed any 2D drawing surface.
//!
//! ```
//! use rounded_qr::{Builder, DisplayList, ECLevel, Size};
//!
//! let mut builder = Builder::text("https://example.com")
//!     .error_correction_level(ECLevel::Q)
//!     .size(Size::new(200.0, 200.0));
//! let mut path = DisplayList::new();
//! builder.build_with_sink(&mut path).unwrap();
//! assert!(!path.is_empty());
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Builder facade that owns the input and caches grid and path
pub mod builder;
/// Symbol encoding (segments, error correction, matrix assembly, masking)
pub mod encoder;
/// Core data structures (BitMatrix, Point, Size, Version, ECLevel)
pub mod models;
/// Path synthesis (region merging, rounded outlines, sink protocol)
pub mod path;

mod error;

#[cfg(feature = "ffi")]
pub mod ffi;

pub use builder::Builder;
pub use encoder::EncodedSymbol;
pub use error::Error;
pub use models::{BitMatrix, ECLevel, MaskPattern, Point, Size, Version};
pub use path::{DisplayList, PathCommand, PathSink, SvgPathSink};

/// Encode text and record its rounded outline scaled into the given box.
///
/// # Arguments
/// * `text` - Input text; the narrowest encoding mode is chosen per its
///   character classes
/// * `ec_level` - Error correction level
/// * `size` - Target bounding box
///
/// # Returns
/// The recorded path command sequence
pub fn trace_text(text: &str, ec_level: ECLevel, size: Size) -> Result<DisplayList, Error> {
    let mut builder = Builder::text(text)
        .error_correction_level(ec_level)
        .size(size);
    let mut list = DisplayList::new();
    builder.build_with_sink(&mut list)?;
    Ok(list)
}

/// Encode arbitrary bytes and record their rounded outline.
///
/// Byte mode is used regardless of content; see [`trace_text`] for the
/// mode-scanning variant.
pub fn trace_bytes(data: &[u8], ec_level: ECLevel, size: Size) -> Result<DisplayList, Error> {
    let mut builder = Builder::binary(data)
        .error_correction_level(ec_level)
        .size(size);
    let mut list = DisplayList::new();
    builder.build_with_sink(&mut list)?;
    Ok(list)
}
