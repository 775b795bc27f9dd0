//! C ABI for embedding the builder behind an opaque handle.
//!
//! Drawing callbacks receive the caller's context pointer unchanged; the
//! builder never dereferences or retains it.

use std::ffi::{c_float, c_int, c_void};

use crate::builder::Builder;
use crate::models::{ECLevel, Point, Size};
use crate::path::sink::PathSink;

/// Create a builder for the given bytes, or null when the level selector is
/// out of range or the data cannot be encoded at any supported version.
///
/// # Safety
///
/// `data` must point to at least `length` readable bytes, or be ignored by
/// passing `length == 0`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rqr_builder_create_with_data(
    data: *const u8,
    length: usize,
    ecl: c_int,
    width: c_float,
    height: c_float,
) -> *mut c_void {
    if data.is_null() && length > 0 {
        return std::ptr::null_mut();
    }
    let bytes: &[u8] = if length == 0 {
        &[]
    } else {
        unsafe { std::slice::from_raw_parts(data, length) }
    };
    let Ok(ec_level) = ECLevel::try_from(ecl) else {
        return std::ptr::null_mut();
    };

    let mut builder = Builder::binary(bytes)
        .error_correction_level(ec_level)
        .size(Size::new(f64::from(width), f64::from(height)));
    // Surface every failure here; a non-null handle always builds.
    if builder.prepare().is_err() {
        return std::ptr::null_mut();
    }
    Box::into_raw(Box::new(builder)).cast()
}

/// Replay the symbol outline through the four drawing callbacks.
///
/// A null handle is a no-op. Repeated calls replay the identical cached
/// command sequence.
///
/// # Safety
///
/// `builder` must be null or a handle returned by
/// [`rqr_builder_create_with_data`] that has not been destroyed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rqr_builder_build_path(
    builder: *mut c_void,
    context: *mut c_void,
    move_to_point_fn: extern "C" fn(*mut c_void, c_float, c_float),
    line_to_point_fn: extern "C" fn(*mut c_void, c_float, c_float),
    arc_to_fn: extern "C" fn(*mut c_void, c_float, c_float, c_float, c_float, c_float, c_int),
    close_path_fn: extern "C" fn(*mut c_void),
) {
    if builder.is_null() {
        return;
    }
    let builder = unsafe { &mut *builder.cast::<Builder>() };

    struct ExternSink {
        context: *mut c_void,
        move_to_point_fn: extern "C" fn(*mut c_void, c_float, c_float),
        line_to_point_fn: extern "C" fn(*mut c_void, c_float, c_float),
        arc_to_fn: extern "C" fn(*mut c_void, c_float, c_float, c_float, c_float, c_float, c_int),
        close_path_fn: extern "C" fn(*mut c_void),
    }

    impl PathSink for ExternSink {
        fn move_to(&mut self, point: Point) {
            (self.move_to_point_fn)(self.context, point.x as c_float, point.y as c_float);
        }

        fn line_to(&mut self, point: Point) {
            (self.line_to_point_fn)(self.context, point.x as c_float, point.y as c_float);
        }

        fn arc_to(
            &mut self,
            center: Point,
            radius: f64,
            start_angle: f32,
            end_angle: f32,
            clockwise: bool,
        ) {
            (self.arc_to_fn)(
                self.context,
                center.x as c_float,
                center.y as c_float,
                radius as c_float,
                start_angle,
                end_angle,
                c_int::from(clockwise),
            );
        }

        fn close_path(&mut self) {
            (self.close_path_fn)(self.context);
        }
    }

    let mut sink = ExternSink {
        context,
        move_to_point_fn,
        line_to_point_fn,
        arc_to_fn,
        close_path_fn,
    };
    _ = builder.build_with_sink(&mut sink);
}

/// Destroy a builder handle. Null is a no-op.
///
/// # Safety
///
/// `builder` must be null or a live handle returned by
/// [`rqr_builder_create_with_data`]; it must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn rqr_builder_destroy(builder: *mut c_void) {
    if !builder.is_null() {
        drop(unsafe { Box::from_raw(builder.cast::<Builder>()) });
    }
}
