//! Common test utilities for DSME integration tests
//!
//! Helpers for building synthetic frame pairs with known motion.

#![allow(dead_code)]

use dsme_lib::codec::frame::Frame;

// ============================================================================
// Frame Generation
// ============================================================================

/// Black frame with a white `size` x `size` square at `(x, y)`
pub fn square_frame(width: usize, height: usize, x: usize, y: usize, size: usize) -> Frame {
    let mut frame = Frame::new(width, height);
    frame.fill_rect(x, y, size, size, 255);
    frame
}

/// Deterministic texture that never repeats within a 256-pixel window
pub fn textured_frame(width: usize, height: usize) -> Frame {
    let mut frame = Frame::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 31 + y * 17 + (x * y) % 7) % 256;
            frame.set(x, y, v as u8);
        }
    }
    frame
}

/// Copy of `frame` with every sample moved by `(dx, dy)`; uncovered samples are `fill`
pub fn shifted_frame(frame: &Frame, dx: isize, dy: isize, fill: u8) -> Frame {
    let (width, height) = frame.dims();
    let mut out = Frame::filled(width, height, fill);
    for y in 0..height {
        for x in 0..width {
            let sx = x as isize - dx;
            let sy = y as isize - dy;
            if sx >= 0 && sy >= 0 && (sx as usize) < width && (sy as usize) < height {
                out.set(x, y, frame.get(sx as usize, sy as usize));
            }
        }
    }
    out
}
