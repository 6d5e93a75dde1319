//! Sum of Absolute Differences
//!
//! The block matching cost. Samples are widened to `i32` before subtracting so
//! 8-bit inputs never wrap.

use crate::codec::frame::Frame;

/// SAD between two strided sample regions of `width` x `height`
pub fn calculate_sad(
    a: &[u8],
    a_stride: usize,
    b: &[u8],
    b_stride: usize,
    width: usize,
    height: usize,
) -> u64 {
    let mut sad = 0u64;

    for y in 0..height {
        let a_row = &a[y * a_stride..y * a_stride + width];
        let b_row = &b[y * b_stride..y * b_stride + width];
        sad += a_row
            .iter()
            .zip(b_row)
            .map(|(&p, &q)| (p as i32 - q as i32).unsigned_abs() as u64)
            .sum::<u64>();
    }

    sad
}

/// SAD between the `size` x `size` block of `current` at `(cur_x, cur_y)` and
/// the block of `reference` at `(ref_x, ref_y)`
///
/// Both blocks must lie inside their frames.
pub fn block_sad(
    current: &Frame,
    cur_x: usize,
    cur_y: usize,
    reference: &Frame,
    ref_x: usize,
    ref_y: usize,
    size: usize,
) -> u64 {
    debug_assert!(current.contains_block(cur_x, cur_y, size));
    debug_assert!(reference.contains_block(ref_x, ref_y, size));

    let cur_start = cur_y * current.width() + cur_x;
    let ref_start = ref_y * reference.width() + ref_x;
    let cur_end = cur_start + (size - 1) * current.width() + size;
    let ref_end = ref_start + (size - 1) * reference.width() + size;

    calculate_sad(
        &current.as_slice()[cur_start..cur_end],
        current.width(),
        &reference.as_slice()[ref_start..ref_end],
        reference.width(),
        size,
        size,
    )
}
