//! Motion compensation
//!
//! Builds the prediction a decoder would form from a reference frame and a
//! motion field, and adds a residual back to recover the current frame.
//! Pixels outside the block grid are taken from the reference unchanged.

use super::mv::MotionField;
use crate::codec::frame::{Frame, Residual};
use crate::error::{Error, Result};

/// Check that every block of `field` and its match fit inside `reference`
fn validate_field(reference: &Frame, field: &MotionField) -> Result<()> {
    let size = field.block_size;
    if size == 0 {
        return Err(Error::invalid_input("Motion field has zero block size"));
    }

    for block in field {
        let target_x = block.origin.x as i64 + block.mv.dx as i64;
        let target_y = block.origin.y as i64 + block.mv.dy as i64;
        let target_fits = target_x >= 0
            && target_y >= 0
            && reference.contains_block(target_x as usize, target_y as usize, size);

        if !reference.contains_block(block.origin.x, block.origin.y, size) || !target_fits {
            return Err(Error::OutOfBounds {
                x: block.origin.x,
                y: block.origin.y,
                block_size: size,
                width: reference.width(),
                height: reference.height(),
            });
        }
    }

    Ok(())
}

/// Motion-compensated prediction of the current frame
pub fn predict(reference: &Frame, field: &MotionField) -> Result<Frame> {
    validate_field(reference, field)?;

    let size = field.block_size;
    let mut prediction = reference.clone();

    for block in field {
        let src = block.origin.offset(block.mv);
        for y in 0..size {
            let src_row = &reference.row(src.y + y)[src.x..src.x + size];
            prediction.row_mut(block.origin.y + y)[block.origin.x..block.origin.x + size]
                .copy_from_slice(src_row);
        }
    }

    Ok(prediction)
}

/// Rebuild the current frame from `reference`, `field` and `residual`
///
/// Samples are clamped to `0..=255`. For a residual produced by the
/// estimator this returns the current frame exactly inside the block grid.
pub fn reconstruct(reference: &Frame, field: &MotionField, residual: &Residual) -> Result<Frame> {
    if residual.dims() != reference.dims() {
        return Err(Error::DimensionMismatch {
            current_w: residual.width(),
            current_h: residual.height(),
            reference_w: reference.width(),
            reference_h: reference.height(),
        });
    }

    let mut frame = predict(reference, field)?;
    let size = field.block_size;

    for block in field {
        for y in block.origin.y..block.origin.y + size {
            let res_row = &residual.row(y)[block.origin.x..block.origin.x + size];
            let out_row = &mut frame.row_mut(y)[block.origin.x..block.origin.x + size];
            for (out, &r) in out_row.iter_mut().zip(res_row) {
                *out = (*out as i16 + r).clamp(0, 255) as u8;
            }
        }
    }

    Ok(frame)
}
