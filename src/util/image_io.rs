//! Loading and saving frames through the `image` crate
//!
//! Any decoded image is converted to 8-bit luma. Residuals are written as
//! grayscale with a mid-gray bias of 128 so negative values stay visible.

use crate::codec::frame::{Frame, Residual};
use crate::error::{Error, Result};
use image::{GrayImage, ImageBuffer, RgbImage};
use std::path::Path;

/// Decode an image file into a luma frame
pub fn load_luma(path: &Path) -> Result<Frame> {
    let image = image::open(path)?.into_luma8();
    let (width, height) = image.dimensions();
    Frame::from_vec(width as usize, height as usize, image.into_raw())
}

/// Decode an image file as 8-bit RGB
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.into_rgb8())
}

/// Write a luma frame; the format follows the file extension
pub fn save_luma(frame: &Frame, path: &Path) -> Result<()> {
    let image: GrayImage = ImageBuffer::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.as_slice().to_vec(),
    )
    .ok_or_else(|| Error::invalid_input("Frame buffer does not match its dimensions"))?;

    image.save(path)?;
    Ok(())
}

/// Map a residual to a viewable frame: `clamp(r + 128)`
pub fn residual_to_luma(residual: &Residual) -> Frame {
    residual.map(|r| (r + 128).clamp(0, 255) as u8)
}
