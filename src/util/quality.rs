//! Prediction quality metrics
//!
//! MSE and PSNR between two luma planes, plus summary statistics of a
//! residual. Used to report how well a motion-compensated prediction matches
//! the current frame.

use crate::codec::frame::{Frame, Residual};
use crate::error::{Error, Result};

/// Quality of a prediction relative to the frame it approximates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Peak Signal-to-Noise Ratio (dB), infinite for identical planes
    pub psnr: f64,
}

impl QualityMetrics {
    /// Compare `original` against `distorted`
    pub fn analyze(original: &Frame, distorted: &Frame) -> Result<Self> {
        let mse = calculate_mse(original, distorted)?;
        Ok(QualityMetrics {
            mse,
            psnr: mse_to_psnr(mse),
        })
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        if self.psnr.is_infinite() {
            format!("MSE: {:.4}, PSNR: inf", self.mse)
        } else {
            format!("MSE: {:.4}, PSNR: {:.2} dB", self.mse, self.psnr)
        }
    }
}

/// Summary of a residual plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualStats {
    /// Mean absolute residual
    pub mean_abs: f64,
    /// Largest absolute residual
    pub max_abs: u16,
    /// Number of non-zero samples
    pub nonzero: usize,
}

impl ResidualStats {
    pub fn analyze(residual: &Residual) -> Self {
        let samples = residual.as_slice();
        let mut sum = 0u64;
        let mut max_abs = 0u16;
        let mut nonzero = 0usize;

        for &v in samples {
            let abs = v.unsigned_abs();
            sum += abs as u64;
            max_abs = max_abs.max(abs);
            if v != 0 {
                nonzero += 1;
            }
        }

        let mean_abs = if samples.is_empty() {
            0.0
        } else {
            sum as f64 / samples.len() as f64
        };

        ResidualStats {
            mean_abs,
            max_abs,
            nonzero,
        }
    }
}

/// Mean squared error between two equal-sized planes
pub fn calculate_mse(original: &Frame, distorted: &Frame) -> Result<f64> {
    if original.dims() != distorted.dims() {
        return Err(Error::DimensionMismatch {
            current_w: original.width(),
            current_h: original.height(),
            reference_w: distorted.width(),
            reference_h: distorted.height(),
        });
    }

    let samples = original.as_slice();
    if samples.is_empty() {
        return Ok(0.0);
    }

    let sum: u64 = samples
        .iter()
        .zip(distorted.as_slice())
        .map(|(&a, &b)| {
            let diff = a as i32 - b as i32;
            (diff * diff) as u64
        })
        .sum();

    Ok(sum as f64 / samples.len() as f64)
}

/// Convert MSE to PSNR (dB)
fn mse_to_psnr(mse: f64) -> f64 {
    if mse == 0.0 {
        f64::INFINITY
    } else {
        // 8-bit peak
        10.0 * ((255.0 * 255.0) / mse).log10()
    }
}

/// PSNR between two equal-sized planes
pub fn calculate_psnr(original: &Frame, distorted: &Frame) -> Result<f64> {
    Ok(mse_to_psnr(calculate_mse(original, distorted)?))
}
