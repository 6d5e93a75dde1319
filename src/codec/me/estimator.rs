//! Frame-level motion estimation
//!
//! Splits the current frame into a non-overlapping grid of square blocks,
//! runs a diamond search per block in raster order and computes the residual
//! against the motion-compensated reference.
//!
//! Blocks are laid out from `(0, 0)` with a step of `block_size`. A strip on
//! the right or bottom edge narrower than one block is skipped and its
//! residual stays zero.

use super::diamond::DiamondSearch;
use super::mv::{BlockMotion, BlockPos, MotionField, MotionVector};
use crate::codec::frame::{Frame, Residual};
use crate::error::{Error, Result};
use tracing::debug;

/// Default block side length
pub const DEFAULT_BLOCK_SIZE: usize = 16;

/// Default cap on coarse-stage rounds per block
pub const DEFAULT_MAX_ITERATIONS: usize = 4096;

/// Motion estimation configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionConfig {
    /// Block side length in pixels
    pub block_size: usize,
    /// Maximum large-diamond rounds before the coarse stage gives up
    pub max_iterations: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        MotionConfig {
            block_size: DEFAULT_BLOCK_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl MotionConfig {
    /// Set the block size
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the coarse-stage iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Validate the configuration independent of any frame
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(Error::config("block_size must be at least 1"));
        }

        if self.max_iterations == 0 {
            return Err(Error::config("max_iterations must be at least 1"));
        }

        Ok(())
    }
}

/// Motion field and residual for one frame pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameMotion {
    /// Per-block vectors in raster order
    pub field: MotionField,
    /// Current minus motion-compensated reference
    pub residual: Residual,
}

/// Frame-level motion estimator
#[derive(Debug, Clone, Default)]
pub struct MotionEstimator {
    config: MotionConfig,
}

impl MotionEstimator {
    /// Create a new motion estimator
    pub fn new(config: MotionConfig) -> Self {
        MotionEstimator { config }
    }

    /// Current configuration
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Estimate motion of `current` relative to `reference`
    ///
    /// Fails before touching any block if the frames differ in size or the
    /// block size does not fit.
    pub fn estimate(&self, current: &Frame, reference: &Frame) -> Result<FrameMotion> {
        let search = DiamondSearch::new(current, reference, &self.config)?;
        let block_size = search.block_size();
        let (width, height) = current.dims();
        let cols = width / block_size;
        let rows = height / block_size;

        debug!(
            "estimating {}x{} frame: {}x{} grid of {}px blocks",
            width, height, cols, rows, block_size
        );

        let mut field = MotionField::with_grid(block_size, cols, rows);
        let mut residual = Residual::new(width, height);

        for row in 0..rows {
            for col in 0..cols {
                let origin = BlockPos::new(col * block_size, row * block_size);
                let result = search.search_unchecked(origin);

                write_block_residual(current, reference, origin, result.mv, block_size, &mut residual);

                field.push(BlockMotion {
                    origin,
                    mv: result.mv,
                    sad: result.sad,
                });
            }
        }

        debug!(
            "estimated {} blocks, {} zero vectors, total SAD {}",
            field.len(),
            field.zero_vector_count(),
            field.total_sad()
        );

        Ok(FrameMotion { field, residual })
    }
}

/// Residual of one block: `current[p] - reference[p + mv]`
fn write_block_residual(
    current: &Frame,
    reference: &Frame,
    origin: BlockPos,
    mv: MotionVector,
    block_size: usize,
    residual: &mut Residual,
) {
    let matched = origin.offset(mv);
    debug_assert!(reference.contains_block(matched.x, matched.y, block_size));

    for y in 0..block_size {
        let cur_row = &current.row(origin.y + y)[origin.x..origin.x + block_size];
        let ref_row = &reference.row(matched.y + y)[matched.x..matched.x + block_size];
        let out_row = &mut residual.row_mut(origin.y + y)[origin.x..origin.x + block_size];

        for ((out, &c), &r) in out_row.iter_mut().zip(cur_row).zip(ref_row) {
            *out = c as i16 - r as i16;
        }
    }
}

/// Estimate the motion field and residual with the default iteration cap
pub fn compress_frame(current: &Frame, reference: &Frame, block_size: usize) -> Result<FrameMotion> {
    MotionEstimator::new(MotionConfig::default().with_block_size(block_size)).estimate(current, reference)
}
