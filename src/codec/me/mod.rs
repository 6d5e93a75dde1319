//! Block-based motion estimation
//!
//! # Motion Estimation Process
//!
//! 1. Partition the current frame into `block_size` x `block_size` blocks
//! 2. Large diamond descent from each block's own position
//! 3. One small diamond refinement around the coarse result
//! 4. Residual against the motion-compensated reference block
//!
//! # Cost Function
//!
//! **Cost = SAD** (sum of absolute differences), with no rate term.
//!
//! Motion vectors point from the current block to its match in the reference
//! frame: `(dx, dy) = reference_origin - current_origin`.

pub mod compensate;
pub mod diamond;
pub mod estimator;
pub mod mv;
pub mod pattern;
pub mod sad;

pub use compensate::{predict, reconstruct};
pub use diamond::{search_block, BlockSearch, DiamondSearch};
pub use estimator::{
    compress_frame, FrameMotion, MotionConfig, MotionEstimator, DEFAULT_BLOCK_SIZE,
    DEFAULT_MAX_ITERATIONS,
};
pub use mv::{BlockMotion, BlockPos, MotionField, MotionVector};
pub use pattern::{SearchPattern, LARGE_DIAMOND, SMALL_DIAMOND};
pub use sad::{block_sad, calculate_sad};
