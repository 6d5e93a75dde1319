//! Video coding components
//!
//! - `frame`: single-channel sample planes shared by all stages
//! - `me`: diamond-search motion estimation and compensation

pub mod frame;
pub mod me;

pub use frame::{Frame, Plane, Residual};
pub use me::{compress_frame, search_block, FrameMotion, MotionConfig, MotionEstimator};
