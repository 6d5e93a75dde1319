//! Error handling tests for DSME
//!
//! Malformed calls must fail fast with the right error variant and must not
//! panic, at both the block and the frame entry points.

use std::panic;
use dsme_lib::codec::frame::{Frame, Residual};
use dsme_lib::codec::me::{
    compress_frame, reconstruct, search_block, DiamondSearch, MotionConfig, MotionEstimator,
};
use dsme_lib::error::Error;

#[path = "common/mod.rs"]
mod common;

use common::*;

// ============================================================================
// Helper Functions
// ============================================================================

/// Test that a closure does not panic
fn assert_no_panic<F: FnOnce() -> R + panic::UnwindSafe, R>(f: F, description: &str) {
    let result = panic::catch_unwind(f);
    assert!(result.is_ok(), "Panic occurred: {}", description);
}

// ============================================================================
// Dimension Mismatch
// ============================================================================

mod dimension_tests {
    use super::*;

    #[test]
    fn test_width_mismatch() {
        let current = Frame::new(64, 64);
        let reference = Frame::new(48, 64);

        match compress_frame(&current, &reference, 16) {
            Err(Error::DimensionMismatch {
                current_w,
                reference_w,
                ..
            }) => {
                assert_eq!(current_w, 64);
                assert_eq!(reference_w, 48);
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_height_mismatch_at_block_level() {
        let current = Frame::new(64, 64);
        let reference = Frame::new(64, 63);
        assert!(matches!(
            search_block(&current, &reference, 0, 0, 16),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_mismatch_reported_before_block_size() {
        let current = Frame::new(8, 8);
        let reference = Frame::new(16, 16);
        assert!(matches!(
            compress_frame(&current, &reference, 0),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}

// ============================================================================
// Block Size
// ============================================================================

mod block_size_tests {
    use super::*;

    #[test]
    fn test_zero_block_size() {
        let frame = Frame::new(32, 32);
        assert!(matches!(
            compress_frame(&frame, &frame, 0),
            Err(Error::InvalidBlockSize { block_size: 0, .. })
        ));
    }

    #[test]
    fn test_block_larger_than_either_dimension() {
        let frame = Frame::new(64, 20);
        assert!(matches!(
            compress_frame(&frame, &frame, 32),
            Err(Error::InvalidBlockSize {
                block_size: 32,
                width: 64,
                height: 20
            })
        ));
        assert!(compress_frame(&frame, &frame, 20).is_ok());
    }

    #[test]
    fn test_empty_frames() {
        let frame = Frame::new(0, 0);
        assert!(matches!(
            compress_frame(&frame, &frame, 16),
            Err(Error::InvalidBlockSize { .. })
        ));
    }

    #[test]
    fn test_zero_iteration_cap_rejected() {
        let frame = Frame::new(32, 32);
        let config = MotionConfig::default().with_max_iterations(0);
        assert!(matches!(
            MotionEstimator::new(config).estimate(&frame, &frame),
            Err(Error::Config(_))
        ));
    }
}

// ============================================================================
// Out Of Bounds
// ============================================================================

mod bounds_tests {
    use super::*;

    #[test]
    fn test_origin_past_right_edge() {
        let frame = textured_frame(64, 64);
        match search_block(&frame, &frame, 49, 10, 16) {
            Err(Error::OutOfBounds {
                x,
                y,
                block_size,
                width,
                height,
            }) => {
                assert_eq!((x, y, block_size, width, height), (49, 10, 16, 64, 64));
            }
            other => panic!("expected OutOfBounds, got {:?}", other),
        }
    }

    #[test]
    fn test_origin_far_outside() {
        let frame = textured_frame(64, 64);
        let config = MotionConfig::default();
        let search = DiamondSearch::new(&frame, &frame, &config).unwrap();
        assert!(matches!(
            search.search(usize::MAX / 2, 0),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_last_valid_origin_accepted() {
        let frame = textured_frame(64, 40);
        assert!(search_block(&frame, &frame, 48, 24, 16).is_ok());
        assert!(search_block(&frame, &frame, 48, 25, 16).is_err());
    }

    #[test]
    fn test_reconstruct_rejects_wrong_residual() {
        let frame = textured_frame(32, 32);
        let motion = compress_frame(&frame, &frame, 16).unwrap();
        let residual = Residual::new(32, 16);
        assert!(matches!(
            reconstruct(&frame, &motion.field, &residual),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}

// ============================================================================
// No Panics
// ============================================================================

#[test]
fn test_malformed_inputs_do_not_panic() {
    assert_no_panic(
        || {
            let a = Frame::new(1, 1);
            let b = Frame::new(1, 1);
            let _ = compress_frame(&a, &b, 1);
            let _ = compress_frame(&a, &b, 2);
            let _ = search_block(&a, &b, 1, 1, 1);
        },
        "1x1 frames",
    );

    assert_no_panic(
        || {
            let a = Frame::new(17, 3);
            let _ = compress_frame(&a, &a, 3);
            let _ = search_block(&a, &a, 14, 0, 3);
            let _ = search_block(&a, &a, 15, 0, 3);
        },
        "narrow frames",
    );
}
