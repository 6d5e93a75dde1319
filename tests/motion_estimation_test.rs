//! Motion estimation integration tests
//!
//! Exercises block search and frame-level compression through the public
//! API on synthetic frames with known motion.

use dsme_lib::codec::frame::Frame;
use dsme_lib::codec::me::{
    compress_frame, reconstruct, search_block, BlockPos, MotionConfig, MotionEstimator,
    MotionVector,
};

#[path = "common/mod.rs"]
mod common;

use common::*;

// ============================================================================
// Block Search
// ============================================================================

mod block_search_tests {
    use super::*;

    #[test]
    fn test_static_square() {
        let reference = square_frame(64, 64, 20, 20, 16);
        let current = square_frame(64, 64, 20, 20, 16);

        let mv = search_block(&current, &reference, 20, 20, 16).unwrap();
        assert_eq!(mv, MotionVector::new(0, 0));
    }

    #[test]
    fn test_square_shifted_right() {
        let reference = square_frame(64, 64, 20, 20, 16);
        let current = square_frame(64, 64, 22, 20, 16);

        // Vector points back to where the square was in the reference
        let mv = search_block(&current, &reference, 22, 20, 16).unwrap();
        assert_eq!(mv, MotionVector::new(-2, 0));
    }

    #[test]
    fn test_true_displacement_found_exactly() {
        let reference = square_frame(64, 64, 20, 20, 16);

        for &(x, y) in &[(26, 20), (24, 23), (21, 28), (20, 14), (17, 20)] {
            let current = square_frame(64, 64, x, y, 16);
            let mv = search_block(&current, &reference, x, y, 16).unwrap();
            assert_eq!(
                mv,
                MotionVector::new(20 - x as i32, 20 - y as i32),
                "square moved to ({}, {})",
                x,
                y
            );
        }
    }

    #[test]
    fn test_identical_frames_any_block() {
        let frame = textured_frame(80, 48);
        for y in (0..=32).step_by(8) {
            for x in (0..=64).step_by(8) {
                let mv = search_block(&frame, &frame, x, y, 16).unwrap();
                assert!(mv.is_zero(), "block ({}, {}) got {}", x, y, mv);
            }
        }
    }

    #[test]
    fn test_corner_blocks_stay_in_frame() {
        let reference = textured_frame(64, 64);
        let current = shifted_frame(&reference, 3, -2, 0);

        for &(x, y) in &[(0, 0), (48, 0), (0, 48), (48, 48)] {
            let mv = search_block(&current, &reference, x, y, 16).unwrap();
            let rx = x as i32 + mv.dx;
            let ry = y as i32 + mv.dy;
            assert!((0..=48).contains(&rx) && (0..=48).contains(&ry));
        }
    }
}

// ============================================================================
// Frame Compression
// ============================================================================

mod frame_tests {
    use super::*;

    #[test]
    fn test_field_size_matches_grid() {
        let frame = textured_frame(100, 70);
        let motion = compress_frame(&frame, &frame, 16).unwrap();

        assert_eq!(motion.field.len(), (70 / 16) * (100 / 16));
        assert_eq!(motion.residual.dims(), (100, 70));
    }

    #[test]
    fn test_raster_order() {
        let frame = Frame::new(48, 32);
        let motion = compress_frame(&frame, &frame, 16).unwrap();

        let zero = MotionVector::zero();
        assert_eq!(
            motion.field.vectors(),
            vec![
                (BlockPos::new(0, 0), zero),
                (BlockPos::new(16, 0), zero),
                (BlockPos::new(32, 0), zero),
                (BlockPos::new(0, 16), zero),
                (BlockPos::new(16, 16), zero),
                (BlockPos::new(32, 16), zero),
            ]
        );
    }

    #[test]
    fn test_uncovered_residual_is_zero() {
        let current = Frame::filled(50, 41, 90);
        let reference = Frame::filled(50, 41, 10);
        let motion = compress_frame(&current, &reference, 16).unwrap();

        for y in 0..41 {
            for x in 0..50 {
                let covered = x < 48 && y < 32;
                assert_eq!(motion.residual.get(x, y), if covered { 80 } else { 0 });
            }
        }
    }

    #[test]
    fn test_moving_square_compensated_exactly() {
        // Square moves by (+2, +2); it straddles four blocks of the grid
        let reference = square_frame(64, 64, 16, 16, 16);
        let current = square_frame(64, 64, 18, 18, 16);
        let motion = compress_frame(&current, &reference, 16).unwrap();

        for &(col, row) in &[(1, 1), (2, 1), (1, 2), (2, 2)] {
            let block = motion.field.get(col, row).unwrap();
            assert_eq!(block.mv, MotionVector::new(-2, -2), "block {}", block.origin);
        }
        assert_eq!(motion.field.total_sad(), 0);
        assert!(motion.residual.as_slice().iter().all(|&r| r == 0));
    }

    #[test]
    fn test_zero_vector_identical_region_has_zero_residual() {
        let reference = textured_frame(64, 64);
        let mut current = reference.clone();
        current.fill_rect(40, 40, 8, 8, 255);
        let motion = compress_frame(&current, &reference, 16).unwrap();

        for block in &motion.field {
            let untouched = block.origin.x + 16 <= 40 || block.origin.y + 16 <= 40;
            if untouched {
                assert!(block.mv.is_zero());
                for y in block.origin.y..block.origin.y + 16 {
                    for x in block.origin.x..block.origin.x + 16 {
                        assert_eq!(motion.residual.get(x, y), 0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_reconstruction_matches_current() {
        let reference = textured_frame(96, 64);
        let current = shifted_frame(&reference, 2, 1, 128);
        let motion = compress_frame(&current, &reference, 16).unwrap();

        let rebuilt = reconstruct(&reference, &motion.field, &motion.residual).unwrap();
        assert_eq!(rebuilt, current);
    }

    #[test]
    fn test_repeated_compression_is_bit_identical() {
        let reference = textured_frame(64, 64);
        let current = shifted_frame(&reference, -1, 3, 0);

        let first = compress_frame(&current, &reference, 16).unwrap();
        let second = compress_frame(&current, &reference, 16).unwrap();
        assert_eq!(first.field, second.field);
        assert_eq!(first.residual, second.residual);
    }

    #[test]
    fn test_estimator_with_small_blocks() {
        let reference = square_frame(32, 32, 8, 8, 8);
        let current = square_frame(32, 32, 8, 8, 8);
        let estimator = MotionEstimator::new(MotionConfig::default().with_block_size(8));

        let motion = estimator.estimate(&current, &reference).unwrap();
        assert_eq!(motion.field.len(), 16);
        assert_eq!(motion.field.zero_vector_count(), 16);
    }
}
