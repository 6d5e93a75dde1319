//! Two-stage diamond search
//!
//! # Search Process
//!
//! 1. **Coarse (LDSP)**: evaluate the 9-point large diamond around the search
//!    center and move to the strictly cheapest candidate. Repeat until the
//!    center itself wins.
//! 2. **Fine (SDSP)**: evaluate the 5-point small diamond once around the
//!    coarse result and keep the cheapest candidate.
//!
//! The current block never moves; only the reference candidate does. A
//! candidate is valid when its whole block lies inside the reference frame.
//! Ties go to the candidate listed first in the pattern.

use super::estimator::MotionConfig;
use super::mv::{BlockPos, MotionVector};
use super::pattern::SearchPattern;
use super::sad::block_sad;
use crate::codec::frame::Frame;
use crate::error::{Error, Result};
use tracing::{trace, warn};

/// Result of searching a single block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSearch {
    /// Block origin in the current frame
    pub origin: BlockPos,
    /// Best motion vector (reference origin minus current origin)
    pub mv: MotionVector,
    /// SAD of the selected candidate
    pub sad: u64,
    /// Large-diamond rounds evaluated by the coarse stage
    pub coarse_iterations: usize,
}

/// Best candidate of one pattern evaluation
#[derive(Debug, Clone, Copy)]
struct Candidate {
    offset: (i32, i32),
    pos: BlockPos,
    sad: u64,
}

/// Check that two frames can be searched with `block_size` blocks
pub(crate) fn validate_frames(current: &Frame, reference: &Frame, block_size: usize) -> Result<()> {
    if current.dims() != reference.dims() {
        return Err(Error::DimensionMismatch {
            current_w: current.width(),
            current_h: current.height(),
            reference_w: reference.width(),
            reference_h: reference.height(),
        });
    }

    if block_size == 0 || block_size > current.width() || block_size > current.height() {
        return Err(Error::InvalidBlockSize {
            block_size,
            width: current.width(),
            height: current.height(),
        });
    }

    Ok(())
}

/// Diamond search over one frame pair
///
/// Construction validates the frames once; [`DiamondSearch::search`] can then
/// be called for any in-bounds block origin.
#[derive(Debug, Clone, Copy)]
pub struct DiamondSearch<'a> {
    current: &'a Frame,
    reference: &'a Frame,
    block_size: usize,
    max_iterations: usize,
}

impl<'a> DiamondSearch<'a> {
    /// Create a searcher for `current` against `reference`
    pub fn new(current: &'a Frame, reference: &'a Frame, config: &MotionConfig) -> Result<Self> {
        validate_frames(current, reference, config.block_size)?;
        config.validate()?;

        Ok(DiamondSearch {
            current,
            reference,
            block_size: config.block_size,
            max_iterations: config.max_iterations,
        })
    }

    /// Block side length
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Find the motion vector for the block at `(x, y)`
    pub fn search(&self, x: usize, y: usize) -> Result<BlockSearch> {
        if !self.current.contains_block(x, y, self.block_size) {
            return Err(Error::OutOfBounds {
                x,
                y,
                block_size: self.block_size,
                width: self.current.width(),
                height: self.current.height(),
            });
        }

        Ok(self.search_unchecked(BlockPos::new(x, y)))
    }

    /// Search a block already known to be inside the frame
    pub(crate) fn search_unchecked(&self, origin: BlockPos) -> BlockSearch {
        let (center, coarse_iterations) = self.coarse_search(origin);
        let (mv, sad) = self.fine_search(origin, center);

        trace!(
            "block {}: coarse center {} after {} rounds, mv {} sad {}",
            origin,
            center,
            coarse_iterations,
            mv,
            sad
        );

        BlockSearch {
            origin,
            mv,
            sad,
            coarse_iterations,
        }
    }

    /// Large-diamond descent starting at the block origin
    ///
    /// Returns the final center and the number of rounds evaluated.
    fn coarse_search(&self, origin: BlockPos) -> (BlockPos, usize) {
        let mut center = origin;
        let mut iterations = 0;

        loop {
            if iterations == self.max_iterations {
                warn!(
                    "coarse search for block {} stopped at {} after {} rounds",
                    origin, center, iterations
                );
                break;
            }
            iterations += 1;

            match self.best_candidate(origin, center, SearchPattern::Large) {
                Some(best) if best.offset != (0, 0) => {
                    trace!("ldsp {} -> {} sad {}", center, best.pos, best.sad);
                    center = best.pos;
                }
                _ => break,
            }
        }

        (center, iterations)
    }

    /// Single small-diamond pass around `center`
    fn fine_search(&self, origin: BlockPos, center: BlockPos) -> (MotionVector, u64) {
        match self.best_candidate(origin, center, SearchPattern::Small) {
            Some(best) => {
                let mv = MotionVector::new(
                    best.pos.x as i32 - origin.x as i32,
                    best.pos.y as i32 - origin.y as i32,
                );
                (mv, best.sad)
            }
            None => (MotionVector::zero(), self.sad_at(origin, origin)),
        }
    }

    /// Cheapest valid candidate of `pattern` around `center`
    ///
    /// Only a strictly smaller SAD replaces the running best, so earlier
    /// offsets win ties.
    fn best_candidate(
        &self,
        origin: BlockPos,
        center: BlockPos,
        pattern: SearchPattern,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for &(dx, dy) in pattern.offsets() {
            let Some(pos) = self.candidate_pos(center, dx, dy) else {
                continue;
            };

            let sad = self.sad_at(origin, pos);
            if best.map_or(true, |b| sad < b.sad) {
                best = Some(Candidate {
                    offset: (dx, dy),
                    pos,
                    sad,
                });
            }
        }

        best
    }

    /// Reference position for `center + (dx, dy)` if the block fits there
    fn candidate_pos(&self, center: BlockPos, dx: i32, dy: i32) -> Option<BlockPos> {
        let nx = center.x as i64 + dx as i64;
        let ny = center.y as i64 + dy as i64;
        if nx < 0 || ny < 0 {
            return None;
        }

        let (nx, ny) = (nx as usize, ny as usize);
        self.reference
            .contains_block(nx, ny, self.block_size)
            .then_some(BlockPos::new(nx, ny))
    }

    fn sad_at(&self, origin: BlockPos, pos: BlockPos) -> u64 {
        block_sad(
            self.current,
            origin.x,
            origin.y,
            self.reference,
            pos.x,
            pos.y,
            self.block_size,
        )
    }
}

/// Find the motion vector for one block
///
/// Validates the frame pair, the block size and the origin before searching.
pub fn search_block(
    current: &Frame,
    reference: &Frame,
    x: usize,
    y: usize,
    block_size: usize,
) -> Result<MotionVector> {
    let config = MotionConfig::default().with_block_size(block_size);
    let search = DiamondSearch::new(current, reference, &config)?;
    Ok(search.search(x, y)?.mv)
}
