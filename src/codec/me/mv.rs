//! Motion vectors and motion fields
//!
//! A [`MotionVector`] is the integer displacement from a block's own origin to
//! the origin of its best match in the reference frame:
//!
//! ```text
//! (dx, dy) = reference_origin - current_origin
//! ```
//!
//! The residual stage reads the reference at `origin + mv`, so this sign must
//! not be flipped.

use serde::Serialize;
use std::fmt;

/// Integer-pel motion vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct MotionVector {
    /// Horizontal displacement in pixels
    pub dx: i32,
    /// Vertical displacement in pixels
    pub dy: i32,
}

impl MotionVector {
    /// Create a new motion vector
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Create a zero motion vector
    pub const fn zero() -> Self {
        Self { dx: 0, dy: 0 }
    }

    /// Check if this is a zero motion vector
    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl fmt::Display for MotionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

/// Top-left corner of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct BlockPos {
    pub x: usize,
    pub y: usize,
}

impl BlockPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Position displaced by `mv`
    ///
    /// Callers guarantee the result is non-negative; the search only emits
    /// vectors that land inside the frame.
    pub fn offset(&self, mv: MotionVector) -> BlockPos {
        BlockPos {
            x: (self.x as i64 + mv.dx as i64) as usize,
            y: (self.y as i64 + mv.dy as i64) as usize,
        }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One entry of a motion field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockMotion {
    /// Block origin in the current frame
    pub origin: BlockPos,
    /// Selected motion vector
    pub mv: MotionVector,
    /// SAD of the selected candidate
    pub sad: u64,
}

/// Per-block motion vectors for a frame pair, in raster order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MotionField {
    /// Block side length
    pub block_size: usize,
    /// Blocks per row
    pub cols: usize,
    /// Block rows
    pub rows: usize,
    blocks: Vec<BlockMotion>,
}

impl MotionField {
    /// Create an empty field for a `cols` x `rows` block grid
    pub fn with_grid(block_size: usize, cols: usize, rows: usize) -> Self {
        MotionField {
            block_size,
            cols,
            rows,
            blocks: Vec::with_capacity(cols * rows),
        }
    }

    /// Append the next block in raster order
    pub fn push(&mut self, block: BlockMotion) {
        debug_assert!(self.blocks.len() < self.cols * self.rows);
        self.blocks.push(block);
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the field has no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over blocks in raster order
    pub fn iter(&self) -> std::slice::Iter<'_, BlockMotion> {
        self.blocks.iter()
    }

    /// Block at grid cell `(col, row)`
    pub fn get(&self, col: usize, row: usize) -> Option<&BlockMotion> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.blocks.get(row * self.cols + col)
    }

    /// `(origin, mv)` pairs in raster order
    pub fn vectors(&self) -> Vec<(BlockPos, MotionVector)> {
        self.blocks.iter().map(|b| (b.origin, b.mv)).collect()
    }

    /// Sum of all block SADs
    pub fn total_sad(&self) -> u64 {
        self.blocks.iter().map(|b| b.sad).sum()
    }

    /// Number of blocks with a zero vector
    pub fn zero_vector_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.mv.is_zero()).count()
    }
}

impl<'a> IntoIterator for &'a MotionField {
    type Item = &'a BlockMotion;
    type IntoIter = std::slice::Iter<'a, BlockMotion>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
