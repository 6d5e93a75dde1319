//! Diamond search patterns
//!
//! Offsets are evaluated in declaration order; on equal cost the earlier
//! offset wins, so the zero offset always comes first.
//!
//! ```text
//!   Large (LDSP)        Small (SDSP)
//!
//!         1
//!      8     2               1
//!   7     0     3         4  0  2
//!      6     4               3
//!         5
//! ```

/// Large diamond: center plus eight points at L1 distance 2
pub const LARGE_DIAMOND: [(i32, i32); 9] = [
    (0, 0),
    (0, -2),
    (1, -1),
    (2, 0),
    (1, 1),
    (0, 2),
    (-1, 1),
    (-2, 0),
    (-1, -1),
];

/// Small diamond: center plus the four direct neighbours
pub const SMALL_DIAMOND: [(i32, i32); 5] = [(0, 0), (0, -1), (1, 0), (0, 1), (-1, 0)];

/// Search pattern selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPattern {
    /// 9-point pattern used by the coarse stage
    Large,
    /// 5-point pattern used by the fine stage
    Small,
}

impl SearchPattern {
    /// Ordered candidate offsets
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            SearchPattern::Large => &LARGE_DIAMOND,
            SearchPattern::Small => &SMALL_DIAMOND,
        }
    }

    /// Number of candidates, including the center
    pub fn point_count(&self) -> usize {
        self.offsets().len()
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchPattern::Large => "ldsp",
            SearchPattern::Small => "sdsp",
        }
    }
}
