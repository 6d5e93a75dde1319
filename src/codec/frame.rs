//! Single-channel sample planes
//!
//! A [`Plane`] is a row-major 2D grid with a stride equal to its width. Input
//! frames are 8-bit luma planes; residuals are signed 16-bit planes wide
//! enough for the full `[-255, 255]` difference range.

use crate::error::{Error, Result};

/// 8-bit single-channel frame
pub type Frame = Plane<u8>;

/// Signed residual plane (current minus motion-compensated reference)
pub type Residual = Plane<i16>;

/// A 2D grid of samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Plane<T> {
    /// Create a zero-filled plane
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }

    /// Create a plane with every sample set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Plane {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Wrap existing row-major sample data
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != width * height {
            return Err(Error::invalid_input(format!(
                "Plane data has {} samples, expected {}x{} = {}",
                data.len(),
                width,
                height,
                width * height
            )));
        }
        Ok(Plane {
            width,
            height,
            data,
        })
    }

    /// Width in samples
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in samples
    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Sample at `(x, y)`
    ///
    /// Panics if the position is outside the plane.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x]
    }

    /// Overwrite the sample at `(x, y)`
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y * self.width + x] = value;
    }

    /// Row `y` as a slice
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Row `y` as a mutable slice
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    /// All samples in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Build a plane of the same shape by mapping every sample
    pub fn map<U, F>(&self, f: F) -> Plane<U>
    where
        U: Copy + Default,
        F: FnMut(T) -> U,
    {
        Plane {
            width: self.width,
            height: self.height,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Fill a rectangle, clipped to the plane bounds
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, value: T) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        if x >= x_end {
            return;
        }
        for row in y..y_end {
            self.row_mut(row)[x..x_end].fill(value);
        }
    }

    /// Whether a `size`x`size` block at `(x, y)` lies fully inside the plane
    #[inline]
    pub fn contains_block(&self, x: usize, y: usize, size: usize) -> bool {
        size <= self.width && size <= self.height && x <= self.width - size && y <= self.height - size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_creation() {
        let plane: Frame = Plane::new(8, 4);
        assert_eq!(plane.dims(), (8, 4));
        assert_eq!(plane.as_slice().len(), 32);
        assert!(plane.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(Frame::from_vec(4, 4, vec![0; 16]).is_ok());
        assert!(matches!(
            Frame::from_vec(4, 4, vec![0; 15]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_get_set_row() {
        let mut plane: Residual = Plane::new(4, 3);
        plane.set(2, 1, -7);
        assert_eq!(plane.get(2, 1), -7);
        assert_eq!(plane.row(1), &[0, 0, -7, 0]);
    }

    #[test]
    fn test_map_keeps_shape() {
        let residual = Residual::from_vec(3, 2, vec![-3, 0, 4, 1, -1, 2]).unwrap();
        let abs: Plane<u16> = residual.map(|v| v.unsigned_abs());
        assert_eq!(abs.dims(), (3, 2));
        assert_eq!(abs.as_slice(), &[3, 0, 4, 1, 1, 2]);
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut plane = Frame::new(6, 6);
        plane.fill_rect(4, 4, 10, 10, 9);
        assert_eq!(plane.get(5, 5), 9);
        assert_eq!(plane.get(3, 3), 0);
        assert_eq!(plane.as_slice().iter().filter(|&&v| v == 9).count(), 4);
    }

    #[test]
    fn test_contains_block() {
        let plane = Frame::new(64, 48);
        assert!(plane.contains_block(48, 32, 16));
        assert!(!plane.contains_block(49, 32, 16));
        assert!(!plane.contains_block(0, 33, 16));
        assert!(!plane.contains_block(0, 0, 65));
    }
}
