//! Row-major 2-D sample planes.

use crate::error::CodecError;

/// A `width × height` grid stored row-major: cell `(x, y)` lives at
/// `data[y * width + x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Copy> Plane<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, CodecError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(CodecError::InvalidArgumentSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Panics if `(x, y)` lies outside the plane.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.index(x, y)]
    }

    /// Panics if `(x, y)` lies outside the plane.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Copies the top-left `width × height` region, filling cells beyond
    /// this plane's extent with `fill`.
    pub fn resized(&self, width: usize, height: usize, fill: T) -> Self {
        let mut out = Self::filled(width, height, fill);
        for y in 0..height.min(self.height) {
            let n = width.min(self.width);
            out.data[y * width..y * width + n].copy_from_slice(&self.row(y)[..n]);
        }
        out
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "plane index ({}, {}) out of bounds for {}x{} plane",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }
}
