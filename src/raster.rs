//! Addressable pixel grids the codec reads from and writes to.

use crate::color::PackedColor;
use crate::error::CodecError;

/// A `width × height` grid of packed colors read by `(x, y)`.
pub trait PixelSource {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn pixel(&self, x: usize, y: usize) -> PackedColor;
}

/// A `width × height` grid of packed colors written by `(x, y)`.
pub trait PixelSink {
    fn set_pixel(&mut self, x: usize, y: usize, color: PackedColor);
}

/// Owned row-major ARGB raster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<PackedColor>,
}

impl RasterImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![PackedColor::default(); width * height],
        }
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<PackedColor>) -> Result<Self, CodecError> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(CodecError::InvalidArgumentSize {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Builds a raster from rows that must all have the same length.
    pub fn from_rows(rows: &[Vec<PackedColor>]) -> Result<Self, CodecError> {
        let width = check_rows(rows)?;
        Ok(Self {
            width,
            height: rows.len(),
            pixels: rows.concat(),
        })
    }

    /// Interleaved 8-bit `[r, g, b, a]` samples.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, CodecError> {
        let expected = width * height * 4;
        if bytes.len() != expected {
            return Err(CodecError::InvalidArgumentSize {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| PackedColor::from_argb(p[3], p[0], p[1], p[2]))
            .collect();
        Ok(Self { width, height, pixels })
    }

    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_rgba()).collect()
    }

    pub fn pixels(&self) -> &[PackedColor] {
        &self.pixels
    }
}

impl PixelSource for RasterImage {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn pixel(&self, x: usize, y: usize) -> PackedColor {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.pixels[y * self.width + x]
    }
}

impl PixelSink for RasterImage {
    fn set_pixel(&mut self, x: usize, y: usize, color: PackedColor) {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        self.pixels[y * self.width + x] = color;
    }
}

/// Returns the common row length, or the first row that disagrees with
/// row 0. An empty slice has width 0.
pub(crate) fn check_rows<T>(rows: &[Vec<T>]) -> Result<usize, CodecError> {
    let width = rows.first().map_or(0, Vec::len);
    for (row, r) in rows.iter().enumerate().skip(1) {
        if r.len() != width {
            return Err(CodecError::InconsistentRowLength {
                row,
                expected: width,
                found: r.len(),
            });
        }
    }
    Ok(width)
}
